use crate::array::LabeledArray;
use crate::error::{Error, Result};
use crate::utils::{mean, sample_variance, split_chains};
use crate::{Array1, Array2};

/// Computes the potential scale reduction (Rhat) for the specified
/// parameter across all kept samples.  Chains are trimmed from the
/// back to match the length of the shortest chain.
///
/// See more details in Stan reference manual section
/// ["Potential Scale Reduction"](https://mc-stan.org/docs/2_24/reference-manual/notation-for-samples-chains-and-draws.html#potential-scale-reduction).
///
/// Based on reference implementation in Stan v2.24.0 at
/// [https://github.com/stan-dev/stan/blob/v2.24.0/src/stan/analyze/mcmc/compute_potential_scale_reduction.hpp]()
pub fn potential_scale_reduction_factor(chains: &Array2) -> Result<f64> {
    if chains.is_empty() {
        return Err(Error::EmptyChains);
    }
    let m = chains.len();
    let n = chains.iter().map(|c| c.len()).min().unwrap_or(0);
    let mut split_chain_mean: Array1 = Vec::new();
    let mut split_chain_var: Array1 = Vec::new();

    for chain in chains.iter().take(m) {
        let chain_mean = mean(chain)?;
        split_chain_mean.push(chain_mean);
        let chain_var = sample_variance(chain)?;
        split_chain_var.push(chain_var);
    }

    let n = n as f64;
    let var_between = n * sample_variance(&split_chain_mean)?;
    let var_within = mean(&split_chain_var)?;
    let result = ((var_between / var_within + n - 1.0) / n).sqrt();

    Ok(result)
}

/// Computes the split potential scale reduction (Rhat) for the
/// specified parameter across all kept samples.  When the number of
/// total draws N is odd, the (N+1)/2th draw is ignored.
///
/// Chains are trimmed from the back to match the
/// length of the shortest chain.
///
/// See more details in Stan reference manual section
/// ["Potential Scale Reduction"](https://mc-stan.org/docs/2_24/reference-manual/notation-for-samples-chains-and-draws.html#potential-scale-reduction)
///
/// Based on reference implementation in Stan v2.24.0 at
/// [https://github.com/stan-dev/stan/blob/v2.24.0/src/stan/analyze/mcmc/compute_potential_scale_reduction.hpp]()
pub fn split_potential_scale_reduction_factor(chains: &Array2) -> Result<f64> {
    let num_draws = chains.iter().map(|c| c.len()).min().unwrap_or(0);
    // trim chains to the length of the shortest chain
    let mut trimmed = Vec::new();
    for chain in chains.iter() {
        trimmed.push(chain[..num_draws].to_vec());
    }
    let split = split_chains(trimmed)?;
    potential_scale_reduction_factor(&split)
}

/// Split Rhat for a labeled array laid out as `(chain, draw)`.
pub fn split_potential_scale_reduction_for(array: &LabeledArray) -> Result<f64> {
    split_potential_scale_reduction_factor(&array.chain_draws()?)
}
