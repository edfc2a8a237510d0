use crate::dataset::Dataset;
use crate::DimSpec;

/// The conventional groups of a sampling run, each present or not. Callers
/// branch on field presence instead of probing attributes at runtime.
#[derive(Debug, Clone, Default)]
pub struct InferenceData {
    pub posterior: Option<Dataset>,
    pub posterior_predictive: Option<Dataset>,
    pub sample_stats: Option<Dataset>,
    pub prior: Option<Dataset>,
    pub observed_data: Option<Dataset>,
    pub constant_data: Option<Dataset>,
}

impl InferenceData {
    /// Variable names of the posterior, taken from the prior group when no
    /// posterior is present.
    pub fn posterior_var_names(&self) -> Vec<String> {
        [&self.posterior, &self.prior]
            .into_iter()
            .flatten()
            .next()
            .map(|dataset| dataset.var_names().iter().map(|s| s.to_string()).collect())
            .unwrap_or_default()
    }

    /// Number of chains and draws, read from the first of posterior,
    /// sample stats, or posterior predictive that carries both coordinates.
    pub fn posterior_nchains_ndraws(&self) -> Option<(usize, usize)> {
        for dataset in [
            &self.posterior,
            &self.sample_stats,
            &self.posterior_predictive,
        ]
        .into_iter()
        .flatten()
        {
            if let (Some(chains), Some(draws)) =
                (dataset.dim_len("chain"), dataset.dim_len("draw"))
            {
                return Some((chains, draws));
            }
        }
        None
    }

    /// Per-variable dimension names for the prediction groups.
    ///
    /// Caller `overrides` are returned verbatim when given. Otherwise
    /// posterior-predictive variables contribute their dims after the chain
    /// and draw axes, while observed-data and constant-data variables
    /// contribute their full dims.
    pub fn predictions_dims(&self, overrides: Option<DimSpec>) -> DimSpec {
        if let Some(overrides) = overrides {
            return overrides;
        }
        let mut dims = DimSpec::new();
        if let Some(dataset) = &self.posterior_predictive {
            for (name, array) in dataset.variables() {
                dims.insert(
                    name.to_string(),
                    array
                        .dims()
                        .iter()
                        .skip(2)
                        .map(|d| Some(d.to_string()))
                        .collect(),
                );
            }
        }
        for dataset in [&self.observed_data, &self.constant_data]
            .into_iter()
            .flatten()
        {
            for (name, array) in dataset.variables() {
                dims.insert(
                    name.to_string(),
                    array.dims().iter().map(|d| Some(d.to_string())).collect(),
                );
            }
        }
        dims
    }
}
