use ndarray::{ArrayD, Axis};
use serde_json::Value;

use crate::diagnostics::{Diagnostics, ShapeWarning};
use crate::dims::{generate_dims_coords, index_coord};
use crate::error::{Error, Result};
use crate::{Array2, CoordSpec};

/// Dimension names reserved for the sampling axes.
pub const DEFAULT_DIMS: [&str; 2] = ["chain", "draw"];

/// One named axis with its ordered coordinate labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    pub name: String,
    pub values: Vec<Value>,
}

/// An n-dimensional array of samples with one [`Coordinate`] per axis, in
/// axis order. The dimension names are the coordinate names.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledArray {
    values: ArrayD<f64>,
    coords: Vec<Coordinate>,
}

impl LabeledArray {
    /// Pair raw values with per-axis coordinates, validating that every axis
    /// is covered and every coordinate matches its axis length.
    pub fn new(values: ArrayD<f64>, coords: Vec<Coordinate>) -> Result<Self> {
        if coords.len() != values.ndim() {
            return Err(Error::DimensionCount {
                n_dims: coords.len(),
                rank: values.ndim(),
            });
        }
        for (coord, &axis_len) in coords.iter().zip(values.shape()) {
            if coord.values.len() != axis_len {
                return Err(Error::CoordinateLength {
                    dim: coord.name.clone(),
                    coord_len: coord.values.len(),
                    axis_len,
                });
            }
        }
        Ok(Self { values, coords })
    }

    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// Dimension names in axis order.
    pub fn dims(&self) -> Vec<&str> {
        self.coords.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn coord(&self, name: &str) -> Option<&Coordinate> {
        self.coords.iter().find(|c| c.name == name)
    }

    /// View the samples as chains of draws, the working representation of
    /// the diagnostics in [`crate::ess`] and [`crate::rhat`]. Only arrays
    /// laid out exactly as `(chain, draw)` can be viewed this way.
    pub fn chain_draws(&self) -> Result<Array2> {
        if self.dims() != DEFAULT_DIMS {
            return Err(Error::NotChainDraw {
                dims: self.dims().iter().map(|d| d.to_string()).collect(),
            });
        }
        Ok(self
            .values
            .outer_iter()
            .map(|chain| chain.iter().copied().collect())
            .collect())
    }
}

/// Label a raw sample array following the `(chain, draw, *shape)` convention.
///
/// Rank-1 input is read as the draws of a single chain; higher ranks use
/// axis 0 as the chain axis and axis 1 as the draw axis, and any remaining
/// axes go through dimension/coordinate inference under `var_name`. A chain
/// axis longer than the draw axis is suspicious and recorded on `diags`,
/// but still labeled.
///
/// The reserved `chain` and `draw` coordinates come from the caller's
/// `coords` when present, otherwise integer indexes. Fails with
/// [`Error::CoordinateLength`] if any supplied coordinate does not match its
/// axis length.
pub fn to_labeled_array(
    ary: ArrayD<f64>,
    var_name: &str,
    coords: Option<&CoordSpec>,
    dims: Option<&[Option<String>]>,
    diags: &mut Diagnostics,
) -> Result<LabeledArray> {
    let mut ary = ary;
    while ary.ndim() < 2 {
        ary = ary.insert_axis(Axis(0));
    }
    let (n_chains, n_draws) = (ary.shape()[0], ary.shape()[1]);
    if n_chains > n_draws {
        diags.warn(ShapeWarning::MoreChainsThanDraws { n_chains, n_draws });
    }

    let free_shape = ary.shape()[2..].to_vec();
    let (mut final_dims, mut free_coords) =
        generate_dims_coords(&free_shape, var_name, dims, coords, &DEFAULT_DIMS, diags);

    if !final_dims.iter().any(|d| d == "draw") {
        let at = final_dims
            .iter()
            .position(|d| d == "chain")
            .map_or(0, |i| i + 1);
        final_dims.insert(at, "draw".to_string());
    }
    if !final_dims.iter().any(|d| d == "chain") {
        final_dims.insert(0, "chain".to_string());
    }

    let supplied = |name: &str| coords.and_then(|c| c.get(name).cloned());
    let labeled = final_dims
        .iter()
        .map(|dim| {
            let values = match dim.as_str() {
                "chain" => supplied("chain").unwrap_or_else(|| index_coord(n_chains)),
                "draw" => supplied("draw").unwrap_or_else(|| index_coord(n_draws)),
                name => free_coords.remove(name).unwrap_or_default(),
            };
            Coordinate {
                name: dim.clone(),
                values,
            }
        })
        .collect();
    LabeledArray::new(ary, labeled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, IxDyn};
    use serde_json::json;

    fn zeros(shape: &[usize]) -> ArrayD<f64> {
        Array::zeros(IxDyn(shape))
    }

    fn label(ary: ArrayD<f64>, var_name: &str) -> LabeledArray {
        let mut diags = Diagnostics::new();
        to_labeled_array(ary, var_name, None, None, &mut diags).unwrap()
    }

    #[test]
    fn test_rank2_defaults() {
        let labeled = label(zeros(&[4, 100]), "mu");
        assert_eq!(labeled.dims(), vec!["chain", "draw"]);
        assert_eq!(
            labeled.coord("chain").unwrap().values,
            vec![json!(0), json!(1), json!(2), json!(3)]
        );
        assert_eq!(labeled.coord("draw").unwrap().values.len(), 100);
    }

    #[test]
    fn test_rank3_free_dim() {
        let labeled = label(zeros(&[4, 100, 8]), "theta");
        assert_eq!(labeled.dims(), vec!["chain", "draw", "theta_dim_0"]);
        assert_eq!(labeled.coord("theta_dim_0").unwrap().values.len(), 8);
    }

    #[test]
    fn test_rank1_is_a_single_chain() {
        let ary = Array::from_vec(vec![1.0, 2.0, 3.0]).into_dyn();
        let labeled = label(ary, "x");
        assert_eq!(labeled.shape(), &[1, 3]);
        assert_eq!(labeled.dims(), vec!["chain", "draw"]);
    }

    #[test]
    fn test_rank0_is_a_single_draw() {
        let ary = Array::from_elem(IxDyn(&[]), 7.0);
        let labeled = label(ary, "x");
        assert_eq!(labeled.shape(), &[1, 1]);
        assert_eq!(labeled.values()[[0, 0]], 7.0);
    }

    #[test]
    fn test_custom_chain_coords_survive() {
        let mut coords = CoordSpec::new();
        coords.insert("chain".to_string(), vec![json!("a"), json!("b")]);
        let mut diags = Diagnostics::new();
        let labeled =
            to_labeled_array(zeros(&[2, 50]), "mu", Some(&coords), None, &mut diags).unwrap();
        assert_eq!(
            labeled.coord("chain").unwrap().values,
            vec![json!("a"), json!("b")]
        );
    }

    #[test]
    fn test_coordinate_length_mismatch_is_fatal() {
        let mut coords = CoordSpec::new();
        coords.insert(
            "x_dim_0".to_string(),
            vec![json!(0), json!(1), json!(2)],
        );
        let mut diags = Diagnostics::new();
        let err = to_labeled_array(zeros(&[2, 10, 4]), "x", Some(&coords), None, &mut diags)
            .unwrap_err();
        match err {
            Error::CoordinateLength {
                dim,
                coord_len,
                axis_len,
            } => {
                assert_eq!(dim, "x_dim_0");
                assert_eq!(coord_len, 3);
                assert_eq!(axis_len, 4);
            }
            other => panic!("expected CoordinateLength, got {other:?}"),
        }
    }

    #[test]
    fn test_more_chains_than_draws_warns_but_labels() {
        let mut diags = Diagnostics::new();
        let labeled = to_labeled_array(zeros(&[10, 5]), "mu", None, None, &mut diags).unwrap();
        assert_eq!(
            diags.records(),
            &[ShapeWarning::MoreChainsThanDraws {
                n_chains: 10,
                n_draws: 5
            }]
        );
        assert_eq!(labeled.coord("chain").unwrap().values.len(), 10);
        assert_eq!(labeled.coord("draw").unwrap().values.len(), 5);
    }

    #[test]
    fn test_explicit_free_dims_and_coords() {
        let mut coords = CoordSpec::new();
        coords.insert(
            "school".to_string(),
            vec![json!("choate"), json!("deerfield")],
        );
        let given = vec![Some("school".to_string())];
        let mut diags = Diagnostics::new();
        let labeled =
            to_labeled_array(zeros(&[4, 20, 2]), "eta", Some(&coords), Some(given.as_slice()), &mut diags)
                .unwrap();
        assert_eq!(labeled.dims(), vec!["chain", "draw", "school"]);
        assert_eq!(
            labeled.coord("school").unwrap().values,
            vec![json!("choate"), json!("deerfield")]
        );
    }

    #[test]
    fn test_relabeling_is_idempotent() {
        let mut diags = Diagnostics::new();
        let first = to_labeled_array(zeros(&[2, 30, 3]), "tau", None, None, &mut diags).unwrap();
        let dims: Vec<Option<String>> = first.dims()[2..]
            .iter()
            .map(|d| Some(d.to_string()))
            .collect();
        let coords: CoordSpec = first
            .coords()
            .iter()
            .map(|c| (c.name.clone(), c.values.clone()))
            .collect();
        let second = to_labeled_array(
            first.values().clone(),
            "tau",
            Some(&coords),
            Some(dims.as_slice()),
            &mut diags,
        )
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_chain_draws_bridge() {
        let ary = Array::from_shape_vec(IxDyn(&[2, 3]), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .unwrap();
        let labeled = label(ary, "x");
        let chains = labeled.chain_draws().unwrap();
        assert_eq!(chains, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);

        let with_free = label(zeros(&[2, 3, 4]), "x");
        assert!(matches!(
            with_free.chain_draws(),
            Err(Error::NotChainDraw { .. })
        ));
    }

    #[test]
    fn test_new_rejects_uncovered_axes() {
        let err = LabeledArray::new(zeros(&[2, 2]), vec![]).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionCount { n_dims: 0, rank: 2 }
        ));
    }
}
