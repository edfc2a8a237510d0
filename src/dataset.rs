use ndarray::ArrayD;

use crate::array::{to_labeled_array, LabeledArray};
use crate::attrs::{make_attrs, InferenceEngine};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::{AttributeMap, CoordSpec, DimSpec};

/// Named labeled arrays plus an attribute record. Variables keep the
/// insertion order they were assembled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    variables: Vec<(String, LabeledArray)>,
    attrs: AttributeMap,
}

impl Dataset {
    pub fn new(variables: Vec<(String, LabeledArray)>, attrs: AttributeMap) -> Self {
        Self { variables, attrs }
    }

    pub fn variable(&self, name: &str) -> Option<&LabeledArray> {
        self.variables
            .iter()
            .find(|(var_name, _)| var_name == name)
            .map(|(_, array)| array)
    }

    /// Variables in insertion order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &LabeledArray)> {
        self.variables
            .iter()
            .map(|(name, array)| (name.as_str(), array))
    }

    pub fn var_names(&self) -> Vec<&str> {
        self.variables.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn attrs(&self) -> &AttributeMap {
        &self.attrs
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Dataset-level coordinate view, merged across variables in insertion
    /// order. When two variables use the same dimension name with different
    /// coordinate values, the later variable's values win, unchecked.
    pub fn coords(&self) -> CoordSpec {
        let mut merged = CoordSpec::new();
        for (_, array) in &self.variables {
            for coord in array.coords() {
                merged.insert(coord.name.clone(), coord.values.clone());
            }
        }
        merged
    }

    /// Length of a shared dimension, read from the merged coordinate view.
    pub fn dim_len(&self, dim: &str) -> Option<usize> {
        self.coords().get(dim).map(Vec::len)
    }
}

/// Assemble a labeled dataset from named raw sample arrays.
///
/// Every `(name, values)` pair is labeled with [`to_labeled_array`], with
/// `coords` shared across all variables and `dims` consulted per variable
/// name. Attributes come from [`make_attrs`] extended by `attrs`.
///
/// Fails fast on the first variable whose shape is inconsistent with the
/// supplied coordinates; variables labeled before the failure are
/// discarded, not rolled back into a partial dataset.
pub fn to_dataset<I, S>(
    data: I,
    attrs: Option<&AttributeMap>,
    engine: Option<&dyn InferenceEngine>,
    coords: Option<&CoordSpec>,
    dims: Option<&DimSpec>,
    diags: &mut Diagnostics,
) -> Result<Dataset>
where
    I: IntoIterator<Item = (S, ArrayD<f64>)>,
    S: Into<String>,
{
    let mut variables = Vec::new();
    for (name, values) in data {
        let name = name.into();
        let var_dims = dims.and_then(|d| d.get(&name)).map(Vec::as_slice);
        let array = to_labeled_array(values, &name, coords, var_dims, diags)?;
        variables.push((name, array));
    }
    Ok(Dataset {
        variables,
        attrs: make_attrs(attrs, engine),
    })
}
