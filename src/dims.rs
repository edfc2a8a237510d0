use serde_json::Value;

use crate::diagnostics::{Diagnostics, ShapeWarning};
use crate::CoordSpec;

/// Default integer coordinate for an axis: `0, 1, ..., len - 1`.
pub(crate) fn index_coord(len: usize) -> Vec<Value> {
    (0..len as u64).map(Value::from).collect()
}

/// Generate default dimension names and coordinates for one variable.
///
/// `shape` is the variable's own (trailing) shape, excluding any of the
/// reserved `default_dims` axes. `dims` may be shorter than `shape`, longer
/// than it, or contain `None` gaps; every axis without a usable name gets
/// `"{var_name}_dim_{idx}"`. Axes whose final name has no entry in `coords`
/// get an integer index coordinate.
///
/// Supplying more non-reserved names than there are axes records an
/// [`ShapeWarning::ExtraDims`] on `diags` and the excess names are dropped;
/// the returned dims always have length `shape.len()` and the returned
/// coordinate map holds exactly one entry per returned dim. Inputs are
/// copied, never mutated. Caller-supplied coordinate lengths are not
/// validated here; a mismatch surfaces as an error when the labeled array is
/// constructed.
pub fn generate_dims_coords(
    shape: &[usize],
    var_name: &str,
    dims: Option<&[Option<String>]>,
    coords: Option<&CoordSpec>,
    default_dims: &[&str],
    diags: &mut Diagnostics,
) -> (Vec<String>, CoordSpec) {
    let mut dims: Vec<Option<String>> = dims.map(<[_]>::to_vec).unwrap_or_default();
    let mut coords: CoordSpec = coords.cloned().unwrap_or_default();

    let given = dims
        .iter()
        .filter(|dim| match dim {
            Some(name) => !default_dims.contains(&name.as_str()),
            None => true,
        })
        .count();
    if given > shape.len() {
        diags.warn(ShapeWarning::ExtraDims {
            var_name: var_name.to_string(),
            n_dims: dims.len(),
            n_axes: shape.len(),
            default_dims: default_dims.iter().map(|s| s.to_string()).collect(),
        });
    }

    for (idx, &dim_len) in shape.iter().enumerate() {
        if dims.len() < idx + 1 {
            dims.push(None);
        }
        let name = dims[idx]
            .get_or_insert_with(|| format!("{var_name}_dim_{idx}"))
            .clone();
        coords.entry(name).or_insert_with(|| index_coord(dim_len));
    }

    let dims: Vec<String> = dims.into_iter().take(shape.len()).flatten().collect();
    coords.retain(|key, _| dims.iter().any(|dim| dim == key));
    (dims, coords)
}
