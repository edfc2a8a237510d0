use std::fmt;

use serde::Serialize;

/// A non-fatal finding about a suspicious input shape. Inference proceeds
/// best-effort after any of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ShapeWarning {
    /// More dimension names were supplied than the array has axes.
    ExtraDims {
        var_name: String,
        n_dims: usize,
        n_axes: usize,
        default_dims: Vec<String>,
    },
    /// The chain axis is longer than the draw axis, which usually means the
    /// caller passed the axes in the wrong order.
    MoreChainsThanDraws { n_chains: usize, n_draws: usize },
}

impl fmt::Display for ShapeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeWarning::ExtraDims {
                var_name,
                n_dims,
                n_axes,
                default_dims,
            } => {
                let mut defaults = default_dims.join(", ");
                if !defaults.is_empty() {
                    defaults.push_str(", ");
                }
                write!(
                    f,
                    "in variable `{var_name}`, there are more dims ({n_dims}) given than exist \
                     ({n_axes}); passed array should have shape ({defaults}*shape)"
                )
            }
            ShapeWarning::MoreChainsThanDraws { n_chains, n_draws } => write!(
                f,
                "more chains ({n_chains}) than draws ({n_draws}); passed array should have \
                 shape (chains, draws, *shape)"
            ),
        }
    }
}

/// Caller-supplied sink for [`ShapeWarning`]s. Each recorded warning is also
/// forwarded to the `log` facade so embedding applications see it without
/// inspecting the sink.
#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Vec<ShapeWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: ShapeWarning) {
        log::warn!("{warning}");
        self.records.push(warning);
    }

    pub fn records(&self) -> &[ShapeWarning] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<ShapeWarning> {
        self.records
    }
}
