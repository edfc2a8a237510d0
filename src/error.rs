use thiserror::Error;

/// Fatal failure modes. Suspicious-but-workable inputs are reported through
/// [`crate::diagnostics`] instead and never abort a call.
#[derive(Debug, Error)]
pub enum Error {
    /// A supplied coordinate sequence does not cover its axis.
    #[error("coordinate `{dim}` has {coord_len} values for an axis of length {axis_len}")]
    CoordinateLength {
        dim: String,
        coord_len: usize,
        axis_len: usize,
    },

    /// The dimension name list cannot be matched up with the array's axes.
    #[error("{n_dims} dimension names given for an array of rank {rank}")]
    DimensionCount { n_dims: usize, rank: usize },

    /// No recognized information criterion statistic in a comparison table.
    #[error("comparison table must contain one of the information criteria {expected:?}")]
    MissingCriterion { expected: &'static [&'static str] },

    /// A statistic required by the requested comparison output is absent.
    #[error("comparison table is missing required statistic `{column}`")]
    MissingColumn { column: String },

    #[error("comparison table has no rows")]
    EmptyComparison,

    #[error("can't take the {what} of an empty array")]
    EmptyArray { what: &'static str },

    #[error("can't split an empty array of chains")]
    EmptyChains,

    #[error("no samples to split")]
    NoDraws,

    #[error("must have at least {needed} samples to compute {what}, got {actual}")]
    InsufficientDraws {
        what: &'static str,
        needed: usize,
        actual: usize,
    },

    #[error("all values must be finite to compute {what}")]
    NonFinite { what: &'static str },

    #[error("no ESS when elements are all constant (value={value})")]
    ConstantChain { value: f64 },

    #[error("autocovariance estimation failed: {0}")]
    Autocovariance(String),

    /// The diagnostics bridge needs a plain (chain, draw) layout.
    #[error("expected an array with dims [\"chain\", \"draw\"], got {dims:?}")]
    NotChainDraw { dims: Vec<String> },
}

pub type Result<T> = std::result::Result<T, Error>;
