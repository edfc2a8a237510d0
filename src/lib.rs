//! A Rust library for turning the raw numeric output of MCMC samplers into
//! labeled, self-describing datasets: named dimensions, coordinate labels,
//! and attribute metadata, with model-comparison data preparation and
//! sampling diagnostics (effective sample size, split Rhat, MCSE) layered
//! on top of the labeled data.
//!
//! This crate is language agnostic and intended to work with the outputs of
//! any MCMC sampler (e.g. Stan, PyMC3, Turing.jl, etc.)
#[cfg(test)]
#[macro_use]
extern crate approx;

use std::collections::BTreeMap;

/// Labeled n-dimensional arrays and the chain/draw labeling convention
pub mod array;
/// Dataset attribute records (creation timestamp, inference engine metadata)
pub mod attrs;
/// Model-comparison tables and presentation-ready comparison data
pub mod compare;
/// Labeled datasets assembled from mappings of named raw arrays
pub mod dataset;
/// Structured non-fatal warnings about suspicious shapes
pub mod diagnostics;
/// Dimension name and coordinate inference for raw array shapes
pub mod dims;
/// Crate-wide error type
pub mod error;
/// Effective Sample Size (ESS)
pub mod ess;
/// Optional-field container for the conventional dataset groups
pub mod groups;
/// Gelman-Rubin split potential scale reduction (Rhat)
pub mod rhat;
/// Convenience utilities like chain splitting and certain helper functions
/// intended mostly for internal use to avoid external dependencies (e.g.
/// summary statistics)
pub mod utils;

/// One-dimensional vector of numeric values
pub type Array1 = Vec<f64>;
/// Two dimensional vector of vectors of numeric values
pub type Array2 = Vec<Array1>;
/// Map of dimension names to ordered coordinate label sequences
pub type CoordSpec = BTreeMap<String, Vec<serde_json::Value>>;
/// Per-variable dimension names; `None` entries are gaps filled by inference
pub type DimSpec = BTreeMap<String, Vec<Option<String>>>;
/// JSON-serializable dataset attributes, iterating in insertion order
pub type AttributeMap = serde_json::Map<String, serde_json::Value>;
