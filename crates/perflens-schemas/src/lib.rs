//! Schema definitions for perflens tabular formats.
//!
//! This crate contains the data structures shared across the perflens
//! pipeline: the benchmark row read from the external compute engine's
//! log, the derived prediction record, and the closed label sets the
//! analysis phases emit.
//!
//! The schemas are designed to be:
//! - **Sentinel-disciplined**: absent or invalid data is always one of a
//!   small set of reserved strings (`NA`, `INSUFFICIENT_DATA`, `UNKNOWN`),
//!   never a silent zero and never a panic
//! - **Stable**: output column names and label strings are a consumer
//!   contract; changing them requires updating the golden expectations
//! - **Shared**: used by both the predictive-analysis and regime-mapping
//!   phases so the two pipelines cannot drift apart
//!
//! Why: keeping schemas in one crate guarantees consistent serialization
//! contracts across normalization, prediction, and regime mapping.

mod prediction;
mod row;
#[cfg(test)]
mod testutil;

#[doc(inline)]
pub use prediction::*;
#[doc(inline)]
pub use row::*;
