//! Derived record schema and the closed label sets the models emit.
//!
//! Output columns are a tagged union of {real number, sentinel string}:
//! consumers must not read the prediction columns as pure floats. The
//! label strings below are a serialization contract — they appear verbatim
//! in the output tables.
//!
//! Why: modeling each label set as a closed enum makes "sentinel closure"
//! a type-system fact: a model cannot emit a numeric value for a row it
//! failed to parse, and cannot emit a label outside its set.

use serde::{Serialize, Serializer};

/// A derived numeric measure: either a real value or the
/// `INSUFFICIENT_DATA` sentinel for rows whose inputs were missing,
/// unparseable, or arithmetically degenerate.
///
/// Serializes as a bare number or the literal sentinel string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    /// A successfully computed value.
    Value(f64),
    /// Required inputs were absent, non-numeric, or degenerate.
    InsufficientData,
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::InsufficientData => serializer.serialize_str("INSUFFICIENT_DATA"),
        }
    }
}

/// Whether a run's working set fits within its declared cache budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheRegime {
    /// Working set is within the budget (inclusive boundary).
    Fit,
    /// Working set exceeds the budget.
    Spill,
    /// No budget declared (`cache_budget == 0`); cannot judge.
    Unknown,
    /// Required inputs were absent or non-numeric.
    InsufficientData,
}

impl CacheRegime {
    /// The literal string written to the output table.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fit => "FIT",
            Self::Spill => "SPILL",
            Self::Unknown => "UNKNOWN",
            Self::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

/// Whether offloading a CPU run's workload to an accelerator would
/// amortize per-dispatch overhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceleratorFeasibility {
    /// Scheduling units are large enough to amortize dispatch cost.
    Feasible,
    /// Units amortize some but not all dispatch cost.
    Marginal,
    /// Units are too small; dispatch overhead would dominate.
    Unfeasible,
    /// The row already reflects a real non-CPU backend; no prediction made.
    Observed,
    /// Required inputs were absent or non-numeric.
    InsufficientData,
}

impl AcceleratorFeasibility {
    /// The literal string written to the output table.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feasible => "FEASIBLE",
            Self::Marginal => "MARGINAL",
            Self::Unfeasible => "UNFEASIBLE",
            Self::Observed => "OBSERVED",
            Self::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

/// The dominant performance regime of a run, judged from raw counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Recomputation exceeds half of all arithmetic work.
    RecomputationDominated,
    /// Arithmetic work is high relative to memory traffic.
    ComputeBound,
    /// Memory traffic exceeds arithmetic work.
    MemoryBound,
    /// No single resource dominates.
    Balanced,
    /// The row's counters could not be read; no judgement made.
    Unknown,
}

impl Regime {
    /// The literal string written to the `observed_regime` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RecomputationDominated => "RECOMPUTATION_DOMINATED",
            Self::ComputeBound => "COMPUTE_BOUND",
            Self::MemoryBound => "MEMORY_BOUND",
            Self::Balanced => "BALANCED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

macro_rules! impl_label_serde {
    ($($ty:ty),*) => {$(
        impl Serialize for $ty {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

impl_label_serde!(CacheRegime, AcceleratorFeasibility, Regime);

/// One derived row of the predictions table.
///
/// Keyed by the identity columns, which are echoed verbatim from the input
/// row (including `granularity_unit_size`, which stays a raw cell so the
/// output reproduces the input's formatting byte for byte). Every input
/// row yields exactly one `PredictionRecord`; failures surface as sentinel
/// cells, never as a dropped row.
///
/// Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    pub algorithm: String,
    pub variant: String,
    pub platform: String,
    pub backend_type: String,
    pub granularity_unit_size: String,
    /// Recomputation work relative to base arithmetic work.
    pub relative_cost_ratio: Measure,
    /// Cache fit classification.
    pub cache_regime: CacheRegime,
    /// Hypothetical offload feasibility.
    pub accelerator_feasibility: AcceleratorFeasibility,
    /// Unit reuse relative to granularity.
    pub locality_index: Measure,
}
