//! The four predictive models.
//!
//! Each model is a pure function over one [`BenchmarkRow`]: no shared
//! state, no ordering dependency between rows, no error path other than
//! the sentinel variants of its return type. A row's bad data affects
//! exactly that row's output cell and nothing else.

use perflens_schemas::{
    AcceleratorFeasibility, BenchmarkRow, CacheRegime, Measure, NA, parse_cell,
};

/// Smallest granularity unit considered to fully amortize per-dispatch
/// overhead on an accelerator. Coarse heuristic boundary, not derived
/// from the row's own data; open to recalibration.
pub const FEASIBLE_GRANULARITY_MIN: f64 = 32.0;

/// Granularity at or below which dispatch overhead dominates outright.
pub const MARGINAL_GRANULARITY_MIN: f64 = 1.0;

/// Granularity boundaries used by the accelerator model.
///
/// Kept as named, recalibratable values rather than literals inside the
/// decision rules. Defaults are [`FEASIBLE_GRANULARITY_MIN`] and
/// [`MARGINAL_GRANULARITY_MIN`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcceleratorThresholds {
    /// `granularity >= feasible_min` → FEASIBLE.
    pub feasible_min: f64,
    /// `marginal_min < granularity < feasible_min` → MARGINAL;
    /// at or below `marginal_min` → UNFEASIBLE.
    pub marginal_min: f64,
}

impl Default for AcceleratorThresholds {
    fn default() -> Self {
        Self {
            feasible_min: FEASIBLE_GRANULARITY_MIN,
            marginal_min: MARGINAL_GRANULARITY_MIN,
        }
    }
}

/// Ratio of recomputation work to base (non-recomputed) arithmetic work.
///
/// `compute_events` already includes recomputed operations, so subtracting
/// `recompute_events` yields the useful baseline the overhead is
/// normalized against. This keeps the ratio comparable across
/// granularities where the total itself scales.
pub fn compute_relative_cost(row: &BenchmarkRow) -> Measure {
    let (Some(recompute), Some(total)) = (
        parse_cell(&row.recompute_events),
        parse_cell(&row.compute_events),
    ) else {
        return Measure::InsufficientData;
    };

    if total <= 0.0 {
        return Measure::InsufficientData;
    }
    let base = total - recompute;
    if base <= 0.0 {
        return Measure::InsufficientData;
    }
    Measure::Value(recompute / base)
}

/// Classifies whether the working set fits within the declared cache
/// budget. The boundary is inclusive: a working set exactly at the budget
/// still fits.
///
/// Both quantities must be in the same unit system; no conversion happens
/// here — that is a contract on the producer of the row.
pub fn predict_cache_regime(row: &BenchmarkRow) -> CacheRegime {
    let (Some(working_set), Some(budget)) = (
        parse_cell(&row.working_set_proxy),
        parse_cell(&row.cache_budget),
    ) else {
        return CacheRegime::InsufficientData;
    };

    if budget == 0.0 {
        return CacheRegime::Unknown;
    }
    if working_set <= budget {
        CacheRegime::Fit
    } else {
        CacheRegime::Spill
    }
}

/// Estimates whether offloading would amortize dispatch overhead.
///
/// Only baseline central-processor runs (`backend_type == "cpu"` with zero
/// dispatch overhead) are evaluated hypothetically. Any other row already
/// reflects a real backend and returns [`AcceleratorFeasibility::Observed`].
pub fn predict_accelerator_feasibility(
    row: &BenchmarkRow,
    thresholds: &AcceleratorThresholds,
) -> AcceleratorFeasibility {
    let (Some(granularity), Some(overhead)) = (
        parse_cell(&row.granularity_unit_size),
        parse_cell(&row.dispatch_overhead_proxy),
    ) else {
        return AcceleratorFeasibility::InsufficientData;
    };
    // A synthesized backend column means we cannot tell whether the run
    // was a baseline CPU run at all.
    if row.backend_type == NA {
        return AcceleratorFeasibility::InsufficientData;
    }

    if row.backend_type == "cpu" && overhead == 0.0 {
        if granularity >= thresholds.feasible_min {
            AcceleratorFeasibility::Feasible
        } else if granularity > thresholds.marginal_min {
            AcceleratorFeasibility::Marginal
        } else {
            AcceleratorFeasibility::Unfeasible
        }
    } else {
        AcceleratorFeasibility::Observed
    }
}

/// Locality index: unit reuse relative to granularity.
///
/// Higher means more reuse per scheduling unit, i.e. better temporal
/// locality.
pub fn compute_locality_index(row: &BenchmarkRow) -> Measure {
    let (Some(reuse), Some(granularity)) = (
        parse_cell(&row.unit_reuse_proxy),
        parse_cell(&row.granularity_unit_size),
    ) else {
        return Measure::InsufficientData;
    };
    if granularity <= 0.0 {
        return Measure::InsufficientData;
    }
    Measure::Value(reuse / granularity)
}
