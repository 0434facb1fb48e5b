//! Predictive analysis over benchmark logs.
//!
//! This crate derives human-interpretable performance classifications from
//! per-run benchmark measurements: how much overhead recomputation adds
//! relative to baseline arithmetic, whether the working set fits a cache
//! budget, whether offloading to an accelerator would amortize dispatch
//! overhead, and how much temporal locality a run's scheduling unit has.
//!
//! ## Pipeline
//!
//! 1. Read the benchmark log (CSV, header-named columns)
//! 2. **Normalize**: synthesize the literal `NA` for required columns the
//!    table lacks, producing a new table — downstream models never fail on
//!    a missing column
//! 3. Run the four models independently over each row
//! 4. Assemble one [`PredictionRecord`] per input row and write the
//!    predictions table
//!
//! Every row-level failure (missing field, junk cell, degenerate
//! denominator) is local to that row and surfaces as a sentinel cell. The
//! mapping from input rows to output rows is total: the output has exactly
//! as many rows as the input, always.
//!
//! ## Usage
//!
//! ```no_run
//! use perflens_predict::{AcceleratorThresholds, run};
//!
//! let input = std::io::stdin().lock();
//! let mut output = Vec::new();
//! run(input, &mut output, &AcceleratorThresholds::default()).unwrap();
//! ```

mod error;
mod models;

use std::io::{Read, Write};

use csv::StringRecord;
use indexmap::IndexMap;
use perflens_schemas::{
    BenchmarkRow, NA, PredictionRecord, REQUIRED_ANALYSIS_COLUMNS,
};
use tracing::debug;

#[doc(inline)]
pub use crate::error::PredictError;
pub use crate::models::{
    AcceleratorThresholds, FEASIBLE_GRANULARITY_MIN, MARGINAL_GRANULARITY_MIN,
    compute_locality_index, compute_relative_cost,
    predict_accelerator_feasibility, predict_cache_regime,
};

/// Builds [`BenchmarkRow`]s from raw CSV records, synthesizing the `NA`
/// placeholder for any recognized column the table lacks.
///
/// This is an explicit normalization pass producing a new table; the
/// source records are not modified. Columns beyond the recognized schema
/// are ignored. Identity columns absent from the table are synthesized the
/// same way as analysis columns, so a sparse log still yields one output
/// row per input row.
pub fn normalize(
    headers: &StringRecord,
    records: &[StringRecord],
) -> Vec<BenchmarkRow> {
    // Header position lookup; the first occurrence wins if a header
    // repeats.
    let mut columns: IndexMap<&str, usize> = IndexMap::new();
    for (idx, name) in headers.iter().enumerate() {
        columns.entry(name).or_insert(idx);
    }

    let missing: Vec<&str> = REQUIRED_ANALYSIS_COLUMNS
        .iter()
        .copied()
        .filter(|name| !columns.contains_key(name))
        .collect();
    if !missing.is_empty() {
        debug!(?missing, "synthesizing NA for absent analysis columns");
    }

    let cell = |record: &StringRecord, name: &str| -> String {
        columns
            .get(name)
            .and_then(|&idx| record.get(idx))
            .unwrap_or(NA)
            .to_owned()
    };

    records
        .iter()
        .map(|record| BenchmarkRow {
            algorithm: cell(record, "algorithm"),
            variant: cell(record, "variant"),
            platform: cell(record, "platform"),
            backend_type: cell(record, "backend_type"),
            runtime_us: cell(record, "runtime_us"),
            compute_events: cell(record, "compute_events"),
            recompute_events: cell(record, "recompute_events"),
            memory_access_proxy: cell(record, "memory_access_proxy"),
            granularity_unit_size: cell(record, "granularity_unit_size"),
            dispatch_overhead_proxy: cell(record, "dispatch_overhead_proxy"),
            working_set_proxy: cell(record, "working_set_proxy"),
            cache_budget: cell(record, "cache_budget"),
            unit_reuse_proxy: cell(record, "unit_reuse_proxy"),
        })
        .collect()
}

/// Runs the four models over each normalized row and assembles the
/// prediction records.
///
/// A straight per-row map: no filtering, no reordering, no cross-row
/// state. One record out per row in.
pub fn analyze(
    rows: &[BenchmarkRow],
    thresholds: &AcceleratorThresholds,
) -> Vec<PredictionRecord> {
    rows.iter()
        .map(|row| PredictionRecord {
            algorithm: row.algorithm.clone(),
            variant: row.variant.clone(),
            platform: row.platform.clone(),
            backend_type: row.backend_type.clone(),
            granularity_unit_size: row.granularity_unit_size.clone(),
            relative_cost_ratio: compute_relative_cost(row),
            cache_regime: predict_cache_regime(row),
            accelerator_feasibility: predict_accelerator_feasibility(
                row, thresholds,
            ),
            locality_index: compute_locality_index(row),
        })
        .collect()
}

/// Output column order. Must match the field order of
/// [`PredictionRecord`]; written explicitly so an empty input table still
/// produces a headed output table.
const OUTPUT_COLUMNS: &[&str] = &[
    "algorithm",
    "variant",
    "platform",
    "backend_type",
    "granularity_unit_size",
    "relative_cost_ratio",
    "cache_regime",
    "accelerator_feasibility",
    "locality_index",
];

/// Reads a benchmark log, runs the predictive analysis, and writes the
/// predictions table.
///
/// This is the main entry point for the predictive-analysis phase. It
/// mirrors the API of `perflens_regime::run` for consistency.
///
/// # Errors
///
/// Returns [`PredictError`] if:
/// - The input is not structurally valid CSV ([`PredictError::is_csv`])
/// - Writing the output fails ([`PredictError::is_io`])
pub fn run(
    input: impl Read,
    output: impl Write,
    thresholds: &AcceleratorThresholds,
) -> Result<(), PredictError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    let records: Vec<StringRecord> =
        reader.records().collect::<Result<_, _>>()?;

    let rows = normalize(&headers, &records);
    let predictions = analyze(&rows, thresholds);
    debug!(rows = rows.len(), "predictive analysis complete");

    let mut writer =
        csv::WriterBuilder::new().has_headers(false).from_writer(output);
    writer.write_record(OUTPUT_COLUMNS)?;
    for prediction in &predictions {
        writer.serialize(prediction)?;
    }
    writer.flush()?;
    Ok(())
}
