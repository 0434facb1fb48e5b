//! Performance-regime classification for benchmark logs.
//!
//! Labels each run of a benchmark log with the performance regime that
//! dominates its cost, judged directly from raw counters. This is a
//! pipeline parallel to the predictive analysis, not a stage of it: it
//! reads the same kind of log and produces its own output table — the
//! input with one appended `observed_regime` column.
//!
//! ## Decision procedure
//!
//! The rules are evaluated in strict priority order; the first match wins
//! and later rules are not evaluated:
//!
//! 1. `recompute_events > 0.5 * compute_events` → `RECOMPUTATION_DOMINATED`
//! 2. `compute_events > 2 * memory_access_proxy` → `COMPUTE_BOUND`
//! 3. `memory_access_proxy > compute_events` → `MEMORY_BOUND`
//! 4. otherwise → `BALANCED`
//!
//! Recomputation dominance is checked first because it is the most
//! actionable signal: it points at algorithmic redesign potential rather
//! than a hardware mismatch. Compute/memory boundedness is judged only
//! once recomputation is ruled out as the dominant factor.
//!
//! The label is a total, pure function of the row's counters: the same
//! cells always produce the same label, and a row whose counters cannot
//! be read gets `UNKNOWN` rather than an error.
//!
//! ## Usage
//!
//! ```no_run
//! use perflens_regime::run;
//!
//! let input = std::io::stdin().lock();
//! let mut output = Vec::new();
//! run(input, &mut output).unwrap();
//! ```

mod error;

use std::io::{Read, Write};

use perflens_schemas::{NA, Regime, parse_cell};
use tracing::debug;

#[doc(inline)]
pub use crate::error::RegimeError;

/// Classifies the dominant performance regime from raw counter cells.
///
/// `runtime_us` participates in the validity check even though no rule
/// reads it: a row whose timing cell is corrupt is not trusted for
/// classification either.
pub fn classify_regime(
    runtime_us: &str,
    recompute_events: &str,
    compute_events: &str,
    memory_access_proxy: &str,
) -> Regime {
    let (Some(_runtime), Some(recompute), Some(compute), Some(memory)) = (
        parse_cell(runtime_us),
        parse_cell(recompute_events),
        parse_cell(compute_events),
        parse_cell(memory_access_proxy),
    ) else {
        return Regime::Unknown;
    };

    if recompute > compute * 0.5 {
        return Regime::RecomputationDominated;
    }
    if compute > memory * 2.0 {
        return Regime::ComputeBound;
    }
    if memory > compute {
        return Regime::MemoryBound;
    }
    Regime::Balanced
}

/// Counter columns the classifier reads, in the order
/// [`classify_regime`] takes them.
const CLASSIFIER_COLUMNS: [&str; 4] = [
    "runtime_us",
    "recompute_events",
    "compute_events",
    "memory_access_proxy",
];

/// Reads a benchmark log and writes it back with one appended
/// `observed_regime` column.
///
/// All original columns pass through verbatim, in their original order,
/// including columns this crate knows nothing about. Counter columns
/// absent from the table are treated as the `NA` placeholder, so every
/// row of such a table is labeled `UNKNOWN` rather than dropped.
///
/// # Errors
///
/// Returns [`RegimeError`] if:
/// - The input is not structurally valid CSV ([`RegimeError::is_csv`])
/// - Writing the output fails ([`RegimeError::is_io`])
pub fn run(input: impl Read, output: impl Write) -> Result<(), RegimeError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();

    let columns = CLASSIFIER_COLUMNS
        .map(|name| headers.iter().position(|header| header == name));

    let mut out_headers = headers.clone();
    out_headers.push_field("observed_regime");

    let mut writer =
        csv::WriterBuilder::new().has_headers(false).from_writer(output);
    writer.write_record(&out_headers)?;

    let mut rows = 0usize;
    for result in reader.records() {
        let record = result?;
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i)).unwrap_or(NA)
        };

        let [runtime, recompute, compute, memory] = columns.map(cell);
        let regime = classify_regime(runtime, recompute, compute, memory);

        let mut out = record.clone();
        out.push_field(regime.as_str());
        writer.write_record(&out)?;
        rows += 1;
    }
    writer.flush()?;
    debug!(rows, "regime mapping complete");
    Ok(())
}
