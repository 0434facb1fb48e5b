//! Benchmark row schema and cell parsing.
//!
//! A [`BenchmarkRow`] is one observed run from the benchmark log. Every
//! field is carried as the raw cell string: numeric interpretation happens
//! inside each model, so a missing or malformed cell fails exactly at the
//! model that reads it and leaves every other column of the same row valid.

/// Literal placeholder injected for columns absent from the source table.
///
/// Downstream models only ever see either a parseable number or this
/// sentinel, which fails their numeric parse step deterministically. It is
/// never interpreted as zero.
pub const NA: &str = "NA";

/// Analysis columns the models may read. Columns in this list that are
/// absent from the source table are synthesized as [`NA`] for every row
/// before any model runs.
pub const REQUIRED_ANALYSIS_COLUMNS: &[&str] = &[
    "compute_events",
    "recompute_events",
    "memory_access_proxy",
    "granularity_unit_size",
    "backend_type",
    "dispatch_overhead_proxy",
    "working_set_proxy",
    "cache_budget",
    "unit_reuse_proxy",
];

/// One observed benchmark run.
///
/// Identity fields group runs; the remaining fields are measurement proxies
/// produced by the compute engine. All cells are raw strings — see the
/// module docs for why parsing is deferred to the models.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkRow {
    /// Algorithm under test (identity key).
    pub algorithm: String,
    /// Algorithm variant (identity key).
    pub variant: String,
    /// Hardware platform the run executed on (identity key).
    pub platform: String,
    /// Execution backend, e.g. `cpu` or `gpu` (identity key).
    pub backend_type: String,
    /// Measured wall time in microseconds.
    pub runtime_us: String,
    /// Total arithmetic operations performed, recomputation included.
    pub compute_events: String,
    /// Subset of `compute_events` attributable to recomputation.
    pub recompute_events: String,
    /// Proxy for bytes/accesses moved.
    pub memory_access_proxy: String,
    /// Size of the scheduling/tiling unit used by the run (identity key).
    pub granularity_unit_size: String,
    /// Proxy cost of dispatching one unit of work; `0` for pure-CPU runs.
    pub dispatch_overhead_proxy: String,
    /// Proxy for the run's active memory footprint.
    pub working_set_proxy: String,
    /// Declared cache capacity the run is evaluated against.
    pub cache_budget: String,
    /// Proxy for how many times a scheduling unit's data is reused.
    pub unit_reuse_proxy: String,
}

impl BenchmarkRow {
    /// Returns a row with every cell set to the [`NA`] placeholder — the
    /// shape the normalizer produces for a table with no recognized
    /// columns. Useful as a base for constructing partial rows.
    pub fn all_na() -> Self {
        let na = || NA.to_owned();
        Self {
            algorithm: na(),
            variant: na(),
            platform: na(),
            backend_type: na(),
            runtime_us: na(),
            compute_events: na(),
            recompute_events: na(),
            memory_access_proxy: na(),
            granularity_unit_size: na(),
            dispatch_overhead_proxy: na(),
            working_set_proxy: na(),
            cache_budget: na(),
            unit_reuse_proxy: na(),
        }
    }
}

/// Parses a numeric cell into `f64`.
///
/// Returns `None` for the [`NA`] placeholder, empty cells, and anything
/// else that is not a real number. Surrounding whitespace is tolerated,
/// matching how the measurement logs are written.
pub fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim().parse().ok()
}
