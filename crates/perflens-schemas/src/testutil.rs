//! Shared proptest strategies for schema tests.

use proptest::prelude::*;

use crate::NA;

/// Strategy for cells holding a finite decimal number.
pub fn arb_numeric_cell() -> impl Strategy<Value = String> {
    (-1.0e9..1.0e9f64).prop_map(|v| format!("{v}"))
}

/// Strategy for cells that must never parse as a number: the NA
/// placeholder, empty cells, and textual junk. Filters out accidental
/// float spellings like `inf` or `nan`, which `f64::from_str` accepts.
pub fn arb_non_numeric_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just(NA.to_owned()),
        "[a-zA-Z_][a-zA-Z_ ]{0,11}".prop_filter(
            "cell must not parse as a float",
            |s| s.trim().parse::<f64>().is_err(),
        ),
    ]
}
