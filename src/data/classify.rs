use std::collections::BTreeMap;

use super::model::Table;

// ---------------------------------------------------------------------------
// Column classification: categorical vs continuous
// ---------------------------------------------------------------------------

/// How a column's analysis is phrased: value-based or threshold-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Categorical,
    Continuous,
}

/// Mapping column name → kind, computed once per loaded table.
/// Every table column has exactly one entry.
pub type ColumnKinds = BTreeMap<String, ColumnKind>;

/// Classify every column by cardinality heuristics:
/// non-numeric columns are categorical; numeric columns are categorical when
/// they have at most `max_unique_values` distinct values or a distinct/row
/// ratio below `unique_ratio_threshold`, continuous otherwise.
pub fn classify_columns(
    table: &Table,
    unique_ratio_threshold: f64,
    max_unique_values: usize,
) -> ColumnKinds {
    let n_rows = table.n_rows();

    table
        .columns()
        .iter()
        .map(|col| {
            let kind = if !col.is_numeric() {
                ColumnKind::Categorical
            } else {
                let distinct = col.distinct().len();
                // An all-null or empty column has zero distinct values; treat
                // its unique ratio as 0 rather than dividing by zero.
                let ratio = if n_rows == 0 {
                    0.0
                } else {
                    distinct as f64 / n_rows as f64
                };
                if distinct <= max_unique_values || ratio < unique_ratio_threshold {
                    ColumnKind::Categorical
                } else {
                    ColumnKind::Continuous
                }
            };
            (col.name.clone(), kind)
        })
        .collect()
}
