use crate::data::filter::CmpOp;

// ---------------------------------------------------------------------------
// Pipeline configuration
// ---------------------------------------------------------------------------

/// One family of comparison phrases mapped to an operator, e.g.
/// "above" / "greater than" / "more than" → `>`.
#[derive(Debug, Clone)]
pub struct ComparisonFamily {
    pub op: CmpOp,
    pub phrases: Vec<String>,
}

/// Explicit configuration for the query pipeline, passed into the resolver
/// rather than living as ambient module state.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Minimum fuzzy score (0–100) for a column-name match.
    pub column_match_threshold: u8,
    /// Distinct/row ratio below which a numeric column is categorical.
    pub unique_ratio_threshold: f64,
    /// Distinct-value count at or below which a numeric column is categorical.
    pub max_unique_values: usize,
    /// Comparison phrase families for continuous columns, in precedence
    /// order: the first family that matches a column wins.
    pub comparison_families: Vec<ComparisonFamily>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        let family = |op: CmpOp, phrases: &[&str]| ComparisonFamily {
            op,
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        };
        QueryConfig {
            column_match_threshold: 70,
            unique_ratio_threshold: 0.05,
            max_unique_values: 20,
            comparison_families: vec![
                family(CmpOp::Gt, &["above", "greater than", "more than"]),
                family(CmpOp::Lt, &["below", "less than", "under"]),
                family(CmpOp::Eq, &["equal to", "=", "is"]),
            ],
        }
    }
}
