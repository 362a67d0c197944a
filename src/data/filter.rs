use std::fmt;

use super::model::{Table, Value};

// ---------------------------------------------------------------------------
// Filter predicates extracted from a query
// ---------------------------------------------------------------------------

/// Comparison operator of a filter predicate. Equality operators apply to
/// categorical columns, ordering operators to continuous ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Gt,
    Lt,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Gt => ">",
            CmpOp::Lt => "<",
        };
        write!(f, "{s}")
    }
}

/// One column/operator/value condition extracted from free text.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub op: CmpOp,
    pub value: Value,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.op, self.value)
    }
}

impl Predicate {
    /// Whether a cell satisfies this predicate. Null cells fail every
    /// comparison except inequality against a non-null value.
    pub fn matches(&self, cell: &Value) -> bool {
        match self.op {
            CmpOp::Eq => cell.eq_fold(&self.value),
            CmpOp::Ne => !cell.eq_fold(&self.value),
            CmpOp::Gt => match (cell.as_f64(), self.value.as_f64()) {
                (Some(a), Some(b)) => a > b,
                _ => false,
            },
            CmpOp::Lt => match (cell.as_f64(), self.value.as_f64()) {
                (Some(a), Some(b)) => a < b,
                _ => false,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Conjunctive application: predicates → row indices
// ---------------------------------------------------------------------------

/// Return indices of rows that satisfy all predicates (conjunction).
/// Redundant predicates on the same column are simply applied in turn.
/// A predicate naming an unknown column matches no row.
///
/// This projection is a newly allocated view; the source table is untouched.
/// The textual `filter` action does not consume it; it is the view offered
/// to the visualization side, which renders the extracted predicates.
pub fn filtered_indices(table: &Table, predicates: &[Predicate]) -> Vec<usize> {
    (0..table.n_rows())
        .filter(|&row| {
            predicates.iter().all(|pred| {
                table
                    .column(&pred.column)
                    .and_then(|col| col.values.get(row))
                    .is_some_and(|cell| pred.matches(cell))
            })
        })
        .collect()
}
