use std::fmt;

use crate::data::model::{Table, Value};
use crate::error::QueryError;
use crate::intent::Action;

use super::resolver::ResolvedIntent;

// ---------------------------------------------------------------------------
// Action execution
// ---------------------------------------------------------------------------

/// Result of executing a resolved intent: a textual answer or the distinct
/// values of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutput {
    Text(String),
    Distinct { column: String, values: Vec<Value> },
}

impl fmt::Display for ActionOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutput::Text(s) => write!(f, "{s}"),
            ActionOutput::Distinct { column, values } => {
                let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "Distinct {column} values: {}", rendered.join(", "))
            }
        }
    }
}

/// Execute a resolved intent against the table.
///
/// Dispatch is an exhaustive match over [`Action`], so a new label cannot be
/// added without updating this function. Preconditions: the intent must
/// carry both an action and a column, the column must exist, and `mean`/`sum`
/// require a numeric column.
///
/// The `filter` action deliberately ignores the extracted predicates and
/// reports the column's distinct values; the predicates are consumed by the
/// visualization side instead. `count` counts non-null entries regardless of
/// filters. Both asymmetries mirror the behaviour of the system this one
/// replaces and are kept until product owners decide otherwise.
pub fn execute(table: &Table, intent: &ResolvedIntent) -> Result<ActionOutput, QueryError> {
    let (Some(action), Some(column_name)) = (intent.action, intent.column.as_deref()) else {
        return Err(QueryError::IntentIncomplete);
    };

    let column = table
        .column(column_name)
        .ok_or_else(|| QueryError::ColumnNotFound(column_name.to_string()))?;

    if matches!(action, Action::Mean | Action::Sum) && !column.is_numeric() {
        return Err(QueryError::TypeMismatch {
            column: column_name.to_string(),
            action,
        });
    }

    let output = match action {
        Action::Mean => {
            let values: Vec<f64> = column.values.iter().filter_map(Value::as_f64).collect();
            let mean = values.iter().sum::<f64>() / values.len().max(1) as f64;
            ActionOutput::Text(format!("Average {column_name}: {mean:.2}"))
        }
        Action::Sum => {
            let sum: f64 = column.values.iter().filter_map(Value::as_f64).sum();
            ActionOutput::Text(format!("Sum of {column_name}: {}", format_number(sum)))
        }
        Action::Count => {
            let count = column.non_null_count();
            ActionOutput::Text(format!("Count of {column_name}: {count}"))
        }
        Action::Filter => ActionOutput::Distinct {
            column: column_name.to_string(),
            values: column.distinct().into_iter().collect(),
        },
        Action::Max | Action::Min => {
            ActionOutput::Text(format!("Action '{action}' is not supported yet"))
        }
    };
    Ok(output)
}

/// Render a sum without a trailing `.0` when it is integral.
fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}
