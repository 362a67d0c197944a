use log::debug;
use regex::Regex;

use crate::config::{ComparisonFamily, QueryConfig};
use crate::data::classify::{ColumnKind, ColumnKinds};
use crate::data::filter::{CmpOp, Predicate};
use crate::data::model::{Column, Table, Value};

// ---------------------------------------------------------------------------
// Filter extraction: free text → predicates
// ---------------------------------------------------------------------------

/// Scan the query against every column and emit filter predicates:
/// categorical columns match by their known values (and by name for yes/no
/// flag columns), continuous columns by comparison phrases with a number.
///
/// Predicates come back in column-declaration order. Duplicates on the same
/// column are retained; the projection applies them conjunctively. Extraction
/// never fails; a query with no recognizable condition yields an empty list.
pub fn extract_filters(
    query: &str,
    table: &Table,
    kinds: &ColumnKinds,
    config: &QueryConfig,
) -> Vec<Predicate> {
    let query = query.to_lowercase();
    let mut predicates = Vec::new();

    for column in table.columns() {
        match kinds.get(&column.name) {
            Some(ColumnKind::Categorical) => {
                categorical_predicates(&query, column, &mut predicates);
            }
            Some(ColumnKind::Continuous) => {
                if let Some(pred) =
                    continuous_predicate(&query, column, &config.comparison_families)
                {
                    predicates.push(pred);
                }
            }
            None => {}
        }
    }

    debug!("extracted {} predicate(s) from query: {query}", predicates.len());
    predicates
}

// ---------------------------------------------------------------------------
// Categorical columns: value mentions and yes/no flags
// ---------------------------------------------------------------------------

fn categorical_predicates(query: &str, column: &Column, out: &mut Vec<Predicate>) {
    let col_phrase = column.name.replace('_', " ").to_lowercase();
    let distinct = column.distinct();

    for value in &distinct {
        let v = value.to_string().to_lowercase();
        if v.is_empty() {
            continue;
        }
        // A value counts as mentioned when it appears together with the
        // column name, as the verbatim "{value} {column}" phrase, or inside
        // a negation phrase ("not married" names the value by itself).
        let mentioned = (query.contains(&v) && query.contains(&col_phrase))
            || query.contains(&format!("{v} {col_phrase}"))
            || is_negated(query, &v);
        if !mentioned {
            continue;
        }
        let op = if is_negated(query, &v) || is_negated(query, &col_phrase) {
            CmpOp::Ne
        } else {
            CmpOp::Eq
        };
        // Numeric categoricals (e.g. a day-of-month column) keep their typed
        // value so the projection can compare against the cells; the
        // lowercased string is only for mention detection.
        out.push(Predicate {
            column: column.name.clone(),
            op,
            value: if value.is_numeric() {
                value.clone()
            } else {
                Value::String(v)
            },
        });
    }

    // Boolean-flag columns phrased by name only: "defaulted clients" implies
    // default == yes. Applies to any categorical column whose value set
    // contains "yes".
    let has_yes = distinct
        .iter()
        .any(|v| matches!(v, Value::String(s) if s.eq_ignore_ascii_case("yes")));
    if has_yes && query.contains(&col_phrase) {
        let op = if is_negated(query, &col_phrase) {
            CmpOp::Ne
        } else {
            CmpOp::Eq
        };
        out.push(Predicate {
            column: column.name.clone(),
            op,
            value: Value::String("yes".into()),
        });
    }
}

/// Naive substring negation: "not X", "don't X", "do not X". Known heuristic
/// limitation: an unrelated negation elsewhere in the query can misfire.
fn is_negated(query: &str, term: &str) -> bool {
    ["not ", "don't ", "do not "]
        .iter()
        .any(|prefix| query.contains(&format!("{prefix}{term}")))
}

// ---------------------------------------------------------------------------
// Continuous columns: comparison phrase + number
// ---------------------------------------------------------------------------

/// First matching phrase family wins, in the configured precedence order, so
/// one query cannot emit contradictory predicates for one column.
fn continuous_predicate(
    query: &str,
    column: &Column,
    families: &[ComparisonFamily],
) -> Option<Predicate> {
    let col_phrase = column.name.replace('_', " ").to_lowercase();

    for family in families {
        let re = family_regex(&col_phrase, family);
        if let Some(caps) = re.captures(query) {
            let number: f64 = caps.get(1)?.as_str().parse().ok()?;
            return Some(Predicate {
                column: column.name.clone(),
                op: family.op,
                value: Value::Float(number),
            });
        }
    }
    None
}

/// Whitespace-tolerant pattern: the column name, eventually followed by one
/// of the family's phrases and a number.
fn family_regex(col_phrase: &str, family: &ComparisonFamily) -> Regex {
    let phrases: Vec<String> = family
        .phrases
        .iter()
        .map(|p| {
            let escaped: Vec<String> = p.split_whitespace().map(|w| regex::escape(w)).collect();
            let joined = escaped.join(r"\s+");
            if p.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
                format!(r"\b{joined}\b")
            } else {
                joined
            }
        })
        .collect();

    let pattern = format!(
        r"{}\b.*?(?:{})\s*(-?\d+(?:\.\d+)?)",
        regex::escape(col_phrase),
        phrases.join("|")
    );
    // The pattern is built from an escaped column name and escaped phrases,
    // so compilation cannot fail on user input.
    Regex::new(&pattern).expect("comparison pattern")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::classify::classify_columns;

    fn bank_table() -> Table {
        let balance: Vec<Value> = (0..200).map(|i| Value::Integer(i * 37)).collect();
        Table::new(vec![
            Column::new(
                "marital",
                vec!["married".into(), "single".into(), "divorced".into()],
            ),
            Column::new("default", vec!["yes".into(), "no".into(), "no".into()]),
            Column::new("balance", balance),
        ])
    }

    fn extract(query: &str) -> Vec<Predicate> {
        let table = bank_table();
        let config = QueryConfig::default();
        let kinds = classify_columns(&table, config.unique_ratio_threshold, config.max_unique_values);
        extract_filters(query, &table, &kinds, &config)
    }

    #[test]
    fn negated_value_yields_not_equal() {
        let preds = extract("clients who are not married");
        assert!(preds.contains(&Predicate {
            column: "marital".into(),
            op: CmpOp::Ne,
            value: "married".into(),
        }));
    }

    #[test]
    fn value_with_column_name_yields_equality() {
        let preds = extract("show clients with marital status single");
        assert!(preds.contains(&Predicate {
            column: "marital".into(),
            op: CmpOp::Eq,
            value: "single".into(),
        }));
    }

    #[test]
    fn yes_flag_column_matches_by_name_alone() {
        let preds = extract("how many clients defaulted");
        assert!(preds.contains(&Predicate {
            column: "default".into(),
            op: CmpOp::Eq,
            value: "yes".into(),
        }));
    }

    #[test]
    fn negated_flag_column_yields_not_equal() {
        let preds = extract("clients who did not default on loans");
        assert!(preds.contains(&Predicate {
            column: "default".into(),
            op: CmpOp::Ne,
            value: "yes".into(),
        }));
    }

    #[test]
    fn continuous_above_yields_greater_than() {
        let preds = extract("balance above 5000");
        assert_eq!(
            preds,
            vec![Predicate {
                column: "balance".into(),
                op: CmpOp::Gt,
                value: Value::Float(5000.0),
            }]
        );
    }

    #[test]
    fn first_matching_family_wins() {
        // "above" (first family) and "is" (third family) both appear; only
        // the first family's predicate is emitted.
        let preds = extract("balance is above 3000");
        assert_eq!(preds.len(), 1);
        assert_eq!(preds[0].op, CmpOp::Gt);
        assert_eq!(preds[0].value, Value::Float(3000.0));
    }

    #[test]
    fn below_and_equal_phrases_map_to_operators() {
        let below = extract("clients with balance less than 250.5");
        assert_eq!(below[0].op, CmpOp::Lt);
        assert_eq!(below[0].value, Value::Float(250.5));

        let equal = extract("balance equal to 1200");
        assert_eq!(equal[0].op, CmpOp::Eq);
        assert_eq!(equal[0].value, Value::Float(1200.0));
    }

    #[test]
    fn numeric_categorical_value_keeps_its_type() {
        use crate::data::filter::filtered_indices;

        // 20 distinct integer values over 200 rows: numeric but categorical.
        let day: Vec<Value> = (0..200).map(|i| Value::Integer(i % 20 + 1)).collect();
        let table = Table::new(vec![Column::new("day", day)]);
        let config = QueryConfig::default();
        let kinds = classify_columns(&table, config.unique_ratio_threshold, config.max_unique_values);

        let preds = extract_filters("count of clients with day 5", &table, &kinds, &config);
        assert_eq!(
            preds,
            vec![Predicate {
                column: "day".into(),
                op: CmpOp::Eq,
                value: Value::Integer(5),
            }]
        );

        // The typed predicate actually selects rows in the projection.
        let rows = filtered_indices(&table, &preds);
        assert!(!rows.is_empty());
        assert!(rows
            .iter()
            .all(|&r| table.column("day").unwrap().values[r] == Value::Integer(5)));
    }

    #[test]
    fn no_condition_yields_empty_list() {
        assert!(extract("what is the average age").is_empty());
    }

    #[test]
    fn predicates_follow_column_declaration_order() {
        let preds = extract("married clients who defaulted with balance above 100");
        let columns: Vec<&str> = preds.iter().map(|p| p.column.as_str()).collect();
        let mut sorted_by_decl = columns.clone();
        sorted_by_decl.sort_by_key(|c| ["marital", "default", "balance"].iter().position(|n| n == c));
        assert_eq!(columns, sorted_by_decl);
    }
}
