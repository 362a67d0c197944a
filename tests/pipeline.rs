//! End-to-end pipeline tests: resolve a question, execute it, check the
//! rendered answer.

use askquery::data::classify::{classify_columns, ColumnKinds};
use askquery::data::filter::{filtered_indices, CmpOp};
use askquery::data::model::{Column, Table, Value};
use askquery::intent::vectorizer::english_stop_words;
use askquery::intent::{Action, IntentClassifier, IntentModel, IntentPredictor, IntentSample, TfIdfVectorizer};
use askquery::query::{execute, resolve, ActionOutput};
use askquery::QueryConfig;

/// Deterministic stand-in for the trained classifier.
struct StubPredictor(Option<Action>);

impl IntentPredictor for StubPredictor {
    fn predict(&self, _query: &str) -> Option<Action> {
        self.0
    }
}

fn bank_table() -> Table {
    let balance: Vec<Value> = (0..50).map(|i| Value::Integer(100 + i * 173)).collect();
    Table::new(vec![
        Column::new(
            "marital",
            (0..50)
                .map(|i| {
                    Value::from(match i % 3 {
                        0 => "married",
                        1 => "single",
                        _ => "divorced",
                    })
                })
                .collect(),
        ),
        Column::new(
            "default",
            (0..50)
                .map(|i| {
                    if i == 7 {
                        Value::Null
                    } else if i % 10 == 0 {
                        "yes".into()
                    } else {
                        "no".into()
                    }
                })
                .collect(),
        ),
        Column::new("balance", balance),
    ])
}

fn kinds(table: &Table, config: &QueryConfig) -> ColumnKinds {
    classify_columns(table, config.unique_ratio_threshold, config.max_unique_values)
}

fn trained_classifier() -> IntentClassifier {
    let sample = |query: &str, intent: &str| IntentSample {
        query: query.to_string(),
        intent: intent.to_string(),
    };
    let samples = vec![
        sample("what is the average balance", "mean"),
        sample("mean balance of clients", "mean"),
        sample("avg age", "mean"),
        sample("sum of balance", "sum"),
        sample("total duration", "sum"),
        sample("how many clients defaulted", "count"),
        sample("count of clients with housing", "count"),
        sample("number of clients subscribed", "count"),
        sample("show clients with job management", "filter"),
        sample("filter clients who are single", "filter"),
    ];
    let docs: Vec<String> = samples.iter().map(|s| s.query.clone()).collect();
    let vectorizer = TfIdfVectorizer::fit(&docs, english_stop_words());
    let model = IntentModel::fit(&samples, &vectorizer).unwrap();
    IntentClassifier::new(vectorizer, model)
}

#[test]
fn average_balance_question_end_to_end() {
    let table = Table::new(vec![Column::new(
        "balance",
        vec![100i64.into(), 200i64.into(), 300i64.into()],
    )]);
    let config = QueryConfig::default();
    let kinds = kinds(&table, &config);
    let classifier = trained_classifier();

    let intent = resolve("What is the average balance?", &table, &kinds, &classifier, &config);
    assert_eq!(intent.action, Some(Action::Mean));
    assert_eq!(intent.column.as_deref(), Some("balance"));

    let output = execute(&table, &intent).unwrap();
    assert_eq!(output.to_string(), "Average balance: 200.00");
}

#[test]
fn count_defaulted_clients_end_to_end() {
    let table = bank_table();
    let config = QueryConfig::default();
    let kinds = kinds(&table, &config);
    let classifier = trained_classifier();

    let intent = resolve("How many clients defaulted?", &table, &kinds, &classifier, &config);
    assert_eq!(intent.action, Some(Action::Count));
    assert_eq!(intent.column.as_deref(), Some("default"));
    // The flag column is phrased by name, so a default == yes predicate is
    // extracted even though count deliberately ignores it.
    assert!(intent
        .filters
        .iter()
        .any(|p| p.column == "default" && p.op == CmpOp::Eq));

    let output = execute(&table, &intent).unwrap();
    assert_eq!(output.to_string(), "Count of default: 49");
}

#[test]
fn filter_action_lists_distinct_values_while_predicates_feed_the_view() {
    let table = bank_table();
    let config = QueryConfig::default();
    let kinds = kinds(&table, &config);

    let intent = resolve(
        "show marital status of clients who are not married",
        &table,
        &kinds,
        &StubPredictor(Some(Action::Filter)),
        &config,
    );
    assert_eq!(intent.column.as_deref(), Some("marital"));
    let not_married = intent
        .filters
        .iter()
        .find(|p| p.column == "marital" && p.op == CmpOp::Ne)
        .expect("negated marital predicate");
    assert_eq!(not_married.value, Value::from("married"));

    // Textual result: distinct values, predicates ignored.
    let output = execute(&table, &intent).unwrap();
    match &output {
        ActionOutput::Distinct { column, values } => {
            assert_eq!(column, "marital");
            assert_eq!(values.len(), 3);
        }
        other => panic!("expected distinct values, got {other:?}"),
    }

    // The separate view projection does apply them.
    let rows = filtered_indices(&table, &intent.filters);
    assert!(rows.iter().all(|&r| {
        table.column("marital").unwrap().values[r] != Value::from("married")
    }));
}

#[test]
fn unparseable_query_is_a_terminal_state_not_an_error() {
    let table = bank_table();
    let config = QueryConfig::default();
    let kinds = kinds(&table, &config);

    let intent = resolve("xyzzy plugh", &table, &kinds, &StubPredictor(None), &config);
    assert!(intent.is_empty());
}

#[test]
fn resolving_and_executing_twice_is_identical() {
    let table = bank_table();
    let config = QueryConfig::default();
    let kinds = kinds(&table, &config);
    let classifier = trained_classifier();
    let query = "What is the average balance?";

    let first_intent = resolve(query, &table, &kinds, &classifier, &config);
    let first = execute(&table, &first_intent).unwrap();
    let second_intent = resolve(query, &table, &kinds, &classifier, &config);
    let second = execute(&table, &second_intent).unwrap();

    assert_eq!(first_intent.action, second_intent.action);
    assert_eq!(first_intent.column, second_intent.column);
    assert_eq!(first_intent.filters, second_intent.filters);
    assert_eq!(first, second);
}
