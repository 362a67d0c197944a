//! Offline trainer: generates synthetic labeled queries from the dataset's
//! own columns and values, fits the TF-IDF vectorizer and centroid model,
//! and writes both JSON artifacts. The main binary consumes the artifacts
//! as an opaque classifier; it never trains.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::info;

use askquery::data::classify::{classify_columns, ColumnKind, ColumnKinds};
use askquery::data::loader::load_csv;
use askquery::data::model::{Table, Value};
use askquery::intent::vectorizer::english_stop_words;
use askquery::intent::{IntentClassifier, IntentModel, IntentSample, TfIdfVectorizer};
use askquery::QueryConfig;

const INTENT_KEYWORDS: &[(&str, &[&str])] = &[
    ("mean", &["average", "mean", "avg"]),
    ("sum", &["sum", "total", "add up", "aggregate"]),
    ("count", &["count", "number of", "how many"]),
    ("max", &["maximum", "max", "highest", "top"]),
    ("min", &["minimum", "min", "lowest", "bottom"]),
    ("filter", &["filter", "show", "only", "where", "with"]),
];

// ---------------------------------------------------------------------------
// Deterministic PRNG (xoshiro256**) for reproducible sampling
// ---------------------------------------------------------------------------

struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n.max(1) as u64) as usize
    }

    fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

// ---------------------------------------------------------------------------
// Synthetic query generation
// ---------------------------------------------------------------------------

/// Capitalize the first character, mirroring the "Count of clients" template.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn sample_value(table: &Table, column: &str, rng: &mut SimpleRng) -> Option<String> {
    let values: Vec<Value> = table.column(column)?.distinct().into_iter().collect();
    if values.is_empty() {
        return None;
    }
    Some(rng.choose(&values).to_string())
}

/// Template queries per intent, balanced across labels. Numeric-only intents
/// draw from continuous columns; count/filter queries may carry a sampled
/// value so the classifier sees realistic conditions.
fn generate_queries(
    table: &Table,
    kinds: &ColumnKinds,
    per_intent: usize,
    rng: &mut SimpleRng,
) -> Vec<IntentSample> {
    let categorical: Vec<&str> = kinds
        .iter()
        .filter(|(_, k)| **k == ColumnKind::Categorical)
        .map(|(name, _)| name.as_str())
        .collect();
    let continuous: Vec<&str> = kinds
        .iter()
        .filter(|(_, k)| **k == ColumnKind::Continuous)
        .map(|(name, _)| name.as_str())
        .collect();
    let all: Vec<&str> = kinds.keys().map(|s| s.as_str()).collect();

    let mut samples = Vec::new();
    for (intent, keywords) in INTENT_KEYWORDS {
        let numeric_only = matches!(*intent, "mean" | "sum" | "max" | "min");
        if numeric_only && continuous.is_empty() {
            continue;
        }
        for _ in 0..per_intent {
            let keyword = *rng.choose(keywords);
            let query = match *intent {
                "mean" | "sum" | "max" | "min" => {
                    let column = rng.choose(&continuous);
                    format!("What is the {keyword} {column}?")
                }
                "count" => {
                    let column = rng.choose(&all);
                    let mut query = format!("{} of clients with {column}", capitalize(keyword));
                    if categorical.contains(column) {
                        if let Some(val) = sample_value(table, column, rng) {
                            query.push_str(&format!(" = {val}"));
                        }
                    }
                    query
                }
                "filter" => {
                    let column = rng.choose(&all);
                    let val = sample_value(table, column, rng).unwrap_or_default();
                    format!("{keyword} {column} = {val}")
                }
                other => unreachable!("unknown intent template: {other}"),
            };
            samples.push(IntentSample {
                query,
                intent: intent.to_string(),
            });
        }
    }
    samples
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(data), Some(out_dir)) = (args.next(), args.next()) else {
        bail!("usage: train_intent <data.csv> <out_dir> [samples_per_intent]");
    };
    let per_intent: usize = match args.next() {
        Some(n) => n.parse().context("samples_per_intent must be a number")?,
        None => 500,
    };

    let table = load_csv(&PathBuf::from(&data))?;
    let config = QueryConfig::default();
    let kinds = classify_columns(&table, config.unique_ratio_threshold, config.max_unique_values);

    let mut rng = SimpleRng::new(42);
    let samples = generate_queries(&table, &kinds, per_intent, &mut rng);
    info!("generated {} training queries", samples.len());

    let documents: Vec<String> = samples.iter().map(|s| s.query.clone()).collect();
    let stop_words: BTreeSet<String> = english_stop_words();
    let vectorizer = TfIdfVectorizer::fit(&documents, stop_words);
    let model = IntentModel::fit(&samples, &vectorizer)?;

    let out = PathBuf::from(&out_dir);
    std::fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;
    let model_path = out.join("intent_model.json");
    let vectorizer_path = out.join("intent_vectorizer.json");
    IntentClassifier::new(vectorizer, model).save(&model_path, &vectorizer_path)?;

    println!(
        "Saved model and vectorizer to {} ({} samples)",
        out.display(),
        samples.len()
    );
    Ok(())
}
