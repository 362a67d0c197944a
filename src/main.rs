use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use askquery::data::classify::classify_columns;
use askquery::data::loader::load_csv;
use askquery::data::model::Table;
use askquery::intent::IntentClassifier;
use askquery::{QueryConfig, execute, resolve};

const MODEL_FILE: &str = "intent_model.json";
const VECTORIZER_FILE: &str = "intent_vectorizer.json";

struct Args {
    data: PathBuf,
    models_dir: PathBuf,
    query: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut data = None;
    let mut models_dir = PathBuf::from("models");
    let mut query = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--models" => {
                models_dir = PathBuf::from(
                    args.next().context("--models requires a directory")?,
                );
            }
            "--query" | "-q" => {
                query = Some(args.next().context("--query requires a question")?);
            }
            "--help" | "-h" => {
                bail!("usage: askquery <data.csv> [--models DIR] [--query QUESTION]");
            }
            other if data.is_none() => data = Some(PathBuf::from(other)),
            other => bail!("unexpected argument: {other}"),
        }
    }

    Ok(Args {
        data: data.context("usage: askquery <data.csv> [--models DIR] [--query QUESTION]")?,
        models_dir,
        query,
    })
}

fn preview(table: &Table, rows: usize) {
    let names: Vec<&str> = table.column_names().collect();
    println!("{}", names.join(";"));
    for row in 0..table.n_rows().min(rows) {
        let cells: Vec<String> = table
            .columns()
            .iter()
            .map(|c| c.values.get(row).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        println!("{}", cells.join(";"));
    }
}

fn answer(
    query: &str,
    table: &Table,
    kinds: &askquery::data::classify::ColumnKinds,
    classifier: &IntentClassifier,
    config: &QueryConfig,
) {
    let intent = resolve(query, table, kinds, classifier, config);
    if intent.is_empty() {
        println!("Could not understand the question. Try rephrasing it.");
        return;
    }
    // Executor faults become user-facing messages here; the process keeps
    // serving queries.
    match execute(table, &intent) {
        Ok(output) => println!("{output}"),
        Err(err) => println!("{err}"),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = parse_args()?;

    // Missing or invalid artifacts are fatal: no queries are served without
    // the classifier.
    let classifier = IntentClassifier::load(
        &args.models_dir.join(MODEL_FILE),
        &args.models_dir.join(VECTORIZER_FILE),
    )?;

    let table = load_csv(&args.data)?;
    let config = QueryConfig::default();
    let kinds = classify_columns(&table, config.unique_ratio_threshold, config.max_unique_values);

    println!("Here is a preview of your data:");
    preview(&table, 10);
    println!();

    if let Some(query) = args.query {
        answer(&query, &table, &kinds, &classifier, &config);
        return Ok(());
    }

    let stdin = io::stdin();
    loop {
        print!("Ask a question about your data (empty line to quit): ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            break;
        }
        answer(query, &table, &kinds, &classifier, &config);
    }
    Ok(())
}
