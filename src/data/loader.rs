use std::path::Path;

use anyhow::{Context, Result, bail};
use log::info;

use super::model::{Column, Table, Value};

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load a table from a delimiter-separated text file with a `;` field
/// separator (the bank-marketing export format). The header row provides
/// the column names; cell types are guessed per cell.
pub fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() {
        bail!("CSV {} has no header row", path.display());
    }

    let mut columns: Vec<Column> = headers
        .iter()
        .map(|name| Column::new(name, Vec::new()))
        .collect();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no}: expected {} fields, found {}",
                headers.len(),
                record.len()
            );
        }
        for (col, field) in columns.iter_mut().zip(record.iter()) {
            col.values.push(guess_value(field));
        }
    }

    let table = Table::new(columns);
    info!(
        "loaded {} rows x {} columns from {}",
        table.n_rows(),
        table.columns().len(),
        path.display()
    );
    Ok(table)
}

fn guess_value(s: &str) -> Value {
    let s = s.trim();
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    Value::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_cell_types() {
        assert_eq!(guess_value("42"), Value::Integer(42));
        assert_eq!(guess_value("4.5"), Value::Float(4.5));
        assert_eq!(guess_value(""), Value::Null);
        assert_eq!(guess_value("married"), Value::String("married".into()));
    }

    #[test]
    fn loads_semicolon_separated_file() {
        let path = std::env::temp_dir().join("askquery_loader_test.csv");
        std::fs::write(&path, "age;job;balance\n30;\"admin.\";1200\n41;;-50\n").unwrap();

        let table = load_csv(&path).unwrap();
        assert_eq!(table.n_rows(), 2);
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["age", "job", "balance"]);
        assert_eq!(table.column("job").unwrap().values[1], Value::Null);
        assert_eq!(table.column("balance").unwrap().values[1], Value::Integer(-50));

        std::fs::remove_file(&path).ok();
    }
}
