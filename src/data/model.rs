use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Value – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Using `BTreeSet` for distinct-value indices downstream, so `Value` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Null,
}

// -- Manual Eq/Ord so we can put Value in BTreeSet --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                String(_) => 3,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Try to interpret the value as an `f64` for numeric comparisons.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Equality as used by filter predicates: strings compare
    /// case-insensitively, numbers compare through `f64`.
    pub fn eq_fold(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a.eq_ignore_ascii_case(b),
            (Value::Null, Value::Null) => true,
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

// ---------------------------------------------------------------------------
// Column – one named column of the table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: &str, values: Vec<Value>) -> Self {
        Column {
            name: name.to_string(),
            values,
        }
    }

    /// Distinct non-null values, sorted.
    pub fn distinct(&self) -> BTreeSet<Value> {
        self.values
            .iter()
            .filter(|v| !v.is_null())
            .cloned()
            .collect()
    }

    /// Number of non-null entries.
    pub fn non_null_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_null()).count()
    }

    /// A column counts as numeric when every non-null value is numeric.
    pub fn is_numeric(&self) -> bool {
        self.values.iter().all(|v| v.is_null() || v.is_numeric())
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// An ordered set of named columns. Immutable once loaded; queries only
/// derive filtered views, never mutate the source.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Table { columns }
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows (length of the longest column; loaders keep them equal).
    pub fn n_rows(&self) -> usize {
        self.columns.iter().map(|c| c.values.len()).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
