use log::debug;

use crate::config::QueryConfig;
use crate::data::classify::ColumnKinds;
use crate::data::filter::Predicate;
use crate::data::model::Table;
use crate::intent::{Action, IntentPredictor};

use super::filters::extract_filters;
use super::matcher::match_columns;

// ---------------------------------------------------------------------------
// Resolved intent
// ---------------------------------------------------------------------------

/// The structured interpretation of one query: action, target column with
/// its match confidence, and extracted filter predicates. Built fresh per
/// query and immutable afterwards; the executor and the visualization side
/// each consume it once.
#[derive(Debug, Clone, Default)]
pub struct ResolvedIntent {
    pub action: Option<Action>,
    pub column: Option<String>,
    /// Fuzzy confidence (0–100) that the query refers to `column`.
    pub column_match_score: Option<u8>,
    pub filters: Vec<Predicate>,
}

impl ResolvedIntent {
    /// An unparseable query: no action could be classified. A valid
    /// terminal state, not an error.
    pub fn is_empty(&self) -> bool {
        self.action.is_none() && self.column.is_none()
    }
}

// ---------------------------------------------------------------------------
// Resolution pipeline
// ---------------------------------------------------------------------------

/// Resolve a raw query into a [`ResolvedIntent`]: classify the action, fuzzy
/// match the target column, then extract filters.
///
/// Short-circuit order is deliberate: no action means an empty intent and no
/// further work; filter extraction (the most expensive step) only runs when
/// both an action and a column were found.
pub fn resolve(
    query: &str,
    table: &Table,
    kinds: &ColumnKinds,
    predictor: &dyn IntentPredictor,
    config: &QueryConfig,
) -> ResolvedIntent {
    let Some(action) = predictor.predict(query) else {
        debug!("no action classified for query: {query}");
        return ResolvedIntent::default();
    };

    let matches = match_columns(query, table.column_names(), config.column_match_threshold);
    let top = matches.into_iter().next();
    let (column, column_match_score) = match top {
        Some(m) => (Some(m.column), Some(m.score)),
        None => (None, None),
    };

    let filters = match &column {
        Some(_) => extract_filters(query, table, kinds, config),
        None => Vec::new(),
    };

    debug!(
        "resolved action={action} column={column:?} score={column_match_score:?} filters={}",
        filters.len()
    );
    ResolvedIntent {
        action: Some(action),
        column,
        column_match_score,
        filters,
    }
}
