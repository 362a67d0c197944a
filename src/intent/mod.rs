//! Intent classification: an externally trained text classifier mapped to a
//! fixed action vocabulary.
//!
//! The core consumes the classifier only through [`IntentPredictor`], so the
//! pipeline is testable with a deterministic stub instead of real artifacts.

use std::fmt;

pub mod model;
pub mod vectorizer;

pub use model::{IntentClassifier, IntentModel, IntentSample};
pub use vectorizer::TfIdfVectorizer;

// ---------------------------------------------------------------------------
// Action labels
// ---------------------------------------------------------------------------

/// The high-level operation a query asks for. The variants are exactly the
/// labels the intent model is trained on; the executor dispatches on them
/// exhaustively, so adding a label forces an executor update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Mean,
    Sum,
    Count,
    Max,
    Min,
    Filter,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Mean => "mean",
            Action::Sum => "sum",
            Action::Count => "count",
            Action::Max => "max",
            Action::Min => "min",
            Action::Filter => "filter",
        }
    }

    /// Parse a classifier label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Action> {
        match label {
            "mean" => Some(Action::Mean),
            "sum" => Some(Action::Sum),
            "count" => Some(Action::Count),
            "max" => Some(Action::Max),
            "min" => Some(Action::Min),
            "filter" => Some(Action::Filter),
            _ => None,
        }
    }

    pub const ALL: [Action; 6] = [
        Action::Mean,
        Action::Sum,
        Action::Count,
        Action::Max,
        Action::Min,
        Action::Filter,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Predictor capability
// ---------------------------------------------------------------------------

/// A trained query → action mapping. Deterministic for a fixed model and
/// query; `None` means zero-confidence (an unparseable query, not an error).
pub trait IntentPredictor {
    fn predict(&self, query: &str) -> Option<Action>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_label(action.as_str()), Some(action));
        }
        assert_eq!(Action::from_label("median"), None);
    }
}
