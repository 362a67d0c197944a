use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::vectorizer::TfIdfVectorizer;
use super::{Action, IntentPredictor};
use crate::error::QueryError;

// ---------------------------------------------------------------------------
// Training samples
// ---------------------------------------------------------------------------

/// One labeled training query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentSample {
    pub query: String,
    pub intent: String,
}

// ---------------------------------------------------------------------------
// Centroid model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClassCentroid {
    label: String,
    centroid: Vec<f64>,
}

/// Nearest-centroid classifier over TF-IDF features: one mean feature vector
/// per action label, prediction by cosine similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentModel {
    classes: Vec<ClassCentroid>,
}

impl IntentModel {
    /// Fit one centroid per intent label from the given samples.
    pub fn fit(samples: &[IntentSample], vectorizer: &TfIdfVectorizer) -> Result<IntentModel> {
        anyhow::ensure!(!samples.is_empty(), "training samples cannot be empty");

        let width = vectorizer.vocabulary_size();
        let mut sums: Vec<(String, Vec<f64>, usize)> = Vec::new();

        for sample in samples {
            let features = vectorizer.transform(&sample.query);
            match sums.iter_mut().find(|(label, _, _)| *label == sample.intent) {
                Some((_, sum, n)) => {
                    for (acc, v) in sum.iter_mut().zip(&features) {
                        *acc += v;
                    }
                    *n += 1;
                }
                None => sums.push((sample.intent.clone(), features, 1)),
            }
        }

        let classes = sums
            .into_iter()
            .map(|(label, mut sum, n)| {
                for v in &mut sum {
                    *v /= n as f64;
                }
                debug_assert_eq!(sum.len(), width);
                ClassCentroid {
                    label,
                    centroid: sum,
                }
            })
            .collect();

        Ok(IntentModel { classes })
    }

    /// Best-matching label and its cosine similarity for a feature vector.
    fn best_class(&self, features: &[f64]) -> Option<(&str, f64)> {
        self.classes
            .iter()
            .map(|c| (c.label.as_str(), cosine_similarity(features, &c.centroid)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if mag_a == 0.0 || mag_b == 0.0 {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}

// ---------------------------------------------------------------------------
// Classifier: vectorizer + model artifact pair
// ---------------------------------------------------------------------------

/// The loaded classifier pair. Loaded once at process start, read-only for
/// the process lifetime; there is no reload path.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    vectorizer: TfIdfVectorizer,
    model: IntentModel,
}

impl IntentClassifier {
    pub fn new(vectorizer: TfIdfVectorizer, model: IntentModel) -> Self {
        IntentClassifier { vectorizer, model }
    }

    /// Load both serialized artifacts. Absence of either file is
    /// [`QueryError::ModelNotFound`]; a file that fails to parse is
    /// [`QueryError::ModelInvalid`]. Both are fatal at startup.
    pub fn load(model_path: &Path, vectorizer_path: &Path) -> Result<Self, QueryError> {
        let model: IntentModel = load_artifact(model_path)?;
        let vectorizer: TfIdfVectorizer = load_artifact(vectorizer_path)?;
        info!(
            "loaded intent classifier: {} classes, vocabulary of {}",
            model.classes.len(),
            vectorizer.vocabulary_size()
        );
        Ok(IntentClassifier { vectorizer, model })
    }

    /// Write both artifacts as JSON (the trainer's side of the contract).
    pub fn save(&self, model_path: &Path, vectorizer_path: &Path) -> Result<()> {
        let model = serde_json::to_string(&self.model).context("serializing intent model")?;
        std::fs::write(model_path, model)
            .with_context(|| format!("writing {}", model_path.display()))?;
        let vec = serde_json::to_string(&self.vectorizer).context("serializing vectorizer")?;
        std::fs::write(vectorizer_path, vec)
            .with_context(|| format!("writing {}", vectorizer_path.display()))?;
        Ok(())
    }
}

fn load_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, QueryError> {
    if !path.is_file() {
        return Err(QueryError::ModelNotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path).map_err(|e| QueryError::ModelInvalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| QueryError::ModelInvalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl IntentPredictor for IntentClassifier {
    /// Deterministic for a fixed model and query. A query whose feature
    /// vector is all zeros, or whose best similarity is zero, produces no
    /// action (zero-confidence classification).
    fn predict(&self, query: &str) -> Option<Action> {
        let features = self.vectorizer.transform(query);
        let (label, score) = self.model.best_class(&features)?;
        debug!("intent '{label}' (cosine {score:.3}) for query: {query}");
        if score <= 0.0 {
            return None;
        }
        Action::from_label(label)
    }
}
