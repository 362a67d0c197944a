use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TF-IDF vectorizer
// ---------------------------------------------------------------------------

/// TF-IDF text feature extraction.
///
/// The tokenization rules (lowercasing, alphabetic tokens, stop-word removal,
/// with the stop-word list stored in the artifact) are part of the serialized
/// state: the same rules apply at fit time and at inference time. Training
/// with one rule set and predicting with another degrades classification
/// quality, which is why the whole vectorizer travels as one artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// token → feature index.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    idf: Vec<f64>,
    /// Tokens dropped before counting.
    stop_words: BTreeSet<String>,
}

impl TfIdfVectorizer {
    /// Fit vocabulary and IDF weights on the training documents.
    pub fn fit(documents: &[String], stop_words: BTreeSet<String>) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique: HashSet<String> = tokenize(doc, &stop_words).into_iter().collect();
            for token in unique {
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
                let next = vocabulary.len();
                vocabulary.entry(token).or_insert(next);
            }
        }

        let n_documents = documents.len();
        let mut idf = vec![0.0; vocabulary.len()];
        for (token, &idx) in &vocabulary {
            let df = document_frequency.get(token).copied().unwrap_or(0);
            // Smoothed IDF: log((N + 1) / (df + 1)) + 1
            idf[idx] = ((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0;
        }

        TfIdfVectorizer {
            vocabulary,
            idf,
            stop_words,
        }
    }

    /// Transform a text into a TF-IDF feature vector.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let tokens = tokenize(text, &self.stop_words);
        let mut tf = vec![0.0; self.vocabulary.len()];

        for token in &tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                tf[idx] += 1.0;
            }
        }

        let doc_length = tokens.len() as f64;
        if doc_length > 0.0 {
            for count in &mut tf {
                *count /= doc_length;
            }
        }
        for (idx, count) in tf.iter_mut().enumerate() {
            *count *= self.idf[idx];
        }

        tf
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Lowercase, keep alphabetic runs, drop stop words.
fn tokenize(text: &str, stop_words: &BTreeSet<String>) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphabetic())
        .filter(|t| !t.is_empty() && !stop_words.contains(*t))
        .map(|t| t.to_string())
        .collect()
}

/// The stop-word list baked into freshly trained artifacts.
pub fn english_stop_words() -> BTreeSet<String> {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has",
        "he", "in", "is", "it", "its", "me", "my", "of", "on", "our", "that",
        "the", "their", "this", "to", "was", "were", "which", "who", "will",
        "with",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_builds_vocabulary_and_transform_matches_width() {
        let docs = vec![
            "what is the average balance".to_string(),
            "how many clients defaulted".to_string(),
            "show clients with job management".to_string(),
        ];
        let vectorizer = TfIdfVectorizer::fit(&docs, english_stop_words());
        assert!(vectorizer.vocabulary_size() > 0);

        let features = vectorizer.transform("average balance of clients");
        assert_eq!(features.len(), vectorizer.vocabulary_size());
        assert!(features.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn unknown_tokens_produce_zero_vector() {
        let docs = vec!["average balance".to_string()];
        let vectorizer = TfIdfVectorizer::fit(&docs, english_stop_words());
        let features = vectorizer.transform("completely unrelated words");
        assert!(features.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn transform_is_deterministic() {
        let docs = vec![
            "sum of balance".to_string(),
            "count of clients".to_string(),
        ];
        let vectorizer = TfIdfVectorizer::fit(&docs, english_stop_words());
        assert_eq!(
            vectorizer.transform("sum balance"),
            vectorizer.transform("sum balance")
        );
    }
}
