//! TF-IDF index over normalized search titles.
//!
//! Features are word unigrams and bigrams. Weights use raw term counts and a
//! smoothed inverse document frequency, `ln((1 + n) / (1 + df)) + 1`, and
//! every row is scaled to unit length so cosine similarity is a dot product.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

/// Tokens are runs of at least two word characters
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));

/// Sparse feature vector, entries sorted by column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_weights(weights: BTreeMap<usize, f64>) -> Self {
        Self {
            entries: weights.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of non-zero features
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn magnitude(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (col_a, w_a) = self.entries[i];
            let (col_b, w_b) = other.entries[j];
            match col_a.cmp(&col_b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += w_a * w_b;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot
    }

    /// Cosine similarity, 0.0 when either vector has no magnitude
    pub fn cosine_similarity(&self, other: &SparseVector) -> f64 {
        let denom = self.magnitude() * other.magnitude();
        if denom == 0.0 {
            return 0.0;
        }
        let result = self.dot(other) / denom;
        if !result.is_finite() {
            return 0.0;
        }
        result.clamp(0.0, 1.0)
    }

    fn normalized(mut self) -> Self {
        let magnitude = self.magnitude();
        if magnitude > 0.0 {
            for (_, w) in self.entries.iter_mut() {
                *w /= magnitude;
            }
        }
        self
    }
}

/// Fitted TF-IDF model plus one row per indexed document
#[derive(Debug, Default)]
pub struct TitleIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
}

impl TitleIndex {
    /// Fits the vocabulary and weights on `documents` and indexes each one
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let analyzed: Vec<Vec<String>> = documents.iter().map(|d| terms(d.as_ref())).collect();

        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for doc_terms in &analyzed {
            let mut seen: Vec<&str> = doc_terms.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term).or_default() += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (column, (term, df)) in document_frequency.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), column);
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        let mut index = Self {
            vocabulary,
            idf,
            rows: Vec::new(),
        };
        index.rows = analyzed.iter().map(|t| index.vectorize(t)).collect();
        index
    }

    /// Projects arbitrary text into the fitted feature space
    ///
    /// Terms unknown to the vocabulary are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.vectorize(&terms(text))
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    fn vectorize(&self, terms: &[String]) -> SparseVector {
        let mut weights: BTreeMap<usize, f64> = BTreeMap::new();
        for term in terms {
            if let Some(&column) = self.vocabulary.get(term) {
                *weights.entry(column).or_default() += 1.0;
            }
        }
        for (column, w) in weights.iter_mut() {
            *w *= self.idf[*column];
        }
        SparseVector::from_weights(weights).normalized()
    }
}

/// Lowercased unigrams followed by space-joined bigrams
fn terms(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN.find_iter(&lowered).map(|m| m.as_str()).collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}
