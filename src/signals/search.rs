//! TF-IDF search over proof records.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::record::ProofRecord;

/// Default number of hits returned.
pub const DEFAULT_TOP_K: usize = 3;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("valid regex"));

/// Lowercased word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

fn term_frequencies(tokens: &[String]) -> HashMap<String, f64> {
    let mut counts: HashMap<String, f64> = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_default() += 1.0;
    }
    let total = tokens.len() as f64;
    for value in counts.values_mut() {
        *value /= total;
    }
    counts
}

fn norm(vector: &HashMap<String, f64>) -> f64 {
    vector.values().map(|v| v * v).sum::<f64>().sqrt()
}

fn cosine(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(term, x)| b.get(term).map(|y| x * y))
        .sum();
    let denominator = norm(a) * norm(b);
    if denominator == 0.0 {
        0.0
    } else {
        dot / denominator
    }
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit<'a> {
    /// Cosine similarity to the query.
    pub score: f64,
    /// Matching record.
    pub record: &'a ProofRecord,
}

/// TF-IDF vectors for a fixed set of records.
#[derive(Debug)]
pub struct SearchIndex<'a> {
    records: &'a [ProofRecord],
    idf: HashMap<String, f64>,
    vectors: Vec<HashMap<String, f64>>,
}

impl<'a> SearchIndex<'a> {
    /// Index the records' titles and bodies.
    pub fn build(records: &'a [ProofRecord]) -> Self {
        let tokenized: Vec<Vec<String>> = records.iter().map(|r| tokenize(&r.search_text())).collect();

        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for tokens in &tokenized {
            let unique: HashSet<&String> = tokens.iter().collect();
            for term in unique {
                *document_frequency.entry(term.clone()).or_default() += 1;
            }
        }

        // Smoothed with df + 1, so a term in every document weighs slightly negative.
        let n = records.len() as f64;
        let idf: HashMap<String, f64> = document_frequency
            .into_iter()
            .map(|(term, df)| (term, (n / (df as f64 + 1.0)).ln()))
            .collect();

        let vectors = tokenized
            .iter()
            .map(|tokens| {
                term_frequencies(tokens)
                    .into_iter()
                    .map(|(term, tf)| {
                        let weight = tf * idf.get(&term).copied().unwrap_or(0.0);
                        (term, weight)
                    })
                    .collect()
            })
            .collect();

        debug!(records = records.len(), terms = idf.len(), "Built search index");
        Self { records, idf, vectors }
    }

    /// Records with a positive score, best first, at most `top_k`.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit<'a>> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let query_vector: HashMap<String, f64> = term_frequencies(&tokens)
            .into_iter()
            .map(|(term, tf)| {
                let weight = tf * self.idf.get(&term).copied().unwrap_or(0.0);
                (term, weight)
            })
            .collect();

        let mut hits: Vec<SearchHit<'a>> = self
            .vectors
            .iter()
            .zip(self.records)
            .map(|(vector, record)| SearchHit {
                score: cosine(&query_vector, vector),
                record,
            })
            .filter(|hit| hit.score > 0.0)
            .collect();

        // Stable, so ties keep record order.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(top_k);
        hits
    }
}
