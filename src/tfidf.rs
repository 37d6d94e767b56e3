// src/tfidf.rs
//! Term-weighting engine: corpus-relative TF-IDF keyword extraction.
//!
//! Every invocation builds its document statistics from exactly the corpus
//! passed in and discards them on return. There is no process-wide
//! accumulator, so repeated calls with the same `(target, corpus)` yield the
//! same keyword sequence regardless of what was tagged before.
//!
//! Scoring: for a term `t` in the target document, `tf(t)` is the raw count
//! in the target and `idf(t) = ln(N / (1 + df(t)))`, where `N` counts the
//! corpus plus the target and `df(t)` counts the corpus documents containing
//! `t`. With an empty corpus the idf collapses to `ln(1/1) = 0`, every score
//! is equal, and the tiebreak (first occurrence in the target) decides.

use std::collections::{HashMap, HashSet};

use crate::normalize::terms_of;

/// Hard cap on extracted keywords per article.
pub const KEYWORD_CAP: usize = 10;

/// Extract up to `cap` keywords for `target`, using `corpus` for the
/// document-frequency statistics. Pure function of its inputs.
///
/// Output terms are distinct, ordered by descending `tf × idf`; ties break
/// by first occurrence order in the target.
pub fn extract_keywords(target: &str, corpus: &[String], cap: usize) -> Vec<String> {
    let target_terms = terms_of(target);
    if target_terms.is_empty() || cap == 0 {
        return Vec::new();
    }

    // Term frequency + first-occurrence index within the target.
    let mut tf: HashMap<&str, (u32, usize)> = HashMap::new();
    for (i, term) in target_terms.iter().enumerate() {
        let entry = tf.entry(term.as_str()).or_insert((0, i));
        entry.0 += 1;
    }

    // Document frequency over the supplied corpus only; each document
    // contributes at most once per term.
    let mut df: HashMap<String, u32> = HashMap::new();
    for doc in corpus {
        let uniq: HashSet<String> = terms_of(doc).into_iter().collect();
        for term in uniq {
            *df.entry(term).or_insert(0) += 1;
        }
    }

    let n = (corpus.len() + 1) as f64;
    let mut scored: Vec<(&str, f64, usize)> = tf
        .iter()
        .map(|(term, &(count, first))| {
            let d = df.get(*term).copied().unwrap_or(0) as f64;
            let idf = (n / (1.0 + d)).ln();
            (*term, f64::from(count) * idf, first)
        })
        .collect();

    // Deterministic: score desc, then first occurrence asc.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.2.cmp(&b.2)));
    scored.truncate(cap);
    scored.into_iter().map(|(t, _, _)| t.to_string()).collect()
}
