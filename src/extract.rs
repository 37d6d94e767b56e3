// src/extract.rs
//! Keyword extraction service.
//!
//! Thin orchestration over the term-weighting engine: tag a body against
//! the current corpus, reject unprocessable bodies, and (for the async
//! variant) run the CPU-bound pass off the request path under a budget.
//! Re-tags from scratch on every create/edit; there is no incremental
//! update.

use metrics::counter;

use crate::error::{EngineError, Result};
use crate::obs::dev_log_extraction;
use crate::tfidf::extract_keywords;

/// Tag an article body against `corpus`. Pure and synchronous.
///
/// A body that yields no terms after normalization (empty, or markup and
/// punctuation only) is unprocessable: callers must not persist a tag-less
/// article, so this is a `Content` error rather than an empty tag set.
pub fn tag_article(body: &str, corpus: &[String], cap: usize) -> Result<Vec<String>> {
    let keywords = extract_keywords(body, corpus, cap);
    if keywords.is_empty() {
        counter!("engine_extraction_rejects_total").increment(1);
        dev_log_extraction("rejected", body, corpus.len(), &keywords);
        return Err(EngineError::content("body yields no terms"));
    }
    counter!("engine_extractions_total").increment(1);
    dev_log_extraction("tagged", body, corpus.len(), &keywords);
    Ok(keywords)
}

/// Tag with a caller budget. The pass scales with total corpus size, so it
/// runs on the blocking pool; on expiry the caller gets `Timeout` and must
/// not persist partial or absent tags.
pub async fn tag_article_within(
    body: String,
    corpus: Vec<String>,
    cap: usize,
    timeout_ms: u64,
) -> Result<Vec<String>> {
    let budget = std::time::Duration::from_millis(timeout_ms);
    let work = tokio::task::spawn_blocking(move || tag_article(&body, &corpus, cap));

    match tokio::time::timeout(budget, work).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(EngineError::Store(format!(
            "extraction task failed: {join_err}"
        ))),
        Err(_elapsed) => {
            counter!("engine_extraction_timeouts_total").increment(1);
            Err(EngineError::Timeout(timeout_ms))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfidf::KEYWORD_CAP;

    #[test]
    fn nonempty_body_yields_tags_even_without_corpus() {
        let kw = tag_article("Ownership makes Rust memory safe", &[], KEYWORD_CAP).unwrap();
        assert!(!kw.is_empty());
        assert!(kw.len() <= KEYWORD_CAP);
        assert!(kw.contains(&"ownership".to_string()));
    }

    #[test]
    fn markup_only_body_is_unprocessable() {
        let err = tag_article("<div><img src='x'/></div>", &[], KEYWORD_CAP).unwrap_err();
        assert!(matches!(err, EngineError::Content(_)));
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let corpus = vec!["the gc pause debate".to_string(), "rust rust rust".to_string()];
        let body = "incremental gc design in a rust runtime";
        let a = tag_article(body, &corpus, KEYWORD_CAP).unwrap();
        let b = tag_article(body, &corpus, KEYWORD_CAP).unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn budget_variant_returns_tags() {
        let kw = tag_article_within(
            "async budgets still produce keywords".into(),
            vec!["other doc".into()],
            KEYWORD_CAP,
            2_000,
        )
        .await
        .unwrap();
        assert!(!kw.is_empty());
    }

    #[tokio::test]
    async fn content_error_passes_through_budget_variant() {
        let err = tag_article_within("???".into(), Vec::new(), KEYWORD_CAP, 2_000)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Content(_)));
    }
}
