// src/rank.rs
//! Recommendation and trending rankers.
//!
//! Pure functions over article snapshots; the service layer feeds them the
//! store's current state. Both surfaces share one popularity ordering:
//! views descending, then impressions, then `updated_at`. Recommendation is
//! filter-then-popularity-sort — the interest profile only narrows the
//! candidate set, it does not weight the ordering.

use std::cmp::Ordering;

use crate::interests::InterestProfile;
use crate::types::Article;

/// How many top-weighted interests narrow the candidate set.
pub const TOP_INTERESTS: usize = 5;

/// Default trending page size when the caller supplies none (or garbage).
pub const DEFAULT_TRENDING_LIMIT: usize = 10;

/// The shared three-key popularity ordering, most popular first.
pub fn popularity_cmp(a: &Article, b: &Article) -> Ordering {
    b.views
        .cmp(&a.views)
        .then_with(|| b.impressions.cmp(&a.impressions))
        .then_with(|| b.updated_at.cmp(&a.updated_at))
}

/// Sort articles in place by popularity.
pub fn sort_by_popularity(articles: &mut [Article]) {
    articles.sort_by(popularity_cmp);
}

/// Rank candidates for a user: articles whose keywords intersect the user's
/// `top_n` highest-weighted interests, popularity-sorted. A user with no
/// recorded interests gets the cold-start fallback — every article, same
/// ordering as trending.
pub fn recommend(profile: &InterestProfile, articles: Vec<Article>, top_n: usize) -> Vec<Article> {
    let top = profile.top_n(top_n);
    let mut candidates: Vec<Article> = if top.is_empty() {
        articles
    } else {
        articles
            .into_iter()
            .filter(|a| a.matches_any(&top))
            .collect()
    };
    sort_by_popularity(&mut candidates);
    candidates
}

/// All articles by popularity, truncated to `limit`.
pub fn trending(mut articles: Vec<Article>, limit: usize) -> Vec<Article> {
    sort_by_popularity(&mut articles);
    articles.truncate(limit);
    articles
}

/// Resolve a caller-supplied trending limit: positive integers pass
/// through, anything else (absent, non-numeric, zero, negative) falls back
/// to the default.
pub fn resolve_trending_limit(raw: Option<&str>, default: usize) -> usize {
    match raw.map(str::trim).and_then(|s| s.parse::<i64>().ok()) {
        Some(n) if n > 0 => n as usize,
        _ => default,
    }
}
