// src/types.rs
//! Core data model: articles, users, and their opaque identifiers.
//!
//! These are snapshot types. The engine never mutates an `Article` in place;
//! counters move through `Store::update_article_counters` and profiles move
//! through the interest updater, so every ranking call works over an
//! externally supplied, immutable view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interests::InterestProfile;

/// Opaque article identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub String);

/// Opaque user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl From<&str> for ArticleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A published article as the engine sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    /// Raw text/markup; input to keyword extraction.
    pub body: String,
    /// Extraction output; insertion order is relevance rank, most relevant
    /// first, at most 10 entries, deduplicated.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Monotonically non-decreasing popularity counters.
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub impressions: u64,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// True if any of the article's keywords appears in `wanted`.
    pub fn matches_any(&self, wanted: &[String]) -> bool {
        self.keywords.iter().any(|k| wanted.iter().any(|w| w == k))
    }
}

/// A user record with the embedded interest profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub interests: InterestProfile,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: UserId(id.into()),
            name: name.into(),
            interests: InterestProfile::default(),
        }
    }
}
