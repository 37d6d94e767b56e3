// src/interests.rs
//! Interaction kinds and per-user interest profiles.
//!
//! `InteractionKind` is a closed variant set with an explicit weight table;
//! an input string outside the set fails to parse and the caller treats it
//! as a weight-0 no-op rather than an error. `InterestProfile` is an
//! insertion-ordered keyword→weight table with additive merge semantics:
//! weights only ever increase, and equal weights rank by first insertion.

use serde::{Deserialize, Serialize};

/// The scored interaction kinds. Anything else is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Click,
    Like,
    Share,
    Comment,
}

impl InteractionKind {
    /// Parse a raw kind string; `None` for anything outside the closed set.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "click" => Some(Self::Click),
            "like" => Some(Self::Like),
            "share" => Some(Self::Share),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Like => "like",
            Self::Share => "share",
            Self::Comment => "comment",
        }
    }
}

/// Weight table for interaction kinds. Config-overridable; the defaults are
/// the fixed policy (click→1, like/share/comment→5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionWeights {
    pub click: u64,
    pub like: u64,
    pub share: u64,
    pub comment: u64,
}

impl Default for InteractionWeights {
    fn default() -> Self {
        Self {
            click: 1,
            like: 5,
            share: 5,
            comment: 5,
        }
    }
}

impl InteractionWeights {
    /// Weight for a parsed kind; an unparsed kind (`None`) weighs 0.
    pub fn weight(&self, kind: Option<InteractionKind>) -> u64 {
        match kind {
            Some(InteractionKind::Click) => self.click,
            Some(InteractionKind::Like) => self.like,
            Some(InteractionKind::Share) => self.share,
            Some(InteractionKind::Comment) => self.comment,
            None => 0,
        }
    }
}

/// One keyword and its accumulated weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestEntry {
    pub keyword: String,
    pub weight: u64,
}

/// A user's accumulated keyword→weight table.
///
/// Vec-backed so insertion order is structural: `top_n` sorts stably by
/// weight descending, which makes "first-inserted wins on ties" a defined
/// rule instead of map-iteration luck. Profiles are small (one entry per
/// keyword ever encountered via a scored interaction), so linear lookup is
/// fine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterestProfile {
    entries: Vec<InterestEntry>,
}

impl InterestProfile {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn weight_of(&self, keyword: &str) -> u64 {
        self.entries
            .iter()
            .find(|e| e.keyword == keyword)
            .map_or(0, |e| e.weight)
    }

    /// Additive merge: add `weight` to an existing key or insert it at
    /// `weight`. Adding 0 is skipped entirely so that unscored interactions
    /// leave the profile untouched (no zero-weight entries are created).
    pub fn add(&mut self, keyword: &str, weight: u64) {
        if weight == 0 {
            return;
        }
        match self.entries.iter_mut().find(|e| e.keyword == keyword) {
            Some(e) => e.weight += weight,
            None => self.entries.push(InterestEntry {
                keyword: keyword.to_string(),
                weight,
            }),
        }
    }

    /// Apply one scored interaction: every keyword on the article gains the
    /// same weight.
    pub fn apply(&mut self, keywords: &[String], weight: u64) {
        for kw in keywords {
            self.add(kw, weight);
        }
    }

    /// The `n` highest-weighted keywords. Ties break by first insertion
    /// (stable sort over the insertion-ordered backing Vec).
    pub fn top_n(&self, n: usize) -> Vec<String> {
        let mut ranked: Vec<&InterestEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.weight.cmp(&a.weight));
        ranked.into_iter().take(n).map(|e| e.keyword.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterestEntry> {
        self.entries.iter()
    }
}
