// src/service.rs
//! Engine façade: the four core operations wired to the abstract store.
//!
//! Holds no domain state of its own — article keywords/counters and user
//! profiles live in the store; the only thing kept here is a per-user lock
//! registry so concurrent interactions for the same user serialize instead
//! of racing read-modify-write on the profile. Different users never share
//! a lock and never contend.

use std::collections::HashMap;
use std::sync::Arc;

use metrics::counter;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::ConfigHandle;
use crate::error::{EngineError, Result};
use crate::extract::tag_article_within;
use crate::interests::InteractionKind;
use crate::rank;
use crate::store::Store;
use crate::types::{Article, ArticleId, UserId};

pub struct Engine {
    store: Arc<dyn Store>,
    config: ConfigHandle,
    user_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl Engine {
    pub fn new(store: Arc<dyn Store>, config: ConfigHandle) -> Self {
        Self {
            store,
            config,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Derive keyword tags for `body` against the full stored corpus.
    /// Invoked on create and on every edit; always re-tags from scratch.
    pub async fn tag_article(&self, body: &str) -> Result<Vec<String>> {
        let cfg = self.config.get();
        let corpus = self.store.fetch_all_article_bodies().await?;
        tag_article_within(
            body.to_string(),
            corpus,
            cfg.extraction.keyword_cap,
            cfg.extraction.timeout_ms,
        )
        .await
    }

    /// Merge one interaction into the user's interest profile.
    ///
    /// NotFound if user or article is absent; an unparsed kind is a no-op
    /// after the existence checks. The fetch-merge-save sequence runs under
    /// the user's lock, so no observer sees a partially updated profile and
    /// concurrent interactions accumulate instead of overwriting.
    pub async fn apply_interaction(
        &self,
        user_id: &UserId,
        article_id: &ArticleId,
        kind: Option<InteractionKind>,
    ) -> Result<()> {
        let lock = self.user_lock(user_id).await;
        let _guard = lock.lock().await;

        let mut user = self
            .store
            .fetch_user(user_id)
            .await?
            .ok_or_else(|| EngineError::not_found(format!("user {user_id}")))?;
        let article = self
            .store
            .fetch_article(article_id)
            .await?
            .ok_or_else(|| EngineError::not_found(format!("article {article_id}")))?;

        let weight = self.config.get().weights.weight(kind);
        if weight == 0 {
            counter!("engine_interactions_ignored_total").increment(1);
            debug!(user = %user_id, article = %article_id, "unscored interaction ignored");
            return Ok(());
        }

        user.interests.apply(&article.keywords, weight);
        self.store.save_user(&user).await?;
        counter!("engine_interactions_applied_total").increment(1);
        debug!(
            user = %user_id,
            article = %article_id,
            kind = kind.map(|k| k.as_str()).unwrap_or("unknown"),
            weight,
            "interaction applied"
        );
        Ok(())
    }

    /// Open an article for reading: bump views+impressions and, for a
    /// signed-in reader, score a click against their profile. The returned
    /// snapshot reflects the bump.
    pub async fn open_article(
        &self,
        reader: Option<&UserId>,
        article_id: &ArticleId,
    ) -> Result<Article> {
        let mut article = self
            .store
            .fetch_article(article_id)
            .await?
            .ok_or_else(|| EngineError::not_found(format!("article {article_id}")))?;

        self.store
            .update_article_counters(article_id, 1, 1)
            .await?;
        article.views = article.views.saturating_add(1);
        article.impressions = article.impressions.saturating_add(1);

        if let Some(user_id) = reader {
            self.apply_interaction(user_id, article_id, Some(InteractionKind::Click))
                .await?;
        }
        Ok(article)
    }

    /// Personalized listing: candidate filter on the user's top interests,
    /// then the shared popularity ordering. Empty result is fine.
    pub async fn recommend(&self, user_id: &UserId) -> Result<Vec<Article>> {
        let user = self
            .store
            .fetch_user(user_id)
            .await?
            .ok_or_else(|| EngineError::not_found(format!("user {user_id}")))?;
        let articles = self.store.fetch_articles().await?;
        let top_n = self.config.get().ranking.top_interests;
        counter!("engine_recommendations_total").increment(1);
        Ok(rank::recommend(&user.interests, articles, top_n))
    }

    /// Global popularity listing, truncated to `limit`.
    pub async fn trending(&self, limit: usize) -> Result<Vec<Article>> {
        let articles = self.store.fetch_articles().await?;
        counter!("engine_trending_total").increment(1);
        Ok(rank::trending(articles, limit))
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    async fn user_lock(&self, user_id: &UserId) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        // Entries with strong count 1 are held by nobody but the registry;
        // drop them so the map tracks active users, not every user ever seen.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks
            .entry(user_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    #[cfg(test)]
    async fn user_lock_registry_len(&self) -> usize {
        self.user_locks.lock().await.len()
    }
}
