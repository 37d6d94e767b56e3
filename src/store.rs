// src/store.rs
//! Abstract persistence seam and the in-memory reference store.
//!
//! The engine only ever talks to `Store`; real persistence lives elsewhere.
//! `MemoryStore` backs the binary and the test suite with `RwLock`-guarded
//! maps. Counter updates are deltas applied under the write lock, so
//! concurrent increments from different requests are both reflected.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{EngineError, Result};
use crate::types::{Article, ArticleId, User, UserId};

#[async_trait]
pub trait Store: Send + Sync {
    /// Full corpus of article bodies, for document-frequency statistics.
    async fn fetch_all_article_bodies(&self) -> Result<Vec<String>>;

    /// Snapshot of every article, for the rankers.
    async fn fetch_articles(&self) -> Result<Vec<Article>>;

    async fn fetch_article(&self, id: &ArticleId) -> Result<Option<Article>>;

    async fn fetch_user(&self, id: &UserId) -> Result<Option<User>>;

    async fn save_user(&self, user: &User) -> Result<()>;

    /// Atomically bump the popularity counters by the given deltas.
    async fn update_article_counters(
        &self,
        id: &ArticleId,
        views_delta: u64,
        impressions_delta: u64,
    ) -> Result<()>;
}

/// In-memory store used by the binary and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: RwLock<HashMap<ArticleId, Article>>,
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_article(&self, article: Article) {
        self.articles
            .write()
            .await
            .insert(article.id.clone(), article);
    }

    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id.clone(), user);
    }

    pub async fn article_count(&self) -> usize {
        self.articles.read().await.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn fetch_all_article_bodies(&self) -> Result<Vec<String>> {
        let arts = self.articles.read().await;
        Ok(arts.values().map(|a| a.body.clone()).collect())
    }

    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        let arts = self.articles.read().await;
        Ok(arts.values().cloned().collect())
    }

    async fn fetch_article(&self, id: &ArticleId) -> Result<Option<Article>> {
        Ok(self.articles.read().await.get(id).cloned())
    }

    async fn fetch_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn save_user(&self, user: &User) -> Result<()> {
        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update_article_counters(
        &self,
        id: &ArticleId,
        views_delta: u64,
        impressions_delta: u64,
    ) -> Result<()> {
        let mut arts = self.articles.write().await;
        let article = arts
            .get_mut(id)
            .ok_or_else(|| EngineError::not_found(format!("article {id}")))?;
        article.views = article.views.saturating_add(views_delta);
        article.impressions = article.impressions.saturating_add(impressions_delta);
        Ok(())
    }
}
