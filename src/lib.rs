// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod interests;
pub mod metrics;
pub mod normalize;
pub mod rank;
pub mod service;
pub mod store;
pub mod tfidf;
pub mod types;

mod obs;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::config::{ConfigHandle, EngineConfig};
pub use crate::error::{EngineError, Result};
pub use crate::interests::{InteractionKind, InteractionWeights, InterestProfile};
pub use crate::service::Engine;
pub use crate::store::{MemoryStore, Store};
pub use crate::types::{Article, ArticleId, User, UserId};
