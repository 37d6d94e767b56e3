// src/config.rs
//! Engine configuration: TOML schema, env overrides, thread-safe handle,
//! and a dev-gated hot-reload watcher.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::{Duration, SystemTime};

use serde::Deserialize;
use tracing::info;

use crate::interests::InteractionWeights;

// --- env defaults & names ---
pub const DEFAULT_CONFIG_PATH: &str = "config/engine.toml";

pub const ENV_CONFIG_PATH: &str = "ENGINE_CONFIG_PATH";
pub const ENV_EXTRACTION_TIMEOUT_MS: &str = "ENGINE_EXTRACTION_TIMEOUT_MS";

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub extraction: ExtractionCfg,
    #[serde(default)]
    pub ranking: RankingCfg,
    #[serde(default)]
    pub weights: InteractionWeights,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionCfg {
    /// Max keywords stored per article.
    #[serde(default = "default_keyword_cap")]
    pub keyword_cap: usize,
    /// Budget for one extraction pass over the corpus.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingCfg {
    /// How many top-weighted interests narrow the recommendation pool.
    #[serde(default = "default_top_interests")]
    pub top_interests: usize,
    /// Trending page size when the caller supplies none.
    #[serde(default = "default_trending_limit")]
    pub trending_default_limit: usize,
}

fn default_keyword_cap() -> usize {
    crate::tfidf::KEYWORD_CAP
}
fn default_timeout_ms() -> u64 {
    2_000
}
fn default_top_interests() -> usize {
    crate::rank::TOP_INTERESTS
}
fn default_trending_limit() -> usize {
    crate::rank::DEFAULT_TRENDING_LIMIT
}

impl Default for ExtractionCfg {
    fn default() -> Self {
        Self {
            keyword_cap: default_keyword_cap(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for RankingCfg {
    fn default() -> Self {
        Self {
            top_interests: default_top_interests(),
            trending_default_limit: default_trending_limit(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionCfg::default(),
            ranking: RankingCfg::default(),
            weights: InteractionWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Load from the configured TOML file. Uses ENGINE_CONFIG_PATH or the
    /// default path; a missing or unreadable file falls back to defaults,
    /// a present-but-invalid file is an error.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();
        let mut cfg = match fs::read_to_string(&path) {
            Ok(content) => Self::from_toml_str(&content)?,
            Err(_) => {
                info!(path = %path.display(), "engine config not found, using defaults");
                Self::default()
            }
        };
        cfg.apply_env_overrides();
        cfg.harden();
        Ok(cfg)
    }

    /// Load from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: EngineConfig = toml::from_str(toml_str)?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(ms) = std::env::var(ENV_EXTRACTION_TIMEOUT_MS)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            self.extraction.timeout_ms = ms;
        }
    }

    /// Clamp odd values to something sane rather than erroring.
    fn harden(&mut self) {
        if self.extraction.keyword_cap == 0 {
            self.extraction.keyword_cap = default_keyword_cap();
        }
        if self.extraction.timeout_ms == 0 {
            self.extraction.timeout_ms = default_timeout_ms();
        }
        if self.ranking.top_interests == 0 {
            self.ranking.top_interests = default_top_interests();
        }
        if self.ranking.trending_default_limit == 0 {
            self.ranking.trending_default_limit = default_trending_limit();
        }
    }
}

pub fn config_path() -> PathBuf {
    std::env::var(ENV_CONFIG_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/* ----------------------------
Thread-safe handle + hot reload
---------------------------- */

/// A threadsafe handle that can hot-reload the underlying config in dev.
/// - Enable by setting ENGINE_HOT_RELOAD=1
/// - Dev-gated: active only in debug builds or APP_ENV in {local, development, dev}.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<EngineConfig>>,
}

impl ConfigHandle {
    pub fn new(cfg: EngineConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(cfg)),
        }
    }

    /// Cheap snapshot of the current config. A poisoned lock still yields
    /// the stored value: config writes are whole-struct swaps, so the inner
    /// data stays consistent even if a holder panicked.
    pub fn get(&self) -> EngineConfig {
        let guard = self
            .inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.clone()
    }

    pub fn replace(&self, cfg: EngineConfig) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = cfg;
    }
}

fn hot_reload_enabled() -> bool {
    let want = std::env::var("ENGINE_HOT_RELOAD")
        .ok()
        .map(|v| v == "1")
        .unwrap_or(false);
    if !want {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("APP_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

/// Poll `path` for mtime changes every 2s and swap the config atomically.
pub fn start_hot_reload_thread(handle: ConfigHandle, path: PathBuf) {
    if !hot_reload_enabled() {
        return;
    }

    thread::spawn(move || {
        let poll = Duration::from_secs(2);
        let mut last_mtime: Option<SystemTime> = None;

        loop {
            match fs::metadata(&path).and_then(|m| m.modified()) {
                Ok(mtime) => {
                    let changed = match last_mtime {
                        None => {
                            last_mtime = Some(mtime);
                            false
                        }
                        Some(prev) => mtime > prev,
                    };
                    if changed {
                        if let Ok(content) = fs::read_to_string(&path) {
                            if let Ok(mut fresh) = EngineConfig::from_toml_str(&content) {
                                fresh.harden();
                                handle.replace(fresh);
                                info!(path = %path.display(), "engine config hot-reloaded");
                            }
                        }
                        last_mtime = Some(mtime);
                    }
                }
                Err(_) => {
                    // File missing or unreadable; keep trying.
                }
            }
            thread::sleep(poll);
        }
    });
}
