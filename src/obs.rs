// src/obs.rs
//! Dev-only diagnostics. Article bodies are user content; they are never
//! logged raw, only as a short anonymized hash plus truncated term lists.

use tracing::info;

// Dev logging gate: ENGINE_DEV_LOG=1 AND dev env (debug build or APP_ENV in {local,development,dev})
pub(crate) fn dev_logging_enabled() -> bool {
    let on = std::env::var("ENGINE_DEV_LOG").ok().as_deref() == Some("1");
    if !on {
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

/// Short anonymized fingerprint of a text (first 6 bytes of SHA-256, hex).
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub(crate) fn truncate_vec<T: ToString>(v: &[T], max: usize) -> Vec<String> {
    v.iter().take(max).map(|x| x.to_string()).collect()
}

/// Minimal, anonymized dev logger for extraction events.
pub(crate) fn dev_log_extraction(event: &str, body: &str, corpus_size: usize, keywords: &[String]) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(body);
    let kw_short = truncate_vec(keywords, 5);
    info!(
        target: "extraction",
        %id, corpus_size, event,
        keywords = ?kw_short
    );
}
