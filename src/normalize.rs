// src/normalize.rs
//! Text normalization + tokenization, applied uniformly to every document
//! (target and corpus alike) before term weighting.

use once_cell::sync::OnceCell;
use regex::Regex;

/// Normalize raw article markup into plain text: decode HTML entities,
/// strip tags, collapse whitespace, trim.
pub fn normalize_text(s: &str) -> String {
    // 1) HTML entity decode
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip HTML tags
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
    out = re_tags.replace_all(&out, " ").to_string();

    // 3) Normalize typographic quotes to ASCII
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 4) Collapse whitespace
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"));
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}

/// Tokenize plain text into lowercase alphanumeric terms.
///
/// Splitting on non-alphanumerics covers punctuation, quotes, and dashes;
/// no stemming, no stopword list — term weighting handles ubiquitous words
/// through the document-frequency statistics.
pub fn tokenize(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Normalize then tokenize in one step.
pub fn terms_of(raw: &str) -> Vec<String> {
    tokenize(&normalize_text(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup_and_entities() {
        let t = normalize_text("<p>Rust &amp; the <b>GC</b> debate</p>");
        assert_eq!(t, "Rust & the GC debate");
    }

    #[test]
    fn tokenize_lowercases_and_splits() {
        let toks = tokenize("The GC debate, re-opened!");
        assert_eq!(toks, vec!["the", "gc", "debate", "re", "opened"]);
    }

    #[test]
    fn terms_of_handles_markup_only_input() {
        assert!(terms_of("<br/><hr>").is_empty());
        assert!(terms_of("  \n\t ").is_empty());
    }

    #[test]
    fn unicode_terms_survive() {
        let toks = tokenize("Čeština příliš žluťoučký");
        assert_eq!(toks, vec!["čeština", "příliš", "žluťoučký"]);
    }
}
