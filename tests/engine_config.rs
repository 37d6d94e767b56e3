// tests/engine_config.rs
//
// Config loading behavior: default fallback on a missing file, TOML file
// loading via ENGINE_CONFIG_PATH, and env overrides. Serialized because
// the tests mutate process env vars.

use serial_test::serial;

use article_engine::config::{EngineConfig, ENV_CONFIG_PATH, ENV_EXTRACTION_TIMEOUT_MS};

fn clear_env() {
    std::env::remove_var(ENV_CONFIG_PATH);
    std::env::remove_var(ENV_EXTRACTION_TIMEOUT_MS);
}

#[test]
#[serial]
fn missing_file_falls_back_to_defaults() {
    clear_env();
    std::env::set_var(ENV_CONFIG_PATH, "/nonexistent/engine.toml");

    let cfg = EngineConfig::load().expect("defaults on missing file");
    assert_eq!(cfg.extraction.keyword_cap, 10);
    assert_eq!(cfg.ranking.top_interests, 5);
    assert_eq!(cfg.weights.click, 1);

    clear_env();
}

#[test]
#[serial]
fn config_file_is_loaded_from_env_path() {
    clear_env();
    let dir = std::env::temp_dir().join("article-engine-cfg-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("engine.toml");
    std::fs::write(
        &path,
        r#"
[extraction]
keyword_cap = 7
timeout_ms = 1234

[weights]
click = 2
like = 6
share = 6
comment = 6
"#,
    )
    .unwrap();
    std::env::set_var(ENV_CONFIG_PATH, &path);

    let cfg = EngineConfig::load().expect("valid file");
    assert_eq!(cfg.extraction.keyword_cap, 7);
    assert_eq!(cfg.extraction.timeout_ms, 1234);
    assert_eq!(cfg.weights.like, 6);
    // Untouched section keeps its defaults.
    assert_eq!(cfg.ranking.trending_default_limit, 10);

    clear_env();
}

#[test]
#[serial]
fn env_override_wins_over_file_value() {
    clear_env();
    std::env::set_var(ENV_CONFIG_PATH, "/nonexistent/engine.toml");
    std::env::set_var(ENV_EXTRACTION_TIMEOUT_MS, "750");

    let cfg = EngineConfig::load().expect("defaults + override");
    assert_eq!(cfg.extraction.timeout_ms, 750);

    clear_env();
}
