use amma_core::{AmmaConfig, PromptConfig};
use std::io::Write;
use std::time::Duration;

#[test]
fn bundled_defaults_match_code_defaults() -> anyhow::Result<()> {
    let empty = tempfile::Builder::new().suffix(".toml").tempfile()?;
    let config = AmmaConfig::from_file(empty.path())?;

    let defaults = AmmaConfig::default();
    assert_eq!(config.database.files_table, defaults.database.files_table);
    assert_eq!(config.agent.model, defaults.agent.model);
    assert_eq!(config.video, defaults.video);
    assert_eq!(config.retrieval, defaults.retrieval);
    Ok(())
}

#[test]
fn explicit_file_overrides_only_named_keys() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(
        file,
        "[video]\nmax_attempts = 3\npoll_interval_secs = 1\n\n[video.prompt]\nmax_chars = 200"
    )?;

    let config = AmmaConfig::from_file(file.path())?;

    assert_eq!(config.video.max_attempts, 3);
    assert_eq!(config.video.poll_interval(), Duration::from_secs(1));
    assert_eq!(config.video.prompt.max_chars, 200);
    assert_eq!(config.video.prompt.scan_lines, PromptConfig::default().scan_lines);
    assert_eq!(config.video.model, "sora-2");
    Ok(())
}

#[test]
fn missing_explicit_file_is_an_error() {
    let result = AmmaConfig::from_file("/definitely/not/here/amma.toml");
    let err = result.expect_err("missing file should fail");
    assert!(err.is_missing_prerequisite());
}

#[test]
fn config_api_key_used_when_present() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "[database]\napi_key = \"from-config\"")?;

    let config = AmmaConfig::from_file(file.path())?;
    let key = config.database.resolve_api_key()?;

    // SUPABASE_KEY, when exported in the test environment, takes precedence.
    match std::env::var("SUPABASE_KEY") {
        Ok(env_key) if !env_key.trim().is_empty() => assert_eq!(key, env_key),
        _ => assert_eq!(key, "from-config"),
    }
    Ok(())
}
