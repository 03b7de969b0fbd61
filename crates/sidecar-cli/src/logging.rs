use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Crates whose log level `--log-level` controls.
const TARGET_CRATES: &[&str] = &["blob_sidecar_fetcher", "sidecar_client"];

/// Initialize logging to stderr. `RUST_LOG`, when set, wins over `log_level`.
pub fn init(log_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(enable_ansi())
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

/// Only color output when stderr is a terminal.
fn enable_ansi() -> bool {
    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

/// Directive setting `log_level` on our crates, leaving others at `warn`.
pub fn default_directive(log_level: &str) -> Result<String> {
    let level: LevelFilter = log_level
        .parse()
        .with_context(|| format!("invalid log level `{log_level}`"))?;

    let level = level.to_string().to_lowercase();
    let mut directives = vec!["warn".to_owned()];
    directives.extend(TARGET_CRATES.iter().map(|c| format!("{c}={level}")));
    Ok(directives.join(","))
}

fn build_filter(log_level: &str) -> Result<EnvFilter> {
    let directive = default_directive(log_level)?;
    EnvFilter::builder()
        .parse(&directive)
        .with_context(|| format!("invalid log filter `{directive}`"))
}
