use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::error;

const DEFAULT_API_PREFIX: &str = "/api";
const DEFAULT_LATENCY_MS: u64 = 200;

// ─── TOML config file ─────────────────────────────────────────────────────────

/// `{data_dir}/config.toml` — all fields are optional overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// Path prefix the simulator claims (default: "/api").
    api_prefix: Option<String>,
    /// Artificial response latency in milliseconds (default: 200).
    latency_ms: Option<u64>,
    /// Log level filter string, e.g. "debug", "info,skillsim=trace" (default: "info").
    log: Option<String>,
    /// Log output format: "pretty" (default, human-readable) | "json".
    log_format: Option<String>,
    /// Base URL for passthrough of requests outside the prefix.
    /// None = non-API requests fail with a descriptive error.
    upstream: Option<String>,
}

fn load_toml(data_dir: &Path) -> Option<TomlConfig> {
    let path = data_dir.join("config.toml");
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config.toml — using defaults");
            None
        }
    }
}

// ─── SimConfig ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Directory holding the skill slot and config.toml.
    pub data_dir: PathBuf,
    /// Path prefix the simulator claims.
    pub api_prefix: String,
    /// Artificial response latency in milliseconds.
    pub latency_ms: u64,
    /// Log level filter string.
    pub log: String,
    /// Log output format: "pretty" | "json" (SKILLSIM_LOG_FORMAT env var).
    pub log_format: String,
    /// Passthrough base URL (SKILLSIM_UPSTREAM env var). None = non-API
    /// requests are rejected by the gateway.
    pub upstream: Option<String>,
}

impl SimConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file at `{data_dir}/config.toml`
    ///   3. Built-in defaults
    pub fn new(
        data_dir: Option<PathBuf>,
        api_prefix: Option<String>,
        latency_ms: Option<u64>,
        log: Option<String>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);

        // Load TOML as the lowest-priority override layer
        let toml = load_toml(&data_dir).unwrap_or_default();

        let api_prefix = api_prefix
            .or(toml.api_prefix)
            .unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());
        let latency_ms = latency_ms.or(toml.latency_ms).unwrap_or(DEFAULT_LATENCY_MS);
        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());

        let log_format = std::env::var("SKILLSIM_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        let upstream = std::env::var("SKILLSIM_UPSTREAM")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.upstream);

        Self {
            data_dir,
            api_prefix,
            latency_ms,
            log,
            log_format,
            upstream,
        }
    }

    /// Artificial latency as a `Duration`.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/skillsim
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("skillsim");
        }
    }
    #[cfg(target_os = "linux")]
    {
        // $XDG_DATA_HOME/skillsim or ~/.local/share/skillsim
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("skillsim");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("skillsim");
        }
    }
    #[cfg(target_os = "windows")]
    {
        // %APPDATA%\skillsim
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("skillsim");
        }
    }
    // Fallback
    PathBuf::from(".skillsim")
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_toml() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = SimConfig::new(Some(dir.path().to_path_buf()), None, None, None);
        assert_eq!(cfg.api_prefix, "/api");
        assert_eq!(cfg.latency_ms, 200);
        assert_eq!(cfg.log, "info");
        assert_eq!(cfg.latency(), Duration::from_millis(200));
    }

    #[test]
    fn toml_overrides_defaults_and_cli_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "api_prefix = \"/v2\"\nlatency_ms = 50\n",
        )
        .unwrap();

        let cfg = SimConfig::new(Some(dir.path().to_path_buf()), None, None, None);
        assert_eq!(cfg.api_prefix, "/v2");
        assert_eq!(cfg.latency_ms, 50);

        let cfg = SimConfig::new(
            Some(dir.path().to_path_buf()),
            Some("/api".to_string()),
            Some(0),
            None,
        );
        assert_eq!(cfg.api_prefix, "/api");
        assert_eq!(cfg.latency_ms, 0);
    }

    #[test]
    fn unparseable_toml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "latency_ms = \"soon\"").unwrap();
        let cfg = SimConfig::new(Some(dir.path().to_path_buf()), None, None, None);
        assert_eq!(cfg.latency_ms, 200);
    }
}
