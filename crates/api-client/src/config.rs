use shared_types::AppConfig;
use std::path::Path;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the working directory.
const CONFIG_PATH: &str = "config.toml";

/// Read `config.toml` plus environment overrides once and keep the result
/// for the process lifetime. Only the first call has effect.
///
/// If the file is missing or unparseable, defaults are used.
pub fn load_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        let _ = dotenvy::dotenv();
        let mut config = read_config_file(Path::new(CONFIG_PATH));
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        config
    })
}

/// Parse a config file, falling back to defaults on any problem.
///
/// Runs before logging is initialized, so problems go to stderr.
pub fn read_config_file(path: &Path) -> AppConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents).unwrap_or_else(|e| {
            eprintln!("[config] Failed to parse {}: {e}; using defaults", path.display());
            AppConfig::default()
        }),
        Err(e) => {
            eprintln!("[config] {} not found ({e}); using defaults", path.display());
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Apply `FIELDOPS_*` overrides. `var` is injected so tests don't touch the
/// process environment.
pub fn apply_env_overrides(config: &mut AppConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(url) = var("FIELDOPS_API_BASE_URL").filter(|v| !v.trim().is_empty()) {
        config.api.base_url = url;
    }
    if let Some(raw) = var("FIELDOPS_API_TIMEOUT_SECS") {
        match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => config.api.timeout_secs = secs,
            _ => eprintln!("[config] Ignoring invalid FIELDOPS_API_TIMEOUT_SECS={raw:?}"),
        }
    }
    if let Some(level) = var("FIELDOPS_LOG_LEVEL").filter(|v| !v.trim().is_empty()) {
        config.logging.level = level;
    }
}
