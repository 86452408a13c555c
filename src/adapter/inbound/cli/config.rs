//! Handler for the `config` command group, plus config loading for the
//! other commands.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Load `path`, or fall back to defaults when it does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read, parsed or
/// validated.
pub fn load(path: &Path) -> Result<Config> {
    if path.exists() {
        debug!(path = %path.display(), "Loading configuration");
        Config::load(path)
    } else {
        debug!(path = %path.display(), "No configuration file, using defaults");
        Config::from_env()
    }
}

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!("2. Run: leaderboard config validate -c {}", path.display()));
    output::note(&format!("3. Run: leaderboard serve -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = load(path)?;

    if output::is_json() {
        output::json_output(serde_json::to_value(&config)?);
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field(
        "Source",
        if path.exists() {
            path.display().to_string()
        } else {
            "(defaults)".to_string()
        },
    );
    output::lines(&config.to_toml()?);
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let config = Config::load(path)?;
    output::success("Config file is valid");

    if !config.alerts.enabled {
        output::warning("Alerts are disabled");
    }
    if config.dashboard.working_days_override.is_some_and(|days| days > 0) {
        output::warning("Working-day total is overridden; remaining days are approximated");
    }

    output::hint(&format!("leaderboard config show -c {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_is_a_valid_config() {
        let config = Config::parse_toml(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn init_creates_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        execute_init(&path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "existing").unwrap();

        assert!(execute_init(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");

        execute_init(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.alerts.cooldown_minutes, 15);
    }

    #[test]
    fn validate_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[alerts]\ncheck_interval_secs = 0\n").unwrap();
        assert!(execute_validate(&path).is_err());
    }
}
