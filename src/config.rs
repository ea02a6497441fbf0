use crate::client::DEFAULT_ENDPOINT;
use crate::error::{PreopError, Result, ResultExt as _};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "preop";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    /// URL the assessment is POSTed to
    pub endpoint: String,
    /// Request timeout; `None` leaves it to the network stack
    pub request_timeout_secs: Option<u64>,
    /// Where summaries are written; `None` means the user's download directory
    pub export_dir: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            request_timeout_secs: None,
            export_dir: None,
        }
    }
}

impl AppSettings {
    /// Directory summaries are exported to.
    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Gets the config file path based on platform conventions
///
/// - Windows: `%APPDATA%/preop/config.json`
/// - macOS: `~/Library/Application Support/preop/config.json`
/// - Linux: `~/.config/preop/config.json`
pub fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

pub fn load_app_settings() -> AppSettings {
    load_app_settings_from(&get_config_path())
}

/// Reads settings from `path`, falling back to defaults if the file is
/// missing or unreadable.
pub fn load_app_settings_from(path: &Path) -> AppSettings {
    if path.exists()
        && let Ok(content) = std::fs::read_to_string(path)
    {
        match serde_json::from_str::<AppSettings>(&content) {
            Ok(settings) => return settings,
            Err(e) => tracing::warn!("Ignoring unreadable config {}: {e}", path.display()),
        }
    }

    AppSettings::default()
}

/// # Errors
///
/// Returns an error if the config directory or file cannot be written.
pub fn save_app_settings(settings: &AppSettings) -> Result<()> {
    save_app_settings_to(settings, &get_config_path())
}

/// # Errors
///
/// Returns an error if `path`'s parent cannot be created or the file cannot
/// be written.
pub fn save_app_settings_to(settings: &AppSettings, path: &Path) -> Result<()> {
    if settings.endpoint.trim().is_empty() {
        return Err(PreopError::Config("endpoint must not be empty".to_owned()));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Saved settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_point_at_local_service() {
        let settings = AppSettings::default();
        assert_eq!(settings.endpoint, "http://localhost:5000/evaluate");
        assert_eq!(settings.request_timeout_secs, None);
        assert_eq!(settings.export_dir, None);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_app_settings_from(&dir.path().join("nope.json"));
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let settings = AppSettings {
            endpoint: "http://10.0.0.5:5000/evaluate".to_owned(),
            request_timeout_secs: Some(30),
            export_dir: Some(dir.path().to_path_buf()),
        };

        save_app_settings_to(&settings, &path).unwrap();
        assert_eq!(load_app_settings_from(&path), settings);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"request_timeout_secs": 5}"#).unwrap();

        let settings = load_app_settings_from(&path);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.request_timeout_secs, Some(5));
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_app_settings_from(&path), AppSettings::default());
    }

    #[test]
    fn test_empty_endpoint_is_rejected() {
        let dir = tempdir().unwrap();
        let settings = AppSettings {
            endpoint: "  ".to_owned(),
            ..AppSettings::default()
        };
        let err = save_app_settings_to(&settings, &dir.path().join(CONFIG_FILE)).unwrap_err();
        assert!(matches!(err, PreopError::Config(_)));
    }

    #[test]
    fn test_explicit_export_dir_wins() {
        let settings = AppSettings {
            export_dir: Some(PathBuf::from("/tmp/summaries")),
            ..AppSettings::default()
        };
        assert_eq!(settings.resolved_export_dir(), PathBuf::from("/tmp/summaries"));
    }
}
