//! Configuration file persistence for plaindocs
//!
//! This module handles loading and saving the site settings file in the
//! platform-specific config directory, with graceful fallback to defaults.

use crate::config::SiteSettings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
pub(crate) const APP_NAME: &str = "plaindocs";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\plaindocs\`
/// - **macOS**: `~/Library/Application Support/plaindocs/`
/// - **Linux**: `~/.config/plaindocs/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined
/// (e.g., if the HOME environment variable is not set).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the configuration file.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Write `contents` to `path` via a sibling temporary file and a rename, so
/// readers never observe a half-written file.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let save_error = |path: &Path, e: std::io::Error| Error::ConfigSave {
        path: path.to_path_buf(),
        source: Box::new(e),
    };

    if let Some(dir) = path.parent() {
        if !dir.exists() {
            debug!("Creating config directory: {}", dir.display());
            fs::create_dir_all(dir).map_err(|e| save_error(dir, e))?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".bak");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents).map_err(|e| save_error(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| save_error(path, e))?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from the default config file location.
///
/// # Behavior
///
/// 1. If the config file exists and is valid JSON, load and sanitize it
/// 2. If the config file doesn't exist, return default settings
/// 3. If the config file is corrupted/invalid, log a warning and return defaults
pub fn load_config() -> SiteSettings {
    get_config_file_path()
        .and_then(|path| load_config_from(&path))
        .unwrap_or_warn_default(SiteSettings::default(), "Failed to load configuration")
}

/// Load settings from an explicit path.
///
/// A missing or empty file yields defaults; unreadable or invalid content is
/// an error.
pub fn load_config_from(config_path: &Path) -> Result<SiteSettings> {
    if !config_path.exists() {
        debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        return Ok(SiteSettings::default());
    }

    debug!("Loading config from: {}", config_path.display());

    let contents = fs::read_to_string(config_path).map_err(|e| Error::ConfigLoad {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        return Ok(SiteSettings::default());
    }

    let settings = SiteSettings::from_json_sanitized(&contents).map_err(|e| {
        warn!(
            "Config file at {} contains invalid JSON: {}",
            config_path.display(),
            e
        );
        Error::ConfigParse {
            message: format!("Failed to parse config file: {}", e),
            source: Some(Box::new(e)),
        }
    })?;

    info!(
        "Configuration loaded successfully from {}",
        config_path.display()
    );
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Save settings to the default config file location.
pub fn save_config(settings: &SiteSettings) -> Result<()> {
    save_config_to(settings, &get_config_file_path()?)
}

/// Save settings as pretty JSON to an explicit path.
pub fn save_config_to(settings: &SiteSettings, config_path: &Path) -> Result<()> {
    debug!("Saving config to: {}", config_path.display());

    let json = serde_json::to_string_pretty(settings).map_err(|e| Error::ConfigSave {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    write_atomic(config_path, &json)?;

    info!(
        "Configuration saved successfully to {}",
        config_path.display()
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
