//! Durable key-value preferences.
//!
//! The theme is the only preference the site keeps. [`PreferenceStore`] is
//! the contract; [`CookieJar`] models the browser's `document.cookie`, and
//! [`FilePreferenceStore`] keeps entries in a JSON file for hosts without
//! cookies (pre-rendering, native shells).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::persistence::{get_config_dir, write_atomic};
use crate::error::{Error, Result};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Preferences file name
const PREFERENCES_FILE_NAME: &str = "preferences.json";

// ─────────────────────────────────────────────────────────────────────────────
// Preference Entry
// ─────────────────────────────────────────────────────────────────────────────

/// A value to persist, with the scope and lifetime a cookie would carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preference {
    pub name: String,
    pub value: String,
    /// Lifetime in days from the moment of writing
    pub max_age_days: u32,
    /// URL path scope
    pub path: String,
}

impl Preference {
    /// A site-wide (`path=/`) preference.
    pub fn new(name: &str, value: &str, max_age_days: u32) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            max_age_days,
            path: String::from("/"),
        }
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_secs(u64::from(self.max_age_days) * SECONDS_PER_DAY)
    }

    /// Reject names and values a cookie string cannot carry.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| Error::Preference {
            key: self.name.clone(),
            message: message.to_string(),
        };
        if self.name.is_empty() {
            return Err(invalid("empty name"));
        }
        if self
            .name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || ";=,".contains(c))
        {
            return Err(invalid("name contains a reserved character"));
        }
        if self
            .value
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || ";,".contains(c))
        {
            return Err(invalid("value contains a reserved character"));
        }
        Ok(())
    }

    /// The string a browser host assigns to `document.cookie`.
    pub fn to_cookie_string(&self) -> String {
        format!(
            "{}={}; Max-Age={}; Path={}",
            self.name,
            self.value,
            self.max_age().as_secs(),
            self.path
        )
    }
}

/// Read and write access to persisted preferences.
pub trait PreferenceStore {
    /// The current value stored under `name`.
    fn get(&self, name: &str) -> Option<String>;

    /// Persist `preference`, replacing any previous value.
    fn set(&mut self, preference: &Preference) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Cookie Jar
// ─────────────────────────────────────────────────────────────────────────────

/// In-memory cookie store speaking the `document.cookie` string format.
///
/// A browser binding seeds it with [`CookieJar::parse`] and forwards every
/// string from [`CookieJar::take_pending`] to `document.cookie`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    values: BTreeMap<String, String>,
    pending: Vec<String>,
}

impl CookieJar {
    /// Parse a `name=value; other=value` cookie header.
    ///
    /// Malformed pairs are skipped. When a name repeats, the first value
    /// wins, since browsers list the most specific path first.
    pub fn parse(header: &str) -> Self {
        let mut values = BTreeMap::new();
        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            values
                .entry(name.to_string())
                .or_insert_with(|| value.trim().to_string());
        }
        Self {
            values,
            pending: Vec::new(),
        }
    }

    /// Drain the cookie strings written since the last call.
    pub fn take_pending(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    /// Render the jar as a `document.cookie` read would return it.
    pub fn header(&self) -> String {
        self.values
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl PreferenceStore for CookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn set(&mut self, preference: &Preference) -> Result<()> {
        preference.validate()?;
        self.values
            .insert(preference.name.clone(), preference.value.clone());
        self.pending.push(preference.to_cookie_string());
        debug!("Cookie set: {}", preference.to_cookie_string());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File-backed Store
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredPreference {
    value: String,
    path: String,
    /// Seconds since the Unix epoch after which the entry is ignored
    expires_at: u64,
}

/// Preferences persisted as JSON on disk, with per-entry expiry.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
    entries: BTreeMap<String, StoredPreference>,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl FilePreferenceStore {
    /// Open (or start) the store at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| Error::ConfigLoad {
                path: path.clone(),
                source: Box::new(e),
            })?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            BTreeMap::new()
        };
        debug!(
            "Opened preference store at {} ({} entries)",
            path.display(),
            entries.len()
        );
        Ok(Self { path, entries })
    }

    /// Open the store in the platform config directory.
    pub fn open_default() -> Result<Self> {
        Self::open(get_config_dir()?.join(PREFERENCES_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        write_atomic(&self.path, &json)?;
        info!("Preferences saved to {}", self.path.display());
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, name: &str) -> Option<String> {
        self.entries
            .get(name)
            .filter(|entry| entry.expires_at > unix_now())
            .map(|entry| entry.value.clone())
    }

    fn set(&mut self, preference: &Preference) -> Result<()> {
        preference.validate()?;
        let entry = StoredPreference {
            value: preference.value.clone(),
            path: preference.path.clone(),
            expires_at: unix_now().saturating_add(preference.max_age().as_secs()),
        };
        self.entries.insert(preference.name.clone(), entry);
        self.save()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
