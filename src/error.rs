//! Error type for plaindocs
//!
//! Only the edges of the crate fail: reading and writing the settings file,
//! persisting a preference, and writing to a clipboard. Controllers catch
//! these at the call site, log them, and keep the rest of the page running.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Boxed cause carried by the file variants.
type Cause = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Bare I/O failure with no path attached
    Io(io::Error),

    /// The settings or preference file exists but could not be read
    ConfigLoad { path: PathBuf, source: Cause },

    /// The settings or preference file could not be written
    ConfigSave { path: PathBuf, source: Cause },

    /// A file was read but its JSON did not match the expected shape
    ConfigParse {
        message: String,
        source: Option<Cause>,
    },

    /// The platform has no per-user config directory
    ConfigDirNotFound,

    /// A preference was rejected before or while being stored
    Preference { key: String, message: String },

    /// Clipboard unavailable or write refused
    Clipboard(String),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o: {}", err),
            Error::ConfigLoad { path, source } => {
                write!(f, "cannot read '{}': {}", path.display(), source)
            }
            Error::ConfigSave { path, source } => {
                write!(f, "cannot write '{}': {}", path.display(), source)
            }
            Error::ConfigParse { message, .. } => write!(f, "malformed settings: {}", message),
            Error::ConfigDirNotFound => f.write_str("no config directory on this platform"),
            Error::Preference { key, message } => {
                write!(f, "preference '{}' not stored: {}", key, message)
            }
            Error::Clipboard(message) => write!(f, "clipboard: {}", message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::ConfigLoad { source, .. } | Error::ConfigSave { source, .. } => {
                Some(source.as_ref())
            }
            Error::ConfigParse {
                source: Some(source),
                ..
            } => Some(source.as_ref()),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fallbacks
// ─────────────────────────────────────────────────────────────────────────────

/// Turn a failure into a logged warning plus a fallback value.
pub trait ResultExt<T> {
    /// The `Ok` value, or `default` after a warning prefixed with `context`.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        self.unwrap_or_else(|err| {
            warn!("{}: {}; falling back to defaults", context, err);
            default
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: Error = io::Error::new(io::ErrorKind::PermissionDenied, "locked").into();
        match err {
            Error::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::PermissionDenied),
            other => panic!("expected Io, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_settings_json_becomes_parse_error() {
        let parsed = serde_json::from_str::<serde_json::Value>("{\"breakpoint\": ");
        let err = Error::from(parsed.unwrap_err());
        assert!(matches!(err, Error::ConfigParse { source: Some(_), .. }));
        assert!(err.to_string().starts_with("malformed settings:"));
    }

    #[test]
    fn test_load_error_names_the_file() {
        let err = Error::ConfigLoad {
            path: PathBuf::from("/tmp/plaindocs/config.json"),
            source: Box::new(io::Error::new(io::ErrorKind::NotFound, "gone")),
        };
        assert_eq!(err.to_string(), "cannot read '/tmp/plaindocs/config.json': gone");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_preference_and_clipboard_messages() {
        let pref = Error::Preference {
            key: "plain-theme".to_string(),
            message: "quota exceeded".to_string(),
        };
        assert_eq!(pref.to_string(), "preference 'plain-theme' not stored: quota exceeded");
        assert!(pref.source().is_none());

        let clip = Error::Clipboard("no display".to_string());
        assert_eq!(clip.to_string(), "clipboard: no display");
        assert!(clip.source().is_none());
    }

    #[test]
    fn test_missing_config_dir_has_no_cause() {
        assert!(Error::ConfigDirNotFound.source().is_none());
        assert!(Error::ConfigParse {
            message: "x".to_string(),
            source: None
        }
        .source()
        .is_none());
    }

    #[test]
    fn test_fallback_only_on_error() {
        let ok: Result<u32> = Ok(980);
        assert_eq!(ok.unwrap_or_warn_default(1, "breakpoint"), 980);

        let failed: Result<u32> = Err(Error::ConfigDirNotFound);
        assert_eq!(failed.unwrap_or_warn_default(1, "breakpoint"), 1);
    }
}
