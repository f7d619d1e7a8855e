//! Path utilities for the data directory and user-supplied file paths.
//!
//! The data directory holds the rotating log file. It follows the XDG base
//! directory convention: `$XDG_DATA_HOME/unimatch`, falling back to
//! `~/.local/share/unimatch`, and finally to a relative `.unimatch` directory
//! when no home directory is known.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "unimatch";

/// Returns the default data directory for this user.
///
/// # Examples
///
/// ```
/// use unimatch::infrastructure::default_data_dir;
///
/// assert!(default_data_dir().ends_with("unimatch"));
/// ```
#[must_use]
pub fn default_data_dir() -> PathBuf {
    data_dir_from(
        env::var("XDG_DATA_HOME").ok().as_deref(),
        env::var("HOME").ok().as_deref(),
    )
}

/// Resolves the data directory from explicit environment values.
#[must_use]
pub fn data_dir_from(xdg_data_home: Option<&str>, home: Option<&str>) -> PathBuf {
    match (xdg_data_home.filter(|p| !p.is_empty()), home.filter(|p| !p.is_empty())) {
        (Some(xdg), _) => PathBuf::from(xdg).join(APP_DIR),
        (None, Some(home)) => PathBuf::from(home).join(".local").join("share").join(APP_DIR),
        (None, None) => PathBuf::from(".unimatch"),
    }
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, or when `HOME` is unset, are returned as-is.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use unimatch::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, env::var("HOME").ok().as_deref())
}

/// Expands a leading `~` against an explicit home directory.
#[must_use]
pub fn expand_tilde_with(path: &str, home: Option<&str>) -> PathBuf {
    match home {
        Some(home) if path == "~" => PathBuf::from(home),
        Some(home) => path
            .strip_prefix("~/")
            .map_or_else(|| PathBuf::from(path), |rest| PathBuf::from(home).join(rest)),
        None => PathBuf::from(path),
    }
}
