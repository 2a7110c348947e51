//! Path helpers for user-supplied locations

use std::path::PathBuf;

/// Resolve a user-supplied path to an absolute one
///
/// `~` and `~/...` expand to the home directory; anything relative is
/// anchored at the current working directory. An empty string means the
/// working directory itself.
pub fn expand_path(raw: &str) -> PathBuf {
    let raw = raw.trim();

    let path = match raw {
        "" => PathBuf::new(),
        "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(raw)),
        _ => match (raw.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(raw),
        },
    };

    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}
