// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::PathBuf;

const APP_DIR: &str = "eurolabel";

/// Return the application data directory. It is created on first write.
pub fn data_dir() -> PathBuf {
    resolve(
        std::env::var("XDG_DATA_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn resolve(xdg_data_home: Option<String>, home: Option<String>) -> PathBuf {
    // Try XDG data dir, then fallback to home
    let base = match (xdg_data_home, home) {
        (Some(xdg), _) if !xdg.is_empty() => PathBuf::from(xdg),
        (_, Some(home)) if !home.is_empty() => PathBuf::from(home).join(".local").join("share"),
        // Last resort
        _ => std::env::temp_dir(),
    };
    base.join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_xdg_data_home() {
        let dir = resolve(Some("/data".into()), Some("/home/ana".into()));
        assert_eq!(dir, PathBuf::from("/data/eurolabel"));
    }

    #[test]
    fn falls_back_to_home() {
        let dir = resolve(Some(String::new()), Some("/home/ana".into()));
        assert_eq!(dir, PathBuf::from("/home/ana/.local/share/eurolabel"));
    }

    #[test]
    fn last_resort_is_temp() {
        assert_eq!(resolve(None, None), std::env::temp_dir().join("eurolabel"));
    }
}
