/*
 * @file theme.rs
 * @brief Theme persistence
 * @author Kevin Thomas
 * @date 2025
 *
 * MIT License
 *
 * Copyright (c) 2025 Kevin Thomas
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Dark/light theme persisted in a small JSON store.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default location of the theme store.
pub const THEME_FILE: &str = "theme.json";

/// Site colour scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Icon of the toggle button; it shows the theme you would switch to.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "fa-sun",
            Theme::Light => "fa-moon",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[derive(Serialize, Deserialize)]
struct StoredTheme {
    theme: Theme,
}

/// File-backed store for the single `theme` key.
#[derive(Clone, Debug)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the saved theme.
    ///
    /// # Returns
    /// * `Theme` - The stored value, or [`Theme::Dark`] when nothing usable
    ///   is stored.
    pub fn load(&self) -> Theme {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Theme::default(),
        };
        match serde_json::from_str::<StoredTheme>(&raw) {
            Ok(stored) => stored.theme,
            Err(err) => {
                warn!(path = %self.path.display(), "ignoring unreadable theme store: {}", err);
                Theme::default()
            }
        }
    }

    /// Writes `theme` to the store, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, theme: Theme) -> Result<()> {
        let json = serde_json::to_string(&StoredTheme { theme })
            .context("Failed to serialize theme")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    /// Switches to the other theme and persists it.
    ///
    /// # Returns
    /// * `Ok(Theme)` - The new theme.
    ///
    /// # Errors
    /// Returns an error if the new theme cannot be saved.
    pub fn toggle(&self, current: Theme) -> Result<Theme> {
        let next = current.toggled();
        self.save(next)?;
        info!(theme = next.as_str(), "theme switched");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_store_defaults_to_dark() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = ThemeStore::new(dir.path().join(THEME_FILE));
        assert_eq!(store.load(), Theme::Dark);
        assert_eq!(store.load().icon(), "fa-sun");
    }

    #[test]
    fn toggle_persists_across_reload() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(THEME_FILE);
        let store = ThemeStore::new(&path);
        let theme = store.toggle(store.load()).expect("toggle");
        assert_eq!(theme, Theme::Light);
        assert_eq!(theme.icon(), "fa-moon");
        assert_eq!(fs::read_to_string(&path).expect("read"), r#"{"theme":"light"}"#);

        let reloaded = ThemeStore::new(&path);
        assert_eq!(reloaded.load(), Theme::Light);
        assert_eq!(reloaded.toggle(Theme::Light).expect("toggle"), Theme::Dark);
        assert_eq!(store.load(), Theme::Dark);
    }

    #[test]
    fn corrupt_store_defaults_to_dark() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(THEME_FILE);
        fs::write(&path, r#"{"theme":"sepia"}"#).expect("write");
        assert_eq!(ThemeStore::new(path).load(), Theme::Dark);
    }
}
