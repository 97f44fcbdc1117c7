/*
 * @file config.rs
 * @brief Runtime configuration loading
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

//! Runtime configuration: `config.json` with baked defaults and `FOLIO_*`
//! environment overrides.

use std::{env, fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Path to the JSON configuration file that holds runtime defaults.
pub const CONFIG_PATH: &str = "config.json";

/// Delay before the assistant's reply is shown and spoken.
const DEFAULT_RESPONSE_DELAY_MS: u64 = 500;

/// One page section and its animation-eligible children.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SectionConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub elements: Vec<String>,
}

impl SectionConfig {
    fn new(id: &str, title: &str, elements: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            elements: elements.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Strongly typed representation of `config.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "fallback_responses_path")]
    pub responses_path: String,
    #[serde(default = "fallback_theme_path")]
    pub theme_path: String,
    #[serde(default = "fallback_response_delay_ms")]
    pub response_delay_ms: u64,
    #[serde(default = "fallback_speech_program")]
    pub speech_program: String,
    #[serde(default = "fallback_voice_lang")]
    pub voice_lang: String,
    #[serde(default = "fallback_speech_enabled")]
    pub speech_enabled: bool,
    #[serde(default)]
    pub max_log_entries: Option<usize>,
    #[serde(default = "fallback_sections")]
    pub sections: Vec<SectionConfig>,
    /// Section the primary call-to-action jumps to.
    #[serde(default = "fallback_contact_index")]
    pub contact_index: usize,
    #[serde(default = "fallback_typewriter_phrases")]
    pub typewriter_phrases: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            responses_path: fallback_responses_path(),
            theme_path: fallback_theme_path(),
            response_delay_ms: fallback_response_delay_ms(),
            speech_program: fallback_speech_program(),
            voice_lang: fallback_voice_lang(),
            speech_enabled: fallback_speech_enabled(),
            max_log_entries: None,
            sections: fallback_sections(),
            contact_index: fallback_contact_index(),
            typewriter_phrases: fallback_typewriter_phrases(),
        }
    }
}

impl AppConfig {
    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }

    /// Applies `FOLIO_*` environment overrides on top of the file values.
    ///
    /// # Details
    /// Unparseable numeric or boolean values are ignored with a warning.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = env::var("FOLIO_RESPONSES") {
            self.responses_path = path;
        }
        if let Ok(path) = env::var("FOLIO_THEME_FILE") {
            self.theme_path = path;
        }
        if let Ok(program) = env::var("FOLIO_SPEECH_PROGRAM") {
            self.speech_program = program;
        }
        if let Ok(lang) = env::var("FOLIO_VOICE_LANG") {
            self.voice_lang = lang;
        }
        if let Some(delay) = parsed_env("FOLIO_RESPONSE_DELAY_MS") {
            self.response_delay_ms = delay;
        }
        if let Some(enabled) = parsed_env("FOLIO_SPEECH") {
            self.speech_enabled = enabled;
        }
        self
    }
}

fn parsed_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

/// Loads configuration from `path`, falling back to baked defaults.
///
/// # Details
/// A missing file is normal and only noted; invalid JSON is logged as a
/// warning. Environment overrides are applied in both cases.
///
/// # Arguments
/// * `path` - Location of the configuration file.
///
/// # Returns
/// * `AppConfig` - The loaded or default configuration.
pub fn load_app_config(path: &Path) -> AppConfig {
    let config = match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %path.display(), "config parse error: {}", err);
                AppConfig::default()
            }
        },
        Err(err) => {
            info!(path = %path.display(), "no config loaded ({}), using defaults", err);
            AppConfig::default()
        }
    };
    config.with_env_overrides()
}

fn fallback_responses_path() -> String {
    crate::commands::RESPONSES_FILE.to_string()
}

fn fallback_theme_path() -> String {
    crate::theme::THEME_FILE.to_string()
}

fn fallback_response_delay_ms() -> u64 {
    DEFAULT_RESPONSE_DELAY_MS
}

fn fallback_speech_program() -> String {
    crate::speech::DEFAULT_SPEECH_PROGRAM.to_string()
}

fn fallback_voice_lang() -> String {
    crate::speech::DEFAULT_VOICE_LANG.to_string()
}

fn fallback_speech_enabled() -> bool {
    true
}

/// Home, About, Timeline, Projects, Contact.
fn fallback_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig::new("home", "Home", &["hero-content"]),
        SectionConfig::new("about", "About", &["bento-card:bio", "bento-card:skills"]),
        SectionConfig::new(
            "timeline",
            "Timeline",
            &["timeline-item:school", "timeline-item:university"],
        ),
        SectionConfig::new(
            "projects",
            "Projects",
            &["project-card:retailcast", "project-card:accommodation"],
        ),
        SectionConfig::new("contact", "Contact", &["bento-card:contact"]),
    ]
}

fn fallback_contact_index() -> usize {
    4
}

fn fallback_typewriter_phrases() -> Vec<String> {
    crate::typewriter::DEFAULT_PHRASES
        .iter()
        .map(|p| p.to_string())
        .collect()
}
