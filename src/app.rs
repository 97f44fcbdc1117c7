/*
 * @file app.rs
 * @brief Portfolio page state and event routing
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

//! Page-level state: one object owning every interactive component.
//!
//! UI events arrive as [`UiEvent`] values and are routed to the navigator,
//! the assistant, the listen control or the theme store.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::assistant::VoiceAssistant;
use crate::config::AppConfig;
use crate::navigator::{Navigator, Trigger};
use crate::recognition::{ConsoleRecognizer, ListenControl, RecognitionEvent, Recognizer};
use crate::reveal::RevealObserver;
use crate::speech::{CommandSynthesizer, SpeechOutput};
use crate::theme::{Theme, ThemeStore};
use crate::typewriter::Typewriter;

/// Everything the page can react to.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    Navigate(Trigger),
    ToggleTheme,
    ListenClicked,
    Recognition(RecognitionEvent),
    Ask(String),
    Suggestion(usize),
    TogglePanel,
    ClosePanel,
    Scrolled { section: usize, ratio: f32 },
}

/// What an event changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Navigated(usize),
    Ignored,
    ThemeChanged(Theme),
    Listening(bool),
    Reply(String),
    Panel(bool),
    Revealed(usize),
}

/// The portfolio page.
pub struct Portfolio {
    navigator: Navigator,
    assistant: VoiceAssistant,
    listen: ListenControl,
    theme_store: ThemeStore,
    theme: Theme,
    typewriter: Option<Typewriter>,
    observer: RevealObserver,
}

impl Portfolio {
    /// Builds the page from configuration and the available capabilities.
    ///
    /// # Errors
    /// Returns an error if the configured sections cannot form a navigator.
    pub fn new(
        config: &AppConfig,
        speech: Option<SpeechOutput>,
        recognizer: Option<Box<dyn Recognizer>>,
    ) -> Result<Self> {
        let navigator = Navigator::from_config(&config.sections, config.contact_index)
            .context("Invalid section configuration")?;
        let mut assistant = VoiceAssistant::from_config(config, speech);
        assistant.set_speech_enabled(config.speech_enabled);
        let theme_store = ThemeStore::new(Path::new(&config.theme_path));
        let theme = theme_store.load();
        info!(
            sections = navigator.section_count(),
            rules = assistant.rules().len(),
            theme = theme.as_str(),
            "portfolio ready"
        );
        Ok(Self {
            navigator,
            assistant,
            listen: ListenControl::new(recognizer),
            theme_store,
            theme,
            typewriter: Typewriter::new(config.typewriter_phrases.clone()),
            observer: RevealObserver::default(),
        })
    }

    /// Builds the page with the machine's speech program and a console recognizer.
    ///
    /// # Errors
    /// Same as [`Portfolio::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let speech = CommandSynthesizer::detect(&config.speech_program)
            .map(|synth| SpeechOutput::new(Box::new(synth), config.voice_lang.as_str()));
        let recognizer: Box<dyn Recognizer> = Box::new(ConsoleRecognizer::new());
        Self::new(config, speech, Some(recognizer))
    }

    /// Routes one UI event.
    ///
    /// # Details
    /// No event fails. A theme that cannot be saved still applies for the
    /// rest of the session.
    pub async fn dispatch(&mut self, event: UiEvent) -> Outcome {
        match event {
            UiEvent::Navigate(trigger) => {
                if self.navigator.handle(trigger) {
                    Outcome::Navigated(self.navigator.active_index())
                } else {
                    Outcome::Ignored
                }
            }
            UiEvent::ToggleTheme => {
                self.theme = self.theme.toggled();
                match self.theme_store.save(self.theme) {
                    Ok(()) => info!(theme = self.theme.as_str(), "theme switched"),
                    Err(err) => warn!("theme not persisted: {:#}", err),
                }
                Outcome::ThemeChanged(self.theme)
            }
            UiEvent::ListenClicked => {
                if !self.listen.is_enabled() {
                    return Outcome::Ignored;
                }
                self.listen.click();
                Outcome::Listening(self.listen.is_listening())
            }
            UiEvent::Recognition(event) => match self.listen.handle(event) {
                Some(transcript) => Outcome::Reply(self.assistant.respond(&transcript).await),
                None => Outcome::Listening(self.listen.is_listening()),
            },
            UiEvent::Ask(question) => Outcome::Reply(self.assistant.respond(&question).await),
            UiEvent::Suggestion(index) => match self.assistant.ask_suggestion(index).await {
                Some(reply) => Outcome::Reply(reply),
                None => Outcome::Ignored,
            },
            UiEvent::TogglePanel => Outcome::Panel(self.assistant.toggle_panel()),
            UiEvent::ClosePanel => {
                self.assistant.close_panel();
                Outcome::Panel(false)
            }
            UiEvent::Scrolled { section, ratio } => {
                Outcome::Revealed(self.navigator.observe_section(&self.observer, section, ratio))
            }
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn assistant(&self) -> &VoiceAssistant {
        &self.assistant
    }

    pub fn assistant_mut(&mut self) -> &mut VoiceAssistant {
        &mut self.assistant
    }

    pub fn listen(&self) -> &ListenControl {
        &self.listen
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn typewriter_mut(&mut self) -> Option<&mut Typewriter> {
        self.typewriter.as_mut()
    }
}
