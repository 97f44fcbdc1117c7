/*
 * @file assistant.rs
 * @brief Implementation of the portfolio chat assistant
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

//! Voice assistant orchestration module.
//!
//! Ties the pure keyword lookup in [`crate::commands`] to its side effects:
//! the conversation log, the presentation delay and speech output.

use std::{path::Path, time::Duration};

use tracing::{debug, warn};

use crate::commands::{self, ResponseRules};
use crate::config::AppConfig;
use crate::conversation::{ConversationLog, Role};
use crate::speech::SpeechOutput;

/// Suggestion shortcuts offered under the chat box.
pub const SUGGESTIONS: [&str; 4] = [
    "Who are you?",
    "What are your skills?",
    "Tell me about your projects",
    "How can I contact you?",
];

/// The site's chat assistant.
///
/// # Details
/// Owns the response table, the session's conversation log and the optional
/// speech channel. Typed questions, suggestion shortcuts and recognized speech
/// all go through [`VoiceAssistant::respond`].
pub struct VoiceAssistant {
    rules: ResponseRules,
    log: ConversationLog,
    speech: Option<SpeechOutput>,
    response_delay: Duration,
    panel_open: bool,
}

impl VoiceAssistant {
    /// Creates an assistant.
    ///
    /// # Arguments
    /// * `rules` - Response table, first match wins.
    /// * `log` - Conversation log to append to.
    /// * `speech` - Speech channel, `None` when synthesis is unavailable.
    /// * `response_delay` - Pause before the reply is logged and spoken.
    pub fn new(
        rules: ResponseRules,
        log: ConversationLog,
        speech: Option<SpeechOutput>,
        response_delay: Duration,
    ) -> Self {
        Self {
            rules,
            log,
            speech,
            response_delay,
            panel_open: false,
        }
    }

    /// Creates an assistant from the runtime configuration.
    ///
    /// # Details
    /// Loads the response table from the configured path (built-in rules when
    /// missing) and applies the log retention cap, if any.
    pub fn from_config(config: &AppConfig, speech: Option<SpeechOutput>) -> Self {
        let rules = commands::load_rules(Path::new(&config.responses_path));
        let log = match config.max_log_entries {
            Some(max) => ConversationLog::with_capacity_limit(max),
            None => ConversationLog::new(),
        };
        Self::new(rules, log, speech, config.response_delay())
    }

    /// Answers one utterance.
    ///
    /// # Details
    /// Logs the user entry, waits the presentation delay, logs the reply and
    /// then speaks it. Speech problems are logged and never fail the call.
    ///
    /// Not cancel-safe: dropping the future during the delay leaves the user
    /// entry without its reply.
    ///
    /// # Arguments
    /// * `utterance` - Raw text from recognition or a direct question.
    ///
    /// # Returns
    /// * `String` - The reply text.
    pub async fn respond(&mut self, utterance: &str) -> String {
        self.log.push(Role::User, utterance);
        let response = self.rules.respond(utterance).to_string();
        debug!(utterance, response = %response, "matched response");
        tokio::time::sleep(self.response_delay).await;
        self.log.push(Role::Assistant, response.as_str());
        self.speak_response(&response);
        response
    }

    /// Asks the suggestion shortcut at `index`.
    ///
    /// # Returns
    /// * `Some(String)` - The reply.
    /// * `None` - No suggestion at that index.
    pub async fn ask_suggestion(&mut self, index: usize) -> Option<String> {
        let question = SUGGESTIONS.get(index)?;
        Some(self.respond(question).await)
    }

    /// Speaks the response, logging failures.
    fn speak_response(&mut self, response: &str) {
        let Some(speech) = self.speech.as_mut() else {
            return;
        };
        if let Err(err) = speech.speak(response) {
            warn!("TTS error: {}", err);
        }
    }

    /// Waits for the last reply to finish playing.
    pub async fn wait_for_speech(&mut self) {
        if let Some(speech) = self.speech.as_mut() {
            speech.finished().await;
        }
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn rules(&self) -> &ResponseRules {
        &self.rules
    }

    /// Whether replies are spoken.
    pub fn speech_enabled(&self) -> bool {
        self.speech.as_ref().is_some_and(SpeechOutput::is_enabled)
    }

    /// Turns speech output on or off; a no-op without a synthesizer.
    pub fn set_speech_enabled(&mut self, enabled: bool) {
        if let Some(speech) = self.speech.as_mut() {
            speech.set_enabled(enabled);
        }
    }

    /// Opens the panel if closed and closes it if open.
    ///
    /// # Returns
    /// * `bool` - Whether the panel is now open.
    pub fn toggle_panel(&mut self) -> bool {
        self.panel_open = !self.panel_open;
        self.panel_open
    }

    /// Closes the panel; a reply that is still being spoken keeps playing.
    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }
}
