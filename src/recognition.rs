/*
 * @file recognition.rs
 * @brief Speech recognition capability and listen control
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

//! Speech recognition capability and the listen control that drives it.

use thiserror::Error;
use tracing::{debug, warn};

/// Status shown while idle.
pub const IDLE_STATUS: &str = "Click to Speak...";

/// Status shown while a session is open.
pub const LISTENING_STATUS: &str = "Listening...";

/// Status shown when no recognizer exists.
pub const UNSUPPORTED_STATUS: &str = "Speech recognition not supported";

/// Errors raised by a recognizer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecognitionError {
    #[error("recognition session already active")]
    AlreadyStarted,
}

/// Single-shot speech recognition capability.
///
/// # Details
/// A session delivers at most one transcript, then ends. Starting while a
/// session is open is an error the caller recovers from.
pub trait Recognizer: Send {
    /// Opens a listening session.
    ///
    /// # Errors
    /// Returns [`RecognitionError::AlreadyStarted`] if a session is open.
    fn start(&mut self) -> Result<(), RecognitionError>;

    /// Closes the open session, if any.
    fn stop(&mut self);

    fn is_active(&self) -> bool;
}

/// Events a recognizer reports back to the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// The transcript of the session.
    Result(String),
    /// The session ended, with or without a result.
    End,
}

/// Recognizer fed by typed console lines.
///
/// The terminal front end treats the next line entered while a session is
/// open as the transcript.
#[derive(Debug, Default)]
pub struct ConsoleRecognizer {
    active: bool,
}

impl ConsoleRecognizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Recognizer for ConsoleRecognizer {
    fn start(&mut self) -> Result<(), RecognitionError> {
        if self.active {
            return Err(RecognitionError::AlreadyStarted);
        }
        self.active = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// The "start listening" control with its indicator and status text.
pub struct ListenControl {
    recognizer: Option<Box<dyn Recognizer>>,
    listening: bool,
    status: &'static str,
}

impl ListenControl {
    /// Creates the control; without a recognizer it is disabled for good.
    pub fn new(recognizer: Option<Box<dyn Recognizer>>) -> Self {
        let status = if recognizer.is_some() {
            IDLE_STATUS
        } else {
            warn!("speech recognition unavailable, listen control disabled");
            UNSUPPORTED_STATUS
        };
        Self {
            recognizer,
            listening: false,
            status,
        }
    }

    /// Whether the control can be clicked.
    pub fn is_enabled(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Whether the listening indicator is lit.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn status(&self) -> &'static str {
        self.status
    }

    /// Handles a click on the control.
    ///
    /// # Details
    /// Opens a session and lights the indicator. If a session is already open
    /// it is stopped instead and the indicator cleared; no error reaches the
    /// user. Does nothing when the control is disabled.
    pub fn click(&mut self) {
        let Some(recognizer) = self.recognizer.as_mut() else {
            return;
        };
        match recognizer.start() {
            Ok(()) => {
                self.listening = true;
                self.status = LISTENING_STATUS;
            }
            Err(err) => {
                debug!("{}; stopping current session", err);
                recognizer.stop();
                self.finish();
            }
        }
    }

    /// Applies a recognizer event.
    ///
    /// # Returns
    /// * `Some(transcript)` - A non-empty transcript to hand to the responder.
    /// * `None` - Nothing to respond to.
    pub fn handle(&mut self, event: RecognitionEvent) -> Option<String> {
        match event {
            RecognitionEvent::Result(transcript) => {
                let transcript = transcript.trim();
                if !self.listening || transcript.is_empty() {
                    return None;
                }
                Some(transcript.to_string())
            }
            RecognitionEvent::End => {
                if let Some(recognizer) = self.recognizer.as_mut() {
                    recognizer.stop();
                }
                self.finish();
                None
            }
        }
    }

    fn finish(&mut self) {
        self.listening = false;
        self.status = IDLE_STATUS;
    }
}
