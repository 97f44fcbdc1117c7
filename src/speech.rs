/*
 * @file speech.rs
 * @brief Text-to-speech output
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

//! Text-to-speech output.
//!
//! Synthesis is a capability behind [`SpeechSynthesizer`]; [`CommandSynthesizer`]
//! drives a `say`-compatible program as a child process. [`SpeechOutput`] adds
//! voice selection and the one-utterance-at-a-time rule on top.

use std::process::{Child, Command, Stdio};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

/// Default synthesizer program.
pub const DEFAULT_SPEECH_PROGRAM: &str = "say";

/// Language tag preferred when picking a voice.
pub const DEFAULT_VOICE_LANG: &str = "en-US";

/// Poll interval used while waiting for an utterance to end.
const SPEAKING_POLL: Duration = Duration::from_millis(50);

/// Errors raised by a synthesizer.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("cannot speak empty text")]
    EmptyText,
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// A voice offered by the synthesizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// Speech synthesis capability.
pub trait SpeechSynthesizer: Send {
    /// Voices currently available; may be empty until the backend has loaded them.
    fn voices(&mut self) -> Vec<Voice>;

    /// Starts speaking `text` without waiting for it to finish.
    ///
    /// # Errors
    /// Returns an error if the backend cannot start the utterance.
    fn speak(&mut self, text: &str, voice: Option<&Voice>) -> Result<(), SpeechError>;

    /// Stops the utterance in flight, if any.
    fn cancel(&mut self);

    /// Returns `true` while an utterance is playing.
    fn is_speaking(&mut self) -> bool;
}

/// Picks the first voice whose language tag contains `preferred`.
///
/// # Details
/// `en_US` and `en-US` are treated alike and the comparison ignores case.
/// Falls back to the first voice when none matches.
///
/// # Arguments
/// * `voices` - Voices reported by the synthesizer.
/// * `preferred` - Preferred language tag, e.g. `en-US`.
///
/// # Returns
/// * `Some(&Voice)` - The chosen voice.
/// * `None` - The voice list is empty.
pub fn select_voice<'a>(voices: &'a [Voice], preferred: &str) -> Option<&'a Voice> {
    let wanted = normalize_tag(preferred);
    voices
        .iter()
        .find(|voice| normalize_tag(&voice.lang).contains(&wanted))
        .or_else(|| voices.first())
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('_', "-").to_lowercase()
}

/// Speech output channel used by the assistant.
///
/// # Details
/// At most one utterance plays at a time: a new request cancels whatever is
/// still speaking. There is no queue.
pub struct SpeechOutput {
    synth: Box<dyn SpeechSynthesizer>,
    preferred_lang: String,
    enabled: bool,
}

impl SpeechOutput {
    /// Wraps a synthesizer, enabled by default.
    pub fn new(synth: Box<dyn SpeechSynthesizer>, preferred_lang: impl Into<String>) -> Self {
        Self {
            synth,
            preferred_lang: preferred_lang.into(),
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.synth.cancel();
        }
    }

    /// Speaks `text`, cancelling any utterance still in flight.
    ///
    /// # Returns
    /// `Ok(())` when speech started or output is disabled.
    ///
    /// # Errors
    /// Returns an error for empty text or when the backend fails to start.
    pub fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        if !self.enabled {
            debug!("speech output disabled, skipping");
            return Ok(());
        }
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }
        if self.synth.is_speaking() {
            self.synth.cancel();
        }
        let voices = self.synth.voices();
        let voice = select_voice(&voices, &self.preferred_lang).cloned();
        self.synth.speak(text, voice.as_ref())
    }

    /// Stops any utterance in flight.
    pub fn cancel(&mut self) {
        self.synth.cancel();
    }

    /// Waits until the current utterance has finished playing.
    pub async fn finished(&mut self) {
        while self.synth.is_speaking() {
            tokio::time::sleep(SPEAKING_POLL).await;
        }
    }
}

/// Synthesizer backed by a `say`-compatible program.
///
/// # Details
/// Each utterance is a child process; cancelling kills it. Voices come from
/// `<program> -v ?` and are cached once a non-empty list has been read.
pub struct CommandSynthesizer {
    program: String,
    current: Option<Child>,
    voices: Vec<Voice>,
}

impl CommandSynthesizer {
    /// Creates a synthesizer without probing the program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            current: None,
            voices: Vec::new(),
        }
    }

    /// Creates a synthesizer if `program` can be run on this machine.
    ///
    /// # Returns
    /// * `Some(Self)` - The program answered the voice listing.
    /// * `None` - The capability is unavailable.
    pub fn detect(program: &str) -> Option<Self> {
        let mut synth = Self::new(program);
        match list_voices(program) {
            Ok(voices) => {
                synth.voices = voices;
                Some(synth)
            }
            Err(err) => {
                warn!(program, "speech synthesis unavailable: {}", err);
                None
            }
        }
    }
}

impl SpeechSynthesizer for CommandSynthesizer {
    fn voices(&mut self) -> Vec<Voice> {
        if self.voices.is_empty() {
            match list_voices(&self.program) {
                Ok(voices) => self.voices = voices,
                Err(err) => debug!("voice listing failed: {}", err),
            }
        }
        self.voices.clone()
    }

    fn speak(&mut self, text: &str, voice: Option<&Voice>) -> Result<(), SpeechError> {
        let mut command = Command::new(&self.program);
        if let Some(voice) = voice {
            command.arg("-v").arg(&voice.name);
        }
        let child = command
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        self.current = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn is_speaking(&mut self) -> bool {
        match self.current.as_mut().map(|child| child.try_wait()) {
            Some(Ok(None)) => true,
            Some(_) => {
                self.current = None;
                false
            }
            None => false,
        }
    }
}

impl Drop for CommandSynthesizer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Runs `<program> -v ?` and parses its voice listing.
fn list_voices(program: &str) -> std::io::Result<Vec<Voice>> {
    let output = Command::new(program)
        .args(["-v", "?"])
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()?;
    Ok(parse_voice_listing(&String::from_utf8_lossy(&output.stdout)))
}

/// Parses lines like `Alex    en_US    # Most people recognize me by my voice.`
///
/// Voice names may contain spaces; the language tag is the last column before
/// the `#` comment.
fn parse_voice_listing(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .filter_map(|line| {
            let columns = line.split('#').next()?.trim();
            let (name, lang) = columns.rsplit_once(char::is_whitespace)?;
            let name = name.trim();
            if name.is_empty() || !(lang.contains('_') || lang.contains('-')) {
                return None;
            }
            Some(Voice::new(name, lang))
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every call so tests can assert on ordering.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingSynthesizer {
        pub(crate) events: Arc<Mutex<Vec<String>>>,
        pub(crate) voices: Vec<Voice>,
        pub(crate) speaking: Arc<Mutex<bool>>,
    }

    impl RecordingSynthesizer {
        pub(crate) fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl SpeechSynthesizer for RecordingSynthesizer {
        fn voices(&mut self) -> Vec<Voice> {
            self.voices.clone()
        }

        fn speak(&mut self, text: &str, voice: Option<&Voice>) -> Result<(), SpeechError> {
            let name = voice.map(|v| v.name.as_str()).unwrap_or("-");
            self.events
                .lock()
                .unwrap()
                .push(format!("speak[{}]:{}", name, text));
            *self.speaking.lock().unwrap() = true;
            Ok(())
        }

        fn cancel(&mut self) {
            self.events.lock().unwrap().push("cancel".to_string());
            *self.speaking.lock().unwrap() = false;
        }

        fn is_speaking(&mut self) -> bool {
            *self.speaking.lock().unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSynthesizer;
    use super::*;

    fn voices() -> Vec<Voice> {
        vec![
            Voice::new("Thomas", "fr_FR"),
            Voice::new("Bad News", "en_US"),
            Voice::new("Daniel", "en_GB"),
        ]
    }

    #[test]
    fn select_voice_prefers_language_match() {
        let voices = voices();
        assert_eq!(select_voice(&voices, "en-US").map(|v| v.name.as_str()), Some("Bad News"));
        assert_eq!(select_voice(&voices, "en_gb").map(|v| v.name.as_str()), Some("Daniel"));
    }

    #[test]
    fn select_voice_falls_back_to_first() {
        let voices = voices();
        assert_eq!(select_voice(&voices, "ja-JP").map(|v| v.name.as_str()), Some("Thomas"));
        assert!(select_voice(&[], "en-US").is_none());
    }

    #[test]
    fn parse_listing_handles_multi_word_names() {
        let listing = "Alex                en_US    # Most people recognize me by my voice.\n\
                       Bad News            en_US    # The light you see at the end of the tunnel\n\
                       garbage line\n";
        let parsed = parse_voice_listing(listing);
        assert_eq!(
            parsed,
            vec![Voice::new("Alex", "en_US"), Voice::new("Bad News", "en_US")]
        );
    }

    #[test]
    fn speak_cancels_in_flight_utterance() {
        let synth = RecordingSynthesizer {
            voices: voices(),
            ..Default::default()
        };
        let mut output = SpeechOutput::new(Box::new(synth.clone()), DEFAULT_VOICE_LANG);
        output.speak("first").expect("speak");
        output.speak("second").expect("speak");
        assert_eq!(
            synth.events(),
            vec![
                "speak[Bad News]:first".to_string(),
                "cancel".to_string(),
                "speak[Bad News]:second".to_string(),
            ]
        );
    }

    #[test]
    fn speak_rejects_empty_text() {
        let mut output = SpeechOutput::new(Box::new(RecordingSynthesizer::default()), "en-US");
        assert!(matches!(output.speak("   "), Err(SpeechError::EmptyText)));
    }

    #[test]
    fn disabled_output_is_silent() {
        let synth = RecordingSynthesizer::default();
        let mut output = SpeechOutput::new(Box::new(synth.clone()), "en-US");
        output.set_enabled(false);
        output.speak("hello").expect("disabled speak is ok");
        assert_eq!(synth.events(), vec!["cancel".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn finished_returns_once_speech_stops() {
        let synth = RecordingSynthesizer::default();
        let mut output = SpeechOutput::new(Box::new(synth.clone()), "en-US");
        output.finished().await;
        output.speak("hello").expect("speak");
        let speaking = synth.speaking.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(120)).await;
            *speaking.lock().unwrap() = false;
        });
        output.finished().await;
        assert!(!*synth.speaking.lock().unwrap());
    }

    #[test]
    fn missing_program_is_not_detected() {
        assert!(CommandSynthesizer::detect("folio-no-such-speech-program").is_none());
    }
}
