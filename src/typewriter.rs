/*
 * @file typewriter.rs
 * @brief Typewriter headline effect
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

//! Typewriter effect for the hero headline.

use std::time::Duration;

/// Phrases cycled through by default.
pub const DEFAULT_PHRASES: [&str; 4] = [
    "Software Developer",
    "Innovator",
    "Problem Solving",
    "Tech Enthusiast",
];

/// Pause between typed characters.
pub const TYPE_DELAY: Duration = Duration::from_millis(100);

/// Pause after a phrase is complete, before the next one starts.
pub const HOLD_DELAY: Duration = Duration::from_millis(2000);

/// One rendered step of the effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub delay: Duration,
}

/// Reveals each phrase one character at a time, cycling forever.
#[derive(Clone, Debug)]
pub struct Typewriter {
    phrases: Vec<String>,
    phrase: usize,
    typed: usize,
}

impl Typewriter {
    /// Creates the effect.
    ///
    /// # Returns
    /// * `None` - No phrases were given.
    pub fn new(phrases: Vec<String>) -> Option<Self> {
        if phrases.is_empty() {
            return None;
        }
        Some(Self {
            phrases,
            phrase: 0,
            typed: 0,
        })
    }

    /// Advances by one character.
    ///
    /// # Returns
    /// * `Frame` - Text to display and how long to wait before the next tick.
    pub fn tick(&mut self) -> Frame {
        let current = &self.phrases[self.phrase];
        let total = current.chars().count();
        self.typed = (self.typed + 1).min(total);
        let text: String = current.chars().take(self.typed).collect();
        if self.typed == total {
            self.phrase = (self.phrase + 1) % self.phrases.len();
            self.typed = 0;
            Frame {
                text,
                delay: HOLD_DELAY,
            }
        } else {
            Frame {
                text,
                delay: TYPE_DELAY,
            }
        }
    }

    /// Plays `frames` ticks, handing each text to `sink` and sleeping in between.
    pub async fn run<F: FnMut(&str)>(&mut self, frames: usize, mut sink: F) {
        for _ in 0..frames {
            let frame = self.tick();
            sink(&frame.text);
            tokio::time::sleep(frame.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn types_one_character_per_tick_then_holds() {
        let mut writer = Typewriter::new(phrases(&["Hey", "Yo"])).expect("phrases");
        let frames: Vec<_> = (0..6).map(|_| writer.tick()).collect();
        let texts: Vec<_> = frames.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["H", "He", "Hey", "Y", "Yo", "H"]);
        assert_eq!(frames[1].delay, TYPE_DELAY);
        assert_eq!(frames[2].delay, HOLD_DELAY);
        assert_eq!(frames[4].delay, HOLD_DELAY);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mut writer = Typewriter::new(phrases(&["né"])).expect("phrases");
        assert_eq!(writer.tick().text, "n");
        assert_eq!(writer.tick(), Frame { text: "né".into(), delay: HOLD_DELAY });
    }

    #[test]
    fn empty_phrase_list_is_rejected() {
        assert!(Typewriter::new(Vec::new()).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn run_waits_between_frames() {
        let mut writer = Typewriter::new(phrases(&["ab"])).expect("phrases");
        let start = tokio::time::Instant::now();
        let mut seen = Vec::new();
        writer.run(2, |text| seen.push(text.to_string())).await;
        assert_eq!(seen, vec!["a".to_string(), "ab".to_string()]);
        assert!(start.elapsed() >= TYPE_DELAY + HOLD_DELAY);
    }
}
