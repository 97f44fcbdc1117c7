/*
 * @file conversation.rs
 * @brief Session conversation log
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

//! In-memory conversation log shown in the assistant panel.

use std::collections::VecDeque;

/// Speaker of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used when rendering the log.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "you",
            Role::Assistant => "assistant",
        }
    }
}

/// One line of the conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub role: Role,
    pub text: String,
}

impl Entry {
    /// Creates a new entry with the specified role and text.
    ///
    /// # Arguments
    /// * `role` - The speaker role.
    /// * `text` - The utterance content.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Append-only log of user and assistant messages.
///
/// # Details
/// Lives for the session only. Unbounded unless a cap is given, in which case
/// the oldest entries are evicted two at a time so the log keeps starting on a
/// user entry.
#[derive(Clone, Debug, Default)]
pub struct ConversationLog {
    entries: VecDeque<Entry>,
    max_entries: Option<usize>,
}

impl ConversationLog {
    /// Creates an unbounded log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log keeping at most `max_entries` entries.
    ///
    /// A cap below 2 is raised to 2 so one full exchange always fits.
    pub fn with_capacity_limit(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries: Some(max_entries.max(2)),
        }
    }

    /// Appends an entry, evicting the oldest exchange if over the cap.
    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        self.entries.push_back(Entry::new(role, text));
        if let Some(max) = self.max_entries {
            while self.entries.len() > max {
                self.entries.pop_front();
                if self.entries.front().map(|e| e.role) == Some(Role::Assistant) {
                    self.entries.pop_front();
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Most recent entry, if any.
    pub fn last(&self) -> Option<&Entry> {
        self.entries.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_log_keeps_everything() {
        let mut log = ConversationLog::new();
        for i in 0..100 {
            log.push(Role::User, format!("q{i}"));
            log.push(Role::Assistant, format!("a{i}"));
        }
        assert_eq!(log.len(), 200);
        assert_eq!(log.iter().next().map(|e| e.text.as_str()), Some("q0"));
    }

    #[test]
    fn capped_log_evicts_whole_exchanges() {
        let mut log = ConversationLog::with_capacity_limit(4);
        for i in 0..3 {
            log.push(Role::User, format!("q{i}"));
            log.push(Role::Assistant, format!("a{i}"));
        }
        let texts: Vec<_> = log.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["q1", "a1", "q2", "a2"]);
        assert_eq!(log.iter().next().map(|e| e.role), Some(Role::User));
    }

    #[test]
    fn tiny_cap_still_holds_one_exchange() {
        let mut log = ConversationLog::with_capacity_limit(0);
        log.push(Role::User, "q");
        log.push(Role::Assistant, "a");
        assert_eq!(log.len(), 2);
        assert_eq!(log.last(), Some(&Entry::new(Role::Assistant, "a")));
    }
}
