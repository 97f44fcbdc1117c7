/*
 * @file commands.rs
 * @brief Response table configuration and matching logic
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

//! Keyword response table and first-match lookup for the site assistant.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::{debug, warn};

/// Default location of the response table, relative to the working directory.
pub const RESPONSES_FILE: &str = "responses.json";

/// Reply used when no rule matches the utterance.
const DEFAULT_FALLBACK: &str =
    "I didn't quite get that. You can ask about my skills, projects, or contact info.";

/// A single keyword rule of the response table.
///
/// # Details
/// The rule fires when any of its keywords appears as a substring of the
/// lowercased utterance.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ResponseRule {
    /// Lowercase keywords that trigger this rule.
    pub keywords: Vec<String>,
    /// Canned reply returned when the rule fires.
    pub response: String,
}

impl ResponseRule {
    /// Builds a rule from keyword literals and a reply.
    ///
    /// # Arguments
    /// * `keywords` - Trigger keywords; lowercased on construction.
    /// * `response` - Reply text.
    ///
    /// # Returns
    /// * `Self` - The new rule.
    pub fn new(keywords: &[&str], response: impl Into<String>) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            response: response.into(),
        }
    }

    /// Returns `true` when any keyword is contained in `normalized`.
    ///
    /// # Arguments
    /// * `normalized` - The utterance, already lowercased.
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized.contains(keyword.as_str()))
    }
}

/// Ordered response table plus its fallback reply.
///
/// # Details
/// Declaration order is the tie-break: the first matching rule wins even when
/// a later rule matches more keywords. Rules are kept in a `Vec` for that
/// reason.
#[derive(Clone, Debug, Deserialize)]
pub struct ResponseRules {
    /// Reply returned when nothing matches.
    #[serde(default = "default_fallback")]
    pub fallback: String,
    /// Rules in evaluation order.
    pub rules: Vec<ResponseRule>,
}

impl ResponseRules {
    /// Creates a table from rules in evaluation order.
    ///
    /// # Arguments
    /// * `rules` - Rules, first match wins.
    /// * `fallback` - Reply used when no rule matches.
    ///
    /// # Returns
    /// * `Self` - The table with keywords normalized.
    pub fn new(rules: Vec<ResponseRule>, fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            rules,
        }
        .normalized()
    }

    /// Finds the first rule matching an already lowercased utterance.
    ///
    /// # Arguments
    /// * `normalized` - The user's utterance in lowercase.
    ///
    /// # Returns
    /// * `Some(&ResponseRule)` - The first matching rule.
    /// * `None` - No rule matched.
    pub fn find_rule(&self, normalized: &str) -> Option<&ResponseRule> {
        self.rules.iter().find(|rule| rule.matches(normalized))
    }

    /// Maps an utterance to its reply.
    ///
    /// # Details
    /// Pure text-in, text-out lookup: lowercases the utterance, evaluates the
    /// rules in order and falls back to the fixed reply.
    ///
    /// # Arguments
    /// * `utterance` - Raw user text in any case.
    ///
    /// # Returns
    /// * `&str` - The reply text.
    pub fn respond(&self, utterance: &str) -> &str {
        let normalized = utterance.to_lowercase();
        match self.find_rule(&normalized) {
            Some(rule) => rule.response.as_str(),
            None => {
                debug!(utterance = %normalized, "no response rule matched");
                self.fallback.as_str()
            }
        }
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when the table holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Lowercases every keyword and drops empty ones.
    ///
    /// An empty keyword is a substring of every utterance and would shadow
    /// all later rules.
    fn normalized(mut self) -> Self {
        for rule in &mut self.rules {
            rule.keywords = rule
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| {
                    if k.is_empty() {
                        warn!(response = %rule.response, "dropping empty keyword");
                    }
                    !k.is_empty()
                })
                .collect();
        }
        self
    }
}

impl Default for ResponseRules {
    fn default() -> Self {
        default_rules()
    }
}

/// Loads the response table from `path`.
///
/// # Details
/// Returns the built-in table if the file doesn't exist or cannot be parsed,
/// logging the reason.
///
/// # Arguments
/// * `path` - Location of the JSON response table.
///
/// # Returns
/// * `ResponseRules` - Loaded or default table.
pub fn load_rules(path: &Path) -> ResponseRules {
    load_rules_from_file(path).unwrap_or_else(|err| {
        warn!(
            path = %path.display(),
            "failed to load response table: {:#}; using built-in responses", err
        );
        default_rules()
    })
}

/// Reads and parses the response table file.
///
/// # Errors
/// Returns an error if the file cannot be read or contains invalid JSON.
fn load_rules_from_file(path: &Path) -> Result<ResponseRules> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let rules: ResponseRules = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(rules.normalized())
}

fn default_fallback() -> String {
    DEFAULT_FALLBACK.to_string()
}

/// Built-in response table for the portfolio owner.
///
/// # Returns
/// * `ResponseRules` - Greeting, identity, skills, projects, contact and
///   experience rules, in that order.
pub fn default_rules() -> ResponseRules {
    ResponseRules::new(
        vec![
            ResponseRule::new(&["hi", "hello"], "Hello! How can I help you today?"),
            ResponseRule::new(
                &["who are you", "name"],
                "I am Manaka Gift Phuti, a passionate Software Developer and IT graduate.",
            ),
            ResponseRule::new(
                &["skills", "stack", "technology"],
                "I am skilled in Java, PhP, Web Development, Framework- Spring Boot, and Database Management.",
            ),
            ResponseRule::new(
                &["project"],
                "I have built projects like RetailCast AI, Student Accommodation System, and this interactive portfolio. Check the Projects section for more.",
            ),
            ResponseRule::new(
                &["contact", "email", "hire"],
                "You can go to contact page and send me a message there or contact me via WhatsApp @ 0812741278 or connect with me on LinkedIn.",
            ),
            ResponseRule::new(
                &["experience", "education", "journey"],
                "My journey began at Makgetha Secondary School. I have now finished my IT Qualification at Vaal University of Technology and have participated in multiple hackathons.",
            ),
        ],
        DEFAULT_FALLBACK,
    )
}

/// Lists the topics the assistant understands.
///
/// # Arguments
/// * `rules` - The response table.
///
/// # Returns
/// * `String` - One line per rule with its keywords.
pub fn describe_rules(rules: &ResponseRules) -> String {
    let mut result = String::from("I can answer questions about:\n");
    for rule in &rules.rules {
        result.push_str(&format!("- {}\n", rule.keywords.join(", ")));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn greeting_wins_over_later_rules() {
        let rules = default_rules();
        let greeting = "Hello! How can I help you today?";
        assert_eq!(rules.respond("hello, tell me your skills"), greeting);
        assert_eq!(rules.respond("Well HELLO there"), greeting);
    }

    #[test]
    fn first_declared_rule_wins() {
        let rules = ResponseRules::new(
            vec![
                ResponseRule::new(&["hi", "hello"], "Hello! ..."),
                ResponseRule::new(&["skills"], "Skills ..."),
            ],
            "fallback",
        );
        assert_eq!(rules.respond("hi there, skills please"), "Hello! ...");
        assert_eq!(rules.respond("skills"), "Skills ...");
    }

    #[test]
    fn unmatched_utterance_gets_fallback() {
        let rules = default_rules();
        assert_eq!(rules.respond("xyzzy"), DEFAULT_FALLBACK);
    }

    #[test]
    fn matching_ignores_case() {
        let rules = default_rules();
        assert_eq!(rules.respond("Who are you"), rules.respond("WHO ARE YOU"));
        assert!(rules.respond("who are you").starts_with("I am Manaka"));
    }

    #[test]
    fn keywords_are_normalized_and_empty_ones_dropped() {
        let rules = ResponseRules::new(
            vec![ResponseRule {
                keywords: vec!["  Resume ".to_string(), "".to_string()],
                response: "cv".to_string(),
            }],
            "none",
        );
        assert_eq!(rules.rules[0].keywords, vec!["resume".to_string()]);
        assert_eq!(rules.respond("anything"), "none");
        assert_eq!(rules.respond("send your RESUME"), "cv");
    }

    #[test]
    fn load_rules_reads_json_table() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"rules": [{{"keywords": ["Blog"], "response": "No blog yet."}}]}}"#
        )
        .expect("write table");
        let rules = load_rules(file.path());
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.respond("do you have a blog"), "No blog yet.");
        assert_eq!(rules.fallback, DEFAULT_FALLBACK);
    }

    #[test]
    fn load_rules_falls_back_on_missing_or_bad_file() {
        let missing = load_rules(Path::new("/definitely/not/here.json"));
        assert_eq!(missing.len(), default_rules().len());

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");
        assert_eq!(load_rules(file.path()).len(), default_rules().len());
    }

    #[test]
    fn describe_lists_every_rule() {
        let text = describe_rules(&default_rules());
        assert!(text.contains("- hi, hello"));
        assert!(text.contains("- contact, email, hire"));
    }
}
