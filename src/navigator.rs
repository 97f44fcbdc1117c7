/*
 * @file navigator.rs
 * @brief Single-page section navigation
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

//! Manual single-page section navigation.
//!
//! The page shows one section at a time. [`Navigator`] owns the fixed section
//! list, the nav links paired with it by ordinal, and the active index. Every
//! state change is followed by a render pass that re-derives section and link
//! presentation from the index.

use thiserror::Error;
use tracing::debug;

use crate::config::SectionConfig;
use crate::reveal::{RevealElement, RevealObserver};

/// Errors raised while building a navigator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("a page needs at least one section")]
    Empty,
    #[error("section index {index} is out of range for {len} sections")]
    OutOfRange { index: usize, len: usize },
}

/// One page section.
#[derive(Clone, Debug)]
pub struct Section {
    id: String,
    title: String,
    active: bool,
    elements: Vec<RevealElement>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, elements: Vec<RevealElement>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            active: false,
            elements,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn elements(&self) -> &[RevealElement] {
        &self.elements
    }

    fn replay_reveal(&mut self) {
        for element in &mut self.elements {
            element.replay();
        }
    }
}

impl From<&SectionConfig> for Section {
    fn from(config: &SectionConfig) -> Self {
        Section::new(
            config.id.as_str(),
            config.title.as_str(),
            config.elements.iter().map(RevealElement::new).collect(),
        )
    }
}

/// Presentation of a nav link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkStyle {
    Highlighted,
    Normal,
}

impl LinkStyle {
    /// CSS colour applied to the link.
    pub fn color(self) -> &'static str {
        match self {
            LinkStyle::Highlighted => "var(--accent)",
            LinkStyle::Normal => "var(--text-secondary)",
        }
    }
}

/// Nav bar entry for the section at the same ordinal.
#[derive(Clone, Debug)]
pub struct NavLink {
    label: String,
    style: LinkStyle,
}

impl NavLink {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn style(&self) -> LinkStyle {
        self.style
    }
}

/// Keys the page listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowDown,
    ArrowLeft,
    ArrowUp,
    Other,
}

impl Key {
    /// Parses `ArrowRight`, `right`, `down` and friends; anything else is `Other`.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        match name.strip_prefix("arrow").unwrap_or(&name) {
            "right" => Key::ArrowRight,
            "down" => Key::ArrowDown,
            "left" => Key::ArrowLeft,
            "up" => Key::ArrowUp,
            _ => Key::Other,
        }
    }
}

/// Where keyboard focus sits when a key is pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Page,
    TextInput,
    TextArea,
}

impl Focus {
    fn is_text_entry(self) -> bool {
        matches!(self, Focus::TextInput | Focus::TextArea)
    }
}

/// UI events that drive navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    NextClicked,
    PreviousClicked,
    KeyPressed { key: Key, focus: Focus },
    NavLinkClicked(usize),
    CallToAction,
}

/// Tracks the visible section and keeps sections and nav links in sync.
///
/// # Details
/// Exactly one section is active at any time. Next and previous wrap around
/// at the ends, so navigation is total over the index range.
#[derive(Clone, Debug)]
pub struct Navigator {
    sections: Vec<Section>,
    links: Vec<NavLink>,
    active: usize,
    contact_index: usize,
}

impl Navigator {
    /// Builds a navigator showing the first section.
    ///
    /// # Arguments
    /// * `sections` - Page sections in display order.
    /// * `contact_index` - Section the call-to-action jumps to.
    ///
    /// # Errors
    /// Returns an error for an empty section list or an out-of-range
    /// `contact_index`.
    pub fn new(sections: Vec<Section>, contact_index: usize) -> Result<Self, NavigationError> {
        Self::starting_at(sections, contact_index, 0)
    }

    /// Builds a navigator showing section `start`.
    ///
    /// # Errors
    /// Same as [`Navigator::new`], plus an out-of-range `start`.
    pub fn starting_at(
        sections: Vec<Section>,
        contact_index: usize,
        start: usize,
    ) -> Result<Self, NavigationError> {
        let len = sections.len();
        if len == 0 {
            return Err(NavigationError::Empty);
        }
        for index in [contact_index, start] {
            if index >= len {
                return Err(NavigationError::OutOfRange { index, len });
            }
        }
        let links = sections
            .iter()
            .map(|section| NavLink {
                label: section.title.clone(),
                style: LinkStyle::Normal,
            })
            .collect();
        let mut navigator = Self {
            sections,
            links,
            active: start,
            contact_index,
        };
        navigator.render();
        Ok(navigator)
    }

    /// Builds a navigator from configured sections.
    ///
    /// # Errors
    /// Same as [`Navigator::new`].
    pub fn from_config(
        sections: &[SectionConfig],
        contact_index: usize,
    ) -> Result<Self, NavigationError> {
        Self::new(sections.iter().map(Section::from).collect(), contact_index)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_section(&self) -> &Section {
        &self.sections[self.active]
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn contact_index(&self) -> usize {
        self.contact_index
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    fn last_index(&self) -> usize {
        self.sections.len() - 1
    }

    /// Moves to the next section, wrapping from the last to the first.
    pub fn go_next(&mut self) {
        self.active = if self.active < self.last_index() {
            self.active + 1
        } else {
            0
        };
        self.render();
    }

    /// Moves to the previous section, wrapping from the first to the last.
    pub fn go_previous(&mut self) {
        self.active = if self.active > 0 {
            self.active - 1
        } else {
            self.last_index()
        };
        self.render();
    }

    /// Jumps to section `index`.
    ///
    /// # Panics
    /// Panics if `index` is not a valid section ordinal. Callers derive the
    /// index from the nav links, so this is a programming error.
    pub fn go_to(&mut self, index: usize) {
        assert!(
            index < self.sections.len(),
            "section index {} out of range for {} sections",
            index,
            self.sections.len()
        );
        self.active = index;
        self.render();
    }

    /// Maps a UI event to a navigation operation.
    ///
    /// # Returns
    /// * `bool` - `false` if the event was ignored (arrow keys while typing,
    ///   unrelated keys).
    pub fn handle(&mut self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::NextClicked => self.go_next(),
            Trigger::PreviousClicked => self.go_previous(),
            Trigger::KeyPressed { focus, .. } if focus.is_text_entry() => return false,
            Trigger::KeyPressed { key, .. } => match key {
                Key::ArrowRight | Key::ArrowDown => self.go_next(),
                Key::ArrowLeft | Key::ArrowUp => self.go_previous(),
                Key::Other => return false,
            },
            Trigger::NavLinkClicked(index) => self.go_to(index),
            Trigger::CallToAction => self.go_to(self.contact_index),
        }
        true
    }

    /// Reports the visible ratio of every element in section `index`.
    ///
    /// # Returns
    /// * `usize` - Number of elements revealed by this observation; 0 for an
    ///   unknown section.
    pub fn observe_section(&mut self, observer: &RevealObserver, index: usize, ratio: f32) -> usize {
        self.sections.get_mut(index).map_or(0, |section| {
            section
                .elements
                .iter_mut()
                .map(|element| observer.observe(element, ratio))
                .filter(|revealed| *revealed)
                .count()
        })
    }

    fn render(&mut self) {
        let active = self.active;
        for (ordinal, section) in self.sections.iter_mut().enumerate() {
            section.active = ordinal == active;
        }
        for (ordinal, link) in self.links.iter_mut().enumerate() {
            link.style = if ordinal == active {
                LinkStyle::Highlighted
            } else {
                LinkStyle::Normal
            };
        }
        self.sections[active].replay_reveal();
        debug!(index = active, section = %self.sections[active].id, "rendered section");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn portfolio() -> Navigator {
        let config = AppConfig::default();
        Navigator::from_config(&config.sections, config.contact_index).expect("navigator")
    }

    fn assert_single_active(nav: &Navigator, index: usize) {
        let active: Vec<_> = nav
            .sections()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_active())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(active, vec![index]);
        let highlighted: Vec<_> = nav
            .links()
            .iter()
            .enumerate()
            .filter(|(_, l)| l.style() == LinkStyle::Highlighted)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(highlighted, vec![index]);
        assert_eq!(nav.active_index(), index);
    }

    #[test]
    fn starts_on_first_section() {
        let nav = portfolio();
        assert_single_active(&nav, 0);
        assert_eq!(nav.active_section().title(), "Home");
    }

    #[test]
    fn go_to_activates_exactly_one_section_and_link() {
        let mut nav = portfolio();
        for index in 0..nav.section_count() {
            nav.go_to(index);
            assert_single_active(&nav, index);
        }
    }

    #[test]
    fn next_and_previous_wrap_around() {
        let mut nav = portfolio();
        nav.go_previous();
        assert_single_active(&nav, 4);
        nav.go_next();
        assert_single_active(&nav, 0);
        nav.go_next();
        nav.go_next();
        assert_single_active(&nav, 2);
    }

    #[test]
    fn call_to_action_jumps_to_contact() {
        for start in 0..5 {
            let mut nav = portfolio();
            nav.go_to(start);
            assert!(nav.handle(Trigger::CallToAction));
            assert_single_active(&nav, 4);
            assert_eq!(nav.active_section().id(), "contact");
        }
    }

    #[test]
    fn arrow_keys_ignored_while_typing() {
        let mut nav = portfolio();
        let typing = Trigger::KeyPressed {
            key: Key::ArrowRight,
            focus: Focus::TextArea,
        };
        assert!(!nav.handle(typing));
        assert_eq!(nav.active_index(), 0);

        assert!(nav.handle(Trigger::KeyPressed {
            key: Key::ArrowDown,
            focus: Focus::Page,
        }));
        assert_eq!(nav.active_index(), 1);
        assert!(nav.handle(Trigger::KeyPressed {
            key: Key::ArrowUp,
            focus: Focus::Page,
        }));
        assert_eq!(nav.active_index(), 0);
        assert!(!nav.handle(Trigger::KeyPressed {
            key: Key::Other,
            focus: Focus::Page,
        }));
    }

    #[test]
    fn key_names_parse() {
        assert_eq!(Key::from_name("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_name("down"), Key::ArrowDown);
        assert_eq!(Key::from_name("Enter"), Key::Other);
    }

    #[test]
    fn activation_replays_reveal_of_new_section_only() {
        let mut nav = portfolio();
        nav.handle(Trigger::NavLinkClicked(3));
        let projects = &nav.sections()[3];
        assert!(projects.elements().iter().all(|e| e.is_shown() && e.replays() == 1));
        let timeline = &nav.sections()[2];
        assert!(timeline.elements().iter().all(|e| !e.is_shown()));

        nav.go_to(3);
        assert!(nav.sections()[3].elements().iter().all(|e| e.replays() == 2));
    }

    #[test]
    fn scroll_reveals_elements_of_inactive_sections() {
        let mut nav = portfolio();
        let observer = RevealObserver::default();
        assert_eq!(nav.observe_section(&observer, 3, 0.05), 0);
        assert_eq!(nav.observe_section(&observer, 3, 0.5), 2);
        assert_eq!(nav.observe_section(&observer, 3, 0.5), 0);
        assert_eq!(nav.observe_section(&observer, 0, 1.0), 0);
        assert_eq!(nav.observe_section(&observer, 42, 1.0), 0);
        assert_eq!(nav.active_index(), 0);
    }

    #[test]
    fn link_colors_follow_style() {
        let nav = portfolio();
        assert_eq!(nav.links()[0].style().color(), "var(--accent)");
        assert_eq!(nav.links()[1].style().color(), "var(--text-secondary)");
        assert_eq!(nav.links()[1].label(), "About");
    }

    #[test]
    fn construction_validates_indices() {
        assert_eq!(Navigator::new(Vec::new(), 0).unwrap_err(), NavigationError::Empty);
        let one = vec![Section::new("home", "Home", Vec::new())];
        assert_eq!(
            Navigator::new(one.clone(), 4).unwrap_err(),
            NavigationError::OutOfRange { index: 4, len: 1 }
        );
        let nav = Navigator::starting_at(one, 0, 0).expect("navigator");
        assert_single_active(&nav, 0);
    }

    #[test]
    fn starting_at_enters_on_designated_section() {
        let config = AppConfig::default();
        let sections = config.sections.iter().map(Section::from).collect();
        let nav = Navigator::starting_at(sections, 4, 4).expect("navigator");
        assert_single_active(&nav, 4);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn go_to_rejects_invalid_index() {
        portfolio().go_to(5);
    }
}
