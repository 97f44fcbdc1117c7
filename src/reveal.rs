/*
 * @file reveal.rs
 * @brief Scroll reveal state
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

//! Scroll-triggered reveal state for animated page elements.

use tracing::trace;

/// Visible fraction at which an element is revealed.
pub const REVEAL_THRESHOLD: f32 = 0.1;

/// An animation-eligible element inside a section.
///
/// # Details
/// Starts hidden. Once shown it stays shown; scrolling away does not hide it
/// again. `replays` counts forced replays triggered by navigation.
#[derive(Clone, Debug, PartialEq)]
pub struct RevealElement {
    name: String,
    shown: bool,
    replays: u32,
}

impl RevealElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shown: false,
            replays: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn replays(&self) -> u32 {
        self.replays
    }

    /// Restarts the entrance animation and forces the element visible.
    pub fn replay(&mut self) {
        self.replays += 1;
        self.shown = true;
    }
}

/// Marks elements shown as they scroll into view.
#[derive(Clone, Copy, Debug)]
pub struct RevealObserver {
    threshold: f32,
}

impl Default for RevealObserver {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
        }
    }
}

impl RevealObserver {
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// Reports the element's visible ratio.
    ///
    /// # Arguments
    /// * `element` - Element being observed.
    /// * `ratio` - Fraction of the element inside the viewport, `0.0..=1.0`.
    ///
    /// # Returns
    /// * `bool` - `true` if this observation revealed the element.
    pub fn observe(&self, element: &mut RevealElement, ratio: f32) -> bool {
        // NaN fails both comparisons and is rejected.
        if element.shown || !(ratio > 0.0 && ratio >= self.threshold) {
            return false;
        }
        trace!(element = %element.name, ratio, "revealing element");
        element.shown = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_reveals_at_threshold_and_stays_shown() {
        let observer = RevealObserver::default();
        let mut card = RevealElement::new("project-card");
        assert!(!observer.observe(&mut card, 0.05));
        assert!(!card.is_shown());
        assert!(observer.observe(&mut card, 0.1));
        assert!(card.is_shown());
        assert!(!observer.observe(&mut card, 0.0));
        assert!(card.is_shown());
    }

    #[test]
    fn zero_threshold_still_needs_some_visibility() {
        let observer = RevealObserver::with_threshold(0.0);
        let mut item = RevealElement::new("timeline-item");
        assert!(!observer.observe(&mut item, 0.0));
        assert!(observer.observe(&mut item, 0.01));
    }

    #[test]
    fn nan_ratio_never_reveals() {
        let observer = RevealObserver::with_threshold(0.0);
        let mut card = RevealElement::new("project-card");
        assert!(!observer.observe(&mut card, f32::NAN));
        assert!(!card.is_shown());
        assert!(!RevealObserver::default().observe(&mut card, f32::NAN));
    }

    #[test]
    fn replay_forces_visible_and_counts() {
        let mut card = RevealElement::new("bento-card");
        card.replay();
        card.replay();
        assert!(card.is_shown());
        assert_eq!(card.replays(), 2);
    }
}
