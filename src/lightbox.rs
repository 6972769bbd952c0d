//! Lightbox viewer state machine.
//!
//! The overlay on a rendered page is driven by the embedded script in
//! `static/lightbox.js`; this module is the authoritative model of its
//! behavior, kept in Rust so the navigation and scoping rules are testable.
//!
//! One lightbox exists per page. Opening it from a clicked gallery link
//! captures the ordered references of the links **in the same grid only**,
//! with the current index at the clicked link's position within that
//! capture. Navigation wraps modulo the sequence length in both directions.
//! Closing discards the session; the next open recaptures from whichever
//! grid was clicked.

/// A gallery link as the lightbox sees it: which grid it belongs to and the
/// full-size reference it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub grid: String,
    pub href: String,
}

impl LinkRef {
    pub fn new(grid: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            grid: grid.into(),
            href: href.into(),
        }
    }
}

/// Keys the lightbox reacts to while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Closed,
    Open { index: usize },
}

/// The page-wide lightbox.
#[derive(Debug)]
pub struct Lightbox {
    state: State,
    sequence: Vec<String>,
}

impl Lightbox {
    pub fn new() -> Self {
        Self {
            state: State::Closed,
            sequence: Vec::new(),
        }
    }

    /// Open from a click on `links[clicked]`.
    ///
    /// Captures the references of every link sharing the clicked link's grid,
    /// in document order, and opens at the clicked link's position within
    /// that capture. Returns `false` (and stays closed) when the index is out
    /// of range.
    pub fn open(&mut self, links: &[LinkRef], clicked: usize) -> bool {
        let Some(target) = links.get(clicked) else {
            return false;
        };

        let sequence: Vec<String> = links
            .iter()
            .filter(|l| l.grid == target.grid)
            .map(|l| l.href.clone())
            .collect();
        let index = sequence
            .iter()
            .position(|href| *href == target.href)
            .unwrap_or(0);

        self.sequence = sequence;
        self.state = State::Open { index };
        true
    }

    /// Advance or retreat by `delta`, wrapping in both directions.
    /// No effect while closed.
    pub fn navigate(&mut self, delta: isize) {
        if let State::Open { index } = self.state {
            let len = self.sequence.len() as isize;
            if len == 0 {
                return;
            }
            let next = (index as isize + delta).rem_euclid(len) as usize;
            self.state = State::Open { index: next };
        }
    }

    /// Close the overlay (background click). No effect while closed.
    pub fn close(&mut self) {
        self.state = State::Closed;
    }

    /// Handle a key press. Keys have no effect while closed.
    pub fn key(&mut self, key: Key) {
        if !self.is_open() {
            return;
        }
        match key {
            Key::Escape => self.close(),
            Key::ArrowLeft => self.navigate(-1),
            Key::ArrowRight => self.navigate(1),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open { .. })
    }

    /// The reference currently displayed, while open.
    pub fn current(&self) -> Option<&str> {
        match self.state {
            State::Open { index } => self.sequence.get(index).map(String::as_str),
            State::Closed => None,
        }
    }

    /// The "position / total" counter label, while open.
    pub fn counter(&self) -> Option<String> {
        match self.state {
            State::Open { index } => Some(format!("{} / {}", index + 1, self.sequence.len())),
            State::Closed => None,
        }
    }
}

impl Default for Lightbox {
    fn default() -> Self {
        Self::new()
    }
}
