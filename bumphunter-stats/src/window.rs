//! Window Enumeration
//!
//! Candidate bump windows over the active search range. Widths run from one
//! bin up to (but excluding) half the active span, and windows of the same
//! width advance by half their width, so neighbours overlap by roughly 50%.

use crate::histogram::ActiveRange;

/// Half-open bin interval `[lo, hi)` scanned as one aggregate region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub lo: usize,
    pub hi: usize,
}

impl Window {
    pub fn new(lo: usize, hi: usize) -> Self {
        debug_assert!(lo < hi, "window [{lo}, {hi}) is empty");
        Self { lo, hi }
    }

    /// Number of bins covered
    pub fn width(&self) -> usize {
        self.hi - self.lo
    }

    /// Whether `bin` lies inside the window
    pub fn contains(&self, bin: usize) -> bool {
        (self.lo..self.hi).contains(&bin)
    }
}

impl From<Window> for (usize, usize) {
    fn from(window: Window) -> Self {
        (window.lo, window.hi)
    }
}

/// Restartable description of every window admitted over a search range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowScan {
    search_lo: usize,
    search_hi: usize,
}

impl WindowScan {
    pub fn new(search_lo: usize, search_hi: usize) -> Self {
        Self {
            search_lo,
            search_hi,
        }
    }

    pub fn over(range: ActiveRange) -> Self {
        Self::new(range.lo, range.hi)
    }

    /// Exclusive upper bound on window width
    pub fn max_width(&self) -> usize {
        self.search_hi.saturating_sub(self.search_lo) / 2
    }

    /// Start a fresh pass over the windows
    pub fn iter(&self) -> Windows {
        Windows {
            search_lo: self.search_lo,
            search_hi: self.search_hi,
            max_width: self.max_width(),
            width: 1,
            pos: self.search_lo,
        }
    }

    /// Total number of windows a full pass yields
    pub fn len(&self) -> usize {
        (1..self.max_width())
            .map(|width| {
                let positions = self.search_hi - width - self.search_lo;
                positions.div_ceil(step_for(width))
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.max_width() <= 1
    }
}

impl IntoIterator for &WindowScan {
    type Item = Window;
    type IntoIter = Windows;

    fn into_iter(self) -> Windows {
        self.iter()
    }
}

/// Distance between successive start positions for a given width
pub fn step_for(width: usize) -> usize {
    (width / 2).max(1)
}

/// Lazy iterator over windows, ordered by width then start position
#[derive(Debug, Clone)]
pub struct Windows {
    search_lo: usize,
    search_hi: usize,
    max_width: usize,
    width: usize,
    pos: usize,
}

impl Iterator for Windows {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        while self.width < self.max_width {
            // width < (search_hi - search_lo) / 2, so this never underflows
            let end = self.search_hi - self.width;
            if self.pos < end {
                let window = Window::new(self.pos, self.pos + self.width);
                self.pos += step_for(self.width);
                return Some(window);
            }
            self.width += 1;
            self.pos = self.search_lo;
        }
        None
    }
}
