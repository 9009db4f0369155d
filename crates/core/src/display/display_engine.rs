use super::format::render_rotate;
use super::marquee::MarqueeBuffer;
use super::{DisplayMode, RenderOutput};
use crate::quotes::QuoteCache;
use crate::tickers::TickerList;

/// Presentation state machine for the status line.
///
/// Pure state: the owner feeds it the current list and cache and forwards
/// whatever it returns to the render sink. Returning `None` means the
/// visible output did not change.
#[derive(Debug, Clone)]
pub struct DisplayEngine {
    mode: DisplayMode,
    rotate_index: usize,
    marquee: MarqueeBuffer,
}

impl DisplayEngine {
    pub fn new(mode: DisplayMode, marquee_width: usize) -> Self {
        Self {
            mode,
            rotate_index: 0,
            marquee: MarqueeBuffer::new(marquee_width),
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Index of the symbol rotate mode is showing, if the list is non-empty.
    pub fn selected_index(&self, list: &TickerList) -> Option<usize> {
        if list.is_empty() {
            None
        } else {
            Some(self.rotate_index % list.len())
        }
    }

    /// Switches mode and returns the first frame of the new mode.
    ///
    /// Marquee starts over at the beginning of a freshly built line.
    pub fn set_mode(
        &mut self,
        mode: DisplayMode,
        list: &TickerList,
        cache: &QuoteCache,
    ) -> RenderOutput {
        self.mode = mode;
        if mode.is_marquee() {
            self.marquee.rebuild(list, cache);
            self.marquee.reset_offset();
        }
        self.render_current(list, cache)
    }

    /// One display timer tick: rotate advances to the next symbol, marquee
    /// scrolls one character.
    pub fn tick(&mut self, list: &TickerList, cache: &QuoteCache) -> RenderOutput {
        match self.mode {
            DisplayMode::Rotate => {
                self.rotate_index = if list.is_empty() {
                    0
                } else {
                    (self.rotate_index + 1) % list.len()
                };
            }
            DisplayMode::Marquee => self.marquee.advance(),
        }
        self.render_current(list, cache)
    }

    /// Quotes were merged into the cache.
    ///
    /// Rotate redraws the current symbol in place. Marquee only rebuilds its
    /// line; the next scroll tick shows it.
    pub fn on_data_changed(
        &mut self,
        list: &TickerList,
        cache: &QuoteCache,
    ) -> Option<RenderOutput> {
        match self.mode {
            DisplayMode::Rotate => Some(self.render_current(list, cache)),
            DisplayMode::Marquee => {
                self.marquee.rebuild(list, cache);
                None
            }
        }
    }

    /// The list was mutated: rotation restarts from the first symbol.
    pub fn on_tickers_changed(
        &mut self,
        list: &TickerList,
        cache: &QuoteCache,
    ) -> Option<RenderOutput> {
        self.rotate_index = 0;
        self.on_data_changed(list, cache)
    }

    /// Shows the symbol at `index` in rotate mode. Ignored in marquee mode or
    /// when `index` is outside the list.
    pub fn select(
        &mut self,
        index: usize,
        list: &TickerList,
        cache: &QuoteCache,
    ) -> Option<RenderOutput> {
        if self.mode.is_marquee() || index >= list.len() {
            return None;
        }
        self.rotate_index = index;
        Some(self.render_current(list, cache))
    }

    pub fn render_current(&self, list: &TickerList, cache: &QuoteCache) -> RenderOutput {
        match self.mode {
            DisplayMode::Rotate => render_rotate(list, cache, self.rotate_index),
            DisplayMode::Marquee => self.marquee.window(),
        }
    }
}
