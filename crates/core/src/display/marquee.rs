use super::format::marquee_run;
use super::{RenderOutput, StyledRun, TextColor};
use crate::constants::{MARQUEE_SEPARATOR, NO_TICKERS_TEXT};
use crate::quotes::QuoteCache;
use crate::tickers::TickerList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Option<TextColor>,
}

/// Pre-rendered scrolling line.
///
/// Holds the styled text of every symbol (each followed by the separator)
/// twice in a row, so any window starting inside the first copy can be read
/// without wrapping. Rebuilt on data or list changes only; a scroll tick just
/// moves the cursor.
#[derive(Debug, Clone)]
pub struct MarqueeBuffer {
    doubled: Vec<Cell>,
    len: usize,
    offset: usize,
    width: usize,
}

impl MarqueeBuffer {
    pub fn new(width: usize) -> Self {
        Self {
            doubled: Vec::new(),
            len: 0,
            offset: 0,
            width,
        }
    }

    /// Length in characters of one copy of the text.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Re-renders the text from the list and cache. The cursor keeps its
    /// position, wrapped into the new length.
    pub fn rebuild(&mut self, list: &TickerList, cache: &QuoteCache) {
        let mut cells = Vec::new();
        for symbol in list.symbols() {
            let run = marquee_run(symbol, cache.get(symbol));
            push_run(&mut cells, &run.text, run.color);
            push_run(&mut cells, MARQUEE_SEPARATOR, Some(TextColor::Secondary));
        }

        self.len = cells.len();
        self.doubled = Vec::with_capacity(self.len * 2);
        self.doubled.extend_from_slice(&cells);
        self.doubled.extend_from_slice(&cells);
        self.offset = if self.len == 0 {
            0
        } else {
            self.offset % self.len
        };
    }

    pub fn reset_offset(&mut self) {
        self.offset = 0;
    }

    /// Moves the cursor one character, wrapping to 0 at the undoubled length.
    pub fn advance(&mut self) {
        if self.len > 0 {
            self.offset = (self.offset + 1) % self.len;
        }
    }

    /// The visible window at the cursor.
    pub fn window(&self) -> RenderOutput {
        if self.len == 0 {
            return RenderOutput::plain(NO_TICKERS_TEXT);
        }

        let end = (self.offset + self.width).min(self.doubled.len());
        let mut runs: Vec<StyledRun> = Vec::new();
        for cell in &self.doubled[self.offset..end] {
            match runs.last_mut() {
                Some(last) if last.color == cell.color => last.text.push(cell.ch),
                _ => runs.push(StyledRun {
                    text: cell.ch.to_string(),
                    color: cell.color,
                }),
            }
        }

        RenderOutput {
            runs,
            monospaced_digits: true,
        }
    }
}

fn push_run(cells: &mut Vec<Cell>, text: &str, color: Option<TextColor>) {
    cells.extend(text.chars().map(|ch| Cell { ch, color }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickerbar_market_data::{Quote, Symbol};

    fn cache_with(entries: &[(&str, f64, f64)]) -> QuoteCache {
        let mut cache = QuoteCache::new();
        for (symbol, price, prev) in entries {
            let quote =
                Quote::from_previous_close(Symbol::parse(symbol).unwrap(), *price, *prev);
            cache.insert(quote, 0);
        }
        cache
    }

    #[test]
    fn test_rebuild_renders_every_symbol_with_separator() {
        let mut marquee = MarqueeBuffer::new(200);
        let cache = cache_with(&[("AAPL", 105.0, 100.0)]);
        marquee.rebuild(&TickerList::parse_text("AAPL,TSLA"), &cache);

        let one_copy = "AAPL 105.00 ▲5.00   |   TSLA   |   ";
        assert_eq!(marquee.len(), one_copy.chars().count());

        let window = marquee.window();
        assert!(window.monospaced_digits);
        assert_eq!(window.text(), format!("{one_copy}{one_copy}"));
        assert_eq!(
            window.runs[0],
            StyledRun::colored("AAPL 105.00 ▲5.00", TextColor::Success)
        );
        assert_eq!(window.runs[1], StyledRun::colored("   |   ", TextColor::Secondary));
        assert_eq!(window.runs[2], StyledRun::plain("TSLA"));
    }

    #[test]
    fn test_cursor_wraps_after_len_ticks() {
        let mut marquee = MarqueeBuffer::new(40);
        marquee.rebuild(&TickerList::parse_text("A,B,C"), &QuoteCache::new());
        let len = marquee.len();

        for _ in 0..len {
            marquee.advance();
            assert!(marquee.offset() < len);
        }
        assert_eq!(marquee.offset(), 0);
    }

    #[test]
    fn test_window_never_reads_past_doubled_text() {
        let mut marquee = MarqueeBuffer::new(40);
        marquee.rebuild(&TickerList::parse_text("A"), &QuoteCache::new());
        let len = marquee.len();
        assert!(len * 2 < 40);

        for _ in 0..(len * 3) {
            let window = marquee.window();
            let shown = window.text().chars().count();
            assert_eq!(shown, 2 * len - marquee.offset());
            marquee.advance();
        }
    }

    #[test]
    fn test_window_reads_across_the_seam() {
        let mut marquee = MarqueeBuffer::new(6);
        marquee.rebuild(&TickerList::parse_text("AB"), &QuoteCache::new());
        // "AB   |   " has 9 chars
        for _ in 0..7 {
            marquee.advance();
        }
        assert_eq!(marquee.window().text(), "  AB  ");
    }

    #[test]
    fn test_rebuild_keeps_cursor_within_new_length() {
        let mut marquee = MarqueeBuffer::new(10);
        marquee.rebuild(&TickerList::parse_text("LONGNAME,OTHER"), &QuoteCache::new());
        for _ in 0..20 {
            marquee.advance();
        }
        marquee.rebuild(&TickerList::parse_text("X"), &QuoteCache::new());
        assert!(marquee.offset() < marquee.len());
    }

    #[test]
    fn test_empty_list_shows_placeholder() {
        let mut marquee = MarqueeBuffer::new(40);
        marquee.rebuild(&TickerList::default(), &QuoteCache::new());
        marquee.advance();
        assert_eq!(marquee.offset(), 0);
        assert_eq!(marquee.window().text(), "No Tickers");
    }
}
