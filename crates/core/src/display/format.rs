use tickerbar_market_data::{Quote, Symbol};

use super::{RenderOutput, StyledRun, TextColor};
use crate::constants::{DOWN_ARROW, NO_TICKERS_TEXT, UP_ARROW};
use crate::quotes::QuoteCache;
use crate::tickers::TickerList;

/// `"{symbol} {price} {arrow}{abs change}"`, both numbers with two decimals.
pub fn quote_text(symbol: &Symbol, quote: &Quote) -> String {
    let arrow = if quote.is_up() { UP_ARROW } else { DOWN_ARROW };
    format!(
        "{} {:.2} {}{:.2}",
        symbol,
        quote.price,
        arrow,
        quote.change.abs()
    )
}

pub fn quote_color(quote: &Quote) -> TextColor {
    if quote.is_up() {
        TextColor::Success
    } else {
        TextColor::Failure
    }
}

/// Shown in rotate mode while the selected symbol has no quote yet.
pub fn loading_text(symbol: &Symbol) -> String {
    format!("{}...", symbol)
}

/// Run for one symbol inside the marquee: colored when cached, the bare
/// symbol otherwise.
pub(crate) fn marquee_run(symbol: &Symbol, quote: Option<&Quote>) -> StyledRun {
    match quote {
        Some(quote) => StyledRun::colored(quote_text(symbol, quote), quote_color(quote)),
        None => StyledRun::plain(symbol.to_string()),
    }
}

/// Rotate mode output for the symbol at `index` (modulo the list length).
pub fn render_rotate(list: &TickerList, cache: &QuoteCache, index: usize) -> RenderOutput {
    let Some(symbol) = list.get_wrapped(index) else {
        return RenderOutput::plain(NO_TICKERS_TEXT);
    };
    match cache.get(symbol) {
        Some(quote) => {
            RenderOutput::single(StyledRun::colored(quote_text(symbol, quote), quote_color(quote)))
        }
        None => RenderOutput::plain(loading_text(symbol)),
    }
}
