//! Line commands read from stdin.

use anyhow::{bail, Context};
use tickerbar_core::display::quote_text;
use tickerbar_core::{Error, TickerHandle, TickerSnapshot};

use crate::render::TerminalSink;

pub const HELP: &str = "commands: m (marquee on/off) | a SYM (add) | d (remove current) | \
b TEXT (replace list, '|' = new line) | reset | r (refresh) | s N (select) | l (list) | q (quit)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    ToggleMarquee,
    Add(String),
    RemoveCurrent,
    Bulk(String),
    Reset,
    Refresh,
    /// Zero-based index; the user types it one-based
    Select(usize),
    List,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<UserCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "m" => UserCommand::ToggleMarquee,
        "a" => {
            if rest.is_empty() {
                bail!("usage: a SYMBOL");
            }
            UserCommand::Add(rest.to_string())
        }
        "d" => UserCommand::RemoveCurrent,
        "b" => UserCommand::Bulk(rest.replace('|', "\n")),
        "reset" => UserCommand::Reset,
        "r" => UserCommand::Refresh,
        "s" => {
            let position: usize = rest
                .parse()
                .with_context(|| format!("usage: s N (got '{}')", rest))?;
            if position == 0 {
                bail!("ticker numbers start at 1");
            }
            UserCommand::Select(position - 1)
        }
        "l" => UserCommand::List,
        "h" | "?" | "help" => UserCommand::Help,
        "q" | "quit" => UserCommand::Quit,
        other => bail!("unknown command '{}' (h for help)", other),
    };
    Ok(Some(command))
}

/// Runs one command against the engine. Returns `false` when the user asked
/// to quit.
pub async fn dispatch(
    command: UserCommand,
    handle: &TickerHandle,
    sink: &TerminalSink,
) -> anyhow::Result<bool> {
    match command {
        UserCommand::ToggleMarquee => {
            let mode = handle.toggle_marquee().await?;
            tracing::info!("Display mode is now {:?}", mode);
        }
        UserCommand::Add(symbol) => match handle.add_ticker(&symbol).await {
            Ok(true) => sink.message(&format!("Added {}", symbol.trim().to_uppercase())),
            Ok(false) => sink.message(&format!("{} is already listed", symbol.trim())),
            Err(Error::LimitExceeded { limit }) => {
                sink.message(&format!("Limit reached: you can only have up to {} tickers", limit))
            }
            Err(e) => return Err(e.into()),
        },
        UserCommand::RemoveCurrent => match handle.remove_current_ticker().await? {
            Some(symbol) => sink.message(&format!("Removed {}", symbol)),
            None => sink.message("No tickers to remove"),
        },
        UserCommand::Bulk(text) => {
            if handle.manage_tickers(&text).await? {
                sink.message("Ticker list replaced");
            } else {
                sink.message("No symbols found, list unchanged");
            }
        }
        UserCommand::Reset => {
            handle.reset_tickers().await?;
            sink.message("Tickers reset to defaults");
        }
        UserCommand::Refresh => handle.refresh_now().await?,
        UserCommand::Select(index) => {
            if !handle.select_ticker(index).await? {
                sink.message("Selection needs rotate mode and a listed ticker number");
            }
        }
        UserCommand::List => {
            let snapshot = handle.snapshot().await?;
            for line in listing(&snapshot) {
                sink.message(&line);
            }
        }
        UserCommand::Help => sink.message(HELP),
        UserCommand::Quit => return Ok(false),
    }
    Ok(true)
}

/// One line per ticker, the selected one marked with `*`.
fn listing(snapshot: &TickerSnapshot) -> Vec<String> {
    if snapshot.symbols.is_empty() {
        return vec!["No Tickers".to_string()];
    }
    snapshot
        .symbols
        .iter()
        .enumerate()
        .map(|(index, symbol)| {
            let marker = if snapshot.selected_index == Some(index) && !snapshot.mode.is_marquee()
            {
                '*'
            } else {
                ' '
            };
            let detail = match snapshot.quote_for(symbol) {
                Some(quote) => format!(
                    "{} ({:+.2}%)",
                    quote_text(symbol, quote),
                    quote.percent_change
                ),
                None => format!("{} (loading)", symbol),
            };
            format!("{} {:>2}. {}", marker, index + 1, detail)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickerbar_core::DisplayMode;
    use tickerbar_market_data::{Quote, Symbol};

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("  ").unwrap(), None);
        assert_eq!(parse_line("m").unwrap(), Some(UserCommand::ToggleMarquee));
        assert_eq!(
            parse_line("a  tsla ").unwrap(),
            Some(UserCommand::Add("tsla".to_string()))
        );
        assert_eq!(
            parse_line("b aapl, msft|nvda").unwrap(),
            Some(UserCommand::Bulk("aapl, msft\nnvda".to_string()))
        );
        assert_eq!(parse_line("s 3").unwrap(), Some(UserCommand::Select(2)));
        assert_eq!(parse_line("RESET").unwrap(), Some(UserCommand::Reset));
        assert_eq!(parse_line("q").unwrap(), Some(UserCommand::Quit));
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(parse_line("a").is_err());
        assert!(parse_line("s").is_err());
        assert!(parse_line("s 0").is_err());
        assert!(parse_line("s two").is_err());
        assert!(parse_line("x").is_err());
    }

    #[test]
    fn listing_marks_selection_and_loading_symbols() {
        let aapl = Symbol::parse("AAPL").unwrap();
        let tsla = Symbol::parse("TSLA").unwrap();
        let snapshot = TickerSnapshot {
            symbols: vec![aapl.clone(), tsla],
            quotes: vec![Quote::from_previous_close(aapl, 105.0, 100.0)],
            selected_index: Some(1),
            mode: DisplayMode::Rotate,
        };

        assert_eq!(
            listing(&snapshot),
            vec![
                "   1. AAPL 105.00 ▲5.00 (+5.00%)".to_string(),
                "*  2. TSLA (loading)".to_string(),
            ]
        );
    }
}
