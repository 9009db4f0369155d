use std::time::Duration;

/// Maximum number of symbols in the ticker list
pub const MAX_TICKERS: usize = 10;

/// List used on first launch and by reset
pub const DEFAULT_TICKERS: [&str; 4] = ["SPX", "IXIC", "DJI", "AAPL"];

/// Settings key holding the persisted ticker list
pub const SAVED_TICKERS_KEY: &str = "savedTickers";

/// Settings key holding the persisted display mode
pub const MARQUEE_MODE_KEY: &str = "isMarqueeMode";

/// Periodic refresh of every symbol
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Rotate mode: time each symbol stays on screen
pub const ROTATE_INTERVAL: Duration = Duration::from_secs(5);

/// Marquee mode: one character of scroll per tick
pub const MARQUEE_INTERVAL: Duration = Duration::from_millis(150);

/// Marquee mode: visible characters
pub const MARQUEE_WIDTH: usize = 40;

/// Marquee mode: drawn after every symbol
pub const MARQUEE_SEPARATOR: &str = "   |   ";

pub const UP_ARROW: char = '▲';
pub const DOWN_ARROW: char = '▼';

pub const LOADING_TEXT: &str = "Loading...";
pub const NO_TICKERS_TEXT: &str = "No Tickers";
