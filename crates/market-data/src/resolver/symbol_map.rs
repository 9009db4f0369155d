use std::borrow::Cow;

use urlencoding::encode;

/// Index aliases users type, mapped to Yahoo's caret-prefixed index symbols
/// (already percent-encoded for the URL path).
pub const YAHOO_INDEX_ALIASES: &[(&str, &str)] = &[
    ("SPX", "%5EGSPC"),
    ("S&P500", "%5EGSPC"),
    ("IXIC", "%5EIXIC"),
    ("NAS", "%5EIXIC"),
    ("NASDAQ", "%5EIXIC"),
    ("DJI", "%5EDJI"),
    ("DOW", "%5EDJI"),
];

/// Map a user-facing symbol to the key used in the Yahoo chart URL path.
///
/// Known index aliases match case-insensitively; anything else is
/// percent-encoded as-is.
pub fn yahoo_query_key(symbol: &str) -> Cow<'_, str> {
    let upper = symbol.to_uppercase();
    YAHOO_INDEX_ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map(|(_, key)| Cow::Borrowed(*key))
        .unwrap_or_else(|| encode(symbol))
}
