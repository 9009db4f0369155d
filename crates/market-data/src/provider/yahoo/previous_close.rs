//! Previous-close resolution for chart payloads.
//!
//! Yahoo's `previousClose` is frequently null (indices, some ETFs) or zero,
//! so the previous close is resolved through a fallback chain:
//!
//! 1. `meta.previousClose`
//! 2. the second-to-last non-null daily close, when at least two exist
//! 3. the only non-null daily close, when exactly one exists
//! 4. `meta.chartPreviousClose`
//! 5. the live price itself (change becomes zero)
//!
//! Null and zero are both unusable at every step. Step 2 assumes the last
//! daily close is the live session; outside market hours that picks the
//! close before the last completed session. There is no exchange-calendar
//! check behind it.

/// Resolve the previous close for a live `price`.
pub(crate) fn resolve_previous_close(
    price: f64,
    previous_close: Option<f64>,
    closes: Option<&[Option<f64>]>,
    chart_previous_close: Option<f64>,
) -> f64 {
    usable(previous_close)
        .or_else(|| usable(closes.and_then(close_from_history)))
        .or_else(|| usable(chart_previous_close))
        .unwrap_or(price)
}

/// Picks a reference close from the trailing daily window.
fn close_from_history(closes: &[Option<f64>]) -> Option<f64> {
    let valid: Vec<f64> = closes.iter().flatten().copied().collect();
    match valid.len() {
        0 => None,
        1 => Some(valid[0]),
        n => Some(valid[n - 2]),
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_previous_close_wins() {
        let closes = [Some(90.0), Some(95.0)];
        assert_eq!(
            resolve_previous_close(105.0, Some(101.5), Some(&closes), Some(80.0)),
            101.5
        );
    }

    #[test]
    fn test_second_to_last_non_null_close() {
        let closes = [Some(100.0), None, Some(98.0), Some(105.0)];
        assert_eq!(resolve_previous_close(105.0, None, Some(&closes), None), 98.0);
    }

    #[test]
    fn test_zero_previous_close_is_unusable() {
        let closes = [Some(100.0), Some(98.0), Some(105.0)];
        assert_eq!(
            resolve_previous_close(105.0, Some(0.0), Some(&closes), None),
            98.0
        );
    }

    #[test]
    fn test_trailing_nulls_are_skipped() {
        let closes = [Some(97.0), Some(99.0), None, None];
        assert_eq!(resolve_previous_close(101.0, None, Some(&closes), None), 97.0);
    }

    #[test]
    fn test_single_non_null_close() {
        let closes = [None, Some(99.0), None];
        assert_eq!(
            resolve_previous_close(101.0, None, Some(&closes), Some(50.0)),
            99.0
        );
    }

    #[test]
    fn test_chart_previous_close_fallback() {
        let closes = [None, None];
        assert_eq!(
            resolve_previous_close(101.0, None, Some(&closes), Some(96.0)),
            96.0
        );
        assert_eq!(resolve_previous_close(101.0, None, None, Some(96.0)), 96.0);
    }

    #[test]
    fn test_zero_history_close_falls_through() {
        let closes = [Some(0.0), Some(101.0)];
        assert_eq!(
            resolve_previous_close(101.0, None, Some(&closes), Some(96.0)),
            96.0
        );
    }

    #[test]
    fn test_price_is_last_resort() {
        let closes = [None, None];
        assert_eq!(resolve_previous_close(101.0, None, Some(&closes), None), 101.0);
        assert_eq!(
            resolve_previous_close(101.0, Some(0.0), None, Some(0.0)),
            101.0
        );
    }
}
