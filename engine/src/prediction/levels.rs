// Support and resistance from recent price extrema

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLevels {
    pub support: f64,
    pub resistance: f64,
}

/// Lowest and highest of the last `window` prices. When that window holds a
/// single distinct value there is no range, so the levels fall back to
/// `last ± fallback_spread` (a fraction of the last price).
///
/// Either way `support <= last <= resistance`. Returns `None` for an empty series.
pub fn support_resistance(prices: &[f64], window: usize, fallback_spread: f64) -> Option<PriceLevels> {
    let &last = prices.last()?;
    let recent = &prices[prices.len().saturating_sub(window.max(1))..];

    let (low, high) = recent
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), &p| (low.min(p), high.max(p)));

    if high > low {
        return Some(PriceLevels { support: low, resistance: high });
    }

    let offset = last.abs() * fallback_spread.abs();
    tracing::debug!(last, window, fallback_spread, "No clear price range, using fallback spread");
    Some(PriceLevels { support: last - offset, resistance: last + offset })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_from_window_extrema() {
        let prices = [100.0, 102.0, 101.0, 105.0, 107.0, 104.0, 108.0, 110.0, 109.0, 112.0];
        let levels = support_resistance(&prices, 30, 0.02).unwrap();
        assert_eq!(levels, PriceLevels { support: 100.0, resistance: 112.0 });

        // Only the last three prices: 110, 109, 112
        let levels = support_resistance(&prices, 3, 0.02).unwrap();
        assert_eq!(levels, PriceLevels { support: 109.0, resistance: 112.0 });
    }

    #[test]
    fn test_levels_bracket_last_price() {
        let prices = [5.0, 9.0, 3.0, 7.0, 6.0];
        for window in 1..=6 {
            let levels = support_resistance(&prices, window, 0.02).unwrap();
            assert!(levels.support <= 6.0 && 6.0 <= levels.resistance, "window {}", window);
        }
    }

    #[test]
    fn test_flat_window_falls_back_to_spread() {
        let levels = support_resistance(&[100.0], 30, 0.02).unwrap();
        assert!((levels.support - 98.0).abs() < 1e-9);
        assert!((levels.resistance - 102.0).abs() < 1e-9);

        let levels = support_resistance(&[90.0, 50.0, 50.0], 2, 0.1).unwrap();
        assert!((levels.support - 45.0).abs() < 1e-9);
        assert!((levels.resistance - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_series_has_no_levels() {
        assert!(support_resistance(&[], 30, 0.02).is_none());
    }
}
