// Numeric helpers shared across the engine and any presentation code.

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Root mean square, `sqrt(Σv² / n)`. `None` for an empty slice.
///
/// Values are scaled by the largest magnitude before squaring, so any finite
/// input gives a finite result.
pub fn root_mean_square(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return Some(0.0);
    }
    let mean_square = values.iter().map(|v| (v / scale).powi(2)).sum::<f64>() / values.len() as f64;
    Some(scale * mean_square.sqrt())
}
