//! Rolling averages and population normalisation.

/// Number of consecutive samples in the trailing window.
pub const ROLLING_WINDOW: usize = 7;

/// Scale applied to per-capita values.
pub const PER_MILLION: f64 = 1_000_000.0;

/// Trailing mean over `window` consecutive samples.
///
/// The first `window - 1` positions have no full window and yield `None`, as
/// does any window containing a missing sample.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            slice
                .iter()
                .try_fold(0.0, |acc, v| v.map(|x| acc + x))
                .map(|sum| sum / window as f64)
        })
        .collect()
}

/// Scale `value` to a per-million-inhabitants rate.
///
/// Undefined when either input is missing or the population is not positive.
pub fn per_million(value: Option<f64>, population: Option<f64>) -> Option<f64> {
    match (value, population) {
        (Some(v), Some(p)) if p > 0.0 => Some(v * PER_MILLION / p),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_mean_needs_full_window() {
        let values: Vec<Option<f64>> = (1..=9).map(|x| Some(x as f64)).collect();
        let means = rolling_mean(&values, ROLLING_WINDOW);
        assert_eq!(means.len(), 9);
        assert!(means[..6].iter().all(|m| m.is_none()));
        assert_eq!(means[6], Some(4.0)); // mean(1..=7)
        assert_eq!(means[7], Some(5.0));
        assert_eq!(means[8], Some(6.0));
    }

    #[test]
    fn test_rolling_mean_gap_poisons_window() {
        let mut values = vec![Some(7.0); 10];
        values[2] = None;
        let means = rolling_mean(&values, ROLLING_WINDOW);
        // windows ending at 6, 7 and 8 all contain index 2
        assert_eq!(means[6], None);
        assert_eq!(means[8], None);
        assert_eq!(means[9], Some(7.0));
    }

    #[test]
    fn test_rolling_mean_short_series() {
        let values = vec![Some(1.0); 3];
        assert_eq!(rolling_mean(&values, ROLLING_WINDOW), vec![None; 3]);
        assert!(rolling_mean(&[], ROLLING_WINDOW).is_empty());
        assert_eq!(rolling_mean(&values, 0), vec![None; 3]);
    }

    #[test]
    fn test_per_million() {
        assert_eq!(per_million(Some(10.0), Some(1_000_000.0)), Some(10.0));
        assert_eq!(per_million(Some(5.0), Some(50_000_000.0)), Some(0.1));
        assert_eq!(per_million(None, Some(1_000_000.0)), None);
        assert_eq!(per_million(Some(10.0), None), None);
        assert_eq!(per_million(Some(10.0), Some(0.0)), None);
    }
}
