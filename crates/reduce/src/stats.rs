//! Statistical helper functions.

/// Arithmetic mean of a slice. Returns NaN if empty.
#[cfg(test)]
pub(crate) fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Mean of the non-NaN values. Returns NaN if every value is NaN or the
/// input is empty.
pub(crate) fn nan_mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { f64::NAN } else { sum / n as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_empty() {
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_nan_mean_skips_nan() {
        assert_relative_eq!(nan_mean([1.0, f64::NAN, 3.0]), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nan_mean_all_nan() {
        assert!(nan_mean([f64::NAN, f64::NAN]).is_nan());
        assert!(nan_mean(std::iter::empty()).is_nan());
    }
}
