use serde::{Deserialize, Serialize};

pub struct Statistics;

/// Count, mean and range of a series. All zeros for an empty series.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl Statistics {
    /// Arithmetic mean; 0 for an empty slice.
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let mut sum = 0.0;
        for &v in values {
            sum += v;
        }
        sum / values.len() as f64
    }

    pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
        let first = *values.first()?;
        let mut min = first;
        let mut max = first;
        for &v in values.iter().skip(1) {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }

    pub fn summarize(values: &[f64]) -> Summary {
        let Some((min, max)) = Self::min_max(values) else {
            return Summary::default();
        };
        Summary {
            count: values.len(),
            mean: Self::mean(values),
            min,
            max,
        }
    }

    /// Mean of `f` over `items`; 0 when `items` is empty.
    pub fn mean_by<T>(items: &[T], f: impl Fn(&T) -> f64) -> f64 {
        let values: Vec<f64> = items.iter().map(f).collect();
        Self::mean(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::{Statistics, Summary};

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {a} ~= {b}");
    }

    #[test]
    fn mean_works() {
        assert_close(Statistics::mean(&[1.0, 2.0, 3.0]), 2.0);
    }

    #[test]
    fn empty_series_is_all_zero() {
        assert_eq!(Statistics::mean(&[]), 0.0);
        assert_eq!(Statistics::min_max(&[]), None);
        assert_eq!(Statistics::summarize(&[]), Summary::default());
    }

    #[test]
    fn summarize_tracks_range() {
        let s = Statistics::summarize(&[12.5, -3.0, 30.0, 8.5]);
        assert_eq!(s.count, 4);
        assert_close(s.mean, 12.0);
        assert_eq!(s.min, -3.0);
        assert_eq!(s.max, 30.0);
    }

    #[test]
    fn mean_by_projects_field() {
        let pairs = [(1, 4.0), (2, 6.0)];
        assert_close(Statistics::mean_by(&pairs, |p| p.1), 5.0);
        let none: [(i32, f64); 0] = [];
        assert_eq!(Statistics::mean_by(&none, |p| p.1), 0.0);
    }
}
