//! Axis ranges and bin edges.
//!
//! All axis bounds snap to a 0.1 grid: minima round down, maxima round up, so
//! bins always cover the observed data on a consistent decimal grid.

use crate::error::AppError;

/// Grid step used when rounding axis bounds.
pub const ROUND_STEP: f64 = 0.1;

/// `x` rounded down to the 0.1 grid.
pub fn round_down_tenth(x: f64) -> f64 {
    (x * 10.0).floor() / 10.0
}

/// `x` rounded up to the 0.1 grid.
pub fn round_up_tenth(x: f64) -> f64 {
    (x * 10.0).ceil() / 10.0
}

/// A closed interval `[lo, hi]` on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub lo: f64,
    pub hi: f64,
}

impl AxisRange {
    pub fn new(lo: f64, hi: f64) -> Result<Self, AppError> {
        if !(lo.is_finite() && hi.is_finite()) || hi < lo {
            return Err(AppError::config(format!(
                "Invalid axis range [{lo}, {hi}] (must be finite with lo <= hi)."
            )));
        }
        Ok(Self { lo, hi })
    }

    /// Range spanning `values` rounded outward to the 0.1 grid.
    ///
    /// Returns `None` when `values` holds no finite number. A single repeated
    /// value that already sits on the grid is widened by one step so the range
    /// never collapses.
    pub fn rounded_from(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let widen = |(lo, hi): (f64, f64), v: f64| (lo.min(v), hi.max(v));
        let (min, max) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), widen);
        if !(min.is_finite() && max.is_finite()) {
            return None;
        }
        let lo = round_down_tenth(min);
        let mut hi = round_up_tenth(max);
        if hi <= lo {
            hi = lo + ROUND_STEP;
        }
        Some(Self { lo, hi })
    }

    /// Range widened by `pad` on both sides.
    pub fn padded(self, pad: f64) -> Self {
        Self {
            lo: self.lo - pad,
            hi: self.hi + pad,
        }
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// `n_bins + 1` evenly spaced edges from `lo` to `hi`.
    pub fn edges(&self, n_bins: usize) -> Result<Vec<f64>, AppError> {
        linspace(self.lo, self.hi, n_bins + 1)
    }
}

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
pub fn linspace(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(min.is_finite() && max.is_finite() && max > min) {
        return Err(AppError::config(format!(
            "Invalid bin range: min={min}, max={max} (must be finite and max>min)."
        )));
    }
    if steps < 2 {
        return Err(AppError::config("Bin edge count must be >= 2."));
    }

    let step = (max - min) / (steps as f64 - 1.0);
    let mut out: Vec<f64> = (0..steps).map(|i| min + step * i as f64).collect();
    // Pin the last edge so the closed upper bin includes `max` exactly.
    out[steps - 1] = max;
    Ok(out)
}

/// Bin containing `value` for ascending `edges`.
///
/// Bins are half-open `[e_i, e_{i+1})` except the last, which also includes
/// its upper edge. Values outside the edges (and NaN) fall in no bin.
pub fn bin_index(edges: &[f64], value: f64) -> Option<usize> {
    let (first, last) = (*edges.first()?, *edges.last()?);
    if edges.len() < 2 || !(first..=last).contains(&value) {
        return None;
    }
    if value == last {
        return Some(edges.len() - 2);
    }
    // Number of edges <= value, minus one.
    Some(edges.partition_point(|&e| e <= value) - 1)
}

/// Centers of the bins defined by `edges`.
pub fn bin_centers(edges: &[f64]) -> Vec<f64> {
    edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_snaps_outward() {
        assert!((round_down_tenth(-1.234) - -1.3).abs() < 1e-12);
        assert!((round_up_tenth(0.456) - 0.5).abs() < 1e-12);
        assert!((round_down_tenth(0.3) - 0.3).abs() < 1e-12);
        assert!((round_up_tenth(-0.01) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn rounded_range_covers_values() {
        let r = AxisRange::rounded_from([-1.97, 0.42, -0.5]).unwrap();
        assert!((r.lo - -2.0).abs() < 1e-12);
        assert!((r.hi - 0.5).abs() < 1e-12);

        let single = AxisRange::rounded_from([0.2, 0.2]).unwrap();
        assert!(single.hi > single.lo);

        assert!(AxisRange::rounded_from([f64::NAN]).is_none());
    }

    #[test]
    fn linspace_includes_endpoints() {
        let v = linspace(-2.0, 0.7, 28).unwrap();
        assert_eq!(v.len(), 28);
        assert!((v[0] - -2.0).abs() < 1e-12);
        assert_eq!(v[27], 0.7);
        assert!((v[1] - v[0] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn bin_index_matches_numpy_edges() {
        let edges = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(bin_index(&edges, 0.0), Some(0));
        assert_eq!(bin_index(&edges, 0.999), Some(0));
        assert_eq!(bin_index(&edges, 1.0), Some(1));
        assert_eq!(bin_index(&edges, 3.0), Some(2));
        assert_eq!(bin_index(&edges, 3.0001), None);
        assert_eq!(bin_index(&edges, -0.1), None);
        assert_eq!(bin_index(&edges, f64::NAN), None);
    }

    #[test]
    fn centers_sit_between_edges() {
        assert_eq!(bin_centers(&[0.0, 1.0, 3.0]), vec![0.5, 2.0]);
    }
}
