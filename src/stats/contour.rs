//! Iso-count contours over 2D histograms (marching squares).
//!
//! Sample points are the cell centers. A square is traced only when all four
//! corner cells are present, so a contour never bridges an empty region.

use crate::stats::density::Histogram2d;

/// A straight piece of a contour, in data coordinates.
pub type Segment = ((f64, f64), (f64, f64));

/// Contour line segments of `hist` at `level`.
pub fn contour_segments(hist: &Histogram2d, level: f64) -> Vec<Segment> {
    let xs = hist.x_centers();
    let ys = hist.y_centers();
    let mut out = Vec::new();

    if xs.len() < 2 || ys.len() < 2 {
        return out;
    }

    for ix in 0..xs.len() - 1 {
        for iy in 0..ys.len() - 1 {
            // Corners counter-clockwise from bottom-left.
            let corners = [
                hist.cell(ix, iy),
                hist.cell(ix + 1, iy),
                hist.cell(ix + 1, iy + 1),
                hist.cell(ix, iy + 1),
            ];
            let [Some(c0), Some(c1), Some(c2), Some(c3)] = corners else {
                continue;
            };
            let v = [c0 as f64, c1 as f64, c2 as f64, c3 as f64];
            let p = [
                (xs[ix], ys[iy]),
                (xs[ix + 1], ys[iy]),
                (xs[ix + 1], ys[iy + 1]),
                (xs[ix], ys[iy + 1]),
            ];
            trace_square(&v, &p, level, &mut out);
        }
    }

    out
}

fn trace_square(v: &[f64; 4], p: &[(f64, f64); 4], level: f64, out: &mut Vec<Segment>) {
    let above = |i: usize| v[i] >= level;
    let case = (0..4).fold(0u8, |acc, i| acc | ((above(i) as u8) << i));

    // Edge k joins corner k and corner (k + 1) % 4.
    let cross = |k: usize| {
        let (a, b) = (k, (k + 1) % 4);
        let t = (level - v[a]) / (v[b] - v[a]);
        (p[a].0 + t * (p[b].0 - p[a].0), p[a].1 + t * (p[b].1 - p[a].1))
    };

    let mut push = |e1: usize, e2: usize| out.push((cross(e1), cross(e2)));

    match case {
        0 | 15 => {}
        1 | 14 => push(3, 0),
        2 | 13 => push(0, 1),
        3 | 12 => push(3, 1),
        4 | 11 => push(1, 2),
        6 | 9 => push(0, 2),
        7 | 8 => push(2, 3),
        // Saddles: resolve with the square's mean value.
        5 | 10 => {
            let center_above = v.iter().sum::<f64>() / 4.0 >= level;
            if (case == 5) == center_above {
                push(0, 1);
                push(2, 3);
            } else {
                push(3, 0);
                push(1, 2);
            }
        }
        _ => unreachable!("marching squares case out of range"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::binning::AxisRange;

    fn grid(points: &[(f64, f64, usize)], bins: usize) -> Histogram2d {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for &(x, y, n) in points {
            for _ in 0..n {
                xs.push(x);
                ys.push(y);
            }
        }
        let r = AxisRange::new(0.0, bins as f64).unwrap();
        Histogram2d::new(&xs, &ys, r, r, bins, 0.5).unwrap()
    }

    #[test]
    fn single_peak_is_enclosed() {
        // 3x3 block fully populated, center cell dense.
        let mut pts = Vec::new();
        for ix in 0..3 {
            for iy in 0..3 {
                let n = if ix == 1 && iy == 1 { 10 } else { 1 };
                pts.push((ix as f64 + 0.5, iy as f64 + 0.5, n));
            }
        }
        let h = grid(&pts, 3);
        let segs = contour_segments(&h, 5.0);
        assert_eq!(segs.len(), 4);
        for ((x0, y0), (x1, y1)) in segs {
            for v in [x0, y0, x1, y1] {
                assert!((0.5..=2.5).contains(&v));
            }
        }
    }

    #[test]
    fn absent_cells_block_contours() {
        // Dense cell next to an empty one: no square has four present corners.
        let h = grid(&[(0.5, 0.5, 10), (1.5, 0.5, 1), (0.5, 1.5, 1)], 2);
        assert_eq!(h.cell(1, 1), None);
        assert!(contour_segments(&h, 5.0).is_empty());
    }

    #[test]
    fn level_above_all_counts_draws_nothing() {
        let pts = [(0.5, 0.5, 2), (1.5, 0.5, 2), (0.5, 1.5, 2), (1.5, 1.5, 2)];
        let h = grid(&pts, 2);
        assert!(contour_segments(&h, 100.0).is_empty());
    }

    #[test]
    fn crossing_is_interpolated() {
        let pts = [(0.5, 0.5, 1), (1.5, 0.5, 3), (0.5, 1.5, 1), (1.5, 1.5, 3)];
        let h = grid(&pts, 2);
        let segs = contour_segments(&h, 2.0);
        assert_eq!(segs.len(), 1);
        let ((x0, _), (x1, _)) = segs[0];
        assert!((x0 - 1.0).abs() < 1e-12);
        assert!((x1 - 1.0).abs() < 1e-12);
    }
}
