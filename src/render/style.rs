//! Colors, colormaps and shared drawing helpers.

use plotters::coord::Shift;
use plotters::coord::combinators::LogCoord;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

use crate::domain::Rgb;
use crate::stats::{AxisRange, Histogram2d};

pub const FONT: &str = "sans-serif";

/// Alpha of 2D histogram cells.
pub const HEATMAP_ALPHA: f64 = 0.7;

/// Chart with a logarithmic mass axis and a linear metallicity axis.
pub type LogMassCoord = Cartesian2d<LogCoord<f64>, RangedCoordf64>;

pub fn plot_color(rgb: Rgb) -> RGBColor {
    let (r, g, b) = rgb.to_u8();
    RGBColor(r, g, b)
}

/// Matplotlib's "Wistia" colormap (light yellow -> orange), `t` in `[0, 1]`.
pub fn wistia(t: f64) -> RGBColor {
    const STOPS: [(f64, [f64; 3]); 5] = [
        (0.00, [228.0, 255.0, 122.0]),
        (0.25, [255.0, 232.0, 26.0]),
        (0.50, [255.0, 189.0, 0.0]),
        (0.75, [255.0, 160.0, 0.0]),
        (1.00, [252.0, 127.0, 0.0]),
    ];

    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let hi = STOPS
        .iter()
        .position(|&(s, _)| s >= t)
        .unwrap_or(STOPS.len() - 1)
        .max(1);
    let (s0, c0) = STOPS[hi - 1];
    let (s1, c1) = STOPS[hi];
    let u = (t - s0) / (s1 - s0);
    let lerp = |i: usize| (c0[i] + u * (c1[i] - c0[i])).round() as u8;
    RGBColor(lerp(0), lerp(1), lerp(2))
}

/// Linear count normalization between the smallest and largest present cells.
#[derive(Debug, Clone, Copy)]
pub struct CountScale {
    pub min: f64,
    pub max: f64,
}

impl CountScale {
    pub fn of(hist: &Histogram2d) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (_, _, c) in hist.present_cells() {
            min = min.min(c as f64);
            max = max.max(c as f64);
        }
        if !min.is_finite() {
            return Self { min: 0.0, max: 1.0 };
        }
        Self { min, max }
    }

    pub fn normalize(&self, count: f64) -> f64 {
        if self.max > self.min {
            (count - self.min) / (self.max - self.min)
        } else {
            0.5
        }
    }
}

/// Bounds for a log-scaled mass axis.
///
/// Padded ranges can reach zero or below; the lower bound then falls back to a
/// fraction of the smallest positive mass.
pub fn log_mass_bounds(range: AxisRange, min_positive_mass: Option<f64>) -> (f64, f64) {
    let floor = min_positive_mass.map(|m| m * 0.8).unwrap_or(0.01);
    let lo = if range.lo > 0.0 { range.lo } else { floor };
    let hi = if range.hi > lo { range.hi } else { lo * 10.0 };
    (lo, hi)
}

/// Smallest strictly positive value, if any.
pub fn min_positive(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    values
        .into_iter()
        .filter(|v| v.is_finite() && *v > 0.0)
        .min_by(f64::total_cmp)
}

/// Fill every present cell of `hist`; absent cells stay blank.
pub fn draw_heatmap<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, LogMassCoord>,
    hist: &Histogram2d,
    x_floor: f64,
    scale: CountScale,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let xe = hist.x_edges();
    let ye = hist.y_edges();
    chart.draw_series(hist.present_cells().filter_map(|(ix, iy, count)| {
        let x1 = xe[ix + 1];
        if x1 <= x_floor {
            return None;
        }
        let x0 = xe[ix].max(x_floor);
        let color = wistia(scale.normalize(count as f64)).mix(HEATMAP_ALPHA);
        Some(Rectangle::new([(x0, ye[iy]), (x1, ye[iy + 1])], color.filled()))
    }))?;
    Ok(())
}

/// Vertical color bar for `scale`, labelled with counts.
pub fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scale: CountScale,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    const STEPS: usize = 64;
    let (lo, hi) = if scale.max > scale.min {
        (scale.min, scale.max)
    } else {
        (scale.min - 0.5, scale.min + 0.5)
    };

    let mut bar = ChartBuilder::on(area)
        .margin_top(20)
        .margin_bottom(45)
        .set_label_area_size(LabelAreaPosition::Right, 40)
        .build_cartesian_2d(0.0..1.0, lo..hi)?;

    bar.configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_label_formatter(&|v| format!("{v:.0}"))
        .label_style((FONT, 12))
        .draw()?;

    let step = (hi - lo) / STEPS as f64;
    bar.draw_series((0..STEPS).map(|i| {
        let y0 = lo + step * i as f64;
        let color = wistia((i as f64 + 0.5) / STEPS as f64).mix(HEATMAP_ALPHA);
        Rectangle::new([(0.0, y0), (1.0, y0 + step)], color.filled())
    }))?;
    Ok(())
}

/// Dashed vertical line from `y0` to `y1` at `x`, as path pieces.
pub fn dashed_vertical(
    x: f64,
    y0: f64,
    y1: f64,
    dashes: usize,
    style: ShapeStyle,
) -> Vec<PathElement<(f64, f64)>> {
    let n = dashes.max(1) * 2 - 1;
    let step = (y1 - y0) / n as f64;
    (0..n)
        .step_by(2)
        .map(|i| {
            let a = y0 + step * i as f64;
            PathElement::new(vec![(x, a), (x, a + step)], style)
        })
        .collect()
}
