//! Figure 1: color-magnitude diagram colored by age band.

use std::path::Path;

use plotters::prelude::*;

use crate::app::pipeline::RunOutput;
use crate::render::DrawResult;
use crate::render::style::{FONT, plot_color};

pub const COLOR_INDEX_RANGE: (f64, f64) = (-0.1, 1.0);
/// Brightest and faintest magnitude on the y axis (brightest at the top).
pub const MAGNITUDE_RANGE: (f64, f64) = (-4.1, 8.5);

const SIZE: (u32, u32) = (1400, 1100);

/// Stars grouped by age-band index, as (color index, -magnitude) points.
///
/// Stars whose age falls outside the band table are not drawn. The magnitude
/// axis is flipped by plotting `-M_V`; tick labels undo the sign.
pub fn band_points(run: &RunOutput) -> Vec<Vec<(f64, f64)>> {
    let mut groups = vec![Vec::new(); run.bands.len()];
    for star in run.catalog.records() {
        if let Some(i) = run.bands.band_index(star.age) {
            groups[i].push((star.color_index, -star.absolute_magnitude));
        }
    }
    groups
}

pub fn draw_color_magnitude(run: &RunOutput, path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        "Colour coded scatter plot: stars' Colour vs. Magnitude.",
        (FONT, 30),
    )?;

    let (faint, bright) = (MAGNITUDE_RANGE.1, MAGNITUDE_RANGE.0);
    let mut chart = ChartBuilder::on(&root)
        .caption("Colours codify the age of the stars.", (FONT, 20))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(COLOR_INDEX_RANGE.0..COLOR_INDEX_RANGE.1, -faint..-bright)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("b-y")
        .y_desc("M_V")
        .x_label_formatter(&|v| format!("{v:.1}"))
        .y_label_formatter(&|v| format!("{:.0}", -v + 0.0))
        .label_style((FONT, 16))
        .draw()?;

    for (band, points) in run.bands.bands().iter().zip(band_points(run)) {
        let color = plot_color(band.color);
        // Empty bands still get a legend entry.
        chart
            .draw_series(points.iter().map(|&p| Circle::new(p, 3, color.filled())))?
            .label(band.label())
            .legend(move |(x, y)| Circle::new((x + 6, y), 4, color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font((FONT, 12))
        .draw()?;

    root.present()?;
    Ok(())
}
