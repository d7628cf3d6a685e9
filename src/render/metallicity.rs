//! Figure 2: metallicity relative-frequency histograms per cohort.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::app::pipeline::RunOutput;
use crate::domain::Cohort;
use crate::render::DrawResult;
use crate::render::style::{FONT, dashed_vertical, plot_color};
use crate::stats::RelativeHistogram;

const SIZE: (u32, u32) = (1400, 900);
const FILL_ALPHA: f64 = 0.25;
/// Headroom above the tallest bar for the value annotations.
const Y_HEADROOM: f64 = 1.25;

/// Outline of a step histogram, starting and ending on the baseline.
pub fn step_outline(hist: &RelativeHistogram) -> Vec<(f64, f64)> {
    let mut pts = Vec::with_capacity(2 * hist.n_bins() + 2);
    pts.push((hist.edges[0], 0.0));
    for (w, &f) in hist.edges.windows(2).zip(&hist.frequencies) {
        pts.push((w[0], f));
        pts.push((w[1], f));
    }
    if let Some(&last) = hist.edges.last() {
        pts.push((last, 0.0));
    }
    pts
}

pub fn draw_metallicity_histogram(run: &RunOutput, path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        "Histograms: Number of stars (relative freq.) vs Metallicity of stars, grouped by age t.",
        (FONT, 26),
    )?;

    let edges = &run.metallicity_edges;
    let (x0, x1) = (edges[0], edges[edges.len() - 1]);
    let tallest = Cohort::ALL
        .iter()
        .map(|&c| run.metallicity_of(c).histogram.max_frequency())
        .fold(0.0_f64, f64::max);
    let y_max = tallest.max(1e-3) * Y_HEADROOM;

    let mut chart = ChartBuilder::on(&root)
        .caption("Metallicity frequency by stars age t (Gyr)", (FONT, 20))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("M / H")
        .y_desc("f")
        .x_labels(edges.len())
        .x_label_formatter(&|v| format!("{v:.1}"))
        .y_label_formatter(&|v| format!("{v:.2}"))
        .label_style((FONT, 14))
        .draw()?;

    let thresholds = run.partition.thresholds();
    for (i, cohort) in Cohort::ALL.into_iter().enumerate() {
        let m = run.metallicity_of(cohort);
        let hist = &m.histogram;
        let color = plot_color(cohort.color());
        let fill = color.mix(FILL_ALPHA).filled();
        let swatch = color.mix(0.5).filled();
        let line = color.stroke_width(2);

        let bars = hist.edges.windows(2).zip(&hist.frequencies);
        chart.draw_series(bars.map(|(w, &f)| Rectangle::new([(w[0], 0.0), (w[1], f)], fill)))?;
        chart
            .draw_series(LineSeries::new(step_outline(hist), line))?
            .label(cohort.label(thresholds))
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 20, y + 6)], swatch));

        chart.draw_series(LineSeries::new([(m.mean, 0.0), (m.mean, y_max)], line))?;
        chart.draw_series(dashed_vertical(m.median, 0.0, y_max, 24, line))?;

        // Mean to the left of its line, median to the right, one row per cohort.
        let y_text = y_max * (0.95 - 0.05 * i as f64);
        let font = (FONT, 16).into_font().color(&color);
        chart.draw_series([
            Text::new(
                format!("{:.2} ", m.mean),
                (m.mean, y_text),
                font.pos(Pos::new(HPos::Right, VPos::Center)),
            ),
            Text::new(
                format!(" {:.2}", m.median),
                (m.median, y_text),
                font.pos(Pos::new(HPos::Left, VPos::Center)),
            ),
        ])?;
    }

    // Legend-only entries for the line styles.
    chart
        .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
        .label("mean value")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));
    chart
        .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
        .label("median value")
        .legend(|(x, y)| {
            EmptyElement::at((x, y))
                + PathElement::new(vec![(0, 0), (6, 0)], BLACK.stroke_width(2))
                + PathElement::new(vec![(10, 0), (16, 0)], BLACK.stroke_width(2))
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font((FONT, 15))
        .draw()?;

    root.present()?;
    Ok(())
}
