//! Figure 5: all-star 2D histogram with one iso-count contour per cohort.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::app::pipeline::RunOutput;
use crate::domain::Cohort;
use crate::render::DrawResult;
use crate::render::style::{
    CountScale, FONT, draw_colorbar, draw_heatmap, log_mass_bounds, min_positive, plot_color,
};
use crate::stats::{AxisRange, Segment, contour_segments};

const SIZE: (u32, u32) = (1150, 1000);
const COLORBAR_WIDTH: u32 = 80;
const CONTOUR_ALPHA: f64 = 0.8;

/// Where to put a contour's level label: the midpoint of its middle segment.
pub fn label_anchor(segments: &[Segment]) -> Option<(f64, f64)> {
    let ((ax, ay), (bx, by)) = *segments.get(segments.len() / 2)?;
    Some(((ax + bx) / 2.0, (ay + by) / 2.0))
}

pub fn draw_density_contours(run: &RunOutput, path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Metallicity vs. Initial Mass of stars", (FONT, 26))?;

    let width = root.dim_in_pixel().0;
    let (plot_area, bar_area) = root.split_horizontally(width.saturating_sub(COLORBAR_WIDTH));

    let hist = &run.overlay.all;
    let scale = CountScale::of(hist);
    let xe = hist.x_edges();
    let ye = hist.y_edges();
    let (x0, x1) = log_mass_bounds(
        AxisRange {
            lo: xe[0],
            hi: xe[xe.len() - 1],
        },
        min_positive(run.catalog.records().iter().map(|r| r.initial_mass)),
    );

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(
            "The histogram refers to all stars. Each contour refers to an age group.",
            (FONT, 17),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((x0..x1).log_scale(), ye[0]..ye[ye.len() - 1])?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("m_ini")
        .y_desc("M / H")
        .x_label_formatter(&|v| format!("{v:.1}"))
        .y_label_formatter(&|v| format!("{v:.1}"))
        .label_style((FONT, 14))
        .draw()?;

    draw_heatmap(&mut chart, hist, x0, scale)?;

    let thresholds = run.partition.thresholds();
    for cohort in Cohort::ALL {
        let level = cohort.contour_level();
        let segments: Vec<Segment> = contour_segments(run.overlay.cohort(cohort), level)
            .into_iter()
            .filter(|((ax, _), (bx, _))| *ax >= x0 && *bx >= x0)
            .collect();
        log::debug!(
            "{} contour at {level}: {} segment(s)",
            cohort.label(thresholds),
            segments.len()
        );

        let color = plot_color(cohort.color());
        let stroke = color.mix(CONTOUR_ALPHA).stroke_width(2);
        let key = color.stroke_width(3);
        let path = |&(a, b): &Segment| PathElement::new(vec![a, b], stroke);
        chart
            .draw_series(segments.iter().map(path))?
            .label(cohort.label(thresholds))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], key));

        if let Some(anchor) = label_anchor(&segments) {
            let font = (FONT, 14)
                .into_font()
                .color(&color)
                .pos(Pos::new(HPos::Center, VPos::Center));
            let text = Text::new(format!("{level:.0}"), anchor, font);
            chart.draw_series(std::iter::once(text))?;
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font((FONT, 15))
        .draw()?;

    draw_colorbar(&bar_area, scale)?;

    root.present()?;
    Ok(())
}
