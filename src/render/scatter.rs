//! Figure 3: initial mass (log) vs metallicity scatter, one marker per cohort.

use std::path::Path;

use plotters::prelude::*;

use crate::app::pipeline::RunOutput;
use crate::domain::{Cohort, MarkerShape};
use crate::render::DrawResult;
use crate::render::style::{FONT, log_mass_bounds, min_positive, plot_color};

const SIZE: (u32, u32) = (1100, 1000);

pub fn draw_mass_metallicity_scatter(run: &RunOutput, path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        "Scatter plot: Metallicity vs. Initial Mass of stars, grouped by age t.",
        (FONT, 24),
    )?;

    let (x0, x1) = log_mass_bounds(
        run.mass_range,
        min_positive(run.catalog.records().iter().map(|r| r.initial_mass)),
    );
    let (y0, y1) = (run.metallicity_range.lo, run.metallicity_range.hi);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((x0..x1).log_scale(), y0..y1)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("m_ini")
        .y_desc("M / H")
        .x_label_formatter(&|v| format!("{v:.1}"))
        .y_label_formatter(&|v| format!("{v:.1}"))
        .label_style((FONT, 14))
        .draw()?;

    let thresholds = run.partition.thresholds();
    for cohort in Cohort::ALL {
        let points: Vec<(f64, f64)> = run
            .partition
            .records(&run.catalog, cohort)
            .filter(|r| r.initial_mass >= x0)
            .map(|r| (r.initial_mass, r.metallicity))
            .collect();

        let color = plot_color(cohort.color());
        let style = color.mix(cohort.marker_alpha()).filled();
        let key = color.filled();
        let s = cohort.marker_size();
        let label = cohort.label(thresholds);

        match cohort.marker() {
            MarkerShape::Square => {
                let square = |p: (f64, f64)| {
                    EmptyElement::at(p) + Rectangle::new([(-s, -s), (s, s)], style)
                };
                chart
                    .draw_series(points.into_iter().map(square))?
                    .label(label)
                    .legend(move |(x, y)| Rectangle::new([(x + 1, y - 4), (x + 9, y + 4)], key));
            }
            MarkerShape::Circle => {
                chart
                    .draw_series(points.into_iter().map(|p| Circle::new(p, s, style)))?
                    .label(label)
                    .legend(move |(x, y)| Circle::new((x + 5, y), 4, key));
            }
            MarkerShape::Triangle => {
                let t = s + 1;
                chart
                    .draw_series(points.into_iter().map(|p| TriangleMarker::new(p, t, style)))?
                    .label(label)
                    .legend(move |(x, y)| TriangleMarker::new((x + 5, y), 5, key));
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font((FONT, 15))
        .draw()?;

    root.present()?;
    Ok(())
}
