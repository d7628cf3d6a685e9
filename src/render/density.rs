//! Figure 4: per-cohort mass × metallicity 2D histograms, side by side.

use std::path::Path;

use plotters::prelude::*;

use crate::app::pipeline::RunOutput;
use crate::domain::Cohort;
use crate::render::DrawResult;
use crate::render::style::{
    CountScale, FONT, draw_colorbar, draw_heatmap, log_mass_bounds, min_positive,
};
use crate::stats::AxisRange;

const SIZE: (u32, u32) = (1950, 640);
const COLORBAR_WIDTH: u32 = 70;

pub fn draw_cohort_densities(run: &RunOutput, path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        "2D histogram comparison: Metallicity vs. Initial Mass of stars, grouped by age t (Gyr)",
        (FONT, 24),
    )?;

    let thresholds = run.partition.thresholds();
    let panels = root.split_evenly((1, Cohort::ALL.len()));
    for (panel, cohort) in panels.iter().zip(Cohort::ALL) {
        let hist = run.density_of(cohort);
        let scale = CountScale::of(hist);

        let width = panel.dim_in_pixel().0;
        let (plot_area, bar_area) = panel.split_horizontally(width.saturating_sub(COLORBAR_WIDTH));

        let xe = hist.x_edges();
        let ye = hist.y_edges();
        let mass_range = AxisRange {
            lo: xe[0],
            hi: xe[xe.len() - 1],
        };
        let masses = run
            .partition
            .records(&run.catalog, cohort)
            .map(|r| r.initial_mass);
        let (x0, x1) = log_mass_bounds(mass_range, min_positive(masses));

        let mut chart = ChartBuilder::on(&plot_area)
            .caption(cohort.label(thresholds), (FONT, 20))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d((x0..x1).log_scale(), ye[0]..ye[ye.len() - 1])?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("m_ini")
            .y_desc("M / H")
            .x_label_formatter(&|v| format!("{v:.1}"))
            .y_label_formatter(&|v| format!("{v:.1}"))
            .label_style((FONT, 13))
            .draw()?;

        draw_heatmap(&mut chart, hist, x0, scale)?;
        draw_colorbar(&bar_area, scale)?;
    }

    root.present()?;
    Ok(())
}
