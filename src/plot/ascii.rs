//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements (color-magnitude diagram, brightest stars on top):
//! - young stars: `y`
//! - middle-aged stars: `m`
//! - old stars: `o`
//!
//! Cohorts are drawn youngest first, so older stars win shared cells.

use crate::app::pipeline::RunOutput;
use crate::cohort::CohortPartition;
use crate::domain::{Cohort, StarRecord};
use crate::render::cmd::{COLOR_INDEX_RANGE, MAGNITUDE_RANGE};

/// Render the color-magnitude preview for a finished run.
pub fn render_cmd_preview(run: &RunOutput, width: usize, height: usize) -> String {
    render_cmd_grid(run.catalog.records(), &run.partition, width, height)
}

/// Render cohort members of `records` on a `width × height` grid.
///
/// Stars outside the figure-1 axis ranges are skipped.
pub fn render_cmd_grid(
    records: &[StarRecord],
    partition: &CohortPartition,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let (c_min, c_max) = COLOR_INDEX_RANGE;
    let (m_min, m_max) = MAGNITUDE_RANGE;

    let mut grid = vec![vec![' '; width]; height];

    for cohort in Cohort::ALL {
        for &i in partition.members(cohort) {
            let star = &records[i];
            let (c, m) = (star.color_index, star.absolute_magnitude);
            if !(c_min..=c_max).contains(&c) || !(m_min..=m_max).contains(&m) {
                continue;
            }
            let x = map_axis(c, c_min, c_max, width);
            // Brightest (smallest magnitude) maps to row 0.
            let y = map_axis(m, m_min, m_max, height);
            grid[y][x] = cohort.glyph();
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Preview: b-y=[{c_min:.2}, {c_max:.2}] | M_V=[{m_min:.2}, {m_max:.2}] (y/m/o = young/middle-aged/old)\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn map_axis(v: f64, min: f64, max: f64, cells: usize) -> usize {
    let cells = cells.max(2);
    let u = ((v - min) / (max - min)).clamp(0.0, 1.0);
    (u * (cells as f64 - 1.0)).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::partition_records;
    use crate::domain::AgeThresholds;

    fn star(color_index: f64, absolute_magnitude: f64, age: f64) -> StarRecord {
        StarRecord {
            absolute_magnitude,
            color_index,
            age,
            metallicity: -0.2,
            initial_mass: 1.0,
        }
    }

    #[test]
    fn preview_golden_snapshot_small() {
        let records = vec![
            star(-0.1, -4.1, 0.5),
            star(-0.1, -4.1, 5.0),
            star(0.34, 2.2, 2.0),
            star(1.0, 8.5, 0.2),
            star(2.0, 0.0, 5.0),
            star(0.34, 2.2, f64::NAN),
        ];
        let partition = partition_records(&records, AgeThresholds::default());

        let txt = render_cmd_grid(&records, &partition, 10, 5);
        let expected = concat!(
            "Preview: b-y=[-0.10, 1.00] | M_V=[-4.10, 8.50] (y/m/o = young/middle-aged/old)\n",
            "o         \n",
            "          \n",
            "    m     \n",
            "          \n",
            "         y\n",
        );
        assert_eq!(txt, expected);
    }
}
