//! PNG figures rendered with Plotters' bitmap backend.
//!
//! Every figure reads from the shared `RunOutput`; nothing here re-derives the
//! partition or the bins.
//!
//! | file          | figure                                           |
//! |---------------|--------------------------------------------------|
//! | `image_1.png` | color-magnitude diagram colored by age band      |
//! | `image_2.png` | metallicity frequency per cohort, mean + median  |
//! | `image_3.png` | initial mass vs metallicity scatter per cohort   |
//! | `image_4.png` | per-cohort mass × metallicity 2D histograms      |
//! | `image_5.png` | all-star 2D histogram with cohort contours       |

pub mod cmd;
pub mod contour;
pub mod density;
pub mod metallicity;
pub mod scatter;
pub mod style;

use std::path::{Path, PathBuf};

use crate::app::pipeline::RunOutput;
use crate::error::AppError;

pub type DrawResult = Result<(), Box<dyn std::error::Error>>;
/// Draws one figure into the PNG at the given path.
pub type DrawFn = fn(&RunOutput, &Path) -> DrawResult;

pub const FIGURE_COUNT: usize = 5;

/// Output file name of figure `n` (1-based).
pub fn figure_file_name(n: usize) -> String {
    format!("image_{n}.png")
}

/// Render all five figures into `out_dir`, creating it if needed.
pub fn render_all(run: &RunOutput, out_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let dir = out_dir.display();
    std::fs::create_dir_all(out_dir)
        .map_err(|e| AppError::io(format!("Failed to create output directory '{dir}': {e}")))?;

    let figures: [(&str, DrawFn); FIGURE_COUNT] = [
        ("color-magnitude diagram", cmd::draw_color_magnitude),
        ("metallicity histogram", metallicity::draw_metallicity_histogram),
        ("mass-metallicity scatter", scatter::draw_mass_metallicity_scatter),
        ("cohort density grids", density::draw_cohort_densities),
        ("density contours", contour::draw_density_contours),
    ];

    let mut written = Vec::with_capacity(FIGURE_COUNT);
    for (i, (name, draw)) in figures.into_iter().enumerate() {
        let path = out_dir.join(figure_file_name(i + 1));
        draw(run, &path).map_err(|e| {
            AppError::render(format!("Failed to render {name} '{}': {e}", path.display()))
        })?;
        log::info!("wrote {name} to '{}'", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::analyze;
    use crate::domain::{AGE_BAND_COUNT, Rgb, RunConfig, StarRecord};
    use crate::error::ErrorKind;
    use crate::io::{AgeBandTable, Catalog};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rand_distr::{Distribution, LogNormal, Normal};

    fn synthetic_run(n: usize) -> RunOutput {
        let mut rng = StdRng::seed_from_u64(7);
        let mass = LogNormal::new(0.0, 0.4).unwrap();
        let feh = Normal::new(-0.3, 0.3).unwrap();
        let records = (0..n)
            .map(|_| StarRecord {
                absolute_magnitude: rng.gen_range(-3.0..8.0),
                color_index: rng.gen_range(0.0..0.9),
                age: rng.gen_range(0.0..13.0),
                metallicity: feh.sample(&mut rng),
                initial_mass: mass.sample(&mut rng),
            })
            .collect();
        let colors = (0..AGE_BAND_COUNT)
            .map(|i| Rgb::from_u8((i * 7) as u8, 40, 255 - (i * 7) as u8))
            .collect();
        let bands = AgeBandTable::standard(colors).unwrap();
        let catalog = Catalog::from_records(records).unwrap();
        analyze(catalog, bands, &RunConfig::new("unused.dat")).unwrap()
    }

    #[test]
    fn figure_names_are_numbered_from_one() {
        assert_eq!(figure_file_name(1), "image_1.png");
        assert_eq!(figure_file_name(FIGURE_COUNT), "image_5.png");
    }

    #[test]
    fn unusable_output_dir_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let err = render_all(&synthetic_run(200), &blocker.join("figs")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn renders_all_five_images() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("figs");
        let written = render_all(&synthetic_run(2000), &out).unwrap();

        assert_eq!(written.len(), FIGURE_COUNT);
        for (i, path) in written.iter().enumerate() {
            assert_eq!(path, &out.join(figure_file_name(i + 1)));
            assert!(std::fs::metadata(path).unwrap().len() > 0);
        }
    }
}
