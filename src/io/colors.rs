//! Age-band color table.
//!
//! The color file holds one `r,g,b` triple (integers 0–255) per line. Colors
//! are paired positionally with `AGE_BAND_EDGES` to form the 35 bands used by
//! the color-magnitude diagram.

use std::fs::File;
use std::path::Path;

use crate::domain::{AGE_BAND_COUNT, AGE_BAND_EDGES, AgeColorBand, Rgb};
use crate::error::AppError;

/// Ordered, contiguous age bands with their colors.
#[derive(Debug, Clone)]
pub struct AgeBandTable {
    bands: Vec<AgeColorBand>,
}

impl AgeBandTable {
    /// Pair `edges` (N+1 ascending values) with `colors` (N entries).
    pub fn new(edges: &[f64], colors: Vec<Rgb>) -> Result<Self, AppError> {
        if edges.len() != colors.len() + 1 {
            return Err(AppError::config(format!(
                "Age band table needs {} colors for {} edges, got {}.",
                edges.len().saturating_sub(1),
                edges.len(),
                colors.len()
            )));
        }
        if !edges.windows(2).all(|w| w[0] < w[1]) {
            return Err(AppError::config("Age band edges must be strictly ascending."));
        }

        let bands = edges
            .windows(2)
            .zip(colors)
            .map(|(w, color)| AgeColorBand {
                lower: w[0],
                upper: w[1],
                color,
            })
            .collect();
        Ok(Self { bands })
    }

    /// Standard 35-band table over `[0, 13.56)` Gyr.
    pub fn standard(colors: Vec<Rgb>) -> Result<Self, AppError> {
        Self::new(&AGE_BAND_EDGES, colors)
    }

    pub fn bands(&self) -> &[AgeColorBand] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Index of the band containing `age`.
    ///
    /// Bands are half-open. Ages below the first edge, at or above the last
    /// edge, or non-finite have no band.
    pub fn band_index(&self, age: f64) -> Option<usize> {
        let (first, last) = (self.bands.first()?, self.bands.last()?);
        if !(first.lower..last.upper).contains(&age) {
            return None;
        }
        // Number of bands whose upper edge is <= age.
        Some(self.bands.partition_point(|b| b.upper <= age))
    }

    pub fn covers(&self, age: f64) -> bool {
        self.band_index(age).is_some()
    }
}

/// Read RGB triples from `path`, normalized to `[0, 1]`.
pub fn load_colors(path: &Path) -> Result<Vec<Rgb>, AppError> {
    let file = File::open(path).map_err(|e| AppError::from_open("color file", path, e))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut colors = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            AppError::malformed(format!("Failed to read color file '{}': {e}", path.display()))
        })?;
        // csv reports 1-based line numbers via the record position.
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        if record.len() != 3 {
            return Err(AppError::malformed(format!(
                "Color file line {line}: expected 3 comma-separated values, found {}.",
                record.len()
            )));
        }

        let mut channels = [0u8; 3];
        for (slot, raw) in channels.iter_mut().zip(record.iter()) {
            *slot = raw.parse::<u8>().map_err(|_| {
                AppError::malformed(format!(
                    "Color file line {line}: '{raw}' is not an integer in 0..=255."
                ))
            })?;
        }
        colors.push(Rgb::from_u8(channels[0], channels[1], channels[2]));
    }

    log::info!(
        "loaded {} band colors from '{}'",
        colors.len(),
        path.display()
    );
    Ok(colors)
}

/// Load the color file and build the standard age-band table.
pub fn load_age_band_table(path: &Path) -> Result<AgeBandTable, AppError> {
    let colors = load_colors(path)?;
    if colors.len() != AGE_BAND_COUNT {
        return Err(AppError::config(format!(
            "Color file '{}' has {} colors; exactly {AGE_BAND_COUNT} are required (one per age band).",
            path.display(),
            colors.len()
        )));
    }
    AgeBandTable::standard(colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    fn color_file(n: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for i in 0..n {
            writeln!(file, "{}, {}, {}", i * 7 % 256, 255 - i, 10).unwrap();
        }
        file
    }

    #[test]
    fn standard_table_is_contiguous_and_ascending() {
        let file = color_file(35);
        let table = load_age_band_table(file.path()).unwrap();
        assert_eq!(table.len(), 35);

        let bands = table.bands();
        assert_eq!(bands[0].lower, 0.0);
        assert_eq!(bands[34].upper, 13.56);
        for pair in bands.windows(2) {
            assert!(pair[0].lower < pair[0].upper);
            assert_eq!(pair[0].upper, pair[1].lower);
        }
    }

    #[test]
    fn colors_are_normalized() {
        let file = color_file(35);
        let table = load_age_band_table(file.path()).unwrap();
        let c = table.bands()[1].color;
        assert!((c.r - 7.0 / 255.0).abs() < 1e-12);
        assert!((c.g - 254.0 / 255.0).abs() < 1e-12);
        assert!((c.b - 10.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn wrong_color_count_is_a_configuration_error() {
        for n in [34, 36] {
            let file = color_file(n);
            let err = load_age_band_table(file.path()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "n={n}");
        }
    }

    #[test]
    fn out_of_range_channel_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "10,20,300").unwrap();
        let err = load_colors(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn band_lookup_is_half_open() {
        let file = color_file(35);
        let table = load_age_band_table(file.path()).unwrap();
        assert_eq!(table.band_index(0.0), Some(0));
        assert_eq!(table.band_index(0.049), Some(0));
        assert_eq!(table.band_index(0.05), Some(1));
        assert_eq!(table.band_index(13.55), Some(34));
        assert!(table.covers(13.55));
    }

    #[test]
    fn ages_outside_the_table_have_no_band() {
        let file = color_file(35);
        let table = load_age_band_table(file.path()).unwrap();
        for age in [-1.0, -0.001, 13.56, 20.0, f64::NAN, f64::INFINITY] {
            assert_eq!(table.band_index(age), None, "age={age}");
            assert!(!table.covers(age), "age={age}");
        }
    }

    #[test]
    fn unordered_edges_are_a_configuration_error() {
        let colors = vec![Rgb::from_u8(0, 0, 0); 2];
        for edges in [[0.0, 1.0, 1.0], [0.0, 2.0, 1.0], [0.0, f64::NAN, 1.0]] {
            let err = AgeBandTable::new(&edges, colors.clone()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "edges={edges:?}");
        }
    }
}
