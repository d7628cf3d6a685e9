//! Catalog ingest.
//!
//! Turns a whitespace-delimited stellar catalog into an ordered list of
//! `StarRecord`s.
//!
//! Design goals:
//! - **Strict parsing**: one bad row aborts the whole load (no partial catalogs)
//! - **Fixed schema**: required columns are positional constants from `domain`
//! - **Deterministic behavior**: records keep file order

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::domain::{
    COL_ABSOLUTE_MAGNITUDE, COL_AGE, COL_COLOR_INDEX, COL_INITIAL_MASS, COL_METALLICITY, StarRecord,
};
use crate::error::AppError;

/// Columns the loader needs, with names used in error messages.
const REQUIRED_COLUMNS: [(usize, &str); 5] = [
    (COL_INITIAL_MASS, "initial mass"),
    (COL_METALLICITY, "metallicity"),
    (COL_ABSOLUTE_MAGNITUDE, "absolute magnitude"),
    (COL_COLOR_INDEX, "color index"),
    (COL_AGE, "age"),
];

/// Observed ranges of the loaded columns (finite values only).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogStats {
    pub n_records: usize,
    pub color_min: f64,
    pub color_max: f64,
    pub magnitude_min: f64,
    pub magnitude_max: f64,
    pub mass_min: f64,
    pub mass_max: f64,
    pub metallicity_min: f64,
    pub metallicity_max: f64,
    pub age_min: f64,
    pub age_max: f64,
}

/// The loaded catalog. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<StarRecord>,
    stats: CatalogStats,
}

impl Catalog {
    /// Build a catalog from records already in memory.
    pub fn from_records(records: Vec<StarRecord>) -> Result<Self, AppError> {
        let stats = compute_stats(&records)
            .ok_or_else(|| AppError::malformed("Catalog contains no usable records."))?;
        Ok(Self { records, stats })
    }

    pub fn records(&self) -> &[StarRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> &CatalogStats {
        &self.stats
    }

    /// Records at the given catalog indices, in index order.
    pub fn select<'a>(
        &'a self,
        indices: &'a [usize],
    ) -> impl Iterator<Item = &'a StarRecord> + 'a {
        indices.iter().map(move |&i| &self.records[i])
    }
}

/// Load the catalog at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog, AppError> {
    let file = File::open(path).map_err(|e| AppError::from_open("catalog", path, e))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut expected_columns: Option<usize> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| {
            AppError::malformed(format!(
                "Failed to read catalog '{}' at line {line_no}: {e}",
                path.display()
            ))
        })?;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        match expected_columns {
            None => expected_columns = Some(fields.len()),
            Some(n) if n != fields.len() => {
                return Err(AppError::malformed(format!(
                    "Line {line_no}: expected {n} columns, found {}.",
                    fields.len()
                )));
            }
            Some(_) => {}
        }

        records.push(parse_row(&fields, line_no)?);
    }

    if records.is_empty() {
        return Err(AppError::malformed(format!(
            "Catalog '{}' contains no data rows.",
            path.display()
        )));
    }

    let catalog = Catalog::from_records(records)?;
    log::info!("loaded {} stars from '{}'", catalog.len(), path.display());
    Ok(catalog)
}

fn parse_row(fields: &[&str], line_no: usize) -> Result<StarRecord, AppError> {
    let mut values = [0.0f64; REQUIRED_COLUMNS.len()];
    for (slot, &(col, name)) in values.iter_mut().zip(REQUIRED_COLUMNS.iter()) {
        let raw = fields.get(col).ok_or_else(|| {
            AppError::malformed(format!(
                "Line {line_no}: missing column {col} ({name}); row has {} columns.",
                fields.len()
            ))
        })?;
        *slot = raw.parse::<f64>().map_err(|_| {
            AppError::malformed(format!(
                "Line {line_no}: non-numeric value '{raw}' in column {col} ({name})."
            ))
        })?;
    }

    let [initial_mass, metallicity, absolute_magnitude, color_index, age] = values;
    Ok(StarRecord {
        absolute_magnitude,
        color_index,
        age,
        metallicity,
        initial_mass,
    })
}

fn compute_stats(records: &[StarRecord]) -> Option<CatalogStats> {
    fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
        let widen = |(lo, hi): (f64, f64), v: f64| (lo.min(v), hi.max(v));
        let (lo, hi) = values
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), widen);
        if lo.is_finite() && hi.is_finite() {
            Some((lo, hi))
        } else {
            None
        }
    }

    let (color_min, color_max) = range(records.iter().map(|r| r.color_index))?;
    let (magnitude_min, magnitude_max) = range(records.iter().map(|r| r.absolute_magnitude))?;
    let (mass_min, mass_max) = range(records.iter().map(|r| r.initial_mass))?;
    let (metallicity_min, metallicity_max) = range(records.iter().map(|r| r.metallicity))?;
    let (age_min, age_max) = range(records.iter().map(|r| r.age))?;

    Some(CatalogStats {
        n_records: records.len(),
        color_min,
        color_max,
        magnitude_min,
        magnitude_max,
        mass_min,
        mass_max,
        metallicity_min,
        metallicity_max,
        age_min,
        age_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    fn row(mass: f64, feh: f64, mv: f64, by: f64, age: f64) -> String {
        // 13 columns; unused ones carry filler values.
        format!("{mass} {feh} 0 0 {mv} 0 0 0 {by} 0 0 0 {age}")
    }

    fn write_catalog(lines: &[String]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[test]
    fn loads_required_columns_in_file_order() {
        let file = write_catalog(&[
            "# m_ini MsuH c2 c3 M_V c5 c6 c7 b-y c9 c10 c11 age".to_string(),
            row(1.2, -0.3, 4.5, 0.4, 2.0),
            String::new(),
            row(0.8, 0.1, 6.0, 0.6, 9.5),
        ]);

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);

        let first = catalog.records()[0];
        assert_eq!(first.initial_mass, 1.2);
        assert_eq!(first.metallicity, -0.3);
        assert_eq!(first.absolute_magnitude, 4.5);
        assert_eq!(first.color_index, 0.4);
        assert_eq!(first.age, 2.0);
        assert_eq!(catalog.records()[1].age, 9.5);

        let stats = catalog.stats();
        assert_eq!(stats.mass_min, 0.8);
        assert_eq!(stats.mass_max, 1.2);
        assert_eq!(stats.metallicity_min, -0.3);
        assert_eq!(stats.metallicity_max, 0.1);
    }

    #[test]
    fn non_numeric_value_aborts_load() {
        let file = write_catalog(&[
            row(1.0, 0.0, 4.0, 0.3, 1.0),
            "1.0 abc 0 0 4.0 0 0 0 0.3 0 0 0 1.0".to_string(),
        ]);
        let err = load_catalog(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.to_string().contains("Line 2"));
        assert!(err.to_string().contains("metallicity"));
    }

    #[test]
    fn ragged_rows_abort_load() {
        let file = write_catalog(&[
            row(1.0, 0.0, 4.0, 0.3, 1.0),
            format!("{} 7", row(1.0, 0.0, 4.0, 0.3, 1.0)),
        ]);
        let err = load_catalog(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn short_rows_abort_load() {
        let file = write_catalog(&["1.0 0.0 0 0 4.0".to_string()]);
        let err = load_catalog(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.to_string().contains("color index"));
    }

    #[test]
    fn header_only_file_is_malformed() {
        let file = write_catalog(&["# nothing here".to_string()]);
        let err = load_catalog(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(&dir.path().join("nope.dat")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
    }

    #[test]
    fn nan_age_is_kept_but_ignored_by_stats() {
        let file = write_catalog(&[
            row(1.0, 0.0, 4.0, 0.3, 1.0),
            row(1.1, 0.2, 4.1, 0.35, f64::NAN),
        ]);
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.records()[1].age.is_nan());
        assert_eq!(catalog.stats().age_max, 1.0);
    }
}
