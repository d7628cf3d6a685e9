//! Age-cohort partitioning.
//!
//! The partition stores catalog indices, so record identity is preserved and
//! every figure can pull the exact same member sets out of the catalog.

use crate::domain::{AgeThresholds, Cohort, StarRecord};
use crate::error::AppError;
use crate::io::Catalog;

/// Catalog split into Young / MiddleAged / Old.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortPartition {
    thresholds: AgeThresholds,
    members: [Vec<usize>; 3],
    /// Records without a finite age.
    unassigned: Vec<usize>,
}

impl CohortPartition {
    pub fn thresholds(&self) -> &AgeThresholds {
        &self.thresholds
    }

    /// Catalog indices of the cohort's members, in catalog order.
    pub fn members(&self, cohort: Cohort) -> &[usize] {
        &self.members[cohort.index()]
    }

    pub fn len(&self, cohort: Cohort) -> usize {
        self.members[cohort.index()].len()
    }

    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    pub fn assigned_count(&self) -> usize {
        self.members.iter().map(Vec::len).sum()
    }

    /// Cohort of the record at `index`, if it was assigned one.
    pub fn cohort_of(&self, index: usize) -> Option<Cohort> {
        Cohort::ALL
            .into_iter()
            .find(|&c| self.members(c).binary_search(&index).is_ok())
    }

    pub fn records<'a>(
        &'a self,
        catalog: &'a Catalog,
        cohort: Cohort,
    ) -> impl Iterator<Item = &'a StarRecord> + 'a {
        catalog.select(self.members(cohort))
    }

    /// One column of the cohort's records, e.g. metallicities.
    pub fn column(
        &self,
        catalog: &Catalog,
        cohort: Cohort,
        f: impl Fn(&StarRecord) -> f64,
    ) -> Vec<f64> {
        self.records(catalog, cohort).map(f).collect()
    }

    /// Error if `cohort` has no members; used before per-cohort statistics.
    pub fn require_members(&self, cohort: Cohort) -> Result<&[usize], AppError> {
        let members = self.members(cohort);
        if members.is_empty() {
            return Err(AppError::empty_cohort(format!(
                "Cohort '{}' has no stars; cannot compute per-cohort statistics.",
                cohort.label(&self.thresholds)
            )));
        }
        Ok(members)
    }
}

/// Split `catalog` into cohorts using `thresholds`.
pub fn partition_by_age(catalog: &Catalog, thresholds: AgeThresholds) -> CohortPartition {
    partition_records(catalog.records(), thresholds)
}

/// Split raw records into cohorts; indices refer to positions in `records`.
pub fn partition_records(records: &[StarRecord], thresholds: AgeThresholds) -> CohortPartition {
    let mut members: [Vec<usize>; 3] = Default::default();
    let mut unassigned = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        match thresholds.classify(record.age) {
            Some(cohort) => members[cohort.index()].push(idx),
            None => unassigned.push(idx),
        }
    }

    if !unassigned.is_empty() {
        log::warn!(
            "{} star(s) have no finite age and belong to no cohort",
            unassigned.len()
        );
    }
    log::info!(
        "cohorts: young={} middle-aged={} old={}",
        members[0].len(),
        members[1].len(),
        members[2].len()
    );

    CohortPartition {
        thresholds,
        members,
        unassigned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn star(age: f64) -> StarRecord {
        StarRecord {
            absolute_magnitude: 4.0,
            color_index: 0.4,
            age,
            metallicity: -0.2,
            initial_mass: 1.0,
        }
    }

    fn ages(records: &[StarRecord], indices: &[usize]) -> Vec<f64> {
        indices.iter().map(|&i| records[i].age).collect()
    }

    fn random_records(seed: u64, n: usize) -> Vec<StarRecord> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                // Snap some ages onto the thresholds to exercise ties.
                let age = match rng.gen_range(0..10) {
                    0 => 1.0,
                    1 => 3.0,
                    2 => f64::NAN,
                    _ => rng.gen_range(0.0..13.5),
                };
                star(age)
            })
            .collect()
    }

    #[test]
    fn example_catalog_partitions_with_older_ties() {
        let records: Vec<_> = [0.5, 1.0, 2.9, 3.0, 5.0].into_iter().map(star).collect();
        let p = partition_records(&records, AgeThresholds::default());

        assert_eq!(ages(&records, p.members(Cohort::Young)), vec![0.5]);
        assert_eq!(
            ages(&records, p.members(Cohort::MiddleAged)),
            vec![1.0, 2.9]
        );
        assert_eq!(ages(&records, p.members(Cohort::Old)), vec![3.0, 5.0]);
        assert!(p.unassigned().is_empty());
    }

    #[test]
    fn partition_is_disjoint_and_total_over_defined_ages() {
        let records = random_records(7, 2_000);
        let p = partition_records(&records, AgeThresholds::default());

        let mut seen = vec![0u8; records.len()];
        for cohort in Cohort::ALL {
            let members = p.members(cohort);
            assert!(members.windows(2).all(|w| w[0] < w[1]), "order preserved");
            for &i in members {
                seen[i] += 1;
                assert_eq!(p.thresholds().classify(records[i].age), Some(cohort));
            }
        }
        for &i in p.unassigned() {
            assert!(records[i].age.is_nan());
            seen[i] += 1;
        }

        assert!(seen.iter().all(|&n| n == 1));
        let defined = records.iter().filter(|r| r.age.is_finite()).count();
        assert_eq!(p.assigned_count(), defined);
    }

    #[test]
    fn raising_t1_only_moves_middle_aged_into_young() {
        let records = random_records(11, 1_000);
        let before = partition_records(&records, AgeThresholds { t1: 1.0, t2: 3.0 });
        let after = partition_records(&records, AgeThresholds { t1: 2.0, t2: 3.0 });

        for i in 0..records.len() {
            match (before.cohort_of(i), after.cohort_of(i)) {
                (a, b) if a == b => {}
                (Some(Cohort::MiddleAged), Some(Cohort::Young)) => {}
                (a, b) => panic!("record {i} moved {a:?} -> {b:?}"),
            }
        }
        assert!(after.len(Cohort::Young) >= before.len(Cohort::Young));
        assert_eq!(after.len(Cohort::Old), before.len(Cohort::Old));
    }

    #[test]
    fn empty_cohort_is_reported() {
        let records: Vec<_> = [0.1, 0.2].into_iter().map(star).collect();
        let p = partition_records(&records, AgeThresholds::default());
        assert!(p.require_members(Cohort::Young).is_ok());
        let err = p.require_members(Cohort::Old).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::EmptyCohort);
    }
}
