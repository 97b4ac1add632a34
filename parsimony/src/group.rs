use super::*;
use fnv::{FnvHashMap, FnvHashSet};

/// A set of isoforms that are indistinguishable given current peptide
/// evidence, together with the peptide ids supporting them
///
/// Labels keep the order in which the member isoforms were merged in, so
/// the first label is always the isoform that seeded the group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProteinGroup {
    pub labels: Vec<String>,
    pub peptide_ids: FnvHashSet<PeptideId>,
}

impl ProteinGroup {
    /// Total score of the group: the sum of its supporting peptides'
    /// search-engine scores. Ids missing from `scores` contribute nothing.
    pub fn score(&self, scores: &FnvHashMap<PeptideId, f64>) -> f64 {
        self.peptide_ids
            .iter()
            .filter_map(|id| scores.get(id))
            .sum()
    }
}

/// The group list produced by one full run of the inference pipeline,
/// tagged either [`OVERALL`] or with a subset name
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Decomposition {
    pub tag: String,
    pub groups: Vec<ProteinGroup>,
}

impl Decomposition {
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Union of peptide ids across all groups
    pub fn covered_ids(&self) -> FnvHashSet<PeptideId> {
        let mut covered = FnvHashSet::default();
        for group in &self.groups {
            covered.extend(group.peptide_ids.iter().copied());
        }
        covered
    }

    /// Assert that the groups explain exactly the peptide ids in `scope`.
    ///
    /// A mismatch means the reduction dropped explainable evidence. That is
    /// a logic defect rather than a data problem, so the returned error is
    /// fatal and the run must not emit partial results.
    pub fn validate_coverage(&self, scope: &FnvHashSet<PeptideId>) -> Result<(), Error> {
        let covered = self.covered_ids();
        if &covered != scope {
            return Err(Error::InvariantViolation {
                tag: self.tag.clone(),
                missing: scope.difference(&covered).count(),
                extra: covered.difference(scope).count(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    pub fn group(labels: &[&str], ids: &[PeptideId]) -> ProteinGroup {
        ProteinGroup {
            labels: labels.iter().map(|s| s.to_string()).collect(),
            peptide_ids: ids.iter().copied().collect(),
        }
    }

    pub fn ids(ids: &[PeptideId]) -> FnvHashSet<PeptideId> {
        ids.iter().copied().collect()
    }

    #[test]
    fn score_sums_supporting_peptides() {
        let mut scores = FnvHashMap::default();
        scores.insert(1, 10.0);
        scores.insert(2, 2.5);
        scores.insert(3, 100.0);

        let g = group(&["P1"], &[1, 2]);
        assert!((g.score(&scores) - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn coverage_holds() {
        let dec = Decomposition {
            tag: OVERALL.into(),
            groups: vec![group(&["P1"], &[1, 2]), group(&["P2"], &[2, 3])],
        };
        assert_eq!(dec.validate_coverage(&ids(&[1, 2, 3])), Ok(()));
    }

    #[test]
    fn coverage_violation_is_fatal() {
        let dec = Decomposition {
            tag: "A_x".into(),
            groups: vec![group(&["P1"], &[1, 2])],
        };
        let err = dec.validate_coverage(&ids(&[1, 2, 3, 4])).unwrap_err();
        assert_eq!(
            err,
            Error::InvariantViolation {
                tag: "A_x".into(),
                missing: 2,
                extra: 0,
            }
        );
    }

    #[test]
    fn unexpected_ids_also_violate() {
        let dec = Decomposition {
            tag: OVERALL.into(),
            groups: vec![group(&["P1"], &[1, 2, 9])],
        };
        let err = dec.validate_coverage(&ids(&[1, 2])).unwrap_err();
        assert_eq!(
            err,
            Error::InvariantViolation {
                tag: OVERALL.into(),
                missing: 0,
                extra: 1,
            }
        );
    }
}
