use super::*;
use fnv::{FnvHashMap, FnvHashSet};
use log::{debug, info};
use std::time::Instant;

/// A peptide observation from the upstream search engine
///
/// The score is taken as an opaque, already-computed quantity; nothing in
/// this crate re-derives or reinterprets it. `experiments` names every
/// experiment run in which the peptide was observed with nonzero evidence.
#[derive(Clone, Debug, PartialEq)]
pub struct Peptide {
    pub id: PeptideId,
    pub score: f64,
    pub experiments: Vec<String>,
}

impl Peptide {
    pub fn new(id: PeptideId, score: f64, experiments: Vec<String>) -> Peptide {
        Peptide {
            id,
            score,
            experiments,
        }
    }
}

/// A raw isoform label paired with the ids of every peptide whose evidence
/// lists that label as a possible source
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IsoformCandidate {
    pub label: String,
    pub peptide_ids: FnvHashSet<PeptideId>,
}

/// The full evidence snapshot for one run: all peptides, and the mapping
/// from isoform label to supporting peptide ids
///
/// Candidates are kept in discovery order. The reduction sweep examines
/// them in that order, and which partner a tie is merged into depends on
/// it, so two runs over the same input always group identically.
#[derive(Clone, Debug, Default)]
pub struct Evidence {
    pub peptides: Vec<Peptide>,
    candidates: Vec<IsoformCandidate>,
    index: FnvHashMap<String, usize>,
}

impl Evidence {
    /// Record a peptide and the isoform labels its evidence lists.
    ///
    /// A peptide that references no isoforms contributes nothing to the
    /// decomposition and is skipped outright; this is not an error.
    pub fn add<S: AsRef<str>>(&mut self, peptide: Peptide, isoforms: &[S]) {
        if isoforms.is_empty() {
            debug!("peptide {} has no isoform assignment, skipped", peptide.id);
            return;
        }
        for label in isoforms {
            let label = label.as_ref();
            let idx = match self.index.get(label) {
                Some(&idx) => idx,
                None => {
                    let idx = self.candidates.len();
                    self.candidates.push(IsoformCandidate {
                        label: label.to_string(),
                        peptide_ids: FnvHashSet::default(),
                    });
                    self.index.insert(label.to_string(), idx);
                    idx
                }
            };
            self.candidates[idx].peptide_ids.insert(peptide.id);
        }
        self.peptides.push(peptide);
    }

    /// Isoform-to-support mapping, in discovery order
    pub fn candidates(&self) -> &[IsoformCandidate] {
        &self.candidates
    }

    /// Ids of every peptide with at least one isoform assignment
    pub fn peptide_ids(&self) -> FnvHashSet<PeptideId> {
        self.peptides.iter().map(|p| p.id).collect()
    }

    pub fn scores(&self) -> FnvHashMap<PeptideId, f64> {
        self.peptides.iter().map(|p| (p.id, p.score)).collect()
    }

    /// A copy of this evidence restricted to the peptide ids in `keep`.
    ///
    /// Candidates left with no supporting peptides are dropped, same as a
    /// peptide with no isoform assignment would be on the way in.
    pub fn restricted(&self, keep: &FnvHashSet<PeptideId>) -> Evidence {
        let peptides = self
            .peptides
            .iter()
            .filter(|p| keep.contains(&p.id))
            .cloned()
            .collect();

        let mut candidates = Vec::new();
        let mut index = FnvHashMap::default();
        for candidate in &self.candidates {
            let peptide_ids = candidate
                .peptide_ids
                .intersection(keep)
                .copied()
                .collect::<FnvHashSet<_>>();
            if peptide_ids.is_empty() {
                continue;
            }
            index.insert(candidate.label.clone(), candidates.len());
            candidates.push(IsoformCandidate {
                label: candidate.label.clone(),
                peptide_ids,
            });
        }

        Evidence {
            peptides,
            candidates,
            index,
        }
    }

    /// Run the full inference pipeline over this evidence, producing the
    /// minimal protein-group set for the [`OVERALL`] scope
    pub fn decompose(&self) -> Result<Decomposition, Error> {
        self.decompose_as(OVERALL)
    }

    /// Run the full inference pipeline, tagging the result with `tag`
    pub fn decompose_as(&self, tag: &str) -> Result<Decomposition, Error> {
        let start = Instant::now();
        let groups = reduce::dominance(&self.candidates);
        let merged = groups.len();
        let groups = refine::greedy_cover(groups, &self.scores());
        info!(
            "{}: {} candidates -> {} merged -> {} groups in {}ms",
            tag,
            self.candidates.len(),
            merged,
            groups.len(),
            start.elapsed().as_millis()
        );

        let decomposition = Decomposition {
            tag: tag.to_string(),
            groups,
        };
        decomposition.validate_coverage(&self.peptide_ids())?;
        Ok(decomposition)
    }
}
