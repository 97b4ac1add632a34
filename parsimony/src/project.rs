use super::*;
use fnv::{FnvHashMap, FnvHashSet};
use log::info;
use rayon::prelude::*;

/// A named experiment subset, e.g. `"CellLineA_Treatment2"`
///
/// The name is split on `_` into components. A peptide belongs to the
/// subset when at least one of its experiment tags contains every component
/// as a substring. Containment is deliberate: a two-component subset name
/// matches the longer composite tags of the individual runs it spans, so
/// `"A_Trypsin"` matches a peptide observed in `"A_Trypsin_Rep2"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subset {
    pub name: String,
    components: Vec<String>,
}

impl Subset {
    /// Split a subset name into its matching components.
    ///
    /// A name with no non-empty components cannot match anything and is a
    /// caller configuration error, rejected before any reduction runs.
    pub fn parse(name: &str) -> Result<Subset, Error> {
        let components = name
            .split('_')
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect::<Vec<_>>();
        if components.is_empty() {
            return Err(Error::EmptySubset(name.to_string()));
        }
        Ok(Subset {
            name: name.to_string(),
            components,
        })
    }

    /// Substring test: AND across components, OR across the peptide's tags
    pub fn contains(&self, peptide: &Peptide) -> bool {
        peptide
            .experiments
            .iter()
            .any(|tag| self.components.iter().all(|c| tag.contains(c.as_str())))
    }

    fn member_ids(&self, peptides: &[Peptide]) -> FnvHashSet<PeptideId> {
        peptides
            .iter()
            .filter(|p| self.contains(p))
            .map(|p| p.id)
            .collect()
    }
}

/// Derive the subset-specific decomposition for one named subset.
///
/// In [`AnalysisMode::Independent`] the inference pipeline is re-run from
/// scratch on the subset-restricted evidence. In
/// [`AnalysisMode::ConserveGroups`] the overall groups are kept verbatim
/// and only their out-of-subset peptides are dropped, so the subset view
/// never contradicts the global grouping. Either way the result is
/// re-validated against the in-subset peptide ids.
pub fn project(
    evidence: &Evidence,
    overall: &Decomposition,
    subset: &Subset,
    config: &Config,
) -> Result<Decomposition, Error> {
    let in_subset = subset.member_ids(&evidence.peptides);

    match config.analysis_mode {
        AnalysisMode::Independent => evidence.restricted(&in_subset).decompose_as(&subset.name),
        AnalysisMode::ConserveGroups => {
            let mut groups = overall
                .groups
                .iter()
                .cloned()
                .map(|mut group| {
                    group.peptide_ids.retain(|id| in_subset.contains(id));
                    group
                })
                .filter(|group| !group.peptide_ids.is_empty())
                .collect::<Vec<_>>();

            if config.prune_non_unique {
                let mut occurrences: FnvHashMap<PeptideId, usize> = FnvHashMap::default();
                for group in &groups {
                    for &id in &group.peptide_ids {
                        *occurrences.entry(id).or_insert(0) += 1;
                    }
                }
                groups.retain(|group| {
                    group
                        .peptide_ids
                        .iter()
                        .any(|id| occurrences.get(id) == Some(&1))
                });
            }

            let decomposition = Decomposition {
                tag: subset.name.clone(),
                groups,
            };
            decomposition.validate_coverage(&in_subset)?;
            info!(
                "{}: {} peptides in {} groups",
                decomposition.tag,
                in_subset.len(),
                decomposition.group_count()
            );
            Ok(decomposition)
        }
    }
}

/// Project the overall decomposition onto every requested subset.
///
/// Subsets share nothing but read-only views of the evidence and the
/// overall decomposition, so they are evaluated in parallel. The first
/// failure aborts the whole run.
pub fn project_all(
    evidence: &Evidence,
    overall: &Decomposition,
    subsets: &[Subset],
    config: &Config,
) -> Result<Vec<Decomposition>, Error> {
    subsets
        .par_iter()
        .map(|subset| project(evidence, overall, subset, config))
        .collect()
}
