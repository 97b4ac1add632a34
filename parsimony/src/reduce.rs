use super::*;

/// Merge indistinguishable isoform candidates and discard dominated ones.
///
/// Every candidate seeds a [`ProteinGroup`] holding just its own label and
/// support. The sweep then compares the group at `i` against every other
/// group still in the list:
///
/// - identical peptide sets merge: `j`'s labels move into `i`'s group and
///   `j` is removed
/// - a strictly-contained peptide set is dominated and its group is
///   removed; when the contained group is `i` itself, `i` is removed and
///   the group shifting into position `i` is examined next
///
/// Removals never advance the scanning index, and the sweep is a single
/// converging pass rather than a pairwise fixpoint rescan. The order in
/// which ties merge, and therefore the label contents of merged groups,
/// follows candidate discovery order.
///
/// The result never contains a group whose peptide set is a non-strict
/// subset of another's, and running the sweep again on its own output is a
/// no-op.
pub fn dominance(candidates: &[IsoformCandidate]) -> Vec<ProteinGroup> {
    let mut groups = candidates
        .iter()
        .map(|c| ProteinGroup {
            labels: vec![c.label.clone()],
            peptide_ids: c.peptide_ids.clone(),
        })
        .collect::<Vec<_>>();

    let mut i = 0;
    while i < groups.len() {
        let mut remove_current = false;
        let mut j = 0;
        while j < groups.len() {
            if j == i {
                j += 1;
                continue;
            }
            if groups[j].peptide_ids == groups[i].peptide_ids {
                let labels = std::mem::take(&mut groups[j].labels);
                groups[i].labels.extend(labels);
                groups.remove(j);
                // a removal below i shifts the current group down one
                if j < i {
                    i -= 1;
                }
            } else if groups[j].peptide_ids.is_subset(&groups[i].peptide_ids) {
                groups.remove(j);
                if j < i {
                    i -= 1;
                }
            } else if groups[i].peptide_ids.is_subset(&groups[j].peptide_ids) {
                remove_current = true;
                break;
            } else {
                j += 1;
            }
        }
        if remove_current {
            groups.remove(i);
        } else {
            i += 1;
        }
    }
    groups
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::group::test::ids;

    fn candidate(label: &str, peptide_ids: &[PeptideId]) -> IsoformCandidate {
        IsoformCandidate {
            label: label.into(),
            peptide_ids: peptide_ids.iter().copied().collect(),
        }
    }

    #[test]
    fn identical_support_merges() {
        let reduced = dominance(&[candidate("P1", &[1, 2, 3]), candidate("P2", &[1, 2, 3])]);
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].labels, vec!["P1", "P2"]);
        assert_eq!(reduced[0].peptide_ids, ids(&[1, 2, 3]));
    }

    #[test]
    fn contained_support_is_discarded() {
        let reduced = dominance(&[candidate("P1", &[1, 2]), candidate("P2", &[1, 2, 3])]);
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].labels, vec!["P2"]);
        assert_eq!(reduced[0].peptide_ids, ids(&[1, 2, 3]));
    }

    #[test]
    fn current_group_can_be_the_dominated_one() {
        // P1 is examined first but is itself contained in P2; P2 must shift
        // into position 0 and survive
        let reduced = dominance(&[candidate("P1", &[1]), candidate("P2", &[1, 2])]);
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].labels, vec!["P2"]);
    }

    #[test]
    fn overlapping_but_incomparable_groups_are_kept() {
        let reduced = dominance(&[candidate("P1", &[1, 2]), candidate("P2", &[2, 3])]);
        assert_eq!(reduced.len(), 2);
    }

    #[test]
    fn ties_merge_into_the_earliest_partner() {
        // A's scan reaches C before C is ever examined, so the merged group
        // sits at A's position and carries A's label first
        let reduced = dominance(&[
            candidate("A", &[1, 2]),
            candidate("B", &[3]),
            candidate("C", &[1, 2]),
        ]);
        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[0].labels, vec!["A", "C"]);
        assert_eq!(reduced[0].peptide_ids, ids(&[1, 2]));
        assert_eq!(reduced[1].labels, vec!["B"]);
    }

    #[test]
    fn output_is_dominance_free() {
        let reduced = dominance(&[
            candidate("P1", &[1, 2, 3, 4]),
            candidate("P2", &[2, 3]),
            candidate("P3", &[3, 4, 5]),
            candidate("P4", &[3, 4, 5]),
            candidate("P5", &[5]),
            candidate("P6", &[6, 7]),
            candidate("P7", &[7]),
        ]);
        for (i, a) in reduced.iter().enumerate() {
            for (j, b) in reduced.iter().enumerate() {
                if i != j {
                    assert!(
                        !a.peptide_ids.is_subset(&b.peptide_ids),
                        "{:?} is contained in {:?}",
                        a.labels,
                        b.labels
                    );
                }
            }
        }
    }

    #[test]
    fn idempotent_on_own_output() {
        let input = vec![
            candidate("P1", &[1, 2, 3]),
            candidate("P2", &[1, 2, 3]),
            candidate("P3", &[2, 3]),
            candidate("P4", &[4, 5]),
            candidate("P5", &[5]),
        ];
        let reduced = dominance(&input);

        let as_candidates = reduced
            .iter()
            .map(|g| IsoformCandidate {
                label: g.labels.join("/"),
                peptide_ids: g.peptide_ids.clone(),
            })
            .collect::<Vec<_>>();
        let again = dominance(&as_candidates);

        assert_eq!(again.len(), reduced.len());
        for (a, b) in again.iter().zip(&reduced) {
            assert_eq!(a.peptide_ids, b.peptide_ids);
        }
    }
}
