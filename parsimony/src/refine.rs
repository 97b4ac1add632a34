use super::*;
use fnv::FnvHashMap;

/// Remove score-ranked groups whose unique contribution is fully covered
/// by the rest of the list.
///
/// Groups are sorted ascending by summed peptide score, so the weakest
/// explanations are considered for removal first. The sort is stable:
/// equal-score groups keep their discovery order, which is the documented
/// tie-break (the exact order of tied groups is otherwise meaningless, and
/// callers should not read anything into it).
///
/// The pass is strictly forward and runs once. The group at `i` is removed
/// when every peptide it explains also appears in some other group still in
/// the list; removal shifts the next group into position `i`. Groups
/// removed earlier in the pass no longer shield anyone, groups not yet
/// visited still do, and a removal never triggers re-evaluation of groups
/// that already survived.
pub fn greedy_cover(
    groups: Vec<ProteinGroup>,
    scores: &FnvHashMap<PeptideId, f64>,
) -> Vec<ProteinGroup> {
    let mut ranked = groups
        .into_iter()
        .map(|g| (g.score(scores), g))
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut groups = ranked.into_iter().map(|(_, g)| g).collect::<Vec<_>>();

    let mut i = 0;
    while i < groups.len() {
        let mut remainder = groups[i].peptide_ids.clone();
        for j in 0..groups.len() {
            if j == i {
                continue;
            }
            for id in &groups[j].peptide_ids {
                remainder.remove(id);
            }
            if remainder.is_empty() {
                break;
            }
        }
        if remainder.is_empty() {
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
    use crate::group::test::{group, ids};

    fn scores(pairs: &[(PeptideId, f64)]) -> FnvHashMap<PeptideId, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn incomparable_groups_both_survive() {
        // ascending sort puts P2 first; each group keeps an exclusive peptide
        let scores = scores(&[(1, 6.0), (2, 4.0), (3, 1.0)]);
        let refined = greedy_cover(
            vec![group(&["P1"], &[1, 2]), group(&["P2"], &[2, 3])],
            &scores,
        );
        assert_eq!(refined.len(), 2);
        assert_eq!(refined[0].labels, vec!["P2"]);
        assert_eq!(refined[1].labels, vec!["P1"]);
    }

    #[test]
    fn fully_covered_group_is_removed() {
        let scores = scores(&[(1, 9.0), (2, 1.0)]);
        let refined = greedy_cover(vec![group(&["P1"], &[1, 2]), group(&["P2"], &[2])], &scores);
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].labels, vec!["P1"]);
        assert_eq!(refined[0].peptide_ids, ids(&[1, 2]));
    }

    #[test]
    fn removal_does_not_advance_the_pass() {
        // both low-score groups are redundant; removing the first must not
        // skip over the second
        let scores = scores(&[(1, 1.0), (2, 2.0), (3, 50.0)]);
        let refined = greedy_cover(
            vec![
                group(&["P1"], &[1]),
                group(&["P2"], &[2]),
                group(&["P3"], &[1, 2, 3]),
            ],
            &scores,
        );
        assert_eq!(refined.len(), 1);
        assert_eq!(refined[0].labels, vec!["P3"]);
    }

    #[test]
    fn earlier_removals_stop_shielding() {
        // sorted order: A{1} (1.0), B{1,2} (3.0), C{2,3} (52.0).
        // A is shielded by B and removed first; B then keeps peptide 1
        // exclusively and survives even though C covers peptide 2
        let scores = scores(&[(1, 1.0), (2, 2.0), (3, 50.0)]);
        let refined = greedy_cover(
            vec![
                group(&["A"], &[1]),
                group(&["B"], &[1, 2]),
                group(&["C"], &[2, 3]),
            ],
            &scores,
        );
        assert_eq!(refined.len(), 2);
        assert_eq!(refined[0].labels, vec!["B"]);
        assert_eq!(refined[1].labels, vec!["C"]);
    }

    #[test]
    fn every_survivor_keeps_an_exclusive_peptide() {
        let scores = scores(&[(1, 1.0), (2, 2.0), (3, 4.0), (4, 8.0), (5, 16.0)]);
        let refined = greedy_cover(
            vec![
                group(&["P1"], &[1, 2]),
                group(&["P2"], &[2, 3]),
                group(&["P3"], &[3, 4]),
                group(&["P4"], &[4, 5]),
                group(&["P5"], &[1, 5]),
            ],
            &scores,
        );
        for (i, g) in refined.iter().enumerate() {
            let mut exclusive = g.peptide_ids.clone();
            for (j, other) in refined.iter().enumerate() {
                if i != j {
                    for id in &other.peptide_ids {
                        exclusive.remove(id);
                    }
                }
            }
            assert!(!exclusive.is_empty(), "{:?} owns nothing", g.labels);
        }
    }

    #[test]
    fn tied_scores_keep_discovery_order() {
        let scores = scores(&[(1, 5.0), (2, 5.0)]);
        let refined = greedy_cover(vec![group(&["X"], &[1]), group(&["Y"], &[2])], &scores);
        assert_eq!(refined[0].labels, vec!["X"]);
        assert_eq!(refined[1].labels, vec!["Y"]);
    }
}
