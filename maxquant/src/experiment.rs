//! Experiment-subset vocabulary derivation
//!
//! Experiment tags follow a three-part naming convention,
//! `CellLine_Treatment_Replicate`. Every prefix, suffix, and single
//! component of that convention names a slice of the data worth reporting
//! on its own, so each tag contributes its three components, the three
//! component pairs, and the full tag to the subset vocabulary.
use regex::Regex;

/// Expand experiment tags into the list of subset names to evaluate.
///
/// Names are emitted in first-seen order with duplicates dropped, so the
/// vocabulary is stable across runs over the same header. Tags that do not
/// follow the three-part convention contribute only themselves.
///
/// ```rust,ignore
/// # use maxquant::subset_vocabulary;
/// let names = subset_vocabulary(&["HeLa_DMSO_1"]);
/// assert_eq!(
///     names,
///     vec!["HeLa", "DMSO", "1", "HeLa_DMSO", "DMSO_1", "HeLa_1", "HeLa_DMSO_1"]
/// );
/// ```
pub fn subset_vocabulary<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    // greedy, so a four-part tag splits as (a_b, c, d)
    let triple = Regex::new(r"^(.+)_(.+)_(.+)$").unwrap();

    fn push(out: &mut Vec<String>, name: String) {
        if !out.contains(&name) {
            out.push(name);
        }
    }

    let mut out: Vec<String> = Vec::new();

    for tag in tags {
        let tag = tag.as_ref();
        if let Some(caps) = triple.captures(tag) {
            let (a, b, c) = (&caps[1], &caps[2], &caps[3]);
            push(&mut out, a.to_string());
            push(&mut out, b.to_string());
            push(&mut out, c.to_string());
            push(&mut out, format!("{}_{}", a, b));
            push(&mut out, format!("{}_{}", b, c));
            push(&mut out, format!("{}_{}", a, c));
        }
        push(&mut out, tag.to_string());
    }
    out
}
