//! Parsimony-based protein group inference from peptide evidence.
//!
//! Given the peptides observed across a set of experiments and the candidate
//! protein isoforms each peptide could belong to, this library reports the
//! smallest set of protein-group explanations consistent with all of the
//! observed evidence, and derives per-experiment-subset views of that same
//! decomposition.
//!
//! The API is based around a handful of types that form an analysis
//! pipeline. Peptide records and their isoform assignments are collected
//! into an [`Evidence`] object, which is reduced into a [`Decomposition`]
//! of indistinguishable protein groups:
//!
//! ```rust,ignore
//! # use parsimony::*;
//! let mut evidence = Evidence::default();
//! evidence.add(Peptide::new(0, 122.4, vec!["HeLa_DMSO_1".into()]), &["P00533", "P00533-2"]);
//! evidence.add(Peptide::new(1, 87.1, vec!["HeLa_DMSO_2".into()]), &["P00533"]);
//!
//! let overall = evidence.decompose()?;
//! ```
//!
//! Reduction happens in two passes. The dominance pass merges isoforms with
//! identical peptide support into one group and discards isoforms whose
//! support is strictly contained in another's. The greedy cover pass then
//! walks the remaining groups in ascending score order and drops any group
//! whose peptides are all explained by the groups still standing. The final
//! decomposition is checked against the full peptide list; a group set that
//! fails to explain every peptide is a fatal [`Error::InvariantViolation`].
//!
//! A global decomposition can be projected onto named experiment subsets,
//! either by re-running inference on the restricted evidence or by carving
//! the subset's peptides out of the global groups:
//!
//! ```rust,ignore
//! # use parsimony::*;
//! let config = Config::default();
//! let subset = Subset::parse("HeLa_DMSO")?;
//! let view = project(&evidence, &overall, &subset, &config)?;
//! ```

mod config;
mod error;
mod evidence;
mod group;
mod project;
mod reduce;
mod refine;

pub use config::{AnalysisMode, Config};
pub use error::Error;
pub use evidence::{Evidence, IsoformCandidate, Peptide};
pub use group::{Decomposition, ProteinGroup};
pub use project::{project, project_all, Subset};
pub use reduce::dominance;
pub use refine::greedy_cover;

/// Identifier assigned to a peptide row by the upstream search engine
pub type PeptideId = u32;

/// Tag used for the whole-evidence decomposition
pub const OVERALL: &str = "overall";
