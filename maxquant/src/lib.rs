//! Utilities for loading peptide evidence from MaxQuant result tables
//!
//! # File format
//!
//! Files should be tab delimited with a header row, in the shape of a
//! MaxQuant `peptides.txt`: an integer `id`, a search-engine `Score`, an
//! `isoforms(+)` column listing candidate protein isoforms separated by
//! `;`, and one `Experiment <tag>` column per experiment run holding that
//! peptide's evidence count in the run
//!
//! ```text
//! $ head -3 peptides.txt
//! id	Sequence	Score	isoforms(+)	Experiment HeLa_DMSO_1	Experiment HeLa_DMSO_2
//! 0	AAAAELR	112.4	P00533;P00533-2	4	1
//! 1	AADLTSK	87.1	Q9Y261		2
//! ```
//!
//! Rows with an empty `isoforms(+)` field carry no usable evidence and are
//! skipped without complaint. Parsed records are plain data; they know
//! nothing about grouping or inference.

mod experiment;
mod peptides;

pub use experiment::subset_vocabulary;
pub use peptides::{LoadOptions, PeptideRecord, PeptideTable};
