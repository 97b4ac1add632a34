use thiserror::Error;

/// Failures surfaced by the inference pipeline.
///
/// The computation is deterministic and pure, so none of these are
/// retryable. An [`Error::InvariantViolation`] means a reduction dropped
/// explainable evidence and the run must be abandoned; no partial output
/// should be trusted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(
        "coverage invariant violated in \"{tag}\": {missing} peptide id(s) unexplained, {extra} unexpected"
    )]
    InvariantViolation {
        tag: String,
        missing: usize,
        extra: usize,
    },

    #[error("subset name \"{0}\" has no usable components")]
    EmptySubset(String),
}
