use serde::Deserialize;

/// Policy for deriving a subset decomposition from the global one
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum AnalysisMode {
    /// Re-run the full inference on the subset-restricted evidence, as if
    /// the other experiments had never been observed
    Independent,
    /// Keep the global group boundaries and drop out-of-subset peptides
    /// from each group
    ConserveGroups,
}

impl Default for AnalysisMode {
    fn default() -> Self {
        AnalysisMode::ConserveGroups
    }
}

/// Runtime analysis parameters
///
/// Every field has a default, so a parameter file only needs to name the
/// options it wants to change:
///
/// ```text
/// $ cat params.json
/// { "analysis_mode": "Independent" }
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub analysis_mode: AnalysisMode,
    /// In [`AnalysisMode::ConserveGroups`], additionally drop projected
    /// groups that retain no peptide exclusive to them within the subset
    pub prune_non_unique: bool,
}
