use super::config::FinderConfig;
use super::progress::ProgressReporter;
use crate::core::models::structure::Structure;

/// Shared, read-only inputs of the pair-finding tasks.
#[derive(Clone, Copy)]
pub struct PairingContext<'a> {
    pub structure: &'a Structure,
    pub config: &'a FinderConfig,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a> PairingContext<'a> {
    pub fn new(
        structure: &'a Structure,
        config: &'a FinderConfig,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            structure,
            config,
            reporter,
        }
    }

    /// Legacy indices of residues carrying a frame, ascending.
    pub fn candidate_residues(&self) -> Vec<usize> {
        self.structure
            .residues_with_frames()
            .map(|(_, residue)| residue.legacy_index())
            .collect()
    }
}
