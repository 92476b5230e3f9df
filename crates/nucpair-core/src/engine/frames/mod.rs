//! # Frames Module
//!
//! Reference-frame calculation for nucleotide bases. Each residue's ring atoms are
//! matched by name, checked against the standard ring geometry, and a base template
//! is superposed onto them; the resulting rotation and translation form the frame.

pub mod calculator;
pub mod matcher;

pub use calculator::{FrameCalculator, FrameFit, FrameRejection};

use crate::core::models::ids::ResidueId;
use crate::core::models::structure::Structure;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, instrument};

/// Per-residue outcome of [`assign_frames`], keyed by legacy index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSummary {
    pub fitted: Vec<(usize, FrameFit)>,
    pub rejected: Vec<(usize, FrameRejection)>,
    /// Residues that already carried a frame and were left untouched.
    pub retained: Vec<usize>,
}

impl FrameSummary {
    pub fn rejection_for(&self, legacy_index: usize) -> Option<&FrameRejection> {
        self.rejected
            .iter()
            .find(|(index, _)| *index == legacy_index)
            .map(|(_, rejection)| rejection)
    }
}

/// Computes frames for every residue that does not have one yet and stores them.
///
/// A residue keeps its frame until [`Structure::clear_frames`] is called.
#[instrument(skip_all, name = "frame_assignment")]
pub fn assign_frames(structure: &mut Structure, calculator: &FrameCalculator) -> FrameSummary {
    let mut summary = FrameSummary::default();
    let mut pending: Vec<(ResidueId, usize)> = Vec::new();
    for (id, residue) in structure.residues_iter() {
        if residue.has_frame() {
            summary.retained.push(residue.legacy_index());
        } else {
            pending.push((id, residue.legacy_index()));
        }
    }

    let shared: &Structure = structure;
    #[cfg(feature = "parallel")]
    let iterator = pending.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iterator = pending.iter();

    let outcomes: Vec<_> = iterator
        .filter_map(|&(id, legacy_index)| {
            let residue = shared.residue(id)?;
            Some((id, legacy_index, calculator.calculate(shared, residue)))
        })
        .collect();

    for (id, legacy_index, outcome) in outcomes {
        match outcome {
            Ok(fit) => {
                structure.assign_frame(id, fit.frame, fit.identity);
                debug!(
                    residue = legacy_index,
                    base = %fit.identity,
                    rms_fit = fit.rms_fit,
                    "Frame assigned."
                );
                summary.fitted.push((legacy_index, fit));
            }
            Err(rejection) => {
                debug!(residue = legacy_index, reason = %rejection, "No frame assigned.");
                summary.rejected.push((legacy_index, rejection));
            }
        }
    }

    info!(
        fitted = summary.fitted.len(),
        rejected = summary.rejected.len(),
        retained = summary.retained.len(),
        "Frame calculation complete."
    );
    summary
}
