use super::matcher::{MIN_MATCHED_ATOMS, RingMatch, match_atoms};
use crate::core::models::frame::ReferenceFrame;
use crate::core::models::residue::{BaseCategory, BaseIdentity, BaseType, Residue};
use crate::core::models::structure::Structure;
use crate::core::templates::registry::{BaseTemplate, TemplateRegistry};
use crate::core::utils::geometry::superpose;
use crate::core::utils::identifiers::{
    GLYCOSIDIC_CARBON, PURINE_MARKER_ATOMS, RING_ATOM_NAMES, ring_atom_names,
};
use crate::engine::config::FrameConfig;
use nalgebra::Point3;
use thiserror::Error;

/// Outcome of fitting a standard base onto one residue.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameFit {
    pub frame: ReferenceFrame,
    pub identity: BaseIdentity,
    pub template_id: String,
    pub num_matched: usize,
    /// RMSD of the template fit.
    pub rms_fit: f64,
    /// Best ring RMSD against the standard geometries, used for acceptance.
    pub ring_rmsd: f64,
}

/// Why a residue did not receive a frame. These are expected for non-nucleotide
/// residues and distorted bases and are not errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameRejection {
    #[error("only {matched} ring atom(s) matched, at least 3 are required")]
    InsufficientRingAtoms { matched: usize },
    #[error("ring RMSD {rmsd:.4} Å exceeds cutoff {cutoff:.4} Å")]
    RmsdAboveCutoff { rmsd: f64, cutoff: f64 },
    #[error("no template available for base '{0}'")]
    MissingTemplate(char),
    #[error("least-squares superposition failed")]
    FitFailed,
}

pub struct FrameCalculator<'a> {
    registry: &'a TemplateRegistry,
    config: &'a FrameConfig,
}

impl<'a> FrameCalculator<'a> {
    pub fn new(registry: &'a TemplateRegistry, config: &'a FrameConfig) -> Self {
        Self { registry, config }
    }

    pub fn calculate(
        &self,
        structure: &Structure,
        residue: &Residue,
    ) -> Result<FrameFit, FrameRejection> {
        let ring = match_atoms(structure, residue, &RING_ATOM_NAMES);
        if !ring.is_valid() {
            return Err(FrameRejection::InsufficientRingAtoms {
                matched: ring.len(),
            });
        }

        let identity = self
            .registry
            .classify(&residue.name)
            .unwrap_or_else(|| infer_identity(residue, &ring));

        let ring_rmsd = self.best_ring_rmsd(&ring).ok_or(FrameRejection::FitFailed)?;
        if ring_rmsd > self.config.rmsd_cutoff {
            return Err(FrameRejection::RmsdAboveCutoff {
                rmsd: ring_rmsd,
                cutoff: self.config.rmsd_cutoff,
            });
        }

        let template = self
            .registry
            .template(identity)
            .ok_or(FrameRejection::MissingTemplate(identity.one_letter()))?;

        let mut names = ring_atom_names(identity.category() == BaseCategory::Purine).to_vec();
        if self.config.include_glycosidic_carbon {
            names.push(GLYCOSIDIC_CARBON);
        }
        let matched = match_atoms(structure, residue, &names);
        let (standard, experimental) = paired_positions(template, &matched);
        if standard.len() < MIN_MATCHED_ATOMS {
            return Err(FrameRejection::InsufficientRingAtoms {
                matched: standard.len(),
            });
        }

        let fit = superpose(&standard, &experimental).ok_or(FrameRejection::FitFailed)?;

        Ok(FrameFit {
            frame: ReferenceFrame::new(fit.rotation, Point3::from(fit.translation)),
            identity,
            template_id: template.id(),
            num_matched: standard.len(),
            rms_fit: fit.rmsd,
            ring_rmsd,
        })
    }

    /// Smallest ring RMSD over the unmodified templates that cover every matched
    /// ring atom. A purine ring is therefore never scored on its six-membered half.
    fn best_ring_rmsd(&self, ring: &RingMatch) -> Option<f64> {
        self.registry
            .standard_templates()
            .filter_map(|template| {
                let (standard, experimental) = paired_positions(template, ring);
                if standard.len() < ring.len() {
                    return None;
                }
                superpose(&standard, &experimental).map(|fit| fit.rmsd)
            })
            .min_by(|a, b| a.total_cmp(b))
    }
}

fn paired_positions(
    template: &BaseTemplate,
    matched: &RingMatch,
) -> (Vec<Point3<f64>>, Vec<Point3<f64>>) {
    matched
        .atoms()
        .iter()
        .filter_map(|atom| {
            template
                .position(atom.name)
                .map(|standard| (standard, atom.position))
        })
        .unzip()
}

/// Base identity from ring composition, for residue names the registry does not know.
/// The result is always marked modified.
fn infer_identity(residue: &Residue, ring: &RingMatch) -> BaseIdentity {
    let has = |name: &str| residue.get_atom_id_by_name(name).is_some();
    let purine = PURINE_MARKER_ATOMS.iter().any(|name| ring.contains(name));
    let base = if purine {
        if has("O6") {
            BaseType::Guanine
        } else {
            BaseType::Adenine
        }
    } else if has("N4") {
        BaseType::Cytosine
    } else if has("C7") {
        BaseType::Thymine
    } else {
        BaseType::Uracil
    };
    BaseIdentity::new(base, true)
}
