//! Synthetic structures built from the bundled templates.

use crate::core::models::atom::Atom;
use crate::core::models::frame::ReferenceFrame;
use crate::core::models::ids::ResidueId;
use crate::core::models::residue::{BaseIdentity, BaseType};
use crate::core::models::structure::Structure;
use crate::core::templates::registry::TemplateRegistry;
use crate::engine::config::FrameConfig;
use crate::engine::frames::{FrameCalculator, FrameSummary, assign_frames};
use nalgebra::{Matrix3, Point3, Rotation3, Vector3};

pub(crate) fn registry() -> TemplateRegistry {
    TemplateRegistry::standard().unwrap()
}

pub(crate) fn rotation(axis: Vector3<f64>, angle_degrees: f64) -> Matrix3<f64> {
    *Rotation3::from_axis_angle(&nalgebra::Unit::new_normalize(axis), angle_degrees.to_radians())
        .matrix()
}

/// Frame of the second base of an ideal pair with the first base at the identity frame.
pub(crate) fn partner_frame() -> ReferenceFrame {
    ReferenceFrame::identity().flipped()
}

/// Adds a residue whose atoms are the standard template of `base` placed by `frame`.
pub(crate) fn place_base(
    structure: &mut Structure,
    chain: char,
    number: isize,
    name: &str,
    base: BaseType,
    frame: &ReferenceFrame,
) -> ResidueId {
    let registry = registry();
    let template = registry.template(BaseIdentity::standard(base)).unwrap();
    let chain_id = structure.add_chain(chain);
    let residue_id = structure
        .add_residue(chain_id, number, None, name)
        .unwrap();
    for (atom_name, local) in template.atoms() {
        let position = frame.to_global(local);
        structure
            .add_atom(residue_id, Atom::new(atom_name, residue_id, position))
            .unwrap();
    }
    residue_id
}

/// Adds a residue with explicitly positioned atoms.
pub(crate) fn add_residue_with_atoms(
    structure: &mut Structure,
    chain: char,
    number: isize,
    name: &str,
    atoms: &[(&str, Point3<f64>)],
) -> ResidueId {
    let chain_id = structure.add_chain(chain);
    let residue_id = structure
        .add_residue(chain_id, number, None, name)
        .unwrap();
    for (atom_name, position) in atoms {
        structure
            .add_atom(residue_id, Atom::new(atom_name, residue_id, *position))
            .unwrap();
    }
    residue_id
}

/// An ideal A·U Watson-Crick pair: A on the identity frame, U on its partner frame.
pub(crate) fn watson_crick_pair() -> (Structure, ResidueId, ResidueId) {
    let mut structure = Structure::new();
    let a = place_base(
        &mut structure,
        'A',
        1,
        "A",
        BaseType::Adenine,
        &ReferenceFrame::identity(),
    );
    let u = place_base(
        &mut structure,
        'B',
        1,
        "U",
        BaseType::Uracil,
        &partner_frame(),
    );
    (structure, a, u)
}

/// Fits frames with the bundled templates and default frame settings.
pub(crate) fn fit_frames(structure: &mut Structure) -> FrameSummary {
    let registry = registry();
    let config = FrameConfig::default();
    assign_frames(structure, &FrameCalculator::new(&registry, &config))
}
