use crate::core::models::atom::Atom;
use crate::core::models::hbond::HydrogenBond;
use crate::core::models::ids::AtomId;
use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;
use crate::core::utils::identifiers::{AtomLocation, atom_location, canonical_atom_name};
use crate::engine::config::HBondConfig;
use itertools::iproduct;

struct Candidate<'s> {
    id: AtomId,
    atom: &'s Atom,
    name: String,
    location: AtomLocation,
}

/// Maximum bond length for a pair of atom locations.
pub fn context_max_distance(config: &HBondConfig, a: AtomLocation, b: AtomLocation) -> f64 {
    use AtomLocation::*;
    match (a, b) {
        (Base, Base) => config.base_base_max,
        (Sugar, _) | (_, Sugar) => config.sugar_max,
        (Backbone, Backbone) => config.backbone_backbone_max,
        _ => config.base_backbone_max,
    }
}

fn eligible_atoms<'s>(
    structure: &'s Structure,
    residue: &Residue,
    config: &HBondConfig,
) -> Vec<Candidate<'s>> {
    residue
        .atoms()
        .iter()
        .filter_map(|&id| {
            let atom = structure.atom(id)?;
            if atom.is_hydrogen()
                || !config
                    .elements
                    .iter()
                    .any(|element| element.eq_ignore_ascii_case(&atom.element))
            {
                return None;
            }
            let name = canonical_atom_name(&atom.name);
            let location = atom_location(&name);
            Some(Candidate {
                id,
                atom,
                name,
                location,
            })
        })
        .collect()
}

/// All donor/acceptor-capable atom pairs between the two residues within their
/// context distance window, in residue atom order.
pub fn generate_candidates(
    structure: &Structure,
    residue_i: &Residue,
    residue_j: &Residue,
    config: &HBondConfig,
) -> Vec<HydrogenBond> {
    let atoms_i = eligible_atoms(structure, residue_i, config);
    let atoms_j = eligible_atoms(structure, residue_j, config);

    iproduct!(atoms_i.iter(), atoms_j.iter())
        .filter_map(|(a, b)| {
            let distance = (a.atom.position - b.atom.position).norm();
            let max = context_max_distance(config, a.location, b.location);
            (distance >= config.lower_distance && distance <= max)
                .then(|| HydrogenBond::new(&a.name, &b.name, a.id, b.id, distance))
        })
        .collect()
}
