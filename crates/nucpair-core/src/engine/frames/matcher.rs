use crate::core::models::ids::AtomId;
use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;
use nalgebra::Point3;

/// Fewest matched atoms a superposition can be computed from.
pub const MIN_MATCHED_ATOMS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchedAtom {
    pub name: &'static str,
    pub atom_id: AtomId,
    pub position: Point3<f64>,
}

/// Experimental atoms found for a list of canonical names, in list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RingMatch {
    atoms: Vec<MatchedAtom>,
}

impl RingMatch {
    pub fn atoms(&self) -> &[MatchedAtom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.atoms.len() >= MIN_MATCHED_ATOMS
    }

    pub fn contains(&self, name: &str) -> bool {
        self.atoms.iter().any(|atom| atom.name == name)
    }

    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|atom| atom.position).collect()
    }
}

/// Looks up each of `names` in `residue`; names without a matching atom are skipped.
pub fn match_atoms(structure: &Structure, residue: &Residue, names: &[&'static str]) -> RingMatch {
    let atoms = names
        .iter()
        .filter_map(|&name| {
            let atom_id = residue.get_atom_id_by_name(name)?;
            let atom = structure.atom(atom_id)?;
            Some(MatchedAtom {
                name,
                atom_id,
                position: atom.position,
            })
        })
        .collect();
    RingMatch { atoms }
}
