use crate::core::models::ids::AtomId;
use crate::core::models::residue::{BaseCategory, Residue};
use crate::core::models::structure::Structure;
use crate::core::utils::identifiers::{PURINE_MARKER_ATOMS, ring_atom_names};
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Largest distance (Å) at which a non-ring atom counts as bonded to a ring atom.
pub const EXOCYCLIC_BOND_CUTOFF: f64 = 2.0;

/// Ring outlines per residue, computed on first use and shared between threads.
#[derive(Debug, Default)]
pub struct RingAtomCache {
    cells: Vec<OnceLock<Vec<AtomId>>>,
}

impl RingAtomCache {
    pub fn new(residue_count: usize) -> Self {
        Self {
            cells: (0..residue_count).map(|_| OnceLock::new()).collect(),
        }
    }

    /// Outline atoms of `residue`, building and storing them on first request.
    pub fn outline<'c>(&'c self, structure: &Structure, residue: &Residue) -> Cow<'c, [AtomId]> {
        match residue
            .legacy_index()
            .checked_sub(1)
            .and_then(|slot| self.cells.get(slot))
        {
            Some(cell) => Cow::Borrowed(cell.get_or_init(|| ring_outline(structure, residue))),
            None => Cow::Owned(ring_outline(structure, residue)),
        }
    }

    pub fn cached_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.get().is_some()).count()
    }
}

/// Ring atoms in perimeter order, each replaced by its exocyclic heavy-atom
/// substituent when one lies within [`EXOCYCLIC_BOND_CUTOFF`].
pub fn ring_outline(structure: &Structure, residue: &Residue) -> Vec<AtomId> {
    let purine = match residue.category() {
        BaseCategory::Purine => true,
        BaseCategory::Pyrimidine => false,
        BaseCategory::Other => PURINE_MARKER_ATOMS
            .iter()
            .any(|name| residue.get_atom_id_by_name(name).is_some()),
    };

    let ring_ids: Vec<AtomId> = ring_atom_names(purine)
        .iter()
        .filter_map(|name| residue.get_atom_id_by_name(name))
        .collect();
    let ring_set: HashSet<AtomId> = ring_ids.iter().copied().collect();

    ring_ids
        .iter()
        .map(|&ring_id| {
            let Some(ring_atom) = structure.atom(ring_id) else {
                return ring_id;
            };
            residue
                .atoms()
                .iter()
                .filter(|id| !ring_set.contains(id))
                .filter_map(|&id| structure.atom(id).map(|atom| (id, atom)))
                .filter(|(_, atom)| !atom.is_hydrogen())
                .map(|(id, atom)| (id, (atom.position - ring_atom.position).norm()))
                .filter(|&(_, distance)| distance <= EXOCYCLIC_BOND_CUTOFF)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map_or(ring_id, |(id, _)| id)
        })
        .collect()
}
