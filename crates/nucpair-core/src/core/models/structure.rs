use super::atom::Atom;
use super::chain::Chain;
use super::frame::ReferenceFrame;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::{BaseIdentity, Residue};
use nalgebra::Point3;
use slotmap::SlotMap;
use std::collections::HashMap;

/// A nucleic-acid structure: chains, residues and atoms in generational-key storage.
///
/// A parser builds a structure through [`add_chain`](Structure::add_chain),
/// [`add_residue`](Structure::add_residue) and [`add_atom`](Structure::add_atom).
/// Residues and atoms receive their 1-based legacy index in insertion order, and
/// that index is what validation results and base pairs refer to.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    atoms: SlotMap<AtomId, Atom>,
    residues: SlotMap<ResidueId, Residue>,
    chains: SlotMap<ChainId, Chain>,
    /// Residues by `legacy_index - 1`.
    residue_order: Vec<ResidueId>,
    residue_id_map: HashMap<(ChainId, isize, Option<char>), ResidueId>,
    chain_id_map: HashMap<char, ChainId>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Iterates residues in legacy-index order.
    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residue_order
            .iter()
            .filter_map(|&id| self.residues.get(id).map(|residue| (id, residue)))
    }

    pub fn residue_count(&self) -> usize {
        self.residue_order.len()
    }

    /// Looks up a residue by its 1-based legacy index.
    pub fn residue_by_legacy_index(&self, legacy_index: usize) -> Option<(ResidueId, &Residue)> {
        let id = *self.residue_order.get(legacy_index.checked_sub(1)?)?;
        self.residues.get(id).map(|residue| (id, residue))
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chains.iter()
    }

    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    pub fn find_residue(
        &self,
        chain_id: ChainId,
        residue_number: isize,
        insertion_code: Option<char>,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, residue_number, insertion_code))
            .copied()
    }

    /// Adds a new chain or returns the existing one with the same identifier.
    pub fn add_chain(&mut self, id: char) -> ChainId {
        *self
            .chain_id_map
            .entry(id)
            .or_insert_with(|| self.chains.insert(Chain::new(id)))
    }

    /// Adds a residue to a chain, or returns the existing residue with the same
    /// (chain, number, insertion code) key.
    ///
    /// Returns `None` if the chain does not exist.
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        insertion_code: Option<char>,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, residue_number, insertion_code);

        if let Some(&existing) = self.residue_id_map.get(&key) {
            return Some(existing);
        }

        let legacy_index = self.residue_order.len() + 1;
        let residue = Residue::new(residue_number, insertion_code, name, chain_id, legacy_index);
        let residue_id = self.residues.insert(residue);
        self.residue_id_map.insert(key, residue_id);
        self.residue_order.push(residue_id);
        chain.residues.push(residue_id);

        Some(residue_id)
    }

    /// Adds an atom to a residue, assigning its legacy index.
    ///
    /// Returns `None` if the residue does not exist.
    pub fn add_atom(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        let residue = self.residues.get_mut(residue_id)?;
        atom.residue_id = residue_id;
        atom.legacy_index = self.atoms.len() + 1;
        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);
        residue.add_atom(&name, atom_id);
        Some(atom_id)
    }

    /// Position of the named atom of a residue, if both exist.
    pub fn atom_position(&self, residue: &Residue, atom_name: &str) -> Option<Point3<f64>> {
        let atom_id = residue.get_atom_id_by_name(atom_name)?;
        self.atoms.get(atom_id).map(|atom| atom.position)
    }

    pub(crate) fn assign_frame(
        &mut self,
        residue_id: ResidueId,
        frame: ReferenceFrame,
        identity: BaseIdentity,
    ) -> bool {
        match self.residues.get_mut(residue_id) {
            Some(residue) => {
                residue.set_frame(frame, identity);
                true
            }
            None => false,
        }
    }

    /// Drops every computed frame so that frames can be recomputed from scratch.
    pub fn clear_frames(&mut self) {
        for residue in self.residues.values_mut() {
            residue.clear_frame();
        }
    }

    pub fn residues_with_frames(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues_iter().filter(|(_, residue)| residue.has_frame())
    }
}
