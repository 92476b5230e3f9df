use super::ids::ResidueId;
use nalgebra::Point3;

/// A single atom of a nucleic-acid (or any other) residue.
///
/// Atoms are owned by a [`Structure`](super::structure::Structure); the 1-based
/// `legacy_index` is assigned once when the atom is inserted and mirrors the order
/// in which a parser delivered the atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom name as found in the source file (e.g., "N9", "C1'", "OP1").
    pub name: String,
    /// Chemical element symbol, upper case (e.g., "N", "O").
    pub element: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    pub(crate) legacy_index: usize,
}

impl Atom {
    /// Creates an atom whose element is inferred from its name.
    ///
    /// Use [`Atom::with_element`] when the source file carries an explicit element column.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.trim().to_string(),
            element: infer_element(name),
            residue_id,
            position,
            legacy_index: 0,
        }
    }

    pub fn with_element(mut self, element: &str) -> Self {
        let element = element.trim();
        if !element.is_empty() {
            self.element = element.to_ascii_uppercase();
        }
        self
    }

    /// 1-based position of this atom in insertion order; 0 until added to a structure.
    pub fn legacy_index(&self) -> usize {
        self.legacy_index
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element == "H" || self.element == "D"
    }
}

/// Infers the element from the first alphabetic character of an atom name.
///
/// Leading digits are skipped so that hydrogen names such as `1H5'` resolve to `H`.
pub fn infer_element(name: &str) -> String {
    name.trim()
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase().to_string())
        .unwrap_or_default()
}
