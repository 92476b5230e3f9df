//! # Core Models Module
//!
//! Data structures describing a nucleic-acid structure and the results derived from it.
//!
//! - [`structure`] - Owner of chains, residues and atoms, with legacy-index lookup
//! - [`residue`] - Residues, base types and base categories
//! - [`atom`] - Atoms and atom-name normalisation
//! - [`frame`] - Base reference frames
//! - [`hbond`] - Hydrogen bonds and their donor/acceptor classification
//! - [`base_pair`] - Accepted base pairs and their classification
//! - [`ids`] - Generational keys for atoms, residues and chains
//!
//! ```ignore
//! use nucpair::core::models::{atom::Atom, structure::Structure};
//!
//! let mut structure = Structure::new();
//! let chain_id = structure.add_chain('A');
//! let residue_id = structure.add_residue(chain_id, 1, None, "DA").unwrap();
//! structure.add_atom(residue_id, Atom::new("N9", residue_id, Point3::new(-1.291, 4.498, 0.0)));
//! ```

pub mod atom;
pub mod base_pair;
pub mod chain;
pub mod frame;
pub mod hbond;
pub mod ids;
pub mod residue;
pub mod structure;
