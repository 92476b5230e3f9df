//! # Core Module
//!
//! Stateless building blocks of the pair finder.
//!
//! - **Structure representation** ([`models`]) - Chains, residues, atoms, frames and pairs
//! - **Base templates** ([`templates`]) - Standard base geometries and residue-name classification
//! - **Utilities** ([`utils`]) - Least-squares superposition, angles and atom-name tables

pub mod models;
pub mod templates;
pub mod utils;
