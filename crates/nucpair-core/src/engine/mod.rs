//! # Engine Module
//!
//! The computational core of base-pair identification. Residues first receive a
//! reference frame by fitting a standard base ([`frames`]); pairs of framed
//! residues are then measured and scored ([`validation`], [`hbond`], [`overlap`],
//! [`quality`]) and finally paired by mutual-best selection ([`finder`]).
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Thresholds for every stage, loadable from TOML
//! - **Frames** ([`frames`]) - Template superposition and ring-RMSD acceptance
//! - **Hydrogen Bonds** ([`hbond`]) - Candidate search, conflict resolution, roles
//! - **Overlap** ([`overlap`]) - Projected ring-polygon intersection areas
//! - **Validation** ([`validation`]) - Geometric checks for one residue pair
//! - **Quality** ([`quality`]) - Score adjustment and Watson-Crick/wobble classification
//! - **Selection** ([`finder`]) - Neighbour search, result caching and mutual-best pairing
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-level error type

pub mod cache;
pub mod config;
pub(crate) mod context;
pub mod error;
pub mod finder;
pub mod frames;
pub mod hbond;
pub mod overlap;
pub mod progress;
pub mod quality;
pub(crate) mod tasks;
pub mod validation;
