//! # nucpair
//!
//! Reference-frame fitting and base-pair identification for nucleic-acid structures.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Residue`,
//!   `ReferenceFrame`, `BasePair`), the standard base templates and the geometric
//!   primitives they rely on.
//!
//! - **[`engine`]: The Logic Core.** Frame fitting, hydrogen-bond detection, stacking
//!   overlap, pair validation and scoring, and the two-phase mutual-best selection.
//!
//! - **[`workflows`]: The Public API.** Runs the complete pipeline on a structure and
//!   returns the accepted pairs together with every intermediate result.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod test_utils;
