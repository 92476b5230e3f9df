//! The two phases of base-pair selection.
//!
//! [`pair_validation`] measures every spatially close pair of framed residues and
//! caches the results; [`mutual_best`] then pairs residues that are each other's
//! best-scoring valid partner.

pub mod mutual_best;
pub mod pair_validation;
