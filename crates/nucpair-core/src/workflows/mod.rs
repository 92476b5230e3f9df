//! # Workflows Module
//!
//! High-level entry points that tie [`core`](crate::core) and [`engine`](crate::engine)
//! together into complete procedures.
//!
//! - **Pair finding** ([`find_pairs`]) - Frame assignment, pair validation and
//!   mutual-best selection on one structure, with resource loading and progress
//!   reporting.

pub mod find_pairs;
