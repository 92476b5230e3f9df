//! # Templates Module
//!
//! Standard base geometries and the residue-name table used to classify residues.
//! Both are loaded from TOML, either the bundled `data/nucleotides.toml` or a
//! user-supplied file, and are read-only afterwards.
//!
//! ```ignore
//! use nucpair::core::templates::registry::TemplateRegistry;
//!
//! let registry = TemplateRegistry::standard()?;
//! let identity = registry.classify("PSU").unwrap(); // modified uracil
//! let template = registry.template(identity).unwrap();
//! ```

pub mod registry;
