use phf::{Map, Set, phf_map, phf_set};

/// Base ring atoms in perimeter order: the six-membered ring first, then the
/// imidazole atoms of purines.
pub const RING_ATOM_NAMES: [&str; 9] = ["C4", "N3", "C2", "N1", "C6", "C5", "N7", "C8", "N9"];

/// Number of leading [`RING_ATOM_NAMES`] entries that form the pyrimidine ring.
pub const PYRIMIDINE_RING_SIZE: usize = 6;

pub const GLYCOSIDIC_CARBON: &str = "C1'";

/// Atoms whose presence marks a purine (imidazole ring).
pub const PURINE_MARKER_ATOMS: [&str; 3] = ["N7", "C8", "N9"];

static BACKBONE_ATOM_NAMES: Set<&'static str> = phf_set! {
    "P", "OP1", "OP2", "OP3", "O5'", "C5'", "O3'",
};

static ATOM_NAME_ALIASES: Map<&'static str, &'static str> = phf_map! {
    "O1P" => "OP1",
    "O2P" => "OP2",
    "O3P" => "OP3",
    "C5M" => "C7",
};

/// Where an atom sits within a nucleotide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomLocation {
    Base,
    Sugar,
    Backbone,
}

/// Canonical spelling of an atom name: trimmed, `*` primes rewritten as `'`, and
/// legacy phosphate/methyl names mapped to their current PDB names.
pub fn canonical_atom_name(atom_name: &str) -> String {
    let name = atom_name.trim().replace('*', "'");
    match ATOM_NAME_ALIASES.get(name.as_str()) {
        Some(alias) => (*alias).to_string(),
        None => name,
    }
}

pub fn is_backbone_atom(atom_name: &str) -> bool {
    BACKBONE_ATOM_NAMES.contains(canonical_atom_name(atom_name).as_str())
}

pub fn atom_location(atom_name: &str) -> AtomLocation {
    let name = canonical_atom_name(atom_name);
    if BACKBONE_ATOM_NAMES.contains(name.as_str()) {
        AtomLocation::Backbone
    } else if name.ends_with('\'') {
        AtomLocation::Sugar
    } else {
        AtomLocation::Base
    }
}

/// Ring atom names for a purine (`true`) or pyrimidine (`false`) base.
pub fn ring_atom_names(purine: bool) -> &'static [&'static str] {
    if purine {
        &RING_ATOM_NAMES
    } else {
        &RING_ATOM_NAMES[..PYRIMIDINE_RING_SIZE]
    }
}
