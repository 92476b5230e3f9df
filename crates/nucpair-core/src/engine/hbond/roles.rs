use crate::core::models::hbond::{HBondKind, HBondRole};
use phf::{Map, phf_map};

/// Base atom roles keyed by `"<base letter>:<atom name>"`.
static BASE_ATOM_ROLES: Map<&'static str, HBondRole> = phf_map! {
    "A:N7" => HBondRole::Acceptor,
    "A:N6" => HBondRole::Donor,
    "A:N1" => HBondRole::Acceptor,
    "A:N3" => HBondRole::Acceptor,

    "C:O2" => HBondRole::Acceptor,
    "C:N3" => HBondRole::Acceptor,
    "C:N4" => HBondRole::Donor,

    "G:N7" => HBondRole::Acceptor,
    "G:O6" => HBondRole::Acceptor,
    "G:N1" => HBondRole::Donor,
    "G:N2" => HBondRole::Donor,
    "G:N3" => HBondRole::Acceptor,

    "I:N7" => HBondRole::Acceptor,
    "I:O6" => HBondRole::Acceptor,
    "I:N1" => HBondRole::Donor,
    "I:N3" => HBondRole::Acceptor,

    "T:O2" => HBondRole::Acceptor,
    "T:N3" => HBondRole::Donor,
    "T:O4" => HBondRole::Acceptor,

    "U:O2" => HBondRole::Acceptor,
    "U:N3" => HBondRole::Donor,
    "U:O4" => HBondRole::Acceptor,
};

/// Sugar-phosphate atom roles, independent of the base.
static BACKBONE_ATOM_ROLES: Map<&'static str, HBondRole> = phf_map! {
    "OP1" => HBondRole::Acceptor,
    "OP2" => HBondRole::Acceptor,
    "O5'" => HBondRole::Acceptor,
    "O4'" => HBondRole::Acceptor,
    "O3'" => HBondRole::Acceptor,
    "O2'" => HBondRole::Either,
};

/// Role of `atom_name` (canonical spelling) in a residue with one-letter code `base`.
///
/// Modified bases (lower-case codes) use the roles of their parent base.
pub fn atom_role(base: char, atom_name: &str) -> Option<HBondRole> {
    if let Some(role) = BACKBONE_ATOM_ROLES.get(atom_name) {
        return Some(*role);
    }
    let key = format!("{}:{}", base.to_ascii_uppercase(), atom_name);
    BASE_ATOM_ROLES.get(key.as_str()).copied()
}

/// Classifies a bond from the roles of its two atoms.
pub fn classify(roles: Option<(HBondRole, HBondRole)>) -> HBondKind {
    use HBondRole::*;
    match roles {
        None => HBondKind::NonStandard,
        Some((Donor, Donor)) | Some((Acceptor, Acceptor)) => HBondKind::Invalid,
        Some(_) => HBondKind::Standard,
    }
}
