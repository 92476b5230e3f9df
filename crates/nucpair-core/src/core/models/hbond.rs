use super::ids::AtomId;

/// Donor/acceptor role of a base or backbone atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HBondRole {
    Donor,
    Acceptor,
    /// Can act as either (e.g. the ribose O2' hydroxyl).
    Either,
}

impl HBondRole {
    pub fn code(self) -> char {
        match self {
            HBondRole::Donor => 'D',
            HBondRole::Acceptor => 'A',
            HBondRole::Either => 'X',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HBondKind {
    /// Consistent donor/acceptor combination.
    Standard,
    /// At least one atom has no known role.
    #[default]
    NonStandard,
    /// Donor-donor or acceptor-acceptor.
    Invalid,
}

/// Linkage of a bond to the winners of conflict resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConflictState {
    #[default]
    None,
    /// Shares its residue-i atom with a winner.
    SharesDonor,
    /// Shares its residue-j atom with a winner.
    SharesAcceptor,
    SharesBoth,
    Winner,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HBondAngles {
    /// Neighbour-donor-acceptor angle in degrees.
    pub donor_angle: f64,
    /// Neighbour-acceptor-donor angle in degrees.
    pub acceptor_angle: f64,
    pub plausible: bool,
}

/// A hydrogen bond between an atom of residue i and an atom of residue j.
#[derive(Debug, Clone, PartialEq)]
pub struct HydrogenBond {
    pub atom_i: String,
    pub atom_j: String,
    pub atom_i_id: AtomId,
    pub atom_j_id: AtomId,
    pub distance: f64,
    pub kind: HBondKind,
    pub conflict: ConflictState,
    pub roles: Option<(HBondRole, HBondRole)>,
    pub angles: Option<HBondAngles>,
}

impl HydrogenBond {
    pub fn new(
        atom_i: &str,
        atom_j: &str,
        atom_i_id: AtomId,
        atom_j_id: AtomId,
        distance: f64,
    ) -> Self {
        Self {
            atom_i: atom_i.to_string(),
            atom_j: atom_j.to_string(),
            atom_i_id,
            atom_j_id,
            distance,
            kind: HBondKind::NonStandard,
            conflict: ConflictState::None,
            roles: None,
            angles: None,
        }
    }

    /// Whether the residue-i atom is the donor; `None` when the roles leave the
    /// direction open.
    pub fn donor_is_i(&self) -> Option<bool> {
        use HBondRole::*;
        match self.roles? {
            (Donor, Acceptor | Either) | (Either, Acceptor) => Some(true),
            (Acceptor, Donor | Either) | (Either, Donor) => Some(false),
            _ => None,
        }
    }

    /// `(donor, acceptor)` atom names, when the roles determine the direction.
    pub fn donor_acceptor(&self) -> Option<(&str, &str)> {
        if self.donor_is_i()? {
            Some((&self.atom_i, &self.atom_j))
        } else {
            Some((&self.atom_j, &self.atom_i))
        }
    }

    pub fn is_winner(&self) -> bool {
        self.conflict == ConflictState::Winner
    }

    /// Role pair as a two-letter code such as `"DA"` or `"AX"`; `"--"` when unknown.
    pub fn role_code(&self) -> String {
        match self.roles {
            Some((a, b)) => format!("{}{}", a.code(), b.code()),
            None => "--".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn bond_with_roles(roles: Option<(HBondRole, HBondRole)>) -> HydrogenBond {
        let id = AtomId::from(KeyData::from_ffi(1));
        let mut bond = HydrogenBond::new("N6", "O4", id, id, 2.9);
        bond.roles = roles;
        bond
    }

    #[test]
    fn donor_acceptor_orientation_follows_roles() {
        let bond = bond_with_roles(Some((HBondRole::Donor, HBondRole::Acceptor)));
        assert_eq!(bond.donor_acceptor(), Some(("N6", "O4")));
        let bond = bond_with_roles(Some((HBondRole::Acceptor, HBondRole::Donor)));
        assert_eq!(bond.donor_acceptor(), Some(("O4", "N6")));
        let bond = bond_with_roles(Some((HBondRole::Either, HBondRole::Donor)));
        assert_eq!(bond.donor_acceptor(), Some(("O4", "N6")));
        assert_eq!(bond.donor_is_i(), Some(false));
    }

    #[test]
    fn ambiguous_or_unknown_roles_have_no_orientation() {
        assert!(bond_with_roles(None).donor_acceptor().is_none());
        let bond = bond_with_roles(Some((HBondRole::Either, HBondRole::Either)));
        assert!(bond.donor_acceptor().is_none());
        assert_eq!(bond.role_code(), "XX");
    }

    #[test]
    fn new_bond_defaults_to_unresolved_non_standard() {
        let bond = bond_with_roles(None);
        assert_eq!(bond.kind, HBondKind::NonStandard);
        assert_eq!(bond.conflict, ConflictState::None);
        assert!(!bond.is_winner());
        assert_eq!(bond.role_code(), "--");
    }
}
