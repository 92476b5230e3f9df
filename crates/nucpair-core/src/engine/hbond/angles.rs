use crate::core::models::hbond::{HBondAngles, HydrogenBond};
use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::angle_between_deg;
use phf::{Map, phf_map};

/// Heavy atom covalently bonded to a donor/acceptor, used as the angle vertex partner.
static REFERENCE_NEIGHBORS: Map<&'static str, &'static str> = phf_map! {
    "N1" => "C2",
    "N2" => "C2",
    "O2" => "C2",
    "N3" => "C4",
    "N4" => "C4",
    "O4" => "C4",
    "N6" => "C6",
    "O6" => "C6",
    "N7" => "C5",
    "O2'" => "C2'",
    "O3'" => "C3'",
    "O4'" => "C4'",
    "O5'" => "C5'",
    "OP1" => "P",
    "OP2" => "P",
};

pub fn reference_neighbor(atom_name: &str) -> Option<&'static str> {
    REFERENCE_NEIGHBORS.get(atom_name).copied()
}

/// Neighbour-donor-acceptor and neighbour-acceptor-donor angles of a bond.
///
/// When the roles leave the direction open, the residue-i atom is taken as donor.
/// Returns `None` if either reference neighbour is missing.
pub fn score_angles(
    structure: &Structure,
    residue_i: &Residue,
    residue_j: &Residue,
    bond: &HydrogenBond,
    min_angle: f64,
) -> Option<HBondAngles> {
    let (donor_residue, donor, acceptor_residue, acceptor) = if bond.donor_is_i().unwrap_or(true) {
        (residue_i, &bond.atom_i, residue_j, &bond.atom_j)
    } else {
        (residue_j, &bond.atom_j, residue_i, &bond.atom_i)
    };

    let donor_pos = structure.atom_position(donor_residue, donor)?;
    let acceptor_pos = structure.atom_position(acceptor_residue, acceptor)?;
    let donor_neighbor = structure.atom_position(donor_residue, reference_neighbor(donor)?)?;
    let acceptor_neighbor =
        structure.atom_position(acceptor_residue, reference_neighbor(acceptor)?)?;

    let donor_angle = angle_between_deg(&(donor_neighbor - donor_pos), &(acceptor_pos - donor_pos));
    let acceptor_angle =
        angle_between_deg(&(acceptor_neighbor - acceptor_pos), &(donor_pos - acceptor_pos));

    Some(HBondAngles {
        donor_angle,
        acceptor_angle,
        plausible: donor_angle >= min_angle && acceptor_angle >= min_angle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::hbond::HBondRole;
    use crate::test_utils::add_residue_with_atoms;
    use nalgebra::Point3;

    fn linear_bond_structure(bent: bool) -> (Structure, HydrogenBond) {
        let mut structure = Structure::new();
        let neighbor = if bent {
            Point3::new(0.5, 1.2, 0.0)
        } else {
            Point3::new(-1.3, 0.0, 0.0)
        };
        let r1 = add_residue_with_atoms(
            &mut structure,
            'A',
            1,
            "A",
            &[("N6", Point3::origin()), ("C6", neighbor)],
        );
        let r2 = add_residue_with_atoms(
            &mut structure,
            'B',
            1,
            "U",
            &[("O4", Point3::new(2.9, 0.0, 0.0)), ("C4", Point3::new(4.1, 0.0, 0.0))],
        );
        let n6 = structure.residue(r1).unwrap().get_atom_id_by_name("N6").unwrap();
        let o4 = structure.residue(r2).unwrap().get_atom_id_by_name("O4").unwrap();
        let mut bond = HydrogenBond::new("N6", "O4", n6, o4, 2.9);
        bond.roles = Some((HBondRole::Donor, HBondRole::Acceptor));
        (structure, bond)
    }

    fn residues(structure: &Structure) -> (&Residue, &Residue) {
        (
            structure.residue_by_legacy_index(1).unwrap().1,
            structure.residue_by_legacy_index(2).unwrap().1,
        )
    }

    #[test]
    fn linear_geometry_is_plausible() {
        let (structure, bond) = linear_bond_structure(false);
        let (r1, r2) = residues(&structure);
        let angles = score_angles(&structure, r1, r2, &bond, 90.0).unwrap();
        assert!((angles.donor_angle - 180.0).abs() < 1e-9);
        assert!((angles.acceptor_angle - 180.0).abs() < 1e-9);
        assert!(angles.plausible);
    }

    #[test]
    fn bent_donor_is_flagged_implausible() {
        let (structure, bond) = linear_bond_structure(true);
        let (r1, r2) = residues(&structure);
        let angles = score_angles(&structure, r1, r2, &bond, 90.0).unwrap();
        assert!(angles.donor_angle < 90.0);
        assert!(!angles.plausible);
    }

    #[test]
    fn missing_neighbor_yields_none() {
        let (structure, mut bond) = linear_bond_structure(false);
        bond.atom_i = "N9".to_string();
        let (r1, r2) = residues(&structure);
        assert!(score_angles(&structure, r1, r2, &bond, 90.0).is_none());
    }
}
