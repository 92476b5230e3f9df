//! # Hydrogen Bond Module
//!
//! Detection of hydrogen bonds between two residues: distance-based candidate
//! generation, conflict resolution among bonds competing for the same atom,
//! donor/acceptor classification and optional angle checks.

pub mod angles;
pub mod candidates;
pub mod conflict;
pub mod roles;

use crate::core::models::hbond::{HBondKind, HydrogenBond};
use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;
use crate::core::utils::identifiers::{AtomLocation, atom_location};
use crate::engine::config::{HBondConfig, HBondDistanceMode, Range};

const O2_PRIME: &str = "O2'";

/// Bonds found between two residues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HBondSummary {
    /// Surviving bonds in candidate order.
    pub bonds: Vec<HydrogenBond>,
    /// Base-base bonds with distance in `[lower_distance, base_base_max]`.
    pub num_base_hbonds: usize,
    /// Bonds involving a ribose O2'.
    pub num_o2_hbonds: usize,
}

impl HBondSummary {
    /// Standard bonds whose distance falls in `window`, compared per `mode`.
    pub fn count_good(&self, window: &Range, mode: HBondDistanceMode) -> usize {
        count_good_hbonds(&self.bonds, window, mode)
    }
}

pub fn count_good_hbonds(bonds: &[HydrogenBond], window: &Range, mode: HBondDistanceMode) -> usize {
    bonds
        .iter()
        .filter(|bond| bond.kind == HBondKind::Standard)
        .filter(|bond| window.contains(comparable_distance(bond.distance, mode)))
        .count()
}

/// Distance as compared against thresholds: in `Rounded` mode it goes through its
/// two-decimal text form, so 3.504 compares as 3.50.
pub fn comparable_distance(distance: f64, mode: HBondDistanceMode) -> f64 {
    match mode {
        HBondDistanceMode::Raw => distance,
        HBondDistanceMode::Rounded => format!("{distance:.2}").parse().unwrap_or(distance),
    }
}

pub struct HBondDetector<'a> {
    config: &'a HBondConfig,
}

impl<'a> HBondDetector<'a> {
    pub fn new(config: &'a HBondConfig) -> Self {
        Self { config }
    }

    /// Detects bonds from `residue_i` to `residue_j`. Base letters for the role
    /// tables come from the residues' fitted identities.
    pub fn detect(
        &self,
        structure: &Structure,
        residue_i: &Residue,
        residue_j: &Residue,
    ) -> HBondSummary {
        let mut bonds =
            candidates::generate_candidates(structure, residue_i, residue_j, self.config);
        conflict::resolve_conflicts(&mut bonds, self.config);

        let base_i = residue_i.one_letter_code();
        let base_j = residue_j.one_letter_code();
        for bond in &mut bonds {
            bond.roles = roles::atom_role(base_i, &bond.atom_i)
                .zip(roles::atom_role(base_j, &bond.atom_j));
            bond.kind = roles::classify(bond.roles);
            if self.config.check_angles {
                bond.angles = angles::score_angles(
                    structure,
                    residue_i,
                    residue_j,
                    bond,
                    self.config.min_angle,
                );
            }
        }

        let num_base_hbonds = bonds
            .iter()
            .filter(|bond| {
                atom_location(&bond.atom_i) == AtomLocation::Base
                    && atom_location(&bond.atom_j) == AtomLocation::Base
                    && bond.distance >= self.config.lower_distance
                    && bond.distance <= self.config.base_base_max
            })
            .count();
        let num_o2_hbonds = bonds
            .iter()
            .filter(|bond| bond.atom_i == O2_PRIME || bond.atom_j == O2_PRIME)
            .count();

        HBondSummary {
            bonds,
            num_base_hbonds,
            num_o2_hbonds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::hbond::ConflictState;
    use crate::engine::frames::{FrameCalculator, assign_frames};
    use crate::engine::config::FrameConfig;
    use crate::test_utils::{add_residue_with_atoms, registry, watson_crick_pair};
    use nalgebra::Point3;

    fn detect_watson_crick(config: &HBondConfig) -> HBondSummary {
        let (mut structure, a, u) = watson_crick_pair();
        let registry = registry();
        let frame_config = FrameConfig::default();
        assign_frames(&mut structure, &FrameCalculator::new(&registry, &frame_config));
        HBondDetector::new(config).detect(
            &structure,
            structure.residue(a).unwrap(),
            structure.residue(u).unwrap(),
        )
    }

    #[test]
    fn watson_crick_pair_bonds_are_classified() {
        let summary = detect_watson_crick(&HBondConfig::default());
        let bonds: Vec<_> = summary
            .bonds
            .iter()
            .map(|b| (b.atom_i.as_str(), b.atom_j.as_str(), b.kind, b.conflict))
            .collect();
        assert_eq!(
            bonds,
            vec![
                ("N6", "O4", HBondKind::Standard, ConflictState::Winner),
                ("N1", "O2", HBondKind::Invalid, ConflictState::SharesDonor),
                ("N1", "N3", HBondKind::Standard, ConflictState::Winner),
            ]
        );
        assert_eq!(summary.num_base_hbonds, 3);
        assert_eq!(summary.num_o2_hbonds, 0);
        assert_eq!(summary.bonds[0].donor_acceptor(), Some(("N6", "O4")));
        assert_eq!(summary.bonds[2].donor_acceptor(), Some(("N3", "N1")));
        assert!(summary.bonds.iter().all(|b| b.angles.is_none()));
    }

    #[test]
    fn good_bond_count_uses_window_and_kind() {
        let summary = detect_watson_crick(&HBondConfig::default());
        let window = Range::new(2.5, 3.5);
        assert_eq!(summary.count_good(&window, HBondDistanceMode::Rounded), 2);
        assert_eq!(summary.count_good(&Range::new(2.5, 3.0), HBondDistanceMode::Raw), 1);
    }

    #[test]
    fn angle_scoring_is_opt_in() {
        let config = HBondConfig {
            check_angles: true,
            ..HBondConfig::default()
        };
        let summary = detect_watson_crick(&config);
        let angles = summary.bonds[0].angles.unwrap();
        assert!(angles.plausible);
        assert!(angles.donor_angle > 90.0 && angles.acceptor_angle > 90.0);
    }

    #[test]
    fn rounded_distance_snaps_to_two_decimals() {
        assert_eq!(comparable_distance(3.504, HBondDistanceMode::Rounded), 3.5);
        assert_eq!(comparable_distance(3.504, HBondDistanceMode::Raw), 3.504);
        let window = Range::new(2.5, 3.5);
        assert!(window.contains(comparable_distance(3.504, HBondDistanceMode::Rounded)));
        assert!(!window.contains(comparable_distance(3.504, HBondDistanceMode::Raw)));
    }

    #[test]
    fn o2_prime_bonds_are_counted() {
        let mut structure = Structure::new();
        let r1 = add_residue_with_atoms(&mut structure, 'A', 1, "G", &[("O2'", Point3::origin())]);
        let r2 = add_residue_with_atoms(
            &mut structure,
            'B',
            1,
            "C",
            &[("O2", Point3::new(2.8, 0.0, 0.0))],
        );
        let summary = HBondDetector::new(&HBondConfig::default()).detect(
            &structure,
            structure.residue(r1).unwrap(),
            structure.residue(r2).unwrap(),
        );
        assert_eq!(summary.bonds.len(), 1);
        assert_eq!(summary.num_o2_hbonds, 1);
        assert_eq!(summary.num_base_hbonds, 0);
        // No frames were fitted, so only the backbone-side role is known.
        assert_eq!(summary.bonds[0].kind, HBondKind::NonStandard);
    }
}
