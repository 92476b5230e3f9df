use crate::core::models::hbond::{ConflictState, HydrogenBond};
use crate::core::models::ids::AtomId;
use crate::engine::config::HBondConfig;
use std::collections::HashSet;

/// Resolves competing hydrogen bonds in place, keeping candidate order.
///
/// A bond wins when it is the shortest bond for both of its atoms among the bonds
/// still unresolved; every bond touching a winner's atoms is then resolved and the
/// scan restarts. Losers sharing both atoms with winners are dropped; other losers
/// survive when their distance lies in `[lower_distance, conflict_max]`.
pub fn resolve_conflicts(bonds: &mut Vec<HydrogenBond>, config: &HBondConfig) {
    let winners = select_winners(bonds);

    let winner_atoms_i: HashSet<AtomId> = winners.iter().map(|&w| bonds[w].atom_i_id).collect();
    let winner_atoms_j: HashSet<AtomId> = winners.iter().map(|&w| bonds[w].atom_j_id).collect();

    for (index, bond) in bonds.iter_mut().enumerate() {
        bond.conflict = if winners.contains(&index) {
            ConflictState::Winner
        } else {
            match (
                winner_atoms_i.contains(&bond.atom_i_id),
                winner_atoms_j.contains(&bond.atom_j_id),
            ) {
                (true, true) => ConflictState::SharesBoth,
                (true, false) => ConflictState::SharesDonor,
                (false, true) => ConflictState::SharesAcceptor,
                (false, false) => ConflictState::None,
            }
        };
    }

    bonds.retain(|bond| match bond.conflict {
        ConflictState::Winner => true,
        ConflictState::SharesBoth => false,
        _ => bond.distance >= config.lower_distance && bond.distance <= config.conflict_max,
    });
}

fn select_winners(bonds: &[HydrogenBond]) -> Vec<usize> {
    let n = bonds.len();
    let mut resolved = vec![false; n];
    let mut winners = Vec::new();
    let mut k = 0;

    while k < n {
        if resolved[k] {
            k += 1;
            continue;
        }
        let best_i = shortest_unresolved(bonds, &resolved, |b| b.atom_i_id == bonds[k].atom_i_id);
        let best_j = shortest_unresolved(bonds, &resolved, |b| b.atom_j_id == bonds[k].atom_j_id);
        if best_i == Some(k) && best_j == Some(k) {
            winners.push(k);
            let (atom_i, atom_j) = (bonds[k].atom_i_id, bonds[k].atom_j_id);
            for (m, bond) in bonds.iter().enumerate() {
                if bond.atom_i_id == atom_i || bond.atom_j_id == atom_j {
                    resolved[m] = true;
                }
            }
            k = 0;
        } else {
            k += 1;
        }
    }
    winners
}

/// Index of the shortest unresolved bond accepted by `filter`; ties keep the
/// earliest candidate.
fn shortest_unresolved(
    bonds: &[HydrogenBond],
    resolved: &[bool],
    filter: impl Fn(&HydrogenBond) -> bool,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (m, bond) in bonds.iter().enumerate() {
        if resolved[m] || !filter(bond) {
            continue;
        }
        if best.is_none_or(|b| bond.distance < bonds[b].distance) {
            best = Some(m);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    fn bond(i: u64, j: u64, distance: f64) -> HydrogenBond {
        HydrogenBond::new(
            &format!("I{i}"),
            &format!("J{j}"),
            id(i),
            id(j),
            distance,
        )
    }

    fn names(bonds: &[HydrogenBond]) -> Vec<(String, String, ConflictState)> {
        bonds
            .iter()
            .map(|b| (b.atom_i.clone(), b.atom_j.clone(), b.conflict))
            .collect()
    }

    #[test]
    fn watson_crick_like_conflicts_resolve_to_two_winners() {
        // A N6 (1), A N1 (2) against U N3 (10), U O4 (11), U O2 (12).
        let mut bonds = vec![
            bond(1, 10, 3.82),
            bond(1, 11, 3.02),
            bond(2, 12, 3.67),
            bond(2, 10, 2.95),
            bond(2, 11, 3.70),
        ];
        resolve_conflicts(&mut bonds, &HBondConfig::default());
        assert_eq!(
            names(&bonds),
            vec![
                ("I1".to_string(), "J11".to_string(), ConflictState::Winner),
                ("I2".to_string(), "J12".to_string(), ConflictState::SharesDonor),
                ("I2".to_string(), "J10".to_string(), ConflictState::Winner),
            ]
        );
    }

    #[test]
    fn loser_outside_conflict_window_is_dropped() {
        let mut bonds = vec![bond(1, 10, 2.9), bond(2, 10, 4.6)];
        resolve_conflicts(&mut bonds, &HBondConfig::default());
        assert_eq!(bonds.len(), 1);
        assert!(bonds[0].is_winner());

        let mut bonds = vec![bond(1, 10, 2.9), bond(2, 10, 3.3)];
        resolve_conflicts(&mut bonds, &HBondConfig::default());
        assert_eq!(bonds[1].conflict, ConflictState::SharesAcceptor);
    }

    #[test]
    fn independent_bonds_all_win() {
        let mut bonds = vec![bond(1, 10, 3.1), bond(2, 11, 2.8), bond(3, 12, 3.4)];
        resolve_conflicts(&mut bonds, &HBondConfig::default());
        assert!(bonds.iter().all(HydrogenBond::is_winner));
    }

    #[test]
    fn equal_distances_favour_earliest_candidate() {
        let mut bonds = vec![bond(1, 10, 3.0), bond(1, 11, 3.0)];
        resolve_conflicts(&mut bonds, &HBondConfig::default());
        assert_eq!(bonds[0].conflict, ConflictState::Winner);
        assert_eq!(bonds[1].conflict, ConflictState::SharesDonor);
    }

    #[test]
    fn empty_input_is_unchanged() {
        let mut bonds = Vec::new();
        resolve_conflicts(&mut bonds, &HBondConfig::default());
        assert!(bonds.is_empty());
    }
}
