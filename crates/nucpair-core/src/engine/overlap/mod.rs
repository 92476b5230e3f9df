//! # Overlap Module
//!
//! Stacking overlap between two bases: each base's ring outline is projected onto
//! the mean plane of the pair and the area shared by the two projected polygons is
//! reported.

pub mod polygon;
pub mod ring_cache;

use crate::core::models::residue::Residue;
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::plane_basis;
use nalgebra::{Point2, Point3, Vector3};
use ring_cache::RingAtomCache;

pub struct OverlapCalculator {
    cache: RingAtomCache,
}

impl OverlapCalculator {
    pub fn new(residue_count: usize) -> Self {
        Self {
            cache: RingAtomCache::new(residue_count),
        }
    }

    /// Number of residues whose ring outline has been computed so far.
    pub fn cached_outlines(&self) -> usize {
        self.cache.cached_count()
    }

    /// Overlap area (Å²) of the two residues' ring outlines projected onto the plane
    /// through `origin` with normal `normal`.
    pub fn overlap_area(
        &self,
        structure: &Structure,
        residue_i: &Residue,
        residue_j: &Residue,
        origin: &Point3<f64>,
        normal: &Vector3<f64>,
    ) -> f64 {
        let Some((u, v)) = plane_basis(normal) else {
            return 0.0;
        };
        let project = |residue: &Residue| -> Vec<Point2<f64>> {
            self.cache
                .outline(structure, residue)
                .iter()
                .filter_map(|&id| structure.atom(id))
                .map(|atom| {
                    let d = atom.position - origin;
                    Point2::new(d.dot(&u), d.dot(&v))
                })
                .collect()
        };
        polygon::intersection_area(&project(residue_i), &project(residue_j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::frame::ReferenceFrame;
    use crate::core::models::residue::BaseType;
    use crate::test_utils::{place_base, watson_crick_pair};
    use ring_cache::ring_outline;

    #[test]
    fn paired_bases_side_by_side_do_not_overlap() {
        let (structure, a, u) = watson_crick_pair();
        let calculator = OverlapCalculator::new(structure.residue_count());
        let area = calculator.overlap_area(
            &structure,
            structure.residue(a).unwrap(),
            structure.residue(u).unwrap(),
            &Point3::origin(),
            &Vector3::z(),
        );
        assert!(area < 1e-9);
    }

    #[test]
    fn stacked_copy_overlaps_by_full_outline_area() {
        let mut structure = Structure::new();
        let lower = place_base(&mut structure, 'A', 1, "G", BaseType::Guanine, &ReferenceFrame::identity());
        let upper_frame = ReferenceFrame::new(
            ReferenceFrame::identity().rotation,
            Point3::new(0.0, 0.0, 3.4),
        );
        let upper = place_base(&mut structure, 'A', 2, "G", BaseType::Guanine, &upper_frame);

        let calculator = OverlapCalculator::new(structure.residue_count());
        let (origin, normal) = ReferenceFrame::identity().mean_plane(&upper_frame);
        let lower_residue = structure.residue(lower).unwrap();
        let area = calculator.overlap_area(
            &structure,
            lower_residue,
            structure.residue(upper).unwrap(),
            &origin,
            &normal,
        );

        let outline: Vec<Point2<f64>> = ring_outline(&structure, lower_residue)
            .iter()
            .map(|&id| {
                let p = structure.atom(id).unwrap().position;
                Point2::new(p.x, p.y)
            })
            .collect();
        let expected = polygon::signed_area(&outline).abs();
        assert!(expected > 10.0);
        assert!((area - expected).abs() < 1e-6);
    }

    #[test]
    fn overlap_is_symmetric() {
        let mut structure = Structure::new();
        let first = place_base(&mut structure, 'A', 1, "C", BaseType::Cytosine, &ReferenceFrame::identity());
        let shifted = ReferenceFrame::new(
            crate::test_utils::rotation(Vector3::z(), 36.0),
            Point3::new(0.5, -0.3, 3.3),
        );
        let second = place_base(&mut structure, 'A', 2, "A", BaseType::Adenine, &shifted);
        let calculator = OverlapCalculator::new(structure.residue_count());
        let (r1, r2) = (structure.residue(first).unwrap(), structure.residue(second).unwrap());
        let (o12, n12) = ReferenceFrame::identity().mean_plane(&shifted);
        let (o21, n21) = shifted.mean_plane(&ReferenceFrame::identity());
        let forward = calculator.overlap_area(&structure, r1, r2, &o12, &n12);
        let backward = calculator.overlap_area(&structure, r2, r1, &o21, &n21);
        assert!(forward > 0.0);
        assert!((forward - backward).abs() < 1e-9);
    }
}
