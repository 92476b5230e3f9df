use super::config::ValidationConfig;
use super::hbond::HBondDetector;
use super::overlap::OverlapCalculator;
use super::quality::QualityAssessment;
use crate::core::models::base_pair::PairClass;
use crate::core::models::hbond::HydrogenBond;
use crate::core::models::residue::{BaseCategory, Residue};
use crate::core::models::structure::Structure;
use crate::core::utils::geometry::angle_between_deg;
use crate::core::utils::identifiers::GLYCOSIDIC_CARBON;
use nalgebra::{Point3, Vector3};
use tracing::trace;

const PURINE_GLYCOSIDIC_NITROGEN: &str = "N9";
const PYRIMIDINE_GLYCOSIDIC_NITROGEN: &str = "N1";

/// Outcome of each individual geometric test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometryChecks {
    pub dorg: bool,
    pub d_v: bool,
    pub plane_angle: bool,
    pub dnn: bool,
    pub overlap: bool,
    /// Hydrogen-bond requirement; only evaluated when the geometry passes.
    pub hbonds: bool,
}

impl GeometryChecks {
    pub fn geometry_passed(&self) -> bool {
        self.dorg && self.d_v && self.plane_angle && self.dnn && self.overlap
    }
}

/// Measurements and verdict for one residue pair, kept whether or not the pair is valid.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub residue_i: usize,
    pub residue_j: usize,
    /// Distance between the frame origins (Å).
    pub dorg: f64,
    /// Vertical separation of the origins along the mean normal (Å).
    pub d_v: f64,
    /// Distance between the glycosidic nitrogens (Å); NaN when either is missing.
    pub dnn: f64,
    /// Angle between the base normals folded into [0°, 90°].
    pub plane_angle: f64,
    pub overlap_area: f64,
    /// Dot products of corresponding frame axes (x·x, y·y, z·z).
    pub direction: Vector3<f64>,
    pub checks: GeometryChecks,
    pub hbonds: Vec<HydrogenBond>,
    pub num_base_hbonds: usize,
    pub num_o2_hbonds: usize,
    pub is_valid: bool,
    /// −(dorg + 2·d_v + plane_angle/20); higher is better.
    pub geometric_score: f64,
    pub quality: Option<QualityAssessment>,
}

impl ValidationResult {
    /// Score used for partner selection: the adjusted score once assessed.
    pub fn score(&self) -> f64 {
        self.quality
            .as_ref()
            .map_or(self.geometric_score, |quality| quality.adjusted_score)
    }

    pub fn pair_class(&self) -> PairClass {
        self.quality
            .as_ref()
            .map_or(PairClass::Unclassified, |quality| quality.pair_class)
    }

    pub fn involves(&self, legacy_index: usize) -> bool {
        self.residue_i == legacy_index || self.residue_j == legacy_index
    }

    /// The other residue of the pair, if `legacy_index` is one of them.
    pub fn partner_of(&self, legacy_index: usize) -> Option<usize> {
        if self.residue_i == legacy_index {
            Some(self.residue_j)
        } else if self.residue_j == legacy_index {
            Some(self.residue_i)
        } else {
            None
        }
    }

    #[cfg(test)]
    pub(crate) fn synthetic(residue_i: usize, residue_j: usize, score: f64, is_valid: bool) -> Self {
        Self {
            residue_i,
            residue_j,
            dorg: 0.0,
            d_v: 0.0,
            dnn: 9.0,
            plane_angle: 0.0,
            overlap_area: 0.0,
            direction: Vector3::new(1.0, -1.0, -1.0),
            checks: GeometryChecks::default(),
            hbonds: Vec::new(),
            num_base_hbonds: 0,
            num_o2_hbonds: 0,
            is_valid,
            geometric_score: score,
            quality: None,
        }
    }
}

pub fn geometric_score(dorg: f64, d_v: f64, plane_angle: f64) -> f64 {
    -(dorg + 2.0 * d_v + plane_angle / 20.0)
}

pub struct GeometricValidator<'a> {
    config: &'a ValidationConfig,
    detector: HBondDetector<'a>,
    overlap: &'a OverlapCalculator,
}

impl<'a> GeometricValidator<'a> {
    pub fn new(
        config: &'a ValidationConfig,
        detector: HBondDetector<'a>,
        overlap: &'a OverlapCalculator,
    ) -> Self {
        Self {
            config,
            detector,
            overlap,
        }
    }

    /// Measures the pair geometry and, when it passes, the hydrogen bonds.
    /// Returns `None` if either residue has no frame.
    pub fn validate(
        &self,
        structure: &Structure,
        residue_i: &Residue,
        residue_j: &Residue,
    ) -> Option<ValidationResult> {
        let frame_i = residue_i.frame()?;
        let frame_j = residue_j.frame()?;

        let origin_offset = frame_j.origin - frame_i.origin;
        let dorg = origin_offset.norm();
        let (mean_origin, mean_normal) = frame_i.mean_plane(frame_j);
        let d_v = origin_offset.dot(&mean_normal).abs();

        let raw_angle = angle_between_deg(&frame_i.z_axis(), &frame_j.z_axis());
        let plane_angle = if raw_angle > 90.0 {
            180.0 - raw_angle
        } else {
            raw_angle
        };

        let dnn = match (
            glycosidic_position(structure, residue_i),
            glycosidic_position(structure, residue_j),
        ) {
            (Some(a), Some(b)) => (b - a).norm(),
            _ => f64::NAN,
        };

        let direction = Vector3::new(
            frame_i.x_axis().dot(&frame_j.x_axis()),
            frame_i.y_axis().dot(&frame_j.y_axis()),
            frame_i.z_axis().dot(&frame_j.z_axis()),
        );

        let overlap_area =
            self.overlap
                .overlap_area(structure, residue_i, residue_j, &mean_origin, &mean_normal);

        let mut checks = GeometryChecks {
            dorg: self.config.dorg.contains(dorg),
            d_v: self.config.d_v.contains(d_v),
            plane_angle: self.config.plane_angle.contains(plane_angle),
            dnn: self.config.dnn.contains(dnn),
            overlap: overlap_area < self.config.overlap_threshold,
            hbonds: false,
        };

        let (hbonds, num_base_hbonds, num_o2_hbonds) = if checks.geometry_passed() {
            let summary = self.detector.detect(structure, residue_i, residue_j);
            (summary.bonds, summary.num_base_hbonds, summary.num_o2_hbonds)
        } else {
            (Vec::new(), 0, 0)
        };
        checks.hbonds = checks.geometry_passed()
            && hbond_requirement_met(self.config.min_base_hbonds, num_base_hbonds, num_o2_hbonds);

        trace!(
            residue_i = residue_i.legacy_index(),
            residue_j = residue_j.legacy_index(),
            dorg,
            d_v,
            plane_angle,
            dnn,
            overlap_area,
            valid = checks.hbonds,
            "Validated residue pair."
        );

        Some(ValidationResult {
            residue_i: residue_i.legacy_index(),
            residue_j: residue_j.legacy_index(),
            dorg,
            d_v,
            dnn,
            plane_angle,
            overlap_area,
            direction,
            checks,
            hbonds,
            num_base_hbonds,
            num_o2_hbonds,
            is_valid: checks.hbonds,
            geometric_score: geometric_score(dorg, d_v, plane_angle),
            quality: None,
        })
    }
}

/// With a minimum of zero, any single bond (base-base or O2') is enough, so lowering
/// the minimum never rejects a pair a higher minimum accepts.
fn hbond_requirement_met(min_base_hbonds: usize, num_base: usize, num_o2: usize) -> bool {
    if min_base_hbonds == 0 {
        num_base > 0 || num_o2 > 0
    } else {
        num_base >= min_base_hbonds
    }
}

fn glycosidic_position(structure: &Structure, residue: &Residue) -> Option<Point3<f64>> {
    let candidates: &[&str] = match residue.category() {
        BaseCategory::Purine => &[PURINE_GLYCOSIDIC_NITROGEN],
        BaseCategory::Pyrimidine => &[PYRIMIDINE_GLYCOSIDIC_NITROGEN],
        BaseCategory::Other => &[
            PURINE_GLYCOSIDIC_NITROGEN,
            PYRIMIDINE_GLYCOSIDIC_NITROGEN,
            GLYCOSIDIC_CARBON,
        ],
    };
    candidates
        .iter()
        .find_map(|name| structure.atom_position(residue, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::frame::ReferenceFrame;
    use crate::core::models::residue::BaseType;
    use crate::engine::config::HBondConfig;
    use crate::core::models::ids::ResidueId;
    use crate::test_utils::{fit_frames, partner_frame, place_base, watson_crick_pair};

    fn validate_pair(
        structure: &Structure,
        config: &ValidationConfig,
        i: ResidueId,
        j: ResidueId,
    ) -> Option<ValidationResult> {
        let hbond_config = HBondConfig::default();
        let overlap = OverlapCalculator::new(structure.residue_count());
        let validator =
            GeometricValidator::new(config, HBondDetector::new(&hbond_config), &overlap);
        validator.validate(
            structure,
            structure.residue(i).unwrap(),
            structure.residue(j).unwrap(),
        )
    }

    #[test]
    fn watson_crick_pair_is_valid() {
        let (mut structure, a, u) = watson_crick_pair();
        fit_frames(&mut structure);
        let result = validate_pair(&structure, &ValidationConfig::default(), a, u).unwrap();

        assert!(result.is_valid);
        assert!(result.checks.geometry_passed());
        assert!(result.dorg < 1e-6);
        assert!(result.d_v < 1e-6);
        assert!(result.plane_angle < 1e-4);
        assert!((result.dnn - 9.0).abs() < 0.01);
        assert!(result.overlap_area < 0.01);
        assert_eq!(result.num_base_hbonds, 3);
        assert!(result.direction.x > 0.0 && result.direction.y < 0.0 && result.direction.z < 0.0);
        assert!(result.geometric_score.abs() < 1e-4);
        assert_eq!((result.residue_i, result.residue_j), (1, 2));
    }

    #[test]
    fn distant_pair_fails_distance_check_without_hbond_search() {
        let mut structure = Structure::new();
        let a = place_base(&mut structure, 'A', 1, "A", BaseType::Adenine, &ReferenceFrame::identity());
        let far = ReferenceFrame::new(partner_frame().rotation, Point3::new(20.0, 0.0, 0.0));
        let u = place_base(&mut structure, 'B', 1, "U", BaseType::Uracil, &far);
        fit_frames(&mut structure);

        let result = validate_pair(&structure, &ValidationConfig::default(), a, u).unwrap();
        assert!((result.dorg - 20.0).abs() < 1e-6);
        assert!(!result.checks.dorg);
        assert!(!result.is_valid);
        assert!(result.hbonds.is_empty());
    }

    #[test]
    fn stacked_bases_fail_vertical_and_overlap_checks() {
        let mut structure = Structure::new();
        let lower = place_base(&mut structure, 'A', 1, "G", BaseType::Guanine, &ReferenceFrame::identity());
        let upper_frame =
            ReferenceFrame::new(ReferenceFrame::identity().rotation, Point3::new(0.0, 0.0, 3.4));
        let upper = place_base(&mut structure, 'A', 2, "G", BaseType::Guanine, &upper_frame);
        fit_frames(&mut structure);

        let result = validate_pair(&structure, &ValidationConfig::default(), lower, upper).unwrap();
        assert!(result.checks.dorg);
        assert!(!result.checks.d_v);
        assert!(!result.checks.overlap);
        assert!(result.overlap_area > 1.0);
        assert!(!result.is_valid);
    }

    #[test]
    fn measurements_do_not_depend_on_argument_order() {
        let mut structure = Structure::new();
        let a = place_base(&mut structure, 'A', 1, "G", BaseType::Guanine, &ReferenceFrame::identity());
        let tilted = ReferenceFrame::new(
            crate::test_utils::rotation(Vector3::new(1.0, 0.3, 0.0), 160.0),
            Point3::new(0.4, -0.2, 0.8),
        );
        let b = place_base(&mut structure, 'B', 1, "C", BaseType::Cytosine, &tilted);
        fit_frames(&mut structure);

        let config = ValidationConfig::default();
        let forward = validate_pair(&structure, &config, a, b).unwrap();
        let backward = validate_pair(&structure, &config, b, a).unwrap();
        assert!((forward.dorg - backward.dorg).abs() < 1e-9);
        assert!((forward.dnn - backward.dnn).abs() < 1e-9);
        assert!((forward.plane_angle - backward.plane_angle).abs() < 1e-9);
        assert!((forward.overlap_area - backward.overlap_area).abs() < 1e-6);
    }

    #[test]
    fn residue_without_frame_is_not_validated() {
        let (structure, a, u) = watson_crick_pair();
        assert!(validate_pair(&structure, &ValidationConfig::default(), a, u).is_none());
    }

    #[test]
    fn zero_minimum_accepts_any_single_bond() {
        assert!(hbond_requirement_met(0, 3, 0));
        assert!(hbond_requirement_met(0, 0, 1));
        assert!(!hbond_requirement_met(0, 0, 0));
        assert!(hbond_requirement_met(2, 2, 0));
        assert!(!hbond_requirement_met(2, 1, 5));
    }

    #[test]
    fn lowering_the_minimum_never_rejects_a_valid_pair() {
        let (mut structure, a, u) = watson_crick_pair();
        fit_frames(&mut structure);
        for min_base_hbonds in (0..=3).rev() {
            let config = ValidationConfig {
                min_base_hbonds,
                ..ValidationConfig::default()
            };
            let result = validate_pair(&structure, &config, a, u).unwrap();
            assert!(result.is_valid, "minimum {min_base_hbonds}");
            assert_eq!(result.num_o2_hbonds, 0);
        }
    }

    #[test]
    fn score_falls_back_to_geometric_score() {
        let result = ValidationResult::synthetic(1, 2, -3.5, true);
        assert_eq!(result.score(), -3.5);
        assert_eq!(result.pair_class(), PairClass::Unclassified);
        assert_eq!(result.partner_of(2), Some(1));
        assert_eq!(result.partner_of(3), None);
    }
}
