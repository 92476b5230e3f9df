//! # Quality Module
//!
//! Turns a geometrically valid pair into a selection score. The raw geometric
//! score is adjusted by a bonus for well-formed hydrogen bonds and, for pairs in
//! the anti-parallel orientation, by a Watson-Crick bonus derived from the pair
//! parameters computed in [`parameters`].

pub mod parameters;

pub use parameters::{PairParameters, compute_pair_parameters};

use super::config::{ClassificationMode, ScoringConfig};
use super::hbond::count_good_hbonds;
use super::validation::ValidationResult;
use crate::core::models::base_pair::PairClass;
use crate::core::models::frame::ReferenceFrame;

/// Upper-case letter pairs eligible for the Watson-Crick classification.
const WATSON_CRICK_PAIRS: [&str; 8] = ["AT", "AU", "TA", "UA", "GC", "IC", "CG", "CI"];

#[derive(Debug, Clone, PartialEq)]
pub struct QualityAssessment {
    pub adjusted_score: f64,
    pub hbond_bonus: f64,
    pub good_hbonds: usize,
    pub pair_class: PairClass,
    /// Present only when the pair orientation allows classification.
    pub parameters: Option<PairParameters>,
}

pub struct QualityScorer<'a> {
    config: &'a ScoringConfig,
}

impl<'a> QualityScorer<'a> {
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    pub fn assess(
        &self,
        result: &ValidationResult,
        frame_i: &ReferenceFrame,
        frame_j: &ReferenceFrame,
        letter_i: char,
        letter_j: char,
    ) -> QualityAssessment {
        let good_hbonds = count_good_hbonds(
            &result.hbonds,
            &self.config.good_hbond_distance,
            self.config.hbond_distance_mode,
        );
        let hbond_bonus = self.hbond_bonus(good_hbonds);

        let direction = result.direction;
        let (pair_class, parameters) =
            if direction.x > 0.0 && direction.y < 0.0 && direction.z < 0.0 {
                // Anti-parallel normals: bring j into i's orientation first.
                let (parameters, _) = compute_pair_parameters(&frame_j.flipped(), frame_i);
                (
                    self.classify(&parameters, letter_i, letter_j),
                    Some(parameters),
                )
            } else {
                (PairClass::Unclassified, None)
            };

        let watson_crick_bonus = if pair_class == PairClass::WatsonCrick {
            self.config.watson_crick_bonus
        } else {
            0.0
        };

        QualityAssessment {
            adjusted_score: result.geometric_score + hbond_bonus + watson_crick_bonus,
            hbond_bonus,
            good_hbonds,
            pair_class,
            parameters,
        }
    }

    /// Two or more good bonds earn the full cap; fewer earn one point each.
    fn hbond_bonus(&self, good_hbonds: usize) -> f64 {
        if good_hbonds >= 2 {
            self.config.hbond_bonus_cap
        } else {
            good_hbonds as f64
        }
    }

    fn classify(&self, parameters: &PairParameters, letter_i: char, letter_j: char) -> PairClass {
        // Legacy output reads stagger where opening belongs.
        let (shear, stretch, opening) = match self.config.mode {
            ClassificationMode::Legacy => {
                (parameters.shear, parameters.stretch, parameters.stagger)
            }
            ClassificationMode::Corrected => {
                (parameters.shear, parameters.stretch, parameters.opening)
            }
        };

        if stretch.abs() > self.config.max_stretch || opening.abs() > self.config.max_opening {
            return PairClass::Unclassified;
        }
        // Watson-Crick wins where the two shear windows meet.
        if shear.abs() <= self.config.max_watson_crick_shear && is_watson_crick_letters(letter_i, letter_j) {
            return PairClass::WatsonCrick;
        }
        if self.config.wobble_shear.contains(shear.abs()) {
            return PairClass::Wobble;
        }
        PairClass::Unclassified
    }
}

fn is_watson_crick_letters(letter_i: char, letter_j: char) -> bool {
    let pair: String = [letter_i, letter_j]
        .iter()
        .map(|c| c.to_ascii_uppercase())
        .collect();
    WATSON_CRICK_PAIRS.contains(&pair.as_str())
}
