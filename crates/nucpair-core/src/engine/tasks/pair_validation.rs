use crate::core::models::residue::Residue;
use crate::engine::cache::ValidationCache;
use crate::engine::context::PairingContext;
use crate::engine::error::EngineError;
use crate::engine::hbond::HBondDetector;
use crate::engine::overlap::OverlapCalculator;
use crate::engine::progress::Progress;
use crate::engine::quality::QualityScorer;
use crate::engine::validation::{GeometricValidator, ValidationResult};
use kiddo::{KdTree, SquaredEuclidean};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

type WorkResult = Result<Option<ValidationResult>, EngineError>;

/// Validates and scores every pair of framed residues whose origins lie within
/// the candidate radius.
#[instrument(skip_all, name = "pair_validation_task")]
pub fn run(context: &PairingContext) -> Result<ValidationCache, EngineError> {
    let structure = context.structure;
    let config = context.config;

    let candidates: Vec<&Residue> = structure
        .residues_with_frames()
        .map(|(_, residue)| residue)
        .collect();
    if candidates.len() < 2 {
        warn!(
            candidates = candidates.len(),
            "Fewer than two residues carry a frame; nothing to validate."
        );
        return Ok(ValidationCache::new());
    }

    let work_list = neighbour_pairs(&candidates, config.selection.candidate_radius);
    info!(
        candidates = candidates.len(),
        pairs = work_list.len(),
        "Validating candidate residue pairs."
    );

    let overlap = OverlapCalculator::new(structure.residue_count());
    let validator = GeometricValidator::new(
        &config.validation,
        HBondDetector::new(&config.hbonds),
        &overlap,
    );
    let scorer = QualityScorer::new(&config.scoring);

    context.reporter.report(Progress::TaskStart {
        total_steps: work_list.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = work_list.iter();

    #[cfg(feature = "parallel")]
    let iterator = work_list.par_iter();

    let results: Vec<WorkResult> = iterator
        .map(|&(a, b)| {
            let outcome = validate_pair(&validator, &scorer, context, candidates[a], candidates[b]);
            context.reporter.report(Progress::TaskIncrement);
            outcome
        })
        .collect();

    context.reporter.report(Progress::TaskFinish);

    let mut cache = ValidationCache::new();
    for result in results {
        if let Some(result) = result? {
            cache.insert(result);
        }
    }

    info!(
        validated = cache.len(),
        valid = cache.valid_count(),
        cached_outlines = overlap.cached_outlines(),
        "Pair validation finished."
    );
    Ok(cache)
}

/// Index pairs `(a, b)`, `a < b`, of residues whose frame origins are within `radius`.
fn neighbour_pairs(candidates: &[&Residue], radius: f64) -> Vec<(usize, usize)> {
    let origins: Vec<[f64; 3]> = candidates
        .iter()
        .filter_map(|residue| residue.frame())
        .map(|frame| [frame.origin.x, frame.origin.y, frame.origin.z])
        .collect();
    let kdtree: KdTree<f64, 3> = (&origins).into();
    let radius_sq = radius * radius;

    let mut pairs: Vec<(usize, usize)> = origins
        .iter()
        .enumerate()
        .flat_map(|(a, origin)| {
            kdtree
                .within_unsorted::<SquaredEuclidean>(origin, radius_sq)
                .into_iter()
                .map(|neighbour| neighbour.item as usize)
                .filter(move |&b| b > a)
                .map(move |b| (a, b))
        })
        .collect();
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}

fn validate_pair(
    validator: &GeometricValidator,
    scorer: &QualityScorer,
    context: &PairingContext,
    residue_i: &Residue,
    residue_j: &Residue,
) -> WorkResult {
    let Some(mut result) = validator.validate(context.structure, residue_i, residue_j) else {
        return Err(EngineError::Internal(format!(
            "residue pair ({}, {}) lost its frames during validation",
            residue_i.legacy_index(),
            residue_j.legacy_index()
        )));
    };

    if result.is_valid {
        let (Some(frame_i), Some(frame_j)) = (residue_i.frame(), residue_j.frame()) else {
            return Ok(Some(result));
        };
        let assessment = scorer.assess(
            &result,
            frame_i,
            frame_j,
            residue_i.one_letter_code(),
            residue_j.one_letter_code(),
        );
        debug!(
            residue_i = result.residue_i,
            residue_j = result.residue_j,
            score = assessment.adjusted_score,
            class = ?assessment.pair_class,
            "Valid pair scored."
        );
        result.quality = Some(assessment);
    }
    Ok(Some(result))
}
