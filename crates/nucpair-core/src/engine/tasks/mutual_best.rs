use crate::core::models::base_pair::BasePair;
use crate::engine::cache::ValidationCache;
use crate::engine::context::PairingContext;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Highest-scoring valid partner of `residue` among residues not yet matched.
///
/// Every partner scoring within `epsilon` of the maximum counts as tied, and the
/// lowest index among them wins.
pub fn best_partner(
    cache: &ValidationCache,
    residue: usize,
    matched: &HashSet<usize>,
    epsilon: f64,
) -> Option<usize> {
    let scored: Vec<(usize, f64)> = cache
        .valid_partners(residue)
        .iter()
        .filter(|&&partner| !matched.contains(&partner))
        .filter_map(|&partner| {
            cache
                .get(residue, partner)
                .map(|result| (partner, result.score()))
        })
        .collect();
    let best_score = scored
        .iter()
        .map(|&(_, score)| score)
        .max_by(f64::total_cmp)?;

    // Partners are ascending, so the first one inside the window is the lowest index.
    scored
        .into_iter()
        .find(|&(_, score)| score >= best_score - epsilon)
        .map(|(partner, _)| partner)
}

/// Repeats ascending passes over the candidate residues, accepting pairs whose
/// members are each other's best partner, until a pass accepts nothing.
#[instrument(skip_all, name = "mutual_best_task")]
pub fn run(context: &PairingContext, cache: &ValidationCache) -> Result<Vec<BasePair>, EngineError> {
    let epsilon = context.config.selection.tie_epsilon;
    let candidates = context.candidate_residues();
    let mut matched: HashSet<usize> = HashSet::new();
    let mut pairs: Vec<BasePair> = Vec::new();
    let mut pass = 0usize;

    loop {
        pass += 1;
        let accepted_before = pairs.len();

        for &residue in &candidates {
            if matched.contains(&residue) {
                continue;
            }
            let Some(partner) = best_partner(cache, residue, &matched, epsilon) else {
                continue;
            };
            if best_partner(cache, partner, &matched, epsilon) != Some(residue) {
                continue;
            }

            matched.insert(residue);
            matched.insert(partner);
            let pair = build_pair(context, cache, residue, partner)?;
            debug!(
                pass,
                residue_i = residue,
                residue_j = partner,
                score = pair.score,
                "Accepted mutual-best pair."
            );
            context.reporter.report(Progress::PairAccepted {
                residue_i: residue,
                residue_j: partner,
            });
            pairs.push(pair);
        }

        if pairs.len() == accepted_before {
            break;
        }
    }

    info!(
        pairs = pairs.len(),
        passes = pass,
        unmatched = candidates.len() - matched.len(),
        "Mutual-best selection finished."
    );
    Ok(pairs)
}

fn build_pair(
    context: &PairingContext,
    cache: &ValidationCache,
    residue_i: usize,
    residue_j: usize,
) -> Result<BasePair, EngineError> {
    let frame_of = |legacy_index: usize| {
        context
            .structure
            .residue_by_legacy_index(legacy_index)
            .and_then(|(_, residue)| residue.frame().copied())
            .ok_or(EngineError::ResidueNotFound(legacy_index))
    };
    let result = cache.get(residue_i, residue_j).ok_or_else(|| {
        EngineError::Internal(format!(
            "no validation result for accepted pair ({residue_i}, {residue_j})"
        ))
    })?;

    // Bonds were measured from the lower index towards the higher one.
    let (low, high) = (residue_i.min(residue_j), residue_i.max(residue_j));
    Ok(BasePair {
        residue_i: low,
        residue_j: high,
        class: result.pair_class(),
        frame_i: frame_of(low)?,
        frame_j: frame_of(high)?,
        score: result.score(),
        hbonds: result.hbonds.clone(),
    })
}
