use super::cache::ValidationCache;
use super::config::FinderConfig;
use super::context::PairingContext;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::tasks;
use crate::core::models::base_pair::BasePair;
use crate::core::models::structure::Structure;
use tracing::{info, instrument};

/// Pairs chosen by mutual-best selection together with every validation result
/// that informed the choice.
#[derive(Debug, Clone, Default)]
pub struct PairSelection {
    /// Accepted pairs in acceptance order.
    pub base_pairs: Vec<BasePair>,
    pub validations: ValidationCache,
}

/// Runs pair validation followed by mutual-best selection on a structure whose
/// frames have already been assigned.
pub struct BasePairFinder<'a> {
    config: &'a FinderConfig,
}

impl<'a> BasePairFinder<'a> {
    pub fn new(config: &'a FinderConfig) -> Self {
        Self { config }
    }

    #[instrument(skip_all, name = "base_pair_finder")]
    pub fn find(
        &self,
        structure: &Structure,
        reporter: &ProgressReporter,
    ) -> Result<PairSelection, EngineError> {
        let context = PairingContext::new(structure, self.config, reporter);

        reporter.report(Progress::PhaseStart {
            name: "Pair Validation",
        });
        let validations = tasks::pair_validation::run(&context)?;
        reporter.report(Progress::PhaseFinish);

        reporter.report(Progress::PhaseStart {
            name: "Mutual-Best Selection",
        });
        let base_pairs = tasks::mutual_best::run(&context, &validations)?;
        reporter.report(Progress::PhaseFinish);

        info!(
            base_pairs = base_pairs.len(),
            validated = validations.len(),
            "Base-pair search complete."
        );
        Ok(PairSelection {
            base_pairs,
            validations,
        })
    }
}
