use crate::core::models::base_pair::BasePair;
use crate::core::models::structure::Structure;
use crate::core::templates::registry::TemplateRegistry;
use crate::engine::cache::ValidationCache;
use crate::engine::config::FinderConfig;
use crate::engine::error::EngineError;
use crate::engine::finder::BasePairFinder;
use crate::engine::frames::{FrameCalculator, FrameSummary, assign_frames};
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Clone, Default)]
pub struct PairFindingResult {
    /// Accepted pairs in acceptance order.
    pub base_pairs: Vec<BasePair>,
    /// Every validated candidate pair, valid or not.
    pub validations: ValidationCache,
    pub frames: FrameSummary,
}

/// Assigns frames to `structure` and identifies its base pairs.
///
/// Frames already present on residues are kept; call
/// [`Structure::clear_frames`] beforehand to refit them.
#[instrument(skip_all, name = "find_pairs_workflow")]
pub fn run(
    structure: &mut Structure,
    registry: &TemplateRegistry,
    config: &FinderConfig,
    reporter: &ProgressReporter,
) -> Result<PairFindingResult, EngineError> {
    config.validate()?;
    info!(
        residues = structure.residue_count(),
        atoms = structure.atom_count(),
        "Starting base-pair identification."
    );

    // === Phase 1: Reference frames ===
    reporter.report(Progress::PhaseStart {
        name: "Frame Calculation",
    });
    let calculator = FrameCalculator::new(registry, &config.frames);
    let frames = assign_frames(structure, &calculator);
    reporter.report(Progress::Message(format!(
        "{} residue(s) fitted, {} rejected, {} retained",
        frames.fitted.len(),
        frames.rejected.len(),
        frames.retained.len()
    )));
    reporter.report(Progress::PhaseFinish);

    // === Phases 2 and 3: Validation and selection ===
    let selection = BasePairFinder::new(config).find(structure, reporter)?;

    info!(
        base_pairs = selection.base_pairs.len(),
        "Base-pair identification complete."
    );
    Ok(PairFindingResult {
        base_pairs: selection.base_pairs,
        validations: selection.validations,
        frames,
    })
}

/// Like [`run`], loading the template registry and configuration from files.
/// `None` selects the bundled templates and the default configuration.
pub fn run_with_resources(
    structure: &mut Structure,
    template_path: Option<&Path>,
    config_path: Option<&Path>,
    reporter: &ProgressReporter,
) -> Result<PairFindingResult, EngineError> {
    let registry = match template_path {
        Some(path) => TemplateRegistry::load(path)?,
        None => TemplateRegistry::standard()?,
    };
    let config = match config_path {
        Some(path) => FinderConfig::load(path)?,
        None => FinderConfig::default(),
    };
    run(structure, &registry, &config, reporter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::base_pair::PairClass;
    use crate::core::models::frame::ReferenceFrame;
    use crate::core::models::residue::{BaseIdentity, BaseType};
    use crate::engine::config::FinderConfigBuilder;
    use crate::engine::frames::FrameRejection;
    use crate::test_utils::{
        add_residue_with_atoms, partner_frame, place_base, registry, rotation, watson_crick_pair,
    };
    use nalgebra::{Point3, Vector3};
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    fn find(structure: &mut Structure) -> PairFindingResult {
        run(
            structure,
            &registry(),
            &FinderConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap()
    }

    fn pair_keys(result: &PairFindingResult) -> Vec<(usize, usize)> {
        result
            .base_pairs
            .iter()
            .map(|pair| (pair.residue_i, pair.residue_j))
            .collect()
    }

    /// A·U at the origin and G·C stacked 3.4 Å above with a 36° twist.
    fn two_pair_duplex() -> Structure {
        let (mut structure, _, _) = watson_crick_pair();
        let step = ReferenceFrame::new(rotation(Vector3::z(), 36.0), Point3::new(0.0, 0.0, 3.4));
        let partner = ReferenceFrame::new(step.rotation * partner_frame().rotation, step.origin);
        place_base(&mut structure, 'A', 2, "G", BaseType::Guanine, &step);
        place_base(&mut structure, 'B', 0, "C", BaseType::Cytosine, &partner);
        structure
    }

    #[test]
    fn watson_crick_pair_is_identified() {
        let (mut structure, _, _) = watson_crick_pair();
        let result = find(&mut structure);

        assert_eq!(pair_keys(&result), vec![(1, 2)]);
        let pair = &result.base_pairs[0];
        assert_eq!(pair.class, PairClass::WatsonCrick);
        assert!((pair.score - 5.0).abs() < 1e-4);
        assert_eq!(result.frames.fitted.len(), 2);
        assert_eq!(result.validations.len(), 1);
    }

    #[test]
    fn stacked_duplex_yields_both_pairs() {
        let mut structure = two_pair_duplex();
        let result = find(&mut structure);

        assert_eq!(pair_keys(&result), vec![(1, 2), (3, 4)]);
        assert!(result.base_pairs.iter().all(|pair| pair.is_watson_crick()));
        assert!(!result.validations.get(1, 3).unwrap().is_valid);
    }

    #[test]
    fn distant_bases_are_never_paired() {
        let mut structure = Structure::new();
        place_base(&mut structure, 'A', 1, "A", BaseType::Adenine, &ReferenceFrame::identity());
        let far = ReferenceFrame::new(partner_frame().rotation, Point3::new(20.0, 0.0, 0.0));
        place_base(&mut structure, 'B', 1, "U", BaseType::Uracil, &far);

        let result = find(&mut structure);
        assert!(result.base_pairs.is_empty());
        if let Some(validation) = result.validations.get(1, 2) {
            assert!(!validation.checks.dorg);
        }
    }

    #[test]
    fn distorted_base_is_excluded() {
        let registry = registry();
        let template = registry.template(BaseIdentity::standard(BaseType::Uracil)).unwrap();
        let partner = partner_frame();
        let atoms: Vec<(&str, Point3<f64>)> = template
            .atoms()
            .iter()
            .map(|(name, local)| {
                let mut position = partner.to_global(local);
                if name == "C5" {
                    position.z += 1.5;
                }
                (name.as_str(), position)
            })
            .collect();

        let mut structure = Structure::new();
        place_base(&mut structure, 'A', 1, "A", BaseType::Adenine, &ReferenceFrame::identity());
        add_residue_with_atoms(&mut structure, 'B', 1, "U", &atoms);

        let result = find(&mut structure);
        assert!(result.base_pairs.is_empty());
        assert!(matches!(
            result.frames.rejection_for(2),
            Some(FrameRejection::RmsdAboveCutoff { .. })
        ));
        assert!(result.validations.is_empty());
    }

    #[test]
    fn residue_with_two_ring_atoms_gets_no_frame() {
        let (mut structure, _, _) = watson_crick_pair();
        add_residue_with_atoms(
            &mut structure,
            'C',
            1,
            "G",
            &[
                ("N1", Point3::new(5.0, 0.0, 0.0)),
                ("C2", Point3::new(6.2, 0.7, 0.0)),
            ],
        );
        let result = find(&mut structure);
        assert_eq!(
            result.frames.rejection_for(3),
            Some(&FrameRejection::InsufficientRingAtoms { matched: 2 })
        );
        assert!(result.base_pairs.iter().all(|pair| !pair.contains(3)));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let first = find(&mut two_pair_duplex());
        let second = find(&mut two_pair_duplex());
        assert_eq!(first.base_pairs, second.base_pairs);
        assert_eq!(first.frames, second.frames);
    }

    #[test]
    fn phases_are_reported_in_order() {
        let (mut structure, _, _) = watson_crick_pair();
        let phases = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PhaseStart { name } = event {
                phases.lock().unwrap().push(name);
            }
        }));
        run(&mut structure, &registry(), &FinderConfig::default(), &reporter).unwrap();
        drop(reporter);
        assert_eq!(
            phases.into_inner().unwrap(),
            vec!["Frame Calculation", "Pair Validation", "Mutual-Best Selection"]
        );
    }

    #[test]
    fn invalid_configuration_is_rejected_before_work() {
        let (mut structure, _, _) = watson_crick_pair();
        let mut config = FinderConfig::default();
        config.selection.candidate_radius = 5.0;
        let error = run(&mut structure, &registry(), &config, &ProgressReporter::new()).unwrap_err();
        assert!(matches!(error, EngineError::Config { .. }));
        assert!(structure.residues_with_frames().next().is_none());
    }

    #[test]
    fn configuration_file_changes_selection() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[validation]\nmin-base-hbonds = 4").unwrap();

        let (mut structure, _, _) = watson_crick_pair();
        let result = run_with_resources(
            &mut structure,
            None,
            Some(file.path()),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert!(result.base_pairs.is_empty());
        assert!(!result.validations.get(1, 2).unwrap().is_valid);
    }

    #[test]
    fn missing_template_file_is_an_error() {
        let (mut structure, _, _) = watson_crick_pair();
        let error = run_with_resources(
            &mut structure,
            Some(Path::new("/nonexistent/nucleotides.toml")),
            None,
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(error, EngineError::Template { .. }));
    }

    #[test]
    fn builder_configuration_feeds_the_workflow() {
        let config = FinderConfigBuilder::new()
            .dorg_range(0.0, 10.0)
            .candidate_radius(12.0)
            .build()
            .unwrap();
        let (mut structure, _, _) = watson_crick_pair();
        let result = run(&mut structure, &registry(), &config, &ProgressReporter::new()).unwrap();
        assert_eq!(pair_keys(&result), vec![(1, 2)]);
    }
}
