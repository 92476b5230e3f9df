use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid range for '{name}': min {min} is greater than max {max}")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min.is_nan() || self.max.is_nan() || self.min > self.max {
            return Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            reason: format!("must be a positive finite number, got {value}"),
        })
    }
}

fn require_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            reason: format!("must be a non-negative finite number, got {value}"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FrameConfig {
    /// Maximum ring RMSD (Å) against the standard base geometry.
    pub rmsd_cutoff: f64,
    /// Include C1' in the template fit.
    pub include_glycosidic_carbon: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            rmsd_cutoff: 0.2618,
            include_glycosidic_carbon: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct HBondConfig {
    pub lower_distance: f64,
    pub base_base_max: f64,
    pub base_backbone_max: f64,
    pub backbone_backbone_max: f64,
    pub sugar_max: f64,
    /// Upper distance at which a conflict loser is kept.
    pub conflict_max: f64,
    /// Element symbols allowed on both ends of a bond.
    pub elements: Vec<String>,
    pub check_angles: bool,
    pub min_angle: f64,
}

impl Default for HBondConfig {
    fn default() -> Self {
        Self {
            lower_distance: 1.8,
            base_base_max: 4.0,
            base_backbone_max: 3.5,
            backbone_backbone_max: 3.5,
            sugar_max: 3.5,
            conflict_max: 4.5,
            elements: vec!["N".to_string(), "O".to_string()],
            check_angles: false,
            min_angle: 90.0,
        }
    }
}

impl HBondConfig {
    /// Largest distance any candidate may have, over all contexts.
    pub fn max_distance(&self) -> f64 {
        self.base_base_max
            .max(self.base_backbone_max)
            .max(self.backbone_backbone_max)
            .max(self.sugar_max)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ValidationConfig {
    pub dorg: Range,
    pub d_v: Range,
    pub plane_angle: Range,
    pub dnn: Range,
    /// Overlap areas at or above this value fail the check.
    pub overlap_threshold: f64,
    pub min_base_hbonds: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            dorg: Range::new(0.0, 15.0),
            d_v: Range::new(0.0, 2.5),
            plane_angle: Range::new(0.0, 65.0),
            dnn: Range::new(4.5, 1e18),
            overlap_threshold: 0.01,
            min_base_hbonds: 1,
        }
    }
}

/// Which parameter triple feeds the Watson-Crick/wobble classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationMode {
    /// Reads (shear, stretch, stagger) in place of (shear, stretch, opening),
    /// reproducing the output of the established reference tool.
    #[default]
    Legacy,
    Corrected,
}

/// How hydrogen-bond distances are compared against the good-distance window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HBondDistanceMode {
    /// Distances are first rounded to two decimals through their text form.
    #[default]
    Rounded,
    Raw,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ScoringConfig {
    pub mode: ClassificationMode,
    pub hbond_distance_mode: HBondDistanceMode,
    pub good_hbond_distance: Range,
    pub hbond_bonus_cap: f64,
    pub watson_crick_bonus: f64,
    pub max_stretch: f64,
    pub max_opening: f64,
    pub wobble_shear: Range,
    pub max_watson_crick_shear: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mode: ClassificationMode::Legacy,
            hbond_distance_mode: HBondDistanceMode::Rounded,
            good_hbond_distance: Range::new(2.5, 3.5),
            hbond_bonus_cap: 3.0,
            watson_crick_bonus: 2.0,
            max_stretch: 2.0,
            max_opening: 60.0,
            wobble_shear: Range::new(1.8, 2.8),
            max_watson_crick_shear: 1.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SelectionConfig {
    /// Origin-origin distance (Å) within which residue pairs are validated.
    pub candidate_radius: f64,
    /// Scores closer than this are treated as ties and resolved by residue index.
    pub tie_epsilon: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            candidate_radius: 20.0,
            tie_epsilon: 1e-6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FinderConfig {
    pub frames: FrameConfig,
    pub hbonds: HBondConfig,
    pub validation: ValidationConfig,
    pub scoring: ScoringConfig,
    pub selection: SelectionConfig,
}

impl FinderConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<string>")
    }

    fn parse(content: &str, source: &str) -> Result<Self, ConfigError> {
        let config: FinderConfig = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: source.to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("frames.rmsd-cutoff", self.frames.rmsd_cutoff)?;

        let hb = &self.hbonds;
        require_non_negative("hbonds.lower-distance", hb.lower_distance)?;
        for (name, max) in [
            ("hbonds.base-base-max", hb.base_base_max),
            ("hbonds.base-backbone-max", hb.base_backbone_max),
            ("hbonds.backbone-backbone-max", hb.backbone_backbone_max),
            ("hbonds.sugar-max", hb.sugar_max),
            ("hbonds.conflict-max", hb.conflict_max),
        ] {
            Range::new(hb.lower_distance, max).validate(name)?;
        }
        if hb.elements.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "hbonds.elements",
                reason: "at least one element is required".to_string(),
            });
        }

        let v = &self.validation;
        v.dorg.validate("validation.dorg")?;
        v.d_v.validate("validation.d-v")?;
        v.plane_angle.validate("validation.plane-angle")?;
        v.dnn.validate("validation.dnn")?;
        require_non_negative("validation.overlap-threshold", v.overlap_threshold)?;

        let s = &self.scoring;
        s.good_hbond_distance
            .validate("scoring.good-hbond-distance")?;
        s.wobble_shear.validate("scoring.wobble-shear")?;
        require_non_negative("scoring.max-stretch", s.max_stretch)?;
        require_non_negative("scoring.max-opening", s.max_opening)?;

        require_positive("selection.candidate-radius", self.selection.candidate_radius)?;
        require_non_negative("selection.tie-epsilon", self.selection.tie_epsilon)?;
        if self.selection.candidate_radius < v.dorg.max {
            return Err(ConfigError::InvalidValue {
                name: "selection.candidate-radius",
                reason: format!(
                    "{} is smaller than the maximum origin distance {}",
                    self.selection.candidate_radius, v.dorg.max
                ),
            });
        }
        Ok(())
    }
}

/// Fluent construction of a [`FinderConfig`] starting from the defaults.
#[derive(Debug, Default)]
pub struct FinderConfigBuilder {
    config: FinderConfig,
}

impl FinderConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rmsd_cutoff(mut self, cutoff: f64) -> Self {
        self.config.frames.rmsd_cutoff = cutoff;
        self
    }
    pub fn include_glycosidic_carbon(mut self, include: bool) -> Self {
        self.config.frames.include_glycosidic_carbon = include;
        self
    }
    pub fn hbond_lower_distance(mut self, distance: f64) -> Self {
        self.config.hbonds.lower_distance = distance;
        self
    }
    pub fn hbond_base_base_max(mut self, distance: f64) -> Self {
        self.config.hbonds.base_base_max = distance;
        self
    }
    pub fn hbond_elements(mut self, elements: &[&str]) -> Self {
        self.config.hbonds.elements = elements.iter().map(|e| e.to_string()).collect();
        self
    }
    pub fn check_hbond_angles(mut self, check: bool) -> Self {
        self.config.hbonds.check_angles = check;
        self
    }
    pub fn dorg_range(mut self, min: f64, max: f64) -> Self {
        self.config.validation.dorg = Range::new(min, max);
        self
    }
    pub fn d_v_range(mut self, min: f64, max: f64) -> Self {
        self.config.validation.d_v = Range::new(min, max);
        self
    }
    pub fn plane_angle_range(mut self, min: f64, max: f64) -> Self {
        self.config.validation.plane_angle = Range::new(min, max);
        self
    }
    pub fn dnn_range(mut self, min: f64, max: f64) -> Self {
        self.config.validation.dnn = Range::new(min, max);
        self
    }
    pub fn overlap_threshold(mut self, threshold: f64) -> Self {
        self.config.validation.overlap_threshold = threshold;
        self
    }
    pub fn min_base_hbonds(mut self, count: usize) -> Self {
        self.config.validation.min_base_hbonds = count;
        self
    }
    pub fn classification_mode(mut self, mode: ClassificationMode) -> Self {
        self.config.scoring.mode = mode;
        self
    }
    pub fn hbond_distance_mode(mut self, mode: HBondDistanceMode) -> Self {
        self.config.scoring.hbond_distance_mode = mode;
        self
    }
    pub fn candidate_radius(mut self, radius: f64) -> Self {
        self.config.selection.candidate_radius = radius;
        self
    }
    pub fn tie_epsilon(mut self, epsilon: f64) -> Self {
        self.config.selection.tie_epsilon = epsilon;
        self
    }

    pub fn build(self) -> Result<FinderConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
