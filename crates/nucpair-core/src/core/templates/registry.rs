use crate::core::models::residue::{BaseCategory, BaseIdentity, BaseType};
use crate::core::utils::identifiers::{canonical_atom_name, ring_atom_names};
use nalgebra::Point3;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;

const BUNDLED_REGISTRY: &str = include_str!("../../../data/nucleotides.toml");
const BUNDLED_SOURCE: &str = "<bundled nucleotides.toml>";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    #[serde(default)]
    residues: HashMap<String, ResidueEntry>,
    #[serde(default)]
    templates: Vec<TemplateEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResidueEntry {
    base: String,
    #[serde(default)]
    modified: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TemplateEntry {
    base: String,
    #[serde(default)]
    modified: bool,
    atoms: Vec<TemplateAtomEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TemplateAtomEntry {
    name: String,
    position: [f64; 3],
}

/// Standard geometry of one base in its own reference frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTemplate {
    identity: BaseIdentity,
    atoms: Vec<(String, Point3<f64>)>,
}

impl BaseTemplate {
    pub fn identity(&self) -> BaseIdentity {
        self.identity
    }

    /// Identifier such as `Atomic_A` (standard) or `Atomic.a` (modified).
    pub fn id(&self) -> String {
        let separator = if self.identity.modified { '.' } else { '_' };
        format!("Atomic{}{}", separator, self.identity.one_letter())
    }

    pub fn atoms(&self) -> &[(String, Point3<f64>)] {
        &self.atoms
    }

    pub fn position(&self, atom_name: &str) -> Option<Point3<f64>> {
        let name = canonical_atom_name(atom_name);
        self.atoms
            .iter()
            .find(|(atom, _)| *atom == name)
            .map(|(_, position)| *position)
    }
}

/// Read-only lookup of base templates and residue-name classifications.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<BaseIdentity, BaseTemplate>,
    residues: HashMap<String, BaseIdentity>,
}

impl TemplateRegistry {
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let content = std::fs::read_to_string(path).map_err(|e| TemplateError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, TemplateError> {
        Self::parse(content, "<string>")
    }

    /// The registry bundled with the crate (`data/nucleotides.toml`).
    pub fn standard() -> Result<Self, TemplateError> {
        Self::parse(BUNDLED_REGISTRY, BUNDLED_SOURCE)
    }

    fn parse(content: &str, source: &str) -> Result<Self, TemplateError> {
        let file: RegistryFile = toml::from_str(content).map_err(|e| TemplateError::Toml {
            path: source.to_string(),
            source: e,
        })?;

        let mut templates = BTreeMap::new();
        for entry in file.templates {
            let base = parse_base(&entry.base, "template")?;
            let identity = BaseIdentity::new(base, entry.modified);
            let template = BaseTemplate {
                identity,
                atoms: entry
                    .atoms
                    .into_iter()
                    .map(|atom| {
                        let [x, y, z] = atom.position;
                        (canonical_atom_name(&atom.name), Point3::new(x, y, z))
                    })
                    .collect(),
            };
            check_ring_complete(&template)?;
            if templates.insert(identity, template).is_some() {
                return Err(TemplateError::DuplicateTemplate(identity.one_letter()));
            }
        }

        let mut residues = HashMap::with_capacity(file.residues.len());
        for (name, entry) in file.residues {
            let base = parse_base(&entry.base, &name)?;
            let identity = BaseIdentity::new(base, entry.modified);
            if !templates.contains_key(&identity)
                && !templates.contains_key(&BaseIdentity::standard(base))
            {
                return Err(TemplateError::MissingTemplate {
                    residue: name,
                    base: identity.one_letter(),
                });
            }
            residues.insert(name.trim().to_ascii_uppercase(), identity);
        }

        Ok(Self {
            templates,
            residues,
        })
    }

    /// Base identity registered for a residue name (case-insensitive).
    pub fn classify(&self, residue_name: &str) -> Option<BaseIdentity> {
        self.residues
            .get(&residue_name.trim().to_ascii_uppercase())
            .copied()
    }

    /// Template for an identity, falling back to the unmodified template of the same base.
    pub fn template(&self, identity: BaseIdentity) -> Option<&BaseTemplate> {
        self.templates
            .get(&identity)
            .or_else(|| self.templates.get(&BaseIdentity::standard(identity.base)))
    }

    /// Unmodified templates, in base order.
    pub fn standard_templates(&self) -> impl Iterator<Item = &BaseTemplate> {
        self.templates
            .values()
            .filter(|template| !template.identity.modified)
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    pub fn residue_name_count(&self) -> usize {
        self.residues.len()
    }
}

fn parse_base(value: &str, context: &str) -> Result<BaseType, TemplateError> {
    value.parse().map_err(|_| TemplateError::UnknownBase {
        context: context.to_string(),
        value: value.to_string(),
    })
}

fn check_ring_complete(template: &BaseTemplate) -> Result<(), TemplateError> {
    let purine = template.identity.category() == BaseCategory::Purine;
    let missing: Vec<String> = ring_atom_names(purine)
        .iter()
        .filter(|name| template.position(name).is_none())
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(TemplateError::IncompleteTemplate {
            template: template.id(),
            missing,
        })
    }
}

#[derive(Debug, Error)]
pub enum TemplateError {
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
    #[error("Unknown base '{value}' in entry '{context}'")]
    UnknownBase { context: String, value: String },
    #[error("Residue '{residue}' maps to base '{base}' but no template exists for it")]
    MissingTemplate { residue: String, base: char },
    #[error("Template '{template}' is missing ring atoms: {missing:?}")]
    IncompleteTemplate {
        template: String,
        missing: Vec<String>,
    },
    #[error("Template for base '{0}' is defined more than once")]
    DuplicateTemplate(char),
}
