use thiserror::Error;

use super::config::ConfigError;
use crate::core::templates::registry::TemplateError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Template registry error: {source}")]
    Template {
        #[from]
        source: TemplateError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Residue with legacy index {0} not found in structure")]
    ResidueNotFound(usize),

    #[error("Internal logic error: {0}")]
    Internal(String),
}
