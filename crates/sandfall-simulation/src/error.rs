//! Load-time configuration errors

use thiserror::Error;

use crate::registry::Role;

/// Fatal error raised while turning element definitions into a registry.
///
/// None of these can occur once a world exists: the registry is immutable
/// after construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("color string is empty")]
    EmptyColor,

    #[error("invalid hex color '{0}' (expected #RRGGBB)")]
    InvalidHexColor(String),

    #[error("invalid color name '{0}'")]
    UnknownColorName(String),

    #[error("element '{0}' is defined more than once")]
    DuplicateElement(String),

    #[error("element '{element}' references undefined element '{target}'")]
    UnknownElement { element: String, target: String },

    #[error("element '{element}' has invalid chance value '{value}'")]
    InvalidProbability { element: String, value: String },

    #[error("no element has the {0:?} role")]
    MissingRole(Role),

    #[error("too many elements: {0} (at most {max})", max = u16::MAX as usize + 1)]
    TooManyElements(usize),

    #[error("invalid grid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("failed to parse element definitions: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
