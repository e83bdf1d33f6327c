//! Central error handling for light configuration and shadow baking
//!
//! Provides a unified LightError enum with consistent categorization
//! matching the failure taxonomy of the configuration pipeline.

use crate::renderer::RenderFailure;

/// Centralized error type for all light-configuration operations
#[derive(thiserror::Error, Debug)]
pub enum LightError {
    /// Missing or invalid required parameter. Recoverable by the caller
    /// fixing its input; never retried internally.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unknown light kind tag. Fatal for the configure call that saw it.
    #[error("Unsupported light kind: {0}")]
    UnsupportedLightKind(String),

    /// Sub-render execution did not complete. Fatal for the light being
    /// configured, without affecting other lights.
    #[error("Bake failure: {0}")]
    Bake(String),
}

impl LightError {
    /// Convenience constructors for common error types
    pub fn configuration<T: ToString>(msg: T) -> Self {
        LightError::Configuration(msg.to_string())
    }

    /// A required parameter was absent from the light description.
    pub fn missing(key: &str) -> Self {
        LightError::Configuration(format!("missing required parameter '{}'", key))
    }

    /// A parameter was present but out of its valid range.
    pub fn invalid(key: &str, why: &str) -> Self {
        LightError::Configuration(format!("invalid parameter '{}': {}", key, why))
    }

    pub fn unsupported_kind<T: ToString>(name: T) -> Self {
        LightError::UnsupportedLightKind(name.to_string())
    }

    pub fn bake<T: ToString>(msg: T) -> Self {
        LightError::Bake(msg.to_string())
    }

    /// Attaches the identity of the failing light, preserving the category.
    pub fn for_light(self, name: &str) -> Self {
        match self {
            LightError::Configuration(m) => {
                LightError::Configuration(format!("light '{}': {}", name, m))
            }
            LightError::UnsupportedLightKind(m) => {
                LightError::UnsupportedLightKind(format!("light '{}': {}", name, m))
            }
            LightError::Bake(m) => LightError::Bake(format!("light '{}': {}", name, m)),
        }
    }
}

impl From<RenderFailure> for LightError {
    fn from(err: RenderFailure) -> Self {
        LightError::Bake(err.to_string())
    }
}

/// Result type alias for light-configuration operations
pub type LightResult<T> = Result<T, LightError>;
