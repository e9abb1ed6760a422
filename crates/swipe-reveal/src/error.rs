//! Error types for swipe-reveal.

use thiserror::Error;

pub use swipe_reveal_core::StateError;

/// Structural problems detected while measuring or laying out a
/// [`SwipeRevealLayout`](crate::SwipeRevealLayout).
///
/// These are programmer errors: the container was assembled incorrectly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The container needs a secondary and a main child.
    #[error("swipe reveal layout needs two children (secondary, main), found {found}")]
    MissingChildren { found: usize },

    /// `layout` was called before any successful `measure`.
    #[error("layout requested before the children were measured")]
    NotMeasured,
}

/// Errors raised while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("failed to parse swipe reveal configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value was out of range.
    #[error("invalid value for '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// The main error type for swipe-reveal operations.
#[derive(Error, Debug)]
pub enum SwipeError {
    /// Measurement or layout failed.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Configuration failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Saving or restoring row state failed.
    #[error(transparent)]
    State(#[from] StateError),
}

/// A specialized Result type for swipe-reveal operations.
pub type Result<T> = std::result::Result<T, SwipeError>;
