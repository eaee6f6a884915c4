//! Error types for the inheritance engine.

use mirath_types::{Gender, Heir};
use thiserror::Error;

/// Engine errors.
///
/// Input errors are detected before any allocation work begins. Internal
/// defects (`ConflictingFixedShares`) point at a rule-table gap and are
/// reported as a distinct class; see [`EngineError::is_internal`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// Estate figures are unusable (negative, non-finite, or liabilities
    /// not strictly below assets).
    #[error("invalid estate: {field}: {reason}")]
    InvalidEstate { field: &'static str, reason: String },

    /// Heir label not in the registry.
    #[error("unknown heir category: {0}")]
    UnknownCategory(String),

    /// Heir count outside the accepted range for its category.
    #[error("invalid count {count} for {heir}: {reason}")]
    InvalidCount {
        heir: Heir,
        count: i64,
        reason: String,
    },

    /// Heir that cannot exist for a deceased of this gender.
    #[error("{heir} cannot inherit from a {deceased} deceased")]
    IncompatibleHeir { heir: Heir, deceased: Gender },

    /// The same category was listed twice.
    #[error("duplicate heir category: {0}")]
    DuplicateHeir(Heir),

    /// No fixed-share rule matched a present, eligible heir.
    #[error("no fixed-share rule for {heir}: {detail}")]
    ConflictingFixedShares { heir: Heir, detail: String },

    /// Engine configuration rejected.
    #[error("invalid engine config: {0}")]
    Config(String),

    /// Request or response could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EngineError {
    /// True for defects in the rule tables rather than in the caller's input.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::ConflictingFixedShares { .. })
    }

    /// Stable machine-readable kind, used in error bodies.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEstate { .. } => "InvalidEstate",
            Self::UnknownCategory(_) => "UnknownCategory",
            Self::InvalidCount { .. } => "InvalidCount",
            Self::IncompatibleHeir { .. } => "IncompatibleHeir",
            Self::DuplicateHeir(_) => "DuplicateHeir",
            Self::ConflictingFixedShares { .. } => "ConflictingFixedShares",
            Self::Config(_) => "Config",
            Self::Serialization(_) => "Serialization",
        }
    }

    /// The request field the error refers to, when there is one.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidEstate { field, .. } => Some(*field),
            Self::UnknownCategory(_)
            | Self::InvalidCount { .. }
            | Self::IncompatibleHeir { .. }
            | Self::DuplicateHeir(_) => Some("heirs"),
            _ => None,
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
