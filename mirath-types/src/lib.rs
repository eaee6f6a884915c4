//! Core type definitions for the Mirath inheritance engine.
//!
//! This crate defines the data model shared by the engine and its callers:
//! - Heir categories and the deceased's gender
//! - Exact share fractions
//! - The estate input and the share table produced for it
//!
//! No inheritance rules live here; see `mirath-engine`.

mod estate;
mod fraction;
mod heir;
mod share;

pub use estate::{EstateInput, HeirEntry};
pub use fraction::Fraction;
pub use heir::{Gender, Heir, HeirLabel};
pub use share::{CalculationResult, Classification, Reconciliation, ShareRecord, ShareStatus};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown heir category: {0}")]
    UnknownHeir(String),

    #[error("invalid fraction: {0}")]
    InvalidFraction(String),
}
