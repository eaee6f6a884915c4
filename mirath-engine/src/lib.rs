//! Fara'id share-allocation engine.
//!
//! A calculation runs through these stages, each a pure function of the
//! previous stage's output:
//!
//! - [`registry`] — embedded rule table for every heir category
//! - [`hajb`] — one-pass exclusion and shift-to-residuary decisions
//! - [`allocator`] — fixed Qur'anic fractions
//! - [`residuary`] — weighted split of what remains
//! - [`reconcile`] — Awl or Radd when the fractions miss the whole estate
//! - [`normalize`] — net estate, rounded amounts and drift
//!
//! The engine holds no shared mutable state, does no I/O during a
//! calculation, and returns bit-identical output for identical input.

pub mod allocator;
pub mod config;
pub mod error;
pub mod hajb;
pub mod normalize;
pub mod present;
pub mod reconcile;
pub mod registry;
pub mod residuary;
pub mod wire;

pub use config::{EngineConfig, RaddPolicy, RoundingMode};
pub use error::{EngineError, EngineResult};
pub use wire::{CalculationRequest, CalculationResponse, ErrorBody};

use mirath_types::{CalculationResult, EstateInput};
use tracing::{debug, warn};

use crate::normalize::EstateBreakdown;
use crate::present::PresentHeirs;
use crate::reconcile::Reconciled;

/// Divides one estate.
///
/// All input validation happens before any share is allocated; on error
/// no partial result is returned.
pub fn calculate(input: &EstateInput, config: &EngineConfig) -> EngineResult<CalculationResult> {
    config.validate()?;
    let present = PresentHeirs::from_entries(&input.heirs, input.deceased, config)?;
    let estate = EstateBreakdown::from_input(input, config)?;
    debug!(
        deceased = %input.deceased,
        categories = input.heirs.len(),
        "Calculation started"
    );

    let resolution = hajb::resolve(&present);
    if resolution.eligible.is_empty() {
        debug!("No eligible heirs, estate left unabsorbed");
        return normalize::finalize(&resolution, &Reconciled::unallocated(), &estate, config);
    }

    let fixed = allocator::allocate(&resolution)?;
    let residue = residuary::distribute(&fixed, &resolution);
    let reconciled = reconcile::reconcile(&resolution, &fixed, &residue, config.radd);
    normalize::finalize(&resolution, &reconciled, &estate, config)
}

/// Runs a wire request end to end.
pub fn calculate_request(
    request: &CalculationRequest,
    config: &EngineConfig,
) -> EngineResult<CalculationResponse> {
    let input = request.to_input()?;
    let result = calculate(&input, config)?;
    let response = CalculationResponse::from(&result);
    if !response.fractions_balance(config.fraction_tolerance) {
        warn!(
            total = response.total_fraction_allocated,
            tolerance = config.fraction_tolerance,
            "Allocated fractions outside tolerance"
        );
    }
    Ok(response)
}

/// Parses a JSON request and returns the JSON response.
pub fn calculate_json(body: &str, config: &EngineConfig, pretty: bool) -> EngineResult<String> {
    let request = CalculationRequest::from_json(body)?;
    calculate_request(&request, config)?.to_json(pretty)
}
