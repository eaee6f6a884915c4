//! Estate normalization: from gross assets to the distributable estate, and
//! from final fractions to currency amounts.
//!
//! Deductions apply in a fixed order: liabilities, funeral expenses, then
//! bequests capped at one third of what is left. Amounts are rounded to the
//! configured currency precision; the difference between the net estate and
//! the rounded total is reported as drift, never absorbed into a share.

use mirath_types::{
    CalculationResult, Classification, EstateInput, Fraction, ShareRecord, ShareStatus,
};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::hajb::{Resolution, Standing};
use crate::reconcile::{Reconciled, ReconciledShare};
use crate::registry;

/// Validated estate figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstateBreakdown {
    pub assets: Decimal,
    pub liabilities: Decimal,
    pub funeral_expenses: Decimal,
    pub bequest_applied: Decimal,
    /// Distributable estate, rounded to currency precision.
    pub net_estate: Decimal,
}

impl EstateBreakdown {
    /// Validates the money side of the input and applies the deductions.
    pub fn from_input(input: &EstateInput, config: &EngineConfig) -> EngineResult<Self> {
        non_negative("assets", input.assets)?;
        non_negative("liabilities", input.liabilities)?;
        non_negative("funeralExpenses", input.funeral_expenses)?;
        non_negative("bequests", input.bequests)?;

        if input.liabilities >= input.assets {
            return Err(EngineError::InvalidEstate {
                field: "liabilities",
                reason: format!(
                    "liabilities {} must be strictly less than assets {}",
                    input.liabilities, input.assets
                ),
            });
        }
        let after_liabilities = input.assets - input.liabilities;
        if input.funeral_expenses >= after_liabilities {
            return Err(EngineError::InvalidEstate {
                field: "funeralExpenses",
                reason: format!(
                    "funeral expenses {} consume the whole estate of {after_liabilities}",
                    input.funeral_expenses
                ),
            });
        }
        let after_funeral = after_liabilities - input.funeral_expenses;

        let precision = config.currency_precision;
        let bequest_cap = (after_funeral / Decimal::from(3))
            .round_dp_with_strategy(precision, RoundingStrategy::ToZero);
        let bequest_applied = input.bequests.min(bequest_cap);
        let net_estate = (after_funeral - bequest_applied)
            .round_dp_with_strategy(precision, config.rounding.strategy());

        debug!(
            net_estate = %net_estate,
            bequest_applied = %bequest_applied,
            "Estate normalized"
        );
        Ok(Self {
            assets: input.assets,
            liabilities: input.liabilities,
            funeral_expenses: input.funeral_expenses,
            bequest_applied,
            net_estate,
        })
    }

    /// `fraction` of the net estate, rounded to currency precision.
    pub fn amount_of(&self, fraction: Fraction, config: &EngineConfig) -> EngineResult<Decimal> {
        let exact = fraction
            .checked_of(self.net_estate)
            .ok_or_else(|| EngineError::InvalidEstate {
                field: "assets",
                reason: format!("{fraction} of {} is out of range", self.net_estate),
            })?;
        Ok(exact.round_dp_with_strategy(config.currency_precision, config.rounding.strategy()))
    }
}

fn non_negative(field: &'static str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::InvalidEstate {
            field,
            reason: format!("must not be negative, got {value}"),
        });
    }
    Ok(())
}

/// How a final share is labelled.
fn classify(share: &ReconciledShare) -> Classification {
    match share.standing {
        Standing::Residuary => Classification::Residuary,
        Standing::FixedAndResiduary if !share.residue.is_zero() => Classification::Residuary,
        _ if share.scaled => Classification::ReconciledFixed,
        _ => Classification::Fixed,
    }
}

/// Builds the share table: one record per present category, in registry
/// order, with excluded categories carrying zero.
pub fn finalize(
    resolution: &Resolution,
    reconciled: &Reconciled,
    estate: &EstateBreakdown,
    config: &EngineConfig,
) -> EngineResult<CalculationResult> {
    let mut shares = Vec::with_capacity(resolution.excluded.len() + reconciled.shares.len());
    for entry in resolution.present.iter() {
        let Some(share) = reconciled.shares.iter().find(|s| s.heir == entry.heir) else {
            let nominal = if registry::lookup(entry.heir).has_fixed_share() {
                Classification::Fixed
            } else {
                Classification::Residuary
            };
            shares.push(ShareRecord::excluded(entry.heir, entry.count, nominal));
            continue;
        };

        let fraction = share.fraction();
        let per_head_fraction = fraction
            .checked_split(u128::from(share.count))
            .ok_or_else(|| EngineError::InvalidCount {
                heir: share.heir,
                count: i64::from(share.count),
                reason: "count must be at least 1".into(),
            })?;
        shares.push(ShareRecord {
            heir: share.heir,
            count: share.count,
            classification: classify(share),
            status: ShareStatus::Allocated,
            fraction,
            amount: estate.amount_of(fraction, config)?,
            per_head_fraction,
            per_head_amount: estate.amount_of(per_head_fraction, config)?,
        });
    }

    let total_fraction = reconciled.total();
    let allocated_amount: Decimal = shares
        .iter()
        .filter(|record| record.is_allocated())
        .map(|record| record.amount)
        .sum();
    let rounding_drift = if shares.iter().any(ShareRecord::is_allocated) {
        estate.net_estate - allocated_amount
    } else {
        Decimal::ZERO
    };

    debug!(
        records = shares.len(),
        total_fraction = %total_fraction,
        rounding_drift = %rounding_drift,
        "Share table built"
    );
    Ok(CalculationResult {
        net_estate: estate.net_estate,
        bequest_applied: estate.bequest_applied,
        shares,
        total_fraction,
        unabsorbed_fraction: reconciled.unabsorbed,
        reconciliation: reconciled.outcome,
        rounding_drift,
    })
}
