//! Awl and Radd: bringing the shares to exactly the whole estate.
//!
//! Exactly one outcome is chosen per calculation. Scaling is a single
//! multiplicative pass that builds a new share sequence; the allocator's and
//! distributor's outputs are only read.

use mirath_types::{Fraction, Heir, Reconciliation};
use tracing::info;

use crate::allocator::FixedAllocation;
use crate::config::RaddPolicy;
use crate::hajb::{Resolution, Standing};
use crate::residuary::ResidueAllocation;

/// Final fraction of one eligible category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciledShare {
    pub heir: Heir,
    pub count: u32,
    pub standing: Standing,
    /// Fixed portion after any scaling.
    pub fixed: Fraction,
    pub residue: Fraction,
    /// Whether the fixed portion was scaled.
    pub scaled: bool,
}

impl ReconciledShare {
    #[must_use]
    pub fn fraction(&self) -> Fraction {
        self.fixed + self.residue
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    /// One entry per eligible category, in registry order.
    pub shares: Vec<ReconciledShare>,
    pub outcome: Reconciliation,
    /// Left without a recipient. Non-zero only with no eligible heir.
    pub unabsorbed: Fraction,
}

impl Reconciled {
    /// Outcome for a case with nothing eligible: the whole estate unabsorbed.
    #[must_use]
    pub fn unallocated() -> Self {
        Self {
            shares: Vec::new(),
            outcome: Reconciliation::Balanced,
            unabsorbed: Fraction::ONE,
        }
    }

    #[must_use]
    pub fn total(&self) -> Fraction {
        self.shares.iter().map(ReconciledShare::fraction).sum()
    }
}

/// Picks Balanced, Awl or Radd and produces the final fractions.
#[must_use]
pub fn reconcile(
    resolution: &Resolution,
    fixed: &FixedAllocation,
    residue: &ResidueAllocation,
    policy: RaddPolicy,
) -> Reconciled {
    let outcome = if fixed.total > Fraction::ONE {
        Reconciliation::AwlApplied
    } else if !residue.unabsorbed.is_zero() && !fixed.total.is_zero() {
        Reconciliation::RaddApplied
    } else {
        Reconciliation::Balanced
    };

    let factor_for = scaling(outcome, fixed, policy);
    let shares = resolution
        .eligible
        .iter()
        .map(|e| {
            let base = fixed.fraction_for(e.heir);
            let factor = factor_for(e.heir);
            let scaled = !base.is_zero() && factor.is_some_and(|f| f != Fraction::ONE);
            ReconciledShare {
                heir: e.heir,
                count: e.count,
                standing: e.standing,
                fixed: factor.map_or(base, |f| base * f),
                residue: residue.fraction_for(e.heir),
                scaled,
            }
        })
        .collect();
    let unabsorbed = match outcome {
        Reconciliation::RaddApplied => Fraction::ZERO,
        _ => residue.unabsorbed,
    };

    match outcome {
        Reconciliation::Balanced => {}
        _ => info!(
            outcome = %outcome,
            fixed_total = %fixed.total,
            "Fixed shares rescaled"
        ),
    }
    Reconciled {
        shares,
        outcome,
        unabsorbed,
    }
}

/// Returns the per-category scale factor, `None` meaning unchanged.
fn scaling(
    outcome: Reconciliation,
    fixed: &FixedAllocation,
    policy: RaddPolicy,
) -> impl Fn(Heir) -> Option<Fraction> {
    let proportional = fixed.total.recip();
    let (spouse_factor, other_factor) = match outcome {
        Reconciliation::Balanced => (None, None),
        Reconciliation::AwlApplied => (proportional, proportional),
        Reconciliation::RaddApplied => {
            let spouses: Fraction = fixed
                .shares
                .iter()
                .filter(|share| share.heir.is_spouse())
                .map(|share| share.fraction)
                .sum();
            let others = fixed.total.saturating_sub(spouses);
            match policy {
                RaddPolicy::ExcludeSpouse if !spouses.is_zero() && !others.is_zero() => (
                    None,
                    Fraction::ONE.saturating_sub(spouses).checked_div(others),
                ),
                _ => (proportional, proportional),
            }
        }
    };
    move |heir: Heir| {
        if heir.is_spouse() {
            spouse_factor
        } else {
            other_factor
        }
    }
}
