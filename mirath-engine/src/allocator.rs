//! Fixed-share allocation for eligible, non-shifted Qur'anic heirs.
//!
//! Fractions apply to the whole category. The count of a category only
//! matters for per-head amounts later on, except where the rule itself
//! depends on multiplicity (two or more daughters, uterine siblings).

use mirath_types::{Fraction, Heir};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::hajb::{EligibleHeir, Resolution};
use crate::registry::Portion;

/// A candidate fixed fraction for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedShare {
    pub heir: Heir,
    pub fraction: Fraction,
}

/// Output of the allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedAllocation {
    pub shares: Vec<FixedShare>,
    /// Sum of `shares`. May exceed one.
    pub total: Fraction,
}

impl FixedAllocation {
    #[must_use]
    pub fn fraction_for(&self, heir: Heir) -> Fraction {
        self.shares
            .iter()
            .find(|share| share.heir == heir)
            .map_or(Fraction::ZERO, |share| share.fraction)
    }
}

/// Assigns each eligible category with a fixed standing its fraction.
///
/// Fails with `ConflictingFixedShares` when no row of the category's table
/// matches, which points at a gap in the registry rather than bad input.
pub fn allocate(resolution: &Resolution) -> EngineResult<FixedAllocation> {
    let shares = resolution
        .eligible
        .iter()
        .filter(|e| e.standing.has_fixed_share())
        .map(|e| {
            Ok(FixedShare {
                heir: e.heir,
                fraction: fixed_fraction(e, resolution)?,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;
    let total = shares.iter().map(|share| share.fraction).sum();

    debug!(categories = shares.len(), total = %total, "Fixed shares allocated");
    Ok(FixedAllocation { shares, total })
}

fn fixed_fraction(eligible: &EligibleHeir, resolution: &Resolution) -> EngineResult<Fraction> {
    let rule = eligible.rule();
    let row = rule
        .matching_row(&resolution.present)
        .ok_or_else(|| EngineError::ConflictingFixedShares {
            heir: eligible.heir,
            detail: "no share row matches the present heirs".into(),
        })?;
    let conflict = |detail: &str| EngineError::ConflictingFixedShares {
        heir: eligible.heir,
        detail: detail.to_string(),
    };

    match row.portion {
        Portion::Share(fraction) => Ok(fraction),
        Portion::SharedByCategory(fraction, group) => {
            let sharing = group.iter().filter(|&&h| resolution.is_eligible(h)).count();
            fraction
                .checked_split(sharing as u128)
                .ok_or_else(|| conflict("sharing group has no eligible member"))
        }
        Portion::Uterine(group) => {
            let heads: u128 = group
                .iter()
                .map(|&h| u128::from(resolution.eligible_count(h)))
                .sum();
            match heads {
                0 => Err(conflict("uterine group has no eligible member")),
                1 => Ok(Fraction::new(1, 6)),
                _ => Ok(Fraction::new(u128::from(eligible.count), 3 * heads)),
            }
        }
        Portion::ThirdOfRemainderAfterSpouse => {
            let spouse = resolution
                .eligible
                .iter()
                .find(|e| e.heir.is_spouse())
                .ok_or_else(|| conflict("no eligible spouse"))?;
            let spouse_share = match spouse.rule().matching_row(&resolution.present) {
                Some(row) => match row.portion {
                    Portion::Share(fraction) => fraction,
                    _ => return Err(conflict("spouse share is not a plain fraction")),
                },
                None => return Err(conflict("no share row for the spouse")),
            };
            Ok(Fraction::ONE.saturating_sub(spouse_share) * Fraction::new(1, 3))
        }
    }
}
