//! Residue distribution by weighted head count.

use mirath_types::{Fraction, Heir};
use tracing::debug;

use crate::allocator::FixedAllocation;
use crate::hajb::Resolution;

/// One category's portion of the residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidueShare {
    pub heir: Heir,
    pub fraction: Fraction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueAllocation {
    pub shares: Vec<ResidueShare>,
    /// Residue nobody could take. Zero whenever a residuary heir exists or
    /// the fixed shares already cover the estate.
    pub unabsorbed: Fraction,
}

impl ResidueAllocation {
    #[must_use]
    pub fn fraction_for(&self, heir: Heir) -> Fraction {
        self.shares
            .iter()
            .find(|share| share.heir == heir)
            .map_or(Fraction::ZERO, |share| share.fraction)
    }

    #[must_use]
    pub fn has_residuary_heir(&self) -> bool {
        !self.shares.is_empty()
    }
}

/// Splits `1 - fixed.total` across residuary categories in proportion to
/// count × weight.
///
/// With the fixed shares at or above one, every residuary category receives
/// zero. With no residuary category, the remainder is passed through as
/// unabsorbed.
#[must_use]
pub fn distribute(fixed: &FixedAllocation, resolution: &Resolution) -> ResidueAllocation {
    let remainder = Fraction::ONE.saturating_sub(fixed.total);
    let takers: Vec<(Heir, u128)> = resolution
        .eligible
        .iter()
        .filter(|e| e.standing.takes_residue())
        .map(|e| (e.heir, u128::from(e.count) * u128::from(e.rule().residuary_weight)))
        .collect();
    let total_units: u128 = takers.iter().map(|&(_, units)| units).sum();

    let (shares, unabsorbed) = match remainder.checked_split(total_units) {
        Some(per_unit) => (
            takers
                .iter()
                .map(|&(heir, units)| ResidueShare {
                    heir,
                    fraction: per_unit.scale(units),
                })
                .collect(),
            Fraction::ZERO,
        ),
        None => (Vec::new(), remainder),
    };

    debug!(
        remainder = %remainder,
        takers = takers.len(),
        unabsorbed = %unabsorbed,
        "Residue distributed"
    );
    ResidueAllocation { shares, unabsorbed }
}
