//! Hajb: exclusion of heirs by closer relatives.
//!
//! Runs in a single pass. Every present category is tested against the
//! original snapshot, so an heir that is itself excluded still blocks those
//! further away.

use mirath_types::{Heir, HeirEntry};
use tracing::debug;

use crate::present::PresentHeirs;
use crate::registry::{self, HeirCategoryRule};

/// How an eligible category takes part in the division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    /// A fixed share only.
    Fixed,
    /// Residue only. For a Qur'anic category this means it was shifted.
    Residuary,
    /// A fixed share plus a claim on the residue.
    FixedAndResiduary,
}

impl Standing {
    #[must_use]
    pub fn has_fixed_share(self) -> bool {
        matches!(self, Self::Fixed | Self::FixedAndResiduary)
    }

    #[must_use]
    pub fn takes_residue(self) -> bool {
        matches!(self, Self::Residuary | Self::FixedAndResiduary)
    }
}

/// A category that survived exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibleHeir {
    pub heir: Heir,
    pub count: u32,
    pub standing: Standing,
}

impl EligibleHeir {
    #[must_use]
    pub fn rule(&self) -> &'static HeirCategoryRule {
        registry::lookup(self.heir)
    }

    /// A Qur'anic category moved to residuary status.
    #[must_use]
    pub fn is_shifted(&self) -> bool {
        self.standing == Standing::Residuary && self.rule().has_fixed_share()
    }
}

/// Partition of the present heirs into excluded and eligible categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub present: PresentHeirs,
    pub excluded: Vec<HeirEntry>,
    pub eligible: Vec<EligibleHeir>,
}

impl Resolution {
    #[must_use]
    pub fn is_eligible(&self, heir: Heir) -> bool {
        self.eligible.iter().any(|e| e.heir == heir)
    }

    #[must_use]
    pub fn eligible_count(&self, heir: Heir) -> u32 {
        self.eligible
            .iter()
            .find(|e| e.heir == heir)
            .map_or(0, |e| e.count)
    }
}

/// Splits the present heirs into excluded and eligible, and decides the
/// standing of each eligible category.
#[must_use]
pub fn resolve(present: &PresentHeirs) -> Resolution {
    let mut excluded = Vec::new();
    let mut eligible = Vec::new();

    for entry in present.iter() {
        let rule = registry::lookup(entry.heir);
        if rule.is_excluded(present) {
            excluded.push(entry);
            continue;
        }
        let standing = if rule.is_residuary(present) {
            Standing::Residuary
        } else if rule.takes_residue_also(present) {
            Standing::FixedAndResiduary
        } else {
            Standing::Fixed
        };
        eligible.push(EligibleHeir {
            heir: entry.heir,
            count: entry.count,
            standing,
        });
    }

    debug!(
        excluded = excluded.len(),
        eligible = eligible.len(),
        shifted = eligible.iter().filter(|e| e.is_shifted()).count(),
        "Exclusion resolved"
    );

    Resolution {
        present: *present,
        excluded,
        eligible,
    }
}
