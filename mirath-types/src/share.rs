//! Calculation output: one `ShareRecord` per present heir category.
//!
//! Records are produced once and never updated. Each pipeline stage builds
//! a fresh sequence from the previous stage's output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Fraction, Heir};

/// How a category's share was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// A textually fixed fraction, unchanged.
    Fixed,
    /// A portion of what remained after the fixed fractions.
    Residuary,
    /// A fixed fraction scaled by Awl or Radd.
    #[serde(rename = "Reconciled-Fixed")]
    ReconciledFixed,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "Fixed"),
            Self::Residuary => write!(f, "Residuary"),
            Self::ReconciledFixed => write!(f, "Reconciled-Fixed"),
        }
    }
}

/// Whether a category takes part in the division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShareStatus {
    Allocated,
    Excluded,
}

impl fmt::Display for ShareStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocated => write!(f, "ALLOCATED"),
            Self::Excluded => write!(f, "EXCLUDED"),
        }
    }
}

/// The single reconciliation outcome of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reconciliation {
    /// Fixed and residuary shares already summed to the whole estate.
    Balanced,
    /// Fixed shares exceeded the estate and were scaled down.
    #[serde(rename = "Awl-Applied")]
    AwlApplied,
    /// Fixed shares fell short with no residuary heir and were scaled up.
    #[serde(rename = "Radd-Applied")]
    RaddApplied,
}

impl fmt::Display for Reconciliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Balanced => write!(f, "Balanced"),
            Self::AwlApplied => write!(f, "Awl-Applied"),
            Self::RaddApplied => write!(f, "Radd-Applied"),
        }
    }
}

/// Final share of one heir category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRecord {
    pub heir: Heir,
    /// Number of individuals, as given in the input.
    pub count: u32,
    pub classification: Classification,
    pub status: ShareStatus,
    /// Fraction of the distributable estate for the whole category.
    pub fraction: Fraction,
    /// Category amount, rounded to currency precision.
    pub amount: Decimal,
    pub per_head_fraction: Fraction,
    pub per_head_amount: Decimal,
}

impl ShareRecord {
    /// An excluded record: zero fraction, zero amount.
    #[must_use]
    pub fn excluded(heir: Heir, count: u32, classification: Classification) -> Self {
        Self {
            heir,
            count,
            classification,
            status: ShareStatus::Excluded,
            fraction: Fraction::ZERO,
            amount: Decimal::ZERO,
            per_head_fraction: Fraction::ZERO,
            per_head_amount: Decimal::ZERO,
        }
    }

    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.status == ShareStatus::Allocated
    }
}

/// The complete, reconciled share table for one estate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Distributable estate after liabilities, funeral expenses and bequests.
    pub net_estate: Decimal,
    /// Portion of the bequests actually honoured.
    pub bequest_applied: Decimal,
    /// One record per present category, in registry order.
    pub shares: Vec<ShareRecord>,
    /// Sum of fractions over allocated records.
    pub total_fraction: Fraction,
    /// Fraction left with no recipient. Non-zero only when nothing is allocated.
    pub unabsorbed_fraction: Fraction,
    pub reconciliation: Reconciliation,
    /// `net_estate` minus the sum of allocated amounts.
    pub rounding_drift: Decimal,
}

impl CalculationResult {
    /// Records with status `ALLOCATED`.
    pub fn allocated(&self) -> impl Iterator<Item = &ShareRecord> {
        self.shares.iter().filter(|record| record.is_allocated())
    }

    /// Records with status `EXCLUDED`.
    pub fn excluded(&self) -> impl Iterator<Item = &ShareRecord> {
        self.shares.iter().filter(|record| !record.is_allocated())
    }

    /// The record for `heir`, if the category was present.
    #[must_use]
    pub fn share_for(&self, heir: Heir) -> Option<&ShareRecord> {
        self.shares.iter().find(|record| record.heir == heir)
    }

    /// Sum of allocated amounts.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.allocated().map(|record| record.amount).sum()
    }
}
