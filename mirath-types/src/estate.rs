//! Estate input: the deceased, the estate's money, and the surviving heirs.
//!
//! An `EstateInput` is built once per calculation and only read afterwards.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Gender, Heir};

/// A present heir category and how many individuals it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeirEntry {
    pub heir: Heir,
    pub count: u32,
}

impl HeirEntry {
    #[must_use]
    pub const fn new(heir: Heir, count: u32) -> Self {
        Self { heir, count }
    }
}

/// Everything the engine needs to divide one estate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstateInput {
    /// Gender of the deceased.
    pub deceased: Gender,

    /// Gross assets.
    pub assets: Decimal,

    /// Outstanding debts. Must be strictly below `assets`.
    pub liabilities: Decimal,

    /// Funeral and burial costs, paid before debts are settled with heirs.
    #[serde(default)]
    pub funeral_expenses: Decimal,

    /// Bequests to non-heirs. Honoured up to one third of the estate left
    /// after liabilities and funeral expenses.
    #[serde(default)]
    pub bequests: Decimal,

    /// Present heirs, in request order.
    #[serde(default)]
    pub heirs: Vec<HeirEntry>,
}

impl EstateInput {
    /// Creates an input with no heirs and no deductions beyond liabilities.
    #[must_use]
    pub fn new(deceased: Gender, assets: Decimal, liabilities: Decimal) -> Self {
        Self {
            deceased,
            assets,
            liabilities,
            funeral_expenses: Decimal::ZERO,
            bequests: Decimal::ZERO,
            heirs: Vec::new(),
        }
    }

    /// Adds a present heir category.
    #[must_use]
    pub fn with_heir(mut self, heir: Heir, count: u32) -> Self {
        self.heirs.push(HeirEntry::new(heir, count));
        self
    }

    #[must_use]
    pub fn with_funeral_expenses(mut self, amount: Decimal) -> Self {
        self.funeral_expenses = amount;
        self
    }

    #[must_use]
    pub fn with_bequests(mut self, amount: Decimal) -> Self {
        self.bequests = amount;
        self
    }

    /// Count recorded for `heir`, or zero if the category is absent.
    #[must_use]
    pub fn count_of(&self, heir: Heir) -> u32 {
        self.heirs
            .iter()
            .filter(|entry| entry.heir == heir)
            .map(|entry| entry.count)
            .sum()
    }
}
