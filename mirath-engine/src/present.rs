//! Immutable snapshot of the heirs present in a request.
//!
//! Built once from the validated input and shared read-only by every
//! stage; exclusion rules are evaluated against this original snapshot,
//! never against a partially excluded one.

use mirath_types::{Gender, Heir, HeirEntry};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::registry;

/// Category → count arena, indexed by registry position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentHeirs {
    counts: [u32; Heir::ALL.len()],
}

impl PresentHeirs {
    /// Validates the entries and builds the snapshot.
    ///
    /// Rejects zero or over-limit counts, repeated categories, and spouses
    /// that do not match the deceased's gender.
    pub fn from_entries(
        entries: &[HeirEntry],
        deceased: Gender,
        config: &EngineConfig,
    ) -> EngineResult<Self> {
        let mut counts = [0u32; Heir::ALL.len()];
        for entry in entries {
            let rule = registry::lookup(entry.heir);
            if entry.count == 0 {
                return Err(EngineError::InvalidCount {
                    heir: entry.heir,
                    count: i64::from(entry.count),
                    reason: "count must be at least 1".into(),
                });
            }
            let limit = rule
                .max_count
                .map_or(config.max_heir_count, |max| max.min(config.max_heir_count));
            if entry.count > limit {
                return Err(EngineError::InvalidCount {
                    heir: entry.heir,
                    count: i64::from(entry.count),
                    reason: format!("at most {limit} allowed"),
                });
            }
            // A spouse is always of the opposite gender to the deceased.
            if entry.heir.is_spouse() && entry.heir.is_male() == (deceased == Gender::Male) {
                return Err(EngineError::IncompatibleHeir {
                    heir: entry.heir,
                    deceased,
                });
            }
            let slot = &mut counts[entry.heir as usize];
            if *slot != 0 {
                return Err(EngineError::DuplicateHeir(entry.heir));
            }
            *slot = entry.count;
        }
        Ok(Self { counts })
    }

    /// Count for `heir`, zero when absent.
    #[must_use]
    pub fn count(&self, heir: Heir) -> u32 {
        self.counts[heir as usize]
    }

    #[must_use]
    pub fn contains(&self, heir: Heir) -> bool {
        self.count(heir) > 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// Present categories with their counts, in registry order.
    pub fn iter(&self) -> impl Iterator<Item = HeirEntry> + '_ {
        Heir::ALL
            .into_iter()
            .filter(|&heir| self.contains(heir))
            .map(|heir| HeirEntry::new(heir, self.count(heir)))
    }
}
