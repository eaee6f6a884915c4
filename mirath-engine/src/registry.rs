//! Heir registry: the embedded rule table for every recognised category.
//!
//! Each category carries its precedence class, residuary weight, the
//! conditions that exclude it, the conditions that turn it residuary, and an
//! ordered list of fixed-share rows where the first matching row wins. Every
//! condition is evaluated against the same [`PresentHeirs`] snapshot, so the
//! table can be tested without running the rest of the pipeline.

use mirath_types::{Fraction, Gender, Heir, HeirLabel};
use serde::Serialize;
use std::fmt;

use crate::error::{EngineError, EngineResult};
use crate::present::PresentHeirs;

/// Broad standing of a category in the order of inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecedenceClass {
    /// Holds a textually fixed fraction.
    Quranic,
    /// Male-line relative who takes the residue.
    ResiduaryAgnate,
    /// Related through the mother only.
    UterineKin,
}

impl fmt::Display for PrecedenceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quranic => write!(f, "Qur'anic"),
            Self::ResiduaryAgnate => write!(f, "residuary agnate"),
            Self::UterineKin => write!(f, "uterine kin"),
        }
    }
}

/// A predicate over the present-heir snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    Present(Heir),
    AnyPresent(&'static [Heir]),
    /// At least `n` individuals of one category.
    AtLeast(Heir, u32),
    /// At least `n` individuals across the listed categories.
    TotalAtLeast(&'static [Heir], u32),
    Not(&'static Condition),
    All(&'static [Condition]),
}

impl Condition {
    #[must_use]
    pub fn holds(&self, present: &PresentHeirs) -> bool {
        match *self {
            Self::Always => true,
            Self::Present(heir) => present.contains(heir),
            Self::AnyPresent(heirs) => heirs.iter().any(|&heir| present.contains(heir)),
            Self::AtLeast(heir, n) => present.count(heir) >= n,
            Self::TotalAtLeast(heirs, n) => {
                heirs.iter().map(|&heir| u64::from(present.count(heir))).sum::<u64>()
                    >= u64::from(n)
            }
            Self::Not(inner) => !inner.holds(present),
            Self::All(all) => all.iter().all(|condition| condition.holds(present)),
        }
    }
}

/// True if any of `conditions` holds.
fn any_holds(conditions: &[Condition], present: &PresentHeirs) -> bool {
    conditions.iter().any(|condition| condition.holds(present))
}

/// What a matching fixed-share row grants the whole category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portion {
    /// A plain fraction of the estate.
    Share(Fraction),
    /// A fraction split evenly between the eligible categories of a group.
    SharedByCategory(Fraction, &'static [Heir]),
    /// The uterine sibling share: one sixth for a single sibling, one third
    /// split per head across the group for two or more.
    Uterine(&'static [Heir]),
    /// One third of what remains after the spouse's share.
    ThirdOfRemainderAfterSpouse,
}

/// One row of a category's fixed-share table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareRow {
    pub when: Condition,
    pub portion: Portion,
}

/// Registry record for one heir category.
#[derive(Debug)]
pub struct HeirCategoryRule {
    pub heir: Heir,
    pub class: PrecedenceClass,
    /// Relative units in the residuary split. Zero for categories that never
    /// take residue.
    pub residuary_weight: u32,
    /// Upper bound on the count, tighter than the configured limit.
    pub max_count: Option<u32>,
    /// Excluded when any of these holds.
    pub excluded_when: &'static [Condition],
    /// Takes residue instead of a fixed share when any of these holds.
    pub residuary_when: &'static [Condition],
    /// Takes residue on top of its fixed share when any of these holds.
    pub residue_also_when: &'static [Condition],
    /// Fixed-share rows, first match wins. Empty for pure residuary agnates.
    pub shares: &'static [ShareRow],
}

impl HeirCategoryRule {
    /// Whether the category ever holds a fixed share.
    #[must_use]
    pub fn has_fixed_share(&self) -> bool {
        !self.shares.is_empty()
    }

    #[must_use]
    pub fn is_excluded(&self, present: &PresentHeirs) -> bool {
        any_holds(self.excluded_when, present)
    }

    /// Whether the category takes residue instead of a fixed share.
    #[must_use]
    pub fn is_residuary(&self, present: &PresentHeirs) -> bool {
        !self.has_fixed_share() || any_holds(self.residuary_when, present)
    }

    #[must_use]
    pub fn takes_residue_also(&self, present: &PresentHeirs) -> bool {
        any_holds(self.residue_also_when, present)
    }

    /// The first fixed-share row whose condition holds.
    #[must_use]
    pub fn matching_row(&self, present: &PresentHeirs) -> Option<&'static ShareRow> {
        self.shares.iter().find(|row| row.when.holds(present))
    }
}

/// Returns the registry record for a category.
#[must_use]
pub fn lookup(heir: Heir) -> &'static HeirCategoryRule {
    &REGISTRY[heir as usize]
}

/// Resolves a request label to its registry record.
///
/// "Spouse" resolves against the deceased's gender. Fails with
/// `UnknownCategory` for labels outside the enumeration.
pub fn lookup_label(label: &str, deceased: Gender) -> EngineResult<&'static HeirCategoryRule> {
    let parsed: HeirLabel = label
        .parse()
        .map_err(|_| EngineError::UnknownCategory(label.to_string()))?;
    Ok(lookup(parsed.resolve(deceased)))
}

/// Every record, in result order.
pub fn all() -> impl Iterator<Item = &'static HeirCategoryRule> {
    REGISTRY.iter()
}

const HALF: Fraction = Fraction::new(1, 2);
const THIRD: Fraction = Fraction::new(1, 3);
const TWO_THIRDS: Fraction = Fraction::new(2, 3);
const QUARTER: Fraction = Fraction::new(1, 4);
const SIXTH: Fraction = Fraction::new(1, 6);
const EIGHTH: Fraction = Fraction::new(1, 8);

const DESCENDANTS: &[Heir] = &[Heir::Son, Heir::Daughter, Heir::SonsSon, Heir::SonsDaughter];
const MALE_DESCENDANTS: &[Heir] = &[Heir::Son, Heir::SonsSon];
const FEMALE_DESCENDANTS: &[Heir] = &[Heir::Daughter, Heir::SonsDaughter];
const SPOUSES: &[Heir] = &[Heir::Husband, Heir::Wife];
const GRANDMOTHERS: &[Heir] = &[Heir::PaternalGrandmother, Heir::MaternalGrandmother];
const UTERINE_SIBLINGS: &[Heir] = &[Heir::MaternalBrother, Heir::MaternalSister];
const SIBLINGS: &[Heir] = &[
    Heir::FullBrother,
    Heir::FullSister,
    Heir::PaternalBrother,
    Heir::PaternalSister,
    Heir::MaternalBrother,
    Heir::MaternalSister,
];

const HAS_DESCENDANT: Condition = Condition::AnyPresent(DESCENDANTS);
const HAS_MALE_DESCENDANT: Condition = Condition::AnyPresent(MALE_DESCENDANTS);
const HAS_FEMALE_DESCENDANT: Condition = Condition::AnyPresent(FEMALE_DESCENDANTS);

/// Son, Son's Son, Father and Paternal Grandfather close every sibling line.
const SIBLING_BLOCKERS: Condition = Condition::AnyPresent(&[
    Heir::Son,
    Heir::SonsSon,
    Heir::Father,
    Heir::PaternalGrandfather,
]);

/// A Full Sister made residuary by a female descendant.
const FULL_SISTER_RESIDUARY: Condition =
    Condition::All(&[Condition::Present(Heir::FullSister), HAS_FEMALE_DESCENDANT]);

/// Either sister made residuary by a female descendant.
const SISTER_RESIDUARY: Condition = Condition::All(&[
    Condition::AnyPresent(&[Heir::FullSister, Heir::PaternalSister]),
    HAS_FEMALE_DESCENDANT,
]);

const NO_SHARES: &[ShareRow] = &[];
const NEVER: &[Condition] = &[];

const fn row(when: Condition, portion: Portion) -> ShareRow {
    ShareRow { when, portion }
}

const fn agnate(heir: Heir, excluded_when: &'static [Condition]) -> HeirCategoryRule {
    HeirCategoryRule {
        heir,
        class: PrecedenceClass::ResiduaryAgnate,
        residuary_weight: 2,
        max_count: None,
        excluded_when,
        residuary_when: NEVER,
        residue_also_when: NEVER,
        shares: NO_SHARES,
    }
}

static REGISTRY: [HeirCategoryRule; Heir::ALL.len()] = [
    HeirCategoryRule {
        heir: Heir::Husband,
        class: PrecedenceClass::Quranic,
        residuary_weight: 0,
        max_count: Some(1),
        excluded_when: NEVER,
        residuary_when: NEVER,
        residue_also_when: NEVER,
        shares: &[
            row(HAS_DESCENDANT, Portion::Share(QUARTER)),
            row(Condition::Always, Portion::Share(HALF)),
        ],
    },
    HeirCategoryRule {
        heir: Heir::Wife,
        class: PrecedenceClass::Quranic,
        residuary_weight: 0,
        max_count: Some(4),
        excluded_when: NEVER,
        residuary_when: NEVER,
        residue_also_when: NEVER,
        shares: &[
            row(HAS_DESCENDANT, Portion::Share(EIGHTH)),
            row(Condition::Always, Portion::Share(QUARTER)),
        ],
    },
    agnate(Heir::Son, NEVER),
    HeirCategoryRule {
        heir: Heir::Daughter,
        class: PrecedenceClass::Quranic,
        residuary_weight: 1,
        max_count: None,
        excluded_when: NEVER,
        residuary_when: &[Condition::Present(Heir::Son)],
        residue_also_when: NEVER,
        shares: &[
            row(Condition::AtLeast(Heir::Daughter, 2), Portion::Share(TWO_THIRDS)),
            row(Condition::Always, Portion::Share(HALF)),
        ],
    },
    agnate(Heir::SonsSon, &[Condition::Present(Heir::Son)]),
    HeirCategoryRule {
        heir: Heir::SonsDaughter,
        class: PrecedenceClass::Quranic,
        residuary_weight: 1,
        max_count: None,
        excluded_when: &[
            Condition::Present(Heir::Son),
            Condition::All(&[
                Condition::AtLeast(Heir::Daughter, 2),
                Condition::Not(&Condition::Present(Heir::SonsSon)),
            ]),
        ],
        residuary_when: &[Condition::Present(Heir::SonsSon)],
        residue_also_when: NEVER,
        shares: &[
            row(Condition::Present(Heir::Daughter), Portion::Share(SIXTH)),
            row(Condition::AtLeast(Heir::SonsDaughter, 2), Portion::Share(TWO_THIRDS)),
            row(Condition::Always, Portion::Share(HALF)),
        ],
    },
    HeirCategoryRule {
        heir: Heir::Father,
        class: PrecedenceClass::Quranic,
        residuary_weight: 2,
        max_count: Some(1),
        excluded_when: NEVER,
        residuary_when: &[Condition::Not(&HAS_DESCENDANT)],
        residue_also_when: &[Condition::Not(&HAS_MALE_DESCENDANT)],
        shares: &[row(Condition::Always, Portion::Share(SIXTH))],
    },
    HeirCategoryRule {
        heir: Heir::Mother,
        class: PrecedenceClass::Quranic,
        residuary_weight: 0,
        max_count: Some(1),
        excluded_when: NEVER,
        residuary_when: NEVER,
        residue_also_when: NEVER,
        shares: &[
            row(HAS_DESCENDANT, Portion::Share(SIXTH)),
            row(Condition::TotalAtLeast(SIBLINGS, 2), Portion::Share(SIXTH)),
            row(
                Condition::All(&[
                    Condition::AnyPresent(SPOUSES),
                    Condition::Present(Heir::Father),
                ]),
                Portion::ThirdOfRemainderAfterSpouse,
            ),
            row(Condition::Always, Portion::Share(THIRD)),
        ],
    },
    HeirCategoryRule {
        heir: Heir::PaternalGrandfather,
        class: PrecedenceClass::Quranic,
        residuary_weight: 2,
        max_count: Some(1),
        excluded_when: &[Condition::Present(Heir::Father)],
        residuary_when: &[Condition::Not(&HAS_DESCENDANT)],
        residue_also_when: &[Condition::Not(&HAS_MALE_DESCENDANT)],
        shares: &[row(Condition::Always, Portion::Share(SIXTH))],
    },
    HeirCategoryRule {
        heir: Heir::PaternalGrandmother,
        class: PrecedenceClass::Quranic,
        residuary_weight: 0,
        max_count: Some(1),
        excluded_when: &[Condition::AnyPresent(&[Heir::Mother, Heir::Father])],
        residuary_when: NEVER,
        residue_also_when: NEVER,
        shares: &[row(Condition::Always, Portion::SharedByCategory(SIXTH, GRANDMOTHERS))],
    },
    HeirCategoryRule {
        heir: Heir::MaternalGrandmother,
        class: PrecedenceClass::Quranic,
        residuary_weight: 0,
        max_count: Some(1),
        excluded_when: &[Condition::Present(Heir::Mother)],
        residuary_when: NEVER,
        residue_also_when: NEVER,
        shares: &[row(Condition::Always, Portion::SharedByCategory(SIXTH, GRANDMOTHERS))],
    },
    agnate(Heir::FullBrother, &[SIBLING_BLOCKERS]),
    HeirCategoryRule {
        heir: Heir::FullSister,
        class: PrecedenceClass::Quranic,
        residuary_weight: 1,
        max_count: None,
        excluded_when: &[SIBLING_BLOCKERS],
        residuary_when: &[Condition::Present(Heir::FullBrother), HAS_FEMALE_DESCENDANT],
        residue_also_when: NEVER,
        shares: &[
            row(Condition::AtLeast(Heir::FullSister, 2), Portion::Share(TWO_THIRDS)),
            row(Condition::Always, Portion::Share(HALF)),
        ],
    },
    agnate(
        Heir::PaternalBrother,
        &[SIBLING_BLOCKERS, Condition::Present(Heir::FullBrother), FULL_SISTER_RESIDUARY],
    ),
    HeirCategoryRule {
        heir: Heir::PaternalSister,
        class: PrecedenceClass::Quranic,
        residuary_weight: 1,
        max_count: None,
        excluded_when: &[
            SIBLING_BLOCKERS,
            Condition::Present(Heir::FullBrother),
            FULL_SISTER_RESIDUARY,
            Condition::All(&[
                Condition::AtLeast(Heir::FullSister, 2),
                Condition::Not(&Condition::Present(Heir::PaternalBrother)),
            ]),
        ],
        residuary_when: &[Condition::Present(Heir::PaternalBrother), HAS_FEMALE_DESCENDANT],
        residue_also_when: NEVER,
        shares: &[
            row(Condition::Present(Heir::FullSister), Portion::Share(SIXTH)),
            row(Condition::AtLeast(Heir::PaternalSister, 2), Portion::Share(TWO_THIRDS)),
            row(Condition::Always, Portion::Share(HALF)),
        ],
    },
    HeirCategoryRule {
        heir: Heir::MaternalBrother,
        class: PrecedenceClass::UterineKin,
        residuary_weight: 0,
        max_count: None,
        excluded_when: &[
            HAS_DESCENDANT,
            Condition::AnyPresent(&[Heir::Father, Heir::PaternalGrandfather]),
        ],
        residuary_when: NEVER,
        residue_also_when: NEVER,
        shares: &[row(Condition::Always, Portion::Uterine(UTERINE_SIBLINGS))],
    },
    HeirCategoryRule {
        heir: Heir::MaternalSister,
        class: PrecedenceClass::UterineKin,
        residuary_weight: 0,
        max_count: None,
        excluded_when: &[
            HAS_DESCENDANT,
            Condition::AnyPresent(&[Heir::Father, Heir::PaternalGrandfather]),
        ],
        residuary_when: NEVER,
        residue_also_when: NEVER,
        shares: &[row(Condition::Always, Portion::Uterine(UTERINE_SIBLINGS))],
    },
    agnate(
        Heir::FullBrothersSon,
        &[
            SIBLING_BLOCKERS,
            Condition::AnyPresent(&[Heir::FullBrother, Heir::PaternalBrother]),
            SISTER_RESIDUARY,
        ],
    ),
    agnate(
        Heir::PaternalBrothersSon,
        &[
            SIBLING_BLOCKERS,
            Condition::AnyPresent(&[
                Heir::FullBrother,
                Heir::PaternalBrother,
                Heir::FullBrothersSon,
            ]),
            SISTER_RESIDUARY,
        ],
    ),
    agnate(
        Heir::FullPaternalUncle,
        &[
            SIBLING_BLOCKERS,
            Condition::AnyPresent(&[
                Heir::FullBrother,
                Heir::PaternalBrother,
                Heir::FullBrothersSon,
                Heir::PaternalBrothersSon,
            ]),
            SISTER_RESIDUARY,
        ],
    ),
    agnate(
        Heir::PaternalPaternalUncle,
        &[
            SIBLING_BLOCKERS,
            Condition::AnyPresent(&[
                Heir::FullBrother,
                Heir::PaternalBrother,
                Heir::FullBrothersSon,
                Heir::PaternalBrothersSon,
                Heir::FullPaternalUncle,
            ]),
            SISTER_RESIDUARY,
        ],
    ),
    agnate(
        Heir::FullCousin,
        &[
            SIBLING_BLOCKERS,
            Condition::AnyPresent(&[
                Heir::FullBrother,
                Heir::PaternalBrother,
                Heir::FullBrothersSon,
                Heir::PaternalBrothersSon,
                Heir::FullPaternalUncle,
                Heir::PaternalPaternalUncle,
            ]),
            SISTER_RESIDUARY,
        ],
    ),
    agnate(
        Heir::PaternalCousin,
        &[
            SIBLING_BLOCKERS,
            Condition::AnyPresent(&[
                Heir::FullBrother,
                Heir::PaternalBrother,
                Heir::FullBrothersSon,
                Heir::PaternalBrothersSon,
                Heir::FullPaternalUncle,
                Heir::PaternalPaternalUncle,
                Heir::FullCousin,
            ]),
            SISTER_RESIDUARY,
        ],
    ),
];
