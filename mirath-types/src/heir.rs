//! Heir categories and the deceased's gender.
//!
//! `Heir` is the closed enumeration of relatives the engine recognises.
//! Request labels are matched case- and punctuation-insensitively, so
//! "Son's Son", "sons son" and "sons_son" all name the same category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Gender of the deceased. Decides which spouse can inherit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// A recognised heir category.
///
/// Declaration order is the order records appear in a calculation result:
/// spouses, descendants, ascendants, siblings, then distant agnates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heir {
    Husband,
    Wife,
    Son,
    Daughter,
    SonsSon,
    SonsDaughter,
    Father,
    Mother,
    PaternalGrandfather,
    PaternalGrandmother,
    MaternalGrandmother,
    FullBrother,
    FullSister,
    PaternalBrother,
    PaternalSister,
    MaternalBrother,
    MaternalSister,
    FullBrothersSon,
    PaternalBrothersSon,
    FullPaternalUncle,
    PaternalPaternalUncle,
    FullCousin,
    PaternalCousin,
}

impl Heir {
    /// Every category, in result order.
    pub const ALL: [Heir; 23] = [
        Heir::Husband,
        Heir::Wife,
        Heir::Son,
        Heir::Daughter,
        Heir::SonsSon,
        Heir::SonsDaughter,
        Heir::Father,
        Heir::Mother,
        Heir::PaternalGrandfather,
        Heir::PaternalGrandmother,
        Heir::MaternalGrandmother,
        Heir::FullBrother,
        Heir::FullSister,
        Heir::PaternalBrother,
        Heir::PaternalSister,
        Heir::MaternalBrother,
        Heir::MaternalSister,
        Heir::FullBrothersSon,
        Heir::PaternalBrothersSon,
        Heir::FullPaternalUncle,
        Heir::PaternalPaternalUncle,
        Heir::FullCousin,
        Heir::PaternalCousin,
    ];

    /// Canonical display label, as used on the wire.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Husband => "Husband",
            Self::Wife => "Wife",
            Self::Son => "Son",
            Self::Daughter => "Daughter",
            Self::SonsSon => "Son's Son",
            Self::SonsDaughter => "Son's Daughter",
            Self::Father => "Father",
            Self::Mother => "Mother",
            Self::PaternalGrandfather => "Paternal Grandfather",
            Self::PaternalGrandmother => "Paternal Grandmother",
            Self::MaternalGrandmother => "Maternal Grandmother",
            Self::FullBrother => "Full Brother",
            Self::FullSister => "Full Sister",
            Self::PaternalBrother => "Paternal Brother",
            Self::PaternalSister => "Paternal Sister",
            Self::MaternalBrother => "Maternal Brother",
            Self::MaternalSister => "Maternal Sister",
            Self::FullBrothersSon => "Full Brother's Son",
            Self::PaternalBrothersSon => "Paternal Brother's Son",
            Self::FullPaternalUncle => "Full Paternal Uncle",
            Self::PaternalPaternalUncle => "Paternal Paternal Uncle",
            Self::FullCousin => "Full Cousin",
            Self::PaternalCousin => "Paternal Cousin",
        }
    }

    /// Whether the category is made up of male relatives.
    #[must_use]
    pub const fn is_male(self) -> bool {
        !matches!(
            self,
            Self::Wife
                | Self::Daughter
                | Self::SonsDaughter
                | Self::Mother
                | Self::PaternalGrandmother
                | Self::MaternalGrandmother
                | Self::FullSister
                | Self::PaternalSister
                | Self::MaternalSister
        )
    }

    /// Whether the category is a spouse of the deceased.
    #[must_use]
    pub const fn is_spouse(self) -> bool {
        matches!(self, Self::Husband | Self::Wife)
    }
}

impl fmt::Display for Heir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A request label before the deceased's gender is known.
///
/// "Spouse" only becomes a concrete category once the gender of the
/// deceased is applied via [`HeirLabel::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeirLabel {
    Category(Heir),
    Spouse,
}

impl HeirLabel {
    /// Resolves the label against the deceased's gender.
    #[must_use]
    pub const fn resolve(self, deceased: Gender) -> Heir {
        match (self, deceased) {
            (Self::Category(heir), _) => heir,
            (Self::Spouse, Gender::Male) => Heir::Wife,
            (Self::Spouse, Gender::Female) => Heir::Husband,
        }
    }
}

/// Lowercases and strips everything but ASCII letters and digits.
fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for HeirLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_label(s);
        if key == "spouse" {
            return Ok(Self::Spouse);
        }
        if let Some(heir) = Heir::ALL
            .iter()
            .copied()
            .find(|heir| normalize_label(heir.label()) == key)
        {
            return Ok(Self::Category(heir));
        }
        let aliased = match key.as_str() {
            "grandson" => Heir::SonsSon,
            "granddaughter" => Heir::SonsDaughter,
            "grandfather" => Heir::PaternalGrandfather,
            "grandmother" => Heir::PaternalGrandmother,
            "brother" => Heir::FullBrother,
            "sister" => Heir::FullSister,
            "consanguinebrother" => Heir::PaternalBrother,
            "consanguinesister" => Heir::PaternalSister,
            "uterinebrother" => Heir::MaternalBrother,
            "uterinesister" => Heir::MaternalSister,
            "nephew" => Heir::FullBrothersSon,
            "uncle" => Heir::FullPaternalUncle,
            _ => return Err(Error::UnknownHeir(s.to_string())),
        };
        Ok(Self::Category(aliased))
    }
}

impl FromStr for Heir {
    type Err = Error;

    /// Parses a concrete category. "Spouse" is rejected here because it
    /// needs the deceased's gender; use [`HeirLabel`] for request input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<HeirLabel>()? {
            HeirLabel::Category(heir) => Ok(heir),
            HeirLabel::Spouse => Err(Error::UnknownHeir(s.to_string())),
        }
    }
}
