//! Race and gender vocabulary for person nodes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of race categories a person can carry.
///
/// `NonWhite` never comes out of enrichment: it only appears after
/// [`crate::filters::binarize_race`] has collapsed every non-White category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Race {
    White,
    Black,
    Hispanic,
    Multiracial,
    Asian,
    AsianIndian,
    MiddleEastern,
    AmericanAborigine,
    Other,
    NonWhite,
    Unknown,
}

impl Race {
    /// Every category enrichment can produce, in partition-id order.
    pub const CATEGORIES: [Race; 9] = [
        Race::White,
        Race::Black,
        Race::Hispanic,
        Race::Multiracial,
        Race::Asian,
        Race::AsianIndian,
        Race::MiddleEastern,
        Race::AmericanAborigine,
        Race::Other,
    ];

    pub fn is_known(self) -> bool {
        self != Race::Unknown
    }

    /// `Some(true)` for White, `Some(false)` for every other known category.
    pub fn is_white(self) -> Option<bool> {
        match self {
            Race::Unknown => None,
            Race::White => Some(true),
            _ => Some(false),
        }
    }

    /// Collapse to the White / Non-White dichotomy, keeping Unknown.
    pub fn binarized(self) -> Race {
        match self.is_white() {
            None => Race::Unknown,
            Some(true) => Race::White,
            Some(false) => Race::NonWhite,
        }
    }

    /// Stable community id used by the race partition.
    pub fn category_id(self) -> Option<u32> {
        match self {
            Race::White => Some(0),
            Race::Black => Some(1),
            Race::Hispanic => Some(2),
            Race::Multiracial => Some(3),
            Race::Asian => Some(4),
            Race::AsianIndian => Some(5),
            Race::MiddleEastern => Some(6),
            Race::AmericanAborigine => Some(7),
            Race::Other => Some(8),
            Race::NonWhite => Some(9),
            Race::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Race::White => "White",
            Race::Black => "Black",
            Race::Hispanic => "Hispanic",
            Race::Multiracial => "Multiracial",
            Race::Asian => "Asian",
            Race::AsianIndian => "Asian/Indian",
            Race::MiddleEastern => "Middle Eastern",
            Race::AmericanAborigine => "American Aborigine",
            Race::Other => "Other",
            Race::NonWhite => "Non-White",
            Race::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Race {
    type Err = std::convert::Infallible;

    /// Lenient parse of the labels scraped profiles use. Anything
    /// unrecognised is `Unknown`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Ok(match norm.as_str() {
            "white" => Race::White,
            "black" => Race::Black,
            "hispanic" => Race::Hispanic,
            "multiracial" => Race::Multiracial,
            "asian" => Race::Asian,
            "asianindian" => Race::AsianIndian,
            "middleeastern" => Race::MiddleEastern,
            "americanaborigine" => Race::AmericanAborigine,
            "other" => Race::Other,
            "nonwhite" => Race::NonWhite,
            _ => Race::Unknown,
        })
    }
}

/// Gender as recorded by enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    pub fn is_known(self) -> bool {
        self != Gender::Unknown
    }

    pub fn category_id(self) -> Option<u32> {
        match self {
            Gender::Male => Some(0),
            Gender::Female => Some(1),
            Gender::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            "female" | "f" => Gender::Female,
            _ => Gender::Unknown,
        })
    }
}

/// Race and gender of one person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Demographics {
    pub race: Race,
    pub gender: Gender,
}

impl Demographics {
    pub const UNKNOWN: Demographics = Demographics { race: Race::Unknown, gender: Gender::Unknown };

    pub fn new(race: Race, gender: Gender) -> Self {
        Self { race, gender }
    }

    pub fn is_complete(&self) -> bool {
        self.race.is_known() && self.gender.is_known()
    }
}

impl Default for Demographics {
    fn default() -> Self {
        Self::UNKNOWN
    }
}
