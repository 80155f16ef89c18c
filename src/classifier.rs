//! Day classification from WMO weather codes
//!
//! Each day's weather code falls into exactly one coarse [`Category`]. The
//! mapping lives in [`WMO_CATEGORY_TABLE`]; any code not listed there is
//! [`Category::Unclassified`], so classification never fails.

use crate::models::WeatherCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse weather bucket for a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Clear,
    Cloudy,
    Foggy,
    Rainy,
    Snowy,
    Stormy,
    Unclassified,
}

impl Category {
    /// Every category, including `Unclassified`
    pub const ALL: [Category; 7] = [
        Category::Clear,
        Category::Cloudy,
        Category::Foggy,
        Category::Rainy,
        Category::Snowy,
        Category::Stormy,
        Category::Unclassified,
    ];

    /// Categories backed by an entry in the code table
    pub const NAMED: [Category; 6] = [
        Category::Clear,
        Category::Cloudy,
        Category::Foggy,
        Category::Rainy,
        Category::Snowy,
        Category::Stormy,
    ];

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Cloudy => "Cloudy",
            Self::Foggy => "Foggy",
            Self::Rainy => "Rainy",
            Self::Snowy => "Snowy",
            Self::Stormy => "Stormy",
            Self::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Codes that map to one named category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: Category,
    pub codes: &'static [i32],
}

/// WMO code table. 85/86 are snow showers in WMO terms but are counted as rainy days here.
pub const WMO_CATEGORY_TABLE: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Clear,
        codes: &[0, 1],
    },
    CategoryRule {
        category: Category::Cloudy,
        codes: &[2, 3],
    },
    CategoryRule {
        category: Category::Foggy,
        codes: &[45, 48],
    },
    CategoryRule {
        category: Category::Rainy,
        codes: &[85, 86],
    },
    CategoryRule {
        category: Category::Snowy,
        codes: &[71, 73, 75],
    },
    CategoryRule {
        category: Category::Stormy,
        codes: &[95, 96, 99],
    },
];

/// Map a weather code to its category. Total: unknown codes are `Unclassified`.
#[must_use]
pub fn classify(code: WeatherCode) -> Category {
    WMO_CATEGORY_TABLE
        .iter()
        .find(|rule| rule.codes.contains(&code.0))
        .map_or(Category::Unclassified, |rule| rule.category)
}
