//! Keyword groups that caller preference terms map onto.
//!
//! Each group owns a fixed list of lowercase keywords that are searched for
//! in a place's name, categories and review text.
//!
//! # Examples
//! ```
//! use std::str::FromStr;
//! use brewscout_core::KeywordGroup;
//!
//! assert_eq!(KeywordGroup::from_str("Pastry"), Ok(KeywordGroup::Pastries));
//! assert!(KeywordGroup::Wifi.keywords().contains(&"wifi"));
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Broad preference categories with associated match keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum KeywordGroup {
    /// Coffee drinks and brewing styles.
    Coffee,
    /// Bakeries and baked goods.
    Pastries,
    /// Internet access and laptop work.
    Wifi,
    /// Power sockets and charging.
    Outlets,
    /// Meals and restaurant-style food.
    Food,
    /// Comfortable or plentiful seating.
    Seating,
    /// Quiet places to study.
    Study,
    /// Cute, photogenic or atmospheric interiors.
    Aesthetic,
}

const COFFEE: &[&str] = &[
    "coffee",
    "espresso",
    "cappuccino",
    "latte",
    "americano",
    "mocha",
    "flat white",
    "cortado",
    "pour over",
    "cold brew",
];

const PASTRIES: &[&str] = &[
    "bakery",
    "pastry",
    "croissant",
    "muffin",
    "scone",
    "danish",
    "donut",
    "brownie",
    "cookie",
    "cake",
    "tart",
    "eclair",
    "macaron",
];

const WIFI: &[&str] = &[
    "wifi",
    "internet",
    "wireless",
    "laptop friendly",
    "work",
    "study",
    "remote work",
    "bring laptop",
    "good wifi",
];

const OUTLETS: &[&str] = &[
    "power",
    "outlet",
    "laptop",
    "work",
    "charging",
    "plug",
    "study space",
    "workspace",
    "laptop friendly",
];

const FOOD: &[&str] = &[
    "restaurant",
    "food",
    "dining",
    "meal",
    "lunch",
    "breakfast",
    "sandwich",
    "salad",
    "soup",
    "brunch",
];

const SEATING: &[&str] = &[
    "seating",
    "spacious",
    "cozy",
    "comfortable",
    "plenty of seats",
    "roomy",
    "good seating",
    "tables",
    "chairs",
];

const STUDY: &[&str] = &["quiet", "study", "workspace", "coworking", "library"];

const AESTHETIC: &[&str] = &[
    "cute",
    "aesthetic",
    "aesthetically",
    "instagram",
    "instagrammable",
    "pretty",
    "beautiful",
    "charming",
    "lovely",
    "adorable",
    "cozy",
    "atmospheric",
    "ambiance",
    "ambience",
    "stylish",
    "trendy",
    "hip",
];

impl KeywordGroup {
    /// Every group, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Coffee,
        Self::Pastries,
        Self::Wifi,
        Self::Outlets,
        Self::Food,
        Self::Seating,
        Self::Study,
        Self::Aesthetic,
    ];

    /// Return the group name as a lowercase `&str`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coffee => "coffee",
            Self::Pastries => "pastries",
            Self::Wifi => "wifi",
            Self::Outlets => "outlets",
            Self::Food => "food",
            Self::Seating => "seating",
            Self::Study => "study",
            Self::Aesthetic => "aesthetic",
        }
    }

    /// Lowercase keywords searched for when matching this group.
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Coffee => COFFEE,
            Self::Pastries => PASTRIES,
            Self::Wifi => WIFI,
            Self::Outlets => OUTLETS,
            Self::Food => FOOD,
            Self::Seating => SEATING,
            Self::Study => STUDY,
            Self::Aesthetic => AESTHETIC,
        }
    }

    /// Return the first keyword of this group contained in `text`.
    ///
    /// `text` is expected to be lowercase already.
    ///
    /// # Examples
    /// ```
    /// use brewscout_core::KeywordGroup;
    ///
    /// let hit = KeywordGroup::Coffee.first_match("great cold brew and latte");
    /// assert_eq!(hit, Some("latte"));
    /// ```
    pub fn first_match(self, text: &str) -> Option<&'static str> {
        self.keywords()
            .iter()
            .copied()
            .find(|keyword| text.contains(keyword))
    }
}

impl std::fmt::Display for KeywordGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for KeywordGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "coffee" | "espresso" => Ok(Self::Coffee),
            "pastries" | "pastry" | "bakery" | "baked goods" => Ok(Self::Pastries),
            "wifi" | "wi-fi" | "internet" => Ok(Self::Wifi),
            "outlets" | "outlet" | "power" | "plugs" => Ok(Self::Outlets),
            "food" | "restaurant" | "meal" | "meals" => Ok(Self::Food),
            "seating" | "seats" | "spacious" => Ok(Self::Seating),
            "study" | "quiet" | "work" => Ok(Self::Study),
            "aesthetic" | "cute" | "cozy" | "instagrammable" => Ok(Self::Aesthetic),
            _ => Err(format!("unknown keyword group '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("pastries", KeywordGroup::Pastries)]
    #[case("Bakery", KeywordGroup::Pastries)]
    #[case(" WIFI ", KeywordGroup::Wifi)]
    #[case("cozy", KeywordGroup::Aesthetic)]
    #[case("quiet", KeywordGroup::Study)]
    #[case("power", KeywordGroup::Outlets)]
    fn parses_aliases(#[case] term: &str, #[case] expected: KeywordGroup) {
        assert_eq!(KeywordGroup::from_str(term), Ok(expected));
    }

    #[rstest]
    fn parsing_rejects_unknown() {
        let err = KeywordGroup::from_str("underwater").expect_err("unknown term");
        assert!(err.contains("unknown keyword group"));
    }

    #[rstest]
    fn display_matches_as_str() {
        for group in KeywordGroup::ALL {
            assert_eq!(group.to_string(), group.as_str());
        }
    }

    #[rstest]
    fn first_match_follows_keyword_order() {
        let text = "they have a mocha and espresso";
        assert_eq!(KeywordGroup::Coffee.first_match(text), Some("espresso"));
    }

    #[rstest]
    fn first_match_returns_none_without_hits() {
        assert!(KeywordGroup::Food.first_match("quiet reading room").is_none());
    }

    #[rstest]
    fn every_keyword_is_lowercase() {
        for group in KeywordGroup::ALL {
            assert!(
                group.keywords().iter().all(|k| k.to_lowercase() == *k),
                "{group} keywords must be lowercase"
            );
        }
    }
}
