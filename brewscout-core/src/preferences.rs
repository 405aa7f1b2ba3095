//! Search preferences supplied once per request.
//!
//! Preferences are read-only once built; every pipeline stage borrows them.
//! Terms are stored lowercase so substring tests elsewhere can stay simple.

use std::collections::BTreeSet;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::KeywordGroup;

const PASTRY_TRIGGERS: &[&str] = &[
    "pastries",
    "pastry",
    "bakery",
    "baked goods",
    "croissant",
    "muffin",
    "scone",
    "danish",
];

const FOOD_TRIGGERS: &[&str] = &["food", "restaurant", "meal", "lunch", "breakfast", "brunch"];

const DESSERT_TRIGGERS: &[&str] = &["ice cream", "gelato", "dessert", "frozen"];

/// What the caller wants from a search.
///
/// # Examples
/// ```
/// use brewscout_core::{KeywordGroup, SearchPreferences};
///
/// let prefs = SearchPreferences::new("Ballard")
///     .with_include("Wifi")
///     .with_exclude("food")
///     .with_underrated(true);
/// assert!(prefs.include_terms().contains("wifi"));
/// assert_eq!(prefs.include_groups(), vec![KeywordGroup::Wifi]);
/// assert!(prefs.underrated());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "PreferencesRecord"))]
pub struct SearchPreferences {
    location_text: String,
    include_terms: BTreeSet<String>,
    exclude_terms: BTreeSet<String>,
    underrated: bool,
    explicit_place_names: Vec<String>,
}

impl SearchPreferences {
    /// Start preferences for the given free-text location.
    pub fn new(location_text: impl Into<String>) -> Self {
        Self {
            location_text: location_text.into(),
            ..Self::default()
        }
    }

    /// Add a term the caller wants places to have.
    #[must_use]
    pub fn with_include(mut self, term: impl AsRef<str>) -> Self {
        insert_term(&mut self.include_terms, term.as_ref());
        self
    }

    /// Add a term the caller wants places to avoid.
    #[must_use]
    pub fn with_exclude(mut self, term: impl AsRef<str>) -> Self {
        insert_term(&mut self.exclude_terms, term.as_ref());
        self
    }

    /// Request suppression of places with high review volume.
    #[must_use]
    pub const fn with_underrated(mut self, underrated: bool) -> Self {
        self.underrated = underrated;
        self
    }

    /// Ask for a specific place by name. Order is preserved.
    #[must_use]
    pub fn with_place_name(mut self, name: impl Into<String>) -> Self {
        let raw: String = name.into();
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            self.explicit_place_names.push(trimmed.to_owned());
        }
        self
    }

    /// Free-text location as typed by the caller.
    pub fn location_text(&self) -> &str {
        &self.location_text
    }

    /// Lowercased include terms.
    pub const fn include_terms(&self) -> &BTreeSet<String> {
        &self.include_terms
    }

    /// Lowercased exclude terms.
    pub const fn exclude_terms(&self) -> &BTreeSet<String> {
        &self.exclude_terms
    }

    /// Whether high-volume places should be dropped.
    pub const fn underrated(&self) -> bool {
        self.underrated
    }

    /// Names of specific places the caller asked about.
    pub fn explicit_place_names(&self) -> &[String] {
        &self.explicit_place_names
    }

    /// Keyword groups named by the include terms, de-duplicated.
    pub fn include_groups(&self) -> Vec<KeywordGroup> {
        groups_for(&self.include_terms)
    }

    /// Keyword groups named by the exclude terms, de-duplicated.
    pub fn exclude_groups(&self) -> Vec<KeywordGroup> {
        groups_for(&self.exclude_terms)
    }

    /// Whether the include terms mention pastries or bakeries.
    pub fn wants_pastries(&self) -> bool {
        self.includes_any(PASTRY_TRIGGERS)
    }

    /// Whether the include terms mention meals or restaurants.
    pub fn wants_food(&self) -> bool {
        self.includes_any(FOOD_TRIGGERS)
    }

    /// Whether the include terms mention desserts or frozen treats.
    pub fn wants_dessert(&self) -> bool {
        self.includes_any(DESSERT_TRIGGERS)
    }

    /// Test the joined include terms for any of `triggers`.
    ///
    /// Matching is textual over the space-joined term list, so `"baked goods"`
    /// matches even when supplied as two separate terms.
    fn includes_any(&self, triggers: &[&str]) -> bool {
        let joined = self
            .include_terms
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        triggers.iter().any(|trigger| joined.contains(trigger))
    }
}

/// Deserialised form of [`SearchPreferences`], normalised through the builder.
#[cfg(feature = "serde")]
#[derive(Deserialize, Default)]
#[serde(default)]
struct PreferencesRecord {
    location_text: String,
    include_terms: Vec<String>,
    exclude_terms: Vec<String>,
    underrated: bool,
    explicit_place_names: Vec<String>,
}

#[cfg(feature = "serde")]
impl From<PreferencesRecord> for SearchPreferences {
    fn from(record: PreferencesRecord) -> Self {
        let base = Self::new(record.location_text).with_underrated(record.underrated);
        let included = record
            .include_terms
            .iter()
            .fold(base, |prefs, term| prefs.with_include(term));
        let excluded = record
            .exclude_terms
            .iter()
            .fold(included, |prefs, term| prefs.with_exclude(term));
        record
            .explicit_place_names
            .into_iter()
            .fold(excluded, Self::with_place_name)
    }
}

fn insert_term(terms: &mut BTreeSet<String>, term: &str) {
    let normalised = term.trim().to_lowercase();
    if !normalised.is_empty() {
        terms.insert(normalised);
    }
}

fn groups_for(terms: &BTreeSet<String>) -> Vec<KeywordGroup> {
    let mut groups: Vec<KeywordGroup> = Vec::new();
    for group in terms.iter().filter_map(|t| KeywordGroup::from_str(t).ok()) {
        if !groups.contains(&group) {
            groups.push(group);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn terms_are_lowercased_and_trimmed() {
        let prefs = SearchPreferences::new("Fremont").with_include("  WiFi ");
        assert!(prefs.include_terms().contains("wifi"));
    }

    #[rstest]
    fn blank_terms_are_ignored() {
        let prefs = SearchPreferences::new("Fremont")
            .with_include("   ")
            .with_place_name(" ");
        assert!(prefs.include_terms().is_empty());
        assert!(prefs.explicit_place_names().is_empty());
    }

    #[rstest]
    #[case("pastries", true)]
    #[case("croissant", true)]
    #[case("wifi", false)]
    fn detects_pastry_requests(#[case] term: &str, #[case] expected: bool) {
        let prefs = SearchPreferences::new("x").with_include(term);
        assert_eq!(prefs.wants_pastries(), expected);
    }

    #[rstest]
    #[case("brunch", true)]
    #[case("restaurant", true)]
    #[case("coffee", false)]
    fn detects_food_requests(#[case] term: &str, #[case] expected: bool) {
        let prefs = SearchPreferences::new("x").with_include(term);
        assert_eq!(prefs.wants_food(), expected);
    }

    #[rstest]
    fn aliases_collapse_into_one_group() {
        let prefs = SearchPreferences::new("x")
            .with_include("pastry")
            .with_include("bakery")
            .with_include("mystery");
        assert_eq!(prefs.include_groups(), vec![KeywordGroup::Pastries]);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialised_terms_are_normalised() {
        let json = r#"{
            "location_text": "Ballard",
            "include_terms": [" Pastries ", "WiFi"],
            "exclude_terms": ["LOUD", "  "],
            "explicit_place_names": [" Storyville Coffee "]
        }"#;
        let prefs: SearchPreferences = serde_json::from_str(json).expect("valid preferences");
        assert!(prefs.wants_pastries());
        assert!(prefs.include_terms().contains("pastries"));
        assert_eq!(
            prefs.include_groups(),
            vec![KeywordGroup::Pastries, KeywordGroup::Wifi]
        );
        assert_eq!(prefs.exclude_terms().len(), 1);
        assert!(prefs.exclude_terms().contains("loud"));
        assert_eq!(prefs.explicit_place_names(), ["Storyville Coffee".to_owned()]);
        assert_eq!(
            prefs,
            SearchPreferences::new("Ballard")
                .with_include("Pastries")
                .with_include("WiFi")
                .with_exclude("loud")
                .with_place_name("Storyville Coffee")
        );
    }

    #[rstest]
    fn place_names_keep_order() {
        let prefs = SearchPreferences::new("x")
            .with_place_name("Storyville Coffee")
            .with_place_name("Analog Coffee");
        assert_eq!(
            prefs.explicit_place_names(),
            ["Storyville Coffee".to_owned(), "Analog Coffee".to_owned()]
        );
    }
}
