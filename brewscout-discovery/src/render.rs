//! Natural-language summaries returned alongside the place list.

use brewscout_core::{Place, PlaceDetails, Review};
use brewscout_scorer::UNDERRATED_RATING_CEILING;

const HOURS_SHOWN: usize = 3;
const REVIEWS_SHOWN: usize = 3;
const CATEGORIES_SHOWN: usize = 3;
const REVIEW_CHARS: usize = 200;
const GENERIC_CATEGORIES: &[&str] = &["establishment", "point_of_interest"];

/// Summary for an open-ended search.
#[must_use]
pub fn search_summary(
    places: &[Place],
    location: &str,
    underrated: bool,
    reviews_analyzed: usize,
) -> String {
    let mut lines = vec![format!("Here are the top cafes I found in {location}:"), String::new()];
    lines.extend(numbered_entries(places));
    if underrated {
        lines.push(format!(
            "Showing hidden gems with fewer than {UNDERRATED_RATING_CEILING} reviews!"
        ));
    }
    if reviews_analyzed > 0 {
        lines.push(format!(
            "Enhanced filtering applied using customer review analysis for {reviews_analyzed} places!"
        ));
    }
    lines.join("\n")
}

/// Summary for a lookup of explicitly named places.
///
/// `missing` lists requested names that matched nothing; each gets a note.
/// `repeats` pairs a requested name with the already listed place it matched.
#[must_use]
pub fn named_summary(
    places: &[Place],
    location: &str,
    missing: &[String],
    repeats: &[(String, String)],
) -> String {
    let noun = if places.len() == 1 { "cafe" } else { "cafes" };
    let mut lines = vec![
        format!("Here's the information for the {noun} you asked about in {location}:"),
        String::new(),
    ];
    lines.extend(numbered_entries(places));
    lines.extend(repeats.iter().map(|(requested, place_name)| {
        format!("'{requested}' matched {place_name}, which is already listed above.")
    }));
    lines.extend(
        missing
            .iter()
            .map(|name| format!("I couldn't find '{name}' in {location}.")),
    );
    lines.join("\n")
}

/// Detailed description of one place.
///
/// Without `details` the text only says the lookup failed.
#[must_use]
pub fn details_summary(place: &Place, details: Option<&PlaceDetails>) -> String {
    let Some(details) = details else {
        return format!("Could not get detailed information for {}.", place.name());
    };

    let name = details.name.as_deref().unwrap_or_else(|| place.name());
    let mut lines = vec![
        format!("Here's detailed information about **{name}**:"),
        String::new(),
        format!(
            "**Address**: {}",
            details
                .formatted_address
                .as_deref()
                .unwrap_or("Address not available")
        ),
    ];

    if let Some(rating) = details.rating {
        let count = details.user_ratings_total.unwrap_or(0);
        lines.push(format!("**Rating**: {rating:.1}/5{}", review_count(count)));
    }
    if let Some(level) = details.price_level.filter(|level| *level > 0) {
        lines.push(format!("**Price Level**: {}", price(level)));
    }
    if let Some(phone) = details.phone.as_deref().filter(|p| !p.is_empty()) {
        lines.push(format!("**Phone**: {phone}"));
    }
    if let Some(website) = details.website.as_deref().filter(|w| !w.is_empty()) {
        lines.push(format!("**Website**: {website}"));
    }

    if !details.opening_hours.is_empty() {
        lines.push(String::new());
        lines.push("**Hours**:".to_owned());
        lines.extend(
            details
                .opening_hours
                .iter()
                .take(HOURS_SHOWN)
                .map(|day| format!("   {day}")),
        );
        if details.opening_hours.len() > HOURS_SHOWN {
            lines.push("   (and more...)".to_owned());
        }
    }

    if !details.reviews.is_empty() {
        lines.push(String::new());
        lines.push("**Recent Reviews**:".to_owned());
        for (index, review) in details.reviews.iter().take(REVIEWS_SHOWN).enumerate() {
            lines.push(String::new());
            lines.extend(review_block(index.saturating_add(1), review));
        }
    }

    let categories: Vec<String> = details
        .types
        .iter()
        .filter(|t| !GENERIC_CATEGORIES.contains(&t.as_str()))
        .take(CATEGORIES_SHOWN)
        .map(|t| title_case(t))
        .collect();
    if !categories.is_empty() {
        lines.push(String::new());
        lines.push(format!("**Categories**: {}", categories.join(", ")));
    }

    lines.join("\n")
}

fn numbered_entries(places: &[Place]) -> Vec<String> {
    places
        .iter()
        .enumerate()
        .flat_map(|(index, place)| {
            let rating = place
                .rating()
                .map_or_else(|| "No rating".to_owned(), |r| format!("{r:.1}/5"));
            let price_text = place
                .price_level()
                .filter(|level| *level > 0)
                .map(|level| format!(" | {}", price(level)))
                .unwrap_or_default();
            [
                format!("{}. **{}**", index.saturating_add(1), place.name()),
                format!(
                    "   {}",
                    place.vicinity().unwrap_or("Address not available")
                ),
                format!(
                    "   {rating}{}{price_text}",
                    review_count(place.rating_count())
                ),
                String::new(),
            ]
        })
        .collect()
}

fn review_block(number: usize, review: &Review) -> [String; 2] {
    let author = review.author_name.as_deref().unwrap_or("Anonymous");
    let stars = review
        .rating
        .map(|r| format!(" ({r}/5)"))
        .unwrap_or_default();
    let when = review
        .relative_time_description
        .as_deref()
        .filter(|w| !w.is_empty())
        .map(|w| format!(" - {w}"))
        .unwrap_or_default();
    [
        format!("**Review {number}** by {author}{stars}{when}:"),
        format!("\"{}\"", truncate(&review.text, REVIEW_CHARS)),
    ]
}

fn review_count(count: u32) -> String {
    if count > 0 {
        format!(" ({count} reviews)")
    } else {
        String::new()
    }
}

fn price(level: u8) -> String {
    "$".repeat(usize::from(level))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_owned()
    }
}

fn title_case(tag: &str) -> String {
    tag.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn storyville() -> Place {
        Place::builder("p1", "Storyville Coffee")
            .rating(4.6)
            .rating_count(900)
            .price_level(2)
            .vicinity("94 Pike St")
            .build()
    }

    #[rstest]
    fn search_summary_lists_places_and_notes() {
        let unrated = Place::builder("p2", "New Spot").build();
        let text = search_summary(&[storyville(), unrated], "Ballard", true, 2);
        assert!(text.starts_with("Here are the top cafes I found in Ballard:"));
        assert!(text.contains("1. **Storyville Coffee**"));
        assert!(text.contains("   94 Pike St"));
        assert!(text.contains("   4.6/5 (900 reviews) | $$"));
        assert!(text.contains("2. **New Spot**"));
        assert!(text.contains("   Address not available"));
        assert!(text.contains("   No rating"));
        assert!(text.contains("fewer than 1000 reviews"));
        assert!(text.contains("review analysis for 2 places"));
    }

    #[rstest]
    fn search_summary_omits_notes_when_unused() {
        let text = search_summary(&[storyville()], "Ballard", false, 0);
        assert!(!text.contains("hidden gems"));
        assert!(!text.contains("review analysis"));
    }

    #[rstest]
    fn named_summary_notes_missing_names() {
        let text = named_summary(&[storyville()], "Seattle", &["NoSuchCafeXYZ".to_owned()], &[]);
        assert!(text.contains("the cafe you asked about in Seattle"));
        assert!(text.contains("I couldn't find 'NoSuchCafeXYZ' in Seattle."));
    }

    #[rstest]
    fn named_summary_notes_names_matching_a_listed_place() {
        let repeats = [("Storyville".to_owned(), "Storyville Coffee".to_owned())];
        let text = named_summary(&[storyville()], "Seattle", &[], &repeats);
        assert_eq!(text.matches("**Storyville Coffee**").count(), 1);
        assert!(
            text.contains("'Storyville' matched Storyville Coffee, which is already listed above.")
        );
    }

    #[rstest]
    fn details_summary_without_details_reports_failure() {
        assert_eq!(
            details_summary(&storyville(), None),
            "Could not get detailed information for Storyville Coffee."
        );
    }

    #[rstest]
    fn details_summary_formats_every_section() {
        let details = PlaceDetails {
            rating: Some(4.6),
            user_ratings_total: Some(900),
            formatted_address: Some("94 Pike St, Seattle".into()),
            phone: Some("(206) 555-0100".into()),
            website: Some("https://storyville.example".into()),
            opening_hours: (1..=5).map(|d| format!("Day {d}: 7 AM to 5 PM")).collect(),
            price_level: Some(2),
            reviews: vec![Review {
                author_name: Some("Sam".into()),
                rating: Some(5),
                text: "x".repeat(250),
                relative_time_description: Some("a week ago".into()),
            }],
            types: vec![
                "establishment".into(),
                "coffee_shop".into(),
                "cafe".into(),
                "point_of_interest".into(),
            ],
            ..PlaceDetails::default()
        };
        let text = details_summary(&storyville(), Some(&details));
        assert!(text.contains("**Storyville Coffee**"));
        assert!(text.contains("**Address**: 94 Pike St, Seattle"));
        assert!(text.contains("**Rating**: 4.6/5 (900 reviews)"));
        assert!(text.contains("**Price Level**: $$"));
        assert!(text.contains("**Phone**: (206) 555-0100"));
        assert!(text.contains("   Day 3: 7 AM to 5 PM"));
        assert!(!text.contains("Day 4"));
        assert!(text.contains("(and more...)"));
        assert!(text.contains("**Review 1** by Sam (5/5) - a week ago:"));
        assert!(text.contains(&format!("\"{}...\"", "x".repeat(200))));
        assert!(text.contains("**Categories**: Coffee Shop, Cafe"));
    }

    #[rstest]
    #[case("coffee_shop", "Coffee Shop")]
    #[case("cafe", "Cafe")]
    #[case("meal__takeaway", "Meal Takeaway")]
    fn title_cases_tags(#[case] tag: &str, #[case] expected: &str) {
        assert_eq!(title_case(tag), expected);
    }
}
