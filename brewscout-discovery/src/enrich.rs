//! Reviews, photos and map links for the shortlisted places.

use std::collections::BTreeMap;
use std::str::FromStr;

use brewscout_core::{
    DetailField, KeywordGroup, PhotoRef, Place, PlaceDetails, PlacesProvider, SearchPreferences,
};

/// Generic maps URL used when nothing better can be built.
pub const GENERIC_MAP_LINK: &str = "https://maps.google.com";

/// Build a maps deep link for `place`.
///
/// Prefers the stable identifier, then name with coordinates, then the name
/// alone, then [`GENERIC_MAP_LINK`].
///
/// # Examples
/// ```
/// use brewscout_core::Place;
/// use brewscout_discovery::map_link;
///
/// let place = Place::builder("abc123", "Milstead & Co").build();
/// assert_eq!(map_link(&place), "https://maps.google.com/maps?q=place_id:abc123");
/// ```
#[must_use]
pub fn map_link(place: &Place) -> String {
    if !place.id().is_empty() {
        return format!("{GENERIC_MAP_LINK}/maps?q=place_id:{}", place.id());
    }
    let name = place.name().replace(' ', "+");
    match place.coord() {
        Some(coord) => format!("{GENERIC_MAP_LINK}/maps?q={name}@{},{}", coord.y, coord.x),
        None if !name.is_empty() => format!("{GENERIC_MAP_LINK}/maps?q={name}"),
        None => GENERIC_MAP_LINK.to_owned(),
    }
}

/// Record, for every include term, whether `place` satisfied it.
///
/// Terms that name no keyword group are reported as unmet.
#[must_use]
pub fn mark_filter_matches(place: Place, preferences: &SearchPreferences) -> Place {
    let matches: BTreeMap<String, bool> = preferences
        .include_terms()
        .iter()
        .map(|term| {
            let met = KeywordGroup::from_str(term)
                .is_ok_and(|group| place.matched_preferences().contains(&group));
            (term.clone(), met)
        })
        .collect();
    place.with_filter_matches(matches)
}

/// Fetches details for finalists within fixed per-place budgets.
///
/// Every failure is logged and leaves the place as it was.
#[derive(Debug, Clone, Copy)]
pub struct Enricher<'a, P: ?Sized> {
    provider: &'a P,
    max_reviews: usize,
    max_photos: usize,
}

impl<'a, P: PlacesProvider + ?Sized> Enricher<'a, P> {
    /// Create an enricher keeping at most `max_reviews` reviews and
    /// `max_photos` photos per place.
    pub const fn new(provider: &'a P, max_reviews: usize, max_photos: usize) -> Self {
        Self {
            provider,
            max_reviews,
            max_photos,
        }
    }

    /// Fetch `fields` for `place`, logging and returning `None` on failure.
    #[must_use]
    pub fn fetch_details(&self, place: &Place, fields: &[DetailField]) -> Option<PlaceDetails> {
        self.provider
            .details(place.id(), fields)
            .inspect_err(|err| log::warn!("details for {} failed: {err}", place.name()))
            .ok()
    }

    /// Enrich a ranked shortlist.
    ///
    /// Each place gets one details call for reviews. Only the first
    /// `photo_budget` places also ask for photos. All get a map link.
    #[must_use]
    pub fn enrich_shortlist(&self, places: Vec<Place>, photo_budget: usize) -> Vec<Place> {
        places
            .into_iter()
            .enumerate()
            .map(|(rank, place)| self.enrich(place, rank < photo_budget))
            .collect()
    }

    /// Attach reviews, optionally photos, and a map link to one place.
    #[must_use]
    pub fn enrich(&self, place: Place, with_photos: bool) -> Place {
        let link = map_link(&place);
        let linked = place.with_map_link(link);
        let fields: &[DetailField] = if with_photos {
            &[DetailField::Reviews, DetailField::Photos]
        } else {
            &[DetailField::Reviews]
        };
        let Some(details) = self.fetch_details(&linked, fields) else {
            return linked;
        };
        let reviewed = linked.with_reviews(self.review_sample(&details));
        if with_photos {
            let urls = self.photo_urls(&details.photos);
            reviewed.with_photo_urls(urls)
        } else {
            reviewed
        }
    }

    /// Fetch photos for a place that has none yet.
    #[must_use]
    pub fn backfill_photos(&self, place: Place) -> Place {
        if !place.photo_urls().is_empty() || self.max_photos == 0 {
            return place;
        }
        match self.fetch_details(&place, &[DetailField::Photos]) {
            Some(details) => {
                let urls = self.photo_urls(&details.photos);
                place.with_photo_urls(urls)
            }
            None => place,
        }
    }

    /// Display URLs for up to `max_photos` photo references.
    #[must_use]
    pub fn photo_urls(&self, photos: &[PhotoRef]) -> Vec<String> {
        photos
            .iter()
            .take(self.max_photos)
            .filter_map(|photo| {
                self.provider
                    .photo_url(photo)
                    .inspect_err(|err| log::warn!("photo url failed: {err}"))
                    .ok()
            })
            .collect()
    }

    pub(crate) fn review_sample(&self, details: &PlaceDetails) -> Vec<String> {
        details
            .reviews
            .iter()
            .filter(|review| !review.text.trim().is_empty())
            .take(self.max_reviews)
            .map(|review| review.text.clone())
            .collect()
    }
}
