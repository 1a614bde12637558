use chrono::{DateTime, Duration, Utc};
use ethnica_core::{Business, BusinessReview, LngLat};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::id::{MockId, NEARBY_PREFIX, QUERY_PREFIX};
use super::vocabulary::{
    capitalize_first, matching_category, slug, title_case, ATTRIBUTES, CATEGORIES, NAME_LEADS,
    NAME_SUFFIXES, PHOTO_SETS, PLACEHOLDER_PHOTOS, REVIEW_TEXT, STREET_NAMES, STREET_TYPES,
};
use crate::attributes::{push_distinct, Seeder};

pub const MIN_COUNT: usize = 5;
pub const MAX_COUNT: usize = 25;
/// Radius used when filtering mock data by keyword.
pub const SEARCH_RADIUS_KM: f64 = 10.0;
/// Radius for businesses synthesized from a search term.
pub const SYNTHESIS_RADIUS_KM: f64 = 3.0;

/// Businesses are placed within this fraction of the requested radius.
const PLACEMENT_FRACTION: f64 = 0.8;

/// Deterministic stand-in for a live provider.
///
/// Output depends only on the base seed, the reference time and the inputs,
/// so the same center always yields the same businesses.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    seeder: Seeder,
    count: usize,
    reference_time: DateTime<Utc>,
}

impl MockGenerator {
    /// `count` is clamped to `MIN_COUNT..=MAX_COUNT`.
    #[must_use]
    pub fn new(base_seed: u64, count: usize) -> Self {
        Self {
            seeder: Seeder::new(base_seed),
            count: count.clamp(MIN_COUNT, MAX_COUNT),
            reference_time: Utc::now(),
        }
    }

    /// Review timestamps are generated relative to this instant.
    #[must_use]
    pub fn with_reference_time(mut self, reference_time: DateTime<Utc>) -> Self {
        self.reference_time = reference_time;
        self
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// `count` businesses within `radius_km` of `center`, nearest first.
    #[must_use]
    pub fn near(&self, center: LngLat, radius_km: f64, count: usize) -> Vec<Business> {
        let center = center.snapped();
        let radius_m = km_to_m(radius_km);
        let count = count.clamp(MIN_COUNT, MAX_COUNT);
        let mut businesses = self.generate_nearby(center, radius_m, count);
        sort_by_distance(&mut businesses);
        businesses
    }

    /// Keyword search over a 10 km mock dataset.
    ///
    /// Matching businesses come back as they are. When nothing matches, 3–5
    /// businesses are synthesized from the term instead, so a search never
    /// ends empty.
    #[must_use]
    pub fn search(&self, center: LngLat, keyword: Option<&str>) -> Vec<Business> {
        let nearby = self.near(center, SEARCH_RADIUS_KM, self.count);
        let Some(term) = normalize_term(keyword) else {
            return nearby;
        };

        let matched: Vec<Business> = nearby
            .into_iter()
            .filter(|b| b.matches_keyword(&term))
            .collect();
        if !matched.is_empty() {
            return matched;
        }

        tracing::debug!(term = %term, "no mock business matched; synthesizing from the term");
        let mut synthesized = self.synthesize(center.snapped(), &term);
        sort_by_distance(&mut synthesized);
        synthesized
    }

    /// Regenerate the business behind a mock id. `None` if the id is not a
    /// well-formed mock id or points past the generated set.
    #[must_use]
    pub fn details(&self, id: &str) -> Option<Business> {
        match MockId::parse(id)? {
            MockId::Nearby {
                center,
                radius_m,
                count,
                index,
            } => {
                if radius_m == 0 || !(MIN_COUNT..=MAX_COUNT).contains(&count) || index >= count {
                    return None;
                }
                self.generate_nearby(center.snapped(), radius_m, count)
                    .into_iter()
                    .nth(index)
            }
            MockId::Query {
                center,
                index,
                term,
            } => {
                let term = normalize_term(Some(&term))?;
                self.synthesize(center.snapped(), &term).into_iter().nth(index)
            }
        }
    }

    fn generate_nearby(&self, center: LngLat, radius_m: u32, count: usize) -> Vec<Business> {
        let radius_km = f64::from(radius_m) / 1000.0;
        let mut rng = self.seeder.rng(&format!("{NEARBY_PREFIX}{center}"));
        (0..count)
            .map(|index| {
                let id = MockId::Nearby {
                    center,
                    radius_m,
                    count,
                    index,
                };
                self.nearby_business(&mut rng, center, radius_km, index, id.to_string())
            })
            .collect()
    }

    fn nearby_business(
        &self,
        rng: &mut StdRng,
        center: LngLat,
        radius_km: f64,
        index: usize,
        id: String,
    ) -> Business {
        let coordinates = random_point(rng, center, radius_km * PLACEMENT_FRACTION);
        let category = pick(rng, CATEGORIES);
        let name = business_name(rng, category);

        let mut business = Business::new(id, name, category, coordinates);
        let attribute_count = rng.random_range(2..=4);
        push_distinct(rng, ATTRIBUTES, attribute_count, &mut business.attributes);
        business.description = format!(
            "A wonderful {} offering a variety of products and services in your area.",
            category.to_lowercase()
        );
        business.distance = Some(center.distance_km(&coordinates));
        business.photos = photos(rng);
        business.rating = Some(round_tenth(rng.random_range(3.0..=5.0)));
        business.review_count = Some(rng.random_range(5..=200));
        business.address = street_address(rng);
        business.phone = Some(phone(rng));
        business.website = Some(format!("https://example.com/{}", slug(&business.name)));
        business.open_now = Some(rng.random_bool(0.7));
        business.price_level = Some(rng.random_range(1..=4));
        business.reviews = self.reviews(rng, &format!("review-{index}"), 3..=5, REVIEW_TEXT);
        business
    }

    fn synthesize(&self, center: LngLat, term: &str) -> Vec<Business> {
        let mut rng = self.seeder.rng(&format!("{QUERY_PREFIX}{center}:{term}"));
        let n = rng.random_range(3..=5);
        let category = matching_category(term).map_or_else(|| title_case(term), str::to_string);
        let name = format!("{} {category}", capitalize_first(term));

        (0..n)
            .map(|index| {
                let id = MockId::Query {
                    center,
                    index,
                    term: term.to_string(),
                };
                let coordinates = random_point(&mut rng, center, SYNTHESIS_RADIUS_KM);
                let mut business =
                    Business::new(id.to_string(), name.clone(), category.clone(), coordinates);
                business.description = format!(
                    "A fantastic {} specializing in {term} options.",
                    category.to_lowercase()
                );
                business.distance = Some(center.distance_km(&coordinates));
                business.photos = photos(&mut rng);
                business.rating = Some(round_tenth(rng.random_range(4.0..=5.0)));
                business.review_count = Some(rng.random_range(5..=200));
                business.address = street_address(&mut rng);
                business.phone = Some(phone(&mut rng));
                business.website = Some(format!("https://example.com/{}", slug(term)));
                push_distinct(&mut rng, ATTRIBUTES, 2, &mut business.attributes);
                business.open_now = Some(true);
                business.price_level = Some(rng.random_range(1..=4));
                business.reviews = self.reviews(
                    &mut rng,
                    &format!("review-search-{index}"),
                    4..=5,
                    &format!("Great place with excellent {term} options!"),
                );
                business
            })
            .collect()
    }

    fn reviews(
        &self,
        rng: &mut StdRng,
        id_prefix: &str,
        ratings: std::ops::RangeInclusive<u8>,
        text: &str,
    ) -> Vec<BusinessReview> {
        let n = rng.random_range(1..=5);
        (0..n)
            .map(|j| {
                let days_ago = rng.random_range(1..=30);
                BusinessReview {
                    id: format!("{id_prefix}-{j}"),
                    rating: f64::from(rng.random_range(ratings.clone())),
                    text: text.to_string(),
                    author: format!("User{}", rng.random_range(1000..=9999)),
                    author_details: None,
                    time: Some((self.reference_time - Duration::days(days_ago)).timestamp()),
                }
            })
            .collect()
    }
}

fn normalize_term(keyword: Option<&str>) -> Option<String> {
    keyword
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
}

fn pick(rng: &mut StdRng, vocab: &[&'static str]) -> &'static str {
    vocab.choose(rng).copied().unwrap_or_default()
}

/// Uniform bearing, uniform distance in `[0, max_km)`.
fn random_point(rng: &mut StdRng, center: LngLat, max_km: f64) -> LngLat {
    let bearing = rng.random::<f64>() * std::f64::consts::TAU;
    let distance = rng.random::<f64>() * max_km;
    center.offset_km(bearing, distance)
}

fn business_name(rng: &mut StdRng, category: &str) -> String {
    let template = rng.random_range(0..=NAME_LEADS.len());
    match NAME_LEADS.get(template) {
        Some(leads) => format!("{} {category}", pick(rng, leads)),
        None => format!("{category} {}", pick(rng, NAME_SUFFIXES)),
    }
}

fn photos(rng: &mut StdRng) -> Vec<String> {
    let set = rng.random_range(0..PHOTO_SETS.len());
    if rng.random_bool(0.8) {
        PHOTO_SETS[set].iter().map(|p| (*p).to_string()).collect()
    } else {
        vec![PLACEHOLDER_PHOTOS[set % PLACEHOLDER_PHOTOS.len()].to_string()]
    }
}

fn street_address(rng: &mut StdRng) -> String {
    format!(
        "{} {} {}",
        rng.random_range(1..=999),
        pick(rng, STREET_NAMES),
        pick(rng, STREET_TYPES)
    )
}

fn phone(rng: &mut StdRng) -> String {
    format!(
        "(555) {}-{}",
        rng.random_range(100..=999),
        rng.random_range(1000..=9999)
    )
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn sort_by_distance(businesses: &mut [Business]) {
    businesses.sort_by(|a, b| {
        a.distance
            .unwrap_or(f64::INFINITY)
            .total_cmp(&b.distance.unwrap_or(f64::INFINITY))
    });
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn km_to_m(radius_km: f64) -> u32 {
    (radius_km.max(0.001) * 1000.0).round().min(f64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;
