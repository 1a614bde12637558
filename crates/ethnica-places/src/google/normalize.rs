use ethnica_core::{Business, BusinessReview, LngLat};
use rand::Rng;

use super::types::PlaceResult;
use crate::attributes::{push_distinct, Seeder, RESTAURANT_TAGS, STORE_TAGS};

const PHOTO_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/photo";
const PHOTO_MAX_WIDTH: u32 = 400;

/// Google place type to display category. The first listed type found in a
/// place's `types` wins.
const TYPE_CATEGORIES: &[(&str, &str)] = &[
    ("restaurant", "Restaurant"),
    ("cafe", "Café"),
    ("bar", "Bar"),
    ("food", "Food"),
    ("grocery_or_supermarket", "Grocery"),
    ("store", "Retail"),
    ("shopping_mall", "Shopping"),
    ("clothing_store", "Clothing"),
    ("beauty_salon", "Beauty"),
    ("book_store", "Bookstore"),
    ("bakery", "Bakery"),
    ("convenience_store", "Convenience Store"),
    ("department_store", "Department Store"),
    ("electronics_store", "Electronics"),
    ("furniture_store", "Furniture"),
    ("hardware_store", "Hardware Store"),
    ("home_goods_store", "Home Goods"),
    ("jewelry_store", "Jewelry"),
    ("liquor_store", "Liquor Store"),
    ("shoe_store", "Shoe Store"),
    ("supermarket", "Supermarket"),
];

#[must_use]
pub fn category_for(types: &[String]) -> &'static str {
    types
        .iter()
        .find_map(|t| {
            TYPE_CATEGORIES
                .iter()
                .find(|(key, _)| key == t)
                .map(|(_, label)| *label)
        })
        .unwrap_or("Business")
}

#[must_use]
pub fn photo_url(photo_reference: &str, public_key: &str) -> String {
    format!(
        "{PHOTO_BASE_URL}?maxwidth={PHOTO_MAX_WIDTH}&photoreference={photo_reference}&key={public_key}"
    )
}

fn synthesize_attributes(place: &PlaceResult, id: &str, seeder: &Seeder) -> Vec<String> {
    let mut tags = Vec::new();
    match place.price_level {
        Some(1) => tags.push("Budget Friendly".to_string()),
        Some(level) if level >= 3 => tags.push("Premium".to_string()),
        _ => {}
    }
    if place.rating.is_some_and(|r| r >= 4.5) {
        tags.push("Highly Rated".to_string());
    }

    let has_type = |t: &str| place.types.iter().any(|pt| pt == t);
    let mut rng = seeder.rng(id);
    if has_type("restaurant") {
        let n = rng.random_range(1..=2);
        push_distinct(&mut rng, RESTAURANT_TAGS, n, &mut tags);
    }
    if has_type("store") || has_type("shopping") {
        let n = rng.random_range(1..=2);
        push_distinct(&mut rng, STORE_TAGS, n, &mut tags);
    }
    tags
}

/// Map a nearby-search or details result to a [`Business`].
///
/// `origin` sets an unrounded `distance`. Results without a `place_id` or
/// geometry are dropped.
#[must_use]
pub fn normalize_place(
    place: &PlaceResult,
    origin: Option<LngLat>,
    public_key: &str,
    seeder: &Seeder,
) -> Option<Business> {
    let place_id = place.place_id.as_deref().filter(|id| !id.is_empty())?;
    let location = place.geometry?.location;
    let coordinates = LngLat::new(location.lng, location.lat);

    let mut business = Business::new(
        place_id,
        place.name.clone().unwrap_or_default(),
        category_for(&place.types),
        coordinates,
    );
    business.place_id = Some(place_id.to_string());
    business.description = place
        .editorial_summary
        .as_ref()
        .and_then(|s| s.overview.clone())
        .unwrap_or_default();
    business.address = place
        .formatted_address
        .clone()
        .or_else(|| place.vicinity.clone())
        .unwrap_or_default();
    business.rating = place.rating;
    business.review_count = place.user_ratings_total;
    business.price_level = place.price_level;
    business.open_now = place.opening_hours.as_ref().and_then(|h| h.open_now);
    business.phone.clone_from(&place.formatted_phone_number);
    business.website.clone_from(&place.website);
    business.photos = place
        .photos
        .iter()
        .map(|p| photo_url(&p.photo_reference, public_key))
        .collect();
    business.distance = origin.map(|o| o.distance_km(&coordinates));
    business.attributes = synthesize_attributes(place, place_id, seeder);
    business.reviews = place
        .reviews
        .iter()
        .map(|r| BusinessReview {
            id: r.time.to_string(),
            rating: r.rating,
            text: r.text.clone(),
            author: r.author_name.clone(),
            author_details: r.relative_time_description.clone(),
            time: Some(r.time),
        })
        .collect();
    Some(business)
}
