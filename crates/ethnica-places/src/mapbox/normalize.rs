use ethnica_core::{round_km, Business, BusinessReview, LngLat};
use rand::seq::IndexedRandom;

use super::encode_component;
use super::types::Feature;
use crate::attributes::{maybe_priority_tag, Seeder, MAPBOX_PLACEHOLDERS};

pub const ID_PREFIX: &str = "mapbox-";

const UNNAMED: &str = "Unnamed Location";
const PLACEHOLDER_REVIEW: &str =
    "This is a placeholder review since Mapbox doesn't provide review data.";

/// Display category: `properties.category`, else the first `place_type`.
#[must_use]
pub fn category_for(feature: &Feature) -> String {
    if let Some(category) = feature
        .properties
        .category
        .as_deref()
        .filter(|c| !c.trim().is_empty())
    {
        return category.to_string();
    }
    match feature.place_type.first().map(String::as_str) {
        Some("poi") => "Point of Interest".to_string(),
        Some("address") => "Address".to_string(),
        Some("place") => "Place".to_string(),
        Some("neighborhood") => "Neighborhood".to_string(),
        Some(other) if !other.is_empty() => capitalize(other),
        _ => "Business".to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn placeholder_photo(category: &str) -> String {
    format!(
        "https://via.placeholder.com/400x300/4F46E5/FFFFFF?text={}",
        encode_component(category)
    )
}

fn synthesize_attributes(feature: &Feature, id: &str, seeder: &Seeder) -> Vec<String> {
    let props = &feature.properties;
    let mut tags = Vec::new();
    if props.wikidata.is_some() {
        tags.push("Listed on Wikidata".to_string());
    }
    if props.landmark == Some(true) {
        tags.push("Landmark".to_string());
    }
    if props.address.is_some() {
        tags.push("Has Address".to_string());
    }
    if let Some(ctx) = feature
        .context
        .iter()
        .find(|ctx| ctx.id.starts_with("neighborhood"))
    {
        tags.push(format!("In {}", ctx.text));
    }

    let mut rng = seeder.rng(id);
    if tags.is_empty() {
        if let Some(tag) = MAPBOX_PLACEHOLDERS.choose(&mut rng) {
            tags.push((*tag).to_string());
        }
    }
    maybe_priority_tag(&mut rng, &mut tags);
    tags
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Map one geocoding feature to a [`Business`].
///
/// `origin` is the search center; when given, `distance` is the haversine
/// distance rounded to one decimal. Features without a usable `center` are
/// dropped.
#[must_use]
pub fn normalize_feature(
    feature: &Feature,
    origin: Option<LngLat>,
    seeder: &Seeder,
) -> Option<Business> {
    let coordinates = LngLat::from(feature.center?);
    if !coordinates.is_valid() {
        return None;
    }

    let id = match feature.id.as_deref().filter(|id| !id.is_empty()) {
        Some(raw) => format!("{ID_PREFIX}{raw}"),
        None => format!("{ID_PREFIX}{coordinates}"),
    };
    let name = non_blank(feature.text.as_deref())
        .or_else(|| non_blank(feature.place_name.as_deref()))
        .unwrap_or(UNNAMED);
    let category = category_for(feature);

    let mut business = Business::new(id, name, category, coordinates);
    business.place_id.clone_from(&feature.id);
    business.description = feature.properties.description.clone().unwrap_or_default();
    business.address = feature.place_name.clone().unwrap_or_default();
    business.attributes = synthesize_attributes(feature, &business.id, seeder);
    business.photos = vec![placeholder_photo(&business.category)];
    business.distance = origin.map(|o| round_km(o.distance_km(&coordinates)));
    Some(business)
}

/// Details view: the search normalization plus one placeholder review.
pub(crate) fn normalize_details(
    feature: &Feature,
    seeder: &Seeder,
    reviewed_at: i64,
) -> Option<Business> {
    let mut business = normalize_feature(feature, None, seeder)?;
    business.reviews.push(BusinessReview {
        id: format!("review-{}", business.id),
        rating: 4.0,
        text: PLACEHOLDER_REVIEW.to_string(),
        author: "System".to_string(),
        author_details: None,
        time: Some(reviewed_at),
    });
    Some(business)
}
