//! The normalized business record every place provider maps into.

use serde::{Deserialize, Serialize};

use crate::geo::LngLat;

/// A business as shown in search results and the detail panel.
///
/// Rebuilt from provider data on every search; nothing here outlives the
/// request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    /// Provider-namespaced identifier (`mapbox-…`, a Google `place_id`, `mock:…`).
    pub id: String,
    /// Upstream identifier used to fetch richer details, when the provider has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    /// `[longitude, latitude]`.
    pub coordinates: LngLat,
    /// Provider-scale rating. Not comparable across providers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Free-text ownership/values tags. Order is preserved, duplicates are not.
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    /// Kilometres from the search center. Only set by location-based searches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default)]
    pub reviews: Vec<BusinessReview>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessReview {
    pub id: String,
    pub rating: f64,
    pub text: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_details: Option<String>,
    /// Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
}

impl Business {
    /// Minimal record with every optional field empty.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        coordinates: LngLat,
    ) -> Self {
        Self {
            id: id.into(),
            place_id: None,
            name: name.into(),
            category: category.into(),
            description: String::new(),
            address: String::new(),
            coordinates,
            rating: None,
            review_count: None,
            price_level: None,
            open_now: None,
            phone: None,
            website: None,
            attributes: Vec::new(),
            photos: Vec::new(),
            distance: None,
            reviews: Vec::new(),
        }
    }

    /// Case-insensitive keyword match over name, category, description and attributes.
    #[must_use]
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self
                .attributes
                .iter()
                .any(|attr| attr.to_lowercase().contains(&needle))
    }

    /// Append an attribute unless an identical tag is already present.
    pub fn push_attribute(&mut self, attribute: impl Into<String>) {
        let attribute = attribute.into();
        if !self.attributes.contains(&attribute) {
            self.attributes.push(attribute);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Business {
        let mut b = Business::new(
            "mock1",
            "Green Earth Cafe",
            "Restaurant",
            LngLat::new(-74.006, 40.7128),
        );
        b.description = "Sustainable, plant-based cafe.".to_string();
        b.attributes = vec!["Minority Owned".to_string(), "Vegan Options".to_string()];
        b
    }

    #[test]
    fn serializes_camel_case_and_lon_first_coordinates() {
        let mut b = sample();
        b.place_id = Some("abc".to_string());
        b.review_count = Some(32);
        let json = serde_json::to_value(&b).expect("serialize");
        assert_eq!(json["placeId"], "abc");
        assert_eq!(json["reviewCount"], 32);
        assert_eq!(json["coordinates"], serde_json::json!([-74.006, 40.7128]));
        assert!(json.get("rating").is_none(), "absent optionals are omitted");
        assert!(json.get("distance").is_none());
    }

    #[test]
    fn keyword_matches_attributes_case_insensitively() {
        let b = sample();
        assert!(b.matches_keyword("vegan"));
        assert!(b.matches_keyword("RESTAURANT"));
        assert!(b.matches_keyword("plant-based"));
        assert!(!b.matches_keyword("bakery"));
    }

    #[test]
    fn blank_keyword_matches_everything() {
        assert!(sample().matches_keyword("   "));
    }

    #[test]
    fn push_attribute_keeps_order_and_skips_duplicates() {
        let mut b = sample();
        b.push_attribute("Woman Owned");
        b.push_attribute("Vegan Options");
        assert_eq!(
            b.attributes,
            vec!["Minority Owned", "Vegan Options", "Woman Owned"]
        );
    }
}
