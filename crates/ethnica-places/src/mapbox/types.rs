use serde::Deserialize;

/// Geocoding API response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub place_type: Vec<String>,
    /// `[lng, lat]`.
    #[serde(default)]
    pub center: Option<[f64; 2]>,
    #[serde(default)]
    pub properties: FeatureProperties,
    #[serde(default)]
    pub context: Vec<FeatureContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub wikidata: Option<String>,
    #[serde(default)]
    pub landmark: Option<bool>,
    #[serde(default)]
    pub address: Option<String>,
}

/// One entry of the feature's containing hierarchy, e.g. `neighborhood.123`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureContext {
    pub id: String,
    #[serde(default)]
    pub text: String,
}
