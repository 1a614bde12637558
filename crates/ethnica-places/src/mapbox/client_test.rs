use ethnica_core::LngLat;

use super::*;

fn test_client(token: Option<&str>) -> MapboxClient {
    MapboxClient::with_base_url(
        token,
        &HttpOptions::default(),
        Seeder::new(0),
        "https://api.mapbox.com",
    )
    .expect("client construction should not fail")
}

fn nyc() -> NearbyQuery {
    NearbyQuery::new(LngLat::new(-74.006, 40.7128))
}

#[test]
fn search_url_with_keyword_encodes_term_in_path() {
    let client = test_client(Some("pk.test"));
    let url = client
        .search_url(&nyc().with_query(Some("halal grill & bar")), "pk.test")
        .unwrap();
    assert_eq!(
        url.path(),
        "/geocoding/v5/mapbox.places/halal%20grill%20%26%20bar.json"
    );
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(pairs.contains(&("proximity".into(), "-74.006,40.7128".into())));
    assert!(pairs.contains(&("limit".into(), "10".into())));
    assert!(pairs.contains(&("types".into(), "poi,address,place".into())));
    assert!(pairs.contains(&("proximity_radius".into(), "5".into())));
    assert!(pairs.contains(&("access_token".into(), "pk.test".into())));
}

#[test]
fn search_url_without_keyword_reverse_geocodes_center() {
    let client = test_client(Some("pk.test"));
    let url = client.search_url(&nyc(), "pk.test").unwrap();
    assert_eq!(url.path(), "/geocoding/v5/mapbox.places/-74.006,40.7128.json");
    assert!(url.query_pairs().any(|(k, v)| k == "types" && v == "poi"));
}

#[test]
fn proximity_radius_is_capped_at_50_km() {
    let client = test_client(Some("pk.test"));
    let url = client
        .search_url(&nyc().with_radius(120_000), "pk.test")
        .unwrap();
    assert!(url
        .query_pairs()
        .any(|(k, v)| k == "proximity_radius" && v == "50"));
}

#[tokio::test]
async fn missing_token_is_not_configured() {
    let client = test_client(None);
    let err = client.search(&nyc()).await.unwrap_err();
    assert!(err.is_not_configured(), "got {err:?}");
}

#[tokio::test]
async fn foreign_ids_are_not_looked_up() {
    let client = test_client(None);
    let found = client.details("ChIJN1t_tDeuEmsRUsoyG83frY4").await.unwrap();
    assert!(found.is_none());
}
