//! Integration tests for the proxy-facing `GooglePlacesClient` and the
//! server-side `GooglePlacesUpstream`.

use ethnica_core::LngLat;
use ethnica_places::google::UpstreamReply;
use ethnica_places::{
    GooglePlacesClient, GooglePlacesUpstream, HttpOptions, NearbyQuery, ProviderError, Seeder,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NYC: LngLat = LngLat::new(-74.006, 40.7128);

fn test_client(proxy_url: &str) -> GooglePlacesClient {
    GooglePlacesClient::new(
        Some("public-key"),
        proxy_url,
        &HttpOptions::default(),
        Seeder::new(0),
    )
    .expect("client construction should not fail")
}

fn place() -> serde_json::Value {
    serde_json::json!({
        "place_id": "ChIJ123",
        "name": "Community Bookstore",
        "types": ["book_store", "store", "point_of_interest"],
        "geometry": { "location": { "lat": 40.7185, "lng": -73.997 } },
        "vicinity": "456 Park Ave",
        "rating": 4.8,
        "user_ratings_total": 56,
        "price_level": 2,
        "opening_hours": { "open_now": true },
        "photos": [{ "photo_reference": "ref-1" }]
    })
}

async fn mount_nearby(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/places/nearby"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn nearby_ok_is_normalized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/places/nearby"))
        .and(query_param("lat", "40.7128"))
        .and(query_param("lng", "-74.006"))
        .and(query_param("radius", "5000"))
        .and(query_param("keyword", "books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [place()]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .search(&NearbyQuery::new(NYC).with_query(Some("books")))
        .await
        .expect("search should succeed");

    assert_eq!(results.len(), 1);
    let b = &results[0];
    assert_eq!(b.id, "ChIJ123");
    assert_eq!(b.category, "Bookstore");
    assert_eq!(b.coordinates, LngLat::new(-73.997, 40.7185));
    assert_eq!(b.open_now, Some(true));
    assert!(b.photos[0].ends_with("photoreference=ref-1&key=public-key"));
    assert!(b.distance.unwrap() > 0.0);
}

#[tokio::test]
async fn soft_misses_return_empty() {
    for body in [
        serde_json::json!({ "status": "ZERO_RESULTS", "results": [] }),
        serde_json::json!({ "status": "REQUEST_DENIED", "error": "Google Places API responded with status: 403" }),
        serde_json::json!({ "status": "OK", "results": [] }),
    ] {
        let server = MockServer::start().await;
        mount_nearby(&server, body.clone()).await;
        let client = test_client(&server.uri());
        let results = client.search(&NearbyQuery::new(NYC)).await.unwrap();
        assert!(results.is_empty(), "{body}");
    }
}

#[tokio::test]
async fn other_statuses_are_errors() {
    let server = MockServer::start().await;
    mount_nearby(
        &server,
        serde_json::json!({ "status": "API_KEY_MISSING", "error": "Google Places API key is not configured" }),
    )
    .await;

    let client = test_client(&server.uri());
    let err = client.search(&NearbyQuery::new(NYC)).await.unwrap_err();
    match err {
        ProviderError::Status {
            provider,
            status,
            message,
        } => {
            assert_eq!(provider, "google_places");
            assert_eq!(status, "API_KEY_MISSING");
            assert_eq!(message, "Google Places API key is not configured");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_public_key_is_not_configured() {
    let client =
        GooglePlacesClient::new(None, "http://127.0.0.1:9", &HttpOptions::default(), Seeder::new(0))
            .unwrap();
    let err = client.search(&NearbyQuery::new(NYC)).await.unwrap_err();
    assert!(err.is_not_configured());
}

#[tokio::test]
async fn unreachable_proxy_is_an_http_error() {
    let client = test_client("http://127.0.0.1:9");
    let err = client.search(&NearbyQuery::new(NYC)).await.unwrap_err();
    assert!(matches!(err, ProviderError::Http(_)), "got {err:?}");
}

#[tokio::test]
async fn details_ok_and_null_result() {
    let server = MockServer::start().await;
    let mut detailed = place();
    detailed["formatted_address"] = serde_json::json!("456 Park Ave, New York, NY");
    detailed["website"] = serde_json::json!("https://communitybookstore.example.com");
    detailed["reviews"] = serde_json::json!([
        { "author_name": "Ana", "rating": 5, "text": "Lovely", "time": 1_700_000_000 }
    ]);
    Mock::given(method("GET"))
        .and(path("/api/places/details"))
        .and(query_param("place_id", "ChIJ123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "result": detailed
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/places/details"))
        .and(query_param("place_id", "ChIJgone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "NOT_FOUND",
            "result": null
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let b = client.details("ChIJ123").await.unwrap().expect("found");
    assert_eq!(b.address, "456 Park Ave, New York, NY");
    assert_eq!(b.website.as_deref(), Some("https://communitybookstore.example.com"));
    assert_eq!(b.reviews[0].time, Some(1_700_000_000));
    assert!(b.distance.is_none());

    assert!(client.details("ChIJgone").await.unwrap().is_none());
}

#[tokio::test]
async fn details_error_status_carries_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/places/details"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OVER_QUERY_LIMIT",
            "result": null,
            "error": "quota exceeded"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.details("ChIJ123").await.unwrap_err();
    assert!(
        matches!(
            err,
            ProviderError::Status { ref status, ref message, .. }
                if status == "OVER_QUERY_LIMIT" && message == "quota exceeded"
        ),
        "got {err:?}"
    );
}

#[tokio::test]
async fn upstream_passes_body_through_and_reports_rejections() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("location", "40.7128,-74.006"))
        .and(query_param("key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [place()]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let upstream =
        GooglePlacesUpstream::with_base_url("secret", &HttpOptions::default(), &server.uri())
            .unwrap();
    let reply = upstream
        .nearby(&ethnica_places::google::NearbyParams {
            lat: 40.7128,
            lng: -74.006,
            radius_m: 5000,
            keyword: None,
        })
        .await
        .unwrap();
    assert_eq!(reply.body_status(), Some("OK"));

    let reply = upstream.details("ChIJ123").await.unwrap();
    assert_eq!(
        reply,
        UpstreamReply::Rejected {
            status: 403,
            body: "forbidden".to_string()
        }
    );
}
