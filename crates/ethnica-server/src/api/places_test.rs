use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::super::test_support::{app, get_json};

#[tokio::test]
async fn nearby_without_key_reports_api_key_missing() {
    let (status, json) = get_json(app(None), "/api/places/nearby?lat=40.7&lng=-74.0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "API_KEY_MISSING");
    assert_eq!(json["results"], json!([]));
    assert_eq!(json["error"], "Google Places API key is not configured");
}

#[tokio::test]
async fn nearby_missing_coordinates_reports_params_missing() {
    let server = MockServer::start().await;
    let (status, json) = get_json(app(Some(&server.uri())), "/api/places/nearby?lat=40.7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "PARAMS_MISSING");
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn nearby_unparseable_radius_reports_params_missing() {
    let server = MockServer::start().await;
    let (_, json) = get_json(
        app(Some(&server.uri())),
        "/api/places/nearby?lat=40.7&lng=-74.0&radius=far",
    )
    .await;
    assert_eq!(json["status"], "PARAMS_MISSING");
}

#[tokio::test]
async fn nearby_passes_ok_body_through_with_default_radius() {
    let server = MockServer::start().await;
    let body = json!({
        "status": "OK",
        "results": [{
            "place_id": "ChIJ1",
            "name": "Sahadi's",
            "geometry": {"location": {"lat": 40.69, "lng": -73.99}},
            "types": ["grocery_or_supermarket"]
        }],
        "html_attributions": []
    });
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("location", "40.7,-74"))
        .and(query_param("radius", "5000"))
        .and(query_param("keyword", "halal"))
        .and(query_param("key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let (status, json) = get_json(
        app(Some(&server.uri())),
        "/api/places/nearby?lat=40.7&lng=-74&keyword=halal",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, body);
}

#[tokio::test]
async fn nearby_zero_results_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .mount(&server)
        .await;

    let (_, json) = get_json(app(Some(&server.uri())), "/api/places/nearby?lat=1&lng=2").await;
    assert_eq!(json["status"], "ZERO_RESULTS");
    assert_eq!(json["results"], json!([]));
}

#[tokio::test]
async fn nearby_error_status_carries_upstream_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "You have exceeded your daily request quota",
            "results": []
        })))
        .mount(&server)
        .await;

    let (status, json) = get_json(app(Some(&server.uri())), "/api/places/nearby?lat=1&lng=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "OVER_QUERY_LIMIT");
    assert_eq!(json["error"], "You have exceeded your daily request quota");
    assert_eq!(json["error_message"], "You have exceeded your daily request quota");
}

#[tokio::test]
async fn nearby_http_rejection_becomes_request_denied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let (status, json) = get_json(app(Some(&server.uri())), "/api/places/nearby?lat=1&lng=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "REQUEST_DENIED");
    assert_eq!(json["error"], "Google Places API responded with status: 403");
    assert_eq!(json["message"], "forbidden");
}

#[tokio::test]
async fn nearby_garbage_body_becomes_server_error_without_leaking_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let (status, json) = get_json(app(Some(&server.uri())), "/api/places/nearby?lat=1&lng=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "SERVER_ERROR");
    assert!(!json.to_string().contains("secret"));
}

#[tokio::test]
async fn details_requires_place_id() {
    let server = MockServer::start().await;
    let (_, json) = get_json(app(Some(&server.uri())), "/api/places/details").await;
    assert_eq!(json["status"], "PARAMS_MISSING");
    assert!(json["result"].is_null());
}

#[tokio::test]
async fn details_without_key_reports_api_key_missing() {
    let (status, json) = get_json(app(None), "/api/places/details?place_id=ChIJ1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "API_KEY_MISSING");
    assert!(json["result"].is_null());
}

#[tokio::test]
async fn details_passes_ok_body_through() {
    let server = MockServer::start().await;
    let body = json!({
        "status": "OK",
        "result": {
            "place_id": "ChIJ1",
            "name": "Sahadi's",
            "formatted_phone_number": "(718) 624-4550"
        }
    });
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "ChIJ1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let (_, json) = get_json(app(Some(&server.uri())), "/api/places/details?place_id=ChIJ1").await;
    assert_eq!(json, body);
}

#[tokio::test]
async fn details_not_found_is_reported_in_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "NOT_FOUND"})))
        .mount(&server)
        .await;

    let (status, json) = get_json(app(Some(&server.uri())), "/api/places/details?place_id=gone").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "NOT_FOUND");
    assert!(json["result"].is_null());
    assert_eq!(json["error"], "Google Places API error");
}
