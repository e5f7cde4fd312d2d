//! HTTP-level tests for `/api/cities/{cityId}/pointsofinterest`.

mod common;

use axum::http::StatusCode;
use common::{
    body_bytes, body_json, build_test_app, delete, get, location, patch_json, post_json, put_json,
};
use serde_json::json;

const BASE: &str = "/api/cities/1/pointsofinterest";

// ---------------------------------------------------------------------------
// Missing parent city
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_every_endpoint_returns_404_for_missing_city() {
    let app = build_test_app().await;
    let body = json!({"name": "Test Name", "description": "Test Description"});
    let patch = json!([{"op": "replace", "path": "/name", "value": "Other"}]);

    // Point of interest 1 exists, but under Leeds, not city 42
    for id in [1, 999] {
        let uri = format!("/api/cities/42/pointsofinterest/{id}");
        assert_eq!(get(&app, &uri).await.status(), StatusCode::NOT_FOUND);
        assert_eq!(put_json(&app, &uri, body.clone()).await.status(), StatusCode::NOT_FOUND);
        assert_eq!(patch_json(&app, &uri, patch.clone()).await.status(), StatusCode::NOT_FOUND);
        assert_eq!(delete(&app, &uri).await.status(), StatusCode::NOT_FOUND);
    }

    let uri = "/api/cities/42/pointsofinterest";
    assert_eq!(get(&app, uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(post_json(&app, uri, body).await.status(), StatusCode::NOT_FOUND);

    // Seed rows are untouched
    let leeds = body_json(get(&app, BASE).await).await;
    assert_eq!(leeds.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_point_of_another_city_is_not_found() {
    let app = build_test_app().await;
    // Point of interest 3 belongs to Sheffield
    let response = get(&app, "/api/cities/1/pointsofinterest/3").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_points_of_interest() {
    let app = build_test_app().await;
    let response = get(&app, "/api/cities/2/pointsofinterest").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Botanical Gardens", "Kelham Island Museum"]);
}

#[tokio::test]
async fn test_list_for_city_without_points_is_empty() {
    let app = build_test_app().await;
    let created = body_json(post_json(&app, "/api/cities", json!({"name": "York"})).await).await;
    let id = created["id"].as_i64().unwrap();

    let response = get(&app, &format!("/api/cities/{id}/pointsofinterest")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_get_point_of_interest() {
    let app = build_test_app().await;
    let response = get(&app, "/api/cities/1/pointsofinterest/2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], 2);
    assert_eq!(json["cityId"], 1);
    assert_eq!(json["name"], "Kirkgate Market");
    assert_eq!(json["description"], "One of the largest indoor markets in Europe");
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_then_fetch_round_trip() {
    let app = build_test_app().await;
    let response = post_json(
        &app,
        BASE,
        json!({"name": "Test Name", "description": "Test Description"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let location = location(&response);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(location, format!("{BASE}/{id}"));

    let fetched = body_json(get(&app, &location).await).await;
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["cityId"], 1);
    assert_eq!(fetched["name"], "Test Name");
    assert_eq!(fetched["description"], "Test Description");
}

#[tokio::test]
async fn test_create_ignores_city_id_in_body() {
    let app = build_test_app().await;
    let response = post_json(&app, BASE, json!({"name": "Roundhay Park", "cityId": 2})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["cityId"], 1);
}

#[tokio::test]
async fn test_create_anonymous_point_without_description() {
    let app = build_test_app().await;
    let response = post_json(&app, BASE, json!({})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["name"], "");
}

#[tokio::test]
async fn test_create_requires_name_when_described() {
    let app = build_test_app().await;
    for body in [
        json!({"description": "Test Description"}),
        json!({"name": "", "description": "Test Description"}),
    ] {
        let response = post_json(&app, BASE, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(
            json["fields"],
            json!({"name": ["name is required when a description is given"]})
        );
    }
}

#[tokio::test]
async fn test_create_rejects_invalid_name() {
    let app = build_test_app().await;
    for name in ["Leeds123".to_string(), "a".repeat(51)] {
        let response = post_json(&app, BASE, json!({"name": name})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert!(json["fields"]["name"].is_array());
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_point_of_interest() {
    let app = build_test_app().await;
    let uri = format!("{BASE}/1");
    let response = put_json(
        &app,
        &uri,
        json!({"name": "Kirkstall Abbey Ruins", "description": "Founded in the twelfth century"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(&app, &uri).await).await;
    assert_eq!(json["name"], "Kirkstall Abbey Ruins");
    assert_eq!(json["description"], "Founded in the twelfth century");
    assert_eq!(json["cityId"], 1);
}

#[tokio::test]
async fn test_update_missing_point_returns_404() {
    let app = build_test_app().await;
    let response = put_json(&app, &format!("{BASE}/999"), json!({"name": "Nowhere"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_invalid_body_returns_400() {
    let app = build_test_app().await;
    let response = put_json(&app, &format!("{BASE}/1"), json!({"description": "a".repeat(201)})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Partial update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_patch_applies_operations() {
    let app = build_test_app().await;
    let uri = format!("{BASE}/2");
    let response = patch_json(
        &app,
        &uri,
        json!([
            {"op": "replace", "path": "/name", "value": "Leeds Kirkgate Market"},
            {"op": "replace", "path": "/description", "value": "Indoor market"}
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(&app, &uri).await).await;
    assert_eq!(json["name"], "Leeds Kirkgate Market");
    assert_eq!(json["description"], "Indoor market");
}

#[tokio::test]
async fn test_patch_leaves_untouched_fields() {
    let app = build_test_app().await;
    let uri = format!("{BASE}/1");
    patch_json(
        &app,
        &uri,
        json!([{"op": "replace", "path": "/name", "value": "The Abbey"}]),
    )
    .await;

    let json = body_json(get(&app, &uri).await).await;
    assert_eq!(json["name"], "The Abbey");
    assert_eq!(json["description"], "A ruined Cistercian monastery");
}

#[tokio::test]
async fn test_patch_remove_description() {
    let app = build_test_app().await;
    let uri = format!("{BASE}/1");
    let response = patch_json(&app, &uri, json!([{"op": "remove", "path": "/description"}])).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(get(&app, &uri).await).await;
    assert!(json["description"].is_null());
}

#[tokio::test]
async fn test_patch_producing_invalid_point_is_rejected() {
    let app = build_test_app().await;
    let uri = format!("{BASE}/1");

    // Described points of interest must keep a name
    let response = patch_json(&app, &uri, json!([{"op": "remove", "path": "/name"}])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["fields"]["name"].is_array());

    let response = patch_json(
        &app,
        &uri,
        json!([{"op": "replace", "path": "/name", "value": "Abbey 2"}]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(get(&app, &uri).await).await;
    assert_eq!(json["name"], "Kirkstall Abbey");
}

#[tokio::test]
async fn test_patch_with_unknown_path_is_bad_request() {
    let app = build_test_app().await;
    let response = patch_json(
        &app,
        &format!("{BASE}/1"),
        json!([{"op": "replace", "path": "/cityId", "value": "2"}]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_patch_without_value_is_bad_request() {
    let app = build_test_app().await;
    let uri = format!("{BASE}/1");
    for op in ["replace", "add"] {
        let response = patch_json(&app, &uri, json!([{"op": op, "path": "/description"}])).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    }

    let json = body_json(get(&app, &uri).await).await;
    assert_eq!(json["description"], "A ruined Cistercian monastery");

    // An explicit null still clears the field
    let response = patch_json(
        &app,
        &uri,
        json!([{"op": "replace", "path": "/description", "value": null}]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_json(get(&app, &uri).await).await["description"].is_null());
}

#[tokio::test]
async fn test_patch_missing_point_returns_404() {
    let app = build_test_app().await;
    let response = patch_json(
        &app,
        &format!("{BASE}/999"),
        json!([{"op": "replace", "path": "/name", "value": "Nowhere"}]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_delete_point_of_interest() {
    let app = build_test_app().await;
    let uri = format!("{BASE}/1");
    let response = delete(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(get(&app, &uri).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete(&app, &uri).await.status(), StatusCode::NOT_FOUND);

    let remaining = body_json(get(&app, BASE).await).await;
    assert_eq!(remaining.as_array().unwrap().len(), 1);
}
