//! Handler tests for Products domain
//!
//! These drive the products router (behind the API key gate) with an
//! in-memory repository and check:
//! - HTTP status codes and JSON body shapes
//! - Validation, pagination, filtering, search and stats behaviour
//! - Rejected requests never reaching storage

mod common;

use axum::http::StatusCode;
use common::*;
use domain_products::*;
use serde_json::{Value, json};
use uuid::Uuid;

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_returns_201_and_defaults_in_stock() {
    let app = app(InMemoryProductRepository::new());

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({ "name": "Smart TV", "category": "Electronics", "price": 499.99 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["price"], 499.99);
    assert_eq!(body["inStock"], 0);
    assert!(body["id"].is_string());
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
}

#[tokio::test]
async fn test_create_keeps_optional_fields() {
    let app = app(InMemoryProductRepository::new());

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({
            "name": "Desk Lamp",
            "category": "Home",
            "price": 25,
            "inStock": 12,
            "description": "Warm white LED",
            "imageUrl": "https://img.example/lamp.png"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["inStock"], 12);
    assert_eq!(body["description"], "Warm white LED");
    assert_eq!(body["imageUrl"], "https://img.example/lamp.png");
}

#[tokio::test]
async fn test_create_reports_every_invalid_field() {
    let repo = InMemoryProductRepository::new();
    let app = app(repo.clone());

    let (status, body) = send(&app, "POST", "/", Some(json!({ "price": 0 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "errors": [
                { "category": "Category is required" },
                { "name": "Name is required" },
                { "price": "Price must be greater than 0" }
            ]
        })
    );
    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn test_create_rejects_negative_price_only() {
    let app = app(InMemoryProductRepository::new());

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({ "name": "Mug", "category": "Kitchen", "price": -3 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"][0]["price"], "Price must be greater than 0");
}

#[tokio::test]
async fn test_create_malformed_json_is_400_with_message() {
    let repo = InMemoryProductRepository::new();
    let app = app(repo.clone());

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/")
        .header("x-api-key", API_KEY)
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"name\": \"Mug\", "))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());
    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn test_create_wrong_type_is_field_error() {
    let repo = InMemoryProductRepository::new();
    let app = app(repo.clone());

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({ "name": "Mug", "category": "Kitchen", "price": "cheap" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": [{ "price": "Price must be greater than 0" }] })
    );
    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn test_create_wrong_type_alongside_missing_fields() {
    let app = app(InMemoryProductRepository::new());

    let (status, body) = send(&app, "POST", "/", Some(json!({ "price": "cheap" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "errors": [
            { "category": "Category is required" },
            { "name": "Name is required" },
            { "price": "Price must be greater than 0" },
        ] })
    );
}

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
async fn test_round_trip_create_then_get() {
    let app = app(InMemoryProductRepository::new());
    let created = create(&app, "Kettle", "Kitchen", 30.5).await;

    let (status, body) = send(&app, "GET", &format!("/{}", created.id), None).await;

    assert_eq!(status, StatusCode::OK);
    let fetched: Product = serde_json::from_value(body).unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_unknown_id_is_404() {
    let app = app(InMemoryProductRepository::new());

    let (status, body) = send(&app, "GET", &format!("/{}", Uuid::now_v7()), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Product not found" }));
}

#[tokio::test]
async fn test_get_malformed_id_is_404() {
    let app = app(InMemoryProductRepository::new());

    let (status, body) = send(&app, "GET", "/64b7f0c2e1d3a9a1b2c3d4e5", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

// ============================================================================
// List / pagination / filter
// ============================================================================

#[tokio::test]
async fn test_list_defaults_to_first_page_of_ten() {
    let app = app(InMemoryProductRepository::new());
    for i in 0..12 {
        create(&app, &format!("Item {}", i), "Misc", 1.0).await;
    }

    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 12);
    assert_eq!(body["page"], 1);
    assert_eq!(body["pages"], 2);
    assert_eq!(body["products"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_pagination_totals_are_independent_of_page() {
    let app = app(InMemoryProductRepository::new());
    for i in 0..25 {
        create(&app, &format!("Item {}", i), "Misc", 1.0).await;
    }

    for (page, expected_len) in [(1, 10), (2, 10), (3, 5), (4, 0), (40, 0)] {
        let (status, body) = send(&app, "GET", &format!("/?page={}&limit=10", page), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 25, "page {}", page);
        assert_eq!(body["pages"], 3, "page {}", page);
        assert_eq!(body["page"], page);
        assert_eq!(
            body["products"].as_array().unwrap().len(),
            expected_len,
            "page {}",
            page
        );
    }
}

#[tokio::test]
async fn test_page_far_past_the_end_is_empty_not_500() {
    let app = app(InMemoryProductRepository::new());
    for i in 0..3 {
        create(&app, &format!("Item {}", i), "Misc", 1.0).await;
    }

    let (status, body) = send(&app, "GET", "/?page=1000000000000000000&limit=10", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "total": 3, "page": 1_000_000_000_000_000_000_i64, "pages": 1, "products": [] })
    );
}

#[tokio::test]
async fn test_page_window_is_contiguous() {
    let app = app(InMemoryProductRepository::new());
    for i in 0..5 {
        create(&app, &format!("Item {}", i), "Misc", 1.0).await;
    }

    let (_, body) = send(&app, "GET", "/?page=2&limit=2", None).await;
    let names: Vec<&str> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["Item 2", "Item 3"]);
}

#[tokio::test]
async fn test_empty_store_has_zero_pages() {
    let app = app(InMemoryProductRepository::new());

    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "total": 0, "page": 1, "pages": 0, "products": [] }));
}

#[tokio::test]
async fn test_category_filter_is_exact() {
    let app = app(InMemoryProductRepository::new());
    create(&app, "TV", "Electronics", 300.0).await;
    create(&app, "Radio", "Electronics", 40.0).await;
    create(&app, "Cable", "Electronics Accessories", 5.0).await;
    create(&app, "Lowercase", "electronics", 5.0).await;
    create(&app, "Chair", "Furniture", 80.0).await;

    let (status, body) = send(&app, "GET", "/?category=Electronics", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    for product in body["products"].as_array().unwrap() {
        assert_eq!(product["category"], "Electronics");
    }
}

#[tokio::test]
async fn test_invalid_page_and_limit_are_validation_errors() {
    let repo = InMemoryProductRepository::new();
    let app = app(repo.clone());

    let (status, body) = send(&app, "GET", "/?page=0&limit=-1", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].get("limit").is_some());
    assert!(errors[1].get("page").is_some());
    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn test_non_numeric_page_is_400() {
    let app = app(InMemoryProductRepository::new());

    let (status, body) = send(&app, "GET", "/?page=two", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

// ============================================================================
// Search / stats
// ============================================================================

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let app = app(InMemoryProductRepository::new());
    create(&app, "Smart TV", "Electronics", 499.0).await;
    create(&app, "TV Stand", "Furniture", 89.0).await;
    create(&app, "Toaster", "Kitchen", 25.0).await;

    let (status, body) = send(&app, "GET", "/search?name=tv", None).await;

    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Smart TV", "TV Stand"]);
}

#[tokio::test]
async fn test_search_without_name_is_400() {
    let repo = InMemoryProductRepository::new();
    let app = app(repo.clone());

    let (status, body) = send(&app, "GET", "/search", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Name query param is required" }));

    let (status, _) = send(&app, "GET", "/search?name=", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn test_search_no_match_is_empty_array() {
    let app = app(InMemoryProductRepository::new());
    create(&app, "Smart TV", "Electronics", 499.0).await;

    let (status, body) = send(&app, "GET", "/search?name=blender", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_stats_counts_per_category() {
    let app = app(InMemoryProductRepository::new());
    create(&app, "a1", "A", 1.0).await;
    create(&app, "a2", "A", 1.0).await;
    create(&app, "b1", "B", 1.0).await;

    let (status, body) = send(&app, "GET", "/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    let mut stats: Vec<CategoryCount> = serde_json::from_value(body).unwrap();
    stats.sort_by(|a, b| a.category.cmp(&b.category));
    assert_eq!(
        stats,
        vec![
            CategoryCount {
                category: "A".into(),
                count: 2
            },
            CategoryCount {
                category: "B".into(),
                count: 1
            },
        ]
    );
}

#[tokio::test]
async fn test_stats_empty_store() {
    let app = app(InMemoryProductRepository::new());

    let (status, body) = send(&app, "GET", "/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

// ============================================================================
// Update / delete
// ============================================================================

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let app = app(InMemoryProductRepository::new());
    let created = create(&app, "Kettle", "Kitchen", 30.0).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/{}", created.id),
        Some(json!({ "price": 27.5, "inStock": 4 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated: Product = serde_json::from_value(body).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Kettle");
    assert_eq!(updated.category, "Kitchen");
    assert_eq!(updated.price, 27.5);
    assert_eq!(updated.in_stock, 4);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_ignores_id_in_body() {
    let app = app(InMemoryProductRepository::new());
    let created = create(&app, "Kettle", "Kitchen", 30.0).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/{}", created.id),
        Some(json!({ "id": Uuid::now_v7(), "name": "Steel Kettle" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created.id.to_string());
    assert_eq!(body["name"], "Steel Kettle");
}

#[tokio::test]
async fn test_update_invalid_fields_is_400() {
    let app = app(InMemoryProductRepository::new());
    let created = create(&app, "Kettle", "Kitchen", 30.0).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/{}", created.id),
        Some(json!({ "name": "", "price": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "errors": [
                { "name": "Name is required" },
                { "price": "Price must be greater than 0" }
            ]
        })
    );
}

#[tokio::test]
async fn test_update_unknown_id_is_404() {
    let app = app(InMemoryProductRepository::new());

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/{}", Uuid::now_v7()),
        Some(json!({ "price": 10 })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");

    let (status, _) = send(&app, "PUT", "/garbage", Some(json!({ "price": 10 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let repo = InMemoryProductRepository::new();
    let app = app(repo.clone());
    let created = create(&app, "Kettle", "Kitchen", 30.0).await;

    let (status, body) = send(&app, "DELETE", &format!("/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Product deleted" }));
    assert_eq!(repo.len(), 0);

    let (status, _) = send(&app, "GET", &format!("/{}", created.id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/{}", created.id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_malformed_id_is_404() {
    let app = app(InMemoryProductRepository::new());

    let (status, _) = send(&app, "DELETE", "/not-an-id", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Credential gate
// ============================================================================

#[tokio::test]
async fn test_mutations_without_key_never_touch_storage() {
    let repo = InMemoryProductRepository::new();
    let app = app(repo.clone());
    let id = Uuid::now_v7();
    let payload = json!({ "name": "Mug", "category": "Kitchen", "price": 5 });

    let requests = [
        ("POST", "/".to_string(), Some(payload.clone())),
        ("PUT", format!("/{}", id), Some(payload.clone())),
        ("DELETE", format!("/{}", id), None),
    ];

    for (method, uri, body) in requests {
        for key in [None, Some("wrong"), Some("TEST-KEY-123")] {
            let (status, response) = send_with_key(&app, method, &uri, body.clone(), key).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {} {:?}", method, uri, key);
            assert_eq!(response, json!({ "message": "Unauthorized: Invalid API key" }));
        }
    }

    assert_eq!(repo.calls(), 0);
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_reads_require_key() {
    let repo = InMemoryProductRepository::new();
    let app = app(repo.clone());

    for uri in ["/", "/search?name=tv", "/stats", "/0190a5d2-8b7c-7d3e-9f10-123456789abc"] {
        let (status, _) = send_with_key(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
    }
    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn test_invalid_body_without_key_is_401_not_400() {
    let app = app(InMemoryProductRepository::new());

    let (status, _) = send_with_key(&app, "POST", "/", Some(json!({})), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Storage failures
// ============================================================================

#[tokio::test]
async fn test_storage_failure_is_generic_500() {
    let app = app(UnavailableRepository);

    let cases = [
        ("GET", "/".to_string(), None),
        ("GET", "/stats".to_string(), None),
        ("GET", "/search?name=tv".to_string(), None),
        ("GET", format!("/{}", Uuid::now_v7()), None),
        ("DELETE", format!("/{}", Uuid::now_v7()), None),
        (
            "POST",
            "/".to_string(),
            Some(json!({ "name": "Mug", "category": "Kitchen", "price": 5 })),
        ),
    ];

    for (method, uri, body) in cases {
        let (status, response) = send(&app, method, &uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{} {}", method, uri);
        assert_eq!(response, json!({ "message": "Something went wrong!" }));
    }
}
