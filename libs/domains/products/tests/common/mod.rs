//! Shared helpers for products handler tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{ApiKeyConfig, CredentialVerifier, StaticApiKey, require_credential};
use chrono::Utc;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

pub const API_KEY: &str = "test-key-123";

/// In-memory product store. Clones share state, so a test can keep a handle
/// after moving one into the service.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<Mutex<Vec<Product>>>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repository operations performed so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.products.lock().unwrap().len()
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn matching(&self, category: Option<&str>) -> Vec<Product> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find(
        &self,
        category: Option<String>,
        skip: u64,
        limit: i64,
    ) -> ProductResult<Vec<Product>> {
        self.touch();
        Ok(self
            .matching(category.as_deref())
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, category: Option<String>) -> ProductResult<u64> {
        self.touch();
        Ok(self.matching(category.as_deref()).len() as u64)
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        self.touch();
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn search_by_name(&self, term: &str) -> ProductResult<Vec<Product>> {
        self.touch();
        let needle = term.to_lowercase();
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn category_stats(&self) -> ProductResult<Vec<CategoryCount>> {
        self.touch();
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for p in self.products.lock().unwrap().iter() {
            *counts.entry(p.category.clone()).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect())
    }

    async fn insert(&self, product: NewProduct) -> ProductResult<Product> {
        self.touch();
        let now = Utc::now();
        let product = Product {
            id: Uuid::now_v7(),
            name: product.name,
            category: product.category,
            description: product.description,
            price: product.price,
            in_stock: product.in_stock,
            image_url: product.image_url,
            created_at: now,
            updated_at: now,
        };
        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: Uuid, changes: ProductChanges) -> ProductResult<Option<Product>> {
        self.touch();
        let mut products = self.products.lock().unwrap();
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            product.name = name;
        }
        if let Some(category) = changes.category {
            product.category = category;
        }
        if let Some(description) = changes.description {
            product.description = Some(description);
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(in_stock) = changes.in_stock {
            product.in_stock = in_stock;
        }
        if let Some(image_url) = changes.image_url {
            product.image_url = Some(image_url);
        }
        product.updated_at = Utc::now();
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        self.touch();
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }
}

/// Repository whose every operation fails as if storage were unreachable.
pub struct UnavailableRepository;

#[async_trait]
impl ProductRepository for UnavailableRepository {
    async fn find(&self, _: Option<String>, _: u64, _: i64) -> ProductResult<Vec<Product>> {
        Err(down())
    }
    async fn count(&self, _: Option<String>) -> ProductResult<u64> {
        Err(down())
    }
    async fn find_by_id(&self, _: Uuid) -> ProductResult<Option<Product>> {
        Err(down())
    }
    async fn search_by_name(&self, _: &str) -> ProductResult<Vec<Product>> {
        Err(down())
    }
    async fn category_stats(&self) -> ProductResult<Vec<CategoryCount>> {
        Err(down())
    }
    async fn insert(&self, _: NewProduct) -> ProductResult<Product> {
        Err(down())
    }
    async fn update(&self, _: Uuid, _: ProductChanges) -> ProductResult<Option<Product>> {
        Err(down())
    }
    async fn delete(&self, _: Uuid) -> ProductResult<bool> {
        Err(down())
    }
}

fn down() -> ProductError {
    ProductError::Database("server selection timeout: no available servers at 10.1.2.3".into())
}

/// Products router behind the API key gate, as mounted by the service binary.
pub fn app<R: ProductRepository + 'static>(repo: R) -> Router {
    let verifier: Arc<dyn CredentialVerifier> =
        Arc::new(StaticApiKey::from_config(&ApiKeyConfig::new(API_KEY)).unwrap());
    handlers::router(ProductService::new(repo)).layer(axum::middleware::from_fn_with_state(
        verifier,
        require_credential,
    ))
}

/// Send a request carrying the valid API key.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_with_key(app, method, uri, body, Some(API_KEY)).await
}

pub async fn send_with_key(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    key: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Create a product through the API and return it.
pub async fn create(app: &Router, name: &str, category: &str, price: f64) -> Product {
    let (status, body) = send(
        app,
        "POST",
        "/",
        Some(serde_json::json!({ "name": name, "category": category, "price": price })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    serde_json::from_value(body).unwrap()
}
