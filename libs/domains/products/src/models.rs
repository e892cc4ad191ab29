use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::validation::{validate_category, validate_name, validate_price};

/// Product entity as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned on insert
    pub id: Uuid,
    pub name: String,
    /// Used for filtering and grouping
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Always greater than 0
    pub price: f64,
    /// Units in stock
    pub in_stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a product.
///
/// `name`, `category` and `price` are held as raw JSON so that a missing or
/// mistyped value shows up as a validation error for that field rather than
/// as a body parse failure.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(
        required(message = "Name is required"),
        custom(function = "validate_name")
    )]
    #[schema(value_type = Option<String>, example = "Smart TV")]
    pub name: Option<Value>,
    #[validate(
        required(message = "Category is required"),
        custom(function = "validate_category")
    )]
    #[schema(value_type = Option<String>, example = "Electronics")]
    pub category: Option<Value>,
    pub description: Option<String>,
    #[validate(
        required(message = "Price must be greater than 0"),
        custom(function = "validate_price")
    )]
    #[schema(value_type = Option<f64>, example = 499.99)]
    pub price: Option<Value>,
    /// Defaults to 0
    pub in_stock: Option<i64>,
    pub image_url: Option<String>,
}

/// A validated product ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub price: f64,
    pub in_stock: i64,
    pub image_url: Option<String>,
}

/// Partial update body; only fields that are present are changed and
/// validated, with the same rules as [`CreateProduct`].
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(custom(function = "validate_name"))]
    #[schema(value_type = Option<String>)]
    pub name: Option<Value>,
    #[validate(custom(function = "validate_category"))]
    #[schema(value_type = Option<String>)]
    pub category: Option<Value>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Value>,
    pub in_stock: Option<i64>,
    pub image_url: Option<String>,
}

/// Validated field changes for an existing product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub in_stock: Option<i64>,
    pub image_url: Option<String>,
}

/// Query parameters for listing products
#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
pub struct ProductQuery {
    /// Exact-match category filter
    pub category: Option<String>,
    /// 1-based page number
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be a positive integer"))]
    #[param(default = 1, minimum = 1)]
    pub page: i64,
    /// Page size
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, message = "Limit must be a positive integer"))]
    #[param(default = 10, minimum = 1)]
    pub limit: i64,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            category: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl ProductQuery {
    /// Category to filter on; an empty value means no filter.
    pub fn category_filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Number of matching documents to skip before the requested page.
    pub fn skip(&self) -> u64 {
        let page = u64::try_from(self.page).unwrap_or(1).max(1);
        let limit = u64::try_from(self.limit).unwrap_or(0);
        (page - 1).saturating_mul(limit)
    }
}

/// Query parameters for name search
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring of the product name
    pub name: Option<String>,
}

/// One page of products plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    /// Products matching the filter, ignoring pagination
    pub total: u64,
    pub page: i64,
    /// `ceil(total / limit)`
    pub pages: u64,
    pub products: Vec<Product>,
}

impl ProductPage {
    pub fn new(total: u64, query: &ProductQuery, products: Vec<Product>) -> Self {
        let limit = u64::try_from(query.limit).unwrap_or(1).max(1);
        Self {
            total,
            page: query.page,
            pages: total.div_ceil(limit),
            products,
        }
    }
}

/// Number of products in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Confirmation body for a successful delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Product deleted")]
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Product deleted".to_string(),
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}
