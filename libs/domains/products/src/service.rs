//! Product Service - Business logic layer

use axum_helpers::field_errors;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CategoryCount, CreateProduct, Product, ProductPage, ProductQuery, UpdateProduct};
use crate::repository::ProductRepository;
use crate::validation::{validate_create, validate_update};

/// Largest skip storage can encode; no collection holds more documents.
const MAX_SKIP: u64 = i64::MAX as u64;

/// Product service: input checks, id parsing and pagination on top of a
/// [`ProductRepository`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// One page of products, optionally restricted to a category.
    ///
    /// `total` and `pages` describe the whole filtered set, so a page past the
    /// end yields an empty slice with unchanged totals.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> ProductResult<ProductPage> {
        query
            .validate()
            .map_err(|e| ProductError::Validation(field_errors(&e)))?;

        let category = query.category_filter().map(str::to_owned);
        let skip = query.skip();

        if skip > MAX_SKIP {
            let total = self.repository.count(category).await?;
            return Ok(ProductPage::new(total, &query, Vec::new()));
        }

        let (total, products) = tokio::try_join!(
            self.repository.count(category.clone()),
            self.repository.find(category, skip, query.limit),
        )?;

        Ok(ProductPage::new(total, &query, products))
    }

    /// Look up by id. Malformed ids are reported exactly like unknown ones.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        let uuid = parse_id(id)?;
        self.repository
            .find_by_id(uuid)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn search_products(&self, name: Option<&str>) -> ProductResult<Vec<Product>> {
        let term = name
            .filter(|n| !n.is_empty())
            .ok_or(ProductError::MissingSearchTerm)?;
        self.repository.search_by_name(term).await
    }

    #[instrument(skip(self))]
    pub async fn category_stats(&self) -> ProductResult<Vec<CategoryCount>> {
        self.repository.category_stats().await
    }

    #[instrument(skip(self, input), fields(product_name = ?input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = validate_create(input)?;
        self.repository.insert(product).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        let changes = validate_update(input)?;
        let uuid = parse_id(id)?;
        self.repository
            .update(uuid, changes)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        let uuid = parse_id(id)?;
        if !self.repository.delete(uuid).await? {
            return Err(ProductError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

fn parse_id(id: &str) -> ProductResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| ProductError::NotFound(id.to_string()))
}
