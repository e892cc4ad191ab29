use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CategoryCount, NewProduct, Product, ProductChanges};

/// Storage seam for products.
///
/// Implementations assign `id`, `createdAt` and `updatedAt`; callers never
/// supply them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Products matching `category` (all when `None`), `limit` of them after
    /// skipping `skip`, in natural storage order.
    async fn find(
        &self,
        category: Option<String>,
        skip: u64,
        limit: i64,
    ) -> ProductResult<Vec<Product>>;

    /// Count products matching `category` (all when `None`)
    async fn count(&self, category: Option<String>) -> ProductResult<u64>;

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Products whose name contains `term`, ignoring case. `term` is literal
    /// text, not a pattern.
    async fn search_by_name(&self, term: &str) -> ProductResult<Vec<Product>>;

    /// Product count per distinct category
    async fn category_stats(&self) -> ProductResult<Vec<CategoryCount>>;

    /// Persist a new product and return it with its id and timestamps
    async fn insert(&self, product: NewProduct) -> ProductResult<Product>;

    /// Apply the present fields of `changes`; `None` when no product has `id`
    async fn update(&self, id: Uuid, changes: ProductChanges) -> ProductResult<Option<Product>>;

    /// Remove a product; `false` when no product has `id`
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}
