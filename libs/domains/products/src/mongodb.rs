//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Document, doc},
    options::{FindOptions, IndexOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CategoryCount, NewProduct, Product, ProductChanges};
use crate::repository::ProductRepository;

pub const DEFAULT_COLLECTION: &str = "products";

/// Stored shape of a product. The id is kept as its canonical string form so
/// filters and the shell see the same value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    price: f64,
    #[serde(default)]
    in_stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

/// One `$group` output row of the stats pipeline
#[derive(Debug, Deserialize)]
struct CategoryGroup {
    #[serde(rename = "_id")]
    category: Option<String>,
    count: i64,
}

impl ProductDocument {
    fn new(product: NewProduct, now: bson::DateTime) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            name: product.name,
            category: product.category,
            description: product.description,
            price: product.price,
            in_stock: product.in_stock,
            image_url: product.image_url,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<ProductDocument> for Product {
    type Error = ProductError;

    fn try_from(doc: ProductDocument) -> ProductResult<Self> {
        let id = Uuid::parse_str(&doc.id)
            .map_err(|e| ProductError::Database(format!("stored id '{}' is invalid: {}", doc.id, e)))?;

        Ok(Product {
            id,
            name: doc.name,
            category: doc.category,
            description: doc.description,
            price: doc.price,
            in_stock: doc.in_stock,
            image_url: doc.image_url,
            created_at: to_chrono(doc.created_at)?,
            updated_at: to_chrono(doc.updated_at)?,
        })
    }
}

fn to_chrono(value: bson::DateTime) -> ProductResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).ok_or_else(|| {
        ProductError::Database(format!("stored timestamp {} is out of range", value))
    })
}

fn into_products(docs: Vec<ProductDocument>) -> ProductResult<Vec<Product>> {
    docs.into_iter().map(Product::try_from).collect()
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Create the indexes used by category filtering/grouping and name search
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(IndexOptions::builder().name("idx_name".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Equality filter on category; empty document matches everything.
    fn category_filter(category: Option<&str>) -> Document {
        match category {
            Some(category) => doc! { "category": category },
            None => doc! {},
        }
    }

    /// Unanchored, case-insensitive match of `term` as literal text.
    fn name_search_filter(term: &str) -> Document {
        doc! {
            "name": {
                "$regex": regex::escape(term),
                "$options": "i",
            }
        }
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": id.to_string() }
    }

    fn stats_pipeline() -> Vec<Document> {
        vec![
            doc! { "$group": { "_id": "$category", "count": { "$sum": 1 } } },
            doc! { "$sort": { "_id": 1 } },
        ]
    }

    /// `$set` document for the present fields of `changes`, plus `updatedAt`.
    fn update_document(changes: &ProductChanges, now: bson::DateTime) -> Document {
        let mut set = doc! {};

        if let Some(ref name) = changes.name {
            set.insert("name", name);
        }
        if let Some(ref category) = changes.category {
            set.insert("category", category);
        }
        if let Some(ref description) = changes.description {
            set.insert("description", description);
        }
        if let Some(price) = changes.price {
            set.insert("price", price);
        }
        if let Some(in_stock) = changes.in_stock {
            set.insert("inStock", in_stock);
        }
        if let Some(ref image_url) = changes.image_url {
            set.insert("imageUrl", image_url);
        }
        set.insert("updatedAt", now);

        doc! { "$set": set }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        category: Option<String>,
        skip: u64,
        limit: i64,
    ) -> ProductResult<Vec<Product>> {
        let filter = Self::category_filter(category.as_deref());

        // The driver encodes skip as a signed 64-bit integer.
        let skip = skip.min(i64::MAX as u64);
        let options = FindOptions::builder().skip(skip).limit(limit).build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        let docs: Vec<ProductDocument> = cursor.try_collect().await?;

        into_products(docs)
    }

    #[instrument(skip(self))]
    async fn count(&self, category: Option<String>) -> ProductResult<u64> {
        let filter = Self::category_filter(category.as_deref());
        let count = self.collection.count_documents(filter).await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        self.collection
            .find_one(Self::id_filter(id))
            .await?
            .map(Product::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn search_by_name(&self, term: &str) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(Self::name_search_filter(term)).await?;
        let docs: Vec<ProductDocument> = cursor.try_collect().await?;

        into_products(docs)
    }

    #[instrument(skip(self))]
    async fn category_stats(&self) -> ProductResult<Vec<CategoryCount>> {
        let cursor = self.collection.aggregate(Self::stats_pipeline()).await?;
        let rows: Vec<Document> = cursor.try_collect().await?;

        let mut stats = Vec::with_capacity(rows.len());
        for row in rows {
            let group: CategoryGroup = bson::from_document(row)
                .map_err(|e| ProductError::Database(format!("unexpected stats row: {}", e)))?;
            if let Some(category) = group.category {
                stats.push(CategoryCount {
                    category,
                    count: u64::try_from(group.count).unwrap_or(0),
                });
            }
        }

        Ok(stats)
    }

    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn insert(&self, product: NewProduct) -> ProductResult<Product> {
        let document = ProductDocument::new(product, bson::DateTime::now());

        self.collection
            .insert_one(&document)
            .await
            .map_err(ProductError::from_write)?;

        tracing::info!(product_id = %document.id, "Product created successfully");
        Product::try_from(document)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: Uuid, changes: ProductChanges) -> ProductResult<Option<Product>> {
        let update = Self::update_document(&changes, bson::DateTime::now());

        let updated = self
            .collection
            .find_one_and_update(Self::id_filter(id), update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(ProductError::from_write)?;

        if updated.is_some() {
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        updated.map(Product::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(deleted)
    }
}
