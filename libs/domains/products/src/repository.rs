use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product};

/// Repository trait for Product persistence
///
/// Implementations are injected into [`ProductService`](crate::ProductService);
/// the service performs one lookup and at most one mutation per request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, ordered by id ascending
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Insert a new, available product and return it with its assigned id
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Overwrite every column of an existing product
    ///
    /// Returns `ProductError::NotFound` if the row no longer exists.
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether a row was removed
    async fn delete(&self, id: i32) -> ProductResult<bool>;

    /// Delete every product, returning the number of rows removed
    async fn clear(&self) -> ProductResult<u64>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    products: BTreeMap<i32, Product>,
    // Ids are never reused, like a SERIAL column
    last_id: i32,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state.products.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut state = self.state.write().await;

        state.last_id += 1;
        let product = Product {
            id: state.last_id,
            name: input.name,
            price: input.price,
            availability: true,
        };
        state.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let mut state = self.state.write().await;

        let existing = state
            .products
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;
        *existing = product.clone();

        tracing::info!(product_id = product.id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut state = self.state.write().await;

        if state.products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn clear(&self) -> ProductResult<u64> {
        let mut state = self.state.write().await;
        let removed = state.products.len() as u64;
        state.products.clear();

        tracing::info!(removed, "Cleared products");
        Ok(removed)
    }
}
