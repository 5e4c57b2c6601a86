//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing the operations behind each route
///
/// DTOs are validated again here so the service is safe to call outside
/// HTTP (tests, CLI).
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All products ordered by id
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a new product. It starts out available.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input).await
    }

    /// Replace name, price and availability of an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;

        let mut product = self.get_product(id).await?;
        product.apply_update(input);

        self.repository.save(product).await
    }

    /// Flip the availability flag of an existing product
    #[instrument(skip(self))]
    pub async fn toggle_availability(&self, id: i32) -> ProductResult<Product> {
        let mut product = self.get_product(id).await?;
        product.toggle_availability();

        self.repository.save(product).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        self.get_product(id).await?;

        // A concurrent delete may win between lookup and removal
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id))
        }
    }

    /// Remove every product, returning how many were deleted
    #[instrument(skip(self))]
    pub async fn clear_products(&self) -> ProductResult<u64> {
        self.repository.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn product(id: i32, availability: bool) -> Product {
        Product {
            id,
            name: "Monitor".to_string(),
            price: 300.0,
            availability,
        }
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get_product(3).await;

        assert!(matches!(result, Err(ProductError::NotFound(3))));
    }

    #[tokio::test]
    async fn test_create_product_rejects_invalid_input_without_insert() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .create_product(CreateProduct {
                name: String::new(),
                price: -1.0,
            })
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_missing_product_does_not_save() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .update_product(
                8,
                UpdateProduct {
                    name: "Desk".to_string(),
                    price: 10.0,
                    availability: true,
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(8))));
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(product(id, true))));
        mock_repo
            .expect_save()
            .withf(|p| p.id == 2 && p.name == "Desk" && p.price == 99.0 && !p.availability)
            .times(1)
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let updated = service
            .update_product(
                2,
                UpdateProduct {
                    name: "Desk".to_string(),
                    price: 99.0,
                    availability: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Desk");
    }

    #[tokio::test]
    async fn test_toggle_availability_negates_flag() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(product(id, true))));
        mock_repo
            .expect_save()
            .withf(|p| !p.availability)
            .times(1)
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let toggled = service.toggle_availability(1).await.unwrap();

        assert!(!toggled.availability);
    }

    #[tokio::test]
    async fn test_delete_missing_product_does_not_delete() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_delete().never();

        let service = ProductService::new(mock_repo);
        let result = service.delete_product(5).await;

        assert!(matches!(result, Err(ProductError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_delete_lost_race_reports_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(product(id, true))));
        mock_repo
            .expect_delete()
            .with(eq(5))
            .returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        let result = service.delete_product(5).await;

        assert!(matches!(result, Err(ProductError::NotFound(5))));
    }
}
