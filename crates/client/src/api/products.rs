//! Product catalog endpoints (cached).

use tracing::{debug, instrument};

use embermart_core::ProductId;

use crate::error::{ClientError, Result};

use super::ApiClient;
use super::cache::CacheValue;
use super::types::{Product, ProductPage, ProductQuery};

impl ApiClient {
    /// Get a page of the product listing, honoring category/availability
    /// filters.
    ///
    /// The unfiltered first page is cached for 5 minutes; filtered queries
    /// always hit the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage> {
        let cache_key = "products:default".to_string();

        if query.is_default()
            && let Some(CacheValue::Products(page)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(page);
        }

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(page) = query.page {
            params.push(("page", page.to_string()));
        }
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }
        if let Some(available) = query.available {
            params.push(("available", available.to_string()));
        }

        let page: ProductPage = self.get_json("/api/products", &params).await?;

        if query.is_default() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(page.clone()))
                .await;
        }

        Ok(page)
    }

    /// Get a single product by ID (cached for 5 minutes).
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request
    /// fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: ProductId) -> Result<Product> {
        let cache_key = format!("product:{product_id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self
            .get_json(&format!("/api/products/{product_id}"), &[])
            .await
            .map_err(|e| match e {
                ClientError::NotFound(_) => {
                    ClientError::NotFound(format!("Product {product_id}"))
                }
                other => other,
            })?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Invalidate all cached catalog data.
    pub async fn invalidate_catalog(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}
