//! Product catalog endpoints

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Category, Product};
use serde_json::json;

/// Operations on `/products/` and `/categories/`
pub struct ProductService<'a> {
    client: &'a ApiClient,
}

impl<'a> ProductService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        self.client.get("/products/").await
    }

    pub async fn get(&self, id: i64) -> Result<Product, ApiError> {
        self.client.get(&format!("/products/{}/", id)).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/products/{}/", id)).await
    }

    /// Set the absolute stock level of a product
    pub async fn update_stock(&self, id: i64, quantity: i64) -> Result<Product, ApiError> {
        self.client
            .post(
                &format!("/products/{}/update_stock/", id),
                &json!({ "quantity": quantity }),
            )
            .await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.client.get("/categories/").await
    }
}
