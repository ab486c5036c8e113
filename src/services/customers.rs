//! Customer management endpoints (staff)

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Customer, CustomerPatch, PurchaseHistory};

/// CRUD operations on `/users/`
pub struct CustomerService<'a> {
    client: &'a ApiClient,
}

impl<'a> CustomerService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, ApiError> {
        self.client.get("/users/").await
    }

    pub async fn get(&self, id: i64) -> Result<Customer, ApiError> {
        self.client.get(&format!("/users/{}/", id)).await
    }

    pub async fn create(&self, customer: &CustomerPatch) -> Result<Customer, ApiError> {
        self.client.post("/users/", customer).await
    }

    pub async fn update(&self, id: i64, customer: &CustomerPatch) -> Result<Customer, ApiError> {
        self.client.put(&format!("/users/{}/", id), customer).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/users/{}/", id)).await
    }

    /// Purchase history and spend statistics for one customer
    pub async fn history(&self, id: i64) -> Result<PurchaseHistory, ApiError> {
        self.client.get(&format!("/users/{}/history/", id)).await
    }
}
