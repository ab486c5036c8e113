//! Invoice endpoints

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Invoice, InvoiceStatus, PaymentMethod};
use serde::Serialize;
use serde_json::json;

/// Line of a new invoice
#[derive(Debug, Clone, Serialize)]
pub struct NewInvoiceItem {
    pub product: i64,
    pub quantity: i64,
}

/// Payload for creating an invoice
#[derive(Debug, Clone, Serialize)]
pub struct NewInvoice {
    pub customer: i64,
    pub payment_method: PaymentMethod,
    pub items: Vec<NewInvoiceItem>,
}

/// Operations on `/invoices/`
pub struct InvoiceService<'a> {
    client: &'a ApiClient,
}

impl<'a> InvoiceService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Invoice>, ApiError> {
        self.client.get("/invoices/").await
    }

    pub async fn get(&self, id: i64) -> Result<Invoice, ApiError> {
        self.client.get(&format!("/invoices/{}/", id)).await
    }

    pub async fn create(&self, invoice: &NewInvoice) -> Result<Invoice, ApiError> {
        self.client.post("/invoices/", invoice).await
    }

    /// Move an invoice to a new lifecycle status
    pub async fn set_status(&self, id: i64, status: InvoiceStatus) -> Result<Invoice, ApiError> {
        self.client
            .patch(&format!("/invoices/{}/", id), &json!({ "status": status }))
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("/invoices/{}/", id)).await
    }
}
