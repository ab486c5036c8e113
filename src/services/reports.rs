//! KPI report endpoints (staff)
//!
//! All aggregation happens server-side; this client only fetches the
//! computed figures.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::KpiReport;
use serde_json::Value;

/// Read-only operations on `/reports/`
pub struct ReportService<'a> {
    client: &'a ApiClient,
}

impl<'a> ReportService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Headline KPIs over the trailing `days` window
    pub async fn kpis(&self, days: u32) -> Result<KpiReport, ApiError> {
        self.client.get(&format!("/reports/?days={}", days)).await
    }

    pub async fn sales(&self, days: u32) -> Result<Value, ApiError> {
        self.client.get(&format!("/reports/sales/?days={}", days)).await
    }

    pub async fn product_performance(&self) -> Result<Value, ApiError> {
        self.client.get("/reports/products/").await
    }

    pub async fn customer_analytics(&self) -> Result<Value, ApiError> {
        self.client.get("/reports/customers/").await
    }
}
