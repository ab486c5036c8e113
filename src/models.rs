//! API payload types
//!
//! Serde mirrors of the Trinity REST API resources. Fields follow the server
//! serializers; derived read-only fields (`full_name`, `stock_status`, ...)
//! are optional so partial representations still deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer record as returned by `/users/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub full_address: Option<String>,
}

/// Fields accepted when creating or updating a customer
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Purchase history summary for a customer
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseHistory {
    pub total_purchases: i64,
    pub total_spent: f64,
    pub average_order_value: f64,
    pub last_purchase_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub invoices: Vec<serde_json::Value>,
}

/// Product record as returned by `/products/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub price: f64,
    pub category: i64,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
    pub quantity_in_stock: i64,
    #[serde(default)]
    pub stock_status: Option<String>,
    #[serde(default)]
    pub is_in_stock: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Product category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product_count: Option<i64>,
}

/// Invoice lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Cancelled,
    Refunded,
}

/// Payment method recorded on an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Paypal,
    Other,
}

/// Invoice with line items
#[derive(Debug, Clone, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub invoice_number: String,
    pub customer: i64,
    #[serde(default)]
    pub customer_details: Option<Customer>,
    pub status: InvoiceStatus,
    pub payment_method: PaymentMethod,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
}

/// Single invoice line
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceItem {
    pub id: i64,
    pub product: i64,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
    #[serde(default)]
    pub product_name: Option<String>,
}

/// KPI report returned by `/reports/`
#[derive(Debug, Clone, Deserialize)]
pub struct KpiReport {
    pub period: ReportPeriod,
    pub kpis: Kpis,
    #[serde(default)]
    pub top_products: Vec<TopProduct>,
    #[serde(default)]
    pub low_stock_alerts: Vec<LowStockAlert>,
    #[serde(default)]
    pub revenue_trend: Vec<RevenuePoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportPeriod {
    pub start_date: String,
    pub end_date: String,
    pub days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Kpis {
    pub total_revenue: f64,
    pub average_order_value: f64,
    pub total_orders: i64,
    pub total_customers: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopProduct {
    #[serde(rename = "product__name")]
    pub name: String,
    pub total_quantity: i64,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LowStockAlert {
    pub id: i64,
    pub name: String,
    pub quantity_in_stock: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RevenuePoint {
    pub date: String,
    pub revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_status_wire_format() {
        let status: InvoiceStatus = serde_json::from_str("\"paid\"").unwrap();
        assert_eq!(status, InvoiceStatus::Paid);
        assert_eq!(serde_json::to_string(&InvoiceStatus::Pending).unwrap(), "\"pending\"");
    }

    #[test]
    fn test_product_partial_representation() {
        // List endpoints omit derived fields; deserialization must tolerate that
        let json = r#"{
            "id": 1,
            "name": "Espresso beans",
            "price": 12.5,
            "category": 3,
            "quantity_in_stock": 40,
            "created_at": null
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Espresso beans");
        assert!(product.stock_status.is_none());
    }

    #[test]
    fn test_customer_patch_skips_unset_fields() {
        let patch = CustomerPatch {
            city: Some("Lyon".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"city": "Lyon"}));
    }
}
