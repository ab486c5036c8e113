//! Typed REST services
//!
//! Thin wrappers over [`ApiClient`](crate::client::ApiClient), one per API
//! resource, mirroring the server's routers. All of them ride the session
//! pipeline, so an expired access credential is refreshed transparently.

mod customers;
mod invoices;
mod products;
mod reports;

pub use customers::CustomerService;
pub use invoices::{InvoiceService, NewInvoice, NewInvoiceItem};
pub use products::ProductService;
pub use reports::ReportService;

use crate::auth::AuthService;
use crate::client::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn customers(&self) -> CustomerService<'_> {
        CustomerService::new(self)
    }

    pub fn products(&self) -> ProductService<'_> {
        ProductService::new(self)
    }

    pub fn invoices(&self) -> InvoiceService<'_> {
        InvoiceService::new(self)
    }

    pub fn reports(&self) -> ReportService<'_> {
        ReportService::new(self)
    }
}
