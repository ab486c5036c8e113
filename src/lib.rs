//! Trinity API Client
//!
//! Rust client for the Trinity storefront REST API.
//!
//! # Features
//!
//! - **Session pipeline**: bearer injection plus transparent single-retry
//!   token refresh on 401
//! - **Persisted sessions**: credential pair and cached role survive
//!   process restarts (JSON session file)
//! - **Route guard**: explicit state machine gating staff/customer views
//! - **Typed services**: customers, products, invoices and KPI reports
//!
//! # Architecture
//!
//! ```text
//! CLI / caller ──► services ──► ApiClient ──► Trinity API
//!                                  │
//!                                  ├── SessionStore (tokens + role)
//!                                  └── 401 ──► refresh ──► retry once
//!
//! RouteGuard ──► SessionStore / GET /auth/me/ ──► render | redirect
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod services;
pub mod session;

pub use auth::{AuthService, CurrentUser, RegisterRequest, TokenPair};
pub use client::ApiClient;
pub use config::Config;
pub use error::ApiError;
pub use guard::{GuardDecision, RouteGuard, LOGIN_ROUTE};
pub use services::{CustomerService, InvoiceService, ProductService, ReportService};
pub use session::{FileSessionStore, MemorySessionStore, Role, SessionStore};
