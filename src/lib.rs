//! Stockdesk - email validation and company membership core.
//!
//! The library backs the Stockdesk inventory front end. It keeps the logic
//! that has real branching out of the UI layer: a layered email validator
//! with graceful degradation, organization-code resolution with idempotent
//! joins, and product form validation and search.
//!
//! # Architecture
//!
//! - **config**: Configuration from environment variables
//! - **error**: Error types per boundary
//! - **domain**: Validated value objects (email address, organization code)
//! - **models**: Store records and validation verdicts
//! - **client**: HTTP clients for the record store and verification API
//! - **repositories**: Async store abstraction used by the services
//! - **services**: Email validation, code resolution, membership, products
//! - **notice**: Mapping of outcomes to user-facing messages
//! - **metrics**: Request and fallback counters

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod notice;
pub mod repositories;
pub mod services;

pub use client::{StoreClient, VerificationClient, ZeroBounceVerifier};
pub use config::Config;
pub use error::{ConfigError, MembershipError, ProductError, StoreError, VerificationError};
pub use metrics::{Metrics, MetricsSummary, RequestTimer};
pub use models::{
    EmailStatus, EmailValidationResult, FabricStatus, Organization, Product, ProductForm, Profile,
};
pub use notice::{Notice, Severity};
pub use services::{
    suggest_correction, CompanyResolver, EmailValidator, JoinOutcome, MembershipService,
    MembershipServiceImpl, ProductService, ProductServiceImpl,
};
