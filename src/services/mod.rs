//! Application service layer.
//!
//! Services hold the business rules: layered email validation, organization
//! code resolution, membership orchestration and product inventory over the
//! repositories. They
//! return plain outcome values and never produce user-facing output.

mod company_resolver;
mod email_validator;
mod membership_service;
mod product_service;

pub use company_resolver::{select_by_code, CompanyResolver, JoinOutcome};
pub use email_validator::{
    is_disposable, suggest_correction, validate_basic, EmailValidator, DISPOSABLE_DOMAINS,
    WELL_KNOWN_DOMAINS,
};
pub use membership_service::{Membership, MembershipService, MembershipServiceImpl};
pub use product_service::{filter_products, validate_form, ProductService, ProductServiceImpl};
