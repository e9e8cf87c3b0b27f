//! Domain value objects and types.
//!
//! Type-safe wrappers for email addresses and organization codes. Both are
//! validated at construction time so the services never see raw, unchecked
//! input.

pub mod company_code;
pub mod email;
pub mod errors;

pub use company_code::CompanyCode;
pub use email::EmailAddress;
pub use errors::ValidationError;
