//! Data models for Stockdesk.
//!
//! Records read from the hosted store (organizations, profiles, products)
//! and the email validation verdict type.

pub mod email_validation;
pub mod organization;
pub mod product;
pub mod profile;

pub use email_validation::{EmailStatus, EmailValidationResult};
pub use organization::{NewOrganization, Organization};
pub use product::{FabricStatus, NewProduct, Product, ProductForm};
pub use profile::{Profile, ProfileOrganizationUpdate};
