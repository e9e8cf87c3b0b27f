mod store_organization_repository;
mod store_product_repository;
mod store_profile_repository;
mod traits;

pub use store_organization_repository::StoreOrganizationRepository;
pub use store_product_repository::StoreProductRepository;
pub use store_profile_repository::StoreProfileRepository;
pub use traits::{OrganizationRepository, ProductRepository, ProfileRepository};
