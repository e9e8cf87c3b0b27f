pub mod mock_organization_repository;
pub mod mock_product_repository;
pub mod mock_profile_repository;

#[allow(unused_imports)]
pub use mock_organization_repository::MockOrganizationRepository;
#[allow(unused_imports)]
pub use mock_product_repository::MockProductRepository;
#[allow(unused_imports)]
pub use mock_profile_repository::MockProfileRepository;
