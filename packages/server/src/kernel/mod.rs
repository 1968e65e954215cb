//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{MarketplaceAdapter, ServerDeps, VendorGatewayAdapter};
pub use test_dependencies::{
    mock_credentials, MarketplaceCall, MockConfigResolver, MockMarketplace, MockVendorGateway,
    TestDependencies, VendorCall, VendorOperation,
};
pub use traits::*;
