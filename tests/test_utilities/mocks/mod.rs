/// Mock implementations for testing
mod mock_package_manager;
mod mock_progress_reporter;

pub use mock_package_manager::{GatewayCall, MockPackageManager};
pub use mock_progress_reporter::MockProgressReporter;
