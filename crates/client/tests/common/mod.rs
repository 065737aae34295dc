//! Common test utilities for integration tests.
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

#[allow(unused_imports)]
pub use stowage_client::testing::load_fixture;

#[allow(unused_imports)]
pub use stowage_client::{ClientError, ExtensionClient};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Session token used by extension tests.
#[allow(dead_code)]
pub const TEST_SESSION_TOKEN: &str = "IQoJb3JpZ2luX2VjEHQaCWV1LXdlc3QtMSJHMEUCIQ";
