//! Live tests against a real AWS account.
//!
//! These tests need AWS credentials in the default provider chain and a
//! secret named `<STOWAGE_LIVE_SERVICE>-<APP_ENV>/doppler` whose payload
//! contains `DB_URL`. Settings can be placed in `.env.test`.
//!
//! Run with: cargo test -p stowage-config --test live_tests -- --ignored

use stowage_config::{ConfigLoader, DeploymentType, FieldKind, Schema};

/// Load test environment variables and return (service, region).
fn load_test_env() -> (String, String) {
    dotenvy::from_filename(".env.test").ok();

    let service = std::env::var("STOWAGE_LIVE_SERVICE").unwrap_or_else(|_| "stowage".to_string());
    let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string());
    (service, region)
}

#[tokio::test]
#[ignore = "requires AWS credentials and a provisioned secret"]
async fn test_live_fargate_load() {
    let (service, region) = load_test_env();
    let schema = Schema::builder()
        .required("DB_URL", FieldKind::String)
        .build()
        .unwrap();

    let loader = ConfigLoader::builder(DeploymentType::Fargate, service, schema)
        .region(region)
        .build()
        .await
        .expect("Failed to create loader");

    let config = loader.load().await.expect("Failed to load live configuration");
    assert!(config.get_str("DB_URL").is_some_and(|v| !v.is_empty()));
}
