//! Integration tests for configuration loading through the public API.
//!
//! These tests verify end-to-end loader behavior as a consuming service
//! would use it: declare a schema, build a loader, load once, and read
//! typed values or deserialize into an application struct.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serial_test::serial;
use stowage_client::testing::InMemorySecretStore;
use stowage_config::{
    ConfigError, ConfigLoader, DeploymentType, FieldKind, Schema, env_var_or_none,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct BillingConfig {
    db_url: String,
    stripe_key: SecretString,
    port: u16,
    log_level: String,
}

fn billing_schema() -> Schema {
    Schema::builder()
        .required("DB_URL", FieldKind::Url)
        .required("STRIPE_KEY", FieldKind::Secret)
        .with_default("PORT", FieldKind::Integer, "8080")
        .required(
            "LOG_LEVEL",
            FieldKind::OneOf(vec!["debug".into(), "info".into(), "warn".into()]),
        )
        .build()
        .expect("schema should build")
}

#[tokio::test]
#[serial]
async fn test_fargate_load_into_application_struct() {
    let store = InMemorySecretStore::new().with_secret(
        "billing-prod/doppler",
        r#"{"DB_URL":"postgres://db.internal/billing","STRIPE_KEY":"sk_live_51H8","LOG_LEVEL":"warn"}"#,
    );
    let loader = ConfigLoader::builder(DeploymentType::Fargate, "billing", billing_schema())
        .unsecret_keys(["LOG_LEVEL", "PORT"])
        .region("eu-west-1")
        .build_with_store(store.clone())
        .expect("loader should build");

    let (config, again) = temp_env::async_with_vars(
        [
            ("APP_ENV", Some("prod")),
            ("LOG_LEVEL", Some("debug")),
            ("PORT", None),
        ],
        async {
            let config = loader.load().await.expect("load should succeed");
            let again = loader.load().await.expect("cached load should succeed");
            (config, again)
        },
    )
    .await;

    assert!(Arc::ptr_eq(&config, &again));
    assert_eq!(store.call_count(), 1);

    let billing: BillingConfig = config.deserialize().expect("should deserialize");
    assert_eq!(billing.db_url, "postgres://db.internal/billing");
    assert_eq!(billing.stripe_key.expose_secret(), "sk_live_51H8");
    assert_eq!(billing.port, 8080);
    assert_eq!(billing.log_level, "debug");

    // Debug output of both the loaded config and the struct keeps the key hidden.
    assert!(!format!("{config:?}").contains("sk_live_51H8"));
    assert!(!format!("{billing:?}").contains("sk_live_51H8"));
}

#[tokio::test]
#[serial]
async fn test_validation_error_lists_fields() {
    let store = InMemorySecretStore::new().with_secret(
        "billing-prod/doppler",
        r#"{"DB_URL":"not-a-url","LOG_LEVEL":"info"}"#,
    );
    let loader = ConfigLoader::builder(DeploymentType::Fargate, "billing", billing_schema())
        .build_with_store(store)
        .unwrap();

    let err = temp_env::async_with_vars([("APP_ENV", Some("prod"))], loader.load())
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, ConfigError::Validation { .. }));
    assert!(message.contains("DB_URL: expected URL"), "{message}");
    assert!(message.contains("STRIPE_KEY: missing required value"), "{message}");
}

#[test]
fn test_deployment_type_parses_from_config_strings() {
    let deployment: DeploymentType = "lambda".parse().unwrap();
    assert_eq!(deployment, DeploymentType::Lambda);
    assert!("kubernetes".parse::<DeploymentType>().is_err());
}

#[test]
#[serial]
fn test_env_var_or_none_trims_and_drops_blank() {
    temp_env::with_vars(
        [
            ("_STOWAGE_IT_SET", Some("  prod ")),
            ("_STOWAGE_IT_BLANK", Some("   ")),
            ("_STOWAGE_IT_UNSET", None),
        ],
        || {
            assert_eq!(env_var_or_none("_STOWAGE_IT_SET").as_deref(), Some("prod"));
            assert_eq!(env_var_or_none("_STOWAGE_IT_BLANK"), None);
            assert_eq!(env_var_or_none("_STOWAGE_IT_UNSET"), None);
        },
    );
}

#[tokio::test]
#[serial]
async fn test_empty_non_secret_value_reaches_decoder() {
    let store = InMemorySecretStore::new().with_secret(
        "billing-prod/doppler",
        r#"{"DB_URL":"postgres://db.internal/billing","STRIPE_KEY":"sk_live_51H8","LOG_LEVEL":"warn"}"#,
    );
    let loader = ConfigLoader::builder(DeploymentType::Fargate, "billing", billing_schema())
        .unsecret_keys(["LOG_LEVEL"])
        .build_with_store(store)
        .unwrap();

    let err = temp_env::async_with_vars(
        [("APP_ENV", Some("prod")), ("LOG_LEVEL", Some(""))],
        loader.load(),
    )
    .await
    .unwrap_err();

    // The empty overlay replaces "warn" and is then rejected as a value, not as absent.
    let message = err.to_string();
    assert!(message.contains("LOG_LEVEL: expected one of"), "{message}");
    assert!(!message.contains("missing"), "{message}");
}
