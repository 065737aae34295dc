//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test local mode, the direct and extension strategies, and the non-secret overlay.
//! - Test the load-once cache, including concurrent first loads and retry after failure.
//! - Test `.env` loading and its error hygiene.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Environment changes go through `temp_env` so they are undone after each test.


use crate::schema::{FieldKind, Schema};

pub const SERVICE: &str = "billing";
pub const SECRET_NAME: &str = "billing-prod/doppler";

/// Schema with one secret-sourced key and one non-secret key.
pub fn billing_schema() -> Schema {
    Schema::builder()
        .required("DB_URL", FieldKind::String)
        .required("LOG_LEVEL", FieldKind::String)
        .build()
        .expect("valid schema")
}
