//! Testing utilities for secret retrieval.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use stowage_client::testing::{InMemorySecretStore, load_fixture};
//!
//! let store = InMemorySecretStore::new()
//!     .with_secret("billing-prod/doppler", r#"{"DB_URL":"postgres://x"}"#);
//! let body = load_fixture("extension/get_secret.json");
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{ClientError, Result};
use crate::store::SecretStore;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// A [`SecretStore`] backed by an in-memory map.
///
/// Clones share the call counter and request log, so a clone handed to a
/// loader can still be inspected by the test that created it.
#[derive(Debug, Clone, Default)]
pub struct InMemorySecretStore {
    secrets: HashMap<String, Option<String>>,
    calls: Arc<AtomicUsize>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a secret with a string payload.
    pub fn with_secret(mut self, secret_id: &str, payload: &str) -> Self {
        self.secrets
            .insert(secret_id.to_string(), Some(payload.to_string()));
        self
    }

    /// Register a secret that only has a binary payload.
    pub fn with_binary_secret(mut self, secret_id: &str) -> Self {
        self.secrets.insert(secret_id.to_string(), None);
        self
    }

    /// Number of `get_secret_string` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Secret ids requested so far, in order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().expect("request log poisoned").clone()
    }
}

impl SecretStore for InMemorySecretStore {
    async fn get_secret_string(&self, secret_id: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .expect("request log poisoned")
            .push(secret_id.to_string());

        // Yield so concurrent callers interleave like a real network call.
        tokio::task::yield_now().await;

        self.secrets.get(secret_id).cloned().ok_or_else(|| {
            ClientError::SecretsManager(format!(
                "ResourceNotFoundException: Secrets Manager can't find the specified secret {secret_id}"
            ))
        })
    }
}
