//! Centralized constants for configuration loading.

/// Environment variable naming the execution context (e.g. `local`, `prod`).
pub const DEFAULT_ENVIRONMENT_VAR: &str = "APP_ENV";

/// Environment name that switches the loader to plain environment reads.
pub const LOCAL_ENVIRONMENT: &str = "local";

/// Suffix appended to `<service>-<environment>/` to form the secret name.
pub const DEFAULT_SECRET_SUFFIX: &str = "doppler";

/// Setting this to `true` or `1` skips `.env` loading.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";
