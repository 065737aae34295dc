//! Well-known names and ports for the secret backends.

// =============================================================================
// Lambda extension
// =============================================================================

/// Default port of the AWS Parameters and Secrets Lambda extension.
pub const EXTENSION_HTTP_PORT: u16 = 2773;

/// Environment variable the extension reads to pick a non-default port.
pub const EXTENSION_PORT_VAR: &str = "PARAMETERS_SECRETS_EXTENSION_HTTP_PORT";

/// Path of the extension's Secrets Manager proxy.
pub const EXTENSION_SECRETS_PATH: &str = "/secretsmanager/get";

/// Query parameter carrying the secret name.
pub const EXTENSION_SECRET_ID_PARAM: &str = "secretId";

/// Header the extension uses to authorize callers.
pub const EXTENSION_TOKEN_HEADER: &str = "X-Aws-Parameters-Secrets-Token";

/// Environment variable holding the Lambda session token.
pub const SESSION_TOKEN_VAR: &str = "AWS_SESSION_TOKEN";
