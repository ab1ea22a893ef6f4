//! Default configuration values
//!
//! Variable prefixes and listener defaults for the ping service. These are
//! the single source of truth shared by the loaders and the CLI.

/// Service name used in log and error messages
pub const SERVICE_NAME: &str = "ping";

/// Prefix shared by every listener, used as their alternate prefix
pub const ENV_PREFIX: &str = "MF_MFXKIT_";

/// Primary prefix for the HTTP listener
pub const ENV_PREFIX_HTTP: &str = "MF_MFXKIT_HTTP_";

/// Primary prefix for the gRPC listener
pub const ENV_PREFIX_GRPC: &str = "MF_MFXKIT_GRPC_";

/// HTTP port used when no variable sets one
pub const HTTP_PORT: &str = "9099";

/// gRPC port used when no variable sets one
pub const GRPC_PORT: &str = "9199";

/// Default log level
pub const LOG_LEVEL_STR: &str = "error";

/// Default shared secret
pub const SECRET_STR: &str = "secret";

/// Default Jaeger collector endpoint
pub const JAEGER_URL_STR: &str = "http://jaeger:14268/api/traces";

/// Default gRPC client call timeout
pub const GRPC_TIMEOUT_STR: &str = "1s";
