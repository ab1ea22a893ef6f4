//! Configuration loading
//!
//! Resolves the service records from an [`Environment`] with the prefixes
//! each one uses, wrapping failures with the record they belong to.

use std::fmt;

use log::info;

use crate::common::{Error, Result};
use crate::config::defaults::{ENV_PREFIX, ENV_PREFIX_GRPC, ENV_PREFIX_HTTP, GRPC_PORT, HTTP_PORT, SERVICE_NAME};
use crate::config::{GrpcClientConfig, ServerConfig, ServiceConfig};
use crate::env::{self, Environment, Options};

/// A network listener with its own [`ServerConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listener {
    /// The HTTP API
    Http,
    /// The gRPC API
    Grpc,
}

impl Listener {
    /// Primary prefix for this listener's variables
    pub fn prefix(&self) -> &'static str {
        match self {
            Listener::Http => ENV_PREFIX_HTTP,
            Listener::Grpc => ENV_PREFIX_GRPC,
        }
    }

    /// Port used when neither prefix sets one
    pub fn default_port(&self) -> &'static str {
        match self {
            Listener::Http => HTTP_PORT,
            Listener::Grpc => GRPC_PORT,
        }
    }
}

impl fmt::Display for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Http => write!(f, "HTTP"),
            Listener::Grpc => write!(f, "gRPC"),
        }
    }
}

/// Load the service-wide settings
///
/// Variable names are absolute; no prefix is applied.
pub fn load_service_config(environment: &Environment) -> Result<ServiceConfig> {
    let options = Options::new().with_environment(environment.clone());

    let mut config = ServiceConfig::default();
    env::parse(&mut config, [options])
        .map_err(|e| Error::config(format!("failed to load {} configuration", SERVICE_NAME), e))?;

    Ok(config)
}

/// Load one listener's settings
///
/// The listener prefix is primary and the shared [`ENV_PREFIX`] is the
/// alternate, so `MF_MFXKIT_HOST` applies to every listener unless a
/// listener-specific variable overrides it.
pub fn load_server_config(listener: Listener, environment: &Environment) -> Result<ServerConfig> {
    let options = Options::new()
        .with_environment(environment.clone())
        .with_prefix(listener.prefix())
        .with_alt_prefix(ENV_PREFIX);

    let mut config = ServerConfig::with_port(listener.default_port());
    env::parse(&mut config, [options]).map_err(|e| {
        Error::config(
            format!("failed to load {} {} server configuration", SERVICE_NAME, listener),
            e,
        )
    })?;

    Ok(config)
}

/// Load gRPC client settings under the given prefixes
pub fn load_grpc_client_config(prefix: &str, alt_prefix: &str, environment: &Environment) -> Result<GrpcClientConfig> {
    let options = Options::new()
        .with_environment(environment.clone())
        .with_prefix(prefix)
        .with_alt_prefix(alt_prefix);

    env::new_config(Some(options)).map_err(|e| Error::config("failed to load gRPC client configuration", e))
}

/// Log the resolved service configuration
pub fn log_config(service: &ServiceConfig, http: &ServerConfig, grpc: &ServerConfig) {
    // Only log in info level or below
    if !log::log_enabled!(log::Level::Info) {
        return;
    }

    info!("=== {} configuration ===", SERVICE_NAME);
    info!("  Log level: {}", service.log_level);
    info!("  Secret: {}", if service.secret.is_empty() { "<empty>" } else { "********" });
    info!("  Jaeger URL: {}", service.jaeger_url);
    info!("  Send telemetry: {}", service.send_telemetry);

    for (listener, config) in [(Listener::Http, http), (Listener::Grpc, grpc)] {
        info!(
            "  {} server: {} ({})",
            listener,
            config.address(),
            if config.has_tls() { "TLS" } else { "plain" }
        );
    }
    info!("=========================");
}
