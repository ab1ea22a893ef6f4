//! Service configuration
//!
//! The record shapes the ping service bootstraps from its environment: the
//! service settings, one [`ServerConfig`] per listener, and the gRPC client
//! settings. Each is an ordinary [`env_config!`](crate::env_config) record;
//! [`loader`] resolves them with the right prefixes.

mod defaults;
pub mod loader;

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

pub use self::defaults::*;
pub use self::loader::{
    load_grpc_client_config, load_server_config, load_service_config, log_config, Listener,
};

crate::env_config! {
    /// Service-wide settings
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct ServiceConfig {
        /// Log level (error, warn, info, debug, trace)
        pub log_level: String => "MF_MFXKIT_LOG_LEVEL" default "error",
        /// Shared secret checked by ping requests
        #[serde(skip_serializing)]
        pub secret: String => "MF_MFXKIT_SECRET" default "secret",
        /// Jaeger collector endpoint
        pub jaeger_url: String => "MF_JAEGER_URL" default "http://jaeger:14268/api/traces",
        /// Report usage telemetry
        pub send_telemetry: bool => "MF_SEND_TELEMETRY" default "true",
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: LOG_LEVEL_STR.to_string(),
            secret: SECRET_STR.to_string(),
            jaeger_url: JAEGER_URL_STR.to_string(),
            send_telemetry: true,
        }
    }
}

crate::env_config! {
    /// Listener settings, one instance per HTTP or gRPC server
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
    pub struct ServerConfig {
        /// Bind host
        pub host: String => "HOST",
        /// Bind port
        pub port: String => "PORT",
        /// TLS certificate; TLS is off when empty
        pub cert_file: PathBuf => "SERVER_CERT",
        /// TLS private key
        pub key_file: PathBuf => "SERVER_KEY",
    }
}

impl ServerConfig {
    /// Start from the given port, which survives when no variable sets one
    pub fn with_port(port: &str) -> Self {
        Self {
            port: port.to_string(),
            ..Self::default()
        }
    }

    /// `host:port` as the listener would bind it
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether both certificate and key are configured
    pub fn has_tls(&self) -> bool {
        !self.cert_file.as_os_str().is_empty() && !self.key_file.as_os_str().is_empty()
    }
}

crate::env_config! {
    /// gRPC client settings
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
    pub struct GrpcClientConfig {
        /// Dial with TLS
        pub client_tls: bool => "CLIENT_TLS" default "false",
        /// CA bundle used to verify the server
        pub ca_certs: String => "CA_CERTS" default "",
        /// Server URL
        pub url: String => "URL" default "",
        /// Per-call timeout
        #[serde(with = "duration_str")]
        pub timeout: Duration => "TIMEOUT" default "1s",
    }
}

impl GrpcClientConfig {
    /// TLS is used only when requested and a CA bundle is given
    pub fn is_secure(&self) -> bool {
        self.client_tls && !self.ca_certs.is_empty()
    }

    /// Human-readable TLS state
    pub fn security_label(&self) -> &'static str {
        if self.is_secure() {
            "with TLS"
        } else {
            "without TLS"
        }
    }
}

mod duration_str {
    use std::time::Duration;

    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:?}", value))
    }
}
