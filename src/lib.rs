//! Envkit: typed configuration records from prefixed environment variables
//!
//! This library fills plain Rust structs from a flat, string-keyed
//! environment. Each field declares a variable name tag and optionally a
//! default; callers choose a primary prefix and a fallback alternate prefix
//! per call, so several instances of the same record shape (one per network
//! listener, for example) can share settings and still be overridden one
//! by one.
//!
//! # Main Features
//!
//! - Primary/alternate prefix precedence, with empty values treated as unset
//! - Coercion to strings, paths, booleans, integers of any width and durations
//! - Declared defaults and an opt-in required policy for the rest
//! - Injectable environment sources for testing
//!
//! # Example
//!
//! ```
//! use envkit::env::{self, Options};
//!
//! envkit::env_config! {
//!     #[derive(Debug, Default)]
//!     pub struct ServerConfig {
//!         pub host: String => "HOST",
//!         pub port: u16 => "PORT" default "8080",
//!     }
//! }
//!
//! let options = Options::new()
//!     .with_prefix("MF_HTTP_")
//!     .with_alt_prefix("MF_")
//!     .with_vars([("MF_HOST", "localhost"), ("MF_HTTP_PORT", "9099")]);
//!
//! let mut config = ServerConfig::default();
//! env::parse(&mut config, [options])?;
//!
//! assert_eq!(config.host, "localhost");
//! assert_eq!(config.port, 9099);
//! # Ok::<(), envkit::env::EnvError>(())
//! ```

// Public modules
pub mod common;
pub mod config;
pub mod env;

// Re-export commonly used structures and functions for convenience
pub use common::{Error, Result};
pub use env::{new_config, parse, EnvConfig, EnvError, Options};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
