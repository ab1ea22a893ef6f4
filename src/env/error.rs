//! Resolver errors
//!
//! This module defines the errors returned by [`parse`](crate::env::parse).
//! Resolution stops at the first failing field, so a call yields at most one
//! of these.

use thiserror::Error;

use crate::env::coerce::{CoerceError, FieldKind};

/// Environment resolution error
#[derive(Error, Debug)]
pub enum EnvError {
    /// No value via primary, alternate or default, and the required policy demands one
    #[error("required environment variable \"{0}\" not set")]
    RequiredFieldMissing(String),

    /// A raw value was found but cannot be coerced to the field's kind
    #[error("failed to parse environment variable \"{name}\" value \"{raw}\" as {kind}: {source}")]
    Conversion {
        /// Primary candidate name of the field
        name: String,
        /// The offending raw string
        raw: String,
        /// Declared kind of the field
        kind: FieldKind,
        /// Underlying parse failure
        #[source]
        source: CoerceError,
    },

    /// The field's declared kind has no coercion rule
    #[error("environment variable \"{name}\" has unsupported kind {kind}")]
    UnsupportedFieldKind {
        /// Primary candidate name of the field
        name: String,
        /// Declared kind of the field
        kind: FieldKind,
    },
}

impl EnvError {
    /// Primary candidate name of the field that failed
    pub fn field_name(&self) -> &str {
        match self {
            EnvError::RequiredFieldMissing(name) => name,
            EnvError::Conversion { name, .. } => name,
            EnvError::UnsupportedFieldKind { name, .. } => name,
        }
    }
}

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, EnvError>;
