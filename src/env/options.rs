//! Resolution options
//!
//! One [`Options`] value drives a single resolution call: where values are
//! read from, which prefixes name them, and whether fields without a default
//! must be set.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::env::source::{EnvSource, ProcessEnv, RawValue};

/// Where raw values come from
#[derive(Clone, Default)]
pub enum Environment {
    /// The real process environment
    #[default]
    Process,
    /// A fixed, ordered map of variables
    Map(BTreeMap<String, String>),
    /// Any other provider
    Custom(Arc<dyn EnvSource + Send + Sync>),
}

impl Environment {
    /// Build a map environment from key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Environment::Map(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl EnvSource for Environment {
    fn get(&self, key: &str) -> RawValue {
        match self {
            Environment::Process => ProcessEnv.get(key),
            Environment::Map(vars) => Ok(BTreeMap::get(vars, key).cloned()),
            Environment::Custom(source) => source.get(key),
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Process => write!(f, "Process"),
            // values may be secrets
            Environment::Map(vars) => f.debug_tuple("Map").field(&vars.keys().collect::<Vec<_>>()).finish(),
            Environment::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl From<BTreeMap<String, String>> for Environment {
    fn from(vars: BTreeMap<String, String>) -> Self {
        Environment::Map(vars)
    }
}

/// Options for one resolution call
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Source of raw values
    pub environment: Environment,
    /// Primary prefix prepended to every tag
    pub prefix: String,
    /// Fallback prefix consulted when the primary name is unset
    pub alt_prefix: String,
    /// Fail on unset fields that declare no default
    pub required_if_no_def: bool,
}

impl Options {
    /// Default options: process environment, no prefixes, nothing required
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the alternate prefix
    pub fn with_alt_prefix(mut self, alt_prefix: impl Into<String>) -> Self {
        self.alt_prefix = alt_prefix.into();
        self
    }

    /// Replace the environment source
    pub fn with_environment(mut self, environment: impl Into<Environment>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Read from a fixed set of variables instead of the process environment
    pub fn with_vars<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.with_environment(Environment::from_pairs(pairs))
    }

    /// Require every field that has no default
    pub fn required_if_no_def(mut self, required: bool) -> Self {
        self.required_if_no_def = required;
        self
    }

    /// Pick the options that apply to a call
    ///
    /// The last supplied set wins in full; sets are never merged field by
    /// field. With nothing supplied the defaults apply.
    pub fn effective<I>(supplied: I) -> Self
    where
        I: IntoIterator<Item = Options>,
    {
        supplied.into_iter().last().unwrap_or_default()
    }
}
