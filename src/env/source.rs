//! Environment sources
//!
//! The resolver never reads the process environment directly. It goes
//! through an [`EnvSource`], which lets callers hand in a fixed map or their
//! own provider. [`ProcessEnv`] is the default.

use std::collections::{BTreeMap, HashMap};
use std::env::{self, VarError};
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde_json::Value;

use crate::common::{Error, Result};

/// Outcome of reading one key from an [`EnvSource`]
///
/// `Ok(None)` means the key is absent. `Err` carries the raw bytes of a key
/// that is set but whose value is not valid unicode.
pub type RawValue = std::result::Result<Option<String>, OsString>;

/// Read-only key/value provider for environment lookups
#[cfg_attr(test, mockall::automock)]
pub trait EnvSource {
    /// Raw value for `key`
    fn get(&self, key: &str) -> RawValue;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> RawValue {
        match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(raw)) => Err(raw),
        }
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> RawValue {
        Ok(BTreeMap::get(self, key).cloned())
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> RawValue {
        Ok(HashMap::get(self, key).cloned())
    }
}

/// Load a flat environment map from a JSON file
///
/// The file must hold a single object. String values are taken as is,
/// numbers and booleans are converted to their literal text, and `null`
/// becomes the empty string (which the resolver treats as unset). Nested
/// arrays or objects are rejected.
pub fn load_env_file<P: AsRef<Path>>(path: P) -> Result<BTreeMap<String, String>> {
    let path = path.as_ref();
    let path_display = path.display();

    debug!("Loading environment file: {}", path_display);

    let content = fs::read_to_string(path).map_err(|e| {
        warn!("Failed to read environment file {}: {}", path_display, e);
        Error::EnvFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    let parsed: BTreeMap<String, Value> = serde_json::from_str(&content).map_err(|e| Error::EnvFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut vars = BTreeMap::new();
    for (key, value) in parsed {
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            Value::Array(_) | Value::Object(_) => {
                return Err(Error::EnvFile {
                    path: path.to_path_buf(),
                    message: format!("value for \"{}\" must be a string, number, boolean or null", key),
                });
            }
        };
        vars.insert(key, text);
    }

    debug!("Loaded {} variables from {}", vars.len(), path_display);
    Ok(vars)
}
