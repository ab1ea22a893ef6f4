//! Value lookup and precedence
//!
//! Walks the precedence chain for one field: primary name, alternate name,
//! declared default. An empty string counts as unset at every step, so an
//! operator can blank a higher-priority variable to let a lower one through.

use std::ffi::OsString;
use std::fmt;

use log::trace;
use serde::Serialize;

use crate::env::names::CandidateNames;
use crate::env::source::EnvSource;

/// Which step of the chain produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    /// The primary-prefixed variable
    Primary,
    /// The alternate-prefixed variable
    Alternate,
    /// The field's declared default
    Default,
    /// Nothing; the field keeps its pre-call value
    Unset,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Primary => write!(f, "primary"),
            ValueSource::Alternate => write!(f, "alternate"),
            ValueSource::Default => write!(f, "default"),
            ValueSource::Unset => write!(f, "unset"),
        }
    }
}

/// A raw value and where it came from
///
/// `raw` is `None` both for [`ValueSource::Unset`] and for an empty
/// declared default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    /// The raw string, `None` when unset
    pub raw: Option<String>,
    /// Step that produced `raw`
    pub source: ValueSource,
    /// Variable that was read, if any
    pub variable: Option<String>,
}

impl Lookup {
    fn unset() -> Self {
        Self {
            raw: None,
            source: ValueSource::Unset,
            variable: None,
        }
    }
}

/// A variable that is set but whose value is not valid unicode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undecodable {
    /// Variable that was read
    pub variable: String,
    /// Its raw value
    pub raw: OsString,
}

/// Read `key`, treating an empty value as absent
pub fn get_set<S: EnvSource + ?Sized>(source: &S, key: &str) -> Result<Option<String>, Undecodable> {
    let value = match source.get(key) {
        Ok(value) => value.filter(|v| !v.is_empty()),
        Err(raw) => {
            trace!("Probed {}: not unicode", key);
            return Err(Undecodable {
                variable: key.to_string(),
                raw,
            });
        }
    };
    trace!("Probed {}: {}", key, if value.is_some() { "set" } else { "unset" });
    Ok(value)
}

/// Resolve the raw value for a field
///
/// The primary name wins whenever it is set. The alternate is only read
/// when the primary is unset, and the default only when both are. A set
/// value that is not valid unicode stops the chain.
pub fn lookup<S: EnvSource + ?Sized>(
    source: &S,
    names: &CandidateNames,
    default: Option<&str>,
) -> Result<Lookup, Undecodable> {
    if let Some(raw) = get_set(source, &names.primary)? {
        return Ok(Lookup {
            raw: Some(raw),
            source: ValueSource::Primary,
            variable: Some(names.primary.clone()),
        });
    }

    if let Some(alternate) = &names.alternate {
        if let Some(raw) = get_set(source, alternate)? {
            return Ok(Lookup {
                raw: Some(raw),
                source: ValueSource::Alternate,
                variable: Some(alternate.clone()),
            });
        }
    }

    Ok(match default {
        // an empty default satisfies the field without assigning it
        Some(default) => Lookup {
            raw: Some(default.to_string()).filter(|d| !d.is_empty()),
            source: ValueSource::Default,
            variable: None,
        },
        None => Lookup::unset(),
    })
}
