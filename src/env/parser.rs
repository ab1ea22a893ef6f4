//! Resolution orchestration
//!
//! Walks a record's fields in declaration order and, for each one, resolves
//! its candidate names, looks the value up, applies the default/required
//! policy and coerces the raw string into the field. The first failure
//! aborts the walk. Fields written before it stay written.

use log::debug;
use serde::Serialize;

use crate::env::coerce::CoerceError;
use crate::env::error::{EnvError, Result};
use crate::env::field::{EnvConfig, Field};
use crate::env::lookup::{lookup, ValueSource};
use crate::env::names::CandidateNames;
use crate::env::options::Options;

/// Outcome for one resolved field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    /// Primary candidate name
    pub name: String,
    /// Step that satisfied the field
    pub source: ValueSource,
    /// Variable actually read, if any
    pub variable: Option<String>,
}

/// Per-field outcome of a successful resolution, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    /// One entry per field
    pub fields: Vec<FieldReport>,
}

impl Report {
    /// Entry for the field with the given primary name
    pub fn get(&self, name: &str) -> Option<&FieldReport> {
        self.fields.iter().find(|f| f.name == name)
    }
}

fn resolve_field<T>(target: &mut T, field: &Field<T>, options: &Options) -> Result<FieldReport> {
    let names = CandidateNames::resolve(field.name(), options);
    let found = lookup(&options.environment, &names, field.default()).map_err(|bad| EnvError::Conversion {
        name: names.primary.clone(),
        raw: bad.raw.to_string_lossy().into_owned(),
        kind: field.kind(),
        source: CoerceError::NotUnicode(bad.variable),
    })?;

    if found.source == ValueSource::Unset && options.required_if_no_def {
        return Err(EnvError::RequiredFieldMissing(names.primary));
    }

    if let Some(raw) = &found.raw {
        let kind = field.kind();
        if !kind.is_supported() {
            return Err(EnvError::UnsupportedFieldKind {
                name: names.primary,
                kind,
            });
        }

        field.assign(target, raw).map_err(|source| EnvError::Conversion {
            name: names.primary.clone(),
            raw: raw.clone(),
            kind,
            source,
        })?;
    }

    match &found.variable {
        Some(variable) => debug!("Resolved {} from {} ({})", names.primary, found.source, variable),
        None => debug!("Resolved {} from {}", names.primary, found.source),
    }

    Ok(FieldReport {
        name: names.primary,
        source: found.source,
        variable: found.variable,
    })
}

/// Resolve every field of `target` using exactly one set of options
pub fn parse_report<T: EnvConfig>(target: &mut T, options: &Options) -> Result<Report> {
    let fields = T::fields();
    debug!(
        "Resolving {} fields (prefix: {:?}, alt prefix: {:?})",
        fields.len(),
        options.prefix,
        options.alt_prefix
    );

    let mut report = Report::default();
    for field in &fields {
        report.fields.push(resolve_field(target, field, options)?);
    }

    Ok(report)
}

/// Populate `target` from the environment
///
/// With no options supplied the defaults apply: process environment, no
/// prefixes, nothing required. When several are supplied only the last one
/// is used.
pub fn parse<T, I>(target: &mut T, options: I) -> Result<()>
where
    T: EnvConfig,
    I: IntoIterator<Item = Options>,
{
    let options = Options::effective(options);
    parse_report(target, &options).map(|_| ())
}

/// Allocate a default `T` and populate it
///
/// Fails exactly where [`parse`] fails. On failure only the error is
/// returned and the partially populated value is dropped; call [`parse`]
/// on a value you own to inspect the fields written before the failure.
pub fn new_config<T, I>(options: I) -> Result<T>
where
    T: EnvConfig + Default,
    I: IntoIterator<Item = Options>,
{
    let mut config = T::default();
    parse(&mut config, options)?;
    Ok(config)
}
