//! Environment resolution
//!
//! This module populates typed configuration records from a flat,
//! string-keyed environment. Every field has a variable name tag; the
//! variable actually read is built from that tag and two prefixes:
//!
//! 1. `prefix + tag` (primary) wins whenever it is set
//! 2. `alt_prefix + tag` (alternate) is the fallback, when `alt_prefix` is non-empty
//! 3. the field's declared default comes next
//! 4. otherwise the field keeps its value, or resolution fails when
//!    [`Options::required_if_no_def`](Options) is set
//!
//! An empty value counts as unset at every step. This lets several
//! instances of one record shape (one per listener, say) share common
//! settings through the alternate prefix while overriding others.

mod coerce;
mod error;
mod field;
mod lookup;
mod macros;
mod names;
mod options;
mod parser;
pub mod source;

pub use self::coerce::{parse_duration, CoerceError, EnvValue, FieldKind};
pub use self::error::{EnvError, Result};
pub use self::field::{Assign, EnvConfig, Field};
pub use self::lookup::ValueSource;
pub use self::names::CandidateNames;
pub use self::options::{Environment, Options};
pub use self::parser::{new_config, parse, parse_report, FieldReport, Report};
pub use self::source::{load_env_file, EnvSource, ProcessEnv, RawValue};
