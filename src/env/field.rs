//! Field descriptors
//!
//! A record takes part in resolution by listing its fields, in declaration
//! order, as [`Field`] descriptors. The [`env_config!`](crate::env_config)
//! macro builds that table from a struct definition; it can also be written
//! by hand.

use std::fmt;

use crate::env::coerce::{CoerceError, EnvValue, FieldKind};

/// Assigns a coerced raw string into one field of `T`
pub type Assign<T> = fn(&mut T, &str) -> Result<(), CoerceError>;

/// Descriptor for one field of a configuration record
pub struct Field<T> {
    name: &'static str,
    default: Option<&'static str>,
    kind: FieldKind,
    assign: Assign<T>,
}

impl<T> Field<T> {
    /// Describe a field with an explicit kind
    pub fn new(name: &'static str, kind: FieldKind, assign: Assign<T>) -> Self {
        Self {
            name,
            default: None,
            kind,
            assign,
        }
    }

    /// Describe a field whose value type is `V`
    pub fn of<V: EnvValue>(name: &'static str, assign: Assign<T>) -> Self {
        Self::new(name, V::KIND, assign)
    }

    /// Attach a default literal
    pub fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    /// Variable name tag, before any prefix
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Default literal, if declared
    pub fn default(&self) -> Option<&'static str> {
        self.default
    }

    /// Declared target kind
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Coerce `raw` and write it into `target`
    pub(crate) fn assign(&self, target: &mut T, raw: &str) -> Result<(), CoerceError> {
        (self.assign)(target, raw)
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("default", &self.default)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A record that can be populated from the environment
pub trait EnvConfig: Sized {
    /// Field descriptors in declaration order
    fn fields() -> Vec<Field<Self>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Limits {
        retries: u8,
    }

    #[test]
    fn test_field_assign() {
        let field = Field::<Limits>::of::<u8>("RETRIES", |cfg, raw| {
            cfg.retries = u8::from_env_str(raw)?;
            Ok(())
        })
        .with_default("3");

        assert_eq!(field.name(), "RETRIES");
        assert_eq!(field.default(), Some("3"));
        assert_eq!(field.kind(), FieldKind::Unsigned(8));

        let mut limits = Limits::default();
        field.assign(&mut limits, "7").unwrap();
        assert_eq!(limits.retries, 7);
        assert!(field.assign(&mut limits, "300").is_err());
        assert_eq!(limits.retries, 7);
    }
}
