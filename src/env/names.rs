//! Variable name resolution
//!
//! Builds the candidate environment variable names for a field tag.

use crate::env::options::Options;

/// Candidate variable names for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateNames {
    /// `prefix + tag`, or the bare tag when the prefix is empty
    pub primary: String,
    /// `alt_prefix + tag`, only when the alternate prefix is non-empty
    pub alternate: Option<String>,
}

impl CandidateNames {
    /// Compute the candidates for `tag` under the given options
    pub fn resolve(tag: &str, options: &Options) -> Self {
        let primary = format!("{}{}", options.prefix, tag);
        let alternate = if options.alt_prefix.is_empty() {
            None
        } else {
            Some(format!("{}{}", options.alt_prefix, tag))
        };

        Self { primary, alternate }
    }
}
