use std::num::ParseIntError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RouterError>;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("invalid regex for rule {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule {name} declares {params} params but {types} types")]
    TypeMismatch {
        name: String,
        params: usize,
        types: usize,
    },

    #[error("rule {name} declares {params} params but its regex has {groups} capture groups")]
    MissingGroups {
        name: String,
        params: usize,
        groups: usize,
    },

    #[error("parameter {param} expects an integer, got {value:?}")]
    InvalidInteger {
        param: String,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl RouterError {
    /// Whether the error was caused by the query rather than the rule table.
    #[must_use]
    pub const fn is_query_error(&self) -> bool {
        matches!(self, Self::InvalidInteger { .. })
    }
}
