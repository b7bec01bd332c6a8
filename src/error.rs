use crate::Cardinality;

pub type Result<T> = std::result::Result<T, Error>;

/// An error raised while parsing or validating parsers.
///
/// There are two kinds of errors:
/// * _Input errors_, when a token was recognized by a parser but
/// could not be used, for example a value that fails to decode, or when
/// a parser matched more or fewer times than its cardinality allows.
/// * _Structural errors_, reported by `validate` before any input
/// is seen, for example a cardinality whose minimum exceeds its maximum.
///
/// Conversion failures raised by user code travel through `anyhow`
/// and end up in [`Error::InvalidValue`] or [`Error::Custom`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid value `{value}` for `{option}`: {source}")]
    InvalidValue {
        option: String,
        value: String,
        source: anyhow::Error,
    },
    #[error("expected a value after `{option}`")]
    MissingValue { option: String },
    #[error("`{option}` does not take a value, got `{value}`")]
    UnexpectedValue { option: String, value: String },
    #[error("expected {expected} after `{after}`")]
    Incomplete { after: String, expected: String },
    #[error("`{name}` given {count} times, expected {expected}")]
    Occurrences {
        name: String,
        count: usize,
        expected: Cardinality,
    },

    #[error("invalid cardinality {min}..{max} for `{name}`")]
    Cardinality {
        name: String,
        min: usize,
        max: usize,
    },
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
