//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable where
//! allowed and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use thiserror::Error;

/// Returned when expression text cannot be turned into an expression tree.
///
/// Positions are byte offsets into the source string.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// A character with no meaning in expression syntax.
    #[error("unexpected character '{ch}' at byte {at}")]
    UnexpectedChar { ch: char, at: usize },

    /// A number literal `f64` refused to accept.
    #[error("malformed number literal at byte {at}")]
    MalformedNumber { at: usize },

    /// An identifier that is neither the variable, a known constant, nor a
    /// known function.
    #[error("unknown identifier '{0}'")]
    UnknownIdent(String),

    /// A token that cannot start or continue the construct being parsed.
    #[error("expected {expected} at byte {at}")]
    Expected { expected: &'static str, at: usize },

    /// Input ended mid-construct.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A complete expression was parsed but input remained.
    #[error("trailing input at byte {at}")]
    Trailing { at: usize },
}

/// Returned when no closed-form derivative exists for a subexpression.
///
/// Carries the name of the offending function. Finite-difference evaluation
/// remains available for such expressions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no closed-form derivative for '{0}'")]
pub struct DiffError(pub &'static str);

/// Returned from basis-set construction and matrix-element evaluation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BasisError {
    /// A basis requires at least one trial function.
    #[error("a basis requires at least one function")]
    EmptyBasis,

    /// A member's domain disagrees with the domain shared by the set.
    #[error(
        "basis function {index} spans [{found_lower}, {found_upper}] \
         but the set spans [{lower}, {upper}]"
    )]
    DomainMismatch {
        index: usize,
        lower: f64,
        upper: f64,
        found_lower: f64,
        found_upper: f64,
    },

    /// An index outside `[0, len)`.
    #[error("basis index {index} out of range for a set of {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// ∫ψ² over the requested domain was zero, negative, or non-finite, so
    /// no normalization constant exists.
    #[error("cannot normalize: ∫ψ² = {0} over the requested domain")]
    DegenerateNorm(f64),

    /// [`DiffError`]
    #[error("derivative error: {0}")]
    Diff(#[from] DiffError),

    /// [`ParseError`]
    #[error("expression error: {0}")]
    Parse(#[from] ParseError),
}

impl BasisError {
    pub(crate) fn check_index(index: usize, len: usize) -> Result<(), Self> {
        (index < len)
            .then_some(())
            .ok_or(Self::IndexOutOfBounds { index, len })
    }
}

/// Returned when a job file cannot be read or understood.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// [`std::io::Error`]
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// [`serde_yaml::Error`]
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
