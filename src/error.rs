//! Error types for expression compilation and evaluation.

use thiserror::Error;

/// Errors produced while compiling or evaluating an expression.
///
/// Offsets are byte offsets into the expression body.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("unexpected {found} at offset {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unknown identifier '{name}' at offset {offset}")]
    UnknownIdentifier { name: String, offset: usize },

    #[error("unknown function '{name}' at offset {offset}")]
    UnknownFunction { name: String, offset: usize },

    #[error("function '{name}' takes {expected} argument(s), got {found}")]
    Arity {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("expression nested too deeply at offset {offset}")]
    TooDeep { offset: usize },

    #[error("expression evaluated to a non-finite value ({value})")]
    NonFinite { value: f64 },

    #[error("evaluator panicked: {0}")]
    Panicked(String),
}

pub type Result<T> = std::result::Result<T, ExprError>;
