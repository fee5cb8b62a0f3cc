//! Expression text, its two lexical forms, and the evaluator capability.
//!
//! Expressions are either Cartesian (`y = f(x)`, the default) or polar
//! (`r = f(t)`, with `t` the angle in radians). Evaluation is isolated behind
//! the [`Evaluator`] trait; [`Interpreter`] is the built-in implementation.

mod ast;
mod lexer;
mod parser;

pub use ast::{Ast, Func};
pub use lexer::BinOp;

use crate::error::{ExprError, Result};

/// Which lexical form an expression takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionKind {
    /// `y = f(x)`.
    Cartesian,
    /// `r = f(t)`.
    Polar,
}

impl ExpressionKind {
    /// Name of the independent variable for this form.
    pub fn variable(self) -> &'static str {
        match self {
            Self::Cartesian => "x",
            Self::Polar => "t",
        }
    }
}

/// Expression text split into its form and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    source: String,
    kind: ExpressionKind,
    body: String,
}

impl Expression {
    /// Classify expression text. Returns `None` for empty or blank text.
    ///
    /// Text containing `r`, optional whitespace and `=` is polar; the body is
    /// everything after the `=` and any following whitespace, up to the end
    /// of that line. Anything else is a Cartesian body.
    pub fn parse(text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        let (kind, body) = match polar_body(text) {
            Some(body) => (ExpressionKind::Polar, body.to_string()),
            None => (ExpressionKind::Cartesian, text.to_string()),
        };
        Some(Self {
            source: text.to_string(),
            kind,
            body,
        })
    }

    /// The original text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The lexical form.
    pub fn kind(&self) -> ExpressionKind {
        self.kind
    }

    /// The function body, without any `r =` prefix.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Name of the independent variable.
    pub fn variable(&self) -> &'static str {
        self.kind.variable()
    }

    /// Check whether the expression is polar.
    pub fn is_polar(&self) -> bool {
        self.kind == ExpressionKind::Polar
    }
}

fn polar_body(text: &str) -> Option<&str> {
    for (index, _) in text.match_indices('r') {
        let rest = &text[index + 1..];
        let after_ws = rest.trim_start_matches(char::is_whitespace);
        let Some(after_eq) = after_ws.strip_prefix('=') else {
            continue;
        };
        let body = after_eq.trim_start_matches(char::is_whitespace);
        let end = body
            .find(['\n', '\r', '\u{2028}', '\u{2029}'])
            .unwrap_or(body.len());
        return Some(&body[..end]);
    }
    None
}

/// Evaluates expression bodies for a single bound variable.
///
/// Implementations are treated as untrusted: callers must be ready for any
/// evaluation to fail.
pub trait Evaluator {
    /// Reusable compiled form of a body.
    type Compiled;

    /// Compile `body` with `var` as the free variable.
    fn compile(&self, body: &str, var: &str) -> Result<Self::Compiled>;

    /// Evaluate a compiled body with the variable bound to `value`.
    fn evaluate(&self, compiled: &Self::Compiled, value: f64) -> Result<f64>;

    /// Compile and evaluate in one step.
    fn evaluate_text(&self, text: &str, var: &str, value: f64) -> Result<f64> {
        let compiled = self.compile(text, var)?;
        self.evaluate(&compiled, value)
    }
}

/// Built-in evaluator: arithmetic, powers and the common math functions.
///
/// Non-finite results are reported as [`ExprError::NonFinite`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpreter;

impl Interpreter {
    /// Create the built-in evaluator.
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for Interpreter {
    type Compiled = Ast;

    fn compile(&self, body: &str, var: &str) -> Result<Ast> {
        parser::parse(body, var)
    }

    fn evaluate(&self, compiled: &Ast, value: f64) -> Result<f64> {
        let result = compiled.eval(value);
        if result.is_finite() {
            Ok(result)
        } else {
            Err(ExprError::NonFinite { value: result })
        }
    }
}
