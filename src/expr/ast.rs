//! Compiled expression trees and their evaluation.

use super::lexer::BinOp;

/// Built-in functions callable from expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Sqrt,
    Cbrt,
    Exp,
    Ln,
    Log10,
    Log2,
    Abs,
    Floor,
    Ceil,
    Round,
    Trunc,
    Sign,
    Atan2,
    Pow,
    Min,
    Max,
    Hypot,
}

impl Func {
    /// Look up a function by name. An optional `Math.` prefix is accepted.
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.strip_prefix("Math.").unwrap_or(name);
        let func = match name.to_ascii_lowercase().as_str() {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "asinh" => Self::Asinh,
            "acosh" => Self::Acosh,
            "atanh" => Self::Atanh,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "exp" => Self::Exp,
            // `log` is natural, matching Math.log.
            "ln" | "log" => Self::Ln,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "abs" => Self::Abs,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "round" => Self::Round,
            "trunc" => Self::Trunc,
            "sign" => Self::Sign,
            "atan2" => Self::Atan2,
            "pow" => Self::Pow,
            "min" => Self::Min,
            "max" => Self::Max,
            "hypot" => Self::Hypot,
            _ => return None,
        };
        Some(func)
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Asinh => "asinh",
            Self::Acosh => "acosh",
            Self::Atanh => "atanh",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Exp => "exp",
            Self::Ln => "ln",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::Abs => "abs",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Trunc => "trunc",
            Self::Sign => "sign",
            Self::Atan2 => "atan2",
            Self::Pow => "pow",
            Self::Min => "min",
            Self::Max => "max",
            Self::Hypot => "hypot",
        }
    }

    /// Number of arguments the function takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Atan2 | Self::Pow | Self::Min | Self::Max | Self::Hypot => 2,
            _ => 1,
        }
    }

    fn apply(self, args: &[f64; 2]) -> f64 {
        let [a, b] = *args;
        match self {
            Self::Sin => a.sin(),
            Self::Cos => a.cos(),
            Self::Tan => a.tan(),
            Self::Asin => a.asin(),
            Self::Acos => a.acos(),
            Self::Atan => a.atan(),
            Self::Sinh => a.sinh(),
            Self::Cosh => a.cosh(),
            Self::Tanh => a.tanh(),
            Self::Asinh => a.asinh(),
            Self::Acosh => a.acosh(),
            Self::Atanh => a.atanh(),
            Self::Sqrt => a.sqrt(),
            Self::Cbrt => a.cbrt(),
            Self::Exp => a.exp(),
            Self::Ln => a.ln(),
            Self::Log10 => a.log10(),
            Self::Log2 => a.log2(),
            Self::Abs => a.abs(),
            Self::Floor => a.floor(),
            Self::Ceil => a.ceil(),
            Self::Round => a.round(),
            Self::Trunc => a.trunc(),
            Self::Sign => {
                if a == 0.0 || a.is_nan() {
                    a
                } else {
                    a.signum()
                }
            }
            Self::Atan2 => a.atan2(b),
            Self::Pow => a.powf(b),
            Self::Min => a.min(b),
            Self::Max => a.max(b),
            Self::Hypot => a.hypot(b),
        }
    }
}

/// A compiled expression node.
///
/// The single free variable is referenced by [`Ast::Var`]; its name is fixed
/// at compile time.
#[derive(Clone, Debug, PartialEq)]
pub enum Ast {
    Num(f64),
    Var,
    Neg(Box<Ast>),
    Binary(BinOp, Box<Ast>, Box<Ast>),
    Call(Func, Vec<Ast>),
}

impl Ast {
    pub(crate) fn binary(op: BinOp, left: Ast, right: Ast) -> Self {
        Ast::Binary(op, Box::new(left), Box::new(right))
    }

    /// Evaluate with the variable bound to `value`.
    ///
    /// IEEE semantics apply throughout; callers decide what to do with
    /// non-finite results.
    pub fn eval(&self, value: f64) -> f64 {
        match self {
            Ast::Num(n) => *n,
            Ast::Var => value,
            Ast::Neg(operand) => -operand.eval(value),
            Ast::Binary(op, left, right) => {
                let l = left.eval(value);
                let r = right.eval(value);
                match op {
                    BinOp::Add => l + r,
                    BinOp::Sub => l - r,
                    BinOp::Mul => l * r,
                    BinOp::Div => l / r,
                    BinOp::Rem => l % r,
                    BinOp::Pow => l.powf(r),
                }
            }
            Ast::Call(func, args) => {
                let mut values = [0.0; 2];
                for (slot, arg) in values.iter_mut().zip(args) {
                    *slot = arg.eval(value);
                }
                func.apply(&values)
            }
        }
    }
}
