//! Tokenizer for expression bodies.

use crate::error::{ExprError, Result};

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinOp {
    /// Operator precedence (higher binds tighter).
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div | BinOp::Rem => 2,
            BinOp::Pow => 4,
        }
    }

    /// Is this operator right-associative?
    pub fn is_right_assoc(self) -> bool {
        matches!(self, BinOp::Pow)
    }

    /// Source spelling of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Pow => "^",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TokenKind {
    Num(f64),
    Ident(String),
    Op(BinOp),
    LParen,
    RParen,
    Comma,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) offset: usize,
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match &self.kind {
            TokenKind::Num(n) => format!("number {n}"),
            TokenKind::Ident(name) => format!("identifier '{name}'"),
            TokenKind::Op(op) => format!("operator '{}'", op.symbol()),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::End => "end of expression".to_string(),
        }
    }
}

/// Tokenize an expression body. The result always ends with `End`.
///
/// Identifiers may contain dots so `Math.sin` lexes as one name.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        let kind = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let mut end = offset;
                let mut seen_exp = false;
                let mut prev = ch;
                while let Some(&(i, c)) = chars.peek() {
                    let exp_sign = (c == '+' || c == '-') && matches!(prev, 'e' | 'E');
                    let exp_mark = (c == 'e' || c == 'E') && !seen_exp;
                    if c.is_ascii_digit() || c == '.' || exp_sign || exp_mark {
                        seen_exp |= exp_mark;
                        prev = c;
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let text = &input[offset..end];
                let value = text.parse::<f64>().map_err(|_| ExprError::InvalidNumber {
                    text: text.to_string(),
                    offset,
                })?;
                TokenKind::Num(value)
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut end = offset;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '.' {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                TokenKind::Ident(input[offset..end].to_string())
            }
            '*' => {
                chars.next();
                if matches!(chars.peek(), Some(&(_, '*'))) {
                    chars.next();
                    tokens.push(Token {
                        kind: TokenKind::Op(BinOp::Pow),
                        offset,
                    });
                    continue;
                }
                tokens.push(Token {
                    kind: TokenKind::Op(BinOp::Mul),
                    offset,
                });
                continue;
            }
            _ => {
                chars.next();
                match ch {
                    '+' => TokenKind::Op(BinOp::Add),
                    '-' => TokenKind::Op(BinOp::Sub),
                    '/' => TokenKind::Op(BinOp::Div),
                    '%' => TokenKind::Op(BinOp::Rem),
                    '^' => TokenKind::Op(BinOp::Pow),
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    ',' => TokenKind::Comma,
                    _ => return Err(ExprError::UnexpectedChar { ch, offset }),
                }
            }
        };
        tokens.push(Token { kind, offset });
    }

    tokens.push(Token {
        kind: TokenKind::End,
        offset: input.len(),
    });
    Ok(tokens)
}
