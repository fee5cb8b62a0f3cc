//! Recursive-descent parser for expression bodies.
//!
//! Uses precedence climbing. From loosest to tightest:
//! - `+`, `-`
//! - `*`, `/`, `%`
//! - unary `-`, `+`
//! - `^`, `**` (right associative)
//! - function calls and parentheses

use crate::error::{ExprError, Result};

use super::ast::{Ast, Func};
use super::lexer::{BinOp, Token, TokenKind, tokenize};

const UNARY_PRECEDENCE: u8 = 3;

/// Deepest allowed nesting, bounding both parser recursion and tree height.
pub(crate) const MAX_DEPTH: usize = 256;

/// Compile `input` into an [`Ast`] with `var` as the free variable.
pub(crate) fn parse(input: &str, var: &str) -> Result<Ast> {
    let tokens = tokenize(input)?;
    if matches!(tokens.first().map(|t| &t.kind), Some(TokenKind::End)) {
        return Err(ExprError::Empty);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        var,
        depth: 0,
    };
    let parsed = parser.parse_expr(0)?;
    let trailing = parser.peek();
    if trailing.kind != TokenKind::End {
        return Err(ExprError::UnexpectedToken {
            found: trailing.describe(),
            offset: trailing.offset,
        });
    }
    Ok(parsed.ast)
}

// A subtree and its height.
struct Parsed {
    ast: Ast,
    height: usize,
}

impl Parsed {
    fn leaf(ast: Ast) -> Self {
        Self { ast, height: 1 }
    }

    fn node(ast: Ast, child_height: usize, offset: usize) -> Result<Self> {
        let height = child_height + 1;
        if height > MAX_DEPTH {
            return Err(ExprError::TooDeep { offset });
        }
        Ok(Self { ast, height })
    }
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    var: &'a str,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> &Token {
        // The token stream always ends with `End`.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self) -> ExprError {
        let token = self.peek();
        if token.kind == TokenKind::End {
            return ExprError::UnexpectedEnd;
        }
        ExprError::UnexpectedToken {
            found: token.describe(),
            offset: token.offset,
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<()> {
        if self.peek().kind != kind {
            return Err(self.unexpected());
        }
        self.advance();
        Ok(())
    }

    fn parse_expr(&mut self, min_prec: u8) -> Result<Parsed> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::TooDeep {
                offset: self.peek().offset,
            });
        }
        self.depth += 1;
        let result = self.parse_binary(min_prec);
        self.depth -= 1;
        result
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Parsed> {
        let mut left = self.parse_prefix()?;

        while let TokenKind::Op(op) = self.peek().kind {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            let offset = self.advance().offset;
            let next_min_prec = if op.is_right_assoc() { prec } else { prec + 1 };
            let right = self.parse_expr(next_min_prec)?;
            let height = left.height.max(right.height);
            left = Parsed::node(Ast::binary(op, left.ast, right.ast), height, offset)?;
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Parsed> {
        match self.peek().kind {
            TokenKind::Op(BinOp::Sub) => {
                let offset = self.advance().offset;
                let operand = self.parse_expr(UNARY_PRECEDENCE)?;
                Parsed::node(Ast::Neg(Box::new(operand.ast)), operand.height, offset)
            }
            TokenKind::Op(BinOp::Add) => {
                self.advance();
                self.parse_expr(UNARY_PRECEDENCE)
            }
            _ => self.parse_atom(),
        }
    }

    fn parse_atom(&mut self) -> Result<Parsed> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Num(n) => {
                self.advance();
                Ok(Parsed::leaf(Ast::Num(n)))
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.peek().kind == TokenKind::LParen {
                    return self.parse_call(&name, token.offset);
                }
                self.resolve_ident(name, token.offset).map(Parsed::leaf)
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr(0)?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_call(&mut self, name: &str, offset: usize) -> Result<Parsed> {
        let func = Func::lookup(name).ok_or_else(|| ExprError::UnknownFunction {
            name: name.to_string(),
            offset,
        })?;
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        let mut height = 0;
        if self.peek().kind != TokenKind::RParen {
            loop {
                let arg = self.parse_expr(0)?;
                height = height.max(arg.height);
                args.push(arg.ast);
                if self.peek().kind == TokenKind::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;

        if args.len() != func.arity() {
            return Err(ExprError::Arity {
                name: func.name(),
                expected: func.arity(),
                found: args.len(),
            });
        }
        Parsed::node(Ast::Call(func, args), height, offset)
    }

    fn resolve_ident(&self, name: String, offset: usize) -> Result<Ast> {
        if name == self.var {
            return Ok(Ast::Var);
        }
        let constant = match name.as_str() {
            "Math.PI" | "π" => Some(std::f64::consts::PI),
            "Math.E" => Some(std::f64::consts::E),
            _ => match name.to_ascii_lowercase().as_str() {
                "pi" => Some(std::f64::consts::PI),
                "tau" => Some(std::f64::consts::TAU),
                "e" => Some(std::f64::consts::E),
                _ => None,
            },
        };
        constant
            .map(Ast::Num)
            .ok_or(ExprError::UnknownIdentifier { name, offset })
    }
}
