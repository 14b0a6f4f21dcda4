//! Two-stack precedence parser.
//!
//! The parser alternates between expecting an operand and expecting an
//! operator. Operators wait on a stack until an incoming operator of lower (or,
//! for left-associative ones, equal) precedence forces them to be reduced into
//! an [`Expr`] on the operand stack. Implication is right-associative:
//! `p → q → r` parses as `p → (q → r)`.
//!
//! Negation is never reduced from the stack: a pending `¬` is applied as soon
//! as its operand (a leaf or a closed parenthesized group) is complete.

use log::debug;

use crate::error::ParseError;
use crate::expr::{Expr, Variables};
use crate::lexer::{Token, TokenValue};
use crate::symbol::LogicalSymbol;

#[derive(Debug, Default)]
pub struct Parser {
    operators: Vec<Token>,
    operands: Vec<Expr>,
    expect_operand: bool,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the expression for `tokens`, together with its variable names.
    ///
    /// Parsing stops at the first [`LogicalSymbol::Eof`] token; a slice
    /// without one is treated as if it ended with it.
    pub fn parse(&mut self, tokens: &[Token]) -> Result<(Expr, Variables), ParseError> {
        self.reset();
        let result = self.run(tokens);
        self.reset();
        let expr = result?;
        let variables = expr.variables();
        Ok((expr, variables))
    }

    fn reset(&mut self) {
        self.operators.clear();
        self.operands.clear();
        self.expect_operand = true;
    }

    fn run(&mut self, tokens: &[Token]) -> Result<Expr, ParseError> {
        let eof = Token::eof();
        let tokens = tokens.iter().chain(std::iter::once(&eof));
        for token in tokens {
            let done = if self.expect_operand {
                self.on_operand(token)?;
                false
            } else {
                self.on_operator(token)?
            };
            if done {
                break;
            }
        }

        let sentinel = self.operators.pop();
        assert!(
            matches!(&sentinel, Some(token) if token.kind == LogicalSymbol::Eof),
            "parser finished without the end sentinel, got {:?}",
            sentinel
        );
        if let Some(top) = self.operators.last() {
            debug_assert_eq!(top.kind, LogicalSymbol::Open);
            return Err(ParseError::UnclosedParenthesis);
        }

        debug_assert_eq!(self.operands.len(), 1);
        self.operands.pop().ok_or(ParseError::Empty)
    }

    fn on_operand(&mut self, token: &Token) -> Result<(), ParseError> {
        match token.kind {
            LogicalSymbol::Constant | LogicalSymbol::Var => {
                let leaf = match &token.value {
                    TokenValue::Constant(value) => Expr::constant(*value),
                    TokenValue::Literal(name) => Expr::var(name.as_str()),
                    TokenValue::End => {
                        return Err(ParseError::ExpectedOperand {
                            found: token.to_string(),
                        })
                    }
                };
                self.push_operand(leaf);
                self.expect_operand = false;
            }
            LogicalSymbol::Open | LogicalSymbol::Not => {
                self.operators.push(token.clone());
            }
            LogicalSymbol::Eof => {
                return Err(match self.operators.last() {
                    None => ParseError::Empty,
                    Some(top) if top.kind == LogicalSymbol::Open => ParseError::UnclosedParenthesis,
                    Some(top) => ParseError::MissingOperand { after: top.to_string() },
                });
            }
            _ => {
                return Err(ParseError::ExpectedOperand {
                    found: token.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Handle a token in operator position. Returns `true` once the end
    /// sentinel has been pushed.
    fn on_operator(&mut self, token: &Token) -> Result<bool, ParseError> {
        match token.kind {
            kind if kind.is_binary_operator() || kind == LogicalSymbol::Eof => {
                self.reduce_for(token)?;
                self.operators.push(token.clone());
                self.expect_operand = true;
                Ok(kind == LogicalSymbol::Eof)
            }
            LogicalSymbol::Close => {
                self.close_group()?;
                Ok(false)
            }
            _ => Err(ParseError::ExpectedOperator {
                found: token.to_string(),
            }),
        }
    }

    /// Reduce every stacked operator that binds at least as tightly as `incoming`.
    fn reduce_for(&mut self, incoming: &Token) -> Result<(), ParseError> {
        let precedence = incoming.precedence();
        let right_assoc = incoming.kind == LogicalSymbol::Implies;
        while let Some(top) = self.operators.last() {
            if top.kind == LogicalSymbol::Open {
                break;
            }
            let reduce = if right_assoc {
                top.precedence() > precedence
            } else {
                top.precedence() >= precedence
            };
            if !reduce {
                break;
            }
            if let Some(top) = self.operators.pop() {
                self.apply(&top)?;
            }
        }
        Ok(())
    }

    fn close_group(&mut self) -> Result<(), ParseError> {
        loop {
            let Some(top) = self.operators.pop() else {
                return Err(ParseError::UnmatchedClose);
            };
            match top.kind {
                LogicalSymbol::Open => break,
                LogicalSymbol::Not => {
                    return Err(ParseError::NothingToNegate {
                        negation: top.to_string(),
                    })
                }
                _ => self.apply(&top)?,
            }
        }
        let group = self.operands.pop().ok_or(ParseError::UnmatchedClose)?;
        self.push_operand(group);
        Ok(())
    }

    /// Push a completed operand, applying every negation waiting for it.
    fn push_operand(&mut self, mut expr: Expr) {
        while let Some(top) = self.operators.last() {
            if top.kind != LogicalSymbol::Not {
                break;
            }
            self.operators.pop();
            expr = Expr::not(expr);
        }
        self.operands.push(expr);
    }

    fn apply(&mut self, op: &Token) -> Result<(), ParseError> {
        let missing = || ParseError::MissingOperand { after: op.to_string() };
        let expr = if op.kind == LogicalSymbol::Not {
            Expr::not(self.operands.pop().ok_or_else(missing)?)
        } else {
            let rhs = self.operands.pop().ok_or_else(missing)?;
            let lhs = self.operands.pop().ok_or_else(missing)?;
            Expr::binary(op.kind, lhs, rhs).ok_or_else(|| ParseError::ExpectedOperator { found: op.to_string() })?
        };
        debug!("reduce {}: {}", op.kind, expr);
        self.operands.push(expr);
        Ok(())
    }
}

/// Whether every token belongs to the And/Or/Not subset.
pub fn is_canonical(tokens: &[Token]) -> bool {
    tokens.iter().all(|token| token.kind.is_canonical())
}
