//! Arithmetic expressions over integers with `+`, `*` and parentheses.
//!
//! Precedence comes from the layering of the rules: a sum is a list of
//! products, a product is a list of atoms. Each list becomes one n-ary node,
//! so `2 + 3 + 4` is a single `+` node with three operands.

use crate::lex::CharLexer;
use crate::parse;
use crate::parser::{Parser, exactly, seq3, token_of_kind};
use crate::token::{SimpleToken, TokenKind};

use derive_more::{Display, From};
use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Op {
    #[display("+")]
    Add,
    #[display("*")]
    Mul,
}

impl Op {
    const fn identity(self) -> i64 {
        match self {
            Op::Add => 0,
            Op::Mul => 1,
        }
    }

    fn apply(self, a: i64, b: i64) -> Option<i64> {
        match self {
            Op::Add => a.checked_add(b),
            Op::Mul => a.checked_mul(b),
        }
    }
}

#[derive(Clone, Debug, From, Eq, PartialEq)]
pub enum Expr {
    #[from]
    Number(i64),
    /// `op` applied left to right over two or more operands.
    Binary { op: Op, operands: Vec<Expr> },
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum EvalError {
    #[error("overflow while evaluating `{0}`")]
    Overflow(Expr),
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("`{0}` needs at least one operand")]
pub struct NoOperands(Op);

impl Expr {
    pub fn eval(&self) -> Result<i64, EvalError> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Binary { op, operands } => operands.iter().try_fold(op.identity(), |acc, e| {
                op.apply(acc, e.eval()?)
                    .ok_or_else(|| EvalError::Overflow(self.clone()))
            }),
        }
    }
}

/// Fully parenthesized, so the tree shape is visible.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Binary { op, operands } => {
                let operands: Vec<String> = operands.iter().map(ToString::to_string).collect();
                let separator = format!(" {op} ");
                write!(f, "({})", operands.join(separator.as_str()))
            }
        }
    }
}

// --- The grammar ---

pub fn number() -> Parser<Expr> {
    token_of_kind(TokenKind::Digit)
        .some()
        .map(|digits: Vec<SimpleToken>| digits.iter().map(|t| &*t.text).collect::<String>())
        .try_map(|text| text.parse::<i64>().map(Expr::Number))
        .with_name("Number")
}

/// `operand (op operand)*`, as one n-ary node when there is more than one
/// operand.
fn binary(operand: Parser<Expr>, op: Op) -> Parser<Expr> {
    operand
        .many_sep(exactly(op.to_string()))
        .try_map(move |mut operands| match operands.len() {
            0 => Err(NoOperands(op)),
            1 => Ok(operands.remove(0)),
            _ => Ok(Expr::Binary { op, operands }),
        })
}

pub fn sum() -> Parser<Expr> {
    binary(product(), Op::Add).with_name("Sum")
}

pub fn product() -> Parser<Expr> {
    binary(atom(), Op::Mul).with_name("Product")
}

pub fn atom() -> Parser<Expr> {
    let parenthesized = seq3(exactly("("), Parser::lazy(sum), exactly(")"), |_, e, _| e);
    Parser::one_of([parenthesized, number()]).with_name("Atom")
}

/// Parse a whole expression.
pub fn parse(input: &str) -> parse::Result<Expr> {
    parse::parse(&sum(), &CharLexer, input)
}
