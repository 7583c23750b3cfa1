//! Textual row conditions such as `edition > 1`
//!
//! A condition compares one column against a literal. The literal goes through
//! [`Value::infer`], and the comparison uses [`Value::compare`], so numeric-looking
//! text compares numerically. A record without the column never matches.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::QueryError;
use crate::model::{Record, Value};

use super::Predicate;

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    // two-character operators first so `<=` is not read as `<`
    const TOKENS: [(&'static str, CompareOp); 7] = [
        ("==", CompareOp::Eq),
        ("!=", CompareOp::Ne),
        ("<=", CompareOp::Le),
        (">=", CompareOp::Ge),
        ("=", CompareOp::Eq),
        ("<", CompareOp::Lt),
        (">", CompareOp::Gt),
    ];

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Le => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Ge => ordering != Ordering::Less,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// `<column> <op> <literal>`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    column: String,
    op: CompareOp,
    literal: Value,
}

impl Condition {
    pub fn new(column: impl Into<String>, op: CompareOp, literal: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            literal: literal.into(),
        }
    }

    /// Parse `column op literal`. The column is everything before the first operator
    /// character, so column names cannot contain `=`, `!`, `<` or `>`.
    pub fn parse(expr: &str) -> Result<Self, QueryError> {
        let start = expr
            .find(&['=', '!', '<', '>'][..])
            .ok_or_else(|| invalid(expr, "missing comparison operator"))?;

        let rest = &expr[start..];
        let (token, op) = CompareOp::TOKENS
            .iter()
            .find(|(token, _)| rest.starts_with(*token))
            .copied()
            .ok_or_else(|| invalid(expr, "unknown operator"))?;

        let column = expr[..start].trim();
        if column.is_empty() {
            return Err(invalid(expr, "missing column name"));
        }

        let tail = &rest[token.len()..];
        if tail.starts_with(&['=', '!', '<', '>'][..]) {
            return Err(invalid(expr, "unknown operator"));
        }

        let raw = tail.trim();
        if raw.is_empty() {
            return Err(invalid(expr, "missing value"));
        }
        // a quoted literal is always text
        let literal = match unquote(raw) {
            Some(inner) => Value::text(inner),
            None => Value::infer(raw),
        };

        Ok(Self::new(column, op, literal))
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn op(&self) -> CompareOp {
        self.op
    }

    pub fn literal(&self) -> &Value {
        &self.literal
    }

    /// Evaluate against a record
    pub fn matches(&self, record: &Record) -> bool {
        let Some(value) = record.get(&self.column) else {
            return false;
        };
        match self.op {
            CompareOp::Eq => value.loose_eq(&self.literal),
            CompareOp::Ne => !value.loose_eq(&self.literal),
            op => value
                .compare(&self.literal)
                .is_some_and(|ordering| op.accepts(ordering)),
        }
    }

    /// Turn into a predicate for [`Step::Restrict`](super::Step::Restrict)
    pub fn into_predicate(self) -> Predicate {
        Arc::new(move |record: &Record| self.matches(record))
    }
}

impl FromStr for Condition {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::parse(s)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.op.symbol(), self.literal)
    }
}

fn invalid(expr: &str, reason: &str) -> QueryError {
    QueryError::InvalidCondition(format!("{}: `{}`", reason, expr))
}

/// Inner text of a literal wrapped in matching single or double quotes
fn unquote(s: &str) -> Option<&str> {
    ['"', '\''].into_iter().find_map(|quote| {
        s.strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}
