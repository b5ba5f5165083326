//! Boolean predicate expressions over records
//!
//! A small, side-effect-free expression language evaluated against a
//! read-only record:
//!
//! ```text
//! status == 'STATUS_NEW' and (age >= 18 || not active)
//! ```
//!
//! Operands are literals (`'text'`, `"text"`, numbers, `true`, `false`,
//! `null`) or dotted field paths. Paths that cannot be resolved evaluate to
//! `null`.

mod lexer;
mod parser;

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{AuditLensError, AuditLensResult};
use crate::models::{FieldValue, Record};
use crate::resolver::resolve_nullable;

use parser::{CompareOp, Expr, Literal};

/// A compiled predicate expression
#[derive(Debug, Clone)]
pub struct Predicate {
    source: String,
    root: Expr,
}

impl Predicate {
    /// Compile an expression
    pub fn parse(source: &str) -> AuditLensResult<Self> {
        let tokens = lexer::tokenize(source)?;
        let root = parser::parse(&tokens)?;
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    /// The expression text this predicate was compiled from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluate against a record
    pub fn evaluate(&self, record: &dyn Record) -> bool {
        truthy(&eval(&self.root, record))
    }
}

impl FromStr for Predicate {
    type Err = AuditLensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Evaluate an expression string against a record
///
/// Blank expressions and expressions that fail to compile are false.
pub fn evaluate_expression(record: &dyn Record, expression: &str) -> bool {
    if expression.trim().is_empty() {
        return false;
    }
    match Predicate::parse(expression) {
        Ok(predicate) => predicate.evaluate(record),
        Err(e) => {
            tracing::debug!(
                expression,
                record_type = record.type_name(),
                "Failed to evaluate expression: {}",
                e
            );
            false
        }
    }
}

fn eval(expr: &Expr, record: &dyn Record) -> FieldValue {
    match expr {
        Expr::Literal(literal) => match literal {
            Literal::Text(s) => FieldValue::Text(s.clone()),
            Literal::Integer(n) => FieldValue::Integer(*n),
            Literal::Float(n) => FieldValue::Float(*n),
            Literal::Boolean(b) => FieldValue::Boolean(*b),
            Literal::Null => FieldValue::Null,
        },
        Expr::Path(path) => resolve_nullable(record, path),
        Expr::Not(inner) => FieldValue::Boolean(!truthy(&eval(inner, record))),
        Expr::And(terms) => FieldValue::Boolean(terms.iter().all(|t| truthy(&eval(t, record)))),
        Expr::Or(terms) => FieldValue::Boolean(terms.iter().any(|t| truthy(&eval(t, record)))),
        Expr::Compare(op, left, right) => {
            FieldValue::Boolean(compare(*op, &eval(left, record), &eval(right, record)))
        }
    }
}

fn truthy(value: &FieldValue) -> bool {
    match value {
        FieldValue::Boolean(b) => *b,
        FieldValue::Null | FieldValue::Unloaded => false,
        FieldValue::Text(s) => !s.is_empty(),
        FieldValue::List(items) => !items.is_empty(),
        FieldValue::Map(map) => !map.is_empty(),
        _ => true,
    }
}

/// Comparable projection of a value
#[derive(Debug)]
enum Scalar {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

fn scalar(value: &FieldValue) -> Option<Scalar> {
    match value {
        FieldValue::Null => Some(Scalar::Null),
        FieldValue::Boolean(b) => Some(Scalar::Boolean(*b)),
        FieldValue::Integer(n) => Some(Scalar::Integer(*n)),
        FieldValue::Float(n) => Some(Scalar::Float(*n)),
        FieldValue::Text(_)
        | FieldValue::Code(_)
        | FieldValue::Type(_)
        | FieldValue::Date(_)
        | FieldValue::Timestamp(_) => value.canonical_string().map(Scalar::Text),
        FieldValue::Entity(_)
        | FieldValue::Record(_)
        | FieldValue::List(_)
        | FieldValue::Map(_)
        | FieldValue::Unloaded => None,
    }
}

fn compare(op: CompareOp, left: &FieldValue, right: &FieldValue) -> bool {
    match op {
        CompareOp::Eq => compare_eq(left, right).unwrap_or(false),
        CompareOp::Ne => compare_eq(left, right).map_or(true, |eq| !eq),
        CompareOp::Lt => compare_order(left, right).is_some_and(Ordering::is_lt),
        CompareOp::Le => compare_order(left, right).is_some_and(Ordering::is_le),
        CompareOp::Gt => compare_order(left, right).is_some_and(Ordering::is_gt),
        CompareOp::Ge => compare_order(left, right).is_some_and(Ordering::is_ge),
    }
}

/// Equality of comparable operands; `None` when the kinds differ
fn compare_eq(left: &FieldValue, right: &FieldValue) -> Option<bool> {
    match (scalar(left)?, scalar(right)?) {
        (Scalar::Null, Scalar::Null) => Some(true),
        (Scalar::Boolean(a), Scalar::Boolean(b)) => Some(a == b),
        (Scalar::Text(a), Scalar::Text(b)) => Some(a == b),
        (a, b) => compare_numbers(&a, &b).map(Ordering::is_eq),
    }
}

/// Ordering of numbers and of text; everything else is unordered
fn compare_order(left: &FieldValue, right: &FieldValue) -> Option<Ordering> {
    match (scalar(left)?, scalar(right)?) {
        (Scalar::Text(a), Scalar::Text(b)) => Some(a.cmp(&b)),
        (a, b) => compare_numbers(&a, &b),
    }
}

/// Integers compare exactly; mixed integer/float operands compare as floats
fn compare_numbers(left: &Scalar, right: &Scalar) -> Option<Ordering> {
    match (left, right) {
        (Scalar::Integer(a), Scalar::Integer(b)) => Some(a.cmp(b)),
        (Scalar::Integer(a), Scalar::Float(b)) => (*a as f64).partial_cmp(b),
        (Scalar::Float(a), Scalar::Integer(b)) => a.partial_cmp(&(*b as f64)),
        (Scalar::Float(a), Scalar::Float(b)) => a.partial_cmp(b),
        _ => None,
    }
}
