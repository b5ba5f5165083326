//! Recursive-descent parser for predicate expressions
//!
//! Precedence from loosest to tightest: `or`, `and`, `not`, comparison.

use crate::error::{AuditLensError, AuditLensResult};

use super::lexer::Token;

/// Deepest allowed nesting of `not` and parentheses
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Literal {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Literal(Literal),
    Path(String),
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Compare(CompareOp, Box<Expr>, Box<Expr>),
}

pub(crate) fn parse(tokens: &[Token]) -> AuditLensResult<Expr> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.or_expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(AuditLensError::Expression(format!(
            "unexpected {:?} after end of expression",
            token
        ))),
    }
}

/// Chains of `and`/`or` are kept flat so long inputs do not deepen the tree
fn flatten(mut terms: Vec<Expr>, join: fn(Vec<Expr>) -> Expr) -> Expr {
    if terms.len() == 1 {
        terms.remove(0)
    } else {
        join(terms)
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> AuditLensResult<T>) -> AuditLensResult<T> {
        if self.depth >= MAX_DEPTH {
            return Err(AuditLensError::Expression("expression nested too deeply".into()));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn or_expr(&mut self) -> AuditLensResult<Expr> {
        let mut terms = vec![self.and_expr()?];
        while self.eat(&Token::Or) {
            terms.push(self.and_expr()?);
        }
        Ok(flatten(terms, Expr::Or))
    }

    fn and_expr(&mut self) -> AuditLensResult<Expr> {
        let mut terms = vec![self.unary()?];
        while self.eat(&Token::And) {
            terms.push(self.unary()?);
        }
        Ok(flatten(terms, Expr::And))
    }

    fn unary(&mut self) -> AuditLensResult<Expr> {
        if self.eat(&Token::Not) {
            let inner = self.nested(Self::unary)?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.comparison()
    }

    fn comparison(&mut self) -> AuditLensResult<Expr> {
        let left = self.operand()?;
        let op = match self.peek() {
            Some(Token::Eq) => CompareOp::Eq,
            Some(Token::Ne) => CompareOp::Ne,
            Some(Token::Lt) => CompareOp::Lt,
            Some(Token::Le) => CompareOp::Le,
            Some(Token::Gt) => CompareOp::Gt,
            Some(Token::Ge) => CompareOp::Ge,
            _ => return Ok(left),
        };
        self.pos += 1;
        let right = self.operand()?;
        Ok(Expr::Compare(op, Box::new(left), Box::new(right)))
    }

    fn operand(&mut self) -> AuditLensResult<Expr> {
        let expr = match self.advance() {
            Some(Token::Text(s)) => Expr::Literal(Literal::Text(s.clone())),
            Some(Token::Integer(n)) => Expr::Literal(Literal::Integer(*n)),
            Some(Token::Float(n)) => Expr::Literal(Literal::Float(*n)),
            Some(Token::True) => Expr::Literal(Literal::Boolean(true)),
            Some(Token::False) => Expr::Literal(Literal::Boolean(false)),
            Some(Token::Null) => Expr::Literal(Literal::Null),
            Some(Token::Path(path)) => Expr::Path(path.clone()),
            Some(Token::LParen) => {
                let inner = self.nested(Self::or_expr)?;
                if !self.eat(&Token::RParen) {
                    return Err(AuditLensError::Expression("missing closing parenthesis".into()));
                }
                inner
            }
            Some(token) => {
                return Err(AuditLensError::Expression(format!(
                    "expected a value but found {:?}",
                    token
                )))
            }
            None => return Err(AuditLensError::Expression("unexpected end of expression".into())),
        };
        Ok(expr)
    }
}
