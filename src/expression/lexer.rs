//! Tokenizer for predicate expressions

use crate::error::{AuditLensError, AuditLensResult};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Text(String),
    Integer(i64),
    Float(f64),
    True,
    False,
    Null,
    /// Dotted field path
    Path(String),
    And,
    Or,
    Not,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    LParen,
    RParen,
}

pub(crate) fn tokenize(input: &str) -> AuditLensResult<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        match c {
            c if c.is_whitespace() => pos += 1,
            '(' => {
                tokens.push(Token::LParen);
                pos += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                pos += 1;
            }
            '\'' | '"' => {
                let (text, next) = read_quoted(&chars, pos)?;
                tokens.push(Token::Text(text));
                pos = next;
            }
            '=' | '!' | '<' | '>' | '&' | '|' => {
                let (token, width) = read_operator(&chars, pos)?;
                tokens.push(token);
                pos += width;
            }
            c if c.is_ascii_digit() || (c == '-' && peek_digit(&chars, pos + 1)) => {
                let (token, next) = read_number(&chars, pos)?;
                tokens.push(token);
                pos = next;
            }
            c if is_path_start(c) => {
                let start = pos;
                while pos < chars.len() && is_path_char(chars[pos]) {
                    pos += 1;
                }
                let word: String = chars[start..pos].iter().collect();
                tokens.push(keyword_or_path(word)?);
            }
            other => {
                return Err(AuditLensError::Expression(format!(
                    "unexpected character '{}' at {}",
                    other, pos
                )))
            }
        }
    }

    Ok(tokens)
}

fn read_quoted(chars: &[char], start: usize) -> AuditLensResult<(String, usize)> {
    let quote = chars[start];
    let mut text = String::new();
    let mut pos = start + 1;

    while pos < chars.len() {
        let c = chars[pos];
        if c == quote {
            // A doubled quote stands for one literal quote
            if chars.get(pos + 1) == Some(&quote) {
                text.push(quote);
                pos += 2;
                continue;
            }
            return Ok((text, pos + 1));
        }
        text.push(c);
        pos += 1;
    }

    Err(AuditLensError::Expression(format!(
        "unterminated string starting at {}",
        start
    )))
}

fn read_operator(chars: &[char], pos: usize) -> AuditLensResult<(Token, usize)> {
    let next = chars.get(pos + 1).copied();
    let token = match (chars[pos], next) {
        ('=', Some('=')) => (Token::Eq, 2),
        ('!', Some('=')) => (Token::Ne, 2),
        ('<', Some('=')) => (Token::Le, 2),
        ('>', Some('=')) => (Token::Ge, 2),
        ('&', Some('&')) => (Token::And, 2),
        ('|', Some('|')) => (Token::Or, 2),
        ('<', _) => (Token::Lt, 1),
        ('>', _) => (Token::Gt, 1),
        ('!', _) => (Token::Not, 1),
        (c, _) => {
            return Err(AuditLensError::Expression(format!(
                "unexpected operator '{}' at {}",
                c, pos
            )))
        }
    };
    Ok(token)
}

fn read_number(chars: &[char], start: usize) -> AuditLensResult<(Token, usize)> {
    let mut pos = start + 1;
    let mut is_float = false;
    while pos < chars.len() {
        match chars[pos] {
            c if c.is_ascii_digit() => pos += 1,
            '.' if !is_float && peek_digit(chars, pos + 1) => {
                is_float = true;
                pos += 1;
            }
            _ => break,
        }
    }

    let literal: String = chars[start..pos].iter().collect();
    let token = if is_float {
        literal.parse().map(Token::Float).ok()
    } else {
        literal.parse().map(Token::Integer).ok()
    };
    token
        .map(|t| (t, pos))
        .ok_or_else(|| AuditLensError::Expression(format!("invalid number '{}'", literal)))
}

fn keyword_or_path(word: String) -> AuditLensResult<Token> {
    let token = match word.as_str() {
        "and" => Token::And,
        "or" => Token::Or,
        "not" => Token::Not,
        "true" => Token::True,
        "false" => Token::False,
        "null" => Token::Null,
        _ => {
            if word.ends_with('.') || word.contains("..") {
                return Err(AuditLensError::Expression(format!("invalid path '{}'", word)));
            }
            Token::Path(word)
        }
    };
    Ok(token)
}

fn peek_digit(chars: &[char], pos: usize) -> bool {
    chars.get(pos).is_some_and(|c| c.is_ascii_digit())
}

fn is_path_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '.'
}
