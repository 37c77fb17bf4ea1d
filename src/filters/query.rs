//! Filter query language for message records.
//!
//! ```text
//! query := term (operator? term)*
//! term  := field:value | field:"quoted value"
//! operator := AND | OR (case-insensitive)
//! field := user | kind | since | until (case-insensitive)
//! ```
//!
//! - `user:name` - sender name, exact and case-insensitive (quote names with spaces)
//! - `kind:message|notification` - chat messages or system notifications
//! - `since:YYYY-MM-DD` / `until:YYYY-MM-DD` - inclusive date bounds
//!
//! Without an operator, a term on the same field as the previous one is an alternative
//! (`user:alice user:bob`) and a term on another field is an extra requirement
//! (`user:alice kind:message`). `OR` binds tighter than `AND`, so a query is always a
//! conjunction of alternatives.
//!
//! ```rust
//! # use chat_history_explorer::filters::parse_filter;
//! let expr = parse_filter("user:\"Alice Smith\" user:bob since:2024-01-01").unwrap();
//! assert_eq!(expr.groups().len(), 2);
//! ```

use std::fmt;
use std::sync::LazyLock;

use anyhow::{Result, bail};
use regex::{Captures, Regex};

use super::term::FilterTerm;
use crate::models::MessageRecord;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<field>[^\s:"]*):(?:"(?P<quoted>[^"]*)"|(?P<open>")|(?P<bare>[^\s"]*))|(?P<word>\S+)"#,
    )
    .expect("filter token pattern must compile")
});

/// Filter terms in conjunctive form
///
/// Every group must have at least one matching term. An empty expression matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterExpr {
    groups: Vec<Vec<FilterTerm>>,
}

impl FilterExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[Vec<FilterTerm>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Require `term` on top of everything already in the expression
    pub fn and(mut self, term: FilterTerm) -> Self {
        self.groups.push(vec![term]);
        self
    }

    /// Accept `term` as an alternative to the last group
    pub fn or(mut self, term: FilterTerm) -> Self {
        match self.groups.last_mut() {
            Some(group) => group.push(term),
            None => self.groups.push(vec![term]),
        }
        self
    }

    pub fn matches(&self, record: &MessageRecord) -> bool {
        self.groups.iter().all(|group| group.iter().any(|term| term.matches(record)))
    }

    fn last_term(&self) -> Option<&FilterTerm> {
        self.groups.last().and_then(|group| group.last())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    And,
    Or,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::And => f.write_str("AND"),
            Operator::Or => f.write_str("OR"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Term(FilterTerm),
    Operator(Operator),
}

fn read_token(caps: &Captures) -> Result<Token> {
    if let Some(word) = caps.name("word") {
        return match word.as_str().to_ascii_uppercase().as_str() {
            "AND" => Ok(Token::Operator(Operator::And)),
            "OR" => Ok(Token::Operator(Operator::Or)),
            _ => bail!("Invalid token: '{}' (expected field:value or AND/OR)", word.as_str()),
        };
    }

    let field = caps.name("field").map_or("", |m| m.as_str());
    if caps.name("open").is_some() {
        bail!("Unterminated quoted value for '{}'", field);
    }

    let value = caps.name("quoted").or_else(|| caps.name("bare")).map_or("", |m| m.as_str());
    if field.is_empty() || value.trim().is_empty() {
        bail!("Invalid field:value format: '{}'", &caps[0]);
    }

    FilterTerm::parse(field, value).map(Token::Term)
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    TOKEN_RE.captures_iter(input).map(|caps| read_token(&caps)).collect()
}

/// Parse a filter query; blank input gives an empty expression
pub fn parse_filter(input: &str) -> Result<FilterExpr> {
    let mut expr = FilterExpr::new();
    let mut pending: Option<Operator> = None;

    for token in tokenize(input)? {
        match token {
            Token::Term(term) => {
                let alternative = match pending.take() {
                    Some(op) => op == Operator::Or,
                    None => expr.last_term().is_some_and(|last| last.same_field(&term)),
                };
                expr = if alternative { expr.or(term) } else { expr.and(term) };
            }
            Token::Operator(op) => {
                if expr.is_empty() || pending.is_some() {
                    bail!("Unexpected {} operator (expected field:value)", op);
                }
                pending = Some(op);
            }
        }
    }

    if let Some(op) = pending {
        bail!("Filter ended with operator {} (expected field:value)", op);
    }

    Ok(expr)
}
