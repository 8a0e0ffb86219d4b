//! SQL Tokenizer
//!
//! Splits raw input into a flat sequence of lowercase tokens. Only the ASCII
//! space character separates tokens; tabs and newlines stay inside the token
//! they appear in. Commas always become their own token.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Display;
use tracing::trace;

pub const SELECT: &str = "select";
pub const FROM: &str = "from";
pub const COMMA: &str = ",";
pub const WILDCARD: &str = "*";

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());

/// A single lexical unit, already case-folded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns true if the token equals `literal`
    pub fn is(&self, literal: &str) -> bool {
        self.0 == literal
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a SQL string into a vector of tokens
///
/// # Example
/// "SELECT foo,Bar  FROM t" becomes:
/// ["select", "foo", ",", "bar", "from", "t"]
pub fn tokenize(input: &str) -> Vec<Token> {
    let folded = input.to_lowercase();
    let collapsed = SPACE_RUN.replace_all(&folded, " ");
    let padded = collapsed.replace(',', " , ");

    let tokens: Vec<Token> = padded
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(Token::new)
        .collect();

    trace!("Tokens: {:?}", tokens);
    tokens
}
