//! SELECT Statement Recognizer
//!
//! Recognizes statements of the form
//!
//! ```text
//! statement := "select" attrs "from" IDENT
//! attrs     := "*" | attrList
//! attrList  := IDENT ( "," IDENT )*      -- must not start with "from"
//! ```
//!
//! Each production is one function that consumes tokens from the front of a
//! [`TokenStream`] and either returns what it matched or a [`ParseError`]. The
//! first failure aborts the whole parse.
//!
//! [`recognize`] is a prefix match: tokens after the table name are ignored.
//! [`recognize_exact`] rejects them instead.
//!
//! An attribute or table literally named `from` cannot be expressed: the
//! keyword lookahead always claims it.

use super::cursor::TokenStream;
use super::error::ParseError;
use super::token::{tokenize, Token, COMMA, FROM, SELECT, WILDCARD};
use itertools::Itertools;
use std::fmt::Display;
use tracing::debug;

/// A recognized `SELECT <attributes> FROM <table>` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectStatement {
    /// Attribute names in source order, or the single wildcard `*`
    pub attributes: Vec<String>,
    /// The table name to select from
    pub table_name: String,
}

impl SelectStatement {
    /// Parses a SQL string into a SelectStatement
    ///
    /// Same as [`recognize`].
    pub fn parse(sql: &str) -> Result<Self, ParseError> {
        recognize(sql)
    }

    pub fn is_wildcard(&self) -> bool {
        self.attributes.len() == 1 && self.attributes[0] == WILDCARD
    }
}

impl Display for SelectStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "table: {} attributes: {}",
            self.table_name,
            self.attributes.iter().join(",")
        )
    }
}

/// Tokenizes `input` and matches it as a SELECT statement, ignoring any
/// tokens that follow the table name
pub fn recognize(input: &str) -> Result<SelectStatement, ParseError> {
    recognize_tokens(tokenize(input))
}

pub fn recognize_tokens(tokens: Vec<Token>) -> Result<SelectStatement, ParseError> {
    let mut stream = TokenStream::new(tokens);
    statement(&mut stream)
}

/// Like [`recognize`], but the table name must be the last token
pub fn recognize_exact(input: &str) -> Result<SelectStatement, ParseError> {
    let mut stream = TokenStream::new(tokenize(input));
    let stmt = statement(&mut stream)?;

    if let Some(extra) = stream.peek() {
        return Err(ParseError::TrailingInput {
            found: extra.to_string(),
            position: stream.position(),
        });
    }

    Ok(stmt)
}

/// statement := "select" attrs "from" IDENT
fn statement(stream: &mut TokenStream) -> Result<SelectStatement, ParseError> {
    debug!("statement at token {}", stream.position());

    expect_keyword(stream, SELECT)?;
    let attributes = attributes(stream)?;
    expect_keyword(stream, FROM)?;

    let position = stream.position();
    let table_name = stream
        .next()
        .ok_or(ParseError::UnexpectedEnd {
            expected: "table name",
            position,
        })?
        .into_string();

    debug!("matched table '{}' with {} attribute(s)", table_name, attributes.len());
    Ok(SelectStatement {
        attributes,
        table_name,
    })
}

/// attrs := "*" | attrList
fn attributes(stream: &mut TokenStream) -> Result<Vec<String>, ParseError> {
    if stream.peek_is(WILDCARD) {
        stream.next();
        return Ok(vec![WILDCARD.to_string()]);
    }
    attribute_list(stream)
}

/// attrList must not start with "from"
fn attribute_list(stream: &mut TokenStream) -> Result<Vec<String>, ParseError> {
    debug!("attribute list at token {}", stream.position());

    if stream.peek_is(FROM) {
        return Err(ParseError::EmptyAttributeList {
            position: stream.position(),
        });
    }
    separated_attributes(stream)
}

/// IDENT ( "," IDENT )*, stopping in front of "from"
///
/// The attribute itself is taken as-is, so a leading `,` is accepted as a name.
fn separated_attributes(stream: &mut TokenStream) -> Result<Vec<String>, ParseError> {
    let mut attributes = Vec::new();

    loop {
        let position = stream.position();
        let attribute = stream.next().ok_or(ParseError::UnexpectedEnd {
            expected: "attribute",
            position,
        })?;
        attributes.push(attribute.into_string());

        let position = stream.position();
        if stream.peek_is(FROM) {
            return Ok(attributes);
        }

        if !stream.peek_is(COMMA) {
            return Err(match stream.peek() {
                Some(token) => ParseError::MissingSeparator {
                    found: token.to_string(),
                    position,
                },
                None => ParseError::UnexpectedEnd {
                    expected: "',' or 'from'",
                    position,
                },
            });
        }

        stream.next();
        if stream.peek_is(FROM) {
            return Err(ParseError::DanglingSeparator { position });
        }
    }
}

fn expect_keyword(stream: &mut TokenStream, keyword: &'static str) -> Result<(), ParseError> {
    let position = stream.position();
    match stream.next() {
        Some(token) if token.is(keyword) => Ok(()),
        Some(token) => Err(ParseError::KeywordMismatch {
            expected: keyword,
            found: token.into_string(),
            position,
        }),
        None => Err(ParseError::UnexpectedEnd {
            expected: keyword,
            position,
        }),
    }
}
