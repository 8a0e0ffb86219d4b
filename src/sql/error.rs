use thiserror::Error;

/// Reasons a statement fails to match the `SELECT ... FROM ...` grammar.
///
/// Positions are zero-based token indices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected '{expected}' at token {position}, found '{found}'")]
    KeywordMismatch {
        expected: &'static str,
        found: String,
        position: usize,
    },

    #[error("empty attribute list at token {position}")]
    EmptyAttributeList { position: usize },

    #[error("dangling ',' before 'from' at token {position}")]
    DanglingSeparator { position: usize },

    #[error("expected ',' or 'from' at token {position}, found '{found}'")]
    MissingSeparator { found: String, position: usize },

    #[error("unexpected end of input at token {position}, expected {expected}")]
    UnexpectedEnd {
        expected: &'static str,
        position: usize,
    },

    #[error("unexpected trailing input at token {position}: '{found}'")]
    TrailingInput { found: String, position: usize },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::KeywordMismatch { position, .. }
            | ParseError::EmptyAttributeList { position }
            | ParseError::DanglingSeparator { position }
            | ParseError::MissingSeparator { position, .. }
            | ParseError::UnexpectedEnd { position, .. }
            | ParseError::TrailingInput { position, .. } => *position,
        }
    }
}
