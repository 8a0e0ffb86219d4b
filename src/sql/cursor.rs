use super::token::Token;

/// Forward-only cursor over a token sequence.
///
/// `peek` inspects the next token without consuming it, so productions never
/// have to push a token back.
#[derive(Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Returns true if the next token equals `literal`
    pub fn peek_is(&self, literal: &str) -> bool {
        self.peek().map_or(false, |token| token.is(literal))
    }

    pub fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        Some(token)
    }

    /// Index of the next token to be consumed
    pub fn position(&self) -> usize {
        self.position
    }
}
