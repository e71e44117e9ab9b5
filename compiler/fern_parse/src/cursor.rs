//! Token cursor for navigating the token stream.

use fern_ir::{Span, StringInterner, Token, TokenKind, TokenList};

/// Cursor for navigating tokens.
///
/// Invariant: the position is always valid; the last token is `EndOfFile`
/// and the cursor never advances past it.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the token stream.
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Cursor {
            tokens,
            interner,
            pos: 0,
        }
    }

    /// Get a reference to the string interner.
    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// Current position in the token stream.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        // The list always ends in EOF and `advance` refuses to pass it.
        &self.tokens[self.pos.min(self.tokens.len().saturating_sub(1))]
    }

    /// Get the current token's kind.
    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Get the previous token's span.
    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::DUMMY
        }
    }

    /// Check if the cursor is at the trailing `EndOfFile` token.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::EndOfFile)
    }

    /// Advance to the next token. Stops at `EndOfFile`.
    #[inline]
    pub fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    /// Check the current token against a kind predicate.
    #[inline]
    pub fn at(&self, pred: impl Fn(&TokenKind) -> bool) -> bool {
        pred(&self.current_kind())
    }
}
