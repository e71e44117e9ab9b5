//! Error recovery for the parser.
//!
//! Provides token sets and synchronization for continuing parsing after
//! errors. Uses bitset-based O(1) membership testing.

use crate::cursor::Cursor;
use fern_ir::TokenKind;

/// A set of token kinds using bitset representation.
///
/// Each bit corresponds to a `TokenKind` discriminant index. Fern has 17
/// token kinds, so u32 covers all variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet(u32);

impl TokenSet {
    /// Create an empty token set.
    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a token kind to this set (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u32 << kind.discriminant_index()))
    }

    /// Union of two token sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check if this set contains a token kind.
    #[inline]
    pub const fn contains(&self, kind: &TokenKind) -> bool {
        (self.0 & (1u32 << kind.discriminant_index())) != 0
    }

    /// Check if this set is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TokenSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Recovery set for top-level definition boundaries in `file` units.
pub const DEF_BOUNDARY: TokenSet = TokenSet::new()
    .with(TokenKind::Newline)
    .with(TokenKind::EndOfFile);

/// Advance the cursor until reaching a token in the recovery set or EOF.
///
/// Returns `true` if a recovery token was found, `false` if EOF was reached
/// without one.
pub fn synchronize(cursor: &mut Cursor<'_>, recovery: TokenSet) -> bool {
    loop {
        if recovery.contains(&cursor.current_kind()) {
            return true;
        }
        if cursor.is_at_end() {
            return false;
        }
        cursor.advance();
    }
}

/// Advance past a broken parenthesized region.
///
/// Skips forward, tracking nested open parentheses, and consumes the
/// matching `CloseRound` if one exists. Stops (without consuming) at EOF.
pub fn synchronize_close_round(cursor: &mut Cursor<'_>) {
    let mut depth: u32 = 0;
    while !cursor.is_at_end() {
        match cursor.current_kind() {
            TokenKind::OpenRound => {
                depth += 1;
                cursor.advance();
            }
            TokenKind::CloseRound => {
                cursor.advance();
                if depth == 0 {
                    return;
                }
                depth -= 1;
            }
            _ => cursor.advance(),
        }
    }
}
