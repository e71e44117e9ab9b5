//! Tokenizer for Fern, built on logos.
//!
//! The tokenizer is total: any byte sequence (including invalid UTF-8 and
//! empty input) produces a finite token list ending in exactly one
//! `EndOfFile` token. Lexically invalid input never aborts the pipeline; it
//! becomes an `Unknown` token plus an `UNKNOWN TOKEN` diagnostic.
//!
//! Newline tokens are emitted rather than skipped: the parser uses them as
//! definition boundaries and diagnostics use them for layout context.
//! Horizontal whitespace and `#` line comments are skipped. Identifiers are
//! classified here into lower- and upper-case-leading kinds; the grammar
//! relies on that split without backtracking.

use fern_diagnostic::{Category, Diagnostic};
use fern_ir::{Span, StringInterner, Token, TokenKind, TokenList};
use logos::Logos;

/// Raw token shapes recognized by the logos scanner.
///
/// Scans `[u8]`, not `str`, so arbitrary bytes lex without a UTF-8
/// precondition. Adjacent unrecognized bytes surface as individual logos
/// errors and are merged into one `Unknown` token downstream.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(source = [u8])]
#[logos(skip r"[ \t\r]+")]
enum RawToken {
    #[regex(r"#[^\n]*")]
    LineComment,

    #[token("\n")]
    Newline,

    #[regex(r"[0-9][0-9_]*")]
    Int,

    #[regex(r"[a-z_][A-Za-z0-9_]*")]
    LowerIdent,

    #[regex(r"[A-Z][A-Za-z0-9_]*")]
    UpperIdent,

    // `->` must come before `-` so logos prefers the longer match.
    #[token("->")]
    Arrow,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("\\")]
    Backslash,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("=")]
    Equals,
    #[token("(")]
    OpenRound,
    #[token(")")]
    CloseRound,
}

/// Output of one lex run.
pub struct LexResult {
    pub tokens: TokenList,
    pub diagnostics: Vec<Diagnostic>,
}

/// Tokenize a unit's source bytes.
///
/// Never fails. The returned list ends in exactly one `EndOfFile` token
/// whose span is the empty span at end of input.
pub fn lex(source: &[u8], interner: &StringInterner) -> LexResult {
    let mut tokens = TokenList::new();
    let mut diagnostics = Vec::new();
    let mut lexer = RawToken::lexer(source);

    // Span of an unknown run being merged, if one is open.
    let mut pending_unknown: Option<Span> = None;

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        match result {
            Err(()) => {
                pending_unknown = Some(match pending_unknown {
                    Some(open) if open.end == span.start => open.merge(span),
                    Some(open) => {
                        flush_unknown(open, &mut tokens, &mut diagnostics);
                        span
                    }
                    None => span,
                });
            }
            Ok(raw) => {
                if let Some(open) = pending_unknown.take() {
                    flush_unknown(open, &mut tokens, &mut diagnostics);
                }
                match raw {
                    RawToken::LineComment => {}
                    RawToken::Newline => tokens.push(Token::new(TokenKind::Newline, span)),
                    RawToken::Int => {
                        let name = interner.intern(&text(lexer.slice()));
                        tokens.push(Token::new(TokenKind::Int(name), span));
                    }
                    RawToken::LowerIdent => {
                        let name = interner.intern(&text(lexer.slice()));
                        tokens.push(Token::new(TokenKind::LowerIdent(name), span));
                    }
                    RawToken::UpperIdent => {
                        let name = interner.intern(&text(lexer.slice()));
                        tokens.push(Token::new(TokenKind::UpperIdent(name), span));
                    }
                    RawToken::Arrow => tokens.push(Token::new(TokenKind::Arrow, span)),
                    RawToken::Plus => tokens.push(Token::new(TokenKind::OpPlus, span)),
                    RawToken::Minus => tokens.push(Token::new(TokenKind::OpMinus, span)),
                    RawToken::Star => tokens.push(Token::new(TokenKind::OpStar, span)),
                    RawToken::Slash => tokens.push(Token::new(TokenKind::OpSlash, span)),
                    RawToken::Backslash => {
                        tokens.push(Token::new(TokenKind::Backslash, span));
                    }
                    RawToken::Comma => tokens.push(Token::new(TokenKind::Comma, span)),
                    RawToken::Colon => tokens.push(Token::new(TokenKind::Colon, span)),
                    RawToken::Equals => tokens.push(Token::new(TokenKind::Equals, span)),
                    RawToken::OpenRound => {
                        tokens.push(Token::new(TokenKind::OpenRound, span));
                    }
                    RawToken::CloseRound => {
                        tokens.push(Token::new(TokenKind::CloseRound, span));
                    }
                }
            }
        }
    }
    if let Some(open) = pending_unknown.take() {
        flush_unknown(open, &mut tokens, &mut diagnostics);
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tokens.push(Token::new(TokenKind::EndOfFile, Span::new(end, end)));

    LexResult {
        tokens,
        diagnostics,
    }
}

fn flush_unknown(span: Span, tokens: &mut TokenList, diagnostics: &mut Vec<Diagnostic>) {
    tokens.push(Token::new(TokenKind::Unknown, span));
    diagnostics.push(Diagnostic::error(
        Category::UnknownToken,
        "This character sequence is not a Fern token.",
        span,
    ));
}

/// Token text as lossy UTF-8. Identifier and literal regexes only match
/// ASCII, so the lossy conversion is exact for every interned slice.
fn text(slice: &[u8]) -> String {
    String::from_utf8_lossy(slice).into_owned()
}

#[cfg(test)]
mod tests;
