//! Recursive descent parser for Fern.
//!
//! Consumes the full token sequence and produces exactly one root CST value
//! (possibly malformed) plus zero or more diagnostics. The parser never
//! panics and never aborts on malformed input: a production that cannot
//! complete emits a `Malformed` node tagged with a stable reason code at the
//! span of the offending token, then resumes at the nearest recognizable
//! synchronization point.
//!
//! Determinism: the same token sequence always yields a byte-identical CST
//! shape and the same diagnostics.

mod cursor;
mod grammar;
mod recovery;
pub mod render;

pub use cursor::Cursor;
pub use recovery::{synchronize, synchronize_close_round, TokenSet, DEF_BOUNDARY};

use fern_diagnostic::{Category, Diagnostic};
use fern_ir::{
    Expr, ExprArena, ExprId, ExprKind, MalformedReason, SourceFile, Span, StringInterner,
    TokenList,
};
use tracing::trace;

/// Root of a parsed unit.
#[derive(Clone, Debug)]
pub enum ParsedUnit {
    /// A single-expression unit.
    Expr(ExprId),
    /// A file unit: a sequence of top-level items.
    File(SourceFile),
}

/// Result of parsing one unit: best-effort CST plus accumulated diagnostics.
pub struct ParseResult {
    pub arena: ExprArena,
    pub unit: ParsedUnit,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parser state for one unit.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
    diagnostics: Vec<Diagnostic>,
    /// Set once any malformed node has been produced; used to suppress
    /// cascading trailing-token diagnostics after a failed root.
    produced_malformed: bool,
}

impl<'a> Parser<'a> {
    /// Create a new parser over a token list.
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner),
            arena: ExprArena::new(),
            diagnostics: Vec::new(),
            produced_malformed: false,
        }
    }

    /// Allocate a malformed node and record its diagnostic.
    ///
    /// This is the single entry point for all parse-error recovery, so each
    /// recovery case produces exactly one node and one diagnostic.
    fn malformed(&mut self, reason: MalformedReason, span: Span) -> ExprId {
        trace!(code = reason.code(), ?span, "parse error");
        self.produced_malformed = true;
        self.diagnostics.push(
            Diagnostic::error(Category::ParseError, reason_message(reason), span)
                .with_code(reason.code()),
        );
        self.arena.alloc_expr(Expr::new(ExprKind::Malformed(reason), span))
    }
}

/// Human-readable message for each recovery case.
///
/// Wording is part of the golden interface; change with care.
const fn reason_message(reason: MalformedReason) -> &'static str {
    match reason {
        MalformedReason::ExpectedExpr => "Expected an expression here.",
        MalformedReason::ExprUnexpectedToken => {
            "This token cannot begin or continue an expression."
        }
        MalformedReason::ExpectedExprCloseRoundOrComma => {
            "Expected a closing parenthesis or a comma here."
        }
        MalformedReason::ExpectedArrow => "Expected `->` after the lambda parameters.",
        MalformedReason::ExpectedLambdaParam => {
            "Expected a parameter name after `\\` or `,`."
        }
        MalformedReason::ExpectedDefEquals => "Expected `=` after the definition name.",
        MalformedReason::ExpectedDefName => {
            "Expected a definition name at the start of this line."
        }
    }
}

/// Parse a single-expression unit.
///
/// Always yields exactly one root node. Trailing tokens after a clean root
/// produce one diagnostic; after a malformed root they are skipped silently
/// (the malformed node already explains the failure).
pub fn parse_expr_unit(tokens: &TokenList, interner: &StringInterner) -> ParseResult {
    let mut parser = Parser::new(tokens, interner);
    let root = parser.parse_expr_root();
    ParseResult {
        arena: parser.arena,
        unit: ParsedUnit::Expr(root),
        diagnostics: parser.diagnostics,
    }
}

/// Parse a file unit: newline-separated `name = expr` definitions.
pub fn parse_file_unit(tokens: &TokenList, interner: &StringInterner) -> ParseResult {
    let mut parser = Parser::new(tokens, interner);
    let file = parser.parse_file();
    ParseResult {
        arena: parser.arena,
        unit: ParsedUnit::File(file),
        diagnostics: parser.diagnostics,
    }
}

#[cfg(test)]
mod tests;
