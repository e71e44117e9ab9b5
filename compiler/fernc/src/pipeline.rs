//! The front-end pipeline for one compilation unit.
//!
//! Strictly pipeline-shaped and single-threaded per unit: each stage is a
//! pure transformation and every piece of state (interner, arenas, scope
//! stack, type pool) is owned by the run and discarded with it. Independent
//! units can run on worker threads with no shared state.

use fern_canon::CanonResult;
use fern_diagnostic::{Diagnostic, LineIndex};
use fern_ir::{StringInterner, TokenList};
use fern_parse::{ParseResult, ParsedUnit};
use fern_typeck::TypeCheckResult;
use tracing::debug;

/// Kind of compilation unit.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum UnitKind {
    /// A single expression.
    Expr,
    /// A sequence of top-level definitions.
    File,
}

impl UnitKind {
    /// Stable name used in the META section.
    pub const fn name(&self) -> &'static str {
        match self {
            UnitKind::Expr => "expr",
            UnitKind::File => "file",
        }
    }

    /// Parse a META kind value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "expr" => Some(UnitKind::Expr),
            "file" => Some(UnitKind::File),
            _ => None,
        }
    }
}

/// Everything the pipeline produced for one unit.
pub struct UnitOutput {
    pub kind: UnitKind,
    pub source: Vec<u8>,
    pub lex_diagnostics: Vec<Diagnostic>,
    pub interner: StringInterner,
    pub index: LineIndex,
    pub tokens: TokenList,
    pub parse: ParseResult,
    pub formatted: String,
    pub canon: CanonResult,
    pub typed: TypeCheckResult,
}

impl UnitOutput {
    /// All diagnostics in stage order: lex, parse, canonicalize, infer.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut all = Vec::new();
        all.extend(self.lex_diagnostics.iter().cloned());
        all.extend(self.parse.diagnostics.iter().cloned());
        all.extend(self.canon.diagnostics.iter().cloned());
        all.extend(self.typed.diagnostics.iter().cloned());
        all
    }

    /// Whether any stage reported a diagnostic.
    pub fn has_problems(&self) -> bool {
        !self.lex_diagnostics.is_empty()
            || !self.parse.diagnostics.is_empty()
            || !self.canon.diagnostics.is_empty()
            || !self.typed.diagnostics.is_empty()
    }
}

/// Run the whole pipeline on one unit.
pub fn run_pipeline(source: &[u8], kind: UnitKind) -> UnitOutput {
    let interner = StringInterner::new();
    let index = LineIndex::new(source);

    let lexed = fern_lexer::lex(source, &interner);
    debug!(tokens = lexed.tokens.len(), "lexed");

    let parse = match kind {
        UnitKind::Expr => fern_parse::parse_expr_unit(&lexed.tokens, &interner),
        UnitKind::File => fern_parse::parse_file_unit(&lexed.tokens, &interner),
    };
    debug!(diagnostics = parse.diagnostics.len(), "parsed");

    let source_text = String::from_utf8_lossy(source).into_owned();
    let formatted = match &parse.unit {
        ParsedUnit::Expr(root) => {
            fern_fmt::format_expr(&parse.arena, *root, &interner, &source_text)
        }
        ParsedUnit::File(file) => {
            fern_fmt::format_file(&parse.arena, file, &interner, &source_text)
        }
    };

    let canon = match &parse.unit {
        ParsedUnit::Expr(root) => {
            fern_canon::canonicalize_expr_unit(&parse.arena, *root, &interner)
        }
        ParsedUnit::File(file) => {
            fern_canon::canonicalize_file_unit(&parse.arena, file, &interner)
        }
    };
    debug!(empty = canon.is_empty(), "canonicalized");

    let typed = fern_typeck::infer_unit(&canon.arena, &canon.root, &interner);

    UnitOutput {
        kind,
        source: source.to_vec(),
        lex_diagnostics: lexed.diagnostics,
        interner,
        index,
        tokens: lexed.tokens,
        parse,
        formatted,
        canon,
        typed,
    }
}
