//! Golden/snapshot records.
//!
//! One compilation unit under test is captured as a fixed multi-section
//! on-disk record. Every section after SOURCE is re-derivable from SOURCE,
//! and `verify` checks that a stored record round-trips byte-for-byte
//! against re-derivation. Section order, sentinels (`NIL`, `NO CHANGE`),
//! diagnostic category labels, and malformed reason codes are all part of
//! the stable interface.
//!
//! Record layout:
//!
//! ```text
//! # META
//! description=<free text>
//! kind=expr
//! # SOURCE
//! <raw unit source>
//! # PROBLEMS
//! ...
//! # TOKENS
//! ...
//! # PARSE
//! ...
//! # FORMATTED
//! ...
//! # CANONICALIZE
//! ...
//! # TYPES
//! ...
//! ```
//!
//! Each section's content is stored verbatim followed by one terminating
//! newline, which the reader strips; content therefore round-trips exactly,
//! including a trailing newline in SOURCE.

use crate::pipeline::{run_pipeline, UnitKind, UnitOutput};
use fern_canon::CanonResult;
use fern_diagnostic::{render_problems, LineIndex};
use fern_ir::{CanExpr, CanRoot, StringInterner, TokenList};
use fern_typeck::TypeCheckResult;
use fern_types::{format_type, format_type_generalized};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Section headers, in their required order.
const SECTIONS: [&str; 8] = [
    "# META",
    "# SOURCE",
    "# PROBLEMS",
    "# TOKENS",
    "# PARSE",
    "# FORMATTED",
    "# CANONICALIZE",
    "# TYPES",
];

/// Sentinel written to FORMATTED when formatting is the identity.
pub use fern_fmt::NO_CHANGE;

/// The editable inputs of a record; everything else is derived.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Record {
    pub description: String,
    pub kind: UnitKind,
    pub source: Vec<u8>,
}

/// A malformed record file.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum RecordError {
    /// A required section header is missing or out of order.
    MissingSection(&'static str),
    /// META is missing a required key.
    MissingMeta(&'static str),
    /// META has an unknown unit kind.
    UnknownKind(String),
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::MissingSection(s) => write!(f, "missing section {s}"),
            RecordError::MissingMeta(k) => write!(f, "missing META key `{k}`"),
            RecordError::UnknownKind(k) => write!(f, "unknown unit kind `{k}`"),
        }
    }
}

impl std::error::Error for RecordError {}

/// Render the full record for a unit, re-deriving every section.
pub fn render_record(description: &str, kind: UnitKind, source: &[u8]) -> String {
    let output = run_pipeline(source, kind);
    render_record_from_output(description, &output)
}

/// Render the full record from an already-run pipeline.
pub fn render_record_from_output(description: &str, output: &UnitOutput) -> String {
    let mut out = String::new();
    push_section(&mut out, "# META", &render_meta(description, output.kind));
    push_section(
        &mut out,
        "# SOURCE",
        &String::from_utf8_lossy(&output.source),
    );
    push_section(
        &mut out,
        "# PROBLEMS",
        &render_problems(&output.diagnostics(), &output.source, &output.index),
    );
    push_section(
        &mut out,
        "# TOKENS",
        &render_tokens(&output.tokens, &output.index),
    );
    push_section(
        &mut out,
        "# PARSE",
        &fern_parse::render::render_parse(
            &output.parse.arena,
            &output.parse.unit,
            &output.interner,
            &output.index,
        ),
    );
    let formatted = if output.formatted.as_bytes() == output.source.as_slice() {
        NO_CHANGE
    } else {
        &output.formatted
    };
    push_section(&mut out, "# FORMATTED", formatted);
    push_section(
        &mut out,
        "# CANONICALIZE",
        &fern_canon::render::render_canon(&output.canon, &output.interner, &output.index),
    );
    push_section(
        &mut out,
        "# TYPES",
        &render_types(&output.canon, &output.typed, &output.interner, &output.index),
    );
    out
}

fn render_meta(description: &str, kind: UnitKind) -> String {
    format!("description={description}\nkind={}", kind.name())
}

fn push_section(out: &mut String, header: &str, content: &str) {
    out.push_str(header);
    out.push('\n');
    out.push_str(content);
    out.push('\n');
}

/// Render the TOKENS section: `Kind(sl:sc-el:ec)` comma-separated, ending
/// with the `EndOfFile` token.
pub fn render_tokens(tokens: &TokenList, index: &LineIndex) -> String {
    let rendered: Vec<String> = tokens
        .iter()
        .map(|t| format!("{}({})", t.kind.display_name(), index.render_colon(t.span)))
        .collect();
    rendered.join(", ")
}

/// Render the TYPES section.
///
/// An `expr` unit gets one `(expr @span (type "…"))` entry; a `file` unit
/// (and the empty unit) gets the structured `(inferred-types …)` block.
pub fn render_types(
    canon: &CanonResult,
    typed: &TypeCheckResult,
    interner: &StringInterner,
    index: &LineIndex,
) -> String {
    match &canon.root {
        CanRoot::Empty => "(inferred-types (defs) (expressions))".to_owned(),
        CanRoot::Expr(root) => {
            let node = canon.arena.get(*root);
            let ty = typed.ty(*root);
            let rendered = if matches!(node.kind, CanExpr::Int(_)) {
                format_type(&typed.pool, ty, interner)
            } else {
                format_type_generalized(&typed.pool, ty, interner)
            };
            format!(
                "(expr @{} (type \"{rendered}\"))",
                index.render_dot(node.span)
            )
        }
        CanRoot::File(defs) => {
            let mut out = String::from("(inferred-types (defs");
            for def in defs {
                let ty = typed.ty(def.body);
                let literal = matches!(canon.arena.get(def.body).kind, CanExpr::Int(_));
                let rendered = if literal {
                    format_type(&typed.pool, ty, interner)
                } else {
                    format_type_generalized(&typed.pool, ty, interner)
                };
                out.push_str(&format!(
                    " (def \"{}\" (type \"{rendered}\"))",
                    interner.lookup(def.name)
                ));
            }
            out.push_str(") (expressions))");
            out
        }
    }
}

/// Parse a stored record back into its editable inputs.
pub fn parse_record(text: &str) -> Result<Record, RecordError> {
    let mut sections = Vec::with_capacity(SECTIONS.len());
    let mut rest = text;

    for (i, header) in SECTIONS.iter().enumerate() {
        let with_newline = format!("{header}\n");
        if i == 0 {
            rest = rest
                .strip_prefix(&with_newline)
                .ok_or(RecordError::MissingSection(header))?;
        } else {
            let marker = format!("\n{with_newline}");
            let at = rest
                .find(&marker)
                .ok_or(RecordError::MissingSection(header))?;
            sections.push(&rest[..at]);
            rest = &rest[at + marker.len()..];
        }
    }
    // Final section: strip the terminating newline.
    sections.push(rest.strip_suffix('\n').unwrap_or(rest));

    let meta = sections[0];
    let mut description = None;
    let mut kind = None;
    for line in meta.lines() {
        if let Some(value) = line.strip_prefix("description=") {
            description = Some(value.to_owned());
        } else if let Some(value) = line.strip_prefix("kind=") {
            kind = Some(
                UnitKind::from_name(value).ok_or_else(|| RecordError::UnknownKind(value.to_owned()))?,
            );
        }
    }

    Ok(Record {
        description: description.ok_or(RecordError::MissingMeta("description"))?,
        kind: kind.ok_or(RecordError::MissingMeta("kind"))?,
        source: sections[1].as_bytes().to_vec(),
    })
}

/// Outcome of verifying one stored record.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Verified {
    /// Stored record matches re-derivation byte-for-byte.
    Match,
    /// Stored and re-derived records differ.
    Mismatch { expected: String },
}

/// Re-derive a stored record from its SOURCE and compare byte-for-byte.
pub fn verify(stored: &str) -> Result<Verified, RecordError> {
    let record = parse_record(stored)?;
    let expected = render_record(&record.description, record.kind, &record.source);
    if expected == stored {
        Ok(Verified::Match)
    } else {
        Ok(Verified::Mismatch { expected })
    }
}

/// Result of verifying a directory of records.
pub struct DirReport {
    pub checked: usize,
    pub failures: Vec<(PathBuf, String)>,
}

/// Verify every `.fernsnap` record under a directory.
///
/// Units are independent, so records verify in parallel; there is no
/// cross-unit state to coordinate.
pub fn verify_dir(dir: &Path) -> std::io::Result<DirReport> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|e| e == "fernsnap") {
            paths.push(path);
        }
    }
    paths.sort();

    let failures: Vec<(PathBuf, String)> = paths
        .par_iter()
        .filter_map(|path| {
            let stored = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) => return Some((path.clone(), format!("read failed: {err}"))),
            };
            match verify(&stored) {
                Ok(Verified::Match) => None,
                Ok(Verified::Mismatch { .. }) => {
                    Some((path.clone(), "record does not match re-derivation".to_owned()))
                }
                Err(err) => Some((path.clone(), err.to_string())),
            }
        })
        .collect();

    Ok(DirReport {
        checked: paths.len(),
        failures,
    })
}

#[cfg(test)]
mod tests;
