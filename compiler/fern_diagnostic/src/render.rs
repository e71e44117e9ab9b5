//! PROBLEMS section rendering.
//!
//! One block per diagnostic, blocks separated by a blank line, `NIL` when
//! there are none. Parse-error blocks quote the offending source line with a
//! caret under the offending column. Output is deterministic byte-for-byte.

use crate::{Category, Diagnostic, LineIndex};

/// Sentinel rendered when a unit has no diagnostics.
pub const NO_PROBLEMS: &str = "NIL";

/// Render the PROBLEMS section for one unit.
pub fn render_problems(diagnostics: &[Diagnostic], source: &[u8], index: &LineIndex) -> String {
    if diagnostics.is_empty() {
        return NO_PROBLEMS.to_owned();
    }

    let mut out = String::new();
    for (i, diag) in diagnostics.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_block(diag, source, index, &mut out);
    }
    out
}

fn render_block(diag: &Diagnostic, source: &[u8], index: &LineIndex, out: &mut String) {
    out.push_str(diag.category.label());
    out.push('\n');
    if diag.category == Category::ParseError {
        if let Some(code) = diag.code {
            out.push_str(code);
            out.push('\n');
        }
    }
    out.push_str(&diag.message);
    out.push('\n');
    if diag.category == Category::ParseError {
        render_excerpt(diag, source, index, out);
    }
}

/// Quote the line the span starts on, with a caret run under the span.
fn render_excerpt(diag: &Diagnostic, source: &[u8], index: &LineIndex, out: &mut String) {
    let start = index.position(diag.span.start);
    let Some(range) = index.line_range(start.line) else {
        return;
    };
    let line_text = String::from_utf8_lossy(&source[range.clone()]);
    let prefix = format!("{}| ", start.line);
    out.push_str(&prefix);
    out.push_str(&line_text);
    out.push('\n');

    // Caret run: clamp the span to the quoted line, always at least one.
    let line_end = u32::try_from(range.end).unwrap_or(u32::MAX);
    let span_end = diag.span.end.min(line_end).max(diag.span.start + 1);
    let width = (span_end - diag.span.start) as usize;
    for _ in 0..prefix.len() + (start.column as usize - 1) {
        out.push(' ');
    }
    for _ in 0..width {
        out.push('^');
    }
    out.push('\n');
}
