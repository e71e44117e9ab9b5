use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &[u8]) -> Vec<&'static str> {
    let interner = StringInterner::new();
    let result = lex(source, &interner);
    result
        .tokens
        .iter()
        .map(|t| t.kind.display_name())
        .collect()
}

#[test]
fn single_digit() {
    let interner = StringInterner::new();
    let result = lex(b"0", &interner);
    assert_eq!(result.tokens.len(), 2);
    let tok = result.tokens[0];
    match tok.kind {
        TokenKind::Int(name) => assert_eq!(interner.lookup(name), "0"),
        other => panic!("expected Int, got {other:?}"),
    }
    assert_eq!(tok.span, Span::new(0, 1));
    assert_eq!(result.tokens[1].kind, TokenKind::EndOfFile);
    assert_eq!(result.tokens[1].span, Span::new(1, 1));
    assert!(result.diagnostics.is_empty());
}

#[test]
fn empty_input_is_just_eof() {
    assert_eq!(kinds(b""), vec!["EndOfFile"]);
}

#[test]
fn minus_between_digits_is_an_operator_token() {
    assert_eq!(kinds(b"1-2"), vec!["Int", "OpMinus", "Int", "EndOfFile"]);
}

#[test]
fn arrow_wins_over_minus() {
    assert_eq!(kinds(b"->-"), vec!["OpArrow", "OpMinus", "EndOfFile"]);
}

#[test]
fn identifiers_are_classified_by_leading_case() {
    assert_eq!(
        kinds(b"foo Bar _x"),
        vec!["LowerIdent", "UpperIdent", "LowerIdent", "EndOfFile"]
    );
}

#[test]
fn newlines_are_emitted_not_skipped() {
    assert_eq!(
        kinds(b"a\nb"),
        vec!["LowerIdent", "Newline", "LowerIdent", "EndOfFile"]
    );
}

#[test]
fn comments_are_skipped_to_end_of_line() {
    assert_eq!(
        kinds(b"1 # two three\n2"),
        vec!["Int", "Newline", "Int", "EndOfFile"]
    );
}

#[test]
fn underscored_literal_keeps_raw_text() {
    let interner = StringInterner::new();
    let result = lex(b"1_000", &interner);
    match result.tokens[0].kind {
        TokenKind::Int(name) => assert_eq!(interner.lookup(name), "1_000"),
        other => panic!("expected Int, got {other:?}"),
    }
}

#[test]
fn unknown_bytes_become_one_merged_token() {
    let interner = StringInterner::new();
    let result = lex(b"1 @@@ 2", &interner);
    let names: Vec<&str> = result.tokens.iter().map(|t| t.kind.display_name()).collect();
    assert_eq!(names, vec!["Int", "Unknown", "Int", "EndOfFile"]);
    assert_eq!(result.tokens[1].span, Span::new(2, 5));
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].category, Category::UnknownToken);
}

#[test]
fn invalid_utf8_lexes_to_unknown() {
    let interner = StringInterner::new();
    let result = lex(&[0xFF, 0xFE, b'1'], &interner);
    let names: Vec<&str> = result.tokens.iter().map(|t| t.kind.display_name()).collect();
    assert_eq!(names, vec!["Unknown", "Int", "EndOfFile"]);
}

#[test]
fn separated_unknown_runs_stay_separate() {
    let interner = StringInterner::new();
    let result = lex(b"@ @", &interner);
    let names: Vec<&str> = result.tokens.iter().map(|t| t.kind.display_name()).collect();
    assert_eq!(names, vec!["Unknown", "Unknown", "EndOfFile"]);
    assert_eq!(result.diagnostics.len(), 2);
}

#[test]
fn scenario_tokens_for_malformed_unit() {
    // ((1#\n)Q a:t\nn)
    let source = b"((1#\n)Q a:t\nn)";
    assert_eq!(
        kinds(source),
        vec![
            "OpenRound",
            "OpenRound",
            "Int",
            "Newline",
            "CloseRound",
            "UpperIdent",
            "LowerIdent",
            "OpColon",
            "LowerIdent",
            "Newline",
            "LowerIdent",
            "CloseRound",
            "EndOfFile",
        ]
    );
}

proptest! {
    /// Tokenizer totality: any byte sequence terminates with exactly one
    /// trailing EndOfFile token.
    #[test]
    fn total_on_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let interner = StringInterner::new();
        let result = lex(&bytes, &interner);
        prop_assert!(!result.tokens.is_empty());
        let eof_count = result
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::EndOfFile)
            .count();
        prop_assert_eq!(eof_count, 1);
        match result.tokens.eof() {
            Some(last) => prop_assert_eq!(last.kind, TokenKind::EndOfFile),
            None => prop_assert!(false, "token list cannot be empty"),
        }
    }

    /// Token spans are in order and within bounds.
    #[test]
    fn spans_are_ordered(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let interner = StringInterner::new();
        let result = lex(&bytes, &interner);
        let mut prev_end = 0u32;
        for token in &result.tokens {
            prop_assert!(token.span.start >= prev_end);
            prop_assert!(token.span.end >= token.span.start);
            prop_assert!(token.span.end as usize <= bytes.len());
            prev_end = token.span.end;
        }
    }
}
