use super::*;
use fern_diagnostic::LineIndex;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn parse_expr_sexpr(source: &str) -> (String, Vec<Diagnostic>) {
    let interner = StringInterner::new();
    let lexed = fern_lexer::lex(source.as_bytes(), &interner);
    let result = parse_expr_unit(&lexed.tokens, &interner);
    let index = LineIndex::new(source.as_bytes());
    let rendered = render::render_parse(&result.arena, &result.unit, &interner, &index);
    (rendered, result.diagnostics)
}

fn parse_file_sexpr(source: &str) -> (String, Vec<Diagnostic>) {
    let interner = StringInterner::new();
    let lexed = fern_lexer::lex(source.as_bytes(), &interner);
    let result = parse_file_unit(&lexed.tokens, &interner);
    let index = LineIndex::new(source.as_bytes());
    let rendered = render::render_parse(&result.arena, &result.unit, &interner, &index);
    (rendered, result.diagnostics)
}

#[test]
fn int_literal() {
    let (sexpr, diags) = parse_expr_sexpr("0");
    assert_eq!(sexpr, "(e-int @1.1-1.2 (raw \"0\"))");
    assert!(diags.is_empty());
}

#[test]
fn binary_minus_without_spaces() {
    let (sexpr, diags) = parse_expr_sexpr("1-2");
    assert_eq!(
        sexpr,
        "(e-binop @1.1-1.4 (op \"-\") (e-int @1.1-1.2 (raw \"1\")) (e-int @1.3-1.4 (raw \"2\")))"
    );
    assert!(diags.is_empty());
}

#[test]
fn infix_minus_is_binary_even_when_attached_to_operand() {
    // `1 -2`: infix position, so binary regardless of spacing.
    let (sexpr, diags) = parse_expr_sexpr("1 -2");
    assert_eq!(
        sexpr,
        "(e-binop @1.1-1.5 (op \"-\") (e-int @1.1-1.2 (raw \"1\")) (e-int @1.4-1.5 (raw \"2\")))"
    );
    assert!(diags.is_empty());
}

#[test]
fn prefix_minus_is_unary() {
    let (sexpr, diags) = parse_expr_sexpr("-2");
    assert_eq!(
        sexpr,
        "(e-unary @1.1-1.3 (op \"-\") (e-int @1.2-1.3 (raw \"2\")))"
    );
    assert!(diags.is_empty());
}

#[test]
fn precedence_mul_binds_tighter() {
    let (sexpr, _) = parse_expr_sexpr("1+2*3");
    assert_eq!(
        sexpr,
        "(e-binop @1.1-1.6 (op \"+\") (e-int @1.1-1.2 (raw \"1\")) \
         (e-binop @1.3-1.6 (op \"*\") (e-int @1.3-1.4 (raw \"2\")) (e-int @1.5-1.6 (raw \"3\"))))"
    );
}

#[test]
fn additive_is_left_associative() {
    let (sexpr, _) = parse_expr_sexpr("1-2-3");
    assert_eq!(
        sexpr,
        "(e-binop @1.1-1.6 (op \"-\") \
         (e-binop @1.1-1.4 (op \"-\") (e-int @1.1-1.2 (raw \"1\")) (e-int @1.3-1.4 (raw \"2\"))) \
         (e-int @1.5-1.6 (raw \"3\")))"
    );
}

#[test]
fn parens_group_without_a_node() {
    let (sexpr, _) = parse_expr_sexpr("(1+2)*3");
    assert_eq!(
        sexpr,
        "(e-binop @1.2-1.8 (op \"*\") \
         (e-binop @1.2-1.5 (op \"+\") (e-int @1.2-1.3 (raw \"1\")) (e-int @1.4-1.5 (raw \"2\"))) \
         (e-int @1.7-1.8 (raw \"3\")))"
    );
}

#[test]
fn tuple_with_two_elements() {
    let (sexpr, diags) = parse_expr_sexpr("(1, 2)");
    assert_eq!(
        sexpr,
        "(e-tuple @1.1-1.7 (e-int @1.2-1.3 (raw \"1\")) (e-int @1.5-1.6 (raw \"2\")))"
    );
    assert!(diags.is_empty());
}

#[test]
fn lambda_with_two_params() {
    let (sexpr, diags) = parse_expr_sexpr("\\x, y -> x");
    assert_eq!(
        sexpr,
        "(e-lambda @1.1-1.11 (params (p-ident @1.2-1.3 (raw \"x\")) (p-ident @1.5-1.6 (raw \"y\"))) \
         (e-ident @1.10-1.11 (raw \"x\")))"
    );
    assert!(diags.is_empty());
}

#[test]
fn call_with_args() {
    let (sexpr, diags) = parse_expr_sexpr("f(1, x)");
    assert_eq!(
        sexpr,
        "(e-call @1.1-1.8 (e-ident @1.1-1.2 (raw \"f\")) (e-int @1.3-1.4 (raw \"1\")) \
         (e-ident @1.6-1.7 (raw \"x\")))"
    );
    assert!(diags.is_empty());
}

#[test]
fn unclosed_group_recovers_with_reason() {
    let (sexpr, diags) = parse_expr_sexpr("(1 x");
    assert_eq!(sexpr, "(e-malformed @1.4-1.5 (reason \"expected_expr_close_round_or_comma\"))");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, Some("expected_expr_close_round_or_comma"));
}

#[test]
fn scenario_malformed_unit_has_exactly_one_diagnostic() {
    let source = "((1#\n)Q a:t\nn)";
    let (sexpr, diags) = parse_expr_sexpr(source);
    // The `Q` on line 2 cannot follow the parsed group `(1)`.
    assert_eq!(
        sexpr,
        "(e-malformed @2.2-2.3 (reason \"expected_expr_close_round_or_comma\"))"
    );
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, Some("expected_expr_close_round_or_comma"));
    assert_eq!(diags[0].category, fern_diagnostic::Category::ParseError);
}

#[test]
fn empty_input_yields_single_malformed_root() {
    let (sexpr, diags) = parse_expr_sexpr("");
    assert_eq!(sexpr, "(e-malformed @1.1-1.1 (reason \"expected_expr\"))");
    assert_eq!(diags.len(), 1);
}

#[test]
fn trailing_tokens_after_clean_root_get_one_diagnostic() {
    let (sexpr, diags) = parse_expr_sexpr("1 2");
    assert_eq!(sexpr, "(e-int @1.1-1.2 (raw \"1\"))");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, Some("expr_unexpected_token"));
}

#[test]
fn lambda_missing_arrow() {
    let (sexpr, diags) = parse_expr_sexpr("\\x 1");
    assert_eq!(sexpr, "(e-malformed @1.4-1.5 (reason \"expected_arrow\"))");
    assert_eq!(diags.len(), 1);
}

#[test]
fn file_unit_with_two_defs() {
    let (sexpr, diags) = parse_file_sexpr("one = 1\ntwo = one + 1\n");
    assert_eq!(
        sexpr,
        "(file (def @1.1-1.8 (name \"one\") (e-int @1.7-1.8 (raw \"1\"))) \
         (def @2.1-2.14 (name \"two\") (e-binop @2.7-2.14 (op \"+\") \
         (e-ident @2.7-2.10 (raw \"one\")) (e-int @2.13-2.14 (raw \"1\")))))"
    );
    assert!(diags.is_empty());
}

#[test]
fn file_recovers_at_definition_boundary() {
    let (sexpr, diags) = parse_file_sexpr("1bad\ntwo = 2\n");
    // `1bad` lexes as Int then LowerIdent; a def must start with a name.
    assert!(sexpr.contains("(reason \"expected_def_name\")"));
    assert!(sexpr.contains("(def @2.1-2.8 (name \"two\")"));
    assert_eq!(diags.len(), 1);
}

#[test]
fn file_missing_equals() {
    let (sexpr, diags) = parse_file_sexpr("one 1\ntwo = 2\n");
    assert!(sexpr.contains("(reason \"expected_def_equals\")"));
    assert!(sexpr.contains("(name \"two\")"));
    assert_eq!(diags.len(), 1);
}

#[test]
fn empty_file_parses_to_empty_item_list() {
    let (sexpr, diags) = parse_file_sexpr("\n\n");
    assert_eq!(sexpr, "(file)");
    assert!(diags.is_empty());
}

fn count_roots(unit: &ParsedUnit) -> usize {
    match unit {
        ParsedUnit::Expr(_) => 1,
        ParsedUnit::File(_) => 1,
    }
}

proptest! {
    /// Parser totality: any byte soup terminates and yields exactly one
    /// root, never fewer or more, and never panics.
    #[test]
    fn total_on_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let interner = StringInterner::new();
        let lexed = fern_lexer::lex(&bytes, &interner);
        let result = parse_expr_unit(&lexed.tokens, &interner);
        prop_assert_eq!(count_roots(&result.unit), 1);
        prop_assert!(result.arena.len() >= 1);
    }

    /// Same input, same output: parsing is deterministic.
    #[test]
    fn deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let render = |bytes: &[u8]| {
            let interner = StringInterner::new();
            let lexed = fern_lexer::lex(bytes, &interner);
            let result = parse_expr_unit(&lexed.tokens, &interner);
            let index = LineIndex::new(bytes);
            let sexpr = render::render_parse(&result.arena, &result.unit, &interner, &index);
            let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code).collect();
            (sexpr, codes)
        };
        prop_assert_eq!(render(&bytes), render(&bytes));
    }
}
