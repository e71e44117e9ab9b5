use super::*;
use pretty_assertions::assert_eq;

const ZERO_RECORD: &str = "\
# META
description=Zero literal
kind=expr
# SOURCE
0
# PROBLEMS
NIL
# TOKENS
Int(1:1-1:2), EndOfFile(1:2-1:2)
# PARSE
(e-int @1.1-1.2 (raw \"0\"))
# FORMATTED
NO CHANGE
# CANONICALIZE
(e-int @1.1-1.2 (value \"0\"))
# TYPES
(expr @1.1-1.2 (type \"Num(*)\"))
";

const MINUS_RECORD: &str = "\
# META
description=Binary minus without spaces
kind=expr
# SOURCE
1-2
# PROBLEMS
NIL
# TOKENS
Int(1:1-1:2), OpMinus(1:2-1:3), Int(1:3-1:4), EndOfFile(1:4-1:4)
# PARSE
(e-binop @1.1-1.4 (op \"-\") (e-int @1.1-1.2 (raw \"1\")) (e-int @1.3-1.4 (raw \"2\")))
# FORMATTED
1 - 2
# CANONICALIZE
(e-binop @1.1-1.4 (op \"sub\") (e-int @1.1-1.2 (value \"1\")) (e-int @1.3-1.4 (value \"2\")))
# TYPES
(expr @1.1-1.4 (type \"*\"))
";

const UNBOUND_RECORD: &str = "\
# META
description=Unbound lowercase identifier
kind=expr
# SOURCE
iffy
# PROBLEMS
UNDEFINED VARIABLE
Nothing is named `iffy` in this scope.
Is there an `import` or `exposing` missing up-top?

# TOKENS
LowerIdent(1:1-1:5), EndOfFile(1:5-1:5)
# PARSE
(e-ident @1.1-1.5 (raw \"iffy\"))
# FORMATTED
NO CHANGE
# CANONICALIZE
(e-runtime-error @1.1-1.5 (tag \"ident_not_in_scope\"))
# TYPES
(expr @1.1-1.5 (type \"Error\"))
";

const MALFORMED_RECORD: &str = "\
# META
description=Unbalanced parens with junk
kind=expr
# SOURCE
((1#
)Q a:t
n)
# PROBLEMS
PARSE ERROR
expected_expr_close_round_or_comma
Expected a closing parenthesis or a comma here.
2| )Q a:t
    ^

# TOKENS
OpenRound(1:1-1:2), OpenRound(1:2-1:3), Int(1:3-1:4), Newline(1:5-2:1), CloseRound(2:1-2:2), UpperIdent(2:2-2:3), LowerIdent(2:4-2:5), OpColon(2:5-2:6), LowerIdent(2:6-2:7), Newline(2:7-3:1), LowerIdent(3:1-3:2), CloseRound(3:2-3:3), EndOfFile(3:3-3:3)
# PARSE
(e-malformed @2.2-2.3 (reason \"expected_expr_close_round_or_comma\"))
# FORMATTED
Q
# CANONICALIZE
(can-ir (empty true))
# TYPES
(inferred-types (defs) (expressions))
";

const FILE_RECORD: &str = "\
# META
description=Two definitions
kind=file
# SOURCE
one = 1
two = one + 1

# PROBLEMS
NIL
# TOKENS
LowerIdent(1:1-1:4), OpAssign(1:5-1:6), Int(1:7-1:8), Newline(1:8-2:1), LowerIdent(2:1-2:4), OpAssign(2:5-2:6), LowerIdent(2:7-2:10), OpPlus(2:11-2:12), Int(2:13-2:14), Newline(2:14-3:1), EndOfFile(3:1-3:1)
# PARSE
(file (def @1.1-1.8 (name \"one\") (e-int @1.7-1.8 (raw \"1\"))) (def @2.1-2.14 (name \"two\") (e-binop @2.7-2.14 (op \"+\") (e-ident @2.7-2.10 (raw \"one\")) (e-int @2.13-2.14 (raw \"1\")))))
# FORMATTED
NO CHANGE
# CANONICALIZE
(can-ir (def @1.1-1.8 (name \"one\") (e-int @1.7-1.8 (value \"1\"))) (def @2.1-2.14 (name \"two\") (e-binop @2.7-2.14 (op \"add\") (e-lookup @2.7-2.10 (name \"one\")) (e-int @2.13-2.14 (value \"1\")))))
# TYPES
(inferred-types (defs (def \"one\" (type \"Num(*)\")) (def \"two\" (type \"*\"))) (expressions))
";

#[test]
fn zero_scenario_renders_exactly() {
    let rendered = render_record("Zero literal", UnitKind::Expr, b"0");
    assert_eq!(rendered, ZERO_RECORD);
}

#[test]
fn binary_minus_scenario_renders_exactly() {
    let rendered = render_record("Binary minus without spaces", UnitKind::Expr, b"1-2");
    assert_eq!(rendered, MINUS_RECORD);
}

#[test]
fn unbound_ident_scenario_renders_exactly() {
    let rendered = render_record("Unbound lowercase identifier", UnitKind::Expr, b"iffy");
    assert_eq!(rendered, UNBOUND_RECORD);
}

#[test]
fn malformed_scenario_renders_exactly() {
    let rendered = render_record(
        "Unbalanced parens with junk",
        UnitKind::Expr,
        b"((1#\n)Q a:t\nn)",
    );
    assert_eq!(rendered, MALFORMED_RECORD);
}

#[test]
fn file_scenario_renders_exactly() {
    let rendered = render_record("Two definitions", UnitKind::File, b"one = 1\ntwo = one + 1\n");
    assert_eq!(rendered, FILE_RECORD);
}

#[test]
fn stored_records_verify_as_match() {
    for stored in [
        ZERO_RECORD,
        MINUS_RECORD,
        UNBOUND_RECORD,
        MALFORMED_RECORD,
        FILE_RECORD,
    ] {
        assert_eq!(verify(stored), Ok(Verified::Match));
    }
}

#[test]
fn parse_record_recovers_the_inputs() {
    let record = parse_record(ZERO_RECORD).expect("parse");
    assert_eq!(
        record,
        Record {
            description: "Zero literal".to_owned(),
            kind: UnitKind::Expr,
            source: b"0".to_vec(),
        }
    );
    // A trailing source newline survives the round trip.
    let record = parse_record(FILE_RECORD).expect("parse");
    assert_eq!(record.source, b"one = 1\ntwo = one + 1\n".to_vec());
}

#[test]
fn stale_record_is_a_mismatch() {
    let stale = ZERO_RECORD.replace("Num(*)", "Int");
    match verify(&stale) {
        Ok(Verified::Mismatch { expected }) => assert_eq!(expected, ZERO_RECORD),
        other => panic!("expected mismatch, got {other:?}"),
    }
}

#[test]
fn missing_section_is_an_error() {
    let truncated = ZERO_RECORD.replace("# TOKENS\n", "");
    assert_eq!(
        parse_record(&truncated),
        Err(RecordError::MissingSection("# TOKENS"))
    );
}

#[test]
fn unknown_kind_is_an_error() {
    let bad = ZERO_RECORD.replace("kind=expr", "kind=module");
    assert_eq!(
        parse_record(&bad),
        Err(RecordError::UnknownKind("module".to_owned()))
    );
}

#[test]
fn verify_dir_reports_stale_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("zero.fernsnap"), ZERO_RECORD).expect("write");
    let stale = ZERO_RECORD.replace("Num(*)", "Int");
    std::fs::write(dir.path().join("stale.fernsnap"), stale).expect("write");
    std::fs::write(dir.path().join("ignored.txt"), "not a record").expect("write");

    let report = verify_dir(dir.path()).expect("verify dir");
    assert_eq!(report.checked, 2);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].0.ends_with("stale.fernsnap"));
}
