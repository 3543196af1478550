use lisp_list::{
    build_tree, coerce, count_tokens, parse, tokenize, Error, ParsedValue, PrintOptions, Span,
    TokenKind, ValueKind,
};
use serde_json::json;

#[test]
fn test_single_atom_list_spans() {
    let tokens = tokenize("(asdf)").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind(), TokenKind::List);
    assert_eq!(tokens[0].span(), Span::new(0, 6));
    assert_eq!(tokens[1].kind(), TokenKind::UnquotedString);
    assert_eq!(tokens[1].span(), Span::new(1, 5));

    let root = build_tree(&tokens).unwrap();
    assert_eq!(root.count(), Some(1));
    let list = &root[0];
    assert_eq!(list.count(), Some(1));
    assert_eq!(list[0].text(), "asdf");
}

#[test]
fn test_nested_list_without_separators() {
    let root = parse("(a(b c)d)").unwrap().unwrap();
    let list = &root[0];
    assert_eq!(list.count(), Some(3));

    assert!(list[0].is_scalar());
    assert_eq!(list[0].span(), Span::new(1, 2));
    assert_eq!(list[0].text(), "a");

    assert!(list[1].is_list());
    assert_eq!(list[1].span(), Span::new(2, 7));
    assert_eq!(list[1][0].span(), Span::new(3, 4));
    assert_eq!(list[1][1].span(), Span::new(5, 6));
    assert_eq!(list[1][0].text(), "b");
    assert_eq!(list[1][1].text(), "c");

    assert_eq!(list[2].span(), Span::new(7, 8));
    assert_eq!(list[2].text(), "d");
}

#[test]
fn test_whitespace_and_control_only_is_absent() {
    for src in ["", " ", "\t\r\n", "\u{0}\u{1f} ", "\u{b}\u{c}"] {
        assert!(parse(src).unwrap().is_none(), "{src:?}");
    }
    assert_eq!(tokenize("").unwrap().len(), 0);
    assert_eq!(count_tokens("   ").unwrap(), 1);
}

#[test]
fn test_syntax_errors() {
    assert_eq!(parse("\"").unwrap_err(), Error::UnterminatedString);
    assert_eq!(parse("(").unwrap_err(), Error::UnmatchedBracket);
    assert_eq!(parse(")").unwrap_err(), Error::UnmatchedBracket);
    assert_eq!(parse("(a))(").unwrap_err(), Error::UnmatchedBracket);
    assert_eq!(parse("(a \\ b)").unwrap_err(), Error::EscapeOutsideString);
    assert_eq!(
        parse("(ab\"c\")").unwrap_err(),
        Error::IllegalCharInAtom { ch: '"' }
    );
    assert_eq!(
        parse("(ab\\c)").unwrap_err(),
        Error::IllegalCharInAtom { ch: '\\' }
    );
}

#[test]
fn test_brackets_inside_quotes_do_not_count() {
    let root = parse(r#"("(" ")" "\"(")"#).unwrap().unwrap();
    let texts: Vec<_> = root[0].iter().map(|n| n.text()).collect();
    assert_eq!(texts, ["(", ")", "\"("]);
}

#[test]
fn test_coercion_order() {
    assert_eq!(coerce("18446744073709551615"), ParsedValue::UInt(u64::MAX));
    assert_eq!(coerce("-5"), ParsedValue::Int(-5));
    assert_eq!(coerce("1.5"), ParsedValue::Float(1.5));
    assert_eq!(coerce("true"), ParsedValue::Bool(true));
    assert_eq!(coerce("false"), ParsedValue::Bool(false));
    assert_eq!(coerce("yes").kind(), ValueKind::Str);
}

#[test]
fn test_lookup() {
    let root = parse("(k1 v1 k2 v2)").unwrap().unwrap();
    assert_eq!(root[0].get("k2").map(|n| n.text()), Some("v2"));
    assert_eq!(root[0].get("k1").map(|n| n.span()), Some(Span::new(4, 6)));

    let odd = parse("(k1 v1 k2)").unwrap().unwrap();
    assert!(odd[0].get("k1").is_none());

    // A list in a key position voids the lookup, even after a match.
    let bad = parse("(k1 v1 (k2) v2)").unwrap().unwrap();
    assert!(bad[0].get("k1").is_none());
    assert!(bad[0].entries().is_none());

    let dup = parse("(k a k b)").unwrap().unwrap();
    assert_eq!(dup[0].get("k").map(|n| n.text()), Some("a"));

    let quoted = parse(r#"("my key" 1)"#).unwrap().unwrap();
    assert_eq!(quoted[0].get("my key").map(|n| n.text()), Some("1"));

    let scalar = parse("k").unwrap().unwrap();
    assert!(scalar[0].get("k").is_none());
    assert_eq!(scalar[0].count(), None);
}

#[test]
fn test_child_access() {
    let root = parse("(a b)").unwrap().unwrap();
    assert_eq!(root[0].child(1).map(|n| n.text()), Some("b"));
    assert!(root[0].child(2).is_none());
    assert!(root[0][0].child(0).is_none());
}

#[test]
#[should_panic(expected = "out of range")]
fn test_index_out_of_range_panics() {
    let root = parse("(a b)").unwrap().unwrap();
    let _ = &root[0][5];
}

#[test]
fn test_non_pretty_returns_node_slice() {
    let src = "x  (k1   v1\n(nested  list))  y";
    let root = parse(src).unwrap().unwrap();
    let options = PrintOptions::new();
    assert_eq!(root.to_lisp(&options), src);
    assert_eq!(root[1].to_lisp(&options), "(k1   v1\n(nested  list))");
    assert_eq!(root[1][2].to_lisp(&options), "(nested  list)");
    assert_eq!(root[2].to_lisp(&options), "y");
}

#[test]
fn test_pretty_lisp() {
    let root = parse("(eu tu (nos vos) ele)").unwrap().unwrap();
    assert_eq!(
        root[0].to_lisp(&PrintOptions::pretty()),
        "(eu\n tu\n (nos\n  vos)\n ele)\n"
    );
    assert_eq!(
        root[0].to_lisp(&PrintOptions::pretty().with_indent(2)),
        "(eu\n  tu\n  (nos\n    vos)\n  ele)\n"
    );
}

#[test]
fn test_pretty_document_indents_items() {
    let options = PrintOptions::pretty();
    let flat = parse("a b c").unwrap().unwrap();
    assert_eq!(flat.to_lisp(&options), "a\n b\n c");

    let mixed = parse("a (b c)").unwrap().unwrap();
    assert_eq!(mixed.to_lisp(&options), "a\n (b\n  c)\n");
}

#[test]
fn test_json_is_valid_for_plain_text() {
    let root = parse(r#"(name "Ada Lovelace" (tags math poetry) () 1815)"#)
        .unwrap()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&root[0].to_json()).unwrap();
    assert_eq!(
        json,
        json!(["name", "Ada Lovelace", ["tags", "math", "poetry"], [], "1815"])
    );
}

#[test]
fn test_json_document_is_array_of_items() {
    let root = parse("a (b)").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&root.to_json()).unwrap();
    assert_eq!(json, json!(["a", ["b"]]));
}

#[test]
fn test_json_passes_quoted_text_through() {
    let root = parse(r#""say \"hi\"""#).unwrap().unwrap();
    assert_eq!(root[0].to_json(), r#""say \"hi\"""#);
    let json: serde_json::Value = serde_json::from_str(&root[0].to_json()).unwrap();
    assert_eq!(json, json!("say \"hi\""));
}

#[test]
fn test_unicode_atoms() {
    let root = parse("(héllo 世界 ünïcödé)").unwrap().unwrap();
    let texts: Vec<_> = root[0].iter().map(|n| n.text()).collect();
    assert_eq!(texts, ["héllo", "世界", "ünïcödé"]);
    assert_eq!(root[0][1].span(), Span::new(8, 14));
}
