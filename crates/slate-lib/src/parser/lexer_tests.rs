use slate_core::Source;

use super::lexer::{Lexer, TokenKind, tokenize};

/// One `Kind "text"` line per token, or the error text if lexing fails.
fn snapshot(input: &str) -> String {
    let source = Source::anonymous(input);
    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(err) => return err.to_string(),
    };
    let mut out = String::new();
    for token in tokens {
        let text = token
            .kind
            .text()
            .or_else(|| source.slice(token.span))
            .unwrap_or_default();
        out.push_str(&format!("{} {:?}\n", token.kind.name(), text));
    }
    out
}

#[test]
fn punctuation() {
    insta::assert_snapshot!(snapshot("= [ ] { } $ , ~"), @r#"
    Assign "="
    LeftBracket "["
    RightBracket "]"
    LeftBrace "{"
    RightBrace "}"
    Dollar "$"
    Comma ","
    Tilde "~"
    Eof ""
    "#);
}

#[test]
fn naked_strings_keep_inner_spaces() {
    insta::assert_snapshot!(snapshot("key = some value here  # trailing"), @r#"
    EscapedString "key"
    Assign "="
    EscapedString "some value here"
    Eof ""
    "#);
}

#[test]
fn naked_strings_stop_at_punctuation() {
    insta::assert_snapshot!(snapshot("a=b,c~d"), @r#"
    EscapedString "a"
    Assign "="
    EscapedString "b"
    Comma ","
    EscapedString "c"
    Tilde "~"
    EscapedString "d"
    Eof ""
    "#);
}

#[test]
fn newline_separates_naked_strings() {
    insta::assert_snapshot!(snapshot("a = b\nc = d"), @r#"
    EscapedString "a"
    Assign "="
    EscapedString "b"
    EscapedString "c"
    Assign "="
    EscapedString "d"
    Eof ""
    "#);
}

#[test]
fn backslash_escapes_next_char() {
    insta::assert_snapshot!(snapshot(r"path\ with\ spaces\=x"), @r#"
    EscapedString "path\\ with\\ spaces\\=x"
    Eof ""
    "#);
}

#[test]
fn quoted_strings() {
    insta::assert_snapshot!(snapshot(r#""hello world" "with = sign" """#), @r#"
    EscapedString "hello world"
    EscapedString "with = sign"
    EscapedString ""
    Eof ""
    "#);
}

#[test]
fn raw_strings() {
    insta::assert_snapshot!(snapshot(r#"{{"raw "quoted" \n"}} {{{"a"}}b"}}}"#), @r#"
    RawString "raw \"quoted\" \\n"
    RawString "a\"}}b"
    Eof ""
    "#);
}

#[test]
fn double_brace_without_quote_is_two_braces() {
    insta::assert_snapshot!(snapshot("{{a = b}}"), @r#"
    LeftBrace "{"
    LeftBrace "{"
    EscapedString "a"
    Assign "="
    EscapedString "b"
    RightBrace "}"
    RightBrace "}"
    Eof ""
    "#);
}

#[test]
fn comments_are_skipped() {
    insta::assert_snapshot!(snapshot("# whole line\na = b # trailing\n#"), @r#"
    EscapedString "a"
    Assign "="
    EscapedString "b"
    Eof ""
    "#);
}

#[test]
fn non_ascii_naked_strings() {
    insta::assert_snapshot!(snapshot("ключ = значение"), @r#"
    EscapedString "ключ"
    Assign "="
    EscapedString "значение"
    Eof ""
    "#);
}

#[test]
fn empty_input() {
    insta::assert_snapshot!(snapshot(""), @r#"Eof """#);
    insta::assert_snapshot!(snapshot("  \n\t# only a comment"), @r#"Eof """#);
}

#[test]
fn unterminated_quoted() {
    insta::assert_snapshot!(snapshot(r#"a = "abc"#), @"<string>:1:5: error: Unterminated quoted string literal");
}

#[test]
fn unterminated_raw() {
    insta::assert_snapshot!(snapshot(r#"x = {{"abc"}"#), @"<string>:1:5: error: Unterminated raw string literal");
}

#[test]
fn eof_inside_escape() {
    insta::assert_snapshot!(snapshot(r"a = b\"), @"<string>:1:6: error: Unexpected EOF while parsing escape in string literal");
}

#[test]
fn invalid_escape() {
    insta::assert_snapshot!(snapshot(r"a = b\q"), @"<string>:1:6: error: Invalid escape sequence");
}

#[test]
fn invalid_unicode_escape() {
    insta::assert_snapshot!(snapshot(r#""\u12""#), @"<string>:1:2: error: Invalid unicode escape");
}

#[test]
fn error_location_on_later_line() {
    insta::assert_snapshot!(snapshot("a = b\nc = \"oops"), @"<string>:2:5: error: Unterminated quoted string literal");
}

#[test]
fn lookahead_and_eof_repeat() {
    let source = Source::anonymous("a = b");
    let mut lexer = Lexer::new(&source);

    assert_eq!(lexer.cur_token().unwrap().kind, TokenKind::EscapedString("a"));
    assert_eq!(lexer.peek().unwrap().kind, TokenKind::Assign);

    assert_eq!(lexer.next().unwrap().kind, TokenKind::Assign);
    assert_eq!(lexer.peek().unwrap().kind, TokenKind::EscapedString("b"));
    assert_eq!(lexer.next().unwrap().kind, TokenKind::EscapedString("b"));
    assert_eq!(lexer.peek().unwrap().kind, TokenKind::Eof);

    for _ in 0..3 {
        let eof = lexer.next().unwrap();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.span.start(), 5);
        assert_eq!(lexer.peek().unwrap().kind, TokenKind::Eof);
    }
}

#[test]
fn errors_are_sticky() {
    let source = Source::anonymous("a \"b");
    let mut lexer = Lexer::new(&source);

    assert!(lexer.cur_token().is_ok());
    assert!(lexer.peek().is_err());

    let first = lexer.next().unwrap_err();
    let second = lexer.next().unwrap_err();
    assert_eq!(first, second);
    assert_eq!(lexer.cur_token().unwrap_err(), first);
}

#[test]
fn reset_restarts_from_beginning() {
    let source = Source::anonymous("x = [y]");
    let mut lexer = Lexer::new(&source);
    lexer.next().unwrap();
    lexer.next().unwrap();

    lexer.reset();
    assert_eq!(lexer.cur_token().unwrap().kind, TokenKind::EscapedString("x"));
    assert!(std::ptr::eq(lexer.get_source(), &source));
}

#[test]
fn string_tokens_borrow_from_source() {
    let text = String::from(r#"name = "quoted" ~ {{"raw"}}"#);
    let source = Source::anonymous(&text);
    let range = text.as_bytes().as_ptr_range();

    for token in tokenize(&source).unwrap() {
        if let Some(slice) = token.kind.text() {
            assert!(range.contains(&slice.as_ptr()), "{slice:?} was copied");
        }
    }
}

#[test]
fn spans_cover_token_text() {
    let source = Source::anonymous(r#"k = "v""#);
    let tokens = tokenize(&source).unwrap();

    assert_eq!(source.slice(tokens[0].span), Some("k"));
    assert_eq!(source.slice(tokens[1].span), Some("="));
    assert_eq!(source.slice(tokens[2].span), Some(r#""v""#));
}
