#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::LexErrorKind;
use pretty_assertions::assert_eq;

fn kinds_and_texts(source: &str) -> Vec<(TokenKind, &str)> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect()
}

fn texts(source: &str) -> Vec<&str> {
    kinds_and_texts(source).into_iter().map(|(_, t)| t).collect()
}

// === Numbers ===

#[test]
fn numbers_zero_and_one() {
    let tokens = tokenize("0 1").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].text, "0");
    assert_eq!(tokens[1].text, "1");
    let lexer = Lexer::new("0 1");
    assert_eq!(
        lexer.location(tokens[1].span.start as usize),
        Location { line: 1, column: 3 }
    );
}

#[test]
fn numbers_exponent() {
    assert_eq!(kinds_and_texts("1e10"), vec![(TokenKind::Number, "1e10")]);
    assert_eq!(texts("2E+3 4e-5"), vec!["2E+3", "4e-5"]);
}

#[test]
fn numbers_split_at_identifier() {
    assert_eq!(
        kinds_and_texts(".1e-2 789f6.543"),
        vec![
            (TokenKind::Number, ".1e-2"),
            (TokenKind::Number, "789"),
            (TokenKind::Identifier, "f6"),
            (TokenKind::Number, ".543"),
        ]
    );
}

#[test]
fn numbers_hex() {
    assert_eq!(
        texts("0x0 0x123456789ABCDEF 0x123456789abcdef"),
        vec!["0x0", "0x123456789ABCDEF", "0x123456789abcdef"]
    );
    assert_eq!(texts("0X1f"), vec!["0X1f"]);
}

#[test]
fn numbers_binary_and_octal() {
    assert_eq!(texts("0b101 0B1"), vec!["0b101", "0B1"]);
    assert_eq!(texts("0777"), vec!["0777"]);
    // Octal runs stop at the first non-octal digit.
    assert_eq!(texts("0778"), vec!["077", "8"]);
    assert_eq!(texts("0b12"), vec!["0b1", "2"]);
}

#[test]
fn numbers_zero_prefixed_decimal() {
    assert_eq!(texts("0.5"), vec!["0.5"]);
    assert_eq!(texts("08"), vec!["08"]);
    assert_eq!(texts("0e3"), vec!["0e3"]);
}

#[test]
fn numbers_incomplete_parts_still_one_token() {
    assert_eq!(texts("5."), vec!["5."]);
    assert_eq!(texts("1e"), vec!["1e"]);
    assert_eq!(texts("1e+"), vec!["1e+"]);
    assert_eq!(texts("0x"), vec!["0x"]);
}

#[test]
fn dot_without_digit_is_symbol() {
    assert_eq!(
        kinds_and_texts("a.b"),
        vec![
            (TokenKind::Identifier, "a"),
            (TokenKind::Symbol, "."),
            (TokenKind::Identifier, "b"),
        ]
    );
}

// === Identifiers ===

#[test]
fn identifiers() {
    assert_eq!(
        kinds_and_texts("$id _x abc123 this"),
        vec![
            (TokenKind::Identifier, "$id"),
            (TokenKind::Identifier, "_x"),
            (TokenKind::Identifier, "abc123"),
            (TokenKind::Identifier, "this"),
        ]
    );
}

#[test]
fn identifiers_are_interned() {
    let tokens = tokenize("foo + foo + bar").unwrap();
    let foo1 = tokens[0].name.as_ref().unwrap();
    let plus1 = tokens[1].name.as_ref().unwrap();
    let foo2 = tokens[2].name.as_ref().unwrap();
    let plus2 = tokens[3].name.as_ref().unwrap();
    let bar = tokens[4].name.as_ref().unwrap();
    assert!(foo1.ptr_eq(foo2));
    assert!(plus1.ptr_eq(plus2));
    assert!(!foo1.ptr_eq(bar));
}

#[test]
fn numbers_and_strings_are_not_interned() {
    let tokens = tokenize("1 'a'").unwrap();
    assert!(tokens.iter().all(|t| t.name.is_none()));
}

// === Strings ===

#[test]
fn strings_both_quotes() {
    assert_eq!(
        kinds_and_texts(r#"'a' "b""#),
        vec![(TokenKind::String, "'a'"), (TokenKind::String, "\"b\"")]
    );
}

#[test]
fn strings_keep_escapes_raw() {
    assert_eq!(texts(r"'it\'s' 'a\\'"), vec![r"'it\'s'", r"'a\\'"]);
    assert_eq!(texts(r#""say \"hi\"""#), vec![r#""say \"hi\"""#]);
}

#[test]
fn strings_other_quote_is_plain() {
    assert_eq!(texts(r#"'a"b'"#), vec![r#"'a"b'"#]);
}

#[test]
fn strings_escaped_newline_allowed() {
    assert_eq!(texts("'a\\\nb'"), vec!["'a\\\nb'"]);
}

#[test]
fn strings_unterminated_at_end() {
    let err = tokenize("'abc").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.span, Span::new(0, 4));
}

#[test]
fn strings_unterminated_at_newline() {
    let err = tokenize("x + 'ab\ncd'").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.location, Location { line: 1, column: 8 });
}

// === Symbols ===

#[test]
fn symbols_longest_match() {
    assert_eq!(texts("a===b"), vec!["a", "===", "b"]);
    assert_eq!(texts("a!==b"), vec!["a", "!==", "b"]);
    assert_eq!(texts("a<=b"), vec!["a", "<=", "b"]);
    assert_eq!(texts("!!x"), vec!["!", "!", "x"]);
    assert_eq!(texts("a=b"), vec!["a", "=", "b"]);
}

#[test]
fn symbols_punctuation() {
    assert_eq!(
        texts("f(a, [1], {k: v}) ? x : y"),
        vec!["f", "(", "a", ",", "[", "1", "]", ",", "{", "k", ":", "v", "}", ")", "?", "x", ":", "y"]
    );
}

#[test]
fn unexpected_character() {
    let err = tokenize("a # b").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('#'));
    assert_eq!(err.location, Location { line: 1, column: 3 });
    assert_eq!(err.to_string(), "Unexpected character: '#', at line: 1, column: 3.");
}

#[test]
fn lone_ampersand_is_unexpected() {
    let err = tokenize("a & b").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('&'));
}

// === Whitespace and comments ===

#[test]
fn line_comment() {
    assert_eq!(texts("a // comment\n+ b"), vec!["a", "+", "b"]);
    assert_eq!(texts("a // to the end"), vec!["a"]);
}

#[test]
fn block_comment() {
    assert_eq!(texts("a /* x */ + /* multi\nline */ b"), vec!["a", "+", "b"]);
}

#[test]
fn block_comment_tracks_lines() {
    let source = "/* one\ntwo\n */ x";
    let token = tokenize(source).unwrap().pop().unwrap();
    let lexer = Lexer::new(source);
    assert_eq!(
        lexer.location(token.span.start as usize),
        Location { line: 3, column: 5 }
    );
}

#[test]
fn block_comment_unterminated() {
    let err = tokenize("a /* never closed").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
    assert_eq!(err.location, Location { line: 1, column: 3 });
}

#[test]
fn slash_alone_is_division() {
    assert_eq!(texts("a / b"), vec!["a", "/", "b"]);
}

#[test]
fn unicode_whitespace_is_skipped() {
    assert_eq!(texts("a\u{a0}+\u{2003}b\u{85}"), vec!["a", "+", "b"]);
}

#[test]
fn empty_and_blank_sources() {
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize("  \n\t /* */ // x").unwrap().is_empty());
}

// === Pull primitives ===

#[test]
fn consume_does_not_split_operators() {
    let mut lexer = Lexer::new("== =");
    assert!(!lexer.consume(b'=').unwrap());
    assert_eq!(
        lexer.consume_symbol(OperatorGroup::Equality).unwrap().as_deref(),
        Some("==")
    );
    assert!(lexer.consume(b'=').unwrap());
    assert!(!lexer.has_remaining().unwrap());
}

#[test]
fn consume_symbol_respects_group() {
    let mut lexer = Lexer::new("<= x");
    assert!(lexer
        .consume_symbol(OperatorGroup::Equality)
        .unwrap()
        .is_none());
    assert_eq!(
        lexer.consume_symbol(OperatorGroup::Relational).unwrap().as_deref(),
        Some("<=")
    );
}

#[test]
fn consume_symbol_needs_whole_operator() {
    // `!` is a unary operator but `!=` is the longest operator here.
    let mut lexer = Lexer::new("!= x");
    assert!(lexer.consume_symbol(OperatorGroup::Unary).unwrap().is_none());
    assert_eq!(lexer.position(), 0);
}

#[test]
fn consume_text_whole_operator_only() {
    let mut lexer = Lexer::new("|| &&");
    assert!(!lexer.consume_text("&&").unwrap());
    assert!(lexer.consume_text("||").unwrap());
    assert!(lexer.consume_text("&&").unwrap());
    assert!(!lexer.consume_text("&&").unwrap());

    let mut lexer = Lexer::new("===");
    assert!(!lexer.consume_text("==").unwrap());
}

#[test]
fn next_identifier_leaves_other_tokens() {
    let mut lexer = Lexer::new("  42");
    assert!(lexer.next_identifier().unwrap().is_none());
    assert_eq!(lexer.next_token().unwrap().unwrap().text, "42");

    let mut lexer = Lexer::new("name");
    assert_eq!(lexer.next_identifier().unwrap().unwrap().text, "name");
}

#[test]
fn peek_token_does_not_consume() {
    let mut lexer = Lexer::new(" a b");
    assert_eq!(lexer.peek_token().unwrap().unwrap().text, "a");
    assert_eq!(lexer.peek_token().unwrap().unwrap().text, "a");
    assert_eq!(lexer.next_token().unwrap().unwrap().text, "a");
    assert_eq!(lexer.found_text(), "b");
}

#[test]
fn found_text_on_bad_character() {
    let mut lexer = Lexer::new("  #x");
    assert_eq!(lexer.found_text(), "#");
}

#[test]
fn custom_symbol_table() {
    let table = SymbolTable::compile([("Additive", vec!["+", "++"]), ("Punctuation", vec!["("])]);
    let mut lexer = Lexer::with_symbols("a ++ b", &table);
    assert_eq!(lexer.next_token().unwrap().unwrap().text, "a");
    assert_eq!(
        lexer.consume_symbol(OperatorGroup::Additive).unwrap().as_deref(),
        Some("++")
    );
}

// === Locations ===

#[test]
fn location_tab_counts_four() {
    let source = "\n\t0.1";
    let token = tokenize(source).unwrap().pop().unwrap();
    assert_eq!(token.text, "0.1");
    assert_eq!(
        Lexer::locate(source, token.span.start as usize),
        Location { line: 2, column: 5 }
    );
}

#[test]
fn location_counts_characters() {
    assert_eq!(Lexer::locate("é+x", 3), Location { line: 1, column: 3 });
}

#[test]
fn location_before_line_start_rescans() {
    let mut lexer = Lexer::new("a\nb\nc");
    while lexer.next_token().unwrap().is_some() {}
    assert_eq!(lexer.location(0), Location::START);
    assert_eq!(lexer.location(2), Location { line: 2, column: 1 });
    assert_eq!(lexer.location(4), Location { line: 3, column: 1 });
}

#[test]
fn escaped_newline_in_string_starts_a_line() {
    let source = "'a\\\nb'\n+ @";
    let mut lexer = Lexer::new(source);
    assert_eq!(lexer.next_token().unwrap().unwrap().kind, TokenKind::String);
    assert_eq!(lexer.peek_token().unwrap().unwrap().text, "+");
    assert_eq!(lexer.next_token().unwrap().unwrap().text, "+");
    let err = lexer.next_token().unwrap_err();
    assert_eq!(err.location, Location { line: 3, column: 3 });
    assert_eq!(err.location, Lexer::locate(source, source.len() - 1));
}

mod proptest_location {
    use super::super::Lexer;
    use proptest::prelude::*;

    fn source() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            prop_oneof![
                Just('a'),
                Just('1'),
                Just(' '),
                Just('\n'),
                Just('\t'),
                Just('+'),
                Just('('),
                Just('\u{2003}'),
                Just('\''),
                Just('"'),
                Just('\\'),
            ],
            0..40,
        )
        .prop_map(|cs| cs.into_iter().collect())
    }

    proptest! {
        #[test]
        fn tracked_location_matches_rescan(source in source()) {
            let mut lexer = Lexer::new(&source);
            loop {
                for (pos, _) in source.char_indices().chain([(source.len(), ' ')]) {
                    prop_assert_eq!(lexer.location(pos), Lexer::locate(&source, pos));
                }
                // Peeking scans the next token twice.
                let _ = lexer.peek_token();
                match lexer.next_token() {
                    Ok(Some(_)) => {}
                    Ok(None) | Err(_) => break,
                }
            }
        }
    }
}
