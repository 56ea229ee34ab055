use rowan::TextRange;

use super::kind::SyntaxKind::{self, *};
use super::lexer::{lex, token_text, Token};

/// Kinds without trivia, for compact assertions.
fn kinds(input: &str) -> Vec<SyntaxKind> {
    lex(input)
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| t.kind)
        .collect()
}

fn texts(input: &str) -> Vec<String> {
    lex(input)
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| token_text(input, &t).to_string())
        .collect()
}

#[test]
fn keywords_are_case_insensitive() {
    assert_eq!(kinds("select SELECT Select sElEcT"), vec![KwSelect; 4]);
    assert_eq!(kinds("FROM from"), vec![KwFrom, KwFrom]);
}

#[test]
fn keywords_keep_source_spelling() {
    assert_eq!(texts("SELECT u FROM User u"), vec!["SELECT", "u", "FROM", "User", "u"]);
}

#[test]
fn keyword_prefixes_lex_as_identifiers() {
    // `selection` starts with `select` but is a plain identifier
    assert_eq!(kinds("selection fromage counter"), vec![Ident, Ident, Ident]);
}

#[test]
fn punctuation_and_operators() {
    assert_eq!(
        kinds(". , ( ) = <> != > >= < <= + - * / ? :"),
        vec![
            Dot, Comma, ParenOpen, ParenClose, Equals, NotEquals, NotEquals, Greater,
            GreaterEquals, Less, LessEquals, Plus, Minus, Star, Slash, Question, Colon,
        ]
    );
}

#[test]
fn string_literal_with_doubled_quote() {
    let input = "u.name = 'O''Reilly'";
    let tokens: Vec<_> = lex(input).into_iter().filter(|t| !t.kind.is_trivia()).collect();
    let lit = tokens.last().unwrap();
    assert_eq!(lit.kind, StringLit);
    assert_eq!(token_text(input, lit), "'O''Reilly'");
}

#[test]
fn string_literal_double_quoted() {
    assert_eq!(kinds(r#""hello world""#), vec![StringLit]);
}

#[test]
fn numeric_literals() {
    assert_eq!(kinds("42 42L 1.5 1.5f 2e10 3.0e-2 7D"), vec![
        IntLit, IntLit, FloatLit, FloatLit, FloatLit, FloatLit, FloatLit,
    ]);
}

#[test]
fn dotted_path_is_separate_tokens() {
    assert_eq!(kinds("u.address.city"), vec![Ident, Dot, Ident, Dot, Ident]);
}

#[test]
fn input_parameters() {
    assert_eq!(kinds("?1"), vec![Question, IntLit]);
    assert_eq!(kinds(":name"), vec![Colon, Ident]);
}

#[test]
fn spel_openers_longest_match() {
    assert_eq!(kinds("#{#entityName}"), vec![SpelNameOpen, Ident, BraceClose]);
    assert_eq!(kinds("#{#[0]}"), vec![SpelIndexOpen, IntLit, BracketBraceClose]);
    assert_eq!(
        kinds("#{escape([0])}"),
        vec![SpelFunctionOpen, Ident, ParenOpen, BracketOpen, IntLit, BracketClose, ParenBraceClose]
    );
    assert_eq!(
        kinds("#{escape('foo')}"),
        vec![SpelFunctionOpen, Ident, ParenOpen, StringLit, ParenBraceClose]
    );
}

#[test]
fn unreserved_keywords_lex_as_keywords() {
    // The parser re-accepts these in identifier position
    assert_eq!(kinds("count order key"), vec![KwCount, KwOrder, KwKey]);
}

#[test]
fn unexpected_characters_coalesce() {
    let input = "select ^^^ from";
    let tokens = lex(input);
    let errors: Vec<&Token> = tokens
        .iter()
        .filter(|t| t.kind == UnexpectedFragment)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].span, TextRange::new(7.into(), 10.into()));
}

#[test]
fn whitespace_spans_are_kept_for_the_adapter() {
    let tokens = lex("a  b");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![Ident, Whitespace, Ident]
    );
}
