//! The priority-ordered pattern table.
//!
//! Each entry pairs a [`TokenKind`] with a recognizer anchored at the start of
//! the remaining input. [`match_at`] tries them in table order and the first
//! one that succeeds wins, even when a later entry would match more text.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{char, one_of, satisfy};
use nom::combinator::{opt, recognize};
use nom::error::{Error, ErrorKind};
use nom::sequence::pair;
use nom::IResult;
use regex::Regex;

use super::token::TokenKind;

lazy_static::lazy_static! {
    // `\d` is any Unicode decimal digit (Nd), not only 0-9
    static ref DIGITS: Regex = Regex::new(r"^\d*").unwrap();
}

/// Recognizes a lexeme at the start of its input, returning `(rest, lexeme)`
pub type Matcher = fn(&str) -> IResult<&str, &str>;

/// Patterns in the order they are tried at every scan position
pub static PATTERNS: [(TokenKind, Matcher); 8] = [
    (TokenKind::Number, number),
    (TokenKind::String, string),
    (TokenKind::Char, character),
    (TokenKind::SingleQuote, single_quote),
    (TokenKind::LeftParen, left_paren),
    (TokenKind::RightParen, right_paren),
    (TokenKind::Bool, boolean),
    (TokenKind::Name, name),
];

/// Try every pattern at the start of `input`; first match wins.
pub fn match_at(input: &str) -> Option<(TokenKind, &str)> {
    PATTERNS.iter().find_map(|(kind, matcher)| match matcher(input) {
        Ok((_, lexeme)) => Some((*kind, lexeme)),
        Err(_) => None,
    })
}

/// Zero or more decimal digits
fn digit0(input: &str) -> IResult<&str, &str> {
    let len = DIGITS.find(input).map_or(0, |m| m.end());
    Ok((&input[len..], &input[..len]))
}

/// One or more decimal digits
fn digit1(input: &str) -> IResult<&str, &str> {
    match digit0(input)? {
        (_, digits) if digits.is_empty() => {
            Err(nom::Err::Error(Error::new(input, ErrorKind::Digit)))
        }
        ok => Ok(ok),
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | '%' | '+' | '-')
}

fn is_name_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '>' | '?' | '!')
}

/// `[+-]? digit+ ('.' digit*)?`
fn number(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        pair(opt(one_of("+-")), digit1),
        opt(pair(char('.'), digit0)),
    ))(input)
}

/// `"` up to the last `"` on the same line.
fn string(input: &str) -> IResult<&str, &str> {
    let (after_open, _) = char::<_, Error<&str>>('"')(input)?;
    let line = after_open.find('\n').map_or(after_open, |end| &after_open[..end]);

    match line.rfind('"') {
        Some(close) => {
            // both quotes are one byte wide
            let len = close + 2;
            Ok((&input[len..], &input[..len]))
        }
        None => Err(nom::Err::Error(Error::new(input, ErrorKind::Char))),
    }
}

/// `#\` followed by letters
fn character(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("#\\"), take_while(|c: char| c.is_ascii_alphabetic())))(input)
}

fn single_quote(input: &str) -> IResult<&str, &str> {
    tag("'")(input)
}

fn left_paren(input: &str) -> IResult<&str, &str> {
    tag("(")(input)
}

fn right_paren(input: &str) -> IResult<&str, &str> {
    tag(")")(input)
}

/// `#t` or `#f`, nothing more
fn boolean(input: &str) -> IResult<&str, &str> {
    recognize(pair(char('#'), one_of("tf")))(input)
}

/// Identifier-like names, including the operators `+`, `-` and `...`
fn name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((recognize(satisfy(is_name_start)), tag("..."))),
        take_while(is_name_continue),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("42", TokenKind::Number, "42" ; "integer")]
    #[test_case("-3.14)", TokenKind::Number, "-3.14" ; "signed float")]
    #[test_case("+7.", TokenKind::Number, "+7." ; "trailing dot")]
    #[test_case("1.2.3", TokenKind::Number, "1.2" ; "second dot stops")]
    #[test_case("12abc", TokenKind::Number, "12" ; "digits before letters")]
    #[test_case("٣", TokenKind::Number, "٣" ; "arabic indic digit")]
    #[test_case("9٣.1 x", TokenKind::Number, "9٣.1" ; "mixed script digits")]
    #[test_case("-१२.", TokenKind::Number, "-१२." ; "devanagari digits")]
    #[test_case("x١", TokenKind::Name, "x" ; "names keep ascii digits")]
    #[test_case("\"a\" \"b\" x", TokenKind::String, "\"a\" \"b\"" ; "greedy string")]
    #[test_case("#\\a", TokenKind::Char, "#\\a" ; "char literal")]
    #[test_case("#\\space)", TokenKind::Char, "#\\space" ; "named char")]
    #[test_case("#\\", TokenKind::Char, "#\\" ; "bare char prefix")]
    #[test_case("#\\t", TokenKind::Char, "#\\t" ; "char before bool")]
    #[test_case("'(a)", TokenKind::SingleQuote, "'" ; "quote")]
    #[test_case("((", TokenKind::LeftParen, "(" ; "left paren")]
    #[test_case("))", TokenKind::RightParen, ")" ; "right paren")]
    #[test_case("#true", TokenKind::Bool, "#t" ; "bool takes two chars")]
    #[test_case("#f)", TokenKind::Bool, "#f" ; "false")]
    #[test_case("+", TokenKind::Name, "+" ; "plus is a name")]
    #[test_case("-x", TokenKind::Name, "-x" ; "minus prefixed name")]
    #[test_case("list->vector!", TokenKind::Name, "list->vector!" ; "arrow name")]
    #[test_case("null? x", TokenKind::Name, "null?" ; "predicate")]
    #[test_case("...)", TokenKind::Name, "..." ; "ellipsis")]
    #[test_case("%tmp_1", TokenKind::Name, "%tmp_1" ; "percent name")]
    fn test_match_at(input: &str, kind: TokenKind, lexeme: &str) {
        assert_eq!(match_at(input), Some((kind, lexeme)));
    }

    #[test_case(" x" ; "whitespace")]
    #[test_case("\"open" ; "unterminated string")]
    #[test_case("\"a\nb\"" ; "string across lines")]
    #[test_case("#x" ; "hash other")]
    #[test_case(".5" ; "leading dot")]
    #[test_case(".." ; "two dots")]
    #[test_case("[" ; "bracket")]
    #[test_case("é" ; "non ascii letter")]
    #[test_case("" ; "empty")]
    fn test_no_match(input: &str) {
        assert_eq!(match_at(input), None);
    }

    #[test]
    fn test_table_order() {
        let kinds: Vec<_> = PATTERNS.iter().map(|(kind, _)| kind.to_string()).collect();
        assert_eq!(
            kinds,
            vec!["NUMBER", "STRING", "CHAR", "SINGLEQUOTE", "LPAR", "RPAR", "BOOL", "NAME"]
        );
    }

    #[test]
    fn test_string_stops_at_line_end() {
        assert_eq!(
            match_at("\"a\" b\n\"c\""),
            Some((TokenKind::String, "\"a\""))
        );
    }

    #[test]
    fn test_matchers_never_match_empty() {
        for (_, matcher) in PATTERNS.iter() {
            if let Ok((_, lexeme)) = matcher("") {
                panic!("matched empty input as {:?}", lexeme);
            }
        }
    }
}
