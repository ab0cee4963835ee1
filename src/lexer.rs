//! QuoteScript lexer.
//!
//! Turns source text into a flat token sequence:
//!
//! ```text
//! QUOTE: "the obstacle is the way" exact
//! TOP: 3
//! ```
//!
//! becomes `[QUOTE:, "the obstacle is the way", exact, \n, TOP:, 3, \n]`.
//!
//! Rules, in order of precedence outside a string:
//! - `"` flushes any pending bare word and opens a string literal, which
//!   accumulates characters verbatim (no escapes) until the closing quote;
//!   EOF inside a string is an error.
//! - `\n` flushes the pending word and is emitted as its own token, since
//!   newlines separate statements.
//! - other whitespace flushes the pending word and is dropped.
//! - anything else extends the current bare word.
//!
//! Flushed words are classified into keywords (case-sensitive), integer
//! literals, or plain words (tags, the stray `:` after bare `RANDOM`).

use crate::ast::Field;
use crate::error::{LexError, QuoteScriptResult};
use nom::IResult;
use nom::bytes::complete::{take_while, take_while1};
use nom::character::complete::char;
use nom::sequence::preceded;
use std::fmt;

/// A single lexeme. Sequence order is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Keyword(Keyword),
    /// String literal contents, quotes stripped.
    Str(String),
    /// Non-negative integer literal.
    Int(i64),
    /// Bare word: a match-mode tag, a stray colon, or junk.
    Word(String),
    Newline,
}

/// Statement keywords. The bare and colon-suffixed RANDOM forms stay
/// distinguishable because the parser treats them differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Field(Field),
    Top,
    Random { colon: bool },
}

impl Keyword {
    pub fn text(self) -> &'static str {
        match self {
            Keyword::Field(field) => field.keyword(),
            Keyword::Top => "TOP:",
            Keyword::Random { colon: true } => "RANDOM:",
            Keyword::Random { colon: false } => "RANDOM",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(kw) => write!(f, "'{}'", kw.text()),
            Token::Str(s) => write!(f, "\"{s}\""),
            Token::Int(n) => write!(f, "'{n}'"),
            Token::Word(w) => write!(f, "'{w}'"),
            Token::Newline => write!(f, "'\\n'"),
        }
    }
}

/// Non-newline whitespace run.
fn blank(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_whitespace() && c != '\n')(input)
}

/// A bare word: everything up to whitespace or a double quote.
fn bare_word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && c != '"')(input)
}

/// The body of a string literal, after the opening quote and up to (not
/// including) the closing quote.
fn string_body(input: &str) -> IResult<&str, &str> {
    preceded(char('"'), take_while(|c: char| c != '"'))(input)
}

fn classify(word: &str) -> Token {
    match word {
        "QUOTE:" => Token::Keyword(Keyword::Field(Field::Quote)),
        "AUTHOR:" => Token::Keyword(Keyword::Field(Field::Author)),
        "THEME:" => Token::Keyword(Keyword::Field(Field::Theme)),
        "TOP:" => Token::Keyword(Keyword::Top),
        "RANDOM:" => Token::Keyword(Keyword::Random { colon: true }),
        "RANDOM" => Token::Keyword(Keyword::Random { colon: false }),
        _ => {
            if word.bytes().all(|b| b.is_ascii_digit()) {
                match word.parse::<i64>() {
                    Ok(n) => Token::Int(n),
                    Err(_) => Token::Word(word.to_string()),
                }
            } else {
                Token::Word(word.to_string())
            }
        }
    }
}

/// Phase 1: lexical analysis.
pub fn lex(source: &str) -> QuoteScriptResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = source;

    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix('\n') {
            tokens.push(Token::Newline);
            rest = tail;
            continue;
        }
        if let Ok((tail, _)) = blank(rest) {
            rest = tail;
            continue;
        }
        if rest.starts_with('"') {
            let (tail, body) =
                string_body(rest).map_err(|_| LexError::UnterminatedString)?;
            match tail.strip_prefix('"') {
                Some(after) => {
                    tokens.push(Token::Str(body.to_string()));
                    rest = after;
                }
                None => return Err(LexError::UnterminatedString.into()),
            }
            continue;
        }
        // Every remaining prefix starts a bare word.
        let (tail, word) = match bare_word(rest) {
            Ok(parsed) => parsed,
            Err(_) => break,
        };
        tokens.push(classify(word));
        rest = tail;
    }

    Ok(tokens)
}
