//! QuoteScript parser.
//!
//! Builds a [`Program`] from the token sequence. A program has two regions:
//!
//! ```text
//! QUOTE:  "freedom"  exact      ┐
//! AUTHOR: "Camus"               │ ABOVE — filter declarations,
//! THEME:  "absurd"   loose      ┘ rank order QUOTE < AUTHOR < THEME
//! TOP: 5                        ┐
//! RANDOM: 2                     ┘ BELOW — selection directives
//! ```
//!
//! Once any BELOW directive has been seen, no further ABOVE declaration may
//! follow. Newlines between statements are insignificant and may repeat.

use crate::ast::{Field, FilterDecl, MatchMode, Program, Selection};
use crate::error::{QuoteScriptResult, SyntaxError};
use crate::lexer::{Keyword, Token};
use std::collections::BTreeMap;

/// Phase 2: syntax analysis.
pub fn parse(tokens: &[Token]) -> QuoteScriptResult<Program> {
    Parser::new(tokens).parse()
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn skip_newlines(&mut self) {
        while matches!(self.peek(), Some(Token::Newline)) {
            self.pos += 1;
        }
    }

    /// Consume an optional statement-terminating newline.
    fn eat_newline(&mut self) {
        if matches!(self.peek(), Some(Token::Newline)) {
            self.pos += 1;
        }
    }

    fn expect_int(&mut self, keyword: &'static str) -> QuoteScriptResult<i64> {
        match self.bump() {
            Some(Token::Int(n)) => Ok(*n),
            Some(other) => Err(SyntaxError::ExpectedInteger {
                keyword,
                got: other.to_string(),
            }
            .into()),
            None => Err(SyntaxError::ExpectedInteger {
                keyword,
                got: "end of input".to_string(),
            }
            .into()),
        }
    }

    fn parse(mut self) -> QuoteScriptResult<Program> {
        let mut filters: BTreeMap<Field, FilterDecl> = BTreeMap::new();
        let mut selection = Selection::default();
        let mut seen_below = false;
        // Rank of the most recent declaration; -1 before any.
        let mut last_rank: i8 = -1;

        self.skip_newlines();

        while let Some(tok) = self.peek() {
            match tok {
                Token::Newline => self.skip_newlines(),

                Token::Keyword(Keyword::Field(field)) => {
                    let field = *field;
                    if seen_below {
                        return Err(SyntaxError::AboveAfterBelow { field }.into());
                    }
                    if filters.contains_key(&field) {
                        return Err(SyntaxError::DuplicateField { field }.into());
                    }
                    if (field.rank() as i8) < last_rank {
                        return Err(SyntaxError::BadFieldOrder { field }.into());
                    }
                    last_rank = field.rank() as i8;

                    self.pos += 1; // keyword
                    self.skip_newlines();
                    let value = match self.bump() {
                        Some(Token::Str(s)) => s.clone(),
                        Some(other) => {
                            return Err(SyntaxError::ExpectedString {
                                field,
                                got: other.to_string(),
                            }
                            .into());
                        }
                        None => {
                            return Err(SyntaxError::ExpectedString {
                                field,
                                got: "end of input".to_string(),
                            }
                            .into());
                        }
                    };

                    self.skip_newlines();
                    let tag = match self.peek() {
                        Some(Token::Word(w)) if MatchMode::from_alias(w).is_some() => {
                            self.pos += 1;
                            Some(w.clone())
                        }
                        _ => None,
                    };
                    self.eat_newline();

                    filters.insert(field, FilterDecl { field, value, tag });
                    self.skip_newlines();
                }

                Token::Keyword(Keyword::Top) => {
                    seen_below = true;
                    if selection.top.is_some() {
                        return Err(SyntaxError::DuplicateTop.into());
                    }
                    self.pos += 1; // keyword
                    self.skip_newlines();
                    selection.top = Some(self.expect_int("TOP:")?);
                    self.eat_newline();
                    self.skip_newlines();
                }

                Token::Keyword(Keyword::Random { colon }) => {
                    let colon = *colon;
                    seen_below = true;
                    if selection.random.is_some() {
                        return Err(SyntaxError::DuplicateRandom.into());
                    }
                    self.pos += 1; // keyword
                    // The bare form tolerates a separately tokenized colon.
                    if !colon {
                        if let Some(Token::Word(w)) = self.peek() {
                            if w == ":" {
                                self.pos += 1;
                            }
                        }
                    }
                    self.skip_newlines();
                    let keyword = if colon { "RANDOM:" } else { "RANDOM" };
                    selection.random = Some(self.expect_int(keyword)?);
                    self.eat_newline();
                    self.skip_newlines();
                }

                other => {
                    return Err(SyntaxError::UnexpectedToken {
                        token: other.to_string(),
                        position: self.pos,
                    }
                    .into());
                }
            }
        }

        if filters.is_empty() && selection.is_empty() {
            return Err(SyntaxError::EmptyProgram.into());
        }

        Ok(Program { filters, selection })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteScriptError;
    use crate::lexer::lex;
    use pretty_assertions::assert_eq;

    fn parse_src(source: &str) -> QuoteScriptResult<Program> {
        parse(&lex(source).unwrap())
    }

    fn syntax_err(source: &str) -> SyntaxError {
        match parse_src(source).unwrap_err() {
            QuoteScriptError::Syntax(e) => e,
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_full_program() {
        let program = parse_src(
            "QUOTE: \"freedom\" exact\nAUTHOR: \"Camus\"\nTHEME: \"absurd\" -l\nTOP: 5\nRANDOM: 2\n",
        )
        .unwrap();

        assert_eq!(program.filters.len(), 3);
        let quote = &program.filters[&Field::Quote];
        assert_eq!(quote.value, "freedom");
        assert_eq!(quote.tag.as_deref(), Some("exact"));
        let author = &program.filters[&Field::Author];
        assert_eq!(author.value, "Camus");
        assert_eq!(author.tag, None);
        let theme = &program.filters[&Field::Theme];
        assert_eq!(theme.tag.as_deref(), Some("-l"));
        assert_eq!(program.selection, Selection { top: Some(5), random: Some(2) });
    }

    #[test]
    fn test_selection_only_program() {
        let program = parse_src("TOP: 3").unwrap();
        assert!(program.filters.is_empty());
        assert_eq!(program.selection.top, Some(3));
    }

    #[test]
    fn test_random_colon_tolerance() {
        for src in ["RANDOM: 2", "RANDOM 2", "RANDOM : 2"] {
            let program = parse_src(src).unwrap();
            assert_eq!(program.selection.random, Some(2), "source: {src}");
        }
    }

    #[test]
    fn test_above_after_below() {
        assert!(matches!(
            syntax_err("TOP: 3\nQUOTE: \"x\"\n"),
            SyntaxError::AboveAfterBelow { field: Field::Quote }
        ));
    }

    #[test]
    fn test_duplicate_field() {
        assert!(matches!(
            syntax_err("QUOTE: \"a\"\nQUOTE: \"b\"\n"),
            SyntaxError::DuplicateField { field: Field::Quote }
        ));
    }

    #[test]
    fn test_bad_field_order_without_prior_declaration() {
        // AUTHOR never appeared before; ordering still rejects it after THEME.
        assert!(matches!(
            syntax_err("THEME: \"stoic\"\nAUTHOR: \"Seneca\"\n"),
            SyntaxError::BadFieldOrder { field: Field::Author }
        ));
    }

    #[test]
    fn test_expected_string() {
        assert!(matches!(
            syntax_err("QUOTE: exact\n"),
            SyntaxError::ExpectedString { field: Field::Quote, .. }
        ));
        assert!(matches!(
            syntax_err("AUTHOR:"),
            SyntaxError::ExpectedString { field: Field::Author, .. }
        ));
    }

    #[test]
    fn test_expected_integer() {
        assert!(matches!(
            syntax_err("TOP: \"3\"\n"),
            SyntaxError::ExpectedInteger { keyword: "TOP:", .. }
        ));
        assert!(matches!(
            syntax_err("RANDOM two\n"),
            SyntaxError::ExpectedInteger { keyword: "RANDOM", .. }
        ));
    }

    #[test]
    fn test_duplicate_selection() {
        assert!(matches!(syntax_err("TOP: 1\nTOP: 2\n"), SyntaxError::DuplicateTop));
        assert!(matches!(
            syntax_err("RANDOM: 1\nRANDOM 2\n"),
            SyntaxError::DuplicateRandom
        ));
    }

    #[test]
    fn test_unexpected_token() {
        assert!(matches!(
            syntax_err("nonsense\n"),
            SyntaxError::UnexpectedToken { position: 0, .. }
        ));
    }

    #[test]
    fn test_empty_program() {
        assert!(matches!(syntax_err(""), SyntaxError::EmptyProgram));
        assert!(matches!(syntax_err("\n\n\n"), SyntaxError::EmptyProgram));
    }

    #[test]
    fn test_newlines_between_statement_parts() {
        // Newlines are tolerated between a keyword and its argument.
        let program = parse_src("QUOTE:\n\"hope\"\nTOP:\n2\n").unwrap();
        assert_eq!(program.filters[&Field::Quote].value, "hope");
        assert_eq!(program.selection.top, Some(2));
    }

    #[test]
    fn test_unknown_word_after_value_is_not_a_tag() {
        // "fuzzy" is not in the alias table, so it must fail as a statement.
        assert!(matches!(
            syntax_err("QUOTE: \"x\" fuzzy\n"),
            SyntaxError::UnexpectedToken { .. }
        ));
    }
}
