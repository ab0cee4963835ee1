//! Error types for QuoteScript.
//!
//! Every failure the pipeline can produce is a variant of one of four
//! categories — lex, syntax, semantic, store — collected under
//! [`QuoteScriptError`]. Each phase fails fast on its first violation;
//! nothing here is retried or accumulated.

use crate::ast::Field;
use thiserror::Error;

/// The language-error umbrella. Host-side failures (missing files, bad
/// CLI arguments) are deliberately not part of this type so callers can
/// tell user errors apart from unexpected ones.
#[derive(Debug, Error)]
pub enum QuoteScriptError {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Semantic error: {0}")]
    Semantic(#[from] SemanticError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Lexical-analysis failures.
#[derive(Debug, Error)]
pub enum LexError {
    /// Input ended while still inside a double-quoted string.
    #[error("unterminated string literal")]
    UnterminatedString,
}

/// Syntax-analysis failures.
#[derive(Debug, Error)]
pub enum SyntaxError {
    /// An ABOVE declaration appeared after a BELOW directive.
    #[error("{field} cannot appear after TOP/RANDOM")]
    AboveAfterBelow { field: Field },

    /// The same field was declared twice.
    #[error("{field} specified more than once")]
    DuplicateField { field: Field },

    /// Declarations out of QUOTE < AUTHOR < THEME order.
    #[error("invalid order: {field} appears after a later field")]
    BadFieldOrder { field: Field },

    /// A field keyword was not followed by a string literal.
    #[error("expected string literal after {field}:, got {got}")]
    ExpectedString { field: Field, got: String },

    /// TOP/RANDOM was not followed by a non-negative integer.
    #[error("expected integer after {keyword}, got {got}")]
    ExpectedInteger { keyword: &'static str, got: String },

    /// A token that starts no recognized statement.
    #[error("unexpected token {token} at position {position}")]
    UnexpectedToken { token: String, position: usize },

    /// No filters and no selection directives.
    #[error("empty QuoteScript program")]
    EmptyProgram,

    #[error("TOP specified more than once")]
    DuplicateTop,

    #[error("RANDOM specified more than once")]
    DuplicateRandom,
}

/// Semantic-analysis failures.
#[derive(Debug, Error)]
pub enum SemanticError {
    /// Unreachable through the parser; guards hand-built programs.
    #[error("empty value for {field} filter")]
    EmptyFilterValue { field: Field },

    /// Tag outside the exact/forgiving/loose alias table.
    #[error("invalid tag '{tag}' for {field}")]
    InvalidTag { field: Field, tag: String },

    /// Unreachable through the lexer; guards hand-built programs.
    #[error("TOP and RANDOM counts cannot be negative")]
    NegativeCount,

    #[error("RANDOM count ({random}) cannot exceed TOP count ({top})")]
    RandomExceedsTop { random: i64, top: i64 },
}

/// Record-store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing quote store could not be reached or read.
    #[error("quote store unavailable: {0}")]
    SourceUnavailable(String),
}

/// Result type alias for QuoteScript operations.
pub type QuoteScriptResult<T> = Result<T, QuoteScriptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuoteScriptError::from(SyntaxError::UnexpectedToken {
            token: "'junk'".to_string(),
            position: 3,
        });
        assert_eq!(
            err.to_string(),
            "Syntax error: unexpected token 'junk' at position 3"
        );
    }

    #[test]
    fn test_category_prefixes() {
        let lex = QuoteScriptError::from(LexError::UnterminatedString);
        assert_eq!(lex.to_string(), "Lex error: unterminated string literal");

        let sem = QuoteScriptError::from(SemanticError::RandomExceedsTop { random: 5, top: 3 });
        assert_eq!(
            sem.to_string(),
            "Semantic error: RANDOM count (5) cannot exceed TOP count (3)"
        );

        let store = QuoteScriptError::from(StoreError::SourceUnavailable("no such file".into()));
        assert_eq!(
            store.to_string(),
            "Store error: quote store unavailable: no such file"
        );
    }
}
