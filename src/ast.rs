//! Program tree types for QuoteScript.
//!
//! A program is a set of field filters (the ABOVE section) plus a selection
//! (the BELOW section). Fields form a small closed set with a fixed rank;
//! the parser uses the rank to enforce declaration order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A filterable field. Declaration order across a program must be
/// non-decreasing in rank: QUOTE(0) < AUTHOR(1) < THEME(2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Quote,
    Author,
    Theme,
}

impl Field {
    /// Rank used by the parser's ordering check.
    pub fn rank(self) -> u8 {
        match self {
            Field::Quote => 0,
            Field::Author => 1,
            Field::Theme => 2,
        }
    }

    /// The declaration keyword, colon included.
    pub fn keyword(self) -> &'static str {
        match self {
            Field::Quote => "QUOTE:",
            Field::Author => "AUTHOR:",
            Field::Theme => "THEME:",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Quote => write!(f, "QUOTE"),
            Field::Author => write!(f, "AUTHOR"),
            Field::Theme => write!(f, "THEME"),
        }
    }
}

/// Text-matching mode for a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    Exact,
    Forgiving,
    Loose,
}

impl MatchMode {
    /// Resolve a tag token through the alias table, case-insensitively.
    ///
    /// Accepted spellings: `exact`/`e`/`-exact`/`-e`, `forgiving`/`f`/
    /// `-forgiving`/`-f`, `loose`/`l`/`-loose`/`-l`.
    pub fn from_alias(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            "exact" | "e" | "-exact" | "-e" => Some(MatchMode::Exact),
            "forgiving" | "f" | "-forgiving" | "-f" => Some(MatchMode::Forgiving),
            "loose" | "l" | "-loose" | "-l" => Some(MatchMode::Loose),
            _ => None,
        }
    }

    /// Canonical tag text.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::Exact => "exact",
            MatchMode::Forgiving => "forgiving",
            MatchMode::Loose => "loose",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ABOVE declaration. The tag is the raw alias text as written;
/// canonicalization and defaulting happen in semantic analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDecl {
    pub field: Field,
    pub value: String,
    pub tag: Option<String>,
}

/// The BELOW section: TOP M and/or RANDOM N.
///
/// Counts are signed so the semantic negative-count check stays a real
/// branch for callers that build a [`Program`] directly; the lexer itself
/// only ever produces non-negative integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub top: Option<i64>,
    pub random: Option<i64>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.random.is_none()
    }
}

/// A parsed QuoteScript program: at most one filter per field, keyed and
/// iterated in rank order, plus the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub filters: BTreeMap<Field, FilterDecl>,
    pub selection: Selection,
}
