//! Semantic analysis for QuoteScript.
//!
//! The parser guarantees most structural invariants; this phase normalizes
//! what it deliberately left open and validates the rest:
//!
//! - a missing match-mode tag defaults to `forgiving`,
//! - present tags are canonicalized through the alias table,
//! - TOP/RANDOM counts must be non-negative,
//! - with both present, `0 <= RANDOM <= TOP`.

use crate::ast::{MatchMode, Program};
use crate::error::{QuoteScriptResult, SemanticError};

/// Phase 3: validate and normalize the program tree.
pub fn analyze(mut program: Program) -> QuoteScriptResult<Program> {
    for (field, filter) in program.filters.iter_mut() {
        if filter.value.is_empty() {
            return Err(SemanticError::EmptyFilterValue { field: *field }.into());
        }
        match &filter.tag {
            None => filter.tag = Some(MatchMode::Forgiving.as_str().to_string()),
            Some(tag) => match MatchMode::from_alias(tag) {
                Some(mode) => filter.tag = Some(mode.as_str().to_string()),
                None => {
                    return Err(SemanticError::InvalidTag {
                        field: *field,
                        tag: tag.clone(),
                    }
                    .into());
                }
            },
        }
    }

    let sel = program.selection;
    if sel.top.is_some_and(|top| top < 0) || sel.random.is_some_and(|random| random < 0) {
        return Err(SemanticError::NegativeCount.into());
    }
    if let (Some(top), Some(random)) = (sel.top, sel.random) {
        if random > top {
            return Err(SemanticError::RandomExceedsTop { random, top }.into());
        }
    }

    Ok(program)
}
