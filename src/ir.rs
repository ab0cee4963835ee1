//! Intermediate representation and lowering.
//!
//! The IR flattens the program tree into a list of `(field, value, mode)`
//! filters plus the selection. All filters are AND-combined, so their order
//! carries no meaning; lowering happens to emit field-rank order, but
//! nothing may rely on that.

use crate::ast::{Field, MatchMode, Program, Selection};
use serde::Serialize;

/// One lowered filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterIr {
    pub field: Field,
    pub value: String,
    #[serde(rename = "tag")]
    pub mode: MatchMode,
}

/// The full intermediate representation of a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ir {
    pub filters: Vec<FilterIr>,
    pub selection: Selection,
}

/// Phase 4: lower the program tree into IR. Pure and total.
///
/// A tag the semantic phase left absent (possible for hand-built trees)
/// defaults to forgiving here as well.
pub fn lower(program: &Program) -> Ir {
    let filters = program
        .filters
        .values()
        .map(|filter| FilterIr {
            field: filter.field,
            value: filter.value.clone(),
            mode: filter
                .tag
                .as_deref()
                .and_then(MatchMode::from_alias)
                .unwrap_or(MatchMode::Forgiving),
        })
        .collect();

    Ir {
        filters,
        selection: program.selection,
    }
}
