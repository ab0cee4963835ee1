//! IR optimization.
//!
//! A single canonicalization pass: filter values are trimmed and a filter
//! whose trimmed value is empty is dropped entirely. Dropping only relaxes
//! constraints, so this can never reject a program. Match modes are already
//! canonical enum variants, so there is nothing to re-case. The selection
//! passes through untouched. The pass is idempotent.

use crate::ir::{FilterIr, Ir};

/// Phase 5: canonicalize and prune the IR.
pub fn optimize(ir: Ir) -> Ir {
    let filters = ir
        .filters
        .into_iter()
        .filter_map(|filter| {
            let value = filter.value.trim().to_string();
            if value.is_empty() {
                None
            } else {
                Some(FilterIr { value, ..filter })
            }
        })
        .collect();

    Ir {
        filters,
        selection: ir.selection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Field, MatchMode, Selection};
    use pretty_assertions::assert_eq;

    fn filter(field: Field, value: &str, mode: MatchMode) -> FilterIr {
        FilterIr {
            field,
            value: value.to_string(),
            mode,
        }
    }

    #[test]
    fn test_trims_values() {
        let ir = Ir {
            filters: vec![filter(Field::Quote, "  hope  ", MatchMode::Exact)],
            selection: Selection::default(),
        };
        let out = optimize(ir);
        assert_eq!(out.filters[0].value, "hope");
        assert_eq!(out.filters[0].mode, MatchMode::Exact);
    }

    #[test]
    fn test_drops_blank_filters() {
        let ir = Ir {
            filters: vec![
                filter(Field::Quote, "   ", MatchMode::Forgiving),
                filter(Field::Author, "Seneca", MatchMode::Loose),
            ],
            selection: Selection { top: Some(1), random: None },
        };
        let out = optimize(ir);
        assert_eq!(out.filters.len(), 1);
        assert_eq!(out.filters[0].field, Field::Author);
        // Selection is untouched even when filters are dropped.
        assert_eq!(out.selection.top, Some(1));
    }

    #[test]
    fn test_idempotent() {
        let ir = Ir {
            filters: vec![
                filter(Field::Quote, " the  obstacle ", MatchMode::Exact),
                filter(Field::Author, "\t", MatchMode::Forgiving),
                filter(Field::Theme, "stoic", MatchMode::Loose),
            ],
            selection: Selection { top: Some(3), random: Some(2) },
        };
        let once = optimize(ir);
        let twice = optimize(once.clone());
        assert_eq!(once, twice);
    }
}
