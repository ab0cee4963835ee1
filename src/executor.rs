//! IR execution against a record snapshot.
//!
//! Filtering ANDs every IR filter over the snapshot, preserving the store's
//! insertion order. Selection then runs in fixed order: TOP truncates the
//! ordered sequence, RANDOM samples uniformly without replacement from
//! whatever TOP left (discarding order). The randomness source is supplied
//! by the caller, so independent runs stay independent and tests can seed.

use crate::ast::{Field, MatchMode};
use crate::ir::{FilterIr, Ir};
use crate::matching;
use crate::store::QuoteRecord;
use rand::Rng;

fn field_text(record: &QuoteRecord, field: Field) -> &str {
    match field {
        Field::Quote => &record.content,
        Field::Author => &record.author,
        Field::Theme => record.raw_tags(),
    }
}

fn match_text(text: &str, value: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Exact => matching::match_exact(text, value),
        MatchMode::Forgiving => matching::match_forgiving(text, value),
        MatchMode::Loose => matching::match_loose(text, value),
    }
}

fn matches_filter(record: &QuoteRecord, filter: &FilterIr) -> bool {
    let text = field_text(record, filter.field);
    if filter.field == Field::Theme {
        // A theme filter matches if any parsed tag matches.
        matching::parse_tag_list(text)
            .iter()
            .any(|tag| match_text(tag, &filter.value, filter.mode))
    } else {
        match_text(text, &filter.value, filter.mode)
    }
}

/// Phase 6: apply the IR to a snapshot of the record source.
pub fn execute<R: Rng + ?Sized>(
    ir: &Ir,
    records: &[QuoteRecord],
    rng: &mut R,
) -> Vec<QuoteRecord> {
    let mut result: Vec<QuoteRecord> = records
        .iter()
        .filter(|record| ir.filters.iter().all(|f| matches_filter(record, f)))
        .cloned()
        .collect();

    // TOP first, respecting store order.
    if let Some(top) = ir.selection.top {
        let top = usize::try_from(top).unwrap_or(0);
        if top < result.len() {
            result.truncate(top);
        }
    }

    // Then RANDOM over whatever TOP left.
    if let Some(random) = ir.selection.random {
        let wanted = usize::try_from(random).unwrap_or(0);
        if wanted == 0 {
            result.clear();
        } else {
            let amount = wanted.min(result.len());
            result = rand::seq::index::sample(rng, result.len(), amount)
                .into_iter()
                .map(|i| result[i].clone())
                .collect();
        }
    }

    result
}
