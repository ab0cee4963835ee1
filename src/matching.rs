//! The three text-matching predicates, plus tag-list parsing.
//!
//! - **exact** — whole-word, case-sensitive, character-precise.
//! - **forgiving** — case/whitespace-normalized substring, or any field
//!   word within similarity 0.8 of the whole query.
//! - **loose** — forgiving baseline plus naive stemming of the query words.
//!
//! The 0.8 similarity threshold and the suffix list used by the stemmer are
//! tuning constants the language definition fixes; do not adjust them.

use regex::Regex;

/// Collapse whitespace runs to single spaces, trim, and lowercase.
fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Symmetric similarity ratio in [0, 1]: 1.0 for identical strings,
/// otherwise `2 * LCS(a, b) / (|a| + |b|)` over characters.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Two-row LCS table.
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in &a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
        curr[0] = 0;
    }

    2.0 * prev[b.len()] as f64 / (a.len() + b.len()) as f64
}

/// Exact matching: the query occurs in the field as a whole word, bounded
/// by non-word characters or string edges. Case-sensitive, no
/// normalization, so "Freedom" does not match "Freedoms".
pub fn match_exact(field: &str, query: &str) -> bool {
    let pattern = format!(r"\b{}\b", regex::escape(query));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(field),
        Err(_) => false,
    }
}

/// Forgiving matching: case-insensitive, tolerant of spacing and small
/// misspellings.
pub fn match_forgiving(field: &str, query: &str) -> bool {
    if field.is_empty() || query.is_empty() {
        return false;
    }

    let field_norm = normalize(field);
    let query_norm = normalize(query);

    // Direct substring first.
    if field_norm.contains(&query_norm) {
        return true;
    }

    // Then approximate per-word similarity against the whole query.
    field_norm
        .split_whitespace()
        .any(|word| similarity(word, &query_norm) >= 0.8)
}

/// Very naive stemming for loose matching: strip the first matching suffix
/// of `ing`/`ed`/`es`/`s`, only from words longer than three characters.
fn stem(word: &str) -> String {
    let w = word.to_lowercase();
    for suffix in ["ing", "ed", "es", "s"] {
        if w.chars().count() > 3 && w.ends_with(suffix) {
            return w[..w.len() - suffix.len()].to_string();
        }
    }
    w
}

/// Loose matching: forgiving plus basic morphology — a field word matches
/// when it starts with, or is similar to, the stem of any query word.
pub fn match_loose(field: &str, query: &str) -> bool {
    if field.is_empty() || query.is_empty() {
        return false;
    }

    let field_norm = normalize(field);
    let query_norm = normalize(query);

    if field_norm.contains(&query_norm) {
        return true;
    }

    let stems: Vec<String> = query_norm.split_whitespace().map(stem).collect();

    field_norm.split_whitespace().any(|fw| {
        stems.iter().any(|st| {
            !st.is_empty() && (fw.starts_with(st.as_str()) || similarity(fw, st) >= 0.8)
        })
    })
}

/// Parse the raw tags text the store keeps per record.
///
/// The store encodes tag lists as bracketed, quoted elements, e.g.
/// `['Famous Quotes', 'Wisdom']` or `["hope"]`. Anything that does not
/// parse as such a list falls back to a single-element list holding the
/// raw text verbatim; empty raw text yields an empty list.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    parse_list(raw).unwrap_or_else(|| vec![raw.to_string()])
}

fn parse_list(raw: &str) -> Option<Vec<String>> {
    let inner = raw.trim().strip_prefix('[')?.strip_suffix(']')?;
    let mut chars = inner.chars().peekable();
    let mut tags = Vec::new();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        let quote = match chars.next() {
            None => break, // end of list (also covers a trailing comma)
            Some(c @ ('\'' | '"')) => c,
            Some(_) => return None,
        };

        let mut tag = String::new();
        loop {
            match chars.next() {
                None => return None, // unterminated element
                Some('\\') => tag.push(chars.next()?),
                Some(c) if c == quote => break,
                Some(c) => tag.push(c),
            }
        }
        tags.push(tag);

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(_) => return None,
        }
    }

    Some(tags)
}
