//! Pure filter/sort engine over the lead collection.
//!
//! # Responsibility
//! - Map (leads, filter) to an ordered, filtered subsequence.
//! - Keep text matching and ordering locale-stable via one shared
//!   normalizer.
//!
//! # Invariants
//! - Input slices are never mutated; equal inputs give deep-equal outputs.
//! - Ties sort by ascending id; `desc` reverses the whole comparator,
//!   tie-break included, so repeated calls paginate identically.

use std::cmp::Ordering;

use crate::model::filter::{FilterState, SortField, SortOrder};
use crate::model::lead::Lead;

/// Case-folds text and strips Latin diacritics for search and ordering.
///
/// "José Núñez" and "jose nunez" normalize to the same string, so accented
/// and plain spellings match each other in both directions.
pub fn normalize_text(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_diacritic)
        .collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Selects the leads visible under `filter`, ordered for display.
///
/// Steps: substring match of the normalized search term against
/// name+company+email+source, then the status facet, then the field sort
/// with ascending-id tie-break, reversed wholesale for descending order.
pub fn select(leads: &[Lead], filter: &FilterState) -> Vec<Lead> {
    let term = normalize_text(filter.search.trim());

    let mut selected: Vec<Lead> = leads
        .iter()
        .filter(|lead| term.is_empty() || searchable_text(lead).contains(&term))
        .filter(|lead| filter.status.matches(lead.status))
        .cloned()
        .collect();

    selected.sort_by(|a, b| {
        let ordering = compare_by_field(a, b, filter.sort_by).then_with(|| a.id.cmp(&b.id));
        match filter.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    selected
}

fn searchable_text(lead: &Lead) -> String {
    normalize_text(&format!(
        "{} {} {} {}",
        lead.name, lead.company, lead.email, lead.source
    ))
}

fn compare_by_field(a: &Lead, b: &Lead, field: SortField) -> Ordering {
    match field {
        SortField::Score => a.score.cmp(&b.score),
        SortField::Name => normalize_text(&a.name).cmp(&normalize_text(&b.name)),
        SortField::Company => normalize_text(&a.company).cmp(&normalize_text(&b.company)),
        SortField::Source => normalize_text(&a.source).cmp(&normalize_text(&b.source)),
    }
}

/// Rounded mean score of `leads`, `0` when empty.
pub fn average_score(leads: &[Lead]) -> i64 {
    if leads.is_empty() {
        return 0;
    }
    let total: i64 = leads.iter().map(|lead| lead.score).sum();
    (total as f64 / leads.len() as f64).round() as i64
}
