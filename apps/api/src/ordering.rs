//! Display ordering.
//!
//! Two shapes of ordering are persisted:
//! - numeric id lists (experiences, education) are written back as one
//!   `sort_order = position` update per id;
//! - name lists (tools, industries) are stored whole as a `TEXT[]` column on
//!   the profile row and merged against the names actually present at read
//!   time with [`apply_order`].
//!
//! Positions are not identities. A reorder always rewrites the full sequence.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::errors::AppError;

/// Rejects id lists that name the same record twice. Runs before any write so
/// a bad request never leaves a partial order behind.
pub fn ensure_unique_ids(field: &str, ids: &[i32]) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(*id) {
            return Err(AppError::field(
                field,
                format!("id {id} appears more than once"),
            ));
        }
    }
    Ok(())
}

/// Pairs every id with the `sort_order` it will be written with.
pub fn assign_positions(ids: &[i32]) -> Vec<(i32, i32)> {
    ids.iter()
        .enumerate()
        .map(|(position, id)| (*id, position as i32))
        .collect()
}

/// Cleans an admin-submitted name list before it is stored: names are
/// trimmed, blanks dropped, and repeats collapsed to their first occurrence.
pub fn normalize_names(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(n.clone()))
        .collect()
}

/// Merges a stored order array with the names currently present.
///
/// Stored names that are still present keep their stored relative order.
/// Stale stored names are dropped. Present names the array has never seen are
/// appended alphabetically.
pub fn apply_order(stored: &[String], present: &[String]) -> Vec<String> {
    let present_set: HashSet<&str> = present.iter().map(String::as_str).collect();

    let mut placed: HashSet<&str> = HashSet::new();
    let mut ordered: Vec<String> = Vec::with_capacity(present_set.len());
    for name in stored {
        if present_set.contains(name.as_str()) && placed.insert(name.as_str()) {
            ordered.push(name.clone());
        }
    }

    let mut remaining: Vec<&String> = present
        .iter()
        .filter(|n| !placed.contains(n.as_str()))
        .collect();
    remaining.sort_by(|a, b| compare_names(a, b));
    remaining.dedup();

    ordered.extend(remaining.into_iter().cloned());
    ordered
}

/// Case-insensitive alphabetical order, falling back to byte order so the
/// result is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
