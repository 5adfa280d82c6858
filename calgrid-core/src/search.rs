//! Search filter view.

use crate::store::Buckets;

/// Project `buckets` onto the events matching `term`.
///
/// Matching is a case-insensitive substring test against the title, the
/// description and the date-key. Dates with no matching events are left out.
/// An empty term passes every bucket through unchanged.
pub fn filter(buckets: &Buckets, term: &str) -> Buckets {
    if term.is_empty() {
        return buckets.clone();
    }

    let needle = term.to_lowercase();

    buckets
        .iter()
        .filter_map(|(date, events)| {
            let matching: Vec<_> = events.iter().filter(|e| e.matches(&needle)).cloned().collect();
            (!matching.is_empty()).then(|| (*date, matching))
        })
        .collect()
}
