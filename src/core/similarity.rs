use std::collections::BTreeSet;

/// Jaccard similarity of two tag sets: |S1 ∩ S2| / |S1 ∪ S2|
///
/// Returns 0.0 when both sets are empty.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use kindred_match::jaccard_similarity;
///
/// let a: BTreeSet<&str> = ["coding", "philosophy"].into_iter().collect();
/// let b: BTreeSet<&str> = ["coding", "music"].into_iter().collect();
/// assert!((jaccard_similarity(&a, &b) - 1.0 / 3.0).abs() < 1e-9);
/// ```
#[inline]
pub fn jaccard_similarity<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        return 0.0;
    }

    intersection as f64 / union as f64
}

/// Whether two sets share at least one element
#[inline]
pub fn intersects<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> bool {
    a.intersection(b).next().is_some()
}
