//! Closest-name suggestions.
//!
//! Similarity is `1 - d / max_len`, where `d` is the Levenshtein distance
//! between the lower-cased strings and `max_len` the longer length in
//! characters.

/// Levenshtein (insert/delete/substitute) distance in characters.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    if b.is_empty() {
        return a.chars().count();
    }

    // Two DP rows: distances between `a[..i]` and `b[..j]`.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitute.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Case-insensitive similarity in `[0, 1]`; two empty strings are
/// identical.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / max_len as f64
}

/// Up to `limit` entries of `corpus` at least `cutoff` similar to
/// `query`, most similar first. Ties keep corpus order and duplicates are
/// reported once.
#[must_use]
pub fn close_matches(query: &str, corpus: &[String], limit: usize, cutoff: f64) -> Vec<String> {
    let mut scored: Vec<(f64, &String)> = Vec::new();
    for candidate in corpus {
        if scored.iter().any(|(_, seen)| *seen == candidate) {
            continue;
        }
        let score = similarity(query, candidate);
        if score >= cutoff {
            scored.push((score, candidate));
        }
    }

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.clone())
        .collect()
}
