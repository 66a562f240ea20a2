//! "Did you mean?" suggestion helper for unknown argument names.

/// Levenshtein edit distance between two strings.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, val) in dp[0].iter_mut().enumerate() {
        *val = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[a.len()][b.len()]
}

/// The candidate closest to `input` within `max_distance`, if any.
///
/// Ties resolve to the earliest candidate, so callers iterating arguments in
/// declaration order get deterministic suggestions.
pub fn closest<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    max_distance: usize,
) -> Option<&'a str> {
    candidates
        .into_iter()
        .filter(|c| *c != input)
        .map(|c| (edit_distance(input, c), c))
        .filter(|(dist, _)| *dist <= max_distance)
        .min_by_key(|(dist, _)| *dist)
        .map(|(_, name)| name)
}
