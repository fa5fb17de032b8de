//! Edit-distance string similarity

/// Levenshtein distance over Unicode scalar values.
///
/// Keeps a single row of `a.len() + 1` cells and sweeps it once per
/// character of `b`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let mut row: Vec<usize> = (0..=a.len()).collect();

    for (j, cb) in b.chars().enumerate() {
        let mut diag = row[0];
        row[0] = j + 1;
        for (i, &ca) in a.iter().enumerate() {
            let above = row[i + 1];
            row[i + 1] = if ca == cb {
                diag
            } else {
                diag.min(row[i]).min(above) + 1
            };
            diag = above;
        }
    }

    row[a.len()]
}

/// Case-insensitive similarity in `[0, 1]`: `1 - distance / longer_len`.
///
/// Lengths are counted after lower-casing, so a character whose lower-case
/// form is longer (`'İ'` becomes two chars) still scores inside `[0, 1]`.
/// Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / max_len as f64
}
