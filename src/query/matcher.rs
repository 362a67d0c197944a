// ---------------------------------------------------------------------------
// Fuzzy column matching
// ---------------------------------------------------------------------------

/// One column-name match with its 0–100 similarity score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMatch {
    pub column: String,
    pub score: u8,
}

/// Match every column name against the query with a partial-substring
/// similarity and keep those scoring at least `threshold`, sorted by score
/// descending. Ties keep the original column order (the sort is stable).
///
/// No column clearing the threshold is a valid outcome, not an error: the
/// result is simply empty and callers treat "no match" as terminal.
pub fn match_columns<'a, I>(query: &str, columns: I, threshold: u8) -> Vec<ColumnMatch>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = query.to_lowercase();

    let mut matches: Vec<ColumnMatch> = columns
        .into_iter()
        .map(|col| ColumnMatch {
            column: col.to_string(),
            score: partial_ratio(&col.to_lowercase(), &query),
        })
        .filter(|m| m.score >= threshold)
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

/// Edit-distance ratio (0–100) of `needle` against the best-aligned
/// contiguous window of `haystack`, so a column name can match as a
/// substring anywhere in the query.
fn partial_ratio(needle: &str, haystack: &str) -> u8 {
    if needle.is_empty() || haystack.is_empty() {
        return 0;
    }
    let needle_chars: Vec<char> = needle.chars().collect();
    let haystack_chars: Vec<char> = haystack.chars().collect();

    if needle_chars.len() >= haystack_chars.len() {
        return to_score(strsim::normalized_levenshtein(needle, haystack));
    }

    let mut best = 0.0f64;
    for window in haystack_chars.windows(needle_chars.len()) {
        let slice: String = window.iter().collect();
        let sim = strsim::normalized_levenshtein(needle, &slice);
        if sim > best {
            best = sim;
        }
    }
    to_score(best)
}

fn to_score(similarity: f64) -> u8 {
    (similarity * 100.0).round() as u8
}
