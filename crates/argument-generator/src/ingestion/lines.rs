//! Line-based argument heuristic

/// Number of lines returned by `/extract-arguments`
pub const MAX_ARGUMENTS: usize = 5;

/// First `limit` non-blank lines of `text`, trimmed, in document order
pub fn leading_lines(text: &str, limit: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(limit)
        .map(str::to_string)
        .collect()
}
