//! Helpers for the name substring search.

/// Build an `ILIKE` pattern that matches `term` anywhere in the column.
///
/// `%`, `_` and `\` in the term are escaped (PostgreSQL's default `LIKE`
/// escape character is `\`) so user input is matched literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
