//! SQL literal escaping

/// Escape text for use inside a single-quoted SQL literal
///
/// Quotes are doubled. With `like` set, the backslash and the `%` and `_`
/// wildcards are also escaped with a backslash, matching an `ESCAPE '\'`
/// clause.
pub fn escape_sql(value: &str, like: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\'' => out.push_str("''"),
            '\\' | '%' | '_' if like => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
