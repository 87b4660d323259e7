// assay-core/src/domain/structure/pattern.rs

/// `"LIV0EU_*"` -> `"LIV0EU_"`. Patterns without a trailing wildcard are used as-is.
pub fn pattern_prefix(pattern: &str) -> &str {
    pattern.strip_suffix('*').unwrap_or(pattern)
}

/// Columns starting with the pattern's prefix, in column order.
pub fn match_pattern<'a, I>(pattern: &str, columns: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let prefix = pattern_prefix(pattern);
    columns
        .into_iter()
        .filter(|c| c.starts_with(prefix))
        .cloned()
        .collect()
}
