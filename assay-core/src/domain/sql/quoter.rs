// assay-core/src/domain/sql/quoter.rs

// Query bodies stay opaque text: only the identifiers and literals the core
// injects itself are quoted here.

pub struct Quoter;

impl Quoter {
    /// `name` -> `"name"`, doubling embedded quotes.
    pub fn identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    /// Dotted names are quoted part by part: `dwh.orders` -> `"dwh"."orders"`.
    /// Already-quoted input is passed through unchanged.
    pub fn table(name: &str) -> String {
        let name = name.trim();
        if name.contains('"') {
            return name.to_string();
        }
        name.split('.')
            .map(Self::identifier)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// `O'Hara` -> `'O''Hara'`.
    pub fn literal(value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }
}
