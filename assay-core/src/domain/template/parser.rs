// assay-core/src/domain/template/parser.rs
//
// Annotated template format:
//
//   -- @name: count_rows
//   -- @description: Row count of a staging table
//   SELECT COUNT(*) FROM {table}
//
// A query runs from its `@name:` line to the next one (or EOF).

use std::collections::BTreeMap;
use tracing::warn;

const NAME_MARKER: &str = "@name:";
const DESCRIPTION_MARKER: &str = "@description:";

enum LineKind<'a> {
    Name(&'a str),
    Description,
    Comment,
    Blank,
    Body,
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    let is_comment = trimmed.starts_with("--");
    let annotation = trimmed.trim_start_matches('-').trim_start();

    if let Some(name) = annotation.strip_prefix(NAME_MARKER) {
        return LineKind::Name(name.trim());
    }
    if annotation.starts_with(DESCRIPTION_MARKER) {
        return LineKind::Description;
    }
    if is_comment {
        LineKind::Comment
    } else {
        LineKind::Body
    }
}

/// Parses template text into `name -> body`.
///
/// Comment and blank lines are dropped from bodies; a query whose body ends up
/// empty is not registered. Nothing here fails: malformed input is skipped.
pub fn parse_template(content: &str) -> BTreeMap<String, String> {
    let mut queries = BTreeMap::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for line in content.lines() {
        match classify(line) {
            LineKind::Name(name) => {
                if let Some((prev, body)) = current.take() {
                    register(&mut queries, prev, &body);
                }
                current = if name.is_empty() {
                    warn!("Ignoring '@name:' annotation without identifier");
                    None
                } else {
                    Some((name, Vec::new()))
                };
            }
            LineKind::Description | LineKind::Comment | LineKind::Blank => {}
            LineKind::Body => {
                if let Some((_, body)) = current.as_mut() {
                    body.push(line.trim_end());
                }
            }
        }
    }

    if let Some((name, body)) = current {
        register(&mut queries, name, &body);
    }

    queries
}

fn register(queries: &mut BTreeMap<String, String>, name: &str, body: &[&str]) {
    if body.is_empty() {
        return;
    }
    if queries.insert(name.to_string(), body.join("\n")).is_some() {
        warn!(query = name, "Duplicate query name in template file, last definition wins");
    }
}
