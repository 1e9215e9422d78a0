//! SQL identifier sanitization.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W").expect("Hardcode regex pattern"));

static UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("Hardcode regex pattern"));

/// Derives a SQL identifier from a column or table name.
///
/// Every non-word character becomes an underscore, runs of underscores
/// collapse into one and leading/trailing underscores are trimmed. An empty
/// result, or one starting with a digit, gets a `col_` prefix. The result is
/// lower-cased. The function is total, and idempotent for every name that
/// holds at least one word character.
pub fn sanitize(name: &str) -> String {
    let replaced = NON_WORD.replace_all(name.trim(), "_");
    let collapsed = UNDERSCORES.replace_all(&replaced, "_");
    let trimmed = collapsed.trim_matches('_');
    let identifier = match trimmed.chars().next() {
        None => "col_".to_owned(),
        Some(first) if first.is_numeric() => format!("col_{trimmed}"),
        Some(_) => trimmed.to_owned(),
    };
    identifier.to_lowercase()
}

/// Groups source names that sanitize to the same identifier.
///
/// Only identifiers produced by more than one distinct source name are
/// returned, each with its source names in input order.
pub fn identifier_collisions<'a, I>(names: I) -> BTreeMap<String, Vec<&'a str>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups: BTreeMap<String, Vec<&'a str>> = BTreeMap::new();
    for name in names {
        let sources = groups.entry(sanitize(name)).or_default();
        if !sources.contains(&name) {
            sources.push(name);
        }
    }
    groups.retain(|_, sources| sources.len() > 1);
    groups
}
