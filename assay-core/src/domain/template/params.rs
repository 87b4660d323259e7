// assay-core/src/domain/template/params.rs

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Named values for `{key}` placeholders. Values are stored in their string form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        self.values.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

// Literal pattern, compiling it cannot fail.
#[allow(clippy::unwrap_used)]
fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([^{}]+)\}").unwrap())
}

/// Replaces every literal `{key}` with its value. No escaping, no coercion;
/// placeholders without a supplied key stay untouched.
///
/// One pass over the original text: braces carried in by a value are never
/// expanded again.
pub fn substitute_params(text: &str, params: &Params) -> String {
    if params.is_empty() {
        return text.to_string();
    }
    let replaced: Cow<'_, str> = placeholder().replace_all(text, |caps: &Captures<'_>| {
        match params.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        }
    });
    replaced.into_owned()
}
