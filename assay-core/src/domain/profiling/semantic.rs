// assay-core/src/domain/profiling/semantic.rs

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Column meanings recognised from the column name, each with a format check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticMarker {
    Email,
    Phone,
    PostalCode,
}

impl SemanticMarker {
    const ALL: [SemanticMarker; 3] = [Self::Email, Self::Phone, Self::PostalCode];

    fn name_tokens(&self) -> &'static [&'static str] {
        match self {
            Self::Email => &["email", "mail", "courriel"],
            Self::Phone => &["phone", "tel", "telephone", "mobile"],
            Self::PostalCode => &["postal", "zip", "zipcode", "postcode"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::PostalCode => "postal_code",
        }
    }

    /// Looks for a marker token in the column name (`CONTACT_EMAIL`, `tel_mobile`, `code_postal`).
    pub fn detect(column: &str) -> Option<Self> {
        let lower = column.to_lowercase();
        let tokens: Vec<&str> = lower
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        Self::ALL
            .into_iter()
            .find(|marker| tokens.iter().any(|t| marker.name_tokens().contains(t)))
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        Self::ALL.into_iter().find(|m| m.as_str() == tag)
    }

    // Patterns are literals, compiling them cannot fail.
    #[allow(clippy::unwrap_used)]
    pub fn pattern(&self) -> &'static Regex {
        static EMAIL: OnceLock<Regex> = OnceLock::new();
        static PHONE: OnceLock<Regex> = OnceLock::new();
        static POSTAL: OnceLock<Regex> = OnceLock::new();

        match self {
            Self::Email => EMAIL.get_or_init(|| {
                Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap()
            }),
            Self::Phone => PHONE.get_or_init(|| Regex::new(r"^\+?[0-9][0-9 .\-()]{5,19}$").unwrap()),
            Self::PostalCode => {
                POSTAL.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-]{1,8}[A-Za-z0-9]$").unwrap())
            }
        }
    }
}
