//! Match types: the closed set of comparison modes a rule author can pick.
//!
//! Rule configs carry these as plain words (`include`, `exact`, ...). They are
//! parsed through [`FromStr`], so an unknown word is a [`ConfigError`] at load
//! time instead of a silent mismatch at checkout.
//!
//! A leading `:` is accepted (`:partial`), matching the symbol spelling of
//! older script settings.

use crate::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How a tag rule relates the customer's tags to the configured tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum TagMatchType {
    /// The customer carries at least one configured tag.
    Include,
    /// The customer carries none of the configured tags.
    Exclude,
}

impl TagMatchType {
    const ACCEPTED: &'static [&'static str] = &["include", "exclude"];
}

impl FromStr for TagMatchType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match strip_symbol(s) {
            "include" => Ok(Self::Include),
            "exclude" => Ok(Self::Exclude),
            _ => Err(ConfigError::UnknownMatchType {
                kind: "tag",
                value: s.to_string(),
                expected: Self::ACCEPTED,
            }),
        }
    }
}

impl TryFrom<String> for TagMatchType {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for TagMatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Include => f.write_str("include"),
            Self::Exclude => f.write_str("exclude"),
        }
    }
}

/// How a name rule compares a candidate's name to the configured names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum NameMatchType {
    /// Normalized names are equal.
    Exact,
    /// The normalized candidate name contains a configured name.
    Partial,
}

impl NameMatchType {
    const ACCEPTED: &'static [&'static str] = &["exact", "partial"];
}

impl FromStr for NameMatchType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match strip_symbol(s) {
            "exact" => Ok(Self::Exact),
            "partial" => Ok(Self::Partial),
            _ => Err(ConfigError::UnknownMatchType {
                kind: "name",
                value: s.to_string(),
                expected: Self::ACCEPTED,
            }),
        }
    }
}

impl TryFrom<String> for NameMatchType {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for NameMatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Partial => f.write_str("partial"),
        }
    }
}

fn strip_symbol(s: &str) -> &str {
    s.strip_prefix(':').unwrap_or(s)
}
