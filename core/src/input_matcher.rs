//! `InputMatcher`: Domain-agnostic value matching
//!
//! The `InputMatcher` trait matches against type-erased `MatchingData`.
//! It is intentionally **non-generic**: a `NameMatcher` does not care whether
//! the name came from a payment gateway or a shipping rate.
//!
//! # Available Matchers
//!
//! - [`TagMatcher`]: include/exclude over a tag set
//! - [`NameMatcher`]: exact or partial match against a list of names
//! - [`KeywordMatcher`]: keyword search in free text (shipping addresses)
//!
//! All selectors are normalized with [`normalize`] at construction, and
//! construction is where bad configuration is rejected.

use crate::{ConfigError, MatchingData, NameMatchType, TagMatchType};
use crate::{MAX_SELECTORS, MAX_SELECTOR_LENGTH};
use std::collections::HashSet;
use std::fmt::Debug;

/// Matches against type-erased [`MatchingData`].
///
/// Implementations return `false` when the value has the wrong shape
/// (e.g. a `TagMatcher` handed a single string).
///
/// # Example
///
/// ```
/// use gatekeep::{InputMatcher, MatchingData, NameMatcher, NameMatchType};
///
/// let matcher = NameMatcher::new(NameMatchType::Exact, ["NET30"]).unwrap();
/// assert!(matcher.matches(&MatchingData::String(" net30 ".to_string())));
/// assert!(!matcher.matches(&MatchingData::String("NET60".to_string())));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `InputMatcher`",
    label = "this type cannot match against MatchingData",
    note = "use the built-in matchers (TagMatcher, NameMatcher, KeywordMatcher) or implement `matches(&self, &MatchingData) -> bool`"
)]
pub trait InputMatcher: Send + Sync + Debug {
    /// Check if the given value matches.
    fn matches(&self, value: &MatchingData) -> bool;
}

// Blanket implementation for boxed InputMatchers
#[diagnostic::do_not_recommend]
impl InputMatcher for Box<dyn InputMatcher> {
    fn matches(&self, value: &MatchingData) -> bool {
        (**self).matches(value)
    }
}

/// Canonical form for every comparison: trimmed and lowercased.
///
/// ```
/// assert_eq!(gatekeep::normalize("  Rural District "), "rural district");
/// ```
#[must_use]
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Normalize a configured selector list, enforcing the size limits.
fn normalize_selectors<I, S>(field: &'static str, selectors: I) -> Result<Vec<String>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    for selector in selectors {
        let selector = selector.as_ref();
        if selector.len() > MAX_SELECTOR_LENGTH {
            return Err(ConfigError::SelectorTooLong {
                field,
                len: selector.len(),
                max: MAX_SELECTOR_LENGTH,
            });
        }
        out.push(normalize(selector));
    }
    if out.len() > MAX_SELECTORS {
        return Err(ConfigError::TooManySelectors {
            field,
            count: out.len(),
            max: MAX_SELECTORS,
        });
    }
    Ok(out)
}

// ═══════════════════════════════════════════════════════════════════════════════
// TagMatcher
// ═══════════════════════════════════════════════════════════════════════════════

/// Relates a subject's tags to a configured tag set.
///
/// - `Include`: matches when the two sets intersect.
/// - `Exclude`: matches when they do not.
///
/// With no configured tags the intersection is always empty, so `Include`
/// never matches and `Exclude` always does.
///
/// # Example
///
/// ```
/// use gatekeep::{TagMatcher, TagMatchType};
///
/// let matcher = TagMatcher::new(TagMatchType::Include, ["NET30"]).unwrap();
/// assert!(matcher.matches_tags(&["vip", " net30"]));
/// assert!(!matcher.matches_tags(&["vip"]));
/// ```
#[derive(Debug, Clone)]
pub struct TagMatcher {
    match_type: TagMatchType,
    tags: HashSet<String>,
}

impl TagMatcher {
    /// Create a tag matcher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the tag list exceeds the selector limits.
    pub fn new<I, S>(match_type: TagMatchType, tags: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = normalize_selectors("customer_tags", tags)?;
        Ok(Self {
            match_type,
            tags: tags.into_iter().collect(),
        })
    }

    /// Evaluate against a subject's (unnormalized) tags.
    pub fn matches_tags<S: AsRef<str>>(&self, subject_tags: &[S]) -> bool {
        let intersects = subject_tags
            .iter()
            .any(|tag| self.tags.contains(&normalize(tag.as_ref())));
        match self.match_type {
            TagMatchType::Include => intersects,
            TagMatchType::Exclude => !intersects,
        }
    }
}

impl InputMatcher for TagMatcher {
    fn matches(&self, value: &MatchingData) -> bool {
        value.as_list().is_some_and(|tags| self.matches_tags(tags))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// NameMatcher
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches a candidate's name against configured names.
///
/// - `Exact`: the normalized name equals a configured name.
/// - `Partial`: the normalized name contains a configured name.
///
/// An empty name list never matches.
///
/// # Example
///
/// ```
/// use gatekeep::{NameMatcher, NameMatchType};
///
/// let matcher = NameMatcher::new(NameMatchType::Partial, ["Rural"]).unwrap();
/// assert!(matcher.matches_name("Standard Rural Shipping"));
/// assert!(!matcher.matches_name("Express"));
/// ```
#[derive(Debug, Clone)]
pub struct NameMatcher {
    match_type: NameMatchType,
    names: Vec<String>,
}

impl NameMatcher {
    /// Create a name matcher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the name list exceeds the selector limits.
    pub fn new<I, S>(match_type: NameMatchType, names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = normalize_selectors("names", names)?;
        tracing::debug!(%match_type, names = ?names, "compiled name matcher");
        Ok(Self { match_type, names })
    }

    /// Evaluate against an (unnormalized) candidate name.
    pub fn matches_name(&self, name: &str) -> bool {
        let name = normalize(name);
        match self.match_type {
            NameMatchType::Exact => self.names.iter().any(|n| *n == name),
            NameMatchType::Partial => self.names.iter().any(|n| name.contains(n.as_str())),
        }
    }
}

impl InputMatcher for NameMatcher {
    fn matches(&self, value: &MatchingData) -> bool {
        value.as_str().is_some_and(|s| self.matches_name(s))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// KeywordMatcher
// ═══════════════════════════════════════════════════════════════════════════════

/// Matches free text containing any configured keyword.
///
/// The text is lowercased but not trimmed: it is usually the joined address
/// lines, where the separating space is significant.
///
/// # Example
///
/// ```
/// use gatekeep::KeywordMatcher;
///
/// let matcher = KeywordMatcher::new(["RD", "Rural"]).unwrap();
/// assert!(matcher.matches_text("12 Old Rural Road "));
/// assert!(!matcher.matches_text("1 Main St "));
/// ```
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<String>,
}

impl KeywordMatcher {
    /// Create a keyword matcher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the keyword list exceeds the selector limits.
    pub fn new<I, S>(keywords: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            keywords: normalize_selectors("address_selectors", keywords)?,
        })
    }

    /// Returns `true` if any keyword occurs in `text`.
    pub fn matches_text(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

impl InputMatcher for KeywordMatcher {
    fn matches(&self, value: &MatchingData) -> bool {
        value.as_str().is_some_and(|s| self.matches_text(s))
    }
}
