//! `MatchingData`: Erased data that flows between `DataInput` and `InputMatcher`
//!
//! `DataInputs` pull a value out of the checkout (the customer's tags, the
//! shipping address, a candidate's name) and hand it over as `MatchingData`.
//! `InputMatchers` only ever see this type, which keeps them non-generic and
//! reusable for gateways, rates and carts alike.

/// The erased data type that flows between `DataInput` and `InputMatcher`.
///
/// # Variants
///
/// - `None`: No data available (no customer, no shipping address)
/// - `String`: A single string (candidate name, joined address lines)
/// - `List`: A list of strings (customer tags)
///
/// # Example
///
/// ```
/// use gatekeep::MatchingData;
///
/// let data = MatchingData::String("NET30".to_string());
/// assert_eq!(data.as_str(), Some("NET30"));
/// assert!(!data.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MatchingData {
    /// No data available (extractor returned nothing).
    /// When a qualifier receives this, it evaluates to `false`.
    #[default]
    None,

    /// A single string value.
    String(String),

    /// A list of string values, e.g. customer tags.
    List(Vec<String>),
}

impl MatchingData {
    /// Returns `true` if this is the `None` variant.
    ///
    /// ```
    /// use gatekeep::MatchingData;
    ///
    /// assert!(MatchingData::None.is_none());
    /// assert!(!MatchingData::List(vec![]).is_none());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Try to get the value as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => Option::None,
        }
    }

    /// Try to get the value as a list of strings.
    ///
    /// A `String` is not promoted to a one-element list; matchers that take
    /// lists reject scalars.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(l) => Some(l.as_slice()),
            _ => Option::None,
        }
    }

    /// Returns a string describing the type of this data.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::String(_) => "string",
            Self::List(_) => "list",
        }
    }
}

impl From<String> for MatchingData {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for MatchingData {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<Vec<String>> for MatchingData {
    fn from(l: Vec<String>) -> Self {
        Self::List(l)
    }
}

impl<T: Into<MatchingData>> From<Option<T>> for MatchingData {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::None, Into::into)
    }
}
