//! Qualifier: a yes/no question about a checkout context
//!
//! A [`Qualifier`] combines a [`DataInput`] with an [`InputMatcher`]: the input
//! pulls a value out of the context, the matcher judges it. "Does this customer
//! carry the tag?" and "is this gateway named NET30?" are both qualifiers.
//!
//! [`AddressQualifier`] is the address-keyword check used by the rural
//! shipping campaign, usable directly on a [`ShippingAddress`].

use crate::{
    Candidate, CandidateNameInput, Cart, ConfigError, CustomerTagsInput, DataInput, InputMatcher,
    KeywordMatcher, MatchingData, NameMatcher, QualifierTrace, ShippingAddress,
    ShippingAddressInput, TagMatcher,
};
use std::fmt::Debug;

/// A single check: combines a [`DataInput`] with an [`InputMatcher`].
///
/// # INV: None → false
///
/// If the `DataInput` returns [`MatchingData::None`], the qualifier evaluates
/// to `false` whatever the matcher is. A guest cart therefore never
/// qualifies on customer tags, not even for an `exclude` tag rule.
///
/// # Example
///
/// ```
/// use gatekeep::{Cart, Customer, Qualifier, TagMatcher, TagMatchType};
///
/// let q = Qualifier::customer_tags(TagMatcher::new(TagMatchType::Include, ["NET30"]).unwrap());
/// assert!(q.evaluate(&Cart::new().with_customer(Customer::new(["net30"]))));
/// assert!(!q.evaluate(&Cart::new()));
/// ```
pub struct Qualifier<Ctx> {
    input: Box<dyn DataInput<Ctx>>,
    matcher: Box<dyn InputMatcher>,
}

impl<Ctx> Qualifier<Ctx> {
    /// Create a qualifier from a `DataInput` and `InputMatcher`.
    #[must_use]
    pub fn new(input: Box<dyn DataInput<Ctx>>, matcher: Box<dyn InputMatcher>) -> Self {
        Self { input, matcher }
    }

    /// Evaluate this qualifier against the given context.
    pub fn evaluate(&self, ctx: &Ctx) -> bool {
        let data = self.input.get(ctx);
        match data {
            MatchingData::None => false, // INV: None → false
            _ => self.matcher.matches(&data),
        }
    }

    /// Evaluate with a trace of the extracted data, for debugging.
    #[must_use]
    pub fn evaluate_with_trace(&self, ctx: &Ctx) -> QualifierTrace {
        let data = self.input.get(ctx);
        let matched = match &data {
            MatchingData::None => false,
            _ => self.matcher.matches(&data),
        };
        QualifierTrace {
            matched,
            input: format!("{:?}", self.input),
            data_type: data.type_name(),
            data: format!("{data:?}"),
            matcher: format!("{:?}", self.matcher),
        }
    }
}

impl Qualifier<Cart> {
    /// Does the cart's customer satisfy the tag matcher?
    #[must_use]
    pub fn customer_tags(matcher: TagMatcher) -> Self {
        Self::new(Box::new(CustomerTagsInput), Box::new(matcher))
    }

    /// Does the cart's shipping address contain any keyword?
    #[must_use]
    pub fn shipping_address(matcher: KeywordMatcher) -> Self {
        Self::new(Box::new(ShippingAddressInput), Box::new(matcher))
    }
}

impl<C: Candidate> Qualifier<C> {
    /// Does the candidate's name satisfy the name matcher?
    #[must_use]
    pub fn candidate_name(matcher: NameMatcher) -> Self {
        Self::new(Box::new(CandidateNameInput), Box::new(matcher))
    }
}

impl<Ctx> Debug for Qualifier<Ctx> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Qualifier")
            .field("input", &self.input)
            .field("matcher", &self.matcher)
            .finish()
    }
}

/// Flags a shipping address containing any of the configured keywords.
///
/// Keywords are normalized at construction. The address lines are lowercased
/// and joined with a space, with missing lines treated as empty.
///
/// # Example
///
/// ```
/// use gatekeep::{AddressQualifier, ShippingAddress};
///
/// let rural = AddressQualifier::new(["RD", "Rural"]).unwrap();
/// assert!(rural.qualifies(&ShippingAddress::new(Some("123 Rural Rd"), None)));
/// assert!(!rural.qualifies(&ShippingAddress::new(Some("1 Main St"), None)));
/// ```
#[derive(Debug, Clone)]
pub struct AddressQualifier {
    keywords: KeywordMatcher,
}

impl AddressQualifier {
    /// Create an address qualifier from keyword selectors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the selectors exceed the selector limits.
    pub fn new<I, S>(selectors: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            keywords: KeywordMatcher::new(selectors)?,
        })
    }

    /// Returns `true` if the address contains any selector.
    pub fn qualifies(&self, address: &ShippingAddress) -> bool {
        self.keywords.matches_text(&address.searchable_text())
    }

    /// The cart-level form of this qualifier.
    #[must_use]
    pub fn into_qualifier(self) -> Qualifier<Cart> {
        Qualifier::shipping_address(self.keywords)
    }
}
