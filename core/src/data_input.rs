//! `DataInput`: Domain-specific data extraction
//!
//! The `DataInput` trait extracts data from a checkout context (the cart, a
//! payment gateway, a shipping rate) and returns type-erased `MatchingData`.
//!
//! This is generic over the context type `Ctx`, but returns domain-agnostic
//! `MatchingData`, so the same `InputMatcher` works on any of them.

use crate::{Candidate, Cart, MatchingData};
use std::fmt::Debug;

/// Extracts data from a checkout context.
///
/// Returns [`MatchingData::None`] when the requested data is not present
/// (no customer, no shipping address). A [`Qualifier`](crate::Qualifier)
/// evaluates `None` to `false`.
///
/// # Example
///
/// ```
/// use gatekeep::{Cart, Customer, CustomerTagsInput, DataInput, MatchingData};
///
/// let cart = Cart::new().with_customer(Customer::new(["VIP"]));
/// assert_eq!(
///     CustomerTagsInput.get(&cart),
///     MatchingData::List(vec!["VIP".to_string()]),
/// );
/// assert!(CustomerTagsInput.get(&Cart::new()).is_none());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `DataInput<{Ctx}>`",
    label = "this type cannot extract data from `{Ctx}`",
    note = "DataInput<Ctx> extracts data from a specific context type (Cart, PaymentGateway, ShippingRate)"
)]
pub trait DataInput<Ctx>: Send + Sync + Debug {
    /// Extract data from the given context.
    fn get(&self, ctx: &Ctx) -> MatchingData;
}

// Blanket implementation for boxed DataInputs
#[diagnostic::do_not_recommend]
impl<Ctx> DataInput<Ctx> for Box<dyn DataInput<Ctx>> {
    fn get(&self, ctx: &Ctx) -> MatchingData {
        (**self).get(ctx)
    }
}

/// The customer's tags, or `None` for a guest cart.
#[derive(Debug, Clone, Copy)]
pub struct CustomerTagsInput;

impl DataInput<Cart> for CustomerTagsInput {
    fn get(&self, ctx: &Cart) -> MatchingData {
        ctx.customer
            .as_ref()
            .map_or(MatchingData::None, |c| MatchingData::List(c.tags.clone()))
    }
}

/// The shipping address as searchable text, or `None` when the cart has no
/// shipping address.
///
/// See [`ShippingAddress::searchable_text`](crate::ShippingAddress::searchable_text).
#[derive(Debug, Clone, Copy)]
pub struct ShippingAddressInput;

impl DataInput<Cart> for ShippingAddressInput {
    fn get(&self, ctx: &Cart) -> MatchingData {
        ctx.shipping_address
            .as_ref()
            .map_or(MatchingData::None, |a| {
                MatchingData::String(a.searchable_text())
            })
    }
}

/// The name of any [`Candidate`].
#[derive(Debug, Clone, Copy)]
pub struct CandidateNameInput;

impl<C: Candidate> DataInput<C> for CandidateNameInput {
    fn get(&self, ctx: &C) -> MatchingData {
        MatchingData::String(ctx.name().to_string())
    }
}
