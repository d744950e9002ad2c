//! Checkout domain: the cart and the candidates a campaign filters.
//!
//! These are the read-only inputs the host checkout hands over per request.
//! Everything derives `serde` so a host (or the CLI) can load them from JSON.

use serde::{Deserialize, Serialize};

/// A customer attached to the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer tags as stored by the platform (not normalized).
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Customer {
    /// Create a customer carrying the given tags.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

/// The shipping address entered at checkout.
///
/// Either line may be missing; qualifiers treat a missing line as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Street line.
    #[serde(default)]
    pub address1: Option<String>,
    /// Apartment, flat, rural delivery number, etc.
    #[serde(default)]
    pub address2: Option<String>,
}

impl ShippingAddress {
    /// Create an address from its two optional lines.
    pub fn new(address1: Option<&str>, address2: Option<&str>) -> Self {
        Self {
            address1: address1.map(str::to_string),
            address2: address2.map(str::to_string),
        }
    }

    /// Both lines lowercased and joined with a single space.
    ///
    /// Missing lines contribute an empty string, so `("A", None)` becomes `"a "`.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        let line1 = self.address1.as_deref().unwrap_or_default().to_lowercase();
        let line2 = self.address2.as_deref().unwrap_or_default().to_lowercase();
        format!("{line1} {line2}")
    }
}

/// The cart being checked out.
///
/// A cart without a customer is a guest checkout; a cart without a shipping
/// address holds only non-physical goods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
}

impl Cart {
    /// Create an empty cart (guest, no shipping address).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a customer (builder pattern).
    #[must_use]
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    /// Attach a shipping address (builder pattern).
    #[must_use]
    pub fn with_shipping_address(mut self, address: ShippingAddress) -> Self {
        self.shipping_address = Some(address);
        self
    }
}

/// Anything a campaign can hide from checkout.
///
/// Campaigns only look at the name; identity is the position in the list.
pub trait Candidate: Send + Sync + std::fmt::Debug {
    /// The display name the host shows at checkout.
    fn name(&self) -> &str;
}

/// A payment gateway offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentGateway {
    pub name: String,
}

impl PaymentGateway {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Candidate for PaymentGateway {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A shipping rate offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingRate {
    pub name: String,
}

impl ShippingRate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Candidate for ShippingRate {
    fn name(&self) -> &str {
        &self.name
    }
}
