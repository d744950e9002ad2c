//! gatekeep-test: Test helpers for conformance testing
//!
//! Small constructors for carts and candidate lists, plus (behind the
//! `fixtures` feature) the YAML fixture runner used by `tests/conformance.rs`.
//!
//! # Example
//!
//! ```
//! use gatekeep_test::prelude::*;
//!
//! let cart = cart_at("123 Rural Rd").with_customer(Customer::new(["NET30"]));
//! assert!(cart.shipping_address.is_some());
//! assert_eq!(names(&gateways(&["NET30", "Card"])), vec!["NET30", "Card"]);
//! ```

use gatekeep::prelude::*;

#[cfg(feature = "fixtures")]
pub mod fixture;

/// Payment gateways with the given names, in order.
#[must_use]
pub fn gateways(names: &[&str]) -> Vec<PaymentGateway> {
    names.iter().map(|n| PaymentGateway::new(*n)).collect()
}

/// Shipping rates with the given names, in order.
#[must_use]
pub fn rates(names: &[&str]) -> Vec<ShippingRate> {
    names.iter().map(|n| ShippingRate::new(*n)).collect()
}

/// Names of a candidate list, in order.
#[must_use]
pub fn names<C: Candidate>(candidates: &[C]) -> Vec<&str> {
    candidates.iter().map(Candidate::name).collect()
}

/// A cart for a customer carrying `tags`, without a shipping address.
#[must_use]
pub fn cart_tagged(tags: &[&str]) -> Cart {
    Cart::new().with_customer(Customer::new(tags.iter().copied()))
}

/// A guest cart shipping to a single-line address.
#[must_use]
pub fn cart_at(address1: &str) -> Cart {
    Cart::new().with_shipping_address(ShippingAddress::new(Some(address1), None))
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{cart_at, cart_tagged, gateways, names, rates};
    pub use gatekeep::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_preserve_order() {
        assert_eq!(names(&rates(&["b", "a", "c"])), vec!["b", "a", "c"]);
        assert_eq!(names(&gateways(&[])), Vec::<&str>::new());
    }

    #[test]
    fn cart_helpers() {
        let cart = cart_tagged(&["vip"]);
        assert_eq!(cart.customer, Some(Customer::new(["vip"])));
        assert!(cart.shipping_address.is_none());

        let cart = cart_at("RD 1");
        assert!(cart.customer.is_none());
        assert_eq!(
            cart.shipping_address.and_then(|a| a.address1).as_deref(),
            Some("RD 1")
        );
    }

    #[test]
    fn end_to_end_rulebook() {
        let config = RulesConfig::from_yaml(
            r#"
shipping_rates:
  - type: hide_rural_shipping_rates
    rules:
      - address_selectors: ["Rural"]
        shipping_rate_selectors: ["Rural"]
        shipping_rate_match_type: partial
"#,
        )
        .unwrap();
        let rulebook = Rulebook::from_config(&config).unwrap();

        let out = rulebook.filter_shipping_rates(
            &cart_at("123 Rural Rd"),
            rates(&["Standard", "Standard Rural Shipping"]),
        );
        assert_eq!(names(&out), vec!["Standard Rural Shipping"]);
    }
}
