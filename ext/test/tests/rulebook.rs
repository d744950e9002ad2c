//! Rulebook behaviour through the public API: config in, filtered lists out.
//!
//! Run with: cargo test -p gatekeep-test --test rulebook

use gatekeep::{ConfigError, MAX_SELECTOR_LENGTH};
use gatekeep_test::prelude::*;

const CONFIG: &str = r#"
payment_gateways:
  - type: show_gateways_for_customer_tag
    rules:
      - customer_tag_match_type: include
        customer_tags: ["NET30"]
        gateway_match_type: exact
        gateway_names: ["NET30"]
      - customer_tag_match_type: include
        customer_tags: ["wholesale"]
        gateway_match_type: partial
        gateway_names: ["invoice"]
shipping_rates:
  - type: hide_rural_shipping_rates
    rules:
      - address_selectors: ["RD", "Rural District", "Rural"]
        shipping_rate_selectors: ["Rural"]
        shipping_rate_match_type: partial
"#;

fn rulebook() -> Rulebook {
    Rulebook::from_config(&RulesConfig::from_yaml(CONFIG).unwrap()).unwrap()
}

#[test]
fn compiles_campaigns_in_order() {
    let rb = rulebook();
    assert_eq!(
        rb.payment_gateways.campaign_names(),
        vec![ShowGatewaysForCustomerTag::NAME]
    );
    assert_eq!(
        rb.shipping_rates.campaign_names(),
        vec![HideRuralShippingRates::NAME]
    );
}

#[test]
fn rules_compose_across_a_campaign() {
    let out = rulebook().filter_payment_gateways(
        &cart_tagged(&["NET30"]),
        gateways(&["Card", "NET30", "Pay by Invoice"]),
    );
    assert_eq!(names(&out), vec!["Card", "NET30"]);
}

#[test]
fn output_is_an_ordered_subset() {
    let input = gateways(&["Pay by Invoice", "Card", "NET30", "PayPal", "Invoice 60"]);
    let out = rulebook().filter_payment_gateways(&Cart::new(), input.clone());

    let mut cursor = input.iter();
    for survivor in &out {
        assert!(cursor.any(|g| g == survivor), "{survivor:?} out of order");
    }
    assert_eq!(names(&out), vec!["Card", "PayPal"]);
}

#[test]
fn running_twice_changes_nothing() {
    let rb = rulebook();
    let cart = cart_at("RD 4").with_customer(Customer::new(["wholesale"]));

    let once = rb.filter_payment_gateways(&cart, gateways(&["NET30", "Invoice", "Card"]));
    let twice = rb.filter_payment_gateways(&cart, once.clone());
    assert_eq!(once, twice);

    let once = rb.filter_shipping_rates(&cart, rates(&["Standard", "Rural Standard"]));
    let twice = rb.filter_shipping_rates(&cart, once.clone());
    assert_eq!(once, twice);
    assert_eq!(names(&once), vec!["Rural Standard"]);
}

#[test]
fn run_in_place_replaces_host_list() {
    let rb = rulebook();
    let mut list = rates(&["Standard", "Rural Standard", "Express"]);
    rb.shipping_rates.run_in_place(&cart_at("1 Main St"), &mut list);
    assert_eq!(names(&list), vec!["Standard", "Express"]);
}

#[test]
fn trace_result_equals_run() {
    let rb = rulebook();
    let cart = cart_tagged(&["vip"]);
    let input = gateways(&["NET30", "Invoice", "Card"]);

    let trace = rb.payment_gateways.run_with_trace(&cart, input.clone());
    assert_eq!(trace.result, rb.filter_payment_gateways(&cart, input));
    assert_eq!(trace.rules.len(), 2);
    assert_eq!(trace.removed_count(), 2);
    assert_eq!(trace.rules[1].removed, vec!["Invoice".to_string()]);
}

#[test]
fn invalid_rule_fails_whole_load() {
    let long = "x".repeat(MAX_SELECTOR_LENGTH + 1);
    let yaml = CONFIG.replace(r#"["wholesale"]"#, &format!(r#"["{long}"]"#));
    let config = RulesConfig::from_yaml(&yaml).unwrap();
    let err = Rulebook::from_config(&config).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRule { index: 1, .. }));
}
