//! Campaigns: rule sets that hide candidates from checkout
//!
//! A campaign owns compiled rules and filters one kind of [`Candidate`].
//! Filtering is a pure function of `(rules, cart, candidates)`: the input list
//! is consumed and the survivors come back in their original order.
//!
//! # INV: removal only
//!
//! A campaign never adds, reorders or modifies candidates. Rules run in order
//! and each one filters the output of the previous one, so a candidate removed
//! by one rule stays removed.

use crate::config::{GatewayRuleConfig, RuralShippingRuleConfig};
use crate::{
    AddressQualifier, Candidate, Cart, ConfigError, NameMatcher, PaymentGateway, Qualifier,
    QualifierTrace, RuleOutcome, RuleTrace, RunTrace, ShippingRate, TagMatcher,
};
use std::fmt::Debug;
use tracing::{debug, trace};

/// Filters a list of candidates for one cart.
pub trait Campaign<C>: Send + Sync + Debug {
    /// Stable identifier, also the config `type` of the campaign.
    fn name(&self) -> &'static str;

    /// Filter `candidates`, returning the survivors in order.
    fn run(&self, cart: &Cart, candidates: Vec<C>) -> Vec<C>;

    /// Same as [`run`](Self::run), plus a trace of every rule.
    fn run_with_trace(&self, cart: &Cart, candidates: Vec<C>) -> RunTrace<C>;
}

/// Drop the candidates selected by `hide`, recording their names.
fn remove_where<C: Candidate>(
    candidates: Vec<C>,
    hide: impl Fn(&C) -> bool,
    removed: &mut Vec<String>,
) -> Vec<C> {
    candidates
        .into_iter()
        .filter(|candidate| {
            if hide(candidate) {
                trace!(candidate = candidate.name(), "removed");
                removed.push(candidate.name().to_string());
                false
            } else {
                true
            }
        })
        .collect()
}

/// Evaluate a cart qualifier, tracing only when asked to.
fn check(qualifier: &Qualifier<Cart>, cart: &Cart, traced: bool) -> (bool, Option<QualifierTrace>) {
    if traced {
        let t = qualifier.evaluate_with_trace(cart);
        (t.matched, Some(t))
    } else {
        (qualifier.evaluate(cart), None)
    }
}

fn push_trace(
    traces: Option<&mut Vec<RuleTrace>>,
    campaign: &'static str,
    index: usize,
    outcome: Option<QualifierTrace>,
    removed: Vec<String>,
) {
    if let (Some(traces), Some(t)) = (traces, outcome) {
        traces.push(RuleTrace {
            campaign,
            index,
            outcome: RuleOutcome::Evaluated(t),
            removed,
        });
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Payment gateways
// ═══════════════════════════════════════════════════════════════════════════════

/// One compiled rule: who may see which gateways.
#[derive(Debug)]
pub struct GatewayRule {
    customer: Qualifier<Cart>,
    gateways: Qualifier<PaymentGateway>,
}

impl GatewayRule {
    /// Create a rule from its two matchers.
    #[must_use]
    pub fn new(customer_tags: TagMatcher, gateway_names: NameMatcher) -> Self {
        Self {
            customer: Qualifier::customer_tags(customer_tags),
            gateways: Qualifier::candidate_name(gateway_names),
        }
    }

    /// Compile a rule from config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either selector list is invalid.
    pub fn from_config(config: &GatewayRuleConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            TagMatcher::new(config.customer_tag_match_type, &config.customer_tags)?,
            NameMatcher::new(config.gateway_match_type, &config.gateway_names)?,
        ))
    }
}

/// Shows the gateways named by each rule only to customers matching its tags.
///
/// For each rule: when the cart's customer satisfies the tag matcher, the rule
/// does nothing; otherwise (including guest carts) every gateway matching the
/// rule's names is removed. Gateways not named by any rule are always shown.
///
/// # Example
///
/// ```
/// use gatekeep::prelude::*;
///
/// let campaign = ShowGatewaysForCustomerTag::new(vec![GatewayRule::new(
///     TagMatcher::new(TagMatchType::Include, ["NET30"]).unwrap(),
///     NameMatcher::new(NameMatchType::Exact, ["NET30"]).unwrap(),
/// )]);
/// let gateways = || vec![PaymentGateway::new("Card"), PaymentGateway::new("NET30")];
///
/// let tagged = Cart::new().with_customer(Customer::new(["net30"]));
/// assert_eq!(campaign.run(&tagged, gateways()).len(), 2);
///
/// let guest = Cart::new();
/// assert_eq!(campaign.run(&guest, gateways()), vec![PaymentGateway::new("Card")]);
/// ```
#[derive(Debug, Default)]
pub struct ShowGatewaysForCustomerTag {
    rules: Vec<GatewayRule>,
}

impl ShowGatewaysForCustomerTag {
    /// Config `type` of this campaign.
    pub const NAME: &'static str = "show_gateways_for_customer_tag";

    /// Create the campaign from compiled rules.
    #[must_use]
    pub fn new(rules: Vec<GatewayRule>) -> Self {
        Self { rules }
    }

    /// Compile every rule; any invalid rule fails the whole campaign.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] naming the first invalid rule.
    pub fn from_config(rules: &[GatewayRuleConfig]) -> Result<Self, ConfigError> {
        let rules = rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                GatewayRule::from_config(rule).map_err(|e| e.in_rule(Self::NAME, index))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn apply(
        &self,
        cart: &Cart,
        mut gateways: Vec<PaymentGateway>,
        mut traces: Option<&mut Vec<RuleTrace>>,
    ) -> Vec<PaymentGateway> {
        for (index, rule) in self.rules.iter().enumerate() {
            let (customer_matches, outcome) = check(&rule.customer, cart, traces.is_some());
            let mut removed = Vec::new();

            if !customer_matches {
                gateways = remove_where(gateways, |g| rule.gateways.evaluate(g), &mut removed);
            }

            debug!(
                campaign = Self::NAME,
                rule = index,
                customer_matches,
                removed = removed.len(),
                "evaluated rule"
            );
            push_trace(traces.as_deref_mut(), Self::NAME, index, outcome, removed);
        }
        gateways
    }
}

impl Campaign<PaymentGateway> for ShowGatewaysForCustomerTag {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(&self, cart: &Cart, candidates: Vec<PaymentGateway>) -> Vec<PaymentGateway> {
        self.apply(cart, candidates, None)
    }

    fn run_with_trace(
        &self,
        cart: &Cart,
        candidates: Vec<PaymentGateway>,
    ) -> RunTrace<PaymentGateway> {
        let mut rules = Vec::with_capacity(self.rules.len());
        let result = self.apply(cart, candidates, Some(&mut rules));
        RunTrace { result, rules }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Shipping rates
// ═══════════════════════════════════════════════════════════════════════════════

/// One compiled rule: which addresses are rural and which rates are rural.
#[derive(Debug)]
pub struct RuralShippingRule {
    address: Qualifier<Cart>,
    rural_rates: Qualifier<ShippingRate>,
}

impl RuralShippingRule {
    /// Create a rule from the address check and the rural-rate names.
    #[must_use]
    pub fn new(address: AddressQualifier, rural_rates: NameMatcher) -> Self {
        Self {
            address: address.into_qualifier(),
            rural_rates: Qualifier::candidate_name(rural_rates),
        }
    }

    /// Compile a rule from config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either selector list is invalid.
    pub fn from_config(config: &RuralShippingRuleConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            AddressQualifier::new(&config.address_selectors)?,
            NameMatcher::new(config.shipping_rate_match_type, &config.shipping_rate_selectors)?,
        ))
    }
}

/// Hides rural rates from non-rural addresses, and non-rural rates from rural ones.
///
/// A cart without a shipping address (non-physical goods) is left alone.
/// Otherwise, for each rule: a rural address keeps only the rates matching the
/// rule's names; any other address loses exactly those rates.
///
/// # Example
///
/// ```
/// use gatekeep::prelude::*;
///
/// let campaign = HideRuralShippingRates::new(vec![RuralShippingRule::new(
///     AddressQualifier::new(["Rural"]).unwrap(),
///     NameMatcher::new(NameMatchType::Partial, ["Rural"]).unwrap(),
/// )]);
/// let rates = || vec![ShippingRate::new("Standard"), ShippingRate::new("Standard Rural Shipping")];
///
/// let rural = Cart::new().with_shipping_address(ShippingAddress::new(Some("123 Rural Rd"), None));
/// assert_eq!(campaign.run(&rural, rates()), vec![ShippingRate::new("Standard Rural Shipping")]);
///
/// let town = Cart::new().with_shipping_address(ShippingAddress::new(Some("123 Main St"), None));
/// assert_eq!(campaign.run(&town, rates()), vec![ShippingRate::new("Standard")]);
/// ```
#[derive(Debug, Default)]
pub struct HideRuralShippingRates {
    rules: Vec<RuralShippingRule>,
}

impl HideRuralShippingRates {
    /// Config `type` of this campaign.
    pub const NAME: &'static str = "hide_rural_shipping_rates";

    /// Create the campaign from compiled rules.
    #[must_use]
    pub fn new(rules: Vec<RuralShippingRule>) -> Self {
        Self { rules }
    }

    /// Compile every rule; any invalid rule fails the whole campaign.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRule`] naming the first invalid rule.
    pub fn from_config(rules: &[RuralShippingRuleConfig]) -> Result<Self, ConfigError> {
        let rules = rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                RuralShippingRule::from_config(rule).map_err(|e| e.in_rule(Self::NAME, index))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn apply(
        &self,
        cart: &Cart,
        mut rates: Vec<ShippingRate>,
        mut traces: Option<&mut Vec<RuleTrace>>,
    ) -> Vec<ShippingRate> {
        if cart.shipping_address.is_none() {
            debug!(campaign = Self::NAME, "no shipping address, skipping");
            if let Some(traces) = traces {
                traces.extend((0..self.rules.len()).map(|index| RuleTrace {
                    campaign: Self::NAME,
                    index,
                    outcome: RuleOutcome::Skipped {
                        reason: "no shipping address",
                    },
                    removed: Vec::new(),
                }));
            }
            return rates;
        }

        for (index, rule) in self.rules.iter().enumerate() {
            let (rural_customer, outcome) = check(&rule.address, cart, traces.is_some());
            let mut removed = Vec::new();

            rates = if rural_customer {
                remove_where(rates, |r| !rule.rural_rates.evaluate(r), &mut removed)
            } else {
                remove_where(rates, |r| rule.rural_rates.evaluate(r), &mut removed)
            };

            debug!(
                campaign = Self::NAME,
                rule = index,
                rural_customer,
                removed = removed.len(),
                "evaluated rule"
            );
            push_trace(traces.as_deref_mut(), Self::NAME, index, outcome, removed);
        }
        rates
    }
}

impl Campaign<ShippingRate> for HideRuralShippingRates {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(&self, cart: &Cart, candidates: Vec<ShippingRate>) -> Vec<ShippingRate> {
        self.apply(cart, candidates, None)
    }

    fn run_with_trace(&self, cart: &Cart, candidates: Vec<ShippingRate>) -> RunTrace<ShippingRate> {
        let mut rules = Vec::with_capacity(self.rules.len());
        let result = self.apply(cart, candidates, Some(&mut rules));
        RunTrace { result, rules }
    }
}
