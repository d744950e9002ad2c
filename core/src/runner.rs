//! `CampaignRunner`: ordered campaigns over one candidate list
//!
//! The runner is the entry point a host calls once per checkout. It applies
//! each campaign in order to the output of the previous one, against the same
//! read-only cart. [`Rulebook`] pairs the gateway and shipping runners compiled
//! from one [`RulesConfig`].

use crate::config::{GatewayCampaignConfig, RulesConfig, ShippingCampaignConfig};
use crate::{
    Campaign, Cart, ConfigError, HideRuralShippingRates, PaymentGateway, RunTrace, ShippingRate,
    ShowGatewaysForCustomerTag,
};
use std::fmt::Debug;
use std::path::Path;

/// Applies campaigns in order.
///
/// Campaigns are immutable once built, so a runner can be shared across
/// threads; every call works on its own candidate list.
///
/// # Example
///
/// ```
/// use gatekeep::prelude::*;
///
/// let runner = CampaignRunner::new().with(ShowGatewaysForCustomerTag::new(vec![GatewayRule::new(
///     TagMatcher::new(TagMatchType::Include, ["NET30"]).unwrap(),
///     NameMatcher::new(NameMatchType::Exact, ["NET30"]).unwrap(),
/// )]));
///
/// let mut gateways = vec![PaymentGateway::new("NET30"), PaymentGateway::new("Card")];
/// runner.run_in_place(&Cart::new(), &mut gateways);
/// assert_eq!(gateways, vec![PaymentGateway::new("Card")]);
/// ```
pub struct CampaignRunner<C> {
    campaigns: Vec<Box<dyn Campaign<C>>>,
}

impl<C> CampaignRunner<C> {
    /// Create a runner with no campaigns (the identity filter).
    #[must_use]
    pub fn new() -> Self {
        Self {
            campaigns: Vec::new(),
        }
    }

    /// Append a campaign (builder pattern).
    #[must_use]
    pub fn with(mut self, campaign: impl Campaign<C> + 'static) -> Self {
        self.campaigns.push(Box::new(campaign));
        self
    }

    /// Append a boxed campaign.
    pub fn push(&mut self, campaign: Box<dyn Campaign<C>>) {
        self.campaigns.push(campaign);
    }

    /// Returns the number of campaigns.
    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    /// Returns `true` if there are no campaigns.
    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    /// Names of the campaigns, in run order.
    pub fn campaign_names(&self) -> Vec<&'static str> {
        self.campaigns.iter().map(|c| c.name()).collect()
    }

    /// Run every campaign; returns the surviving candidates in order.
    pub fn run(&self, cart: &Cart, candidates: Vec<C>) -> Vec<C> {
        tracing::debug!(
            campaigns = self.campaigns.len(),
            candidates = candidates.len(),
            "running campaigns"
        );
        self.campaigns
            .iter()
            .fold(candidates, |remaining, campaign| campaign.run(cart, remaining))
    }

    /// Filter the host's list in place.
    ///
    /// Equivalent to `*candidates = self.run(cart, take(candidates))`.
    pub fn run_in_place(&self, cart: &Cart, candidates: &mut Vec<C>) {
        let taken = std::mem::take(candidates);
        *candidates = self.run(cart, taken);
    }

    /// Run with a trace of every rule of every campaign.
    ///
    /// `result` is identical to what [`run`](Self::run) returns.
    pub fn run_with_trace(&self, cart: &Cart, candidates: Vec<C>) -> RunTrace<C> {
        let mut rules = Vec::new();
        let mut remaining = candidates;
        for campaign in &self.campaigns {
            let trace = campaign.run_with_trace(cart, remaining);
            rules.extend(trace.rules);
            remaining = trace.result;
        }
        RunTrace {
            result: remaining,
            rules,
        }
    }
}

impl<C> Default for CampaignRunner<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Debug for CampaignRunner<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CampaignRunner")
            .field("campaigns", &self.campaign_names())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rulebook
// ═══════════════════════════════════════════════════════════════════════════════

/// Every campaign of one config document, compiled.
///
/// # Example
///
/// ```
/// use gatekeep::{Cart, RulesConfig, Rulebook, ShippingRate};
///
/// let config = RulesConfig::from_yaml(r#"
/// shipping_rates:
///   - type: hide_rural_shipping_rates
///     rules:
///       - address_selectors: ["Rural"]
///         shipping_rate_selectors: ["Rural"]
///         shipping_rate_match_type: partial
/// "#).unwrap();
/// let rulebook = Rulebook::from_config(&config).unwrap();
///
/// // No shipping address: nothing is hidden.
/// let rates = vec![ShippingRate::new("Rural Post")];
/// assert_eq!(rulebook.filter_shipping_rates(&Cart::new(), rates.clone()), rates);
/// ```
#[derive(Debug, Default)]
pub struct Rulebook {
    /// Campaigns over payment gateways.
    pub payment_gateways: CampaignRunner<PaymentGateway>,
    /// Campaigns over shipping rates.
    pub shipping_rates: CampaignRunner<ShippingRate>,
}

impl Rulebook {
    /// Compile every campaign in the config.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`]; nothing is compiled partially.
    pub fn from_config(config: &RulesConfig) -> Result<Self, ConfigError> {
        let mut rulebook = Self::default();

        for campaign in &config.payment_gateways {
            match campaign {
                GatewayCampaignConfig::ShowGatewaysForCustomerTag { rules } => rulebook
                    .payment_gateways
                    .push(Box::new(ShowGatewaysForCustomerTag::from_config(rules)?)),
            }
        }

        for campaign in &config.shipping_rates {
            match campaign {
                ShippingCampaignConfig::HideRuralShippingRates { rules } => rulebook
                    .shipping_rates
                    .push(Box::new(HideRuralShippingRates::from_config(rules)?)),
            }
        }

        tracing::debug!(
            payment_gateway_campaigns = rulebook.payment_gateways.len(),
            shipping_rate_campaigns = rulebook.shipping_rates.len(),
            "compiled rulebook"
        );
        Ok(rulebook)
    }

    /// Read and compile a config file (see [`RulesConfig::load`]).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed or compiled.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_config(&RulesConfig::load(path)?)
    }

    /// Filter payment gateways for a cart.
    pub fn filter_payment_gateways(
        &self,
        cart: &Cart,
        gateways: Vec<PaymentGateway>,
    ) -> Vec<PaymentGateway> {
        self.payment_gateways.run(cart, gateways)
    }

    /// Filter shipping rates for a cart.
    pub fn filter_shipping_rates(&self, cart: &Cart, rates: Vec<ShippingRate>) -> Vec<ShippingRate> {
        self.shipping_rates.run(cart, rates)
    }
}
