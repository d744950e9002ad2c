//! Config types for rule sets.
//!
//! These are the author-edited settings: plain serde types, loaded once before
//! any checkout runs and compiled into campaigns via
//! [`Rulebook::from_config()`](crate::Rulebook::from_config).
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime type |
//! |-------------|-------------|
//! | [`RulesConfig`] | [`Rulebook`](crate::Rulebook) |
//! | [`GatewayCampaignConfig`] | [`ShowGatewaysForCustomerTag`](crate::ShowGatewaysForCustomerTag) |
//! | [`ShippingCampaignConfig`] | [`HideRuralShippingRates`](crate::HideRuralShippingRates) |
//!
//! # Example (YAML)
//!
//! ```yaml
//! payment_gateways:
//!   - type: show_gateways_for_customer_tag
//!     rules:
//!       - customer_tag_match_type: include
//!         customer_tags: ["NET30"]
//!         gateway_match_type: exact
//!         gateway_names: ["NET30"]
//! shipping_rates:
//!   - type: hide_rural_shipping_rates
//!     rules:
//!       - address_selectors: ["RD", "Rural District", "Rural"]
//!         shipping_rate_selectors: ["Rural"]
//!         shipping_rate_match_type: partial
//! ```

use crate::{ConfigError, NameMatchType, TagMatchType};
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration: campaigns per candidate kind, in run order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Campaigns filtering payment gateways.
    #[serde(default)]
    pub payment_gateways: Vec<GatewayCampaignConfig>,

    /// Campaigns filtering shipping rates.
    #[serde(default)]
    pub shipping_rates: Vec<ShippingCampaignConfig>,
}

impl RulesConfig {
    /// Parse a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] on malformed YAML, unknown fields or
    /// unknown match types.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] on malformed JSON, unknown fields or
    /// unknown match types.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a config file: JSON for a `.json` extension, YAML otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or a parse error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }
}

/// A payment-gateway campaign, discriminated by `type`.
///
/// Keys other than `type` and `rules` are rejected, as in the rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", deny_unknown_fields)]
pub enum GatewayCampaignConfig {
    /// Gateways named by a rule are shown only to customers matching its tags.
    #[serde(rename = "show_gateways_for_customer_tag")]
    ShowGatewaysForCustomerTag {
        /// Rules, applied in order.
        rules: Vec<GatewayRuleConfig>,
    },
}

/// A shipping-rate campaign, discriminated by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", deny_unknown_fields)]
pub enum ShippingCampaignConfig {
    /// Rural rates are hidden from non-rural addresses and vice versa.
    #[serde(rename = "hide_rural_shipping_rates")]
    HideRuralShippingRates {
        /// Rules, applied in order.
        rules: Vec<RuralShippingRuleConfig>,
    },
}

/// One rule of the gateway-visibility campaign.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayRuleConfig {
    /// `include`: the customer must carry a tag. `exclude`: must carry none.
    pub customer_tag_match_type: TagMatchType,
    /// Tags that trigger the rule.
    pub customer_tags: Vec<String>,
    /// How `gateway_names` are compared to gateway names.
    pub gateway_match_type: NameMatchType,
    /// Names (or name fragments) of the gateways this rule controls.
    pub gateway_names: Vec<String>,
}

/// One rule of the rural-shipping campaign.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuralShippingRuleConfig {
    /// Keywords flagging a rural address, searched in both address lines.
    pub address_selectors: Vec<String>,
    /// Names (or name fragments) of the rural shipping rates.
    pub shipping_rate_selectors: Vec<String>,
    /// How `shipping_rate_selectors` are compared to rate names.
    pub shipping_rate_match_type: NameMatchType,
}
