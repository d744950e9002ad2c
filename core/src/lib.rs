//! gatekeep - checkout filtering rules
//!
//! Hides payment gateways and shipping rates at checkout based on the
//! customer's tags or the shipping address. One pass, in memory, per checkout.
//!
//! # Architecture
//!
//! The type system follows the input/matcher erasure of the xDS matcher API:
//!
//! - [`MatchingData`]: Erased data (none, string, list of strings)
//! - [`DataInput<Ctx>`]: Pulls data out of a [`Cart`] or a [`Candidate`]
//! - [`InputMatcher`]: Domain-agnostic matching ([`TagMatcher`], [`NameMatcher`], [`KeywordMatcher`])
//! - [`Qualifier<Ctx>`]: Combines `DataInput` + `InputMatcher` into a yes/no check
//! - [`Campaign<C>`]: Compiled rules that filter one kind of candidate
//! - [`CampaignRunner<C>`]: Ordered campaigns; [`Rulebook`] holds one per candidate kind
//!
//! # Key Invariants
//!
//! 1. **Selectors are normalized**: configured tags, names and keywords are
//!    trimmed and lowercased once, at construction.
//!
//! 2. **`DataInput` None → false**: a guest cart never satisfies a tag rule,
//!    whatever its match type.
//!
//! 3. **Removal only**: campaigns return an ordered subset of their input.
//!
//! 4. **Fail at load**: unknown match types and oversized selector lists are
//!    a [`ConfigError`] when the rules are compiled, never a silent mismatch
//!    at checkout.
//!
//! # Example
//!
//! ```
//! use gatekeep::prelude::*;
//!
//! let config = RulesConfig::from_yaml(r#"
//! payment_gateways:
//!   - type: show_gateways_for_customer_tag
//!     rules:
//!       - customer_tag_match_type: include
//!         customer_tags: ["NET30"]
//!         gateway_match_type: exact
//!         gateway_names: ["NET30"]
//! "#).unwrap();
//! let rulebook = Rulebook::from_config(&config).unwrap();
//!
//! let gateways = || vec![PaymentGateway::new("Card"), PaymentGateway::new("NET30")];
//!
//! let net30 = Cart::new().with_customer(Customer::new(["NET30"]));
//! assert_eq!(rulebook.filter_payment_gateways(&net30, gateways()).len(), 2);
//!
//! let other = Cart::new().with_customer(Customer::new(["retail"]));
//! assert_eq!(
//!     rulebook.filter_payment_gateways(&other, gateways()),
//!     vec![PaymentGateway::new("Card")],
//! );
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod campaign;
mod checkout;
mod config;
mod data_input;
mod input_matcher;
mod match_type;
mod matching_data;
mod qualifier;
mod runner;
mod trace;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Domain
pub use checkout::{Candidate, Cart, Customer, PaymentGateway, ShippingAddress, ShippingRate};

// Core types
pub use data_input::{CandidateNameInput, CustomerTagsInput, DataInput, ShippingAddressInput};
pub use input_matcher::{normalize, InputMatcher, KeywordMatcher, NameMatcher, TagMatcher};
pub use match_type::{NameMatchType, TagMatchType};
pub use matching_data::MatchingData;
pub use qualifier::{AddressQualifier, Qualifier};

// Campaigns
pub use campaign::{
    Campaign, GatewayRule, HideRuralShippingRates, RuralShippingRule, ShowGatewaysForCustomerTag,
};
pub use runner::{CampaignRunner, Rulebook};

// Config
pub use config::{
    GatewayCampaignConfig, GatewayRuleConfig, RulesConfig, RuralShippingRuleConfig,
    ShippingCampaignConfig,
};

// Trace types
pub use trace::{QualifierTrace, RuleOutcome, RuleTrace, RunTrace};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use gatekeep::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Matching
        AddressQualifier,
        // Campaigns
        Campaign,
        CampaignRunner,
        // Domain
        Candidate,
        Cart,
        // Errors
        ConfigError,
        Customer,
        GatewayRule,
        HideRuralShippingRates,
        KeywordMatcher,
        NameMatchType,
        NameMatcher,
        PaymentGateway,
        Qualifier,
        RuralShippingRule,
        // Config
        Rulebook,
        RulesConfig,
        ShippingAddress,
        ShippingRate,
        ShowGatewaysForCustomerTag,
        TagMatchType,
        TagMatcher,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum number of selectors (tags, names or keywords) in one list.
///
/// Evaluation cost is `rules × candidates × selectors`.
pub const MAX_SELECTORS: usize = 256;

/// Maximum length in bytes of a single selector.
pub const MAX_SELECTOR_LENGTH: usize = 1024;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from loading and compiling rules.
///
/// These are raised before any checkout runs. Fix the configuration and
/// rebuild the [`Rulebook`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A match type word is not one of the accepted values.
    #[error("unknown {kind} match type \"{value}\", expected one of: {}", .expected.join(", "))]
    UnknownMatchType {
        /// `"tag"` or `"name"`.
        kind: &'static str,
        /// The value as written.
        value: String,
        /// The accepted spellings.
        expected: &'static [&'static str],
    },

    /// A selector list exceeds [`MAX_SELECTORS`].
    ///
    /// A hardening limit added on top of match-type validation, like
    /// [`SelectorTooLong`](Self::SelectorTooLong). Rule authors never hit it
    /// with real configs.
    #[error("{field} has {count} selectors, but maximum allowed is {max}")]
    TooManySelectors {
        /// Which list.
        field: &'static str,
        /// Actual count.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A selector exceeds [`MAX_SELECTOR_LENGTH`].
    #[error("{field} has a selector of {len} bytes, but maximum allowed is {max}")]
    SelectorTooLong {
        /// Which list.
        field: &'static str,
        /// Actual length.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A rule failed to compile.
    #[error("{campaign} rule {index}: {source}")]
    InvalidRule {
        /// Config `type` of the campaign.
        campaign: &'static str,
        /// Index of the rule within the campaign (0-based).
        index: usize,
        /// What was wrong with it.
        source: Box<ConfigError>,
    },

    /// The config document is not valid YAML for a [`RulesConfig`].
    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The config document is not valid JSON for a [`RulesConfig`].
    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    /// The config file could not be read.
    #[error("failed to read \"{}\": {source}", .path.display())]
    Io {
        /// The file that was read.
        path: std::path::PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Attach the rule location to an error.
    #[must_use]
    pub fn in_rule(self, campaign: &'static str, index: usize) -> Self {
        Self::InvalidRule {
            campaign,
            index,
            source: Box::new(self),
        }
    }
}
