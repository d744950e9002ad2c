//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against the production config path:
//! YAML → `RulesConfig` → `Rulebook::from_config()` → filter.
//!
//! ```yaml
//! name: net30_visibility
//! description: NET30 is only offered to NET30 customers
//! config:
//!   payment_gateways:
//!     - type: show_gateways_for_customer_tag
//!       rules: [...]
//! cases:
//!   - name: tagged customer keeps NET30
//!     cart: { customer: { tags: ["NET30"] } }
//!     payment_gateways: ["Card", "NET30"]
//!     expect_payment_gateways: ["Card", "NET30"]
//! ```
//!
//! A fixture with `expect_error: true` must fail to parse or compile; with
//! `expect_error_contains` the error message must also contain that text.
//!
//! Unknown keys are rejected at every level of the fixture, and every case
//! must state at least one expectation.

use gatekeep::prelude::*;
use serde::Deserialize;

/// A complete test fixture.
///
/// `config` is kept as a raw value so that error fixtures can carry configs
/// that do not deserialize.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub config: serde_json::Value,
    #[serde(default)]
    pub cases: Vec<TestCase>,
    #[serde(default)]
    pub expect_error: bool,
    #[serde(default)]
    pub expect_error_contains: Option<String>,
}

/// One cart and candidate lists, with the expected survivors.
///
/// An expectation left out is not checked, but a case needs at least one.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestCase {
    pub name: String,
    #[serde(default)]
    pub cart: Cart,
    #[serde(default)]
    pub payment_gateways: Vec<String>,
    #[serde(default)]
    pub shipping_rates: Vec<String>,
    #[serde(default)]
    pub expect_payment_gateways: Option<Vec<String>>,
    #[serde(default)]
    pub expect_shipping_rates: Option<Vec<String>>,
}

/// Result of running a single test case.
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub payment_gateways: Vec<String>,
    pub shipping_rates: Vec<String>,
}

impl Fixture {
    /// Parse a fixture from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators.
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Deserialize and compile this fixture's config.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] the production loader would.
    pub fn rulebook(&self) -> Result<Rulebook, ConfigError> {
        let config: RulesConfig = serde_json::from_value(self.config.clone())?;
        Rulebook::from_config(&config)
    }

    /// Run all test cases and return results.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the config does not load.
    pub fn run(&self) -> Result<Vec<CaseResult>, ConfigError> {
        let rulebook = self.rulebook()?;
        Ok(self.cases.iter().map(|case| case.run(&rulebook)).collect())
    }

    /// Run all test cases and panic on the first failure.
    ///
    /// Error fixtures pass when the config fails to load with the expected
    /// message.
    pub fn run_and_assert(&self) {
        assert!(
            self.expect_error || self.expect_error_contains.is_none(),
            "Fixture '{}' sets expect_error_contains without expect_error",
            self.name
        );

        if self.expect_error {
            let Err(err) = self.rulebook() else {
                panic!("Fixture '{}' expected a config error, but it loaded", self.name);
            };
            if let Some(expected) = &self.expect_error_contains {
                let message = err.to_string();
                assert!(
                    message.contains(expected.as_str()),
                    "Fixture '{}' expected an error containing {expected:?}, got: {message}",
                    self.name
                );
            }
            return;
        }

        for case in &self.cases {
            assert!(
                case.expect_payment_gateways.is_some() || case.expect_shipping_rates.is_some(),
                "Fixture '{}' case '{}' has no expectation",
                self.name,
                case.name
            );
        }

        let results = self
            .run()
            .unwrap_or_else(|e| panic!("Fixture '{}' failed to load: {e}", self.name));
        for (case, result) in self.cases.iter().zip(results) {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected gateways {:?} rates {:?}, got gateways {:?} rates {:?}",
                self.name,
                result.case_name,
                case.expect_payment_gateways,
                case.expect_shipping_rates,
                result.payment_gateways,
                result.shipping_rates,
            );
        }
    }
}

impl TestCase {
    fn run(&self, rulebook: &Rulebook) -> CaseResult {
        let gateways = self
            .payment_gateways
            .iter()
            .map(PaymentGateway::new)
            .collect();
        let rates = self.shipping_rates.iter().map(ShippingRate::new).collect();

        let payment_gateways: Vec<String> = rulebook
            .filter_payment_gateways(&self.cart, gateways)
            .into_iter()
            .map(|g| g.name)
            .collect();
        let shipping_rates: Vec<String> = rulebook
            .filter_shipping_rates(&self.cart, rates)
            .into_iter()
            .map(|r| r.name)
            .collect();

        let passed = self
            .expect_payment_gateways
            .as_ref()
            .map_or(true, |expected| *expected == payment_gateways)
            && self
                .expect_shipping_rates
                .as_ref()
                .map_or(true, |expected| *expected == shipping_rates);

        CaseResult {
            case_name: self.name.clone(),
            passed,
            payment_gateways,
            shipping_rates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
name: net30
config:
  payment_gateways:
    - type: show_gateways_for_customer_tag
      rules:
        - customer_tag_match_type: include
          customer_tags: ["NET30"]
          gateway_match_type: exact
          gateway_names: ["NET30"]
cases:
  - name: tagged
    cart: { customer: { tags: ["net30"] } }
    payment_gateways: ["Card", "NET30"]
    expect_payment_gateways: ["Card", "NET30"]
  - name: wrong expectation
    payment_gateways: ["Card", "NET30"]
    expect_payment_gateways: ["Card", "NET30"]
"#;

    #[test]
    fn run_reports_each_case() {
        let fixture = Fixture::from_yaml(FIXTURE).unwrap();
        let results = fixture.run().unwrap();
        assert!(results[0].passed);
        assert!(!results[1].passed);
        assert_eq!(results[1].payment_gateways, vec!["Card".to_string()]);
    }

    #[test]
    fn multi_document_parse() {
        let yaml = format!("{FIXTURE}\n---\n{FIXTURE}");
        assert_eq!(Fixture::from_yaml_multi(&yaml).unwrap().len(), 2);
    }

    #[test]
    fn misspelled_expectation_is_rejected() {
        let yaml = FIXTURE.replace("expect_payment_gateways", "expect_gateways");
        let err = Fixture::from_yaml(&yaml).unwrap_err();
        assert!(err.to_string().contains("expect_gateways"), "{err}");
    }

    #[test]
    #[should_panic(expected = "has no expectation")]
    fn case_without_expectation_fails() {
        let fixture = Fixture::from_yaml(
            r#"
name: vacuous
config: {}
cases:
  - name: nothing checked
    payment_gateways: ["Card"]
"#,
        )
        .unwrap();
        fixture.run_and_assert();
    }

    #[test]
    #[should_panic(expected = "expected an error containing")]
    fn error_fixture_checks_message() {
        let fixture = Fixture::from_yaml(
            r#"
name: wrong reason
expect_error: true
expect_error_contains: "unknown name match type"
config:
  payment_gateways:
    - type: show_gateways_for_customer_tag
      rules:
        - customer_tag_match_type: sometimes
          customer_tags: []
          gateway_match_type: exact
          gateway_names: []
"#,
        )
        .unwrap();
        fixture.run_and_assert();
    }

    #[test]
    fn error_fixture_passes_on_bad_config() {
        let fixture = Fixture::from_yaml(
            r#"
name: bad
expect_error: true
expect_error_contains: "unknown tag match type \"sometimes\""
config:
  payment_gateways:
    - type: show_gateways_for_customer_tag
      rules:
        - customer_tag_match_type: sometimes
          customer_tags: []
          gateway_match_type: exact
          gateway_names: []
"#,
        )
        .unwrap();
        assert!(fixture.rulebook().is_err());
        fixture.run_and_assert();
    }
}
