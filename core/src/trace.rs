//! Evaluation trace types for debugging campaign behavior.
//!
//! Trace types capture what a campaign saw and did instead of just the
//! filtered list. Use `run_with_trace()` on a campaign or runner to find out
//! why a gateway or rate disappeared.
//!
//! # Two Levels of Trace
//!
//! - [`QualifierTrace`]: per qualifier, the extracted data and whether it matched.
//! - [`RunTrace`]: per run, one [`RuleTrace`] per rule, in evaluation order.
//!
//! # Example
//!
//! ```ignore
//! let trace = runner.run_with_trace(&cart, gateways);
//! for rule in &trace.rules {
//!     println!("{}[{}]: removed {:?}", rule.campaign, rule.index, rule.removed);
//! }
//! ```

use std::fmt;

/// Trace of a single [`Qualifier`](crate::Qualifier) evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifierTrace {
    /// Whether the qualifier matched.
    pub matched: bool,
    /// Debug description of the `DataInput` (e.g., `"CustomerTagsInput"`).
    pub input: String,
    /// Kind of the extracted `MatchingData` (`"none"`, `"string"`, `"list"`).
    pub data_type: &'static str,
    /// The `MatchingData` extracted from the cart (Debug format).
    pub data: String,
    /// Debug description of the `InputMatcher`.
    pub matcher: String,
}

/// How a rule's cart-level check came out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule did not look at the candidates at all.
    Skipped {
        /// Why, e.g. `"no shipping address"`.
        reason: &'static str,
    },
    /// The cart was checked against the rule's qualifier.
    Evaluated(QualifierTrace),
}

impl RuleOutcome {
    /// `Some(matched)` when evaluated, `None` when skipped.
    #[must_use]
    pub fn qualified(&self) -> Option<bool> {
        match self {
            Self::Skipped { .. } => None,
            Self::Evaluated(t) => Some(t.matched),
        }
    }
}

/// One rule's contribution to a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTrace {
    /// Name of the campaign that owns the rule.
    pub campaign: &'static str,
    /// Index of the rule within its campaign (0-based).
    pub index: usize,
    /// The cart-level check.
    pub outcome: RuleOutcome,
    /// Names of the candidates this rule removed, in list order.
    pub removed: Vec<String>,
}

impl fmt::Display for RuleTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: ", self.campaign, self.index)?;
        match &self.outcome {
            RuleOutcome::Skipped { reason } => write!(f, "skipped ({reason})")?,
            RuleOutcome::Evaluated(t) => {
                write!(f, "qualified={} {}={}", t.matched, t.data_type, t.data)?;
            }
        }
        if !self.removed.is_empty() {
            write!(f, " removed={:?}", self.removed)?;
        }
        Ok(())
    }
}

/// Trace of a full campaign or runner evaluation.
///
/// # INV: `result` == `run()` result
///
/// The `result` field always equals what `run()` returns for the same input.
pub struct RunTrace<C> {
    /// The filtered candidates (identical to what `run()` returns).
    pub result: Vec<C>,
    /// Trace of each rule, in evaluation order.
    pub rules: Vec<RuleTrace>,
}

impl<C> RunTrace<C> {
    /// Total number of candidates removed across all rules.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.rules.iter().map(|r| r.removed.len()).sum()
    }
}

impl<C: fmt::Debug> fmt::Debug for RunTrace<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunTrace")
            .field("result", &self.result)
            .field("rules", &self.rules)
            .finish()
    }
}
