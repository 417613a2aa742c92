use crate::parser::schema::DiagnosticRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A detected problem, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

/// Values captured by a matching check for use in its description.
pub type RuleValues = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    NoMatch,
    Matched,
    MatchedWith(RuleValues),
}

impl From<bool> for RuleOutcome {
    fn from(matched: bool) -> Self {
        if matched {
            RuleOutcome::Matched
        } else {
            RuleOutcome::NoMatch
        }
    }
}

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

pub type CheckFn = fn(&DiagnosticRecord) -> Result<RuleOutcome, RuleError>;
pub type DescribeFn = fn(&DiagnosticRecord, Option<&RuleValues>) -> String;

#[derive(Clone, Copy)]
pub enum Description {
    Static(&'static str),
    Dynamic(DescribeFn),
}

/// One entry of the rule registry.
#[derive(Clone, Copy)]
pub struct RuleDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub severity: Severity,
    pub description: Description,
    pub check: CheckFn,
}

impl fmt::Debug for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDefinition")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

impl RuleDefinition {
    /// Description text for a match, with any captured values.
    pub fn describe(&self, record: &DiagnosticRecord, values: Option<&RuleValues>) -> String {
        match self.description {
            Description::Static(text) => text.to_string(),
            Description::Dynamic(describe) => describe(record, values),
        }
    }

    /// Run the check, converting errors and panics into `None`.
    pub fn evaluate(&self, record: &DiagnosticRecord) -> Option<Finding> {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| (self.check)(record))) {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                tracing::warn!("Error checking problem {}: {}", self.id, e);
                return None;
            }
            Err(_) => {
                tracing::warn!("Check for problem {} panicked", self.id);
                return None;
            }
        };

        let values = match outcome {
            RuleOutcome::NoMatch => return None,
            RuleOutcome::Matched => None,
            RuleOutcome::MatchedWith(values) => Some(values),
        };

        Some(Finding {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.describe(record, values.as_ref()),
            severity: self.severity,
        })
    }
}

/// Ordered rule registry and evaluator.
pub struct RulesEngine {
    rules: Vec<RuleDefinition>,
}

impl RulesEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_default_rules() -> Self {
        let mut engine = Self::new();
        for rule in crate::analyzer::definitions::default_rules() {
            engine.add_rule(rule);
        }
        engine
    }

    pub fn add_rule(&mut self, rule: RuleDefinition) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[RuleDefinition] {
        &self.rules
    }

    /// Listed ids that name no registered rule.
    pub fn unknown_ids<'a>(&self, ids: &'a [String]) -> Vec<&'a str> {
        ids.iter()
            .map(String::as_str)
            .filter(|id| !self.rules.iter().any(|r| r.id == *id))
            .collect()
    }

    /// Keep only the rules whose id is listed. An empty list keeps everything.
    pub fn retain_ids(&mut self, ids: &[String]) {
        if ids.is_empty() {
            return;
        }
        for id in self.unknown_ids(ids) {
            tracing::warn!("Unknown rule id {:?} ignored", id);
        }
        self.rules.retain(|r| ids.iter().any(|id| id == r.id));
    }

    /// Evaluate every rule in registry order. Output order follows registry
    /// order; severity plays no part in it.
    pub fn analyze(&self, record: &DiagnosticRecord) -> Vec<Finding> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(record))
            .collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
