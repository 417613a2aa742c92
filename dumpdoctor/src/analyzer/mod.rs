pub mod definitions;
pub mod rules;

pub use definitions::default_rules;
pub use rules::{
    Description, Finding, RuleDefinition, RuleError, RuleOutcome, RuleValues, RulesEngine,
    Severity,
};
