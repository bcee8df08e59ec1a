//! Parser configuration

use crate::{AbilityError, Result};
use serde::{Deserialize, Serialize};

/// What to do with an activated-looking clause ("X - Y") whose fragment
/// before the dash holds no recognizable cost
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivatedCostPolicy {
    /// Re-run the clause through the remaining trigger rules
    #[default]
    Reclassify,
    /// Keep it as an activated ability with a free cost
    KeepFree,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserConfig {
    pub activated_cost_policy: ActivatedCostPolicy,
    /// Drop parenthesized reminder text before splitting the body
    pub strip_reminder_text: bool,
    /// Fold accented letters when comparing body clauses to the keyword list
    pub fold_accents: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            activated_cost_policy: ActivatedCostPolicy::Reclassify,
            strip_reminder_text: true,
            fold_accents: true,
        }
    }
}

impl ParserConfig {
    /// Read a configuration from JSON; omitted fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AbilityError::InvalidConfig(e.to_string()))
    }

    pub fn with_activated_cost_policy(mut self, policy: ActivatedCostPolicy) -> Self {
        self.activated_cost_policy = policy;
        self
    }
}
