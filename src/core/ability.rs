//! Ability representation
//!
//! An Ability is one discrete rule printed on a card: a keyword, a
//! triggered ability, an activated ability, or a continuous effect. It
//! carries the text fragment it was parsed from so re-parsing can be
//! checked against it.

use crate::core::{AbilityCost, Effect, EffectType, TriggerCondition};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    /// When this ability fires or applies
    pub trigger: TriggerCondition,

    /// Ordered effects, in the order they appear in the text
    ///
    /// Empty for abilities with nothing to resolve.
    pub effects: Vec<Effect>,

    /// Activation cost; only set for activated abilities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<AbilityCost>,

    /// The text this ability was parsed from
    pub source_text: String,
}

impl Ability {
    pub fn new(trigger: TriggerCondition, effects: Vec<Effect>, source_text: impl Into<String>) -> Self {
        Ability {
            trigger,
            effects,
            cost: None,
            source_text: source_text.into(),
        }
    }

    pub fn with_cost(mut self, cost: AbilityCost) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Check if this ability represents a keyword
    pub fn is_keyword(&self) -> bool {
        self.trigger.is_keyword()
    }

    /// Check if this is an activated ability
    pub fn is_activated(&self) -> bool {
        self.trigger == TriggerCondition::Activated
    }

    /// Get all effects of a specific type
    pub fn effects_of_type(&self, effect_type: EffectType) -> impl Iterator<Item = &Effect> {
        self.effects.iter().filter(move |e| e.effect_type == effect_type)
    }

    /// Check if this ability has any effect of a specific type
    pub fn has_effect_type(&self, effect_type: EffectType) -> bool {
        self.effects.iter().any(|e| e.effect_type == effect_type)
    }

    /// Check if every effect fell through to the unclassified bucket
    pub fn is_unclassified(&self) -> bool {
        !self.effects.is_empty() && self.effects.iter().all(Effect::is_other)
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ability(Trigger: {}", self.trigger)?;
        if let Some(cost) = self.cost.as_ref().filter(|c| !c.is_free()) {
            write!(f, " Cost: {cost}")?;
        }
        f.write_str(", Effects: [")?;
        for (i, effect) in self.effects.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{effect}")?;
        }
        f.write_str("])")
    }
}
