//! Effect records produced by the classifier

use crate::core::{EffectType, ParamValue, Params, TargetType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single game action resulting from an ability
///
/// Parameters carry the details the rules engine needs (amounts, stats,
/// keyword names, filters). A `Conditional` effect holds the effects it
/// guards in `nested`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub effect_type: EffectType,
    pub target: TargetType,
    #[serde(default, skip_serializing_if = "Params::is_empty")]
    pub params: Params,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<Effect>,
}

impl Effect {
    pub fn new(effect_type: EffectType, target: TargetType) -> Self {
        Effect {
            effect_type,
            target,
            params: Params::new(),
            nested: Vec::new(),
        }
    }

    /// Builder-style parameter insertion
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// An unclassified effect that keeps the source text verbatim
    pub fn other(raw_text: &str) -> Self {
        Effect::new(EffectType::Other, TargetType::None).with_param("raw_text", raw_text)
    }

    /// A conditional wrapper around already-classified effects
    pub fn conditional(connective: &str, condition: &str, nested: Vec<Effect>) -> Self {
        let mut effect = Effect::new(EffectType::Conditional, TargetType::None)
            .with_param("connective", connective)
            .with_param("condition", condition);
        effect.nested = nested;
        effect
    }

    pub fn param_int(&self, key: &str) -> Option<i64> {
        self.params.get_int(key)
    }

    pub fn param_text(&self, key: &str) -> Option<&str> {
        self.params.get_text(key)
    }

    pub fn is_other(&self) -> bool {
        self.effect_type == EffectType::Other
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Effect({}, target={}, params=[{}]", self.effect_type, self.target, self.params)?;
        if !self.nested.is_empty() {
            f.write_str(", then=[")?;
            for (i, effect) in self.nested.iter().enumerate() {
                if i > 0 {
                    f.write_str("; ")?;
                }
                write!(f, "{effect}")?;
            }
            f.write_str("]")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_creation() {
        let draw = Effect::new(EffectType::DrawCard, TargetType::SelfPlayer).with_param("amount", 2);
        assert_eq!(draw.param_int("amount"), Some(2));
        assert_eq!(draw.to_string(), "Effect(draw_card, target=self_player, params=[amount=2])");

        let other = Effect::other("Sing a song of your choice");
        assert!(other.is_other());
        assert_eq!(other.target, TargetType::None);
        assert_eq!(other.param_text("raw_text"), Some("Sing a song of your choice"));
    }

    #[test]
    fn test_conditional_wraps_nested() {
        let prevent = Effect::new(EffectType::PreventAction, TargetType::OpponentPlayer);
        let wrapper = Effect::conditional("if", "you have no cards in your hand", vec![prevent.clone()]);

        assert_eq!(wrapper.effect_type, EffectType::Conditional);
        assert_eq!(wrapper.param_text("condition"), Some("you have no cards in your hand"));
        assert_eq!(wrapper.nested, vec![prevent]);
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let effect = Effect::new(EffectType::Banish, TargetType::SelfCard);
        let json = serde_json::to_string(&effect).unwrap();
        assert_eq!(json, r#"{"effect_type":"banish","target":"self_card"}"#);

        let back: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, effect);
    }
}
