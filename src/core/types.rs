//! Closed category sets and strongly-typed parameter values
//!
//! Every ability the parser produces is described by one trigger category,
//! and each of its effects by an effect category and a target category.
//! The sets are closed: anything the parser cannot place lands in an
//! explicit catch-all variant rather than being dropped.

use crate::{AbilityError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// When an ability is active or fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCondition {
    // Static / continuous
    Continuous,
    /// Modifies the cost to play the card itself
    StaticCostModifier,
    WhileAtLocation,
    /// Active only during the controller's turn
    OnYourTurn,

    // Event-based
    OnPlay,
    OnQuest,
    OnChallenge,
    OnBeingChallenged,
    OnBanish,
    /// Another character leaves play (filtered by default parameters)
    OnCharacterLeavesPlay,
    OnExert,
    OnOpponentPlaysSong,
    OnOpponentPlaysCard,
    OnCharacterEntersPlay,
    OnMoveToLocation,
    OnSing,
    StartOfTurn,
    EndOfTurn,

    /// Requires the player to pay a cost
    Activated,

    // Keywords
    KeywordBodyguard,
    KeywordChallenger,
    KeywordEvasive,
    KeywordReckless,
    KeywordResist,
    KeywordRush,
    KeywordShift,
    KeywordSinger,
    KeywordSupport,
    KeywordVanish,
    KeywordWard,
    SingTogether,
    /// A rules-text line that only lists several keywords
    MultipleKeywords,
    /// A keyword-list entry outside the known vocabulary
    KeywordUnclassified,
}

impl TriggerCondition {
    pub const ALL: &'static [TriggerCondition] = &[
        TriggerCondition::Continuous,
        TriggerCondition::StaticCostModifier,
        TriggerCondition::WhileAtLocation,
        TriggerCondition::OnYourTurn,
        TriggerCondition::OnPlay,
        TriggerCondition::OnQuest,
        TriggerCondition::OnChallenge,
        TriggerCondition::OnBeingChallenged,
        TriggerCondition::OnBanish,
        TriggerCondition::OnCharacterLeavesPlay,
        TriggerCondition::OnExert,
        TriggerCondition::OnOpponentPlaysSong,
        TriggerCondition::OnOpponentPlaysCard,
        TriggerCondition::OnCharacterEntersPlay,
        TriggerCondition::OnMoveToLocation,
        TriggerCondition::OnSing,
        TriggerCondition::StartOfTurn,
        TriggerCondition::EndOfTurn,
        TriggerCondition::Activated,
        TriggerCondition::KeywordBodyguard,
        TriggerCondition::KeywordChallenger,
        TriggerCondition::KeywordEvasive,
        TriggerCondition::KeywordReckless,
        TriggerCondition::KeywordResist,
        TriggerCondition::KeywordRush,
        TriggerCondition::KeywordShift,
        TriggerCondition::KeywordSinger,
        TriggerCondition::KeywordSupport,
        TriggerCondition::KeywordVanish,
        TriggerCondition::KeywordWard,
        TriggerCondition::SingTogether,
        TriggerCondition::MultipleKeywords,
        TriggerCondition::KeywordUnclassified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerCondition::Continuous => "continuous",
            TriggerCondition::StaticCostModifier => "static_cost_modifier",
            TriggerCondition::WhileAtLocation => "while_at_location",
            TriggerCondition::OnYourTurn => "on_your_turn",
            TriggerCondition::OnPlay => "on_play",
            TriggerCondition::OnQuest => "on_quest",
            TriggerCondition::OnChallenge => "on_challenge",
            TriggerCondition::OnBeingChallenged => "on_being_challenged",
            TriggerCondition::OnBanish => "on_banish",
            TriggerCondition::OnCharacterLeavesPlay => "on_character_leaves_play",
            TriggerCondition::OnExert => "on_exert",
            TriggerCondition::OnOpponentPlaysSong => "on_opponent_plays_song",
            TriggerCondition::OnOpponentPlaysCard => "on_opponent_plays_card",
            TriggerCondition::OnCharacterEntersPlay => "on_character_enters_play",
            TriggerCondition::OnMoveToLocation => "on_move_to_location",
            TriggerCondition::OnSing => "on_sing",
            TriggerCondition::StartOfTurn => "start_of_turn",
            TriggerCondition::EndOfTurn => "end_of_turn",
            TriggerCondition::Activated => "activated",
            TriggerCondition::KeywordBodyguard => "keyword_bodyguard",
            TriggerCondition::KeywordChallenger => "keyword_challenger",
            TriggerCondition::KeywordEvasive => "keyword_evasive",
            TriggerCondition::KeywordReckless => "keyword_reckless",
            TriggerCondition::KeywordResist => "keyword_resist",
            TriggerCondition::KeywordRush => "keyword_rush",
            TriggerCondition::KeywordShift => "keyword_shift",
            TriggerCondition::KeywordSinger => "keyword_singer",
            TriggerCondition::KeywordSupport => "keyword_support",
            TriggerCondition::KeywordVanish => "keyword_vanish",
            TriggerCondition::KeywordWard => "keyword_ward",
            TriggerCondition::SingTogether => "sing_together",
            TriggerCondition::MultipleKeywords => "multiple_keywords",
            TriggerCondition::KeywordUnclassified => "keyword_unclassified",
        }
    }

    /// Check if this trigger stands for a keyword ability
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TriggerCondition::KeywordBodyguard
                | TriggerCondition::KeywordChallenger
                | TriggerCondition::KeywordEvasive
                | TriggerCondition::KeywordReckless
                | TriggerCondition::KeywordResist
                | TriggerCondition::KeywordRush
                | TriggerCondition::KeywordShift
                | TriggerCondition::KeywordSinger
                | TriggerCondition::KeywordSupport
                | TriggerCondition::KeywordVanish
                | TriggerCondition::KeywordWard
                | TriggerCondition::SingTogether
                | TriggerCondition::MultipleKeywords
                | TriggerCondition::KeywordUnclassified
        )
    }
}

/// What an effect does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    DrawCard,
    GainLore,
    LoseLore,
    DiscardCardChosen,
    DealDamage,
    /// Remove damage counters
    HealDamage,
    /// Change strength, willpower or lore
    ModifyStats,
    ExertCard,
    ReadyCard,
    GrantKeyword,
    RemoveKeyword,
    /// Set a flag such as "can't be challenged"
    SetAttribute,
    /// Move card(s) between hand, deck, discard and inkwell
    MoveToZone,
    LookAtTopCards,
    RevealCard,
    /// Play a card from somewhere other than the hand
    PlayCard,
    Banish,
    PreventAction,
    ModifyCostToPlay,
    /// Wraps nested effects behind a condition
    Conditional,
    Other,
}

impl EffectType {
    pub const ALL: &'static [EffectType] = &[
        EffectType::DrawCard,
        EffectType::GainLore,
        EffectType::LoseLore,
        EffectType::DiscardCardChosen,
        EffectType::DealDamage,
        EffectType::HealDamage,
        EffectType::ModifyStats,
        EffectType::ExertCard,
        EffectType::ReadyCard,
        EffectType::GrantKeyword,
        EffectType::RemoveKeyword,
        EffectType::SetAttribute,
        EffectType::MoveToZone,
        EffectType::LookAtTopCards,
        EffectType::RevealCard,
        EffectType::PlayCard,
        EffectType::Banish,
        EffectType::PreventAction,
        EffectType::ModifyCostToPlay,
        EffectType::Conditional,
        EffectType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectType::DrawCard => "draw_card",
            EffectType::GainLore => "gain_lore",
            EffectType::LoseLore => "lose_lore",
            EffectType::DiscardCardChosen => "discard_card_chosen",
            EffectType::DealDamage => "deal_damage",
            EffectType::HealDamage => "heal_damage",
            EffectType::ModifyStats => "modify_stats",
            EffectType::ExertCard => "exert_card",
            EffectType::ReadyCard => "ready_card",
            EffectType::GrantKeyword => "grant_keyword",
            EffectType::RemoveKeyword => "remove_keyword",
            EffectType::SetAttribute => "set_attribute",
            EffectType::MoveToZone => "move_to_zone",
            EffectType::LookAtTopCards => "look_at_top_cards",
            EffectType::RevealCard => "reveal_card",
            EffectType::PlayCard => "play_card",
            EffectType::Banish => "banish",
            EffectType::PreventAction => "prevent_action",
            EffectType::ModifyCostToPlay => "modify_cost_to_play",
            EffectType::Conditional => "conditional",
            EffectType::Other => "other",
        }
    }
}

/// Who or what an effect applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// The player controlling the effect
    SelfPlayer,
    OpponentPlayer,
    /// The card that is the source of the effect
    SelfCard,
    TargetCharacterChosen,
    TargetItemChosen,
    TargetLocationChosen,
    TargetCardInDiscardChosen,
    AllOwnCharacters,
    AllOpponentCharacters,
    /// Cards revealed by an earlier look-at-top effect
    LookedAtCards,
    /// Cards of a type named in the parameters
    CardType,
    /// No target (game-wide or wrapper effects)
    None,
}

impl TargetType {
    pub const ALL: &'static [TargetType] = &[
        TargetType::SelfPlayer,
        TargetType::OpponentPlayer,
        TargetType::SelfCard,
        TargetType::TargetCharacterChosen,
        TargetType::TargetItemChosen,
        TargetType::TargetLocationChosen,
        TargetType::TargetCardInDiscardChosen,
        TargetType::AllOwnCharacters,
        TargetType::AllOpponentCharacters,
        TargetType::LookedAtCards,
        TargetType::CardType,
        TargetType::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetType::SelfPlayer => "self_player",
            TargetType::OpponentPlayer => "opponent_player",
            TargetType::SelfCard => "self_card",
            TargetType::TargetCharacterChosen => "target_character_chosen",
            TargetType::TargetItemChosen => "target_item_chosen",
            TargetType::TargetLocationChosen => "target_location_chosen",
            TargetType::TargetCardInDiscardChosen => "target_card_in_discard_chosen",
            TargetType::AllOwnCharacters => "all_own_characters",
            TargetType::AllOpponentCharacters => "all_opponent_characters",
            TargetType::LookedAtCards => "looked_at_cards",
            TargetType::CardType => "card_type",
            TargetType::None => "none",
        }
    }

    /// Map a card-kind word from rules text ("character", "item", "location")
    /// to the matching "chosen" target
    pub fn chosen(kind: &str) -> Option<Self> {
        match kind.to_ascii_lowercase().as_str() {
            "character" | "characters" => Some(TargetType::TargetCharacterChosen),
            "item" | "items" => Some(TargetType::TargetItemChosen),
            "location" | "locations" => Some(TargetType::TargetLocationChosen),
            _ => None,
        }
    }
}

macro_rules! category_text_impls {
    ($ty:ident, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = AbilityError;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim().to_ascii_lowercase();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|c| c.as_str() == wanted)
                    .ok_or_else(|| AbilityError::UnknownCategory {
                        kind: $kind,
                        name: s.to_string(),
                    })
            }
        }
    };
}

category_text_impls!(TriggerCondition, "trigger");
category_text_impls!(EffectType, "effect");
category_text_impls!(TargetType, "target");

/// A single effect parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Int(i64::from(n))
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Int(i64::from(n))
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

/// String-keyed effect parameters
///
/// Key order carries no meaning; a sorted map keeps serialized output
/// stable so identical parses serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Params(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(ParamValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(ParamValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key) {
            Some(ParamValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Copy the entries of `other` whose keys are not set here yet
    pub fn merge_missing(&mut self, other: &Params) {
        for (k, v) in &other.0 {
            if !self.0.contains_key(k) {
                self.0.insert(k.clone(), v.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (k, v) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
            first = false;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_names_round_trip() {
        for trigger in TriggerCondition::ALL {
            assert_eq!(trigger.as_str().parse::<TriggerCondition>().unwrap(), *trigger);
        }
        for effect in EffectType::ALL {
            assert_eq!(effect.to_string().parse::<EffectType>().unwrap(), *effect);
        }
        for target in TargetType::ALL {
            assert_eq!(target.as_str().parse::<TargetType>().unwrap(), *target);
        }
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&TriggerCondition::OnBeingChallenged).unwrap();
        assert_eq!(json, "\"on_being_challenged\"");
        let json = serde_json::to_string(&TargetType::TargetCardInDiscardChosen).unwrap();
        assert_eq!(json, format!("\"{}\"", TargetType::TargetCardInDiscardChosen));
    }

    #[test]
    fn test_unknown_category() {
        let err = "teleport".parse::<EffectType>().unwrap_err();
        match err {
            AbilityError::UnknownCategory { kind, name } => {
                assert_eq!(kind, "effect");
                assert_eq!(name, "teleport");
            }
            other => panic!("Expected UnknownCategory, got {other:?}"),
        }
    }

    #[test]
    fn test_unclassified_narrative_has_no_other_trigger() {
        // Unclassified narrative text lands on `continuous`
        assert!("other".parse::<TriggerCondition>().is_err());
        assert!(TriggerCondition::ALL.iter().all(|t| t.as_str() != "other"));
    }

    #[test]
    fn test_chosen_target_from_kind() {
        assert_eq!(TargetType::chosen("Character"), Some(TargetType::TargetCharacterChosen));
        assert_eq!(TargetType::chosen("location"), Some(TargetType::TargetLocationChosen));
        assert_eq!(TargetType::chosen("item"), Some(TargetType::TargetItemChosen));
        assert_eq!(TargetType::chosen("song"), None);
    }

    #[test]
    fn test_params_typed_access_and_merge_missing() {
        let mut params: Params = [("amount", ParamValue::Int(2))].into_iter().collect();
        params.insert("stat", "strength");

        let defaults: Params = [("filter", "own_other_banished"), ("stat", "lore")].into_iter().collect();
        params.merge_missing(&defaults);

        assert_eq!(params.get_int("amount"), Some(2));
        assert_eq!(params.get_text("stat"), Some("strength"));
        assert_eq!(params.get_text("filter"), Some("own_other_banished"));
        assert_eq!(params.get_int("stat"), None);
        assert_eq!(params.to_string(), "amount=2, filter=own_other_banished, stat=strength");
    }
}
