//! Effect segmenter and classifier
//!
//! Effect text is split into sub-clauses, and each sub-clause is matched
//! against an ordered table of effect phrases. Captured slots are converted
//! to typed parameters. A lead-in condition ("If you have no cards in your
//! hand, ...") wraps the rest of the sub-clause as nested effects. Anything
//! unrecognized becomes an `Other` effect carrying its raw text.

use crate::core::{Effect, EffectType, ParamValue, TargetType};
use crate::parser::keywords::match_keyword;
use crate::parser::rules::{group, RuleDef, RuleTable};
use crate::parser::text::{parse_amount, parse_int, split_sub_clauses, trim_clause};
use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};
use tracing::debug;

/// Where an effect's target comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSpec {
    Fixed(TargetType),
    /// Inferred from the `target` group ("character", "item", "location"),
    /// or the fallback when the group did not participate
    Chosen { fallback: TargetType },
}

/// A literal parameter attached by a rule regardless of captures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticParam {
    Text(&'static str),
    Int(i64),
    Bool(bool),
}

impl From<StaticParam> for ParamValue {
    fn from(value: StaticParam) -> Self {
        match value {
            StaticParam::Text(s) => ParamValue::Text(s.to_string()),
            StaticParam::Int(n) => ParamValue::Int(n),
            StaticParam::Bool(b) => ParamValue::Bool(b),
        }
    }
}

#[derive(Debug)]
pub struct EffectRule {
    pub id: &'static str,
    pattern: &'static str,
    pub effect_type: EffectType,
    pub target: TargetSpec,
    pub defaults: &'static [(&'static str, StaticParam)],
}

impl RuleDef for EffectRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn pattern(&self) -> &'static str {
        self.pattern
    }
}

/// Named capture groups the classifier understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Amount,
    Modifier,
    Stat,
    Target,
    Adjective,
    Keyword,
    Classification,
    CardType,
    Action,
    Duration,
}

impl Slot {
    const ALL: &'static [Slot] = &[
        Slot::Amount,
        Slot::Modifier,
        Slot::Stat,
        Slot::Target,
        Slot::Adjective,
        Slot::Keyword,
        Slot::Classification,
        Slot::CardType,
        Slot::Action,
        Slot::Duration,
    ];

    fn group(self) -> &'static str {
        match self {
            Slot::Amount => "amount",
            Slot::Modifier => "modifier",
            Slot::Stat => "stat",
            Slot::Target => "target",
            Slot::Adjective => "adjective",
            Slot::Keyword => "keyword",
            Slot::Classification => "classification",
            Slot::CardType => "card_type",
            Slot::Action => "action",
            Slot::Duration => "duration",
        }
    }

    /// Convert a captured slot into parameters on `effect`
    ///
    /// Values that do not convert are dropped; the effect is still emitted.
    fn apply(self, raw: &str, effect: &mut Effect) {
        let raw = raw.trim();
        match self {
            Slot::Amount => {
                if let Some(n) = parse_amount(raw) {
                    effect.params.insert("amount", n);
                }
            }
            Slot::Modifier => {
                if let Some(n) = parse_int(raw) {
                    effect.params.insert("modifier", n);
                }
            }
            Slot::Stat => {
                if let Some(stat) = stat_name(raw) {
                    effect.params.insert("stat", stat);
                }
            }
            Slot::Target => {
                if let Some(target) = TargetType::chosen(raw) {
                    effect.target = target;
                }
            }
            Slot::Adjective | Slot::Action => {
                effect.params.insert(self.group(), raw.to_lowercase());
            }
            Slot::Classification => {
                effect.params.insert("classification", raw);
            }
            Slot::Keyword => match match_keyword(raw) {
                Some(keyword) => {
                    effect.params.insert("keyword", keyword.keyword);
                    if let Some(value) = keyword.value {
                        effect.params.insert("value", value);
                    }
                }
                None => effect.params.insert("keyword", raw),
            },
            Slot::CardType => {
                effect.params.insert("card_type", singular(&raw.to_lowercase()));
            }
            Slot::Duration => {
                effect.params.insert("duration", duration_name(raw));
            }
        }
    }
}

fn stat_name(symbol: &str) -> Option<&'static str> {
    match symbol.to_ascii_lowercase().as_str() {
        "s" => Some("strength"),
        "w" => Some("willpower"),
        "l" => Some("lore"),
        _ => None,
    }
}

fn singular(word: &str) -> String {
    match word.strip_suffix('s') {
        Some(stem) if stem.len() > 2 => stem.to_string(),
        _ => word.to_string(),
    }
}

fn duration_name(phrase: &str) -> &'static str {
    let phrase = phrase.to_ascii_lowercase();
    if phrase.contains("start of your next turn") {
        "until_next_turn"
    } else if phrase.contains("their next turn") {
        "their_next_turn"
    } else {
        "turn"
    }
}

const DESTINATION_HAND: (&str, StaticParam) = ("destination", StaticParam::Text("hand"));

/// Effect rules, most specific first
pub static EFFECT_RULES: &[EffectRule] = &[
    EffectRule {
        id: "opponent_discards",
        pattern: r"\beach opponent chooses and discards (?P<amount>\d+|an?) cards?\b",
        effect_type: EffectType::DiscardCardChosen,
        target: TargetSpec::Fixed(TargetType::OpponentPlayer),
        defaults: &[],
    },
    EffectRule {
        id: "self_discards",
        pattern: r"\bchoose and discard (?P<amount>\d+|an?) cards?\b",
        effect_type: EffectType::DiscardCardChosen,
        target: TargetSpec::Fixed(TargetType::SelfPlayer),
        defaults: &[],
    },
    EffectRule {
        id: "opponent_draws",
        pattern: r"\beach opponent draws (?P<amount>\d+|an?) cards?\b",
        effect_type: EffectType::DrawCard,
        target: TargetSpec::Fixed(TargetType::OpponentPlayer),
        defaults: &[],
    },
    // Only the card's own player; "each player draws" stays unclassified
    EffectRule {
        id: "draw",
        pattern: r"(?:^|\byou (?:may )?|\bthen |\band )draw (?P<amount>\d+|an?) cards?\b",
        effect_type: EffectType::DrawCard,
        target: TargetSpec::Fixed(TargetType::SelfPlayer),
        defaults: &[],
    },
    EffectRule {
        id: "opponent_loses_lore",
        pattern: r"\beach opponent loses (?P<amount>\d+) lore\b",
        effect_type: EffectType::LoseLore,
        target: TargetSpec::Fixed(TargetType::OpponentPlayer),
        defaults: &[],
    },
    EffectRule {
        id: "gain_lore",
        pattern: r"\bgains? (?P<amount>\d+) lore\b",
        effect_type: EffectType::GainLore,
        target: TargetSpec::Fixed(TargetType::SelfPlayer),
        defaults: &[],
    },
    EffectRule {
        id: "damage_each_opposing",
        pattern: r"\bdeal (?P<amount>\d+) damage to each opposing character\b",
        effect_type: EffectType::DealDamage,
        target: TargetSpec::Fixed(TargetType::AllOpponentCharacters),
        defaults: &[],
    },
    EffectRule {
        id: "damage_chosen",
        pattern: r"\bdeal (?P<amount>\d+) damage to (?:(?P<adjective>another) )?chosen (?:opposing )?(?P<target>character|item|location)\b",
        effect_type: EffectType::DealDamage,
        target: TargetSpec::Chosen { fallback: TargetType::TargetCharacterChosen },
        defaults: &[],
    },
    EffectRule {
        id: "heal_each_own",
        pattern: r"\bremove up to (?P<amount>\d+) damage from each of your characters\b",
        effect_type: EffectType::HealDamage,
        target: TargetSpec::Fixed(TargetType::AllOwnCharacters),
        defaults: &[],
    },
    EffectRule {
        id: "heal_chosen",
        pattern: r"\bremove up to (?P<amount>\d+) damage from chosen (?P<target>character|location)\b",
        effect_type: EffectType::HealDamage,
        target: TargetSpec::Chosen { fallback: TargetType::TargetCharacterChosen },
        defaults: &[],
    },
    EffectRule {
        id: "heal_self",
        pattern: r"\bremove up to (?P<amount>\d+) damage from this character\b",
        effect_type: EffectType::HealDamage,
        target: TargetSpec::Fixed(TargetType::SelfCard),
        defaults: &[],
    },
    EffectRule {
        id: "cannot_be_challenged",
        pattern: r"\bthis character can(?:['’]|no)t be challenged(?: (?P<duration>this turn|until the start of your next turn))?",
        effect_type: EffectType::SetAttribute,
        target: TargetSpec::Fixed(TargetType::SelfCard),
        defaults: &[("attribute", StaticParam::Text("cannot_be_challenged")), ("value", StaticParam::Bool(true))],
    },
    EffectRule {
        id: "chosen_stat",
        pattern: r"\bchosen (?:(?P<adjective>opposing|other) )?character(?: of yours)? gets (?P<modifier>[+-]\d+) \{(?P<stat>[swl])\}(?: (?P<duration>this turn))?",
        effect_type: EffectType::ModifyStats,
        target: TargetSpec::Fixed(TargetType::TargetCharacterChosen),
        defaults: &[],
    },
    EffectRule {
        id: "each_opposing_stat",
        pattern: r"\beach opposing character gets (?P<modifier>[+-]\d+) \{(?P<stat>[swl])\}(?: (?P<duration>this turn))?",
        effect_type: EffectType::ModifyStats,
        target: TargetSpec::Fixed(TargetType::AllOpponentCharacters),
        defaults: &[],
    },
    EffectRule {
        id: "own_characters_stat",
        pattern: r"\byour (?:(?P<adjective>other) )?(?:(?P<classification>[a-z][a-z ]*?) )?characters get (?P<modifier>[+-]\d+) \{(?P<stat>[swl])\}(?: (?P<duration>this turn))?",
        effect_type: EffectType::ModifyStats,
        target: TargetSpec::Fixed(TargetType::AllOwnCharacters),
        defaults: &[],
    },
    EffectRule {
        id: "self_stat",
        pattern: r"\bthis character gets (?P<modifier>[+-]\d+) \{(?P<stat>[swl])\}(?: (?P<duration>this turn))?",
        effect_type: EffectType::ModifyStats,
        target: TargetSpec::Fixed(TargetType::SelfCard),
        defaults: &[],
    },
    EffectRule {
        id: "generic_stat",
        pattern: r"\b(?:it|this item|this location) gets? (?P<modifier>[+-]\d+) \{(?P<stat>[swl])\}(?: (?P<duration>this turn))?",
        effect_type: EffectType::ModifyStats,
        target: TargetSpec::Fixed(TargetType::SelfCard),
        defaults: &[],
    },
    EffectRule {
        id: "return_chosen_to_hand",
        pattern: r"\breturn (?:(?P<adjective>another) )?chosen (?:opposing )?(?P<target>character|item|location)(?: card)? to (?:their|its) player['’]s hand\b",
        effect_type: EffectType::MoveToZone,
        target: TargetSpec::Chosen { fallback: TargetType::TargetCharacterChosen },
        defaults: &[DESTINATION_HAND],
    },
    EffectRule {
        id: "return_self_to_hand",
        pattern: r"\breturn this (?:character|card|item) to your hand\b",
        effect_type: EffectType::MoveToZone,
        target: TargetSpec::Fixed(TargetType::SelfCard),
        defaults: &[DESTINATION_HAND],
    },
    EffectRule {
        id: "shuffle_from_discard",
        pattern: r"\bshuffle (?:a|chosen) card from (?:any|your) discard into (?:its player['’]s|your) deck\b",
        effect_type: EffectType::MoveToZone,
        target: TargetSpec::Fixed(TargetType::TargetCardInDiscardChosen),
        defaults: &[("destination", StaticParam::Text("deck")), ("shuffle", StaticParam::Bool(true))],
    },
    EffectRule {
        id: "put_into_inkwell",
        pattern: r"\bput (?:chosen (?:opposing )?(?P<target>character|item|location)|[^,]+?) into (?:your|(?:their|its)(?: player['’]s)?) inkwell\b",
        effect_type: EffectType::MoveToZone,
        target: TargetSpec::Chosen { fallback: TargetType::None },
        defaults: &[("destination", StaticParam::Text("inkwell"))],
    },
    EffectRule {
        id: "looked_at_into_hand",
        pattern: r"\bput (?:them|it|one|that card|one of them) into your hand\b",
        effect_type: EffectType::MoveToZone,
        target: TargetSpec::Fixed(TargetType::LookedAtCards),
        defaults: &[DESTINATION_HAND],
    },
    EffectRule {
        id: "banish_chosen",
        pattern: r"\bbanish (?:(?P<adjective>another) )?chosen (?:opposing )?(?P<target>character|item|location)\b",
        effect_type: EffectType::Banish,
        target: TargetSpec::Chosen { fallback: TargetType::TargetCharacterChosen },
        defaults: &[],
    },
    EffectRule {
        id: "banish_self",
        pattern: r"\bbanish this (?:character|item|location)\b",
        effect_type: EffectType::Banish,
        target: TargetSpec::Fixed(TargetType::SelfCard),
        defaults: &[],
    },
    EffectRule {
        id: "exert_chosen",
        pattern: r"\bexert (?:another )?chosen (?:(?P<adjective>opposing) )?character\b",
        effect_type: EffectType::ExertCard,
        target: TargetSpec::Fixed(TargetType::TargetCharacterChosen),
        defaults: &[],
    },
    EffectRule {
        id: "ready_chosen",
        pattern: r"\bready (?:another )?chosen (?:(?P<adjective>other) )?character\b",
        effect_type: EffectType::ReadyCard,
        target: TargetSpec::Fixed(TargetType::TargetCharacterChosen),
        defaults: &[],
    },
    EffectRule {
        id: "ready_self",
        pattern: r"\bready this character\b",
        effect_type: EffectType::ReadyCard,
        target: TargetSpec::Fixed(TargetType::SelfCard),
        defaults: &[],
    },
    EffectRule {
        id: "look_at_top",
        pattern: r"\blook at the top (?P<amount>\d+|an?) cards? of your deck\b",
        effect_type: EffectType::LookAtTopCards,
        target: TargetSpec::Fixed(TargetType::SelfPlayer),
        defaults: &[],
    },
    EffectRule {
        id: "reveal",
        pattern: r"\breveal (?:up to )?(?P<amount>\d+|an?) (?P<card_type>[a-z]+) cards?\b",
        effect_type: EffectType::RevealCard,
        target: TargetSpec::Fixed(TargetType::SelfPlayer),
        defaults: &[],
    },
    EffectRule {
        id: "chosen_gains_keyword",
        pattern: r"\bchosen (?:(?P<adjective>opposing|other) )?character gains (?P<keyword>[a-z]+(?: \+?\d+)?)(?: (?P<duration>this turn|until the start of your next turn|during their next turn))?",
        effect_type: EffectType::GrantKeyword,
        target: TargetSpec::Fixed(TargetType::TargetCharacterChosen),
        defaults: &[],
    },
    EffectRule {
        id: "self_gains_keyword",
        pattern: r"\bthis character gains (?P<keyword>[a-z]+(?: \+?\d+)?)(?: (?P<duration>this turn|until the start of your next turn))?",
        effect_type: EffectType::GrantKeyword,
        target: TargetSpec::Fixed(TargetType::SelfCard),
        defaults: &[],
    },
    EffectRule {
        id: "own_characters_gain_keyword",
        pattern: r"\byour (?:(?P<adjective>other) )?(?:(?P<classification>[a-z][a-z ]*?) )?characters gain (?P<keyword>[a-z]+(?: \+?\d+)?)(?: (?P<duration>this turn))?",
        effect_type: EffectType::GrantKeyword,
        target: TargetSpec::Fixed(TargetType::AllOwnCharacters),
        defaults: &[],
    },
    EffectRule {
        id: "loses_keyword",
        pattern: r"\bchosen (?:opposing )?character loses (?P<keyword>[a-z]+(?: \+?\d+)?)(?: (?P<duration>this turn))?",
        effect_type: EffectType::RemoveKeyword,
        target: TargetSpec::Fixed(TargetType::TargetCharacterChosen),
        defaults: &[],
    },
    EffectRule {
        id: "opponents_cant_play",
        pattern: r"\b(?:opponents|each opponent) can(?:['’]|no)t play (?P<card_type>actions|songs|characters|items|locations)\b",
        effect_type: EffectType::PreventAction,
        target: TargetSpec::Fixed(TargetType::OpponentPlayer),
        defaults: &[("action", StaticParam::Text("play"))],
    },
    EffectRule {
        id: "self_cant_act",
        pattern: r"\bthis character can(?:['’]|no)t (?P<action>quest|challenge|ready|sing songs)\b",
        effect_type: EffectType::PreventAction,
        target: TargetSpec::Fixed(TargetType::SelfCard),
        defaults: &[],
    },
    EffectRule {
        id: "chosen_cant_act",
        pattern: r"\bchosen (?:opposing )?character can(?:['’]|no)t (?P<action>quest|challenge|ready)(?: (?P<duration>during their next turn|this turn))?",
        effect_type: EffectType::PreventAction,
        target: TargetSpec::Fixed(TargetType::TargetCharacterChosen),
        defaults: &[],
    },
    EffectRule {
        id: "play_song_again",
        pattern: r"\bplay that song again\b",
        effect_type: EffectType::PlayCard,
        target: TargetSpec::Fixed(TargetType::CardType),
        defaults: &[("card_type", StaticParam::Text("song")), ("from", StaticParam::Text("discard"))],
    },
    EffectRule {
        id: "play_for_free",
        pattern: r"\bplay (?:it|them|that card) for free\b",
        effect_type: EffectType::PlayCard,
        target: TargetSpec::Fixed(TargetType::LookedAtCards),
        defaults: &[("cost", StaticParam::Int(0))],
    },
    EffectRule {
        id: "pay_less",
        pattern: r"\bpay (?P<amount>\d+) ?\{i\} less\b",
        effect_type: EffectType::ModifyCostToPlay,
        target: TargetSpec::Fixed(TargetType::SelfCard),
        defaults: &[("direction", StaticParam::Text("less"))],
    },
];

static EFFECTS: Lazy<RuleTable<EffectRule>> =
    Lazy::new(|| RuleTable::try_new(EFFECT_RULES).expect("built-in effect patterns are valid"));

static CONDITIONAL: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(r"(?s)^(?P<connective>if|while|when)\s+(?P<condition>[^,]+),\s*(?P<consequence>.+)$")
        .case_insensitive(true)
        .build()
        .expect("built-in conditional pattern is valid")
});

/// The compiled effect table
pub fn effect_table() -> &'static RuleTable<EffectRule> {
    &EFFECTS
}

/// Classify effect text into an ordered list of effects
///
/// Non-empty text always yields at least one effect.
pub fn classify_effects(effect_text: &str) -> Vec<Effect> {
    let effects: Vec<Effect> = split_sub_clauses(effect_text).into_iter().map(classify_sub_clause).collect();

    if effects.is_empty() && !effect_text.trim().is_empty() {
        // Nothing but punctuation; keep it rather than drop it
        return vec![Effect::other(effect_text.trim())];
    }
    effects
}

/// Classify one sub-clause (no sentence punctuation inside)
pub fn classify_sub_clause(sub_clause: &str) -> Effect {
    let sub_clause = trim_clause(sub_clause);

    if let Some(caps) = CONDITIONAL.captures(sub_clause) {
        return classify_conditional(&caps);
    }

    match EFFECTS.first_match(sub_clause) {
        Some((rule, caps)) => {
            #[cfg(feature = "verbose-logging")]
            tracing::trace!(rule = rule.id, effect = %rule.effect_type, sub_clause, "effect rule matched");
            let matched_end = caps.get(0).map_or(sub_clause.len(), |m| m.end());
            let rest = &sub_clause[matched_end..];
            if EFFECTS.first_match(rest).is_some() {
                debug!(sub_clause, rest, "only the first effect phrase in the sub-clause was classified");
            }
            build_effect(rule, &caps)
        }
        None => {
            debug!(sub_clause, "no effect rule matched");
            Effect::other(sub_clause)
        }
    }
}

fn classify_conditional(caps: &Captures<'_>) -> Effect {
    let connective = group(caps, "connective").unwrap_or("if").to_lowercase();
    let condition = group(caps, "condition").unwrap_or("").trim();
    let consequence = trim_clause(group(caps, "consequence").unwrap_or(""));

    let mut nested = classify_effects(consequence);
    if nested.is_empty() {
        nested.push(Effect::other(consequence));
    }
    Effect::conditional(&connective, condition, nested)
}

fn build_effect(rule: &EffectRule, caps: &Captures<'_>) -> Effect {
    let target = match rule.target {
        TargetSpec::Fixed(target) | TargetSpec::Chosen { fallback: target } => target,
    };
    let mut effect = Effect::new(rule.effect_type, target);

    for (key, value) in rule.defaults {
        effect.params.insert(*key, *value);
    }

    for slot in Slot::ALL {
        if *slot == Slot::Target && matches!(rule.target, TargetSpec::Fixed(_)) {
            continue;
        }
        if let Some(raw) = group(caps, slot.group()) {
            slot.apply(raw, &mut effect);
        }
    }
    effect
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(text: &str) -> Effect {
        let effects = classify_effects(text);
        assert_eq!(effects.len(), 1, "expected one effect from {text:?}, got {effects:?}");
        effects.into_iter().next().unwrap()
    }

    #[test]
    fn test_effect_rule_ids_are_unique() {
        let mut ids = effect_table().ids();
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_effect_rule_order() {
        assert_eq!(
            effect_table().ids(),
            vec![
                "opponent_discards",
                "self_discards",
                "opponent_draws",
                "draw",
                "opponent_loses_lore",
                "gain_lore",
                "damage_each_opposing",
                "damage_chosen",
                "heal_each_own",
                "heal_chosen",
                "heal_self",
                "cannot_be_challenged",
                "chosen_stat",
                "each_opposing_stat",
                "own_characters_stat",
                "self_stat",
                "generic_stat",
                "return_chosen_to_hand",
                "return_self_to_hand",
                "shuffle_from_discard",
                "put_into_inkwell",
                "looked_at_into_hand",
                "banish_chosen",
                "banish_self",
                "exert_chosen",
                "ready_chosen",
                "ready_self",
                "look_at_top",
                "reveal",
                "chosen_gains_keyword",
                "self_gains_keyword",
                "own_characters_gain_keyword",
                "loses_keyword",
                "opponents_cant_play",
                "self_cant_act",
                "chosen_cant_act",
                "play_song_again",
                "play_for_free",
                "pay_less",
            ]
        );
    }

    #[test]
    fn test_draw_and_lore() {
        let e = single("Draw a card");
        assert_eq!(e.effect_type, EffectType::DrawCard);
        assert_eq!(e.target, TargetType::SelfPlayer);
        assert_eq!(e.param_int("amount"), Some(1));

        let e = single("draw 2 cards");
        assert_eq!(e.param_int("amount"), Some(2));

        let e = single("gain 1 lore");
        assert_eq!(e.effect_type, EffectType::GainLore);
        assert_eq!(e.param_int("amount"), Some(1));

        let e = single("each opponent loses 2 lore");
        assert_eq!(e.effect_type, EffectType::LoseLore);
        assert_eq!(e.target, TargetType::OpponentPlayer);
    }

    #[test]
    fn test_draw_subject_decides_target() {
        let e = single("you may draw a card");
        assert_eq!(e.effect_type, EffectType::DrawCard);
        assert_eq!(e.target, TargetType::SelfPlayer);

        let e = single("Each opponent draws a card");
        assert_eq!(e.effect_type, EffectType::DrawCard);
        assert_eq!(e.target, TargetType::OpponentPlayer);
        assert_eq!(e.param_int("amount"), Some(1));

        let e = single("Each player draws a card");
        assert!(e.is_other());
    }

    #[test]
    fn test_sub_clauses_keep_order() {
        let effects = classify_effects("Draw a card; gain 1 lore. Each opponent chooses and discards a card");
        let kinds: Vec<_> = effects.iter().map(|e| e.effect_type).collect();
        assert_eq!(
            kinds,
            vec![EffectType::DrawCard, EffectType::GainLore, EffectType::DiscardCardChosen]
        );
        assert_eq!(effects[2].target, TargetType::OpponentPlayer);
    }

    #[test]
    fn test_damage_targets() {
        let e = single("Deal 2 damage to chosen character");
        assert_eq!(e.effect_type, EffectType::DealDamage);
        assert_eq!(e.target, TargetType::TargetCharacterChosen);
        assert_eq!(e.param_int("amount"), Some(2));

        let e = single("deal 3 damage to chosen location");
        assert_eq!(e.target, TargetType::TargetLocationChosen);

        let e = single("deal 1 damage to each opposing character");
        assert_eq!(e.target, TargetType::AllOpponentCharacters);
    }

    #[test]
    fn test_stat_modifiers() {
        let e = single("Chosen opposing character gets -2 {S} this turn");
        assert_eq!(e.effect_type, EffectType::ModifyStats);
        assert_eq!(e.target, TargetType::TargetCharacterChosen);
        assert_eq!(e.param_int("modifier"), Some(-2));
        assert_eq!(e.param_text("stat"), Some("strength"));
        assert_eq!(e.param_text("adjective"), Some("opposing"));
        assert_eq!(e.param_text("duration"), Some("turn"));

        let e = single("your other Hero characters get +1 {l}");
        assert_eq!(e.target, TargetType::AllOwnCharacters);
        assert_eq!(e.param_text("classification"), Some("Hero"));
        assert_eq!(e.param_text("stat"), Some("lore"));

        let e = single("this character gets +1 {w}");
        assert_eq!(e.target, TargetType::SelfCard);
        assert_eq!(e.param_text("stat"), Some("willpower"));
    }

    #[test]
    fn test_stat_modifier_subjects() {
        let e = single("Each opposing character gets -1 {S} this turn");
        assert_eq!(e.effect_type, EffectType::ModifyStats);
        assert_eq!(e.target, TargetType::AllOpponentCharacters);
        assert_eq!(e.param_int("modifier"), Some(-1));

        let e = single("Chosen character of yours gets +2 {S} this turn");
        assert_eq!(e.target, TargetType::TargetCharacterChosen);
        assert_eq!(e.param_int("modifier"), Some(2));

        let e = single("it gets +1 {l}");
        assert_eq!(e.target, TargetType::SelfCard);
        assert_eq!(e.param_text("stat"), Some("lore"));

        // Unknown subject
        assert!(single("each player's characters get +1 {s}").is_other());
    }

    #[test]
    fn test_keyword_grants_use_canonical_names() {
        let e = single("chosen character gains Challenger +2 this turn");
        assert_eq!(e.effect_type, EffectType::GrantKeyword);
        assert_eq!(e.param_text("keyword"), Some("Challenger"));
        assert_eq!(e.param_int("value"), Some(2));

        let e = single("this character gains evasive");
        assert_eq!(e.target, TargetType::SelfCard);
        assert_eq!(e.param_text("keyword"), Some("Evasive"));

        let e = single("chosen character loses Ward");
        assert_eq!(e.effect_type, EffectType::RemoveKeyword);
    }

    #[test]
    fn test_zone_moves() {
        let e = single("Return chosen character to their player's hand");
        assert_eq!(e.effect_type, EffectType::MoveToZone);
        assert_eq!(e.target, TargetType::TargetCharacterChosen);
        assert_eq!(e.param_text("destination"), Some("hand"));

        let e = single("return chosen item to its player’s hand");
        assert_eq!(e.target, TargetType::TargetItemChosen);

        let e = single("put chosen character into their player's inkwell");
        assert_eq!(e.target, TargetType::TargetCharacterChosen);
        assert_eq!(e.param_text("destination"), Some("inkwell"));

        let e = single("shuffle a card from any discard into its player's deck");
        assert_eq!(e.target, TargetType::TargetCardInDiscardChosen);
        assert_eq!(e.params.get_bool("shuffle"), Some(true));
    }

    #[test]
    fn test_cannot_be_challenged_is_an_attribute() {
        let e = single("this character can't be challenged this turn");
        assert_eq!(e.effect_type, EffectType::SetAttribute);
        assert_eq!(e.param_text("attribute"), Some("cannot_be_challenged"));
        assert_eq!(e.param_text("duration"), Some("turn"));
    }

    #[test]
    fn test_conditional_wraps_consequence() {
        let e = single("If you have no cards in your hand, opponents can't play actions");
        assert_eq!(e.effect_type, EffectType::Conditional);
        assert_eq!(e.param_text("connective"), Some("if"));
        assert_eq!(e.param_text("condition"), Some("you have no cards in your hand"));
        assert_eq!(e.nested.len(), 1);

        let inner = &e.nested[0];
        assert_eq!(inner.effect_type, EffectType::PreventAction);
        assert_eq!(inner.target, TargetType::OpponentPlayer);
        assert_eq!(inner.param_text("action"), Some("play"));
        assert_eq!(inner.param_text("card_type"), Some("action"));
    }

    #[test]
    fn test_unmatched_text_is_other() {
        let e = single("Sing a lullaby to the moon");
        assert!(e.is_other());
        assert_eq!(e.target, TargetType::None);
        assert_eq!(e.param_text("raw_text"), Some("Sing a lullaby to the moon"));
    }

    #[test]
    fn test_non_empty_text_always_yields_an_effect() {
        assert_eq!(classify_effects("...").len(), 1);
        assert!(classify_effects("").is_empty());
        assert!(classify_effects("   ").is_empty());
    }

    #[test]
    fn test_self_targeted_moves() {
        let e = single("return this character to your hand");
        assert_eq!(e.effect_type, EffectType::MoveToZone);
        assert_eq!(e.target, TargetType::SelfCard);
        assert_eq!(e.param_text("destination"), Some("hand"));

        let e = single("banish this character");
        assert_eq!(e.effect_type, EffectType::Banish);
        assert_eq!(e.target, TargetType::SelfCard);

        let e = single("ready this character");
        assert_eq!(e.effect_type, EffectType::ReadyCard);
        assert_eq!(e.target, TargetType::SelfCard);
    }

    #[test]
    fn test_healing_scopes() {
        let e = single("remove up to 2 damage from each of your characters");
        assert_eq!(e.effect_type, EffectType::HealDamage);
        assert_eq!(e.target, TargetType::AllOwnCharacters);
        assert_eq!(e.param_int("amount"), Some(2));

        let e = single("remove up to 3 damage from this character");
        assert_eq!(e.target, TargetType::SelfCard);
        assert_eq!(e.param_int("amount"), Some(3));
    }

    #[test]
    fn test_exert_chosen() {
        let e = single("exert chosen opposing character");
        assert_eq!(e.effect_type, EffectType::ExertCard);
        assert_eq!(e.target, TargetType::TargetCharacterChosen);
        assert_eq!(e.param_text("adjective"), Some("opposing"));
    }

    #[test]
    fn test_look_then_take_or_play() {
        let e = single("look at the top 3 cards of your deck");
        assert_eq!(e.effect_type, EffectType::LookAtTopCards);
        assert_eq!(e.target, TargetType::SelfPlayer);
        assert_eq!(e.param_int("amount"), Some(3));

        let e = single("put one of them into your hand");
        assert_eq!(e.effect_type, EffectType::MoveToZone);
        assert_eq!(e.target, TargetType::LookedAtCards);
        assert_eq!(e.param_text("destination"), Some("hand"));

        let e = single("you may play it for free");
        assert_eq!(e.effect_type, EffectType::PlayCard);
        assert_eq!(e.target, TargetType::LookedAtCards);
        assert_eq!(e.param_int("cost"), Some(0));
    }

    #[test]
    fn test_play_song_again() {
        let e = single("you may play that song again");
        assert_eq!(e.effect_type, EffectType::PlayCard);
        assert_eq!(e.target, TargetType::CardType);
        assert_eq!(e.param_text("card_type"), Some("song"));
        assert_eq!(e.param_text("from"), Some("discard"));
    }

    #[test]
    fn test_prevented_actions() {
        let e = single("this character can't quest");
        assert_eq!(e.effect_type, EffectType::PreventAction);
        assert_eq!(e.target, TargetType::SelfCard);
        assert_eq!(e.param_text("action"), Some("quest"));

        let e = single("chosen opposing character can't quest during their next turn");
        assert_eq!(e.effect_type, EffectType::PreventAction);
        assert_eq!(e.target, TargetType::TargetCharacterChosen);
        assert_eq!(e.param_text("action"), Some("quest"));
        assert_eq!(e.param_text("duration"), Some("their_next_turn"));
    }

    #[test]
    fn test_own_characters_gain_keyword() {
        let e = single("your other Princess characters gain Ward");
        assert_eq!(e.effect_type, EffectType::GrantKeyword);
        assert_eq!(e.target, TargetType::AllOwnCharacters);
        assert_eq!(e.param_text("adjective"), Some("other"));
        assert_eq!(e.param_text("classification"), Some("Princess"));
        assert_eq!(e.param_text("keyword"), Some("Ward"));
    }

    #[test]
    fn test_only_first_phrase_in_sub_clause_is_classified() {
        // No split on "and"; the trailing phrase is not a second effect
        for text in ["draw a card and gain 1 lore", "draw a card - then gain 1 lore"] {
            let effects = classify_effects(text);
            assert_eq!(effects.len(), 1, "{text}");
            assert_eq!(effects[0].effect_type, EffectType::DrawCard);
        }
    }

    #[test]
    fn test_cost_reduction() {
        let e = single("you pay 2 {i} less to play this character");
        assert_eq!(e.effect_type, EffectType::ModifyCostToPlay);
        assert_eq!(e.param_int("amount"), Some(2));
    }
}
