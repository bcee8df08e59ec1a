//! Trigger pattern registry
//!
//! Given one clause of rules text, decides when the ability applies and
//! splits off the effect text (and, for activated abilities, the cost
//! fragment). Rules are tried in order and the first match wins; the last
//! rule matches anything, so every clause gets a trigger.

use crate::core::{Params, TriggerCondition};
use crate::parser::rules::{group, RuleDef, RuleTable};
use once_cell::sync::Lazy;

/// How a matched rule divides the clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleShape {
    /// Leading phrase is the trigger, the `effect` group is the effect text
    Tail,
    /// `cost` group is a cost fragment, `effect` group is the effect text
    Activated,
    /// The whole clause is the effect text
    WholeClause,
}

#[derive(Debug)]
pub struct TriggerRule {
    pub id: &'static str,
    pattern: &'static str,
    pub trigger: TriggerCondition,
    pub shape: RuleShape,
    /// Parameters merged into the first effect of the ability
    pub defaults: &'static [(&'static str, &'static str)],
    /// Capture groups copied into the defaults as text parameters
    pub captured: &'static [&'static str],
}

impl RuleDef for TriggerRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn pattern(&self) -> &'static str {
        self.pattern
    }
}

/// Id of the activated-ability rule, which the cost policy may skip
pub const ACTIVATED_RULE_ID: &str = "activated";

/// Trigger rules, most specific first; `continuous` must stay last
pub static TRIGGER_RULES: &[TriggerRule] = &[
    TriggerRule {
        id: ACTIVATED_RULE_ID,
        pattern: r"(?s)^(?P<cost>[^.!?\-–—]+?)\s*[-–—]\s+(?P<effect>.+)$",
        trigger: TriggerCondition::Activated,
        shape: RuleShape::Activated,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "on_play",
        pattern: r"(?s)^when you play this (?:character|item|location)\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::OnPlay,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "on_quest",
        pattern: r"(?s)^whenever this character quests\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::OnQuest,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "on_challenge",
        pattern: r"(?s)^whenever this character challenges another character\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::OnChallenge,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "on_being_challenged",
        pattern: r"(?s)^whenever this character is challenged\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::OnBeingChallenged,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "on_banish",
        pattern: r"(?s)^when(?:ever)? this character is banished(?: in a challenge)?\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::OnBanish,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "on_other_banished",
        pattern: r"(?s)^whenever one of your other characters is banished\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::OnCharacterLeavesPlay,
        shape: RuleShape::Tail,
        defaults: &[("filter", "own_other_banished")],
        captured: &[],
    },
    TriggerRule {
        id: "start_of_turn",
        pattern: r"(?s)^at the start of your turn\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::StartOfTurn,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "end_of_turn",
        pattern: r"(?s)^at the end of your turn\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::EndOfTurn,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "vanish",
        pattern: r"(?s)^when this character is chosen by an opponent as part of resolving an action['’]s effect\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::KeywordVanish,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "on_sing",
        pattern: r"(?s)^when(?:ever)? this character sings a song\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::OnSing,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "on_exert",
        pattern: r"(?s)^whenever this character (?:exerts|is exerted)\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::OnExert,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "opponent_plays_song",
        pattern: r"(?s)^whenever an opponent plays a song\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::OnOpponentPlaysSong,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "opponent_plays_card",
        pattern: r"(?s)^whenever an opponent plays an? (?P<card_type>character|item|location|action)\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::OnOpponentPlaysCard,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &["card_type"],
    },
    TriggerRule {
        id: "character_enters_play",
        pattern: r"(?s)^whenever you play (?:a|another) character\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::OnCharacterEntersPlay,
        shape: RuleShape::Tail,
        defaults: &[("filter", "own_character_played")],
        captured: &[],
    },
    TriggerRule {
        id: "during_your_turn",
        pattern: r"(?s)^during your turn\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::OnYourTurn,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "while_at_location",
        pattern: r"(?s)^while this character is at a location\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::WhileAtLocation,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "moves_here",
        pattern: r"(?s)^whenever a character moves here\s*,?\s*(?P<effect>.*)$",
        trigger: TriggerCondition::OnMoveToLocation,
        shape: RuleShape::Tail,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "cost_modifier",
        pattern: r"(?s)^for each\b.*\byou pay\b.*\bless\b",
        trigger: TriggerCondition::StaticCostModifier,
        shape: RuleShape::WholeClause,
        defaults: &[],
        captured: &[],
    },
    TriggerRule {
        id: "continuous",
        pattern: r"^",
        trigger: TriggerCondition::Continuous,
        shape: RuleShape::WholeClause,
        defaults: &[],
        captured: &[],
    },
];

static TRIGGERS: Lazy<RuleTable<TriggerRule>> =
    Lazy::new(|| RuleTable::try_new(TRIGGER_RULES).expect("built-in trigger patterns are valid"));

/// The compiled trigger table
pub fn trigger_table() -> &'static RuleTable<TriggerRule> {
    &TRIGGERS
}

/// Outcome of running a clause through the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerMatch<'t> {
    pub rule_id: &'static str,
    pub trigger: TriggerCondition,
    pub effect_text: &'t str,
    /// Cost fragment to hand to the cost extractor (activated rule only)
    pub cost_text: Option<&'t str>,
    pub defaults: Params,
}

impl TriggerMatch<'_> {
    pub fn needs_cost(&self) -> bool {
        self.cost_text.is_some()
    }
}

/// Classify a clause; always returns a trigger
pub fn match_trigger(clause: &str) -> TriggerMatch<'_> {
    match_trigger_with(clause, true)
}

/// Classify a clause, optionally skipping the activated-ability rule
///
/// Skipping is how a clause whose cost fragment turned out to hold no cost
/// gets reclassified by the remaining rules.
pub fn match_trigger_with(clause: &str, allow_activated: bool) -> TriggerMatch<'_> {
    let clause = clause.trim();

    let found = TRIGGERS
        .iter()
        .filter(|rule| allow_activated || rule.def.id != ACTIVATED_RULE_ID)
        .find_map(|rule| rule.regex.captures(clause).map(|caps| (rule.def, caps)));

    let Some((rule, caps)) = found else {
        // Unreachable with the built-in table: `continuous` matches everything
        return TriggerMatch {
            rule_id: "continuous",
            trigger: TriggerCondition::Continuous,
            effect_text: clause,
            cost_text: None,
            defaults: Params::new(),
        };
    };

    #[cfg(feature = "verbose-logging")]
    tracing::trace!(rule = rule.id, trigger = %rule.trigger, clause, "trigger rule matched");

    let mut defaults: Params = rule.defaults.iter().map(|(k, v)| (*k, *v)).collect();
    for name in rule.captured {
        if let Some(text) = group(&caps, name) {
            defaults.insert(*name, text.to_lowercase());
        }
    }

    let (effect_text, cost_text) = match rule.shape {
        RuleShape::Tail => (group(&caps, "effect").unwrap_or("").trim(), None),
        RuleShape::Activated => (
            group(&caps, "effect").unwrap_or("").trim(),
            Some(group(&caps, "cost").unwrap_or("").trim()),
        ),
        RuleShape::WholeClause => (clause, None),
    };

    TriggerMatch {
        rule_id: rule.id,
        trigger: rule.trigger,
        effect_text,
        cost_text,
        defaults,
    }
}
