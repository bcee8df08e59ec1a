//! Keyword recognizer
//!
//! Matches a whole keyword entry ("Rush", "Challenger +2", "Puppy Shift 3")
//! against the canonical vocabulary. Matching is full-string and
//! case-insensitive; rules are tried in table order.

use crate::core::{Effect, EffectType, TargetType, TriggerCondition};
use crate::parser::rules::{group, RuleDef, RuleTable};
use crate::parser::text::parse_int;
use once_cell::sync::Lazy;
use smallvec::SmallVec;

/// How a keyword rule reads its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordKind {
    /// No value ("Rush")
    Fixed,
    /// Trailing number ("Challenger +2", "Shift 4")
    Valued,
    /// Classification-qualified shift ("Puppy Shift 3")
    ClassifiedShift,
}

/// One entry of the keyword vocabulary
#[derive(Debug)]
pub struct KeywordRule {
    pub id: &'static str,
    /// Canonical keyword name
    pub keyword: &'static str,
    pattern: &'static str,
    pub kind: KeywordKind,
    pub trigger: TriggerCondition,
}

impl RuleDef for KeywordRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn pattern(&self) -> &'static str {
        self.pattern
    }
}

/// The keyword vocabulary, in match order
///
/// Value-bearing keywords come first; "Universal Shift" must precede the
/// classification-qualified shift, which would otherwise swallow it.
pub static KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        id: "challenger",
        keyword: "Challenger",
        pattern: r"^challenger(?:\s+(?P<value>\S+))?$",
        kind: KeywordKind::Valued,
        trigger: TriggerCondition::KeywordChallenger,
    },
    KeywordRule {
        id: "resist",
        keyword: "Resist",
        pattern: r"^resist(?:\s+(?P<value>\S+))?$",
        kind: KeywordKind::Valued,
        trigger: TriggerCondition::KeywordResist,
    },
    KeywordRule {
        id: "shift",
        keyword: "Shift",
        pattern: r"^shift(?:\s+(?P<value>\S+))?$",
        kind: KeywordKind::Valued,
        trigger: TriggerCondition::KeywordShift,
    },
    KeywordRule {
        id: "singer",
        keyword: "Singer",
        pattern: r"^singer(?:\s+(?P<value>\S+))?$",
        kind: KeywordKind::Valued,
        trigger: TriggerCondition::KeywordSinger,
    },
    KeywordRule {
        id: "sing_together",
        keyword: "Sing Together",
        pattern: r"^sing\s+together(?:\s+(?P<value>\S+))?$",
        kind: KeywordKind::Valued,
        trigger: TriggerCondition::SingTogether,
    },
    KeywordRule {
        id: "universal_shift",
        keyword: "Universal Shift",
        pattern: r"^universal\s+shift(?:\s+(?P<value>\S+))?$",
        kind: KeywordKind::Valued,
        trigger: TriggerCondition::KeywordShift,
    },
    KeywordRule {
        id: "classification_shift",
        keyword: "Shift",
        pattern: r"^(?P<classification>[a-z]+)\s+shift(?:\s+(?P<value>\S+))?$",
        kind: KeywordKind::ClassifiedShift,
        trigger: TriggerCondition::KeywordShift,
    },
    KeywordRule {
        id: "bodyguard",
        keyword: "Bodyguard",
        pattern: r"^bodyguard$",
        kind: KeywordKind::Fixed,
        trigger: TriggerCondition::KeywordBodyguard,
    },
    KeywordRule {
        id: "evasive",
        keyword: "Evasive",
        pattern: r"^evasive$",
        kind: KeywordKind::Fixed,
        trigger: TriggerCondition::KeywordEvasive,
    },
    KeywordRule {
        id: "reckless",
        keyword: "Reckless",
        pattern: r"^reckless$",
        kind: KeywordKind::Fixed,
        trigger: TriggerCondition::KeywordReckless,
    },
    KeywordRule {
        id: "rush",
        keyword: "Rush",
        pattern: r"^rush$",
        kind: KeywordKind::Fixed,
        trigger: TriggerCondition::KeywordRush,
    },
    KeywordRule {
        id: "support",
        keyword: "Support",
        pattern: r"^support$",
        kind: KeywordKind::Fixed,
        trigger: TriggerCondition::KeywordSupport,
    },
    KeywordRule {
        id: "vanish",
        keyword: "Vanish",
        pattern: r"^vanish$",
        kind: KeywordKind::Fixed,
        trigger: TriggerCondition::KeywordVanish,
    },
    KeywordRule {
        id: "ward",
        keyword: "Ward",
        pattern: r"^ward$",
        kind: KeywordKind::Fixed,
        trigger: TriggerCondition::KeywordWard,
    },
];

static KEYWORDS: Lazy<RuleTable<KeywordRule>> =
    Lazy::new(|| RuleTable::try_new(KEYWORD_RULES).expect("built-in keyword patterns are valid"));

/// The compiled keyword table
pub fn keyword_table() -> &'static RuleTable<KeywordRule> {
    &KEYWORDS
}

/// Result of recognizing one keyword entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    /// Entry text as written
    pub text: String,
    /// Canonical name, or the raw text when unrecognized
    pub keyword: String,
    pub trigger: TriggerCondition,
    pub value: Option<i64>,
    pub classification: Option<String>,
    /// Id of the matching vocabulary rule; `None` when unrecognized
    pub rule_id: Option<&'static str>,
}

impl KeywordMatch {
    fn unrecognized(text: &str) -> Self {
        KeywordMatch {
            text: text.to_string(),
            keyword: text.to_string(),
            trigger: TriggerCondition::KeywordUnclassified,
            value: None,
            classification: None,
            rule_id: None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.rule_id.is_some()
    }

    /// The effect a keyword grants to its own card
    pub fn to_effect(&self) -> Effect {
        let mut effect = Effect::new(EffectType::GrantKeyword, TargetType::SelfCard).with_param("keyword", self.keyword.as_str());
        if let Some(value) = self.value {
            effect.params.insert("value", value);
        }
        if let Some(classification) = &self.classification {
            effect.params.insert("classification", classification.as_str());
        }
        effect
    }
}

/// Match one trimmed keyword entry against the vocabulary
pub fn match_keyword(text: &str) -> Option<KeywordMatch> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (rule, caps) = KEYWORDS.first_match(text)?;

    // A value that is present but not an integer is dropped, not fatal
    let value = match rule.kind {
        KeywordKind::Fixed => None,
        KeywordKind::Valued | KeywordKind::ClassifiedShift => group(&caps, "value").and_then(parse_int),
    };

    let (keyword, classification) = match rule.kind {
        KeywordKind::ClassifiedShift => {
            let classification = group(&caps, "classification").map(title_case).unwrap_or_default();
            (format!("{classification} {}", rule.keyword), Some(classification))
        }
        _ => (rule.keyword.to_string(), None),
    };

    Some(KeywordMatch {
        text: text.to_string(),
        keyword,
        trigger: rule.trigger,
        value,
        classification,
        rule_id: Some(rule.id),
    })
}

/// Recognize a keyword entry; unknown entries are kept with their raw text
pub fn recognize(text: &str) -> KeywordMatch {
    match_keyword(text).unwrap_or_else(|| KeywordMatch::unrecognized(text.trim()))
}

/// Recognize a clause made up only of keywords ("Evasive, Ward")
///
/// Returns `None` unless every comma-separated part is a known keyword.
pub fn recognize_all(clause: &str) -> Option<SmallVec<[KeywordMatch; 2]>> {
    let mut matches = SmallVec::new();
    for part in clause.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        matches.push(match_keyword(part)?);
    }
    if matches.is_empty() {
        None
    } else {
        Some(matches)
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
