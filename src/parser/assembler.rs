//! Ability assembler
//!
//! Per-card orchestration: keyword-list entries first, then the narrative
//! body clause by clause, each clause passing through the trigger registry,
//! the cost extractor and the effect classifier.

use crate::core::{Ability, AbilityCost, Effect, TriggerCondition};
use crate::parser::config::{ActivatedCostPolicy, ParserConfig};
use crate::parser::effects::classify_effects;
use crate::parser::keywords::{recognize, recognize_all, KeywordMatch};
use crate::parser::text::{normalize_for_compare, split_clauses, strip_reminder_text};
use crate::parser::triggers::{match_trigger, match_trigger_with, TriggerMatch};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::borrow::Cow;
use tracing::debug;

/// Parses the ability text of one card at a time
///
/// Holds only configuration, so one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct AbilityParser {
    config: ParserConfig,
}

impl AbilityParser {
    pub fn new(config: ParserConfig) -> Self {
        AbilityParser { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a card's keyword list and rules-text body into abilities
    ///
    /// Keyword-list abilities come first, then body abilities in source
    /// order. Never fails: text that cannot be classified is kept as an
    /// `Other` effect.
    pub fn parse(&self, keywords: Option<&str>, body: Option<&str>) -> Vec<Ability> {
        let mut abilities = Vec::new();
        let mut processed = FxHashSet::default();

        let keywords = keywords.map(|text| self.without_reminders(text));
        if let Some(keywords) = keywords.as_deref() {
            self.parse_keyword_list(keywords, &mut processed, &mut abilities);
        }

        let Some(body) = body.map(|text| self.without_reminders(text)) else {
            return abilities;
        };

        let fold = self.config.fold_accents;
        if normalize_for_compare(&body, fold) == normalize_for_compare(keywords.as_deref().unwrap_or(""), fold) {
            // The body only restates the keyword list
            return abilities;
        }

        for clause in split_clauses(&body) {
            if !processed.insert(self.clause_key(clause)) {
                continue;
            }

            let Some(keywords) = recognize_all(clause) else {
                abilities.push(self.parse_clause(clause));
                continue;
            };

            // Each keyword on the line counts as its own processed entry
            let fresh: SmallVec<[KeywordMatch; 2]> = keywords
                .into_iter()
                .filter(|k| processed.insert(self.clause_key(&k.text)))
                .collect();
            if fresh.is_empty() {
                continue;
            }
            abilities.push(keyword_line_ability(&fresh));
        }

        abilities
    }

    fn without_reminders<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.config.strip_reminder_text {
            Cow::Owned(strip_reminder_text(text))
        } else {
            Cow::Borrowed(text)
        }
    }

    fn clause_key(&self, clause: &str) -> String {
        let key = normalize_for_compare(clause, self.config.fold_accents);
        if key.is_empty() {
            clause.to_string()
        } else {
            key
        }
    }

    fn parse_keyword_list(&self, keywords: &str, processed: &mut FxHashSet<String>, abilities: &mut Vec<Ability>) {
        for entry in keywords.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            if !processed.insert(self.clause_key(entry)) {
                continue;
            }
            let keyword = recognize(entry);
            if !keyword.is_recognized() {
                debug!(entry, "unrecognized keyword");
            }
            abilities.push(Ability::new(keyword.trigger, vec![keyword.to_effect()], entry));
        }
    }

    /// Build the ability for a body clause that is not a keyword line
    fn parse_clause(&self, clause: &str) -> Ability {
        let (found, cost) = self.resolve_trigger(clause);
        if found.trigger == TriggerCondition::Continuous {
            debug!(clause, "clause fell through to the continuous rule");
        }

        let mut effects = classify_effects(found.effect_text);
        if effects.is_empty() {
            // A trigger phrase with nothing after it
            debug!(clause, trigger = %found.trigger, "no effect text after the trigger");
            effects.push(Effect::other(clause));
        }
        if let Some(first) = effects.first_mut() {
            // Trigger defaults only fill parameters the effect did not set
            first.params.merge_missing(&found.defaults);
        }

        let ability = Ability::new(found.trigger, effects, clause);
        match cost {
            Some(cost) => ability.with_cost(cost),
            None => ability,
        }
    }

    /// Run the trigger registry and, for activated shapes, the cost extractor
    fn resolve_trigger<'t>(&self, clause: &'t str) -> (TriggerMatch<'t>, Option<AbilityCost>) {
        let found = match_trigger(clause);
        let Some(cost_text) = found.cost_text else {
            return (found, None);
        };

        if let Some(cost) = AbilityCost::parse(cost_text) {
            return (found, Some(cost));
        }

        match self.config.activated_cost_policy {
            ActivatedCostPolicy::Reclassify => {
                debug!(clause, cost_text, "no cost before the dash, reclassifying");
                (match_trigger_with(clause, false), None)
            }
            ActivatedCostPolicy::KeepFree => {
                debug!(clause, cost_text, "no cost before the dash, keeping as a free activated ability");
                (found, Some(AbilityCost::new()))
            }
        }
    }
}

/// One ability for a body line that only lists keywords
fn keyword_line_ability(keywords: &[KeywordMatch]) -> Ability {
    let trigger = match keywords {
        [single] => single.trigger,
        _ => TriggerCondition::MultipleKeywords,
    };
    let effects = keywords.iter().map(KeywordMatch::to_effect).collect();
    let source = keywords.iter().map(|k| k.text.as_str()).collect::<Vec<_>>().join(", ");
    Ability::new(trigger, effects, source)
}

/// Parse one card with the default configuration
pub fn parse_abilities(keywords: Option<&str>, body: Option<&str>) -> Vec<Ability> {
    AbilityParser::default().parse(keywords, body)
}
