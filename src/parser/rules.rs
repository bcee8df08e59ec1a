//! Ordered rule tables
//!
//! Every classifier in the parser is a declarative, ordered list of rules.
//! Each rule owns an id and a phrase pattern; the first rule whose pattern
//! matches wins, so the order of a table is part of its behavior.

use crate::{AbilityError, Result};
use regex::{Captures, Regex, RegexBuilder};

/// A rule definition that can be compiled into a [`RuleTable`]
pub trait RuleDef: 'static {
    /// Stable identifier, used in logs and ordering tests
    fn id(&self) -> &'static str;

    /// Phrase pattern, matched case-insensitively
    fn pattern(&self) -> &'static str;
}

/// A rule definition paired with its compiled pattern
pub struct CompiledRule<D: RuleDef> {
    pub def: &'static D,
    pub regex: Regex,
}

/// An immutable, ordered table of compiled rules
pub struct RuleTable<D: RuleDef> {
    rules: Vec<CompiledRule<D>>,
}

impl<D: RuleDef> RuleTable<D> {
    /// Compile every rule, in order
    pub fn try_new(defs: &'static [D]) -> Result<Self> {
        let rules = defs
            .iter()
            .map(|def| {
                RegexBuilder::new(def.pattern())
                    .case_insensitive(true)
                    .build()
                    .map(|regex| CompiledRule { def, regex })
                    .map_err(|source| AbilityError::InvalidPattern { rule: def.id(), source })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(RuleTable { rules })
    }

    /// Rule ids in match order
    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.def.id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule<D>> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule (in table order) whose pattern matches anywhere in `text`
    pub fn first_match<'t>(&self, text: &'t str) -> Option<(&'static D, Captures<'t>)> {
        self.rules
            .iter()
            .find_map(|rule| rule.regex.captures(text).map(|caps| (rule.def, caps)))
    }
}

/// Text of a named capture group, if it participated in the match
pub fn group<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    caps.name(name).map(|m| m.as_str()).filter(|s| !s.is_empty())
}
