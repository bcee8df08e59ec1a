//! Cost system for activated abilities
//!
//! Represents what a player pays to activate an ability: exerting the
//! card, paying ink, discarding, damaging or banishing.

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{digit1, multispace0, multispace1},
    combinator::{map, map_res, opt, value},
    sequence::{preceded, terminated, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The cost required to activate an ability
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityCost {
    /// Ink to pay ({i})
    pub ink_cost: u32,
    /// Exert this card ({e})
    pub exert_self: bool,
    /// Discard a card from hand
    pub discard_card: bool,
    /// Deal damage to this character
    pub damage_self: bool,
    /// Banish a character (usually this one)
    pub banish_self: bool,
}

/// One recognized piece of a cost fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CostComponent {
    Exert,
    Ink(u32),
    Discard,
    DamageSelf,
    Banish,
}

impl AbilityCost {
    /// Create a free cost
    pub fn new() -> Self {
        AbilityCost::default()
    }

    /// Parse the cost fragment of an activated ability (e.g. "{e}, 2{i}")
    ///
    /// Components are recognized independently, in any order and
    /// combination; unrecognized words between them are skipped. Returns
    /// `None` when nothing recognizable was found.
    pub fn parse(fragment: &str) -> Option<Self> {
        let components = scan_components(fragment.trim());
        if components.is_empty() {
            return None;
        }

        let mut cost = AbilityCost::new();
        for component in components {
            match component {
                CostComponent::Exert => cost.exert_self = true,
                CostComponent::Ink(amount) => cost.ink_cost = cost.ink_cost.saturating_add(amount),
                CostComponent::Discard => cost.discard_card = true,
                CostComponent::DamageSelf => cost.damage_self = true,
                CostComponent::Banish => cost.banish_self = true,
            }
        }
        Some(cost)
    }

    /// Check if activating requires no payment at all
    pub fn is_free(&self) -> bool {
        self.ink_cost == 0 && !self.exert_self && !self.discard_card && !self.damage_self && !self.banish_self
    }

    /// Check if this cost includes exerting the card
    pub fn includes_exert(&self) -> bool {
        self.exert_self
    }

    /// Check if this cost includes ink payment
    pub fn includes_ink(&self) -> bool {
        self.ink_cost > 0
    }
}

impl fmt::Display for AbilityCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.exert_self {
            parts.push("{e}".to_string());
        }
        if self.ink_cost > 0 {
            parts.push(format!("{}{{i}}", self.ink_cost));
        }
        if self.discard_card {
            parts.push("discard a card".to_string());
        }
        if self.damage_self {
            parts.push("damage this character".to_string());
        }
        if self.banish_self {
            parts.push("banish a character".to_string());
        }

        if parts.is_empty() {
            f.write_str("Free")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

/// Walk the fragment left to right, collecting every cost component
fn scan_components(fragment: &str) -> Vec<CostComponent> {
    let mut found = Vec::new();
    let mut rest = fragment;

    while !rest.is_empty() {
        if let Ok((remaining, component)) = cost_component(rest) {
            found.push(component);
            rest = remaining;
            continue;
        }

        // Skip the current word (or one punctuation character)
        let mut chars = rest.char_indices();
        let skip = match chars.next() {
            Some((_, c)) if c.is_alphanumeric() => rest
                .char_indices()
                .find(|(_, c)| !c.is_alphanumeric())
                .map(|(i, _)| i)
                .unwrap_or(rest.len()),
            Some((_, c)) => c.len_utf8(),
            None => break,
        };
        rest = &rest[skip..];
    }

    found
}

fn cost_component(input: &str) -> IResult<&str, CostComponent> {
    alt((exert, ink, discard, damage_self, banish))(input)
}

fn exert(input: &str) -> IResult<&str, CostComponent> {
    value(CostComponent::Exert, tag_no_case("{e}"))(input)
}

/// "2{i}" or "2 {i}"; an amount that does not fit a u32 is not a cost
fn ink(input: &str) -> IResult<&str, CostComponent> {
    map(
        map_res(
            terminated(digit1, preceded(multispace0, tag_no_case("{i}"))),
            |digits: &str| digits.parse::<u32>(),
        ),
        CostComponent::Ink,
    )(input)
}

fn discard(input: &str) -> IResult<&str, CostComponent> {
    value(
        CostComponent::Discard,
        preceded(opt(tag_no_case("choose and ")), tag_no_case("discard a card")),
    )(input)
}

fn damage_self(input: &str) -> IResult<&str, CostComponent> {
    value(
        CostComponent::DamageSelf,
        alt((
            map(
                tuple((
                    tag_no_case("deal"),
                    multispace1,
                    digit1,
                    multispace1,
                    tag_no_case("damage to this character"),
                )),
                |_| (),
            ),
            map(tag_no_case("damage this character"), |_| ()),
            map(tag_no_case("take damage"), |_| ()),
        )),
    )(input)
}

fn banish(input: &str) -> IResult<&str, CostComponent> {
    value(
        CostComponent::Banish,
        alt((
            tag_no_case("banish this character"),
            tag_no_case("banish a character"),
            tag_no_case("banish one of your characters"),
        )),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exert_cost() {
        let cost = AbilityCost::parse("{e}").unwrap();
        assert!(cost.includes_exert());
        assert!(!cost.includes_ink());
        assert_eq!(cost.to_string(), "{e}");
    }

    #[test]
    fn test_parse_exert_and_ink() {
        let cost = AbilityCost::parse("{e}, 2{i}").unwrap();
        assert_eq!(cost.ink_cost, 2);
        assert!(cost.exert_self);
        assert_eq!(cost.to_string(), "{e}, 2{i}");
    }

    #[test]
    fn test_parse_ink_with_space_and_uppercase_markers() {
        let cost = AbilityCost::parse("3 {I}, {E}").unwrap();
        assert_eq!(cost.ink_cost, 3);
        assert!(cost.exert_self);
    }

    #[test]
    fn test_parse_phrase_costs() {
        let cost = AbilityCost::parse("Choose and discard a card").unwrap();
        assert!(cost.discard_card);
        assert!(!cost.exert_self);

        let cost = AbilityCost::parse("Banish this character").unwrap();
        assert!(cost.banish_self);

        let cost = AbilityCost::parse("{e}, Deal 1 damage to this character").unwrap();
        assert!(cost.exert_self);
        assert!(cost.damage_self);
    }

    #[test]
    fn test_components_in_any_order() {
        let cost = AbilityCost::parse("1{i}, discard a card, {e}").unwrap();
        assert_eq!(cost.ink_cost, 1);
        assert!(cost.discard_card);
        assert!(cost.exert_self);
    }

    #[test]
    fn test_no_cost_recognized() {
        assert_eq!(AbilityCost::parse("HEROIC PRESENCE"), None);
        assert_eq!(AbilityCost::parse(""), None);
        // Overflowing ink amount is ignored rather than wrapped
        assert_eq!(AbilityCost::parse("99999999999{i}"), None);
    }

    #[test]
    fn test_is_free() {
        assert!(AbilityCost::new().is_free());
        assert_eq!(AbilityCost::new().to_string(), "Free");
        assert!(!AbilityCost::parse("{e}").unwrap().is_free());
    }
}
