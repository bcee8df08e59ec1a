//! Fixture-driven regression tests
//!
//! Each `.json` file under `tests/fixtures/` holds one card and the expected
//! shape of its parsed abilities (trigger, effect categories, cost). The
//! `dir-test` macro generates one test per file, so adding a fixture is all
//! it takes to cover a new card.

use dir_test::{dir_test, Fixture};
use lorcana_abilities::loader::CardText;
use lorcana_abilities::{Ability, AbilityParser, EffectType, TriggerCondition};
use serde::Deserialize;
use similar_asserts::assert_eq;

#[derive(Debug, Deserialize)]
struct CardFixture {
    card: CardText,
    expected: Vec<ExpectedAbility>,
}

/// The parts of an ability a fixture pins down
#[derive(Debug, PartialEq, Deserialize)]
struct ExpectedAbility {
    trigger: TriggerCondition,
    effects: Vec<EffectType>,
    #[serde(default)]
    cost: Option<String>,
}

impl From<&Ability> for ExpectedAbility {
    fn from(ability: &Ability) -> Self {
        ExpectedAbility {
            trigger: ability.trigger,
            effects: ability.effects.iter().map(|e| e.effect_type).collect(),
            cost: ability.cost.as_ref().map(ToString::to_string),
        }
    }
}

#[dir_test(
    dir: "$CARGO_MANIFEST_DIR/tests/fixtures",
    glob: "**/*.json",
)]
fn test_card_fixture(fixture: Fixture<&str>) {
    let parsed: CardFixture = serde_json::from_str(fixture.content())
        .unwrap_or_else(|e| panic!("Fixture {} is not valid: {e}", fixture.path()));

    let abilities = parsed.card.parse_with(&AbilityParser::default());
    let actual: Vec<ExpectedAbility> = abilities.iter().map(ExpectedAbility::from).collect();

    assert_eq!(actual, parsed.expected, "Fixture {} parsed differently", fixture.path());
}
