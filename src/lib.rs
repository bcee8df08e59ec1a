//! Lorcana ability text parser
//!
//! Turns the two free-text fields of a card (the comma-separated keyword
//! list and the narrative rules text) into ordered, typed ability records
//! that a rules engine can execute.

pub mod core;
pub mod error;
pub mod loader;
pub mod parser;

pub use crate::core::{Ability, AbilityCost, Effect, EffectType, ParamValue, Params, TargetType, TriggerCondition};
pub use error::{AbilityError, Result};
pub use parser::{parse_abilities, AbilityParser, ActivatedCostPolicy, ParserConfig};
