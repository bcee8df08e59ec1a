//! Ability text parser
//!
//! Pipeline per card: keyword recognizer for the keyword list, then for each
//! body clause the trigger registry, the cost extractor and the effect
//! classifier, combined by the assembler.

pub mod assembler;
pub mod config;
pub mod effects;
pub mod keywords;
pub mod rules;
pub mod text;
pub mod triggers;

pub use assembler::{parse_abilities, AbilityParser};
pub use config::{ActivatedCostPolicy, ParserConfig};
pub use effects::classify_effects;
pub use keywords::{recognize, KeywordMatch};
pub use triggers::{match_trigger, TriggerMatch};
