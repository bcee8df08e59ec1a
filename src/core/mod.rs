//! Core ability types

pub mod ability;
pub mod costs;
pub mod effects;
pub mod types;

pub use ability::Ability;
pub use costs::AbilityCost;
pub use effects::Effect;
pub use types::{EffectType, ParamValue, Params, TargetType, TriggerCondition};
