//! Card text record
//!
//! The two ability-bearing text fields of a card, as they appear in the
//! card database's JSON export.

use crate::core::Ability;
use crate::parser::AbilityParser;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Ability-bearing text of one card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardText {
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Unique_ID", default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    /// Comma-separated keyword list ("Evasive, Ward")
    #[serde(rename = "Abilities", default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<String>,
    /// Narrative rules text
    #[serde(rename = "Body_Text", default, skip_serializing_if = "Option::is_none")]
    pub body_text: Option<String>,
}

impl CardText {
    pub fn new(abilities: Option<&str>, body_text: Option<&str>) -> Self {
        CardText {
            abilities: abilities.map(str::to_string),
            body_text: body_text.map(str::to_string),
            ..CardText::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Decode one card object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode an array of card objects
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Display name, falling back to the id
    pub fn label(&self) -> &str {
        self.name.as_deref().or(self.unique_id.as_deref()).unwrap_or("<unnamed>")
    }

    pub fn parse_with(&self, parser: &AbilityParser) -> Vec<Ability> {
        parser.parse(self.abilities.as_deref(), self.body_text.as_deref())
    }
}
