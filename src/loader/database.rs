//! Parsed card database
//!
//! Parses a whole card list in parallel and provides lookup of the result
//! by card name.

use crate::core::Ability;
use crate::loader::card::CardText;
use crate::parser::AbilityParser;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::info;

/// A card together with its parsed abilities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    pub abilities: Vec<Ability>,
}

impl ParsedCard {
    /// True when the card has text but nothing in it was recognized
    pub fn is_unclassified(&self) -> bool {
        !self.abilities.is_empty() && self.abilities.iter().all(Ability::is_unclassified)
    }
}

/// Parse every card, in parallel, keeping input order
pub fn parse_cards(cards: &[CardText], parser: &AbilityParser) -> Vec<ParsedCard> {
    cards
        .par_iter()
        .map(|card| ParsedCard {
            name: card.name.clone(),
            unique_id: card.unique_id.clone(),
            abilities: card.parse_with(parser),
        })
        .collect()
}

/// Parsed cards, looked up by name
pub struct CardDatabase {
    cards: Vec<ParsedCard>,
    by_name: FxHashMap<String, usize>,
}

impl CardDatabase {
    /// Create an empty database
    pub fn new() -> Self {
        CardDatabase {
            cards: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    /// Parse a card list into a database
    pub fn from_cards(cards: &[CardText], parser: &AbilityParser) -> Self {
        let mut db = CardDatabase::new();
        for card in parse_cards(cards, parser) {
            db.add_card(card);
        }

        let abilities: usize = db.cards.iter().map(|c| c.abilities.len()).sum();
        info!(
            cards = db.len(),
            abilities,
            unclassified = db.unclassified().count(),
            "parsed card database"
        );
        db
    }

    /// Add one parsed card; a later card with the same name replaces the lookup entry
    pub fn add_card(&mut self, card: ParsedCard) {
        if let Some(name) = &card.name {
            self.by_name.insert(name.to_lowercase(), self.cards.len());
        }
        self.cards.push(card);
    }

    /// Look up a card by name (case-insensitive)
    pub fn get_card(&self, name: &str) -> Option<&ParsedCard> {
        self.by_name.get(&name.to_lowercase()).map(|&i| &self.cards[i])
    }

    /// Check if a card exists in the database
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Cards whose text produced only unclassified abilities
    pub fn unclassified(&self) -> impl Iterator<Item = &ParsedCard> {
        self.cards.iter().filter(|c| c.is_unclassified())
    }

    pub fn cards(&self) -> &[ParsedCard] {
        &self.cards
    }

    /// Total number of cards in database
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if database is empty
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for CardDatabase {
    fn default() -> Self {
        Self::new()
    }
}
