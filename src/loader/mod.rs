//! Card loaders
//!
//! Decoding of card text records from the card database's JSON export, and
//! batch parsing of whole card lists.

pub mod card;
pub mod database;

pub use card::CardText;
pub use database::{parse_cards, CardDatabase, ParsedCard};
