pub mod action;
pub mod action_set;
pub mod bank;
pub mod card_table;
pub mod catalog;
pub mod config;
pub mod events;
pub mod funds;
pub mod game;
pub mod noble;
pub mod piece;
pub mod player;
pub mod production_card;

#[cfg(feature = "original-game")]
pub mod original_game;
