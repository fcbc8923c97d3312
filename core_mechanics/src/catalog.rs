use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::noble::{Noble, NobleId};
use super::piece::Piece;
use super::production_card::{Card, CardId, ProductionTier};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("card {0} is listed twice")]
    DuplicateCardId(CardId),
    #[error("cards {first} and {second} share the key {key}")]
    DuplicateCardKey {
        key: String,
        first: CardId,
        second: CardId,
    },
    #[error("card {0} costs golden pieces")]
    WildcardInCost(CardId),
    #[error("card {0} costs nothing")]
    EmptyCost(CardId),
    #[error("card {0} produces golden pieces")]
    WildcardBonus(CardId),
    #[error("{0} requires golden bonuses")]
    WildcardInNoble(NobleId),
    #[error("there are no level {0} cards")]
    MissingTier(u8),
    #[error("{needed} nobles are needed but only {available} exist")]
    NotEnoughNobles { needed: usize, available: usize },
}

/// The validated set of cards and nobles a game is dealt from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    cards: Vec<Card>,
    nobles: Vec<Noble>,
}

impl Catalog {
    /// Checks every card and noble, and that no two cards share a key.
    pub fn new(cards: Vec<Card>, nobles: Vec<Noble>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        let mut keys: HashMap<String, CardId> = HashMap::new();

        for card in &cards {
            if !ids.insert(card.uid) {
                return Err(CatalogError::DuplicateCardId(card.uid));
            }
            if card.data.cost.get(Piece::Golden) > 0 {
                return Err(CatalogError::WildcardInCost(card.uid));
            }
            if card.data.cost.is_empty() {
                return Err(CatalogError::EmptyCost(card.uid));
            }
            if card.data.produces.is_wildcard() {
                return Err(CatalogError::WildcardBonus(card.uid));
            }
            if let Some(first) = keys.insert(card.data.key(), card.uid) {
                return Err(CatalogError::DuplicateCardKey {
                    key: card.data.key(),
                    first,
                    second: card.uid,
                });
            }
        }

        for tier in ProductionTier::ALL {
            if !cards.iter().any(|card| card.data.tier == tier) {
                return Err(CatalogError::MissingTier(tier.level()));
            }
        }

        if let Some(noble) = nobles
            .iter()
            .find(|noble| noble.cost.get(Piece::Golden) > 0)
        {
            return Err(CatalogError::WildcardInNoble(noble.id));
        }

        Ok(Self { cards, nobles })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn nobles(&self) -> &[Noble] {
        &self.nobles
    }

    /// The cards of one tier, in catalog order.
    pub fn deck(&self, tier: ProductionTier) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|card| card.data.tier == tier)
            .cloned()
            .collect()
    }
}
