use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::funds::Funds;
use super::piece::Piece;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductionTier {
    One,
    Two,
    Three,
}

impl ProductionTier {
    pub const ALL: [ProductionTier; 3] =
        [ProductionTier::One, ProductionTier::Two, ProductionTier::Three];

    pub fn level(&self) -> u8 {
        match self {
            ProductionTier::One => 1,
            ProductionTier::Two => 2,
            ProductionTier::Three => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCard {
    pub tier: ProductionTier,
    pub cost: Funds,
    pub produces: Piece,
    pub victory_points: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId {
    id: u8,
}

impl CardId {
    pub fn new(id: u8) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u8 {
        self.id
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifiable<T, IdType = u8> {
    pub uid: IdType,
    pub data: T,
}

/// A card as it moves between decks, tables and players. Identity is the `uid`.
pub type Card = Identifiable<ProductionCard, CardId>;

impl Identifiable<ProductionCard, CardId> {
    pub fn new(card: ProductionCard, uid: CardId) -> Self {
        Self { uid, data: card }
    }
}

impl PartialOrd for Identifiable<ProductionCard, CardId> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifiable<ProductionCard, CardId> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.data
            .cmp(&other.data)
            .then_with(|| self.uid.cmp(&other.uid))
    }
}

impl ProductionCard {
    pub fn new(
        tier: ProductionTier,
        cost: Funds,
        produces: Piece,
        victory_points: u8,
    ) -> Self {
        Self {
            tier,
            cost,
            produces,
            victory_points,
        }
    }

    /// Deterministic encoding of the cost, e.g. `r0g1b2k1w1`.
    ///
    /// The published catalog has no two cards with the same cost, but nothing
    /// else guarantees it; identity goes through [`CardId`].
    pub fn key(&self) -> String {
        Piece::STANDARD
            .iter()
            .map(|piece| format!("{}{}", piece.code(), self.cost.get(*piece)))
            .collect()
    }
}

impl PartialOrd for ProductionCard {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Level first, then points, bonus color and cost. Only used to keep decks
/// and tables in a reproducible order.
impl Ord for ProductionCard {
    fn cmp(&self, other: &Self) -> Ordering {
        let cost = |card: &ProductionCard| -> Vec<u8> { card.cost.iter().map(|(_, a)| a).collect() };
        self.tier
            .cmp(&other.tier)
            .then_with(|| self.victory_points.cmp(&other.victory_points))
            .then_with(|| self.produces.cmp(&other.produces))
            .then_with(|| cost(self).cmp(&cost(other)))
    }
}

impl fmt::Display for ProductionCard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "L{} {} +{}pts [{}]",
            self.tier.level(),
            self.produces,
            self.victory_points,
            self.key()
        )
    }
}
