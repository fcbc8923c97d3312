use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::funds::{Funds, FundsError};
use super::noble::Noble;
use super::piece::Piece;
use super::production_card::{Card, CardId, ProductionCard};

pub const MAX_PIECES_PER_PLAYER: u16 = 10;
pub const MAX_RESERVED_CARDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId {
    id: u8,
}

impl PlayerId {
    pub fn new(id: u8) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u8 {
        self.id
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "player {}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("player does not hold the pieces: {0}")]
    PlayerInsufficientTokens(FundsError),
    #[error("player holds {held} pieces and cannot take {adding} more")]
    PlayerTokenCapExceeded { held: u16, adding: u16 },
    #[error("player already has 3 reserved cards")]
    ReserveCapacityExceeded,
    #[error("bonus count cannot grow: {0}")]
    BonusOverflow(FundsError),
    #[error("victory points cannot grow past {}", u8::MAX)]
    VictoryPointsOverflow,
}

/// Everything one participant owns.
///
/// `bonuses` and `victory_points` are kept in step with the owned cards and
/// nobles as they are added; nothing is ever taken back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub(crate) funds: Funds,
    pub(crate) production_cards: Vec<Card>,
    pub(crate) reserved_cards: Vec<Card>,
    pub(crate) bonuses: Funds,
    pub(crate) nobles: Vec<Noble>,
    pub(crate) victory_points: u8,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            funds: Funds::empty(),
            production_cards: vec![],
            reserved_cards: vec![],
            bonuses: Funds::empty(),
            nobles: vec![],
            victory_points: 0,
        }
    }

    /// Pieces the player is holding.
    pub fn funds(&self) -> &Funds {
        &self.funds
    }

    pub fn production_cards(&self) -> &[Card] {
        &self.production_cards
    }

    pub fn reserved_cards(&self) -> &[Card] {
        &self.reserved_cards
    }

    /// One per owned card, counted on the card's color. Never golden.
    pub fn bonuses(&self) -> &Funds {
        &self.bonuses
    }

    pub fn nobles(&self) -> &[Noble] {
        &self.nobles
    }

    pub fn victory_points(&self) -> u8 {
        self.victory_points
    }

    pub fn can_add_token(&self, amounts: &Funds) -> bool {
        self.funds.total() + amounts.total() <= MAX_PIECES_PER_PLAYER
    }

    pub fn add_token(&mut self, amounts: &Funds) -> Result<(), PlayerError> {
        if !self.can_add_token(amounts) {
            return Err(PlayerError::PlayerTokenCapExceeded {
                held: self.funds.total(),
                adding: amounts.total(),
            });
        }
        self.funds
            .add(amounts)
            .map_err(PlayerError::PlayerInsufficientTokens)
    }

    pub fn remove_token(&mut self, amounts: &Funds) -> Result<(), PlayerError> {
        self.funds
            .remove(amounts)
            .map_err(PlayerError::PlayerInsufficientTokens)
    }

    pub fn can_reserve_card(&self) -> bool {
        self.reserved_cards.len() < MAX_RESERVED_CARDS
    }

    pub fn add_to_reserved_cards(&mut self, card: Card) -> Result<(), PlayerError> {
        if !self.can_reserve_card() {
            return Err(PlayerError::ReserveCapacityExceeded);
        }
        self.reserved_cards.push(card);
        Ok(())
    }

    pub fn has_reserved(&self, card_id: &CardId) -> bool {
        self.reserved_cards.iter().any(|card| &card.uid == card_id)
    }

    pub fn get_reserved_card(&self, card_id: &CardId) -> Option<&Card> {
        self.reserved_cards.iter().find(|card| &card.uid == card_id)
    }

    /// Golden pieces the player has to commit, per color, to buy `card`.
    ///
    /// Colors are settled in cost order. A color covered by bonuses plus held
    /// pieces needs nothing; otherwise the shortfall is taken from the golden
    /// pieces not yet committed to an earlier color. `None` when some color
    /// cannot be covered.
    pub fn plan_golden_collateral(&self, card: &ProductionCard) -> Option<Funds> {
        let goldens = u16::from(self.funds.get(Piece::Golden));
        let mut committed: u16 = 0;
        let mut collateral = Funds::empty();

        for (piece, cost) in card.cost.non_zero() {
            if piece.is_wildcard() {
                return None;
            }
            let cost = u16::from(cost);
            let buying_power =
                u16::from(self.bonuses.get(piece)) + u16::from(self.funds.get(piece));
            if cost <= buying_power {
                continue;
            }
            let shortfall = cost - buying_power;
            if shortfall > goldens - committed {
                return None;
            }
            committed += shortfall;
            let shortfall = u8::try_from(shortfall).ok()?;
            collateral.add(&Funds::single(piece, shortfall)).ok()?;
        }

        Some(collateral)
    }

    pub fn can_purchase_card(&self, card: &ProductionCard) -> bool {
        self.plan_golden_collateral(card).is_some()
    }

    /// Adds a bought card. The bonus and the points count from now on.
    ///
    /// Nothing changes when a counter would overflow.
    pub fn add_to_owned_cards(&mut self, card: Card) -> Result<(), PlayerError> {
        let mut bonuses = self.bonuses.clone();
        bonuses
            .add(&Funds::single(card.data.produces, 1))
            .map_err(PlayerError::BonusOverflow)?;
        let victory_points = self.add_victory_points(card.data.victory_points)?;

        self.bonuses = bonuses;
        self.victory_points = victory_points;
        self.production_cards.push(card);
        Ok(())
    }

    fn add_victory_points(&self, points: u8) -> Result<u8, PlayerError> {
        self.victory_points
            .checked_add(points)
            .ok_or(PlayerError::VictoryPointsOverflow)
    }

    pub(crate) fn take_reserved_card(&mut self, card_id: &CardId) -> Option<Card> {
        let position = self
            .reserved_cards
            .iter()
            .position(|card| &card.uid == card_id)?;
        Some(self.reserved_cards.remove(position))
    }

    pub fn is_eligible_for_noble(&self, noble: &Noble) -> bool {
        noble
            .cost
            .non_zero()
            .all(|(piece, required)| self.bonuses.get(piece) >= required)
    }

    /// Callers check [`Player::is_eligible_for_noble`] first; this does not.
    pub fn add_noble(&mut self, noble: Noble) -> Result<(), PlayerError> {
        self.victory_points = self.add_victory_points(noble.victory_points())?;
        self.nobles.push(noble);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::noble::NobleId;
    use crate::production_card::{Identifiable, ProductionTier};

    fn get_default_cost() -> Funds {
        Funds::new(0, 1, 2, 1, 1, 0)
    }

    fn get_production_card(card_id: CardId, produces: Piece) -> Card {
        let card = ProductionCard::new(ProductionTier::One, get_default_cost(), produces, 1);
        Identifiable::new(card, card_id)
    }

    fn get_player_with_funds(funds: Funds) -> Player {
        Player {
            funds,
            ..Player::new(PlayerId::new(1))
        }
    }

    fn get_player_producing(funds: Funds, produces: &[Piece]) -> Player {
        let mut player = get_player_with_funds(funds);
        for (n, piece) in produces.iter().enumerate() {
            player
                .add_to_owned_cards(get_production_card(CardId::new(n as u8 + 10), *piece))
                .unwrap();
        }
        player
    }

    #[test]
    fn cannot_store_more_than_10_pieces() {
        let mut player = get_player_with_funds(Funds::new(2, 2, 2, 2, 0, 0));
        let collect = Funds::new(1, 1, 1, 0, 0, 0);
        assert!(!player.can_add_token(&collect));
        assert_eq!(
            player.add_token(&collect),
            Err(PlayerError::PlayerTokenCapExceeded { held: 8, adding: 3 })
        );
        assert_eq!(player.funds(), &Funds::new(2, 2, 2, 2, 0, 0));

        let collect = Funds::new(1, 1, 0, 0, 0, 0);
        assert!(player.can_add_token(&collect));
        player.add_token(&collect).unwrap();
        assert_eq!(player.funds().total(), 10);
    }

    #[test]
    fn cannot_remove_pieces_the_player_does_not_hold() {
        let mut player = get_player_with_funds(Funds::new(1, 0, 0, 0, 0, 0));
        let result = player.remove_token(&Funds::new(1, 1, 0, 0, 0, 0));
        assert!(matches!(
            result,
            Err(PlayerError::PlayerInsufficientTokens(_))
        ));
        assert_eq!(player.funds(), &Funds::new(1, 0, 0, 0, 0, 0));
    }

    #[test]
    fn cannot_reserve_more_than_3() {
        let mut player = get_player_with_funds(Funds::empty());
        for id in 1..=3 {
            assert!(player.can_reserve_card());
            player
                .add_to_reserved_cards(get_production_card(CardId::new(id), Piece::Red))
                .unwrap();
        }
        assert!(!player.can_reserve_card());
        assert_eq!(
            player.add_to_reserved_cards(get_production_card(CardId::new(4), Piece::Red)),
            Err(PlayerError::ReserveCapacityExceeded)
        );
        assert_eq!(player.reserved_cards().len(), 3);
    }

    #[test]
    fn can_buy_card() {
        let card = ProductionCard::new(ProductionTier::One, get_default_cost(), Piece::Red, 0);
        let player = get_player_with_funds(Funds::new(3, 2, 3, 1, 1, 1));
        assert_eq!(player.plan_golden_collateral(&card), Some(Funds::empty()));
    }

    #[test]
    fn cannot_buy_if_there_is_not_enough_funds() {
        let card = ProductionCard::new(ProductionTier::One, get_default_cost(), Piece::Red, 0);
        let player = get_player_with_funds(Funds::new(0, 0, 2, 1, 1, 0));
        assert!(!player.can_purchase_card(&card));

        let player = get_player_with_funds(Funds::empty());
        assert!(!player.can_purchase_card(&card));
    }

    #[test]
    fn can_buy_using_golden_piece_when_needed() {
        let card = ProductionCard::new(ProductionTier::One, get_default_cost(), Piece::Red, 0);
        let player = get_player_with_funds(Funds::new(0, 0, 1, 2, 1, 2));
        assert_eq!(
            player.plan_golden_collateral(&card),
            Some(Funds::new(0, 1, 1, 0, 0, 0))
        );
    }

    #[test]
    fn prioritize_production_card_over_pieces() {
        let card = ProductionCard::new(ProductionTier::One, get_default_cost(), Piece::Red, 0);
        let player = get_player_producing(Funds::new(0, 1, 1, 0, 1, 0), &[Piece::Blue, Piece::Brown]);
        assert_eq!(player.plan_golden_collateral(&card), Some(Funds::empty()));
    }

    #[test]
    fn golden_pieces_committed_to_one_color_are_not_reused() {
        // Green is short by 1 and blue by 2, but there are only 2 golden pieces.
        let card = ProductionCard::new(ProductionTier::One, Funds::new(0, 2, 2, 0, 0, 0), Piece::Red, 0);
        let player = get_player_producing(Funds::new(0, 0, 0, 0, 0, 2), &[Piece::Green]);
        assert!(!player.can_purchase_card(&card));

        let player = get_player_producing(Funds::new(0, 0, 0, 0, 0, 3), &[Piece::Green]);
        assert_eq!(
            player.plan_golden_collateral(&card),
            Some(Funds::new(0, 1, 2, 0, 0, 0))
        );
    }

    #[test]
    fn owning_cards_updates_bonuses_and_points() {
        let mut player = get_player_with_funds(Funds::empty());
        player
            .add_to_owned_cards(get_production_card(CardId::new(1), Piece::Blue))
            .unwrap();
        player
            .add_to_owned_cards(get_production_card(CardId::new(2), Piece::Blue))
            .unwrap();
        assert_eq!(player.bonuses(), &Funds::new(0, 0, 2, 0, 0, 0));
        assert_eq!(player.victory_points(), 2);
        assert_eq!(player.production_cards().len(), 2);
    }

    #[test]
    fn counters_that_would_overflow_fail_without_changes() {
        let mut player = Player {
            victory_points: u8::MAX,
            ..get_player_with_funds(Funds::empty())
        };
        assert_eq!(
            player.add_to_owned_cards(get_production_card(CardId::new(1), Piece::Blue)),
            Err(PlayerError::VictoryPointsOverflow)
        );
        assert!(player.production_cards().is_empty());
        assert_eq!(player.bonuses(), &Funds::empty());

        let noble = Noble::new(NobleId::new(1), Funds::new(0, 0, 1, 0, 0, 0));
        assert_eq!(player.add_noble(noble), Err(PlayerError::VictoryPointsOverflow));
        assert!(player.nobles().is_empty());

        let mut player = Player {
            bonuses: Funds::single(Piece::Red, u8::MAX),
            ..get_player_with_funds(Funds::empty())
        };
        assert!(matches!(
            player.add_to_owned_cards(get_production_card(CardId::new(2), Piece::Red)),
            Err(PlayerError::BonusOverflow(_))
        ));
        assert_eq!(player.victory_points(), 0);
        assert!(player.production_cards().is_empty());
    }

    #[test]
    fn noble_eligibility_only_counts_bonuses() {
        let noble = Noble::new(NobleId::new(1), Funds::new(0, 0, 2, 0, 0, 0));
        let player = get_player_producing(Funds::new(0, 0, 5, 0, 0, 0), &[Piece::Blue]);
        assert!(!player.is_eligible_for_noble(&noble));

        let mut player = get_player_producing(Funds::empty(), &[Piece::Blue, Piece::Blue]);
        assert!(player.is_eligible_for_noble(&noble));
        player.add_noble(noble.clone()).unwrap();
        assert_eq!(player.nobles(), &[noble]);
        assert_eq!(player.victory_points(), 2 + 3);
    }

    #[test]
    fn take_reserved_card_removes_only_that_card() {
        let mut player = get_player_with_funds(Funds::empty());
        for id in 1..=3 {
            player
                .add_to_reserved_cards(get_production_card(CardId::new(id), Piece::Red))
                .unwrap();
        }
        let card = player.take_reserved_card(&CardId::new(2)).unwrap();
        assert_eq!(card.uid, CardId::new(2));
        assert!(!player.has_reserved(&CardId::new(2)));
        assert!(player.has_reserved(&CardId::new(1)));
        assert!(player.take_reserved_card(&CardId::new(2)).is_none());
    }

    proptest! {
        #[test]
        fn never_holds_more_than_10_pieces(steps in prop::collection::vec((0usize..5, 1u8..=3, any::<bool>()), 0..60)) {
            let mut player = get_player_with_funds(Funds::empty());
            for (color, amount, adding) in steps {
                let delta = Funds::single(Piece::STANDARD[color], amount);
                if adding {
                    if player.can_add_token(&delta) {
                        player.add_token(&delta).unwrap();
                    } else {
                        prop_assert!(player.add_token(&delta).is_err());
                    }
                } else {
                    let _ = player.remove_token(&delta);
                }
                prop_assert!(player.funds().total() <= MAX_PIECES_PER_PLAYER);
            }
        }
    }
}
