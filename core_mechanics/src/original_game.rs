//! The published card and noble set, 90 cards over three tiers and 10 nobles.

use crate::catalog::{Catalog, CatalogError};
use crate::config::GameConfig;
use crate::funds::Funds;
use crate::game::{Game, GameError};
use crate::noble::{Noble, NobleId};
use crate::piece::Piece;
use crate::player::PlayerId;
use crate::production_card::{CardId, Identifiable, ProductionCard, ProductionTier};

/// The original catalog. Card ids run from 1 through tier one, two and three.
pub fn get_original_catalog() -> Result<Catalog, CatalogError> {
    let tiers = [
        (ProductionTier::One, get_tier_one_cards()),
        (ProductionTier::Two, get_tier_two_cards()),
        (ProductionTier::Three, get_tier_three_cards()),
    ];

    let mut unique_id = 0;
    let mut cards = vec![];
    for (tier, entries) in tiers {
        for (cost, produces, victory_points) in entries {
            unique_id += 1;
            cards.push(Identifiable::new(
                ProductionCard::new(tier, cost, produces, victory_points),
                CardId::new(unique_id),
            ));
        }
    }

    Catalog::new(cards, get_nobles())
}

/// A dealt original game with players `1..=n_of_players` seated in order.
pub fn new_original_game(n_of_players: u8, config: GameConfig) -> Result<Game, GameError> {
    let mut game = Game::new(config)?;
    for n in 1..=n_of_players {
        game.add_player(PlayerId::new(n))?;
    }
    game.initialize(&get_original_catalog()?)?;
    Ok(game)
}

fn get_tier_one_cards() -> Vec<(Funds, Piece, u8)> {
    vec![
        (Funds::new(0, 0, 2, 0, 2, 0), Piece::Green, 0),
        (Funds::new(1, 0, 1, 2, 1, 0), Piece::Green, 0),
        (Funds::new(1, 0, 1, 1, 1, 0), Piece::Green, 0),
        (Funds::new(0, 3, 0, 0, 0, 0), Piece::Brown, 0),
        (Funds::new(0, 0, 4, 0, 0, 0), Piece::Brown, 1),
        (Funds::new(1, 1, 2, 0, 1, 0), Piece::Brown, 0),
        (Funds::new(1, 3, 1, 0, 0, 0), Piece::Blue, 0),
        (Funds::new(2, 1, 0, 1, 1, 0), Piece::Blue, 0),
        (Funds::new(0, 2, 0, 2, 0, 0), Piece::Blue, 0),
        (Funds::new(0, 0, 2, 2, 0, 0), Piece::White, 0),
        (Funds::new(0, 0, 0, 0, 3, 0), Piece::Red, 0),
        (Funds::new(0, 0, 0, 4, 0, 0), Piece::Green, 1),
        (Funds::new(0, 1, 3, 0, 1, 0), Piece::Green, 0),
        (Funds::new(2, 0, 1, 2, 0, 0), Piece::Green, 0),
        (Funds::new(1, 0, 0, 3, 1, 0), Piece::Red, 0),
        (Funds::new(0, 0, 0, 0, 4, 0), Piece::Red, 1),
        (Funds::new(0, 0, 3, 0, 0, 0), Piece::White, 0),
        (Funds::new(2, 2, 0, 0, 0, 0), Piece::Brown, 0),
        (Funds::new(3, 1, 0, 1, 0, 0), Piece::Brown, 0),
        (Funds::new(0, 2, 0, 0, 2, 0), Piece::Brown, 0),
        (Funds::new(1, 1, 0, 1, 1, 0), Piece::Blue, 0),
        (Funds::new(4, 0, 0, 0, 0, 0), Piece::Blue, 1),
        (Funds::new(0, 1, 0, 2, 2, 0), Piece::Red, 0),
        (Funds::new(2, 0, 0, 0, 2, 0), Piece::Red, 0),
        (Funds::new(0, 1, 2, 0, 0, 0), Piece::Red, 0),
        (Funds::new(1, 0, 2, 0, 2, 0), Piece::Brown, 0),
        (Funds::new(2, 2, 0, 0, 1, 0), Piece::Blue, 0),
        (Funds::new(0, 0, 0, 3, 0, 0), Piece::Blue, 0),
        (Funds::new(0, 0, 2, 1, 2, 0), Piece::White, 0),
        (Funds::new(1, 1, 1, 1, 0, 0), Piece::White, 0),
        (Funds::new(0, 0, 0, 2, 1, 0), Piece::Blue, 0),
        (Funds::new(1, 1, 1, 0, 1, 0), Piece::Brown, 0),
        (Funds::new(2, 0, 2, 0, 0, 0), Piece::Green, 0),
        (Funds::new(3, 0, 0, 0, 0, 0), Piece::Green, 0),
        (Funds::new(1, 2, 1, 1, 0, 0), Piece::White, 0),
        (Funds::new(2, 0, 0, 1, 0, 0), Piece::White, 0),
        (Funds::new(0, 0, 1, 1, 3, 0), Piece::White, 0),
        (Funds::new(0, 4, 0, 0, 0, 0), Piece::White, 1),
        (Funds::new(0, 1, 1, 1, 2, 0), Piece::Red, 0),
        (Funds::new(0, 1, 1, 1, 1, 0), Piece::Red, 0),
    ]
}

fn get_tier_two_cards() -> Vec<(Funds, Piece, u8)> {
    vec![
        (Funds::new(0, 3, 0, 2, 3, 0), Piece::Brown, 1),
        (Funds::new(3, 2, 0, 0, 3, 0), Piece::Green, 1),
        (Funds::new(2, 0, 3, 3, 0, 0), Piece::Red, 1),
        (Funds::new(0, 0, 6, 0, 0, 0), Piece::Blue, 3),
        (Funds::new(1, 0, 0, 4, 2, 0), Piece::Blue, 2),
        (Funds::new(3, 0, 3, 0, 2, 0), Piece::White, 1),
        (Funds::new(0, 0, 2, 1, 4, 0), Piece::Green, 2),
        (Funds::new(0, 0, 5, 0, 0, 0), Piece::Blue, 2),
        (Funds::new(0, 0, 0, 0, 5, 0), Piece::Brown, 2),
        (Funds::new(2, 0, 0, 3, 2, 0), Piece::Red, 1),
        (Funds::new(0, 0, 0, 0, 6, 0), Piece::White, 3),
        (Funds::new(0, 2, 4, 0, 1, 0), Piece::Red, 2),
        (Funds::new(5, 0, 0, 0, 0, 0), Piece::White, 2),
        (Funds::new(0, 6, 0, 0, 0, 0), Piece::Green, 3),
        (Funds::new(0, 5, 0, 0, 0, 0), Piece::Green, 2),
        (Funds::new(0, 0, 0, 5, 0, 0), Piece::Red, 2),
        (Funds::new(0, 2, 2, 0, 3, 0), Piece::Brown, 1),
        (Funds::new(0, 0, 0, 6, 0, 0), Piece::Brown, 3),
        (Funds::new(3, 5, 0, 0, 0, 0), Piece::Brown, 2),
        (Funds::new(0, 3, 5, 0, 0, 0), Piece::Green, 2),
        (Funds::new(0, 3, 2, 3, 0, 0), Piece::Blue, 1),
        (Funds::new(2, 2, 2, 0, 0, 0), Piece::Blue, 1),
        (Funds::new(0, 0, 3, 0, 5, 0), Piece::Blue, 2),
        (Funds::new(0, 0, 3, 2, 2, 0), Piece::Green, 1),
        (Funds::new(5, 0, 0, 3, 0, 0), Piece::White, 2),
        (Funds::new(4, 1, 0, 2, 0, 0), Piece::White, 2),
        (Funds::new(2, 4, 0, 1, 0, 0), Piece::Brown, 2),
        (Funds::new(2, 3, 0, 2, 0, 0), Piece::White, 1),
        (Funds::new(6, 0, 0, 0, 0, 0), Piece::Red, 3),
        (Funds::new(0, 0, 0, 5, 3, 0), Piece::Red, 2),
    ]
}

fn get_tier_three_cards() -> Vec<(Funds, Piece, u8)> {
    vec![
        (Funds::new(3, 0, 3, 3, 5, 0), Piece::Green, 3),
        (Funds::new(3, 3, 0, 5, 3, 0), Piece::Blue, 3),
        (Funds::new(0, 3, 6, 0, 3, 0), Piece::Green, 4),
        (Funds::new(0, 0, 0, 7, 3, 0), Piece::White, 5),
        (Funds::new(7, 0, 0, 0, 0, 0), Piece::Brown, 4),
        (Funds::new(6, 3, 0, 3, 0, 0), Piece::Brown, 4),
        (Funds::new(0, 0, 3, 3, 6, 0), Piece::Blue, 4),
        (Funds::new(0, 7, 0, 0, 0, 0), Piece::Red, 4),
        (Funds::new(0, 3, 5, 3, 3, 0), Piece::Red, 3),
        (Funds::new(3, 6, 3, 0, 0, 0), Piece::Red, 4),
        (Funds::new(3, 0, 0, 6, 3, 0), Piece::White, 4),
        (Funds::new(3, 5, 3, 0, 3, 0), Piece::Brown, 3),
        (Funds::new(0, 0, 3, 0, 7, 0), Piece::Blue, 5),
        (Funds::new(3, 7, 0, 0, 0, 0), Piece::Red, 5),
        (Funds::new(0, 3, 7, 0, 0, 0), Piece::Green, 5),
        (Funds::new(0, 0, 0, 7, 0, 0), Piece::White, 4),
        (Funds::new(0, 0, 7, 0, 0, 0), Piece::Green, 4),
        (Funds::new(5, 3, 3, 3, 0, 0), Piece::White, 3),
        (Funds::new(0, 0, 0, 0, 7, 0), Piece::Blue, 4),
        (Funds::new(7, 0, 0, 3, 0, 0), Piece::Brown, 5),
    ]
}

fn get_nobles() -> Vec<Noble> {
    vec![
        Noble::new(NobleId::new(1), Funds::new(0, 4, 4, 0, 0, 0)),
        Noble::new(NobleId::new(2), Funds::new(0, 0, 4, 0, 4, 0)),
        Noble::new(NobleId::new(3), Funds::new(4, 4, 0, 0, 0, 0)),
        Noble::new(NobleId::new(4), Funds::new(0, 0, 0, 4, 4, 0)),
        Noble::new(NobleId::new(5), Funds::new(3, 0, 0, 3, 3, 0)),
        Noble::new(NobleId::new(6), Funds::new(3, 3, 0, 3, 0, 0)),
        Noble::new(NobleId::new(7), Funds::new(3, 3, 3, 0, 0, 0)),
        Noble::new(NobleId::new(8), Funds::new(4, 0, 0, 4, 0, 0)),
        Noble::new(NobleId::new(9), Funds::new(0, 3, 3, 0, 3, 0)),
        Noble::new(NobleId::new(10), Funds::new(0, 0, 3, 3, 3, 0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameState;

    #[test]
    fn original_catalog_is_valid() {
        let catalog = get_original_catalog().unwrap();
        assert_eq!(catalog.cards().len(), 90);
        assert_eq!(catalog.deck(ProductionTier::One).len(), 40);
        assert_eq!(catalog.deck(ProductionTier::Two).len(), 30);
        assert_eq!(catalog.deck(ProductionTier::Three).len(), 20);
        assert_eq!(catalog.nobles().len(), 10);
        assert_eq!(catalog.cards().last().unwrap().uid, CardId::new(90));
    }

    #[test]
    fn original_game_is_dealt_for_each_player_count() {
        for (n_of_players, tokens_per_color) in [(2, 4), (3, 5), (4, 7)] {
            let game = new_original_game(n_of_players, GameConfig::unshuffled()).unwrap();
            assert_eq!(game.state(), GameState::InProgress);
            assert_eq!(game.nobles().len(), n_of_players as usize + 1);
            assert_eq!(game.bank().get(Piece::Red), tokens_per_color);
            assert_eq!(game.bank().get(Piece::Golden), 5);
            for table in game.tables() {
                assert_eq!(table.cards().count(), 4);
            }
        }
        assert!(matches!(
            new_original_game(5, GameConfig::default()),
            Err(GameError::InvalidPlayerCount(5))
        ));
    }

    #[test]
    fn same_seed_deals_the_same_game() {
        let config = GameConfig {
            seed: Some(42),
            ..GameConfig::default()
        };
        let first = new_original_game(3, config.clone()).unwrap();
        let second = new_original_game(3, config).unwrap();
        assert_eq!(first.nobles(), second.nobles());
        assert_eq!(first.tables(), second.tables());
    }
}
