use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::action::{Action, ActionFail, ActionOutcome};
use super::action_set::ActionSet;
use super::bank::Bank;
use super::card_table::CardTable;
use super::catalog::{Catalog, CatalogError};
use super::config::{ConfigError, GameConfig};
use super::events::{EventBus, GameEvent};
use super::funds::Funds;
use super::noble::Noble;
use super::player::{Player, PlayerError, PlayerId};
use super::production_card::{Card, CardId, ProductionTier};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    NotStarted,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundType {
    Normal,
    LastRound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("the game is not in progress")]
    GameNotInProgress,
    #[error("card {0} is neither face-up nor reserved by the current player")]
    CardNotAvailable(CardId),
    #[error("{0} cannot be performed now")]
    NotPerformable(Action),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("illegal move: {0}")]
    IllegalMove(#[from] MoveRejection),
    #[error("the game has not finished yet")]
    GameNotFinished,
    #[error("a game needs 2 to 4 players, got {0}")]
    InvalidPlayerCount(usize),
    #[error("the game has already been initialized")]
    GameAlreadyInitialized,
    #[error("{0} is already seated")]
    DuplicatePlayer(PlayerId),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("action failed after its checks passed: {0}")]
    Action(#[from] ActionFail),
}

/// Where the card of a card action currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardLocation {
    Table(usize),
    Reserved,
}

/// A whole match: seating, turn order, the bank, the tables and the nobles.
///
/// All changes go through [`Game::make_move`]; everything else only reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    state: GameState,
    round_type: RoundType,
    players: Vec<Player>,
    player_turn: usize,
    turns_played: u32,
    bank: Bank,
    nobles: Vec<Noble>,
    tables: Vec<CardTable>,
    action_set: ActionSet,
    #[serde(skip)]
    events: EventBus,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            state: GameState::NotStarted,
            round_type: RoundType::Normal,
            players: vec![],
            player_turn: 0,
            turns_played: 0,
            bank: Bank::new(Funds::empty()),
            nobles: vec![],
            tables: vec![],
            action_set: ActionSet::new(),
            events: EventBus::default(),
        })
    }

    /// Seats a player. Seating order is turn order.
    pub fn add_player(&mut self, id: PlayerId) -> Result<(), GameError> {
        if self.state != GameState::NotStarted {
            return Err(GameError::GameAlreadyInitialized);
        }
        if self.players.iter().any(|p| p.id == id) {
            return Err(GameError::DuplicatePlayer(id));
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::InvalidPlayerCount(self.players.len() + 1));
        }
        self.players.push(Player::new(id));
        Ok(())
    }

    /// Deals the game: sizes the bank, draws the nobles and fills the tables.
    pub fn initialize(&mut self, catalog: &Catalog) -> Result<(), GameError> {
        if self.state != GameState::NotStarted {
            return Err(GameError::GameAlreadyInitialized);
        }
        let n_of_players = self.players.len();
        let bank =
            Bank::for_players(n_of_players).ok_or(GameError::InvalidPlayerCount(n_of_players))?;

        let n_of_nobles = n_of_players + 1;
        if catalog.nobles().len() < n_of_nobles {
            return Err(CatalogError::NotEnoughNobles {
                needed: n_of_nobles,
                available: catalog.nobles().len(),
            }
            .into());
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let nobles: Vec<Noble> = if self.config.shuffle {
            catalog
                .nobles()
                .choose_multiple(&mut rng, n_of_nobles)
                .cloned()
                .collect()
        } else {
            catalog.nobles()[..n_of_nobles].to_vec()
        };

        let tables = ProductionTier::ALL
            .iter()
            .map(|tier| {
                let mut deck = catalog.deck(*tier);
                if self.config.shuffle {
                    deck.shuffle(&mut rng);
                }
                CardTable::new(*tier, deck, self.config.table_slots)
            })
            .collect();

        self.bank = bank;
        self.nobles = nobles;
        self.tables = tables;
        self.state = GameState::InProgress;
        self.rebuild_action_set();

        self.events.push(GameEvent::GameStarted {
            players: self.players.iter().map(|p| p.id).collect(),
            nobles: self.nobles.iter().map(|n| n.id).collect(),
            bank: self.bank.funds().clone(),
        });
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn round_type(&self) -> RoundType {
        self.round_type
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_turn(&self) -> usize {
        self.player_turn
    }

    pub fn get_who_is_playing_now(&self) -> Option<&Player> {
        self.players.get(self.player_turn)
    }

    /// Completed rounds, i.e. how many times the last seat has played.
    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    /// Nobles that have not visited anyone yet.
    pub fn nobles(&self) -> &[Noble] {
        &self.nobles
    }

    pub fn tables(&self) -> &[CardTable] {
        &self.tables
    }

    pub fn table(&self, tier: ProductionTier) -> Option<&CardTable> {
        self.tables.iter().find(|table| table.tier() == tier)
    }

    pub fn action_set(&self) -> &ActionSet {
        &self.action_set
    }

    /// The actions of the current action set the current player may make.
    pub fn legal_actions(&self) -> Vec<Action> {
        self.action_set
            .all_actions()
            .filter(|action| self.check_move(action).is_ok())
            .cloned()
            .collect()
    }

    pub fn is_legal(&self, action: &Action) -> bool {
        self.check_move(action).is_ok()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    /// Plays `action` for the current player and passes the turn.
    ///
    /// An illegal action is rejected before anything changes.
    pub fn make_move(&mut self, action: &Action) -> Result<(), GameError> {
        let (card, location) = match self.check_move(action) {
            Ok(found) => found.unzip(),
            Err(rejection) => {
                if let Some(player) = self.get_who_is_playing_now().map(|p| p.id) {
                    self.events.push(GameEvent::MoveRejected {
                        player,
                        action: action.clone(),
                        reason: rejection.to_string(),
                    });
                }
                return Err(rejection.into());
            }
        };

        let player = &mut self.players[self.player_turn];
        let outcome = action.perform(player, &mut self.bank, card.as_ref())?;
        let player_id = player.id;
        self.events.push(match outcome {
            ActionOutcome::TokensCollected(pieces) => GameEvent::TokensCollected {
                player: player_id,
                pieces,
            },
            ActionOutcome::CardReserved {
                card,
                golden_received,
            } => GameEvent::CardReserved {
                player: player_id,
                card,
                golden_received,
            },
            ActionOutcome::CardPurchased { card, paid } => GameEvent::CardPurchased {
                player: player_id,
                card,
                paid,
            },
        });

        self.visit_noble().map_err(ActionFail::from)?;
        self.pass_the_turn();

        if let (Some(CardLocation::Table(table)), Some(card)) = (location, card) {
            self.tables[table].take(&card.uid);
        }
        self.rebuild_action_set();

        Ok(())
    }

    /// The winner of a finished game: most points, then fewest cards, then
    /// seating order.
    pub fn get_winner(&self) -> Result<&Player, GameError> {
        if self.state != GameState::Finished {
            return Err(GameError::GameNotFinished);
        }
        self.players
            .iter()
            .filter(|p| p.victory_points() >= self.config.winning_points)
            .min_by(|a, b| {
                b.victory_points()
                    .cmp(&a.victory_points())
                    .then_with(|| a.production_cards().len().cmp(&b.production_cards().len()))
            })
            .ok_or(GameError::GameNotFinished)
    }

    /// Every player, best first, by the same order as [`Game::get_winner`].
    pub fn standings(&self) -> Vec<&Player> {
        let mut players: Vec<&Player> = self.players.iter().collect();
        players.sort_by(|a, b| {
            b.victory_points()
                .cmp(&a.victory_points())
                .then_with(|| a.production_cards().len().cmp(&b.production_cards().len()))
        });
        players
    }

    fn check_move(&self, action: &Action) -> Result<Option<(Card, CardLocation)>, MoveRejection> {
        if self.state != GameState::InProgress {
            return Err(MoveRejection::GameNotInProgress);
        }
        let player = &self.players[self.player_turn];

        let found = match action.card_id() {
            Some(card_id) => Some(
                self.find_card(action, &card_id)
                    .ok_or(MoveRejection::CardNotAvailable(card_id))?,
            ),
            None => None,
        };

        let card = found.as_ref().map(|(card, _)| card);
        if !action.can_perform(player, &self.bank, card) {
            return Err(MoveRejection::NotPerformable(action.clone()));
        }
        Ok(found)
    }

    /// Face-up cards can be reserved or bought; reserved ones only bought.
    fn find_card(&self, action: &Action, card_id: &CardId) -> Option<(Card, CardLocation)> {
        let on_table = self.tables.iter().enumerate().find_map(|(n, table)| {
            table
                .get(card_id)
                .map(|card| (card.clone(), CardLocation::Table(n)))
        });
        if on_table.is_some() {
            return on_table;
        }
        match action {
            Action::BuyCard(_, _) => self.players[self.player_turn]
                .get_reserved_card(card_id)
                .map(|card| (card.clone(), CardLocation::Reserved)),
            _ => None,
        }
    }

    /// At most one noble per move: the first one, in draw order, the
    /// current player qualifies for.
    fn visit_noble(&mut self) -> Result<(), PlayerError> {
        let player = &mut self.players[self.player_turn];
        let Some(position) = self
            .nobles
            .iter()
            .position(|noble| player.is_eligible_for_noble(noble))
        else {
            return Ok(());
        };
        player.add_noble(self.nobles[position].clone())?;
        let noble = self.nobles.remove(position);
        self.events.push(GameEvent::NobleVisited {
            player: player.id,
            noble: noble.id,
        });
        Ok(())
    }

    fn pass_the_turn(&mut self) {
        let player = &self.players[self.player_turn];
        if self.round_type == RoundType::Normal
            && player.victory_points() >= self.config.winning_points
        {
            self.round_type = RoundType::LastRound;
            self.events.push(GameEvent::LastRoundTriggered {
                player: player.id,
                victory_points: player.victory_points(),
            });
        }

        if !self.is_last_player_turn() {
            self.player_turn += 1;
            return;
        }

        self.turns_played += 1;
        self.events.push(GameEvent::RoundCompleted {
            turns_played: self.turns_played,
        });

        if self.has_some_player_passed_win_threshold() {
            self.state = GameState::Finished;
            let winner = self
                .get_winner()
                .ok()
                .map(|winner| (winner.id, winner.victory_points()));
            if let Some((winner, victory_points)) = winner {
                self.events.push(GameEvent::GameFinished {
                    winner,
                    victory_points,
                });
            }
        } else {
            self.player_turn = 0;
        }
    }

    fn rebuild_action_set(&mut self) {
        if let Some(player) = self.players.get(self.player_turn) {
            self.action_set.rebuild(&self.tables, player);
        }
    }

    fn has_some_player_passed_win_threshold(&self) -> bool {
        self.players
            .iter()
            .any(|p| p.victory_points() >= self.config.winning_points)
    }

    fn is_last_player_turn(&self) -> bool {
        self.player_turn == self.players.len() - 1
    }
}
