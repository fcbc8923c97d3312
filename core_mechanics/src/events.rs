use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::funds::Funds;
use super::noble::NobleId;
use super::player::PlayerId;
use super::production_card::CardId;

/// Everything that changes a game, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        players: Vec<PlayerId>,
        nobles: Vec<NobleId>,
        bank: Funds,
    },
    TokensCollected {
        player: PlayerId,
        pieces: Funds,
    },
    CardReserved {
        player: PlayerId,
        card: CardId,
        golden_received: bool,
    },
    CardPurchased {
        player: PlayerId,
        card: CardId,
        paid: Funds,
    },
    NobleVisited {
        player: PlayerId,
        noble: NobleId,
    },
    MoveRejected {
        player: PlayerId,
        action: Action,
        reason: String,
    },
    LastRoundTriggered {
        player: PlayerId,
        victory_points: u8,
    },
    RoundCompleted {
        turns_played: u32,
    },
    GameFinished {
        winner: PlayerId,
        victory_points: u8,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameEvent::GameStarted { players, bank, .. } => {
                write!(f, "game started with {} players, bank {}", players.len(), bank)
            }
            GameEvent::TokensCollected { player, pieces } => {
                write!(f, "{} collected {}", player, pieces)
            }
            GameEvent::CardReserved {
                player,
                card,
                golden_received,
            } => {
                write!(f, "{} reserved card {}", player, card)?;
                if *golden_received {
                    write!(f, " and took a golden piece")?;
                }
                Ok(())
            }
            GameEvent::CardPurchased { player, card, paid } => {
                write!(f, "{} bought card {} paying {}", player, card, paid)
            }
            GameEvent::NobleVisited { player, noble } => {
                write!(f, "{} was visited by {}", player, noble)
            }
            GameEvent::MoveRejected {
                player,
                action,
                reason,
            } => write!(f, "{} tried to {}: {}", player, action, reason),
            GameEvent::LastRoundTriggered {
                player,
                victory_points,
            } => write!(
                f,
                "{} reached {} points, this is the last round",
                player, victory_points
            ),
            GameEvent::RoundCompleted { turns_played } => {
                write!(f, "round {} completed", turns_played)
            }
            GameEvent::GameFinished {
                winner,
                victory_points,
            } => write!(f, "{} won with {} points", winner, victory_points),
        }
    }
}

/// Collects events until the owner drains them.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    queue: Vec<GameEvent>,
}

impl EventBus {
    pub fn push(&mut self, event: GameEvent) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.queue.drain(..)
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.queue
    }
}
