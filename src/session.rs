use core_mechanics::action::Action;
use core_mechanics::config::GameConfig;
use core_mechanics::game::{Game, GameError, GameState, MAX_PLAYERS, MIN_PLAYERS};
use core_mechanics::original_game::get_original_catalog;
use core_mechanics::player::PlayerId;

use crate::message::Message;

/// A local table: players join, someone starts the game, then everyone
/// sends actions in turn. Every message gets its replies straight back.
pub struct Session {
    config: GameConfig,
    seats: Vec<PlayerId>,
    game: Option<Game>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            seats: Vec::with_capacity(MAX_PLAYERS),
            game: None,
        }
    }

    pub fn seats(&self) -> &[PlayerId] {
        &self.seats
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    fn is_game_running(&self) -> bool {
        self.game
            .as_ref()
            .is_some_and(|game| game.state() == GameState::InProgress)
    }

    /// Errors are reserved for a broken engine; anything a player got wrong
    /// is answered with an announcement.
    pub fn handle(&mut self, message: Message) -> Result<Vec<Message>, GameError> {
        match message {
            Message::JoinTable { from } => Ok(vec![self.join_table(from)]),
            Message::StartGame { from: _ } => self.start_game(),
            Message::Action { from, action } => self.play(from, &action),
            Message::Announcement { .. } | Message::Events { .. } => Ok(vec![]),
        }
    }

    fn join_table(&mut self, from: PlayerId) -> Message {
        if self.is_game_running() {
            return Message::announcement("Game is already running");
        }
        if self.seats.contains(&from) {
            return Message::announcement(format!("{} is already seated", from));
        }
        if self.seats.len() >= MAX_PLAYERS {
            return Message::announcement("The table is full");
        }
        self.seats.push(from);
        Message::announcement(format!("{} joined the table", from))
    }

    fn start_game(&mut self) -> Result<Vec<Message>, GameError> {
        if self.is_game_running() {
            return Ok(vec![Message::announcement("Game is already running")]);
        }
        if self.seats.len() < MIN_PLAYERS {
            return Ok(vec![Message::announcement(format!(
                "Not enough players (minimum {}, got {})",
                MIN_PLAYERS,
                self.seats.len()
            ))]);
        }

        let mut game = Game::new(self.config.clone())?;
        for seat in &self.seats {
            game.add_player(*seat)?;
        }
        game.initialize(&get_original_catalog()?)?;

        let mut replies = vec![Message::announcement(format!(
            "Starting a new game with {} players",
            self.seats.len()
        ))];
        replies.push(Message::Events {
            events: game.drain_events(),
        });
        replies.push(turn_announcement(&game));
        self.game = Some(game);
        Ok(replies)
    }

    fn play(&mut self, from: PlayerId, action: &Action) -> Result<Vec<Message>, GameError> {
        let Some(game) = self.game.as_mut() else {
            return Ok(vec![Message::announcement("The game hasn't started yet")]);
        };
        if game.state() != GameState::InProgress {
            return Ok(vec![Message::announcement("The game is over")]);
        }
        if game.get_who_is_playing_now().map(|player| player.id) != Some(from) {
            return Ok(vec![turn_announcement(game)]);
        }

        let mut replies = vec![];
        match game.make_move(action) {
            Ok(()) => {}
            Err(GameError::IllegalMove(rejection)) => {
                replies.push(Message::announcement(rejection.to_string()));
            }
            Err(err) => return Err(err),
        }
        replies.push(Message::Events {
            events: game.drain_events(),
        });
        match game.get_winner() {
            Ok(winner) => replies.push(Message::announcement(format!(
                "{} won with {} points",
                winner.id,
                winner.victory_points()
            ))),
            Err(_) => replies.push(turn_announcement(game)),
        }
        Ok(replies)
    }
}

fn turn_announcement(game: &Game) -> Message {
    match game.get_who_is_playing_now() {
        Some(player) => Message::announcement(format!("It is {} turn now", player.id)),
        None => Message::announcement("Nobody is seated"),
    }
}
