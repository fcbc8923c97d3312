use std::fs;
use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use core_mechanics::config::GameConfig;
use core_mechanics::events::GameEvent;
use core_mechanics::game::{Game, GameState};
use core_mechanics::original_game::new_original_game;
use splendor_engine::message::Message;
use splendor_engine::policy::{GreedyPolicy, Policy, RandomPolicy};
use splendor_engine::session::Session;

/// Splendor engine
///
/// Simulate games between agents, or run a table that reads JSON messages from stdin
#[derive(Parser, Debug)]
struct Args {
    /// JSON file with game settings. Fields left out keep their defaults.
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Seed for dealing and for the agents. Overrides the config file.
    #[clap(short, long)]
    seed: Option<u64>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plays one game between agents and prints what happened.
    Simulate {
        #[clap(short, long, default_value = "2")]
        players: u8,
        /// Stop after this many moves even if nobody has won.
        #[clap(short, long, default_value = "1000")]
        max_moves: usize,
        /// Agents buy whenever they can instead of moving at random.
        #[clap(long)]
        greedy: bool,
        /// Print one JSON event per line.
        #[clap(long)]
        json: bool,
    },
    /// Reads one JSON message per line and prints the replies.
    Play,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    match args.command {
        Command::Simulate {
            players,
            max_moves,
            greedy,
            json,
        } => {
            let mut policy: Box<dyn Policy> = if greedy {
                Box::new(GreedyPolicy::new(config.seed))
            } else {
                Box::new(RandomPolicy::new(config.seed))
            };
            let game = new_original_game(players, config)?;
            simulate(game, policy.as_mut(), max_moves, json)
        }
        Command::Play => play(config),
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("cannot read config {}", path.display()))?;
            GameConfig::from_json(&json)?
        }
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    Ok(config)
}

fn simulate(mut game: Game, policy: &mut dyn Policy, max_moves: usize, json: bool) -> Result<()> {
    print_events(game.drain_events(), json)?;

    for _ in 0..max_moves {
        if game.state() == GameState::Finished {
            break;
        }
        let Some(action) = policy.choose_action(&game) else {
            if !json {
                println!("> nobody can move anymore");
            }
            break;
        };
        game.make_move(&action)?;
        print_events(game.drain_events(), json)?;
    }

    if json {
        return Ok(());
    }
    if game.state() != GameState::Finished {
        println!("> no winner after {} rounds", game.turns_played());
    }
    for (place, player) in game.standings().iter().enumerate() {
        println!(
            "> {}. {}: {} points, {} cards, {} nobles",
            place + 1,
            player.id,
            player.victory_points(),
            player.production_cards().len(),
            player.nobles().len()
        );
    }
    Ok(())
}

fn print_events(events: Vec<GameEvent>, json: bool) -> Result<()> {
    for event in events {
        if json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            println!("> {}", event);
        }
    }
    Ok(())
}

fn play(config: GameConfig) -> Result<()> {
    let mut session = Session::new(config);
    let stdin = std::io::stdin();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match Message::from_line(&line) {
            Ok(message) => {
                for reply in session.handle(message)? {
                    println!("{}", reply.to_line()?);
                }
            }
            Err(decoding_error) => {
                println!("Malformatted json: {}", decoding_error);
            }
        }
    }

    Ok(())
}
