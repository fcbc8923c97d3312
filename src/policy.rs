use core_mechanics::action::Action;
use core_mechanics::game::Game;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

/// Picks the next move for whoever's turn it is.
///
/// A policy only ever sees the game read-only and answers with one of
/// [`Game::legal_actions`], or `None` when there is nothing left to do.
pub trait Policy {
    fn choose_action(&mut self, game: &Game) -> Option<Action>;
}

/// Any legal action, uniformly.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// `None` seeds from the operating system.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl Policy for RandomPolicy {
    fn choose_action(&mut self, game: &Game) -> Option<Action> {
        game.legal_actions().choose(&mut self.rng).cloned()
    }
}

/// Buys whenever it can, the card worth the most first. Otherwise collects,
/// and reserves only as a last resort.
pub struct GreedyPolicy {
    fallback: RandomPolicy,
}

impl GreedyPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            fallback: RandomPolicy::new(seed),
        }
    }
}

impl Policy for GreedyPolicy {
    fn choose_action(&mut self, game: &Game) -> Option<Action> {
        let actions = game.legal_actions();

        let best_buy = actions
            .iter()
            .filter(|action| matches!(action, Action::BuyCard(_, _)))
            .max_by_key(|action| card_points(game, action));
        if let Some(action) = best_buy {
            return Some(action.clone());
        }

        let collecting: Vec<Action> = actions
            .iter()
            .filter(|action| {
                matches!(
                    action,
                    Action::CollectThreeUnique(_) | Action::CollectTwoSame(_)
                )
            })
            .cloned()
            .collect();
        if let Some(action) = collecting.choose(&mut self.fallback.rng) {
            return Some(action.clone());
        }

        actions.choose(&mut self.fallback.rng).cloned()
    }
}

fn card_points(game: &Game, action: &Action) -> u8 {
    let Some(card_id) = action.card_id() else {
        return 0;
    };
    let on_table = game.tables().iter().find_map(|table| table.get(&card_id));
    let reserved = game
        .get_who_is_playing_now()
        .and_then(|player| player.get_reserved_card(&card_id));
    on_table
        .or(reserved)
        .map(|card| card.data.victory_points)
        .unwrap_or(0)
}
