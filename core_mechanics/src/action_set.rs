use serde::{Deserialize, Serialize};

use super::action::Action;
use super::card_table::CardTable;
use super::piece::Piece;
use super::player::Player;

/// Every action worth offering to the player whose turn it is.
///
/// The 15 piece-collecting actions never change. Card actions are rebuilt
/// from scratch whenever the face-up cards or the current player change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSet {
    token_actions: Vec<Action>,
    card_actions: Vec<Action>,
    reserved_card_actions: Vec<Action>,
}

impl Default for ActionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionSet {
    pub fn new() -> Self {
        Self {
            token_actions: get_token_actions(),
            card_actions: vec![],
            reserved_card_actions: vec![],
        }
    }

    /// Reserve and buy actions for every face-up card, and buy actions for
    /// the cards `player` has reserved.
    ///
    /// Buy actions carry the golden collateral the player would need to
    /// commit, or none when the card is out of reach.
    pub fn rebuild(&mut self, tables: &[CardTable], player: &Player) {
        self.card_actions = tables
            .iter()
            .flat_map(|table| table.cards())
            .flat_map(|card| {
                let collateral = player.plan_golden_collateral(&card.data).unwrap_or_default();
                [
                    Action::ReserveCard(card.uid),
                    Action::BuyCard(card.uid, collateral),
                ]
            })
            .collect();

        self.reserved_card_actions = player
            .reserved_cards()
            .iter()
            .map(|card| {
                let collateral = player.plan_golden_collateral(&card.data).unwrap_or_default();
                Action::BuyCard(card.uid, collateral)
            })
            .collect();
    }

    pub fn token_actions(&self) -> &[Action] {
        &self.token_actions
    }

    pub fn card_actions(&self) -> &[Action] {
        &self.card_actions
    }

    pub fn reserved_card_actions(&self) -> &[Action] {
        &self.reserved_card_actions
    }

    pub fn all_actions(&self) -> impl Iterator<Item = &Action> {
        self.token_actions
            .iter()
            .chain(self.card_actions.iter())
            .chain(self.reserved_card_actions.iter())
    }
}

fn get_token_actions() -> Vec<Action> {
    let colors = Piece::STANDARD;
    let mut actions = vec![];
    for (i, first) in colors.iter().enumerate() {
        for (j, second) in colors.iter().enumerate().skip(i + 1) {
            for third in colors.iter().skip(j + 1) {
                actions.push(Action::CollectThreeUnique([*first, *second, *third]));
            }
        }
    }
    for color in colors {
        actions.push(Action::CollectTwoSame(color));
    }
    actions
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::funds::Funds;
    use crate::player::PlayerId;
    use crate::production_card::{Card, CardId, Identifiable, ProductionCard, ProductionTier};

    fn get_card(id: u8, cost: Funds) -> Card {
        Identifiable::new(
            ProductionCard::new(ProductionTier::One, cost, Piece::Red, 0),
            CardId::new(id),
        )
    }

    #[test]
    fn there_are_15_distinct_token_actions() {
        let action_set = ActionSet::new();
        let unique: HashSet<&Action> = action_set.token_actions().iter().collect();
        assert_eq!(unique.len(), 15);
        assert_eq!(
            action_set
                .token_actions()
                .iter()
                .filter(|a| matches!(a, Action::CollectThreeUnique(_)))
                .count(),
            10
        );
        assert_eq!(action_set.all_actions().count(), 15);
    }

    #[test]
    fn rebuild_replaces_card_actions() {
        let deck = vec![
            get_card(3, Funds::new(0, 0, 1, 0, 0, 0)),
            get_card(2, Funds::new(0, 1, 0, 0, 0, 0)),
            get_card(1, Funds::new(2, 0, 0, 0, 0, 0)),
        ];
        let mut table = CardTable::new(ProductionTier::One, deck, 2);
        let mut player = Player {
            funds: Funds::new(1, 0, 0, 0, 0, 1),
            ..Player::new(PlayerId::new(1))
        };
        player
            .add_to_reserved_cards(get_card(9, Funds::new(0, 0, 0, 0, 3, 0)))
            .unwrap();

        let mut action_set = ActionSet::new();
        action_set.rebuild(std::slice::from_ref(&table), &player);

        assert_eq!(
            action_set.card_actions(),
            &[
                Action::ReserveCard(CardId::new(1)),
                Action::BuyCard(CardId::new(1), Funds::new(1, 0, 0, 0, 0, 0)),
                Action::ReserveCard(CardId::new(2)),
                Action::BuyCard(CardId::new(2), Funds::new(0, 1, 0, 0, 0, 0)),
            ]
        );
        assert_eq!(
            action_set.reserved_card_actions(),
            &[Action::BuyCard(CardId::new(9), Funds::empty())]
        );
        assert_eq!(action_set.all_actions().count(), 15 + 4 + 1);

        table.take(&CardId::new(1)).unwrap();
        action_set.rebuild(std::slice::from_ref(&table), &player);
        assert!(!action_set
            .all_actions()
            .any(|action| action.card_id() == Some(CardId::new(1))));
        assert!(action_set
            .all_actions()
            .any(|action| action == &Action::ReserveCard(CardId::new(3))));
    }
}
