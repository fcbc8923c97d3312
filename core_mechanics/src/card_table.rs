use serde::{Deserialize, Serialize};

use super::production_card::{Card, CardId, ProductionTier};

pub const DEFAULT_TABLE_SLOTS: usize = 4;

/// The face-down deck and the face-up slots of one tier.
///
/// The number of slots never changes. A slot is only empty once the deck has
/// run out; cards are drawn from the end of the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTable {
    tier: ProductionTier,
    deck: Vec<Card>,
    slots: Vec<Option<Card>>,
}

impl CardTable {
    pub fn new(tier: ProductionTier, deck: Vec<Card>, n_of_slots: usize) -> Self {
        let mut table = Self {
            tier,
            deck,
            slots: vec![None; n_of_slots],
        };
        table.refill();
        table
    }

    pub fn tier(&self) -> ProductionTier {
        self.tier
    }

    /// Fills every empty slot from the deck, lowest index first.
    pub fn refill(&mut self) {
        for slot in self.slots.iter_mut().filter(|slot| slot.is_none()) {
            match self.deck.pop() {
                Some(card_drawn) => *slot = Some(card_drawn),
                None => break,
            }
        }
    }

    pub fn slots(&self) -> &[Option<Card>] {
        &self.slots
    }

    /// Face-up cards, in slot order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.slots.iter().flatten()
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn contains(&self, card_id: &CardId) -> bool {
        self.get(card_id).is_some()
    }

    pub fn get(&self, card_id: &CardId) -> Option<&Card> {
        self.cards().find(|card| &card.uid == card_id)
    }

    /// Takes a face-up card off the table and refills exactly its slot.
    pub fn take(&mut self, card_id: &CardId) -> Option<Card> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| matches!(slot, Some(card) if &card.uid == card_id))?;
        let card = slot.take();
        *slot = self.deck.pop();
        card
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funds::Funds;
    use crate::piece::Piece;
    use crate::production_card::{Identifiable, ProductionCard};

    fn get_production_card(card_id: CardId) -> Card {
        let cost = Funds::new(1, 1, 0, 0, 0, 0);
        let card = ProductionCard::new(ProductionTier::One, cost, Piece::Red, 1);
        Identifiable::new(card, card_id)
    }

    fn get_deck(ids: &[u8]) -> Vec<Card> {
        ids.iter().map(|id| get_production_card(CardId::new(*id))).collect()
    }

    fn ids_on_table(table: &CardTable) -> Vec<Option<u8>> {
        table
            .slots()
            .iter()
            .map(|slot| slot.as_ref().map(|card| card.uid.id()))
            .collect()
    }

    #[test]
    fn auto_draw_necessary_cards() {
        let table = CardTable::new(ProductionTier::One, get_deck(&[5, 4, 3, 2, 1]), 4);
        assert_eq!(ids_on_table(&table), vec![Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(table.deck_len(), 1);

        let table = CardTable::new(ProductionTier::One, get_deck(&[5, 4]), 4);
        assert_eq!(ids_on_table(&table), vec![Some(4), Some(5), None, None]);
        assert_eq!(table.deck_len(), 0);
        assert_eq!(table.slots().len(), 4);
    }

    #[test]
    fn taking_a_card_refills_the_same_slot() {
        let mut table = CardTable::new(ProductionTier::One, get_deck(&[6, 5, 4, 3, 2, 1]), 4);

        let card = table.take(&CardId::new(3)).unwrap();
        assert_eq!(card.uid, CardId::new(3));
        assert_eq!(ids_on_table(&table), vec![Some(1), Some(2), Some(5), Some(4)]);

        table.take(&CardId::new(1)).unwrap();
        assert_eq!(ids_on_table(&table), vec![Some(6), Some(2), Some(5), Some(4)]);

        // The deck is empty now, so the slot stays empty.
        table.take(&CardId::new(2)).unwrap();
        assert_eq!(ids_on_table(&table), vec![Some(6), None, Some(5), Some(4)]);
        assert_eq!(table.slots().len(), 4);
    }

    #[test]
    fn cannot_take_a_card_that_is_not_face_up() {
        let mut table = CardTable::new(ProductionTier::One, get_deck(&[5, 4, 3, 2, 1]), 4);
        assert!(table.take(&CardId::new(5)).is_none());
        assert!(!table.contains(&CardId::new(5)));
        assert!(table.contains(&CardId::new(4)));
        assert_eq!(table.deck_len(), 1);
    }
}
