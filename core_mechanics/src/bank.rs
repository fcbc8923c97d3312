use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::funds::{Funds, FundsError};
use super::piece::Piece;

pub const MIN_PILE_SIZE_TO_COLLECT_TWO_EQUALS: u8 = 4;
pub const GOLDEN_PIECES: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("the bank only hands out 1 or 2 pieces of a color, {amount} {piece} requested")]
    UnsupportedWithdrawal { piece: Piece, amount: u8 },
    #[error("the bank cannot hand out {request}")]
    BankInsufficientTokens { request: Funds },
    #[error(transparent)]
    Funds(#[from] FundsError),
}

/// The shared pool of pieces every player collects from and pays into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    funds: Funds,
}

impl Bank {
    pub fn new(funds: Funds) -> Self {
        Self { funds }
    }

    /// The starting pool of the published game: 7, 5 or 4 of each standard
    /// color for 4, 3 or 2 players, and always 5 golden pieces.
    pub fn for_players(n_of_players: usize) -> Option<Self> {
        let standard = match n_of_players {
            2 => 4,
            3 => 5,
            4 => 7,
            _ => return None,
        };
        Some(Self::new(Funds::new(
            standard,
            standard,
            standard,
            standard,
            standard,
            GOLDEN_PIECES,
        )))
    }

    pub fn funds(&self) -> &Funds {
        &self.funds
    }

    pub fn get(&self, piece: Piece) -> u8 {
        self.funds.get(piece)
    }

    /// Whether `request` can be withdrawn.
    ///
    /// Each requested color must ask for exactly 1 or 2 pieces. Taking 2 of a
    /// color needs at least [`MIN_PILE_SIZE_TO_COLLECT_TWO_EQUALS`] in the pile.
    pub fn can_remove(&self, request: &Funds) -> Result<bool, BankError> {
        let mut can_remove = true;
        for (piece, amount) in request.non_zero() {
            let available = self.funds.get(piece);
            let enough = match amount {
                1 => available >= 1,
                2 => available >= MIN_PILE_SIZE_TO_COLLECT_TWO_EQUALS,
                _ => return Err(BankError::UnsupportedWithdrawal { piece, amount }),
            };
            can_remove &= enough;
        }
        Ok(can_remove)
    }

    pub fn remove(&mut self, request: &Funds) -> Result<(), BankError> {
        if !self.can_remove(request)? {
            return Err(BankError::BankInsufficientTokens {
                request: request.clone(),
            });
        }
        self.funds.remove(request)?;
        Ok(())
    }

    /// Pays pieces back into the pool. There is no upper bound here.
    pub fn add(&mut self, amounts: &Funds) -> Result<(), BankError> {
        self.funds.add(amounts)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_default_bank() -> Bank {
        Bank::new(Funds::new(8, 8, 8, 8, 8, 5))
    }

    #[test]
    fn starting_pool_depends_on_the_number_of_players() {
        assert_eq!(
            Bank::for_players(2).unwrap().funds(),
            &Funds::new(4, 4, 4, 4, 4, 5)
        );
        assert_eq!(
            Bank::for_players(3).unwrap().funds(),
            &Funds::new(5, 5, 5, 5, 5, 5)
        );
        assert_eq!(
            Bank::for_players(4).unwrap().funds(),
            &Funds::new(7, 7, 7, 7, 7, 5)
        );
        assert!(Bank::for_players(1).is_none());
        assert!(Bank::for_players(5).is_none());
    }

    #[test]
    fn can_remove_3_pieces() {
        let mut bank = get_default_bank();
        let request = Funds::new_from_list(vec![Piece::Blue, Piece::Red, Piece::White]).unwrap();
        assert_eq!(bank.can_remove(&request), Ok(true));
        bank.remove(&request).unwrap();
        assert_eq!(bank.funds(), &Funds::new(7, 8, 7, 8, 7, 5));
    }

    #[test]
    fn cannot_collect_2_of_the_same_when_the_stack_is_almost_empty() {
        let request = Funds::new_from_list(vec![Piece::Blue, Piece::Blue]).unwrap();

        let bank = Bank::new(Funds::new(1, 1, MIN_PILE_SIZE_TO_COLLECT_TWO_EQUALS - 1, 1, 1, 1));
        assert_eq!(bank.can_remove(&request), Ok(false));

        let mut bank = Bank::new(Funds::new(1, 1, MIN_PILE_SIZE_TO_COLLECT_TWO_EQUALS, 1, 1, 1));
        assert_eq!(bank.can_remove(&request), Ok(true));
        bank.remove(&request).unwrap();
        assert_eq!(
            bank.funds(),
            &Funds::new(1, 1, MIN_PILE_SIZE_TO_COLLECT_TWO_EQUALS - 2, 1, 1, 1)
        );
    }

    #[test]
    fn cannot_remove_when_there_is_not_enough_at_the_bank() {
        let mut bank = Bank::new(Funds::new(1, 1, 0, 1, 1, 1));
        let request = Funds::new_from_list(vec![Piece::Blue, Piece::Red]).unwrap();
        assert_eq!(bank.can_remove(&request), Ok(false));
        assert_eq!(
            bank.remove(&request),
            Err(BankError::BankInsufficientTokens { request })
        );
        assert_eq!(bank.funds(), &Funds::new(1, 1, 0, 1, 1, 1));
    }

    #[test]
    fn only_singles_and_pairs_can_be_withdrawn() {
        let mut bank = get_default_bank();
        let request = Funds::new(3, 0, 0, 0, 0, 0);
        let expected = Err(BankError::UnsupportedWithdrawal {
            piece: Piece::Red,
            amount: 3,
        });
        assert_eq!(bank.can_remove(&request), expected);
        assert_eq!(bank.remove(&request), expected.map(|_| ()));
    }

    #[test]
    fn paying_back_has_no_upper_bound() {
        let mut bank = get_default_bank();
        bank.add(&Funds::new(10, 0, 0, 0, 0, 10)).unwrap();
        assert_eq!(bank.get(Piece::Red), 18);
        assert_eq!(bank.get(Piece::Golden), 15);
    }
}
