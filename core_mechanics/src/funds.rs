use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::piece::Piece;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FundsError {
    #[error("invalid amount {amount} of {piece}")]
    InvalidAmount { piece: Piece, amount: i32 },
    #[error("not enough {piece}: have {available}, need {requested}")]
    InsufficientBalance {
        piece: Piece,
        available: u8,
        requested: u8,
    },
}

/// A ledger of token counts, one entry per [`Piece`].
///
/// Every color is always present and no entry can go below zero. `add` and
/// `remove` validate the whole delta before touching any entry, so a failed
/// call leaves the bag unchanged.
///
/// Ordering is elementwise: `a <= b` holds when every color of `a` is at most
/// the same color of `b`. Two bags that disagree in direction are unordered.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(from = "RawFunds")]
pub struct Funds {
    funds: BTreeMap<Piece, u8>,
}

/// Wire form of [`Funds`]. Colors left out read as zero.
#[derive(Deserialize)]
struct RawFunds {
    funds: BTreeMap<Piece, u8>,
}

impl From<RawFunds> for Funds {
    fn from(raw: RawFunds) -> Self {
        let mut funds = Funds::empty();
        funds.funds.extend(raw.funds);
        funds
    }
}

impl Default for Funds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Funds {
    pub fn new(red: u8, green: u8, blue: u8, brown: u8, white: u8, golden: u8) -> Self {
        Self {
            funds: BTreeMap::from([
                (Piece::Red, red),
                (Piece::Green, green),
                (Piece::Blue, blue),
                (Piece::Brown, brown),
                (Piece::White, white),
                (Piece::Golden, golden),
            ]),
        }
    }

    pub fn empty() -> Self {
        Self::new(0, 0, 0, 0, 0, 0)
    }

    /// A bag holding `amount` of one color and nothing else.
    pub fn single(piece: Piece, amount: u8) -> Self {
        let mut new_funds = Self::empty();
        new_funds.funds.insert(piece, amount);
        new_funds
    }

    /// Builds a bag from `(piece, amount)` pairs; repeated pieces accumulate.
    pub fn new_from<I>(amounts: I) -> Result<Self, FundsError>
    where
        I: IntoIterator<Item = (Piece, u8)>,
    {
        let mut new_funds = Self::empty();
        for (piece, amount) in amounts {
            new_funds.add(&Self::single(piece, amount))?;
        }
        Ok(new_funds)
    }

    pub fn new_from_list(pieces: Vec<Piece>) -> Result<Self, FundsError> {
        Self::new_from(pieces.into_iter().map(|p| (p, 1)))
    }

    /// Builds a delta bag from signed amounts, rejecting negative or oversized entries.
    pub fn from_deltas(deltas: &[(Piece, i32)]) -> Result<Self, FundsError> {
        let mut new_funds = Self::empty();
        for &(piece, amount) in deltas {
            let next = u8::try_from(amount)
                .ok()
                .and_then(|amount| new_funds.get(piece).checked_add(amount))
                .ok_or(FundsError::InvalidAmount { piece, amount })?;
            new_funds.funds.insert(piece, next);
        }
        Ok(new_funds)
    }

    pub fn get(&self, piece: Piece) -> u8 {
        *self.funds.get(&piece).unwrap_or(&0)
    }

    /// Iterates every color, in [`Piece`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, u8)> + '_ {
        self.funds.iter().map(|(piece, amount)| (*piece, *amount))
    }

    /// Iterates the colors with a positive count, in [`Piece`] order.
    pub fn non_zero(&self) -> impl Iterator<Item = (Piece, u8)> + '_ {
        self.iter().filter(|(_, amount)| *amount > 0)
    }

    pub fn total(&self) -> u16 {
        self.funds.values().map(|amount| u16::from(*amount)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn add(&mut self, deltas: &Funds) -> Result<(), FundsError> {
        let mut updated = self.funds.clone();
        for (piece, amount) in deltas.iter() {
            let current = self.get(piece);
            let next = current
                .checked_add(amount)
                .ok_or(FundsError::InvalidAmount {
                    piece,
                    amount: i32::from(amount),
                })?;
            updated.insert(piece, next);
        }
        self.funds = updated;
        Ok(())
    }

    pub fn remove(&mut self, deltas: &Funds) -> Result<(), FundsError> {
        let mut updated = self.funds.clone();
        for (piece, amount) in deltas.iter() {
            let available = self.get(piece);
            if amount > available {
                return Err(FundsError::InsufficientBalance {
                    piece,
                    available,
                    requested: amount,
                });
            }
            updated.insert(piece, available - amount);
        }
        self.funds = updated;
        Ok(())
    }

    /// Per-color difference, floored at zero. For working copies of a cost,
    /// never for moving pieces around.
    pub fn saturating_sub(&self, rhs: &Funds) -> Funds {
        Funds {
            funds: self
                .iter()
                .map(|(piece, amount)| (piece, amount.saturating_sub(rhs.get(piece))))
                .collect(),
        }
    }
}

impl PartialOrd for Funds {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let mut has_less = false;
        let mut has_greater = false;
        for piece in Piece::ALL {
            match self.get(piece).cmp(&other.get(piece)) {
                Ordering::Less => has_less = true,
                Ordering::Greater => has_greater = true,
                Ordering::Equal => {}
            }
        }
        match (has_less, has_greater) {
            (false, false) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (true, true) => None,
        }
    }
}

impl From<Funds> for Vec<Piece> {
    fn from(funds: Funds) -> Self {
        let mut pieces: Vec<Piece> = vec![];
        for (color, quantity) in funds.iter() {
            for _ in 0..quantity {
                pieces.push(color)
            }
        }
        pieces
    }
}

impl ops::Sub<Funds> for Funds {
    type Output = Result<Self, FundsError>;

    fn sub(self, rhs: Funds) -> Self::Output {
        let mut funds_remaining = self;
        funds_remaining.remove(&rhs)?;
        Ok(funds_remaining)
    }
}

impl ops::Add<Funds> for Funds {
    type Output = Result<Self, FundsError>;

    fn add(self, rhs: Funds) -> Self::Output {
        let mut new_funds = self;
        Funds::add(&mut new_funds, &rhs)?;
        Ok(new_funds)
    }
}

impl fmt::Display for Funds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(piece, amount)| format!("{}{}", piece.code(), amount))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
