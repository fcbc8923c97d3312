use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bank::{Bank, BankError};
use super::funds::{Funds, FundsError};
use super::piece::Piece;
use super::player::{Player, PlayerError};
use super::production_card::{Card, CardId, ProductionCard};

/// One move a player can make on their turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// One piece each of three different standard colors.
    CollectThreeUnique([Piece; 3]),
    /// Two pieces of one standard color.
    CollectTwoSame(Piece),
    /// Put a face-up card aside, and take a golden piece if one is available.
    ReserveCard(CardId),
    /// Buy a face-up or reserved card. The pieces are golden pieces the player
    /// chooses to spend, per color, in place of regular ones.
    BuyCard(CardId, Funds),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionFail {
    #[error("golden pieces cannot be collected")]
    CollectedGolden,
    #[error("{0} was asked for more than once")]
    RepeatedPiece(Piece),
    #[error("the card this action refers to was not given")]
    CardMissing,
    #[error("player cannot afford card {0}")]
    CannotAfford(CardId),
    #[error("golden collateral {0} cannot be paid")]
    InvalidCollateral(Funds),
    #[error(transparent)]
    Funds(#[from] FundsError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Player(#[from] PlayerError),
}

/// What an action did, for the game log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    TokensCollected(Funds),
    CardReserved { card: CardId, golden_received: bool },
    CardPurchased { card: CardId, paid: Funds },
}

impl Action {
    pub fn card_id(&self) -> Option<CardId> {
        match self {
            Action::ReserveCard(card_id) | Action::BuyCard(card_id, _) => Some(*card_id),
            Action::CollectThreeUnique(_) | Action::CollectTwoSame(_) => None,
        }
    }

    /// Whether `player` may perform this action against `bank` right now.
    ///
    /// `card` is the card the action refers to, if any. Nothing is mutated.
    pub fn can_perform(&self, player: &Player, bank: &Bank, card: Option<&Card>) -> bool {
        match self {
            Action::CollectThreeUnique(pieces) => match unique_pieces_request(pieces) {
                Ok(request) => can_collect(player, bank, &request),
                Err(_) => false,
            },
            Action::CollectTwoSame(piece) => match same_pieces_request(*piece) {
                Ok(request) => can_collect(player, bank, &request),
                Err(_) => false,
            },
            Action::ReserveCard(_) => card.is_some() && player.can_reserve_card(),
            Action::BuyCard(_, collateral) => match card {
                Some(card) => purchase_payment(player, &card.data, collateral).is_some(),
                None => false,
            },
        }
    }

    /// Applies the action. Callers check [`Action::can_perform`] first; an
    /// illegal call fails before anything is changed.
    pub fn perform(
        &self,
        player: &mut Player,
        bank: &mut Bank,
        card: Option<&Card>,
    ) -> Result<ActionOutcome, ActionFail> {
        match self {
            Action::CollectThreeUnique(pieces) => {
                let request = unique_pieces_request(pieces)?;
                collect(player, bank, request)
            }
            Action::CollectTwoSame(piece) => {
                let request = same_pieces_request(*piece)?;
                collect(player, bank, request)
            }
            Action::ReserveCard(_) => {
                let card = card.ok_or(ActionFail::CardMissing)?;
                reserve_card(player, bank, card)
            }
            Action::BuyCard(_, collateral) => {
                let card = card.ok_or(ActionFail::CardMissing)?;
                buy_card(player, bank, card, collateral)
            }
        }
    }
}

fn unique_pieces_request(pieces: &[Piece; 3]) -> Result<Funds, ActionFail> {
    for (n, piece) in pieces.iter().enumerate() {
        if piece.is_wildcard() {
            return Err(ActionFail::CollectedGolden);
        }
        if pieces[..n].contains(piece) {
            return Err(ActionFail::RepeatedPiece(*piece));
        }
    }
    Ok(Funds::new_from_list(pieces.to_vec())?)
}

fn same_pieces_request(piece: Piece) -> Result<Funds, ActionFail> {
    if piece.is_wildcard() {
        return Err(ActionFail::CollectedGolden);
    }
    Ok(Funds::single(piece, 2))
}

fn can_collect(player: &Player, bank: &Bank, request: &Funds) -> bool {
    bank.can_remove(request).unwrap_or(false) && player.can_add_token(request)
}

fn collect(player: &mut Player, bank: &mut Bank, request: Funds) -> Result<ActionOutcome, ActionFail> {
    if !player.can_add_token(&request) {
        return Err(PlayerError::PlayerTokenCapExceeded {
            held: player.funds().total(),
            adding: request.total(),
        }
        .into());
    }
    bank.remove(&request)?;
    player.add_token(&request)?;
    Ok(ActionOutcome::TokensCollected(request))
}

fn reserve_card(player: &mut Player, bank: &mut Bank, card: &Card) -> Result<ActionOutcome, ActionFail> {
    player.add_to_reserved_cards(card.clone())?;

    // The golden piece is a bonus; missing out on it does not undo the reservation.
    let golden = Funds::single(Piece::Golden, 1);
    let golden_received =
        bank.can_remove(&golden).unwrap_or(false) && player.can_add_token(&golden);
    if golden_received {
        bank.remove(&golden)?;
        player.add_token(&golden)?;
    }

    Ok(ActionOutcome::CardReserved {
        card: card.uid,
        golden_received,
    })
}

/// The pieces (regular and golden) the player hands to the bank for `card`.
///
/// Bonuses are applied first, then the chosen golden collateral, then regular
/// pieces; each step only happens if some cost is left. `None` when the
/// player cannot pay that way.
pub fn purchase_payment(player: &Player, card: &ProductionCard, collateral: &Funds) -> Option<Funds> {
    if collateral.get(Piece::Golden) > 0 || !player.can_purchase_card(card) {
        return None;
    }

    let remaining = card.cost.saturating_sub(player.bonuses());
    if remaining.is_empty() {
        return Some(Funds::empty());
    }

    let goldens = collateral.total();
    if goldens > u16::from(player.funds().get(Piece::Golden)) {
        return None;
    }
    let golden_payment = Funds::single(Piece::Golden, u8::try_from(goldens).ok()?);

    let remaining = remaining.saturating_sub(collateral);
    let payment = if remaining.is_empty() {
        golden_payment
    } else {
        (remaining + golden_payment).ok()?
    };

    if payment <= *player.funds() {
        Some(payment)
    } else {
        None
    }
}

fn buy_card(
    player: &mut Player,
    bank: &mut Bank,
    card: &Card,
    collateral: &Funds,
) -> Result<ActionOutcome, ActionFail> {
    let paid = match purchase_payment(player, &card.data, collateral) {
        Some(payment) => payment,
        None if !player.can_purchase_card(&card.data) => {
            return Err(ActionFail::CannotAfford(card.uid))
        }
        None => return Err(ActionFail::InvalidCollateral(collateral.clone())),
    };

    player.remove_token(&paid)?;
    bank.add(&paid)?;

    let card = player
        .take_reserved_card(&card.uid)
        .unwrap_or_else(|| card.clone());
    let card_id = card.uid;
    player.add_to_owned_cards(card)?;

    Ok(ActionOutcome::CardPurchased {
        card: card_id,
        paid,
    })
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Action::CollectThreeUnique([a, b, c]) => write!(f, "collect {}, {} and {}", a, b, c),
            Action::CollectTwoSame(piece) => write!(f, "collect two {}", piece),
            Action::ReserveCard(card_id) => write!(f, "reserve card {}", card_id),
            Action::BuyCard(card_id, collateral) if collateral.is_empty() => {
                write!(f, "buy card {}", card_id)
            }
            Action::BuyCard(card_id, collateral) => {
                write!(f, "buy card {} with golden for [{}]", card_id, collateral)
            }
        }
    }
}
