//! Pair splitting.
//!
//! A split turns one two-card pair into exactly two hands, each with its own
//! wager equal to the original bet. Re-splitting is not supported, so the
//! pair is a fixed `[SplitHand; 2]`.

use crate::card::Card;
use crate::error::ActionError;
use crate::hand::{Hand, HandValue};
use crate::options::GameOptions;
use crate::payout::{determine_outcome, net, payout};
use crate::result::{Outcome, Settlement, Stats};
use crate::shoe::Shoe;

/// The two hands produced by a split.
pub type SplitHands = [SplitHand; 2];

/// One of the two hands produced by a split.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitHand {
    /// Cards in the hand.
    pub cards: Hand,
    /// Wager on this hand.
    pub bet: u64,
    /// Outcome once settled.
    pub result: Option<Outcome>,
    /// Whether the player has finished this hand.
    pub stood: bool,
}

impl SplitHand {
    fn seeded(card: Card, drawn: Card, bet: u64) -> Self {
        let mut cards = Hand::from_split(card);
        cards.add_card(drawn);
        Self {
            cards,
            bet,
            result: None,
            stood: false,
        }
    }

    /// Evaluates this hand. A 21 here is never a natural.
    #[must_use]
    pub fn value(&self) -> HandValue {
        self.cards.value()
    }
}

/// Checks whether `hand` may be split with `chips` left in the bankroll.
///
/// # Errors
///
/// Returns [`ActionError::CannotSplit`] if the hand is already split or is not
/// a two-card pair, and [`ActionError::InsufficientFunds`] if the bankroll
/// cannot cover a second wager of `bet`.
pub fn can_split(hand: &Hand, is_split: bool, bet: u64, chips: u64) -> Result<(), ActionError> {
    if is_split || !hand.is_pair() {
        return Err(ActionError::CannotSplit);
    }
    if chips < bet {
        return Err(ActionError::InsufficientFunds);
    }
    Ok(())
}

/// Splits a pair, drawing one fresh card onto each half.
///
/// Returns the two seeded hands and the shoe after the draws.
///
/// # Errors
///
/// Returns [`ActionError::CannotSplit`] if `hand` is not a pair and
/// [`ActionError::NoCards`] if the shoe runs out.
pub fn split_pair(hand: &Hand, bet: u64, shoe: &Shoe) -> Result<(SplitHands, Shoe), ActionError> {
    let [first, second] = hand.cards() else {
        return Err(ActionError::CannotSplit);
    };

    let mut shoe = shoe.clone();
    let first_draw = shoe.draw().ok_or(ActionError::NoCards)?;
    let second_draw = shoe.draw().ok_or(ActionError::NoCards)?;

    Ok((
        [
            SplitHand::seeded(*first, first_draw, bet),
            SplitHand::seeded(*second, second_draw, bet),
        ],
        shoe,
    ))
}

/// Returns whether split aces stand on their single drawn card.
#[must_use]
pub fn aces_stand_immediately(hands: &SplitHands, options: &GameOptions) -> bool {
    options.split_aces_receive_one_card
        && hands
            .iter()
            .all(|hand| hand.cards.up_card().is_some_and(|card| card.rank.is_ace()))
}

/// Returns whether the active split hand may double.
#[must_use]
pub fn can_double(hand: &SplitHand, chips: u64, options: &GameOptions) -> bool {
    options.double_after_split
        && !hand.stood
        && hand.cards.len() == 2
        && options.double.allows(hand.value().total)
        && chips >= hand.bet
}

/// Settles both split hands independently against the dealer.
///
/// Returns the hands with results filled in, the updated stats and the
/// round settlement. The overall outcome follows the net result.
#[must_use]
pub fn settle_split(
    hands: &SplitHands,
    dealer: &Hand,
    stats: Stats,
    options: &GameOptions,
) -> (SplitHands, Stats, Settlement) {
    let dealer_value = dealer.value();
    let mut settled = hands.clone();
    let mut stats = stats;
    let mut returned = 0;
    let mut wagered = 0;

    for hand in &mut settled {
        let outcome = determine_outcome(&hand.value(), &dealer_value);
        returned += payout(outcome, hand.bet, options.blackjack_pays, options.blackjack_rounding);
        wagered += hand.bet;
        hand.result = Some(outcome);
        stats = stats.record(outcome);
    }

    let net = net(returned, wagered);
    let outcome = match net.signum() {
        1 => Outcome::Win,
        -1 => Outcome::Lose,
        _ => Outcome::Push,
    };

    (
        settled,
        stats,
        Settlement {
            outcome,
            returned,
            net,
        },
    )
}
