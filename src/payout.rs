//! Outcome determination and chip payouts.
//!
//! Every amount here is what goes *back* to the bankroll. Stakes are taken
//! out when they are wagered (deal, double, split, insurance), so a loss
//! returns zero.

use crate::hand::{Hand, HandValue};
use crate::options::{GameOptions, RoundingMode};
use crate::result::{Outcome, Settlement};

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> u64 {
    match mode {
        RoundingMode::Up => amount.ceil() as u64,
        RoundingMode::Down => amount.floor() as u64,
        RoundingMode::Nearest => amount.round() as u64,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> u64 {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as u64,
        RoundingMode::Down => libm::floor(amount) as u64,
        RoundingMode::Nearest => libm::round(amount) as u64,
    }
}

/// Decides a player hand against the dealer's final hand.
#[must_use]
pub const fn determine_outcome(player: &HandValue, dealer: &HandValue) -> Outcome {
    if player.is_bust {
        return Outcome::Lose;
    }
    match (player.is_blackjack, dealer.is_blackjack) {
        (true, true) => return Outcome::Push,
        (true, false) => return Outcome::Blackjack,
        (false, true) => return Outcome::Lose,
        (false, false) => {}
    }
    if dealer.is_bust || player.total > dealer.total {
        Outcome::Win
    } else if player.total < dealer.total {
        Outcome::Lose
    } else {
        Outcome::Push
    }
}

/// Chips returned for `outcome` on a wager of `bet`.
///
/// # Example
///
/// ```
/// use bjtable::payout::payout;
/// use bjtable::{Outcome, RoundingMode};
///
/// assert_eq!(payout(Outcome::Blackjack, 100, 1.5, RoundingMode::Nearest), 250);
/// assert_eq!(payout(Outcome::Win, 100, 1.5, RoundingMode::Nearest), 200);
/// assert_eq!(payout(Outcome::Push, 100, 1.5, RoundingMode::Nearest), 100);
/// assert_eq!(payout(Outcome::Lose, 100, 1.5, RoundingMode::Nearest), 0);
/// ```
#[must_use]
pub fn payout(outcome: Outcome, bet: u64, ratio: f64, rounding: RoundingMode) -> u64 {
    match outcome {
        Outcome::Blackjack => {
            #[expect(
                clippy::cast_precision_loss,
                reason = "f64 has sufficient precision for chip amounts"
            )]
            let winnings = round_amount(bet as f64 * ratio, rounding);
            bet + winnings
        }
        Outcome::Win => bet * 2,
        Outcome::Push => bet,
        Outcome::Lose => 0,
    }
}

/// Chips returned for an insurance wager: 2:1 plus the stake when the dealer
/// holds a natural, nothing otherwise.
#[must_use]
pub const fn insurance_payout(insurance_bet: u64, dealer_blackjack: bool) -> u64 {
    if dealer_blackjack { insurance_bet * 3 } else { 0 }
}

/// Chips refunded on surrender. Odd bets round down: 25 surrenders for 12.
#[must_use]
pub const fn surrender_refund(bet: u64) -> u64 {
    bet / 2
}

#[expect(clippy::cast_possible_wrap, reason = "chip totals fit in i64")]
pub(crate) const fn net(returned: u64, wagered: u64) -> i64 {
    returned as i64 - wagered as i64
}

/// Settles an unsplit hand, including any insurance side wager.
#[must_use]
pub fn settle_hand(
    player: &Hand,
    dealer: &Hand,
    bet: u64,
    insurance_bet: u64,
    options: &GameOptions,
) -> Settlement {
    let dealer_value = dealer.value();
    let outcome = determine_outcome(&player.value(), &dealer_value);

    let returned = payout(outcome, bet, options.blackjack_pays, options.blackjack_rounding)
        + insurance_payout(insurance_bet, dealer_value.is_blackjack);

    Settlement {
        outcome,
        returned,
        net: net(returned, bet + insurance_bet),
    }
}
