//! Round state types.

use alloc::string::String;

use crate::hand::Hand;
use crate::result::{Outcome, Stats};
use crate::shoe::Shoe;
use crate::split::{SplitHand, SplitHands};

/// Round phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Phase {
    /// Fresh session, nothing wagered yet.
    Idle,
    /// Accepting bets for the next round.
    Betting,
    /// Initial cards are out; waiting for the natural check.
    Dealing,
    /// Waiting for the player's decision on the main hand.
    PlayerTurn,
    /// Playing the two hands of a split, in order.
    Splitting,
    /// Doubled hand received its card; waiting for settlement.
    Doubling,
    /// Dealer shows an ace; waiting for the insurance decision.
    InsuranceOffer,
    /// Player surrendered; waiting for settlement.
    Surrendering,
    /// Dealer plays out the hand.
    DealerTurn,
    /// Round settled, waiting for the next one.
    Resolving,
    /// Round settled, waiting for the next one or a reset.
    GameOver,
}

impl Phase {
    /// Number of phases.
    pub const COUNT: usize = 11;

    /// Returns whether a round is settled in this phase.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Resolving | Self::GameOver)
    }

    /// Returns whether money is committed to a round in play.
    #[must_use]
    pub const fn is_in_play(self) -> bool {
        !matches!(
            self,
            Self::Idle | Self::Betting | Self::Resolving | Self::GameOver
        )
    }
}

/// Complete state of a single-seat blackjack session.
///
/// Values of this type are snapshots: [`transition`](super::transition)
/// consumes one and returns the next.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundState {
    /// Current phase.
    pub phase: Phase,
    /// Undealt cards.
    pub shoe: Shoe,
    /// Card count of the shoe when it was first dealt from. 0 until then.
    pub shoe_size: usize,
    /// Whether the shoe has been dealt past the cut card.
    pub cut_card_reached: bool,
    /// Fraction of the shoe dealt before the cut card.
    pub penetration: f64,
    /// Player hand. While split, mirrors the active split hand.
    pub player_hand: Hand,
    /// Dealer hand; the second card is the hole card.
    pub dealer_hand: Hand,
    /// The two hands of a split, if any.
    pub split_hands: Option<SplitHands>,
    /// Index of the split hand being played.
    pub active_hand_index: usize,
    /// Whether the round is split.
    pub is_split: bool,
    /// Bankroll not currently wagered.
    pub chips: u64,
    /// Main wager (per hand while split).
    pub bet: u64,
    /// Insurance side wager.
    pub insurance_bet: u64,
    /// Whether the dealer's hole card is visible.
    pub dealer_revealed: bool,
    /// Outcome of the last settled round.
    pub result: Option<Outcome>,
    /// Session statistics.
    pub stats: Stats,
    /// Status line for display.
    pub message: String,
}

impl RoundState {
    /// Creates a new session with `chips` and an empty shoe.
    #[must_use]
    pub fn new(chips: u64, penetration: f64) -> Self {
        Self {
            phase: Phase::Idle,
            shoe: Shoe::empty(),
            shoe_size: 0,
            cut_card_reached: false,
            penetration,
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
            split_hands: None,
            active_hand_index: 0,
            is_split: false,
            chips,
            bet: 0,
            insurance_bet: 0,
            dealer_revealed: false,
            result: None,
            stats: Stats::default(),
            message: String::from("Place your bet"),
        }
    }

    /// Returns the split hand being played, if split.
    #[must_use]
    pub fn active_split_hand(&self) -> Option<&SplitHand> {
        self.split_hands
            .as_ref()
            .and_then(|hands| hands.get(self.active_hand_index))
    }

    /// Total chips wagered on the table right now.
    #[must_use]
    pub fn wagered(&self) -> u64 {
        let main = self
            .split_hands
            .as_ref()
            .map_or(self.bet, |hands| hands.iter().map(|hand| hand.bet).sum());
        main + self.insurance_bet
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(0, 0.75)
    }
}
