//! Actions accepted by the round reducer.

use alloc::string::String;

use crate::hand::Hand;
use crate::result::{Outcome, Stats};
use crate::shoe::Shoe;
use crate::split::SplitHands;

use super::state::Phase;

/// Payload-free tag of an [`Action`], used by the legality table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ActionKind {
    /// See [`Action::PlaceBet`].
    PlaceBet,
    /// See [`Action::ClearBet`].
    ClearBet,
    /// See [`Action::Deal`].
    Deal,
    /// See [`Action::Resolve`].
    Resolve,
    /// See [`Action::Hit`].
    Hit,
    /// See [`Action::Stand`].
    Stand,
    /// See [`Action::Double`].
    Double,
    /// See [`Action::Split`].
    Split,
    /// See [`Action::SplitHit`].
    SplitHit,
    /// See [`Action::SplitStand`].
    SplitStand,
    /// See [`Action::SplitDouble`].
    SplitDouble,
    /// See [`Action::SplitResolve`].
    SplitResolve,
    /// See [`Action::Insure`].
    Insure,
    /// See [`Action::Surrender`].
    Surrender,
    /// See [`Action::DealerDraw`].
    DealerDraw,
    /// See [`Action::NewRound`].
    NewRound,
    /// See [`Action::Reset`].
    Reset,
}

impl ActionKind {
    /// Every action kind, in declaration order.
    pub const ALL: [Self; 17] = [
        Self::PlaceBet,
        Self::ClearBet,
        Self::Deal,
        Self::Resolve,
        Self::Hit,
        Self::Stand,
        Self::Double,
        Self::Split,
        Self::SplitHit,
        Self::SplitStand,
        Self::SplitDouble,
        Self::SplitResolve,
        Self::Insure,
        Self::Surrender,
        Self::DealerDraw,
        Self::NewRound,
        Self::Reset,
    ];
}

/// Sparse settlement patch carried by [`Action::Resolve`].
///
/// `message` and `result` are always written. Every other field is written
/// only when `Some`; `phase` defaults to [`Phase::GameOver`]. `split_hands`
/// is ignored unless the round is split.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resolution {
    /// Status line.
    pub message: String,
    /// Outcome to record; `None` when the round continues.
    pub result: Option<Outcome>,
    /// Bankroll after settlement.
    pub chips: Option<u64>,
    /// Whether the hole card is visible.
    pub dealer_revealed: Option<bool>,
    /// Session stats after settlement.
    pub stats: Option<Stats>,
    /// Split hands with their results.
    pub split_hands: Option<SplitHands>,
    /// Phase to move to.
    pub phase: Option<Phase>,
}

impl Resolution {
    /// Creates a patch writing only `message` and `result`.
    #[must_use]
    pub fn new(message: impl Into<String>, result: Option<Outcome>) -> Self {
        Self {
            message: message.into(),
            result,
            chips: None,
            dealer_revealed: None,
            stats: None,
            split_hands: None,
            phase: None,
        }
    }

    /// Creates a patch that hands the round to `phase` without settling it.
    #[must_use]
    pub fn proceed(message: impl Into<String>, phase: Phase) -> Self {
        Self::new(message, None).with_phase(phase)
    }

    /// Also writes the bankroll.
    #[must_use]
    pub const fn with_chips(mut self, chips: u64) -> Self {
        self.chips = Some(chips);
        self
    }

    /// Also writes the hole card visibility.
    #[must_use]
    pub const fn with_dealer_revealed(mut self, revealed: bool) -> Self {
        self.dealer_revealed = Some(revealed);
        self
    }

    /// Also writes the session stats.
    #[must_use]
    pub const fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Also writes the split hands.
    #[must_use]
    pub fn with_split_hands(mut self, hands: SplitHands) -> Self {
        self.split_hands = Some(hands);
        self
    }

    /// Moves to `phase` instead of [`Phase::GameOver`].
    #[must_use]
    pub const fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }
}

/// A discrete event dispatched into the round reducer.
///
/// Card-carrying actions hold the full hand and the shoe *after* the draw;
/// the caller draws, the reducer commits.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Adds to the main wager if the bankroll covers the new total.
    PlaceBet {
        /// Chips to add.
        amount: u64,
    },
    /// Withdraws the main wager.
    ClearBet,
    /// Takes the wager and installs the initial hands.
    Deal {
        /// Shoe after the initial four cards.
        shoe: Shoe,
        /// Player's first two cards.
        player_hand: Hand,
        /// Dealer's up card and hole card.
        dealer_hand: Hand,
        /// Whether `shoe` was freshly built for this deal.
        fresh_shoe: bool,
    },
    /// Commits a settlement or hands the round to another phase.
    Resolve(Resolution),
    /// Player takes a card.
    Hit {
        /// Hand after the draw.
        player_hand: Hand,
        /// Shoe after the draw.
        shoe: Shoe,
        /// Phase the caller decided on, if the hit ends the turn.
        phase: Option<Phase>,
    },
    /// Player stands; the dealer's turn begins.
    Stand,
    /// Player doubles the wager and takes exactly one card.
    Double {
        /// Hand after the draw.
        player_hand: Hand,
        /// Shoe after the draw.
        shoe: Shoe,
    },
    /// Player splits a pair into two hands.
    Split {
        /// Seeded split hands.
        split_hands: SplitHands,
        /// Shoe after the two draws.
        shoe: Shoe,
    },
    /// Active split hand takes a card.
    SplitHit {
        /// Active hand after the draw.
        hand: Hand,
        /// Shoe after the draw.
        shoe: Shoe,
    },
    /// Active split hand stands.
    SplitStand,
    /// Active split hand doubles, takes one card and stands.
    SplitDouble {
        /// Active hand after the draw.
        hand: Hand,
        /// Shoe after the draw.
        shoe: Shoe,
    },
    /// Commits both split hands without a dealer turn.
    SplitResolve {
        /// Split hands with their results.
        split_hands: SplitHands,
        /// Bankroll after settlement.
        chips: u64,
        /// Session stats after settlement.
        stats: Stats,
        /// Overall outcome.
        result: Option<Outcome>,
        /// Status line.
        message: String,
    },
    /// Takes (`amount > 0`) or declines (`amount == 0`) insurance.
    Insure {
        /// Insurance wager.
        amount: u64,
    },
    /// Player surrenders half the wager.
    Surrender,
    /// Dealer takes a card.
    DealerDraw {
        /// Dealer hand after the draw.
        dealer_hand: Hand,
        /// Shoe after the draw.
        shoe: Shoe,
    },
    /// Clears the table for the next round, keeping the shoe.
    NewRound,
    /// Starts a new session with a fresh shoe and zeroed stats.
    Reset {
        /// Bankroll for the new session; keeps the current chips if `None`.
        bankroll: Option<u64>,
    },
}

impl Action {
    /// Returns the payload-free tag of this action.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::PlaceBet { .. } => ActionKind::PlaceBet,
            Self::ClearBet => ActionKind::ClearBet,
            Self::Deal { .. } => ActionKind::Deal,
            Self::Resolve(_) => ActionKind::Resolve,
            Self::Hit { .. } => ActionKind::Hit,
            Self::Stand => ActionKind::Stand,
            Self::Double { .. } => ActionKind::Double,
            Self::Split { .. } => ActionKind::Split,
            Self::SplitHit { .. } => ActionKind::SplitHit,
            Self::SplitStand => ActionKind::SplitStand,
            Self::SplitDouble { .. } => ActionKind::SplitDouble,
            Self::SplitResolve { .. } => ActionKind::SplitResolve,
            Self::Insure { .. } => ActionKind::Insure,
            Self::Surrender => ActionKind::Surrender,
            Self::DealerDraw { .. } => ActionKind::DealerDraw,
            Self::NewRound => ActionKind::NewRound,
            Self::Reset { .. } => ActionKind::Reset,
        }
    }
}
