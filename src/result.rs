//! Round outcome and running statistics.

/// Result of a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Natural blackjack, paid at the table's blackjack ratio.
    Blackjack,
    /// Regular win, paid even money.
    Win,
    /// Tie; the stake is returned.
    Push,
    /// Loss, bust or surrender.
    Lose,
}

/// Cumulative win/loss/push counters for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Hands won, naturals included.
    pub wins: u32,
    /// Hands lost, surrenders included.
    pub losses: u32,
    /// Hands pushed.
    pub pushes: u32,
}

impl Stats {
    /// Returns these stats with one more hand counted under `outcome`.
    #[must_use]
    pub const fn record(mut self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Blackjack | Outcome::Win => self.wins += 1,
            Outcome::Push => self.pushes += 1,
            Outcome::Lose => self.losses += 1,
        }
        self
    }

    /// Total number of hands resolved.
    #[must_use]
    pub const fn hands(&self) -> u32 {
        self.wins + self.losses + self.pushes
    }
}

/// Chips settled for one hand or one whole round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Overall outcome. For a split round this is derived from `net`.
    pub outcome: Outcome,
    /// Chips returned to the bankroll, stake included.
    pub returned: u64,
    /// Profit or loss relative to everything wagered.
    pub net: i64,
}
