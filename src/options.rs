//! House rules.

/// Conditions under which doubling down is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum DoubleOption {
    /// Double down allowed on any two cards.
    #[default]
    Any,
    /// Double down allowed only on 9 or 10.
    NineOrTen,
    /// Double down allowed only on 9 through 11.
    NineThrough11,
    /// Double down allowed only on 9 through 15.
    NineThrough15,
    /// Double down not allowed.
    None,
}

impl DoubleOption {
    /// Returns whether a hand totalling `total` may double.
    #[must_use]
    pub const fn allows(self, total: u8) -> bool {
        match self {
            Self::Any => true,
            Self::NineOrTen => total == 9 || total == 10,
            Self::NineThrough11 => total >= 9 && total <= 11,
            Self::NineThrough15 => total >= 9 && total <= 15,
            Self::None => false,
        }
    }
}

/// Rounding mode for blackjack payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest, halves away from zero.
    #[default]
    Nearest,
}

/// House rules for a table.
///
/// Use the builder methods to customize:
///
/// ```
/// use bjtable::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(8)
///     .with_blackjack_pays(1.2)
///     .with_dealer_hits_soft_17(true);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOptions {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Whether the dealer draws on soft 17.
    pub dealer_hits_soft_17: bool,
    /// Natural blackjack payout ratio (1.5 for 3:2, 1.2 for 6:5).
    pub blackjack_pays: f64,
    /// Rounding applied to fractional blackjack payouts.
    pub blackjack_rounding: RoundingMode,
    /// Double down conditions.
    pub double: DoubleOption,
    /// Whether split hands may double.
    pub double_after_split: bool,
    /// Whether split aces receive exactly one card each and stand.
    pub split_aces_receive_one_card: bool,
    /// Whether surrender is allowed.
    pub surrender: bool,
    /// Whether insurance is offered against a dealer ace.
    pub insurance: bool,
    /// Fraction of the shoe dealt before the cut card. 0 disables it.
    pub penetration: f64,
    /// Bankroll for a new session.
    pub starting_chips: u64,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 6,
            dealer_hits_soft_17: false,
            blackjack_pays: 1.5,
            blackjack_rounding: RoundingMode::Nearest,
            double: DoubleOption::Any,
            double_after_split: true,
            split_aces_receive_one_card: true,
            surrender: true,
            insurance: true,
            penetration: 0.75,
            starting_chips: 1000,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(2);
    /// assert_eq!(options.decks, 2);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets whether the dealer hits soft 17.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_dealer_hits_soft_17(true);
    /// assert!(options.dealer_hits_soft_17);
    /// ```
    #[must_use]
    pub const fn with_dealer_hits_soft_17(mut self, hits: bool) -> Self {
        self.dealer_hits_soft_17 = hits;
        self
    }

    /// Sets the blackjack payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_blackjack_pays(1.2);
    /// assert_eq!(options.blackjack_pays, 1.2);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{GameOptions, RoundingMode};
    ///
    /// let options = GameOptions::default().with_blackjack_rounding(RoundingMode::Down);
    /// assert_eq!(options.blackjack_rounding, RoundingMode::Down);
    /// ```
    #[must_use]
    pub const fn with_blackjack_rounding(mut self, mode: RoundingMode) -> Self {
        self.blackjack_rounding = mode;
        self
    }

    /// Sets the double down conditions.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{DoubleOption, GameOptions};
    ///
    /// let options = GameOptions::default().with_double(DoubleOption::NineThrough11);
    /// assert_eq!(options.double, DoubleOption::NineThrough11);
    /// ```
    #[must_use]
    pub const fn with_double(mut self, double: DoubleOption) -> Self {
        self.double = double;
        self
    }

    /// Sets whether split hands may double.
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets whether split aces receive only one card.
    #[must_use]
    pub const fn with_split_aces_receive_one_card(mut self, one_card: bool) -> Self {
        self.split_aces_receive_one_card = one_card;
        self
    }

    /// Sets whether surrender is allowed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_surrender(false);
    /// assert!(!options.surrender);
    /// ```
    #[must_use]
    pub const fn with_surrender(mut self, allowed: bool) -> Self {
        self.surrender = allowed;
        self
    }

    /// Sets whether insurance is offered.
    #[must_use]
    pub const fn with_insurance(mut self, offered: bool) -> Self {
        self.insurance = offered;
        self
    }

    /// Sets the shoe penetration.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_penetration(0.8);
    /// assert_eq!(options.penetration, 0.8);
    /// ```
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets the starting bankroll.
    #[must_use]
    pub const fn with_starting_chips(mut self, chips: u64) -> Self {
        self.starting_chips = chips;
        self
    }
}
