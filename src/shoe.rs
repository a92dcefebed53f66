//! Multi-deck shoe and cut-card tracking.

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, Rank, Suit};

/// Undealt cards. The last element is the top of the shoe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    /// Creates an empty shoe.
    #[must_use]
    pub const fn empty() -> Self {
        Self { cards: Vec::new() }
    }

    /// Builds and shuffles a shoe of `num_decks` standard decks.
    ///
    /// Card ids run from `0` to `num_decks * 52 - 1` in build order.
    pub fn build<R: Rng + ?Sized>(num_decks: u8, rng: &mut R) -> Self {
        let mut cards = Vec::with_capacity(num_decks as usize * DECK_SIZE);
        let mut id = 0;

        for _ in 0..num_decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit, id));
                    id += 1;
                }
            }
        }

        cards.shuffle(rng);
        Self { cards }
    }

    /// Creates a shoe that deals `draws` in the given order.
    ///
    /// Useful for replaying a recorded shoe.
    #[must_use]
    pub fn from_draws(draws: &[Card]) -> Self {
        let mut cards = draws.to_vec();
        cards.reverse();
        Self { cards }
    }

    /// Removes and returns the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Returns the top card without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Number of undealt cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the shoe is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Returns whether the cut card has been dealt past.
///
/// The cut card sits at `penetration` of the shoe, so it is reached once the
/// remaining fraction falls strictly below `1 - penetration`. A penetration of
/// zero (or an unknown shoe size) never reaches the cut card.
#[must_use]
pub fn cut_card_reached(remaining: usize, shoe_size: usize, penetration: f64) -> bool {
    if shoe_size == 0 || penetration <= 0.0 {
        return false;
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    let remaining_ratio = remaining as f64 / shoe_size as f64;

    remaining_ratio < 1.0 - penetration
}
