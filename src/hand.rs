//! Hand representation and evaluation.

use alloc::vec::Vec;

use crate::card::Card;

/// Evaluated value of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandValue {
    /// Best total after demoting aces as needed.
    pub total: u8,
    /// Whether an ace is still counted as 11.
    pub is_soft: bool,
    /// Whether the total is over 21.
    pub is_bust: bool,
    /// Whether the hand is a natural blackjack.
    pub is_blackjack: bool,
}

/// Evaluates raw cards.
///
/// Aces start at 11 and are demoted to 1 one at a time while the total is
/// over 21. Any two-card 21 is flagged as a natural here; use [`evaluate`] on
/// a [`Hand`] to honour split provenance.
#[must_use]
pub fn evaluate_cards(cards: &[Card]) -> HandValue {
    let mut total: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.rank.is_ace() {
            aces += 1;
        }
        total = total.saturating_add(card.value());
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    HandValue {
        total,
        is_soft: aces > 0,
        is_bust: total > 21,
        is_blackjack: cards.len() == 2 && total == 21,
    }
}

/// Evaluates a hand.
///
/// A hand seeded by a split is never a natural, even with two cards
/// totalling 21.
#[must_use]
pub fn evaluate(hand: &Hand) -> HandValue {
    let mut value = evaluate_cards(&hand.cards);
    if hand.from_split {
        value.is_blackjack = false;
    }
    value
}

/// An ordered hand of cards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hand {
    /// Cards in deal order.
    cards: Vec<Card>,
    /// Whether this hand was seeded by a split.
    from_split: bool,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            from_split: false,
        }
    }

    /// Creates a hand from dealt cards.
    #[must_use]
    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
            from_split: false,
        }
    }

    /// Creates a split hand holding one card of the original pair.
    #[must_use]
    pub fn from_split(card: Card) -> Self {
        Self {
            cards: alloc::vec![card],
            from_split: true,
        }
    }

    /// Returns a copy of this hand with `card` appended.
    #[must_use]
    pub fn with_card(&self, card: Card) -> Self {
        let mut hand = self.clone();
        hand.cards.push(card);
        hand
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns whether this hand was seeded by a split.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Evaluates the hand.
    #[must_use]
    pub fn value(&self) -> HandValue {
        evaluate(self)
    }

    /// Returns whether the hand is exactly two cards of equal value.
    ///
    /// Tens and face cards pair with each other.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        matches!(self.cards.as_slice(), [a, b] if a.value() == b.value())
    }

    /// Returns the first card, which for the dealer is the up card.
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Value shown to the player: the up card alone until the hole is revealed.
    #[must_use]
    pub fn visible_total(&self, revealed: bool) -> u8 {
        if revealed {
            self.value().total
        } else {
            self.up_card().map_or(0, Card::value)
        }
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
