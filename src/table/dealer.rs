use alloc::vec::Vec;

use log::info;

use crate::card::Card;
use crate::dealer::{must_draw, needs_to_play};
use crate::error::DealerError;
use crate::hand::HandValue;
use crate::result::Settlement;
use crate::round::{Action, Phase, Resolution, RoundState};
use crate::split::settle_split;

use super::{Table, apply, draw_onto, outcome_message};

/// What one dealer step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerStep {
    /// The dealer drew a card and may draw again.
    Drew(Card),
    /// The dealer stood and the round was settled.
    Settled(Settlement),
}

impl Table {
    /// Performs one dealer decision: draw one card, or stand and settle.
    ///
    /// Callers pacing the dealer for display call this repeatedly with a
    /// pause in between; [`Table::play_dealer`] runs it to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the dealer's turn or the dealer must
    /// draw from an empty shoe.
    pub fn dealer_step(&self) -> Result<DealerStep, DealerError> {
        let mut state = self.state.lock();
        if state.phase != Phase::DealerTurn {
            return Err(DealerError::InvalidState);
        }

        let player_values: Vec<HandValue> = match &state.split_hands {
            Some(hands) => hands.iter().map(|hand| hand.value()).collect(),
            None => alloc::vec![state.player_hand.value()],
        };

        if needs_to_play(player_values.iter()) && must_draw(&state.dealer_hand.value(), &self.options)
        {
            let (dealer_hand, shoe, card) =
                draw_onto(&state.dealer_hand, &state.shoe).ok_or(DealerError::NoCards)?;
            apply(&mut state, Action::DealerDraw { dealer_hand, shoe });
            return Ok(DealerStep::Drew(card));
        }

        let settlement = if state.is_split {
            self.settle_split_round(&mut state)
        } else {
            self.settle_main(&mut state)
        };
        Ok(DealerStep::Settled(settlement))
    }

    /// Plays the dealer's hand out and settles the round.
    ///
    /// Returns the cards the dealer drew and the settlement.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the dealer's turn or the shoe runs out.
    pub fn play_dealer(&self) -> Result<(Vec<Card>, Settlement), DealerError> {
        let mut drawn = Vec::new();

        loop {
            match self.dealer_step()? {
                DealerStep::Drew(card) => drawn.push(card),
                DealerStep::Settled(settlement) => return Ok((drawn, settlement)),
            }
        }
    }

    fn settle_split_round(&self, state: &mut RoundState) -> Settlement {
        let Some(hands) = state.split_hands.as_ref() else {
            return self.settle_main(state);
        };

        let (split_hands, stats, settlement) =
            settle_split(hands, &state.dealer_hand, state.stats, &self.options);
        let resolution =
            Resolution::new(outcome_message(settlement.outcome), Some(settlement.outcome))
                .with_chips(state.chips + settlement.returned)
                .with_dealer_revealed(true)
                .with_stats(stats)
                .with_split_hands(split_hands);
        apply(state, Action::Resolve(resolution));

        info!(
            "split round settled: {:?}, returned {}, net {}",
            settlement.outcome,
            settlement.returned,
            settlement.net
        );
        settlement
    }
}
