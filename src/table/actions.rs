use crate::card::Card;
use crate::error::ActionError;
use crate::payout::surrender_refund;
use crate::result::Outcome;
use crate::round::{Action, Phase, Resolution, RoundState};
use crate::split::{aces_stand_immediately, can_double, can_split, settle_split, split_pair};

use super::{Table, apply, draw_onto};

impl Table {
    fn ensure_phase(state: &RoundState, phase: Phase) -> Result<(), ActionError> {
        if state.phase == phase {
            Ok(())
        } else {
            Err(ActionError::InvalidState)
        }
    }

    pub(super) fn can_double_main(&self, state: &RoundState) -> Result<(), ActionError> {
        Self::ensure_phase(state, Phase::PlayerTurn)?;

        // Only on the first two cards
        let total = state.player_hand.value().total;
        if state.player_hand.len() != 2 || !self.options.double.allows(total) {
            return Err(ActionError::CannotDouble);
        }
        if state.chips < state.bet {
            return Err(ActionError::InsufficientFunds);
        }
        Ok(())
    }

    pub(super) fn can_surrender(&self, state: &RoundState) -> Result<(), ActionError> {
        Self::ensure_phase(state, Phase::PlayerTurn)?;

        if !self.options.surrender || state.player_hand.len() != 2 || state.is_split {
            return Err(ActionError::CannotSurrender);
        }
        Ok(())
    }

    /// Player action: Hit (draw a card).
    ///
    /// A bust settles the round immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn or the shoe is empty.
    pub fn hit(&self) -> Result<Card, ActionError> {
        let mut state = self.state.lock();
        Self::ensure_phase(&state, Phase::PlayerTurn)?;

        let (player_hand, shoe, card) =
            draw_onto(&state.player_hand, &state.shoe).ok_or(ActionError::NoCards)?;
        let bust = player_hand.value().is_bust;

        apply(
            &mut state,
            Action::Hit {
                player_hand,
                shoe,
                phase: bust.then_some(Phase::DealerTurn),
            },
        );

        if bust {
            self.settle_main(&mut state);
        }

        Ok(card)
    }

    /// Player action: Stand (hand the round to the dealer).
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn.
    pub fn stand(&self) -> Result<(), ActionError> {
        let mut state = self.state.lock();
        Self::ensure_phase(&state, Phase::PlayerTurn)?;

        apply(&mut state, Action::Stand);
        Ok(())
    }

    /// Player action: Double down (double the wager, take one card, stand).
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn, the hand may not
    /// double, the bankroll cannot cover the second wager, or the shoe is
    /// empty.
    pub fn double_down(&self) -> Result<Card, ActionError> {
        let mut state = self.state.lock();
        self.can_double_main(&state)?;

        let (player_hand, shoe, card) =
            draw_onto(&state.player_hand, &state.shoe).ok_or(ActionError::NoCards)?;
        let bust = player_hand.value().is_bust;

        apply(&mut state, Action::Double { player_hand, shoe });

        if bust {
            self.settle_main(&mut state);
        } else {
            apply(
                &mut state,
                Action::Resolve(Resolution::proceed("Dealer's turn", Phase::DealerTurn)),
            );
        }

        Ok(card)
    }

    /// Player action: Split a pair into two hands.
    ///
    /// Split aces take one card each and stand when the table says so.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn, the hand is not a
    /// pair, the bankroll cannot cover the second wager, or the shoe runs out.
    pub fn split(&self) -> Result<(), ActionError> {
        let mut state = self.state.lock();
        Self::ensure_phase(&state, Phase::PlayerTurn)?;
        can_split(&state.player_hand, state.is_split, state.bet, state.chips)?;

        let (split_hands, shoe) = split_pair(&state.player_hand, state.bet, &state.shoe)?;
        let aces_stand = aces_stand_immediately(&split_hands, &self.options);

        apply(&mut state, Action::Split { split_hands, shoe });

        if aces_stand {
            apply(&mut state, Action::SplitStand);
            apply(&mut state, Action::SplitStand);
        }

        Ok(())
    }

    /// Split action: Hit the active split hand.
    ///
    /// A bust finishes that hand. If both hands bust the round settles
    /// without a dealer turn.
    ///
    /// # Errors
    ///
    /// Returns an error if no split hand is being played or the shoe is empty.
    pub fn split_hit(&self) -> Result<Card, ActionError> {
        let mut state = self.state.lock();
        Self::ensure_phase(&state, Phase::Splitting)?;

        let active = state.active_split_hand().ok_or(ActionError::InvalidState)?;
        let (hand, shoe, card) =
            draw_onto(&active.cards, &state.shoe).ok_or(ActionError::NoCards)?;
        let bust = hand.value().is_bust;

        apply(&mut state, Action::SplitHit { hand, shoe });

        if bust {
            self.finish_busted_split_hand(&mut state);
        }

        Ok(card)
    }

    /// Split action: Stand on the active split hand.
    ///
    /// # Errors
    ///
    /// Returns an error if no split hand is being played.
    pub fn split_stand(&self) -> Result<(), ActionError> {
        let mut state = self.state.lock();
        Self::ensure_phase(&state, Phase::Splitting)?;

        apply(&mut state, Action::SplitStand);
        Ok(())
    }

    /// Split action: Double the active split hand.
    ///
    /// # Errors
    ///
    /// Returns an error if no split hand is being played, the table does not
    /// allow doubling after a split, the bankroll cannot cover it, or the
    /// shoe is empty.
    pub fn split_double(&self) -> Result<Card, ActionError> {
        let mut state = self.state.lock();
        Self::ensure_phase(&state, Phase::Splitting)?;

        let active = state.active_split_hand().ok_or(ActionError::InvalidState)?;
        if !can_double(active, state.chips, &self.options) {
            return Err(if state.chips < active.bet {
                ActionError::InsufficientFunds
            } else {
                ActionError::CannotDouble
            });
        }

        let (hand, shoe, card) =
            draw_onto(&active.cards, &state.shoe).ok_or(ActionError::NoCards)?;
        apply(&mut state, Action::SplitDouble { hand, shoe });

        Ok(card)
    }

    /// Player action: Surrender half the wager.
    ///
    /// Returns the refunded chips.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn or surrender is not
    /// available on this hand.
    pub fn surrender(&self) -> Result<u64, ActionError> {
        let mut state = self.state.lock();
        self.can_surrender(&state)?;

        let refund = surrender_refund(state.bet);
        apply(&mut state, Action::Surrender);

        let stats = state.stats.record(Outcome::Lose);
        apply(
            &mut state,
            Action::Resolve(Resolution::new("Surrendered", Some(Outcome::Lose)).with_stats(stats)),
        );

        Ok(refund)
    }

    /// Finishes the active split hand after it busted.
    fn finish_busted_split_hand(&self, state: &mut RoundState) {
        let Some(hands) = state.split_hands.clone() else {
            return;
        };
        let is_last = state.active_hand_index + 1 == hands.len();
        let all_bust = hands.iter().all(|hand| hand.value().is_bust);

        if !(is_last && all_bust) {
            apply(state, Action::SplitStand);
            return;
        }

        let mut hands = hands;
        for hand in &mut hands {
            hand.stood = true;
        }
        let (split_hands, stats, settlement) =
            settle_split(&hands, &state.dealer_hand, state.stats, &self.options);
        let chips = state.chips + settlement.returned;

        apply(
            state,
            Action::SplitResolve {
                split_hands,
                chips,
                stats,
                result: Some(settlement.outcome),
                message: "Both hands bust".into(),
            },
        );
    }
}
