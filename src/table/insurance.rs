use crate::error::InsuranceError;
use crate::round::{Action, Phase, RoundState};

use super::bet::insurance_amount;
use super::{Table, apply};

impl Table {
    /// Returns whether insurance is currently being offered.
    pub fn is_insurance_offered(&self) -> bool {
        self.state.lock().phase == Phase::InsuranceOffer
    }

    /// Takes insurance for half the main wager.
    ///
    /// Returns the insurance wager. The dealer then checks for a natural:
    /// if either side holds one the round settles immediately, otherwise
    /// play continues with the player's turn.
    ///
    /// # Errors
    ///
    /// Returns an error if insurance is not being offered or the bankroll
    /// cannot cover it.
    pub fn take_insurance(&self) -> Result<u64, InsuranceError> {
        let mut state = self.state.lock();
        self.ensure_offered(&state)?;

        let amount = insurance_amount(state.bet);
        if amount == 0 || state.chips < amount {
            return Err(InsuranceError::InsufficientFunds);
        }

        apply(&mut state, Action::Insure { amount });
        self.peek_for_natural(&mut state);

        Ok(amount)
    }

    /// Declines insurance.
    ///
    /// # Errors
    ///
    /// Returns an error if insurance is not being offered.
    pub fn decline_insurance(&self) -> Result<(), InsuranceError> {
        let mut state = self.state.lock();
        self.ensure_offered(&state)?;

        apply(&mut state, Action::Insure { amount: 0 });
        self.peek_for_natural(&mut state);

        Ok(())
    }

    fn ensure_offered(&self, state: &RoundState) -> Result<(), InsuranceError> {
        if !self.options.insurance {
            return Err(InsuranceError::NotOffered);
        }
        if state.phase != Phase::InsuranceOffer {
            return Err(InsuranceError::InvalidState);
        }
        Ok(())
    }

    /// Settles the round once the insurance decision is in, if either side
    /// holds a natural. The hole card is turned over by standing the hand.
    fn peek_for_natural(&self, state: &mut RoundState) {
        let naturals =
            state.player_hand.value().is_blackjack || state.dealer_hand.value().is_blackjack;
        if naturals {
            apply(state, Action::Stand);
            self.settle_main(state);
        }
    }
}
