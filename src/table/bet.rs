use log::info;

use crate::card::Card;
use crate::error::{BetError, DealError};
use crate::hand::Hand;
use crate::round::{Action, Phase, Resolution, RoundState};
use crate::shoe::Shoe;

use super::{Table, apply};

/// Cards dealt at the start of a round: two to the player, two to the dealer.
const INITIAL_CARDS: usize = 4;

/// Insurance costs half the main wager, rounded down.
pub(super) const fn insurance_amount(bet: u64) -> u64 {
    bet / 2
}

impl Table {
    /// Adds `amount` to the main wager.
    ///
    /// Chips are not taken until the deal.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets, the amount is zero,
    /// or the total wager would exceed the bankroll.
    pub fn place_bet(&self, amount: u64) -> Result<(), BetError> {
        if amount == 0 {
            return Err(BetError::ZeroBet);
        }

        let mut state = self.state.lock();
        if !matches!(state.phase, Phase::Idle | Phase::Betting) {
            return Err(BetError::InvalidState);
        }
        if state.bet.saturating_add(amount) > state.chips {
            return Err(BetError::InsufficientFunds);
        }

        apply(&mut state, Action::PlaceBet { amount });
        Ok(())
    }

    /// Withdraws the main wager.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets.
    pub fn clear_bet(&self) -> Result<(), BetError> {
        let mut state = self.state.lock();
        if state.phase != Phase::Betting {
            return Err(BetError::InvalidState);
        }

        apply(&mut state, Action::ClearBet);
        Ok(())
    }

    /// Deals the initial cards and runs the natural check.
    ///
    /// The deal uses a queued shoe if there is one, a freshly shuffled shoe
    /// if the current one is empty or past the cut card, and the current shoe
    /// otherwise. Afterwards the round is in one of:
    ///
    /// - [`Phase::InsuranceOffer`] when the dealer shows an ace,
    /// - [`Phase::GameOver`] when either side holds a natural,
    /// - [`Phase::PlayerTurn`] otherwise.
    ///
    /// Returns the phase the round ended up in.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets, no bet was placed,
    /// or the shoe holds fewer than four cards.
    pub fn deal(&self) -> Result<Phase, DealError> {
        let mut state = self.state.lock();
        if state.phase != Phase::Betting {
            return Err(DealError::InvalidState);
        }
        if state.bet == 0 {
            return Err(DealError::NoBet);
        }

        let (mut shoe, fresh_shoe) = self.shoe_for_deal(&state);
        if shoe.len() < INITIAL_CARDS {
            if fresh_shoe {
                self.pending_shoe.replace(Some(shoe));
            }
            return Err(DealError::NotEnoughCards);
        }

        let mut player_hand = Hand::new();
        let mut dealer_hand = Hand::new();
        player_hand.add_card(draw(&mut shoe)?);
        dealer_hand.add_card(draw(&mut shoe)?);
        player_hand.add_card(draw(&mut shoe)?);
        dealer_hand.add_card(draw(&mut shoe)?);

        apply(
            &mut state,
            Action::Deal {
                shoe,
                player_hand,
                dealer_hand,
                fresh_shoe,
            },
        );
        self.check_naturals(&mut state);

        Ok(state.phase)
    }

    fn shoe_for_deal(&self, state: &RoundState) -> (Shoe, bool) {
        if let Some(shoe) = self.pending_shoe.replace(None) {
            return (shoe, true);
        }

        if state.shoe.len() < INITIAL_CARDS || state.cut_card_reached {
            info!("shuffling a fresh {}-deck shoe", self.options.decks);
            let shoe = Shoe::build(self.options.decks, &mut *self.rng.lock());
            return (shoe, true);
        }

        (state.shoe.clone(), false)
    }

    /// Moves a freshly dealt round out of [`Phase::Dealing`].
    fn check_naturals(&self, state: &mut RoundState) {
        let player = state.player_hand.value();
        let dealer = state.dealer_hand.value();
        let ace_up = state
            .dealer_hand
            .up_card()
            .is_some_and(|card| card.rank.is_ace());
        let insurance = insurance_amount(state.bet);

        if ace_up && self.options.insurance && insurance > 0 && state.chips >= insurance {
            apply(
                state,
                Action::Resolve(Resolution::proceed("Insurance?", Phase::InsuranceOffer)),
            );
        } else if player.is_blackjack || dealer.is_blackjack {
            self.settle_main(state);
        } else {
            apply(
                state,
                Action::Resolve(Resolution::proceed("Your move", Phase::PlayerTurn)),
            );
        }
    }
}

fn draw(shoe: &mut Shoe) -> Result<Card, DealError> {
    shoe.draw().ok_or(DealError::NotEnoughCards)
}
