//! Table orchestrator.
//!
//! A [`Table`] owns one [`RoundState`], the shoe RNG and the house rules. Its
//! methods validate a player's intent, draw cards, consult the dealer policy
//! and payout calculator, and then dispatch discrete actions into
//! [`transition`]. Every operation holds the state lock for its whole
//! duration, so dispatch from several threads is serialised.

use alloc::vec::Vec;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::error::{ReshuffleError, RoundError};
use crate::hand::Hand;
use crate::options::GameOptions;
use crate::payout::settle_hand;
use crate::result::{Outcome, Settlement};
use crate::round::{
    Action, ActionKind, ActionSet, Phase, Resolution, RoundState, is_legal, legal_actions,
    transition,
};
use crate::shoe::Shoe;
use crate::split::{can_double, can_split};
use crate::sync::Mutex;

mod actions;
mod bet;
mod dealer;
mod insurance;

pub use dealer::DealerStep;

/// A single-seat blackjack table.
pub struct Table {
    /// House rules.
    pub options: GameOptions,
    /// Current round state.
    state: Mutex<RoundState>,
    /// Shoe to use on the next deal instead of the current one.
    pending_shoe: Mutex<Option<Shoe>>,
    /// Random number generator for shuffling.
    rng: Mutex<ChaCha8Rng>,
}

/// Applies `action` in place, logging it if the phase does not accept it.
fn apply(state: &mut RoundState, action: Action) {
    let kind = action.kind();
    if !is_legal(state.phase, kind) {
        warn!("ignoring {kind:?} during {:?}", state.phase);
        return;
    }

    let from = state.phase;
    *state = transition(core::mem::take(state), action);
    debug!("{kind:?}: {from:?} -> {:?}", state.phase);
}

const fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Blackjack => "Blackjack!",
        Outcome::Win => "You win",
        Outcome::Push => "Push",
        Outcome::Lose => "Dealer wins",
    }
}

impl Table {
    /// Creates a table with the given rules and shuffle seed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{GameOptions, Phase, Table};
    ///
    /// let table = Table::new(GameOptions::default(), 42);
    /// assert_eq!(table.phase(), Phase::Idle);
    /// assert_eq!(table.chips(), 1000);
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        let state = RoundState::new(options.starting_chips, options.penetration);

        Self {
            options,
            state: Mutex::new(state),
            pending_shoe: Mutex::new(None),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Returns a snapshot of the round state.
    pub fn snapshot(&self) -> RoundState {
        self.state.cloned()
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    /// Returns the bankroll not currently wagered.
    pub fn chips(&self) -> u64 {
        self.state.lock().chips
    }

    /// Returns the number of undealt cards in the current shoe.
    pub fn cards_remaining(&self) -> usize {
        self.state.lock().shoe.len()
    }

    /// Dispatches a raw action into the reducer.
    ///
    /// Actions the current phase does not accept are logged and ignored.
    /// Returns whether the state changed.
    pub fn dispatch(&self, action: Action) -> bool {
        let mut state = self.state.lock();
        let before = state.clone();
        apply(&mut state, action);
        *state != before
    }

    /// Actions a player could sensibly take right now.
    ///
    /// This is the phase's legality set narrowed by the house rules and the
    /// bankroll, without the settlement actions the table issues itself.
    pub fn available_actions(&self) -> ActionSet {
        let state = self.state.lock();
        let kinds: Vec<ActionKind> = legal_actions(state.phase)
            .iter()
            .filter(|&kind| self.permits(&state, kind))
            .collect();
        ActionSet::of(&kinds)
    }

    fn permits(&self, state: &RoundState, kind: ActionKind) -> bool {
        match kind {
            ActionKind::PlaceBet => state.bet < state.chips,
            ActionKind::ClearBet | ActionKind::Deal => state.bet > 0,
            ActionKind::Double => self.can_double_main(state).is_ok(),
            ActionKind::Split => {
                can_split(&state.player_hand, state.is_split, state.bet, state.chips).is_ok()
            }
            ActionKind::Surrender => self.can_surrender(state).is_ok(),
            ActionKind::Insure => state.phase == Phase::InsuranceOffer,
            ActionKind::SplitDouble => state
                .active_split_hand()
                .is_some_and(|hand| can_double(hand, state.chips, &self.options)),
            ActionKind::Resolve | ActionKind::SplitResolve | ActionKind::DealerDraw => false,
            ActionKind::Hit
            | ActionKind::Stand
            | ActionKind::SplitHit
            | ActionKind::SplitStand
            | ActionKind::NewRound
            | ActionKind::Reset => true,
        }
    }

    /// Returns whether the next deal will come from a fresh shoe.
    pub fn needs_reshuffle(&self) -> bool {
        let state = self.state.lock();
        self.pending_shoe.lock().is_some() || state.shoe.is_empty() || state.cut_card_reached
    }

    /// Shuffles a fresh shoe to be used from the next deal on.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress.
    pub fn reshuffle(&self) -> Result<(), ReshuffleError> {
        let shoe = Shoe::build(self.options.decks, &mut *self.rng.lock());
        self.load_shoe(shoe)
    }

    /// Installs `shoe` to be used from the next deal on.
    ///
    /// Lets a caller replay a recorded shoe or stack one for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress.
    pub fn load_shoe(&self, shoe: Shoe) -> Result<(), ReshuffleError> {
        let state = self.state.lock();
        if state.phase.is_in_play() {
            return Err(ReshuffleError::InvalidState);
        }

        info!("new shoe of {} cards queued", shoe.len());
        self.pending_shoe.replace(Some(shoe));
        drop(state);
        Ok(())
    }

    /// Clears the table for the next round, keeping the shoe and bankroll.
    ///
    /// # Errors
    ///
    /// Returns an error if the current round has not been settled.
    pub fn new_round(&self) -> Result<(), RoundError> {
        let mut state = self.state.lock();
        if !state.phase.is_settled() {
            return Err(RoundError::InvalidState);
        }

        if state.cut_card_reached {
            info!("cut card reached; the next deal uses a fresh shoe");
        }
        apply(&mut state, Action::NewRound);
        Ok(())
    }

    /// Starts a new session: fresh shoe, zeroed stats, and `bankroll` chips
    /// (or the current chips when `None`).
    ///
    /// # Errors
    ///
    /// Returns an error while a round is in progress.
    pub fn reset(&self, bankroll: Option<u64>) -> Result<(), RoundError> {
        let mut state = self.state.lock();
        if !is_legal(state.phase, ActionKind::Reset) {
            return Err(RoundError::InvalidState);
        }

        apply(&mut state, Action::Reset { bankroll });
        self.pending_shoe.replace(None);
        Ok(())
    }

    /// Commits the settlement of the main hand.
    fn settle_main(&self, state: &mut RoundState) -> Settlement {
        let settlement = settle_hand(
            &state.player_hand,
            &state.dealer_hand,
            state.bet,
            state.insurance_bet,
            &self.options,
        );

        let resolution =
            Resolution::new(outcome_message(settlement.outcome), Some(settlement.outcome))
                .with_chips(state.chips + settlement.returned)
                .with_dealer_revealed(true)
                .with_stats(state.stats.record(settlement.outcome));
        apply(state, Action::Resolve(resolution));

        info!(
            "round settled: {:?}, returned {}, net {}",
            settlement.outcome, settlement.returned, settlement.net
        );
        settlement
    }
}

/// Draws the top card of `shoe` onto `hand`, returning both updated.
fn draw_onto(hand: &Hand, shoe: &Shoe) -> Option<(Hand, Shoe, Card)> {
    let mut shoe = shoe.clone();
    let card = shoe.draw()?;
    Some((hand.with_card(card), shoe, card))
}
