//! The round state machine.
//!
//! [`transition`] is the only way a [`RoundState`] changes. It checks the
//! phase against the legality table once, then dispatches on the action
//! kind. An illegal action, or one the bankroll cannot cover, gives back the
//! input state untouched; callers that care can compare with [`is_legal`]
//! beforehand and report the rejection themselves.
//!
//! The reducer never draws cards, consults the dealer policy or computes
//! payouts. Those decisions arrive already made inside the action payloads.
//!
//! # Example
//!
//! ```
//! use bjtable::round::{Action, Phase, RoundState, transition};
//!
//! let state = RoundState::new(1000, 0.75);
//! let state = transition(state, Action::PlaceBet { amount: 100 });
//! assert_eq!(state.phase, Phase::Betting);
//! assert_eq!(state.bet, 100);
//! assert_eq!(state.chips, 1000);
//!
//! // Standing is not legal while betting, so nothing changes.
//! let before = state.clone();
//! let state = transition(state, Action::Stand);
//! assert_eq!(state, before);
//! ```

use alloc::string::String;

use crate::hand::Hand;
use crate::payout::surrender_refund;
use crate::result::{Outcome, Stats};
use crate::shoe::{Shoe, cut_card_reached};
use crate::split::SplitHands;

mod action;
mod legality;
pub mod state;

pub use action::{Action, ActionKind, Resolution};
pub use legality::{ActionSet, is_legal, legal_actions};
pub use state::{Phase, RoundState};

/// Applies `action` to `state` and returns the next state.
#[must_use]
pub fn transition(state: RoundState, action: Action) -> RoundState {
    if !is_legal(state.phase, action.kind()) {
        return state;
    }

    match action {
        Action::PlaceBet { amount } => place_bet(state, amount),
        Action::ClearBet => clear_bet(state),
        Action::Deal {
            shoe,
            player_hand,
            dealer_hand,
            fresh_shoe,
        } => deal(state, shoe, player_hand, dealer_hand, fresh_shoe),
        Action::Resolve(resolution) => resolve(state, resolution),
        Action::Hit {
            player_hand,
            shoe,
            phase,
        } => hit(state, player_hand, shoe, phase),
        Action::Stand => stand(state),
        Action::Double { player_hand, shoe } => double(state, player_hand, shoe),
        Action::Split { split_hands, shoe } => split(state, split_hands, shoe),
        Action::SplitHit { hand, shoe } => split_hit(state, hand, shoe),
        Action::SplitStand => split_stand(state),
        Action::SplitDouble { hand, shoe } => split_double(state, hand, shoe),
        Action::SplitResolve {
            split_hands,
            chips,
            stats,
            result,
            message,
        } => split_resolve(state, split_hands, chips, stats, result, message),
        Action::Insure { amount } => insure(state, amount),
        Action::Surrender => surrender(state),
        Action::DealerDraw { dealer_hand, shoe } => dealer_draw(state, dealer_hand, shoe),
        Action::NewRound => new_round(state),
        Action::Reset { bankroll } => reset(state, bankroll),
    }
}

/// Installs the shoe left after a draw and re-checks the cut card against it.
fn install_shoe(state: &mut RoundState, shoe: Shoe) {
    state.cut_card_reached = cut_card_reached(shoe.len(), state.shoe_size, state.penetration);
    state.shoe = shoe;
}

fn place_bet(mut state: RoundState, amount: u64) -> RoundState {
    let Some(total) = state.bet.checked_add(amount) else {
        return state;
    };
    if amount == 0 || total > state.chips {
        return state;
    }

    state.bet = total;
    state.phase = Phase::Betting;
    state.message = String::from("Bet placed");
    state
}

fn clear_bet(mut state: RoundState) -> RoundState {
    state.bet = 0;
    state.message = String::from("Place your bet");
    state
}

fn deal(
    mut state: RoundState,
    shoe: Shoe,
    player_hand: Hand,
    dealer_hand: Hand,
    fresh_shoe: bool,
) -> RoundState {
    if state.bet == 0 || state.bet > state.chips {
        return state;
    }

    if fresh_shoe || state.shoe_size == 0 {
        state.shoe_size = shoe.len() + player_hand.len() + dealer_hand.len();
    }

    state.chips -= state.bet;
    install_shoe(&mut state, shoe);
    state.player_hand = player_hand;
    state.dealer_hand = dealer_hand;
    state.split_hands = None;
    state.is_split = false;
    state.active_hand_index = 0;
    state.insurance_bet = 0;
    state.result = None;
    state.dealer_revealed = false;
    state.phase = Phase::Dealing;
    state.message = String::from("Cards dealt");
    state
}

fn resolve(mut state: RoundState, resolution: Resolution) -> RoundState {
    let Resolution {
        message,
        result,
        chips,
        dealer_revealed,
        stats,
        split_hands,
        phase,
    } = resolution;

    state.message = message;
    state.result = result;
    if let Some(chips) = chips {
        state.chips = chips;
    }
    if let Some(revealed) = dealer_revealed {
        state.dealer_revealed = revealed;
    }
    if let Some(stats) = stats {
        state.stats = stats;
    }
    if let Some(hands) = split_hands.filter(|_| state.is_split) {
        state.split_hands = Some(hands);
    }
    state.phase = phase.unwrap_or(Phase::GameOver);
    state
}

fn hit(mut state: RoundState, player_hand: Hand, shoe: Shoe, phase: Option<Phase>) -> RoundState {
    state.player_hand = player_hand;
    install_shoe(&mut state, shoe);
    if let Some(phase) = phase {
        state.phase = phase;
    }
    state
}

fn reveal_for_dealer_turn(mut state: RoundState) -> RoundState {
    state.dealer_revealed = true;
    state.phase = Phase::DealerTurn;
    state.message = String::from("Dealer's turn");
    state
}

fn stand(state: RoundState) -> RoundState {
    reveal_for_dealer_turn(state)
}

fn double(mut state: RoundState, player_hand: Hand, shoe: Shoe) -> RoundState {
    if state.chips < state.bet {
        return state;
    }

    state.chips -= state.bet;
    state.bet *= 2;
    state.player_hand = player_hand;
    install_shoe(&mut state, shoe);
    state.dealer_revealed = true;
    state.phase = Phase::Doubling;
    state.message = String::from("Doubled down");
    state
}

fn split(mut state: RoundState, split_hands: SplitHands, shoe: Shoe) -> RoundState {
    if state.chips < state.bet {
        return state;
    }

    state.chips -= state.bet;
    state.player_hand = split_hands[0].cards.clone();
    state.split_hands = Some(split_hands);
    state.is_split = true;
    state.active_hand_index = 0;
    install_shoe(&mut state, shoe);
    state.phase = Phase::Splitting;
    state.message = String::from("Playing hand 1");
    state
}

fn split_hit(mut state: RoundState, hand: Hand, shoe: Shoe) -> RoundState {
    let index = state.active_hand_index;
    let Some(active) = state
        .split_hands
        .as_mut()
        .and_then(|hands| hands.get_mut(index))
    else {
        return state;
    };

    active.cards = hand.clone();
    state.player_hand = hand;
    install_shoe(&mut state, shoe);
    state
}

fn split_stand(mut state: RoundState) -> RoundState {
    let index = state.active_hand_index;
    let Some(hands) = state.split_hands.as_mut() else {
        return state;
    };
    let Some(active) = hands.get_mut(index) else {
        return state;
    };
    active.stood = true;
    let next = hands.get(index + 1).map(|hand| hand.cards.clone());

    match next {
        Some(cards) => {
            state.player_hand = cards;
            state.active_hand_index = index + 1;
            state.message = String::from("Playing hand 2");
            state
        }
        None => reveal_for_dealer_turn(state),
    }
}

fn split_double(mut state: RoundState, hand: Hand, shoe: Shoe) -> RoundState {
    let index = state.active_hand_index;
    let chips = state.chips;
    let Some(active) = state
        .split_hands
        .as_mut()
        .and_then(|hands| hands.get_mut(index))
    else {
        return state;
    };
    if chips < active.bet {
        return state;
    }

    state.chips -= active.bet;
    active.bet *= 2;
    active.cards = hand.clone();
    state.player_hand = hand;
    install_shoe(&mut state, shoe);
    split_stand(state)
}

fn split_resolve(
    mut state: RoundState,
    split_hands: SplitHands,
    chips: u64,
    stats: Stats,
    result: Option<Outcome>,
    message: String,
) -> RoundState {
    if !state.is_split {
        return state;
    }

    state.player_hand = split_hands[state.active_hand_index].cards.clone();
    state.split_hands = Some(split_hands);
    state.chips = chips;
    state.stats = stats;
    state.result = result;
    state.message = message;
    state.dealer_revealed = true;
    state.phase = Phase::GameOver;
    state
}

fn insure(mut state: RoundState, amount: u64) -> RoundState {
    if amount > 0 {
        if amount > state.chips || state.insurance_bet > 0 {
            return state;
        }
        state.chips -= amount;
        state.insurance_bet = amount;
        state.message = String::from("Insurance taken");
    } else {
        state.message = String::from("Your move");
    }

    state.phase = Phase::PlayerTurn;
    state
}

fn surrender(mut state: RoundState) -> RoundState {
    state.chips += surrender_refund(state.bet);
    state.dealer_revealed = true;
    state.result = Some(Outcome::Lose);
    state.phase = Phase::Surrendering;
    state.message = String::from("Surrendered");
    state
}

fn dealer_draw(mut state: RoundState, dealer_hand: Hand, shoe: Shoe) -> RoundState {
    state.dealer_hand = dealer_hand;
    install_shoe(&mut state, shoe);
    state
}

fn new_round(mut state: RoundState) -> RoundState {
    state.player_hand = Hand::new();
    state.dealer_hand = Hand::new();
    state.split_hands = None;
    state.is_split = false;
    state.active_hand_index = 0;
    state.bet = 0;
    state.insurance_bet = 0;
    state.result = None;
    state.dealer_revealed = false;
    state.phase = Phase::Betting;
    state.message = String::from("Place your bet");
    state
}

fn reset(state: RoundState, bankroll: Option<u64>) -> RoundState {
    RoundState::new(bankroll.unwrap_or(state.chips), state.penetration)
}
