//! A single-seat blackjack round engine with optional `no_std` support.
//!
//! The crate is split in two layers:
//!
//! - [`round`] holds the pure state machine. [`transition`] folds an
//!   [`Action`] into a [`RoundState`] after checking it against a fixed
//!   phase/action legality table.
//! - [`Table`] orchestrates a round on top of it: it draws cards, applies the
//!   dealer policy, computes payouts and dispatches the resulting actions.
//!
//! # Example
//!
//! ```
//! use bjtable::{GameOptions, Phase, Table};
//!
//! let table = Table::new(GameOptions::default(), 7);
//! table.place_bet(100).unwrap();
//!
//! match table.deal().unwrap() {
//!     Phase::InsuranceOffer => table.decline_insurance().unwrap(),
//!     Phase::PlayerTurn => table.stand().unwrap(),
//!     _ => {}
//! }
//! if table.phase() == Phase::PlayerTurn {
//!     table.stand().unwrap();
//! }
//! if table.phase() == Phase::DealerTurn {
//!     table.play_dealer().unwrap();
//! }
//!
//! assert_eq!(table.phase(), Phase::GameOver);
//! table.new_round().unwrap();
//! assert_eq!(table.phase(), Phase::Betting);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod dealer;
pub mod error;
pub mod hand;
pub mod options;
pub mod payout;
pub mod result;
pub mod round;
pub mod shoe;
pub mod split;
mod sync;
pub mod table;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use error::{
    ActionError, BetError, DealError, DealerError, InsuranceError, ReshuffleError, RoundError,
};
pub use hand::{Hand, HandValue, evaluate, evaluate_cards};
pub use options::{DoubleOption, GameOptions, RoundingMode};
pub use result::{Outcome, Settlement, Stats};
pub use round::{Action, ActionKind, ActionSet, Phase, Resolution, RoundState, is_legal, transition};
pub use shoe::Shoe;
pub use split::{SplitHand, SplitHands};
pub use table::{DealerStep, Table};
