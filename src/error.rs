//! Error types for table operations.
//!
//! The round reducer itself never fails; these errors come from the
//! [`Table`](crate::Table) validating an intent before it dispatches one.

use thiserror::Error;

/// Errors that can occur during betting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Insufficient funds.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// Invalid round phase for betting.
    #[error("invalid phase for betting")]
    InvalidState,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid round phase for dealing.
    #[error("invalid phase for dealing")]
    InvalidState,
    /// No bet has been placed.
    #[error("no bet has been placed")]
    NoBet,
    /// Not enough cards in the shoe.
    #[error("not enough cards in the shoe")]
    NotEnoughCards,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid round phase for this action.
    #[error("invalid phase for this action")]
    InvalidState,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Cannot surrender at this point.
    #[error("cannot surrender at this point")]
    CannotSurrender,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    NoCards,
}

/// Errors that can occur during insurance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsuranceError {
    /// Invalid round phase for insurance.
    #[error("invalid phase for insurance")]
    InvalidState,
    /// Insurance is not offered at this table.
    #[error("insurance is not offered at this table")]
    NotOffered,
    /// Insufficient funds for insurance.
    #[error("insufficient funds for insurance")]
    InsufficientFunds,
}

/// Errors that can occur while the dealer plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealerError {
    /// Invalid round phase for dealer play.
    #[error("invalid phase for dealer play")]
    InvalidState,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    NoCards,
}

/// Errors that can occur when starting a new round or session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The current round has not been resolved.
    #[error("the current round has not been resolved")]
    InvalidState,
}

/// Errors that can occur during reshuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReshuffleError {
    /// A round is in progress.
    #[error("cannot reshuffle while a round is in progress")]
    InvalidState,
}
