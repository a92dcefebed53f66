//! Dealer drawing policy.

use crate::hand::HandValue;
use crate::options::GameOptions;

/// Returns whether the dealer must take another card.
///
/// The dealer draws below 17. On exactly 17 the dealer draws only when the
/// total is soft and the table hits soft 17.
#[must_use]
pub const fn must_draw(value: &HandValue, options: &GameOptions) -> bool {
    if value.total < 17 {
        return true;
    }
    value.total == 17 && value.is_soft && options.dealer_hits_soft_17
}

/// Returns whether the dealer has to play out the hand at all.
///
/// When every player hand has busted the dealer only reveals the hole card.
pub fn needs_to_play<'a>(mut player_values: impl Iterator<Item = &'a HandValue>) -> bool {
    player_values.any(|value| !value.is_bust)
}
