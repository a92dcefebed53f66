//! Which actions each phase accepts.

use super::action::ActionKind;
use super::action::ActionKind as A;
use super::state::Phase;

/// A set of [`ActionKind`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionSet(u32);

impl ActionSet {
    /// Builds a set from a list of kinds.
    #[must_use]
    pub const fn of(kinds: &[ActionKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1 << kinds[i] as u32;
            i += 1;
        }
        Self(bits)
    }

    /// Returns whether `kind` is in the set.
    #[must_use]
    pub const fn contains(self, kind: ActionKind) -> bool {
        self.0 & (1 << kind as u32) != 0
    }

    /// Iterates the kinds in the set.
    pub fn iter(self) -> impl Iterator<Item = ActionKind> {
        ActionKind::ALL
            .into_iter()
            .filter(move |&kind| self.contains(kind))
    }

    /// Number of kinds in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Legal actions, indexed by `Phase as usize`.
const LEGALITY: [ActionSet; Phase::COUNT] = [
    // Idle
    ActionSet::of(&[A::PlaceBet, A::Reset]),
    // Betting
    ActionSet::of(&[A::PlaceBet, A::ClearBet, A::Deal, A::Reset]),
    // Dealing
    ActionSet::of(&[A::Resolve]),
    // PlayerTurn
    ActionSet::of(&[
        A::Hit,
        A::Stand,
        A::Double,
        A::Split,
        A::Insure,
        A::Surrender,
    ]),
    // Splitting
    ActionSet::of(&[
        A::SplitHit,
        A::SplitStand,
        A::SplitDouble,
        A::SplitResolve,
    ]),
    // Doubling
    ActionSet::of(&[A::Resolve]),
    // InsuranceOffer
    ActionSet::of(&[A::Insure, A::Resolve]),
    // Surrendering
    ActionSet::of(&[A::Resolve]),
    // DealerTurn
    ActionSet::of(&[A::DealerDraw, A::Resolve]),
    // Resolving
    ActionSet::of(&[A::NewRound, A::Reset]),
    // GameOver
    ActionSet::of(&[A::NewRound, A::Reset]),
];

/// Returns the actions `phase` accepts.
#[must_use]
pub const fn legal_actions(phase: Phase) -> ActionSet {
    LEGALITY[phase as usize]
}

/// Returns whether `phase` accepts `kind`.
#[must_use]
pub const fn is_legal(phase: Phase, kind: ActionKind) -> bool {
    legal_actions(phase).contains(kind)
}
