//! The contract a caller's machine definition satisfies.

use crate::core::StateSet;
use crate::table::{BuildError, TransitionTable};

/// A machine definition: the caller-supplied context type together with
/// its initial state and transition table.
///
/// The implementing type doubles as the machine context: the one object
/// guards observe and actions mutate. The associated items mirror the
/// two required members of a declaration: a definition without an
/// initial state or without a transition table does not compile.
///
/// See the crate root documentation for a complete definition.
pub trait Definition: Sized + 'static {
    /// The closed current-state union, generated by
    /// [`state_set!`](crate::state_set).
    type States: StateSet<Self>;

    /// The state a fresh machine starts in.
    fn initial_state() -> Self::States;

    /// The declared transition table.
    fn transitions() -> Result<TransitionTable<Self>, BuildError>;
}

/// Outcome of [`process_event`](crate::machine::Machine::process_event).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum EventResult {
    /// No transition matched, or a guard returned false. Guaranteed to
    /// have had no observable side effect.
    Refuse,
    /// A transition or internal action executed exactly once.
    Done,
}
