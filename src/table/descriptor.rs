//! Transition descriptors: the declarative units a table is built from.

use crate::core::{Action, Event, Guard, State};
use crate::registry::TypeKey;

/// A state-changing transition: `(Source, Event, Target)` annotated with
/// one guard and one action.
///
/// Guard and action default to [`Guard::always`] and [`Action::noop`].
/// The identity key used for duplicate detection is `(Source, Event)`.
/// A descriptor whose source equals its target is rejected when the
/// table is built; self-transitions are expressed as [`Internal`]
/// transitions.
///
/// # Example
///
/// ```rust
/// use shunt::core::{Action, Event, Guard, State};
/// use shunt::table::Transition;
///
/// #[derive(Default)]
/// struct Unlocked;
/// #[derive(Default)]
/// struct Locked;
///
/// struct Lock {
///     pincode: u32,
/// }
/// impl Event for Lock {}
///
/// #[derive(Default)]
/// struct Locker {
///     pincode: u32,
/// }
///
/// impl State<Locker> for Unlocked {}
/// impl State<Locker> for Locked {}
///
/// let descriptor = Transition::new::<Unlocked, Lock, Locked>()
///     .guard(Guard::on_event(|event: &Lock, _: &Locker| event.pincode != 0))
///     .action(Action::on_event(|event: &Lock, locker: &mut Locker| {
///         locker.pincode = event.pincode;
///     }));
/// ```
pub struct Transition<C: 'static> {
    pub(crate) source: TypeKey,
    pub(crate) event: TypeKey,
    pub(crate) target: TypeKey,
    pub(crate) guard: Guard<C>,
    pub(crate) action: Action<C>,
    pub(crate) source_internal: fn() -> InternalTable<C>,
    pub(crate) target_internal: fn() -> InternalTable<C>,
}

impl<C: 'static> Transition<C> {
    /// Declare a transition from `Src` to `Tgt` triggered by `E`.
    pub fn new<Src, E, Tgt>() -> Self
    where
        Src: State<C>,
        E: Event,
        Tgt: State<C>,
    {
        Self {
            source: TypeKey::of::<Src>(),
            event: TypeKey::of::<E>(),
            target: TypeKey::of::<Tgt>(),
            guard: Guard::always(),
            action: Action::noop(),
            source_internal: <Src as State<C>>::internal_transitions,
            target_internal: <Tgt as State<C>>::internal_transitions,
        }
    }

    /// Attach a guard (replaces the default always-allow guard).
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.guard = guard;
        self
    }

    /// Attach an action (replaces the default no-op action).
    pub fn action(mut self, action: Action<C>) -> Self {
        self.action = action;
        self
    }

    /// Source state identity.
    pub fn source(&self) -> TypeKey {
        self.source
    }

    /// Triggering event identity.
    pub fn event(&self) -> TypeKey {
        self.event
    }

    /// Target state identity.
    pub fn target(&self) -> TypeKey {
        self.target
    }
}

/// An internal transition: an action (with optional guard) attached to a
/// state, triggered by an event, that never changes which state is
/// current.
///
/// The identity key within the owning state's table is the event type.
pub struct Internal<C: 'static> {
    pub(crate) event: TypeKey,
    pub(crate) guard: Guard<C>,
    pub(crate) action: Action<C>,
}

impl<C: 'static> Internal<C> {
    /// Declare an internal transition triggered by `E`.
    pub fn new<E: Event>() -> Self {
        Self {
            event: TypeKey::of::<E>(),
            guard: Guard::always(),
            action: Action::noop(),
        }
    }

    /// Attach a guard (replaces the default always-allow guard).
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.guard = guard;
        self
    }

    /// Attach an action (replaces the default no-op action).
    pub fn action(mut self, action: Action<C>) -> Self {
        self.action = action;
        self
    }

    /// Triggering event identity.
    pub fn event(&self) -> TypeKey {
        self.event
    }
}

/// A state's own list of internal transitions.
///
/// Returned from [`State::internal_transitions`]; the default empty
/// table marks a state as having none, and is filtered out when the
/// transition table merges the internal tables of participating states.
/// Uniqueness of events within the table is validated at that merge.
pub struct InternalTable<C: 'static> {
    entries: Vec<Internal<C>>,
}

impl<C: 'static> InternalTable<C> {
    /// Empty table (the "no internal transitions" marker).
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an internal transition.
    pub fn handle(mut self, internal: Internal<C>) -> Self {
        self.entries.push(internal);
        self
    }

    /// Index of the internal transition matching the event, if any.
    pub fn index_of(&self, event: TypeKey) -> Option<usize> {
        self.entries.iter().position(|entry| entry.event == event)
    }

    /// Number of internal transitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table declares no internal transitions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[Internal<C>] {
        &self.entries
    }
}

impl<C: 'static> Default for InternalTable<C> {
    fn default() -> Self {
        Self::new()
    }
}
