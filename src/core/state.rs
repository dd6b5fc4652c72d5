//! State capability trait, the reserved placeholder state, and the
//! contract of the generated current-state union.

use std::any::Any;

use crate::table::InternalTable;

/// The possibly-absent event that caused an entry or exit hook to run.
///
/// Hooks fired by `process_event` carry the triggering event; the hooks
/// fired on machine construction and drop carry the absent lifecycle
/// trigger instead.
///
/// # Example
///
/// ```rust
/// use shunt::core::{Event, Trigger};
///
/// struct Coin {
///     value: u32,
/// }
/// impl Event for Coin {}
///
/// let coin = Coin { value: 25 };
/// let trigger = Trigger::from_event(&coin);
/// assert_eq!(trigger.as_event::<Coin>().map(|c| c.value), Some(25));
/// assert!(Trigger::lifecycle().as_event::<Coin>().is_none());
/// ```
#[derive(Clone, Copy)]
pub struct Trigger<'a> {
    event: Option<&'a dyn Any>,
}

impl<'a> Trigger<'a> {
    /// Trigger carrying the event being dispatched.
    pub fn from_event<E: super::Event>(event: &'a E) -> Self {
        Self { event: Some(event) }
    }

    /// Absent trigger used for construction and drop hooks.
    pub fn lifecycle() -> Self {
        Self { event: None }
    }

    /// Downcast the triggering event, if one is present and is an `E`.
    pub fn as_event<E: super::Event>(&self) -> Option<&'a E> {
        self.event.and_then(|event| event.downcast_ref::<E>())
    }

    /// Whether this trigger comes from machine construction or drop
    /// rather than from an event.
    pub fn is_lifecycle(&self) -> bool {
        self.event.is_none()
    }
}

impl std::fmt::Debug for Trigger<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.event {
            Some(_) => f.write_str("Trigger::Event"),
            None => f.write_str("Trigger::Lifecycle"),
        }
    }
}

/// Capability trait for machine states over a context `C`.
///
/// A state is a distinct nominal type denoting one named condition of
/// the machine. States carry no required run-time fields (state-specific
/// data belongs to the context), so a bare `#[derive(Default)]` unit
/// struct qualifies. All members are optional:
///
/// - [`on_entry`](State::on_entry) / [`on_exit`](State::on_exit) hooks,
///   invoked with the [`Trigger`] and exclusive access to the context
/// - [`internal_transitions`](State::internal_transitions), the state's
///   own table of self-transitions (default: none)
///
/// `Default` supplies the fresh, default-initialized value constructed
/// when a transition targets this state.
pub trait State<C: 'static>: Any + Default {
    /// Hook invoked after this state becomes current.
    fn on_entry(&mut self, trigger: Trigger<'_>, context: &mut C) {
        let _ = (trigger, context);
    }

    /// Hook invoked before this state stops being current.
    fn on_exit(&mut self, trigger: Trigger<'_>, context: &mut C) {
        let _ = (trigger, context);
    }

    /// This state's internal transitions: actions triggered by events
    /// that never change which state is current.
    ///
    /// The default, empty table marks the state as having no internal
    /// transitions; empty tables are filtered out when the transition
    /// table merges the internal tables of participating states.
    fn internal_transitions() -> InternalTable<C> {
        InternalTable::new()
    }
}

/// Reserved placeholder state held strictly during a transition, between
/// the source's exit hook and the target becoming current.
///
/// The placeholder is a member of every machine's closed state set. No
/// declared transition may use it as a source or target, its hooks do
/// nothing, and it declares no internal transitions. While an action
/// runs, the machine observably holds this state, never the source and
/// the target at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transitional;

impl<C: 'static> State<C> for Transitional {}

/// Contract of the closed current-state union generated by
/// [`state_set!`](crate::state_set).
///
/// Implementations are enums with one variant per declared state type
/// plus a hidden variant for [`Transitional`]; every method dispatches by
/// exhaustive match on the active variant. A machine holds exactly one
/// value of this union at all times.
pub trait StateSet<C: 'static>: 'static + Sized {
    /// Identity of the active variant's state type.
    fn key(&self) -> crate::registry::TypeKey;

    /// Default-construct the variant whose state type has the given
    /// identity, or `None` if the type is not a member of the union.
    fn construct(key: crate::registry::TypeKey) -> Option<Self>;

    /// The transitional placeholder value.
    fn transitional() -> Self;

    /// The active variant's payload, for handler invocation.
    fn as_any(&self) -> &dyn Any;

    /// Run the active state's entry hook.
    fn enter(&mut self, trigger: Trigger<'_>, context: &mut C);

    /// Run the active state's exit hook.
    fn exit(&mut self, trigger: Trigger<'_>, context: &mut C);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Event;

    struct Ping;
    impl Event for Ping {}

    #[derive(Default)]
    struct Idle;
    impl State<()> for Idle {}

    #[test]
    fn trigger_downcasts_to_the_carried_event() {
        let ping = Ping;
        let trigger = Trigger::from_event(&ping);
        assert!(!trigger.is_lifecycle());
        assert!(trigger.as_event::<Ping>().is_some());
    }

    #[test]
    fn lifecycle_trigger_carries_no_event() {
        let trigger = Trigger::lifecycle();
        assert!(trigger.is_lifecycle());
        assert!(trigger.as_event::<Ping>().is_none());
    }

    #[test]
    fn default_internal_table_is_empty() {
        assert!(<Idle as State<()>>::internal_transitions().is_empty());
        assert!(<Transitional as State<()>>::internal_transitions().is_empty());
    }

    #[test]
    fn transitional_hooks_do_nothing() {
        let mut placeholder = Transitional;
        let mut context = ();
        State::<()>::on_entry(&mut placeholder, Trigger::lifecycle(), &mut context);
        State::<()>::on_exit(&mut placeholder, Trigger::lifecycle(), &mut context);
    }
}
