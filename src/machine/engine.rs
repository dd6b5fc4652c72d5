//! Event dispatch against a live machine instance.

use std::mem;

use tracing::{debug, trace};

use crate::core::{Event, State, StateSet, Trigger};
use crate::machine::definition::{Definition, EventResult};
use crate::registry::TypeKey;
use crate::table::{BuildError, TransitionTable};

/// A live machine: the validated table, the exclusively owned context,
/// and exactly one value drawn from the closed state set.
///
/// Construction validates the definition's table, then runs the initial
/// state's entry hook with an absent trigger; drop runs the current
/// state's exit hook the same way. In between, the only way the current
/// state or the context changes is [`Machine::process_event`].
///
/// # Re-entrancy
///
/// Guards, actions and hooks receive the context, never the machine, so
/// dispatching a new event from inside a handler is not expressible;
/// the engine cannot be re-entered.
///
/// # Panics on action failure
///
/// If an action panics, the panic propagates and the machine remains in
/// the reserved transitional placeholder state permanently: every later
/// event is refused and `is_in_state` reports false for every declared
/// state. The machine is never observably in two states at once, even
/// across a failed action.
pub struct Machine<D: Definition> {
    table: TransitionTable<D>,
    context: D,
    current: D::States,
}

impl<D: Definition + Default> Machine<D> {
    /// Construct with a default-initialized context.
    pub fn new() -> Result<Self, BuildError> {
        Self::with_context(D::default())
    }
}

impl<D: Definition> Machine<D> {
    /// Construct around an existing context, for definitions carrying
    /// external collaborators.
    pub fn with_context(context: D) -> Result<Self, BuildError> {
        let table = D::transitions()?;

        for state in table.states().iter() {
            if D::States::construct(*state).is_none() {
                return Err(BuildError::StateOutsideUnion {
                    state: state.short_name(),
                });
            }
        }

        let initial = D::initial_state();
        if !table.states().contains(initial.key()) {
            return Err(BuildError::InitialStateUnlisted {
                state: initial.key().short_name(),
            });
        }

        let mut machine = Machine {
            table,
            context,
            current: initial,
        };
        debug!(state = %machine.current.key(), "machine constructed");
        machine
            .current
            .enter(Trigger::lifecycle(), &mut machine.context);
        Ok(machine)
    }

    /// Dispatch one event and run the matching transition, if any.
    ///
    /// Resolution order: the unique state transition registered for the
    /// current state and this event type; otherwise the current state's
    /// internal transition for this event type; otherwise
    /// [`EventResult::Refuse`]. A false guard refuses with no side
    /// effects. On a state transition the ordering is exit hook, then
    /// action, then entry hook, each exactly once, with the machine
    /// holding the transitional placeholder from exit until the target is
    /// stored.
    ///
    /// # Panics
    ///
    /// Panics if `E` appears in neither the transition table's event set
    /// nor any participating state's internal-transition events. Such a
    /// dispatch is a programmer error in the declaration, not a
    /// recoverable outcome.
    pub fn process_event<E: Event>(&mut self, event: E) -> EventResult {
        let event_key = TypeKey::of::<E>();
        assert!(
            self.table.has_event(event_key),
            "event '{event_key}' is not accepted by this machine's transition table",
        );

        let source_key = self.current.key();

        if let Some(index) = self.table.index_of(source_key, event_key) {
            let transition = self.table.transition(index);
            if !transition
                .guard
                .allows(&event, &self.context, self.current.as_any())
            {
                trace!(state = %source_key, event = %event_key, "guard refused transition");
                return EventResult::Refuse;
            }

            let target_key = transition.target;
            self.current
                .exit(Trigger::from_event(&event), &mut self.context);
            let source = mem::replace(&mut self.current, D::States::transitional());
            let mut target = D::States::construct(target_key)
                .expect("every table state is constructible, checked at machine construction");
            transition.action.run(
                &event,
                &mut self.context,
                source.as_any(),
                Some(target.as_any()),
            );
            target.enter(Trigger::from_event(&event), &mut self.context);
            self.current = target;
            debug!(
                source = %source_key,
                event = %event_key,
                target = %target_key,
                "transition"
            );
            return EventResult::Done;
        }

        if let Some(internal) = self.table.internal_for(source_key) {
            if let Some(index) = internal.index_of(event_key) {
                let entry = &internal.entries()[index];
                if !entry
                    .guard
                    .allows(&event, &self.context, self.current.as_any())
                {
                    trace!(state = %source_key, event = %event_key, "guard refused internal transition");
                    return EventResult::Refuse;
                }
                entry
                    .action
                    .run(&event, &mut self.context, self.current.as_any(), None);
                debug!(state = %source_key, event = %event_key, "internal transition");
                return EventResult::Done;
            }
        }

        trace!(state = %source_key, event = %event_key, "no transition matches event");
        EventResult::Refuse
    }

    /// Whether the machine currently holds the state `S`.
    ///
    /// # Panics
    ///
    /// Panics if `S` is not a member of the table's state set; querying
    /// a state the machine can never hold is a programmer error.
    pub fn is_in_state<S: State<D>>(&self) -> bool {
        let key = TypeKey::of::<S>();
        assert!(
            self.table.states().contains(key),
            "state '{key}' is not a member of this machine's state set",
        );
        self.current.key() == key
    }

    /// Observe the context. Mutation happens only through actions
    /// executing inside [`Machine::process_event`].
    pub fn context(&self) -> &D {
        &self.context
    }
}

impl<D: Definition> Drop for Machine<D> {
    fn drop(&mut self) {
        self.current.exit(Trigger::lifecycle(), &mut self.context);
    }
}
