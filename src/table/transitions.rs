//! The validated transition table.

use std::fmt;

use tracing::debug;

use crate::core::Transitional;
use crate::registry::{count_of, TypeKey, TypeSet};
use crate::table::descriptor::{InternalTable, Transition};
use crate::table::error::BuildError;

/// The static registry of a machine's transitions.
///
/// Built once from the declared descriptors via [`TransitionTable::builder`];
/// construction validates every table invariant and computes the closed
/// state and event sets, so dispatch only ever performs index lookups.
///
/// The state set always contains the reserved
/// [`Transitional`](crate::core::Transitional) placeholder in addition to
/// every source and target referenced by a transition.
pub struct TransitionTable<C: 'static> {
    transitions: Vec<Transition<C>>,
    states: TypeSet,
    events: TypeSet,
    internal: Vec<(TypeKey, InternalTable<C>)>,
}

impl<C: 'static> TransitionTable<C> {
    /// Start declaring a table.
    pub fn builder() -> TableBuilder<C> {
        TableBuilder {
            transitions: Vec::new(),
        }
    }

    /// The closed set of states: every source and target plus the
    /// transitional placeholder.
    pub fn states(&self) -> &TypeSet {
        &self.states
    }

    /// The set of events that trigger state transitions.
    ///
    /// Events consumed only by internal transitions are not listed here
    /// but are still accepted; see [`TransitionTable::has_event`].
    pub fn events(&self) -> &TypeSet {
        &self.events
    }

    /// Whether the machine accepts this event type: it triggers a state
    /// transition, or appears in some participating state's internal
    /// table.
    pub fn has_event(&self, event: TypeKey) -> bool {
        self.events.contains(event)
            || self
                .internal
                .iter()
                .any(|(_, table)| table.index_of(event).is_some())
    }

    /// Index of the unique transition matching `(source, event)`, if any.
    pub fn index_of(&self, source: TypeKey, event: TypeKey) -> Option<usize> {
        self.transitions
            .iter()
            .position(|transition| transition.source == source && transition.event == event)
    }

    /// Number of declared state transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether the table declares no transitions. Never true for a built
    /// table.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// The merged internal table of a participating state, if it has one.
    pub(crate) fn internal_for(&self, state: TypeKey) -> Option<&InternalTable<C>> {
        self.internal
            .iter()
            .find(|(key, _)| *key == state)
            .map(|(_, table)| table)
    }

    pub(crate) fn transition(&self, index: usize) -> &Transition<C> {
        &self.transitions[index]
    }
}

impl<C: 'static> fmt::Debug for TransitionTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionTable")
            .field("transitions", &self.transitions.len())
            .field("states", &self.states.len())
            .field("events", &self.events.len())
            .finish()
    }
}

/// Accumulates transition descriptors and validates them into a
/// [`TransitionTable`].
pub struct TableBuilder<C: 'static> {
    transitions: Vec<Transition<C>>,
}

impl<C: 'static> TableBuilder<C> {
    /// Add a state-transition descriptor.
    pub fn transition(mut self, transition: Transition<C>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Validate the declaration and build the table.
    ///
    /// Rejects, in order: an empty table; any transition touching the
    /// reserved placeholder state; a transition whose source equals its
    /// target; duplicate `(source, event)` identity keys; and, for each
    /// participating state's internal table, duplicate events or
    /// handlers registered with the target-bearing call shape.
    pub fn build(self) -> Result<TransitionTable<C>, BuildError> {
        if self.transitions.is_empty() {
            return Err(BuildError::EmptyTable);
        }

        let placeholder = TypeKey::of::<Transitional>();
        for transition in &self.transitions {
            if transition.source == placeholder || transition.target == placeholder {
                return Err(BuildError::ReservedState {
                    event: transition.event.short_name(),
                });
            }
            if transition.source == transition.target {
                return Err(BuildError::SelfTransition {
                    state: transition.source.short_name(),
                    event: transition.event.short_name(),
                });
            }
        }

        for (index, transition) in self.transitions.iter().enumerate() {
            let earlier = &self.transitions[..index];
            if earlier
                .iter()
                .any(|other| other.source == transition.source && other.event == transition.event)
            {
                return Err(BuildError::DuplicateTransition {
                    from: transition.source.short_name(),
                    event: transition.event.short_name(),
                });
            }
        }

        let mut states = TypeSet::new();
        for transition in &self.transitions {
            states.insert(transition.source);
            states.insert(transition.target);
        }
        states.insert(placeholder);

        let events: TypeSet = self.transitions.iter().map(|t| t.event).collect();

        let internal = Self::merge_internal(&self.transitions)?;

        debug!(
            transitions = self.transitions.len(),
            states = states.len(),
            events = events.len(),
            "transition table validated"
        );

        Ok(TransitionTable {
            transitions: self.transitions,
            states,
            events,
            internal,
        })
    }

    /// Materialize each participating state's internal table exactly
    /// once, dropping the empty placeholders states without internal
    /// transitions contribute.
    fn merge_internal(
        transitions: &[Transition<C>],
    ) -> Result<Vec<(TypeKey, InternalTable<C>)>, BuildError> {
        let mut merged = Vec::new();
        let mut visited = TypeSet::new();

        for transition in transitions {
            let ends = [
                (transition.source, transition.source_internal),
                (transition.target, transition.target_internal),
            ];
            for (state, factory) in ends {
                if !visited.insert(state) {
                    continue;
                }
                let table = factory();
                if table.is_empty() {
                    continue;
                }
                Self::validate_internal(state, &table)?;
                merged.push((state, table));
            }
        }

        Ok(merged)
    }

    fn validate_internal(state: TypeKey, table: &InternalTable<C>) -> Result<(), BuildError> {
        let events: Vec<TypeKey> = table.entries().iter().map(|entry| entry.event).collect();
        if let Some(duplicate) = events.iter().find(|event| count_of(&events, **event) > 1) {
            return Err(BuildError::DuplicateInternal {
                state: state.short_name(),
                event: duplicate.short_name(),
            });
        }

        for entry in table.entries() {
            if !entry.guard.shape().fits_internal() || !entry.action.shape().fits_internal() {
                return Err(BuildError::InternalNeedsTarget {
                    state: state.short_name(),
                    event: entry.event.short_name(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, Event, Guard, State};
    use crate::table::descriptor::Internal;

    #[derive(Default)]
    struct Stopped;
    #[derive(Default)]
    struct Spinning;
    #[derive(Default)]
    struct Broken;

    struct Spin;
    struct Halt;
    struct Poll;
    struct Smash;
    impl Event for Spin {}
    impl Event for Halt {}
    impl Event for Poll {}
    impl Event for Smash {}

    #[derive(Default)]
    struct Rotor;

    impl State<Rotor> for Stopped {
        fn internal_transitions() -> InternalTable<Rotor> {
            InternalTable::new().handle(Internal::new::<Poll>())
        }
    }
    impl State<Rotor> for Spinning {}
    impl State<Rotor> for Broken {}

    fn two_state_table() -> TableBuilder<Rotor> {
        TransitionTable::builder()
            .transition(Transition::new::<Stopped, Spin, Spinning>())
            .transition(Transition::new::<Spinning, Halt, Stopped>())
    }

    #[test]
    fn empty_declaration_is_rejected() {
        let result = TransitionTable::<Rotor>::builder().build();
        assert_eq!(result.unwrap_err(), BuildError::EmptyTable);
    }

    #[test]
    fn duplicate_identity_key_is_rejected() {
        let result = two_state_table()
            .transition(Transition::new::<Stopped, Spin, Broken>())
            .build();
        assert_eq!(
            result.unwrap_err(),
            BuildError::DuplicateTransition {
                from: "Stopped",
                event: "Spin",
            }
        );
    }

    #[test]
    fn same_pair_with_different_target_is_still_a_duplicate() {
        let result = TransitionTable::builder()
            .transition(Transition::new::<Stopped, Spin, Spinning>())
            .transition(
                Transition::new::<Stopped, Spin, Broken>()
                    .guard(Guard::on_event(|_: &Spin, _: &Rotor| false)),
            )
            .build();
        assert!(matches!(
            result.unwrap_err(),
            BuildError::DuplicateTransition { .. }
        ));
    }

    #[test]
    fn reflexive_transition_is_rejected() {
        let result = TransitionTable::builder()
            .transition(Transition::new::<Stopped, Spin, Stopped>())
            .build();
        assert_eq!(
            result.unwrap_err(),
            BuildError::SelfTransition {
                state: "Stopped",
                event: "Spin",
            }
        );
    }

    #[test]
    fn placeholder_cannot_participate() {
        let result = TransitionTable::builder()
            .transition(Transition::new::<Stopped, Smash, Transitional>())
            .build();
        assert_eq!(
            result.unwrap_err(),
            BuildError::ReservedState { event: "Smash" }
        );
    }

    #[test]
    fn state_set_is_deduplicated_and_includes_the_placeholder() {
        let table = two_state_table().build().unwrap();
        assert_eq!(table.states().len(), 3);
        assert!(table.states().contains_type::<Stopped>());
        assert!(table.states().contains_type::<Spinning>());
        assert!(table.states().contains_type::<Transitional>());
        assert!(!table.states().contains_type::<Broken>());
    }

    #[test]
    fn event_set_lists_state_transition_events_only() {
        let table = two_state_table().build().unwrap();
        assert_eq!(table.events().len(), 2);
        assert!(table.events().contains_type::<Spin>());
        assert!(table.events().contains_type::<Halt>());
        assert!(!table.events().contains_type::<Poll>());
    }

    #[test]
    fn has_event_also_covers_internal_events() {
        let table = two_state_table().build().unwrap();
        assert!(table.has_event(TypeKey::of::<Spin>()));
        assert!(table.has_event(TypeKey::of::<Poll>()));
        assert!(!table.has_event(TypeKey::of::<Smash>()));
    }

    #[test]
    fn lookup_resolves_the_unique_matching_index() {
        let table = two_state_table().build().unwrap();
        assert_eq!(
            table.index_of(TypeKey::of::<Stopped>(), TypeKey::of::<Spin>()),
            Some(0)
        );
        assert_eq!(
            table.index_of(TypeKey::of::<Spinning>(), TypeKey::of::<Halt>()),
            Some(1)
        );
        assert_eq!(
            table.index_of(TypeKey::of::<Spinning>(), TypeKey::of::<Spin>()),
            None
        );
    }

    #[test]
    fn internal_tables_are_merged_for_participating_states() {
        let table = two_state_table().build().unwrap();
        let internal = table.internal_for(TypeKey::of::<Stopped>()).unwrap();
        assert_eq!(internal.index_of(TypeKey::of::<Poll>()), Some(0));
        assert!(table.internal_for(TypeKey::of::<Spinning>()).is_none());
    }

    #[test]
    fn duplicate_internal_event_is_rejected() {
        #[derive(Default)]
        struct Noisy;
        impl State<Rotor> for Noisy {
            fn internal_transitions() -> InternalTable<Rotor> {
                InternalTable::new()
                    .handle(Internal::new::<Poll>())
                    .handle(Internal::new::<Poll>())
            }
        }

        let result = TransitionTable::builder()
            .transition(Transition::new::<Noisy, Spin, Spinning>())
            .build();
        assert_eq!(
            result.unwrap_err(),
            BuildError::DuplicateInternal {
                state: "Noisy",
                event: "Poll",
            }
        );
    }

    #[test]
    fn internal_handler_needing_a_target_is_rejected() {
        #[derive(Default)]
        struct Greedy;
        impl State<Rotor> for Greedy {
            fn internal_transitions() -> InternalTable<Rotor> {
                InternalTable::new().handle(Internal::new::<Poll>().action(Action::with_target(
                    |_: &Poll, _: &mut Rotor, _: &Greedy, _: &Spinning| {},
                )))
            }
        }

        let result = TransitionTable::builder()
            .transition(Transition::new::<Greedy, Spin, Spinning>())
            .build();
        assert_eq!(
            result.unwrap_err(),
            BuildError::InternalNeedsTarget {
                state: "Greedy",
                event: "Poll",
            }
        );
    }
}
