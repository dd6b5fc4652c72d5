//! Shunt: a statically validated finite-state-machine engine.
//!
//! Callers declare states, events, guards, actions and transitions as
//! independent building blocks; the engine validates the whole table
//! before any machine instance exists and then drives event dispatch
//! against it. The current state is a closed enum over the declared
//! state types (plus one reserved transitional placeholder), so a
//! machine holds exactly one of N unrelated state types without boxing
//! or dynamic dispatch.
//!
//! # Core Concepts
//!
//! - **State**: a nominal type implementing [`core::State`], with
//!   optional entry/exit hooks and an optional internal-transition table
//! - **Event**: a plain data type implementing [`core::Event`]
//! - **Guard**: a pure predicate ([`core::Guard`]) gating a transition
//! - **Action**: the only context-mutation point ([`core::Action`])
//! - **Definition**: the caller's context type, which also names the
//!   initial state and the transition table
//!
//! # Example
//!
//! ```rust
//! use shunt::core::{Action, Event, Guard, State};
//! use shunt::{state_set, Definition, EventResult, Machine};
//! use shunt::table::{BuildError, Transition, TransitionTable};
//!
//! // Events carry plain stimulus data.
//! struct Insert {
//!     amount: u32,
//! }
//! struct Refund;
//! impl Event for Insert {}
//! impl Event for Refund {}
//!
//! // States are bare nominal types; machine data lives in the context.
//! #[derive(Default)]
//! struct Empty;
//! #[derive(Default)]
//! struct Paid;
//!
//! #[derive(Default)]
//! struct FareGate {
//!     collected: u32,
//! }
//!
//! impl State<FareGate> for Empty {}
//! impl State<FareGate> for Paid {}
//!
//! state_set! {
//!     enum FareGateState for FareGate {
//!         Empty,
//!         Paid,
//!     }
//! }
//!
//! impl Definition for FareGate {
//!     type States = FareGateState;
//!
//!     fn initial_state() -> FareGateState {
//!         Empty.into()
//!     }
//!
//!     fn transitions() -> Result<TransitionTable<Self>, BuildError> {
//!         TransitionTable::builder()
//!             .transition(
//!                 Transition::new::<Empty, Insert, Paid>()
//!                     .guard(Guard::on_event(|event: &Insert, _: &FareGate| {
//!                         event.amount > 0
//!                     }))
//!                     .action(Action::on_event(|event: &Insert, gate: &mut FareGate| {
//!                         gate.collected += event.amount;
//!                     })),
//!             )
//!             .transition(Transition::new::<Paid, Refund, Empty>())
//!             .build()
//!     }
//! }
//!
//! fn main() -> Result<(), BuildError> {
//!     let mut gate = Machine::<FareGate>::new()?;
//!     assert!(gate.is_in_state::<Empty>());
//!     assert_eq!(gate.process_event(Insert { amount: 0 }), EventResult::Refuse);
//!     assert_eq!(gate.process_event(Insert { amount: 50 }), EventResult::Done);
//!     assert!(gate.is_in_state::<Paid>());
//!     assert_eq!(gate.context().collected, 50);
//!     Ok(())
//! }
//! ```
//!
//! # Dispatch semantics
//!
//! `process_event` resolves, in order: the unique state transition for
//! `(current state, event type)`, then the current state's internal
//! transition for the event type. A false guard, or no match at all,
//! refuses the event with no observable side effect. A state transition
//! runs exit hook, action, entry hook, each exactly once and in that
//! order, holding the reserved transitional placeholder in between so
//! the machine is never observably in two states at once.
//!
//! Dispatch is single-threaded, synchronous and run-to-completion.
//! Events that match nothing are lost, not queued.

pub mod core;
pub mod machine;
pub mod registry;
pub mod table;

// Re-export the types every machine declaration touches.
pub use crate::core::{Action, Event, Guard, State, Transitional, Trigger};
pub use crate::machine::{Definition, EventResult, Machine};
pub use crate::table::{BuildError, Internal, InternalTable, Transition, TransitionTable};
