//! Build errors for transition tables and machines.

use thiserror::Error;

/// Contract violations detected while building a transition table or
/// constructing a machine.
///
/// Every variant is a programmer error in the machine declaration: the
/// table is rejected before any instance exists, and no variant can
/// occur during dispatch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("transition table has no transitions. Declare at least one")]
    EmptyTable,

    #[error("duplicate transition from '{from}' on '{event}'")]
    DuplicateTransition {
        from: &'static str,
        event: &'static str,
    },

    #[error(
        "transition from '{state}' on '{event}' targets its own source. \
         Declare an internal transition instead"
    )]
    SelfTransition {
        state: &'static str,
        event: &'static str,
    },

    #[error("transition on '{event}' uses the reserved transitional placeholder state")]
    ReservedState { event: &'static str },

    #[error("state '{state}' declares more than one internal transition for '{event}'")]
    DuplicateInternal {
        state: &'static str,
        event: &'static str,
    },

    #[error(
        "internal transition of '{state}' on '{event}' registers a handler \
         that requires a target state"
    )]
    InternalNeedsTarget {
        state: &'static str,
        event: &'static str,
    },

    #[error("state '{state}' is referenced by the transition table but is not in the state union")]
    StateOutsideUnion { state: &'static str },

    #[error("initial state '{state}' does not participate in any transition")]
    InitialStateUnlisted { state: &'static str },
}
