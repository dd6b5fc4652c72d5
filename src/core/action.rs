//! Actions run as part of a transition.
//!
//! An action is the only place a machine's context may be mutated. Like
//! guards, actions declare one of the supported [`HandlerShape`]s when
//! they are built and are invoked through a uniform erased call.

use std::any::Any;

use super::shape::HandlerShape;
use super::state::State;
use super::Event;

type ErasedProcedure<C> = dyn Fn(&dyn Any, &mut C, &dyn Any, Option<&dyn Any>) + Send + Sync;

enum ActionKind<C: 'static> {
    /// Default action: does nothing.
    Noop,
    Run(Box<ErasedProcedure<C>>),
}

/// Procedure executed between the source's exit hook and the target's
/// entry hook (or in place, for an internal transition).
///
/// A transition declared without an action gets [`Action::noop`].
pub struct Action<C: 'static> {
    shape: HandlerShape,
    kind: ActionKind<C>,
}

impl<C: 'static> Action<C> {
    /// The default action: does nothing.
    pub fn noop() -> Self {
        Self {
            shape: HandlerShape::Unit,
            kind: ActionKind::Noop,
        }
    }

    /// Action over `(event, context)`.
    pub fn on_event<E, F>(run: F) -> Self
    where
        E: Event,
        F: Fn(&E, &mut C) + Send + Sync + 'static,
    {
        Self {
            shape: HandlerShape::EventContext,
            kind: ActionKind::Run(Box::new(move |event, context, _source, _target| {
                let event = event
                    .downcast_ref::<E>()
                    .expect("action invoked with a mismatched event type");
                run(event, context);
            })),
        }
    }

    /// Action over `(event, context, source)`.
    pub fn with_source<E, S, F>(run: F) -> Self
    where
        E: Event,
        S: State<C>,
        F: Fn(&E, &mut C, &S) + Send + Sync + 'static,
    {
        Self {
            shape: HandlerShape::EventContextSource,
            kind: ActionKind::Run(Box::new(move |event, context, source, _target| {
                let event = event
                    .downcast_ref::<E>()
                    .expect("action invoked with a mismatched event type");
                let source = source
                    .downcast_ref::<S>()
                    .expect("action invoked with a mismatched source state");
                run(event, context, source);
            })),
        }
    }

    /// Action over `(event, context, source, target)`.
    ///
    /// This shape cannot be used on internal transitions, which have no
    /// target.
    pub fn with_target<E, S, T, F>(run: F) -> Self
    where
        E: Event,
        S: State<C>,
        T: State<C>,
        F: Fn(&E, &mut C, &S, &T) + Send + Sync + 'static,
    {
        Self {
            shape: HandlerShape::EventContextSourceTarget,
            kind: ActionKind::Run(Box::new(move |event, context, source, target| {
                let event = event
                    .downcast_ref::<E>()
                    .expect("action invoked with a mismatched event type");
                let source = source
                    .downcast_ref::<S>()
                    .expect("action invoked with a mismatched source state");
                let target = target
                    .expect("four-argument action invoked without a target state")
                    .downcast_ref::<T>()
                    .expect("action invoked with a mismatched target state");
                run(event, context, source, target);
            })),
        }
    }

    /// The call shape resolved when this action was built.
    pub fn shape(&self) -> HandlerShape {
        self.shape
    }

    /// Invoke the action.
    ///
    /// `target` is present for state transitions and absent for internal
    /// transitions; shapes that do not take the corresponding argument
    /// ignore it.
    pub fn run(&self, event: &dyn Any, context: &mut C, source: &dyn Any, target: Option<&dyn Any>) {
        match &self.kind {
            ActionKind::Noop => {}
            ActionKind::Run(procedure) => procedure(event, context, source, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Deposit {
        amount: u32,
    }
    impl Event for Deposit {}

    #[derive(Default)]
    struct Empty;
    impl State<Meter> for Empty {}

    #[derive(Default)]
    struct Charged;
    impl State<Meter> for Charged {}

    #[derive(Default)]
    struct Meter {
        total: u32,
        touched: bool,
    }

    #[test]
    fn noop_leaves_context_untouched() {
        let action: Action<Meter> = Action::noop();
        let mut meter = Meter::default();
        action.run(&Deposit { amount: 5 }, &mut meter, &(), None);
        assert_eq!(action.shape(), HandlerShape::Unit);
        assert!(!meter.touched);
        assert_eq!(meter.total, 0);
    }

    #[test]
    fn event_context_action_mutates_context() {
        let action = Action::on_event(|event: &Deposit, meter: &mut Meter| {
            meter.total += event.amount;
        });
        let mut meter = Meter::default();
        action.run(&Deposit { amount: 25 }, &mut meter, &(), None);
        assert_eq!(meter.total, 25);
    }

    #[test]
    fn source_action_sees_the_source_state() {
        let action = Action::with_source(|_: &Deposit, meter: &mut Meter, _: &Empty| {
            meter.touched = true;
        });
        let mut meter = Meter::default();
        action.run(&Deposit { amount: 1 }, &mut meter, &Empty, None);
        assert_eq!(action.shape(), HandlerShape::EventContextSource);
        assert!(meter.touched);
    }

    #[test]
    fn target_action_sees_both_states() {
        let action = Action::with_target(
            |event: &Deposit, meter: &mut Meter, _: &Empty, _: &Charged| {
                meter.total = event.amount;
            },
        );
        let mut meter = Meter::default();
        action.run(
            &Deposit { amount: 50 },
            &mut meter,
            &Empty,
            Some(&Charged as &dyn Any),
        );
        assert_eq!(action.shape(), HandlerShape::EventContextSourceTarget);
        assert_eq!(meter.total, 50);
    }
}
