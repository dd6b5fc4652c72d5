//! Guard predicates gating transitions.
//!
//! A guard is a pure predicate over some subset of
//! `(event, context, source, target)`. Which subset a caller's closure
//! takes is recorded as its [`HandlerShape`] when the guard is built, and
//! dispatch invokes the registered shape through a uniform erased call.
//! There is no signature probing at dispatch time.

use std::any::Any;

use super::shape::HandlerShape;
use super::state::State;
use super::Event;

type ErasedPredicate<C> = dyn Fn(&dyn Any, &C, &dyn Any) -> bool + Send + Sync;

enum GuardKind<C: 'static> {
    /// Default guard: allows every transition.
    Always,
    Check(Box<ErasedPredicate<C>>),
}

impl<C: 'static> GuardKind<C> {
    fn allows(&self, event: &dyn Any, context: &C, source: &dyn Any) -> bool {
        match self {
            GuardKind::Always => true,
            GuardKind::Check(predicate) => predicate(event, context, source),
        }
    }
}

/// Pure predicate deciding whether a transition may fire.
///
/// Guards must not mutate anything: they see the context and the states
/// by shared reference only. A transition declared without a guard gets
/// [`Guard::always`].
///
/// # Example
///
/// ```rust
/// use shunt::core::{Event, Guard};
///
/// struct EnterPin {
///     pincode: u32,
/// }
/// impl Event for EnterPin {}
///
/// struct Locker {
///     pincode: u32,
/// }
///
/// let matches_pin =
///     Guard::on_event(|event: &EnterPin, locker: &Locker| event.pincode == locker.pincode);
///
/// let locker = Locker { pincode: 0x3254 };
/// assert!(matches_pin.allows(&EnterPin { pincode: 0x3254 }, &locker, &()));
/// assert!(!matches_pin.allows(&EnterPin { pincode: 0x7258 }, &locker, &()));
/// ```
pub struct Guard<C: 'static> {
    shape: HandlerShape,
    kind: GuardKind<C>,
}

impl<C: 'static> Guard<C> {
    /// The default guard: allows all inputs.
    pub fn always() -> Self {
        Self {
            shape: HandlerShape::Unit,
            kind: GuardKind::Always,
        }
    }

    /// Guard over `(event, context)`.
    pub fn on_event<E, F>(check: F) -> Self
    where
        E: Event,
        F: Fn(&E, &C) -> bool + Send + Sync + 'static,
    {
        Self {
            shape: HandlerShape::EventContext,
            kind: GuardKind::Check(Box::new(move |event, context, _source| {
                let event = event
                    .downcast_ref::<E>()
                    .expect("guard invoked with a mismatched event type");
                check(event, context)
            })),
        }
    }

    /// Guard over `(event, context, source)`.
    pub fn with_source<E, S, F>(check: F) -> Self
    where
        E: Event,
        S: State<C>,
        F: Fn(&E, &C, &S) -> bool + Send + Sync + 'static,
    {
        Self {
            shape: HandlerShape::EventContextSource,
            kind: GuardKind::Check(Box::new(move |event, context, source| {
                let event = event
                    .downcast_ref::<E>()
                    .expect("guard invoked with a mismatched event type");
                let source = source
                    .downcast_ref::<S>()
                    .expect("guard invoked with a mismatched source state");
                check(event, context, source)
            })),
        }
    }

    /// Guard over `(event, context, source, target)`.
    ///
    /// The target candidate handed to the predicate is a fresh,
    /// default-initialized value; the real target is constructed only
    /// after the guard allows the transition. This shape cannot be used
    /// on internal transitions, which have no target.
    pub fn with_target<E, S, T, F>(check: F) -> Self
    where
        E: Event,
        S: State<C>,
        T: State<C>,
        F: Fn(&E, &C, &S, &T) -> bool + Send + Sync + 'static,
    {
        Self {
            shape: HandlerShape::EventContextSourceTarget,
            kind: GuardKind::Check(Box::new(move |event, context, source| {
                let event = event
                    .downcast_ref::<E>()
                    .expect("guard invoked with a mismatched event type");
                let source = source
                    .downcast_ref::<S>()
                    .expect("guard invoked with a mismatched source state");
                let target = T::default();
                check(event, context, source, &target)
            })),
        }
    }

    /// Negate this guard.
    pub fn not(self) -> Self {
        let kind = self.kind;
        Self {
            shape: self.shape,
            kind: GuardKind::Check(Box::new(move |event, context, source| {
                !kind.allows(event, context, source)
            })),
        }
    }

    /// Allow only when both guards allow.
    pub fn and(self, other: Self) -> Self {
        let left = self.kind;
        let right = other.kind;
        Self {
            shape: self.shape.max(other.shape),
            kind: GuardKind::Check(Box::new(move |event, context, source| {
                left.allows(event, context, source) && right.allows(event, context, source)
            })),
        }
    }

    /// Allow when either guard allows.
    pub fn or(self, other: Self) -> Self {
        let left = self.kind;
        let right = other.kind;
        Self {
            shape: self.shape.max(other.shape),
            kind: GuardKind::Check(Box::new(move |event, context, source| {
                left.allows(event, context, source) || right.allows(event, context, source)
            })),
        }
    }

    /// The call shape resolved when this guard was built.
    pub fn shape(&self) -> HandlerShape {
        self.shape
    }

    /// Evaluate the guard.
    ///
    /// `source` is the active state's payload; shapes that do not take a
    /// source ignore it.
    pub fn allows(&self, event: &dyn Any, context: &C, source: &dyn Any) -> bool {
        self.kind.allows(event, context, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lock {
        pincode: u32,
    }
    impl Event for Lock {}

    #[derive(Default)]
    struct Unlocked;
    impl State<Till> for Unlocked {}

    #[derive(Default)]
    struct Locked;
    impl State<Till> for Locked {}

    #[derive(Default)]
    struct Till {
        armed: bool,
    }

    #[test]
    fn default_guard_allows_everything() {
        let guard: Guard<Till> = Guard::always();
        assert_eq!(guard.shape(), HandlerShape::Unit);
        assert!(guard.allows(&Lock { pincode: 0 }, &Till::default(), &()));
    }

    #[test]
    fn event_context_guard_sees_the_event() {
        let guard = Guard::on_event(|event: &Lock, _: &Till| event.pincode != 0);
        assert_eq!(guard.shape(), HandlerShape::EventContext);
        assert!(guard.allows(&Lock { pincode: 7 }, &Till::default(), &()));
        assert!(!guard.allows(&Lock { pincode: 0 }, &Till::default(), &()));
    }

    #[test]
    fn source_guard_sees_the_source_state() {
        let guard = Guard::with_source(|_: &Lock, _: &Till, _: &Unlocked| true);
        assert_eq!(guard.shape(), HandlerShape::EventContextSource);
        assert!(guard.allows(&Lock { pincode: 1 }, &Till::default(), &Unlocked));
    }

    #[test]
    fn target_guard_gets_a_default_candidate() {
        let guard = Guard::with_target(|event: &Lock, till: &Till, _: &Unlocked, _: &Locked| {
            till.armed && event.pincode != 0
        });
        assert_eq!(guard.shape(), HandlerShape::EventContextSourceTarget);
        let armed = Till { armed: true };
        assert!(guard.allows(&Lock { pincode: 9 }, &armed, &Unlocked));
        assert!(!guard.allows(&Lock { pincode: 9 }, &Till::default(), &Unlocked));
    }

    #[test]
    fn not_inverts_the_predicate() {
        let guard = Guard::on_event(|event: &Lock, _: &Till| event.pincode != 0).not();
        assert!(guard.allows(&Lock { pincode: 0 }, &Till::default(), &()));
        assert!(!guard.allows(&Lock { pincode: 5 }, &Till::default(), &()));
    }

    #[test]
    fn and_requires_both() {
        let nonzero = Guard::on_event(|event: &Lock, _: &Till| event.pincode != 0);
        let armed = Guard::on_event(|_: &Lock, till: &Till| till.armed);
        let guard = nonzero.and(armed);
        assert!(guard.allows(&Lock { pincode: 4 }, &Till { armed: true }, &()));
        assert!(!guard.allows(&Lock { pincode: 4 }, &Till::default(), &()));
        assert!(!guard.allows(&Lock { pincode: 0 }, &Till { armed: true }, &()));
    }

    #[test]
    fn or_accepts_either() {
        let nonzero = Guard::on_event(|event: &Lock, _: &Till| event.pincode != 0);
        let armed = Guard::on_event(|_: &Lock, till: &Till| till.armed);
        let guard = nonzero.or(armed);
        assert!(guard.allows(&Lock { pincode: 0 }, &Till { armed: true }, &()));
        assert!(guard.allows(&Lock { pincode: 3 }, &Till::default(), &()));
        assert!(!guard.allows(&Lock { pincode: 0 }, &Till::default(), &()));
    }

    #[test]
    fn combined_shape_is_the_richer_of_the_two() {
        let event_only = Guard::on_event(|_: &Lock, _: &Till| true);
        let with_source = Guard::with_source(|_: &Lock, _: &Till, _: &Unlocked| true);
        assert_eq!(
            event_only.and(with_source).shape(),
            HandlerShape::EventContextSource
        );
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::on_event(|event: &Lock, _: &Till| event.pincode > 10);
        let event = Lock { pincode: 11 };
        let first = guard.allows(&event, &Till::default(), &());
        let second = guard.allows(&event, &Till::default(), &());
        assert_eq!(first, second);
    }
}
