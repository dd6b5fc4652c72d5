//! Luggage locker guarded by a pincode.
//!
//! Locking stores the pincode in the context; unlocking requires the
//! same pincode and resets it. A `Status` event is handled by an
//! internal transition in both states, so it reports without ever
//! changing the current state.
//!
//! Run with: RUST_LOG=debug cargo run --example luggage_locker

use shunt::core::{Action, Event, Guard, State};
use shunt::table::{BuildError, Internal, InternalTable, Transition, TransitionTable};
use shunt::{state_set, Definition, EventResult, Machine};
use tracing_subscriber::EnvFilter;

struct Lock {
    pincode: u32,
}
struct Unlock {
    pincode: u32,
}
struct Status;
impl Event for Lock {}
impl Event for Unlock {}
impl Event for Status {}

#[derive(Default)]
struct Locked;
#[derive(Default)]
struct Unlocked;

#[derive(Default)]
struct LuggageLocker {
    pincode: u32,
}

impl State<LuggageLocker> for Locked {
    fn internal_transitions() -> InternalTable<LuggageLocker> {
        InternalTable::new().handle(Internal::new::<Status>().action(Action::on_event(
            |_: &Status, _: &mut LuggageLocker| println!("status: locked"),
        )))
    }
}

impl State<LuggageLocker> for Unlocked {
    fn internal_transitions() -> InternalTable<LuggageLocker> {
        InternalTable::new().handle(Internal::new::<Status>().action(Action::on_event(
            |_: &Status, _: &mut LuggageLocker| println!("status: unlocked"),
        )))
    }
}

state_set! {
    enum LockerState for LuggageLocker {
        Locked,
        Unlocked,
    }
}

impl Definition for LuggageLocker {
    type States = LockerState;

    fn initial_state() -> LockerState {
        Unlocked.into()
    }

    fn transitions() -> Result<TransitionTable<Self>, BuildError> {
        TransitionTable::builder()
            .transition(
                Transition::new::<Unlocked, Lock, Locked>()
                    .guard(Guard::on_event(|event: &Lock, _: &LuggageLocker| {
                        event.pincode != 0
                    }))
                    .action(Action::on_event(|event: &Lock, locker: &mut LuggageLocker| {
                        locker.pincode = event.pincode;
                        println!("locked!");
                    })),
            )
            .transition(
                Transition::new::<Locked, Unlock, Unlocked>()
                    .guard(Guard::on_event(|event: &Unlock, locker: &LuggageLocker| {
                        event.pincode == locker.pincode
                    }))
                    .action(Action::on_event(|_: &Unlock, locker: &mut LuggageLocker| {
                        locker.pincode = 0;
                        println!("unlocked!");
                    })),
            )
            .build()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut fsm = Machine::<LuggageLocker>::new().expect("locker table is well formed");

    assert!(fsm.is_in_state::<Unlocked>());
    assert_eq!(fsm.process_event(Status), EventResult::Done); // status: unlocked
    assert_eq!(fsm.process_event(Lock { pincode: 0 }), EventResult::Refuse);
    assert!(fsm.is_in_state::<Unlocked>());
    assert_eq!(fsm.process_event(Lock { pincode: 0x3254 }), EventResult::Done);
    assert!(fsm.is_in_state::<Locked>());
    assert_eq!(fsm.process_event(Status), EventResult::Done); // status: locked
    assert_eq!(fsm.process_event(Unlock { pincode: 0x7258 }), EventResult::Refuse);
    assert!(fsm.is_in_state::<Locked>());
    assert_eq!(fsm.process_event(Unlock { pincode: 0x3254 }), EventResult::Done);
    assert!(fsm.is_in_state::<Unlocked>());
    assert_eq!(fsm.process_event(Status), EventResult::Done); // status: unlocked
}
