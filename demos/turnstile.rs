//! Coin-operated turnstile.
//!
//! Pushing the locked arm beeps (an internal transition, the turnstile
//! stays locked); a coin unlocks it with some blinking; pushing through
//! locks it again.
//!
//! Run with: cargo run --example turnstile

use shunt::core::{Action, Event, State};
use shunt::table::{BuildError, Internal, InternalTable, Transition, TransitionTable};
use shunt::{state_set, Definition, EventResult, Machine};

struct Push;
struct Coin;
impl Event for Push {}
impl Event for Coin {}

#[derive(Default)]
struct Locked;
#[derive(Default)]
struct Unlocked;

#[derive(Default)]
struct Turnstile;

impl State<Turnstile> for Locked {
    fn internal_transitions() -> InternalTable<Turnstile> {
        InternalTable::new().handle(
            Internal::new::<Push>().action(Action::on_event(|_: &Push, _: &mut Turnstile| {
                println!("beep!");
            })),
        )
    }
}

impl State<Turnstile> for Unlocked {}

state_set! {
    enum TurnstileState for Turnstile {
        Locked,
        Unlocked,
    }
}

impl Definition for Turnstile {
    type States = TurnstileState;

    fn initial_state() -> TurnstileState {
        Locked.into()
    }

    fn transitions() -> Result<TransitionTable<Self>, BuildError> {
        TransitionTable::builder()
            .transition(Transition::new::<Locked, Coin, Unlocked>().action(
                Action::with_target(|_: &Coin, _: &mut Turnstile, _: &Locked, _: &Unlocked| {
                    println!("blink, blink, blink!");
                }),
            ))
            .transition(Transition::new::<Unlocked, Push, Locked>())
            .build()
    }
}

fn main() {
    let mut fsm = Machine::<Turnstile>::new().expect("turnstile table is well formed");

    assert!(fsm.is_in_state::<Locked>());
    assert_eq!(fsm.process_event(Push), EventResult::Done); // beep!
    assert_eq!(fsm.process_event(Coin), EventResult::Done); // blink, blink, blink!
    assert!(fsm.is_in_state::<Unlocked>());
    assert_eq!(fsm.process_event(Push), EventResult::Done);
    assert!(fsm.is_in_state::<Locked>());
}
