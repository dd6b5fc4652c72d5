//! Minimal three-state machine with no guards and no actions.
//!
//! Run with: cargo run --example minimal

use shunt::core::{Event, State};
use shunt::table::{BuildError, Transition, TransitionTable};
use shunt::{state_set, Definition, EventResult, Machine};

struct Start;
struct Stop;
impl Event for Start {}
impl Event for Stop {}

#[derive(Default)]
struct Initial;
#[derive(Default)]
struct Running;
#[derive(Default)]
struct Terminated;

#[derive(Default)]
struct Minimal;

impl State<Minimal> for Initial {}
impl State<Minimal> for Running {}
impl State<Minimal> for Terminated {}

state_set! {
    enum MinimalState for Minimal {
        Initial,
        Running,
        Terminated,
    }
}

impl Definition for Minimal {
    type States = MinimalState;

    fn initial_state() -> MinimalState {
        Initial.into()
    }

    fn transitions() -> Result<TransitionTable<Self>, BuildError> {
        TransitionTable::builder()
            .transition(Transition::new::<Initial, Start, Running>())
            .transition(Transition::new::<Running, Stop, Terminated>())
            .build()
    }
}

fn main() {
    let mut fsm = Machine::<Minimal>::new().expect("minimal table is well formed");

    assert!(fsm.is_in_state::<Initial>());
    assert_eq!(fsm.process_event(Start), EventResult::Done);
    assert!(fsm.is_in_state::<Running>());
    assert_eq!(fsm.process_event(Stop), EventResult::Done);
    assert!(fsm.is_in_state::<Terminated>());

    println!("minimal machine ran Initial -> Running -> Terminated");
}
