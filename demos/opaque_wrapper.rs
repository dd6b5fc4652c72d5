//! Hiding a machine behind an opaque wrapper type.
//!
//! Consumers of `Motor` see `start`/`stop`/`is_started`; the machine,
//! its states and its events stay private implementation details.
//!
//! Run with: cargo run --example opaque_wrapper

use shunt::core::{Action, Event, State};
use shunt::table::{BuildError, Transition, TransitionTable};
use shunt::{state_set, Definition, Machine};

struct Start;
struct Stop;
impl Event for Start {}
impl Event for Stop {}

#[derive(Default)]
struct Idle;
#[derive(Default)]
struct Running;

#[derive(Default)]
struct MotorControl {
    starts: u32,
}

impl State<MotorControl> for Idle {}
impl State<MotorControl> for Running {}

state_set! {
    enum MotorState for MotorControl {
        Idle,
        Running,
    }
}

impl Definition for MotorControl {
    type States = MotorState;

    fn initial_state() -> MotorState {
        Idle.into()
    }

    fn transitions() -> Result<TransitionTable<Self>, BuildError> {
        TransitionTable::builder()
            .transition(Transition::new::<Idle, Start, Running>().action(Action::on_event(
                |_: &Start, control: &mut MotorControl| {
                    control.starts += 1;
                    println!("started");
                },
            )))
            .transition(
                Transition::new::<Running, Stop, Idle>().action(Action::on_event(
                    |_: &Stop, _: &mut MotorControl| println!("stopped"),
                )),
            )
            .build()
    }
}

/// Public wrapper; the machine is an implementation detail.
struct Motor {
    fsm: Machine<MotorControl>,
}

impl Motor {
    fn new() -> Self {
        Self {
            fsm: Machine::new().expect("motor table is well formed"),
        }
    }

    fn start(&mut self) {
        let _ = self.fsm.process_event(Start);
    }

    fn stop(&mut self) {
        let _ = self.fsm.process_event(Stop);
    }

    fn is_started(&self) -> bool {
        self.fsm.is_in_state::<Running>()
    }

    fn start_count(&self) -> u32 {
        self.fsm.context().starts
    }
}

fn main() {
    let mut motor = Motor::new();

    assert!(!motor.is_started());
    motor.start();
    assert!(motor.is_started());
    motor.stop();
    assert!(!motor.is_started());
    motor.start();
    assert!(motor.is_started());

    println!("motor started {} times", motor.start_count());
}
