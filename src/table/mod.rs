//! Declarative transition descriptors and the validated transition table.

mod descriptor;
mod error;
mod transitions;

pub use descriptor::{Internal, InternalTable, Transition};
pub use error::BuildError;
pub use transitions::{TableBuilder, TransitionTable};
