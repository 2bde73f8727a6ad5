//! Demo request lifecycle: one analysis in flight at a time, observable transitions.

pub mod machine;

pub use machine::{RequestStateMachine, Submission, SubmitRejected, Transition};
