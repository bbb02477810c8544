//! Case-cycling over the current selection.
//!
//! One repeated command steps a selection through the settings-derived
//! sequence of case forms (original, lower, upper, title, sentence, and
//! the width conversions), distinguishing the controller's own edits from
//! user edits, dropping re-entrant triggers, and recovering the original
//! selection through an undo-and-poll protocol. All state is transient
//! and scoped to the running editor session.

pub mod controller;
pub mod runtime;
pub mod session;

pub use controller::{
    CycleController, CycleError, PROGRAMMATIC_ECHO_GRACE, PollOutcome, StepOutcome,
    UNDO_POLL_INTERVAL, UNDO_POLL_TIMEOUT,
};
pub use runtime::{dispatch_event, run_event_pump};
pub use session::CycleState;
