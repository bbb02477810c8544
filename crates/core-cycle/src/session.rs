//! State of the one active cycling session.
//!
//! A session binds a resolved cycle list to the selection text captured
//! when cycling began. It is created by the controller on a fresh
//! selection and destroyed — every field cleared — when the selection
//! moves, the document changes outside the controller's own edits, or the
//! configuration changes.

use std::time::Instant;

use core_transform::CaseKind;

#[derive(Debug, Default)]
pub struct CycleState {
    /// Enabled kinds in cycle order; immutable for the session's lifetime.
    cycle_list: Vec<CaseKind>,
    /// Position in `cycle_list`, wrapping modulo its length.
    index: usize,
    /// Selection captured at session start. `Some` iff a session is active.
    initial_text: Option<String>,
    /// Text produced by the last applied step; convergence and
    /// duplicate-selection checks compare against this.
    previous_result: String,
    /// Stamp of the most recent program-initiated mutation, used to tell
    /// change-notification echoes from real user edits.
    last_programmatic_change_at: Option<Instant>,
}

impl CycleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_active(&self) -> bool {
        self.initial_text.is_some()
    }

    pub fn initial_text(&self) -> Option<&str> {
        self.initial_text.as_deref()
    }

    pub fn previous_result(&self) -> &str {
        &self.previous_result
    }

    pub fn cycle_list(&self) -> &[CaseKind] {
        &self.cycle_list
    }

    pub fn current_kind(&self) -> Option<CaseKind> {
        self.cycle_list.get(self.index).copied()
    }

    pub fn last_programmatic_change_at(&self) -> Option<Instant> {
        self.last_programmatic_change_at
    }

    /// True while the last applied result has drifted from the captured
    /// original, i.e. the next step must first restore via undo.
    pub fn needs_restore(&self) -> bool {
        self.initial_text
            .as_deref()
            .is_some_and(|initial| initial != self.previous_result)
    }

    pub(crate) fn begin_session(&mut self, cycle_list: Vec<CaseKind>, initial_text: String) {
        self.cycle_list = cycle_list;
        self.index = 0;
        self.previous_result = initial_text.clone();
        self.initial_text = Some(initial_text);
    }

    pub(crate) fn advance(&mut self) {
        if !self.cycle_list.is_empty() {
            self.index = (self.index + 1) % self.cycle_list.len();
        }
    }

    pub(crate) fn rewind(&mut self) {
        self.index = 0;
    }

    pub(crate) fn record_result(&mut self, text: String) {
        self.previous_result = text;
    }

    pub(crate) fn mark_programmatic_change(&mut self) {
        self.last_programmatic_change_at = Some(Instant::now());
    }

    /// Destroy the session.
    pub(crate) fn reset(&mut self) {
        self.cycle_list.clear();
        self.index = 0;
        self.initial_text = None;
        self.previous_result.clear();
        self.last_programmatic_change_at = None;
    }
}
