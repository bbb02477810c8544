//! The cycling controller: one externally triggered entry point that
//! steps the selection through the configured cycle, plus the single-shot
//! case commands and the host event handlers.
//!
//! Mid-cycle steps recover the session's original text by undoing the
//! previous programmatic edit and polling the selection until the undo
//! lands (bounded wait). Each transform is then computed against the
//! restored original rather than the previous step's output, so repeated
//! presses never compound transforms.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use core_config::{Config, ConfigError, resolve_cycle_list};
use core_events::{
    CYCLE_SESSIONS_RESET, CYCLE_SESSIONS_STARTED, CYCLE_TRIGGERS_DROPPED, CYCLE_TRIGGERS_TOTAL,
    EditorSurface, UNDO_POLL_TIMEOUTS,
};
use core_transform::{CaseKind, apply};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::session::CycleState;

/// Interval between selection probes while waiting for an undo to land.
pub const UNDO_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Overall bound on the undo wait; exceeding it aborts the current step.
pub const UNDO_POLL_TIMEOUT: Duration = Duration::from_millis(1500);

/// Content-changed notifications arriving within this window of the
/// controller's own last edit are treated as echoes of that edit. Known
/// false negative kept as-is: a genuinely independent user edit landing
/// inside the window is also read as an echo and does not reset the
/// session.
pub const PROGRAMMATIC_ECHO_GRACE: Duration = Duration::from_secs(3);

#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("host surface failure: {0}")]
    Surface(#[from] anyhow::Error),
}

/// What a single trigger ended up doing. Errors never escape
/// [`CycleController::cycle_step`]; they surface here as [`Failed`]
/// after being logged.
///
/// [`Failed`]: StepOutcome::Failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The named kind's text was produced and recorded (and applied,
    /// unless it matched the restored original exactly).
    Applied(CaseKind),
    /// A previous trigger still held the single-flight guard.
    Dropped,
    /// Selection empty or whitespace-only; nothing to do.
    BlankSelection,
    /// The undo poll hit its deadline; aborted before any write.
    RestoreTimedOut,
    /// Every kind collapsed onto the previous result; cycle rewound.
    Exhausted,
    /// An error was caught and logged; no transform applied.
    Failed,
}

/// Result of the bounded undo poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The selection moved off the pre-undo value; carries the new text.
    Changed(String),
    TimedOut,
}

pub struct CycleController {
    config: Config,
    state: CycleState,
    /// Single-flight guard: set for the whole of one `cycle_step`
    /// execution, including its suspension points. A trigger arriving
    /// while set is dropped, not queued.
    in_progress: AtomicBool,
}

impl CycleController {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: CycleState::new(),
            in_progress: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> &CycleState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Step the active cycling session, starting one if the selection is
    /// fresh. Re-invoked on every user command press.
    pub async fn cycle_step<S: EditorSurface>(&mut self, surface: &mut S) -> StepOutcome {
        CYCLE_TRIGGERS_TOTAL.fetch_add(1, Ordering::Relaxed);
        if self.in_progress.swap(true, Ordering::SeqCst) {
            CYCLE_TRIGGERS_DROPPED.fetch_add(1, Ordering::Relaxed);
            trace!(target: "cycle.step", "trigger_dropped_in_flight");
            return StepOutcome::Dropped;
        }
        let outcome = self.cycle_step_guarded(surface).await;
        self.in_progress.store(false, Ordering::SeqCst);
        match outcome {
            Ok(outcome) => {
                debug!(target: "cycle.step", outcome = ?outcome, "cycle_step_finished");
                outcome
            }
            Err(e) => {
                warn!(target: "cycle.step", error = %e, "cycle_step_failed");
                StepOutcome::Failed
            }
        }
    }

    /// Body of a step; the caller owns the guard around this.
    async fn cycle_step_guarded<S: EditorSurface>(
        &mut self,
        surface: &mut S,
    ) -> Result<StepOutcome, CycleError> {
        let selection = surface.read_selection()?;
        if !self.state.session_active() {
            if selection.trim().is_empty() {
                debug!(target: "cycle.step", "blank_selection_ignored");
                return Ok(StepOutcome::BlankSelection);
            }
            let cycle_list = resolve_cycle_list(&self.config)?;
            debug!(target: "cycle.session", kinds = cycle_list.len(), "session_started");
            CYCLE_SESSIONS_STARTED.fetch_add(1, Ordering::Relaxed);
            self.state.begin_session(cycle_list, selection);
        } else if self.state.needs_restore() {
            // Mid-cycle: bring the selection back to the session original
            // before computing the next form. At most one undo per
            // trigger; convergence retries below never come back here.
            surface.undo_last_change()?;
            self.state.mark_programmatic_change();
            match poll_selection_change(surface, &selection).await? {
                PollOutcome::Changed(_) => {}
                PollOutcome::TimedOut => {
                    UNDO_POLL_TIMEOUTS.fetch_add(1, Ordering::Relaxed);
                    warn!(target: "cycle.step", "undo_restore_timed_out");
                    return Ok(StepOutcome::RestoreTimedOut);
                }
            }
        }

        let Some(initial) = self.state.initial_text().map(str::to_owned) else {
            warn!(target: "cycle.step", "session_vanished_mid_step");
            return Ok(StepOutcome::Failed);
        };

        let mut attempts = 0;
        loop {
            let current = surface.read_selection()?;
            if current.trim().is_empty() {
                debug!(target: "cycle.step", "blank_selection_ignored");
                return Ok(StepOutcome::BlankSelection);
            }
            let Some(kind) = self.state.current_kind() else {
                warn!(target: "cycle.step", "session_without_cycle_list");
                return Ok(StepOutcome::Failed);
            };
            let candidate = match kind {
                CaseKind::Original => initial.clone(),
                other => apply(other, &current, self.config.lowercase_first()),
            };
            if candidate.trim() == self.state.previous_result().trim() {
                // No visible change from the user's perspective; skip to
                // the next kind, bounded by one lap around the cycle.
                self.state.advance();
                attempts += 1;
                if attempts >= self.state.cycle_list().len() {
                    debug!(target: "cycle.step", "cycle_exhausted_no_visible_change");
                    self.state.rewind();
                    return Ok(StepOutcome::Exhausted);
                }
                trace!(target: "cycle.step", kind = kind.label(), "convergence_skip");
                continue;
            }
            if candidate != initial {
                apply_preserving_selection(surface, &candidate)?;
                self.state.mark_programmatic_change();
            }
            trace!(target: "cycle.step", kind = kind.label(), "transform_recorded");
            self.state.record_result(candidate);
            self.state.advance();
            return Ok(StepOutcome::Applied(kind));
        }
    }

    /// Apply one specific case form to the current selection, outside any
    /// cycling session. `CycleState` is untouched.
    pub fn apply_case<S: EditorSurface>(
        &self,
        surface: &mut S,
        kind: CaseKind,
    ) -> Result<(), CycleError> {
        let selection = surface.read_selection()?;
        let candidate = apply(kind, &selection, self.config.lowercase_first());
        if candidate == selection {
            trace!(target: "cycle.step", kind = kind.label(), "single_shot_no_change");
            return Ok(());
        }
        apply_preserving_selection(surface, &candidate)?;
        debug!(target: "cycle.step", kind = kind.label(), "single_shot_applied");
        Ok(())
    }

    /// Host notification: the selection moved or changed content.
    pub fn on_selection_changed(&mut self) {
        self.reset_session("selection_changed");
    }

    /// Host notification: document content changed at `at`. Changes inside
    /// the grace window of our own last edit are assumed to be echoes of
    /// that edit and ignored.
    pub fn on_document_changed(&mut self, at: Instant) {
        if let Some(stamp) = self.state.last_programmatic_change_at()
            && at.saturating_duration_since(stamp) <= PROGRAMMATIC_ECHO_GRACE
        {
            trace!(target: "cycle.session", "document_change_within_grace_ignored");
            return;
        }
        self.reset_session("document_changed");
    }

    /// Host notification: settings changed; adopt them and start over.
    pub fn on_config_changed(&mut self, config: Config) {
        self.config = config;
        self.reset_session("config_changed");
    }

    fn reset_session(&mut self, cause: &'static str) {
        if self.state.session_active() {
            CYCLE_SESSIONS_RESET.fetch_add(1, Ordering::Relaxed);
            debug!(target: "cycle.session", cause, "session_reset");
        }
        self.state.reset();
    }
}

/// Replace the selection, preferring the anchor-preserving path; when the
/// read-back does not match, fall back to a plain replace.
fn apply_preserving_selection<S: EditorSurface>(
    surface: &mut S,
    text: &str,
) -> anyhow::Result<()> {
    surface.replace_keeping_selection(text)?;
    if surface.read_selection()? != text {
        surface.replace_selection(text)?;
    }
    Ok(())
}

/// Probe the selection at a fixed interval until it differs from
/// `before`, or the overall deadline passes.
async fn poll_selection_change<S: EditorSurface>(
    surface: &S,
    before: &str,
) -> Result<PollOutcome, CycleError> {
    let wait = async {
        loop {
            let current = surface.read_selection()?;
            if current != before {
                return Ok::<String, CycleError>(current);
            }
            tokio::time::sleep(UNDO_POLL_INTERVAL).await;
        }
    };
    match tokio::time::timeout(UNDO_POLL_TIMEOUT, wait).await {
        Ok(changed) => Ok(PollOutcome::Changed(changed?)),
        Err(_) => Ok(PollOutcome::TimedOut),
    }
}
