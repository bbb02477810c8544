//! Host boundary vocabulary: events delivered by the editing environment,
//! the commands it can request, and the surface trait the transforms are
//! applied through.
//!
//! The host owns the channel producer side and delivers one event at a
//! time; everything here is plain data plus one trait. Surface calls
//! return `anyhow::Result` — a host failure is an ordinary error at this
//! boundary, classified (and swallowed) by the controller above.

use std::sync::atomic::AtomicU64;
use std::time::Instant;

use core_config::Config;
use core_transform::CaseKind;

/// Bounded capacity for the host event channel. Commands are keypress-rate
/// and the three notification kinds are coalescable, so a small buffer is
/// plenty; a full channel applies backpressure to the host rather than
/// dropping edits.
pub const EVENT_CHANNEL_CAP: usize = 256;

// Telemetry counters (relaxed fetch_add, no locking). Inspected in tests
// and suitable for periodic logging by the host.
pub static CYCLE_TRIGGERS_TOTAL: AtomicU64 = AtomicU64::new(0);
pub static CYCLE_TRIGGERS_DROPPED: AtomicU64 = AtomicU64::new(0); // guard held by an in-flight step
pub static CYCLE_SESSIONS_STARTED: AtomicU64 = AtomicU64::new(0);
pub static CYCLE_SESSIONS_RESET: AtomicU64 = AtomicU64::new(0);
pub static UNDO_POLL_TIMEOUTS: AtomicU64 = AtomicU64::new(0);

/// Top-level event enum consumed by the serial event pump.
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// A user-invoked command.
    Command(CommandRequest),
    /// The selection moved or changed to different content.
    SelectionChanged,
    /// Document content changed; `at` is when the host observed the change,
    /// compared against the last programmatic edit stamp to tell echoes of
    /// our own writes from real user edits.
    DocumentChanged { at: Instant },
    /// Settings were edited; carries the freshly loaded configuration.
    ConfigChanged(Config),
}

/// The three entry points the host can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandRequest {
    /// Step the active cycling session (or start one).
    CycleStep,
    /// Apply one specific case form to the selection, outside any session.
    ApplyCase(CaseKind),
    /// Sort the selected line ranges as indentation blocks.
    SortSelection,
}

/// One selected line range as reported by the host: raw anchor/head line
/// numbers, in selection order (head may precede anchor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSpan {
    pub anchor_line: usize,
    pub head_line: usize,
}

impl SelectionSpan {
    pub fn new(anchor_line: usize, head_line: usize) -> Self {
        Self {
            anchor_line,
            head_line,
        }
    }

    /// Inclusive `(start, end)` line bounds with `start <= end`.
    pub fn normalized(self) -> (usize, usize) {
        (
            self.anchor_line.min(self.head_line),
            self.anchor_line.max(self.head_line),
        )
    }
}

/// Editing surface the host implements.
///
/// Line numbers are zero-based; ranges are inclusive on both ends.
/// `replace_keeping_selection` is the preferred write path (the selection
/// stays anchored over the new text so the next cycle step can read it
/// back); `replace_selection` is the plain fallback used when the
/// read-back does not match.
pub trait EditorSurface {
    fn read_selection(&self) -> anyhow::Result<String>;
    fn replace_keeping_selection(&mut self, text: &str) -> anyhow::Result<()>;
    fn replace_selection(&mut self, text: &str) -> anyhow::Result<()>;
    fn undo_last_change(&mut self) -> anyhow::Result<()>;
    fn line(&self, number: usize) -> anyhow::Result<String>;
    fn selected_line_ranges(&self) -> anyhow::Result<Vec<SelectionSpan>>;
    fn replace_line_range(&mut self, text: &str, span: SelectionSpan) -> anyhow::Result<()>;
}
