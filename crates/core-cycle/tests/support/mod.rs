#![allow(dead_code)] // Shared across integration test binaries; each uses a subset.

use core_config::{Config, ConfigFile, CycleOrders, DISABLED_ORDER, TransformSettings};
use core_events::{EditorSurface, SelectionSpan};

/// Selection-centric host double. The selection string stands in for the
/// selected document region; replaces snapshot the previous value so
/// `undo_last_change` can restore it, mirroring a one-deep editor undo.
pub struct MockSurface {
    pub selection: String,
    history: Vec<String>,
    pub keep_calls: usize,
    pub plain_calls: usize,
    pub undo_calls: usize,
    /// When false, undo silently does nothing (drives the poll timeout).
    pub undo_effective: bool,
    /// When false, the anchor-preserving replace leaves the selection
    /// stale so callers must fall back to the plain replace.
    pub keep_selection_works: bool,
    /// Reported by `selected_line_ranges`; line reads themselves always
    /// fail, this double only models the selection string.
    pub ranges: Vec<SelectionSpan>,
}

impl MockSurface {
    pub fn with_selection(selection: &str) -> Self {
        Self {
            selection: selection.to_string(),
            history: Vec::new(),
            keep_calls: 0,
            plain_calls: 0,
            undo_calls: 0,
            undo_effective: true,
            keep_selection_works: true,
            ranges: Vec::new(),
        }
    }
}

impl EditorSurface for MockSurface {
    fn read_selection(&self) -> anyhow::Result<String> {
        Ok(self.selection.clone())
    }

    fn replace_keeping_selection(&mut self, text: &str) -> anyhow::Result<()> {
        self.keep_calls += 1;
        self.history.push(self.selection.clone());
        if self.keep_selection_works {
            self.selection = text.to_string();
        }
        Ok(())
    }

    fn replace_selection(&mut self, text: &str) -> anyhow::Result<()> {
        self.plain_calls += 1;
        self.selection = text.to_string();
        Ok(())
    }

    fn undo_last_change(&mut self) -> anyhow::Result<()> {
        self.undo_calls += 1;
        if self.undo_effective
            && let Some(previous) = self.history.pop()
        {
            self.selection = previous;
        }
        Ok(())
    }

    fn line(&self, number: usize) -> anyhow::Result<String> {
        anyhow::bail!("line {number} not modeled by MockSurface")
    }

    fn selected_line_ranges(&self) -> anyhow::Result<Vec<SelectionSpan>> {
        Ok(self.ranges.clone())
    }

    fn replace_line_range(&mut self, _text: &str, _span: SelectionSpan) -> anyhow::Result<()> {
        anyhow::bail!("line ranges not modeled by MockSurface")
    }
}

/// Configuration with explicit cycle orders and the default
/// lowercase-first flag.
pub fn config_with_orders(orders: CycleOrders) -> Config {
    Config {
        raw: None,
        file: ConfigFile {
            cycle: orders,
            transform: TransformSettings::default(),
        },
    }
}

/// Orders producing the three-kind cycle original → upper → lower.
pub fn upper_then_lower() -> CycleOrders {
    CycleOrders {
        lower: 2,
        upper: 1,
        title: DISABLED_ORDER,
        sentence: DISABLED_ORDER,
        fullwidth: DISABLED_ORDER,
        halfwidth: DISABLED_ORDER,
    }
}
