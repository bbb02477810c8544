//! Serial host event pump.
//!
//! The host owns the producer side of a bounded channel (see
//! `core_events::EVENT_CHANNEL_CAP`) and pushes commands and
//! notifications; this loop drains them one at a time, so controller
//! state is never touched concurrently with a step's critical section.

use core_events::{CommandRequest, EditorSurface, HostEvent};
use tokio::sync::mpsc::Receiver;
use tracing::{info, warn};

use crate::controller::CycleController;

/// Dispatch host events until the channel closes.
pub async fn run_event_pump<S: EditorSurface>(
    controller: &mut CycleController,
    surface: &mut S,
    events: &mut Receiver<HostEvent>,
) {
    while let Some(event) = events.recv().await {
        dispatch_event(controller, surface, event).await;
    }
    info!(target: "cycle.runtime", "event_channel_closed");
}

/// Handle a single host event. Command failures are logged here; cycling
/// failures are already absorbed into the step outcome.
pub async fn dispatch_event<S: EditorSurface>(
    controller: &mut CycleController,
    surface: &mut S,
    event: HostEvent,
) {
    match event {
        HostEvent::Command(CommandRequest::CycleStep) => {
            controller.cycle_step(surface).await;
        }
        HostEvent::Command(CommandRequest::ApplyCase(kind)) => {
            if let Err(e) = controller.apply_case(surface, kind) {
                warn!(target: "cycle.runtime", kind = kind.label(), error = %e, "apply_case_failed");
            }
        }
        HostEvent::Command(CommandRequest::SortSelection) => {
            if let Err(e) = core_sort::sort_selected_ranges(surface) {
                warn!(target: "cycle.runtime", error = %e, "sort_selection_failed");
            }
        }
        HostEvent::SelectionChanged => controller.on_selection_changed(),
        HostEvent::DocumentChanged { at } => controller.on_document_changed(at),
        HostEvent::ConfigChanged(config) => controller.on_config_changed(config),
    }
}
