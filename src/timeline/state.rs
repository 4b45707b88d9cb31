use egui::Pos2;
use log::debug;

use super::geometry::{find_block_at, RenderRegion};
use crate::schedule::{TimeBlock, TimeOfDay};

/// Inputs that can change what the strip shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimelineEvent {
    /// Periodic timer; the now indicator and progress fill move.
    Tick,
    /// Pointer moved to a region-local position.
    PointerMoved(Pos2),
    PointerExited,
}

/// Transient hover state of the strip. Never persisted.
#[derive(Debug, Default)]
pub struct TimelineState {
    hovered: Option<usize>,
}

impl TimelineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index into the schedule of the block under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Forget the hover, e.g. after the schedule was replaced.
    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    /// Applies an event and returns whether a re-render is needed.
    #[must_use]
    pub fn handle(
        &mut self,
        event: TimelineEvent,
        schedule: &[TimeBlock],
        anchor: TimeOfDay,
        region: RenderRegion,
    ) -> bool {
        match event {
            TimelineEvent::Tick => true,
            TimelineEvent::PointerMoved(pos) => {
                let under_pointer = region
                    .strip_x(pos.x)
                    .and_then(|x| find_block_at(x, schedule, anchor, region.usable_width()));

                if under_pointer == self.hovered {
                    return false;
                }

                debug!(
                    "Hover changed: {:?} -> {:?}",
                    self.hovered.and_then(|i| schedule.get(i)).map(|b| b.label.as_str()),
                    under_pointer.and_then(|i| schedule.get(i)).map(|b| b.label.as_str()),
                );
                self.hovered = under_pointer;
                true
            }
            TimelineEvent::PointerExited => {
                self.hovered = None;
                true
            }
        }
    }
}
