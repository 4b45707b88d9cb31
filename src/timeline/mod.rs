mod geometry;
mod render;
mod state;
mod text;

pub use geometry::RenderRegion;
pub use render::{compose_frame, DrawOp, FrameInput, TextRole};
pub use state::{TimelineEvent, TimelineState};
pub use text::TextMetrics;
