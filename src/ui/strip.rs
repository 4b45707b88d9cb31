//! egui widget hosting the timeline strip.

use std::time::Duration;

use egui::{Color32, FontId, Sense, Stroke, Ui};

use crate::config::Settings;
use crate::schedule::{TimeBlock, TimeOfDay};
use crate::timeline::{
    compose_frame, DrawOp, FrameInput, RenderRegion, TextMetrics, TextRole, TimelineEvent,
    TimelineState,
};

/// How often the strip repaints to advance the now indicator.
pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

const LABEL_FONT_SIZE: f32 = 14.0;

/// Measures text with egui's font atlas.
struct EguiTextMetrics<'a> {
    ctx: &'a egui::Context,
    font: FontId,
}

impl TextMetrics for EguiTextMetrics<'_> {
    fn text_width(&self, text: &str) -> f32 {
        self.ctx.fonts(|f| {
            f.layout_no_wrap(text.to_owned(), self.font.clone(), Color32::WHITE)
                .size()
                .x
        })
    }

    fn line_height(&self) -> f32 {
        self.ctx.fonts(|f| f.row_height(&self.font))
    }
}

fn font_for(role: TextRole) -> FontId {
    match role {
        TextRole::HourLabel | TextRole::BlockLabel => FontId::proportional(LABEL_FONT_SIZE),
    }
}

/// Turns egui's per-frame pointer state into strip events and paints the result.
#[derive(Default)]
pub struct TimelineStrip {
    state: TimelineState,
    pointer_inside: bool,
    last_tick: Option<TimeOfDay>,
}

impl TimelineStrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call when the schedule or settings were replaced wholesale.
    pub fn reset(&mut self) {
        self.state.clear_hover();
    }

    pub fn show(&mut self, ui: &mut Ui, schedule: &[TimeBlock], settings: &Settings, now: TimeOfDay) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let region = RenderRegion::new(rect.width() as i32, rect.height() as i32);
        let anchor = settings.start_of_day;

        let mut events = Vec::with_capacity(2);
        if self.last_tick != Some(now) {
            self.last_tick = Some(now);
            events.push(TimelineEvent::Tick);
        }
        match response.hover_pos() {
            Some(pos) => {
                self.pointer_inside = true;
                events.push(TimelineEvent::PointerMoved(pos - rect.min.to_vec2()));
            }
            None if self.pointer_inside => {
                self.pointer_inside = false;
                events.push(TimelineEvent::PointerExited);
            }
            None => {}
        }

        let mut repaint = false;
        for event in events {
            repaint |= self.state.handle(event, schedule, anchor, region);
        }
        if repaint {
            ui.ctx().request_repaint();
        }
        ui.ctx().request_repaint_after(TICK_INTERVAL);

        let input = FrameInput {
            schedule,
            anchor,
            palette: &settings.colors,
            region,
            now,
            hovered: self.state.hovered(),
        };
        let metrics = EguiTextMetrics {
            ctx: ui.ctx(),
            font: font_for(TextRole::BlockLabel),
        };
        let ops = compose_frame(&input, &metrics);

        let painter = ui.painter_at(rect);
        let offset = rect.min.to_vec2();
        for op in ops {
            match op {
                DrawOp::FillRect { rect, color } => {
                    painter.rect_filled(rect.translate(offset), 0.0, color);
                }
                DrawOp::StrokeRect { rect, color } => {
                    painter.rect_stroke(rect.translate(offset), 0.0, Stroke::new(1.0, color));
                }
                DrawOp::Line { from, to, color } => {
                    painter.line_segment([from + offset, to + offset], Stroke::new(1.0, color));
                }
                DrawOp::Text { pos, align, text, color, role } => {
                    painter.text(pos + offset, align, text, font_for(role), color);
                }
            }
        }
    }
}
