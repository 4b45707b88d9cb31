//! Builds the ordered draw list for one frame of the strip.
//!
//! Layers, back to front: progress fill, hour ticks, blocks that are not
//! hovered, the now indicator, then the hovered block popped out on top.
//! Coordinates are local to the render region (origin at its top-left).

use egui::{pos2, vec2, Align2, Color32, Pos2, Rect};

use super::geometry::{resolve_span, x_for_time, BlockSpan, RenderRegion};
use super::text::{fit_label, TextMetrics, LABEL_INSET};
use crate::config::{Palette, Rgba};
use crate::schedule::{TimeBlock, TimeOfDay};

/// Alpha applied to blocks (and their labels) that sit behind a hovered block.
pub const FADED_ALPHA: u8 = 100;

const TICK_LENGTH: f32 = 5.0;
const TICK_LABEL_GAP: f32 = 3.0;
const NOW_MARKER_WIDTH: f32 = 2.0;
const NOW_MARKER_OVERHANG: f32 = 10.0;
const POP_OFFSET: egui::Vec2 = vec2(5.0, -10.0);
const HOVER_LABEL_INSET: f32 = 10.0;
const HIGHLIGHT_MARGIN: f32 = 5.0;
const SHADOW: Rgba = Rgba::new(100, 100, 100, 150);
const HIGHLIGHT: Rgba = Rgba::new(20, 20, 20, 255);

/// Which font a piece of text is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    HourLabel,
    BlockLabel,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect { rect: Rect, color: Color32 },
    StrokeRect { rect: Rect, color: Color32 },
    Line { from: Pos2, to: Pos2, color: Color32 },
    Text { pos: Pos2, align: Align2, text: String, color: Color32, role: TextRole },
}

/// How a block is painted this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockVisual {
    Normal,
    Faded,
    Hovered,
}

impl BlockVisual {
    pub fn for_block(index: usize, hovered: Option<usize>) -> Self {
        match hovered {
            None => BlockVisual::Normal,
            Some(h) if h == index => BlockVisual::Hovered,
            Some(_) => BlockVisual::Faded,
        }
    }
}

/// Everything one frame is derived from.
pub struct FrameInput<'a> {
    pub schedule: &'a [TimeBlock],
    pub anchor: TimeOfDay,
    pub palette: &'a Palette,
    pub region: RenderRegion,
    pub now: TimeOfDay,
    pub hovered: Option<usize>,
}

pub fn compose_frame(input: &FrameInput<'_>, metrics: &dyn TextMetrics) -> Vec<DrawOp> {
    let region = input.region;
    let usable = region.usable_width();
    if usable <= 0 || region.bar_height() <= 0 {
        return Vec::new();
    }

    let mut painter = FramePainter {
        ops: Vec::new(),
        region,
        palette: input.palette,
        metrics,
    };

    let now_x = x_for_time(input.now, input.anchor, usable);
    painter.progress_fill(now_x);
    painter.hour_ticks(input.anchor);

    // Drop a hover index that no longer points into the schedule.
    let hovered = input.hovered.filter(|&i| i < input.schedule.len());

    for (index, block) in input.schedule.iter().enumerate() {
        let visual = BlockVisual::for_block(index, hovered);
        if visual != BlockVisual::Hovered {
            let span = resolve_span(block, input.anchor, usable);
            painter.block(block, span, visual);
        }
    }

    painter.now_indicator(now_x);

    if let Some(index) = hovered {
        let block = &input.schedule[index];
        let span = resolve_span(block, input.anchor, usable);
        painter.block(block, span, BlockVisual::Hovered);
    }

    painter.ops
}

struct FramePainter<'a> {
    ops: Vec<DrawOp>,
    region: RenderRegion,
    palette: &'a Palette,
    metrics: &'a dyn TextMetrics,
}

impl FramePainter<'_> {
    fn left(&self) -> f32 {
        self.region.padding_horizontal as f32
    }

    fn top(&self) -> f32 {
        self.region.padding_vertical as f32
    }

    fn bar_height(&self) -> f32 {
        self.region.bar_height() as f32
    }

    fn fill(&mut self, rect: Rect, color: impl Into<Color32>) {
        self.ops.push(DrawOp::FillRect { rect, color: color.into() });
    }

    fn stroke(&mut self, rect: Rect, color: impl Into<Color32>) {
        self.ops.push(DrawOp::StrokeRect { rect, color: color.into() });
    }

    fn text(&mut self, pos: Pos2, align: Align2, text: String, color: impl Into<Color32>, role: TextRole) {
        self.ops.push(DrawOp::Text { pos, align, text, color: color.into(), role });
    }

    fn progress_fill(&mut self, now_x: i32) {
        let rect = Rect::from_min_size(
            pos2(self.left(), self.top()),
            vec2(now_x as f32, self.bar_height()),
        );
        self.fill(rect, self.palette.progress_fill);
    }

    fn hour_ticks(&mut self, anchor: TimeOfDay) {
        let usable = self.region.usable_width();
        let tick_top = self.top() + self.bar_height();
        let label_bottom = self.top() + self.region.panel_height() as f32 - TICK_LABEL_GAP;
        let color = self.palette.timeline;

        for hour in 0..=24u16 {
            let x = self.left() + (hour as i32 * usable / 24) as f32;
            self.ops.push(DrawOp::Line {
                from: pos2(x, tick_top),
                to: pos2(x, tick_top + TICK_LENGTH),
                color: color.into(),
            });
            self.text(
                pos2(x, label_bottom),
                Align2::CENTER_BOTTOM,
                anchor.plus_hours(hour).hour_label(),
                color,
                TextRole::HourLabel,
            );
        }
    }

    fn now_indicator(&mut self, now_x: i32) {
        let rect = Rect::from_min_size(
            pos2(
                self.left() + now_x as f32 - NOW_MARKER_WIDTH / 2.0,
                self.top() - NOW_MARKER_OVERHANG,
            ),
            vec2(NOW_MARKER_WIDTH, self.region.panel_height() as f32),
        );
        self.fill(rect, self.palette.current_time);
    }

    /// Rectangle for the strip-x interval `[start, end]`; zero-width spans stay 1px wide.
    fn segment_rect(&self, (start, end): (i32, i32)) -> Rect {
        Rect::from_min_size(
            pos2(self.left() + start as f32, self.top()),
            vec2((end - start).max(1) as f32, self.bar_height()),
        )
    }

    fn block(&mut self, block: &TimeBlock, span: BlockSpan, visual: BlockVisual) {
        match visual {
            BlockVisual::Normal | BlockVisual::Faded => self.resting_block(block, span, visual),
            BlockVisual::Hovered => self.popped_block(block, span),
        }
    }

    fn resting_block(&mut self, block: &TimeBlock, span: BlockSpan, visual: BlockVisual) {
        let usable = self.region.usable_width();
        let (fill, font) = if visual == BlockVisual::Faded {
            (
                self.palette.block.with_alpha_at_most(FADED_ALPHA),
                self.palette.font.with_alpha_at_most(FADED_ALPHA),
            )
        } else {
            (self.palette.block, self.palette.font)
        };

        for segment in span.segments(usable) {
            let rect = self.segment_rect(segment);
            self.fill(rect, fill);
            self.stroke(rect, self.palette.block_border);
        }

        let rect = self.segment_rect(span.label_segment(usable));
        let Some(label) = fit_label(&block.label, rect.width(), rect.height(), self.metrics) else {
            return;
        };

        let mut y = label.first_line_top(rect.min.y, rect.height());
        for line in label.lines {
            self.text(
                pos2(rect.min.x + LABEL_INSET, y),
                Align2::LEFT_TOP,
                line,
                font,
                TextRole::BlockLabel,
            );
            y += label.line_height;
        }
    }

    fn popped_block(&mut self, block: &TimeBlock, span: BlockSpan) {
        let usable = self.region.usable_width();

        for segment in span.segments(usable) {
            let rect = self.segment_rect(segment);
            self.fill(rect, SHADOW);
            let popped = rect.translate(POP_OFFSET);
            self.fill(popped, self.palette.block_hover);
            self.stroke(popped, self.palette.block_border);
        }

        let label = block.label.trim();
        if label.is_empty() {
            return;
        }

        // Full label, never truncated, on a solid plate so it reads over neighbours.
        let popped = self.segment_rect(span.label_segment(usable)).translate(POP_OFFSET);
        let line_height = self.metrics.line_height();
        let text_pos = pos2(
            popped.min.x + HOVER_LABEL_INSET,
            popped.center().y - line_height / 2.0,
        );
        let plate = Rect::from_min_size(
            text_pos - vec2(HIGHLIGHT_MARGIN, HIGHLIGHT_MARGIN),
            vec2(
                self.metrics.text_width(label) + 2.0 * HIGHLIGHT_MARGIN,
                line_height + 2.0 * HIGHLIGHT_MARGIN,
            ),
        );
        self.fill(plate, HIGHLIGHT);
        self.text(text_pos, Align2::LEFT_TOP, label.to_string(), Color32::WHITE, TextRole::BlockLabel);
    }
}
