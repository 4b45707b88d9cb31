//! Pixel geometry of the strip: mapping times to x offsets and back.
//!
//! All x values here are relative to the left edge of the usable strip,
//! i.e. with the horizontal padding already removed.

use crate::schedule::{TimeBlock, TimeOfDay, MINUTES_PER_DAY};

pub const PADDING: i32 = 20;
pub const VERTICAL_PADDING: i32 = 20;
pub const TIMELINE_HEIGHT: i32 = 20;

/// Pixel layout of the drawing surface, supplied by the host on every paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRegion {
    pub width: i32,
    pub height: i32,
    pub padding_horizontal: i32,
    pub padding_vertical: i32,
    pub timeline_strip_height: i32,
}

impl RenderRegion {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            padding_horizontal: PADDING,
            padding_vertical: VERTICAL_PADDING,
            timeline_strip_height: TIMELINE_HEIGHT,
        }
    }

    /// Region whose usable width is exactly `usable_width`.
    #[cfg(test)]
    pub fn with_usable_width(usable_width: i32, height: i32) -> Self {
        Self::new(usable_width + 2 * PADDING, height)
    }

    pub fn usable_width(&self) -> i32 {
        self.width - 2 * self.padding_horizontal
    }

    pub fn panel_height(&self) -> i32 {
        self.height - 2 * self.padding_vertical
    }

    /// Height of the block area above the hour labels.
    pub fn bar_height(&self) -> i32 {
        self.panel_height() - self.timeline_strip_height
    }

    /// Converts a region-local pointer x into a strip x, or `None` in the margins.
    pub fn strip_x(&self, pointer_x: f32) -> Option<i32> {
        let usable = self.usable_width();
        if usable <= 0 {
            return None;
        }
        let x = (pointer_x.floor() as i32) - self.padding_horizontal;
        (0..=usable).contains(&x).then_some(x)
    }
}

/// Maps a time to its x offset in `[0, usable_width)`, measured from `anchor`.
pub fn x_for_time(t: TimeOfDay, anchor: TimeOfDay, usable_width: i32) -> i32 {
    if usable_width <= 0 {
        return 0;
    }
    let minutes = anchor.minutes_until(t) as i64;
    (minutes * usable_width as i64 / MINUTES_PER_DAY as i64) as i32
}

/// Like [`x_for_time`], but an end time equal to the anchor sits at the right edge.
fn x_for_end(t: TimeOfDay, anchor: TimeOfDay, usable_width: i32) -> i32 {
    if t == anchor {
        usable_width.max(0)
    } else {
        x_for_time(t, anchor, usable_width)
    }
}

/// The pixel interval a block occupies on the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub x_start: i32,
    pub x_end: i32,
    /// The span runs off the right edge and continues from the left.
    pub wraps: bool,
}

impl BlockSpan {
    /// Effective width, counting both halves of a wrapping span.
    #[cfg(test)]
    pub fn width(&self, usable_width: i32) -> i32 {
        if self.wraps {
            usable_width - self.x_start + self.x_end
        } else {
            self.x_end - self.x_start
        }
    }

    pub fn contains(&self, x: i32) -> bool {
        if self.wraps {
            x >= self.x_start || x <= self.x_end
        } else {
            x >= self.x_start && x <= self.x_end
        }
    }

    /// Drawn `[start, end]` pieces: one for a plain span, two for a wrapping one.
    pub fn segments(&self, usable_width: i32) -> impl Iterator<Item = (i32, i32)> {
        let (first, second) = if self.wraps {
            ((self.x_start, usable_width), Some((0, self.x_end)))
        } else {
            ((self.x_start, self.x_end), None)
        };
        std::iter::once(first).chain(second)
    }

    /// The widest drawn segment, where a label has the most room.
    pub fn label_segment(&self, usable_width: i32) -> (i32, i32) {
        self.segments(usable_width)
            .max_by_key(|(start, end)| end - start)
            .unwrap_or((self.x_start, self.x_end))
    }
}

pub fn resolve_span(block: &TimeBlock, anchor: TimeOfDay, usable_width: i32) -> BlockSpan {
    let x_start = x_for_time(block.start, anchor, usable_width);
    let x_end = x_for_end(block.end, anchor, usable_width).min(usable_width.max(0));

    BlockSpan {
        x_start,
        x_end,
        wraps: x_end < x_start,
    }
}

/// Index of the first block in schedule order whose span contains strip x `x`.
pub fn find_block_at(
    x: i32,
    schedule: &[TimeBlock],
    anchor: TimeOfDay,
    usable_width: i32,
) -> Option<usize> {
    if usable_width <= 0 || !(0..=usable_width).contains(&x) {
        return None;
    }
    schedule
        .iter()
        .position(|block| resolve_span(block, anchor, usable_width).contains(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_x_for_time_in_range_and_monotonic() {
        let width = 1000;
        for anchor in (0..1440).step_by(37) {
            let anchor = TimeOfDay::from_minutes(anchor).unwrap();
            let mut last = 0;
            for offset in 0..1440u32 {
                let minute = (anchor.minutes() as u32 + offset) % 1440;
                let x = x_for_time(TimeOfDay::from_minutes(minute).unwrap(), anchor, width);
                assert!((0..width).contains(&x));
                assert!(x >= last);
                last = x;
            }
        }
    }

    #[test]
    fn test_anchor_maps_to_zero() {
        for anchor in ["00:00", "06:00", "13:37", "23:59"] {
            assert_eq!(x_for_time(t(anchor), t(anchor), 777), 0);
        }
    }

    #[test]
    fn test_zero_width_maps_to_zero() {
        assert_eq!(x_for_time(t("12:00"), t("06:00"), 0), 0);
        assert_eq!(x_for_time(t("12:00"), t("06:00"), -40), 0);
        let block = TimeBlock::new(t("07:00"), t("08:00"), "A");
        assert_eq!(find_block_at(0, &[block], t("06:00"), 0), None);
    }

    #[test]
    fn test_full_day_block_covers_strip() {
        let block = TimeBlock::new(t("06:00"), t("06:00"), "Day");
        let span = resolve_span(&block, t("06:00"), 1440);
        assert_eq!(span, BlockSpan { x_start: 0, x_end: 1440, wraps: false });
        assert_eq!(span.width(1440), 1440);
    }

    #[test]
    fn test_zero_width_block() {
        let block = TimeBlock::new(t("10:00"), t("10:00"), "Blip");
        let span = resolve_span(&block, t("06:00"), 1440);
        assert_eq!(span.x_start, span.x_end);
        assert_eq!(span.width(1440), 0);
        assert!(!span.wraps);
    }

    #[test]
    fn test_morning_block_span() {
        let block = TimeBlock::new(t("06:00"), t("09:00"), "A");
        let span = resolve_span(&block, t("06:00"), 1440);
        assert_eq!(span, BlockSpan { x_start: 0, x_end: 180, wraps: false });
    }

    #[test]
    fn test_block_ending_at_anchor_reaches_right_edge() {
        let block = TimeBlock::new(t("22:00"), t("06:00"), "Sleep");
        let span = resolve_span(&block, t("06:00"), 1440);
        assert_eq!(span, BlockSpan { x_start: 960, x_end: 1440, wraps: false });
    }

    #[test]
    fn test_right_edge_pixel_hits_block_ending_at_anchor() {
        let anchor = t("06:00");
        let full_day = vec![TimeBlock::new(t("06:00"), t("06:00"), "Day")];
        assert_eq!(find_block_at(1440, &full_day, anchor, 1440), Some(0));
        assert_eq!(find_block_at(0, &full_day, anchor, 1440), Some(0));

        let sleep = vec![TimeBlock::new(t("22:00"), t("06:00"), "Sleep")];
        assert_eq!(find_block_at(1440, &sleep, anchor, 1440), Some(0));
        assert_eq!(find_block_at(960, &sleep, anchor, 1440), Some(0));
        assert_eq!(find_block_at(0, &sleep, anchor, 1440), None);
        assert_eq!(find_block_at(1441, &sleep, anchor, 1440), None);

        let region = RenderRegion::with_usable_width(1440, 120);
        let x = region.strip_x(1460.0).unwrap();
        assert_eq!(find_block_at(x, &sleep, anchor, region.usable_width()), Some(0));
    }

    #[test]
    fn test_midnight_block_hit_at_both_edges() {
        let schedule = vec![TimeBlock::new(t("23:00"), t("01:00"), "Night")];
        let anchor = t("00:00");
        let span = resolve_span(&schedule[0], anchor, 1440);
        assert!(span.wraps);
        assert_eq!(span.width(1440), 120);

        assert_eq!(find_block_at(1430, &schedule, anchor, 1440), Some(0));
        assert_eq!(find_block_at(10, &schedule, anchor, 1440), Some(0));
        assert_eq!(find_block_at(720, &schedule, anchor, 1440), None);
    }

    #[test]
    fn test_wrapping_segments() {
        let block = TimeBlock::new(t("05:00"), t("08:00"), "Overlap");
        let span = resolve_span(&block, t("06:00"), 1440);
        assert!(span.wraps);
        let segments: Vec<_> = span.segments(1440).collect();
        assert_eq!(segments, vec![(1380, 1440), (0, 120)]);
        assert_eq!(span.label_segment(1440), (0, 120));
    }

    #[test]
    fn test_overlap_first_in_schedule_wins() {
        let schedule = vec![
            TimeBlock::new(t("08:00"), t("10:00"), "First"),
            TimeBlock::new(t("08:00"), t("10:00"), "Second"),
        ];
        assert_eq!(find_block_at(150, &schedule, t("06:00"), 1440), Some(0));
    }

    #[test]
    fn test_outside_blocks_is_none() {
        let schedule = vec![TimeBlock::new(t("06:00"), t("09:00"), "A")];
        assert_eq!(find_block_at(500, &schedule, t("06:00"), 1440), None);
        assert_eq!(find_block_at(-5, &schedule, t("06:00"), 1440), None);
        assert!(find_block_at(0, &[], t("06:00"), 1440).is_none());
    }

    #[test]
    fn test_strip_x_excludes_margins() {
        let region = RenderRegion::with_usable_width(1440, 120);
        assert_eq!(region.usable_width(), 1440);
        assert_eq!(region.strip_x(10.0), None);
        assert_eq!(region.strip_x(20.0), Some(0));
        assert_eq!(region.strip_x(200.5), Some(180));
        assert_eq!(region.strip_x(1461.0), None);
        assert_eq!(RenderRegion::new(30, 120).strip_x(15.0), None);
    }
}
