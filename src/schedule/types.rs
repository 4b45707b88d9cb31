use serde::{Deserialize, Serialize};

use super::time::TimeOfDay;

/// A labelled span of the day. `end < start` means the block crosses midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub label: String,
}

impl TimeBlock {
    pub fn new(start: TimeOfDay, end: TimeOfDay, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }

    pub fn is_degenerate(&self) -> bool {
        self.end == self.start
    }

    /// Whether `now` falls in `[start, end)`, wrapping through midnight.
    pub fn contains(&self, now: TimeOfDay) -> bool {
        if self.is_degenerate() {
            false
        } else if self.crosses_midnight() {
            now >= self.start || now < self.end
        } else {
            self.start <= now && now < self.end
        }
    }
}

fn block(start: (u32, u32), end: (u32, u32), label: &str) -> Option<TimeBlock> {
    Some(TimeBlock::new(
        TimeOfDay::from_hm(start.0, start.1).ok()?,
        TimeOfDay::from_hm(end.0, end.1).ok()?,
        label,
    ))
}

/// Schedule used when no schedule file exists yet.
pub fn default_schedule() -> Vec<TimeBlock> {
    [
        block((6, 0), (9, 0), "Leetcode & DSA"),
        block((9, 0), (12, 0), "Real-World Project"),
        block((12, 0), (15, 0), "Classwork & Study"),
        block((15, 0), (17, 0), "Family & Workout"),
        block((17, 0), (20, 0), "Portfolio & Open Source"),
        block((20, 0), (22, 0), "Networking & Job Apps"),
        block((22, 0), (23, 59), "Wind Down & Sleep"),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_contains_plain_block() {
        let b = TimeBlock::new(t("06:00"), t("09:00"), "A");
        assert!(b.contains(t("06:00")));
        assert!(b.contains(t("08:59")));
        assert!(!b.contains(t("09:00")));
        assert!(!b.contains(t("05:59")));
    }

    #[test]
    fn test_contains_midnight_block() {
        let b = TimeBlock::new(t("23:00"), t("01:00"), "Night");
        assert!(b.crosses_midnight());
        assert!(b.contains(t("23:30")));
        assert!(b.contains(t("00:30")));
        assert!(!b.contains(t("01:00")));
        assert!(!b.contains(t("12:00")));
    }

    #[test]
    fn test_degenerate_block_contains_nothing() {
        let b = TimeBlock::new(t("10:00"), t("10:00"), "Blip");
        assert!(b.is_degenerate());
        assert!(!b.contains(t("10:00")));
    }

    #[test]
    fn test_default_schedule() {
        let schedule = default_schedule();
        assert_eq!(schedule.len(), 7);
        assert_eq!(schedule[0].label, "Leetcode & DSA");
        assert_eq!(schedule[6].end, t("23:59"));
    }

    #[test]
    fn test_json_record_shape() {
        let b: TimeBlock =
            serde_json::from_str(r#"{"start":"22:00","end":"23:59","label":"Sleep"}"#).unwrap();
        assert_eq!(b, TimeBlock::new(t("22:00"), t("23:59"), "Sleep"));
    }
}
