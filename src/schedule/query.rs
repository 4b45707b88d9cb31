//! Answers for the status line: which block is running and how long is left.

use chrono::Duration;

use super::time::TimeOfDay;
use super::types::TimeBlock;

/// First block in schedule order that contains `now`.
pub fn active_block_at(now: TimeOfDay, schedule: &[TimeBlock]) -> Option<&TimeBlock> {
    schedule.iter().find(|block| block.contains(now))
}

/// Time from `now` until the block ends, going round midnight if needed.
pub fn time_remaining(now: TimeOfDay, block: &TimeBlock) -> Duration {
    Duration::minutes(now.minutes_until(block.end) as i64)
}

/// "1 hr 30 min left" or "45 min left".
pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.num_minutes().max(0);
    let hours = total / 60;
    let minutes = total % 60;

    if hours > 0 {
        format!("{} hr {} min left", hours, minutes)
    } else {
        format!("{} min left", minutes)
    }
}

/// Status text for the block running at `now`.
pub fn status_text(now: TimeOfDay, schedule: &[TimeBlock]) -> String {
    match active_block_at(now, schedule) {
        Some(block) => format!(
            "{} - {}",
            block.label,
            format_remaining(time_remaining(now, block))
        ),
        None => "No active block".to_string(),
    }
}
