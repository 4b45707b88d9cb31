//! Fitting block labels into their rectangles.

pub const ELLIPSIS: &str = "…";

/// Blocks this narrow or narrower get no label.
pub const MIN_LABEL_WIDTH: f32 = 30.0;

/// Gap between a block's edge and its label, on each side.
pub const LABEL_INSET: f32 = 5.0;

/// Font measurements the fitter needs.
pub trait TextMetrics {
    fn text_width(&self, text: &str) -> f32;
    fn line_height(&self) -> f32;
}

/// Shortens `label` until it fits `max_width` with an ellipsis appended.
///
/// Returns an empty string when not even the ellipsis fits.
pub fn truncate_with_ellipsis(label: &str, max_width: f32, metrics: &dyn TextMetrics) -> String {
    if metrics.text_width(label) <= max_width {
        return label.to_string();
    }

    let mut fitted = label.to_string();
    loop {
        let candidate = format!("{}{}", fitted, ELLIPSIS);
        if metrics.text_width(&candidate) <= max_width {
            return candidate;
        }
        if fitted.pop().is_none() {
            return String::new();
        }
    }
}

/// Greedy word wrap. A word wider than `max_width` gets a line to itself.
pub fn wrap_to_lines(label: &str, max_width: f32, metrics: &dyn TextMetrics) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in label.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if metrics.text_width(&candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Label lines laid out for a block rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLabel {
    pub lines: Vec<String>,
    pub line_height: f32,
}

impl FittedLabel {
    /// Top of the first line when the lines are centred in `[top, top + height]`.
    pub fn first_line_top(&self, top: f32, height: f32) -> f32 {
        top + height / 2.0 - self.lines.len() as f32 * self.line_height / 2.0
    }
}

/// Wraps the label if the wrapped lines fit the block, otherwise truncates it to one line.
pub fn fit_label(
    label: &str,
    block_width: f32,
    block_height: f32,
    metrics: &dyn TextMetrics,
) -> Option<FittedLabel> {
    if block_width <= MIN_LABEL_WIDTH {
        return None;
    }

    let max_width = block_width - 2.0 * LABEL_INSET;
    let line_height = metrics.line_height();

    let wrapped = wrap_to_lines(label, max_width, metrics);
    let fits_wrapped = !wrapped.is_empty()
        && wrapped.len() as f32 * line_height <= block_height
        && wrapped.iter().all(|line| metrics.text_width(line) <= max_width);

    let lines = if fits_wrapped {
        wrapped
    } else {
        let single = truncate_with_ellipsis(label.trim(), max_width, metrics);
        if single.is_empty() {
            return None;
        }
        vec![single]
    };

    Some(FittedLabel { lines, line_height })
}

/// Every character has the same advance.
#[cfg(test)]
pub struct FixedAdvance {
    pub advance: f32,
    pub line_height: f32,
}

#[cfg(test)]
impl TextMetrics for FixedAdvance {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METRICS: FixedAdvance = FixedAdvance { advance: 10.0, line_height: 16.0 };

    #[test]
    fn test_truncate_leaves_short_labels() {
        assert_eq!(truncate_with_ellipsis("Gym", 30.0, &METRICS), "Gym");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        let out = truncate_with_ellipsis("Portfolio", 50.0, &METRICS);
        assert_eq!(out, "Port…");
        assert!(METRICS.text_width(&out) <= 50.0);
    }

    #[test]
    fn test_truncate_never_exceeds_width() {
        for max in 0..120 {
            let out = truncate_with_ellipsis("Networking & Job Apps", max as f32, &METRICS);
            assert!(out.is_empty() || METRICS.text_width(&out) <= max as f32);
        }
    }

    #[test]
    fn test_truncate_degenerate_cases() {
        assert_eq!(truncate_with_ellipsis("Sleep", 10.0, &METRICS), "…");
        assert_eq!(truncate_with_ellipsis("Sleep", 5.0, &METRICS), "");
    }

    #[test]
    fn test_wrap_greedy() {
        let lines = wrap_to_lines("Wind Down & Sleep", 100.0, &METRICS);
        assert_eq!(lines, vec!["Wind Down", "& Sleep"]);
    }

    #[test]
    fn test_wrap_long_word_alone() {
        let lines = wrap_to_lines("a Extraordinarily b", 50.0, &METRICS);
        assert_eq!(lines, vec!["a", "Extraordinarily", "b"]);
        for line in &lines {
            let width = METRICS.text_width(line);
            assert!(width <= 50.0 || !line.contains(' '));
        }
    }

    #[test]
    fn test_wrap_empty_label() {
        assert!(wrap_to_lines("   ", 100.0, &METRICS).is_empty());
    }

    #[test]
    fn test_fit_label_suppressed_when_narrow() {
        assert_eq!(fit_label("Gym", 30.0, 100.0, &METRICS), None);
    }

    #[test]
    fn test_fit_label_wraps_when_room() {
        let fitted = fit_label("Wind Down & Sleep", 110.0, 80.0, &METRICS).unwrap();
        assert_eq!(fitted.lines, vec!["Wind Down", "& Sleep"]);
        assert_eq!(fitted.first_line_top(20.0, 80.0), 44.0);
    }

    #[test]
    fn test_fit_label_truncates_when_too_tall() {
        let fitted = fit_label("Wind Down & Sleep", 110.0, 20.0, &METRICS).unwrap();
        assert_eq!(fitted.lines, vec!["Wind Down…"]);
    }

    #[test]
    fn test_fit_label_truncates_long_word() {
        let fitted = fit_label("Extraordinarily", 60.0, 80.0, &METRICS).unwrap();
        assert_eq!(fitted.lines, vec!["Extr…"]);
    }
}
