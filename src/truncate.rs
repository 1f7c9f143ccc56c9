//! Size-bounded content truncation with head/tail preservation.
//!
//! Large files are cut down to a line budget and a character budget. The
//! line bound keeps the start and the end of the file around an explicit
//! marker; the character bound is applied afterwards as a hard cut.

/// Bounds for a single file's embedded content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncateOptions {
    /// Maximum number of content lines before head/tail truncation.
    pub max_lines: usize,
    /// Maximum number of characters in the final result.
    pub max_chars: usize,
}

impl Default for TruncateOptions {
    fn default() -> Self {
        Self {
            max_lines: 100,
            max_chars: 5000,
        }
    }
}

/// Bound `content` to the given line and character budgets.
///
/// - Within both bounds: returned unchanged.
/// - Over the line bound: the first `max_lines / 2` and last `max_lines / 2`
///   lines are kept around a one-line marker stating how many of the total
///   lines are shown. When the file is not longer than twice the half
///   budget, the tail slice is omitted rather than overlapping the head.
/// - After line truncation, if the result still exceeds `max_chars`
///   characters it is hard-cut to `max_chars` characters and a marker is
///   appended stating how many characters of the original content are
///   hidden.
///
/// Counts are in characters, not bytes, so the cut always lands on a char
/// boundary. Never panics.
///
/// # Examples
///
/// ```
/// use marrow::truncate::{truncate_content, TruncateOptions};
///
/// let options = TruncateOptions { max_lines: 4, max_chars: 1000 };
/// let out = truncate_content("a\nb\nc\nd\ne\nf\ng", options);
/// assert!(out.contains("[... truncated"));
/// assert!(out.starts_with("a\nb"));
/// assert!(out.ends_with("f\ng"));
/// ```
pub fn truncate_content(content: &str, options: TruncateOptions) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let total_lines = lines.len();
    let total_chars = content.chars().count();

    if total_lines <= options.max_lines && total_chars <= options.max_chars {
        return content.to_string();
    }

    let mut result = if total_lines > options.max_lines {
        let half = options.max_lines / 2;
        let head = &lines[..half.min(total_lines)];
        let tail: &[&str] = if total_lines > half * 2 {
            &lines[total_lines - half..]
        } else {
            &[]
        };

        let marker = format!(
            "[... truncated: showing {} of {} lines ...]",
            half * 2,
            total_lines
        );

        let mut parts: Vec<&str> = Vec::with_capacity(head.len() + tail.len() + 1);
        parts.extend_from_slice(head);
        parts.push(&marker);
        parts.extend_from_slice(tail);
        parts.join("\n")
    } else {
        content.to_string()
    };

    if result.chars().count() > options.max_chars {
        // Hidden count is measured against the original content, not the
        // line-truncated intermediate.
        let hidden = total_chars.saturating_sub(options.max_chars);
        let mut cut: String = result.chars().take(options.max_chars).collect();
        cut.push_str(&format!(
            "\n[... truncated: {hidden} characters hidden ...]"
        ));
        result = cut;
    }

    result
}
