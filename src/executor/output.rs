//! Trimming of tool diagnostics for inclusion in error messages.

/// Sanitize command output for inclusion in error messages.
///
/// Keeps at most `max_lines` lines, truncates long lines, caps the total
/// length and joins the result onto a single line so it fits a log entry.
pub fn sanitize_output(output: &str, max_lines: usize) -> String {
    const MAX_LINE_LENGTH: usize = 200;
    const MAX_TOTAL_LENGTH: usize = 1000;

    let lines: Vec<&str> = output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let mut result = String::new();

    for line in lines.iter().take(max_lines) {
        let truncated = if line.chars().count() > MAX_LINE_LENGTH {
            let head: String = line.chars().take(MAX_LINE_LENGTH).collect();
            format!("{}...", head)
        } else {
            line.to_string()
        };

        if result.len() + truncated.len() > MAX_TOTAL_LENGTH {
            result.push_str(" ...[truncated]");
            return result;
        }

        if !result.is_empty() {
            result.push_str("; ");
        }
        result.push_str(&truncated);
    }

    if lines.len() > max_lines {
        result.push_str(" ...[additional output truncated]");
    }

    result
}
