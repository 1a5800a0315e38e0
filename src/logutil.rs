//! Keeps user-supplied text single-line and bounded before it reaches the
//! logs.

/// Escape a string for single-line logging: newlines, carriage returns and
/// tabs become their escape sequences, other control characters become
/// `\xNN`, and anything past the preview cap is truncated with an ellipsis.
pub fn escape_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 200;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_log;

    #[test]
    fn escapes_control_characters() {
        assert_eq!(escape_log("a\nb\tc"), "a\\nb\\tc");
        assert_eq!(escape_log("x\u{7}y"), "x\\x07y");
    }

    #[test]
    fn truncates_long_input() {
        let long = "z".repeat(500);
        let escaped = escape_log(&long);
        assert!(escaped.chars().count() <= 201);
        assert!(escaped.ends_with('…'));
    }
}
