//! Completion parsers for line and JSON reply formats.

/// Reasons a completion could not be turned into suggestions.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The completion contained no text.
    #[error("completion is empty")]
    Empty,
    /// The completion is not a JSON array of strings.
    #[error("completion is not a JSON array of strings: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The array has the wrong number of elements.
    #[error("expected {expected} suggestions, got {actual}")]
    WrongCount { expected: usize, actual: usize },
}

pub(super) fn parse_lines(raw: &str, count: usize) -> Result<Vec<String>, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let lines: Vec<&str> = raw
        .lines()
        .map(strip_marker)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < count {
        return Ok(vec![raw.to_owned()]);
    }

    Ok(lines.into_iter().take(count).map(str::to_owned).collect())
}

pub(super) fn parse_json(raw: &str, count: usize) -> Result<Vec<String>, ParseError> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return Err(ParseError::Empty);
    }

    let suggestions: Vec<String> = serde_json::from_str(body)?;
    if suggestions.len() != count {
        return Err(ParseError::WrongCount {
            expected: count,
            actual: suggestions.len(),
        });
    }

    Ok(suggestions)
}

/// Removes a leading list marker: `1.`, `12)`, `-`, `*` or `•`.
///
/// A marker only counts when followed by whitespace or the end of the line,
/// so `*wink*` and `1.5x` are left alone.
fn strip_marker(line: &str) -> &str {
    let line = line.trim();

    let rest = match line.strip_prefix(['-', '*', '•']) {
        Some(rest) => rest,
        None => {
            let digits = line.bytes().take_while(u8::is_ascii_digit).count();
            match line[digits..].strip_prefix(['.', ')']) {
                Some(rest) if (1..=2).contains(&digits) => rest,
                _ => return line,
            }
        }
    };

    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        rest.trim_start()
    } else {
        line
    }
}

/// Removes surrounding Markdown code fences, including a language tag.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    let rest = rest.trim_end();

    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn lines_strip_markers_and_blanks() {
        let raw = "1. Hey you\n\n2) Nice pic\n- Coffee later?\n* Sure thing\n• Extra one";
        assert_eq!(
            parse_lines(raw, 4).unwrap(),
            vec!["Hey you", "Nice pic", "Coffee later?", "Sure thing"]
        );
    }

    #[test]
    fn lines_keep_text_that_only_looks_like_markers() {
        let raw = "*wink* hello\n1.5x better\n-ish maybe\n10. Tenth";
        assert_eq!(
            parse_lines(raw, 4).unwrap(),
            vec!["*wink* hello", "1.5x better", "-ish maybe", "Tenth"]
        );
    }

    #[test]
    fn lines_fall_back_to_raw_text() {
        let raw = "Only one idea here\n\n  \nand a second line";
        assert_eq!(parse_lines(raw, 4).unwrap(), vec![raw.to_owned()]);
    }

    #[test]
    fn lines_ignore_bare_markers() {
        let raw = "1.\nA\n-\nB\nC";
        assert_eq!(parse_lines(raw, 4).unwrap(), vec![raw.to_owned()]);
    }

    #[test]
    fn lines_reject_blank_completion() {
        assert!(matches!(parse_lines(" \n\t", 4), Err(ParseError::Empty)));
    }

    #[test]
    fn json_accepts_exact_array() {
        let raw = r#"["a", " b ", "c", "d", "e"]"#;
        assert_eq!(parse_json(raw, 5).unwrap(), vec!["a", " b ", "c", "d", "e"]);
    }

    #[test]
    fn json_strips_code_fences() {
        let raw = "```json\n[\"a\",\"b\",\"c\",\"d\",\"e\"]\n```";
        assert_eq!(parse_json(raw, 5).unwrap().len(), 5);

        let raw = "```[\"a\",\"b\"]```";
        assert_eq!(parse_json(raw, 2).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn json_rejects_wrong_count() {
        let result = parse_json(r#"["a", "b", "c"]"#, 5);
        assert!(matches!(
            result,
            Err(ParseError::WrongCount {
                expected: 5,
                actual: 3
            })
        ));
    }

    #[test]
    fn json_rejects_non_string_arrays() {
        assert!(matches!(
            parse_json(r#"[1, 2, 3, 4, 5]"#, 5),
            Err(ParseError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_json(r#"{"replies": []}"#, 5),
            Err(ParseError::InvalidJson(_))
        ));
        assert!(matches!(parse_json("```\n```", 5), Err(ParseError::Empty)));
    }
}
