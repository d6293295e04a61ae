//! Outline parsing.
//!
//! Best-effort line heuristic over free model output; there is no grammar.

/// Upper bound on chapters kept from an outline.
pub const MAX_CHAPTERS: usize = 8;

/// Turn free-text outline output into chapter titles.
///
/// Lines are trimmed; blank lines and `#` heading lines are dropped; leading
/// enumeration (ASCII digits, `.`, `-`, `、`) and the whitespace after it is
/// stripped; lines left empty are dropped; at most [`MAX_CHAPTERS`] remain.
pub fn parse_outline(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with('#'))
        .map(strip_enumeration)
        .filter(|line| !line.is_empty())
        .take(MAX_CHAPTERS)
        .map(str::to_string)
        .collect()
}

fn strip_enumeration(line: &str) -> &str {
    line.trim_start_matches(|c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | '、'))
        .trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_blank_and_heading_lines_and_numbering() {
        let outline = parse_outline("1. Intro\n\n2. Middle\n### heading\n3. End");
        assert_eq!(outline, vec!["Intro", "Middle", "End"]);
    }

    #[test]
    fn truncates_to_eight_chapters() {
        let raw = (1..=10)
            .map(|i| format!("Chapter {i}"))
            .collect::<Vec<_>>()
            .join("\n");

        let outline = parse_outline(&raw);
        assert_eq!(outline.len(), MAX_CHAPTERS);
        assert_eq!(outline.first().map(String::as_str), Some("Chapter 1"));
        assert_eq!(outline.last().map(String::as_str), Some("Chapter 8"));
    }

    #[test]
    fn strips_mixed_enumeration_styles() {
        let outline = parse_outline("  01.  Background \n- Current state\n3、Outlook\r\n10-Summary");
        assert_eq!(
            outline,
            vec!["Background", "Current state", "Outlook", "Summary"]
        );
    }

    #[test]
    fn keeps_digits_inside_titles() {
        let outline = parse_outline("1. The 2020s in review\nWhy 5G matters");
        assert_eq!(outline, vec!["The 2020s in review", "Why 5G matters"]);
    }

    #[test]
    fn lines_that_are_only_markers_disappear() {
        assert!(parse_outline("\n# Outline\n---\n1.\n   \n").is_empty());
    }

    #[test]
    fn empty_input_gives_empty_outline() {
        assert!(parse_outline("").is_empty());
    }
}
