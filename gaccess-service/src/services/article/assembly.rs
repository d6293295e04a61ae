//! Markdown assembly of a generated article.

use chrono::NaiveDate;
use std::fmt::Write;

/// Download filename: `<title>-<YYYY-MM-DD>.md`.
pub fn article_filename(title: &str, date: NaiveDate) -> String {
    format!("{}-{}.md", title, date.format("%Y-%m-%d"))
}

/// Concatenate header, date stamp, table of contents and chapters.
///
/// `chapters` and `bodies` are paired by index.
pub fn assemble_markdown(
    title: &str,
    date: NaiveDate,
    chapters: &[String],
    bodies: &[String],
) -> String {
    let mut content = String::new();

    // Writing into a String cannot fail.
    let _ = write!(content, "# {}\n\n", title);
    let _ = write!(content, "> Generated: {}\n\n", date.format("%Y-%m-%d"));
    content.push_str("## Table of Contents\n\n");

    for (index, chapter) in chapters.iter().enumerate() {
        let _ = writeln!(content, "{}. {}", index + 1, chapter);
    }

    content.push_str("\n---\n\n");

    for (chapter, body) in chapters.iter().zip(bodies) {
        let _ = write!(content, "## {}\n\n", chapter);
        content.push_str(body);
        content.push_str("\n\n---\n\n");
    }

    content
}
