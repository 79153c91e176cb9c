// src/util/text.rs
use html_escape::decode_html_entities;
use regex::Regex;

/// Convert an Anki HTML field to plain text.
///
/// This function:
/// 1. Replaces block-level HTML tags with newlines to preserve line breaks
/// 2. Removes all remaining HTML tags
/// 3. Decodes HTML entities (e.g. &amp; → &) after tag removal, so a
///    literal `&lt;` in the card text never gets eaten as a tag
/// 4. Trims trailing whitespace per line and collapses blank-line runs
///
/// # Examples
///
/// ```
/// use ankiorg::util::text::html_to_plain;
///
/// let html = "<p>First</p><p>Second &amp; third</p>";
/// assert_eq!(html_to_plain(html), "First\n\nSecond & third");
/// ```
pub fn html_to_plain(html: &str) -> String {
    // Replace block-level HTML tags with newlines to preserve line breaks
    let block_re = Regex::new(r"</?(p|div|br|li|h[1-6])[^>]*>").unwrap();
    let with_newlines = block_re.replace_all(html, "\n").into_owned();

    // Remove all remaining HTML tags
    let tag_re = Regex::new(r"<[^>]+>").unwrap();
    let no_tags = tag_re.replace_all(&with_newlines, "").into_owned();

    let decoded = decode_html_entities(&no_tags).to_string();

    // Collapse runs of blank lines and strip trailing space per line
    let mut lines: Vec<&str> = Vec::new();
    let mut last_was_blank = true; // drops leading blank lines
    for line in decoded.lines().map(|line| line.trim_end()) {
        if line.is_empty() {
            if !last_was_blank {
                lines.push("");
            }
            last_was_blank = true;
        } else {
            lines.push(line);
            last_was_blank = false;
        }
    }
    while lines.last() == Some(&"") {
        lines.pop();
    }
    lines.join("\n")
}

/// Extract the first line of plain text from HTML content.
///
/// Returns the first non-empty line of [`html_to_plain`], trimmed.
/// Used for card titles and log output.
///
/// # Examples
///
/// ```
/// use ankiorg::util::text::extract_first_line;
///
/// let html = "<p>What is a Tree?</p><p>Second line</p>";
/// assert_eq!(extract_first_line(html), "What is a Tree?");
/// ```
pub fn extract_first_line(html: &str) -> String {
    html_to_plain(html)
        .lines()
        .map(|line| line.trim())
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .to_string()
}
