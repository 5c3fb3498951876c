//! Text fitting: word wrap for paragraph blocks, ellipsis truncation for
//! single-line labeled fields, and the character-count clip used by table
//! cells. The first two measure real glyph widths; the table clip keeps the
//! cruder fixed-ratio rule on purpose.

use crate::metrics::{self, Font};

/// Greedy word wrap: words are appended while the line still measures within
/// `max_width`; the overflowing word starts the next line. A word too wide to
/// fit on its own still gets a line of its own.
pub fn wrap_words(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if metrics::text_width(&candidate, font, size) <= max_width {
            line = candidate;
        } else {
            lines.push(line);
            line = word.to_string();
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Truncate `text` so that it fits `max_width`, appending "..." when anything
/// was cut. Returns the input unchanged when it already fits, and an empty
/// string when no non-empty prefix fits.
pub fn truncate_ellipsis(text: &str, font: Font, size: f32, max_width: f32) -> String {
    if text.is_empty() {
        return String::new();
    }
    if metrics::text_width(text, font, size) <= max_width {
        return text.to_string();
    }

    let mut kept: Vec<char> = text.chars().collect();
    while !kept.is_empty() {
        kept.pop();
        let candidate: String = kept.iter().collect();
        if metrics::text_width(&format!("{candidate}..."), font, size) <= max_width {
            return format!("{candidate}...");
        }
    }
    String::new()
}

/// Table-cell clip: keeps at most `floor(column_width / 5.5)` characters,
/// no ellipsis. Column width is in points.
pub fn clip_cell(text: &str, column_width: f32) -> String {
    let max_chars = (column_width / 5.5) as usize;
    if text.chars().count() > max_chars {
        text.chars().take(max_chars).collect()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECLARATION: &str = "I confirm that this device(s) is a property of Ajman University \
        and to be returned back to AU Store after usage. This device(s) can't be shifted to \
        any other user/location without a written approval from the Store.";

    #[test]
    fn wrap_reconstructs_the_input() {
        let lines = wrap_words(DECLARATION, Font::HelveticaBoldOblique, 9.0, 400.0);
        assert!(lines.len() > 1);
        let rejoined = lines.join(" ");
        let normalized: Vec<&str> = DECLARATION.split_whitespace().collect();
        assert_eq!(rejoined, normalized.join(" "));
    }

    #[test]
    fn wrapped_lines_fit_the_width() {
        let max_width = 400.0;
        for line in wrap_words(DECLARATION, Font::HelveticaBoldOblique, 9.0, max_width) {
            assert!(metrics::text_width(&line, Font::HelveticaBoldOblique, 9.0) <= max_width);
        }
    }

    #[test]
    fn wrap_keeps_an_overlong_word_on_its_own_line() {
        let lines = wrap_words("a Pneumonoultramicroscopicsilicovolcanoconiosis b", Font::Helvetica, 9.0, 40.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Pneumonoultramicroscopicsilicovolcanoconiosis");
    }

    #[test]
    fn wrap_of_empty_text_is_empty() {
        assert!(wrap_words("", Font::Helvetica, 9.0, 100.0).is_empty());
    }

    #[test]
    fn truncate_leaves_fitting_text_alone() {
        let out = truncate_ellipsis("IT Department", Font::Helvetica, 10.0, 200.0);
        assert_eq!(out, "IT Department");
    }

    #[test]
    fn truncate_is_idempotent_on_fitting_text() {
        let once = truncate_ellipsis("Facilities Management Office", Font::Helvetica, 10.0, 500.0);
        let twice = truncate_ellipsis(&once, Font::Helvetica, 10.0, 500.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn truncate_bounds_the_measured_width() {
        let max_width = 60.0;
        let out = truncate_ellipsis(
            "A very long custodian name that cannot possibly fit",
            Font::Helvetica,
            10.0,
            max_width,
        );
        assert!(out.ends_with("..."));
        assert!(metrics::text_width(&out, Font::Helvetica, 10.0) <= max_width);
    }

    #[test]
    fn truncate_returns_empty_when_nothing_fits() {
        assert_eq!(truncate_ellipsis("wide", Font::Helvetica, 10.0, 1.0), "");
    }

    #[test]
    fn clip_cell_is_a_pure_prefix() {
        let width = 79.2; // 1.1 inch column
        let max_chars = (width / 5.5) as usize;
        let long = "Dell Latitude 5540 Laptop with docking station";
        let clipped = clip_cell(long, width);
        assert_eq!(clipped.chars().count(), max_chars);
        assert!(long.starts_with(&clipped));

        let short = "PC-104";
        assert_eq!(clip_cell(short, width), short);
    }
}
