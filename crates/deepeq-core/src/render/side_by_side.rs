//! Two rendered panes laid out as columns

use crate::options::RenderOptions;
use crate::render::ansi::{balance_lines, visible_width, BOLD, RESET};

fn pane(label: &str, rendered: &str) -> Vec<String> {
    let mut lines = vec![format!("{}{}{}", BOLD, label, RESET)];
    lines.extend(
        rendered
            .split('\n')
            .map(|line| line.trim_matches(|c| c == '\r' || c == '\n').to_string()),
    );
    balance_lines(&mut lines);
    lines
}

/// Lay out the expected pane (left) and the actual pane (right) in columns
///
/// Each pane gets a bold header row. The left column is padded to the widest
/// visible left line plus one, then a single space separates the columns.
/// Rows past the end of the shorter pane are padded (left) or left empty
/// (right). Every row ends with `\n`.
pub fn compose(left: &str, right: &str, options: &RenderOptions) -> String {
    let left = pane(&options.expected_label, left);
    let right = pane(&options.actual_label, right);

    let widths: Vec<usize> = left.iter().map(|line| visible_width(line)).collect();
    let column = widths.iter().copied().max().unwrap_or(0) + 1;

    let mut out = String::new();
    for row in 0..left.len().max(right.len()) {
        match left.get(row) {
            Some(line) => {
                out.push_str(line);
                out.push_str(&" ".repeat(column - widths[row]));
            }
            None => out.push_str(&" ".repeat(column)),
        }
        out.push(' ');
        if let Some(line) = right.get(row) {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ansi::strip_ansi;

    #[test]
    fn test_columns_align_on_visible_width() {
        let out = compose("1", "22", &RenderOptions::default());
        let plain = strip_ansi(&out);
        assert_eq!(plain, "Expected  Actual\n1         22\n");
    }

    #[test]
    fn test_shorter_left_pane_is_padded() {
        let out = compose("a", "b\nc", &RenderOptions::default());
        let plain = strip_ansi(&out);
        let rows: Vec<&str> = plain.split('\n').collect();
        assert_eq!(rows[2], "          c");
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_headers_are_bold_and_labels_configurable() {
        let options = RenderOptions {
            expected_label: "Want".to_string(),
            actual_label: "Got".to_string(),
            ..RenderOptions::default()
        };
        let out = compose("x", "y", &options);
        assert!(out.starts_with(&format!("{}Want{}", BOLD, RESET)));
        assert!(out.contains(&format!("{}Got{}", BOLD, RESET)));
    }
}
