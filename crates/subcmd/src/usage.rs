//! Column alignment for usage listings.
//!
//! Both the application's command listing and a flag set's option listing
//! are two-column tables: an indented left column padded to the width of its
//! longest entry, two spaces, then free text.

use unicode_width::UnicodeWidthStr;

/// Renders `(left, right)` rows as aligned lines, each ending in a newline.
///
/// Width is the terminal display width, so wide (e.g. CJK) names still line
/// up. An empty slice renders as an empty string.
pub fn render_rows<L, R>(rows: &[(L, R)]) -> String
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let width = rows
        .iter()
        .map(|(left, _)| left.as_ref().width())
        .max()
        .unwrap_or(0);

    rows.iter()
        .map(|(left, right)| {
            let left = left.as_ref();
            let pad = " ".repeat(width - left.width());
            format!("  {left}{pad}  {}\n", right.as_ref())
        })
        .collect()
}
