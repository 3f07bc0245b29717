//! Centralized UI formatting and color utilities.

use colored::Colorize;

/// Print a boxed title banner at a fixed width.
pub fn print_box(title: &str, width: usize) {
    let inner = width.saturating_sub(2);
    let padding = inner.saturating_sub(title.len()) / 2;
    let right = inner.saturating_sub(padding + title.len());

    println!("{}", format!("╔{}╗", "═".repeat(inner)).green());
    println!(
        "{}{}{}{}{}",
        "║".green(),
        " ".repeat(padding),
        title,
        " ".repeat(right),
        "║".green()
    );
    println!("{}", format!("╚{}╝", "═".repeat(inner)).green());
}

/// Common text formatting patterns
pub mod format {
    /// Format a separator line for sections
    pub fn separator(width: usize) -> String {
        "━".repeat(width)
    }

    /// `current/total` progress marker, 1-based.
    pub fn progress(position: usize, total: usize) -> String {
        format!("{}/{}", position + 1, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator() {
        assert_eq!(format::separator(5), "━━━━━");
        assert_eq!(format::separator(0), "");
    }

    #[test]
    fn test_progress_is_one_based() {
        assert_eq!(format::progress(0, 12), "1/12");
        assert_eq!(format::progress(11, 12), "12/12");
    }

    #[test]
    fn test_print_box_handles_wide_titles() {
        // Must not panic when the title exceeds the box width.
        print_box("a very long title that exceeds the box", 10);
        print_box("ok", 60);
    }
}
