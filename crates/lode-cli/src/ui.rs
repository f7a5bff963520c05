//! Status lines on stderr. Stdout is reserved for JSON output.

use console::style;

/// Decide once whether status lines are colored.
pub fn init_colors(no_color: bool) {
    console::set_colors_enabled_stderr(!no_color && crate::logger::should_use_colors());
}

pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").for_stderr().green().bold(), message);
}
