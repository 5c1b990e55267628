use std::io::{self, Write};

use console::{style, Style};

use crate::core::category::FileStatusCategory;

pub fn info(message: &str) {
    let _ = writeln!(io::stderr(), "{}", message);
}

pub fn warn(message: &str) {
    let _ = writeln!(io::stderr(), "{}", style(message).yellow());
}

pub fn error(message: &str) {
    let _ = writeln!(io::stderr(), "{}", style(message).red());
}

pub fn summary(text: &str) {
    let _ = writeln!(io::stderr(), "{} {}", style("git").cyan(), text);
}

pub fn set_colors(enabled: bool) {
    console::set_colors_enabled(enabled);
    console::set_colors_enabled_stderr(enabled);
}

/// Terminal style that approximates how the editor shows `category`.
pub fn category_style(category: FileStatusCategory) -> Style {
    match category {
        FileStatusCategory::Added => Style::new().cyan(),
        FileStatusCategory::Conflicting => Style::new().red().bold(),
        FileStatusCategory::Deleted => Style::new().magenta(),
        FileStatusCategory::Modified => Style::new().yellow(),
        FileStatusCategory::Untracked => Style::new().green(),
        FileStatusCategory::Ignored => Style::new().dim(),
        FileStatusCategory::Unknown => Style::new(),
    }
}
