//! UI Theme - stateless design constants
//!
//! All styling is a pure function from (category, text) to a formatted
//! string; there is no process-wide mutable styling state to configure or
//! reset.

use crossterm::style::{Color, Stylize};

/// Visual category of one status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Section banners.
    Header,
    /// Completed step.
    Success,
    /// Recoverable problem.
    Warning,
    /// Failed step.
    Error,
    /// Neutral progress detail.
    Info,
}

/// Status icon for a category. Headers carry none.
pub fn icon(category: Category) -> &'static str {
    match category {
        Category::Header => "",
        Category::Success => "✓",
        Category::Warning => "⚠",
        Category::Error => "✗",
        Category::Info => "ℹ",
    }
}

/// Foreground color for a category.
pub fn color(category: Category) -> Color {
    match category {
        Category::Header => Color::Magenta,
        Category::Success => Color::Green,
        Category::Warning => Color::Yellow,
        Category::Error => Color::Red,
        Category::Info => Color::Cyan,
    }
}

/// Format one status line for a category.
pub fn styled(category: Category, text: &str) -> String {
    match category {
        Category::Header => format!("{}", text.with(color(category)).bold()),
        _ => format!(
            "{} {}",
            icon(category).with(color(category)),
            text.with(color(category))
        ),
    }
}

/// Format a section banner: a title between two horizontal rules.
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(60);
    format!(
        "\n{}\n{}\n{}\n",
        styled(Category::Header, &rule),
        styled(Category::Header, title),
        styled(Category::Header, &rule)
    )
}
