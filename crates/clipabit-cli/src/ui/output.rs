//! Console reporter.
//!
//! Implements the core `Reporter` trait on top of the stateless theme
//! formatters. Errors and warnings go to stderr and always print; info and
//! success lines honor `--quiet`.

use super::theme::{self, Category};
use clipabit_core::reporter::Reporter;

/// Terminal-backed reporter used by every command.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    quiet: bool,
}

impl Console {
    /// Create a reporter; `quiet` suppresses info and success lines.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Reporter for Console {
    fn section(&self, title: &str) {
        println!("{}", theme::banner(title));
    }

    fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", theme::styled(Category::Info, msg));
        }
    }

    fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", theme::styled(Category::Success, msg));
        }
    }

    fn warning(&self, msg: &str) {
        eprintln!("{}", theme::styled(Category::Warning, msg));
    }

    fn error(&self, msg: &str) {
        eprintln!("{}", theme::styled(Category::Error, msg));
    }
}
