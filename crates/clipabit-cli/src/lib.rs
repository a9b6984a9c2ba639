//! clipabit-install - ClipABit plugin installer for DaVinci Resolve
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
//!
//! One-shot installer that places the ClipABit plugin where DaVinci
//! Resolve's Fusion page discovers scripts, after verifying the host
//! environment end to end.
//!
//! # Architecture
//!
//! - **Gated pipeline**: `ops::flow` runs the environment checks and
//!   side-effecting stages strictly in order; the first failing gate
//!   aborts the run, and only post-deploy verification demotes to a
//!   warning.
//! - **Capability seams**: subprocesses go through
//!   `clipabit_core::CommandRunner` and console output through
//!   `clipabit_core::Reporter`, so the pipeline is testable without a
//!   live Python or a terminal.
//!
//! # Pipeline
//!
//! ```text
//! platform → host app → python → pip → resolve deps → pip install
//!          → deploy files → verify (entry file + imports)
//! ```

pub mod cmd;
pub mod ops;
pub mod ui;

pub use ops::InstallError;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "clipabit-install")]
#[command(author, version, about = "ClipABit plugin installer for DaVinci Resolve")]
pub struct Cli {
    /// Probe and resolve only; skip pip installs and file deployment
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install the plugin (the default when no subcommand is given)
    Install,
    /// Check the environment without changing anything
    Check,
}
