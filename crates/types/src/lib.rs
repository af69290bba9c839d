#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for hashscan
//!
//! This crate provides the fundamental types shared by the analyzer, the
//! remote client and the CLI: content hashes, per-hash verdicts and the
//! provider's file report.

pub mod hash;
pub mod report;
pub mod verdict;

// Re-export commonly used types
pub use hash::Hash;
pub use report::{AnalysisStats, FileAttributes, FileObject, FileReport};
pub use verdict::AnalysisResult;

use serde::{Deserialize, Serialize};

/// How `check` presents its results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated `hash<TAB>verdict` lines
    Plain,
    /// Live progress lines and a summary table
    #[default]
    Tty,
    Json,
}

/// Whether terminal output is colored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    #[default]
    Auto,
    Never,
}
