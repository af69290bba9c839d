//! Per-hash analysis verdicts

use crate::report::FileReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of analysing one hash
///
/// Equality compares the case only; a `VirusFound` with a report equals a
/// `VirusFound` without one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResult {
    /// Not analysed yet. Never produced by the analyzer itself.
    #[default]
    Pending,
    /// The provider reported zero malicious engines, or does not know the hash
    NoThreat,
    /// At least one engine flagged the file as malicious
    VirusFound {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<Box<FileReport>>,
    },
    /// The lookup failed or its response could not be interpreted
    Error,
}

impl AnalysisResult {
    #[must_use]
    pub fn virus_found(detail: Option<FileReport>) -> Self {
        Self::VirusFound {
            detail: detail.map(Box::new),
        }
    }

    /// Whether the verdict may be remembered in the history cache
    #[must_use]
    pub fn is_authoritative(&self) -> bool {
        match self {
            Self::NoThreat | Self::VirusFound { .. } => true,
            Self::Pending | Self::Error => false,
        }
    }

    /// Provider report attached to a threat verdict, if any
    #[must_use]
    pub fn detail(&self) -> Option<&FileReport> {
        match self {
            Self::VirusFound { detail } => detail.as_deref(),
            Self::Pending | Self::NoThreat | Self::Error => None,
        }
    }

    /// Stable lowercase label used in events and CLI output
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::NoThreat => "no_threat",
            Self::VirusFound { .. } => "virus_found",
            Self::Error => "error",
        }
    }
}

impl PartialEq for AnalysisResult {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Eq for AnalysisResult {}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
