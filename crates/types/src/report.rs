//! Provider file report
//!
//! Mirrors the subset of the VirusTotal v3 `GET /files/{id}` object the
//! analyzer needs. Engine counters default to zero when absent, but the
//! `data.attributes.last_analysis_stats` path itself must be present for a
//! body to count as parseable.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub data: FileObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileObject {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub attributes: FileAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAttributes {
    pub last_analysis_stats: AnalysisStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaningful_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputation: Option<i64>,
}

/// Per-engine verdict counters of the most recent provider analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    #[serde(default)]
    pub harmless: u32,
    #[serde(default)]
    pub malicious: u32,
    #[serde(default)]
    pub suspicious: u32,
    #[serde(default)]
    pub undetected: u32,
    #[serde(default)]
    pub timeout: u32,
}

impl AnalysisStats {
    /// Engines that returned any result, capped at `u32::MAX`
    #[must_use]
    pub fn total(&self) -> u32 {
        [self.malicious, self.suspicious, self.undetected, self.timeout]
            .into_iter()
            .fold(self.harmless, u32::saturating_add)
    }
}

impl FileReport {
    /// Number of engines that flagged the file as malicious
    #[must_use]
    pub fn malicious_count(&self) -> u32 {
        self.data.attributes.last_analysis_stats.malicious
    }

    /// Build a minimal report carrying only the engine counters
    #[must_use]
    pub fn with_stats(id: impl Into<String>, stats: AnalysisStats) -> Self {
        Self {
            data: FileObject {
                id: id.into(),
                kind: "file".to_string(),
                attributes: FileAttributes {
                    last_analysis_stats: stats,
                    meaningful_name: None,
                    md5: None,
                    sha1: None,
                    sha256: None,
                    reputation: None,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_body() {
        let body = r#"{
            "data": {
                "id": "44d88612fea8a8f36de82e1278abb02f",
                "type": "file",
                "attributes": {
                    "meaningful_name": "eicar.com",
                    "reputation": -12,
                    "last_analysis_stats": {
                        "harmless": 0,
                        "malicious": 61,
                        "suspicious": 2,
                        "undetected": 9,
                        "timeout": 0,
                        "type-unsupported": 4
                    }
                }
            }
        }"#;
        let report: FileReport = serde_json::from_str(body).unwrap();
        assert_eq!(report.malicious_count(), 61);
        assert_eq!(report.data.attributes.last_analysis_stats.suspicious, 2);
        assert_eq!(report.data.attributes.last_analysis_stats.total(), 72);
        assert_eq!(
            report.data.attributes.meaningful_name.as_deref(),
            Some("eicar.com")
        );
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let body = r#"{"data":{"attributes":{"last_analysis_stats":{"suspicious":3}}}}"#;
        let report: FileReport = serde_json::from_str(body).unwrap();
        assert_eq!(report.malicious_count(), 0);
    }

    #[test]
    fn test_total_saturates_on_hostile_counters() {
        let body = r#"{"data":{"attributes":{"last_analysis_stats":
            {"harmless":4294967295,"malicious":4294967295,"undetected":1}}}}"#;
        let report: FileReport = serde_json::from_str(body).unwrap();
        assert_eq!(report.data.attributes.last_analysis_stats.total(), u32::MAX);
    }

    #[test]
    fn test_missing_stats_is_unparseable() {
        let body = r#"{"data":{"attributes":{}}}"#;
        assert!(serde_json::from_str::<FileReport>(body).is_err());
    }
}
