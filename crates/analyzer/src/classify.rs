//! Provider response classification

use hashscan_errors::{AnalysisError, Error};
use hashscan_net::LookupResponse;
use hashscan_types::AnalysisResult;

/// Status the provider answers with for hashes it has never seen
const STATUS_UNKNOWN_HASH: u16 = 404;

/// Turn a lookup outcome into a verdict
///
/// `Err` carries the reason behind an `Error` verdict. Only the malicious
/// engine count decides a threat; suspicious engines are ignored.
///
/// # Errors
///
/// Returns the failure reason when the lookup failed, the provider answered
/// with an unexpected status, or a successful response had no usable body.
pub fn classify(outcome: Result<LookupResponse, Error>) -> Result<AnalysisResult, AnalysisError> {
    let response = outcome.map_err(|e| AnalysisError::TransportFailure {
        message: e.to_string(),
    })?;

    if !response.success {
        return match response.status {
            STATUS_UNKNOWN_HASH => Ok(AnalysisResult::NoThreat),
            status => Err(AnalysisError::UnexpectedStatus { status }),
        };
    }

    let report = response.body.ok_or(AnalysisError::UnparseableResponse)?;
    if report.malicious_count() > 0 {
        Ok(AnalysisResult::virus_found(Some(report)))
    } else {
        Ok(AnalysisResult::NoThreat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashscan_errors::NetworkError;
    use hashscan_types::{AnalysisStats, FileReport};

    fn report(malicious: u32, suspicious: u32) -> FileReport {
        FileReport::with_stats(
            "h",
            AnalysisStats {
                malicious,
                suspicious,
                ..AnalysisStats::default()
            },
        )
    }

    #[test]
    fn test_malicious_is_virus_with_detail() {
        let verdict = classify(Ok(LookupResponse::found(report(2, 0)))).unwrap();
        assert_eq!(verdict, AnalysisResult::virus_found(None));
        assert_eq!(verdict.detail().map(FileReport::malicious_count), Some(2));
    }

    #[test]
    fn test_suspicious_only_is_no_threat() {
        let verdict = classify(Ok(LookupResponse::found(report(0, 7)))).unwrap();
        assert_eq!(verdict, AnalysisResult::NoThreat);
    }

    #[test]
    fn test_not_found_is_no_threat() {
        let verdict = classify(Ok(LookupResponse::status_only(404))).unwrap();
        assert_eq!(verdict, AnalysisResult::NoThreat);
    }

    #[test]
    fn test_other_failure_status() {
        for status in [400, 401, 429, 500, 503] {
            assert_eq!(
                classify(Ok(LookupResponse::status_only(status))),
                Err(AnalysisError::UnexpectedStatus { status })
            );
        }
    }

    #[test]
    fn test_success_without_body() {
        assert_eq!(
            classify(Ok(LookupResponse::status_only(200))),
            Err(AnalysisError::UnparseableResponse)
        );
    }

    #[test]
    fn test_transport_failure() {
        let err = NetworkError::Timeout {
            url: "https://example.com".into(),
        };
        assert!(matches!(
            classify(Err(err.into())),
            Err(AnalysisError::TransportFailure { .. })
        ));
    }
}
