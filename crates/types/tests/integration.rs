//! Integration tests for shared types

#[cfg(test)]
mod tests {
    use hashscan_types::*;

    #[test]
    fn test_equality_ignores_payload() {
        let with_detail =
            AnalysisResult::virus_found(Some(FileReport::with_stats("x", AnalysisStats::default())));
        let without = AnalysisResult::virus_found(None);
        assert_eq!(with_detail, without);
        assert_ne!(without, AnalysisResult::NoThreat);
        assert_ne!(AnalysisResult::Error, AnalysisResult::Pending);
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(AnalysisResult::default(), AnalysisResult::Pending);
    }

    #[test]
    fn test_authoritative_verdicts() {
        assert!(AnalysisResult::NoThreat.is_authoritative());
        assert!(AnalysisResult::virus_found(None).is_authoritative());
        assert!(!AnalysisResult::Error.is_authoritative());
        assert!(!AnalysisResult::Pending.is_authoritative());
    }

    #[test]
    fn test_verdict_json_shape() {
        let json = serde_json::to_value(AnalysisResult::NoThreat).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "no_threat" }));

        let stats = AnalysisStats {
            malicious: 3,
            ..AnalysisStats::default()
        };
        let found = AnalysisResult::virus_found(Some(FileReport::with_stats("abc", stats)));
        let json = serde_json::to_value(&found).unwrap();
        assert_eq!(json["status"], "virus_found");
        assert_eq!(
            json["detail"]["data"]["attributes"]["last_analysis_stats"]["malicious"],
            3
        );

        let back: AnalysisResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.detail().map(FileReport::malicious_count), Some(3));
    }

    #[test]
    fn test_hash_borrows_as_str() {
        let mut map = std::collections::HashMap::new();
        map.insert(Hash::new("aaa"), AnalysisResult::NoThreat);
        assert_eq!(map.get("aaa"), Some(&AnalysisResult::NoThreat));
    }
}
