//! Provider defaults and environment variable names

/// VirusTotal v3 REST root
pub const DEFAULT_API_BASE_URL: &str = "https://www.virustotal.com/api/v3";

/// Header carrying the API key on every lookup
pub const API_KEY_HEADER: &str = "x-apikey";

// Free-tier quota: 4 lookups per minute, 500 per day
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 4;
pub const DEFAULT_MIN_CYCLE_DURATION_MS: u64 = 60_000;

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

pub const ENV_API_KEY: &str = "HASHSCAN_API_KEY";
pub const ENV_API_BASE_URL: &str = "HASHSCAN_API_BASE_URL";
pub const ENV_CONCURRENCY: &str = "HASHSCAN_CONCURRENCY";
pub const ENV_MIN_CYCLE_MS: &str = "HASHSCAN_MIN_CYCLE_MS";
pub const ENV_TEST_MODE: &str = "HASHSCAN_TEST_MODE";
pub const ENV_SENTINEL_HASH: &str = "HASHSCAN_SENTINEL_HASH";
pub const ENV_OUTPUT: &str = "HASHSCAN_OUTPUT";
pub const ENV_COLOR: &str = "HASHSCAN_COLOR";
