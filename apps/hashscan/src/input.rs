//! Hash list collection from arguments and files

use crate::error::CliError;
use hashscan_errors::Error;
use hashscan_types::Hash;
use std::collections::HashSet;
use std::path::Path;

/// Parse hashes from a hash-list file body
///
/// One digest per line; blank lines and `#` comments are skipped.
///
/// # Errors
///
/// Returns the first line that is not a valid digest.
pub fn parse_hash_list(contents: &str) -> Result<Vec<Hash>, Error> {
    contents
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(Hash::parse_digest)
        .collect()
}

/// Gather the hashes of one `check` invocation
///
/// Command line digests come first, followed by the file's. Repeated digests
/// are kept once, in first-seen order.
pub async fn collect_hashes(args: &[String], file: Option<&Path>) -> Result<Vec<Hash>, CliError> {
    let mut hashes = args
        .iter()
        .map(|arg| Hash::parse_digest(arg))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(path) = file {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io_with_path(&e, path))?;
        hashes.extend(parse_hash_list(&contents)?);
    }

    if hashes.is_empty() {
        return Err(CliError::InvalidArguments(
            "no hashes given; pass digests or --from-file".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    hashes.retain(|hash| seen.insert(hash.clone()));
    Ok(hashes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MD5: &str = "44d88612fea8a8f36de82e1278abb02f";
    const SHA256: &str = "275a021bbfb6489e54d471899f7db9d1663fc695ec2fe2a2c4538aabf651fd0f";

    #[test]
    fn test_parse_skips_blanks_and_comments() {
        let contents = format!("# known samples\n\n{MD5}\n  {SHA256}  # eicar\n");
        let hashes = parse_hash_list(&contents).unwrap();
        assert_eq!(hashes, vec![Hash::new(MD5), Hash::new(SHA256)]);
    }

    #[test]
    fn test_parse_rejects_garbage_line() {
        assert!(parse_hash_list(&format!("{MD5}\nnot-a-hash\n")).is_err());
    }

    #[tokio::test]
    async fn test_collect_merges_args_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hashes.txt");
        std::fs::write(&path, format!("{SHA256}\n{}\n", MD5.to_uppercase())).unwrap();

        let hashes = collect_hashes(&[MD5.to_string()], Some(&path)).await.unwrap();
        assert_eq!(hashes, vec![Hash::new(MD5), Hash::new(SHA256)]);
    }

    #[tokio::test]
    async fn test_collect_requires_input() {
        assert!(matches!(
            collect_hashes(&[], None).await,
            Err(CliError::InvalidArguments(_))
        ));
    }

    #[tokio::test]
    async fn test_collect_missing_file() {
        let result = collect_hashes(&[], Some(Path::new("/nonexistent/hashes.txt"))).await;
        assert!(matches!(result, Err(CliError::Scan(Error::Io { .. }))));
    }
}
