/// Compute the BLAKE3 hash of a byte slice, returning the hex-encoded digest.
#[must_use]
pub fn blake3_bytes(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Short content fingerprint for transformed module output.
///
/// The first 16 hex characters of the BLAKE3 digest; stable across runs, so a
/// driver can use it as an ETag or cache-busting query.
#[must_use]
pub fn content_fingerprint(code: &str) -> String {
    let mut hex = blake3_bytes(code.as_bytes());
    hex.truncate(16);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blake3_bytes() {
        let hash = blake3_bytes(b"hello world");
        assert_eq!(
            hash,
            "d74981efa70a0c880b8d8c1985d075dbcbf679b99a5f9914e5aaf96b831a9e24"
        );
    }

    #[test]
    fn test_content_fingerprint() {
        assert_eq!(content_fingerprint("hello world"), "d74981efa70a0c88");
        assert_ne!(content_fingerprint("a"), content_fingerprint("b"));
    }
}
