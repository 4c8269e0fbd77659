use md5::{Digest, Md5};

/// Content hash of the exact bytes received: 32 lowercase hex characters.
///
/// The token doubles as the on-disk filename stem, so it must be stable
/// across runs for the dedup invariant to hold.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(32);
    for byte in digest.iter() {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::content_hash;

    #[test]
    fn hash_is_deterministic_and_32_hex() {
        let first = content_hash(b"image bytes");
        let second = content_hash(b"image bytes");
        assert_eq!(first, second);
        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(first, first.to_lowercase());
    }

    #[test]
    fn different_bytes_hash_differently() {
        assert_ne!(content_hash(b"a"), content_hash(b"b"));
    }
}
