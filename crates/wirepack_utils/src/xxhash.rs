use xxhash_rust::xxh3::xxh3_128;

use crate::base64::to_url_safe_base64;

pub fn xxhash_base64_url(input: &[u8]) -> String {
  let hash = xxh3_128(input).to_le_bytes();
  to_url_safe_base64(hash)
}

/// Content-hash segment for output filenames. Stable across builds for
/// identical content, eight url-safe characters.
pub fn content_hash(input: &[u8]) -> String {
  let mut hash = xxhash_base64_url(input);
  hash.truncate(8);
  hash
}

#[test]
fn test_content_hash_is_deterministic() {
  assert_eq!(content_hash(b"body{}"), content_hash(b"body{}"));
  assert_ne!(content_hash(b"body{}"), content_hash(b"html{}"));
  assert_eq!(content_hash(b"body{}").len(), 8);
}
