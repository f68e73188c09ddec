pub fn to_url_safe_base64(input: impl AsRef<[u8]>) -> String {
  base64_simd::URL_SAFE_NO_PAD.encode_to_string(input)
}

#[test]
fn test_to_url_safe_base64() {
  let encoded = to_url_safe_base64(b"wirepack");
  assert!(!encoded.is_empty());
  assert!(!encoded.contains('='));
  assert!(encoded.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
}
