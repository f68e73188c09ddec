/// Restricts a chunk or entry name to characters that are safe in every
/// output filename template.
pub fn sanitize_file_name(name: &str) -> String {
  let mut sanitized = String::with_capacity(name.len());
  for char in name.chars() {
    if char.is_ascii_alphanumeric() || matches!(char, '-' | '_') {
      sanitized.push(char);
    } else {
      sanitized.push('_');
    }
  }
  sanitized
}

#[test]
fn test_sanitize_file_name() {
  assert_eq!(sanitize_file_name("main"), "main");
  assert_eq!(sanitize_file_name("pages/index"), "pages_index");
  assert_eq!(sanitize_file_name("\0+a=Z_0-"), "__a_Z_0-");
}
