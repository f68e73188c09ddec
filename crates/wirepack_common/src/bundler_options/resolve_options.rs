/// Alias prefixes and probe extensions for import resolution. Alias keys are
/// expected to be unique; the first matching prefix wins and longer prefixes
/// are tried before shorter ones.
#[derive(Debug, Default, Clone)]
pub struct ResolveOptions {
  pub alias: Option<Vec<(String, String)>>,
  pub extensions: Option<Vec<String>>,
}
