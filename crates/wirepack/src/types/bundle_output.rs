/// One emitted file, named by its rendered template.
#[derive(Debug, Clone)]
pub struct OutputAsset {
  pub filename: String,
  pub content: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct BundleOutput {
  pub assets: Vec<OutputAsset>,
  pub warnings: Vec<anyhow::Error>,
}
