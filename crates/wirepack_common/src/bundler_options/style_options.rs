use std::path::PathBuf;

use serde::Serialize;

/// Stylesheet-pipeline inputs: the external variable document, the icon
/// directory for inline SVG embedding, the flattened import extension and
/// the base for pixel-to-rem conversion.
#[derive(Debug, Default, Clone)]
pub struct StyleOptions {
  pub variables: Option<String>,
  pub icon_dir: Option<String>,
  pub import_extension: Option<String>,
  pub root_font_size: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NormalizedStyleOptions {
  pub variables_path: PathBuf,
  pub icon_dir: PathBuf,
  pub import_extension: String,
  pub root_font_size: f64,
}
