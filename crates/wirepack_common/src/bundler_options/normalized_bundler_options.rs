use std::path::PathBuf;

use serde::Serialize;

use crate::{
  BuildMode, BuildPlugin, FilenameTemplate, InputItem, NormalizedDevServerOptions,
  NormalizedStyleOptions, OptimizationOptions, RuleTable,
};

/// Every default resolved, every mode-dependent value derived. Constructed
/// once by `normalize_options`, then shared read-only for the rest of the
/// build.
#[derive(Debug, Serialize)]
pub struct NormalizedBundlerOptions {
  // --- Input
  pub input: Vec<InputItem>,
  pub cwd: PathBuf,
  pub mode: BuildMode,

  // --- Output
  pub dir: String,
  pub public_path: String,
  pub entry_filenames: FilenameTemplate,
  pub css_filenames: FilenameTemplate,
  pub asset_filenames: FilenameTemplate,
  pub minify: bool,
  pub source_map: bool,

  // --- Dev server
  pub dev_server: NormalizedDevServerOptions,

  // --- Rules, plugins, optimization
  pub rules: RuleTable,
  pub plugins: Vec<BuildPlugin>,
  pub optimization: OptimizationOptions,

  // --- Stylesheets
  pub style: NormalizedStyleOptions,
}

impl NormalizedBundlerOptions {
  pub fn out_dir(&self) -> PathBuf {
    self.cwd.join(&self.dir)
  }
}
