pub mod build_mode;
pub mod dev_server;
pub mod filename_template;
pub mod html;
pub mod input_item;
pub mod module_rule;
pub mod normalized_bundler_options;
pub mod optimization;
pub mod plugin;
pub mod resolve_options;
pub mod style_options;

use std::path::PathBuf;

use crate::{
  BuildMode, CopyPattern, DevServerOptions, HtmlOptions, InputItem, ResolveOptions, StyleOptions,
};

/// The raw, user-facing configuration record. Every field is optional;
/// `normalize_options` resolves defaults and derives every mode-dependent
/// value. Note there is deliberately no `minify`, `source_map` or `hot`
/// field here: those are pure functions of [`BuildMode`].
#[derive(Default, Debug, Clone)]
pub struct BundlerOptions {
  // --- Input
  pub input: Option<Vec<InputItem>>,
  pub cwd: Option<PathBuf>,
  pub mode: Option<BuildMode>,

  // --- Output
  pub dir: Option<String>,
  pub public_path: Option<String>,
  pub entry_filenames: Option<String>,
  pub css_filenames: Option<String>,
  pub asset_filenames: Option<String>,

  // --- Resolve
  pub resolve: Option<ResolveOptions>,

  // --- Dev server
  pub dev_server: Option<DevServerOptions>,

  // --- Emission
  pub html: Option<HtmlOptions>,
  pub copy: Option<Vec<CopyPattern>>,

  // --- Stylesheets
  pub style: Option<StyleOptions>,
}
