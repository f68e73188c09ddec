mod bundler_options;

use std::sync::Arc;

pub use bundler_options::{
  BundlerOptions,
  build_mode::{BuildMode, MODE_ENV_VAR},
  dev_server::{DevServerOptions, NormalizedDevServerOptions},
  filename_template::{FileNameRenderOptions, FilenameTemplate},
  html::HtmlOptions,
  input_item::InputItem,
  module_rule::{
    DataFormat, Loader, Preprocessor, RuleTable, SourceKind, StyleFlavor, TemplateUsage,
    TransformChain,
  },
  normalized_bundler_options::NormalizedBundlerOptions,
  optimization::{ChunkSplitStrategy, Minimizer, OptimizationOptions},
  plugin::{BuildPlugin, CopyPattern, HtmlPluginOptions},
  resolve_options::ResolveOptions,
  style_options::{NormalizedStyleOptions, StyleOptions},
};

pub type SharedOptions = Arc<NormalizedBundlerOptions>;
