use serde::Serialize;

use crate::FilenameTemplate;

#[derive(Debug, Clone, Serialize)]
pub struct HtmlPluginOptions {
  pub template: String,
  pub chunks: Vec<String>,
  pub minify_whitespace: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CopyPattern {
  pub from: String,
  pub to: String,
}

impl From<(&str, &str)> for CopyPattern {
  fn from((from, to): (&str, &str)) -> Self {
    Self { from: from.to_string(), to: to.to_string() }
  }
}

/// One variant per build-time side effect. The list is assembled by a pure
/// builder parameterized on build mode, so there is no runtime type
/// inspection and the set of active plugins is fixed once options are
/// normalized.
#[derive(Debug, Clone, Serialize)]
pub enum BuildPlugin {
  /// Generates the HTML entry document from a template, injecting the
  /// script/style references of the selected chunks.
  Html(HtmlPluginOptions),
  /// Empties the output directory before anything is written.
  CleanOutputDir,
  /// Copies static files into the output directory verbatim.
  Copy { patterns: Vec<CopyPattern> },
  /// Emits extracted stylesheet bundles under the given filename pattern.
  ExtractCss { filename: FilenameTemplate },
  /// Collects sprite-extracted SVG symbols into one plain sprite sheet.
  SvgSprite { plain: bool },
  /// Emits the bundle-composition report. Production only.
  BundleAnalyzer,
}

impl BuildPlugin {
  pub fn name(&self) -> &'static str {
    match self {
      Self::Html(_) => "html",
      Self::CleanOutputDir => "clean-output-dir",
      Self::Copy { .. } => "copy",
      Self::ExtractCss { .. } => "extract-css",
      Self::SvgSprite { .. } => "svg-sprite",
      Self::BundleAnalyzer => "bundle-analyzer",
    }
  }
}
