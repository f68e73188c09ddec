use std::path::Path;

use serde::Serialize;
use wirepack_error::{BuildResult, resolution_error};

use crate::{BuildMode, FilenameTemplate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleFlavor {
  Plain,
  Less,
  Sass,
}

/// File classification by extension. Each recognized extension maps to
/// exactly one kind, which keeps the rule table free of overlapping
/// patterns by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
  Script,
  Component,
  Template,
  Style(StyleFlavor),
  Image,
  Font,
  Svg,
  Xml,
  Csv,
}

impl SourceKind {
  pub fn from_path(path: &Path) -> Option<Self> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    Some(match extension.as_str() {
      "js" | "mjs" => Self::Script,
      "vue" => Self::Component,
      "pug" => Self::Template,
      "css" | "pcss" | "postcss" => Self::Style(StyleFlavor::Plain),
      "less" => Self::Style(StyleFlavor::Less),
      "sass" | "scss" => Self::Style(StyleFlavor::Sass),
      "jpg" | "jpeg" | "png" | "gif" => Self::Image,
      "eot" | "ttf" | "woff" | "woff2" => Self::Font,
      "svg" => Self::Svg,
      "xml" => Self::Xml,
      "csv" => Self::Csv,
      _ => return None,
    })
  }
}

/// The one explicit tie-break in the whole configuration: a template file is
/// either a standalone page or a fragment embedded in a component, and the
/// two usages get different chains. Callers state the usage instead of the
/// table inferring it from string matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateUsage {
  #[default]
  Page,
  Fragment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Preprocessor {
  Less,
  Sass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
  Xml,
  Csv,
}

/// One content-rewriting step in a transform chain. Chains are declared in
/// application order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Loader {
  /// Development-only static analysis before transpilation.
  Lint,
  Transpile { cache: bool },
  /// Single-file component compiler.
  Component,
  TemplatePage { pretty: bool },
  TemplateFragment,
  Preprocess(Preprocessor),
  /// Runs the stylesheet transform pipeline from `wirepack_css`.
  StylePipeline { source_map: bool },
  CssModules { source_map: bool },
  /// Development sink: inject with hot replacement.
  StyleInject,
  /// Production sink: hand off to the extract-css plugin.
  StyleExtract,
  FileEmit { filename: FilenameTemplate },
  SvgOptimize { remove_title: bool, remove_attrs: Vec<String> },
  SvgTransform,
  SvgSprite { extract: bool },
  Data(DataFormat),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransformChain {
  loaders: Vec<Loader>,
}

impl TransformChain {
  pub fn new(loaders: Vec<Loader>) -> Self {
    Self { loaders }
  }

  pub fn loaders(&self) -> &[Loader] {
    &self.loaders
  }

  pub fn len(&self) -> usize {
    self.loaders.len()
  }

  pub fn is_empty(&self) -> bool {
    self.loaders.is_empty()
  }

  pub fn contains(&self, loader: &Loader) -> bool {
    self.loaders.contains(loader)
  }
}

/// Binds every recognized [`SourceKind`] to its ordered transform chain.
/// Built once per normalization, mode-dependent parts baked in.
#[derive(Debug, Clone, Serialize)]
pub struct RuleTable {
  script: TransformChain,
  component: TransformChain,
  template_page: TransformChain,
  template_fragment: TransformChain,
  style_plain: TransformChain,
  style_less: TransformChain,
  style_sass: TransformChain,
  asset: TransformChain,
  svg: TransformChain,
  xml: TransformChain,
  csv: TransformChain,
}

impl RuleTable {
  pub fn standard(mode: BuildMode) -> Self {
    let style_sink =
      if mode.is_dev() { Loader::StyleInject } else { Loader::StyleExtract };

    let style_chain = |head: Option<Loader>| {
      let mut loaders = Vec::with_capacity(3);
      loaders.extend(head);
      loaders.push(Loader::CssModules { source_map: true });
      loaders.push(style_sink.clone());
      TransformChain::new(loaders)
    };

    let mut script = Vec::with_capacity(2);
    if mode.is_dev() {
      script.push(Loader::Lint);
    }
    script.push(Loader::Transpile { cache: true });

    Self {
      script: TransformChain::new(script),
      component: TransformChain::new(vec![Loader::Component]),
      template_page: TransformChain::new(vec![Loader::TemplatePage { pretty: true }]),
      template_fragment: TransformChain::new(vec![Loader::TemplateFragment]),
      style_plain: style_chain(Some(Loader::StylePipeline { source_map: true })),
      style_less: style_chain(Some(Loader::Preprocess(Preprocessor::Less))),
      style_sass: style_chain(Some(Loader::Preprocess(Preprocessor::Sass))),
      asset: TransformChain::new(vec![Loader::FileEmit {
        filename: FilenameTemplate::from("[hash][extname]"),
      }]),
      svg: TransformChain::new(vec![
        Loader::SvgOptimize {
          remove_title: true,
          remove_attrs: vec!["fill".to_string(), "stroke".to_string()],
        },
        Loader::SvgTransform,
        Loader::SvgSprite { extract: true },
      ]),
      xml: TransformChain::new(vec![Loader::Data(DataFormat::Xml)]),
      csv: TransformChain::new(vec![Loader::Data(DataFormat::Csv)]),
    }
  }

  pub fn chain_for_kind(&self, kind: SourceKind, usage: TemplateUsage) -> &TransformChain {
    match kind {
      SourceKind::Script => &self.script,
      SourceKind::Component => &self.component,
      SourceKind::Template => match usage {
        TemplateUsage::Page => &self.template_page,
        TemplateUsage::Fragment => &self.template_fragment,
      },
      SourceKind::Style(StyleFlavor::Plain) => &self.style_plain,
      SourceKind::Style(StyleFlavor::Less) => &self.style_less,
      SourceKind::Style(StyleFlavor::Sass) => &self.style_sass,
      SourceKind::Image | SourceKind::Font => &self.asset,
      SourceKind::Svg => &self.svg,
      SourceKind::Xml => &self.xml,
      SourceKind::Csv => &self.csv,
    }
  }

  /// Lookup is total over recognized extensions and fatal for everything
  /// else; there is no silent pass-through.
  pub fn chain_for(&self, path: &Path, usage: TemplateUsage) -> BuildResult<&TransformChain> {
    let Some(kind) = SourceKind::from_path(path) else {
      return Err(
        resolution_error(format!("no rule matches `{}`", path.display())).into(),
      );
    };
    Ok(self.chain_for_kind(kind, usage))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use wirepack_error::ResolutionError;

  #[test]
  fn classifies_extensions() {
    assert_eq!(SourceKind::from_path(Path::new("src/main.js")), Some(SourceKind::Script));
    assert_eq!(SourceKind::from_path(Path::new("a.scss")), Some(SourceKind::Style(StyleFlavor::Sass)));
    assert_eq!(SourceKind::from_path(Path::new("logo.woff2")), Some(SourceKind::Font));
    assert_eq!(SourceKind::from_path(Path::new("README")), None);
  }

  #[test]
  fn unknown_extension_is_fatal() {
    let table = RuleTable::standard(BuildMode::Development);
    let errors = table.chain_for(Path::new("data.wat"), TemplateUsage::Page).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].downcast_ref::<ResolutionError>().is_some());
  }

  #[test]
  fn template_usage_selects_the_chain() {
    let table = RuleTable::standard(BuildMode::Development);
    let page = table.chain_for(Path::new("pages/index.pug"), TemplateUsage::Page).unwrap();
    let fragment =
      table.chain_for(Path::new("pages/index.pug"), TemplateUsage::Fragment).unwrap();
    assert!(page.contains(&Loader::TemplatePage { pretty: true }));
    assert!(fragment.contains(&Loader::TemplateFragment));
    assert_ne!(page, fragment);
  }

  #[test]
  fn script_chain_lints_only_in_development() {
    let dev = RuleTable::standard(BuildMode::Development);
    let prod = RuleTable::standard(BuildMode::Production);
    let path = Path::new("src/main.js");
    assert!(dev.chain_for(path, TemplateUsage::Page).unwrap().contains(&Loader::Lint));
    assert!(!prod.chain_for(path, TemplateUsage::Page).unwrap().contains(&Loader::Lint));
  }

  #[test]
  fn style_sink_follows_mode() {
    let dev = RuleTable::standard(BuildMode::Development);
    let prod = RuleTable::standard(BuildMode::Production);
    let path = Path::new("styles/app.pcss");
    let dev_chain = dev.chain_for(path, TemplateUsage::Page).unwrap();
    let prod_chain = prod.chain_for(path, TemplateUsage::Page).unwrap();
    assert!(dev_chain.contains(&Loader::StyleInject));
    assert!(prod_chain.contains(&Loader::StyleExtract));
    // The pipeline stage runs for plain styles in both modes.
    assert!(dev_chain.contains(&Loader::StylePipeline { source_map: true }));
    assert!(prod_chain.contains(&Loader::StylePipeline { source_map: true }));
  }

  #[test]
  fn preprocessed_styles_skip_the_pipeline() {
    let table = RuleTable::standard(BuildMode::Production);
    let chain = table.chain_for(Path::new("a.less"), TemplateUsage::Page).unwrap();
    assert!(chain.contains(&Loader::Preprocess(Preprocessor::Less)));
    assert!(!chain.contains(&Loader::StylePipeline { source_map: true }));
  }
}
