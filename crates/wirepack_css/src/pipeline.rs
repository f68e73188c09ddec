use wirepack_common::NormalizedStyleOptions;
use wirepack_error::BuildResult;

use crate::{
  TransformContext,
  steps::{
    color_fn, expand_variables, import_flatten, import_flatten::ImportFlattenOptions, inline_svg,
    inline_svg::InlineSvgOptions, minify, nesting, px_to_rem, px_to_rem::PxToRemOptions,
    vendor_prefix,
  },
  variables::VariableMap,
};

/// One transform of the stylesheet pipeline. A step's identity is its
/// position in the ordered list; the variants exist so the list is
/// statically typed instead of inspecting plugin objects at runtime.
pub enum StyleStep {
  ImportFlatten(ImportFlattenOptions),
  VendorPrefix,
  Variables(VariableMap),
  NestingExpansion,
  ColorFunctions,
  InlineSvg(InlineSvgOptions),
  Minify,
  PxToRem(PxToRemOptions),
}

impl StyleStep {
  pub fn name(&self) -> &'static str {
    match self {
      Self::ImportFlatten(_) => "import-flatten",
      Self::VendorPrefix => "vendor-prefix",
      Self::Variables(_) => "variables",
      Self::NestingExpansion => "nesting-expansion",
      Self::ColorFunctions => "color-functions",
      Self::InlineSvg(_) => "inline-svg",
      Self::Minify => "minify",
      Self::PxToRem(_) => "px-to-rem",
    }
  }

  fn apply(&self, source: &str, ctx: &TransformContext) -> BuildResult<String> {
    match self {
      Self::ImportFlatten(options) => import_flatten::flatten(source, options, ctx),
      Self::VendorPrefix => Ok(vendor_prefix::prefix(source)),
      Self::Variables(variables) => Ok(expand_variables::expand(source, variables)),
      Self::NestingExpansion => nesting::expand(source),
      Self::ColorFunctions => Ok(color_fn::expand(source)),
      Self::InlineSvg(options) => inline_svg::inline(source, options, ctx),
      Self::Minify => minify::minify(source),
      Self::PxToRem(options) => Ok(px_to_rem::convert(source, options)),
    }
  }
}

/// The ordered transform sequence. Order is load-bearing: imports must be
/// flattened before anything else sees the sheet, variables must be expanded
/// before nesting, and minification must not run before the expansion steps
/// or it would destroy their input syntax.
pub struct StylePipeline {
  steps: Vec<StyleStep>,
}

impl StylePipeline {
  pub fn new(steps: Vec<StyleStep>) -> Self {
    Self { steps }
  }

  /// The mandatory eight-step sequence.
  pub fn standard(variables: VariableMap, options: &NormalizedStyleOptions) -> Self {
    Self::new(vec![
      StyleStep::ImportFlatten(ImportFlattenOptions {
        extension: options.import_extension.clone(),
      }),
      StyleStep::VendorPrefix,
      StyleStep::Variables(variables),
      StyleStep::NestingExpansion,
      StyleStep::ColorFunctions,
      StyleStep::InlineSvg(InlineSvgOptions { remove_fill: false }),
      StyleStep::Minify,
      StyleStep::PxToRem(PxToRemOptions {
        root_value: options.root_font_size,
        ..PxToRemOptions::default()
      }),
    ])
  }

  pub fn steps(&self) -> &[StyleStep] {
    &self.steps
  }

  pub fn apply(&self, source: &str, ctx: &TransformContext) -> BuildResult<String> {
    let mut sheet = source.to_string();
    for step in &self.steps {
      sheet = step.apply(&sheet, ctx)?;
    }
    Ok(sheet)
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::*;
  use wirepack_common::NormalizedStyleOptions;
  use wirepack_fs::MemoryFileSystem;

  fn style_options() -> NormalizedStyleOptions {
    NormalizedStyleOptions {
      variables_path: "/project/src/styles/variables.json".into(),
      icon_dir: "/project/src/images/icons".into(),
      import_extension: ".pcss".to_string(),
      root_font_size: 16.0,
    }
  }

  fn variables() -> VariableMap {
    let mut map = VariableMap::default();
    map.insert("accent".to_string(), serde_json::Value::String("#ff0000".to_string()));
    map
  }

  #[test]
  fn standard_pipeline_order_is_fixed() {
    let pipeline = StylePipeline::standard(variables(), &style_options());
    let names: Vec<&str> = pipeline.steps().iter().map(StyleStep::name).collect();
    assert_eq!(
      names,
      [
        "import-flatten",
        "vendor-prefix",
        "variables",
        "nesting-expansion",
        "color-functions",
        "inline-svg",
        "minify",
        "px-to-rem"
      ]
    );
  }

  #[test]
  fn runs_end_to_end() {
    let fs = MemoryFileSystem::new(&[(
      "/project/src/styles/base.pcss",
      ".card { width: 32px; border: 1px solid black; }\n",
    )]);
    let ctx = TransformContext {
      fs: &fs,
      file_dir: Path::new("/project/src/styles"),
      icon_dir: Path::new("/project/src/images/icons"),
    };
    let source = "@import \"base\";\n.title { color: $accent; .sub { width: 8px; } }\n";
    let pipeline = StylePipeline::standard(variables(), &style_options());
    let sheet = pipeline.apply(source, &ctx).unwrap();

    assert!(sheet.contains("2rem"));
    assert!(sheet.contains("border:1px solid"));
    assert!(sheet.contains(".title .sub"));
    assert!(!sheet.contains('$'));
    assert!(!sheet.contains("@import"));
  }

  #[test]
  fn expansion_steps_are_idempotent_on_expanded_sheets() {
    let fs = MemoryFileSystem::default();
    let ctx = TransformContext {
      fs: &fs,
      file_dir: Path::new("/project/src/styles"),
      icon_dir: Path::new("/project/src/images/icons"),
    };
    // Steps 3-6 only: variables, nesting, color functions, inline svg.
    let pipeline = StylePipeline::new(vec![
      StyleStep::Variables(variables()),
      StyleStep::NestingExpansion,
      StyleStep::ColorFunctions,
      StyleStep::InlineSvg(InlineSvgOptions { remove_fill: false }),
    ]);
    let source = ".a { color: $accent; .b { background: rgb(#00ff00); } }\n";
    let once = pipeline.apply(source, &ctx).unwrap();
    let twice = pipeline.apply(&once, &ctx).unwrap();
    assert_eq!(once, twice);
  }
}
