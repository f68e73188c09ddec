use std::path::Path;

use wirepack_common::{
  BuildMode, BuildPlugin, BundlerOptions, FilenameTemplate, HtmlPluginOptions,
  NormalizedBundlerOptions, NormalizedDevServerOptions, NormalizedStyleOptions,
  OptimizationOptions, ResolveOptions, RuleTable,
};
use wirepack_utils::path_ext::PathExt;

pub struct NormalizeOptionsReturn {
  pub options: NormalizedBundlerOptions,
  pub resolve_options: ResolveOptions,
}

/// Resolves every default and derives every mode-dependent value. The result
/// is the only configuration record the rest of the build ever sees.
pub fn normalize_options(mut raw_options: BundlerOptions) -> NormalizeOptionsReturn {
  let mode = raw_options.mode.unwrap_or_else(BuildMode::from_env);
  let cwd = raw_options
    .cwd
    .unwrap_or_else(|| std::env::current_dir().expect("Failed to get current dir"));

  let raw_resolve = std::mem::take(&mut raw_options.resolve).unwrap_or_default();

  let input = raw_options.input.unwrap_or_default();

  let entry_filenames: FilenameTemplate = raw_options
    .entry_filenames
    .unwrap_or_else(|| {
      if mode.is_prod() { "[name].[hash].build.js" } else { "[name].js" }.to_string()
    })
    .into();
  let css_filenames: FilenameTemplate = raw_options
    .css_filenames
    .unwrap_or_else(|| {
      if mode.is_prod() { "[name].[hash].build.css" } else { "[name].css" }.to_string()
    })
    .into();
  let asset_filenames: FilenameTemplate =
    raw_options.asset_filenames.unwrap_or_else(|| "[hash][extname]".to_string()).into();

  // The public path only applies to production output; development always
  // serves from the root.
  let public_path = if mode.is_prod() {
    raw_options.public_path.unwrap_or_default()
  } else {
    String::new()
  };

  let raw_dev_server = raw_options.dev_server.unwrap_or_default();
  let dev_server = NormalizedDevServerOptions {
    port: raw_dev_server.port.unwrap_or(4200),
    hot: mode.is_dev(),
    history_api_fallback: raw_dev_server.history_api_fallback.unwrap_or(true),
    overlay: raw_dev_server.overlay.unwrap_or(true),
  };

  let raw_style = raw_options.style.unwrap_or_default();
  let style = NormalizedStyleOptions {
    variables_path: cwd
      .join(raw_style.variables.as_deref().unwrap_or("src/styles/variables.json")),
    icon_dir: cwd.join(raw_style.icon_dir.as_deref().unwrap_or("src/images/icons")),
    import_extension: raw_style.import_extension.unwrap_or_else(|| ".pcss".to_string()),
    root_font_size: raw_style.root_font_size.unwrap_or(16.0),
  };

  let mut plugins = Vec::new();
  if let Some(html) = raw_options.html {
    if let Some(template) = html.template {
      let chunks = html.chunks.unwrap_or_else(|| {
        input
          .iter()
          .map(|item| {
            item.name.clone().unwrap_or_else(|| {
              Path::new(&item.import).representative_file_name().into_owned()
            })
          })
          .collect()
      });
      plugins.push(BuildPlugin::Html(HtmlPluginOptions {
        template,
        chunks,
        minify_whitespace: mode.is_prod(),
      }));
    }
  }
  plugins.push(BuildPlugin::CleanOutputDir);
  if let Some(patterns) = raw_options.copy {
    if !patterns.is_empty() {
      plugins.push(BuildPlugin::Copy { patterns });
    }
  }
  plugins.push(BuildPlugin::ExtractCss { filename: css_filenames.clone() });
  plugins.push(BuildPlugin::SvgSprite { plain: true });
  if mode.is_prod() {
    plugins.push(BuildPlugin::BundleAnalyzer);
  }

  let normalized = NormalizedBundlerOptions {
    input,
    cwd,
    mode,
    dir: raw_options.dir.unwrap_or_else(|| "dist".to_string()),
    public_path,
    entry_filenames,
    css_filenames,
    asset_filenames,
    minify: mode.is_prod(),
    source_map: mode.is_dev(),
    dev_server,
    rules: RuleTable::standard(mode),
    plugins,
    optimization: OptimizationOptions::standard(mode),
    style,
  };

  NormalizeOptionsReturn { options: normalized, resolve_options: raw_resolve }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;
  use wirepack_common::{HtmlOptions, InputItem};

  fn raw(mode: BuildMode) -> BundlerOptions {
    BundlerOptions {
      input: Some(vec![InputItem::from(("main", "./src/main.js"))]),
      cwd: Some(PathBuf::from("/project")),
      mode: Some(mode),
      public_path: Some("/webpack-project/".to_string()),
      ..Default::default()
    }
  }

  #[test]
  fn development_derivations() {
    let normalized = normalize_options(raw(BuildMode::Development)).options;
    assert_eq!(normalized.entry_filenames.template(), "[name].js");
    assert_eq!(normalized.css_filenames.template(), "[name].css");
    assert!(!normalized.entry_filenames.has_hash_placeholder());
    assert!(!normalized.minify);
    assert!(normalized.source_map);
    assert!(normalized.dev_server.hot);
    assert_eq!(normalized.dev_server.port, 4200);
    assert_eq!(normalized.public_path, "");
    assert!(!normalized.optimization.minimize());
    assert!(!normalized.plugins.iter().any(|plugin| plugin.name() == "bundle-analyzer"));
  }

  #[test]
  fn production_derivations() {
    let normalized = normalize_options(raw(BuildMode::Production)).options;
    assert_eq!(normalized.entry_filenames.template(), "[name].[hash].build.js");
    assert_eq!(normalized.css_filenames.template(), "[name].[hash].build.css");
    assert!(normalized.entry_filenames.has_hash_placeholder());
    assert!(normalized.minify);
    assert!(!normalized.source_map);
    assert!(!normalized.dev_server.hot);
    assert_eq!(normalized.public_path, "/webpack-project/");
    assert!(normalized.optimization.minimize());
    assert!(normalized.plugins.iter().any(|plugin| plugin.name() == "bundle-analyzer"));
  }

  #[test]
  fn html_chunks_default_to_entry_names() {
    let mut options = raw(BuildMode::Development);
    options.html =
      Some(HtmlOptions { template: Some("src/pug/pages/index.pug".to_string()), chunks: None });
    let normalized = normalize_options(options).options;
    let html = normalized
      .plugins
      .iter()
      .find_map(|plugin| match plugin {
        BuildPlugin::Html(html) => Some(html),
        _ => None,
      })
      .expect("html plugin should be assembled");
    assert_eq!(html.chunks, vec!["main".to_string()]);
    assert!(!html.minify_whitespace);
  }

  #[test]
  fn style_defaults_are_anchored_at_cwd() {
    let normalized = normalize_options(raw(BuildMode::Development)).options;
    assert_eq!(normalized.style.variables_path, PathBuf::from("/project/src/styles/variables.json"));
    assert_eq!(normalized.style.icon_dir, PathBuf::from("/project/src/images/icons"));
    assert_eq!(normalized.style.import_extension, ".pcss");
    assert!((normalized.style.root_font_size - 16.0).abs() < f64::EPSILON);
    assert_eq!(normalized.out_dir(), PathBuf::from("/project/dist"));
  }
}
