use std::{path::Path, sync::Arc};

use wirepack_common::{
  BuildPlugin, BundlerOptions, FileNameRenderOptions, SharedOptions, SourceKind, StyleFlavor,
  TemplateUsage, TransformChain,
};
use wirepack_css::{StylePipeline, TransformContext, load_variables};
use wirepack_error::{BuildResult, config_error};
use wirepack_fs::{FileSystem, OsFileSystem};
use wirepack_resolver::Resolver;
use wirepack_utils::{
  path_ext::PathExt, sanitize_file_name::sanitize_file_name, xxhash::content_hash,
};

use crate::{
  stages::validate::validate,
  types::bundle_output::{BundleOutput, OutputAsset},
  utils::normalize_options::{NormalizeOptionsReturn, normalize_options},
};

pub struct Bundler<F: FileSystem + Clone = OsFileSystem> {
  pub closed: bool,
  fs: F,
  options: SharedOptions,
  resolver: Resolver<F>,
}

impl Bundler {
  pub fn new(options: BundlerOptions) -> Self {
    Self::with_file_system(options, OsFileSystem)
  }
}

impl<F: FileSystem + Clone> Bundler<F> {
  pub fn with_file_system(options: BundlerOptions, fs: F) -> Self {
    let NormalizeOptionsReturn { options, resolve_options } = normalize_options(options);
    let resolver = Resolver::new(resolve_options, options.cwd.clone(), fs.clone());
    Self { closed: false, fs, options: Arc::new(options), resolver }
  }

  pub fn options(&self) -> &SharedOptions {
    &self.options
  }

  pub fn resolver(&self) -> &Resolver<F> {
    &self.resolver
  }

  /// Validation without emission, see [`validate`].
  pub fn check(&self) -> BuildResult<()> {
    validate(&self.options, &self.resolver, &self.fs)
  }

  pub fn chain_for(&self, path: &Path, usage: TemplateUsage) -> BuildResult<&TransformChain> {
    self.options.rules.chain_for(path, usage)
  }

  /// Runs the full stylesheet pipeline over one file.
  pub fn transform_stylesheet(&self, path: &Path) -> BuildResult<String> {
    let source = self.fs.read_to_string(path).map_err(|error| {
      config_error(format!("cannot read stylesheet `{}`: {error}", path.display()))
    })?;
    let variables = load_variables(&self.fs, &self.options.style.variables_path)?;
    let pipeline = StylePipeline::standard(variables, &self.options.style);
    let file_dir = path.parent().unwrap_or_else(|| self.options.cwd.as_path());
    let ctx = TransformContext {
      fs: &self.fs,
      file_dir,
      icon_dir: &self.options.style.icon_dir,
    };
    pipeline.apply(&source, &ctx)
  }

  /// Renders the mode-selected entry or stylesheet template with the
  /// content hash.
  pub fn output_filename(&self, name: &str, ext: &str, content: &[u8]) -> String {
    let template =
      if ext == "css" { &self.options.css_filenames } else { &self.options.entry_filenames };
    let hash = content_hash(content);
    template.render(&FileNameRenderOptions {
      name: Some(name),
      hash: Some(&hash),
      ext: Some(ext),
    })
  }

  pub fn asset_filename(&self, path: &Path, content: &[u8]) -> String {
    let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    let hash = content_hash(content);
    self.options.asset_filenames.render(&FileNameRenderOptions {
      name: None,
      hash: Some(&hash),
      ext: Some(ext),
    })
  }

  /// Produces the in-memory bundle; with `write` it also cleans the output
  /// directory and persists every asset. Nothing is emitted when [`check`]
  /// fails.
  ///
  /// [`check`]: Bundler::check
  pub fn build(&mut self, write: bool) -> BuildResult<BundleOutput> {
    if self.closed {
      return Err(config_error("bundler is closed").into());
    }
    self.check()?;

    let options = Arc::clone(&self.options);
    let mut output = BundleOutput::default();

    for item in &options.input {
      let resolved = self.resolver.resolve(None, &item.import)?;
      let path = Path::new(resolved.path.as_str());
      let name = sanitize_file_name(
        &item.name.clone().unwrap_or_else(|| path.representative_file_name().into_owned()),
      );

      match SourceKind::from_path(path) {
        Some(SourceKind::Style(StyleFlavor::Plain)) => {
          let sheet = self.transform_stylesheet(path)?;
          let filename = self.output_filename(&name, "css", sheet.as_bytes());
          output.assets.push(OutputAsset { filename, content: sheet.into_bytes() });
        }
        Some(SourceKind::Script) => {
          let content = self.read_source(path)?;
          let filename = self.output_filename(&name, "js", &content);
          output.assets.push(OutputAsset { filename, content });
        }
        Some(SourceKind::Style(_)) => {
          output.warnings.push(config_error(format!(
            "entry `{}` needs an external preprocessor and was skipped",
            item.import
          )));
        }
        Some(_) => {
          let content = self.read_source(path)?;
          let filename = self.asset_filename(path, &content);
          output.assets.push(OutputAsset { filename, content });
        }
        // Already rejected by `check`.
        None => {}
      }
    }

    for plugin in &options.plugins {
      if let BuildPlugin::Copy { patterns } = plugin {
        for pattern in patterns {
          let content = self.read_source(&options.cwd.join(&pattern.from))?;
          output.assets.push(OutputAsset { filename: pattern.to.clone(), content });
        }
      }
    }

    if write {
      let out_dir = options.out_dir();
      if options.plugins.iter().any(|plugin| matches!(plugin, BuildPlugin::CleanOutputDir)) {
        self.fs.remove_dir_all(&out_dir).map_err(|error| {
          config_error(format!("cannot clean `{}`: {error}", out_dir.display()))
        })?;
      }
      for asset in &output.assets {
        let target = out_dir.join(&asset.filename);
        self.fs.write(&target, &asset.content).map_err(|error| {
          config_error(format!("cannot write `{}`: {error}", target.display()))
        })?;
      }
    }

    Ok(output)
  }

  pub fn generate(&mut self) -> BuildResult<BundleOutput> {
    self.build(false)
  }

  pub fn write(&mut self) -> BuildResult<BundleOutput> {
    self.build(true)
  }

  pub fn close(&mut self) {
    self.closed = true;
  }

  fn read_source(&self, path: &Path) -> BuildResult<Vec<u8>> {
    Ok(self.fs.read(path).map_err(|error| {
      config_error(format!("cannot read `{}`: {error}", path.display()))
    })?)
  }
}
