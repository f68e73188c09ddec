use std::path::Path;

use wirepack_common::{BuildPlugin, NormalizedBundlerOptions, TemplateUsage};
use wirepack_css::load_variables;
use wirepack_error::{BuildResult, config_error, resolution_error};
use wirepack_fs::FileSystem;
use wirepack_resolver::Resolver;

/// Pre-flight configuration audit. Collects every failure instead of
/// stopping at the first one; the build emits nothing when this errors.
pub fn validate<F: FileSystem>(
  options: &NormalizedBundlerOptions,
  resolver: &Resolver<F>,
  fs: &F,
) -> BuildResult<()> {
  let mut errors: Vec<anyhow::Error> = Vec::new();

  for item in &options.input {
    match resolver.resolve(None, &item.import) {
      Ok(resolved) => {
        if let Err(rule_errors) =
          options.rules.chain_for(Path::new(resolved.path.as_str()), TemplateUsage::Page)
        {
          errors.extend(rule_errors.0);
        }
      }
      Err(error) => {
        errors.push(config_error(format!("entry `{}`: {error}", item.import)));
      }
    }
  }

  for (prefix, dir) in resolver.alias() {
    if !fs.is_dir(dir) {
      errors.push(resolution_error(format!(
        "alias `{prefix}` points to missing directory `{}`",
        dir.display()
      )));
    }
  }

  for plugin in &options.plugins {
    match plugin {
      BuildPlugin::Html(html) => {
        let template = options.cwd.join(&html.template);
        if !fs.is_file(&template) {
          errors.push(config_error(format!(
            "html template `{}` does not exist",
            template.display()
          )));
        }
      }
      BuildPlugin::Copy { patterns } => {
        for pattern in patterns {
          let source = options.cwd.join(&pattern.from);
          if !fs.exists(&source) {
            errors.push(config_error(format!(
              "copy source `{}` does not exist",
              source.display()
            )));
          }
        }
      }
      _ => {}
    }
  }

  if options.style.root_font_size <= 0.0 {
    errors.push(config_error(format!(
      "root font size must be positive, got {}",
      options.style.root_font_size
    )));
  }

  if let Err(variable_errors) = load_variables(fs, &options.style.variables_path) {
    errors.extend(variable_errors.0);
  }

  if errors.is_empty() { Ok(()) } else { Err(errors.into()) }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;
  use crate::normalize_options;
  use wirepack_common::{
    BuildMode, BundlerOptions, CopyPattern, InputItem, ResolveOptions as RawResolveOptions,
    StyleOptions,
  };
  use wirepack_error::{ConfigError, ResolutionError};
  use wirepack_fs::MemoryFileSystem;

  fn checked(options: BundlerOptions, fs: &MemoryFileSystem) -> BuildResult<()> {
    let normalized = normalize_options(options);
    let resolver =
      Resolver::new(normalized.resolve_options, normalized.options.cwd.clone(), fs.clone());
    validate(&normalized.options, &resolver, fs)
  }

  #[test]
  fn passes_on_a_complete_project() {
    let fs = MemoryFileSystem::new(&[
      ("/project/src/main.js", ""),
      ("/project/src/styles/variables.json", "{}"),
      ("/project/static/favicon.ico", ""),
    ]);
    let options = BundlerOptions {
      input: Some(vec![InputItem::from(("main", "./src/main.js"))]),
      cwd: Some(PathBuf::from("/project")),
      mode: Some(BuildMode::Development),
      copy: Some(vec![CopyPattern::from(("static/favicon.ico", "favicon.ico"))]),
      ..Default::default()
    };
    assert!(checked(options, &fs).is_ok());
  }

  #[test]
  fn aggregates_every_failure() {
    let fs = MemoryFileSystem::new(&[("/project/src/data.wat", "")]);
    let options = BundlerOptions {
      // First entry does not resolve; second resolves but has no rule.
      input: Some(vec![
        InputItem::from("./src/missing.js"),
        InputItem::from("./src/data.wat"),
      ]),
      cwd: Some(PathBuf::from("/project")),
      mode: Some(BuildMode::Development),
      resolve: Some(RawResolveOptions {
        alias: Some(vec![("@".to_string(), "/project/nowhere".to_string())]),
        extensions: None,
      }),
      copy: Some(vec![CopyPattern::from(("static/gone.txt", "gone.txt"))]),
      ..Default::default()
    };
    let errors = checked(options, &fs).unwrap_err();
    // Missing entry, unruled entry, dead alias, dead copy source, missing
    // variable document.
    assert_eq!(errors.len(), 5);
    assert!(errors[0].downcast_ref::<ConfigError>().is_some());
    assert!(errors[1].downcast_ref::<ResolutionError>().is_some());
    assert!(errors[2].downcast_ref::<ResolutionError>().is_some());
    assert!(errors[3].downcast_ref::<ConfigError>().is_some());
    assert!(errors[4].downcast_ref::<ConfigError>().is_some());
  }

  #[test]
  fn rejects_a_non_positive_root_font_size() {
    let fs = MemoryFileSystem::new(&[
      ("/project/src/main.js", ""),
      ("/project/src/styles/variables.json", "{}"),
    ]);
    let options = BundlerOptions {
      input: Some(vec![InputItem::from(("main", "./src/main.js"))]),
      cwd: Some(PathBuf::from("/project")),
      mode: Some(BuildMode::Development),
      style: Some(StyleOptions { root_font_size: Some(0.0), ..Default::default() }),
      ..Default::default()
    };
    let errors = checked(options, &fs).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].downcast_ref::<ConfigError>().is_some());
  }
}
