use std::path::{Path, PathBuf};

use arcstr::ArcStr;
use itertools::Itertools;
use sugar_path::SugarPath;

use wirepack_common::ResolveOptions;
use wirepack_error::resolution_error;
use wirepack_fs::{FileSystem, OsFileSystem};
use wirepack_utils::path_ext::PathExt;

pub struct Resolver<T: FileSystem = OsFileSystem> {
  cwd: PathBuf,
  // Sorted longest prefix first so `@src/images` wins over `@src`.
  alias: Vec<(String, PathBuf)>,
  extensions: Vec<String>,
  fs: T,
}

#[derive(Debug)]
pub struct ResolveReturn {
  pub path: ArcStr,
}

impl<T: FileSystem> Resolver<T> {
  pub fn new(options: ResolveOptions, cwd: PathBuf, fs: T) -> Self {
    let mut alias: Vec<(String, PathBuf)> = options
      .alias
      .unwrap_or_default()
      .into_iter()
      .map(|(prefix, dir)| {
        let dir = Path::new(&dir).absolutize_with(&cwd);
        (prefix, dir)
      })
      .collect();
    alias.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let extensions = options
      .extensions
      .unwrap_or_else(|| vec![".js".to_string(), ".vue".to_string(), ".json".to_string()])
      .into_iter()
      .map(|extension| {
        if extension.starts_with('.') { extension } else { format!(".{extension}") }
      })
      .unique()
      .collect();

    Self { cwd, alias, extensions, fs }
  }

  pub fn cwd(&self) -> &PathBuf {
    &self.cwd
  }

  pub fn alias(&self) -> &[(String, PathBuf)] {
    &self.alias
  }

  /// Pure path rewriting: alias substitution, relative joining against the
  /// importer, absolute pass-through. No file-system access; `None` means
  /// the specifier is bare and outside this resolver's authority.
  pub fn rewrite(&self, specifier: &str, importer: Option<&Path>) -> Option<PathBuf> {
    for (prefix, dir) in &self.alias {
      if specifier == prefix {
        return Some(dir.clone());
      }
      if let Some(rest) = specifier.strip_prefix(prefix) {
        if let Some(rest) = rest.strip_prefix('/') {
          return Some(dir.join(rest));
        }
      }
    }

    if specifier.starts_with("./") || specifier.starts_with("../") {
      let base = importer.and_then(Path::parent).unwrap_or(&self.cwd);
      return Some(base.join(specifier).normalize());
    }

    let path = Path::new(specifier);
    if path.is_absolute() {
      return Some(path.normalize());
    }

    None
  }

  /// Rewriting followed by existence probing: the exact path first, then
  /// each configured extension appended, then a directory index file.
  pub fn resolve(
    &self,
    importer: Option<&Path>,
    specifier: &str,
  ) -> anyhow::Result<ResolveReturn> {
    let Some(path) = self.rewrite(specifier, importer) else {
      return Err(resolution_error(format!(
        "`{specifier}` matches no alias and is not a relative or absolute path"
      )));
    };

    if self.fs.is_file(&path) {
      return Ok(ResolveReturn { path: path.expect_to_slash().into() });
    }

    let slashed = path.expect_to_slash();
    for extension in &self.extensions {
      let candidate = PathBuf::from(format!("{slashed}{extension}"));
      if self.fs.is_file(&candidate) {
        return Ok(ResolveReturn { path: candidate.expect_to_slash().into() });
      }
    }

    if self.fs.is_dir(&path) {
      for extension in &self.extensions {
        let candidate = path.join(format!("index{extension}"));
        if self.fs.is_file(&candidate) {
          return Ok(ResolveReturn { path: candidate.expect_to_slash().into() });
        }
      }
    }

    Err(resolution_error(format!(
      "cannot resolve `{specifier}`{}",
      importer.map_or_else(String::new, |p| format!(" from `{}`", p.display()))
    )))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use wirepack_error::ResolutionError;
  use wirepack_fs::MemoryFileSystem;

  fn resolver(files: &[(&str, &str)]) -> Resolver<MemoryFileSystem> {
    Resolver::new(
      ResolveOptions {
        alias: Some(vec![
          ("@".to_string(), "/project/src".to_string()),
          ("images".to_string(), "/project/src/assets/images".to_string()),
        ]),
        extensions: None,
      },
      PathBuf::from("/project"),
      MemoryFileSystem::new(files),
    )
  }

  #[test]
  fn rewrites_alias_without_touching_the_file_system() {
    let resolver = resolver(&[]);
    assert_eq!(
      resolver.rewrite("@/utils", None),
      Some(PathBuf::from("/project/src/utils"))
    );
    assert_eq!(
      resolver.rewrite("images/logo.png", None),
      Some(PathBuf::from("/project/src/assets/images/logo.png"))
    );
  }

  #[test]
  fn resolves_alias_with_extension_probing() {
    let resolver = resolver(&[("/project/src/utils.js", "")]);
    let resolved = resolver.resolve(None, "@/utils").unwrap();
    assert_eq!(resolved.path.as_str(), "/project/src/utils.js");
  }

  #[test]
  fn resolves_relative_import_against_the_importer() {
    let resolver = resolver(&[("/project/src/lib/helper.js", "")]);
    let importer = PathBuf::from("/project/src/main.js");
    let resolved = resolver.resolve(Some(&importer), "./lib/helper").unwrap();
    assert_eq!(resolved.path.as_str(), "/project/src/lib/helper.js");
  }

  #[test]
  fn resolves_directory_index() {
    let resolver = resolver(&[("/project/src/widget/index.js", "")]);
    let resolved = resolver.resolve(None, "@/widget").unwrap();
    assert_eq!(resolved.path.as_str(), "/project/src/widget/index.js");
  }

  #[test]
  fn bare_specifier_is_a_resolution_error() {
    let resolver = resolver(&[]);
    let error = resolver.resolve(None, "lodash").unwrap_err();
    assert!(error.downcast_ref::<ResolutionError>().is_some());
  }

  #[test]
  fn missing_file_is_a_resolution_error() {
    let resolver = resolver(&[]);
    let error = resolver.resolve(None, "@/nothing").unwrap_err();
    assert!(error.downcast_ref::<ResolutionError>().is_some());
  }
}
