use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;
use sugar_path::SugarPath;

use wirepack_error::{BuildResult, resolution_error};
use wirepack_utils::path_ext::PathExt;

use crate::TransformContext;

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"@import\s+(?:url\()?["']([^"']+)["']\)?\s*;"#).unwrap()
});

#[derive(Debug, Clone)]
pub struct ImportFlattenOptions {
  /// Extension appended to extensionless import targets, `.pcss` in the
  /// standard pipeline.
  pub extension: String,
}

/// Inlines local `@import` directives recursively so every later step sees
/// the full rule set. Remote imports are left untouched; an unresolvable
/// local target is fatal.
pub fn flatten(
  source: &str,
  options: &ImportFlattenOptions,
  ctx: &TransformContext,
) -> BuildResult<String> {
  let mut visited = FxHashSet::default();
  flatten_in_dir(source, ctx.file_dir, options, ctx, &mut visited)
}

fn is_remote(target: &str) -> bool {
  target.starts_with("http://") || target.starts_with("https://") || target.starts_with("//")
}

fn resolve_target(
  target: &str,
  dir: &Path,
  options: &ImportFlattenOptions,
  ctx: &TransformContext,
) -> Option<PathBuf> {
  let exact = dir.join(target).normalize();
  if ctx.fs.is_file(&exact) {
    return Some(exact);
  }
  let with_extension =
    PathBuf::from(format!("{}{}", exact.expect_to_slash(), options.extension));
  ctx.fs.is_file(&with_extension).then_some(with_extension)
}

fn flatten_in_dir(
  source: &str,
  dir: &Path,
  options: &ImportFlattenOptions,
  ctx: &TransformContext,
  visited: &mut FxHashSet<PathBuf>,
) -> BuildResult<String> {
  let mut output = String::with_capacity(source.len());
  let mut last_end = 0;

  for captures in IMPORT_RE.captures_iter(source) {
    let whole = captures.get(0).expect("capture group 0 is the whole match");
    let target = &captures[1];

    output.push_str(&source[last_end..whole.start()]);
    last_end = whole.end();

    if is_remote(target) {
      output.push_str(whole.as_str());
      continue;
    }

    let Some(path) = resolve_target(target, dir, options, ctx) else {
      return Err(
        resolution_error(format!("cannot resolve `@import \"{target}\"` from `{}`", dir.display()))
          .into(),
      );
    };

    // A file imported twice is inlined once; cycles terminate here too.
    if !visited.insert(path.clone()) {
      continue;
    }

    let imported = ctx.fs.read_to_string(&path).map_err(|error| {
      resolution_error(format!("cannot read imported `{}`: {error}", path.display()))
    })?;
    let parent = path.parent().unwrap_or(dir);
    let inlined = flatten_in_dir(&imported, parent, options, ctx, visited)?;
    output.push_str(&inlined);
  }

  output.push_str(&source[last_end..]);
  Ok(output)
}
