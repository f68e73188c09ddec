use std::sync::LazyLock;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::Regex;

use wirepack_error::{BuildResult, transform_error};

use crate::TransformContext;

static SVG_LOAD_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"svg-load\(\s*["']([^"']+)["']\s*\)"#).unwrap());

static FILL_ATTR_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"\s(?:fill|stroke)="[^"]*""#).unwrap());

// Minimal set that keeps the data URL valid inside `url("…")`.
const DATA_URL_SET: &AsciiSet =
  &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'%').add(b'<').add(b'>').add(b'{').add(b'}');

#[derive(Debug, Clone)]
pub struct InlineSvgOptions {
  /// Strip `fill`/`stroke` attributes from the embedded markup. Disabled in
  /// the standard pipeline so icons keep their authored colors.
  pub remove_fill: bool,
}

/// Replaces `svg-load('name.svg')` references with inlined data URLs
/// resolved against the fixed icon directory. A reference to a file that
/// does not exist is fatal.
pub fn inline(
  source: &str,
  options: &InlineSvgOptions,
  ctx: &TransformContext,
) -> BuildResult<String> {
  let mut output = String::with_capacity(source.len());
  let mut last_end = 0;

  for captures in SVG_LOAD_RE.captures_iter(source) {
    let whole = captures.get(0).expect("capture group 0 is the whole match");
    let name = &captures[1];
    let path = ctx.icon_dir.join(name);

    let markup = ctx.fs.read_to_string(&path).map_err(|error| {
      transform_error(format!("cannot inline `{}`: {error}", path.display()))
    })?;
    let markup = if options.remove_fill {
      FILL_ATTR_RE.replace_all(&markup, "").into_owned()
    } else {
      markup
    };
    let encoded = utf8_percent_encode(markup.trim(), DATA_URL_SET).to_string();

    output.push_str(&source[last_end..whole.start()]);
    output.push_str("url(\"data:image/svg+xml;charset=utf-8,");
    output.push_str(&encoded);
    output.push_str("\")");
    last_end = whole.end();
  }

  output.push_str(&source[last_end..]);
  Ok(output)
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::*;
  use wirepack_error::TransformError;
  use wirepack_fs::MemoryFileSystem;

  const ICON: &str = r##"<svg viewBox="0 0 16 16" fill="#000"><path d="M0 0h16v16"/></svg>"##;

  fn ctx(fs: &MemoryFileSystem) -> TransformContext<'_> {
    TransformContext {
      fs,
      file_dir: Path::new("/src/styles"),
      icon_dir: Path::new("/src/images/icons"),
    }
  }

  #[test]
  fn embeds_icons_as_data_urls() {
    let fs = MemoryFileSystem::new(&[("/src/images/icons/close.svg", ICON)]);
    let ctx = ctx(&fs);
    let inlined = inline(
      ".close { background: svg-load('close.svg') no-repeat; }",
      &InlineSvgOptions { remove_fill: false },
      &ctx,
    )
    .unwrap();
    assert!(inlined.starts_with(".close { background: url(\"data:image/svg+xml;charset=utf-8,"));
    assert!(inlined.ends_with(" no-repeat; }"));
    // The fill attribute survives with the option disabled.
    assert!(inlined.contains("fill="));
    assert!(!inlined.contains("svg-load"));
  }

  #[test]
  fn strips_fill_when_asked() {
    let fs = MemoryFileSystem::new(&[("/src/images/icons/close.svg", ICON)]);
    let ctx = ctx(&fs);
    let inlined = inline(
      "a { background: svg-load(\"close.svg\"); }",
      &InlineSvgOptions { remove_fill: true },
      &ctx,
    )
    .unwrap();
    assert!(!inlined.contains("fill="));
  }

  #[test]
  fn missing_icon_is_a_transform_error() {
    let fs = MemoryFileSystem::default();
    let ctx = ctx(&fs);
    let errors = inline(
      "a { background: svg-load('ghost.svg'); }",
      &InlineSvgOptions { remove_fill: false },
      &ctx,
    )
    .unwrap_err();
    assert!(errors[0].downcast_ref::<TransformError>().is_some());
  }
}
