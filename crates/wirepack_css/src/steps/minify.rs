use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};

use wirepack_error::{BuildResult, transform_error};

/// Whole-sheet size reduction via `lightningcss`. This is the one step that
/// parses the sheet strictly, so it has to run after every expansion step
/// has removed the non-CSS syntax (`$vars`, `svg-load()`).
pub fn minify(source: &str) -> BuildResult<String> {
  let mut stylesheet = StyleSheet::parse(source, ParserOptions::default())
    .map_err(|error| transform_error(format!("invalid stylesheet: {error}")))?;
  stylesheet
    .minify(MinifyOptions::default())
    .map_err(|error| transform_error(format!("cannot minify stylesheet: {error}")))?;
  let output = stylesheet
    .to_css(PrinterOptions { minify: true, ..PrinterOptions::default() })
    .map_err(|error| transform_error(format!("cannot print stylesheet: {error}")))?;
  Ok(output.code)
}

#[cfg(test)]
mod tests {
  use super::*;
  use wirepack_error::TransformError;

  #[test]
  fn strips_whitespace() {
    let minified = minify("a {\n  color: red;\n}\n").unwrap();
    assert_eq!(minified, "a{color:red}");
  }

  #[test]
  fn invalid_input_is_a_transform_error() {
    let errors = minify("..a { color: red; }").unwrap_err();
    assert!(errors[0].downcast_ref::<TransformError>().is_some());
  }
}
