use std::sync::LazyLock;

use regex::{Captures, Regex};

static PX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d*\.?\d+)px\b").unwrap());

#[derive(Debug, Clone)]
pub struct PxToRemOptions {
  /// Pixels per rem, 16 in the standard pipeline.
  pub root_value: f64,
  /// A property whose name contains any of these fragments keeps its pixel
  /// values (hairline borders must not become fractional rems).
  pub skip_prop_fragments: Vec<String>,
  /// Rules whose selector equals one of these are skipped entirely.
  pub skip_selectors: Vec<String>,
}

impl Default for PxToRemOptions {
  fn default() -> Self {
    Self {
      root_value: 16.0,
      skip_prop_fragments: vec!["border".to_string()],
      skip_selectors: vec!["html".to_string()],
    }
  }
}

fn format_rem(px: f64, root_value: f64) -> String {
  let value = (px / root_value * 1e5).round() / 1e5;
  format!("{value}rem")
}

fn convert_value(value: &str, options: &PxToRemOptions) -> String {
  // Quoted runs and `url(...)` tokens are left untouched; a file named
  // `w32px.svg` must keep its name whether or not the printer quoted it.
  let mut output = String::with_capacity(value.len());
  let mut run = String::new();
  let mut in_string: Option<char> = None;
  let mut url_depth = 0usize;

  let flush = |run: &mut String, output: &mut String, options: &PxToRemOptions| {
    let converted = PX_RE.replace_all(run, |captures: &Captures| {
      captures[1]
        .parse::<f64>()
        .map_or_else(|_| captures[0].to_string(), |px| format_rem(px, options.root_value))
    });
    output.push_str(&converted);
    run.clear();
  };

  for char in value.chars() {
    if url_depth > 0 {
      output.push(char);
      match char {
        '(' => url_depth += 1,
        ')' => url_depth -= 1,
        _ => {}
      }
      continue;
    }
    match in_string {
      Some(quote) => {
        output.push(char);
        if char == quote {
          in_string = None;
        }
      }
      None => {
        if char == '"' || char == '\'' {
          flush(&mut run, &mut output, options);
          in_string = Some(char);
          output.push(char);
        } else if char == '(' && run.to_ascii_lowercase().ends_with("url") {
          flush(&mut run, &mut output, options);
          output.push('(');
          url_depth = 1;
        } else {
          run.push(char);
        }
      }
    }
  }
  flush(&mut run, &mut output, options);
  output
}

fn convert_declaration(segment: &str, selector: Option<&str>, options: &PxToRemOptions) -> String {
  let Some(selector) = selector else {
    return segment.to_string();
  };
  if options.skip_selectors.iter().any(|skip| skip == selector.trim()) {
    return segment.to_string();
  }
  let Some(colon) = segment.find(':') else {
    return segment.to_string();
  };
  let (head, tail) = segment.split_at(colon);
  let prop = head.trim().to_ascii_lowercase();
  if options.skip_prop_fragments.iter().any(|fragment| prop.contains(fragment.as_str())) {
    return segment.to_string();
  }
  format!("{head}:{}", convert_value(&tail[1..], options))
}

/// Rewrites absolute pixel lengths into rems against a fixed base. Border
/// properties and the root `html` rule keep their pixels; media-query
/// parameters are headers, not declarations, so they are untouched too.
pub fn convert(source: &str, options: &PxToRemOptions) -> String {
  let mut output = String::with_capacity(source.len());
  let mut segment = String::new();
  let mut in_string: Option<char> = None;
  let mut paren_depth = 0usize;
  let mut headers: Vec<String> = Vec::new();

  for char in source.chars() {
    if let Some(quote) = in_string {
      segment.push(char);
      if char == quote {
        in_string = None;
      }
      continue;
    }
    match char {
      '"' | '\'' => {
        in_string = Some(char);
        segment.push(char);
      }
      '(' => {
        paren_depth += 1;
        segment.push(char);
      }
      ')' => {
        paren_depth = paren_depth.saturating_sub(1);
        segment.push(char);
      }
      '{' => {
        headers.push(segment.trim().to_string());
        output.push_str(&segment);
        output.push('{');
        segment.clear();
      }
      ';' | '}' if paren_depth == 0 => {
        let selector = headers.last().map(String::as_str);
        output.push_str(&convert_declaration(&segment, selector, options));
        output.push(char);
        segment.clear();
        if char == '}' {
          headers.pop();
        }
      }
      _ => segment.push(char),
    }
  }
  output.push_str(&segment);
  output
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn converts_pixels_with_base_sixteen() {
    let converted = convert("a{color:#FF0000;width:32px}", &PxToRemOptions::default());
    assert_eq!(converted, "a{color:#FF0000;width:2rem}");
  }

  #[test]
  fn keeps_border_properties_in_pixels() {
    let converted =
      convert("a{width:32px;border:1px solid red;border-radius:4px}", &PxToRemOptions::default());
    assert_eq!(converted, "a{width:2rem;border:1px solid red;border-radius:4px}");
  }

  #[test]
  fn skips_the_root_html_rule() {
    let converted =
      convert("html{font-size:16px}body{margin:16px}", &PxToRemOptions::default());
    assert_eq!(converted, "html{font-size:16px}body{margin:1rem}");
  }

  #[test]
  fn keeps_media_query_parameters() {
    let converted =
      convert("@media (min-width:600px){a{width:24px}}", &PxToRemOptions::default());
    assert_eq!(converted, "@media (min-width:600px){a{width:1.5rem}}");
  }

  #[test]
  fn keeps_quoted_urls() {
    let converted = convert("a{background:url(\"w32px.svg\")}", &PxToRemOptions::default());
    assert_eq!(converted, "a{background:url(\"w32px.svg\")}");
  }

  #[test]
  fn keeps_unquoted_urls() {
    let converted =
      convert("a{background:url(w32px.svg) no-repeat 4px}", &PxToRemOptions::default());
    assert_eq!(converted, "a{background:url(w32px.svg) no-repeat 0.25rem}");
  }

  #[test]
  fn rounds_to_five_decimals() {
    let converted = convert("a{margin:10px}", &PxToRemOptions::default());
    assert_eq!(converted, "a{margin:0.625rem}");
  }
}
