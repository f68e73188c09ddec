use rustc_hash::FxHashSet;

/// Properties that still want vendor-prefixed variants for the supported
/// browser set, property-level only.
static PREFIXES: phf::Map<&'static str, &'static [&'static str]> = phf::phf_map! {
  "user-select" => &["-webkit-", "-moz-", "-ms-"],
  "appearance" => &["-webkit-", "-moz-"],
  "backdrop-filter" => &["-webkit-"],
  "text-size-adjust" => &["-webkit-", "-moz-", "-ms-"],
  "hyphens" => &["-webkit-", "-ms-"],
  "tab-size" => &["-moz-"],
  "box-decoration-break" => &["-webkit-"],
  "clip-path" => &["-webkit-"],
  "mask-image" => &["-webkit-"],
  "column-count" => &["-webkit-", "-moz-"],
  "column-gap" => &["-webkit-", "-moz-"],
};

fn split_declaration(segment: &str) -> Option<(&str, &str, &str)> {
  let colon = segment.find(':')?;
  let (head, tail) = segment.split_at(colon);
  let prop = head.trim();
  if prop.is_empty()
    || !prop.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
  {
    return None;
  }
  let leading = &head[..head.len() - head.trim_start().len()];
  Some((leading, prop, tail[1..].trim()))
}

/// Duplicates prefix-needing declarations with their vendor variants. This
/// pass is token-level on purpose: it runs before variable expansion and
/// inline-SVG embedding, so the sheet is not yet parseable as strict CSS.
pub fn prefix(source: &str) -> String {
  let mut output = String::with_capacity(source.len());
  let mut segment = String::new();
  let mut in_string: Option<char> = None;
  let mut paren_depth = 0usize;
  // One set of seen property names per open block, so re-running the pass
  // never duplicates variants it already emitted.
  let mut seen: Vec<FxHashSet<String>> = Vec::new();

  for char in source.chars() {
    match in_string {
      Some(quote) => {
        segment.push(char);
        if char == quote {
          in_string = None;
        }
        continue;
      }
      None => match char {
        '"' | '\'' => {
          in_string = Some(char);
          segment.push(char);
          continue;
        }
        '(' => {
          paren_depth += 1;
          segment.push(char);
          continue;
        }
        ')' => {
          paren_depth = paren_depth.saturating_sub(1);
          segment.push(char);
          continue;
        }
        '{' => {
          output.push_str(&segment);
          output.push('{');
          segment.clear();
          seen.push(FxHashSet::default());
          continue;
        }
        ';' | '}' if paren_depth == 0 => {
          flush_declaration(&mut output, &segment, seen.last_mut());
          output.push(char);
          segment.clear();
          if char == '}' {
            seen.pop();
          }
          continue;
        }
        _ => {
          segment.push(char);
          continue;
        }
      },
    }
  }
  flush_declaration(&mut output, &segment, seen.last_mut());
  output
}

fn flush_declaration(
  output: &mut String,
  segment: &str,
  seen: Option<&mut FxHashSet<String>>,
) {
  let Some(seen) = seen else {
    // Not inside a block, nothing to prefix.
    output.push_str(segment);
    return;
  };
  let Some((leading, prop, value)) = split_declaration(segment) else {
    output.push_str(segment);
    return;
  };

  seen.insert(prop.to_string());

  if !prop.starts_with('-') {
    if let Some(prefixes) = PREFIXES.get(prop.to_ascii_lowercase().as_str()) {
      for prefix in *prefixes {
        let prefixed = format!("{prefix}{prop}");
        if seen.insert(prefixed.clone()) {
          output.push_str(leading);
          output.push_str(&prefixed);
          output.push_str(": ");
          output.push_str(value);
          output.push(';');
        }
      }
    }
  }

  output.push_str(segment);
}
