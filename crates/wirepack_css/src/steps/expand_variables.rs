use crate::variables::{VariableMap, render_variable};

fn is_name_char(char: char) -> bool {
  char.is_ascii_alphanumeric() || matches!(char, '-' | '_')
}

/// Substitutes `$name` references and `$(name)` interpolations from the
/// variable document. Unknown names are left untouched, which also makes
/// the pass idempotent: once every known reference is expanded, re-running
/// changes nothing.
pub fn expand(source: &str, variables: &VariableMap) -> String {
  let mut output = String::with_capacity(source.len());
  let mut chars = source.char_indices().peekable();

  while let Some((index, char)) = chars.next() {
    if char != '$' {
      output.push(char);
      continue;
    }

    match chars.peek() {
      Some(&(_, '(')) => {
        let rest = &source[index + 2..];
        if let Some(close) = rest.find(')') {
          let name = &rest[..close];
          if let Some(value) = variables.get(name).and_then(render_variable) {
            output.push_str(&value);
            // Skip past the closing paren by byte index; `close` is an
            // offset, not a char count.
            let end = index + 2 + close + 1;
            while chars.peek().is_some_and(|&(i, _)| i < end) {
              chars.next();
            }
            continue;
          }
        }
        output.push('$');
      }
      Some(&(start, next)) if is_name_char(next) => {
        let end = source[start..]
          .find(|c: char| !is_name_char(c))
          .map_or(source.len(), |offset| start + offset);
        let name = &source[start..end];
        if let Some(value) = variables.get(name).and_then(render_variable) {
          output.push_str(&value);
          while chars.peek().is_some_and(|&(i, _)| i < end) {
            chars.next();
          }
        } else {
          output.push('$');
        }
      }
      _ => output.push('$'),
    }
  }

  output
}

#[cfg(test)]
mod tests {
  use super::*;

  fn variables() -> VariableMap {
    let mut map = VariableMap::default();
    map.insert("primary".to_string(), serde_json::Value::String("#3eaf7c".to_string()));
    map.insert("gutter".to_string(), serde_json::json!(24));
    map
  }

  #[test]
  fn expands_plain_references() {
    let expanded = expand("a { color: $primary; padding: $(gutter)px; }", &variables());
    assert_eq!(expanded, "a { color: #3eaf7c; padding: 24px; }");
  }

  #[test]
  fn leaves_unknown_references() {
    let source = "a { color: $missing; }";
    assert_eq!(expand(source, &variables()), source);
  }

  #[test]
  fn is_idempotent_once_expanded() {
    let expanded = expand("a { color: $primary; }", &variables());
    assert_eq!(expand(&expanded, &variables()), expanded);
  }

  #[test]
  fn expands_non_ascii_names() {
    let mut map = variables();
    map.insert("größe".to_string(), serde_json::json!(32));
    let expanded = expand("a { width: $(größe)px; margin: $(gutter)px; }", &map);
    assert_eq!(expanded, "a { width: 32px; margin: 24px; }");
  }

  #[test]
  fn longer_names_do_not_clash_with_prefixes() {
    let mut map = variables();
    map.insert("primary-dark".to_string(), serde_json::Value::String("#222".to_string()));
    let expanded = expand("a { color: $primary-dark; }", &map);
    assert_eq!(expanded, "a { color: #222; }");
  }
}
