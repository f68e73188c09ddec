use wirepack_error::{BuildResult, transform_error};

/// One parsed node of the (possibly nested) sheet. Values are kept as raw
/// text; only the block structure is interpreted.
enum Node {
  Declaration(String),
  AtStatement(String),
  Rule { selectors: Vec<String>, body: Vec<Node> },
  AtRule { prelude: String, body: Vec<Node> },
}

struct Parser {
  chars: Vec<char>,
  pos: usize,
}

impl Parser {
  fn new(source: &str) -> Self {
    Self { chars: strip_comments(source).chars().collect(), pos: 0 }
  }

  fn parse_body(&mut self, top_level: bool) -> BuildResult<Vec<Node>> {
    let mut nodes = Vec::new();
    let mut segment = String::new();
    let mut in_string: Option<char> = None;
    let mut paren_depth = 0usize;

    let flush = |segment: &mut String, nodes: &mut Vec<Node>| {
      let trimmed = segment.trim();
      if !trimmed.is_empty() {
        if trimmed.starts_with('@') {
          nodes.push(Node::AtStatement(trimmed.to_string()));
        } else {
          nodes.push(Node::Declaration(trimmed.to_string()));
        }
      }
      segment.clear();
    };

    while self.pos < self.chars.len() {
      let char = self.chars[self.pos];
      self.pos += 1;

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
          let header = segment.trim().to_string();
          segment.clear();
          let body = self.parse_body(false)?;
          if header.starts_with('@') {
            nodes.push(Node::AtRule { prelude: header, body });
          } else {
            nodes.push(Node::Rule { selectors: split_selectors(&header), body });
          }
        }
        ';' if paren_depth == 0 => flush(&mut segment, &mut nodes),
        '}' if paren_depth == 0 => {
          if top_level {
            return Err(transform_error("unbalanced `}` in stylesheet").into());
          }
          flush(&mut segment, &mut nodes);
          return Ok(nodes);
        }
        _ => segment.push(char),
      }
    }

    if !top_level {
      return Err(transform_error("unclosed block in stylesheet").into());
    }
    flush(&mut segment, &mut nodes);
    Ok(nodes)
  }
}

fn strip_comments(source: &str) -> String {
  let mut output = String::with_capacity(source.len());
  let mut chars = source.chars().peekable();
  let mut in_string: Option<char> = None;

  while let Some(char) = chars.next() {
    if let Some(quote) = in_string {
      output.push(char);
      if char == quote {
        in_string = None;
      }
      continue;
    }
    match char {
      '"' | '\'' => {
        in_string = Some(char);
        output.push(char);
      }
      '/' if chars.peek() == Some(&'*') => {
        chars.next();
        let mut prev = '\0';
        for c in chars.by_ref() {
          if prev == '*' && c == '/' {
            break;
          }
          prev = c;
        }
      }
      _ => output.push(char),
    }
  }
  output
}

fn split_selectors(header: &str) -> Vec<String> {
  let mut selectors = Vec::new();
  let mut current = String::new();
  let mut paren_depth = 0usize;
  for char in header.chars() {
    match char {
      '(' => {
        paren_depth += 1;
        current.push(char);
      }
      ')' => {
        paren_depth = paren_depth.saturating_sub(1);
        current.push(char);
      }
      ',' if paren_depth == 0 => {
        selectors.push(current.trim().to_string());
        current.clear();
      }
      _ => current.push(char),
    }
  }
  if !current.trim().is_empty() {
    selectors.push(current.trim().to_string());
  }
  selectors
}

fn combine(parents: &[String], selectors: &[String]) -> Vec<String> {
  if parents.is_empty() {
    return selectors.to_vec();
  }
  let mut combined = Vec::with_capacity(parents.len() * selectors.len());
  for parent in parents {
    for selector in selectors {
      if selector.contains('&') {
        combined.push(selector.replace('&', parent));
      } else {
        combined.push(format!("{parent} {selector}"));
      }
    }
  }
  combined
}

fn write_rule(output: &mut String, selectors: &[String], declarations: &[&String]) {
  if declarations.is_empty() {
    return;
  }
  output.push_str(&selectors.join(", "));
  output.push_str(" {\n");
  for declaration in declarations {
    output.push_str("  ");
    output.push_str(declaration);
    output.push_str(";\n");
  }
  output.push_str("}\n");
}

fn emit(nodes: &[Node], parents: &[String], output: &mut String) {
  // Declarations directly inside an at-rule that itself sits inside a rule
  // get re-wrapped in the parent selector, which is how nested `@media`
  // blocks bubble to the top level.
  let declarations: Vec<&String> = nodes
    .iter()
    .filter_map(|node| match node {
      Node::Declaration(declaration) => Some(declaration),
      _ => None,
    })
    .collect();

  if parents.is_empty() {
    for declaration in &declarations {
      output.push_str(declaration);
      output.push_str(";\n");
    }
  } else {
    write_rule(output, parents, &declarations);
  }

  for node in nodes {
    match node {
      Node::Declaration(_) => {}
      Node::AtStatement(statement) => {
        output.push_str(statement);
        output.push_str(";\n");
      }
      Node::Rule { selectors, body } => {
        emit_rule(selectors, body, parents, output);
      }
      Node::AtRule { prelude, body } => {
        output.push_str(prelude);
        output.push_str(" {\n");
        emit(body, parents, output);
        output.push_str("}\n");
      }
    }
  }
}

fn emit_rule(selectors: &[String], body: &[Node], parents: &[String], output: &mut String) {
  let combined = combine(parents, selectors);
  let declarations: Vec<&String> = body
    .iter()
    .filter_map(|node| match node {
      Node::Declaration(declaration) => Some(declaration),
      _ => None,
    })
    .collect();
  write_rule(output, &combined, &declarations);

  for node in body {
    match node {
      Node::Declaration(_) => {}
      Node::AtStatement(statement) => {
        output.push_str(statement);
        output.push_str(";\n");
      }
      Node::Rule { selectors, body } => emit_rule(selectors, body, &combined, output),
      Node::AtRule { prelude, body } => {
        output.push_str(prelude);
        output.push_str(" {\n");
        emit(body, &combined, output);
        output.push_str("}\n");
      }
    }
  }
}

/// Flattens nested selector blocks into flat CSS with `&` substitution and
/// `@media` bubbling. Block comments are dropped.
pub fn expand(source: &str) -> BuildResult<String> {
  let mut parser = Parser::new(source);
  let nodes = parser.parse_body(true)?;
  let mut output = String::with_capacity(source.len());
  emit(&nodes, &[], &mut output);
  Ok(output)
}

#[cfg(test)]
mod tests {
  use super::*;
  use wirepack_error::TransformError;

  #[test]
  fn flattens_nested_blocks() {
    let expanded = expand(".menu { color: red; .item { color: blue; } }").unwrap();
    assert_eq!(expanded, ".menu {\n  color: red;\n}\n.menu .item {\n  color: blue;\n}\n");
  }

  #[test]
  fn substitutes_parent_references() {
    let expanded = expand(".link { &:hover { color: blue; } }").unwrap();
    assert_eq!(expanded, ".link:hover {\n  color: blue;\n}\n");
  }

  #[test]
  fn multiplies_selector_lists() {
    let expanded = expand("a, b { .c, .d { top: 0; } }").unwrap();
    assert_eq!(expanded, "a .c, a .d, b .c, b .d {\n  top: 0;\n}\n");
  }

  #[test]
  fn bubbles_nested_media_queries() {
    let expanded =
      expand(".a { color: red; @media (min-width: 600px) { color: blue; } }").unwrap();
    assert_eq!(
      expanded,
      ".a {\n  color: red;\n}\n@media (min-width: 600px) {\n.a {\n  color: blue;\n}\n}\n"
    );
  }

  #[test]
  fn keeps_font_face_blocks() {
    let expanded = expand("@font-face { font-family: X; src: url(\"x.woff2\"); }").unwrap();
    assert_eq!(expanded, "@font-face {\nfont-family: X;\nsrc: url(\"x.woff2\");\n}\n");
  }

  #[test]
  fn is_idempotent_on_flat_css() {
    let flat = expand(".a { color: red; .b { color: blue; } }").unwrap();
    assert_eq!(expand(&flat).unwrap(), flat);
  }

  #[test]
  fn unbalanced_braces_are_a_transform_error() {
    let errors = expand(".a { color: red;").unwrap_err();
    assert!(errors[0].downcast_ref::<TransformError>().is_some());
  }
}
