use std::sync::LazyLock;

use regex::{Captures, Regex};

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"rgba?\(\s*#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})\s*(?:,\s*([^)\s][^)]*))?\)").unwrap()
});

fn channels(hex: &str) -> (u8, u8, u8) {
  let expanded: String = if hex.len() == 3 {
    hex.chars().flat_map(|c| [c, c]).collect()
  } else {
    hex.to_string()
  };
  let parse = |range: std::ops::Range<usize>| {
    u8::from_str_radix(&expanded[range], 16).unwrap_or(0)
  };
  (parse(0..2), parse(2..4), parse(4..6))
}

/// Expands the shorthand `rgb(#hex)` / `rgba(#hex, a)` color functions into
/// explicit channel values. Plain hex colors and already-expanded functions
/// pass through untouched, so the pass is idempotent.
pub fn expand(source: &str) -> String {
  RGB_RE
    .replace_all(source, |captures: &Captures| {
      let (r, g, b) = channels(&captures[1]);
      match captures.get(2) {
        Some(alpha) => format!("rgba({r}, {g}, {b}, {})", alpha.as_str().trim()),
        None => format!("rgb({r}, {g}, {b})"),
      }
    })
    .into_owned()
}
