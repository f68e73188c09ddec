use serde::Serialize;

/// Output filename pattern with `[name]`, `[hash]`, `[ext]` and `[extname]`
/// placeholders. Production templates carry a `[hash]` segment for cache
/// busting; development templates are stable names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilenameTemplate {
  template: String,
}

#[derive(Debug, Default)]
pub struct FileNameRenderOptions<'me> {
  pub name: Option<&'me str>,
  pub hash: Option<&'me str>,
  pub ext: Option<&'me str>,
}

impl FilenameTemplate {
  pub fn new(template: String) -> Self {
    Self { template }
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  pub fn has_hash_placeholder(&self) -> bool {
    self.template.contains("[hash]")
  }

  pub fn render(&self, options: &FileNameRenderOptions) -> String {
    let mut rendered = self.template.clone();
    if let Some(name) = options.name {
      rendered = rendered.replace("[name]", name);
    }
    if let Some(hash) = options.hash {
      rendered = rendered.replace("[hash]", hash);
    }
    if let Some(ext) = options.ext {
      // `[extname]` first, it contains `[ext]` as a substring.
      let extname = if ext.is_empty() { String::new() } else { format!(".{ext}") };
      rendered = rendered.replace("[extname]", &extname);
      rendered = rendered.replace("[ext]", ext);
    }
    rendered
  }
}

impl From<&str> for FilenameTemplate {
  fn from(value: &str) -> Self {
    Self::new(value.to_string())
  }
}

impl From<String> for FilenameTemplate {
  fn from(value: String) -> Self {
    Self::new(value)
  }
}

#[test]
fn test_render_stable_name() {
  let template = FilenameTemplate::from("[name].js");
  let rendered =
    template.render(&FileNameRenderOptions { name: Some("main"), ..Default::default() });
  assert_eq!(rendered, "main.js");
  assert!(!template.has_hash_placeholder());
}

#[test]
fn test_render_hashed_name() {
  let template = FilenameTemplate::from("[name].[hash].build.[ext]");
  let rendered = template.render(&FileNameRenderOptions {
    name: Some("main"),
    hash: Some("a1b2c3d4"),
    ext: Some("js"),
  });
  assert_eq!(rendered, "main.a1b2c3d4.build.js");
  assert!(template.has_hash_placeholder());
}

#[test]
fn test_render_extname() {
  let template = FilenameTemplate::from("[hash][extname]");
  let rendered = template
    .render(&FileNameRenderOptions { hash: Some("a1b2c3d4"), ext: Some("png"), name: None });
  assert_eq!(rendered, "a1b2c3d4.png");
}
