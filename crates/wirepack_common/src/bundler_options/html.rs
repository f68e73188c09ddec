/// Source of the generated HTML entry document and the chunks injected into
/// it.
#[derive(Debug, Default, Clone)]
pub struct HtmlOptions {
  pub template: Option<String>,
  pub chunks: Option<Vec<String>>,
}
