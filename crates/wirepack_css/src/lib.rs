//! Ordered stylesheet transform pipeline: import flattening, vendor
//! prefixing, variable expansion, nesting expansion, color-function
//! expansion, inline SVG embedding, minification and pixel-to-rem
//! conversion.

mod context;
mod pipeline;
mod steps;
mod variables;

pub use crate::{
  context::TransformContext,
  pipeline::{StylePipeline, StyleStep},
  steps::{
    import_flatten::ImportFlattenOptions, inline_svg::InlineSvgOptions,
    px_to_rem::PxToRemOptions,
  },
  variables::{VariableMap, load_variables},
};
