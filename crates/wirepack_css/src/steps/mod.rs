pub mod color_fn;
pub mod expand_variables;
pub mod import_flatten;
pub mod inline_svg;
pub mod minify;
pub mod nesting;
pub mod px_to_rem;
pub mod vendor_prefix;
