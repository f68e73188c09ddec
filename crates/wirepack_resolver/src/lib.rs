// Alias-aware import resolution over the build's file-system abstraction.

mod resolver;

pub use crate::resolver::{ResolveReturn, Resolver};

pub use wirepack_common::ResolveOptions;
