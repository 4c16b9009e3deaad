//! Quoted-include dependency resolution.
//!
//! Only `#include "..."` directives are followed. Nothing is preprocessed:
//! conditionals and macros are ignored, and angle-bracket includes are never
//! looked up.

mod include;
mod resolve;

pub use include::{collapse_parent_dir, containing_dir, parse_quoted_include};
pub use resolve::{DependencySet, IncludeResolver};
