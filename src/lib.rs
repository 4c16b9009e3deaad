//! # dmake - Makefile generator for multi-directory C++ trees
//!
//! dmake scans the conventional source directories, follows each
//! translation unit's `#include "..."` directives transitively, and writes a
//! Makefile with one compile rule per unit listing the headers it depends on.
//! It also writes two qmake listings for the library and test sources.
//!
//! ## Quick Start
//!
//! ```bash
//! # From the top of the source tree
//! dmake
//!
//! # Release flag preset
//! dmake --release
//! ```
//!
//! ## Module Organization
//!
//! - [`scan`] - Source file collection per group
//! - [`deps`] - Quoted-include dependency resolution
//! - [`paths`] - Source to object path mapping
//! - [`makefile`] - Compile rules and Makefile rendering
//! - [`project`] - qmake project listings
//! - [`generate`] - Run orchestration and output writing

/// Layout configuration (`dmake.toml`).
pub mod config;

/// Include dependency resolution.
pub mod deps;

/// Error type for generation runs.
pub mod error;

/// Collection, rendering and writing of all outputs.
pub mod generate;

/// Makefile rendering.
pub mod makefile;

/// Object path mapping.
pub mod paths;

/// qmake project listings.
pub mod project;

/// Source file collection.
pub mod scan;

/// Fixed Makefile text.
pub mod templates;
