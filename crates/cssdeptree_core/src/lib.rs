//! Dependency resolution for stylesheets linked with `@import url(...)`.
//!
//! Starting from a root stylesheet, this crate discovers every directly and
//! transitively imported stylesheet and produces:
//! - a nested tree mirroring the import structure
//! - the deduplicated list of local stylesheet paths visited
//! - the deduplicated list of remote URLs referenced
//!
//! Only the `@import url(...)` form is recognised. Targets starting with
//! `//` or `scheme://` are remote and never fetched; everything else is a
//! path relative to the importing file.
//!
//! # Examples
//!
//! ```no_run
//! use cssdeptree_core::{TraversalConfig, resolve};
//!
//! # fn main() -> Result<(), cssdeptree_core::ResolveError> {
//! let output = resolve("styles/main.css", &TraversalConfig::default())?;
//! for url in output.urls.unwrap_or_default() {
//!     println!("{}", url);
//! }
//! # Ok(())
//! # }
//! ```

mod aggregator;
mod config;
mod error;
mod extractor;
mod registry;
mod resolver;
mod types;
mod walker;

// Re-export public API
pub use aggregator::{AggregateOutput, resolve, resolve_files, resolve_in, resolve_urls};
pub use config::TraversalConfig;
pub use error::{ResolveError, Result};
pub use extractor::{Imports, extract_imports};
pub use registry::{Registries, Registry};
pub use resolver::PathResolver;
pub use types::{DependencyTree, FileMap, ReferenceKind, StylesheetReference, TreeNode};
pub use walker::Walker;
