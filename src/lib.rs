//! Marrow - Collect prioritized project context for LLM assistants.
//!
//! Marrow walks a project tree, prunes build artifacts and other noise,
//! orders what remains by importance, and assembles a single plain text
//! document: a file map, the contents of the highest-priority files
//! (truncated and annotated with structural summaries), and instructions
//! for the model reading it.
//!
//! # Quick Start
//!
//! ```no_run
//! use marrow::builder::ContextBuilder;
//!
//! let result = ContextBuilder::new("./my-project")
//!     .max_embedded_files(30)
//!     .build()
//!     .unwrap();
//!
//! println!("{} files collected", result.total_files);
//! std::fs::write("context.txt", result.render()).unwrap();
//! ```
//!
//! # Modules
//!
//! - [`filter`] - Exclusion rule sets and custom filter predicates
//! - [`walker`] - Pruned directory traversal
//! - [`priority`] - File importance classification and ordering
//! - [`tree`] - File tree representation and rendering
//! - [`truncate`] - Head/tail content truncation
//! - [`summary`] - Tree-sitter based structural summaries
//! - [`output`] - Document assembly and the JSON manifest
//! - [`builder`] - Fluent API tying the pipeline together

pub mod builder;
pub mod errors;
pub mod filter;
pub mod output;
pub mod priority;
pub mod summary;
pub mod tree;
pub mod truncate;
pub mod walker;

// Re-export key types at crate root for convenience
pub use builder::{ContextBuilder, ContextResult};
pub use errors::MarrowError;
pub use filter::{ExclusionPolicy, ExclusionRules};
pub use output::{FileRecord, Manifest};
pub use priority::Priority;
pub use summary::{SourceLanguage, StructuralSummary};
pub use tree::{FileNode, NodeKind};
pub use truncate::TruncateOptions;
pub use walker::WalkError;
