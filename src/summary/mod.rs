//! Structural summaries of source files, extracted with tree-sitter.
//!
//! A summary is a shallow listing of a file's imports, class-like
//! declarations, and function signatures, plus line counts. No semantic
//! analysis. Extraction never fails: unparseable input yields an all-empty
//! summary with the raw line count preserved.

mod python;
mod rust;

use std::cell::RefCell;
use std::path::Path;

use smallvec::SmallVec;
use tree_sitter::{Node, Parser};

// Thread-local parser caching to avoid re-initialization overhead.
// No panics here: grammar loading can fail, and summaries degrade to empty
// instead of aborting a document build.
thread_local! {
    static PYTHON_PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
    static RUST_PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

fn init_python_parser() -> Result<Parser, ()> {
    let mut p = Parser::new();
    p.set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|_| ())?;
    Ok(p)
}

fn init_rust_parser() -> Result<Parser, ()> {
    let mut p = Parser::new();
    p.set_language(&tree_sitter_rust::LANGUAGE.into())
        .map_err(|_| ())?;
    Ok(p)
}

fn with_cached_parser<F, R>(
    cell: &'static std::thread::LocalKey<RefCell<Option<Parser>>>,
    init: fn() -> Result<Parser, ()>,
    f: F,
) -> Option<R>
where
    F: FnOnce(&mut Parser) -> R,
{
    cell.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(init().ok()?);
        }
        slot.as_mut().map(f)
    })
}

pub(crate) fn with_python_parser<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Parser) -> R,
{
    with_cached_parser(&PYTHON_PARSER, init_python_parser, f)
}

pub(crate) fn with_rust_parser<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Parser) -> R,
{
    with_cached_parser(&RUST_PARSER, init_rust_parser, f)
}

/// Find a child node by kind.
pub(crate) fn find_child_by_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    node.children(&mut node.walk()).find(|c| c.kind() == kind)
}

/// Extract node text from content.
pub(crate) fn node_text(node: Node, content: &str) -> String {
    content[node.byte_range()].to_string()
}

/// Source languages with structural summary support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    Python,
    Rust,
}

impl std::fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLanguage::Python => write!(f, "Python"),
            SourceLanguage::Rust => write!(f, "Rust"),
        }
    }
}

/// Detect the summarizable language of a path from its extension.
pub fn detect_language(path: &Path) -> Option<SourceLanguage> {
    match path.extension().and_then(|e| e.to_str())? {
        "py" | "pyi" => Some(SourceLanguage::Python),
        "rs" => Some(SourceLanguage::Rust),
        _ => None,
    }
}

/// Shallow structural extraction of a single source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralSummary {
    /// Import statements, rendered one per entry.
    pub imports: SmallVec<[String; 8]>,
    /// Class-like declarations as `Name(Base1, Base2)` (bases when present).
    pub classes: SmallVec<[String; 4]>,
    /// Function signatures as `[async ]name(args)`, methods included.
    pub functions: SmallVec<[String; 8]>,
    /// Total line count of the raw text.
    pub line_count: usize,
    /// Non-blank lines not starting with the language's line comment.
    pub code_line_count: usize,
}

impl StructuralSummary {
    /// An empty summary that still reports the raw line count.
    pub fn empty(content: &str) -> Self {
        Self {
            line_count: count_lines(content),
            ..Self::default()
        }
    }

    /// True when no structure was extracted.
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.classes.is_empty() && self.functions.is_empty()
    }
}

/// Count lines the way a text editor does: newline count plus one.
pub(crate) fn count_lines(content: &str) -> usize {
    bytecount::count(content.as_bytes(), b'\n') + 1
}

/// Count non-blank lines whose trimmed form does not start with
/// `comment_prefix`.
pub(crate) fn count_code_lines(content: &str, comment_prefix: &str) -> usize {
    content
        .split('\n')
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with(comment_prefix)
        })
        .count()
}

/// Summarize source text. Total: malformed input degrades to an empty
/// summary with the raw line count computed from the text.
pub fn summarize(content: &str, language: SourceLanguage) -> StructuralSummary {
    let summary = match language {
        SourceLanguage::Python => python::summarize(content),
        SourceLanguage::Rust => rust::summarize(content),
    };
    summary.unwrap_or_else(|| StructuralSummary::empty(content))
}
