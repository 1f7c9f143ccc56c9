//! Document assembly.
//!
//! Turns the ordered file records and the rendered tree into the final plain
//! text payload: header, file map, per-file contents, and an instructional
//! footer for the automated reader. Also provides the JSON manifest emitted
//! under `--json`.

use std::path::PathBuf;

use serde::Serialize;

use crate::priority::Priority;
use crate::summary::StructuralSummary;

/// Heavy banner line for the header and footer sections.
const BANNER: &str = "========================================";
/// Rule between consecutive embedded files.
const FILE_RULE: &str = "----------------------------------------";
/// Uniform indent applied to embedded file content.
const CONTENT_INDENT: &str = "    ";

/// Fixed footer addressed to the automated reader.
const INSTRUCTIONS: &str = "\
You are looking at the structure and contents of a project.
Use this context to:
1. Understand the architecture and dependencies
2. Analyze the existing code
3. Generate code that integrates with the project

Pay attention to:
- The project structure (file map at the top)
- High-priority files (they come first)
- Structural summaries (imports, classes, functions)

When generating code, follow the existing patterns, reuse the modules
already imported, and respect the project's style and constraints.

Files are ordered by importance. Start with the first ones.";

/// One included file, prepared for embedding.
///
/// Built per file at assembly time and discarded with the result; nothing
/// here is persisted.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute path on disk.
    pub absolute_path: PathBuf,
    /// Path relative to the project root, POSIX-style separators.
    pub relative_path: String,
    /// Classifier tier for this file.
    pub priority: Priority,
    /// Truncated content; `None` when the file was unreadable.
    pub content: Option<String>,
    /// Structural summary for recognized source files.
    pub summary: Option<StructuralSummary>,
}

fn count_noun(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// One-line bracketed stats for a file with a non-empty structural summary.
fn stats_line(summary: &StructuralSummary) -> Option<String> {
    let mut parts = Vec::new();

    if !summary.imports.is_empty() {
        parts.push(count_noun(summary.imports.len(), "import", "imports"));
    }
    if !summary.classes.is_empty() {
        parts.push(count_noun(summary.classes.len(), "class", "classes"));
    }
    if !summary.functions.is_empty() {
        parts.push(count_noun(summary.functions.len(), "function", "functions"));
    }
    if summary.line_count > 0 {
        parts.push(count_noun(summary.line_count, "line", "lines"));
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("[{}]", parts.join(", ")))
    }
}

/// Format one file entry: relative path, optional stats, indented content.
fn format_file_entry(record: &FileRecord) -> String {
    let mut lines = Vec::new();

    lines.push(record.relative_path.clone());

    if let Some(stats) = record.summary.as_ref().and_then(stats_line) {
        lines.push(format!("  {stats}"));
    }

    if let Some(content) = &record.content {
        if !content.trim().is_empty() {
            for line in content.split('\n') {
                lines.push(format!("{CONTENT_INDENT}{line}"));
            }
        }
    }

    lines.join("\n")
}

/// Assemble the complete context document.
///
/// `records` is the already-capped, priority-ordered embed list;
/// `total_files` is the size of the full included set, used for the cap
/// notice. Unreadable files (no content) are skipped from the contents
/// section but remain in the tree.
pub fn render_document(
    project: &str,
    tree_text: &str,
    records: &[FileRecord],
    total_files: usize,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    // 1. Header.
    parts.push(BANNER.to_string());
    parts.push(format!("PROJECT CONTEXT: {project}"));
    parts.push(BANNER.to_string());

    // 2. File map.
    parts.push(String::new());
    parts.push("<file_map>".to_string());
    parts.push(tree_text.trim_end().to_string());
    parts.push("</file_map>".to_string());

    // 3. File contents, highest priority first.
    parts.push(String::new());
    parts.push("<file_contents>".to_string());

    if records.is_empty() {
        parts.push("No files found".to_string());
    } else {
        if total_files > records.len() {
            parts.push(format!(
                "[Showing {} of {} files (highest priority first)]",
                records.len(),
                total_files
            ));
        }

        let readable: Vec<&FileRecord> = records.iter().filter(|r| r.content.is_some()).collect();
        for (i, record) in readable.iter().enumerate() {
            if i > 0 {
                parts.push(String::new());
                parts.push(FILE_RULE.to_string());
                parts.push(String::new());
            }
            parts.push(format_file_entry(record));
        }
    }

    parts.push("</file_contents>".to_string());

    // 4. Instructions for the automated reader.
    parts.push(String::new());
    parts.push("<instructions>".to_string());
    parts.push(INSTRUCTIONS.to_string());
    parts.push("</instructions>".to_string());

    let mut document = parts.join("\n");
    document.push('\n');
    document
}

/// Machine-readable view of a build, for `--json`.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub project: String,
    pub total_files: usize,
    pub embedded_files: usize,
    pub files: Vec<ManifestEntry>,
}

/// One included file in the manifest.
#[derive(Debug, Serialize)]
pub struct ManifestEntry {
    pub path: String,
    pub priority: Priority,
    /// Whether this file's content made it into the document.
    pub embedded: bool,
}
