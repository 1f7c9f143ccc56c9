//! Pipeline orchestration.
//!
//! [`ContextBuilder`] wires the stages together: walk the project with the
//! exclusion policy, order the survivors by priority, read and truncate the
//! top of the list, summarize recognized source files, and hand back a
//! [`ContextResult`] that can render the document or a JSON manifest.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::MarrowError;
use crate::filter::{ExclusionPolicy, ExclusionRules};
use crate::output::{self, FileRecord, Manifest, ManifestEntry};
use crate::priority;
use crate::summary::{self, StructuralSummary};
use crate::tree::{self, FileNode};
use crate::truncate::{self, TruncateOptions};
use crate::walker;

/// Default cap on the number of files whose content is embedded.
pub const DEFAULT_MAX_EMBEDDED_FILES: usize = 50;

/// Configures and runs a context build.
///
/// ```no_run
/// use marrow::builder::ContextBuilder;
///
/// let result = ContextBuilder::new(".").build().unwrap();
/// println!("{}", result.render());
/// ```
pub struct ContextBuilder {
    root: PathBuf,
    policy: ExclusionPolicy,
    truncate: Option<TruncateOptions>,
    max_embedded_files: usize,
}

impl ContextBuilder {
    /// Start a build rooted at `root` with the default exclusion rules,
    /// default truncation, and the default embed cap.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            policy: ExclusionPolicy::default(),
            truncate: Some(TruncateOptions::default()),
            max_embedded_files: DEFAULT_MAX_EMBEDDED_FILES,
        }
    }

    /// Replace the exclusion rule sets. Discards custom filters added so far.
    pub fn rules(mut self, rules: ExclusionRules) -> Self {
        self.policy = ExclusionPolicy::new(rules);
        self
    }

    /// Override the truncation bounds.
    pub fn truncation(mut self, options: TruncateOptions) -> Self {
        self.truncate = Some(options);
        self
    }

    /// Embed file contents in full.
    pub fn no_truncation(mut self) -> Self {
        self.truncate = None;
        self
    }

    /// Change how many files get their content embedded.
    pub fn max_embedded_files(mut self, max: usize) -> Self {
        self.max_embedded_files = max;
        self
    }

    /// Register a custom exclusion predicate on top of the rule sets.
    pub fn add_filter(
        &mut self,
        name: impl Into<String>,
        predicate: impl Fn(&Path) -> bool + Send + Sync + 'static,
    ) {
        self.policy.add_filter(name, predicate);
    }

    /// Run the pipeline.
    pub fn build(self) -> Result<ContextResult, MarrowError> {
        let Self {
            root,
            policy,
            truncate,
            max_embedded_files,
        } = self;

        let root = fs::canonicalize(&root).map_err(|_| walker::WalkError::NotFound {
            path: root.clone(),
        })?;
        let project = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string());

        let policy = Arc::new(policy);
        let absolute = walker::collect_files(&root, policy)?;

        // Everything below works on root-relative paths.
        let mut relative: Vec<PathBuf> = absolute
            .iter()
            .filter_map(|p| p.strip_prefix(&root).ok().map(Path::to_path_buf))
            .collect();
        relative = priority::prioritize(&relative);
        let total_files = relative.len();

        log::debug!("collected {total_files} files under {}", root.display());

        let tree = tree::build_tree(&project, &relative);

        let mut records = Vec::new();
        for rel in relative.iter().take(max_embedded_files) {
            records.push(read_record(&root, rel, truncate));
        }

        Ok(ContextResult {
            project,
            tree,
            files: relative,
            records,
            total_files,
        })
    }
}

/// Read, summarize, and truncate one file. Unreadable files become
/// content-less records rather than failing the build.
fn read_record(root: &Path, relative: &Path, truncate: Option<TruncateOptions>) -> FileRecord {
    let absolute = root.join(relative);
    let relative_display = posix_display(relative);
    let priority = priority::classify(relative);

    let raw = match fs::read(&absolute) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) => {
            log::warn!("skipping unreadable file {}: {err}", absolute.display());
            None
        }
    };

    let summary: Option<StructuralSummary> = raw.as_deref().and_then(|content| {
        summary::detect_language(relative).map(|lang| summary::summarize(content, lang))
    });

    let content = raw.map(|text| match truncate {
        Some(options) => truncate::truncate_content(&text, options),
        None => text,
    });

    FileRecord {
        absolute_path: absolute,
        relative_path: relative_display,
        priority,
        content,
        summary,
    }
}

/// Forward-slash rendition of a relative path, regardless of platform.
fn posix_display(relative: &Path) -> String {
    let components: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    components.join("/")
}

/// Everything a finished build produced.
#[derive(Debug)]
pub struct ContextResult {
    /// Project name, taken from the root directory.
    pub project: String,
    /// Pruned directory tree over all included files.
    pub tree: FileNode,
    /// All included files, priority order, root-relative.
    pub files: Vec<PathBuf>,
    /// Records for the embedded subset, same order as `files`.
    pub records: Vec<FileRecord>,
    /// Size of the full included set.
    pub total_files: usize,
}

impl ContextResult {
    /// Render the plain text context document.
    pub fn render(&self) -> String {
        let tree_text = tree::render_tree(&self.tree);
        output::render_document(&self.project, &tree_text, &self.records, self.total_files)
    }

    /// Build the JSON manifest view.
    pub fn manifest(&self) -> Manifest {
        let embedded = self.records.len();
        let files = self
            .files
            .iter()
            .enumerate()
            .map(|(i, path)| ManifestEntry {
                path: posix_display(path),
                priority: priority::classify(path),
                embedded: i < embedded,
            })
            .collect();

        Manifest {
            project: self.project.clone(),
            total_files: self.total_files,
            embedded_files: embedded,
            files,
        }
    }
}
