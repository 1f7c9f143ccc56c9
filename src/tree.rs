//! Directory tree representation and rendering.
//!
//! The tree is rebuilt from the flat list of included relative paths, so it
//! can only ever contain what survived exclusion filtering. Every node
//! carries an explicit directory/file tag recorded at build time; nothing
//! is inferred at render time.

use std::path::PathBuf;

/// The type of a filesystem node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

/// A node in the rendered project tree.
#[derive(Debug, Clone)]
pub struct FileNode {
    /// File or directory name (not full path).
    pub name: String,
    /// Type of node, fixed at build time.
    pub kind: NodeKind,
    children: Vec<FileNode>,
}

impl FileNode {
    /// Create a new directory node.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            children: Vec::new(),
        }
    }

    /// Create a new file node.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn children(&self) -> &[FileNode] {
        &self.children
    }

    /// Count total files in this tree.
    pub fn file_count(&self) -> usize {
        match self.kind {
            NodeKind::File => 1,
            NodeKind::Directory => self.children.iter().map(FileNode::file_count).sum(),
        }
    }

    /// Sort children lexicographically at every level.
    pub fn sort_children(&mut self) {
        self.children.sort_by(|a, b| a.name.cmp(&b.name));
        for child in &mut self.children {
            child.sort_children();
        }
    }

    /// Insert a relative path below this node, registering every proper
    /// prefix as a directory exactly once.
    fn insert(&mut self, components: &[&str]) {
        let Some((head, rest)) = components.split_first() else {
            return;
        };

        if rest.is_empty() {
            // Leaf: a file, deduplicated by name.
            if !self.children.iter().any(|c| c.name == *head) {
                self.children.push(FileNode::file(*head));
            }
            return;
        }

        let idx = match self.children.iter().position(|c| c.name == *head) {
            Some(i) => i,
            None => {
                self.children.push(FileNode::directory(*head));
                self.children.len() - 1
            }
        };
        self.children[idx].insert(rest);
    }
}

/// Build a project tree from included relative paths.
///
/// The root is a distinguished directory node named after the project.
pub fn build_tree(project_name: &str, relative_paths: &[PathBuf]) -> FileNode {
    let mut root = FileNode::directory(project_name);

    for path in relative_paths {
        let components: Vec<&str> = path
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect();
        root.insert(&components);
    }

    root.sort_children();
    root
}

/// Box-drawing characters for tree rendering.
const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const VERTICAL: &str = "│   ";
const SPACE: &str = "    ";

/// Render a file tree to a string with box-drawing characters.
///
/// Directories carry a trailing slash; vertical connector lines only appear
/// under entries that still have following siblings at that depth, so
/// nesting depth is readable from indentation alone.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use marrow::tree::{build_tree, render_tree};
///
/// let tree = build_tree("project", &[PathBuf::from("src/main.py")]);
/// let output = render_tree(&tree);
/// assert!(output.contains("src/"));
/// assert!(output.contains("main.py"));
/// ```
pub fn render_tree(root: &FileNode) -> String {
    let mut output = String::with_capacity(4096);
    render_node(&mut output, root, "", true, true);
    output
}

fn render_node(output: &mut String, node: &FileNode, prefix: &str, is_last: bool, is_root: bool) {
    let branch = if is_root {
        ""
    } else if is_last {
        LAST_BRANCH
    } else {
        BRANCH
    };

    output.push_str(prefix);
    output.push_str(branch);
    output.push_str(&node.name);
    if node.is_directory() {
        output.push('/');
    }
    output.push('\n');

    let child_count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let is_last_child = i == child_count - 1;

        let new_prefix = if is_root {
            String::new()
        } else {
            let continuation = if is_last { SPACE } else { VERTICAL };
            format!("{prefix}{continuation}")
        };

        render_node(output, child, &new_prefix, is_last_child, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(entries: &[&str]) -> Vec<PathBuf> {
        entries.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_build_registers_prefixes_once() {
        let tree = build_tree(
            "project",
            &paths(&["src/a.py", "src/b.py", "src/core/node.py"]),
        );

        assert_eq!(tree.children().len(), 1);
        let src = &tree.children()[0];
        assert_eq!(src.name, "src");
        assert!(src.is_directory());
        // core, a.py, b.py: no duplicate "src" entries despite three paths.
        assert_eq!(src.children().len(), 3);
        assert_eq!(tree.file_count(), 3);
    }

    #[test]
    fn test_explicit_kind_tags() {
        let tree = build_tree("project", &paths(&["docs/readme.md", "Makefile"]));

        let docs = tree.children().iter().find(|c| c.name == "docs").unwrap();
        assert!(docs.is_directory());
        let makefile = tree.children().iter().find(|c| c.name == "Makefile").unwrap();
        assert_eq!(makefile.kind, NodeKind::File);
    }

    #[test]
    fn test_children_sorted_lexicographically() {
        let tree = build_tree("project", &paths(&["z.py", "a.py", "m/x.py"]));
        let names: Vec<&str> = tree.children().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a.py", "m", "z.py"]);
    }

    #[test]
    fn test_render_nesting_depth() {
        let tree = build_tree("project", &paths(&["src/core/node.py"]));
        let output = render_tree(&tree);

        assert!(output.contains("project/"));
        assert!(output.contains("src/"));
        assert!(output.contains("core/"));
        // node.py sits two levels below src; its indentation accumulates one
        // terminal indent per ancestor below the root.
        let node_line = output
            .lines()
            .find(|l| l.contains("node.py"))
            .expect("node.py rendered");
        assert_eq!(node_line, "        └── node.py");
    }

    #[test]
    fn test_render_connectors() {
        let tree = build_tree("project", &paths(&["a.py", "b.py", "c.py"]));
        let output = render_tree(&tree);

        // Two non-last siblings, one last.
        assert_eq!(output.matches(BRANCH).count(), 2);
        assert_eq!(output.matches(LAST_BRANCH).count(), 1);
    }

    #[test]
    fn test_render_vertical_continuation() {
        let tree = build_tree("project", &paths(&["src/deep/x.py", "zz.py"]));
        let output = render_tree(&tree);

        // src/ has a following sibling (zz.py), so its subtree is drawn with
        // a vertical continuation line.
        assert!(output.contains("│   "));
    }

    #[test]
    fn test_tree_only_contains_included_paths() {
        // The walker already pruned .git/ and __pycache__/; the tree is built
        // purely from what remains.
        let tree = build_tree("project", &paths(&["src/core/node.py"]));
        let output = render_tree(&tree);

        assert!(!output.contains(".git"));
        assert!(!output.contains("__pycache__"));
        assert!(output.contains("node.py"));
    }
}
