//! Priority classification and file ordering.
//!
//! Every included file gets a discrete tier from path/name/extension
//! heuristics alone, never from content, and the prioritizer orders the
//! flat list by (tier descending, path ascending) so the most informative
//! files lead the context document.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Base names that anchor a project's identity.
const CRITICAL_NAMES: &[&str] = &[
    "pyproject.toml",
    "README.md",
    "README.rst",
    "LICENSE",
    "MANIFEST.in",
];

/// Primary configuration files.
const HIGH_CONFIG_NAMES: &[&str] = &[
    "setup.py",
    "setup.cfg",
    "requirements.txt",
    "Pipfile",
    "docker-compose.yml",
    ".env.example",
    ".gitignore",
    ".dockerignore",
    ".pre-commit-config.yaml",
];

/// Path segments marking core source trees.
const CORE_SEGMENTS: &[&str] = &["src", "lib", "core", "main", "app"];

/// Path segments marking utility code.
const UTIL_SEGMENTS: &[&str] = &["utils", "helpers", "tools", "scripts"];

/// Suffixes recognized as source files.
const SOURCE_EXTENSIONS: &[&str] = &["py", "pyi", "rs"];

/// Suffixes recognized as documentation.
const DOC_EXTENSIONS: &[&str] = &["md", "rst", "txt"];

/// Suffixes recognized as structured configuration.
const CONFIG_EXTENSIONS: &[&str] = &["yml", "yaml", "json", "toml", "cfg", "ini"];

/// Discrete priority tier; higher sorts first.
///
/// Variants are declared lowest-first so the derived `Ord` agrees with the
/// numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Noise,
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Numeric weight of this tier.
    pub fn value(self) -> u8 {
        match self {
            Priority::Critical => 100,
            Priority::High => 80,
            Priority::Medium => 50,
            Priority::Low => 30,
            Priority::Noise => 0,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Noise => "noise",
        };
        write!(f, "{label}")
    }
}

fn has_segment(path: &Path, segments: &[&str]) -> bool {
    path.components()
        .filter_map(|c| c.as_os_str().to_str())
        .any(|part| segments.contains(&part))
}

/// Classify a project-relative path into a priority tier.
///
/// Pure and total; rules are evaluated in a fixed precedence order and the
/// first match wins. Only the path string ever matters, not file content.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use marrow::priority::{classify, Priority};
///
/// assert_eq!(classify(Path::new("pyproject.toml")), Priority::Critical);
/// assert_eq!(classify(Path::new("src/core/engine.py")), Priority::High);
/// assert_eq!(classify(Path::new("tests/test_engine.py")), Priority::Medium);
/// ```
pub fn classify(relative: &Path) -> Priority {
    let name = relative
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    if CRITICAL_NAMES.contains(&name) {
        return Priority::Critical;
    }

    if HIGH_CONFIG_NAMES.contains(&name) {
        return Priority::High;
    }

    let ext = relative
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let path_str = relative.to_string_lossy().replace('\\', "/");

    if SOURCE_EXTENSIONS.contains(&ext) {
        // Core source, unless anything about the path says "test".
        if has_segment(relative, CORE_SEGMENTS)
            && !name.contains("test")
            && !path_str.contains("test")
        {
            return Priority::High;
        }

        let in_tests = relative
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .any(|part| part == "tests" || part.starts_with("test_"));
        if name.contains("test") || in_tests {
            return Priority::Medium;
        }

        if has_segment(relative, UTIL_SEGMENTS) {
            return Priority::Medium;
        }
    }

    if DOC_EXTENSIONS.contains(&ext) {
        let parent = relative
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if parent == "docs" || parent == "documentation" {
            return Priority::Low;
        }
        return Priority::Medium;
    }

    if CONFIG_EXTENSIONS.contains(&ext) {
        return Priority::Medium;
    }

    Priority::Noise
}

/// Order relative paths by (tier descending, path ascending).
///
/// Stable and idempotent; equal-tier ties break on byte-lexicographic path
/// comparison. No I/O.
pub fn prioritize(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut ranked: Vec<(Priority, &PathBuf)> =
        paths.iter().map(|p| (classify(p), p)).collect();

    ranked.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then_with(|| a.1.as_os_str().cmp(b.1.as_os_str()))
    });

    ranked.into_iter().map(|(_, p)| p.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_values() {
        assert_eq!(Priority::Critical.value(), 100);
        assert_eq!(Priority::High.value(), 80);
        assert_eq!(Priority::Medium.value(), 50);
        assert_eq!(Priority::Low.value(), 30);
        assert_eq!(Priority::Noise.value(), 0);
        assert!(Priority::Critical > Priority::Noise);
    }

    #[test]
    fn test_classify_critical_names() {
        assert_eq!(classify(Path::new("pyproject.toml")), Priority::Critical);
        assert_eq!(classify(Path::new("README.md")), Priority::Critical);
        assert_eq!(classify(Path::new("LICENSE")), Priority::Critical);
    }

    #[test]
    fn test_classify_high_config_names() {
        assert_eq!(classify(Path::new("setup.py")), Priority::High);
        assert_eq!(classify(Path::new(".gitignore")), Priority::High);
        assert_eq!(classify(Path::new("requirements.txt")), Priority::High);
    }

    #[test]
    fn test_classify_core_source() {
        assert_eq!(classify(Path::new("src/core/engine.py")), Priority::High);
        assert_eq!(classify(Path::new("lib/parser.rs")), Priority::High);
        // "test" anywhere in the path demotes out of the core rule.
        assert_eq!(
            classify(Path::new("src/core/test_engine.py")),
            Priority::Medium
        );
    }

    #[test]
    fn test_classify_tests_and_utils() {
        assert_eq!(classify(Path::new("tests/test_engine.py")), Priority::Medium);
        assert_eq!(classify(Path::new("pkg/test_helpers.py")), Priority::Medium);
        assert_eq!(classify(Path::new("scripts/migrate.py")), Priority::Medium);
    }

    #[test]
    fn test_classify_docs() {
        assert_eq!(classify(Path::new("docs/guide.md")), Priority::Low);
        assert_eq!(classify(Path::new("documentation/api.rst")), Priority::Low);
        assert_eq!(classify(Path::new("CHANGELOG.md")), Priority::Medium);
    }

    #[test]
    fn test_classify_config_and_noise() {
        assert_eq!(classify(Path::new("config/settings.yaml")), Priority::Medium);
        assert_eq!(classify(Path::new("random.xyz")), Priority::Noise);
        assert_eq!(classify(Path::new("data.bin")), Priority::Noise);
    }

    #[test]
    fn test_critical_name_beats_config_extension() {
        // pyproject.toml matches both rule 1 and the config-extension rule;
        // rule 1 wins.
        assert_eq!(classify(Path::new("pyproject.toml")), Priority::Critical);
    }

    #[test]
    fn test_prioritize_orders_by_tier_then_path() {
        let paths: Vec<PathBuf> = [
            "docs/notes.md",
            "src/b.py",
            "src/a.py",
            "tests/test_a.py",
            "pyproject.toml",
            "random.xyz",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();

        let ordered = prioritize(&paths);

        assert_eq!(ordered[0], PathBuf::from("pyproject.toml"));
        assert_eq!(ordered[1], PathBuf::from("src/a.py"));
        assert_eq!(ordered[2], PathBuf::from("src/b.py"));
        assert_eq!(*ordered.last().unwrap(), PathBuf::from("random.xyz"));
    }

    #[test]
    fn test_prioritize_is_idempotent() {
        let paths: Vec<PathBuf> = ["b.md", "a.md", "src/x.py", "README.md"]
            .iter()
            .map(PathBuf::from)
            .collect();

        let once = prioritize(&paths);
        let twice = prioritize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_equal_tier_ties_are_lexicographic() {
        let paths: Vec<PathBuf> = ["z.md", "a.md", "m.md"].iter().map(PathBuf::from).collect();
        let ordered = prioritize(&paths);
        assert_eq!(
            ordered,
            vec![PathBuf::from("a.md"), PathBuf::from("m.md"), PathBuf::from("z.md")]
        );
    }
}
