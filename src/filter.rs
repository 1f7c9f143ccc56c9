//! Exclusion filtering: pattern matching and the exclusion policy.
//!
//! Decides which files and directories are noise (build artifacts, caches,
//! lockfiles) and must not reach the context document. Directories are
//! judged by name so the walker can prune them before descending.

use std::fmt;
use std::path::Path;

/// Directory names excluded by default.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "__pycache__", ".git", ".svn", ".hg", ".idea", ".vscode",
    "node_modules", "venv", ".venv", "env", ".env",
    "dist", "build", "out", "target", "bin", "obj",
    ".pytest_cache", ".mypy_cache", ".ruff_cache", "coverage",
    "*.egg-info", ".cache",
];

/// File names excluded by default (exact names plus globbed artifact names).
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &[
    ".DS_Store", "Thumbs.db", "desktop.ini",
    "*.pyc", "*.pyo", "*.pyd", "*.so", "*.dll", "*.dylib",
    "*.class", "*.jar", "*.war", "*.ear",
    "*.log", "*.sqlite", "*.db", "*.sqlite3",
    "*.min.js", "*.min.css", "*.map",
    "package-lock.json", "yarn.lock", "pnpm-lock.yaml",
    "poetry.lock", "Pipfile.lock", "pip-delete-this-directory.txt",
];

/// Backup/swap/temp filename globs excluded by default.
pub const DEFAULT_EXCLUDED_FILE_PATTERNS: &[&str] = &[
    "*.pyc", "*.log", "*.tmp", "*.temp", "*.swp", "*.swo",
    "*.bak", "*.backup", "*~", "#*#", ".#*",
];

/// Extensions (with leading dot) excluded by default.
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    ".pyc", ".pyo", ".pyd", ".so", ".dll", ".dylib",
    ".class", ".jar", ".war", ".ear", ".log",
    ".min.js", ".min.css", ".map",
];

/// Match a file or directory name against a single exclusion pattern.
///
/// Matching rules, in precedence order:
/// 1. Exact equality.
/// 2. Patterns containing `*` or `?` are shell-style globs over the whole name.
/// 3. Patterns starting with a dot (and no wildcard) match as extension suffixes.
/// 4. Anything else: no match.
///
/// Total and deterministic; an invalid glob simply fails to match.
///
/// # Examples
///
/// ```
/// use marrow::filter::match_pattern;
///
/// assert!(match_pattern(".git", ".git"));
/// assert!(match_pattern("cache.pyc", "*.pyc"));
/// assert!(match_pattern("module.min.js", ".min.js"));
/// assert!(!match_pattern("readme.md", "*.pyc"));
/// ```
pub fn match_pattern(name: &str, pattern: &str) -> bool {
    if name == pattern {
        return true;
    }

    if pattern.contains('*') || pattern.contains('?') {
        return glob::Pattern::new(pattern)
            .map(|p| p.matches(name))
            .unwrap_or(false);
    }

    if pattern.starts_with('.') {
        return name.ends_with(pattern);
    }

    false
}

/// The four default rule sets driving exclusion decisions.
///
/// Constructed once and handed to [`ExclusionPolicy::new`]; there is no
/// process-wide mutable state, so builders with different custom filters
/// never interfere.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    /// Directory names (and name globs) to prune.
    pub dirs: Vec<String>,
    /// File names (and name globs) to skip.
    pub files: Vec<String>,
    /// Filename globs for backup/swap/temp files.
    pub file_patterns: Vec<String>,
    /// Exact extensions (with leading dot) to skip.
    pub extensions: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        let to_owned = |set: &[&str]| set.iter().map(|s| (*s).to_string()).collect();
        Self {
            dirs: to_owned(DEFAULT_EXCLUDED_DIRS),
            files: to_owned(DEFAULT_EXCLUDED_FILES),
            file_patterns: to_owned(DEFAULT_EXCLUDED_FILE_PATTERNS),
            extensions: to_owned(DEFAULT_EXCLUDED_EXTENSIONS),
        }
    }
}

/// A user-supplied exclusion predicate with a diagnostic name.
///
/// Predicates are `Send + Sync` so the policy's read path stays safe if a
/// future walker evaluates it from multiple threads.
pub struct NamedFilter {
    name: String,
    predicate: Box<dyn Fn(&Path) -> bool + Send + Sync>,
}

impl NamedFilter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, path: &Path) -> bool {
        (self.predicate)(path)
    }
}

impl fmt::Debug for NamedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedFilter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Per-path exclude/include decisions.
///
/// Holds the default rule sets plus an append-only list of custom filters.
/// Custom filters are evaluated for both files and directories and OR-ed
/// with the rule sets; they can only widen the exclusion, never narrow it.
#[derive(Debug)]
pub struct ExclusionPolicy {
    rules: ExclusionRules,
    filters: Vec<NamedFilter>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self::new(ExclusionRules::default())
    }
}

impl ExclusionPolicy {
    pub fn new(rules: ExclusionRules) -> Self {
        Self {
            rules,
            filters: Vec::new(),
        }
    }

    /// The rule sets this policy was constructed with.
    pub fn rules(&self) -> &ExclusionRules {
        &self.rules
    }

    /// Names of the custom filters added so far.
    pub fn filter_names(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(NamedFilter::name)
    }

    /// Append a named custom filter. Additive only; filters cannot be removed.
    pub fn add_filter(
        &mut self,
        name: impl Into<String>,
        predicate: impl Fn(&Path) -> bool + Send + Sync + 'static,
    ) {
        self.filters.push(NamedFilter {
            name: name.into(),
            predicate: Box::new(predicate),
        });
    }

    /// Decide whether `path` should be excluded.
    ///
    /// Directories match against the directory name set; files match against
    /// the file name set, the filename globs, and the extension set. Custom
    /// filters apply to both.
    pub fn should_exclude(&self, path: &Path, is_dir: bool) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if is_dir {
            if self.rules.dirs.iter().any(|p| match_pattern(&name, p)) {
                return true;
            }
        } else {
            if self.rules.files.iter().any(|p| match_pattern(&name, p)) {
                return true;
            }

            // Pure glob match, independent of the extension shortcut above.
            if self.rules.file_patterns.iter().any(|p| {
                glob::Pattern::new(p)
                    .map(|g| g.matches(&name))
                    .unwrap_or(false)
            }) {
                return true;
            }

            if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                let dotted = format!(".{ext}");
                if self.rules.extensions.iter().any(|e| *e == dotted) {
                    return true;
                }
            }
        }

        self.filters.iter().any(|f| f.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_match_exact() {
        assert!(match_pattern(".DS_Store", ".DS_Store"));
        assert!(match_pattern("node_modules", "node_modules"));
        assert!(!match_pattern("node_modules2", "node_modules"));
    }

    #[test]
    fn test_match_glob() {
        assert!(match_pattern("build.egg-info", "*.egg-info"));
        assert!(match_pattern("#scratch#", "#*#"));
        assert!(match_pattern("notes.txt~", "*~"));
        assert!(match_pattern("a.swp", "?.swp"));
        assert!(!match_pattern("ab.swp", "?.swp"));
    }

    #[test]
    fn test_match_extension_suffix() {
        assert!(match_pattern("bundle.min.js", ".min.js"));
        assert!(match_pattern("cache.pyc", ".pyc"));
        assert!(!match_pattern("pycache", ".pyc"));
    }

    #[test]
    fn test_match_plain_name_requires_equality() {
        assert!(!match_pattern("README.md", "README"));
        assert!(!match_pattern("dist2", "dist"));
    }

    #[test]
    fn test_default_rules_ship_expected_entries() {
        let rules = ExclusionRules::default();
        assert!(rules.dirs.iter().any(|d| d == "__pycache__"));
        assert!(rules.dirs.iter().any(|d| d == ".git"));
        assert!(rules.file_patterns.iter().any(|p| p == "*.pyc"));
        assert!(rules.extensions.iter().any(|e| e == ".pyc"));

        // Important project files are never excluded by default.
        assert!(!rules.files.iter().any(|f| f == "pyproject.toml"));
        assert!(!rules.files.iter().any(|f| f == "README.md"));
        assert!(!rules.files.iter().any(|f| f == ".env.example"));
    }

    #[test]
    fn test_exclude_directories_by_name() {
        let policy = ExclusionPolicy::default();
        assert!(policy.should_exclude(Path::new("proj/__pycache__"), true));
        assert!(policy.should_exclude(Path::new("proj/.git"), true));
        assert!(policy.should_exclude(Path::new("proj/marrow.egg-info"), true));
        assert!(!policy.should_exclude(Path::new("proj/src"), true));
    }

    #[test]
    fn test_exclude_files_by_name_pattern_and_extension() {
        let policy = ExclusionPolicy::default();
        assert!(policy.should_exclude(Path::new("proj/.DS_Store"), false));
        assert!(policy.should_exclude(Path::new("proj/yarn.lock"), false));
        assert!(policy.should_exclude(Path::new("proj/old.bak"), false));
        assert!(policy.should_exclude(Path::new("proj/mod.pyc"), false));
        assert!(!policy.should_exclude(Path::new("proj/main.py"), false));
        assert!(!policy.should_exclude(Path::new("proj/README.md"), false));
    }

    #[test]
    fn test_dir_name_rules_do_not_apply_to_files() {
        let policy = ExclusionPolicy::default();
        // A file that happens to be called "target" is kept.
        assert!(!policy.should_exclude(Path::new("proj/target"), false));
    }

    #[test]
    fn test_custom_filter_applies_to_files_and_dirs() {
        let mut policy = ExclusionPolicy::default();
        policy.add_filter("no-fixtures", |path: &Path| {
            path.file_name()
                .is_some_and(|n| n.to_string_lossy().contains("fixture"))
        });

        assert!(policy.should_exclude(Path::new("proj/fixtures"), true));
        assert!(policy.should_exclude(Path::new("proj/fixture_data.json"), false));
        assert!(!policy.should_exclude(Path::new("proj/data.json"), false));
        assert_eq!(policy.filter_names().collect::<Vec<_>>(), vec!["no-fixtures"]);
    }

    #[test]
    fn test_custom_filters_are_additive() {
        let mut policy = ExclusionPolicy::default();
        policy.add_filter("a", |_: &Path| false);
        policy.add_filter("b", {
            let needle = PathBuf::from("proj/skip.me");
            move |path: &Path| path == needle
        });

        assert!(policy.should_exclude(Path::new("proj/skip.me"), false));
        assert_eq!(policy.filter_names().count(), 2);
    }
}
