//! Logical class identity derived from file paths and archive entries

use std::fmt;
use std::path::Path;

use crate::config::ScanFilter;

/// Dotted fully-qualified class name, e.g. `a.b.Foo`.
///
/// The same name refers to the same logical class across builds, whether
/// it lives as a loose file under a root or as an archive entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName(String);

impl ClassName {
    /// Get the dotted name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the underlying string
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

const CLASS_SUFFIX: &str = ".class";

/// Resolves logical class identities and applies the scan filter.
///
/// Resolution is pure: the same (root, path) or entry path always yields
/// the same name, and filtered names never resolve, regardless of input
/// order. Unresolvable files are not reported, but callers still mirror
/// them.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    filter: ScanFilter,
}

impl IdentityResolver {
    /// Create a resolver with the given filter
    #[must_use]
    pub fn new(filter: ScanFilter) -> Self {
        Self { filter }
    }

    /// Resolve a loose file under `root` to its class name.
    ///
    /// Returns `None` for non-class resources, paths outside `root`, and
    /// filtered names.
    #[must_use]
    pub fn resolve_file(&self, root: &Path, file: &Path) -> Option<ClassName> {
        let relative = file.strip_prefix(root).ok()?;
        let mut parts = Vec::new();
        for component in relative.components() {
            parts.push(component.as_os_str().to_str()?);
        }
        self.resolve_parts(&parts)
    }

    /// Resolve an archive entry path (`x/Y.class` → `x.Y`).
    ///
    /// Directory entries and non-class entries yield `None`.
    #[must_use]
    pub fn resolve_entry(&self, entry_path: &str) -> Option<ClassName> {
        if entry_path.ends_with('/') {
            return None;
        }
        let parts: Vec<&str> = entry_path.split('/').filter(|p| !p.is_empty()).collect();
        self.resolve_parts(&parts)
    }

    fn resolve_parts(&self, parts: &[&str]) -> Option<ClassName> {
        let file_name = *parts.last()?;
        let stem = file_name.strip_suffix(CLASS_SUFFIX)?;
        if stem.is_empty() {
            return None;
        }

        let mut name = String::new();
        for package in &parts[..parts.len() - 1] {
            name.push_str(package);
            name.push('.');
        }
        name.push_str(stem);

        if self.filter.is_reportable(file_name, &name) {
            Some(ClassName(name))
        } else {
            None
        }
    }
}
