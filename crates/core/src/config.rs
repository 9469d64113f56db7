//! Scan filter configuration (.jarsync.toml)

use std::path::Path;

/// Classes excluded from scan reporting.
///
/// Filtered classes are invisible to the scanner but are still mirrored
/// into the destination tree like any other file.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct ScanFilter {
    /// Exact file names to exclude (generated accessor/config classes)
    pub deny_files: Vec<String>,

    /// File-name prefixes to exclude (inner classes of excluded classes)
    pub deny_file_prefixes: Vec<String>,

    /// Dotted namespace prefixes to exclude
    pub deny_namespaces: Vec<String>,
}

impl Default for ScanFilter {
    fn default() -> Self {
        Self {
            deny_files: vec!["R.class".to_string(), "BuildConfig.class".to_string()],
            deny_file_prefixes: vec!["R$".to_string()],
            deny_namespaces: vec!["org.bouncycastle".to_string()],
        }
    }
}

/// Config file name
pub const FILTER_FILE: &str = ".jarsync.toml";

impl ScanFilter {
    /// Load the filter from a project root.
    ///
    /// Returns the default filter if `.jarsync.toml` doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(root: &Path) -> color_eyre::Result<Self> {
        let config_path = root.join(FILTER_FILE);
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let filter: Self = toml::from_str(&content)?;
            Ok(filter)
        } else {
            Ok(Self::default())
        }
    }

    /// Whether a resolved class may be reported to the scanner.
    ///
    /// `file_name` is the simple file or entry name (`R$id.class`),
    /// `name` the dotted class name (`a.b.Foo`).
    #[must_use]
    pub fn is_reportable(&self, file_name: &str, name: &str) -> bool {
        if self.deny_files.iter().any(|f| f == file_name) {
            return false;
        }
        if self
            .deny_file_prefixes
            .iter()
            .any(|prefix| file_name.starts_with(prefix.as_str()))
        {
            return false;
        }
        !self
            .deny_namespaces
            .iter()
            .any(|ns| name.starts_with(ns.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_filter_matches_generated_classes() {
        let filter = ScanFilter::default();

        assert!(!filter.is_reportable("R.class", "com.app.R"));
        assert!(!filter.is_reportable("BuildConfig.class", "com.app.BuildConfig"));
        assert!(!filter.is_reportable("R$id.class", "com.app.R$id"));
        assert!(!filter.is_reportable("Provider.class", "org.bouncycastle.jce.Provider"));
        assert!(filter.is_reportable("Foo.class", "com.app.Foo"));
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let filter = ScanFilter::load(dir.path()).unwrap();
        assert_eq!(filter.deny_files, vec!["R.class", "BuildConfig.class"]);
    }

    #[test]
    fn test_load_parses_toml() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(FILTER_FILE),
            r#"
deny_files = ["Generated.class"]
deny_namespaces = ["com.thirdparty"]
"#,
        )
        .unwrap();

        let filter = ScanFilter::load(dir.path()).unwrap();
        assert_eq!(filter.deny_files, vec!["Generated.class"]);
        assert_eq!(filter.deny_namespaces, vec!["com.thirdparty"]);
        // Unlisted fields fall back to empty, not to the defaults
        assert!(filter.deny_file_prefixes.is_empty());
        assert!(filter.is_reportable("R.class", "com.app.R"));
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FILTER_FILE), "deny_files = not-a-list").unwrap();
        assert!(ScanFilter::load(dir.path()).is_err());
    }
}
