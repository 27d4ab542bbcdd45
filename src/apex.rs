//! Index of Apex classes that already have TypeScript declarations.
//!
//! Built once per run, before any file is generated, and handed to the
//! generators as an immutable [`ExternalTypes`] snapshot.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::typegen::ExternalTypes;

#[derive(Debug, Clone, Default)]
pub struct ApexTypeIndex {
    names: HashSet<String>,
}

impl ApexTypeIndex {
    /// Scan `dir` (non-recursively) for `*.d.ts` files.
    ///
    /// `Account.d.ts` registers `Account`. A missing directory yields an
    /// empty index.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut names = HashSet::new();

        if !dir.is_dir() {
            debug!(dir = %dir.display(), "no Apex declarations directory");
            return Ok(Self { names });
        }

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.context(format!("Failed to scan {}", dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if !file_name.ends_with(".d.ts") {
                continue;
            }
            if let Some(stem) = file_name.split('.').next().filter(|stem| !stem.is_empty()) {
                names.insert(stem.to_string());
            }
        }

        debug!(dir = %dir.display(), count = names.len(), "loaded Apex declarations");
        Ok(Self { names })
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl ExternalTypes for ApexTypeIndex {
    fn is_known_external_type(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_declarations() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Account.d.ts"), "").unwrap();
        fs::write(dir.path().join("MyController.d.ts"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/Hidden.d.ts"), "").unwrap();

        let index = ApexTypeIndex::load(dir.path()).unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.is_known_external_type("Account"));
        assert!(index.is_known_external_type("MyController"));
        assert!(!index.is_known_external_type("Hidden"));
        assert!(!index.is_known_external_type("notes"));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let index = ApexTypeIndex::load(&dir.path().join("types/apex")).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let index = ApexTypeIndex::from_names(["Account"]);
        assert!(!index.is_known_external_type("account"));
    }
}
