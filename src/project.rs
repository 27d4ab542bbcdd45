use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::typegen::component_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// `.cmp` or `.app` markup
    Markup,
    /// `*Helper.js` / `*Helper.ts`
    Helper,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuraFile {
    pub path: PathBuf,               // force-app/main/default/aura/MyCmp/MyCmpHelper.ts
    pub file_type: FileType,
    pub component_name: String,      // MyCmp
    pub output_path: PathBuf,        // .sfdx/typings/aura/MyCmpHelper.d.ts
}

/// Expand a glob pattern into a sorted list of files.
pub fn discover_files(pattern: &str, file_type: FileType, output_dir: &Path) -> Result<Vec<AuraFile>> {
    let entries = glob::glob(pattern)
        .context(format!("Invalid file pattern: {}", pattern))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.context(format!("Failed to read a match of {}", pattern))?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths
        .into_iter()
        .map(|path| classify_file(path, file_type, output_dir))
        .collect())
}

fn classify_file(path: PathBuf, file_type: FileType, output_dir: &Path) -> AuraFile {
    let component_name = component_name(&path);
    let output_path = match file_type {
        // Components are named after their bundle directory
        FileType::Markup => output_dir.join(format!("{}.d.ts", component_name)),
        // Helpers keep their own file stem: MyCmpHelper.d.ts
        FileType::Helper => {
            let stem = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            output_dir.join(format!("{}.d.ts", stem))
        }
    };

    AuraFile {
        path,
        file_type,
        component_name,
        output_path,
    }
}

/// Locate and read the markup a helper belongs to.
///
/// `MyCmpHelper.js` pairs with `MyCmp.cmp`, or `MyCmp.app` when there is no
/// readable component file.
pub fn read_paired_markup(helper: &Path) -> Result<(PathBuf, String)> {
    let suffix = Regex::new(r"[Hh]elper\.[jt]s$").context("Invalid helper suffix pattern")?;
    let helper_str = helper.to_string_lossy();

    if !suffix.is_match(&helper_str) {
        anyhow::bail!("Not a helper file: {}", helper.display());
    }

    let mut tried = Vec::new();
    for extension in [".cmp", ".app"] {
        let candidate = PathBuf::from(suffix.replace(&helper_str, extension).into_owned());
        if let Ok(markup) = fs::read_to_string(&candidate) {
            return Ok((candidate, markup));
        }
        tried.push(candidate.display().to_string());
    }

    anyhow::bail!(
        "No component markup found for {} (tried {})",
        helper.display(),
        tried.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_paths() {
        let out = Path::new("typings");
        let cmp = classify_file(PathBuf::from("aura/MyCmp/MyCmp.cmp"), FileType::Markup, out);
        assert_eq!(cmp.component_name, "MyCmp");
        assert_eq!(cmp.output_path, PathBuf::from("typings/MyCmp.d.ts"));

        let helper = classify_file(PathBuf::from("aura/MyCmp/MyCmpHelper.ts"), FileType::Helper, out);
        assert_eq!(helper.component_name, "MyCmp");
        assert_eq!(helper.output_path, PathBuf::from("typings/MyCmpHelper.d.ts"));
    }

    #[test]
    fn test_paired_markup_prefers_cmp() {
        let dir = TempDir::new().unwrap();
        let bundle = dir.path().join("MyCmp");
        fs::create_dir(&bundle).unwrap();
        fs::write(bundle.join("MyCmp.cmp"), "<aura:component/>").unwrap();
        fs::write(bundle.join("MyCmp.app"), "<aura:application/>").unwrap();

        let (path, markup) = read_paired_markup(&bundle.join("MyCmpHelper.js")).unwrap();
        assert_eq!(path, bundle.join("MyCmp.cmp"));
        assert_eq!(markup, "<aura:component/>");
    }

    #[test]
    fn test_paired_markup_falls_back_to_app() {
        let dir = TempDir::new().unwrap();
        let bundle = dir.path().join("MyApp");
        fs::create_dir(&bundle).unwrap();
        fs::write(bundle.join("MyApp.app"), "<aura:application/>").unwrap();

        let (path, _) = read_paired_markup(&bundle.join("MyApphelper.ts")).unwrap();
        assert_eq!(path, bundle.join("MyApp.app"));
    }

    #[test]
    fn test_paired_markup_missing() {
        let dir = TempDir::new().unwrap();
        let err = read_paired_markup(&dir.path().join("LoneHelper.js")).unwrap_err();
        assert!(err.to_string().contains("No component markup found"));
    }

    #[test]
    fn test_discover_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["Zed", "Alpha"] {
            let bundle = dir.path().join("aura").join(name);
            fs::create_dir_all(&bundle).unwrap();
            fs::write(bundle.join(format!("{}.cmp", name)), "<aura:component/>").unwrap();
        }
        let pattern = format!("{}/aura/**/*.cmp", dir.path().display());
        let files = discover_files(&pattern, FileType::Markup, Path::new("out")).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.component_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zed"]);
    }
}
