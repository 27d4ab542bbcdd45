use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::project::{read_paired_markup, AuraFile, FileType};
use crate::typegen::{self, ExternalTypes};

/// Represents the result of a generation run
#[derive(Debug)]
pub struct GenerationResult {
    /// Declaration files written, in input order
    pub generated: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub errors: Vec<GenerationError>,
}

#[derive(Debug)]
pub struct GenerationError {
    pub file: PathBuf,
    pub message: String,
}

/// Core generation pipeline - used by the cmp, helper, all, and watch commands
///
/// # Arguments
/// * `files` - Discovered markup and helper files
/// * `externals` - Apex type snapshot, complete before generation starts
/// * `output_dir` - Created if missing
///
/// # Returns
/// GenerationResult with written files and per-file errors. A failing file
/// never stops its siblings and never leaves a partial declaration behind.
pub fn execute_generation(
    files: &[AuraFile],
    externals: &dyn ExternalTypes,
    output_dir: &Path,
) -> Result<GenerationResult> {
    fs::create_dir_all(output_dir)
        .context(format!("Failed to create output directory {}", output_dir.display()))?;

    let outcomes: Vec<(&AuraFile, Result<()>)> = files
        .par_iter()
        .map(|file| (file, generate_file(file, externals)))
        .collect();

    let mut generated = Vec::new();
    let mut errors = Vec::new();
    for (file, outcome) in outcomes {
        match outcome {
            Ok(()) => generated.push(file.output_path.clone()),
            Err(e) => errors.push(GenerationError {
                file: file.path.clone(),
                message: format!("{:#}", e),
            }),
        }
    }

    Ok(GenerationResult {
        generated,
        output_dir: output_dir.to_path_buf(),
        errors,
    })
}

fn generate_file(file: &AuraFile, externals: &dyn ExternalTypes) -> Result<()> {
    debug!(component = %file.component_name, file = %file.path.display(), "generating");

    let source = fs::read_to_string(&file.path)
        .context(format!("Failed to read {}", file.path.display()))?;

    let declaration = match file.file_type {
        FileType::Markup => typegen::build_component_dts(&file.path, &source, externals)?,
        FileType::Helper => {
            let (markup_path, markup) = read_paired_markup(&file.path)?;
            typegen::build_helper_dts(&file.path, &source, &markup_path, &markup)?
        }
    };

    write_declaration(&file.output_path, &declaration)?;

    debug!(output = %file.output_path.display(), "wrote declaration");
    Ok(())
}

/// Write to a sibling `.tmp` file, then rename it over the destination.
fn write_declaration(path: &Path, declaration: &str) -> Result<()> {
    let mut tmp_name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let written = fs::write(&tmp_path, declaration)
        .context(format!("Failed to write {}", tmp_path.display()))
        .and_then(|()| {
            fs::rename(&tmp_path, path)
                .context(format!("Failed to move declaration into {}", path.display()))
        });
    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}
