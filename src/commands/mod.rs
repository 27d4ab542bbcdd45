pub mod all;
pub mod cmp;
pub mod helper;
pub mod watch;

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Instant;

use crate::apex::ApexTypeIndex;
use crate::build_pipeline::{self, GenerationResult};
use crate::config::{self, Config};
use crate::project::{self, AuraFile, FileType};

/// Path settings shared by every command
#[derive(Debug, Clone, Default)]
pub struct PathOptions {
    pub apex_types: Option<String>,
    pub output: Option<String>,
    pub config: Option<String>,
}

/// Configuration file values with command-line overrides applied
#[derive(Debug, Clone)]
pub struct Settings {
    pub components: String,
    pub helpers: String,
    pub apex_types: PathBuf,
    pub output: PathBuf,
}

impl Settings {
    pub fn resolve(options: &PathOptions) -> Result<Self> {
        let config_path = options.config.as_deref().unwrap_or(config::CONFIG_FILE);
        let Config { paths } = config::load_config(config_path)?;

        Ok(Self {
            components: paths.components,
            helpers: paths.helpers,
            apex_types: PathBuf::from(options.apex_types.clone().unwrap_or(paths.apex_types)),
            output: PathBuf::from(options.output.clone().unwrap_or(paths.output)),
        })
    }

    /// Files matching `--file` (a path or glob), or the configured pattern
    pub fn files(&self, file_type: FileType, file: Option<&str>) -> Result<Vec<AuraFile>> {
        match file {
            Some(pattern) => {
                let files = project::discover_files(pattern, file_type, &self.output)?;
                if files.is_empty() {
                    anyhow::bail!("No files match {}", pattern);
                }
                Ok(files)
            }
            None => {
                let pattern = match file_type {
                    FileType::Markup => &self.components,
                    FileType::Helper => &self.helpers,
                };
                project::discover_files(pattern, file_type, &self.output)
            }
        }
    }
}

/// Load the Apex index, generate, and report. Fails when any file failed.
pub fn run_generation(settings: &Settings, files: &[AuraFile]) -> Result<GenerationResult> {
    let start = Instant::now();

    let externals = ApexTypeIndex::load(&settings.apex_types)
        .context("Failed to load Apex type declarations")?;
    let result = build_pipeline::execute_generation(files, &externals, &settings.output)?;

    report(&result, start)?;
    Ok(result)
}

fn report(result: &GenerationResult, start: Instant) -> Result<()> {
    if !result.errors.is_empty() {
        eprintln!(
            "{} generation failed for {} file(s)",
            "error:".red().bold(),
            result.errors.len()
        );
        for error in &result.errors {
            eprintln!("  {} - {}", error.file.display(), error.message);
        }
        anyhow::bail!("Generation failed with {} error(s)", result.errors.len());
    }

    println!(
        "   {} {} declaration(s) in {} in {:.2}s",
        "Generated".green().bold(),
        result.generated.len(),
        result.output_dir.display(),
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
