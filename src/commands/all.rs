use anyhow::Result;

use crate::commands::{run_generation, PathOptions, Settings};
use crate::project::{AuraFile, FileType};

/// Generate component and helper declarations in one pass
pub fn execute(options: &PathOptions) -> Result<()> {
    let settings = Settings::resolve(options)?;
    let files = collect_all(&settings)?;
    run_generation(&settings, &files)?;
    Ok(())
}

pub(crate) fn collect_all(settings: &Settings) -> Result<Vec<AuraFile>> {
    let mut files = settings.files(FileType::Markup, None)?;
    files.extend(settings.files(FileType::Helper, None)?);
    Ok(files)
}
