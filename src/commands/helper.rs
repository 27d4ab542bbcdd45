use anyhow::Result;

use crate::commands::{run_generation, PathOptions, Settings};
use crate::project::FileType;

/// Generate helper declarations for one helper script or the whole project
pub fn execute(file: Option<&str>, options: &PathOptions) -> Result<()> {
    let settings = Settings::resolve(options)?;
    let files = settings.files(FileType::Helper, file)?;
    run_generation(&settings, &files)?;
    Ok(())
}
