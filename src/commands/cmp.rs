use anyhow::Result;

use crate::commands::{run_generation, PathOptions, Settings};
use crate::project::FileType;

/// Generate component declarations for one markup file or the whole project
pub fn execute(file: Option<&str>, options: &PathOptions) -> Result<()> {
    let settings = Settings::resolve(options)?;
    let files = settings.files(FileType::Markup, file)?;
    run_generation(&settings, &files)?;
    Ok(())
}
