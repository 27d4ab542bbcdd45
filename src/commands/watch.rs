use anyhow::{Context, Result};
use colored::Colorize;
use notify::{Event, RecursiveMode, Watcher};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;
use tracing::debug;

use crate::commands::all::collect_all;
use crate::commands::{run_generation, PathOptions, Settings};

/// Events arriving this close together trigger a single regeneration
const DEBOUNCE: Duration = Duration::from_millis(100);

pub fn execute(options: &PathOptions) -> Result<()> {
    let settings = Settings::resolve(options)?;
    let root = env::current_dir()?;
    let apex_dir = absolute(&root, &settings.apex_types);

    // 1. Initial run
    match run_all(&settings) {
        Ok(()) => println!("{}", "   Watching for changes...".green().bold()),
        Err(e) => {
            eprintln!("{} initial generation failed: {}", "error:".red().bold(), e);
            eprintln!("Watching anyway (will retry on file changes)...");
        }
    }

    // 2. Set up file watcher
    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;
    watcher
        .watch(&root, RecursiveMode::Recursive)
        .context(format!("Failed to watch {}", root.display()))?;

    // 3. Watch loop
    while let Ok(event) = rx.recv() {
        if !should_regenerate(&event, &apex_dir) {
            continue;
        }
        while rx.recv_timeout(DEBOUNCE).is_ok() {}

        let changed_file = event
            .paths
            .first()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("file");
        println!("\nChange detected in {}", changed_file);

        if let Err(e) = run_all(&settings) {
            eprintln!("{} generation failed: {}", "error:".red().bold(), e);
        }
    }

    Ok(())
}

/// Re-discovers files and re-loads the Apex index on every run
fn run_all(settings: &Settings) -> Result<()> {
    let files = collect_all(settings)?;
    run_generation(settings, &files)?;
    Ok(())
}

fn absolute(root: &Path, path: &Path) -> PathBuf {
    let joined = root.join(path);
    joined.canonicalize().unwrap_or(joined)
}

fn should_regenerate(event: &Event, apex_dir: &Path) -> bool {
    use notify::EventKind::*;

    match event.kind {
        Modify(_) | Create(_) | Remove(_) => event.paths.iter().any(|p| {
            let relevant = is_source_file(p) || is_apex_declaration(p, apex_dir);
            if relevant {
                debug!(path = %p.display(), "source change");
            }
            relevant
        }),
        _ => false,
    }
}

fn is_source_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".cmp")
        || name.ends_with(".app")
        || ["Helper.js", "Helper.ts", "helper.js", "helper.ts"]
            .iter()
            .any(|suffix| name.ends_with(suffix))
}

fn is_apex_declaration(path: &Path, apex_dir: &Path) -> bool {
    path.starts_with(apex_dir)
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.ends_with(".d.ts"))
}
