//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use atmos_editor::{EditRequest, EditSession, EditorConfig};
use atmos_store::{AtmosSource, AtmosphereStore, MemorySource, NetCdfSource};

use crate::report::{self, OutputFormat};
use crate::WriteArgs;

fn open_source(path: &Path) -> Result<NetCdfSource> {
    NetCdfSource::open(path).with_context(|| format!("Failed to open atmosphere file: {}", path.display()))
}

pub fn info(path: &Path) -> Result<()> {
    let store = AtmosphereStore::load(open_source(path)?)?;
    print!("{}", report::info(store.snapshot()?));
    Ok(())
}

pub fn show(path: &Path, time: usize, format: OutputFormat, config: &EditorConfig) -> Result<()> {
    let mut session = EditSession::open(open_source(path)?, config)?;
    session
        .set_time_index(time)
        .with_context(|| format!("Cannot show time step {}", time))?;
    print!("{}", report::show(session.viewport(), format)?);
    Ok(())
}

/// Apply `requests` in order and save once at the end.
pub fn edit(path: &Path, requests: &[EditRequest], write: &WriteArgs, config: &EditorConfig) -> Result<()> {
    if write.dry_run {
        let snapshot = open_source(path)?.read()?;
        let session = EditSession::open(MemorySource::new(snapshot), config)?;
        println!("dry run: nothing written");
        return run_edits(session, requests, write, false);
    }

    let target = match &write.output {
        Some(output) => copy_to(path, output)?,
        None => path.to_path_buf(),
    };
    let session = EditSession::open(open_source(&target)?, config)?;
    run_edits(session, requests, write, true)?;
    println!("saved {}", target.display());
    Ok(())
}

fn copy_to(input: &Path, output: &Path) -> Result<PathBuf> {
    std::fs::copy(input, output)
        .with_context(|| format!("Failed to copy {} to {}", input.display(), output.display()))?;
    info!(from = %input.display(), to = %output.display(), "Copied atmosphere file");
    Ok(output.to_path_buf())
}

/// Apply the edits, print the refreshed profiles if asked, then save.
///
/// Profiles are shown at the time step of the last edit.
fn run_edits<S: AtmosSource>(
    mut session: EditSession<S>,
    requests: &[EditRequest],
    write: &WriteArgs,
    save: bool,
) -> Result<()> {
    for (i, request) in requests.iter().enumerate() {
        let outcome = session
            .apply_request(request)
            .with_context(|| format!("Edit {} ({}) failed", i + 1, request.quantity))?;
        if outcome.is_empty() {
            warn!(edit = i + 1, quantity = %request.quantity, "Edit selected no samples");
        }
        println!("{}", report::edit_summary(request, &outcome));
    }

    if write.shows_profiles() {
        if let Some(last) = requests.last() {
            session.set_time_index(last.time_index)?;
        }
        print!("{}", report::show(session.viewport(), write.format)?);
    }

    if save {
        session.save().context("Failed to save atmosphere")?;
    }
    session.close();
    Ok(())
}
