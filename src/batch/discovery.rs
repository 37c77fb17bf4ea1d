use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing::warn;
use walkdir::WalkDir;

/// Maximum number of transcripts in one batch (prevents resource exhaustion)
pub const MAX_TRANSCRIPT_FILES: usize = 1000;

const TRANSCRIPT_EXTENSION: &str = "txt";

/// Find every `.txt` transcript below a directory
///
/// The extension check is case-insensitive. Symlinks are not followed, and unreadable
/// entries are logged as warnings and skipped.
///
/// # Returns
///
/// Paths sorted so batch output is stable between runs.
///
/// # Errors
///
/// Returns an error if:
/// - `dir` is not a directory
/// - More than [`MAX_TRANSCRIPT_FILES`] (1000) transcripts are found
pub fn discover_transcripts(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }

    let mut transcripts = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_transcript(entry.path()) {
            continue;
        }

        if transcripts.len() >= MAX_TRANSCRIPT_FILES {
            bail!(
                "Resource limit exceeded: more than {} transcript files in {}",
                MAX_TRANSCRIPT_FILES,
                dir.display()
            );
        }
        transcripts.push(entry.into_path());
    }

    transcripts.sort();
    Ok(transcripts)
}

fn is_transcript(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TRANSCRIPT_EXTENSION))
}
