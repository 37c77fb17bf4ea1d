use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

// Maximum transcript size: 10MB
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

const UTF8_BOM: char = '\u{feff}';

/// Input that must be rejected before it reaches the parser
#[derive(Debug, Error)]
pub enum InputError {
    #[error("File too large: {} ({size} bytes, max {max} bytes)", .path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Binary content in {} (NUL byte at offset {offset})", .path.display())]
    Binary { path: PathBuf, offset: usize },

    #[error("Transcript is not valid UTF-8: {} (invalid byte at offset {offset})", .path.display())]
    NotUtf8 { path: PathBuf, offset: usize },
}

/// Validates that a file's size is within acceptable limits (10MB)
///
/// Takes an open file handle so the size checked is the size of the file that is read.
///
/// # Errors
///
/// Returns an error if the metadata cannot be read or the file is larger than 10MB.
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let size = metadata.len();
    if size > MAX_FILE_SIZE_BYTES {
        return Err(InputError::TooLarge {
            path: path.to_path_buf(),
            size,
            max: MAX_FILE_SIZE_BYTES,
        }
        .into());
    }

    Ok(())
}

/// Decode raw transcript bytes into text
///
/// Rejects NUL bytes (binary files) and invalid UTF-8, and strips a leading BOM.
pub fn decode_transcript(bytes: Vec<u8>, path: &Path) -> Result<String, InputError> {
    if let Some(offset) = bytes.iter().position(|&b| b == 0) {
        return Err(InputError::Binary { path: path.to_path_buf(), offset });
    }

    let text = String::from_utf8(bytes).map_err(|e| InputError::NotUtf8 {
        path: path.to_path_buf(),
        offset: e.utf8_error().valid_up_to(),
    })?;

    match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(text),
    }
}

/// Read at most `MAX_FILE_SIZE_BYTES` from `reader`
///
/// The metadata check can be outrun by a file that grows while it is read, so the stream
/// itself is capped too.
pub fn read_capped<R: Read>(reader: R, path: &Path) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .take(MAX_FILE_SIZE_BYTES + 1)
        .read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read transcript file: {}", path.display()))?;

    let size = bytes.len() as u64;
    if size > MAX_FILE_SIZE_BYTES {
        return Err(InputError::TooLarge {
            path: path.to_path_buf(),
            size,
            max: MAX_FILE_SIZE_BYTES,
        }
        .into());
    }

    Ok(bytes)
}

/// Read a transcript file as UTF-8 text after size and content validation
pub fn read_transcript(path: &Path) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open transcript file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let bytes = read_capped(file, path)?;
    Ok(decode_transcript(bytes, path)?)
}
