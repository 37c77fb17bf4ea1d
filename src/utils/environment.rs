use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming a stop-word file
pub const STOP_WORDS_ENV: &str = "CHAT_EXPLORER_STOP_WORDS";

const CONFIG_DIR_NAME: &str = "chat-history-explorer";
const STOP_WORDS_FILE: &str = "stop_words.txt";

/// Resolve which stop-word file to load
///
/// Order: explicit path (CLI flag), then `CHAT_EXPLORER_STOP_WORDS`, then
/// `<config dir>/chat-history-explorer/stop_words.txt` when that file exists.
/// `None` means the built-in list should be used.
pub fn resolve_stop_words_path(explicit: Option<&Path>) -> Option<PathBuf> {
    resolve_stop_words_path_internal(explicit, env::var_os(STOP_WORDS_ENV).map(PathBuf::from))
}

pub(crate) fn resolve_stop_words_path_internal(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Some(path) = from_env
        && !path.as_os_str().is_empty()
    {
        return Some(path);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(STOP_WORDS_FILE))
        .filter(|path| path.is_file())
}
