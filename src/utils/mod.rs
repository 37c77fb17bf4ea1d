pub mod environment;
pub mod input;

pub use environment::{STOP_WORDS_ENV, resolve_stop_words_path};
pub use input::{
    InputError, MAX_FILE_SIZE_BYTES, decode_transcript, read_capped, read_transcript,
    validate_file_size,
};
