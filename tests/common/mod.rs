//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Builder for transcript text in the `DD/MM/YYYY, HH:MM - sender: body` export format
pub struct TranscriptBuilder {
    lines: Vec<String>,
    day: u32,
    month: u32,
    year: i32,
    minutes: u32,
}

impl TranscriptBuilder {
    /// Start on 12/05/2023 at 09:00
    pub fn new() -> Self {
        Self { lines: Vec::new(), day: 12, month: 5, year: 2023, minutes: 9 * 60 }
    }

    /// Move to another day (minutes continue from the current time of day)
    pub fn on(mut self, day: u32, month: u32, year: i32) -> Self {
        self.day = day;
        self.month = month;
        self.year = year;
        self
    }

    /// Set the time of day for the next line
    pub fn at(mut self, hour: u32, minute: u32) -> Self {
        self.minutes = hour * 60 + minute;
        self
    }

    /// Add a chat message, advancing the clock one minute
    pub fn message(mut self, sender: &str, body: &str) -> Self {
        let line = format!("{} - {}: {}", self.stamp(), sender, body);
        self.lines.push(line);
        self.tick()
    }

    /// Add a system line with no sender
    pub fn system(mut self, text: &str) -> Self {
        let line = format!("{} - {}", self.stamp(), text);
        self.lines.push(line);
        self.tick()
    }

    /// Add a raw line verbatim (continuation lines, preambles, noise)
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    /// Same transcript with CRLF line endings
    pub fn build_crlf(&self) -> String {
        self.build().replace('\n', "\r\n")
    }

    fn stamp(&self) -> String {
        format!(
            "{:02}/{:02}/{}, {:02}:{:02}",
            self.day,
            self.month,
            self.year,
            (self.minutes / 60) % 24,
            self.minutes % 60
        )
    }

    fn tick(mut self) -> Self {
        self.minutes += 1;
        self
    }
}

impl Default for TranscriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a temporary directory of transcript files
pub struct TranscriptDirBuilder {
    temp_dir: TempDir,
}

impl TranscriptDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a file (parent directories are created as needed)
    pub fn with_file(self, name: &str, content: impl AsRef<[u8]>) -> Self {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, content).expect("Failed to write transcript file");
        self
    }

    pub fn file_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for TranscriptDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A small two-person chat spanning two months
pub fn sample_transcript() -> String {
    TranscriptBuilder::new()
        .system("Messages and calls are end-to-end encrypted.")
        .message("Alice", "Hello there 👋")
        .message("Bob", "hi! see https://example.com")
        .message("Alice", "<Media omitted>")
        .on(3, 6, 2023)
        .at(23, 15)
        .message("Bob", "late night pizza 🍕🍕")
        .system("Carol joined using this group's invite link")
        .message("Carol", "hey all")
        .build()
}
