//! Section template stores.
//!
//! The embedded store ships every template inside the binary; the directory
//! store backs the `--sections-dir` override and falls back to the embedded
//! wrapper when the directory carries none of its own.

use std::path::PathBuf;

use include_dir::{Dir, include_dir};

use crate::domain::SectionId;
use crate::ports::SectionStore;

static SECTIONS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/sections");

static WRAPPER_OPEN: &str = include_str!("../assets/wrapper/open.html");
static WRAPPER_CLOSE: &str = include_str!("../assets/wrapper/close.html");

/// Embedded section store implementation.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedSectionStore;

impl EmbeddedSectionStore {
    pub fn new() -> Self {
        Self
    }
}

impl SectionStore for EmbeddedSectionStore {
    fn template(&self, id: SectionId) -> Option<String> {
        SECTIONS_DIR
            .get_file(format!("{}.html", id))
            .and_then(|file| file.contents_utf8())
            .map(str::to_string)
    }

    fn wrapper_open(&self) -> String {
        WRAPPER_OPEN.to_string()
    }

    fn wrapper_close(&self) -> String {
        WRAPPER_CLOSE.to_string()
    }
}

/// Filesystem section store reading `<id>.html` files from one directory,
/// with optional `wrapper-open.html` / `wrapper-close.html` overrides.
#[derive(Debug, Clone)]
pub struct DirSectionStore {
    root: PathBuf,
}

impl DirSectionStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn read(&self, name: &str) -> Option<String> {
        std::fs::read_to_string(self.root.join(name)).ok()
    }
}

impl SectionStore for DirSectionStore {
    fn template(&self, id: SectionId) -> Option<String> {
        self.read(&format!("{}.html", id))
    }

    fn wrapper_open(&self) -> String {
        self.read("wrapper-open.html").unwrap_or_else(|| WRAPPER_OPEN.to_string())
    }

    fn wrapper_close(&self) -> String {
        self.read("wrapper-close.html").unwrap_or_else(|| WRAPPER_CLOSE.to_string())
    }
}
