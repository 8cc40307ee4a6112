//! Clipboard seam. The share flow needs exactly one operation: write text.
//! Frontends plug in the real clipboard; tests and headless embeddings use
//! the in-memory implementation.

use std::fmt;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardError(pub String);

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clipboard write failed: {}", self.0)
    }
}

impl std::error::Error for ClipboardError {}

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Keeps the last written text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.lock().unwrap_or_else(|e| e.into_inner()) = Some(text.to_string());
        Ok(())
    }
}
