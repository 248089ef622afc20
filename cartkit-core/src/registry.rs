//! Static format registry.
//!
//! Replaces a dynamic plugin-discovery mechanism with an explicit lookup:
//! the host registers each format once at startup and resolves it later by
//! key or display title. No code loading happens at runtime.

use serde::Serialize;

use crate::codec::{Record, StructCodec};
use crate::error::CodecError;
use crate::ReadSeek;

/// Descriptive metadata a format publishes about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatInfo {
    /// Stable machine key, e.g. `"game_boy_a"`.
    pub key: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// Original developer of the format.
    pub developer: &'static str,
    pub description: &'static str,
}

/// A registered binary header format.
///
/// The seam between the generic engine and a concrete format: a format
/// owns its codec and knows where its structure lives inside a source.
pub trait HeaderFormat: Send + Sync {
    fn info(&self) -> FormatInfo;

    /// The codec for this format's structure.
    fn codec(&self) -> &StructCodec;

    /// Read and decode the structure from its canonical offset in `source`.
    fn read_header(&self, source: &mut dyn ReadSeek) -> Result<Record, CodecError>;

    /// Quick check whether `source` looks like a file of this format.
    fn identify(&self, source: &mut dyn ReadSeek) -> Result<bool, CodecError>;
}

/// Lookup table of registered formats, populated at process start.
#[derive(Default)]
pub struct FormatRegistry {
    formats: Vec<Box<dyn HeaderFormat>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, format: Box<dyn HeaderFormat>) {
        self.formats.push(format);
    }

    pub fn by_key(&self, key: &str) -> Option<&dyn HeaderFormat> {
        self.formats
            .iter()
            .find(|f| f.info().key == key)
            .map(|f| f.as_ref())
    }

    pub fn by_title(&self, title: &str) -> Option<&dyn HeaderFormat> {
        self.formats
            .iter()
            .find(|f| f.info().title == title)
            .map(|f| f.as_ref())
    }

    /// Iterate formats in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn HeaderFormat> {
        self.formats.iter().map(|f| f.as_ref())
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}
