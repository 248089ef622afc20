//! Generic, declarative binary-structure codec.
//!
//! A binary format is described as data — a [`ByteLayout`] of named,
//! fixed-width fields plus a [`TransformMap`] of per-field decode/encode
//! pairs — and a [`StructCodec`] interprets that description in both
//! directions:
//!
//! ```text
//! bytes --unpack--> Record --edit--> Record --pack--> bytes
//! ```
//!
//! An unmutated round trip reproduces the input buffer byte for byte.
//! Concrete formats (see the companion vendor crates) declare a layout,
//! register transforms, and publish themselves through [`FormatRegistry`].

use std::io::{Read, Seek};

pub mod codec;
pub mod error;
pub mod layout;
pub mod registry;
pub mod transform;
pub mod value;

pub use codec::{Record, StructCodec};
pub use error::CodecError;
pub use layout::{ByteLayout, ByteOrder, FieldKind, FieldSpec};
pub use registry::{FormatInfo, FormatRegistry, HeaderFormat};
pub use transform::{Transform, TransformError, TransformMap};
pub use value::{EnumSym, Value};

/// A byte source that implements both Read and Seek.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}
