//! Per-field value transforms.
//!
//! A [`Transform`] pairs a decode function (wire value → domain value) with
//! its inverse encode function (domain value → wire value). Transforms are
//! first-class values stored in a [`TransformMap`] keyed by field name;
//! fields without an entry pass through the engine untouched.
//!
//! Invariant: for every byte pattern a well-formed layout can produce,
//! `encode(decode(v)) == v`. The round-trip law of the whole codec rests
//! on each registered pair honoring this.

use std::collections::HashMap;

use thiserror::Error;

use crate::value::Value;

/// Why a transform rejected a value.
///
/// Carries only the reason; the engine attaches the field name and raw
/// bytes when it wraps this into a [`crate::CodecError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// An enumerated field's tag is outside the declared set.
    #[error("unrecognized tag {0}")]
    UnknownTag(u16),

    /// The transform was handed a value kind it does not operate on.
    #[error("expected {expected} value, got {actual}")]
    WrongKind {
        expected: &'static str,
        actual: &'static str,
    },

    /// A character has no representation in the target code page.
    #[error("character {0:?} is not representable")]
    Unmappable(char),
}

type TransformFn = Box<dyn Fn(Value) -> Result<Value, TransformError> + Send + Sync>;

/// A decode/encode function pair for one field.
pub struct Transform {
    decode: TransformFn,
    encode: TransformFn,
}

impl Transform {
    pub fn new<D, E>(decode: D, encode: E) -> Self
    where
        D: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
        E: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        Self {
            decode: Box::new(decode),
            encode: Box::new(encode),
        }
    }

    pub fn decode(&self, value: Value) -> Result<Value, TransformError> {
        (self.decode)(value)
    }

    pub fn encode(&self, value: Value) -> Result<Value, TransformError> {
        (self.encode)(value)
    }
}

impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Transform")
    }
}

/// Field-name-keyed transform registry.
#[derive(Debug, Default)]
pub struct TransformMap {
    transforms: HashMap<&'static str, Transform>,
}

impl TransformMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transform for a field, builder-style.
    pub fn with(mut self, field: &'static str, transform: Transform) -> Self {
        self.transforms.insert(field, transform);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Transform> {
        self.transforms.get(field)
    }
}
