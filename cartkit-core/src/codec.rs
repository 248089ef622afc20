//! The generic structure codec.
//!
//! [`StructCodec`] composes a [`ByteLayout`] with a [`TransformMap`] and
//! exposes `unpack` (bytes → [`Record`]) and `pack` (record → bytes). It is
//! stateless: both operations are pure functions of their input, so one
//! codec can serve any number of callers concurrently.

use serde::Serialize;

use crate::error::CodecError;
use crate::layout::{ByteLayout, ByteOrder, FieldKind};
use crate::transform::TransformMap;
use crate::value::Value;

/// The decoded, in-memory form of one structure: a `(name, value)` pair per
/// layout field, kept in layout order.
///
/// A record is a plain value. It carries no reference back to the layout
/// that produced it; `pack` re-checks it against the layout instead.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Record {
    entries: Vec<(&'static str, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    /// Replace a field's value, or append it if absent.
    pub fn set(&mut self, field: &'static str, value: Value) {
        match self.get_mut(field) {
            Some(slot) => *slot = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Iterate entries in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Generic engine mapping fixed-layout byte buffers to records and back.
#[derive(Debug)]
pub struct StructCodec {
    layout: ByteLayout,
    transforms: TransformMap,
}

impl StructCodec {
    pub fn new(layout: ByteLayout, transforms: TransformMap) -> Self {
        Self { layout, transforms }
    }

    pub fn layout(&self) -> &ByteLayout {
        &self.layout
    }

    /// Total byte width the layout declares. `unpack` requires exactly this
    /// many bytes and `pack` emits exactly this many.
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    /// Decode a buffer into a record.
    ///
    /// The buffer is split into consecutive spans in field order; integer
    /// fields are read in the layout's byte order; fields with a registered
    /// transform have their decode applied. Fails without partial output:
    /// a rejected field aborts the whole unpack.
    pub fn unpack(&self, buffer: &[u8]) -> Result<Record, CodecError> {
        if buffer.len() != self.layout.size() {
            return Err(CodecError::SizeMismatch {
                expected: self.layout.size(),
                actual: buffer.len(),
            });
        }

        let order = self.layout.byte_order();
        let mut record = Record::new();
        let mut offset = 0;

        for field in self.layout.fields() {
            let width = field.kind.width();
            let span = &buffer[offset..offset + width];
            offset += width;

            let raw = match field.kind {
                FieldKind::Bytes(_) => Value::Bytes(span.to_vec()),
                FieldKind::U8 => Value::U8(span[0]),
                FieldKind::U16 => Value::U16(match order {
                    ByteOrder::Little => u16::from_le_bytes([span[0], span[1]]),
                    ByteOrder::Big => u16::from_be_bytes([span[0], span[1]]),
                }),
            };

            let value = match self.transforms.get(field.name) {
                Some(transform) => transform
                    .decode(raw)
                    .map_err(|_| CodecError::decode(field.name, span))?,
                None => raw,
            };
            record.set(field.name, value);
        }

        Ok(record)
    }

    /// Encode a record back into bytes.
    ///
    /// For each field in layout order the registered encode transform (or
    /// identity) is applied, then the wire value is rendered at the field's
    /// declared width. A record produced by [`unpack`](Self::unpack) and
    /// left unmutated reproduces the original buffer exactly.
    pub fn pack(&self, record: &Record) -> Result<Vec<u8>, CodecError> {
        let order = self.layout.byte_order();
        let mut buffer = Vec::with_capacity(self.layout.size());

        for field in self.layout.fields() {
            let value = record
                .get(field.name)
                .ok_or(CodecError::MissingField { field: field.name })?;

            let wire = match self.transforms.get(field.name) {
                Some(transform) => transform
                    .encode(value.clone())
                    .map_err(|e| CodecError::encode(field.name, e.to_string()))?,
                None => value.clone(),
            };

            let width = field.kind.width();
            match wire {
                Value::Bytes(bytes) => {
                    if bytes.len() != width {
                        return Err(CodecError::WidthMismatch {
                            field: field.name,
                            expected: width,
                            actual: bytes.len(),
                        });
                    }
                    buffer.extend_from_slice(&bytes);
                }
                Value::U8(v) => {
                    if width != 1 {
                        return Err(CodecError::WidthMismatch {
                            field: field.name,
                            expected: width,
                            actual: 1,
                        });
                    }
                    buffer.push(v);
                }
                Value::U16(v) => {
                    if width != 2 {
                        return Err(CodecError::WidthMismatch {
                            field: field.name,
                            expected: width,
                            actual: 2,
                        });
                    }
                    buffer.extend_from_slice(&match order {
                        ByteOrder::Little => v.to_le_bytes(),
                        ByteOrder::Big => v.to_be_bytes(),
                    });
                }
                Value::Text(_) | Value::Sym(_) => {
                    return Err(CodecError::encode(
                        field.name,
                        format!(
                            "{} value reached the wire without an encode transform",
                            wire.kind_name()
                        ),
                    ));
                }
            }
        }

        debug_assert_eq!(buffer.len(), self.layout.size());
        Ok(buffer)
    }
}

#[cfg(test)]
#[path = "tests/codec_tests.rs"]
mod tests;
