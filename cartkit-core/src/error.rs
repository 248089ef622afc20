use thiserror::Error;

/// Errors that can occur while decoding or encoding a fixed-layout structure.
///
/// A checksum that fails to verify is deliberately *not* represented here:
/// corrupt or patched images are legal inputs, so checksum status is
/// reported as data by the format, never raised as an error by the codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input buffer length does not match the layout's declared size.
    #[error("size mismatch: layout is {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A field's byte pattern has no valid domain value (e.g. an
    /// enumerated field whose tag is outside the declared set).
    #[error("field `{field}`: cannot decode raw value {raw}")]
    Decode { field: &'static str, raw: String },

    /// An encode transform produced the wrong number of bytes for its
    /// field. Indicates a broken transform, not bad input.
    #[error("field `{field}`: encoded to {actual} bytes, layout declares {expected}")]
    WidthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The record is missing a field the layout declares.
    #[error("record is missing field `{field}`")]
    MissingField { field: &'static str },

    /// A value could not be rendered to bytes at all (e.g. a text value
    /// reached the wire with no encode transform registered).
    #[error("field `{field}`: cannot encode value: {reason}")]
    Encode {
        field: &'static str,
        reason: String,
    },

    /// I/O error while reading from the byte source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Build a [`CodecError::Decode`] with the offending bytes rendered as hex.
    pub fn decode(field: &'static str, raw: &[u8]) -> Self {
        let raw = raw
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");
        Self::Decode { field, raw }
    }

    pub fn encode(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Encode {
            field,
            reason: reason.into(),
        }
    }
}
