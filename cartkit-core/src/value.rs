//! Decoded field values.

use serde::Serialize;

/// A decoded enumerated symbol.
///
/// Carries both the human-readable variant name and the raw integer tag it
/// was decoded from, so re-encoding is exact even for nonstandard tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnumSym {
    pub name: &'static str,
    pub tag: u16,
}

impl EnumSym {
    pub const fn new(name: &'static str, tag: u16) -> Self {
        Self { name, tag }
    }
}

/// One decoded field value.
///
/// `Bytes`, `U8`, and `U16` are the raw wire kinds the engine produces on
/// its own; `Text` and `Sym` only appear when a decode transform put them
/// there, and need a matching encode transform to get back to the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Value {
    /// Opaque fixed-length byte string.
    Bytes(Vec<u8>),
    /// Text decoded from a field via a code page.
    Text(String),
    /// Unsigned 8-bit integer.
    U8(u8),
    /// Unsigned 16-bit integer.
    U16(u16),
    /// Enumerated symbol.
    Sym(EnumSym),
}

impl Value {
    /// Short kind name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "bytes",
            Self::Text(_) => "text",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::Sym(_) => "symbol",
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Self::U8(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<u16> {
        match self {
            Self::U16(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_sym(&self) -> Option<EnumSym> {
        match self {
            Self::Sym(s) => Some(*s),
            _ => None,
        }
    }
}
