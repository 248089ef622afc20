//! Declarative byte layouts.
//!
//! A [`ByteLayout`] is pure data: an ordered list of named, fixed-width
//! fields plus a byte order. The engine in [`crate::codec`] interprets it;
//! adding a new binary format means declaring a new layout, not touching
//! the engine.

use serde::Serialize;

/// Byte order for multi-byte integer fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ByteOrder {
    Little,
    Big,
}

/// The wire shape of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    /// Opaque byte string of the given fixed length.
    Bytes(usize),
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer in the layout's byte order.
    U16,
}

impl FieldKind {
    /// Width of this field on the wire, in bytes.
    pub fn width(&self) -> usize {
        match self {
            Self::Bytes(n) => *n,
            Self::U8 => 1,
            Self::U16 => 2,
        }
    }
}

/// One named, fixed-width field in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// An ordered sequence of fields with a declared byte order.
///
/// Immutable once constructed. Field order is significant: it is the
/// order spans are cut from the buffer on unpack and concatenated on pack.
#[derive(Debug, Clone, Serialize)]
pub struct ByteLayout {
    order: ByteOrder,
    fields: Vec<FieldSpec>,
    size: usize,
}

impl ByteLayout {
    /// Build a layout from an ordered field list.
    ///
    /// # Panics
    /// Panics if two fields share a name. Layouts are static declarations,
    /// so a duplicate is a programmer error rather than a runtime condition.
    pub fn new(order: ByteOrder, fields: Vec<FieldSpec>) -> Self {
        for (i, field) in fields.iter().enumerate() {
            assert!(
                !fields[..i].iter().any(|f| f.name == field.name),
                "duplicate field name `{}` in layout",
                field.name
            );
        }
        let size = fields.iter().map(|f| f.kind.width()).sum();
        Self {
            order,
            fields,
            size,
        }
    }

    /// Total byte width of the layout.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_widths() {
        assert_eq!(FieldKind::Bytes(48).width(), 48);
        assert_eq!(FieldKind::U8.width(), 1);
        assert_eq!(FieldKind::U16.width(), 2);
    }

    #[test]
    fn test_layout_size_is_sum_of_widths() {
        let layout = ByteLayout::new(
            ByteOrder::Little,
            vec![
                FieldSpec::new("magic", FieldKind::Bytes(4)),
                FieldSpec::new("version", FieldKind::U8),
                FieldSpec::new("count", FieldKind::U16),
            ],
        );
        assert_eq!(layout.size(), 7);
        assert_eq!(layout.fields().len(), 3);
    }

    #[test]
    #[should_panic(expected = "duplicate field name")]
    fn test_duplicate_names_panic() {
        ByteLayout::new(
            ByteOrder::Little,
            vec![
                FieldSpec::new("a", FieldKind::U8),
                FieldSpec::new("a", FieldKind::U16),
            ],
        );
    }
}
