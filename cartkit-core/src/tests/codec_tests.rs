use super::*;
use crate::error::CodecError;
use crate::layout::{ByteLayout, ByteOrder, FieldKind, FieldSpec};
use crate::transform::{Transform, TransformError, TransformMap};
use crate::value::{EnumSym, Value};

/// A small three-field layout: 4-byte magic, 1-byte mode, 2-byte count.
fn plain_layout(order: ByteOrder) -> ByteLayout {
    ByteLayout::new(
        order,
        vec![
            FieldSpec::new("magic", FieldKind::Bytes(4)),
            FieldSpec::new("mode", FieldKind::U8),
            FieldSpec::new("count", FieldKind::U16),
        ],
    )
}

/// A mode transform mapping 0 -> "off" and 1 -> "on", rejecting the rest.
fn mode_transform() -> Transform {
    Transform::new(
        |v| {
            let tag = v.as_u8().ok_or(TransformError::WrongKind {
                expected: "u8",
                actual: v.kind_name(),
            })?;
            match tag {
                0 => Ok(Value::Sym(EnumSym::new("off", 0))),
                1 => Ok(Value::Sym(EnumSym::new("on", 1))),
                other => Err(TransformError::UnknownTag(other as u16)),
            }
        },
        |v| {
            let sym = v.as_sym().ok_or(TransformError::WrongKind {
                expected: "symbol",
                actual: v.kind_name(),
            })?;
            Ok(Value::U8(sym.tag as u8))
        },
    )
}

#[test]
fn test_roundtrip_without_transforms() {
    let codec = StructCodec::new(plain_layout(ByteOrder::Little), TransformMap::new());
    let buf = [0x52, 0x4F, 0x4D, 0x00, 0x02, 0x34, 0x12];
    let record = codec.unpack(&buf).unwrap();

    assert_eq!(
        record.get("magic").unwrap().as_bytes().unwrap(),
        &[0x52, 0x4F, 0x4D, 0x00]
    );
    assert_eq!(record.get("mode").unwrap().as_u8(), Some(0x02));
    assert_eq!(record.get("count").unwrap().as_u16(), Some(0x1234));

    assert_eq!(codec.pack(&record).unwrap(), buf);
}

#[test]
fn test_big_endian_u16() {
    let codec = StructCodec::new(plain_layout(ByteOrder::Big), TransformMap::new());
    let buf = [0x52, 0x4F, 0x4D, 0x00, 0x02, 0x12, 0x34];
    let record = codec.unpack(&buf).unwrap();
    assert_eq!(record.get("count").unwrap().as_u16(), Some(0x1234));
    assert_eq!(codec.pack(&record).unwrap(), buf);
}

#[test]
fn test_size_mismatch() {
    let codec = StructCodec::new(plain_layout(ByteOrder::Little), TransformMap::new());
    let err = codec.unpack(&[0u8; 6]).unwrap_err();
    assert!(matches!(
        err,
        CodecError::SizeMismatch {
            expected: 7,
            actual: 6
        }
    ));
    let err = codec.unpack(&[0u8; 8]).unwrap_err();
    assert!(matches!(err, CodecError::SizeMismatch { .. }));
}

#[test]
fn test_transform_roundtrip() {
    let transforms = TransformMap::new().with("mode", mode_transform());
    let codec = StructCodec::new(plain_layout(ByteOrder::Little), transforms);
    let buf = [0xAA, 0xBB, 0xCC, 0xDD, 0x01, 0x00, 0x00];

    let record = codec.unpack(&buf).unwrap();
    let sym = record.get("mode").unwrap().as_sym().unwrap();
    assert_eq!(sym.name, "on");
    assert_eq!(sym.tag, 1);

    assert_eq!(codec.pack(&record).unwrap(), buf);
}

#[test]
fn test_decode_rejection_names_field_and_byte() {
    let transforms = TransformMap::new().with("mode", mode_transform());
    let codec = StructCodec::new(plain_layout(ByteOrder::Little), transforms);
    let buf = [0xAA, 0xBB, 0xCC, 0xDD, 0x07, 0x00, 0x00];

    match codec.unpack(&buf).unwrap_err() {
        CodecError::Decode { field, raw } => {
            assert_eq!(field, "mode");
            assert_eq!(raw, "07");
        }
        other => panic!("expected Decode error, got {other:?}"),
    }
}

#[test]
fn test_idempotent_reencode() {
    let transforms = TransformMap::new().with("mode", mode_transform());
    let codec = StructCodec::new(plain_layout(ByteOrder::Little), transforms);
    let buf = [0x00, 0x11, 0x22, 0x33, 0x00, 0xFE, 0xFF];

    let record = codec.unpack(&buf).unwrap();
    let first = codec.pack(&record).unwrap();
    let second = codec.pack(&record).unwrap();
    assert_eq!(first, buf);
    assert_eq!(first, second);
}

#[test]
fn test_width_mismatch_from_bad_encoder() {
    // Encoder that deliberately emits 3 bytes for a 4-byte field.
    let broken = Transform::new(
        |v| Ok(v),
        |_| Ok(Value::Bytes(vec![0x00, 0x01, 0x02])),
    );
    let transforms = TransformMap::new().with("magic", broken);
    let codec = StructCodec::new(plain_layout(ByteOrder::Little), transforms);

    let record = codec.unpack(&[0u8; 7]).unwrap();
    match codec.pack(&record).unwrap_err() {
        CodecError::WidthMismatch {
            field,
            expected,
            actual,
        } => {
            assert_eq!(field, "magic");
            assert_eq!(expected, 4);
            assert_eq!(actual, 3);
        }
        other => panic!("expected WidthMismatch, got {other:?}"),
    }
}

#[test]
fn test_missing_field_on_pack() {
    let codec = StructCodec::new(plain_layout(ByteOrder::Little), TransformMap::new());
    let mut record = Record::new();
    record.set("magic", Value::Bytes(vec![0; 4]));
    record.set("mode", Value::U8(0));
    // "count" never set

    assert!(matches!(
        codec.pack(&record).unwrap_err(),
        CodecError::MissingField { field: "count" }
    ));
}

#[test]
fn test_text_without_encoder_is_rejected() {
    let codec = StructCodec::new(plain_layout(ByteOrder::Little), TransformMap::new());
    let mut record = codec.unpack(&[0u8; 7]).unwrap();
    record.set("magic", Value::Text("ROM".into()));

    assert!(matches!(
        codec.pack(&record).unwrap_err(),
        CodecError::Encode { field: "magic", .. }
    ));
}

#[test]
fn test_mutate_then_pack() {
    let codec = StructCodec::new(plain_layout(ByteOrder::Little), TransformMap::new());
    let mut record = codec.unpack(&[0u8; 7]).unwrap();
    record.set("count", Value::U16(0xBEEF));

    let packed = codec.pack(&record).unwrap();
    assert_eq!(&packed[5..7], &[0xEF, 0xBE]);
}

#[test]
fn test_record_preserves_layout_order() {
    let codec = StructCodec::new(plain_layout(ByteOrder::Little), TransformMap::new());
    let record = codec.unpack(&[0u8; 7]).unwrap();
    let names: Vec<_> = record.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["magic", "mode", "count"]);
}

#[test]
fn test_record_serializes() {
    let codec = StructCodec::new(plain_layout(ByteOrder::Little), TransformMap::new());
    let record = codec.unpack(&[0x41, 0x42, 0x43, 0x44, 0x05, 0x01, 0x00]).unwrap();
    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains("magic"));
    assert!(json.contains("count"));
}
