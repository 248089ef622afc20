//! Game Boy cartridge-header format.
//!
//! Declares the 80-byte header structure found at ROM offset 0x100 as a
//! [`ByteLayout`] plus per-field transforms, and layers the header-specific
//! operations on top: reading from a byte source, the boot-ROM checksum,
//! and quick identification.
//!
//! Field reference (offsets relative to the header):
//!
//! | offset | width | field |
//! |--------|-------|-------|
//! | 0x00   | 4     | entry point |
//! | 0x04   | 48    | Nintendo logo bitmap |
//! | 0x34   | 16    | title, CP437, NUL-padded |
//! | 0x44   | 2     | new licensee code |
//! | 0x46   | 1     | SGB flag |
//! | 0x47   | 1     | cartridge type |
//! | 0x48   | 1     | ROM size code |
//! | 0x49   | 1     | RAM size code |
//! | 0x4A   | 1     | destination code |
//! | 0x4B   | 1     | old licensee code |
//! | 0x4C   | 1     | mask ROM version |
//! | 0x4D   | 1     | header checksum |
//! | 0x4E   | 2     | global checksum (LE) |

use std::io::SeekFrom;

use log::{debug, warn};

use cartkit_core::{
    ByteLayout, ByteOrder, CodecError, EnumSym, FieldKind, FieldSpec, FormatInfo, HeaderFormat,
    ReadSeek, Record, StructCodec, Transform, TransformError, TransformMap, Value,
};

use crate::cp437;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// File offset where the header begins.
pub const HEADER_OFFSET: u64 = 0x100;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 0x50;

/// Header-relative range the boot checksum covers: title through
/// mask ROM version, 25 bytes.
const CHECKSUM_SPAN: std::ops::RangeInclusive<usize> = 0x34..=0x4C;

/// File offset of the first checksummed byte.
const CHECKSUM_SPAN_OFFSET: u64 = 0x134;

/// Wire width of the title field.
const TITLE_WIDTH: usize = 16;

// ---------------------------------------------------------------------------
// Enumerated fields
// ---------------------------------------------------------------------------

/// ROM size code at header offset 0x48.
///
/// Extended-but-closed set: besides the standard power-of-two codes and the
/// 0x52–0x54 oddballs, it includes the nonstandard tags observed on known
/// unlicensed cartridges. Any other byte fails decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomSize {
    Kb32 = 0x00,
    Kb64 = 0x01,
    Kb128 = 0x02,
    Kb256 = 0x03,
    Kb512 = 0x04,
    Mb1 = 0x05,
    Mb2 = 0x06,
    Mb4 = 0x07,
    Mb1p1 = 0x52,
    Mb1p2 = 0x53,
    Mb1p5 = 0x54,
    /// 4 in 1 (Europe) (Sachen)
    Sachen4In1 = 0x0D,
    /// Pro Action Replay (Europe)
    ProActionReplay = 0xFF,
}

impl RomSize {
    /// All declared variants, in tag order.
    pub const ALL: &'static [RomSize] = &[
        Self::Kb32,
        Self::Kb64,
        Self::Kb128,
        Self::Kb256,
        Self::Kb512,
        Self::Mb1,
        Self::Mb2,
        Self::Mb4,
        Self::Sachen4In1,
        Self::Mb1p1,
        Self::Mb1p2,
        Self::Mb1p5,
        Self::ProActionReplay,
    ];

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.tag() == tag)
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Kb32 => "32 KB",
            Self::Kb64 => "64 KB",
            Self::Kb128 => "128 KB",
            Self::Kb256 => "256 KB",
            Self::Kb512 => "512 KB",
            Self::Mb1 => "1 MB",
            Self::Mb2 => "2 MB",
            Self::Mb4 => "4 MB",
            Self::Mb1p1 => "1.1 MB",
            Self::Mb1p2 => "1.2 MB",
            Self::Mb1p5 => "1.5 MB",
            Self::Sachen4In1 => "Sachen 4-in-1",
            Self::ProActionReplay => "Pro Action Replay",
        }
    }

    /// Cartridge ROM capacity in bytes, where the code defines one.
    pub fn capacity(self) -> Option<u64> {
        match self {
            Self::Kb32 => Some(32 * 1024),
            Self::Kb64 => Some(64 * 1024),
            Self::Kb128 => Some(128 * 1024),
            Self::Kb256 => Some(256 * 1024),
            Self::Kb512 => Some(512 * 1024),
            Self::Mb1 => Some(1024 * 1024),
            Self::Mb2 => Some(2 * 1024 * 1024),
            Self::Mb4 => Some(4 * 1024 * 1024),
            Self::Mb1p1 => Some(1152 * 1024),
            Self::Mb1p2 => Some(1280 * 1024),
            Self::Mb1p5 => Some(1536 * 1024),
            Self::Sachen4In1 | Self::ProActionReplay => None,
        }
    }

    pub fn sym(self) -> EnumSym {
        EnumSym::new(self.name(), self.tag() as u16)
    }
}

/// RAM size code at header offset 0x49.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RamSize {
    None = 0x00,
    Kb2 = 0x01,
    Kb8 = 0x02,
    Kb32 = 0x03,
    /// Game Boy Camera
    Camera = 0x04,
    /// Beast Fighter (Taiwan) (Sachen)
    BeastFighter = 0x38,
    /// Pro Action Replay (Europe)
    ProActionReplay = 0xFF,
}

impl RamSize {
    pub const ALL: &'static [RamSize] = &[
        Self::None,
        Self::Kb2,
        Self::Kb8,
        Self::Kb32,
        Self::Camera,
        Self::BeastFighter,
        Self::ProActionReplay,
    ];

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.tag() == tag)
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Kb2 => "2 KB",
            Self::Kb8 => "8 KB",
            Self::Kb32 => "32 KB",
            Self::Camera => "Game Boy Camera",
            Self::BeastFighter => "Beast Fighter (Sachen)",
            Self::ProActionReplay => "Pro Action Replay",
        }
    }

    pub fn sym(self) -> EnumSym {
        EnumSym::new(self.name(), self.tag() as u16)
    }
}

/// Destination code at header offset 0x4A: 0 = Japan, 1 = overseas, plus
/// the nonstandard tags some unlicensed games use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationCode {
    Japan = 0x00,
    Overseas = 0x01,
    /// Beast Fighter (Taiwan) (Sachen)
    BeastFighter = 0x35,
    /// 4 in 1 (Europe) (Sachen)
    Sachen4In1 = 0x89,
    /// Pro Action Replay (Europe)
    ProActionReplay = 0xFF,
}

impl DestinationCode {
    pub const ALL: &'static [DestinationCode] = &[
        Self::Japan,
        Self::Overseas,
        Self::BeastFighter,
        Self::Sachen4In1,
        Self::ProActionReplay,
    ];

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.tag() == tag)
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Japan => "Japan",
            Self::Overseas => "Overseas",
            Self::BeastFighter => "Beast Fighter (Sachen)",
            Self::Sachen4In1 => "Sachen 4-in-1",
            Self::ProActionReplay => "Pro Action Replay",
        }
    }

    pub fn sym(self) -> EnumSym {
        EnumSym::new(self.name(), self.tag() as u16)
    }
}

// ---------------------------------------------------------------------------
// Layout and transforms
// ---------------------------------------------------------------------------

/// Declare the 80-byte header layout.
fn header_layout() -> ByteLayout {
    ByteLayout::new(
        ByteOrder::Little,
        vec![
            // usually 00 C3 50 01: NOP + JP 0x0150
            FieldSpec::new("begin", FieldKind::Bytes(4)),
            // must match the boot ROM's copy or the unit halts
            FieldSpec::new("nintendo_logo", FieldKind::Bytes(48)),
            FieldSpec::new("title", FieldKind::Bytes(16)),
            FieldSpec::new("licensee", FieldKind::Bytes(2)),
            FieldSpec::new("sgb_flag", FieldKind::U8),
            FieldSpec::new("cartridge_type", FieldKind::U8),
            FieldSpec::new("rom_size", FieldKind::U8),
            FieldSpec::new("ram_size", FieldKind::U8),
            FieldSpec::new("destination_code", FieldKind::U8),
            // 0x33 means "see licensee" (new code)
            FieldSpec::new("old_licensee", FieldKind::U8),
            FieldSpec::new("mask_rom_version", FieldKind::U8),
            FieldSpec::new("header_checksum", FieldKind::U8),
            FieldSpec::new("global_checksum", FieldKind::U16),
        ],
    )
}

fn expect_u8(value: &Value) -> Result<u8, TransformError> {
    value.as_u8().ok_or(TransformError::WrongKind {
        expected: "u8",
        actual: value.kind_name(),
    })
}

fn expect_sym(value: &Value) -> Result<EnumSym, TransformError> {
    value.as_sym().ok_or(TransformError::WrongKind {
        expected: "symbol",
        actual: value.kind_name(),
    })
}

/// Title bytes → text: CP437 decode, strip trailing NUL padding.
fn decode_title(value: Value) -> Result<Value, TransformError> {
    let bytes = value.as_bytes().ok_or(TransformError::WrongKind {
        expected: "bytes",
        actual: value.kind_name(),
    })?;
    let text = cp437::decode(bytes);
    Ok(Value::Text(text.trim_end_matches('\0').to_string()))
}

/// Text → title bytes: uppercase, CP437 encode, truncate or NUL-pad to 16.
fn encode_title(value: Value) -> Result<Value, TransformError> {
    let text = value.as_text().ok_or(TransformError::WrongKind {
        expected: "text",
        actual: value.kind_name(),
    })?;
    let mut bytes = Vec::with_capacity(TITLE_WIDTH);
    for c in text.chars().flat_map(char::to_uppercase) {
        if bytes.len() == TITLE_WIDTH {
            break;
        }
        bytes.push(cp437::encode_char(c).ok_or(TransformError::Unmappable(c))?);
    }
    bytes.resize(TITLE_WIDTH, 0);
    Ok(Value::Bytes(bytes))
}

/// Build a tag↔symbol transform around an enum's `from_tag`/`sym` pair.
fn enum_transform<T: 'static>(from_tag: fn(u8) -> Option<T>, sym: fn(T) -> EnumSym) -> Transform {
    Transform::new(
        move |v| {
            let tag = expect_u8(&v)?;
            from_tag(tag)
                .map(|variant| Value::Sym(sym(variant)))
                .ok_or(TransformError::UnknownTag(tag as u16))
        },
        |v| Ok(Value::U8(expect_sym(&v)?.tag as u8)),
    )
}

fn header_transforms() -> TransformMap {
    TransformMap::new()
        .with("title", Transform::new(decode_title, encode_title))
        .with("rom_size", enum_transform(RomSize::from_tag, RomSize::sym))
        .with("ram_size", enum_transform(RamSize::from_tag, RamSize::sym))
        .with(
            "destination_code",
            enum_transform(DestinationCode::from_tag, DestinationCode::sym),
        )
}

// ---------------------------------------------------------------------------
// Checksum
// ---------------------------------------------------------------------------

/// Boot-ROM header checksum over the 25 checksummed bytes:
/// `x = x - byte - 1` per byte, wrapping. Equivalent to
/// `(0 - sum - 25) mod 256`, the formula the hardware validates at boot.
fn header_checksum(data: &[u8]) -> u8 {
    let mut cksum: u8 = 0;
    for &b in data {
        cksum = cksum.wrapping_sub(b).wrapping_sub(1);
    }
    cksum
}

// ---------------------------------------------------------------------------
// Format
// ---------------------------------------------------------------------------

/// The Game Boy header format: layout, transforms, and header operations.
pub struct GameBoyFormat {
    codec: StructCodec,
}

impl Default for GameBoyFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoyFormat {
    pub fn new() -> Self {
        Self {
            codec: StructCodec::new(header_layout(), header_transforms()),
        }
    }

    /// Decode an 80-byte header buffer.
    pub fn parse_header(&self, data: &[u8]) -> Result<Record, CodecError> {
        self.codec.unpack(data)
    }

    /// Encode a header record back to its 80-byte wire form.
    pub fn generate_header(&self, record: &Record) -> Result<Vec<u8>, CodecError> {
        self.codec.pack(record)
    }

    /// Read and decode the header from its canonical offset (0x100).
    pub fn read_header(&self, source: &mut dyn ReadSeek) -> Result<Record, CodecError> {
        self.read_header_at(source, HEADER_OFFSET)
    }

    /// Read and decode the header from an arbitrary offset.
    pub fn read_header_at(
        &self,
        source: &mut dyn ReadSeek,
        offset: u64,
    ) -> Result<Record, CodecError> {
        debug!("reading Game Boy header at offset {offset:#X}");
        source.seek(SeekFrom::Start(offset))?;
        let mut buf = [0u8; HEADER_SIZE];
        source.read_exact(&mut buf)?;
        self.parse_header(&buf)
    }

    /// Recompute the header checksum from a record.
    ///
    /// The record is re-encoded first so the formula runs over the exact
    /// wire bytes, then the boot-ROM formula covers the title-through-
    /// mask-ROM-version span.
    pub fn compute_header_checksum(&self, record: &Record) -> Result<u8, CodecError> {
        let data = self.generate_header(record)?;
        Ok(header_checksum(&data[CHECKSUM_SPAN]))
    }

    /// Compare the stored header checksum against a recomputed one.
    ///
    /// A mismatch is a fact about the record, not an error: corrupt or
    /// patched ROMs are legal inputs.
    pub fn verify_checksum(&self, record: &Record) -> Result<bool, CodecError> {
        let stored = record
            .get("header_checksum")
            .and_then(Value::as_u8)
            .ok_or(CodecError::MissingField {
                field: "header_checksum",
            })?;
        Ok(self.compute_header_checksum(record)? == stored)
    }
}

impl HeaderFormat for GameBoyFormat {
    fn info(&self) -> FormatInfo {
        FormatInfo {
            key: "game_boy_a",
            title: "Game Boy Header",
            developer: "Nintendo",
            description: "Game Boy Header",
        }
    }

    fn codec(&self) -> &StructCodec {
        &self.codec
    }

    fn read_header(&self, source: &mut dyn ReadSeek) -> Result<Record, CodecError> {
        GameBoyFormat::read_header(self, source)
    }

    /// Check whether `source` carries a Game Boy header with a valid boot
    /// checksum.
    ///
    /// Reads the 25 checksummed bytes at 0x134 and the stored checksum at
    /// 0x14D, recomputes, and returns the comparison. (An earlier
    /// implementation of this check computed the comparison and dropped
    /// the negative result, reporting every file as valid.)
    fn identify(&self, source: &mut dyn ReadSeek) -> Result<bool, CodecError> {
        source.seek(SeekFrom::Start(CHECKSUM_SPAN_OFFSET))?;
        let mut data = [0u8; 25];
        source.read_exact(&mut data)?;
        let mut stored = [0u8; 1];
        source.read_exact(&mut stored)?;

        let calculated = header_checksum(&data);
        if calculated != stored[0] {
            warn!(
                "header checksum mismatch: stored {:#04X}, calculated {calculated:#04X}",
                stored[0]
            );
            return Ok(false);
        }
        Ok(true)
    }
}

#[cfg(test)]
#[path = "tests/gameboy_tests.rs"]
mod tests;
