//! Code page 437 text conversion.
//!
//! Game Boy title fields are nominally upper-case ASCII, but the character
//! set the hardware font covers overlaps CP437, and at least one licensed
//! image (Gluecksrad) stores a 0x80 byte in its title. Decoding the full
//! code page keeps such titles readable and, more importantly, keeps the
//! decode/encode pair an exact inverse over every byte value.
//!
//! The low half (0x00–0x7F) maps straight to ASCII, control codes
//! included. The high half is the canonical CP437 glyph table.

/// Glyphs for bytes 0x80–0xFF.
const HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å', // 0x80
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ', // 0x90
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»', // 0xA0
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐', // 0xB0
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧', // 0xC0
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀', // 0xD0
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩', // 0xE0
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{00A0}', // 0xF0
];

/// Decode a single CP437 byte. Total: every byte value has a glyph.
pub fn decode_byte(byte: u8) -> char {
    if byte < 0x80 {
        byte as char
    } else {
        HIGH[(byte - 0x80) as usize]
    }
}

/// Encode a single character to CP437, or `None` if it has no slot.
pub fn encode_char(c: char) -> Option<u8> {
    if (c as u32) < 0x80 {
        return Some(c as u8);
    }
    HIGH.iter()
        .position(|&glyph| glyph == c)
        .map(|i| (i + 0x80) as u8)
}

/// Decode a byte slice to a string.
pub fn decode(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| decode_byte(b)).collect()
}

/// Encode a string to CP437 bytes, or `None` at the first unmappable char.
pub fn encode(s: &str) -> Option<Vec<u8>> {
    s.chars().map(encode_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passthrough() {
        assert_eq!(decode_byte(b'A'), 'A');
        assert_eq!(decode_byte(0x00), '\0');
        assert_eq!(encode_char('Z'), Some(b'Z'));
        assert_eq!(encode_char(' '), Some(0x20));
    }

    #[test]
    fn test_high_glyphs() {
        assert_eq!(decode_byte(0x80), 'Ç');
        assert_eq!(decode_byte(0x9B), '¢');
        assert_eq!(decode_byte(0xE1), 'ß');
        assert_eq!(decode_byte(0xFF), '\u{00A0}');
        assert_eq!(encode_char('Ç'), Some(0x80));
        assert_eq!(encode_char('ß'), Some(0xE1));
    }

    #[test]
    fn test_unmappable() {
        assert_eq!(encode_char('€'), None);
        assert_eq!(encode("日本"), None);
    }

    #[test]
    fn test_roundtrip_all_bytes() {
        for b in 0u16..=255 {
            let b = b as u8;
            assert_eq!(encode_char(decode_byte(b)), Some(b), "byte {b:#04X}");
        }
    }

    #[test]
    fn test_decode_string() {
        assert_eq!(decode(b"GLUECKSRAD"), "GLUECKSRAD");
        assert_eq!(encode("TEST ROM").unwrap(), b"TEST ROM");
    }
}
