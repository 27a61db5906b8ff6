//! Input decoding: turn raw file bytes into text.
//!
//! Encodings are tried in a fixed order, falling through on decode errors:
//!   - UTF-8 (a leading byte order mark is stripped)
//!   - UTF-16 (byte order mark selects the byte order, little-endian
//!     when absent; an odd byte count or an unpaired surrogate fails)
//!   - windows-1251 (0x98 is unassigned and fails)
//!
//! The order matters: ASCII-only windows-1251 text is also valid UTF-8,
//! so it decodes on the first attempt with the same result.

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Mapping for windows-1251 bytes 0x80..=0xFF.
///
/// The 0x98 slot is unassigned in the code page; decode rejects that byte
/// before the lookup, so its placeholder entry is never read.
const WINDOWS_1251: [char; 128] = [
    '\u{0402}', '\u{0403}', '\u{201A}', '\u{0453}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{20AC}', '\u{2030}', '\u{0409}', '\u{2039}', '\u{040A}', '\u{040C}', '\u{040B}', '\u{040F}',
    '\u{0452}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{FFFD}', '\u{2122}', '\u{0459}', '\u{203A}', '\u{045A}', '\u{045C}', '\u{045B}', '\u{045F}',
    '\u{00A0}', '\u{040E}', '\u{045E}', '\u{0408}', '\u{00A4}', '\u{0490}', '\u{00A6}', '\u{00A7}',
    '\u{0401}', '\u{00A9}', '\u{0404}', '\u{00AB}', '\u{00AC}', '\u{00AD}', '\u{00AE}', '\u{0407}',
    '\u{00B0}', '\u{00B1}', '\u{0406}', '\u{0456}', '\u{0491}', '\u{00B5}', '\u{00B6}', '\u{00B7}',
    '\u{0451}', '\u{2116}', '\u{0454}', '\u{00BB}', '\u{0458}', '\u{0405}', '\u{0455}', '\u{0457}',
    '\u{0410}', '\u{0411}', '\u{0412}', '\u{0413}', '\u{0414}', '\u{0415}', '\u{0416}', '\u{0417}',
    '\u{0418}', '\u{0419}', '\u{041A}', '\u{041B}', '\u{041C}', '\u{041D}', '\u{041E}', '\u{041F}',
    '\u{0420}', '\u{0421}', '\u{0422}', '\u{0423}', '\u{0424}', '\u{0425}', '\u{0426}', '\u{0427}',
    '\u{0428}', '\u{0429}', '\u{042A}', '\u{042B}', '\u{042C}', '\u{042D}', '\u{042E}', '\u{042F}',
    '\u{0430}', '\u{0431}', '\u{0432}', '\u{0433}', '\u{0434}', '\u{0435}', '\u{0436}', '\u{0437}',
    '\u{0438}', '\u{0439}', '\u{043A}', '\u{043B}', '\u{043C}', '\u{043D}', '\u{043E}', '\u{043F}',
    '\u{0440}', '\u{0441}', '\u{0442}', '\u{0443}', '\u{0444}', '\u{0445}', '\u{0446}', '\u{0447}',
    '\u{0448}', '\u{0449}', '\u{044A}', '\u{044B}', '\u{044C}', '\u{044D}', '\u{044E}', '\u{044F}',
];

/// Decode raw input bytes, trying UTF-8, UTF-16, and windows-1251 in turn.
pub fn decode(bytes: &[u8]) -> Result<String, String> {
    if let Ok(text) = decode_utf8(bytes) {
        return Ok(text);
    }
    if let Ok(text) = decode_utf16(bytes) {
        return Ok(text);
    }
    decode_windows_1251(bytes)
}

fn decode_utf8(bytes: &[u8]) -> Result<String, String> {
    let body = match bytes.strip_prefix(&UTF8_BOM) {
        Some(rest) => rest,
        None => bytes,
    };
    std::str::from_utf8(body)
        .map(str::to_string)
        .map_err(|e| format!("invalid UTF-8: {}", e))
}

fn decode_utf16(bytes: &[u8]) -> Result<String, String> {
    let (body, big_endian) = if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
        (rest, false)
    } else if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
        (rest, true)
    } else {
        (bytes, false)
    };

    if body.len() % 2 != 0 {
        return Err("odd number of UTF-16 bytes".to_string());
    }

    let units = body.chunks_exact(2).map(|pair| {
        if big_endian {
            u16::from_be_bytes([pair[0], pair[1]])
        } else {
            u16::from_le_bytes([pair[0], pair[1]])
        }
    });

    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|e| format!("invalid UTF-16: {}", e))
}

fn decode_windows_1251(bytes: &[u8]) -> Result<String, String> {
    let mut text = String::with_capacity(bytes.len());
    for (offset, &b) in bytes.iter().enumerate() {
        if b < 0x80 {
            text.push(b as char);
        } else if b == 0x98 {
            return Err(format!(
                "byte 0x98 at offset {} is unassigned in windows-1251",
                offset
            ));
        } else {
            text.push(WINDOWS_1251[(b - 0x80) as usize]);
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_plain() {
        assert_eq!(decode(b"const A = 1;").unwrap(), "const A = 1;");
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let bytes = [0xEF, 0xBB, 0xBF, b'o', b'k'];
        assert_eq!(decode(&bytes).unwrap(), "ok");
    }

    #[test]
    fn test_utf16_le_bom() {
        let bytes = [0xFF, 0xFE, b'h', 0x00, b'i', 0x00];
        assert_eq!(decode(&bytes).unwrap(), "hi");
    }

    #[test]
    fn test_utf16_be_bom() {
        let bytes = [0xFE, 0xFF, 0x00, b'h', 0x00, b'i'];
        assert_eq!(decode(&bytes).unwrap(), "hi");
    }

    #[test]
    fn test_utf16_without_bom_is_little_endian() {
        // The low bytes are lone continuation bytes, so UTF-8 fails first.
        let bytes = [0x98, 0x04, 0x99, 0x04];
        assert_eq!(decode(&bytes).unwrap(), "Ҙҙ");
    }

    #[test]
    fn test_windows_1251_cyrillic() {
        // "привет" in cp1251; the odd length also rules out UTF-16.
        let bytes = [0xEF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2, b'!'];
        assert_eq!(decode(&bytes).unwrap(), "привет!");
    }

    #[test]
    fn test_windows_1251_unassigned_byte_fails() {
        let bytes = [0xE0, 0x98, 0xE0];
        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn test_ascii_survives_every_stage() {
        let text = "const PORT = 8080;";
        assert_eq!(decode_windows_1251(text.as_bytes()).unwrap(), text);
    }
}
