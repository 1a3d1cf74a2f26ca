use crate::utils::encoding::base64_encode_standard;
use log::warn;

/// Character encoding used by a string field
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum StringEncoding {
    /// UTF16LE
    Unicode,
    /// Single byte codepage string. Bytes map directly to U+0000 through U+00FF
    Ansi,
}

/// Decode UTF16LE bytes. A trailing odd byte is ignored
pub(crate) fn decode_utf16_string(data: &[u8]) -> String {
    let min_byte_size = 2;
    let utf16_data: Vec<u16> = data
        .chunks_exact(min_byte_size)
        .map(|wide_char| u16::from_le_bytes([wide_char[0], wide_char[1]]))
        .collect();

    decode_utf16_units(&utf16_data)
}

/// Decode UTF16 units. Unpaired surrogates become U+FFFD
pub(crate) fn decode_utf16_units(data: &[u16]) -> String {
    match String::from_utf16(data) {
        Ok(result) => result,
        Err(err) => {
            warn!("[strings] UTF16 string has unpaired surrogates: {err:?}");
            String::from_utf16_lossy(data)
        }
    }
}

/// Decode single byte string data. Every byte value is a valid character so nothing is lost
pub(crate) fn decode_latin1_string(data: &[u8]) -> String {
    data.iter().map(|byte| *byte as char).collect()
}

/// Check if every character can be stored in a single byte string
pub(crate) fn is_latin1(value: &str) -> bool {
    value.chars().all(|character| (character as u32) <= 0xff)
}

/// Get a UTF16 string from fixed size data. Stops at the first end of string character
pub(crate) fn extract_utf16_string(data: &[u8]) -> String {
    let mut utf16_data: Vec<u16> = Vec::new();
    let min_byte_size = 2;
    for wide_char in data.chunks_exact(min_byte_size) {
        let unit = u16::from_le_bytes([wide_char[0], wide_char[1]]);
        if unit == 0 {
            break;
        }
        utf16_data.push(unit);
    }

    decode_utf16_units(&utf16_data)
}

/// Get a single byte string from fixed size data. Stops at the first end of string character
pub(crate) fn extract_latin1_string(data: &[u8]) -> String {
    let end = data.iter().position(|byte| *byte == 0).unwrap_or(data.len());
    decode_latin1_string(&data[..end])
}

/// Get a UTF8 string from fixed size data padded with end of string characters. Invalid UTF8 is base64 encoded
pub(crate) fn extract_utf8_string(data: &[u8]) -> String {
    let end = data.iter().position(|byte| *byte == 0).unwrap_or(data.len());
    match String::from_utf8(data[..end].to_vec()) {
        Ok(result) => result,
        Err(err) => {
            warn!("[strings] Failed to get UTF8 string: {err:?}");
            base64_encode_standard(data)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::strings::{
        decode_latin1_string, decode_utf16_string, extract_latin1_string, extract_utf16_string,
        extract_utf8_string, is_latin1,
    };

    #[test]
    fn test_decode_utf16_string() {
        let test = [82, 0, 117, 0, 115, 0, 116, 0];
        assert_eq!(decode_utf16_string(&test), "Rust");
    }

    #[test]
    fn test_decode_utf16_string_lone_surrogate() {
        assert_eq!(decode_utf16_string(&[0, 216, 66, 0]), "\u{fffd}B");
        assert_eq!(decode_utf16_string(&[82, 0, 117]), "R");
    }

    #[test]
    fn test_decode_latin1_string() {
        let test = [67, 97, 102, 233, 255];
        assert_eq!(decode_latin1_string(&test), "Café\u{ff}");
    }

    #[test]
    fn test_is_latin1() {
        assert!(is_latin1("C:\\Café"));
        assert!(!is_latin1("C:\\日本"));
    }

    #[test]
    fn test_extract_utf16_string() {
        let test = [
            67, 0, 58, 0, 92, 0, 87, 0, 105, 0, 110, 0, 100, 0, 111, 0, 119, 0, 115, 0, 0, 0, 65,
            0,
        ];
        assert_eq!(extract_utf16_string(&test), "C:\\Windows");
    }

    #[test]
    fn test_extract_utf16_string_lone_surrogate() {
        let test = [0, 216, 0, 0];
        assert_eq!(extract_utf16_string(&test), "\u{fffd}");
    }

    #[test]
    fn test_extract_utf8_string() {
        let test = [
            100, 101, 115, 107, 116, 111, 112, 45, 101, 105, 115, 57, 51, 56, 110, 0, 0, 0,
        ];
        assert_eq!(extract_utf8_string(&test), "desktop-eis938n");
    }

    #[test]
    fn test_extract_latin1_string() {
        let test = [67, 58, 92, 233, 0, 0, 65];
        assert_eq!(extract_latin1_string(&test), "C:\\é");
    }
}
