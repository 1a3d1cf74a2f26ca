/**
 * When parsing binary formats often we parse X bytes and convert bytes to a number
 * With nom we can do that in two steps, ex:
 *   `take X bytes`
 *   `le_uX` to number
 *
 * These functions help reduce the repetitiveness of converting bytes to a number.
 * `Shortcut` data is always little endian
 *
 * A short read returns a nom `Error`. Data that is present but inconsistent returns a nom `Failure`
 */
use super::strings::{
    StringEncoding, decode_latin1_string, decode_utf16_string, decode_utf16_units,
};
use nom::{
    bytes::complete::{take, take_while},
    error::{Error, ErrorKind},
    number::complete::{le_i32, le_u8, le_u16, le_u32, le_u64},
};
use std::mem::size_of;
use uuid::Uuid;

/// Nom four (4) bytes to u32
pub(crate) fn nom_unsigned_four_bytes(data: &[u8]) -> nom::IResult<&[u8], u32> {
    let (input, value_data) = take(size_of::<u32>())(data)?;
    let (_, value) = le_u32(value_data)?;

    Ok((input, value))
}

/// Nom eight (8) bytes to u64
pub(crate) fn nom_unsigned_eight_bytes(data: &[u8]) -> nom::IResult<&[u8], u64> {
    let (input, value_data) = take(size_of::<u64>())(data)?;
    let (_, value) = le_u64(value_data)?;

    Ok((input, value))
}

/// Nom two (2) bytes to u16
pub(crate) fn nom_unsigned_two_bytes(data: &[u8]) -> nom::IResult<&[u8], u16> {
    let (input, value_data) = take(size_of::<u16>())(data)?;
    let (_, value) = le_u16(value_data)?;

    Ok((input, value))
}

/// Nom one (1) byte to u8
pub(crate) fn nom_unsigned_one_byte(data: &[u8]) -> nom::IResult<&[u8], u8> {
    let (input, value_data) = take(size_of::<u8>())(data)?;
    let (_, value) = le_u8(value_data)?;

    Ok((input, value))
}

/// Nom four (4) bytes to i32
pub(crate) fn nom_signed_four_bytes(data: &[u8]) -> nom::IResult<&[u8], i32> {
    let (input, value_data) = take(size_of::<i32>())(data)?;
    let (_, value) = le_i32(value_data)?;

    Ok((input, value))
}

/// Nom sixteen (16) bytes into a GUID. GUIDs are stored in the mixed endian layout
pub(crate) fn nom_guid(data: &[u8]) -> nom::IResult<&[u8], Uuid> {
    let (input, guid_data) = take(size_of::<u128>())(data)?;

    let mut bytes = [0; 16];
    bytes.copy_from_slice(guid_data);
    Ok((input, Uuid::from_bytes_le(bytes)))
}

/// Nom an arbitrary amount of data and return the bytes remaining and bytes nom'd
pub(crate) fn nom_data(data: &[u8], count: u64) -> nom::IResult<&[u8], &[u8]> {
    let (input, value) = take(count)(data)?;

    Ok((input, value))
}

/**
 * Nom a string prefixed with a two (2) byte count of characters. The count is in UTF16 units or bytes depending on encoding
 * No end of string character follows
 */
pub(crate) fn nom_length_prefixed_string<'a>(
    data: &'a [u8],
    encoding: &StringEncoding,
) -> nom::IResult<&'a [u8], String> {
    let (input, count) = nom_unsigned_two_bytes(data)?;

    match encoding {
        StringEncoding::Unicode => {
            // Size for UTF16 chars (2 bytes)
            let adjust_size = 2;
            let (input, string_data) = take(count as usize * adjust_size)(input)?;
            Ok((input, decode_utf16_string(string_data)))
        }
        StringEncoding::Ansi => {
            let (input, string_data) = take(count)(input)?;
            Ok((input, decode_latin1_string(string_data)))
        }
    }
}

/// Nom a string that ends with an end of string character. The end of string character is consumed but not returned
pub(crate) fn nom_null_terminated_string<'a>(
    data: &'a [u8],
    encoding: &StringEncoding,
) -> nom::IResult<&'a [u8], String> {
    match encoding {
        StringEncoding::Ansi => {
            let end_of_string = 0;
            let (input, string_data) = take_while(|b| b != end_of_string)(data)?;
            let (input, _end) = nom_unsigned_one_byte(input)?;
            Ok((input, decode_latin1_string(string_data)))
        }
        StringEncoding::Unicode => {
            let mut input = data;
            let mut units = Vec::new();
            loop {
                let (remaining, unit) = nom_unsigned_two_bytes(input)?;
                input = remaining;
                if unit == 0 {
                    break;
                }
                units.push(unit);
            }
            Ok((input, decode_utf16_units(&units)))
        }
    }
}

/// Return a nom `Failure`. Used when data is present but does not follow the format
pub(crate) fn malformed<T>(data: &[u8]) -> nom::IResult<&[u8], T> {
    Err(nom::Err::Failure(Error::new(data, ErrorKind::Verify)))
}

#[cfg(test)]
mod tests {
    use crate::utils::nom_helper::{
        StringEncoding, nom_data, nom_guid, nom_length_prefixed_string,
        nom_null_terminated_string, nom_signed_four_bytes, nom_unsigned_eight_bytes,
        nom_unsigned_four_bytes, nom_unsigned_one_byte, nom_unsigned_two_bytes,
    };

    #[test]
    fn test_nom_signed_four_bytes() {
        let test = [254, 255, 255, 255];
        let (_, results) = nom_signed_four_bytes(&test).unwrap();
        assert_eq!(results, -2);
    }

    #[test]
    fn test_nom_data() {
        let test = [2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let (remaining, results) = nom_data(&test, 3).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(remaining.len(), 13);
    }

    #[test]
    fn test_nom_unsigned_four_bytes() {
        let test = [2, 0, 0, 0];
        let (_, results) = nom_unsigned_four_bytes(&test).unwrap();
        assert_eq!(results, 2);
    }

    #[test]
    fn test_nom_unsigned_eight_bytes() {
        let test = [0, 0, 0, 0, 0, 0, 0, 2];
        let (_, results) = nom_unsigned_eight_bytes(&test).unwrap();
        assert_eq!(results, 0x0200000000000000);
    }

    #[test]
    fn test_nom_unsigned_two_bytes() {
        let test = [76, 1];
        let (_, results) = nom_unsigned_two_bytes(&test).unwrap();
        assert_eq!(results, 332);
    }

    #[test]
    fn test_nom_unsigned_one_byte() {
        let test = [2];
        let (_, results) = nom_unsigned_one_byte(&test).unwrap();
        assert_eq!(results, 2);
    }

    #[test]
    fn test_short_read() {
        let test = [2, 0, 0];
        let result = nom_unsigned_four_bytes(&test);
        assert!(matches!(result, Err(nom::Err::Error(_))));
    }

    #[test]
    fn test_nom_guid() {
        let test = [1, 20, 2, 0, 0, 0, 0, 0, 192, 0, 0, 0, 0, 0, 0, 70];
        let (_, guid) = nom_guid(&test).unwrap();
        assert_eq!(
            guid.hyphenated().to_string(),
            "00021401-0000-0000-c000-000000000046"
        );
    }

    #[test]
    fn test_nom_length_prefixed_string_unicode() {
        let test = [4, 0, 82, 0, 117, 0, 115, 0, 116, 0, 9, 9];
        let (remaining, value) =
            nom_length_prefixed_string(&test, &StringEncoding::Unicode).unwrap();
        assert_eq!(value, "Rust");
        assert_eq!(remaining, [9, 9]);
    }

    #[test]
    fn test_nom_length_prefixed_string_ansi() {
        let test = [3, 0, 47, 99, 233];
        let (_, value) = nom_length_prefixed_string(&test, &StringEncoding::Ansi).unwrap();
        assert_eq!(value, "/cé");
    }

    #[test]
    fn test_lone_surrogate() {
        let test = [2, 0, 0, 216, 66, 0, 9];
        let (remaining, value) =
            nom_length_prefixed_string(&test, &StringEncoding::Unicode).unwrap();
        assert_eq!(value, "\u{fffd}B");
        assert_eq!(remaining, [9]);

        let test = [0, 220, 0, 0];
        let (remaining, value) =
            nom_null_terminated_string(&test, &StringEncoding::Unicode).unwrap();
        assert_eq!(value, "\u{fffd}");
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_nom_null_terminated_string() {
        let test = [67, 58, 92, 0, 1];
        let (remaining, value) = nom_null_terminated_string(&test, &StringEncoding::Ansi).unwrap();
        assert_eq!(value, "C:\\");
        assert_eq!(remaining, [1]);

        let test = [67, 0, 58, 0, 0, 0];
        let (remaining, value) =
            nom_null_terminated_string(&test, &StringEncoding::Unicode).unwrap();
        assert_eq!(value, "C:");
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_missing_end_of_string() {
        let test = [67, 58, 92];
        assert!(nom_null_terminated_string(&test, &StringEncoding::Ansi).is_err());
    }
}
