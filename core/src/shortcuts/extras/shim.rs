use crate::utils::strings::extract_utf16_string;

/// Parse `Shortcut` Shim info. The layer name is a UTF16 string padded with end of string characters
pub(crate) fn parse_shim(data: &[u8]) -> nom::IResult<&[u8], String> {
    let shim_string = extract_utf16_string(data);
    Ok((&[], shim_string))
}
