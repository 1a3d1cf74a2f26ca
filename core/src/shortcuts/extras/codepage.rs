use crate::utils::nom_helper::nom_unsigned_four_bytes;

/// Parse `Shortcut` Codepage info
pub(crate) fn parse_codepage(data: &[u8]) -> nom::IResult<&[u8], u32> {
    let (input, codepage) = nom_unsigned_four_bytes(data)?;
    Ok((input, codepage))
}
