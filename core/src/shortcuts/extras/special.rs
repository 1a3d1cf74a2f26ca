use crate::utils::nom_helper::nom_unsigned_four_bytes;

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct SpecialFolder {
    /**CSIDL value */
    pub folder_id: u32,
    /**Offset to the item in the ID list that refers to the folder */
    pub offset: u32,
}

/// Parse `Shortcut` Special info
pub(crate) fn parse_special(data: &[u8]) -> nom::IResult<&[u8], SpecialFolder> {
    let (input, folder_id) = nom_unsigned_four_bytes(data)?;
    let (input, offset) = nom_unsigned_four_bytes(input)?;
    Ok((input, SpecialFolder { folder_id, offset }))
}
