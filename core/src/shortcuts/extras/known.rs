use crate::utils::{
    nom_helper::{nom_guid, nom_unsigned_four_bytes},
    uuid::format_guid,
};

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct KnownFolder {
    pub folder_id: String,
    /**Offset to the item in the ID list that refers to the folder */
    pub offset: u32,
}

/// Parse `Shortcut` Known Folder info
pub(crate) fn parse_known(data: &[u8]) -> nom::IResult<&[u8], KnownFolder> {
    let (input, guid) = nom_guid(data)?;
    let (input, offset) = nom_unsigned_four_bytes(input)?;

    let known = KnownFolder {
        folder_id: format_guid(&guid),
        offset,
    };
    Ok((input, known))
}
