use crate::utils::{
    nom_helper::{nom_data, nom_guid, nom_unsigned_four_bytes},
    strings::extract_utf8_string,
    uuid::format_guid,
};

/// Distributed Link Tracker data. Identifies the machine and NTFS object IDs of the target
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Tracker {
    pub version: u32,
    /**NetBIOS name of the machine where the target was last seen */
    pub machine_id: String,
    pub droid_volume_id: String,
    pub droid_file_id: String,
    pub birth_droid_volume_id: String,
    pub birth_droid_file_id: String,
}

/// Parse Tracker block data
pub(crate) fn parse_tracker(data: &[u8]) -> nom::IResult<&[u8], Tracker> {
    let (input, _tracker_size) = nom_unsigned_four_bytes(data)?;
    let (input, version) = nom_unsigned_four_bytes(input)?;

    let machine_size = 16;
    let (input, machine_data) = nom_data(input, machine_size)?;
    let (input, droid_volume) = nom_guid(input)?;
    let (input, droid_file) = nom_guid(input)?;
    let (input, birth_volume) = nom_guid(input)?;
    let (input, birth_file) = nom_guid(input)?;

    let tracker = Tracker {
        version,
        machine_id: extract_utf8_string(machine_data),
        droid_volume_id: format_guid(&droid_volume),
        droid_file_id: format_guid(&droid_file),
        birth_droid_volume_id: format_guid(&birth_volume),
        birth_droid_file_id: format_guid(&birth_file),
    };

    Ok((input, tracker))
}
