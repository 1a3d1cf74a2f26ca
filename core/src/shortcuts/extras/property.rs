use crate::utils::{
    nom_helper::{malformed, nom_data, nom_guid, nom_unsigned_four_bytes},
    uuid::format_guid,
};

/// Parse Property Store data. Returns the format ID of each serialized property storage
pub(crate) fn parse_property(data: &[u8]) -> nom::IResult<&[u8], Vec<String>> {
    let mut formats = Vec::new();
    let mut input = data;

    loop {
        let (storage_input, storage_size) = nom_unsigned_four_bytes(input)?;
        let end_of_storage = 0;
        if storage_size == end_of_storage {
            input = storage_input;
            break;
        }

        // Size, version, and format ID
        let min_size = 24;
        if storage_size < min_size {
            return malformed(input);
        }
        let (remaining_input, storage_data) = nom_data(storage_input, (storage_size - 4) as u64)?;

        let (storage_data, version) = nom_unsigned_four_bytes(storage_data)?;
        // 1SPS
        let version_one = 0x53505331;
        if version != version_one {
            return malformed(input);
        }
        let (_, format_id) = nom_guid(storage_data)?;
        formats.push(format_guid(&format_id));

        input = remaining_input;
    }

    Ok((input, formats))
}

#[cfg(test)]
mod tests {
    use super::parse_property;

    #[test]
    fn test_parse_property() {
        let test = [
            57, 0, 0, 0, 49, 83, 80, 83, 177, 22, 109, 68, 173, 141, 112, 72, 167, 72, 64, 46, 164,
            61, 120, 140, 29, 0, 0, 0, 104, 0, 0, 0, 0, 72, 0, 0, 0, 144, 47, 84, 8, 0, 0, 0, 0, 0,
            0, 80, 31, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        ];
        let (input, result) = parse_property(&test).unwrap();
        assert!(input.is_empty());
        assert_eq!(result, vec!["446d16b1-8dad-4870-a748-402ea43d788c"]);
    }

    #[test]
    fn test_parse_property_bad_version() {
        let test = [
            24, 0, 0, 0, 49, 83, 80, 84, 177, 22, 109, 68, 173, 141, 112, 72, 167, 72, 64, 46, 164,
            61, 120, 140, 0, 0, 0, 0,
        ];
        assert!(parse_property(&test).is_err());
    }
}
