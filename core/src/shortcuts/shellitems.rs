use super::error::EncodeError;
use crate::utils::{
    nom_helper::{malformed, nom_data, nom_unsigned_two_bytes},
    strings::{extract_latin1_string, extract_utf16_string},
    writer::ByteWriter,
};
use log::error;
use nom::{combinator::cut, Parser};

/// `LinkTargetIDList` of a `Shortcut`. Items are kept as opaque bytes
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct IdList {
    /**Item data without the two (2) byte size prefix */
    pub items: Vec<Vec<u8>>,
}

impl IdList {
    /// Parse the `ShellItems` that are in the `Shortcut` data
    pub(crate) fn parse_id_list(data: &[u8]) -> nom::IResult<&[u8], IdList> {
        let (input, total_size) = nom_unsigned_two_bytes(data)?;
        let (remaining_input, list_data) = nom_data(input, total_size as u64)?;

        let (_, items) = cut(IdList::parse_items).parse(list_data)?;
        Ok((remaining_input, IdList { items }))
    }

    /// The items are back to back and end with a two (2) byte zero size
    pub(crate) fn parse_items(data: &[u8]) -> nom::IResult<&[u8], Vec<Vec<u8>>> {
        let mut items = Vec::new();
        let mut input = data;

        loop {
            let (item_input, item_size) = nom_unsigned_two_bytes(input)?;
            let end_of_items = 0;
            if item_size == end_of_items {
                if !item_input.is_empty() {
                    return malformed(input);
                }
                break;
            }

            // Size includes size itself
            let adjust_size = 2;
            if item_size < adjust_size {
                return malformed(input);
            }
            let (remaining_input, item_data) =
                nom_data(item_input, (item_size - adjust_size) as u64)?;
            items.push(item_data.to_vec());
            input = remaining_input;
        }

        Ok((&[], items))
    }

    /// Create the ID list bytes. Total size does not include itself
    pub(crate) fn id_list_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut items = ByteWriter::new();
        for item in &self.items {
            items.write_two_bytes(two_byte_size(item.len() + 2)?)?;
            items.write_data(item)?;
        }
        items.write_two_bytes(0)?;

        let mut writer = ByteWriter::new();
        writer.write_two_bytes(two_byte_size(items.len())?)?;
        writer.write_data(&items.into_bytes())?;
        Ok(writer.into_bytes())
    }

    /**
     * Best effort path from the items. Volume items provide the drive and file entry items provide the names
     * If there is no volume item only the name of the last item is returned
     */
    pub(crate) fn target_path(&self) -> Option<String> {
        let mut drive = None;
        let mut names = Vec::new();

        for item in &self.items {
            let class_type = match item.first() {
                Some(result) => *result,
                None => continue,
            };
            match class_type & 0x70 {
                0x20 => {
                    drive = item.get(1..).map(extract_latin1_string);
                    names.clear();
                }
                0x30 => {
                    let name = long_name(item).or_else(|| item.get(12..).map(extract_latin1_string));
                    if let Some(value) = name {
                        names.push(value);
                    }
                }
                _ => {
                    if let Some(value) = long_name(item) {
                        names.push(value);
                    }
                }
            }
        }

        match drive {
            Some(mut path) => {
                for name in names {
                    if !path.is_empty() && !path.ends_with('\\') {
                        path.push('\\');
                    }
                    path.push_str(&name);
                }
                Some(path)
            }
            None => names.pop(),
        }
    }
}

/// Get the long name from a 0xbeef0004 extension block
fn long_name(item: &[u8]) -> Option<String> {
    let signature = [4, 0, 0xef, 0xbe];
    let sig_index = item
        .windows(signature.len())
        .position(|window| window == signature)?;
    // Extension starts with a two (2) byte size and two (2) byte version
    let start = sig_index.checked_sub(4)?;
    let version = u16::from_le_bytes([*item.get(start + 2)?, *item.get(start + 3)?]);

    let mut name_offset = 18;
    let vista_version = 7;
    if version >= vista_version {
        name_offset += 18;
    }
    let xp_version = 3;
    if version >= xp_version {
        name_offset += 2;
    } else {
        return None;
    }
    let win10_version = 9;
    if version >= win10_version {
        name_offset += 4;
    }
    let win7_version = 8;
    if version >= win7_version {
        name_offset += 4;
    }

    let name = extract_utf16_string(item.get(start + name_offset..)?);
    if name.is_empty() {
        return None;
    }
    Some(name)
}

fn two_byte_size(size: usize) -> Result<u16, EncodeError> {
    match u16::try_from(size) {
        Ok(result) => Ok(result),
        Err(_err) => {
            error!("[shortcuts] ID list size {size} is too large for a two byte size field");
            Err(EncodeError::BlockTooLarge)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IdList;
    use crate::shortcuts::error::EncodeError;

    #[test]
    fn test_parse_id_list() {
        let test = [
            76, 1, 20, 0, 31, 68, 71, 26, 3, 89, 114, 63, 167, 68, 137, 197, 85, 149, 254, 107, 48,
            238, 134, 0, 116, 0, 30, 0, 67, 70, 83, 70, 24, 0, 49, 0, 0, 0, 0, 0, 62, 82, 204, 166,
            16, 0, 80, 114, 111, 106, 101, 99, 116, 115, 0, 0, 0, 0, 116, 26, 89, 94, 150, 223,
            211, 72, 141, 103, 23, 51, 188, 238, 40, 186, 197, 205, 250, 223, 159, 103, 86, 65,
            137, 71, 197, 199, 107, 192, 182, 127, 66, 0, 9, 0, 4, 0, 239, 190, 85, 79, 123, 22,
            62, 82, 204, 166, 46, 0, 0, 0, 13, 117, 3, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 87, 118, 218, 0, 80, 0, 114, 0, 111, 0, 106, 0, 101, 0, 99, 0, 116, 0, 115,
            0, 0, 0, 68, 0, 78, 0, 49, 0, 0, 0, 0, 0, 99, 85, 46, 17, 16, 0, 82, 117, 115, 116, 0,
            0, 58, 0, 9, 0, 4, 0, 239, 190, 88, 85, 66, 13, 137, 85, 33, 36, 46, 0, 0, 0, 79, 76,
            17, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 26, 88, 14, 0, 82, 0, 117,
            0, 115, 0, 116, 0, 0, 0, 20, 0, 98, 0, 49, 0, 0, 0, 0, 0, 135, 85, 81, 26, 16, 0, 65,
            82, 84, 69, 77, 73, 126, 49, 0, 0, 74, 0, 9, 0, 4, 0, 239, 190, 99, 85, 46, 17, 137,
            85, 51, 36, 46, 0, 0, 0, 159, 49, 12, 0, 0, 0, 21, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 75, 189, 183, 0, 97, 0, 114, 0, 116, 0, 101, 0, 109, 0, 105, 0, 115, 0, 45,
            0, 99, 0, 111, 0, 114, 0, 101, 0, 0, 0, 24, 0, 0, 0,
        ];

        let (remaining, result) = IdList::parse_id_list(&test).unwrap();
        assert!(remaining.is_empty());
        assert_eq!(result.items.len(), 4);
        assert_eq!(result.items[0].len(), 18);
        assert_eq!(result.items[1][0], 0x74);
        assert_eq!(result.target_path().unwrap(), "artemis-core");

        assert_eq!(result.id_list_bytes().unwrap(), test);
    }

    #[test]
    fn test_target_path_volume() {
        let mut drive = vec![0x2f];
        drive.extend_from_slice(b"C:\\");
        drive.extend_from_slice(&[0; 19]);

        // File entry without an extension block uses the short name
        let mut file = vec![0x32, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x20, 0];
        file.extend_from_slice(b"CALC.EXE\0\0");

        let test = IdList {
            items: vec![drive, file],
        };
        assert_eq!(test.target_path().unwrap(), "C:\\CALC.EXE");

        let (_, result) = IdList::parse_id_list(&test.id_list_bytes().unwrap()).unwrap();
        assert_eq!(result, test);
    }

    #[test]
    fn test_empty_id_list() {
        let test = [2, 0, 0, 0];
        let (_, result) = IdList::parse_id_list(&test).unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.target_path(), None);
        assert_eq!(result.id_list_bytes().unwrap(), test);
    }

    #[test]
    fn test_parse_id_list_truncated() {
        let test = [76, 1, 20, 0, 31, 68];
        let result = IdList::parse_id_list(&test);
        assert!(matches!(result, Err(nom::Err::Error(_))));
    }

    #[test]
    fn test_parse_id_list_bad_items() {
        // Item overruns the list
        let test = [6, 0, 10, 0, 1, 2, 0, 0];
        assert!(matches!(
            IdList::parse_id_list(&test),
            Err(nom::Err::Failure(_))
        ));

        // Missing end of list
        let test = [4, 0, 4, 0, 1, 2];
        assert!(matches!(
            IdList::parse_id_list(&test),
            Err(nom::Err::Failure(_))
        ));

        // Data after end of list
        let test = [4, 0, 0, 0, 1, 2];
        assert!(matches!(
            IdList::parse_id_list(&test),
            Err(nom::Err::Failure(_))
        ));

        // Item size smaller than the size field
        let test = [4, 0, 1, 0, 0, 0];
        assert!(matches!(
            IdList::parse_id_list(&test),
            Err(nom::Err::Failure(_))
        ));
    }

    #[test]
    fn test_id_list_too_large() {
        let test = IdList {
            items: vec![vec![0; 70000]],
        };
        assert_eq!(test.id_list_bytes(), Err(EncodeError::BlockTooLarge));
    }
}
