use super::error::EncodeError;
use crate::utils::{
    nom_helper::{malformed, nom_data, nom_null_terminated_string, nom_unsigned_four_bytes},
    strings::StringEncoding,
    writer::ByteWriter,
};
use common::windows::DriveType;

/// `VolumeID` structure of `LinkInfo`. Describes the volume the local target was on
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct VolumeId {
    pub drive_type: u32,
    pub drive_serial: u32,
    pub volume_label: String,
    /**Label is stored as UTF16 instead of a single byte string */
    pub unicode_label: bool,
}

impl VolumeId {
    /// Parse volume metadata from `shortcut` data. Returns the volume and its size
    pub(crate) fn parse_volume(data: &[u8]) -> nom::IResult<&[u8], (VolumeId, u32)> {
        let (_, size) = nom_unsigned_four_bytes(data)?;
        let min_size = 0x10;
        if size < min_size {
            return malformed(data);
        }
        let (remaining, volume_data) = nom_data(data, size as u64)?;

        let (input, _size) = nom_unsigned_four_bytes(volume_data)?;
        let (input, drive_type) = nom_unsigned_four_bytes(input)?;
        let (input, drive_serial) = nom_unsigned_four_bytes(input)?;
        let (input, label_offset) = nom_unsigned_four_bytes(input)?;

        // An offset of 0x14 means the label offset is ignored and a UTF16 label offset follows
        let has_unicode_offset = 0x14;
        let (label_offset, encoding) = if label_offset == has_unicode_offset {
            let (_, unicode_offset) = nom_unsigned_four_bytes(input)?;
            (unicode_offset, StringEncoding::Unicode)
        } else {
            (label_offset, StringEncoding::Ansi)
        };

        // According to Microsoft the offset should never be greater than the size
        // https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-shllink/16cb4ca1-9339-4d0c-a68d-bf1d6cc0f943
        if label_offset >= size {
            return malformed(data);
        }
        let (label_start, _) = nom_data(volume_data, label_offset as u64)?;
        let (_, volume_label) = nom_null_terminated_string(label_start, &encoding)?;

        let volume = VolumeId {
            drive_type,
            drive_serial,
            volume_label,
            unicode_label: encoding == StringEncoding::Unicode,
        };
        Ok((remaining, (volume, size)))
    }

    /// Create the volume bytes. Label directly follows the fixed fields
    pub(crate) fn volume_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut label = ByteWriter::new();
        let label_offset = if self.unicode_label {
            label.write_null_terminated_string(&self.volume_label, &StringEncoding::Unicode)?;
            0x14
        } else {
            label.write_null_terminated_string(&self.volume_label, &StringEncoding::Ansi)?;
            0x10
        };

        let mut writer = ByteWriter::new();
        writer.write_size(label_offset + label.len())?;
        writer.write_four_bytes(self.drive_type)?;
        writer.write_four_bytes(self.drive_serial)?;
        if self.unicode_label {
            writer.write_four_bytes(0x14)?;
        }
        writer.write_size(label_offset)?;
        writer.write_data(&label.into_bytes())?;
        Ok(writer.into_bytes())
    }
}

/// Get drive types from `shortcut` data
pub(crate) fn get_drive_type(drive_type: u32) -> DriveType {
    match drive_type {
        0 => DriveType::DriveUnknown,
        1 => DriveType::DriveNotRootDir,
        2 => DriveType::DriveRemovable,
        3 => DriveType::DriveFixed,
        4 => DriveType::DriveRemote,
        5 => DriveType::DriveCdrom,
        6 => DriveType::DriveRamdisk,
        _ => DriveType::None,
    }
}
