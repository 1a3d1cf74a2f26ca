use crate::{
    shortcuts::error::EncodeError,
    utils::{
        nom_helper::{
            nom_data, nom_guid, nom_signed_four_bytes, nom_unsigned_eight_bytes,
            nom_unsigned_four_bytes, nom_unsigned_two_bytes,
        },
        writer::ByteWriter,
    },
};
use bitflags::bitflags;
use common::windows::{DataFlags, WindowStyle};
use log::warn;
use uuid::Uuid;

/// Size of the `Shortcut` header. Always 0x4c (76)
pub(crate) const HEADER_SIZE: u32 = 0x4c;
/// CLSID of every `Shortcut` file: 00021401-0000-0000-c000-000000000046
pub(crate) const LINK_CLSID: Uuid = Uuid::from_u128(0x00021401_0000_0000_c000_000000000046);

bitflags! {
    /// `LinkFlags` from the `Shortcut` header. Controls which structures follow the header
    #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
    pub struct LinkFlags: u32 {
        const HAS_LINK_TARGET_ID_LIST = 1 << 0;
        const HAS_LINK_INFO = 1 << 1;
        const HAS_NAME = 1 << 2;
        const HAS_RELATIVE_PATH = 1 << 3;
        const HAS_WORKING_DIR = 1 << 4;
        const HAS_ARGUMENTS = 1 << 5;
        const HAS_ICON_LOCATION = 1 << 6;
        const IS_UNICODE = 1 << 7;
        const FORCE_NO_LINK_INFO = 1 << 8;
        const HAS_EXP_STRING = 1 << 9;
        const RUN_IN_SEPARATE_PROCESS = 1 << 10;
        const HAS_DARWIN_ID = 1 << 12;
        const RUN_AS_USER = 1 << 13;
        const HAS_EXP_ICON = 1 << 14;
        const NO_PIDL_ALIAS = 1 << 15;
        const RUN_WITH_SHIM_LAYER = 1 << 17;
        const FORCE_NO_LINK_TRACK = 1 << 18;
        const ENABLE_TARGET_METADATA = 1 << 19;
        const DISABLE_LINK_PATH_TRACKING = 1 << 20;
        const DISABLE_KNOWN_FOLDER_TRACKING = 1 << 21;
        const DISABLE_KNOWN_FOLDER_ALIAS = 1 << 22;
        const ALLOW_LINK_TO_LINK = 1 << 23;
        const UNALIAS_ON_SAVE = 1 << 24;
        const PREFER_ENVIRONMENT_PATH = 1 << 25;
        const KEEP_LOCAL_ID_LIST_FOR_UNC_TARGET = 1 << 26;
    }
}

impl Default for LinkFlags {
    fn default() -> Self {
        LinkFlags::empty()
    }
}

impl LinkFlags {
    /// Flags that only mark if a section is present. The encoder derives these from the `Shortcut` fields
    pub(crate) fn presence() -> LinkFlags {
        LinkFlags::HAS_LINK_TARGET_ID_LIST
            | LinkFlags::HAS_LINK_INFO
            | LinkFlags::HAS_NAME
            | LinkFlags::HAS_RELATIVE_PATH
            | LinkFlags::HAS_WORKING_DIR
            | LinkFlags::HAS_ARGUMENTS
            | LinkFlags::HAS_ICON_LOCATION
    }

    /// Get the report view of the flags
    pub(crate) fn data_flags(&self) -> Vec<DataFlags> {
        let flag_map = [
            (LinkFlags::HAS_LINK_TARGET_ID_LIST, DataFlags::HasTargetIdList),
            (LinkFlags::HAS_LINK_INFO, DataFlags::HasLinkInfo),
            (LinkFlags::HAS_NAME, DataFlags::HasName),
            (LinkFlags::HAS_RELATIVE_PATH, DataFlags::HasRelativePath),
            (LinkFlags::HAS_WORKING_DIR, DataFlags::HasWorkingDirectory),
            (LinkFlags::HAS_ARGUMENTS, DataFlags::HasArguements),
            (LinkFlags::HAS_ICON_LOCATION, DataFlags::HasIconLocation),
            (LinkFlags::IS_UNICODE, DataFlags::IsUnicode),
            (LinkFlags::FORCE_NO_LINK_INFO, DataFlags::ForceNoLinkInfo),
            (LinkFlags::HAS_EXP_STRING, DataFlags::HasExpString),
            (
                LinkFlags::RUN_IN_SEPARATE_PROCESS,
                DataFlags::RunInSeparateProcess,
            ),
            (LinkFlags::HAS_DARWIN_ID, DataFlags::HasDarwinId),
            (LinkFlags::RUN_AS_USER, DataFlags::RunAsUser),
            (LinkFlags::HAS_EXP_ICON, DataFlags::HasExpIcon),
            (LinkFlags::NO_PIDL_ALIAS, DataFlags::NoPidAlias),
            (LinkFlags::RUN_WITH_SHIM_LAYER, DataFlags::RunWithShimLayer),
            (LinkFlags::FORCE_NO_LINK_TRACK, DataFlags::ForceNoLinkTrack),
            (
                LinkFlags::ENABLE_TARGET_METADATA,
                DataFlags::EnableTargetMetadata,
            ),
            (
                LinkFlags::DISABLE_LINK_PATH_TRACKING,
                DataFlags::DisableLinkPathTracking,
            ),
            (
                LinkFlags::DISABLE_KNOWN_FOLDER_TRACKING,
                DataFlags::DisableKnownFolderTracking,
            ),
            (
                LinkFlags::DISABLE_KNOWN_FOLDER_ALIAS,
                DataFlags::DisableKnownFolderAlias,
            ),
            (LinkFlags::ALLOW_LINK_TO_LINK, DataFlags::AllowLinkToLink),
            (LinkFlags::UNALIAS_ON_SAVE, DataFlags::UnaliasOnSave),
            (
                LinkFlags::PREFER_ENVIRONMENT_PATH,
                DataFlags::PreferEnvironmentPath,
            ),
            (
                LinkFlags::KEEP_LOCAL_ID_LIST_FOR_UNC_TARGET,
                DataFlags::KeepLocalDListForUncTarget,
            ),
        ];

        // A shortcut file may have multiple flags
        let mut lnk_flags = Vec::new();
        for (flag, data_flag) in flag_map {
            if self.contains(flag) {
                lnk_flags.push(data_flag);
            }
        }
        lnk_flags
    }
}

#[derive(Debug, PartialEq, Clone)]
pub(crate) struct LnkHeader {
    pub(crate) flags: LinkFlags,
    pub(crate) attributes: u32,
    pub(crate) created: u64,
    pub(crate) access: u64,
    pub(crate) modified: u64,
    pub(crate) file_size: u32,
    pub(crate) icon_index: i32,
    pub(crate) window_value: u32,
    pub(crate) hot_key: u16,
    /**Reserved fields. Kept as is so data round trips */
    pub(crate) reserved: [u8; 10],
}

impl LnkHeader {
    /// Parse the `Shortcut` file header. Contains target file size and target file created, modified, accessed timestamps
    pub(crate) fn parse_header(data: &[u8]) -> nom::IResult<&[u8], LnkHeader> {
        let (input, _size) = nom_unsigned_four_bytes(data)?;
        let (input, _class_id) = nom_guid(input)?;
        let (input, data_flags) = nom_unsigned_four_bytes(input)?;
        let (input, attributes) = nom_unsigned_four_bytes(input)?;

        let (input, created) = nom_unsigned_eight_bytes(input)?;
        let (input, access) = nom_unsigned_eight_bytes(input)?;
        let (input, modified) = nom_unsigned_eight_bytes(input)?;

        let (input, file_size) = nom_unsigned_four_bytes(input)?;
        let (input, icon_index) = nom_signed_four_bytes(input)?;
        let (input, window_value) = nom_unsigned_four_bytes(input)?;
        let (input, hot_key) = nom_unsigned_two_bytes(input)?;

        let reserved_size: u64 = 10;
        let (input, reserved_data) = nom_data(input, reserved_size)?;
        let mut reserved = [0; 10];
        reserved.copy_from_slice(reserved_data);

        let header = LnkHeader {
            flags: LinkFlags::from_bits_retain(data_flags),
            attributes,
            created,
            access,
            modified,
            file_size,
            icon_index,
            window_value,
            hot_key,
            reserved,
        };

        Ok((input, header))
    }

    /// Verify if provided bytes contain `shortcut` data. Short data returns a nom error
    pub(crate) fn check_header(data: &[u8]) -> nom::IResult<&[u8], bool> {
        let (input, size) = nom_unsigned_four_bytes(data)?;
        if size != HEADER_SIZE {
            return Ok((data, false));
        }
        let (_, class_id) = nom_guid(input)?;

        Ok((data, class_id == LINK_CLSID))
    }

    /// Write the header. Always 76 bytes
    pub(crate) fn write_header(&self, writer: &mut ByteWriter) -> Result<(), EncodeError> {
        writer.write_four_bytes(HEADER_SIZE)?;
        writer.write_guid(&LINK_CLSID)?;
        writer.write_four_bytes(self.flags.bits())?;
        writer.write_four_bytes(self.attributes)?;
        writer.write_eight_bytes(self.created)?;
        writer.write_eight_bytes(self.access)?;
        writer.write_eight_bytes(self.modified)?;
        writer.write_four_bytes(self.file_size)?;
        writer.write_signed_four_bytes(self.icon_index)?;
        writer.write_four_bytes(self.window_value)?;
        writer.write_two_bytes(self.hot_key)?;
        writer.write_data(&self.reserved)
    }
}

/// Map the raw show command. Values other than the three Windows honors become `Normal`
pub(crate) fn window_style(window_value: u32) -> WindowStyle {
    match window_value {
        1 => WindowStyle::Normal,
        3 => WindowStyle::Maximized,
        7 => WindowStyle::MinimizedNoActive,
        _ => {
            warn!("[shortcuts] Unknown show command {window_value}. Using Normal");
            WindowStyle::Normal
        }
    }
}

/// Raw show command for a window style
pub(crate) fn window_value(style: &WindowStyle) -> u32 {
    match style {
        WindowStyle::Normal => 1,
        WindowStyle::Maximized => 3,
        WindowStyle::MinimizedNoActive => 7,
    }
}
