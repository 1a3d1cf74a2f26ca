use super::{
    extras::ExtraData, network::get_provider_type, shortcut::Shortcut, volume::get_drive_type,
};
use crate::utils::{
    encoding::base64_encode_standard,
    time::{filetime_to_unixepoch, unixepoch_to_iso},
};
use common::windows::{
    AttributeFlags, ConsoleCursorSize, ConsoleFontFamily, DriveType, LocationFlag,
    NetworkProviderType, ShortcutInfo, UnknownBlock,
};

impl Shortcut {
    /// Report view of the `Shortcut`
    pub fn info(&self) -> ShortcutInfo {
        let mut shortcut_info = ShortcutInfo {
            source_path: String::new(),
            data_flags: self.flags.data_flags(),
            attribute_flags: file_attribute_flags(self.file_attributes),
            created: unixepoch_to_iso(filetime_to_unixepoch(&self.creation_time)),
            modified: unixepoch_to_iso(filetime_to_unixepoch(&self.write_time)),
            accessed: unixepoch_to_iso(filetime_to_unixepoch(&self.access_time)),
            file_size: self.target_file_size,
            icon_index: self.icon_index,
            window_style: self.show_command,
            hotkey: self
                .hotkey
                .map(|hotkey| hotkey.to_string())
                .unwrap_or_default(),
            location_flags: LocationFlag::None,
            path: self.path(),
            drive_serial: String::new(),
            drive_type: DriveType::None,
            volume_label: String::new(),
            network_provider: NetworkProviderType::None,
            network_share_name: String::new(),
            network_device_name: String::new(),
            description: self.description().to_string(),
            relative_path: self.relative_path().to_string(),
            working_directory: self.working_directory().to_string(),
            command_line_args: self.arguments().to_string(),
            icon_location: self.icon_location().to_string(),
            shellitem_count: self
                .id_list
                .as_ref()
                .map(|id_list| id_list.items.len())
                .unwrap_or_default(),
            hostname: String::new(),
            droid_volume_id: String::new(),
            droid_file_id: String::new(),
            birth_droid_volume_id: String::new(),
            birth_droid_file_id: String::new(),
            environment_variable: String::new(),
            icon_environment: String::new(),
            codepage: 0,
            special_folder_id: 0,
            darwin_id: String::new(),
            shim_layer: String::new(),
            known_folder: String::new(),
            property_formats: Vec::new(),
            console_face_name: String::new(),
            console_font_height: 0,
            console_font_family: ConsoleFontFamily::None,
            console_bold: false,
            console_cursor_size: ConsoleCursorSize::None,
            unknown_blocks: Vec::new(),
            overlay: base64_encode_standard(self.overlay()),
            is_abnormal: self.is_abnormal(),
        };

        if let Some(location) = &self.link_info {
            shortcut_info.location_flags = location.location_flag();
            if let Some(local) = &location.local {
                shortcut_info.drive_serial = format!("{:X}", local.volume.drive_serial);
                shortcut_info.drive_type = get_drive_type(local.volume.drive_type);
                shortcut_info.volume_label = local.volume.volume_label.clone();
            }
            if let Some(network) = &location.network {
                shortcut_info.network_provider = get_provider_type(network.provider_type);
                shortcut_info.network_share_name = network.share_name().to_string();
                shortcut_info.network_device_name = network
                    .device_name_unicode
                    .clone()
                    .or_else(|| network.device_name.clone())
                    .unwrap_or_default();
            }
        }

        for block in &self.extra_data {
            match block.view() {
                ExtraData::Tracker(tracker) => {
                    shortcut_info.hostname = tracker.machine_id;
                    shortcut_info.droid_volume_id = tracker.droid_volume_id;
                    shortcut_info.droid_file_id = tracker.droid_file_id;
                    shortcut_info.birth_droid_volume_id = tracker.birth_droid_volume_id;
                    shortcut_info.birth_droid_file_id = tracker.birth_droid_file_id;
                }
                ExtraData::EnvironmentVariables(environment) => {
                    shortcut_info.environment_variable = environment.target_unicode;
                }
                ExtraData::IconEnvironment(environment) => {
                    shortcut_info.icon_environment = environment.target_unicode;
                }
                ExtraData::Darwin(darwin) => shortcut_info.darwin_id = darwin.target_unicode,
                ExtraData::ConsoleCodepage(codepage) => shortcut_info.codepage = codepage,
                ExtraData::SpecialFolder(special) => {
                    shortcut_info.special_folder_id = special.folder_id;
                }
                ExtraData::KnownFolder(known) => shortcut_info.known_folder = known.folder_id,
                ExtraData::Shim(shim) => shortcut_info.shim_layer = shim,
                ExtraData::PropertyStore(mut formats) => {
                    shortcut_info.property_formats.append(&mut formats);
                }
                ExtraData::Console(console) => {
                    shortcut_info.console_font_height = console.font_height();
                    shortcut_info.console_font_family = console.family();
                    shortcut_info.console_bold = console.is_bold();
                    shortcut_info.console_cursor_size = console.cursor();
                    shortcut_info.console_face_name = console.face_name;
                }
                ExtraData::VistaIdList(_) => {}
                ExtraData::Unknown => shortcut_info.unknown_blocks.push(UnknownBlock {
                    signature: format!("{:#x}", block.signature),
                    data: base64_encode_standard(&block.data),
                }),
            }
        }

        shortcut_info
    }
}

/// Determine attribute flags of the target
fn file_attribute_flags(data: u32) -> Vec<AttributeFlags> {
    let flag_map = [
        (0x1, AttributeFlags::ReadOnly),
        (0x2, AttributeFlags::Hidden),
        (0x4, AttributeFlags::System),
        (0x10, AttributeFlags::Directory),
        (0x20, AttributeFlags::Archive),
        (0x40, AttributeFlags::Device),
        (0x80, AttributeFlags::Normal),
        (0x100, AttributeFlags::Temporary),
        (0x200, AttributeFlags::SparseFile),
        (0x400, AttributeFlags::ReparsePoint),
        (0x800, AttributeFlags::Compressed),
        (0x1000, AttributeFlags::Offline),
        (0x2000, AttributeFlags::NotConentIndexed),
        (0x4000, AttributeFlags::Encrypted),
        (0x10000, AttributeFlags::Virtual),
    ];

    let mut attrs = Vec::new();
    for (flag, attribute) in flag_map {
        if (data & flag) == flag {
            attrs.push(attribute);
        }
    }
    attrs
}
