use super::{
    error::EncodeError,
    extras::{
        ExtraBlock, ExtraData, ExtraSection, ENVIRONMENT_SIGNATURE, ICON_ENVIRONMENT_SIGNATURE,
    },
    header::{window_style, window_value, LinkFlags, LnkHeader},
    hotkey::Hotkey,
    location::{LinkInfo, LocalTarget},
    network::NetworkLink,
    shellitems::IdList,
    strings::StringData,
};
use crate::utils::{strings::StringEncoding, writer::ByteWriter};
use common::windows::WindowStyle;
use log::{error, warn};

/**
 * A Windows `Shortcut` (lnk) file
 *
 * The presence flags in `flags` (ID list, `LinkInfo` and the five strings) are derived from the fields when encoded
 * All other flags are written as set
 */
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Shortcut {
    pub flags: LinkFlags,
    pub file_attributes: u32,
    /**FILETIME values of the target */
    pub creation_time: u64,
    pub access_time: u64,
    pub write_time: u64,
    pub target_file_size: u32,
    pub icon_index: i32,
    pub show_command: WindowStyle,
    pub hotkey: Option<Hotkey>,
    pub id_list: Option<IdList>,
    pub link_info: Option<LinkInfo>,
    pub string_data: StringData,
    pub extra_data: Vec<ExtraBlock>,
    reserved: [u8; 10],
    /**Raw show command that was mapped to `Normal` */
    unknown_show_command: Option<u32>,
    /**Hotkey as decoded. Only hotkeys that differ from it are validated */
    decoded_hotkey: Option<Hotkey>,
    /**Decoded `LinkInfo` and its bytes when they are not in the layout we write */
    link_info_source: Option<(LinkInfo, Vec<u8>)>,
    /**Decoded strings and their bytes when they do not encode back to the same bytes. Ex: unpaired UTF16 surrogates */
    string_source: Option<(StringData, StringEncoding, Vec<u8>)>,
    terminal: u32,
    overlay: Vec<u8>,
}

impl Shortcut {
    /// Empty `Shortcut`. No target, no strings, and no extra data
    pub fn new() -> Shortcut {
        Shortcut::default()
    }

    /// Parse `Shortcut` data after the header has been verified
    pub(crate) fn parse_shortcut(data: &[u8]) -> nom::IResult<&[u8], Shortcut> {
        let (mut input, header) = LnkHeader::parse_header(data)?;

        let mut shortcut = Shortcut {
            flags: header.flags,
            file_attributes: header.attributes,
            creation_time: header.created,
            access_time: header.access,
            write_time: header.modified,
            target_file_size: header.file_size,
            icon_index: header.icon_index,
            show_command: window_style(header.window_value),
            hotkey: Hotkey::from_raw(header.hot_key),
            reserved: header.reserved,
            ..Default::default()
        };
        if window_value(&shortcut.show_command) != header.window_value {
            shortcut.unknown_show_command = Some(header.window_value);
        }
        shortcut.decoded_hotkey = shortcut.hotkey;

        // Two (2) structures may follow the header
        //  TargetIDList - List of `shellitems`
        //  LinkInfo - Where the target file the `shortcut` points to exists. Either on disk or network device (ex: network share)
        if header.flags.contains(LinkFlags::HAS_LINK_TARGET_ID_LIST) {
            let (remaining_input, id_list) = IdList::parse_id_list(input)?;
            shortcut.id_list = Some(id_list);
            input = remaining_input;
        }

        if header.flags.contains(LinkFlags::HAS_LINK_INFO) {
            let (remaining_input, location) = LinkInfo::parse_location(input)?;
            let location_data = &input[..input.len() - remaining_input.len()];

            // Keep the original bytes if we would lay the structure out differently
            let is_canonical = match location.location_bytes() {
                Ok(bytes) => bytes == location_data,
                Err(_err) => false,
            };
            if !is_canonical {
                shortcut.link_info_source = Some((location.clone(), location_data.to_vec()));
            }
            shortcut.link_info = Some(location);
            input = remaining_input;
        }

        // After TargetIDList and LinkInfo five (5) strings may exist depending on the flags set in the header
        let (remaining_input, (strings, _is_abnormal)) =
            StringData::parse_strings(input, &header.flags)?;
        let strings_data = &input[..input.len() - remaining_input.len()];

        let encoding = string_encoding(&header.flags);
        let mut strings_writer = ByteWriter::new();
        let is_canonical = match strings.write_strings(&mut strings_writer, &encoding) {
            Ok(()) => strings_writer.into_bytes() == strings_data,
            Err(_err) => false,
        };
        if !is_canonical {
            shortcut.string_source = Some((strings.clone(), encoding, strings_data.to_vec()));
        }
        shortcut.string_data = strings;
        input = remaining_input;

        let (remaining_input, extras) = ExtraSection::parse_extra_data(input)?;
        shortcut.extra_data = extras.blocks;
        shortcut.terminal = extras.terminal;
        shortcut.overlay = extras.overlay;

        Ok((remaining_input, shortcut))
    }

    /// Create the `Shortcut` bytes
    pub(crate) fn shortcut_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        if let Some(hotkey) = &self.hotkey {
            if self.hotkey != self.decoded_hotkey {
                hotkey.validate()?;
            }
        }

        let flags = self.encode_flags();
        let header = LnkHeader {
            flags,
            attributes: self.file_attributes,
            created: self.creation_time,
            access: self.access_time,
            modified: self.write_time,
            file_size: self.target_file_size,
            icon_index: self.icon_index,
            window_value: self.window_value(),
            hot_key: self.hotkey.map(|hotkey| hotkey.raw()).unwrap_or_default(),
            reserved: self.reserved,
        };

        let mut writer = ByteWriter::new();
        header.write_header(&mut writer)?;

        if let Some(id_list) = &self.id_list {
            writer.write_data(&id_list.id_list_bytes()?)?;
        }
        if let Some(location) = &self.link_info {
            match &self.link_info_source {
                Some((decoded, data)) if decoded == location => writer.write_data(data)?,
                _ => writer.write_data(&location.location_bytes()?)?,
            }
        }

        let encoding = string_encoding(&flags);
        match &self.string_source {
            Some((decoded, source_encoding, data))
                if decoded == &self.string_data && source_encoding == &encoding =>
            {
                writer.write_data(data)?
            }
            _ => self.string_data.write_strings(&mut writer, &encoding)?,
        }

        let extras = ExtraSection {
            blocks: self.extra_data.clone(),
            terminal: self.terminal,
            overlay: self.overlay.clone(),
        };
        extras.write_extra_data(&mut writer)?;

        Ok(writer.into_bytes())
    }

    /// Flags that will be written. Presence flags come from the fields
    pub fn encode_flags(&self) -> LinkFlags {
        let mut flags = self.flags - LinkFlags::presence();
        if self.id_list.is_some() {
            flags |= LinkFlags::HAS_LINK_TARGET_ID_LIST;
        }
        if self.link_info.is_some() {
            flags |= LinkFlags::HAS_LINK_INFO;
        }
        flags |= self.string_data.flags();

        if !flags.contains(LinkFlags::IS_UNICODE) && self.string_data.needs_unicode() {
            warn!("[shortcuts] Strings cannot be stored as single byte strings. Using UTF16");
            flags |= LinkFlags::IS_UNICODE;
        }
        flags
    }

    fn window_value(&self) -> u32 {
        match self.unknown_show_command {
            Some(value) if self.show_command == WindowStyle::Normal => value,
            _ => window_value(&self.show_command),
        }
    }

    /**
     * The target path
     * From `LinkInfo` when present, otherwise a best effort path from the ID list
     * Empty if the target is only described by an ID list outside the filesystem
     */
    pub fn path(&self) -> String {
        if let Some(path) = self.link_info.as_ref().and_then(LinkInfo::target_path) {
            return path;
        }
        if let Some(path) = self.id_list.as_ref().and_then(IdList::target_path) {
            return path;
        }
        String::new()
    }

    /// Set the target path. Ex: C:\Windows\notepad.exe or \\server\share\file.txt. The ID list is removed
    pub fn set_path(&mut self, path: &str) {
        self.id_list = None;
        self.link_info_source = None;
        if path.is_empty() {
            self.link_info = None;
            return;
        }

        if let Some(unc) = path.strip_prefix("\\\\") {
            let mut parts = unc.splitn(3, '\\');
            let server = parts.next().unwrap_or_default();
            let share = parts.next().unwrap_or_default();
            let suffix = parts.next().unwrap_or_default();

            let net_name = if share.is_empty() {
                format!("\\\\{server}")
            } else {
                format!("\\\\{server}\\{share}")
            };
            self.link_info = Some(LinkInfo {
                network: Some(NetworkLink::new(&net_name)),
                common_path_suffix: suffix.to_string(),
                ..Default::default()
            });
            return;
        }

        self.link_info = Some(LinkInfo {
            local: Some(LocalTarget::new(path)),
            ..Default::default()
        });
    }

    pub fn arguments(&self) -> &str {
        self.string_data.arguments.as_deref().unwrap_or_default()
    }

    pub fn set_arguments(&mut self, arguments: &str) {
        self.string_data.arguments = optional_string(arguments);
    }

    pub fn description(&self) -> &str {
        self.string_data.description.as_deref().unwrap_or_default()
    }

    pub fn set_description(&mut self, description: &str) {
        self.string_data.description = optional_string(description);
    }

    pub fn working_directory(&self) -> &str {
        self.string_data
            .working_directory
            .as_deref()
            .unwrap_or_default()
    }

    pub fn set_working_directory(&mut self, directory: &str) {
        self.string_data.working_directory = optional_string(directory);
    }

    pub fn relative_path(&self) -> &str {
        self.string_data.relative_path.as_deref().unwrap_or_default()
    }

    pub fn set_relative_path(&mut self, path: &str) {
        self.string_data.relative_path = optional_string(path);
    }

    /// Path of the file containing the icon
    pub fn icon_location(&self) -> &str {
        self.string_data.icon_location.as_deref().unwrap_or_default()
    }

    pub fn set_icon_location(&mut self, path: &str) {
        self.string_data.icon_location = optional_string(path);
    }

    pub fn icon_index(&self) -> i32 {
        self.icon_index
    }

    pub fn set_icon_index(&mut self, index: i32) {
        self.icon_index = index;
    }

    pub fn window_style(&self) -> WindowStyle {
        self.show_command
    }

    pub fn set_window_style(&mut self, style: WindowStyle) {
        self.show_command = style;
        self.unknown_show_command = None;
    }

    pub fn hotkey(&self) -> Option<Hotkey> {
        self.hotkey
    }

    /// Set or remove the hotkey. Fails if the hotkey has no SHIFT, CTRL or ALT modifier
    pub fn set_hotkey(&mut self, hotkey: Option<Hotkey>) -> Result<(), EncodeError> {
        if let Some(value) = &hotkey {
            value.validate()?;
        }
        self.hotkey = hotkey;
        Ok(())
    }

    /// Target path containing environment variables. Ex: %windir%\notepad.exe
    pub fn environment_path(&self) -> Option<String> {
        self.extra_data
            .iter()
            .find_map(|block| match block.view() {
                ExtraData::EnvironmentVariables(environment) => Some(environment.target_unicode),
                _ => None,
            })
    }

    /// Set the environment variable target path. An empty path removes the block
    pub fn set_environment_path(&mut self, path: &str) -> Result<(), EncodeError> {
        self.replace_environment_block(
            path,
            ENVIRONMENT_SIGNATURE,
            LinkFlags::HAS_EXP_STRING,
            ExtraBlock::environment,
        )
    }

    /// Icon path containing environment variables
    pub fn icon_environment_path(&self) -> Option<String> {
        self.extra_data
            .iter()
            .find_map(|block| match block.view() {
                ExtraData::IconEnvironment(environment) => Some(environment.target_unicode),
                _ => None,
            })
    }

    /// Set the environment variable icon path. An empty path removes the block
    pub fn set_icon_environment_path(&mut self, path: &str) -> Result<(), EncodeError> {
        self.replace_environment_block(
            path,
            ICON_ENVIRONMENT_SIGNATURE,
            LinkFlags::HAS_EXP_ICON,
            ExtraBlock::icon_environment,
        )
    }

    fn replace_environment_block(
        &mut self,
        path: &str,
        signature: u32,
        flag: LinkFlags,
        builder: fn(&str) -> Result<ExtraBlock, EncodeError>,
    ) -> Result<(), EncodeError> {
        if path.is_empty() {
            self.extra_data.retain(|block| block.signature != signature);
            self.flags.remove(flag);
            return Ok(());
        }

        let block = match builder(path) {
            Ok(result) => result,
            Err(err) => {
                error!("[shortcuts] Could not create environment block for {path}: {err:?}");
                return Err(err);
            }
        };
        match self
            .extra_data
            .iter_mut()
            .find(|existing| existing.signature == signature)
        {
            Some(existing) => *existing = block,
            None => self.extra_data.push(block),
        }
        self.flags.insert(flag);
        Ok(())
    }

    /// Strings larger than Windows creates or data after the terminal block
    pub fn is_abnormal(&self) -> bool {
        if !self.overlay.is_empty() {
            warn!("[shortcuts] Got data after the terminal block. LNK data could be malformed or possibly malicious");
            return true;
        }
        self.string_data.is_abnormal()
    }

    /// Data after the terminal block
    pub fn overlay(&self) -> &[u8] {
        &self.overlay
    }
}

fn string_encoding(flags: &LinkFlags) -> StringEncoding {
    if flags.contains(LinkFlags::IS_UNICODE) {
        return StringEncoding::Unicode;
    }
    StringEncoding::Ansi
}

fn optional_string(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::Shortcut;
    use crate::shortcuts::{
        error::EncodeError,
        header::LinkFlags,
        hotkey::{Hotkey, HotkeyModifiers},
        network::NET_LANMAN,
    };
    use common::windows::WindowStyle;

    fn empty_target() -> Vec<u8> {
        let mut data = vec![
            76, 0, 0, 0, 1, 20, 2, 0, 0, 0, 0, 0, 192, 0, 0, 0, 0, 0, 0, 70,
        ];
        // Header fields, a show command of Normal, and the terminal block
        data.resize(80, 0);
        data[60] = 1;
        data
    }

    #[test]
    fn test_parse_empty_target() {
        let test = empty_target();
        let (input, result) = Shortcut::parse_shortcut(&test).unwrap();
        assert!(input.is_empty());
        assert_eq!(result.path(), "");
        assert_eq!(result.id_list, None);
        assert_eq!(result.link_info, None);
        assert_eq!(result.shortcut_bytes().unwrap(), test);
    }

    #[test]
    fn test_unknown_show_command() {
        let mut test = empty_target();
        test[60] = 5;
        let (_, mut result) = Shortcut::parse_shortcut(&test).unwrap();
        assert_eq!(result.window_style(), WindowStyle::Normal);
        assert_eq!(result.shortcut_bytes().unwrap(), test);

        result.set_window_style(WindowStyle::Normal);
        assert_eq!(result.shortcut_bytes().unwrap()[60], 1);
    }

    #[test]
    fn test_hotkey_validation() {
        let mut test = Shortcut::new();
        let result = test.set_hotkey(Some(Hotkey::new(HotkeyModifiers::empty(), 0x41)));
        assert_eq!(result, Err(EncodeError::HotkeyMissingModifier));

        test.hotkey = Some(Hotkey::new(HotkeyModifiers::empty(), 0x41));
        assert_eq!(
            test.shortcut_bytes(),
            Err(EncodeError::HotkeyMissingModifier)
        );

        let hotkey = Hotkey::new(HotkeyModifiers::CONTROL | HotkeyModifiers::ALT, 0x41);
        test.set_hotkey(Some(hotkey)).unwrap();
        let data = test.shortcut_bytes().unwrap();
        assert_eq!(data[64..66], [0x41, 0x06]);

        let (_, result) = Shortcut::parse_shortcut(&data).unwrap();
        assert_eq!(result.hotkey(), Some(hotkey));
    }

    #[test]
    fn test_decoded_hotkey_without_modifier() {
        let mut test = empty_target();
        test[64] = 0x41;
        let (_, result) = Shortcut::parse_shortcut(&test).unwrap();
        assert_eq!(result.shortcut_bytes().unwrap(), test);
    }

    #[test]
    fn test_flags_from_setters() {
        let mut test = Shortcut::new();
        test.flags = LinkFlags::HAS_NAME | LinkFlags::HAS_LINK_INFO;
        test.set_arguments("/c whoami");
        test.set_path("C:\\Windows\\System32\\cmd.exe");

        let flags = test.encode_flags();
        assert_eq!(
            flags,
            LinkFlags::HAS_ARGUMENTS | LinkFlags::HAS_LINK_INFO
        );

        test.set_arguments("");
        test.set_path("");
        assert_eq!(test.encode_flags(), LinkFlags::empty());
    }

    #[test]
    fn test_description_lone_surrogate() {
        let mut test = Shortcut::new();
        test.flags = LinkFlags::IS_UNICODE;
        test.set_description("AB");
        let mut data = test.shortcut_bytes().unwrap();
        // Count of two (2) then 'A'
        assert_eq!(data[76..80], [2, 0, 65, 0]);
        data[78] = 0x00;
        data[79] = 0xd8;

        let (_, mut result) = Shortcut::parse_shortcut(&data).unwrap();
        assert_eq!(result.description(), "\u{fffd}B");
        assert_eq!(result.shortcut_bytes().unwrap(), data);

        result.set_description("CB");
        let edited = result.shortcut_bytes().unwrap();
        assert_eq!(edited[78..82], [67, 0, 66, 0]);
    }

    #[test]
    fn test_path_embedded_null() {
        let mut test = Shortcut::new();
        test.set_path("C:\\a\0b");
        assert_eq!(test.shortcut_bytes(), Err(EncodeError::EmbeddedNull));
    }

    #[test]
    fn test_unicode_promotion() {
        let mut test = Shortcut::new();
        test.set_description("日本語");
        assert!(test.encode_flags().contains(LinkFlags::IS_UNICODE));

        let data = test.shortcut_bytes().unwrap();
        let (_, result) = Shortcut::parse_shortcut(&data).unwrap();
        assert_eq!(result.description(), "日本語");
    }

    #[test]
    fn test_set_network_path() {
        let mut test = Shortcut::new();
        test.set_path("\\\\server\\share\\docs\\report.docx");
        let network = test
            .link_info
            .as_ref()
            .unwrap()
            .network
            .as_ref()
            .unwrap();
        assert_eq!(network.net_name, "\\\\server\\share");
        assert_eq!(network.provider_type, NET_LANMAN);
        assert_eq!(test.path(), "\\\\server\\share\\docs\\report.docx");

        let data = test.shortcut_bytes().unwrap();
        let (_, result) = Shortcut::parse_shortcut(&data).unwrap();
        assert_eq!(result.path(), "\\\\server\\share\\docs\\report.docx");
        assert_eq!(result.shortcut_bytes().unwrap(), data);
    }

    #[test]
    fn test_environment_path() {
        let mut test = Shortcut::new();
        test.set_environment_path("%windir%\\notepad.exe").unwrap();
        assert!(test.encode_flags().contains(LinkFlags::HAS_EXP_STRING));
        assert_eq!(
            test.environment_path().as_deref(),
            Some("%windir%\\notepad.exe")
        );
        assert_eq!(test.extra_data.len(), 1);

        test.set_environment_path("%windir%\\regedit.exe").unwrap();
        assert_eq!(test.extra_data.len(), 1);

        test.set_icon_environment_path("%windir%\\regedit.exe").unwrap();
        assert!(test.flags.contains(LinkFlags::HAS_EXP_ICON));
        assert_eq!(
            test.icon_environment_path().as_deref(),
            Some("%windir%\\regedit.exe")
        );

        test.set_environment_path("").unwrap();
        assert!(!test.flags.contains(LinkFlags::HAS_EXP_STRING));
        assert_eq!(test.environment_path(), None);
        assert_eq!(test.extra_data.len(), 1);
    }

    #[test]
    fn test_overlay() {
        let mut test = empty_target();
        test.extend_from_slice(&[1, 2, 3]);
        let (_, result) = Shortcut::parse_shortcut(&test).unwrap();
        assert!(result.is_abnormal());
        assert_eq!(result.overlay(), [1, 2, 3]);
        assert_eq!(result.shortcut_bytes().unwrap(), test);
    }
}
