use super::{error::EncodeError, header::LinkFlags};
use crate::utils::{
    nom_helper::nom_length_prefixed_string,
    strings::{is_latin1, StringEncoding},
    writer::ByteWriter,
};
use log::warn;

/// The optional `StringData` strings. `None` means the string is not in the file, `Some("")` is an empty string that is
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct StringData {
    pub description: Option<String>,
    pub relative_path: Option<String>,
    pub working_directory: Option<String>,
    pub arguments: Option<String>,
    pub icon_location: Option<String>,
}

impl StringData {
    /// Extract strings from `shortcut` data. Strings always follow the order: description, relative path, working directory, arguments, icon location
    pub(crate) fn parse_strings<'a>(
        data: &'a [u8],
        flags: &LinkFlags,
    ) -> nom::IResult<&'a [u8], (StringData, bool)> {
        let encoding = if flags.contains(LinkFlags::IS_UNICODE) {
            StringEncoding::Unicode
        } else {
            StringEncoding::Ansi
        };

        let mut strings = StringData::default();
        let mut is_abnormal = false;
        let mut input = data;

        let string_flags = [
            LinkFlags::HAS_NAME,
            LinkFlags::HAS_RELATIVE_PATH,
            LinkFlags::HAS_WORKING_DIR,
            LinkFlags::HAS_ARGUMENTS,
            LinkFlags::HAS_ICON_LOCATION,
        ];
        for flag in string_flags {
            if !flags.contains(flag) {
                continue;
            }
            let (remaining, value) = nom_length_prefixed_string(input, &encoding)?;
            input = remaining;

            if is_abnormal_size(&value) {
                is_abnormal = true;
            }
            *strings.string_mut(flag) = Some(value);
        }

        Ok((input, (strings, is_abnormal)))
    }

    /// Write the strings present. Encoding must match the `IsUnicode` flag written in the header
    pub(crate) fn write_strings(
        &self,
        writer: &mut ByteWriter,
        encoding: &StringEncoding,
    ) -> Result<(), EncodeError> {
        for value in self.values().into_iter().flatten() {
            writer.write_length_prefixed_string(value, encoding)?;
        }
        Ok(())
    }

    /// Flags for the strings present
    pub(crate) fn flags(&self) -> LinkFlags {
        let mut flags = LinkFlags::empty();
        let string_flags = [
            LinkFlags::HAS_NAME,
            LinkFlags::HAS_RELATIVE_PATH,
            LinkFlags::HAS_WORKING_DIR,
            LinkFlags::HAS_ARGUMENTS,
            LinkFlags::HAS_ICON_LOCATION,
        ];
        for (flag, value) in string_flags.into_iter().zip(self.values()) {
            if value.is_some() {
                flags |= flag;
            }
        }
        flags
    }

    /// Check if any string has characters that cannot be stored as a single byte string
    pub(crate) fn needs_unicode(&self) -> bool {
        self.values()
            .into_iter()
            .flatten()
            .any(|value| !is_latin1(value))
    }

    /// Check if any string is larger than Windows creates
    pub(crate) fn is_abnormal(&self) -> bool {
        self.values()
            .into_iter()
            .flatten()
            .any(|value| is_abnormal_size(value))
    }

    fn values(&self) -> [&Option<String>; 5] {
        [
            &self.description,
            &self.relative_path,
            &self.working_directory,
            &self.arguments,
            &self.icon_location,
        ]
    }

    fn string_mut(&mut self, flag: LinkFlags) -> &mut Option<String> {
        if flag == LinkFlags::HAS_NAME {
            &mut self.description
        } else if flag == LinkFlags::HAS_RELATIVE_PATH {
            &mut self.relative_path
        } else if flag == LinkFlags::HAS_WORKING_DIR {
            &mut self.working_directory
        } else if flag == LinkFlags::HAS_ARGUMENTS {
            &mut self.arguments
        } else {
            &mut self.icon_location
        }
    }
}

/**
 * The Windows implementation of the Shortcut format limits string sizes to 260 characters
 * Even though the Shortcut file format allows string sizes up to 64KB
 */
fn is_abnormal_size(value: &str) -> bool {
    let max_string_size = 260;
    if value.encode_utf16().count() > max_string_size {
        // Shortcut files with larger strings were created manually or using non-Windows tools
        // This is sometimes used by threat actors to hide Shortcut data from forensic tools
        warn!(
            "[shortcuts] Got abnormal string size. LNK data could be malformed or possibly malicious"
        );
        return true;
    }
    false
}
