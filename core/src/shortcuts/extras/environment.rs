use crate::{
    shortcuts::error::EncodeError,
    utils::{
        nom_helper::nom_data,
        strings::{extract_latin1_string, extract_utf16_string, StringEncoding},
        writer::string_units,
    },
};
use log::error;

/// Path stored by the Environment Variable, Icon Environment and Darwin blocks
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct EnvironmentBlock {
    pub target_ansi: String,
    pub target_unicode: String,
}

const ANSI_SIZE: usize = 260;
const UNICODE_SIZE: usize = 520;

/// Parse a block with a 260 byte single byte path followed by a 520 byte UTF16 path
pub(crate) fn parse_environment(data: &[u8]) -> nom::IResult<&[u8], EnvironmentBlock> {
    let (input, ansi_data) = nom_data(data, ANSI_SIZE as u64)?;
    let (input, unicode_data) = nom_data(input, UNICODE_SIZE as u64)?;

    let block = EnvironmentBlock {
        target_ansi: extract_latin1_string(ansi_data),
        target_unicode: extract_utf16_string(unicode_data),
    };
    Ok((input, block))
}

/// Create block data for a path. Both copies of the path are padded with end of string characters
pub(crate) fn environment_bytes(path: &str) -> Result<Vec<u8>, EncodeError> {
    // Room is needed for the end of string character
    if path.encode_utf16().count() >= ANSI_SIZE {
        error!("[shortcuts] Environment path {path} is too long");
        return Err(EncodeError::StringTooLong);
    }

    let mut ansi = string_units(path, &StringEncoding::Ansi);
    ansi.resize(ANSI_SIZE, 0);
    let mut unicode = string_units(path, &StringEncoding::Unicode);
    unicode.resize(UNICODE_SIZE, 0);

    ansi.append(&mut unicode);
    Ok(ansi)
}
