use self::{
    console::{parse_console, Console},
    environment::{environment_bytes, parse_environment, EnvironmentBlock},
    known::{parse_known, KnownFolder},
    property::parse_property,
    shim::parse_shim,
    special::{parse_special, SpecialFolder},
    tracker::{parse_tracker, Tracker},
};
use super::{error::EncodeError, shellitems::IdList};
use crate::utils::{
    nom_helper::{malformed, nom_data, nom_unsigned_four_bytes},
    writer::ByteWriter,
};
use log::warn;
use nom::{combinator::cut, Parser};

pub mod codepage;
pub mod console;
pub mod environment;
pub mod known;
pub mod property;
pub mod shim;
pub mod special;
pub mod tracker;

pub const ENVIRONMENT_SIGNATURE: u32 = 0xa0000001;
pub const CONSOLE_SIGNATURE: u32 = 0xa0000002;
pub const TRACKER_SIGNATURE: u32 = 0xa0000003;
pub const CODEPAGE_SIGNATURE: u32 = 0xa0000004;
pub const SPECIAL_FOLDER_SIGNATURE: u32 = 0xa0000005;
pub const DARWIN_SIGNATURE: u32 = 0xa0000006;
pub const ICON_ENVIRONMENT_SIGNATURE: u32 = 0xa0000007;
pub const SHIM_SIGNATURE: u32 = 0xa0000008;
pub const PROPERTY_STORE_SIGNATURE: u32 = 0xa0000009;
pub const KNOWN_FOLDER_SIGNATURE: u32 = 0xa000000b;
pub const VISTA_ID_LIST_SIGNATURE: u32 = 0xa000000c;

/// An `ExtraData` block. The data is kept exactly as read so unknown blocks survive a round trip
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ExtraBlock {
    pub signature: u32,
    /**Block data after the size and signature */
    pub data: Vec<u8>,
}

/// Typed view of an `ExtraBlock`
#[derive(Debug, PartialEq, Clone)]
pub enum ExtraData {
    EnvironmentVariables(EnvironmentBlock),
    Console(Console),
    Tracker(Tracker),
    ConsoleCodepage(u32),
    SpecialFolder(SpecialFolder),
    Darwin(EnvironmentBlock),
    IconEnvironment(EnvironmentBlock),
    Shim(String),
    /**Format IDs of the serialized property storages */
    PropertyStore(Vec<String>),
    KnownFolder(KnownFolder),
    VistaIdList(IdList),
    Unknown,
}

/// The `ExtraData` section. Ends with a terminal block whose size is less than or equal to four (4)
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub(crate) struct ExtraSection {
    pub(crate) blocks: Vec<ExtraBlock>,
    /**Raw terminal value. Normally zero */
    pub(crate) terminal: u32,
    /**Bytes after the terminal block */
    pub(crate) overlay: Vec<u8>,
}

impl ExtraSection {
    /// Parse the `ExtraData` blocks that are in the `Shortcut` data
    pub(crate) fn parse_extra_data(data: &[u8]) -> nom::IResult<&[u8], ExtraSection> {
        let mut section = ExtraSection::default();
        let mut input = data;

        loop {
            let (block_input, size) = nom_unsigned_four_bytes(input)?;
            let terminal_size = 4;
            if size <= terminal_size {
                section.terminal = size;
                section.overlay = block_input.to_vec();
                break;
            }

            let min_size = 8;
            if size < min_size {
                return malformed(input);
            }
            let (block_input, signature) = nom_unsigned_four_bytes(block_input)?;
            let (remaining_input, block_data) = nom_data(block_input, (size - min_size) as u64)?;

            section.blocks.push(ExtraBlock {
                signature,
                data: block_data.to_vec(),
            });
            input = remaining_input;
        }

        Ok((&[], section))
    }

    /// Write every block, the terminal block, and any overlay data
    pub(crate) fn write_extra_data(&self, writer: &mut ByteWriter) -> Result<(), EncodeError> {
        for block in &self.blocks {
            writer.write_data(&block.block_bytes()?)?;
        }
        writer.write_four_bytes(self.terminal)?;
        writer.write_data(&self.overlay)
    }
}

impl ExtraBlock {
    /// Environment variable target path block. Ex: %windir%\system32\calc.exe
    pub fn environment(path: &str) -> Result<ExtraBlock, EncodeError> {
        Ok(ExtraBlock {
            signature: ENVIRONMENT_SIGNATURE,
            data: environment_bytes(path)?,
        })
    }

    /// Environment variable icon path block
    pub fn icon_environment(path: &str) -> Result<ExtraBlock, EncodeError> {
        Ok(ExtraBlock {
            signature: ICON_ENVIRONMENT_SIGNATURE,
            data: environment_bytes(path)?,
        })
    }

    /// Size, signature, and data
    pub(crate) fn block_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let header_size = 8;
        let mut writer = ByteWriter::new();
        writer.write_size(header_size + self.data.len())?;
        writer.write_four_bytes(self.signature)?;
        writer.write_data(&self.data)?;
        Ok(writer.into_bytes())
    }

    /// Interpret the block data. Blocks that cannot be interpreted are `Unknown`
    pub fn view(&self) -> ExtraData {
        let data = self.data.as_slice();
        let result = match self.signature {
            ENVIRONMENT_SIGNATURE => {
                parse_environment(data).map(|(_, block)| ExtraData::EnvironmentVariables(block))
            }
            CONSOLE_SIGNATURE => parse_console(data).map(|(_, console)| ExtraData::Console(console)),
            TRACKER_SIGNATURE => parse_tracker(data).map(|(_, tracker)| ExtraData::Tracker(tracker)),
            CODEPAGE_SIGNATURE => codepage::parse_codepage(data)
                .map(|(_, codepage)| ExtraData::ConsoleCodepage(codepage)),
            SPECIAL_FOLDER_SIGNATURE => {
                parse_special(data).map(|(_, special)| ExtraData::SpecialFolder(special))
            }
            DARWIN_SIGNATURE => parse_environment(data).map(|(_, block)| ExtraData::Darwin(block)),
            ICON_ENVIRONMENT_SIGNATURE => {
                parse_environment(data).map(|(_, block)| ExtraData::IconEnvironment(block))
            }
            SHIM_SIGNATURE => parse_shim(data).map(|(_, shim)| ExtraData::Shim(shim)),
            PROPERTY_STORE_SIGNATURE => {
                parse_property(data).map(|(_, formats)| ExtraData::PropertyStore(formats))
            }
            KNOWN_FOLDER_SIGNATURE => {
                parse_known(data).map(|(_, known)| ExtraData::KnownFolder(known))
            }
            VISTA_ID_LIST_SIGNATURE => cut(IdList::parse_items)
                .parse(data)
                .map(|(_, items)| ExtraData::VistaIdList(IdList { items })),
            _ => return ExtraData::Unknown,
        };

        match result {
            Ok(view) => view,
            Err(err) => {
                warn!(
                    "[shortcuts] Could not parse extra data block {:#x}: {err:?}",
                    self.signature
                );
                ExtraData::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ExtraBlock, ExtraData, ExtraSection, TRACKER_SIGNATURE};
    use crate::utils::writer::ByteWriter;

    #[test]
    fn test_parse_extra_data() {
        let test = [
            96, 0, 0, 0, 3, 0, 0, 160, 88, 0, 0, 0, 0, 0, 0, 0, 100, 101, 115, 107, 116, 111, 112,
            45, 101, 105, 115, 57, 51, 56, 110, 0, 104, 69, 141, 62, 17, 228, 24, 73, 143, 120,
            151, 205, 108, 179, 64, 197, 192, 88, 241, 9, 106, 90, 237, 17, 161, 13, 8, 0, 39, 110,
            180, 94, 104, 69, 141, 62, 17, 228, 24, 73, 143, 120, 151, 205, 108, 179, 64, 197, 192,
            88, 241, 9, 106, 90, 237, 17, 161, 13, 8, 0, 39, 110, 180, 94, 69, 0, 0, 0, 9, 0, 0,
            160, 57, 0, 0, 0, 49, 83, 80, 83, 177, 22, 109, 68, 173, 141, 112, 72, 167, 72, 64, 46,
            164, 61, 120, 140, 29, 0, 0, 0, 104, 0, 0, 0, 0, 72, 0, 0, 0, 144, 47, 84, 8, 0, 0, 0,
            0, 0, 0, 80, 31, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        ];

        let (_, result) = ExtraSection::parse_extra_data(&test).unwrap();
        assert_eq!(result.blocks.len(), 2);
        assert_eq!(result.blocks[0].signature, TRACKER_SIGNATURE);
        assert_eq!(result.blocks[0].data.len(), 88);
        assert_eq!(result.terminal, 0);
        assert!(result.overlay.is_empty());

        match result.blocks[0].view() {
            ExtraData::Tracker(tracker) => assert_eq!(tracker.machine_id, "desktop-eis938n"),
            _ => panic!("expected tracker block"),
        }
        match result.blocks[1].view() {
            ExtraData::PropertyStore(formats) => {
                assert_eq!(formats, vec!["446d16b1-8dad-4870-a748-402ea43d788c"])
            }
            _ => panic!("expected property store block"),
        }

        let mut writer = ByteWriter::new();
        result.write_extra_data(&mut writer).unwrap();
        assert_eq!(writer.into_bytes(), test);
    }

    #[test]
    fn test_terminal_and_overlay() {
        let test = [2, 0, 0, 0, 65, 66, 67];
        let (_, result) = ExtraSection::parse_extra_data(&test).unwrap();
        assert!(result.blocks.is_empty());
        assert_eq!(result.terminal, 2);
        assert_eq!(result.overlay, [65, 66, 67]);

        let mut writer = ByteWriter::new();
        result.write_extra_data(&mut writer).unwrap();
        assert_eq!(writer.into_bytes(), test);
    }

    #[test]
    fn test_missing_terminal() {
        let test = [12, 0, 0, 0, 4, 0, 0, 160, 228, 4, 0, 0];
        let result = ExtraSection::parse_extra_data(&test);
        assert!(matches!(result, Err(nom::Err::Error(_))));

        // Block data runs past the end of the buffer
        let test = [200, 0, 0, 0, 4, 0, 0, 160, 228, 4, 0, 0];
        let result = ExtraSection::parse_extra_data(&test);
        assert!(matches!(result, Err(nom::Err::Error(_))));
    }

    #[test]
    fn test_bad_block_size() {
        let test = [6, 0, 0, 0, 1, 2, 0, 0, 0, 0];
        let result = ExtraSection::parse_extra_data(&test);
        assert!(matches!(result, Err(nom::Err::Failure(_))));
    }

    #[test]
    fn test_unknown_block() {
        let test = ExtraBlock {
            signature: 0xa0000077,
            data: vec![1, 2, 3, 4],
        };
        assert_eq!(test.view(), ExtraData::Unknown);
        assert_eq!(test.block_bytes().unwrap(), [12, 0, 0, 0, 119, 0, 0, 160, 1, 2, 3, 4]);

        // Known signature with data that cannot be interpreted
        let test = ExtraBlock {
            signature: TRACKER_SIGNATURE,
            data: vec![1, 2, 3, 4],
        };
        assert_eq!(test.view(), ExtraData::Unknown);
    }

    #[test]
    fn test_environment_builder() {
        let result = ExtraBlock::environment("%windir%\\system32\\calc.exe").unwrap();
        assert_eq!(result.block_bytes().unwrap().len(), 0x314);
        match result.view() {
            ExtraData::EnvironmentVariables(block) => {
                assert_eq!(block.target_ansi, "%windir%\\system32\\calc.exe");
                assert_eq!(block.target_unicode, "%windir%\\system32\\calc.exe");
            }
            _ => panic!("expected environment block"),
        }

        let result = ExtraBlock::icon_environment("%SystemRoot%\\shell32.dll").unwrap();
        assert!(matches!(result.view(), ExtraData::IconEnvironment(_)));
    }
}
