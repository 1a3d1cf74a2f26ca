/**
 * The writing side of `nom_helper`. Every `nom_*` parser has a matching `ByteWriter` method
 * All values are written as little endian
 */
use super::strings::StringEncoding;
use crate::shortcuts::error::EncodeError;
use byteorder::{LittleEndian, WriteBytesExt};
use log::{error, warn};
use std::io::Write;
use uuid::Uuid;

#[derive(Debug, Default)]
pub(crate) struct ByteWriter {
    data: Vec<u8>,
}

impl ByteWriter {
    pub(crate) fn new() -> ByteWriter {
        ByteWriter { data: Vec::new() }
    }

    /// Bytes written so far
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub(crate) fn write_one_byte(&mut self, value: u8) -> Result<(), EncodeError> {
        let result = self.data.write_u8(value);
        write_status(result)
    }

    pub(crate) fn write_two_bytes(&mut self, value: u16) -> Result<(), EncodeError> {
        let result = self.data.write_u16::<LittleEndian>(value);
        write_status(result)
    }

    pub(crate) fn write_four_bytes(&mut self, value: u32) -> Result<(), EncodeError> {
        let result = self.data.write_u32::<LittleEndian>(value);
        write_status(result)
    }

    pub(crate) fn write_signed_four_bytes(&mut self, value: i32) -> Result<(), EncodeError> {
        let result = self.data.write_i32::<LittleEndian>(value);
        write_status(result)
    }

    pub(crate) fn write_eight_bytes(&mut self, value: u64) -> Result<(), EncodeError> {
        let result = self.data.write_u64::<LittleEndian>(value);
        write_status(result)
    }

    /// Write a GUID using the mixed endian layout
    pub(crate) fn write_guid(&mut self, guid: &Uuid) -> Result<(), EncodeError> {
        self.write_data(&guid.to_bytes_le())
    }

    pub(crate) fn write_data(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        let result = self.data.write_all(data);
        write_status(result)
    }

    /// Write a size as four bytes. Fails if the size does not fit
    pub(crate) fn write_size(&mut self, size: usize) -> Result<(), EncodeError> {
        let value = match u32::try_from(size) {
            Ok(result) => result,
            Err(_err) => {
                error!("[shortcuts] Size {size} is too large for a four byte size field");
                return Err(EncodeError::BlockTooLarge);
            }
        };
        self.write_four_bytes(value)
    }

    /// Write a two (2) byte count of characters followed by the string. No end of string character is written
    pub(crate) fn write_length_prefixed_string(
        &mut self,
        value: &str,
        encoding: &StringEncoding,
    ) -> Result<(), EncodeError> {
        let units = string_units(value, encoding);
        // Count is in characters, not bytes
        let count = match encoding {
            StringEncoding::Unicode => units.len() / 2,
            StringEncoding::Ansi => units.len(),
        };
        if count > u16::MAX as usize {
            error!("[shortcuts] String has {count} characters. Max is 65535");
            return Err(EncodeError::StringTooLong);
        }

        self.write_two_bytes(count as u16)?;
        self.write_data(&units)
    }

    /// Write a string followed by an end of string character. The string cannot contain an end of string character
    pub(crate) fn write_null_terminated_string(
        &mut self,
        value: &str,
        encoding: &StringEncoding,
    ) -> Result<(), EncodeError> {
        if value.contains('\0') {
            error!("[shortcuts] String {value:?} contains an end of string character");
            return Err(EncodeError::EmbeddedNull);
        }
        let units = string_units(value, encoding);
        self.write_data(&units)?;
        match encoding {
            StringEncoding::Unicode => self.write_two_bytes(0),
            StringEncoding::Ansi => self.write_one_byte(0),
        }
    }
}

/// Convert a string to its encoded bytes. Characters that do not fit in a single byte are written as `?`
pub(crate) fn string_units(value: &str, encoding: &StringEncoding) -> Vec<u8> {
    match encoding {
        StringEncoding::Unicode => value
            .encode_utf16()
            .flat_map(|unit| unit.to_le_bytes())
            .collect(),
        StringEncoding::Ansi => {
            let mut replaced = false;
            let bytes = value
                .chars()
                .map(|character| match u8::try_from(character as u32) {
                    Ok(byte) => byte,
                    Err(_err) => {
                        replaced = true;
                        b'?'
                    }
                })
                .collect();
            if replaced {
                warn!("[shortcuts] String {value} cannot be stored as a single byte string");
            }
            bytes
        }
    }
}

fn write_status(result: std::io::Result<()>) -> Result<(), EncodeError> {
    match result {
        Ok(_) => Ok(()),
        Err(err) => {
            error!("[shortcuts] Failed to write shortcut bytes: {err:?}");
            Err(EncodeError::Write)
        }
    }
}
