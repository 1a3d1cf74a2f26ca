use std::fmt;

/// Errors returned when decoding `Shortcut` bytes
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormatError {
    /// Header size or CLSID does not match
    NotAShortcut,
    /// Data ended before a declared section
    Truncated,
    /// Lengths, offsets or strings are inconsistent with the format
    Malformed,
}

impl std::error::Error for FormatError {}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::NotAShortcut => write!(f, "Not shortcut data"),
            FormatError::Truncated => write!(f, "Shortcut data is truncated"),
            FormatError::Malformed => write!(f, "Shortcut data is malformed"),
        }
    }
}

/// Errors returned when encoding a `Shortcut`
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EncodeError {
    /// A length prefixed string has more than 65535 units
    StringTooLong,
    /// A hotkey is set without SHIFT, CTRL or ALT
    HotkeyMissingModifier,
    /// A section is larger than its size field allows
    BlockTooLarge,
    /// An end of string terminated string contains an end of string character
    EmbeddedNull,
    Write,
}

impl std::error::Error for EncodeError {}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::StringTooLong => write!(f, "String longer than 65535 characters"),
            EncodeError::HotkeyMissingModifier => {
                write!(f, "Hotkey requires SHIFT, CTRL or ALT modifier")
            }
            EncodeError::BlockTooLarge => write!(f, "Shortcut section too large"),
            EncodeError::EmbeddedNull => write!(f, "String contains an end of string character"),
            EncodeError::Write => write!(f, "Could not write shortcut data"),
        }
    }
}

/// Errors returned when reading or writing `Shortcut` files
#[derive(Debug)]
pub enum LnkError {
    ReadFile,
    WriteFile,
    ReadDirectory,
    BadHotkey,
    BadWindowStyle,
    Decode(FormatError),
    Encode(EncodeError),
}

impl std::error::Error for LnkError {}

impl fmt::Display for LnkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LnkError::ReadFile => write!(f, "Could not read lnk file"),
            LnkError::WriteFile => write!(f, "Could not write lnk file"),
            LnkError::ReadDirectory => write!(f, "Could not read directory"),
            LnkError::BadHotkey => write!(f, "Could not parse hotkey"),
            LnkError::BadWindowStyle => write!(f, "Unknown window style"),
            LnkError::Decode(err) => write!(f, "Failed to parse shortcut data: {err}"),
            LnkError::Encode(err) => write!(f, "Failed to create shortcut data: {err}"),
        }
    }
}

impl From<FormatError> for LnkError {
    fn from(err: FormatError) -> Self {
        LnkError::Decode(err)
    }
}

impl From<EncodeError> for LnkError {
    fn from(err: EncodeError) -> Self {
        LnkError::Encode(err)
    }
}
