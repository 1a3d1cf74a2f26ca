mod core;
mod error;
mod filesystem;
pub mod shortcuts;
mod structs;
mod utils;

pub use crate::core::{parse_toml_data, parse_toml_file};
pub use crate::error::TomlError;
pub use crate::shortcuts::{
    error::{EncodeError, FormatError, LnkError},
    extras::{ExtraBlock, ExtraData},
    header::LinkFlags,
    hotkey::{Hotkey, HotkeyModifiers},
    parser::{
        decode, encode, grab_lnk_directory, grab_lnk_file, read_shortcut, write_shortcut,
    },
    shortcut::Shortcut,
};
pub use common::windows::{ShortcutInfo, WindowStyle};
