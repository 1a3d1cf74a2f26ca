use super::error::{EncodeError, LnkError};
use bitflags::bitflags;
use log::error;
use std::{fmt, str::FromStr};

bitflags! {
    /// Modifier keys of a `Shortcut` hotkey. Stored in the high byte of the hotkey value
    #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
    pub struct HotkeyModifiers: u8 {
        const SHIFT = 0x1;
        const CONTROL = 0x2;
        const ALT = 0x4;
    }
}

impl Default for HotkeyModifiers {
    fn default() -> Self {
        HotkeyModifiers::empty()
    }
}

/// Keyboard shortcut that launches the `Shortcut` target
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Hotkey {
    pub modifiers: HotkeyModifiers,
    /**Windows virtual key code */
    pub key: u8,
}

/// Virtual key codes with names other than a single letter or digit
const NAMED_KEYS: [(u8, &str); 26] = [
    (0x08, "BACKSPACE"),
    (0x09, "TAB"),
    (0x0d, "ENTER"),
    (0x13, "PAUSE"),
    (0x14, "CAPSLOCK"),
    (0x1b, "ESC"),
    (0x20, "SPACE"),
    (0x21, "PAGEUP"),
    (0x22, "PAGEDOWN"),
    (0x23, "END"),
    (0x24, "HOME"),
    (0x25, "LEFT"),
    (0x26, "UP"),
    (0x27, "RIGHT"),
    (0x28, "DOWN"),
    (0x2d, "INSERT"),
    (0x2e, "DELETE"),
    (0x6a, "MULTIPLY"),
    (0x6b, "ADD"),
    (0x6d, "SUBTRACT"),
    (0x6e, "DECIMAL"),
    (0x6f, "DIVIDE"),
    (0x90, "NUMLOCK"),
    (0x91, "SCROLLLOCK"),
    (0xba, ";"),
    (0xbc, ","),
];

impl Hotkey {
    pub fn new(modifiers: HotkeyModifiers, key: u8) -> Hotkey {
        Hotkey { modifiers, key }
    }

    /// Split the raw header value. Low byte is the key, high byte the modifiers. Zero means no hotkey
    pub(crate) fn from_raw(value: u16) -> Option<Hotkey> {
        if value == 0 {
            return None;
        }
        let [key, modifiers] = value.to_le_bytes();
        Some(Hotkey {
            modifiers: HotkeyModifiers::from_bits_retain(modifiers),
            key,
        })
    }

    pub(crate) fn raw(&self) -> u16 {
        u16::from_le_bytes([self.key, self.modifiers.bits()])
    }

    /// Windows only accepts hotkeys that include SHIFT, CTRL or ALT
    pub(crate) fn validate(&self) -> Result<(), EncodeError> {
        if !self.modifiers.intersects(HotkeyModifiers::all()) {
            error!("[shortcuts] Hotkey {self} has no modifier key");
            return Err(EncodeError::HotkeyMissingModifier);
        }
        Ok(())
    }

    fn key_name(key: u8) -> String {
        match key {
            0x30..=0x39 | 0x41..=0x5a => (key as char).to_string(),
            0x60..=0x69 => format!("NUM{}", key - 0x60),
            0x70..=0x87 => format!("F{}", key - 0x6f),
            _ => match NAMED_KEYS.iter().find(|(code, _)| *code == key) {
                Some((_, name)) => name.to_string(),
                None => format!("0x{key:02X}"),
            },
        }
    }

    fn key_code(name: &str) -> Option<u8> {
        let upper = name.to_uppercase();
        if upper.len() == 1 {
            let character = upper.chars().next()?;
            if character.is_ascii_uppercase() || character.is_ascii_digit() {
                return Some(character as u8);
            }
        }
        if let Some((code, _)) = NAMED_KEYS.iter().find(|(_, key_name)| *key_name == upper) {
            return Some(*code);
        }
        if let Some(hex) = upper.strip_prefix("0X") {
            return u8::from_str_radix(hex, 16).ok();
        }
        if let Some(number) = upper.strip_prefix("NUM") {
            let value: u8 = number.parse().ok()?;
            if value <= 9 {
                return Some(0x60 + value);
            }
            return None;
        }
        if let Some(number) = upper.strip_prefix('F') {
            let value: u8 = number.parse().ok()?;
            if (1..=24).contains(&value) {
                return Some(0x6f + value);
            }
        }
        None
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(HotkeyModifiers::CONTROL) {
            write!(f, "CTRL+")?;
        }
        if self.modifiers.contains(HotkeyModifiers::SHIFT) {
            write!(f, "SHIFT+")?;
        }
        if self.modifiers.contains(HotkeyModifiers::ALT) {
            write!(f, "ALT+")?;
        }
        write!(f, "{}", Hotkey::key_name(self.key))
    }
}

impl FromStr for Hotkey {
    type Err = LnkError;

    /// Parse hotkey text such as `CTRL+ALT+A`. The last component is the key
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = value.split('+').map(str::trim).collect();
        let key_part = parts.pop().unwrap_or_default();

        let mut modifiers = HotkeyModifiers::empty();
        for part in parts {
            match part.to_uppercase().as_str() {
                "CTRL" | "CONTROL" => modifiers |= HotkeyModifiers::CONTROL,
                "SHIFT" => modifiers |= HotkeyModifiers::SHIFT,
                "ALT" => modifiers |= HotkeyModifiers::ALT,
                _ => {
                    error!("[shortcuts] Unknown hotkey modifier {part} in {value}");
                    return Err(LnkError::BadHotkey);
                }
            }
        }

        let key = match Hotkey::key_code(key_part) {
            Some(result) => result,
            None => {
                error!("[shortcuts] Unknown hotkey key {key_part} in {value}");
                return Err(LnkError::BadHotkey);
            }
        };

        Ok(Hotkey { modifiers, key })
    }
}
