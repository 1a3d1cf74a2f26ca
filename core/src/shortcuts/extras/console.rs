use crate::utils::{
    nom_helper::{nom_data, nom_unsigned_four_bytes, nom_unsigned_two_bytes},
    strings::extract_utf16_string,
};
use common::windows::{ConsoleCursorSize, ConsoleFontFamily};

/// Console window settings used when the target is a console application
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Console {
    pub fill_attributes: u16,
    pub popup_fill_attributes: u16,
    pub screen_buffer_width: u16,
    pub screen_buffer_height: u16,
    pub window_width: u16,
    pub window_height: u16,
    pub window_x_coordinate: u16,
    pub window_y_coordinate: u16,
    pub font_size: u32,
    pub font_family: u32,
    pub font_weight: u32,
    pub face_name: String,
    pub cursor_size: u32,
    pub full_screen: u32,
    pub quick_edit: u32,
    pub insert_mode: u32,
    pub auto_position: u32,
    pub history_buffer_size: u32,
    pub number_history_buffers: u32,
    pub history_no_duplicates: u32,
    pub color_table: Vec<u32>,
}

/// Parse `Shortcut` Console info
pub(crate) fn parse_console(data: &[u8]) -> nom::IResult<&[u8], Console> {
    let (input, fill_attributes) = nom_unsigned_two_bytes(data)?;
    let (input, popup_fill_attributes) = nom_unsigned_two_bytes(input)?;
    let (input, screen_buffer_width) = nom_unsigned_two_bytes(input)?;
    let (input, screen_buffer_height) = nom_unsigned_two_bytes(input)?;
    let (input, window_width) = nom_unsigned_two_bytes(input)?;
    let (input, window_height) = nom_unsigned_two_bytes(input)?;
    let (input, window_x_coordinate) = nom_unsigned_two_bytes(input)?;
    let (input, window_y_coordinate) = nom_unsigned_two_bytes(input)?;

    let (input, _unused) = nom_unsigned_four_bytes(input)?;
    let (input, _unused) = nom_unsigned_four_bytes(input)?;

    let (input, font_size) = nom_unsigned_four_bytes(input)?;
    let (input, font_family) = nom_unsigned_four_bytes(input)?;
    let (input, font_weight) = nom_unsigned_four_bytes(input)?;

    let string_size = 64;
    let (input, string_data) = nom_data(input, string_size)?;

    let (input, cursor_size) = nom_unsigned_four_bytes(input)?;
    let (input, full_screen) = nom_unsigned_four_bytes(input)?;
    let (input, quick_edit) = nom_unsigned_four_bytes(input)?;
    let (input, insert_mode) = nom_unsigned_four_bytes(input)?;
    let (input, auto_position) = nom_unsigned_four_bytes(input)?;
    let (input, history_buffer_size) = nom_unsigned_four_bytes(input)?;
    let (input, number_history_buffers) = nom_unsigned_four_bytes(input)?;
    let (mut input, history_no_duplicates) = nom_unsigned_four_bytes(input)?;

    let color_count = 16;
    let mut color_table = Vec::new();
    while color_table.len() < color_count {
        let (color_input, color) = nom_unsigned_four_bytes(input)?;
        color_table.push(color);
        input = color_input;
    }

    let console = Console {
        fill_attributes,
        popup_fill_attributes,
        screen_buffer_width,
        screen_buffer_height,
        window_width,
        window_height,
        window_x_coordinate,
        window_y_coordinate,
        font_size,
        font_family,
        font_weight,
        face_name: extract_utf16_string(string_data),
        cursor_size,
        full_screen,
        quick_edit,
        insert_mode,
        auto_position,
        history_buffer_size,
        number_history_buffers,
        history_no_duplicates,
        color_table,
    };

    Ok((input, console))
}

impl Console {
    /// Font height in pixels. Stored in the high word of the font size
    pub fn font_height(&self) -> u32 {
        self.font_size >> 16
    }

    /// Get Font Family
    pub fn family(&self) -> ConsoleFontFamily {
        // Low 4 bits are the font pitch
        let family_mask = 0xfff0;
        match self.font_family & family_mask {
            0x0 => ConsoleFontFamily::DontCare,
            0x10 => ConsoleFontFamily::Roman,
            0x20 => ConsoleFontFamily::Swiss,
            0x30 => ConsoleFontFamily::Modern,
            0x40 => ConsoleFontFamily::Script,
            0x50 => ConsoleFontFamily::Decorative,
            _ => ConsoleFontFamily::Unknown,
        }
    }

    pub fn is_bold(&self) -> bool {
        let bold = 700;
        self.font_weight >= bold
    }

    /// Get Cursor Size
    pub fn cursor(&self) -> ConsoleCursorSize {
        let small = 25;
        let normal = 50;
        let large = 100;

        if self.cursor_size <= small {
            ConsoleCursorSize::Small
        } else if self.cursor_size <= normal {
            ConsoleCursorSize::Normal
        } else if self.cursor_size <= large {
            ConsoleCursorSize::Large
        } else {
            ConsoleCursorSize::Unknown
        }
    }
}
