use shelllink::{
    decode, encode, EncodeError, FormatError, Hotkey, HotkeyModifiers, LinkFlags, Shortcut,
    WindowStyle,
};
use std::path::PathBuf;

fn projects_lnk() -> Vec<u8> {
    let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    test_location.push("tests/test_data/lnk/projects.lnk");
    std::fs::read(test_location).unwrap()
}

fn empty_target() -> Vec<u8> {
    let mut data = vec![
        76, 0, 0, 0, 1, 20, 2, 0, 0, 0, 0, 0, 192, 0, 0, 0, 0, 0, 0, 70,
    ];
    data.resize(80, 0);
    data[60] = 1;
    data
}

#[test]
fn test_projects_round_trip() {
    let test = projects_lnk();
    let shortcut = decode(&test).unwrap();
    assert_eq!(encode(&shortcut).unwrap(), test);
    assert_eq!(shortcut.encode_flags(), shortcut.flags);
}

#[test]
fn test_projects_report() {
    let shortcut = decode(&projects_lnk()).unwrap();
    let info = shortcut.info();
    assert_eq!(info.path, "C:\\Users\\bob\\Projects\\Rust\\artemis-core");
    assert_eq!(info.created, "2022-11-03T02:09:27.000Z");
    assert_eq!(info.drive_serial, "D49D126F");
    assert_eq!(info.hostname, "desktop-eis938n");
    assert_eq!(info.shellitem_count, 4);
    assert!(!info.is_abnormal);

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["file_size"], 4096);
}

#[test]
fn test_every_truncation() {
    let test = projects_lnk();
    for size in 0..test.len() {
        assert_eq!(
            decode(&test[..size]),
            Err(FormatError::Truncated),
            "prefix of {size} bytes"
        );
    }
}

#[test]
fn test_not_a_shortcut() {
    let mut test = projects_lnk();
    test[19] = 0;
    assert_eq!(decode(&test), Err(FormatError::NotAShortcut));
}

#[test]
fn test_malformed_link_info() {
    let mut test = projects_lnk();
    // LinkInfo header size of 8
    let link_info_offset = 76 + 2 + 332;
    test[link_info_offset + 4] = 8;
    assert_eq!(decode(&test), Err(FormatError::Malformed));
}

#[test]
fn test_empty_target() {
    let test = empty_target();
    let shortcut = decode(&test).unwrap();
    assert_eq!(shortcut.path(), "");
    assert_eq!(shortcut.window_style(), WindowStyle::Normal);
    assert_eq!(encode(&shortcut).unwrap(), test);
    assert_eq!(encode(&Shortcut::new()).unwrap(), test);
}

#[test]
fn test_unknown_show_command() {
    let mut test = empty_target();
    test[60] = 5;
    let shortcut = decode(&test).unwrap();
    assert_eq!(shortcut.window_style(), WindowStyle::Normal);
    assert_eq!(encode(&shortcut).unwrap(), test);
}

#[test]
fn test_hotkey() {
    let mut shortcut = Shortcut::new();
    let hotkey: Hotkey = "CTRL+ALT+L".parse().unwrap();
    shortcut.set_hotkey(Some(hotkey)).unwrap();

    let data = encode(&shortcut).unwrap();
    let result = decode(&data).unwrap();
    assert_eq!(result.hotkey().unwrap().to_string(), "CTRL+ALT+L");

    let result = shortcut.set_hotkey(Some(Hotkey::new(HotkeyModifiers::empty(), 0x4c)));
    assert_eq!(result, Err(EncodeError::HotkeyMissingModifier));
}

#[test]
fn test_description_limits() {
    let mut shortcut = Shortcut::new();
    shortcut.set_description(&"a".repeat(65535));
    let data = encode(&shortcut).unwrap();
    let result = decode(&data).unwrap();
    assert_eq!(result.description().len(), 65535);
    assert!(result.encode_flags().contains(LinkFlags::HAS_NAME));

    shortcut.set_description(&"a".repeat(65536));
    assert_eq!(encode(&shortcut), Err(EncodeError::StringTooLong));
}

#[test]
fn test_create_local_shortcut() {
    let mut shortcut = Shortcut::new();
    shortcut.set_path("C:\\Windows\\System32\\notepad.exe");
    shortcut.set_arguments("C:\\notes.txt");
    shortcut.set_working_directory("C:\\Windows\\System32");
    shortcut.set_window_style(WindowStyle::Maximized);

    let flags = shortcut.encode_flags();
    assert!(flags.contains(LinkFlags::HAS_LINK_INFO));
    assert!(flags.contains(LinkFlags::HAS_ARGUMENTS));
    assert!(flags.contains(LinkFlags::HAS_WORKING_DIR));
    assert!(!flags.contains(LinkFlags::HAS_NAME));

    let data = encode(&shortcut).unwrap();
    let result = decode(&data).unwrap();
    assert_eq!(result.path(), "C:\\Windows\\System32\\notepad.exe");
    assert_eq!(result.arguments(), "C:\\notes.txt");
    assert_eq!(result.window_style(), WindowStyle::Maximized);
    assert_eq!(encode(&result).unwrap(), data);
}

#[test]
fn test_create_network_shortcut() {
    let mut shortcut = Shortcut::new();
    shortcut.set_path("\\\\fileserver\\public\\reports\\q3.xlsx");

    let data = encode(&shortcut).unwrap();
    let result = decode(&data).unwrap();
    assert_eq!(result.path(), "\\\\fileserver\\public\\reports\\q3.xlsx");
    assert_eq!(result.info().network_share_name, "\\\\fileserver\\public");
}

#[test]
fn test_edit_projects() {
    let mut shortcut = decode(&projects_lnk()).unwrap();
    shortcut.set_description("Rust projects");
    shortcut.set_environment_path("%USERPROFILE%\\Projects").unwrap();

    let data = encode(&shortcut).unwrap();
    let result = decode(&data).unwrap();
    assert_eq!(result.description(), "Rust projects");
    assert_eq!(
        result.environment_path().as_deref(),
        Some("%USERPROFILE%\\Projects")
    );
    assert_eq!(result.path(), "C:\\Users\\bob\\Projects\\Rust\\artemis-core");
    assert!(result.flags.contains(LinkFlags::HAS_EXP_STRING));
}

#[test]
fn test_overlay() {
    let mut test = empty_target();
    test.extend_from_slice(b"trailing");
    let shortcut = decode(&test).unwrap();
    assert_eq!(shortcut.overlay(), b"trailing");
    assert!(shortcut.is_abnormal());
    assert_eq!(encode(&shortcut).unwrap(), test);
}

#[test]
fn test_description_unpaired_surrogate() {
    let mut shortcut = Shortcut::new();
    shortcut.flags = LinkFlags::IS_UNICODE;
    shortcut.set_description("AB");
    let mut test = encode(&shortcut).unwrap();
    // UTF16 'A' follows the two (2) byte count
    test[78..80].copy_from_slice(&[0x00, 0xd8]);

    let result = decode(&test).unwrap();
    assert_eq!(result.description(), "\u{fffd}B");
    assert_eq!(encode(&result).unwrap(), test);
}

#[test]
fn test_local_path_unpaired_surrogate() {
    let mut shortcut = Shortcut::new();
    shortcut.set_path("C:\\Users\\bob\\日本.txt");
    let mut test = encode(&shortcut).unwrap();

    // Replace the UTF16 '日' with a lone low surrogate
    let position = test
        .windows(2)
        .position(|unit| unit == [0xe5, 0x65])
        .unwrap();
    test[position..position + 2].copy_from_slice(&[0x00, 0xdc]);

    let result = decode(&test).unwrap();
    assert_eq!(result.path(), "C:\\Users\\bob\\\u{fffd}本.txt");
    assert_eq!(encode(&result).unwrap(), test);
}

#[test]
fn test_path_embedded_null() {
    let mut shortcut = Shortcut::new();
    shortcut.set_path("C:\\Users\\bob\0.txt");
    assert_eq!(encode(&shortcut), Err(EncodeError::EmbeddedNull));
}
