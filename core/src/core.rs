use crate::{
    error::TomlError,
    filesystem::files::{is_directory, read_file},
    shortcuts::parser::{grab_lnk_directory, grab_lnk_file},
    structs::toml::ShortcutToml,
    utils::{logging::create_log_file, output::output_data},
};
use log::{error, info};
use simplelog::{Config, WriteLogger};

/// Parse a TOML file at provided path
pub fn parse_toml_file(path: &str) -> Result<(), TomlError> {
    let buffer_results = read_file(path);
    let buffer = match buffer_results {
        Ok(results) => results,
        Err(err) => {
            error!("[shelllink] Could not read TOML file {path}: {err:?}");
            return Err(TomlError::NoFile);
        }
    };

    parse_toml_data(&buffer)
}

/// Parse an already read TOML file
pub fn parse_toml_data(data: &[u8]) -> Result<(), TomlError> {
    let collection = match ShortcutToml::parse_shortcut_toml(data) {
        Ok(result) => result,
        Err(_err) => return Err(TomlError::BadToml),
    };
    shortcut_collection(&collection)
}

/// Parse every `Shortcut` path in the TOML collection and output the results
fn shortcut_collection(collection: &ShortcutToml) -> Result<(), TomlError> {
    if let Ok((log_file, level)) = create_log_file(&collection.output) {
        let _ = WriteLogger::init(level, Config::default(), log_file);
    }

    let mut entries = Vec::new();
    for options in &collection.shortcuts {
        let result = if is_directory(&options.path) {
            grab_lnk_directory(&options.path)
        } else {
            grab_lnk_file(&options.path).map(|info| vec![info])
        };

        match result {
            Ok(mut info) => entries.append(&mut info),
            Err(err) => {
                error!("[shelllink] Could not parse shortcuts at {}: {err:?}", options.path);
                continue;
            }
        }
    }

    let serde_data = match serde_json::to_value(&entries) {
        Ok(result) => result,
        Err(err) => {
            error!("[shelllink] Failed to serialize shortcuts: {err:?}");
            return Err(TomlError::Collection);
        }
    };

    match output_data(&serde_data, &collection.output) {
        Ok(path) => info!("[shelllink] Output {} shortcuts to {path}", entries.len()),
        Err(err) => {
            error!("[shelllink] Failed to output shortcuts: {err:?}");
            return Err(TomlError::Collection);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_toml_data, parse_toml_file, shortcut_collection};
    use crate::{
        filesystem::files::read_file,
        structs::toml::{Output, ShortcutOptions, ShortcutToml},
    };
    use std::path::PathBuf;

    #[test]
    fn test_parse_toml_file() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests/test_data/shortcuts.toml");
        parse_toml_file(&test_location.display().to_string()).unwrap();
    }

    #[test]
    #[should_panic(expected = "BadToml")]
    fn test_bad_parse_toml_data() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests/test_data/malformed_tests/bad.toml");

        let buffer = read_file(&test_location.display().to_string()).unwrap();
        parse_toml_data(&buffer).unwrap();
    }

    #[test]
    #[should_panic(expected = "NoFile")]
    fn test_parse_toml_file_missing() {
        parse_toml_file("./this/file/does/not/exist.toml").unwrap();
    }

    #[test]
    fn test_shortcut_collection() {
        let mut test_location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        test_location.push("tests/test_data/lnk/projects.lnk");

        let collection = ShortcutToml {
            output: Output {
                name: String::from("shortcuts_file"),
                directory: String::from("./tmp"),
                format: String::from("jsonl"),
                logging: None,
            },
            shortcuts: vec![ShortcutOptions {
                path: test_location.display().to_string(),
            }],
        };
        shortcut_collection(&collection).unwrap();
    }
}
