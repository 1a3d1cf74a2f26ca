/**
 * Windows `Shortcut` files are files that point to another file.
 * They have the extension `lnk` and can be found in any directory.
 *
 * The codec decodes `Shortcut` bytes into a `Shortcut` and encodes a `Shortcut` back into bytes.
 * Decoding and then encoding an unmodified `Shortcut` produces the original bytes
 *
 * References:
 * `https://github.com/libyal/liblnk/blob/main/documentation/Windows%20Shortcut%20File%20(LNK)%20format.asciidoc`
 * `https://winprotocoldoc.blob.core.windows.net/productionwindowsarchives/MS-SHLLINK/%5bMS-SHLLINK%5d.pdf`
 */
use super::{
    error::{EncodeError, FormatError, LnkError},
    header::LnkHeader,
    shortcut::Shortcut,
};
use crate::filesystem::files::{list_files, read_file, write_file};
use common::windows::ShortcutInfo;
use log::error;

/// Decode the raw bytes of `Shortcut` data
pub fn decode(data: &[u8]) -> Result<Shortcut, FormatError> {
    let result = LnkHeader::check_header(data);
    let is_header = match result {
        Ok((_, result)) => result,
        Err(_err) => {
            error!("[shortcuts] Could not parse lnk header");
            return Err(FormatError::Truncated);
        }
    };

    if !is_header {
        return Err(FormatError::NotAShortcut);
    }

    let shortcut_result = Shortcut::parse_shortcut(data);
    match shortcut_result {
        Ok((_, result)) => Ok(result),
        Err(nom::Err::Failure(_err)) => {
            error!("[shortcuts] Shortcut data is malformed");
            Err(FormatError::Malformed)
        }
        Err(_err) => {
            error!("[shortcuts] Shortcut data is truncated");
            Err(FormatError::Truncated)
        }
    }
}

/// Encode a `Shortcut` into bytes
pub fn encode(shortcut: &Shortcut) -> Result<Vec<u8>, EncodeError> {
    let result = shortcut.shortcut_bytes();
    if let Err(err) = &result {
        error!("[shortcuts] Could not encode shortcut: {err:?}");
    }
    result
}

/// Read and decode a single `Shortcut` file
pub fn read_shortcut(path: &str) -> Result<Shortcut, LnkError> {
    let result = read_file(path);
    let lnk_data = match result {
        Ok(data) => data,
        Err(err) => {
            error!("[shortcuts] Could not read lnk file {path}: {err:?}");
            return Err(LnkError::ReadFile);
        }
    };
    Ok(decode(&lnk_data)?)
}

/// Encode and write a `Shortcut` to a file
pub fn write_shortcut(path: &str, shortcut: &Shortcut) -> Result<(), LnkError> {
    let lnk_data = encode(shortcut)?;
    let result = write_file(path, &lnk_data);
    if let Err(err) = result {
        error!("[shortcuts] Could not write lnk file {path}: {err:?}");
        return Err(LnkError::WriteFile);
    }
    Ok(())
}

/// `Shortcut` files can be located anywhere. Provide a directory and parse any `lnk` (`Shortcut`) files
pub fn grab_lnk_directory(path: &str) -> Result<Vec<ShortcutInfo>, LnkError> {
    let files_results = list_files(path);
    let files = match files_results {
        Ok(results) => results,
        Err(err) => {
            error!("[shortcuts] Could not list files at path {path}: {err:?}");
            return Err(LnkError::ReadDirectory);
        }
    };

    let mut shortcut_info = Vec::new();
    for file in files {
        if !file.to_lowercase().ends_with(".lnk") {
            continue;
        }
        let result = grab_lnk_file(&file);
        match result {
            Ok(info) => shortcut_info.push(info),
            Err(_err) => {
                error!("[shortcuts] Failed to parse file: {file}");
                continue;
            }
        }
    }
    Ok(shortcut_info)
}

/// Parse a single `Shortcut` file into its report view
pub fn grab_lnk_file(path: &str) -> Result<ShortcutInfo, LnkError> {
    let shortcut = read_shortcut(path)?;
    let mut shortcut_info = shortcut.info();
    shortcut_info.source_path = path.to_string();
    Ok(shortcut_info)
}
