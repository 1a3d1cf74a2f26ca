use super::error::FileSystemError;
use log::error;
use std::{
    fs::{create_dir_all, read, read_dir, symlink_metadata, write},
    path::Path,
};

/// Get a list of all files in a provided directory
pub(crate) fn list_files(path: &str) -> Result<Vec<String>, FileSystemError> {
    if !is_directory(path) {
        return Err(FileSystemError::NotDirectory);
    }
    let dir_result = read_dir(path);
    let dir = match dir_result {
        Ok(result) => result,
        Err(err) => {
            error!("[shelllink] Failed to get directory contents: {err:?}");
            return Err(FileSystemError::ReadDirectory);
        }
    };

    let mut files: Vec<String> = Vec::new();
    // Loop and get all files in provided directory
    for entry_result in dir {
        let entry = match entry_result {
            Ok(result) => result,
            Err(err) => {
                error!("[shelllink] Failed to get directory entry: {err:?}");
                continue;
            }
        };

        let full_path = entry.path().display().to_string();
        if !is_file(&full_path) {
            continue;
        }
        files.push(full_path);
    }

    // Directory order depends on the filesystem
    files.sort();
    Ok(files)
}

/// Check if path is a file
pub(crate) fn is_file(path: &str) -> bool {
    let file = Path::new(path);
    if file.is_file() {
        return true;
    }
    false
}

/// Check if path is a directory
pub(crate) fn is_directory(path: &str) -> bool {
    let dir = Path::new(path);
    if dir.is_dir() {
        return true;
    }
    false
}

/// Read a file that is less than 2GB in size
pub(crate) fn read_file(path: &str) -> Result<Vec<u8>, FileSystemError> {
    if file_too_large(path) {
        return Err(FileSystemError::LargeFile);
    }

    // Verify provided path is a file
    if !is_file(path) {
        return Err(FileSystemError::NotFile);
    }

    let read_result = read(path);
    match read_result {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[shelllink] Failed to read file {path}: {err:?}");
            Err(FileSystemError::ReadFile)
        }
    }
}

/// Write bytes to a file. Parent directories are created if needed. An existing file is replaced
pub(crate) fn write_file(path: &str, data: &[u8]) -> Result<(), FileSystemError> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            let result = create_dir_all(parent);
            if let Err(err) = result {
                error!(
                    "[shelllink] Failed to create directory {}: {err:?}",
                    parent.display()
                );
                return Err(FileSystemError::CreateDirectory);
            }
        }
    }

    let write_result = write(path, data);
    match write_result {
        Ok(_) => Ok(()),
        Err(err) => {
            error!("[shelllink] Failed to write file {path}: {err:?}");
            Err(FileSystemError::WriteFile)
        }
    }
}

/// Get the file size
pub(crate) fn get_file_size(path: &str) -> u64 {
    if !is_file(path) {
        return 0;
    }

    let meta = symlink_metadata(path);
    match meta {
        Ok(result) => result.len(),
        Err(err) => {
            error!("[shelllink] Failed to get file size: {err:?}");
            0
        }
    }
}

/// Check if a provided file is larger than the acceptable size (2GB)
fn file_too_large(path: &str) -> bool {
    let size = get_file_size(path);
    let max_size = 2147483648; // 2GB
    if size < max_size {
        return false;
    }
    true
}
