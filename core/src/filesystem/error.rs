use std::fmt;

#[derive(Debug)]
pub enum FileSystemError {
    ReadDirectory,
    NotDirectory,
    ReadFile,
    WriteFile,
    CreateDirectory,
    NotFile,
    LargeFile,
}

impl std::error::Error for FileSystemError {}

impl fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSystemError::ReadDirectory => write!(f, "Could not read directory path"),
            FileSystemError::NotDirectory => write!(f, "Not a directory"),
            FileSystemError::ReadFile => write!(f, "Could not read file"),
            FileSystemError::WriteFile => write!(f, "Could not write file"),
            FileSystemError::CreateDirectory => write!(f, "Could not create directory"),
            FileSystemError::NotFile => write!(f, "Not a file"),
            FileSystemError::LargeFile => write!(f, "File larger than 2GB"),
        }
    }
}
