use std::fmt;

#[derive(Debug)]
pub(crate) enum CollectionError {
    BadToml,
    CreateDirectory,
    LogFile,
    CreateFile,
    WriteOutput,
    Serialize,
    UnknownFormat,
}

impl std::error::Error for CollectionError {}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::BadToml => write!(f, "Failed to parse TOML data"),
            CollectionError::CreateDirectory => write!(f, "Could not create output directory"),
            CollectionError::LogFile => write!(f, "Could not create log file"),
            CollectionError::CreateFile => write!(f, "Could not create output file"),
            CollectionError::WriteOutput => write!(f, "Could not write output file"),
            CollectionError::Serialize => write!(f, "Could not serialize shortcut data"),
            CollectionError::UnknownFormat => write!(f, "Unknown output format"),
        }
    }
}
