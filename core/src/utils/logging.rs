use super::{error::CollectionError, uuid::generate_uuid};
use crate::structs::toml::Output;
use log::{error, LevelFilter};
use std::fs::{create_dir_all, File};

/// Create log output file and logging level based on TOML `Output` configuration
pub(crate) fn create_log_file(output: &Output) -> Result<(File, LevelFilter), CollectionError> {
    let path = format!("{}/{}", output.directory, output.name);
    let result = create_dir_all(&path);
    match result {
        Ok(_) => {}
        Err(err) => {
            error!("[shelllink] Failed to create logging output directory for {path}. Error: {err:?}");
            return Err(CollectionError::CreateDirectory);
        }
    }

    let output_result = File::create(format!("{path}/{}.log", generate_uuid()));
    let log_file = match output_result {
        Ok(result) => result,
        Err(err) => {
            error!("[shelllink] Failed to create log file at {path}. Error: {err:?}");
            return Err(CollectionError::LogFile);
        }
    };

    Ok((log_file, log_level(&output.logging)))
}

/// Map the configured logging level. Defaults to `warn`
fn log_level(logging: &Option<String>) -> LevelFilter {
    if let Some(log_level) = logging {
        match log_level.to_lowercase().as_str() {
            "warn" => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            _ => LevelFilter::Warn,
        }
    } else {
        LevelFilter::Warn
    }
}

#[cfg(test)]
mod tests {
    use super::{create_log_file, log_level};
    use crate::structs::toml::Output;
    use log::{warn, LevelFilter};
    use simplelog::{Config, WriteLogger};

    #[test]
    fn test_create_log_file() {
        let test = Output {
            name: String::from("logging"),
            directory: String::from("./tmp"),
            format: String::from("json"),
            logging: Some(String::new()),
        };

        let (result, level) = create_log_file(&test).unwrap();
        let _ = WriteLogger::init(LevelFilter::Warn, Config::default(), result);
        warn!("A simple fancy logger!");
        assert_eq!(level, LevelFilter::Warn);
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(&Some(String::from("DEBUG"))), LevelFilter::Debug);
        assert_eq!(log_level(&Some(String::from("error"))), LevelFilter::Error);
        assert_eq!(log_level(&None), LevelFilter::Warn);
    }
}
