use super::{error::CollectionError, uuid::generate_uuid};
use crate::structs::toml::Output;
use log::error;
use serde_json::Value;
use std::{
    fs::{create_dir_all, OpenOptions},
    io::Write,
};

/// Output serialized data to the local directory provided by TOML input. Returns the output file path
pub(crate) fn output_data(serde_data: &Value, output: &Output) -> Result<String, CollectionError> {
    let data = match output.format.as_str() {
        "json" => json_format(serde_data)?,
        "jsonl" => jsonl_format(serde_data)?,
        _ => {
            error!("[shelllink] Unknown output format: {}", output.format);
            return Err(CollectionError::UnknownFormat);
        }
    };

    let output_path = format!("{}/{}", output.directory, output.name);
    let result = create_dir_all(&output_path);
    match result {
        Ok(_) => {}
        Err(err) => {
            error!("[shelllink] Failed to create output directory for {output_path}. Error: {err:?}");
            return Err(CollectionError::CreateDirectory);
        }
    }

    let output_file = format!("{output_path}/{}.{}", generate_uuid(), output.format);
    let file_result = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&output_file);

    let mut file = match file_result {
        Ok(results) => results,
        Err(err) => {
            error!("[shelllink] Failed to create output file {output_file}. Error: {err:?}");
            return Err(CollectionError::CreateFile);
        }
    };

    let write_result = file.write_all(&data);
    match write_result {
        Ok(_) => {}
        Err(err) => {
            error!("[shelllink] Failed to write output to file {output_file}. Error: {err:?}");
            return Err(CollectionError::WriteOutput);
        }
    }
    Ok(output_file)
}

/// Serialize the whole value as one JSON document
fn json_format(serde_data: &Value) -> Result<Vec<u8>, CollectionError> {
    let json_result = serde_json::to_vec(serde_data);
    match json_result {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[shelllink] Failed to serialize JSON data: {err:?}");
            Err(CollectionError::Serialize)
        }
    }
}

/// If our data is an array each element is output as a separate line
fn jsonl_format(serde_data: &Value) -> Result<Vec<u8>, CollectionError> {
    let empty_vec = Vec::new();
    let entries = if serde_data.is_array() {
        serde_data.as_array().unwrap_or(&empty_vec).iter().collect()
    } else {
        vec![serde_data]
    };

    let mut json_lines = Vec::new();
    for entry in entries {
        let line_result = serde_json::to_vec(entry);
        let mut line = match line_result {
            Ok(result) => result,
            Err(err) => {
                error!("[shelllink] Failed to serialize JSONL line: {err:?}");
                return Err(CollectionError::Serialize);
            }
        };
        line.push(b'\n');
        json_lines.append(&mut line);
    }
    Ok(json_lines)
}
