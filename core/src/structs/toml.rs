use crate::utils::error::CollectionError;
use log::error;
use serde::Deserialize;
use std::str::from_utf8;

#[derive(Debug, Deserialize)]
pub struct ShortcutToml {
    pub output: Output,
    pub shortcuts: Vec<ShortcutOptions>,
}

#[derive(Debug, Deserialize)]
pub struct Output {
    pub name: String,
    pub directory: String,
    /**Output format. Supports `json` or `jsonl` */
    pub format: String,
    pub logging: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ShortcutOptions {
    /**Path to a `Shortcut (lnk)` file or a directory containing `Shortcut (lnk)` files */
    pub path: String,
}

impl ShortcutToml {
    /// Parse the Shortcut TOML collection file
    pub(crate) fn parse_shortcut_toml(toml_data: &[u8]) -> Result<ShortcutToml, CollectionError> {
        let toml_results = toml::from_str(from_utf8(toml_data).unwrap_or_default());
        let collection: ShortcutToml = match toml_results {
            Ok(results) => results,
            Err(err) => {
                error!("[shelllink] Failed to parse TOML data. Error: {err:?}");
                return Err(CollectionError::BadToml);
            }
        };
        Ok(collection)
    }
}
