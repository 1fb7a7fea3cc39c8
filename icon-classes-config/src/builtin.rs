//! Built-in icon font definitions.

use crate::error::ConfigError;
use crate::font::IconFontEntry;

const FONTAWESOME_YAML: &str = include_str!("../fonts/fontawesome.yaml");

/// The FontAwesome entry shipped with the crate.
pub fn fontawesome() -> Result<IconFontEntry, ConfigError> {
    Ok(serde_yaml_ng::from_str(FONTAWESOME_YAML)?)
}

/// Every built-in entry, in the order they should be registered.
pub fn builtin_fonts() -> Result<Vec<IconFontEntry>, ConfigError> {
    Ok(vec![fontawesome()?])
}
