//! icon-classes: resolve messy icon class strings into canonical classes.
//!
//! The engine lives in `icon-classes-engine` and the records it consumes in
//! `icon-classes-config`. This crate wires settings loading, logging and the
//! command-line interface around them.

pub mod cli;
pub mod debug;

pub use icon_classes_config as config;
pub use icon_classes_engine as engine;

use anyhow::{Context, Result};
use icon_classes_config::Settings;
use icon_classes_engine::IconContext;
use std::path::Path;

/// Load settings (from `path`, or the default location) and build a context.
///
/// Also applies the settings' log level, unless the CLI or environment set one.
pub fn load_context(path: Option<&Path>) -> Result<IconContext> {
    let settings = match path {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::load().context("failed to load settings")?,
    };
    debug::apply_config_level(settings.log_level);
    let context = IconContext::from_settings(&settings).context("failed to register icon fonts")?;
    Ok(context)
}
