//! Configuration records for the icon-classes resolution engine.
//!
//! This crate holds plain data only:
//!
//! - Icon font registration records (`IconFontEntry`, `SlotConfig`)
//! - The settings file (`Settings`) and its default values
//! - The built-in FontAwesome entry
//!
//! Validation of font records happens when they are registered with the
//! engine, not here.

pub mod builtin;
pub mod defaults;
pub mod error;
pub mod font;
pub mod settings;

pub use error::ConfigError;
pub use font::{GLYPH_SLOT, IconFontEntry, SlotConfig};
pub use settings::{LogLevel, Settings};
