//! Default value functions for settings.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Settings` fields.

/// Classes substituted when classification fails and the caller asked for the
/// configured fallback.
pub const FALLBACK_ICON: &str = "fa-solid fa-question mhl-fallback-icon";

pub fn bool_true() -> bool {
    true
}

pub fn fallback_icon() -> String {
    FALLBACK_ICON.to_string()
}

pub fn log_level() -> crate::settings::LogLevel {
    crate::settings::LogLevel::Warn
}
