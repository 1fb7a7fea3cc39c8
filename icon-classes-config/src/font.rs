//! Registration records for icon fonts.
//!
//! These are the raw, unvalidated shapes read from settings files or built in
//! code. The engine crate validates them and compiles them into its own typed
//! model when they are registered.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the slot holding the pictogram identifier.
///
/// This slot always matches after every other slot, whatever its position in
/// the schema.
pub const GLYPH_SLOT: &str = "glyph";

/// One glyph family (e.g. a FontAwesome-like icon set) as declared by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IconFontEntry {
    /// Unique identifier for the font
    #[serde(default)]
    pub name: String,

    /// Prefixes any token of this family may start with (e.g. "fa-")
    #[serde(default)]
    pub prefixes: Vec<String>,

    /// Whole-token substitutions applied before slot matching.
    /// A replacement may hold several space-separated tokens.
    #[serde(default)]
    pub aliases: HashMap<String, String>,

    /// Slot name to slot definition, in declaration order
    #[serde(default)]
    pub schema: IndexMap<String, SlotConfig>,

    /// Valid glyph identifiers, without prefix
    #[serde(default)]
    pub list: Vec<String>,

    /// Precedence among fonts; lower sorts first. Assigned on registration when absent.
    #[serde(default)]
    pub sort: Option<i64>,
}

impl IconFontEntry {
    /// Create an entry with a name, one prefix, and a glyph vocabulary.
    pub fn new(name: impl Into<String>, prefix: impl Into<String>, list: Vec<String>) -> Self {
        Self {
            name: name.into(),
            prefixes: vec![prefix.into()],
            list,
            ..Self::default()
        }
    }

    /// Add an alias.
    pub fn with_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.aliases.insert(from.into(), to.into());
        self
    }

    /// Append a slot to the schema.
    pub fn with_slot(mut self, name: impl Into<String>, slot: SlotConfig) -> Self {
        self.schema.insert(name.into(), slot);
        self
    }

    /// Set an explicit sort value.
    pub fn with_sort(mut self, sort: i64) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// One matchable category within a font's schema.
///
/// Exactly one of `value`, `pattern` or `choices` should be set. The glyph
/// slot may leave all three unset to keep the built-in glyph pattern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SlotConfig {
    /// Exact literal the token must equal (case-insensitive, no prefix)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Regular expression body, excluding any prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Enumerated accepted values, excluding any prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,

    /// Whether classification fails when nothing fills this slot and no default exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Value used when the slot is required but unmatched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Maximum number of tokens this slot accepts (1 when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,

    /// Slots that become ineligible once this slot accepts an explicit match
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub precludes: Vec<String>,

    /// Overrides the font's prefixes for this slot only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefixes: Option<Vec<String>>,
}

impl SlotConfig {
    /// Slot matching one exact literal.
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Slot matching a regular expression body.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..Self::default()
        }
    }

    /// Slot matching one of a fixed set of values.
    pub fn choices<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: Some(choices.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Mark the slot required.
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    /// Set the default used when the required slot is unmatched.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the slot capacity.
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Add a slot this one precludes.
    pub fn precluding(mut self, slot: impl Into<String>) -> Self {
        self.precludes.push(slot.into());
        self
    }

    /// Override the prefixes for this slot.
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = Some(prefixes.into_iter().map(Into::into).collect());
        self
    }
}
