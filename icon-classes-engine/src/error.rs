//! Registration errors.
//!
//! Registration is the only engine operation that fails hard. Classification
//! failures degrade to a fallback result and are reported through `log`.

use thiserror::Error;

/// Reasons an icon font entry is refused by the registry.
///
/// A refused entry is not added; previously registered entries are untouched.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The entry has no name.
    #[error("icon font entry has no name")]
    MissingName,

    /// Another font is already registered under this name.
    #[error("icon font '{0}' is already registered")]
    DuplicateName(String),

    /// The entry declares no prefixes.
    #[error("icon font '{font}' declares no prefixes")]
    NoPrefixes { font: String },

    /// A prefix is the empty string.
    #[error("icon font '{font}' declares an empty prefix")]
    EmptyPrefix { font: String },

    /// A prefix overlaps one already claimed by another font.
    #[error("prefix '{prefix}' of icon font '{font}' collides with '{existing}' of '{owner}'")]
    PrefixCollision {
        font: String,
        prefix: String,
        owner: String,
        existing: String,
    },

    /// The glyph vocabulary is empty.
    #[error("icon font '{font}' has an empty glyph list")]
    EmptyList { font: String },

    /// The glyph vocabulary holds an empty entry.
    #[error("icon font '{font}' has an empty glyph name in its list")]
    InvalidGlyph { font: String },

    /// The glyph slot declares an exact value.
    #[error("glyph slot of icon font '{font}' may not declare an exact value")]
    ExactGlyphSlot { font: String },

    /// The requested sort value belongs to another font.
    #[error("sort {sort} requested by icon font '{font}' is already used by '{owner}'")]
    SortTaken {
        font: String,
        sort: i64,
        owner: String,
    },

    /// A slot declares more than one of value/pattern/choices.
    #[error("slot '{slot}' of icon font '{font}' declares more than one matching rule")]
    ConflictingRules { font: String, slot: String },

    /// A slot other than the glyph slot declares no matching rule.
    #[error("slot '{slot}' of icon font '{font}' declares no matching rule")]
    MissingRule { font: String, slot: String },

    /// A choices slot has nothing to choose from.
    #[error("slot '{slot}' of icon font '{font}' has no choices")]
    EmptyChoices { font: String, slot: String },

    /// A slot accepts no tokens at all.
    #[error("slot '{slot}' of icon font '{font}' has max 0")]
    ZeroMax { font: String, slot: String },

    /// A slot pattern is not a valid regular expression.
    #[error("slot '{slot}' of icon font '{font}' has an invalid pattern: {source}")]
    InvalidPattern {
        font: String,
        slot: String,
        #[source]
        source: regex::Error,
    },
}

/// Why a classification produced no canonical result.
///
/// Never returned by `IconContext::classify`, which turns it into a fallback;
/// exposed by `IconContext::classify_detailed` for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyFailure {
    /// No permitted font recognizes any input token as a glyph.
    #[error("no icon font recognizes any of the given classes")]
    FontNotFound,

    /// A required slot was left empty and has no default.
    #[error("required slot '{slot}' of icon font '{font}' is empty")]
    MissingRequired { font: String, slot: String },
}

/// Errors building an `IconContext` from settings.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The built-in font definitions could not be loaded.
    #[error(transparent)]
    Config(#[from] icon_classes_config::ConfigError),

    /// A configured font was refused by the registry.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}
