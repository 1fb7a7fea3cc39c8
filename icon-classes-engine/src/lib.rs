//! Icon class resolution engine.
//!
//! Turns free-form class strings such as `"fas fa-check"` into a canonical,
//! validated class list for one registered icon font, or a fallback.
//!
//! - `FontRegistry` validates and orders icon fonts
//! - `IconContext` owns a registry plus the fallback classes and classifies input
//! - `classifier` holds the per-token slot matching rules

pub mod classifier;
pub mod context;
pub mod error;
pub mod font;
pub mod registry;
pub mod tokens;

pub use classifier::{Classification, ClassifyOptions, Fallback, FontSelector};
pub use context::IconContext;
pub use error::{ClassifyFailure, ContextError, RegistrationError};
pub use font::{IconFont, MatchKind, SlotDefinition, SlotRule};
pub use registry::FontRegistry;
pub use tokens::ClassInput;
