//! The explicitly constructed classification context.
//!
//! An `IconContext` owns a font registry and the configured fallback classes.
//! Registration happens during startup; afterwards the context is only read,
//! so it can be shared freely (e.g. behind an `Arc`).

use crate::classifier::{Classification, ClassifyOptions, Fallback, FontSelector, classify_tokens};
use crate::error::{ClassifyFailure, ContextError, RegistrationError};
use crate::font::IconFont;
use crate::registry::FontRegistry;
use crate::tokens::ClassInput;
use icon_classes_config::{IconFontEntry, Settings, builtin};
use std::sync::Arc;

/// Font registry plus fallback policy.
#[derive(Debug, Clone)]
pub struct IconContext {
    registry: FontRegistry,
    fallback: String,
}

impl Default for IconContext {
    fn default() -> Self {
        Self::new(icon_classes_config::defaults::FALLBACK_ICON)
    }
}

impl IconContext {
    /// Create a context with an empty registry.
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            registry: FontRegistry::new(),
            fallback: fallback.into(),
        }
    }

    /// Build a context from settings: built-in fonts first (if enabled), then
    /// the configured fonts in order. Stops at the first refused font.
    pub fn from_settings(settings: &Settings) -> Result<Self, ContextError> {
        let mut context = Self::new(settings.fallback_icon.clone());
        if settings.include_builtin_fonts {
            for entry in builtin::builtin_fonts()? {
                context.register(entry)?;
            }
        }
        for entry in &settings.fonts {
            context.register(entry.clone())?;
        }
        log::info!(
            "Icon context ready with {} font(s), fallback '{}'",
            context.registry.len(),
            context.fallback
        );
        Ok(context)
    }

    /// Register another font.
    pub fn register(&mut self, entry: IconFontEntry) -> Result<Arc<IconFont>, RegistrationError> {
        self.registry.register(entry)
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    /// The configured fallback classes.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Classify `input` into canonical classes, or a fallback.
    ///
    /// Never fails: every failure becomes the result of `opts.fallback`,
    /// possibly the empty string.
    pub fn classify<I: ClassInput + ?Sized>(&self, input: &I, opts: &ClassifyOptions) -> String {
        match self.classify_detailed(input, opts) {
            Ok(classification) => classification.to_class_string(),
            Err(failure) => self.fall_back(failure, opts),
        }
    }

    /// Classify without applying the fallback policy.
    pub fn classify_detailed<I: ClassInput + ?Sized>(
        &self,
        input: &I,
        opts: &ClassifyOptions,
    ) -> Result<Classification, ClassifyFailure> {
        let tokens = input.tokens();
        let font = self
            .resolve_font(&tokens, opts.font.as_ref())
            .ok_or(ClassifyFailure::FontNotFound)?;
        classify_tokens(&font, tokens, opts)
    }

    /// Whether any registered font (optionally only those named) lists `glyph`.
    pub fn is_valid_icon(&self, glyph: &str, limit_to: Option<&[String]>) -> bool {
        let tokens = glyph.tokens();
        self.registry.select_font(tokens.as_slice(), limit_to).is_some()
    }

    fn resolve_font(
        &self,
        tokens: &[String],
        selector: Option<&FontSelector>,
    ) -> Option<Arc<IconFont>> {
        match selector {
            None => self.registry.select_font(tokens, None),
            Some(FontSelector::Font(font)) => Some(Arc::clone(font)),
            Some(FontSelector::Name(name)) => {
                let font = self.registry.get(name).cloned();
                if font.is_none() {
                    log::warn!("Icon font '{}' is not registered", name);
                }
                font
            }
            Some(FontSelector::Names(names)) => {
                self.registry.select_font(tokens, Some(names.as_slice()))
            }
        }
    }

    fn fall_back(&self, failure: ClassifyFailure, opts: &ClassifyOptions) -> String {
        match &opts.fallback {
            Fallback::Disabled => {
                log::debug!("Icon classification failed ({}), no fallback", failure);
                String::new()
            }
            Fallback::Configured => {
                log::warn!(
                    "Icon classification failed ({}), using fallback '{}'",
                    failure,
                    self.fallback
                );
                self.fallback.clone()
            }
            Fallback::Explicit(classes) => {
                log::warn!(
                    "Icon classification failed ({}), trying fallback '{}'",
                    failure,
                    classes
                );
                let retry = ClassifyOptions {
                    fallback: Fallback::Disabled,
                    ..opts.clone()
                };
                self.classify(classes.as_str(), &retry)
            }
        }
    }
}
