//! Append-only registry of icon fonts.
//!
//! Fonts are kept in ascending `sort` order. There is no removal and no
//! in-place update: registering a name twice is always an error.

use crate::error::RegistrationError;
use crate::font::IconFont;
use icon_classes_config::IconFontEntry;
use std::sync::Arc;

/// Spacing between automatically assigned sort values.
const SORT_STEP: i64 = 5;

/// Registry of validated icon fonts.
#[derive(Debug, Default, Clone)]
pub struct FontRegistry {
    /// Fonts in ascending sort order
    fonts: Vec<Arc<IconFont>>,
}

impl FontRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate an entry and add it to the registry.
    ///
    /// When `sort` is absent it becomes `len * 5`, raised in steps of 5 until
    /// no other font uses it. An explicit `sort` that is taken is an error.
    pub fn register(&mut self, entry: IconFontEntry) -> Result<Arc<IconFont>, RegistrationError> {
        let name = entry.name.trim();
        if self.get(name).is_some() {
            return Err(RegistrationError::DuplicateName(name.to_string()));
        }

        let sort = match entry.sort {
            Some(sort) => {
                if let Some(owner) = self.fonts.iter().find(|f| f.sort() == sort) {
                    return Err(RegistrationError::SortTaken {
                        font: name.to_string(),
                        sort,
                        owner: owner.name().to_string(),
                    });
                }
                sort
            }
            None => self.next_free_sort(),
        };

        let font = IconFont::compile(entry, sort)?;
        self.check_prefixes(&font)?;

        let font = Arc::new(font);
        let index = self.fonts.partition_point(|f| f.sort() < sort);
        self.fonts.insert(index, Arc::clone(&font));

        log::info!(
            "Registered icon font '{}' (sort {}, prefixes {:?}, {} glyphs)",
            font.name(),
            font.sort(),
            font.prefixes(),
            font.glyph_count()
        );
        Ok(font)
    }

    /// Look up a font by name.
    pub fn get(&self, name: &str) -> Option<&Arc<IconFont>> {
        self.fonts.iter().find(|f| f.name() == name)
    }

    /// Fonts in ascending sort order.
    pub fn fonts(&self) -> impl Iterator<Item = &Arc<IconFont>> {
        self.fonts.iter()
    }

    /// Check if the registry has any fonts.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Get the number of registered fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Find the first font, in sort order, that recognizes any of `tokens` as a glyph.
    ///
    /// Only the glyph vocabulary is consulted; the schema is not. With
    /// `limit_to`, fonts whose name is not listed are skipped.
    pub fn select_font<S: AsRef<str>>(
        &self,
        tokens: &[S],
        limit_to: Option<&[String]>,
    ) -> Option<Arc<IconFont>> {
        self.fonts
            .iter()
            .filter(|font| limit_to.is_none_or(|names| names.iter().any(|n| n == font.name())))
            .find(|font| tokens.iter().any(|t| font.recognizes(t.as_ref())))
            .cloned()
    }

    fn next_free_sort(&self) -> i64 {
        let mut sort = self.fonts.len() as i64 * SORT_STEP;
        while self.fonts.iter().any(|f| f.sort() == sort) {
            sort += SORT_STEP;
        }
        sort
    }

    fn check_prefixes(&self, font: &IconFont) -> Result<(), RegistrationError> {
        for prefix in font.prefixes() {
            for other in &self.fonts {
                let clash = other
                    .prefixes()
                    .iter()
                    .find(|p| p.starts_with(prefix.as_str()) || prefix.starts_with(p.as_str()));
                if let Some(existing) = clash {
                    return Err(RegistrationError::PrefixCollision {
                        font: font.name().to_string(),
                        prefix: prefix.clone(),
                        owner: other.name().to_string(),
                        existing: existing.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icon_classes_config::SlotConfig;

    fn entry(name: &str, prefix: &str, list: &[&str]) -> IconFontEntry {
        IconFontEntry::new(name, prefix, list.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_empty_registry() {
        let registry = FontRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.select_font(&["fa-check"], None).is_none());
    }

    #[test]
    fn test_sorts_assigned_in_steps_of_five() {
        let mut registry = FontRegistry::new();
        registry.register(entry("a", "a-", &["x"])).unwrap();
        registry.register(entry("b", "b-", &["x"])).unwrap();
        registry.register(entry("c", "c-", &["x"])).unwrap();

        let sorts: Vec<i64> = registry.fonts().map(|f| f.sort()).collect();
        assert_eq!(sorts, vec![0, 5, 10]);
    }

    #[test]
    fn test_assigned_sort_skips_taken_values() {
        let mut registry = FontRegistry::new();
        registry.register(entry("a", "a-", &["x"]).with_sort(5)).unwrap();
        // len == 1 → 5 is taken → 10
        let b = registry.register(entry("b", "b-", &["x"])).unwrap();
        assert_eq!(b.sort(), 10);
    }

    #[test]
    fn test_explicit_sort_orders_fonts() {
        let mut registry = FontRegistry::new();
        registry.register(entry("late", "l-", &["x"]).with_sort(50)).unwrap();
        registry.register(entry("early", "e-", &["x"]).with_sort(-1)).unwrap();

        let names: Vec<&str> = registry.fonts().map(|f| f.name()).collect();
        assert_eq!(names, vec!["early", "late"]);
    }

    #[test]
    fn test_explicit_sort_taken_rejected() {
        let mut registry = FontRegistry::new();
        registry.register(entry("a", "a-", &["x"]).with_sort(7)).unwrap();
        let err = registry.register(entry("b", "b-", &["x"]).with_sort(7)).unwrap_err();
        assert!(matches!(err, RegistrationError::SortTaken { sort: 7, .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = FontRegistry::new();
        registry.register(entry("a", "a-", &["x"])).unwrap();
        let err = registry.register(entry("a", "z-", &["x"])).unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateName(ref n) if n == "a"));
    }

    #[test]
    fn test_overlapping_prefix_rejected() {
        let mut registry = FontRegistry::new();
        registry.register(entry("fa", "fa-", &["x"])).unwrap();

        let same = registry.register(entry("other", "FA-", &["x"])).unwrap_err();
        assert!(matches!(same, RegistrationError::PrefixCollision { .. }));

        let longer = registry.register(entry("other", "fa-x-", &["x"])).unwrap_err();
        assert!(matches!(longer, RegistrationError::PrefixCollision { .. }));

        registry.register(entry("other", "far-", &["x"])).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_failed_registration_leaves_registry_untouched() {
        let mut registry = FontRegistry::new();
        registry.register(entry("a", "a-", &["x"])).unwrap();
        let bad = entry("b", "b-", &["x"]).with_slot("glyph", SlotConfig::value("b-x"));
        assert!(registry.register(bad).is_err());
        assert_eq!(registry.len(), 1);
        assert!(registry.get("b").is_none());
    }

    #[test]
    fn test_select_font_by_sort_and_limit() {
        let mut registry = FontRegistry::new();
        registry.register(entry("first", "f-", &["star", "moon"])).unwrap();
        registry.register(entry("second", "s-", &["star", "sun"])).unwrap();

        let pick = |tokens: &[&str], limit: Option<&[String]>| {
            registry
                .select_font(tokens, limit)
                .map(|f| f.name().to_string())
        };

        assert_eq!(pick(&["s-star"], None).as_deref(), Some("second"));
        // Unprefixed tokens go to the lowest sort that lists them.
        assert_eq!(pick(&["star"], None).as_deref(), Some("first"));
        assert_eq!(pick(&["nothing", "sun"], None).as_deref(), Some("second"));

        let only_second = vec!["second".to_string()];
        assert_eq!(pick(&["star"], Some(&only_second)).as_deref(), Some("second"));
        assert_eq!(pick(&["moon"], Some(&only_second)), None);
    }

    #[test]
    fn test_select_font_ignores_schema() {
        let mut registry = FontRegistry::new();
        registry
            .register(entry("strict", "st-", &["gear"]).with_slot(
                "style",
                SlotConfig::choices(["bold"]).required(),
            ))
            .unwrap();
        // Selection only needs the glyph; the required style is irrelevant here.
        assert!(registry.select_font(&["st-gear"], None).is_some());
    }
}
