//! Validated icon fonts and their compiled slot matchers.
//!
//! An `IconFontEntry` from the config crate is checked and frozen into an
//! `IconFont` when it is registered. Slot matchers are compiled once here so
//! classification never builds a regular expression.

use crate::error::RegistrationError;
use icon_classes_config::{GLYPH_SLOT, IconFontEntry, SlotConfig};
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Pattern used by the glyph slot when the font does not declare one.
pub const DEFAULT_GLYPH_PATTERN: &str = "[-a-z0-9_]+";

/// Name of the matcher group holding the prefix.
const PREFIX_GROUP: &str = "prefix";

/// How a slot recognizes its tokens.
#[derive(Debug, Clone)]
pub enum SlotRule {
    /// Case-insensitive literal, no prefix allowed.
    Exact { value: String },
    /// Optional prefix followed by a regular expression body.
    Pattern { source: String, regex: Regex },
    /// Optional prefix followed by one of the listed values.
    Choices { choices: Vec<String>, regex: Regex },
}

/// How a token matched a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Equal to an exact-value slot's literal.
    Exact,
    /// Matched with one of the slot's prefixes.
    Explicit,
    /// Matched without a prefix.
    Inferred,
}

impl MatchKind {
    /// Exact and explicit matches are deliberate; inferred ones are guesses.
    pub fn is_forced(self) -> bool {
        !matches!(self, MatchKind::Inferred)
    }
}

/// A token recognized by a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotMatch<'t> {
    pub kind: MatchKind,
    /// The token with any prefix removed
    pub body: &'t str,
}

/// One slot of a compiled font schema.
#[derive(Debug, Clone)]
pub struct SlotDefinition {
    pub name: String,
    pub rule: SlotRule,
    pub required: bool,
    pub default: Option<String>,
    pub max: usize,
    pub precludes: Vec<String>,
    pub prefixes: Vec<String>,
}

impl SlotDefinition {
    /// Match a normalized token against this slot.
    pub fn match_token<'t>(&self, token: &'t str) -> Option<SlotMatch<'t>> {
        match &self.rule {
            SlotRule::Exact { value } => (token == value.as_str()).then_some(SlotMatch {
                kind: MatchKind::Exact,
                body: token,
            }),
            SlotRule::Pattern { regex, .. } | SlotRule::Choices { regex, .. } => {
                let caps = regex.captures(token)?;
                match caps.name(PREFIX_GROUP) {
                    Some(prefix) => Some(SlotMatch {
                        kind: MatchKind::Explicit,
                        body: &token[prefix.end()..],
                    }),
                    None => Some(SlotMatch {
                        kind: MatchKind::Inferred,
                        body: token,
                    }),
                }
            }
        }
    }

    /// The class emitted for a token accepted by this slot.
    ///
    /// Pattern and choice matches are spelled with the slot's first prefix,
    /// whichever prefix (if any) the token carried, so the output classifies
    /// the same way when fed back in.
    pub fn canonical(&self, m: &SlotMatch<'_>) -> String {
        match m.kind {
            MatchKind::Exact => m.body.to_string(),
            MatchKind::Explicit | MatchKind::Inferred => match self.prefixes.first() {
                Some(prefix) => format!("{prefix}{}", m.body),
                None => m.body.to_string(),
            },
        }
    }

    pub fn is_glyph(&self) -> bool {
        self.name == GLYPH_SLOT
    }

    fn compile(
        font: &str,
        name: &str,
        config: &SlotConfig,
        font_prefixes: &[String],
    ) -> Result<Self, RegistrationError> {
        let is_glyph = name == GLYPH_SLOT;
        let prefixes: Vec<String> = match &config.prefixes {
            Some(own) => own.iter().map(|p| p.to_lowercase()).collect(),
            None => font_prefixes.to_vec(),
        };

        let declared = [
            config.value.is_some(),
            config.pattern.is_some(),
            config.choices.is_some(),
        ]
        .into_iter()
        .filter(|d| *d)
        .count();
        if declared > 1 {
            return Err(RegistrationError::ConflictingRules {
                font: font.to_string(),
                slot: name.to_string(),
            });
        }

        let rule = if let Some(value) = &config.value {
            if is_glyph {
                return Err(RegistrationError::ExactGlyphSlot {
                    font: font.to_string(),
                });
            }
            SlotRule::Exact {
                value: value.to_lowercase(),
            }
        } else if let Some(choices) = &config.choices {
            let choices: Vec<String> = choices
                .iter()
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect();
            if choices.is_empty() {
                return Err(RegistrationError::EmptyChoices {
                    font: font.to_string(),
                    slot: name.to_string(),
                });
            }
            let body = choices
                .iter()
                .map(|c| regex::escape(c))
                .collect::<Vec<_>>()
                .join("|");
            let regex = build_matcher(font, name, &prefixes, &body)?;
            SlotRule::Choices { choices, regex }
        } else {
            let source = match (&config.pattern, is_glyph) {
                (Some(pattern), _) => pattern.clone(),
                (None, true) => DEFAULT_GLYPH_PATTERN.to_string(),
                (None, false) => {
                    return Err(RegistrationError::MissingRule {
                        font: font.to_string(),
                        slot: name.to_string(),
                    });
                }
            };
            let regex = build_matcher(font, name, &prefixes, &source)?;
            SlotRule::Pattern { source, regex }
        };

        let max = config.max.unwrap_or(1);
        if max == 0 {
            return Err(RegistrationError::ZeroMax {
                font: font.to_string(),
                slot: name.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            rule,
            required: config.required.unwrap_or(is_glyph),
            default: config.default.clone(),
            max,
            precludes: config.precludes.clone(),
            prefixes,
        })
    }
}

/// Build `^(?:(?P<prefix>p1|p2|...))?(?:body)$`.
///
/// The prefix group is named so capture groups inside `body` never stand in
/// for it.
fn build_matcher(
    font: &str,
    slot: &str,
    prefixes: &[String],
    body: &str,
) -> Result<Regex, RegistrationError> {
    let source = if prefixes.is_empty() {
        format!("^(?:{body})$")
    } else {
        let alternation = prefixes
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        format!("^(?:(?P<{PREFIX_GROUP}>{alternation}))?(?:{body})$")
    };
    Regex::new(&source).map_err(|source| RegistrationError::InvalidPattern {
        font: font.to_string(),
        slot: slot.to_string(),
        source,
    })
}

/// A validated, frozen icon font.
#[derive(Debug, Clone)]
pub struct IconFont {
    name: String,
    prefixes: Vec<String>,
    aliases: HashMap<String, String>,
    slots: Vec<SlotDefinition>,
    list: HashSet<String>,
    sort: i64,
}

impl IconFont {
    /// Validate an entry on its own, without looking at other fonts.
    ///
    /// The glyph slot is moved to the end of the slot order and created with
    /// its default pattern if the schema does not mention it.
    pub(crate) fn compile(entry: IconFontEntry, sort: i64) -> Result<Self, RegistrationError> {
        let name = entry.name.trim().to_string();
        if name.is_empty() {
            return Err(RegistrationError::MissingName);
        }
        if entry.prefixes.is_empty() {
            return Err(RegistrationError::NoPrefixes { font: name });
        }
        if entry.prefixes.iter().any(|p| p.trim().is_empty()) {
            return Err(RegistrationError::EmptyPrefix { font: name });
        }
        if entry.list.is_empty() {
            return Err(RegistrationError::EmptyList { font: name });
        }
        if entry.list.iter().any(|g| g.trim().is_empty()) {
            return Err(RegistrationError::InvalidGlyph { font: name });
        }

        let prefixes: Vec<String> = entry
            .prefixes
            .iter()
            .map(|p| p.trim().to_lowercase())
            .collect();

        let mut slots = Vec::with_capacity(entry.schema.len() + 1);
        let mut glyph = None;
        for (slot_name, config) in &entry.schema {
            let slot = SlotDefinition::compile(&name, slot_name, config, &prefixes)?;
            if slot.is_glyph() {
                glyph = Some(slot);
            } else {
                slots.push(slot);
            }
        }
        let glyph = match glyph {
            Some(glyph) => glyph,
            None => SlotDefinition::compile(&name, GLYPH_SLOT, &SlotConfig::default(), &prefixes)?,
        };
        slots.push(glyph);

        for slot in &slots {
            for target in &slot.precludes {
                if !slots.iter().any(|s| &s.name == target) {
                    log::warn!(
                        "Slot '{}' of icon font '{}' precludes undeclared slot '{}'",
                        slot.name,
                        name,
                        target
                    );
                }
            }
        }

        let aliases = entry
            .aliases
            .iter()
            .map(|(from, to)| (from.trim().to_lowercase(), to.to_lowercase()))
            .collect();
        let list = entry
            .list
            .iter()
            .map(|g| g.trim().to_lowercase())
            .collect();

        Ok(Self {
            name,
            prefixes,
            aliases,
            slots,
            list,
            sort,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn aliases(&self) -> &HashMap<String, String> {
        &self.aliases
    }

    /// Slots in matching order, glyph last.
    pub fn slots(&self) -> &[SlotDefinition] {
        &self.slots
    }

    pub fn sort(&self) -> i64 {
        self.sort
    }

    /// Number of glyphs in the vocabulary.
    pub fn glyph_count(&self) -> usize {
        self.list.len()
    }

    /// Whether `glyph` (without prefix) belongs to this font.
    pub fn has_glyph(&self, glyph: &str) -> bool {
        self.list.contains(glyph)
    }

    /// Whether `token`, with or without one of this font's prefixes, names a glyph.
    pub fn recognizes(&self, token: &str) -> bool {
        let bare = crate::tokens::strip_any_prefix(token, self.prefixes.as_slice()).unwrap_or(token);
        self.has_glyph(bare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn demo_entry() -> IconFontEntry {
        IconFontEntry::new("demo", "dm-", glyphs(&["star", "heart"]))
            .with_slot("glyph", SlotConfig::default().with_max(2))
            .with_slot("fw", SlotConfig::value("DM-FW"))
            .with_slot("style", SlotConfig::choices(["bold", "thin"]))
    }

    #[test]
    fn test_glyph_slot_moves_last() {
        let font = IconFont::compile(demo_entry(), 5).unwrap();
        let names: Vec<&str> = font.slots().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["fw", "style", "glyph"]);

        let glyph = &font.slots()[2];
        assert!(glyph.required);
        assert_eq!(glyph.max, 2);
        assert!(matches!(&glyph.rule, SlotRule::Pattern { source, .. } if source == DEFAULT_GLYPH_PATTERN));
    }

    #[test]
    fn test_implicit_glyph_slot() {
        let entry = IconFontEntry::new("plain", "pl-", glyphs(&["dot"]));
        let font = IconFont::compile(entry, 0).unwrap();
        assert_eq!(font.slots().len(), 1);
        assert!(font.slots()[0].is_glyph());
        assert!(font.slots()[0].required);
        assert_eq!(font.slots()[0].max, 1);
    }

    #[test]
    fn test_match_kinds() {
        let font = IconFont::compile(demo_entry(), 5).unwrap();
        let fw = &font.slots()[0];
        let style = &font.slots()[1];

        assert_eq!(fw.match_token("dm-fw").map(|m| m.kind), Some(MatchKind::Exact));
        assert!(fw.match_token("fw").is_none());

        let explicit = style.match_token("dm-bold").unwrap();
        assert_eq!(explicit.kind, MatchKind::Explicit);
        assert_eq!(explicit.body, "bold");
        assert_eq!(style.canonical(&explicit), "dm-bold");

        let inferred = style.match_token("thin").unwrap();
        assert_eq!(inferred.kind, MatchKind::Inferred);
        assert_eq!(style.canonical(&inferred), "dm-thin");

        assert!(style.match_token("dm-boldish").is_none());
    }

    #[test]
    fn test_slot_prefix_override() {
        let entry = IconFontEntry::new("demo", "dm-", glyphs(&["star"]))
            .with_slot("size", SlotConfig::pattern("[1-9]x").with_prefixes(["sz-"]));
        let font = IconFont::compile(entry, 0).unwrap();
        let size = &font.slots()[0];
        assert_eq!(size.match_token("sz-2x").map(|m| m.kind), Some(MatchKind::Explicit));
        assert_eq!(size.match_token("dm-2x"), None);
    }

    #[test]
    fn test_pattern_groups_without_slot_prefixes() {
        let entry = IconFontEntry::new("demo", "dm-", glyphs(&["star"])).with_slot(
            "size",
            SlotConfig::pattern("(big|small)x").with_prefixes(Vec::<String>::new()),
        );
        let font = IconFont::compile(entry, 0).unwrap();
        let size = &font.slots()[0];

        let bare = size.match_token("bigx").unwrap();
        assert_eq!(bare.kind, MatchKind::Inferred);
        assert_eq!(bare.body, "bigx");
        assert_eq!(size.canonical(&bare), "bigx");
        assert_eq!(size.match_token("dm-bigx"), None);
    }

    #[test]
    fn test_pattern_groups_with_prefix() {
        let entry = IconFontEntry::new("demo", "dm-", glyphs(&["star"]))
            .with_slot("size", SlotConfig::pattern("(big|small)x"));
        let font = IconFont::compile(entry, 0).unwrap();
        let size = &font.slots()[0];

        let bare = size.match_token("smallx").unwrap();
        assert_eq!(bare.kind, MatchKind::Inferred);
        let prefixed = size.match_token("dm-smallx").unwrap();
        assert_eq!(prefixed.kind, MatchKind::Explicit);
        assert_eq!(prefixed.body, "smallx");
    }

    #[test]
    fn test_explicit_match_uses_first_prefix() {
        let mut entry = IconFontEntry::new("demo", "dm-", glyphs(&["star"]))
            .with_slot("style", SlotConfig::choices(["bold", "thin"]));
        entry.prefixes.push("demo-".to_string());
        let font = IconFont::compile(entry, 0).unwrap();
        let style = &font.slots()[0];

        let second = style.match_token("demo-bold").unwrap();
        assert_eq!(second.kind, MatchKind::Explicit);
        assert_eq!(second.body, "bold");
        assert_eq!(style.canonical(&second), "dm-bold");
    }

    #[test]
    fn test_recognizes_with_and_without_prefix() {
        let font = IconFont::compile(demo_entry(), 0).unwrap();
        assert!(font.recognizes("dm-star"));
        assert!(font.recognizes("heart"));
        assert!(!font.recognizes("dm-moon"));
    }

    #[test]
    fn test_exact_glyph_slot_rejected() {
        let entry = IconFontEntry::new("bad", "b-", glyphs(&["x"]))
            .with_slot("glyph", SlotConfig::value("b-x"));
        assert!(matches!(
            IconFont::compile(entry, 0),
            Err(RegistrationError::ExactGlyphSlot { .. })
        ));
    }

    #[test]
    fn test_conflicting_rules_rejected() {
        let mut slot = SlotConfig::value("b-fw");
        slot.pattern = Some("fw".to_string());
        let entry = IconFontEntry::new("bad", "b-", glyphs(&["x"])).with_slot("fw", slot);
        assert!(matches!(
            IconFont::compile(entry, 0),
            Err(RegistrationError::ConflictingRules { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let entry = IconFontEntry::new("bad", "b-", glyphs(&["x"]))
            .with_slot("size", SlotConfig::pattern("([1-9]x"));
        assert!(matches!(
            IconFont::compile(entry, 0),
            Err(RegistrationError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_entry_level_rejections() {
        let no_name = IconFontEntry::new("  ", "b-", glyphs(&["x"]));
        assert!(matches!(IconFont::compile(no_name, 0), Err(RegistrationError::MissingName)));

        let mut no_prefix = IconFontEntry::new("bad", "b-", glyphs(&["x"]));
        no_prefix.prefixes.clear();
        assert!(matches!(
            IconFont::compile(no_prefix, 0),
            Err(RegistrationError::NoPrefixes { .. })
        ));

        let empty_list = IconFontEntry::new("bad", "b-", Vec::new());
        assert!(matches!(
            IconFont::compile(empty_list, 0),
            Err(RegistrationError::EmptyList { .. })
        ));

        let blank_glyph = IconFontEntry::new("bad", "b-", glyphs(&["x", ""]));
        assert!(matches!(
            IconFont::compile(blank_glyph, 0),
            Err(RegistrationError::InvalidGlyph { .. })
        ));

        let zero_max = IconFontEntry::new("bad", "b-", glyphs(&["x"]))
            .with_slot("fw", SlotConfig::value("b-fw").with_max(0));
        assert!(matches!(
            IconFont::compile(zero_max, 0),
            Err(RegistrationError::ZeroMax { .. })
        ));

        let no_rule = IconFontEntry::new("bad", "b-", glyphs(&["x"]))
            .with_slot("fw", SlotConfig::default());
        assert!(matches!(
            IconFont::compile(no_rule, 0),
            Err(RegistrationError::MissingRule { .. })
        ));
    }
}
