//! Slot classification of class tokens.
//!
//! Given a resolved font, every token is offered to the font's slots in
//! order (glyph last). The first slot that accepts it wins. Tokens no slot
//! accepts go to an unclassified bucket, or are dropped in strict mode.
//!
//! # Rules applied per slot attempt
//!
//! 1. With inference off, unprefixed pattern/choice matches are skipped.
//! 2. A glyph match must name a glyph in the font's list.
//! 3. A slot precluded earlier in the call discards exact/explicit matches
//!    and lets inferred ones move on to later slots.
//! 4. A full slot does the same: exact/explicit matches are discarded,
//!    inferred ones move on and may end up unclassified.
//! 5. An exact/explicit acceptance adds the slot's `precludes` to the
//!    precluded set. Values those slots already hold are evicted: exact and
//!    explicit ones are discarded, inferred ones are offered to the slots
//!    again (and usually end up unclassified). Re-classifying the output
//!    therefore gives the same output.

use crate::error::ClassifyFailure;
use crate::font::{IconFont, MatchKind};
use crate::tokens::{expand_aliases, join_tokens};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// What to return when classification fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Fallback {
    /// Return an empty string.
    Disabled,
    /// Return the context's configured fallback classes.
    #[default]
    Configured,
    /// Classify these classes instead, returning empty if they fail too.
    Explicit(String),
}

/// Restricts which font a classification may use.
#[derive(Debug, Clone)]
pub enum FontSelector {
    /// Use this font without selection.
    Font(Arc<IconFont>),
    /// Use the registered font with this name.
    Name(String),
    /// Select among the registered fonts with these names.
    Names(Vec<String>),
}

/// Options for a classification call.
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Accept unprefixed pattern/choice matches
    pub infer: bool,
    /// Drop unclassified tokens instead of appending them
    pub strict: bool,
    /// Fallback policy
    pub fallback: Fallback,
    /// Font restriction
    pub font: Option<FontSelector>,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            infer: true,
            strict: false,
            fallback: Fallback::Configured,
            font: None,
        }
    }
}

impl ClassifyOptions {
    /// Drop unclassified tokens.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Require prefixes on pattern/choice matches.
    pub fn without_inference(mut self) -> Self {
        self.infer = false;
        self
    }

    /// Set the fallback policy.
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Restrict font selection.
    pub fn with_font(mut self, font: FontSelector) -> Self {
        self.font = Some(font);
        self
    }
}

/// A successful classification.
#[derive(Debug, Clone)]
pub struct Classification {
    /// The font the tokens were classified against
    pub font: Arc<IconFont>,
    /// Accepted classes per slot, in slot order (glyph last)
    pub slots: Vec<(String, Vec<String>)>,
    /// Tokens no slot accepted; always empty in strict mode
    pub unclassified: Vec<String>,
}

impl Classification {
    /// All classes in output order.
    pub fn classes(&self) -> Vec<&str> {
        self.slots
            .iter()
            .flat_map(|(_, values)| values.iter())
            .chain(self.unclassified.iter())
            .map(String::as_str)
            .collect()
    }

    /// All classes joined by single spaces.
    pub fn to_class_string(&self) -> String {
        join_tokens(self.classes().as_slice())
    }

    /// Classes accepted by one slot.
    pub fn slot(&self, name: &str) -> &[String] {
        self.slots
            .iter()
            .find(|(slot, _)| slot == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }
}

/// A value accepted into a slot, with the token it came from.
struct Accepted<'a> {
    class: String,
    token: &'a str,
    forced: bool,
}

/// Classify normalized tokens against an already resolved font.
pub fn classify_tokens(
    font: &Arc<IconFont>,
    tokens: Vec<String>,
    opts: &ClassifyOptions,
) -> Result<Classification, ClassifyFailure> {
    let tokens = expand_aliases(tokens, font.aliases());
    let slots = font.slots();
    let mut filled: Vec<Vec<Accepted<'_>>> = slots.iter().map(|_| Vec::new()).collect();
    let mut precluded: HashSet<&str> = HashSet::new();
    let mut unclassified = Vec::new();
    let mut pending: VecDeque<&str> = tokens.iter().map(String::as_str).collect();

    'tokens: while let Some(token) = pending.pop_front() {
        for (index, slot) in slots.iter().enumerate() {
            let Some(found) = slot.match_token(token) else {
                continue;
            };
            if !opts.infer && found.kind == MatchKind::Inferred {
                continue;
            }
            if slot.is_glyph() && !font.has_glyph(found.body) {
                if found.kind.is_forced() {
                    log::warn!("'{}' is not a glyph of icon font '{}'", token, font.name());
                } else {
                    log::debug!("'{}' is not a glyph of icon font '{}'", token, font.name());
                }
                continue;
            }

            let forced = found.kind.is_forced();
            if precluded.contains(slot.name.as_str()) {
                if forced {
                    log::debug!(
                        "Discarding '{}': slot '{}' of '{}' is precluded",
                        token,
                        slot.name,
                        font.name()
                    );
                    continue 'tokens;
                }
                continue;
            }
            if filled[index].len() >= slot.max {
                if forced {
                    log::debug!(
                        "Discarding '{}': slot '{}' of '{}' is full ({})",
                        token,
                        slot.name,
                        font.name(),
                        slot.max
                    );
                    continue 'tokens;
                }
                continue;
            }

            filled[index].push(Accepted {
                class: slot.canonical(&found),
                token,
                forced,
            });
            if !forced {
                continue 'tokens;
            }

            // Values a precluded slot already holds are evicted: forced ones
            // are discarded, inferred ones go back through the slots.
            let mut requeue = Vec::new();
            for target in &slot.precludes {
                if !precluded.insert(target.as_str()) || target == &slot.name {
                    continue;
                }
                let Some(target_index) = slots.iter().position(|s| &s.name == target) else {
                    continue;
                };
                for evicted in filled[target_index].drain(..) {
                    log::debug!(
                        "Evicting '{}' from slot '{}' of '{}': precluded by '{}'",
                        evicted.token,
                        target,
                        font.name(),
                        token
                    );
                    if !evicted.forced {
                        requeue.push(evicted.token);
                    }
                }
            }
            for evicted in requeue.into_iter().rev() {
                pending.push_front(evicted);
            }
            continue 'tokens;
        }

        if opts.strict {
            log::debug!("Dropping unclassified '{}' (strict)", token);
        } else {
            unclassified.push(token.to_string());
        }
    }

    let mut slot_values: Vec<(String, Vec<String>)> = Vec::with_capacity(slots.len());
    for (slot, accepted) in slots.iter().zip(filled) {
        let mut values: Vec<String> = accepted.into_iter().map(|a| a.class).collect();
        // A precluded slot must stay empty, default included.
        if slot.required && values.is_empty() && !precluded.contains(slot.name.as_str()) {
            match &slot.default {
                Some(default) => values.push(default.clone()),
                None => {
                    return Err(ClassifyFailure::MissingRequired {
                        font: font.name().to_string(),
                        slot: slot.name.clone(),
                    });
                }
            }
        }
        slot_values.push((slot.name.clone(), values));
    }

    Ok(Classification {
        font: Arc::clone(font),
        slots: slot_values,
        unclassified,
    })
}
