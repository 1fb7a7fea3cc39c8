//! Class token utilities shared by font selection and classification.

use std::collections::HashMap;

/// Input accepted by the classifier: a class string or a list of them.
///
/// Every input is flattened into lower-cased, whitespace-separated tokens.
/// Blank entries disappear.
pub trait ClassInput {
    /// Flatten into normalized tokens.
    fn tokens(&self) -> Vec<String>;
}

impl ClassInput for str {
    fn tokens(&self) -> Vec<String> {
        split_lower(self).collect()
    }
}

impl ClassInput for String {
    fn tokens(&self) -> Vec<String> {
        self.as_str().tokens()
    }
}

impl<S: AsRef<str>> ClassInput for [S] {
    fn tokens(&self) -> Vec<String> {
        self.iter().flat_map(|s| split_lower(s.as_ref())).collect()
    }
}

impl<S: AsRef<str>> ClassInput for Vec<S> {
    fn tokens(&self) -> Vec<String> {
        self.as_slice().tokens()
    }
}

impl<S: AsRef<str>, const N: usize> ClassInput for [S; N] {
    fn tokens(&self) -> Vec<String> {
        self.as_slice().tokens()
    }
}

fn split_lower(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split_whitespace().map(str::to_lowercase)
}

/// Return the remainder of `token` after the first of `prefixes` it starts with.
pub fn strip_any_prefix<'a, S: AsRef<str>>(token: &'a str, prefixes: &[S]) -> Option<&'a str> {
    prefixes
        .iter()
        .find_map(|p| token.strip_prefix(p.as_ref()))
}

/// Replace every token found in `aliases`, re-splitting multi-token replacements.
pub fn expand_aliases(tokens: Vec<String>, aliases: &HashMap<String, String>) -> Vec<String> {
    if aliases.is_empty() {
        return tokens;
    }
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        match aliases.get(&token) {
            Some(replacement) => out.extend(split_lower(replacement)),
            None => out.push(token),
        }
    }
    out
}

/// Join tokens with single spaces.
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}
