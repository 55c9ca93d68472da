//! Language utilities for localization language codes
//!
//! Exported documents are named after the project's language codes, which follow
//! the BCP 47 shape (`en`, `pt-BR`, `zh-Hans`) or the special `Base` code.
//! Only the primary subtag is checked against ISO 639.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Primary subtag of a language code (`pt` for `pt-BR`)
pub fn primary_subtag(code: &str) -> &str {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
}

/// Check that a code is usable as a document file name
pub fn validate_language_code(code: &str) -> Result<()> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Language code must not be empty"));
    }
    if trimmed != code {
        return Err(anyhow!("Language code has surrounding whitespace: '{}'", code));
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(anyhow!("Invalid language code: {}", code));
    }
    Ok(())
}

/// Get the English language name for a code
pub fn get_language_name(code: &str) -> Result<String> {
    let primary = primary_subtag(code).to_lowercase();
    let lang = match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => Language::from_639_3(&primary),
        _ => None,
    };
    lang.map(|l| l.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))
}

/// Whether the code names a known language (or the `Base` development language)
pub fn is_known_language(code: &str) -> bool {
    code.eq_ignore_ascii_case("base") || get_language_name(code).is_ok()
}
