//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub suggestions: SuggestionSettings,
    pub matching: MatchingSettings,
    pub completion: CompletionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionSettings {
    pub max_precomputed: usize,
    pub max_visible: usize,
    pub expanded_candidates: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    pub cover_unaligned: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionSettings {
    pub min_word_prefix: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive_usize!(suggestions.max_precomputed);
    check_positive_usize!(suggestions.max_visible);
    check_positive_usize!(suggestions.expanded_candidates);
    check_positive_usize!(completion.min_word_prefix);

    if s.suggestions.max_visible > s.suggestions.max_precomputed {
        return Err(SettingsError::InvalidValue {
            field: "suggestions.max_visible".to_string(),
            reason: "must not exceed suggestions.max_precomputed".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.suggestions.max_precomputed, 100);
        assert_eq!(s.suggestions.max_visible, 4);
        assert_eq!(s.suggestions.expanded_candidates, 1);
        assert!(s.matching.cover_unaligned);
        assert_eq!(s.completion.min_word_prefix, 1);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[suggestions]
max_precomputed = 20
max_visible = 6
expanded_candidates = 3

[matching]
cover_unaligned = false

[completion]
min_word_prefix = 2
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.suggestions.max_precomputed, 20);
        assert_eq!(s.suggestions.max_visible, 6);
        assert_eq!(s.suggestions.expanded_candidates, 3);
        assert!(!s.matching.cover_unaligned);
        assert_eq!(s.completion.min_word_prefix, 2);
    }

    #[test]
    fn error_zero_max_visible() {
        let toml = r#"
[suggestions]
max_precomputed = 100
max_visible = 0
expanded_candidates = 1

[matching]
cover_unaligned = true

[completion]
min_word_prefix = 1
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("suggestions.max_visible"));
    }

    #[test]
    fn error_visible_exceeds_precomputed() {
        let toml = r#"
[suggestions]
max_precomputed = 3
max_visible = 4
expanded_candidates = 1

[matching]
cover_unaligned = true

[completion]
min_word_prefix = 1
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("max_precomputed"));
    }

    #[test]
    fn error_zero_min_word_prefix() {
        let toml = r#"
[suggestions]
max_precomputed = 100
max_visible = 4
expanded_candidates = 1

[matching]
cover_unaligned = true

[completion]
min_word_prefix = 0
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("completion.min_word_prefix"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[suggestions]
max_precomputed = 100
max_visible = 4
expanded_candidates = 1
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
