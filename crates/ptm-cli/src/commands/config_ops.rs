use ptm_core::settings::{self, Settings};

use super::{read_file, CliError};

/// Install a custom settings file before any command reads the settings.
pub fn load_settings(file: &str) -> Result<(), CliError> {
    let content = read_file(file)?;
    settings::init_custom(content)?;
    Ok(())
}

pub fn validate_settings_file(file: &str) -> Result<Settings, CliError> {
    let content = read_file(file)?;
    Ok(settings::parse_settings_toml(&content)?)
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let s = die!(validate_settings_file(file), "Error: {}");
    println!(
        "OK: suggestions.max_precomputed={}, suggestions.max_visible={}, completion.min_word_prefix={}",
        s.suggestions.max_precomputed, s.suggestions.max_visible, s.completion.min_word_prefix
    );
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn validates_default_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(settings::default_toml().as_bytes()).unwrap();
        let s = validate_settings_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(s.suggestions.max_visible, 4);
    }

    #[test]
    fn rejects_invalid_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let bad = settings::default_toml().replace("max_visible = 4", "max_visible = 0");
        file.write_all(bad.as_bytes()).unwrap();
        assert!(matches!(
            validate_settings_file(file.path().to_str().unwrap()),
            Err(CliError::Settings(_))
        ));
    }
}
