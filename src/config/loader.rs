use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use super::core::PipelineConfig;
use super::rules::RuleSet;
use crate::errors::{Error, Result};

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate settings from a TOML string
pub fn parse_and_validate_settings(contents: &str) -> std::result::Result<PipelineConfig, String> {
    let config = toml::from_str::<PipelineConfig>(contents)
        .map_err(|e| format!("Failed to parse settings: {}", e))?;

    config.validate().map_err(|errors| errors.join("; "))?;
    Ok(config)
}

/// Load pipeline settings. No path means the built-in defaults.
pub fn load_settings(path: Option<&Path>) -> Result<PipelineConfig> {
    let Some(path) = path else {
        tracing::debug!("No settings file given. Using default settings.");
        return Ok(PipelineConfig::default());
    };

    let contents = read_config_file(path).map_err(|e| Error::config(path, e.to_string()))?;
    let config = parse_and_validate_settings(&contents).map_err(|e| Error::config(path, e))?;
    tracing::debug!("Loaded settings from {}", path.display());
    Ok(config)
}

/// Load classification rules. No path means the built-in rule set.
pub fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    let Some(path) = path else {
        tracing::debug!("No rule file given. Using built-in rules.");
        return Ok(RuleSet::default_rules());
    };

    let contents = read_config_file(path).map_err(|e| Error::config(path, e.to_string()))?;
    let rules = RuleSet::from_yaml(&contents).map_err(|e| Error::config(path, e))?;
    tracing::debug!("Loaded {} rules from {}", rules.len(), path.display());
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let config = parse_and_validate_settings(indoc! {r#"
            min_met_value = 3.0
            band_scheme = "three"

            [walking]
            min_met_value = 3.5
        "#})
        .unwrap();

        assert_eq!(config.min_met_value, 3.0);
        assert_eq!(config.band_scheme, crate::core::BandScheme::Three);
        assert_eq!(config.walking.min_met_value, 3.5);
        assert_eq!(config.walking.heading, "Walking");
        assert_eq!(config.excluded_categories.len(), 14);
        assert_eq!(config.conversion.mph_to_kmh, 1.60934);
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let err = parse_and_validate_settings("min_met_value = -2.0").unwrap_err();
        assert!(err.contains("min_met_value"));

        let err = parse_and_validate_settings("band_scheme = \"five\"").unwrap_err();
        assert!(err.starts_with("Failed to parse settings"));
    }

    #[test]
    fn test_unknown_settings_keys_are_rejected() {
        let err = parse_and_validate_settings("walking_min_met = 4.0").unwrap_err();
        assert!(err.starts_with("Failed to parse settings"));
        assert!(err.contains("walking_min_met"));

        let err = parse_and_validate_settings(indoc! {r#"
            [walking]
            min_met = 4.0
        "#})
        .unwrap_err();
        assert!(err.contains("min_met"));

        let err = parse_and_validate_settings(indoc! {r#"
            [conversion]
            mph_to_kph = 1.6
        "#})
        .unwrap_err();
        assert!(err.contains("mph_to_kph"));
    }

    #[test]
    fn test_load_settings_missing_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("metmap.toml");

        let err = load_settings(Some(&missing)).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_load_rules_defaults_without_path() {
        let rules = load_rules(None).unwrap();
        assert!(!rules.is_empty());
    }

    #[test]
    fn test_load_rules_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("category-config.yaml");
        fs::write(
            &path,
            indoc! {"
                rules:
                  - level1_main: Endurance Sports
                    level2_subcategory: Running
                    level3_activity: Running
                    heading: Running
            "},
        )
        .unwrap();

        let rules = load_rules(Some(&path)).unwrap();
        assert_eq!(rules.len(), 1);
    }
}
