use serde::{Deserialize, Serialize};

use crate::core::BandScheme;

/// Root settings for a pipeline run.
///
/// Every stage receives this by reference; nothing in the pipeline reads
/// global state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Records below this MET value are dropped
    #[serde(default = "default_min_met_value")]
    pub min_met_value: f64,

    /// Major headings that are not exercise
    #[serde(default = "default_excluded_categories")]
    pub excluded_categories: Vec<String>,

    /// Walking handling
    #[serde(default)]
    pub walking: WalkingConfig,

    /// Intensity banding granularity
    #[serde(default)]
    pub band_scheme: BandScheme,

    /// Imperial to metric factors
    #[serde(default)]
    pub conversion: ConversionFactors,

    /// Classify records on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_met_value: default_min_met_value(),
            excluded_categories: default_excluded_categories(),
            walking: WalkingConfig::default(),
            band_scheme: BandScheme::default(),
            conversion: ConversionFactors::default(),
            parallel: default_parallel(),
        }
    }
}

impl PipelineConfig {
    pub fn is_excluded(&self, heading: &str) -> bool {
        self.excluded_categories.iter().any(|c| c == heading)
    }

    pub fn with_band_scheme(mut self, scheme: BandScheme) -> Self {
        self.band_scheme = scheme;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Collect every problem with the settings instead of stopping at the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !self.min_met_value.is_finite() || self.min_met_value < 0.0 {
            errors.push(format!(
                "min_met_value must be a non-negative number, got {}",
                self.min_met_value
            ));
        }
        if !self.walking.min_met_value.is_finite() || self.walking.min_met_value < 0.0 {
            errors.push(format!(
                "walking.min_met_value must be a non-negative number, got {}",
                self.walking.min_met_value
            ));
        }
        for (name, factor) in self.conversion.named() {
            if !factor.is_finite() || factor <= 0.0 {
                errors.push(format!(
                    "conversion.{} must be positive, got {}",
                    name, factor
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Walking records need a higher MET value or an exercise keyword.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WalkingConfig {
    #[serde(default = "default_walking_heading")]
    pub heading: String,

    #[serde(default = "default_walking_min_met")]
    pub min_met_value: f64,

    #[serde(default = "default_walking_keywords")]
    pub exercise_keywords: Vec<String>,
}

impl Default for WalkingConfig {
    fn default() -> Self {
        Self {
            heading: default_walking_heading(),
            min_met_value: default_walking_min_met(),
            exercise_keywords: default_walking_keywords(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConversionFactors {
    #[serde(default = "default_mph_to_kmh")]
    pub mph_to_kmh: f64,

    #[serde(default = "default_lb_to_kg")]
    pub lb_to_kg: f64,

    #[serde(default = "default_yards_to_meters")]
    pub yards_to_meters: f64,

    #[serde(default = "default_inches_to_cm")]
    pub inches_to_cm: f64,
}

impl Default for ConversionFactors {
    fn default() -> Self {
        Self {
            mph_to_kmh: default_mph_to_kmh(),
            lb_to_kg: default_lb_to_kg(),
            yards_to_meters: default_yards_to_meters(),
            inches_to_cm: default_inches_to_cm(),
        }
    }
}

impl ConversionFactors {
    fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("mph_to_kmh", self.mph_to_kmh),
            ("lb_to_kg", self.lb_to_kg),
            ("yards_to_meters", self.yards_to_meters),
            ("inches_to_cm", self.inches_to_cm),
        ]
    }
}

fn default_min_met_value() -> f64 {
    2.0
}

fn default_excluded_categories() -> Vec<String> {
    [
        "Inactivity",
        "Self Care",
        "Sexual Activity",
        "Miscellaneous",
        "Music Playing",
        "Occupation",
        "Home Activities",
        "Home Repair",
        "Religious Activities",
        "Volunteer Activities",
        "Transportation",
        "Lawn & Garden",
        "Fishing & Hunting",
        "Video Games",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_parallel() -> bool {
    true
}

fn default_walking_heading() -> String {
    "Walking".to_string()
}

fn default_walking_min_met() -> f64 {
    2.5
}

fn default_walking_keywords() -> Vec<String> {
    [
        "exercise", "brisk", "hiking", "backpack", "climbing", "stairs", "uphill", "nordic",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_mph_to_kmh() -> f64 {
    1.60934
}

fn default_lb_to_kg() -> f64 {
    0.453592
}

fn default_yards_to_meters() -> f64 {
    0.9144
}

fn default_inches_to_cm() -> f64 {
    2.54
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.excluded_categories.len(), 14);
        assert!(config.is_excluded("Lawn & Garden"));
        assert!(!config.is_excluded("Running"));
    }

    #[test]
    fn test_validate_accumulates_errors() {
        let mut config = PipelineConfig::default();
        config.min_met_value = -1.0;
        config.conversion.lb_to_kg = 0.0;
        config.conversion.inches_to_cm = f64::NAN;

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("min_met_value"));
        assert!(errors[1].contains("lb_to_kg"));
        assert!(errors[2].contains("inches_to_cm"));
    }
}
