//! Category rules for the classifier.
//!
//! Rules are plain data. Order is priority: the classifier walks the list and
//! the first rule whose matcher clauses all hold wins. A rule file looks like:
//!
//! ```yaml
//! rules:
//!   - level1_main: Endurance Sports
//!     level2_subcategory: Bicycling
//!     level3_activity: Stationary Bike
//!     heading: Bicycling
//!     keywords_all: [stationary]
//!   - level1_main: Sports
//!     level2_subcategory: Racket Sports
//!     level3_activity: Tennis
//!     heading: Sports
//!     keywords_all: [tennis]
//!     keywords_none: [table]
//! ```

use serde::{Deserialize, Serialize};

/// One classification rule: fixed level labels plus matcher clauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    #[serde(rename = "level1_main")]
    pub level1: String,

    #[serde(rename = "level2_subcategory")]
    pub level2: String,

    #[serde(rename = "level3_activity")]
    pub level3: String,

    /// Major heading the record must carry, compared exactly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,

    /// Every keyword must appear in the lowercased description
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords_all: Vec<String>,

    /// At least one keyword must appear. An explicitly empty list never matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords_any: Option<Vec<String>>,

    /// No keyword may appear
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords_none: Vec<String>,
}

impl CategoryRule {
    pub fn new(level1: &str, level2: &str, level3: &str) -> Self {
        Self {
            level1: level1.to_string(),
            level2: level2.to_string(),
            level3: level3.to_string(),
            heading: None,
            keywords_all: Vec::new(),
            keywords_any: None,
            keywords_none: Vec::new(),
        }
    }

    pub fn heading(mut self, heading: &str) -> Self {
        self.heading = Some(heading.to_string());
        self
    }

    pub fn all(mut self, keywords: &[&str]) -> Self {
        self.keywords_all = to_strings(keywords);
        self
    }

    pub fn any(mut self, keywords: &[&str]) -> Self {
        self.keywords_any = Some(to_strings(keywords));
        self
    }

    pub fn none(mut self, keywords: &[&str]) -> Self {
        self.keywords_none = to_strings(keywords);
        self
    }

    fn normalize(&mut self) {
        lowercase_all(&mut self.keywords_all);
        if let Some(any) = self.keywords_any.as_mut() {
            lowercase_all(any);
        }
        lowercase_all(&mut self.keywords_none);
    }
}

/// Ordered rule list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<CategoryRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Parse a YAML rule document and check every rule is usable.
    pub fn from_yaml(contents: &str) -> Result<Self, String> {
        let mut set: RuleSet = serde_yaml::from_str(contents)
            .map_err(|e| format!("Failed to parse rule configuration: {}", e))?;

        if set.rules.is_empty() {
            return Err("rule configuration contains no rules".to_string());
        }
        for (index, rule) in set.rules.iter().enumerate() {
            for (field, value) in [
                ("level1_main", &rule.level1),
                ("level2_subcategory", &rule.level2),
                ("level3_activity", &rule.level3),
            ] {
                if value.trim().is_empty() {
                    return Err(format!("rule {} has an empty {}", index + 1, field));
                }
            }
        }

        set.rules.iter_mut().for_each(CategoryRule::normalize);
        Ok(set)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter()
    }

    /// Built-in rules covering the exercise headings of the compendium.
    pub fn default_rules() -> Self {
        let mut rules = Vec::new();
        rules.extend(endurance_sports());
        rules.extend(fitness_and_wellness());
        rules.extend(sports());
        Self { rules }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::default_rules()
    }
}

fn endurance_sports() -> Vec<CategoryRule> {
    const L1: &str = "Endurance Sports";
    vec![
        CategoryRule::new(L1, "Running", "Running").heading("Running"),
        CategoryRule::new(L1, "Bicycling", "Stationary Bike")
            .heading("Bicycling")
            .all(&["stationary"]),
        CategoryRule::new(L1, "Bicycling", "Bicycling").heading("Bicycling"),
        CategoryRule::new(L1, "Walking", "Walking").heading("Walking"),
        CategoryRule::new(L1, "Winter Sports", "Cross-Country Skiing")
            .heading("Winter Activities")
            .all(&["skiing", "cross"]),
        CategoryRule::new(L1, "Winter Sports", "Downhill Skiing")
            .heading("Winter Activities")
            .all(&["skiing", "downhill"]),
        CategoryRule::new(L1, "Winter Sports", "Snowboarding")
            .heading("Winter Activities")
            .all(&["snowboard"]),
        CategoryRule::new(L1, "Winter Sports", "Ice Skating")
            .heading("Winter Activities")
            .all(&["skating", "ice"]),
    ]
}

fn fitness_and_wellness() -> Vec<CategoryRule> {
    const L1: &str = "Fitness & Wellness";
    const CONDITIONING: &str = "Conditioning Exercise";
    vec![
        CategoryRule::new(L1, "Dancing", "Dancing").heading("Dancing"),
        CategoryRule::new(L1, "Mind-Body", "Yoga")
            .heading(CONDITIONING)
            .all(&["yoga"]),
        CategoryRule::new(L1, "Mind-Body", "Pilates")
            .heading(CONDITIONING)
            .all(&["pilates"]),
        CategoryRule::new(L1, "Strength & Conditioning", "Aerobics & Cardio Classes")
            .heading(CONDITIONING)
            .all(&["aerobic"]),
        CategoryRule::new(L1, "Indoor Cardio", "Rowing Machine")
            .heading(CONDITIONING)
            .all(&["rowing", "stationary"]),
        CategoryRule::new(L1, "Indoor Cardio", "Elliptical Trainer")
            .heading(CONDITIONING)
            .all(&["elliptical"]),
        CategoryRule::new(L1, "Strength & Conditioning", "Weight Training")
            .heading(CONDITIONING)
            .any(&["weight", "resistance"]),
        CategoryRule::new(L1, "Strength & Conditioning", "Circuit Training")
            .heading(CONDITIONING)
            .all(&["circuit"]),
        CategoryRule::new(L1, "Strength & Conditioning", "General Conditioning")
            .heading(CONDITIONING)
            .any(&["calisthenics", "rope", "conditioning"]),
    ]
}

fn sports() -> Vec<CategoryRule> {
    const L1: &str = "Sports";
    const TEAM: &str = "Team Sports";
    const RACKET: &str = "Racket Sports";
    const COMBAT: &str = "Combat Sports";
    const WATER: &str = "Water Sports";
    vec![
        CategoryRule::new(L1, TEAM, "Basketball")
            .heading("Sports")
            .all(&["basketball"]),
        CategoryRule::new(L1, TEAM, "Soccer")
            .heading("Sports")
            .all(&["soccer"]),
        CategoryRule::new(L1, TEAM, "Soccer")
            .heading("Sports")
            .all(&["football", "touch"]),
        CategoryRule::new(L1, TEAM, "Volleyball")
            .heading("Sports")
            .all(&["volleyball"]),
        CategoryRule::new(L1, TEAM, "Ice Hockey")
            .heading("Sports")
            .all(&["hockey", "ice"]),
        CategoryRule::new(L1, TEAM, "Field Hockey")
            .heading("Sports")
            .all(&["hockey", "field"]),
        CategoryRule::new(L1, TEAM, "Floorball")
            .heading("Sports")
            .all(&["floorball"]),
        CategoryRule::new(L1, RACKET, "Tennis")
            .heading("Sports")
            .all(&["tennis"])
            .none(&["table"]),
        CategoryRule::new(L1, RACKET, "Badminton")
            .heading("Sports")
            .all(&["badminton"]),
        CategoryRule::new(L1, RACKET, "Squash")
            .heading("Sports")
            .all(&["squash"]),
        CategoryRule::new(L1, COMBAT, "Boxing")
            .heading("Sports")
            .all(&["boxing"]),
        CategoryRule::new(L1, COMBAT, "Martial Arts")
            .heading("Sports")
            .any(&["martial", "karate", "judo", "taekwondo"]),
        CategoryRule::new(L1, "Climbing", "Climbing")
            .heading("Sports")
            .any(&["climbing", "rock"]),
        CategoryRule::new(L1, WATER, "Swimming")
            .heading("Water Activities")
            .all(&["swimming"]),
        CategoryRule::new(L1, WATER, "Kayaking")
            .heading("Water Activities")
            .all(&["kayak"]),
        CategoryRule::new(L1, WATER, "Rowing")
            .heading("Water Activities")
            .any(&["rowing", "canoe"]),
        CategoryRule::new(L1, WATER, "Water Aerobics")
            .heading("Water Activities")
            .all(&["water aerobic"]),
    ]
}

fn to_strings(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_string()).collect()
}

fn lowercase_all(keywords: &mut [String]) {
    for keyword in keywords.iter_mut() {
        *keyword = keyword.to_lowercase();
    }
}
