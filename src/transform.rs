//! Imperial to metric rewriting of activity descriptions.
//!
//! Conversions run in a fixed order: speed, pace, weight ranges, single
//! weights, yards, inches. Ranges go before single weights so `10-20 lb`
//! becomes one range instead of two separate values.

use crate::config::ConversionFactors;
use crate::core::RawRecord;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const NUMBER: &str = r"(\d+(?:\.\d+)?)";

static SPEED: Lazy<Regex> = Lazy::new(|| pattern(&format!(r"{NUMBER}\s*mph\b")));
static PACE: Lazy<Regex> = Lazy::new(|| pattern(&format!(r"{NUMBER}\s*min/mile\b")));
static WEIGHT_DASH_RANGE: Lazy<Regex> =
    Lazy::new(|| pattern(&format!(r"{NUMBER}\s*-\s*{NUMBER}\s*lbs?\b")));
static WEIGHT_TO_RANGE: Lazy<Regex> =
    Lazy::new(|| pattern(&format!(r"{NUMBER}\s+to\s+{NUMBER}\s*lbs?\b")));
static WEIGHT_LB: Lazy<Regex> = Lazy::new(|| pattern(&format!(r"{NUMBER}\s*lbs?\b")));
static WEIGHT_POUND: Lazy<Regex> = Lazy::new(|| pattern(&format!(r"{NUMBER}\s*pounds?\b")));
static YARDS: Lazy<Regex> = Lazy::new(|| pattern(&format!(r"{NUMBER}\s*yards?\b")));
static INCHES: Lazy<Regex> = Lazy::new(|| pattern(&format!(r"{NUMBER}\s*-?\s*inch(?:es)?\b")));

/// Continuation after a single `lb` that marks it as the start of a range.
static RANGE_CONTINUATION: Lazy<Regex> = Lazy::new(|| pattern(r"^(?:\s*-|\s+to\b)"));

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("valid unit pattern")
}

/// Rewrites imperial measurements using the configured factors.
#[derive(Debug, Clone, Copy)]
pub struct UnitConverter {
    factors: ConversionFactors,
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new(ConversionFactors::default())
    }
}

impl UnitConverter {
    pub fn new(factors: ConversionFactors) -> Self {
        Self { factors }
    }

    /// Convert every supported imperial phrase in `text`.
    pub fn convert(&self, text: &str) -> String {
        let text = self.convert_speed(text);
        let text = self.convert_pace(&text);
        let text = self.convert_weight(&text);
        self.convert_distance(&text)
    }

    pub fn convert_record(&self, record: RawRecord) -> RawRecord {
        RawRecord {
            description: self.convert(&record.description),
            ..record
        }
    }

    fn convert_speed(&self, text: &str) -> String {
        let factor = self.factors.mph_to_kmh;
        replace_numbers(&SPEED, text, |caps, _| {
            Some(format!("{:.1} km/h", number(caps, 1)? * factor))
        })
    }

    fn convert_pace(&self, text: &str) -> String {
        let factor = self.factors.mph_to_kmh;
        replace_numbers(&PACE, text, |caps, _| {
            Some(format!("{:.1} min/km", number(caps, 1)? / factor))
        })
    }

    fn convert_weight(&self, text: &str) -> String {
        let text = replace_numbers(&WEIGHT_DASH_RANGE, text, |caps, _| self.kg_range(caps));
        let text = replace_numbers(&WEIGHT_TO_RANGE, &text, |caps, _| self.kg_range(caps));
        let text = replace_numbers(&WEIGHT_LB, &text, |caps, rest| {
            if RANGE_CONTINUATION.is_match(rest) {
                None
            } else {
                self.kg_single(caps)
            }
        });
        replace_numbers(&WEIGHT_POUND, &text, |caps, _| self.kg_single(caps))
    }

    fn kg_range(&self, caps: &Captures) -> Option<String> {
        let factor = self.factors.lb_to_kg;
        Some(format!(
            "{:.1}-{:.1} kg",
            number(caps, 1)? * factor,
            number(caps, 2)? * factor
        ))
    }

    fn kg_single(&self, caps: &Captures) -> Option<String> {
        Some(format!("{:.1} kg", number(caps, 1)? * self.factors.lb_to_kg))
    }

    fn convert_distance(&self, text: &str) -> String {
        let yards = self.factors.yards_to_meters;
        let inches = self.factors.inches_to_cm;
        let text = replace_numbers(&YARDS, text, |caps, _| {
            Some(format!("{:.0} meters", number(caps, 1)? * yards))
        });
        replace_numbers(&INCHES, &text, |caps, _| {
            Some(format!("{:.0} cm", number(caps, 1)? * inches))
        })
    }
}

fn number(caps: &Captures, group: usize) -> Option<f64> {
    caps.get(group)?.as_str().parse().ok()
}

/// Replace every match of `re` with the closure's output. The closure also
/// sees the text after the match; returning `None` keeps the match as is.
fn replace_numbers<F>(re: &Regex, text: &str, mut replace: F) -> String
where
    F: FnMut(&Captures, &str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        match replace(&caps, &text[whole.end()..]) {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(whole.as_str()),
        }
        last = whole.end();
    }

    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn convert(text: &str) -> String {
        UnitConverter::default().convert(text)
    }

    #[test]
    fn test_speed() {
        assert_eq!(convert("Running, 7 mph"), "Running, 11.3 km/h");
        assert_eq!(convert("bicycling, 12-13.9mph"), "bicycling, 12-22.4 km/h");
    }

    #[test]
    fn test_pace() {
        assert_eq!(convert("running, 10 min/mile"), "running, 6.2 min/km");
    }

    #[test]
    fn test_weight_ranges_before_singles() {
        assert_eq!(convert("carrying 10-20 lb load"), "carrying 4.5-9.1 kg load");
        assert_eq!(convert("carrying 10 to 20 lbs"), "carrying 4.5-9.1 kg");
        assert_eq!(convert("vest, 15 lbs"), "vest, 6.8 kg");
        assert_eq!(convert("backpack, 42 pounds"), "backpack, 19.1 kg");
    }

    #[test]
    fn test_single_lb_followed_by_range_marker_is_left_alone() {
        assert_eq!(convert("10 lb - 20 lb"), "10 lb - 9.1 kg");
    }

    #[test]
    fn test_distance() {
        assert_eq!(convert("swimming, 100 yards"), "swimming, 91 meters");
        assert_eq!(convert("step aerobics, 6-8 inch step"), "step aerobics, 6-20 cm step");
        assert_eq!(convert("12 inches deep snow"), "30 cm deep snow");
    }

    #[test]
    fn test_metric_text_is_unchanged() {
        let text = "running, 11.3 km/h, 6.2 min/km, carrying 9.1 kg over 91 meters, 30 cm";
        assert_eq!(convert(text), text);
        assert_eq!(convert(&convert("Running, 7 mph")), convert("Running, 7 mph"));
    }

    #[test]
    fn test_unit_words_inside_other_words_are_untouched() {
        assert_eq!(convert("5 lbsomething"), "5 lbsomething");
    }

    #[test]
    fn test_convert_record_keeps_other_fields() {
        let record = RawRecord::new("Running", "12020", 7.5, "running, 7 mph");
        let converted = UnitConverter::default().convert_record(record);
        assert_eq!(converted.heading, "Running");
        assert_eq!(converted.code, "12020");
        assert_eq!(converted.description, "running, 11.3 km/h");
    }
}
