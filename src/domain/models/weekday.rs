#[cfg(test)]
#[path = "weekday_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumVariantNames,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Mon => return "Mon",
            Weekday::Tue => return "Tue",
            Weekday::Wed => return "Wed",
            Weekday::Thu => return "Thu",
            Weekday::Fri => return "Fri",
            Weekday::Sat => return "Sat",
            Weekday::Sun => return "Sun",
        }
    }

    pub fn all() -> Vec<Weekday> {
        return Weekday::iter().collect();
    }

    /// Resolves short and long day names, case insensitive. `Thurs`, `weds` and
    /// `monday` are all accepted.
    pub fn parse(text: &str) -> Option<Weekday> {
        let key = text.trim().to_lowercase();
        let day = match key.as_str() {
            "mon" | "monday" => Weekday::Mon,
            "tue" | "tues" | "tuesday" => Weekday::Tue,
            "wed" | "weds" | "wednesday" => Weekday::Wed,
            "thu" | "thur" | "thurs" | "thursday" => Weekday::Thu,
            "fri" | "friday" => Weekday::Fri,
            "sat" | "saturday" => Weekday::Sat,
            "sun" | "sunday" => Weekday::Sun,
            _ => return None,
        };

        return Some(day);
    }
}
