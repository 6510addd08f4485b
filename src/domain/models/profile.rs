use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumString;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    EnumIter,
    EnumString,
    EnumVariantNames,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    EnumIter,
    EnumString,
    EnumVariantNames,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Experience {
    Beginner,
    Intermediate,
    Advanced,
}

/// Steps through `None` followed by every variant, wrapping at both ends.
pub fn cycle_option<T: IntoEnumIterator + PartialEq + Copy>(
    current: Option<T>,
    forward: bool,
) -> Option<T> {
    let mut options: Vec<Option<T>> = vec![None];
    options.extend(T::iter().map(Some));

    let idx = options
        .iter()
        .position(|option| return *option == current)
        .unwrap_or(0);

    let next = if forward {
        (idx + 1) % options.len()
    } else {
        (idx + options.len() - 1) % options.len()
    };

    return options[next];
}
