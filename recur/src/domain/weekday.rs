//! Weekdays and weekday sets for weekly patterns

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::RecurError;

/// Day of week, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "tuesday" | "tue" => Ok(Self::Tuesday),
            "wednesday" | "wed" => Ok(Self::Wednesday),
            "thursday" | "thu" => Ok(Self::Thursday),
            "friday" | "fri" => Ok(Self::Friday),
            "saturday" | "sat" => Ok(Self::Saturday),
            "sunday" | "sun" => Ok(Self::Sunday),
            _ => Err(format!("Unknown weekday: {}", s)),
        }
    }
}

/// Non-empty set of weekdays
///
/// Iteration order is calendar order (Monday..Sunday) regardless of the order
/// days were supplied in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeekdaySet(BTreeSet<Weekday>);

impl WeekdaySet {
    /// Build a set, rejecting an empty input
    pub fn new(days: impl IntoIterator<Item = Weekday>) -> Result<Self, RecurError> {
        let set: BTreeSet<Weekday> = days.into_iter().collect();
        if set.is_empty() {
            return Err(RecurError::EmptyWeekdays);
        }
        Ok(Self(set))
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().copied()
    }

    /// Number of distinct weekdays
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let days = Vec::<Weekday>::deserialize(deserializer)?;
        WeekdaySet::new(days).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_parse() {
        assert_eq!("mon".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert_eq!("Friday".parse::<Weekday>().unwrap(), Weekday::Friday);
        assert_eq!(" SUN ".parse::<Weekday>().unwrap(), Weekday::Sunday);
        assert!("funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_weekday_from_chrono() {
        assert_eq!(Weekday::from(chrono::Weekday::Wed), Weekday::Wednesday);
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sunday);
    }

    #[test]
    fn test_set_orders_by_calendar() {
        let set = WeekdaySet::new([Weekday::Friday, Weekday::Monday, Weekday::Wednesday]).unwrap();
        let days: Vec<Weekday> = set.iter().collect();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday]);
        assert_eq!(set.to_string(), "monday,wednesday,friday");
    }

    #[test]
    fn test_set_deduplicates() {
        let set = WeekdaySet::new([Weekday::Monday, Weekday::Monday]).unwrap();
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
        assert!(set.contains(Weekday::Monday));
        assert!(!set.contains(Weekday::Tuesday));
    }

    #[test]
    fn test_empty_set_rejected() {
        assert_eq!(WeekdaySet::new([]), Err(RecurError::EmptyWeekdays));
        let result: Result<WeekdaySet, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }

    #[test]
    fn test_set_serde() {
        let set: WeekdaySet = serde_json::from_str("[\"friday\",\"monday\"]").unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[\"monday\",\"friday\"]");
    }
}
