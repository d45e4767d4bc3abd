//! Plan kind definitions.
//!
//! Represents the fixed-duration access plans sold for App Queima.

use serde::{Deserialize, Serialize};

/// Access plan kind.
///
/// A closed set of fixed-duration plans. Provider-facing display names
/// (which carry emoji) live in the catalog; this type is what the rest of
/// the system passes around and persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanKind {
    /// 30-day basic access.
    #[serde(rename = "30d")]
    ThirtyDay,

    /// 90-day full access.
    #[serde(rename = "90d")]
    NinetyDay,

    /// 180-day full access.
    #[serde(rename = "180d")]
    HundredEightyDay,
}

impl PlanKind {
    /// Plan duration in days.
    pub fn duration_days(&self) -> i64 {
        match self {
            PlanKind::ThirtyDay => 30,
            PlanKind::NinetyDay => 90,
            PlanKind::HundredEightyDay => 180,
        }
    }

    /// All plan kinds, shortest first.
    pub fn all() -> [PlanKind; 3] {
        [
            PlanKind::ThirtyDay,
            PlanKind::NinetyDay,
            PlanKind::HundredEightyDay,
        ]
    }
}

impl std::fmt::Display for PlanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlanKind::ThirtyDay => "30d",
            PlanKind::NinetyDay => "90d",
            PlanKind::HundredEightyDay => "180d",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_are_correct() {
        assert_eq!(PlanKind::ThirtyDay.duration_days(), 30);
        assert_eq!(PlanKind::NinetyDay.duration_days(), 90);
        assert_eq!(PlanKind::HundredEightyDay.duration_days(), 180);
    }

    #[test]
    fn kind_serializes_as_short_code() {
        let json = serde_json::to_string(&PlanKind::NinetyDay).unwrap();
        assert_eq!(json, "\"90d\"");
    }

    #[test]
    fn kind_deserializes_from_short_code() {
        let kind: PlanKind = serde_json::from_str("\"180d\"").unwrap();
        assert_eq!(kind, PlanKind::HundredEightyDay);
    }

    #[test]
    fn display_matches_serde_code() {
        assert_eq!(PlanKind::ThirtyDay.to_string(), "30d");
    }
}
