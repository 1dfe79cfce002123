//! Display unit system selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which units the calculator displays and which scale temperatures are entered in.
///
/// Fuel mass is always stored in pounds; the unit system only selects the
/// volume unit (gallons or liters) and the temperature scale (°F or °C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Gallons and °F
    #[default]
    Imperial,
    /// Liters and °C
    Metric,
}

impl UnitSystem {
    /// True for the metric system
    #[inline]
    #[must_use]
    pub fn is_metric(self) -> bool {
        matches!(self, UnitSystem::Metric)
    }

    /// Temperature unit suffix
    #[must_use]
    pub fn temperature_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "°F",
            UnitSystem::Metric => "°C",
        }
    }

    /// Volume unit suffix
    #[must_use]
    pub fn volume_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "GAL",
            UnitSystem::Metric => "L",
        }
    }

    /// The other unit system (what a toggle switches to)
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            UnitSystem::Imperial => UnitSystem::Metric,
            UnitSystem::Metric => UnitSystem::Imperial,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Imperial => write!(f, "imperial"),
            UnitSystem::Metric => write!(f, "metric"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_lowercase_tags() {
        assert_eq!(
            serde_json::to_string(&UnitSystem::Metric).unwrap(),
            "\"metric\""
        );
        let parsed: UnitSystem = serde_json::from_str("\"imperial\"").unwrap();
        assert_eq!(parsed, UnitSystem::Imperial);
    }

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(UnitSystem::Imperial.toggled(), UnitSystem::Metric);
        assert_eq!(UnitSystem::Imperial.toggled().toggled(), UnitSystem::Imperial);
    }
}
