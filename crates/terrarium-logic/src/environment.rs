//! Environment evaluator - scores enclosure settings against optimal husbandry ranges.
//!
//! Every rule is checked in a fixed order. A violated rule subtracts its
//! penalty and appends one issue, so the issue list is both complete and
//! stable across calls.

use serde::{Deserialize, Serialize};

use crate::constants::husbandry::*;

/// Externally supplied enclosure settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Basking spot temperature in °F.
    pub basking_temp: i32,
    /// Cool side temperature in °F.
    pub cool_temp: i32,
    /// Relative humidity in percent.
    pub humidity: i32,
    /// Whether the UVB lamp is on.
    pub uvb_on: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            basking_temp: 100,
            cool_temp: 80,
            humidity: 35,
            uvb_on: true,
        }
    }
}

impl Environment {
    /// Mean of the basking and cool side temperatures.
    pub fn average_temp(&self) -> f32 {
        (self.basking_temp + self.cool_temp) as f32 / 2.0
    }
}

/// A single husbandry problem found by [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvironmentIssue {
    BaskingTooCold,
    BaskingTooHot,
    CoolSideTooCold,
    CoolSideTooWarm,
    HumidityTooLow,
    HumidityTooHigh,
    UvbOff,
    TankDirty,
}

impl EnvironmentIssue {
    /// Score penalty for this issue.
    pub fn penalty(self) -> i32 {
        match self {
            Self::BaskingTooCold => BASKING_COLD_PENALTY,
            Self::BaskingTooHot => BASKING_HOT_PENALTY,
            Self::CoolSideTooCold => COOL_COLD_PENALTY,
            Self::CoolSideTooWarm => COOL_WARM_PENALTY,
            Self::HumidityTooLow => HUMIDITY_LOW_PENALTY,
            Self::HumidityTooHigh => HUMIDITY_HIGH_PENALTY,
            Self::UvbOff => UVB_OFF_PENALTY,
            Self::TankDirty => DIRTY_TANK_PENALTY,
        }
    }

    /// Keeper-facing description.
    pub fn message(self) -> &'static str {
        match self {
            Self::BaskingTooCold => "Basking spot too cold!",
            Self::BaskingTooHot => "Basking spot too hot!",
            Self::CoolSideTooCold => "Cool side too cold!",
            Self::CoolSideTooWarm => "Cool side too warm!",
            Self::HumidityTooLow => "Humidity too low!",
            Self::HumidityTooHigh => "Humidity too high! Risk of respiratory infection.",
            Self::UvbOff => "UVB light is off! Dragon needs UV for vitamin D.",
            Self::TankDirty => "Tank needs cleaning!",
        }
    }
}

/// Result of an environment evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentReport {
    /// Composite quality, 0..=100.
    pub score: i32,
    /// Issues in check order.
    pub issues: Vec<EnvironmentIssue>,
}

impl EnvironmentReport {
    pub fn is_optimal(&self) -> bool {
        self.issues.is_empty()
    }

    /// Description of the first issue, if any.
    pub fn first_issue_message(&self) -> Option<&'static str> {
        self.issues.first().map(|issue| issue.message())
    }
}

/// Score the environment and tank cleanliness.
pub fn evaluate(env: &Environment, cleanliness: f32) -> EnvironmentReport {
    let mut issues = Vec::new();

    if env.basking_temp < BASKING_MIN {
        issues.push(EnvironmentIssue::BaskingTooCold);
    } else if env.basking_temp > BASKING_MAX {
        issues.push(EnvironmentIssue::BaskingTooHot);
    }

    if env.cool_temp < COOL_MIN {
        issues.push(EnvironmentIssue::CoolSideTooCold);
    } else if env.cool_temp > COOL_MAX {
        issues.push(EnvironmentIssue::CoolSideTooWarm);
    }

    if env.humidity < HUMIDITY_MIN {
        issues.push(EnvironmentIssue::HumidityTooLow);
    } else if env.humidity > HUMIDITY_MAX {
        issues.push(EnvironmentIssue::HumidityTooHigh);
    }

    if !env.uvb_on {
        issues.push(EnvironmentIssue::UvbOff);
    }

    if cleanliness < CLEANLINESS_MIN {
        issues.push(EnvironmentIssue::TankDirty);
    }

    let penalty: i32 = issues.iter().map(|issue| issue.penalty()).sum();
    EnvironmentReport {
        score: (100 - penalty).max(0),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(basking: i32, cool: i32, humidity: i32, uvb_on: bool) -> Environment {
        Environment {
            basking_temp: basking,
            cool_temp: cool,
            humidity,
            uvb_on,
        }
    }

    #[test]
    fn test_optimal_environment() {
        let report = evaluate(&env(100, 80, 35, true), 100.0);
        assert_eq!(report.score, 100);
        assert!(report.is_optimal());
        assert_eq!(report.first_issue_message(), None);
    }

    #[test]
    fn test_everything_wrong_floors_at_zero() {
        let report = evaluate(&env(80, 70, 45, false), 40.0);
        assert_eq!(report.score, 0);
        assert_eq!(
            report.issues,
            vec![
                EnvironmentIssue::BaskingTooCold,
                EnvironmentIssue::CoolSideTooCold,
                EnvironmentIssue::HumidityTooHigh,
                EnvironmentIssue::UvbOff,
                EnvironmentIssue::TankDirty,
            ]
        );
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert!(evaluate(&env(95, 75, 30, true), 50.0).is_optimal());
        assert!(evaluate(&env(110, 85, 40, true), 50.0).is_optimal());
    }

    #[test]
    fn test_individual_penalties() {
        assert_eq!(evaluate(&env(111, 80, 35, true), 100.0).score, 75);
        assert_eq!(evaluate(&env(100, 86, 35, true), 100.0).score, 85);
        assert_eq!(evaluate(&env(100, 80, 29, true), 100.0).score, 90);
        assert_eq!(evaluate(&env(100, 80, 35, false), 100.0).score, 70);
        assert_eq!(evaluate(&env(100, 80, 35, true), 49.9).score, 85);
    }

    #[test]
    fn test_first_issue_follows_check_order() {
        let report = evaluate(&env(100, 80, 20, false), 100.0);
        assert_eq!(report.first_issue_message(), Some("Humidity too low!"));
        assert_eq!(report.score, 60);
    }

    #[test]
    fn test_average_temp() {
        assert_eq!(env(100, 80, 35, true).average_temp(), 90.0);
        assert_eq!(env(95, 60, 35, true).average_temp(), 77.5);
    }
}
